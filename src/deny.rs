//! Denial responses.
//!
//! A denial always carries the configured status. The diagnostic header and
//! body are only written in dev mode, so production responses reveal nothing
//! about which check failed.

use crate::web::ResponseWriter;

/// Content type of dev-mode denial bodies.
pub const DENIAL_CONTENT_TYPE: &str = "text/plain; charset=utf-8";

/// Returns the dev-mode diagnostic text for a reason code.
///
/// Outside dev mode this is always empty. Unknown reason codes map to
/// `"invalid parameter value"`.
///
/// # Examples
///
/// ```
/// use query_token_gate::denial_body;
///
/// assert_eq!(denial_body(true, "no-match"), "invalid token");
/// assert_eq!(denial_body(true, "something-else"), "invalid parameter value");
/// assert_eq!(denial_body(false, "no-match"), "");
/// ```
pub fn denial_body(dev_mode: bool, reason: &str) -> &'static str {
    if !dev_mode {
        return "";
    }
    match reason {
        "no-query" => "no query parameter is",
        "param-missing" => "invalid query parameter",
        "no-match" => "invalid token",
        _ => "invalid parameter value",
    }
}

/// Writes a denial into `response`.
///
/// The status is set unconditionally. In dev mode the `Content-Type` header
/// and the [`denial_body`] text follow.
pub fn apply_denial<W>(response: &mut W, deny_status: u16, dev_mode: bool, reason: &str)
where
    W: ResponseWriter + ?Sized,
{
    response.set_status(deny_status);
    if !dev_mode {
        return;
    }
    response.set_header("Content-Type", DENIAL_CONTENT_TYPE);
    response.write_body(denial_body(dev_mode, reason));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::web::ResponseRecorder;

    #[test]
    fn body_is_empty_outside_dev_mode() {
        for reason in ["no-query", "param-missing", "no-match", "other", ""] {
            assert_eq!(denial_body(false, reason), "");
        }
    }

    #[test]
    fn body_per_reason() {
        let cases = [
            ("no-query", "no query parameter is"),
            ("param-missing", "invalid query parameter"),
            ("no-match", "invalid token"),
            ("other", "invalid parameter value"),
        ];
        for (reason, want) in cases {
            assert_eq!(denial_body(true, reason), want, "reason {reason:?}");
        }
    }

    #[test]
    fn status_only_outside_dev_mode() {
        let mut resp = ResponseRecorder::new();
        apply_denial(&mut resp, 401, false, "no-match");

        assert_eq!(resp.status(), Some(401));
        assert!(resp.headers().is_empty());
        assert_eq!(resp.body(), "");
    }

    #[test]
    fn dev_mode_writes_header_and_body() {
        let mut resp = ResponseRecorder::new();
        apply_denial(&mut resp, 403, true, "param-missing");

        assert_eq!(resp.status(), Some(403));
        assert_eq!(resp.header("content-type"), Some(DENIAL_CONTENT_TYPE));
        assert_eq!(resp.body(), "invalid query parameter");
    }

    #[test]
    fn works_through_trait_object() {
        let mut resp = ResponseRecorder::new();
        let writer: &mut dyn ResponseWriter = &mut resp;
        apply_denial(writer, 418, true, "nonsense");

        assert_eq!(resp.status(), Some(418));
        assert_eq!(resp.body(), "invalid parameter value");
    }
}
