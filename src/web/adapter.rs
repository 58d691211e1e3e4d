//! Owned, in-memory request and response types.

use super::{RequestReader, ResponseWriter};

/// An owned request target implementing [`RequestReader`].
///
/// Hosts that already hold the URI as a string can wrap it here instead of
/// writing their own [`RequestReader`] implementation. An optional request ID
/// is carried through into log events.
///
/// # Examples
///
/// ```
/// use query_token_gate::web::{RequestAdapter, RequestReader};
///
/// let req = RequestAdapter::new("/files?Token=abc").with_request_id("req-7");
///
/// assert_eq!(req.uri(), "/files?Token=abc");
/// assert_eq!(req.request_id(), Some("req-7"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestAdapter {
    uri: String,
    request_id: Option<String>,
}

impl RequestAdapter {
    /// Creates an adapter for the given request target.
    pub fn new(uri: impl Into<String>) -> Self {
        Self {
            uri: uri.into(),
            request_id: None,
        }
    }

    /// Attaches a request ID.
    pub fn with_request_id(mut self, request_id: impl Into<String>) -> Self {
        self.request_id = Some(request_id.into());
        self
    }
}

impl RequestReader for RequestAdapter {
    fn uri(&self) -> &str {
        &self.uri
    }

    fn request_id(&self) -> Option<&str> {
        self.request_id.as_deref()
    }
}

/// A response that records everything written to it.
///
/// Header names are matched case-insensitively; setting a header twice keeps
/// the last value.
///
/// # Examples
///
/// ```
/// use query_token_gate::web::{ResponseRecorder, ResponseWriter};
///
/// let mut resp = ResponseRecorder::new();
/// resp.set_status(401);
/// resp.set_header("Content-Type", "text/plain");
/// resp.write_body("denied");
///
/// assert_eq!(resp.status(), Some(401));
/// assert_eq!(resp.header("content-type"), Some("text/plain"));
/// assert_eq!(resp.body(), "denied");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResponseRecorder {
    status: Option<u16>,
    headers: Vec<(String, String)>,
    body: String,
}

impl ResponseRecorder {
    /// Creates an empty recorder. No status has been set.
    pub fn new() -> Self {
        Self::default()
    }

    /// The recorded status, or `None` if the response was never touched.
    pub fn status(&self) -> Option<u16> {
        self.status
    }

    /// All recorded headers in the order they were first set.
    pub fn headers(&self) -> &[(String, String)] {
        &self.headers
    }

    /// Case-insensitive header lookup.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// The recorded body.
    pub fn body(&self) -> &str {
        &self.body
    }

    /// Returns `true` if nothing was written.
    pub fn is_untouched(&self) -> bool {
        self.status.is_none() && self.headers.is_empty() && self.body.is_empty()
    }
}

impl ResponseWriter for ResponseRecorder {
    fn set_status(&mut self, status: u16) {
        self.status = Some(status);
    }

    fn set_header(&mut self, name: &str, value: &str) {
        match self
            .headers
            .iter_mut()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
        {
            Some((_, existing)) => *existing = value.to_string(),
            None => self.headers.push((name.to_string(), value.to_string())),
        }
    }

    fn write_body(&mut self, body: &str) {
        self.body.push_str(body);
    }
}
