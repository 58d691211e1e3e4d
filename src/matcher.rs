use std::fmt;

use crate::allow::AllowSet;
use crate::query::parse_query_bytes;

/// Why a request was denied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DenyReason {
    /// The request target has no `?`.
    NoQuery,
    /// There is a query string but the configured parameter is absent.
    ParamMissing,
    /// The parameter is present but none of its values is allowed.
    NoMatch,
}

impl DenyReason {
    /// Stable reason code (`no-query`, `param-missing`, `no-match`).
    pub fn as_str(self) -> &'static str {
        match self {
            DenyReason::NoQuery => "no-query",
            DenyReason::ParamMissing => "param-missing",
            DenyReason::NoMatch => "no-match",
        }
    }

    /// Parses a reason code produced by [`as_str`](Self::as_str).
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "no-query" => Some(DenyReason::NoQuery),
            "param-missing" => Some(DenyReason::ParamMissing),
            "no-match" => Some(DenyReason::NoMatch),
            _ => None,
        }
    }
}

impl fmt::Display for DenyReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of checking one request target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    /// The request carries an allowed token.
    Allow,
    /// The request is denied for the given reason.
    Deny(DenyReason),
}

impl Decision {
    /// Returns `true` for [`Decision::Allow`].
    pub fn is_allowed(&self) -> bool {
        matches!(self, Decision::Allow)
    }

    /// The denial reason code, or `""` when allowed.
    pub fn reason(&self) -> &'static str {
        match self {
            Decision::Allow => "",
            Decision::Deny(reason) => reason.as_str(),
        }
    }

    /// The denial reason, if any.
    pub fn deny_reason(&self) -> Option<DenyReason> {
        match self {
            Decision::Allow => None,
            Decision::Deny(reason) => Some(*reason),
        }
    }
}

/// Checks whether `target` carries an allowed value for `param`.
///
/// Only the text after the first `?` is considered. Values are decoded and
/// tested left to right as raw bytes; the first one found in `allowed` admits
/// the request, even if earlier values were rejected. A value that does not
/// decode to valid UTF-8 never matches.
///
/// # Examples
///
/// ```
/// use query_token_gate::{token_allowed, AllowSet, Decision, DenyReason};
///
/// let allowed: AllowSet = ["good", "another"].into_iter().collect();
///
/// assert_eq!(token_allowed("/?Token=bad&Token=good", "Token", &allowed), Decision::Allow);
/// assert_eq!(
///     token_allowed("/", "Token", &allowed),
///     Decision::Deny(DenyReason::NoQuery)
/// );
/// ```
pub fn token_allowed(target: &str, param: &str, allowed: &AllowSet) -> Decision {
    let Some((_, query)) = target.split_once('?') else {
        return Decision::Deny(DenyReason::NoQuery);
    };

    let values = parse_query_bytes(query, param);
    if values.is_empty() {
        return Decision::Deny(DenyReason::ParamMissing);
    }

    if values.iter().any(|value| allowed.contains_bytes(value)) {
        Decision::Allow
    } else {
        Decision::Deny(DenyReason::NoMatch)
    }
}
