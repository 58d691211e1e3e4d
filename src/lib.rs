//! Query-parameter token gate for HTTP requests.
//!
//! A request is let through only when a configured query parameter carries
//! one of a configured set of allowed values. Everything else is denied with
//! a configurable status and, in dev mode, a short plain-text reason.
//!
//! # Core Types
//!
//! - [`GateConfig`]: validated configuration, parsed once from host JSON
//! - [`AllowSet`]: the allowed tokens, redacted in `Debug` output
//! - [`Decision`] / [`DenyReason`]: the outcome of checking one request
//! - [`web::TokenGate`]: the per-request handler a host registers
//! - [`GateLog`]: log sink, `tracing` by default
//!
//! # Building Blocks
//!
//! - [`parse_query`] / [`url_decode`]: pull and decode one key's values
//!   ([`parse_query_bytes`] / [`url_decode_bytes`] keep raw bytes)
//! - [`token_allowed`]: decide a request target against an allow-set
//! - [`denial_body`] / [`apply_denial`]: write a denial response
//!
//! # Examples
//!
//! ```
//! use query_token_gate::{parse_config, token_allowed, Decision, DenyReason};
//!
//! let config = parse_config(
//!     br#"{"paramName":"Token","allowedValues":["good","another"],"denyStatus":"403"}"#,
//! )
//! .expect("valid config");
//!
//! let decide = |target: &str| token_allowed(target, config.param_name(), config.allowed_values());
//!
//! assert_eq!(decide("/?Token=bad&Token=good"), Decision::Allow);
//! assert_eq!(decide("/"), Decision::Deny(DenyReason::NoQuery));
//! assert_eq!(decide("/?a=1"), Decision::Deny(DenyReason::ParamMissing));
//! assert_eq!(decide("/?Token=bad"), Decision::Deny(DenyReason::NoMatch));
//! assert_eq!(config.deny_status(), 403);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod allow;
mod config;
mod deny;
mod error;
mod logging;
mod matcher;
mod query;

pub mod web;

pub use allow::AllowSet;
pub use config::{parse_config, GateConfig, DEFAULT_DENY_STATUS};
pub use deny::{apply_denial, denial_body, DENIAL_CONTENT_TYPE};
pub use error::{ConfigError, ConfigViolation, ConfigViolationKind};
pub use logging::{GateLog, NoopLog, TracingLog};
pub use matcher::{token_allowed, Decision, DenyReason};
pub use query::{parse_query, parse_query_bytes, url_decode, url_decode_bytes};
