//! The request handler a host registers.
//!
//! ```text
//! host startup
//!   ↓
//! TokenGate::from_json(config bytes)   (error → host aborts)
//!   ↓
//! per request: gate.handle(&request, &mut response)
//!   ↓
//! Flow::Continue → host calls the next handler
//! Flow::Halt     → host sends the denial already written to `response`
//! ```

use tracing::Level;

use crate::config::GateConfig;
use crate::deny::apply_denial;
use crate::error::ConfigError;
use crate::logging::{GateLog, TracingLog};
use crate::matcher::{token_allowed, Decision};

use super::{RequestReader, ResponseWriter};

/// What the host should do after [`TokenGate::handle`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    /// Pass the request on to the next handler.
    Continue,
    /// Stop; the denial has been written to the response.
    Halt,
}

impl Flow {
    /// Returns `true` for [`Flow::Continue`].
    pub fn is_continue(self) -> bool {
        self == Flow::Continue
    }
}

/// Query-token request gate.
///
/// Holds the immutable configuration and a log sink. It has no per-request
/// state, so one instance can serve any number of concurrent requests by
/// shared reference.
///
/// # Examples
///
/// ```
/// use query_token_gate::web::{Flow, RequestAdapter, ResponseRecorder, TokenGate};
///
/// let gate = TokenGate::from_json(
///     br#"{"paramName":"Token","allowedValues":["my-secret"],"devMode":true}"#,
/// )
/// .expect("valid config");
///
/// let mut resp = ResponseRecorder::new();
/// let flow = gate.handle(&RequestAdapter::new("/?Token=my-secret"), &mut resp);
/// assert_eq!(flow, Flow::Continue);
/// assert!(resp.is_untouched());
///
/// let mut resp = ResponseRecorder::new();
/// let flow = gate.handle(&RequestAdapter::new("/?Token=guess"), &mut resp);
/// assert_eq!(flow, Flow::Halt);
/// assert_eq!(resp.status(), Some(401));
/// assert_eq!(resp.body(), "invalid token");
/// ```
#[derive(Debug, Clone)]
pub struct TokenGate<L = TracingLog> {
    config: GateConfig,
    log: L,
}

impl TokenGate<TracingLog> {
    /// Creates a gate that logs through `tracing`.
    pub fn new(config: GateConfig) -> Self {
        let gate = Self {
            config,
            log: TracingLog,
        };
        gate.log_ready();
        gate
    }

    /// Parses the host configuration and creates a gate.
    ///
    /// Hosts must log the error and refuse to serve requests when this
    /// fails.
    ///
    /// # Errors
    ///
    /// Any [`ConfigError`] from [`GateConfig::from_json`].
    pub fn from_json(bytes: &[u8]) -> Result<Self, ConfigError> {
        GateConfig::from_json(bytes).map(Self::new)
    }
}

impl<L: GateLog> TokenGate<L> {
    /// Replaces the log sink.
    pub fn with_log<M: GateLog>(self, log: M) -> TokenGate<M> {
        TokenGate {
            config: self.config,
            log,
        }
    }

    /// The configuration this gate enforces.
    pub fn config(&self) -> &GateConfig {
        &self.config
    }

    /// Decides a request target without touching any response.
    pub fn decide(&self, target: &str) -> Decision {
        token_allowed(
            target,
            self.config.param_name(),
            self.config.allowed_values(),
        )
    }

    /// Checks `request` and, on denial, writes the denial into `response`.
    ///
    /// On [`Flow::Continue`] the response is left untouched.
    pub fn handle<R, W>(&self, request: &R, response: &mut W) -> Flow
    where
        R: RequestReader + ?Sized,
        W: ResponseWriter + ?Sized,
    {
        let request_id = request.request_id().unwrap_or("-");
        match self.decide(request.uri()) {
            Decision::Allow => {
                self.log.log(
                    Level::TRACE,
                    format_args!("request_id={} param={} allowed", request_id, self.config.param_name()),
                );
                Flow::Continue
            }
            Decision::Deny(reason) => {
                self.log.log(
                    Level::DEBUG,
                    format_args!(
                        "request_id={} param={} denied reason={} status={}",
                        request_id,
                        self.config.param_name(),
                        reason,
                        self.config.deny_status()
                    ),
                );
                apply_denial(
                    response,
                    self.config.deny_status(),
                    self.config.dev_mode(),
                    reason.as_str(),
                );
                Flow::Halt
            }
        }
    }

    fn log_ready(&self) {
        self.log.log(
            Level::INFO,
            format_args!(
                "token gate configured: param={} allowed_values={} deny_status={} dev_mode={}",
                self.config.param_name(),
                self.config.allowed_values().len(),
                self.config.deny_status(),
                self.config.dev_mode()
            ),
        );
    }
}
