use std::fmt;

use tracing::Level;

/// Log sink used by [`TokenGate`](crate::web::TokenGate).
///
/// The default, [`TracingLog`], emits `tracing` events so whichever
/// subscriber the host installed receives them. Hosts with their own log
/// channel implement this trait to forward there instead; [`NoopLog`]
/// discards everything.
///
/// Logging never influences a decision. Implementations must not panic.
pub trait GateLog {
    /// Records one message at `level`.
    fn log(&self, level: Level, args: fmt::Arguments<'_>);
}

/// Forwards gate messages to `tracing`.
///
/// # Examples
///
/// ```
/// use query_token_gate::{GateLog, TracingLog};
/// use tracing::Level;
///
/// TracingLog.log(Level::INFO, format_args!("gate ready"));
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingLog;

impl GateLog for TracingLog {
    fn log(&self, level: Level, args: fmt::Arguments<'_>) {
        // tracing macros need a constant level
        if level == Level::ERROR {
            tracing::error!(target: "query_token_gate", "{}", args);
        } else if level == Level::WARN {
            tracing::warn!(target: "query_token_gate", "{}", args);
        } else if level == Level::INFO {
            tracing::info!(target: "query_token_gate", "{}", args);
        } else if level == Level::DEBUG {
            tracing::debug!(target: "query_token_gate", "{}", args);
        } else {
            tracing::trace!(target: "query_token_gate", "{}", args);
        }
    }
}

/// Discards every message.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopLog;

impl GateLog for NoopLog {
    fn log(&self, _level: Level, _args: fmt::Arguments<'_>) {}
}

impl<L: GateLog + ?Sized> GateLog for &L {
    fn log(&self, level: Level, args: fmt::Arguments<'_>) {
        (**self).log(level, args);
    }
}
