//! Host integration surface.
//!
//! The gate runs inside some host (a proxy, an HTTP server, a WASM filter
//! runtime). This module is the boundary between that host and the decision
//! logic:
//! - [`RequestReader`] / [`ResponseWriter`]: the only two capabilities the
//!   gate needs from the host's request and response objects
//! - [`RequestAdapter`] / [`ResponseRecorder`]: owned implementations for
//!   hosts that hold plain strings, and for tests
//! - [`TokenGate`]: the handler the host calls once per request
//!
//! # Design Principles
//!
//! 1. **No Framework Dependencies**: nothing here names a concrete host type.
//!    Integrations implement the two traits over their own objects.
//!
//! 2. **No Global State**: the host constructs a `TokenGate` at startup and
//!    hands it to its dispatch mechanism. There is no handler registry.
//!
//! 3. **Fail Closed at Startup**: a configuration error is returned to the
//!    host, which must refuse to serve.
//!
//! # Example Flow
//!
//! ```ignore
//! // In a host-specific integration:
//! let gate = TokenGate::from_json(host.config_bytes())?;
//!
//! host.on_request(move |req, resp| {
//!     gate.handle(&HostRequest(req), &mut HostResponse(resp)).is_continue()
//! });
//! ```

mod adapter;
mod extract;
mod middleware;

pub use adapter::{RequestAdapter, ResponseRecorder};
pub use extract::{RequestReader, ResponseWriter};
pub use middleware::{Flow, TokenGate};
