//! Minimal host for the token gate.
//!
//! Shows what a host integration does:
//! 1. Read the configuration blob once at startup
//! 2. Refuse to start (exit 1) if it is invalid
//! 3. Run each request target through the gate and act on the `Flow`
//!
//! Run with:
//!
//! ```text
//! cargo run --example token_gate -- \
//!     '{"paramName":"Token","allowedValues":["my-secret"],"devMode":true}' \
//!     '/?Token=my-secret' '/?Token=nope' '/'
//! ```

use std::process;

use query_token_gate::web::{Flow, RequestAdapter, ResponseRecorder, TokenGate};

const DEFAULT_CONFIG: &str =
    r#"{"paramName":"Token","allowedValues":["my-secret","another-secret"],"devMode":true}"#;

fn main() {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    let mut args = std::env::args().skip(1);
    let config = args.next().unwrap_or_else(|| DEFAULT_CONFIG.to_string());

    let gate = match TokenGate::from_json(config.as_bytes()) {
        Ok(gate) => gate,
        Err(e) => {
            tracing::error!("{e}");
            process::exit(1);
        }
    };

    let mut targets: Vec<String> = args.collect();
    if targets.is_empty() {
        targets = ["/?Token=my-secret", "/?Token=bad&Token=another-secret", "/?Token=nope", "/"]
            .iter()
            .map(|s| s.to_string())
            .collect();
    }

    for (i, target) in targets.iter().enumerate() {
        let request = RequestAdapter::new(target.as_str()).with_request_id(format!("req-{i}"));
        let mut response = ResponseRecorder::new();

        match gate.handle(&request, &mut response) {
            Flow::Continue => println!("{target} -> 200 (passed to next handler)"),
            Flow::Halt => println!(
                "{target} -> {} {:?}",
                response.status().unwrap_or_default(),
                response.body()
            ),
        }
    }
}
