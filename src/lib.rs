// Copyright 2018 Google LLC
//
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! A greeter service with a single rpc, `greet`, plus the wiring to serve it over TCP and to call
//! it once from a client.

use tracing_subscriber::{prelude::*, EnvFilter};

mod call;
pub mod config;
mod error;
mod serve;

pub use call::{connect, greet, DEFAULT_TIMEOUT};
pub use error::Error;
pub use serve::{GreeterServer, Server, MAX_CHANNELS};

/// The prefix every greeting starts with.
pub const GREETING_PREFIX: &str = "Hello ";

/// The request carried by `greet`. Any name is accepted, including the empty string.
#[tarpc::derive_serde]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HelloRequest {
    pub name: String,
}

/// The reply to `greet`.
#[tarpc::derive_serde]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HelloReply {
    pub message: String,
}

/// This is the service definition. It defines one RPC, greet, which takes a request carrying a
/// name and returns a reply carrying the greeting.
#[tarpc::service]
pub trait Greeter {
    /// Returns a greeting for the request's name.
    async fn greet(request: HelloRequest) -> HelloReply;
}

/// Builds the greeting for `name`. The name is appended unmodified.
pub fn greeting(name: &str) -> String {
    format!("{GREETING_PREFIX}{name}")
}

/// Initializes a plain-text tracing subscriber writing to stderr. The filter is read from
/// `RUST_LOG` and defaults to `info`.
pub fn init_tracing() -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .try_init()?;

    Ok(())
}
