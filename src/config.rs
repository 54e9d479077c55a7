// Copyright 2018 Google LLC
//
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Command-line flags for the two binaries. Every flag can also come from the environment.

use clap::Parser;
use std::{
    net::{IpAddr, Ipv4Addr, SocketAddr},
    time::Duration,
};

/// Port used by both binaries unless told otherwise.
pub const DEFAULT_PORT: u16 = 50051;

#[derive(Parser, Debug)]
#[command(name = "server", about = "Serves greetings.")]
pub struct ServerFlags {
    /// Sets the port number to listen on.
    #[arg(short, long, env = "GREETER_PORT", default_value_t = DEFAULT_PORT)]
    pub port: u16,
}

impl ServerFlags {
    /// All interfaces, on the configured port.
    pub fn listen_addr(&self) -> SocketAddr {
        (IpAddr::V4(Ipv4Addr::UNSPECIFIED), self.port).into()
    }
}

#[derive(Parser, Debug)]
#[command(name = "client", about = "Asks the server for a greeting.")]
pub struct ClientFlags {
    /// Sets the server address to connect to.
    #[arg(long, env = "GREETER_SERVER_ADDR", default_value = "127.0.0.1:50051")]
    pub server_addr: SocketAddr,
    /// Sets the name to greet.
    #[arg(long, env = "GREETER_NAME", default_value = "world")]
    pub name: String,
    /// Bounds the connection and the call, in milliseconds.
    #[arg(long, env = "GREETER_TIMEOUT_MS", default_value_t = 1000)]
    pub timeout_ms: u64,
}

impl ClientFlags {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}
