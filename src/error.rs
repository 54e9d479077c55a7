// Copyright 2018 Google LLC
//
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use std::{io, net::SocketAddr, time::Duration};
use tarpc::client::RpcError;

/// Errors surfaced by setting up the server or the client, or by the one call the client makes.
/// None of them are retried; the binaries report them and exit.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// The listening address could not be acquired.
    #[error("failed to bind {addr}")]
    Bind {
        addr: SocketAddr,
        #[source]
        source: io::Error,
    },
    /// The server could not be reached.
    #[error("failed to connect to {addr}")]
    Connect {
        addr: SocketAddr,
        #[source]
        source: io::Error,
    },
    /// The connection was not established before the deadline.
    #[error("connecting to {addr} did not complete within {timeout:?}")]
    ConnectTimeout { addr: SocketAddr, timeout: Duration },
    /// The call did not complete before its deadline.
    #[error("the greet call did not complete within {0:?}")]
    DeadlineExceeded(Duration),
    /// The call failed in transport or was aborted by the server.
    #[error("the greet call failed")]
    Call(#[source] RpcError),
}
