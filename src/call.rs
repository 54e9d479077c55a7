// Copyright 2018 Google LLC
//
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{Error, GreeterClient, HelloRequest};
use std::{
    net::SocketAddr,
    time::{Duration, Instant},
};
use tarpc::{
    client::{self, RpcError},
    context,
    serde_transport::tcp,
    tokio_serde::formats::Bincode,
};

/// How long the client waits for the connection and for the call.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(1);

/// Connects to the server at `addr` over an unencrypted TCP transport and spawns the client
/// dispatch. The connection attempt must complete within `timeout`.
pub async fn connect(addr: SocketAddr, timeout: Duration) -> Result<GreeterClient, Error> {
    let transport = match tokio::time::timeout(timeout, tcp::connect(addr, Bincode::default)).await
    {
        Ok(Ok(transport)) => transport,
        Ok(Err(source)) => return Err(Error::Connect { addr, source }),
        Err(_) => return Err(Error::ConnectTimeout { addr, timeout }),
    };

    Ok(GreeterClient::new(client::Config::default(), transport).spawn())
}

/// Issues one greet call and returns the greeting. The call is cancelled if it has not completed
/// `timeout` from now.
pub async fn greet(
    client: &GreeterClient,
    name: impl Into<String>,
    timeout: Duration,
) -> Result<String, Error> {
    let deadline = Instant::now() + timeout;
    let mut ctx = context::current();
    ctx.deadline = deadline;

    if Instant::now() >= deadline {
        return Err(Error::DeadlineExceeded(timeout));
    }

    let request = HelloRequest { name: name.into() };
    let response = tokio::time::timeout_at(deadline.into(), client.greet(ctx, request)).await;
    match response {
        // A reply that lands after the deadline counts as late, whichever timer noticed first.
        Ok(Ok(_)) if Instant::now() > deadline => Err(Error::DeadlineExceeded(timeout)),
        Ok(Ok(reply)) => Ok(reply.message),
        Ok(Err(RpcError::DeadlineExceeded)) | Err(_) => Err(Error::DeadlineExceeded(timeout)),
        Ok(Err(e)) => Err(Error::Call(e)),
    }
}
