// Copyright 2018 Google LLC
//
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{greeting, Error, Greeter, GreeterRequest, GreeterResponse, HelloReply, HelloRequest};
use futures::{future, prelude::*};
use std::{fmt, net::SocketAddr};
use tarpc::{
    context,
    serde_transport::tcp,
    server::{self, Channel},
    tokio_serde::formats::Bincode,
    ClientMessage, Response,
};

/// How many connections are driven at once. Further connections wait to be accepted.
pub const MAX_CHANNELS: usize = 10;

type Codec = Bincode<ClientMessage<GreeterRequest>, Response<GreeterResponse>>;
type Listener =
    tcp::Incoming<ClientMessage<GreeterRequest>, Response<GreeterResponse>, Codec, fn() -> Codec>;

// This is the type that implements the generated Greeter trait. It is the business logic
// and is used to start the server.
#[derive(Clone, Debug, Default)]
pub struct GreeterServer;

impl Greeter for GreeterServer {
    async fn greet(self, _: context::Context, request: HelloRequest) -> HelloReply {
        tracing::info!(name = %request.name, "received greet request");
        HelloReply {
            message: greeting(&request.name),
        }
    }
}

/// A bound listener that has not started serving yet.
pub struct Server {
    listener: Listener,
}

impl Server {
    /// Binds a TCP listener on `addr`. Port 0 picks an ephemeral port; see
    /// [`local_addr`](Self::local_addr).
    pub async fn bind(addr: SocketAddr) -> Result<Self, Error> {
        let listener = tcp::listen(addr, Codec::default as fn() -> Codec)
            .await
            .map_err(|source| Error::Bind { addr, source })?;
        Ok(Self { listener })
    }

    /// Returns the address being listened on.
    pub fn local_addr(&self) -> SocketAddr {
        self.listener.local_addr()
    }

    /// Serves greet requests until the future is dropped. There is no shutdown sequence and
    /// in-flight requests are not drained.
    pub async fn run(self) {
        self.listener
            .filter_map(|r| {
                future::ready(
                    r.map_err(|e| tracing::warn!("ignoring failed accept: {e}"))
                        .ok(),
                )
            })
            .inspect(|transport| {
                if let Ok(peer) = transport.peer_addr() {
                    tracing::debug!(%peer, "accepted connection");
                }
            })
            .map(server::BaseChannel::with_defaults)
            // serve is generated by the service attribute. It takes as input any type
            // implementing the generated Greeter trait.
            .map(|channel| channel.execute(GreeterServer.serve()).for_each(spawn))
            .buffer_unordered(MAX_CHANNELS)
            .for_each(|_| async {})
            .await
    }
}

impl fmt::Debug for Server {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Server")
            .field("local_addr", &self.local_addr())
            .finish()
    }
}

async fn spawn(fut: impl Future<Output = ()> + Send + 'static) {
    tokio::spawn(fut);
}
