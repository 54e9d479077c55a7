// Copyright 2018 Google LLC
//
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use anyhow::Context as _;
use clap::Parser;
use greeter::{config::ServerFlags, init_tracing, Server};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let flags = ServerFlags::parse();
    init_tracing()?;

    let server = Server::bind(flags.listen_addr())
        .await
        .context("server failed to start")?;
    tracing::info!("Listening on {}", server.local_addr());
    server.run().await;

    Ok(())
}
