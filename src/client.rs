// Copyright 2018 Google LLC
//
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use clap::Parser;
use greeter::{config::ClientFlags, init_tracing};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let flags = ClientFlags::parse();
    init_tracing()?;

    let timeout = flags.timeout();
    let client = greeter::connect(flags.server_addr, timeout).await?;
    let message = greeter::greet(&client, flags.name, timeout).await?;
    tracing::info!(%message, "greet call succeeded");
    println!("{message}");

    Ok(())
}
