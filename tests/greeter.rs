use assert_matches::assert_matches;
use greeter::{connect, greet, Error, Server, DEFAULT_TIMEOUT};
use std::{
    net::{SocketAddr, TcpListener},
    time::{Duration, Instant},
};
use tokio::task::JoinHandle;

async fn start_server() -> anyhow::Result<(SocketAddr, JoinHandle<()>)> {
    let server = Server::bind(([127, 0, 0, 1], 0).into()).await?;
    let addr = server.local_addr();
    Ok((addr, tokio::spawn(server.run())))
}

/// An address nothing is listening on.
fn closed_addr() -> anyhow::Result<SocketAddr> {
    let listener = TcpListener::bind("127.0.0.1:0")?;
    Ok(listener.local_addr()?)
}

#[tokio::test]
async fn greets_world() -> anyhow::Result<()> {
    let _ = tracing_subscriber::fmt::try_init();

    let (addr, _server) = start_server().await?;
    let client = connect(addr, DEFAULT_TIMEOUT).await?;

    assert_eq!(greet(&client, "World", DEFAULT_TIMEOUT).await?, "Hello World");

    Ok(())
}

#[tokio::test]
async fn greets_empty_name() -> anyhow::Result<()> {
    let (addr, _server) = start_server().await?;
    let client = connect(addr, DEFAULT_TIMEOUT).await?;

    assert_eq!(greet(&client, "", DEFAULT_TIMEOUT).await?, "Hello ");

    Ok(())
}

#[tokio::test]
async fn special_characters_pass_through_unmodified() -> anyhow::Result<()> {
    let (addr, _server) = start_server().await?;
    let client = connect(addr, DEFAULT_TIMEOUT).await?;

    for name in ["ünïcødé ✓", "line\nbreak", "\0nul", "  spaced  ", "%s {} \"quoted\""] {
        assert_eq!(
            greet(&client, name, DEFAULT_TIMEOUT).await?,
            format!("Hello {name}")
        );
    }

    Ok(())
}

#[tokio::test]
async fn repeated_calls_are_identical() -> anyhow::Result<()> {
    let (addr, _server) = start_server().await?;
    let client = connect(addr, DEFAULT_TIMEOUT).await?;

    let first = greet(&client, "Tim", DEFAULT_TIMEOUT).await?;
    let second = greet(&client, "Tim", DEFAULT_TIMEOUT).await?;
    assert_eq!(first, second);

    Ok(())
}

#[tokio::test]
async fn separate_clients_get_the_same_greeting() -> anyhow::Result<()> {
    let (addr, _server) = start_server().await?;
    let a = connect(addr, DEFAULT_TIMEOUT).await?;
    let b = connect(addr, DEFAULT_TIMEOUT).await?;

    assert_eq!(
        greet(&a, "Stim", DEFAULT_TIMEOUT).await?,
        greet(&b, "Stim", DEFAULT_TIMEOUT).await?
    );

    Ok(())
}

#[tokio::test]
async fn elapsed_deadline_fails_instead_of_hanging() -> anyhow::Result<()> {
    let (addr, _server) = start_server().await?;
    let client = connect(addr, DEFAULT_TIMEOUT).await?;

    let result = tokio::time::timeout(Duration::from_secs(5), greet(&client, "late", Duration::ZERO))
        .await?;
    assert_matches!(result, Err(Error::DeadlineExceeded(d)) if d == Duration::ZERO);

    Ok(())
}

#[tokio::test]
async fn tiny_deadline_fails_even_over_loopback() -> anyhow::Result<()> {
    let (addr, _server) = start_server().await?;
    let client = connect(addr, DEFAULT_TIMEOUT).await?;

    for _ in 0..10 {
        let timeout = Duration::from_nanos(1);
        assert_matches!(
            greet(&client, "late", timeout).await,
            Err(Error::DeadlineExceeded(d)) if d == timeout
        );
    }
    // The client is still usable after the failed calls.
    assert_eq!(greet(&client, "on time", DEFAULT_TIMEOUT).await?, "Hello on time");

    Ok(())
}

#[tokio::test]
async fn connect_fails_when_nothing_listens() -> anyhow::Result<()> {
    let addr = closed_addr()?;

    let start = Instant::now();
    let result = connect(addr, DEFAULT_TIMEOUT).await.err();
    assert!(start.elapsed() < DEFAULT_TIMEOUT + Duration::from_millis(500));
    assert_matches!(result, Some(Error::Connect { addr: a, .. }) if a == addr);

    Ok(())
}

#[tokio::test]
async fn call_fails_after_server_is_killed_between_calls() -> anyhow::Result<()> {
    let (addr, server) = start_server().await?;
    let client = connect(addr, DEFAULT_TIMEOUT).await?;

    assert_eq!(greet(&client, "first", DEFAULT_TIMEOUT).await?, "Hello first");

    // The handler finishes on its first poll, so there is no in-flight window to kill the
    // server in; the second call is issued on the connection the kill closed.
    server.abort();
    assert!(server.await.unwrap_err().is_cancelled());
    // Give the client dispatch a moment to observe the closed connection.
    tokio::time::sleep(Duration::from_millis(100)).await;

    assert_matches!(
        greet(&client, "second", DEFAULT_TIMEOUT).await,
        Err(Error::Call(_))
    );

    Ok(())
}

#[tokio::test]
async fn bind_fails_on_occupied_port() -> anyhow::Result<()> {
    let first = Server::bind(([127, 0, 0, 1], 0).into()).await?;
    let addr = first.local_addr();

    assert_matches!(
        Server::bind(addr).await.err(),
        Some(Error::Bind { addr: a, .. }) if a == addr
    );
    drop(first);

    Ok(())
}
