//! Test helpers for integration tests
//!
//! Provides utilities for spawning test servers and driving WebSocket
//! clients against them.

use std::collections::VecDeque;
use std::net::SocketAddr;
use std::time::Duration;

use anyhow::{Context, Result};
use chat_common::AppConfig;
use chat_gateway::{create_app, GatewayState};
use futures_util::{SinkExt, StreamExt};
use reqwest::{Client, Response};
use serde_json::{json, Value};
use tokio::net::{TcpListener, TcpStream};
use tokio::task::JoinHandle;
use tokio_tungstenite::{connect_async, tungstenite::Message, MaybeTlsStream, WebSocketStream};

/// How long a client waits for an expected frame
pub const RECV_TIMEOUT: Duration = Duration::from_secs(2);

/// How long a client waits before concluding nothing will arrive
pub const QUIET_PERIOD: Duration = Duration::from_millis(200);

/// Ping payload used to confirm the server is reading a new socket
const READY_PAYLOAD: &[u8] = b"ready";

/// Test server instance that manages lifecycle
pub struct TestServer {
    pub addr: SocketAddr,
    pub client: Client,
    _handle: JoinHandle<()>,
}

impl TestServer {
    /// Start a new test server with default configuration
    pub async fn start() -> Result<Self> {
        Self::start_with_config(AppConfig::default()).await
    }

    /// Start a test server with custom config
    pub async fn start_with_config(config: AppConfig) -> Result<Self> {
        let app = create_app(GatewayState::new(config));

        // Ephemeral port
        let listener = TcpListener::bind(SocketAddr::from(([127, 0, 0, 1], 0))).await?;
        let addr = listener.local_addr()?;

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.ok();
        });

        let client = Client::builder()
            .timeout(Duration::from_secs(10))
            .build()?;

        Ok(Self {
            addr,
            client,
            _handle: handle,
        })
    }

    /// Get base URL for the server
    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Get WebSocket URL for the gateway
    pub fn ws_url(&self) -> String {
        format!("ws://{}/gateway", self.addr)
    }

    /// Make a GET request
    pub async fn get(&self, path: &str) -> Result<Response> {
        let url = format!("{}{}", self.base_url(), path);
        Ok(self.client.get(&url).send().await?)
    }

    /// Open a WebSocket client against the gateway
    pub async fn connect(&self) -> Result<TestClient> {
        let (stream, _) = connect_async(self.ws_url())
            .await
            .context("WebSocket handshake failed")?;

        let mut client = TestClient {
            stream,
            pending: VecDeque::new(),
        };
        client.wait_ready().await?;
        Ok(client)
    }
}

/// WebSocket client speaking the relay's JSON frame protocol
pub struct TestClient {
    stream: WebSocketStream<MaybeTlsStream<TcpStream>>,
    /// Event frames read while waiting for something else
    pending: VecDeque<Value>,
}

impl TestClient {
    /// Wait until the server answers a ping on this socket
    ///
    /// The server registers a connection before it starts reading from it,
    /// so a pong proves the connection receives broadcasts.
    async fn wait_ready(&mut self) -> Result<()> {
        self.stream
            .send(Message::Ping(READY_PAYLOAD.to_vec()))
            .await?;

        let deadline = tokio::time::Instant::now() + RECV_TIMEOUT;
        loop {
            let next = tokio::time::timeout_at(deadline, self.stream.next())
                .await
                .context("timed out waiting for the server to accept the connection")?;
            match next {
                Some(Ok(Message::Pong(payload))) if payload == READY_PAYLOAD => return Ok(()),
                Some(Ok(Message::Text(text))) => self.pending.push_back(serde_json::from_str(&text)?),
                Some(Ok(Message::Close(_))) | None => anyhow::bail!("connection closed"),
                Some(Ok(_)) => continue,
                Some(Err(e)) => return Err(e.into()),
            }
        }
    }

    /// Send an event frame
    pub async fn emit(&mut self, event: &str, data: Value) -> Result<()> {
        let frame = json!({ "event": event, "data": data });
        self.send_raw(&frame.to_string()).await
    }

    /// Send a raw text frame
    pub async fn send_raw(&mut self, text: &str) -> Result<()> {
        self.stream.send(Message::Text(text.to_owned())).await?;
        Ok(())
    }

    /// Receive the next event frame, skipping control frames
    pub async fn recv(&mut self) -> Result<Value> {
        self.recv_within(RECV_TIMEOUT)
            .await?
            .context("timed out waiting for an event")
    }

    /// Receive the next event frame, or `None` if nothing arrives in time
    pub async fn recv_within(&mut self, wait: Duration) -> Result<Option<Value>> {
        if let Some(frame) = self.pending.pop_front() {
            return Ok(Some(frame));
        }

        let deadline = tokio::time::Instant::now() + wait;
        loop {
            let next = match tokio::time::timeout_at(deadline, self.stream.next()).await {
                Ok(next) => next,
                Err(_) => return Ok(None),
            };
            match next {
                Some(Ok(Message::Text(text))) => return Ok(Some(serde_json::from_str(&text)?)),
                Some(Ok(Message::Close(_))) | None => anyhow::bail!("connection closed"),
                Some(Ok(_)) => continue,
                Some(Err(e)) => return Err(e.into()),
            }
        }
    }

    /// Receive frames until one with the given event name arrives
    pub async fn recv_event(&mut self, event: &str) -> Result<Value> {
        loop {
            let frame = self.recv().await?;
            if frame["event"] == event {
                return Ok(frame);
            }
        }
    }

    /// Assert that no event frame arrives within the quiet period
    pub async fn expect_silence(&mut self) -> Result<()> {
        if let Some(frame) = self.recv_within(QUIET_PERIOD).await? {
            anyhow::bail!("unexpected frame: {frame}");
        }
        Ok(())
    }

    /// Drain every frame already queued for this client
    pub async fn drain(&mut self) -> Result<()> {
        while self.recv_within(QUIET_PERIOD).await?.is_some() {}
        Ok(())
    }

    /// Set the display name and return this client's connection id
    pub async fn set_username(&mut self, username: &str) -> Result<String> {
        self.emit("setUsername", json!({ "username": username })).await?;
        let connected = self.recv_event("userConnected").await?;
        self.recv_event("userList").await?;
        connected["data"]["userId"]
            .as_str()
            .map(str::to_owned)
            .context("userConnected without userId")
    }

    /// Keep reading for `period`, answering pings, and return every event seen
    pub async fn stay_active(&mut self, period: Duration) -> Result<Vec<Value>> {
        let deadline = tokio::time::Instant::now() + period;
        let mut frames = Vec::new();
        loop {
            let remaining = deadline.saturating_duration_since(tokio::time::Instant::now());
            if remaining.is_zero() {
                return Ok(frames);
            }
            if let Some(frame) = self.recv_within(remaining).await? {
                frames.push(frame);
            }
        }
    }

    /// Close the connection
    pub async fn close(mut self) -> Result<()> {
        self.stream.close(None).await?;
        Ok(())
    }
}
