//! WebSocket Listener
//!
//! Opens a single outbound connection to the room server and reports
//! connection events to a diagnostic sink.

use anyhow::{Context, Result};
use futures_util::StreamExt;
use tokio_tungstenite::{connect_async, tungstenite::Message};
use tracing::{debug, error, info};

use crate::connection::sink::DiagnosticSink;

/// Line emitted once the connection reaches the open state
pub const CONNECTED_LINE: &str = "Connected to websocket server";

/// Prefix of the line emitted for every inbound message
pub const MESSAGE_PREFIX: &str = "Message from server ";

/// Single-connection WebSocket listener
///
/// Receive only: the write half of the socket is never used. The listener
/// holds no state beyond the target URL and runs until the server closes
/// the connection or the transport fails.
pub struct RoomListener {
    url: String,
}

impl RoomListener {
    /// Create a listener for the given server URL
    pub fn new(url: &str) -> Self {
        Self {
            url: url.to_string(),
        }
    }

    /// The configured server URL
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Connect and drive the read half to completion
    ///
    /// Emits one connected line after the upgrade completes, then one line
    /// per inbound message, in delivery order. Returns when the server
    /// closes the connection or the stream ends; a transport error
    /// propagates to the caller. Nothing is emitted before open.
    pub async fn run<S: DiagnosticSink>(&self, sink: &mut S) -> Result<()> {
        info!(url = %self.url, "Connecting to websocket server");

        let (ws_stream, _) = connect_async(&self.url)
            .await
            .context("Failed to connect to WebSocket")?;

        sink.emit(CONNECTED_LINE);

        let (_write, mut read) = ws_stream.split();

        loop {
            match read.next().await {
                Some(Ok(Message::Text(text))) => {
                    sink.emit(&format!("{}{}", MESSAGE_PREFIX, text));
                }
                Some(Ok(Message::Binary(data))) => {
                    // Payloads are opaque; binary passes through lossy-UTF-8
                    sink.emit(&format!("{}{}", MESSAGE_PREFIX, String::from_utf8_lossy(&data)));
                }
                Some(Ok(Message::Ping(_))) | Some(Ok(Message::Pong(_))) => {
                    debug!("Transport keep-alive frame");
                }
                Some(Ok(Message::Close(frame))) => {
                    info!(?frame, "Received close frame");
                    break;
                }
                Some(Ok(Message::Frame(_))) => {
                    // Raw frame, typically not used
                }
                Some(Err(e)) => {
                    error!(error = %e, "WebSocket error");
                    return Err(e.into());
                }
                None => {
                    info!("WebSocket stream ended");
                    break;
                }
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::connection::sink::CaptureSink;
    use futures_util::SinkExt;
    use tokio::net::TcpListener;
    use tokio_tungstenite::accept_async;

    /// Accept one connection, send the given frames, then close
    async fn spawn_server(frames: Vec<Message>) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let (stream, _) = listener.accept().await.unwrap();
            let mut ws = accept_async(stream).await.unwrap();
            for frame in frames {
                ws.send(frame).await.unwrap();
            }
            let _ = ws.close(None).await;
        });
        format!("ws://{}", addr)
    }

    #[tokio::test]
    async fn test_connected_line_emitted_once() {
        let url = spawn_server(Vec::new()).await;

        let mut sink = CaptureSink::new();
        RoomListener::new(&url).run(&mut sink).await.unwrap();

        assert_eq!(sink.lines(), ["Connected to websocket server"]);
    }

    #[tokio::test]
    async fn test_message_lines_preserve_payload_and_order() {
        let url = spawn_server(vec![
            Message::Text("ping".into()),
            Message::Text("a second frame".into()),
            Message::Text("".into()),
        ])
        .await;

        let mut sink = CaptureSink::new();
        RoomListener::new(&url).run(&mut sink).await.unwrap();

        assert_eq!(
            sink.lines(),
            [
                "Connected to websocket server",
                "Message from server ping",
                "Message from server a second frame",
                "Message from server ",
            ]
        );
    }

    #[tokio::test]
    async fn test_binary_payload_passes_through() {
        let url = spawn_server(vec![Message::Binary(b"raw bytes".to_vec())]).await;

        let mut sink = CaptureSink::new();
        RoomListener::new(&url).run(&mut sink).await.unwrap();

        assert_eq!(
            sink.lines(),
            ["Connected to websocket server", "Message from server raw bytes"]
        );
    }

    #[tokio::test]
    async fn test_unreachable_endpoint_emits_nothing() {
        // Bind then drop to obtain a local port with nothing listening
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let mut sink = CaptureSink::new();
        let result = RoomListener::new(&format!("ws://{}", addr)).run(&mut sink).await;

        assert!(result.is_err());
        assert!(sink.lines().is_empty());
    }

    #[test]
    fn test_listener_keeps_configured_url() {
        let listener = RoomListener::new("ws://localhost:9999");
        assert_eq!(listener.url(), "ws://localhost:9999");
    }
}
