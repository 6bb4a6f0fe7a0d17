//! Integration tests for the WebSocket channel adapter.
//!
//! A real listener and client are connected over loopback; the server
//! side is wrapped in a `WebSocketChannel` and driven through the
//! `Channel`/`Inbound` API while the client side is raw tungstenite.

#[cfg(feature = "websocket")]
mod websocket {
    use cardcast_transport::{Channel, WebSocketChannel};
    use futures_util::{SinkExt, StreamExt};
    use tokio::net::TcpListener;
    use tokio_tungstenite::tungstenite::Message;

    type ClientWs = tokio_tungstenite::WebSocketStream<
        tokio_tungstenite::MaybeTlsStream<tokio::net::TcpStream>,
    >;

    /// Binds on a random port, connects a client, and returns the wrapped
    /// server side plus the raw client stream.
    async fn connected() -> (WebSocketChannel, cardcast_transport::Inbound, ClientWs) {
        let listener = TcpListener::bind("127.0.0.1:0").await.expect("should bind");
        let addr = listener.local_addr().expect("should have addr");

        let server = tokio::spawn(async move {
            let (stream, _) = listener.accept().await.expect("should accept");
            tokio_tungstenite::accept_async(stream)
                .await
                .expect("handshake should succeed")
        });

        let (client, _) = tokio_tungstenite::connect_async(format!("ws://{addr}"))
            .await
            .expect("client should connect");
        let server_ws = server.await.expect("task should complete");

        let (channel, inbound) = WebSocketChannel::spawn(server_ws);
        (channel, inbound, client)
    }

    #[tokio::test]
    async fn test_send_reaches_peer_as_text_frame() {
        let (channel, _inbound, mut client) = connected().await;

        channel
            .send(br#"{"command":"JOIN","name":"ana"}"#)
            .expect("send should queue");

        let msg = client.next().await.unwrap().unwrap();
        assert!(msg.is_text());
        assert_eq!(msg.into_text().unwrap().as_str(), r#"{"command":"JOIN","name":"ana"}"#);
    }

    #[tokio::test]
    async fn test_peer_frames_arrive_on_inbound() {
        let (_channel, mut inbound, mut client) = connected().await;

        client
            .send(Message::Text(r#"{"event":"player_join"}"#.into()))
            .await
            .unwrap();
        client
            .send(Message::Binary(b"raw".to_vec().into()))
            .await
            .unwrap();

        assert_eq!(
            inbound.recv().await,
            Some(br#"{"event":"player_join"}"#.to_vec())
        );
        assert_eq!(inbound.recv().await, Some(b"raw".to_vec()));
    }

    #[tokio::test]
    async fn test_inbound_ends_when_peer_closes() {
        let (_channel, mut inbound, mut client) = connected().await;

        client.close(None).await.unwrap();

        assert_eq!(inbound.recv().await, None);
    }
}
