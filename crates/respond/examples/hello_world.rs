use std::sync::Arc;

use micro_respond::transmit::{HeaderSettings, Response};
use tokio::io::AsyncReadExt;
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;
use tracing::{Level, error, info, warn};
use tracing_subscriber::FmtSubscriber;

#[tokio::main]
async fn main() {
    let subscriber = FmtSubscriber::builder().with_max_level(Level::INFO).finish();
    tracing::subscriber::set_global_default(subscriber).expect("setting default subscriber failed");

    let settings = Arc::new(HeaderSettings {
        default_headers: vec![("Server".to_string(), "micro-respond".to_string())],
        include_content_length: true,
    });

    info!(port = 8080, "start listening");
    let tcp_listener = match TcpListener::bind("127.0.0.1:8080").await {
        Ok(tcp_listener) => tcp_listener,
        Err(e) => {
            error!(cause = %e, "bind server error");
            return;
        }
    };

    loop {
        let (mut tcp_stream, remote_addr) = match tcp_listener.accept().await {
            Ok(stream_and_addr) => stream_and_addr,
            Err(e) => {
                warn!(cause = %e, "failed to accept");
                continue;
            }
        };

        let settings = Arc::clone(&settings);

        tokio::spawn(async move {
            // this demo ignores the request beyond draining its head
            let mut request_head = [0u8; 4 * 1024];
            let _ = tcp_stream.read(&mut request_head).await;

            let (_reader, writer) = tcp_stream.into_split();
            let mut response = Response::new("HTTP/1.1", settings, writer);
            response.set_status(200);
            response.set_content_type("text/plain; charset=utf-8");

            let token = CancellationToken::new();
            match response.send_text("Hello World!\r\n", true, &token).await {
                Ok(()) => info!(%remote_addr, "response sent, connection shutdown"),
                Err(error) => error!(%remote_addr, %error, "sending response failed"),
            }
        });
    }
}
