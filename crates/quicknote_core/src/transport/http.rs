//! reqwest-backed transport.
//!
//! No timeout is configured; reqwest's defaults apply.

use crate::error::TransportError;
use crate::transport::{ApiMethod, ApiRequest, ApiResponse, Transport};
use async_trait::async_trait;
use log::debug;
use reqwest::Client;

/// Transport that performs real HTTP calls.
#[derive(Debug, Clone, Default)]
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wraps a caller-configured client (proxies, TLS roots, headers).
    pub fn with_client(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, TransportError> {
        let ApiRequest { method, url, body } = request;
        debug!("event=http_send module=transport method={method} url={url}");

        let builder = match method {
            ApiMethod::Get => self.client.get(url),
            ApiMethod::Post => self.client.post(url),
            ApiMethod::Delete => self.client.delete(url),
        };
        let builder = match body {
            Some(value) => builder.json(&value),
            None => builder,
        };

        let response = builder.send().await?;
        let status = response.status().as_u16();
        let bytes = response.bytes().await?;
        debug!(
            "event=http_recv module=transport method={method} status={status} bytes={}",
            bytes.len()
        );
        Ok(ApiResponse::new(status, bytes.to_vec()))
    }
}

#[cfg(test)]
mod tests {
    use super::HttpTransport;
    use crate::config::ClientConfig;
    use crate::error::TransportError;
    use crate::transport::{ApiRequest, Transport};
    use reqwest::Client;
    use serde_json::json;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;
    use tokio::task::JoinHandle;
    use url::Url;

    /// One request as received on the wire.
    struct Received {
        head: String,
        body: Vec<u8>,
    }

    impl Received {
        fn request_line(&self) -> &str {
            self.head.lines().next().unwrap_or_default()
        }

        fn header(&self, name: &str) -> Option<String> {
            self.head.lines().skip(1).find_map(|line| {
                let (key, value) = line.split_once(':')?;
                key.trim()
                    .eq_ignore_ascii_case(name)
                    .then(|| value.trim().to_string())
            })
        }
    }

    fn transport() -> HttpTransport {
        HttpTransport::with_client(Client::builder().no_proxy().build().unwrap())
    }

    /// Accepts one connection, records the request, answers with `status`.
    async fn serve_once(status: &'static str, body: &'static str) -> (Url, JoinHandle<Received>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let handle = tokio::spawn(async move {
            let (mut stream, _) = listener.accept().await.unwrap();
            let mut buf = Vec::new();
            let mut chunk = [0u8; 1024];
            let head_end = loop {
                let n = stream.read(&mut chunk).await.unwrap();
                assert!(n > 0, "connection closed before request head");
                buf.extend_from_slice(&chunk[..n]);
                if let Some(pos) = buf.windows(4).position(|w| w == b"\r\n\r\n") {
                    break pos + 4;
                }
            };
            let head = String::from_utf8_lossy(&buf[..head_end]).into_owned();
            let received = Received {
                head,
                body: Vec::new(),
            };
            let length = received
                .header("content-length")
                .and_then(|value| value.parse::<usize>().ok())
                .unwrap_or(0);
            while buf.len() < head_end + length {
                let n = stream.read(&mut chunk).await.unwrap();
                assert!(n > 0, "connection closed before request body");
                buf.extend_from_slice(&chunk[..n]);
            }

            let response = format!(
                "HTTP/1.1 {status}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                body.len()
            );
            stream.write_all(response.as_bytes()).await.unwrap();
            let _ = stream.shutdown().await;

            Received {
                body: buf[head_end..head_end + length].to_vec(),
                ..received
            }
        });
        let base = Url::parse(&format!("http://{addr}/api/notes")).unwrap();
        (base, handle)
    }

    #[tokio::test]
    async fn post_sends_exact_json_body_with_content_type() {
        let (base, server) = serve_once("201 Created", "Note created successfully.").await;

        let response = transport()
            .send(ApiRequest::post(
                base,
                json!({"title": " A ", "content": "line\nbreak"}),
            ))
            .await
            .expect("201 should be a response");

        assert_eq!(response.status, 201);
        assert_eq!(response.body, b"Note created successfully.");

        let received = server.await.unwrap();
        assert_eq!(received.request_line(), "POST /api/notes HTTP/1.1");
        assert_eq!(
            received.header("content-type").as_deref(),
            Some("application/json")
        );
        let sent: serde_json::Value = serde_json::from_slice(&received.body).unwrap();
        assert_eq!(sent, json!({"title": " A ", "content": "line\nbreak"}));
    }

    #[tokio::test]
    async fn delete_targets_item_path_beneath_base() {
        let (base, server) = serve_once("200 OK", "").await;
        let config = ClientConfig::new(base.as_str()).unwrap();

        let response = transport()
            .send(ApiRequest::delete(config.note_url("42")))
            .await
            .unwrap();

        assert_eq!(response.status, 200);
        let received = server.await.unwrap();
        assert_eq!(received.request_line(), "DELETE /api/notes/42 HTTP/1.1");
        assert!(received.body.is_empty());
    }

    #[tokio::test]
    async fn server_error_is_returned_as_response_not_error() {
        let (base, server) = serve_once("500 Internal Server Error", "boom").await;

        let response = transport()
            .send(ApiRequest::get(base))
            .await
            .expect("5xx must not be a transport error");

        assert_eq!(response.status, 500);
        assert_eq!(response.body, b"boom");
        assert!(!response.is_success());
        let received = server.await.unwrap();
        assert_eq!(received.request_line(), "GET /api/notes HTTP/1.1");
    }

    #[tokio::test]
    async fn refused_connection_is_transport_error() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);
        let url = Url::parse(&format!("http://{addr}/api/notes")).unwrap();

        let err = transport()
            .send(ApiRequest::get(url))
            .await
            .expect_err("nothing is listening");
        assert!(matches!(err, TransportError::Http(_)));
    }
}
