//! The reqwest transport against a loopback HTTP server

use docholiday_core::http::client::USER_AGENT;
use docholiday_core::http::{ReqwestTransport, Transport};
use docholiday_core::Error;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

/// Accept one connection, capture the raw request, reply with `response`
async fn serve_once(response: &'static str) -> (String, tokio::task::JoinHandle<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let base = format!("http://{}", listener.local_addr().unwrap());

    let handle = tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        let mut raw = Vec::new();
        let mut buf = [0u8; 4096];
        loop {
            let n = socket.read(&mut buf).await.unwrap();
            if n == 0 {
                break;
            }
            raw.extend_from_slice(&buf[..n]);
            if request_complete(&raw) {
                break;
            }
        }
        socket.write_all(response.as_bytes()).await.unwrap();
        socket.shutdown().await.unwrap();
        String::from_utf8(raw).unwrap()
    });

    (base, handle)
}

fn request_complete(raw: &[u8]) -> bool {
    let text = String::from_utf8_lossy(raw);
    let Some(header_end) = text.find("\r\n\r\n") else {
        return false;
    };
    let content_length = text[..header_end]
        .lines()
        .find_map(|line| {
            let (name, value) = line.split_once(':')?;
            name.eq_ignore_ascii_case("content-length")
                .then(|| value.trim().parse::<usize>().ok())
                .flatten()
        })
        .unwrap_or(0);
    raw.len() >= header_end + 4 + content_length
}

#[tokio::test]
async fn test_post_sends_headers_and_body() {
    let (base, server) = serve_once(
        "HTTP/1.1 201 Created\r\nContent-Type: application/json\r\nContent-Length: 57\r\nConnection: close\r\n\r\n\
         {\"id\":\"j1\",\"orgId\":\"o1\",\"type\":\"doc\",\"state\":\"requested\"}",
    )
    .await;

    let transport = ReqwestTransport::new();
    let body = r#"{"docRequest":{"title":"T","body":"B","sourceConnection":"acme/widgets"}}"#;
    let response = transport
        .post_json(&format!("{}/api/v1/jobs", base), "tok-123", body)
        .await
        .unwrap();

    assert_eq!(response.status, 201);
    assert!(response.body.contains("\"id\":\"j1\""));

    let request = server.await.unwrap();
    let lower = request.to_ascii_lowercase();
    assert!(request.starts_with("POST /api/v1/jobs HTTP/1.1\r\n"));
    assert!(lower.contains("authorization: bearer tok-123\r\n"));
    assert!(lower.contains("content-type: application/json\r\n"));
    assert!(lower.contains(&format!("user-agent: {}\r\n", USER_AGENT.to_ascii_lowercase())));
    assert!(request.ends_with(body));
}

#[tokio::test]
async fn test_error_status_is_a_response() {
    let (base, server) = serve_once(
        "HTTP/1.1 500 Internal Server Error\r\nContent-Length: 4\r\nConnection: close\r\n\r\nboom",
    )
    .await;

    let response = ReqwestTransport::new()
        .post_json(&format!("{}/api/v1/jobs", base), "tok", "{}")
        .await
        .unwrap();

    assert_eq!(response.status, 500);
    assert_eq!(response.body, "boom");
    server.await.unwrap();
}

#[tokio::test]
async fn test_connection_refused_is_transport_error() {
    // Bind then drop to get a port nothing listens on
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let result = ReqwestTransport::new()
        .post_json(&format!("http://{}/api/v1/jobs", addr), "tok", "{}")
        .await;

    match result {
        Err(Error::Transport(message)) => assert!(!message.contains("tok")),
        other => panic!("expected transport error, got {:?}", other),
    }
}
