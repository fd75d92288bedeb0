//! Integration tests for the Gmail client.
//!
//! A one-shot HTTP responder on a loopback socket stands in for the API, so
//! the tests exercise request building, auth headers, and response decoding
//! end to end.

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

use mailtally_gmail::{Error, GmailClient, MessageId, find_header};

/// Serves one canned response and hands back the raw request it received.
async fn serve_once(status: &'static str, body: &'static str) -> (String, JoinHandle<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let base = format!("http://{}/gmail/v1", listener.local_addr().unwrap());

    let handle = tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        let mut request = Vec::new();
        let mut buf = [0_u8; 1024];
        while !request.windows(4).any(|w| w == b"\r\n\r\n") {
            let n = socket.read(&mut buf).await.unwrap();
            if n == 0 {
                break;
            }
            request.extend_from_slice(&buf[..n]);
        }

        let response = format!(
            "HTTP/1.1 {status}\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{body}",
            body.len()
        );
        socket.write_all(response.as_bytes()).await.unwrap();
        socket.shutdown().await.unwrap();
        String::from_utf8_lossy(&request).into_owned()
    });

    (base, handle)
}

fn client(base: &str) -> GmailClient {
    GmailClient::new("test-token")
        .unwrap()
        .with_base_url(base)
        .unwrap()
}

#[tokio::test]
async fn test_list_messages_request_and_page() {
    let (base, server) = serve_once(
        "200 OK",
        r#"{"messages":[{"id":"a1","threadId":"t1"},{"id":"a2","threadId":"t1"}],"nextPageToken":"p2"}"#,
    )
    .await;

    let page = client(&base)
        .with_page_size(Some(50))
        .list_messages("is:inbox", Some("p1"))
        .await
        .unwrap();

    assert_eq!(page.messages, vec![MessageId::new("a1"), MessageId::new("a2")]);
    assert_eq!(page.next_page_token.as_deref(), Some("p2"));

    let request = server.await.unwrap();
    let request_line = request.lines().next().unwrap();
    assert!(request_line.starts_with("GET /gmail/v1/users/me/messages?"));
    assert!(request_line.contains("q=is%3Ainbox"));
    assert!(request_line.contains("pageToken=p1"));
    assert!(request_line.contains("maxResults=50"));
    assert!(request.to_lowercase().contains("authorization: bearer test-token"));
}

#[tokio::test]
async fn test_get_message_metadata_asks_for_from_only() {
    let (base, server) = serve_once(
        "200 OK",
        r#"{"id":"a1","payload":{"headers":[{"name":"From","value":"Jane <jane@example.com>"}]}}"#,
    )
    .await;

    let headers = client(&base)
        .get_message_metadata(&MessageId::new("a1"))
        .await
        .unwrap();
    assert_eq!(find_header(&headers, "From"), Some("Jane <jane@example.com>"));

    let request = server.await.unwrap();
    let request_line = request.lines().next().unwrap();
    assert!(request_line.starts_with("GET /gmail/v1/users/me/messages/a1?"));
    assert!(request_line.contains("format=metadata"));
    assert!(request_line.contains("metadataHeaders=From"));
}

#[tokio::test]
async fn test_api_error_envelope() {
    let (base, server) = serve_once(
        "404 Not Found",
        r#"{"error":{"code":404,"message":"Requested entity was not found.","status":"NOT_FOUND"}}"#,
    )
    .await;

    let err = client(&base)
        .get_message_metadata(&MessageId::new("gone"))
        .await
        .unwrap_err();
    match err {
        Error::Api { status, message } => {
            assert_eq!(status, 404);
            assert_eq!(message, "Requested entity was not found.");
        }
        other => panic!("unexpected error: {other}"),
    }
    server.await.unwrap();
}

#[tokio::test]
async fn test_api_error_plain_body() {
    let (base, server) = serve_once("503 Service Unavailable", "backend down").await;

    let err = client(&base)
        .list_messages("is:inbox", None)
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Api { status: 503, ref message } if message == "backend down"));
    server.await.unwrap();
}

#[tokio::test]
async fn test_malformed_body() {
    let (base, server) = serve_once("200 OK", r#"{"messages": 7}"#).await;

    let err = client(&base)
        .list_messages("is:inbox", None)
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Json(_)));
    server.await.unwrap();
}
