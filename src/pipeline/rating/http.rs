//! Blocking HTTP plumbing shared by the rating provider clients.

use std::time::Duration;

use reqwest::blocking::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::pipeline::ScoringError;

pub(crate) fn build_client(timeout_secs: u64) -> Result<Client, ScoringError> {
    Client::builder()
        .timeout(Duration::from_secs(timeout_secs))
        .build()
        .map_err(|e| ScoringError::HttpClient(e.to_string()))
}

/// Send `body` as JSON and decode a successful JSON reply.
///
/// Connect failures, timeouts and non-2xx statuses map to transport errors;
/// an undecodable 2xx body is `ResponseParsing`.
pub(crate) fn send_json<B, R>(
    request: RequestBuilder,
    body: &B,
    base_url: &str,
    timeout_secs: u64,
) -> Result<R, ScoringError>
where
    B: Serialize + ?Sized,
    R: DeserializeOwned,
{
    let response = request
        .json(body)
        .send()
        .map_err(|e| map_send_error(&e, base_url, timeout_secs))?;

    let status = response.status();
    if !status.is_success() {
        let body = response.text().unwrap_or_default();
        return Err(ScoringError::ProviderError {
            status: status.as_u16(),
            body,
        });
    }

    response
        .json()
        .map_err(|e| ScoringError::ResponseParsing(e.to_string()))
}

fn map_send_error(e: &reqwest::Error, base_url: &str, timeout_secs: u64) -> ScoringError {
    if e.is_connect() {
        ScoringError::ProviderConnection(base_url.to_string())
    } else if e.is_timeout() {
        ScoringError::HttpClient(format!("Request timed out after {timeout_secs}s"))
    } else {
        ScoringError::HttpClient(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use std::io::{Read, Write};
    use std::net::TcpListener;
    use std::thread;

    use serde::Deserialize;

    use super::*;
    use crate::pipeline::ErrorKind;

    #[derive(Debug, Deserialize)]
    struct Reply {
        ok: bool,
    }

    /// Serve one canned HTTP response on a loopback port.
    fn serve_once(status_line: &'static str, body: &'static str) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        thread::spawn(move || {
            let (mut stream, _) = listener.accept().unwrap();
            read_request(&mut stream);
            let response = format!(
                "{status_line}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                body.len()
            );
            stream.write_all(response.as_bytes()).unwrap();
        });
        format!("http://{addr}")
    }

    /// Drain headers and a Content-Length body so closing doesn't reset the socket.
    fn read_request(stream: &mut std::net::TcpStream) {
        let mut data = Vec::new();
        let mut buf = [0u8; 1024];
        loop {
            let n = stream.read(&mut buf).unwrap_or(0);
            if n == 0 {
                return;
            }
            data.extend_from_slice(&buf[..n]);
            let text = String::from_utf8_lossy(&data);
            if let Some(header_end) = text.find("\r\n\r\n") {
                let content_length = text[..header_end]
                    .lines()
                    .filter_map(|l| l.split_once(':'))
                    .find(|(k, _)| k.eq_ignore_ascii_case("content-length"))
                    .and_then(|(_, v)| v.trim().parse::<usize>().ok())
                    .unwrap_or(0);
                if data.len() >= header_end + 4 + content_length {
                    return;
                }
            }
        }
    }

    fn local_client() -> Client {
        Client::builder()
            .no_proxy()
            .timeout(Duration::from_secs(5))
            .build()
            .unwrap()
    }

    #[test]
    fn build_client_succeeds() {
        assert!(build_client(30).is_ok());
    }

    #[test]
    fn decodes_successful_reply() {
        let base = serve_once("HTTP/1.1 200 OK", r#"{"ok": true}"#);
        let client = local_client();
        let reply: Reply =
            send_json(client.post(format!("{base}/x")), &serde_json::json!({}), &base, 5).unwrap();
        assert!(reply.ok);
    }

    #[test]
    fn error_status_is_provider_error() {
        let base = serve_once("HTTP/1.1 503 Service Unavailable", r#"{"error": "busy"}"#);
        let client = local_client();
        let err = send_json::<_, Reply>(client.post(format!("{base}/x")), &serde_json::json!({}), &base, 5)
            .unwrap_err();
        assert!(matches!(err, ScoringError::ProviderError { status: 503, .. }));
        assert!(err.is_retryable());
    }

    #[test]
    fn undecodable_body_is_response_parsing() {
        let base = serve_once("HTTP/1.1 200 OK", r#"{"unexpected": 1}"#);
        let client = local_client();
        let err = send_json::<_, Reply>(client.post(format!("{base}/x")), &serde_json::json!({}), &base, 5)
            .unwrap_err();
        assert!(matches!(err, ScoringError::ResponseParsing(_)));
        assert_eq!(err.kind(), ErrorKind::CollaboratorMalformedResponse);
    }

    #[test]
    fn refused_connection_is_transport_error() {
        // Bind then drop to get a loopback port nothing listens on.
        let port = TcpListener::bind("127.0.0.1:0")
            .unwrap()
            .local_addr()
            .unwrap()
            .port();
        let base = format!("http://127.0.0.1:{port}");
        let client = local_client();
        let err = send_json::<_, Reply>(client.post(format!("{base}/x")), &serde_json::json!({}), &base, 5)
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::CollaboratorUnavailable);
    }
}
