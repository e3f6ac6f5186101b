//! HTTP adapter: Implementation of `ScoringTransport` with `ureq`.

use std::time::Duration;

use serde_json::Value;

use crate::ports::{ScoringTransport, TransportError};

/// Longest error detail kept from a failed response.
const MAX_STATUS_DETAIL: usize = 512;

/// Blocking HTTP client with a per-request timeout.
pub struct HttpTransport {
    agent: ureq::Agent,
}

impl HttpTransport {
    /// Create a transport whose requests give up after `timeout`.
    #[must_use]
    pub fn new(timeout: Duration) -> Self {
        let agent = ureq::AgentBuilder::new().timeout(timeout).build();
        Self { agent }
    }
}

impl ScoringTransport for HttpTransport {
    fn post_json(&self, url: &str, body: &Value) -> Result<Value, TransportError> {
        let response = match self
            .agent
            .post(url)
            .set("Accept", "application/json")
            .send_json(body)
        {
            Ok(response) => response,
            Err(ureq::Error::Status(code, response)) => {
                return Err(TransportError::Status(code, status_detail(response)))
            }
            Err(ureq::Error::Transport(e)) => {
                return Err(TransportError::Connection(e.to_string()))
            }
        };

        response
            .into_json::<Value>()
            .map_err(|e| TransportError::Body(e.to_string()))
    }
}

/// Error detail of a failed response: the `error` field of a JSON body, or
/// the raw body text.
fn status_detail(response: ureq::Response) -> String {
    let text = response.into_string().unwrap_or_default();
    let detail = serde_json::from_str::<Value>(&text)
        .ok()
        .and_then(|body| body.get("error").and_then(Value::as_str).map(str::to_string))
        .unwrap_or(text);

    let detail = detail.trim();
    let mut end = detail.len().min(MAX_STATUS_DETAIL);
    while !detail.is_char_boundary(end) {
        end -= 1;
    }
    detail[..end].to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::io::{Read, Write};
    use std::net::TcpListener;

    /// Serve one canned HTTP response on a local port and return its URL.
    fn serve_once(status: &'static str, body: &'static str) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
        let addr = listener.local_addr().expect("addr");

        std::thread::spawn(move || {
            let Ok((mut stream, _)) = listener.accept() else {
                return;
            };
            let _ = stream.set_read_timeout(Some(Duration::from_millis(500)));

            // Read the request head and body before answering
            let mut request = Vec::new();
            let mut chunk = [0u8; 1024];
            loop {
                match stream.read(&mut chunk) {
                    Ok(0) | Err(_) => break,
                    Ok(n) => request.extend_from_slice(&chunk[..n]),
                }
                let text = String::from_utf8_lossy(&request).to_lowercase();
                if let Some(head_end) = text.find("\r\n\r\n") {
                    let length = text
                        .lines()
                        .find_map(|l| l.strip_prefix("content-length:"))
                        .and_then(|v| v.trim().parse::<usize>().ok())
                        .unwrap_or(0);
                    if request.len() >= head_end + 4 + length {
                        break;
                    }
                }
            }

            let response = format!(
                "HTTP/1.1 {status}\r\nContent-Type: application/json\r\n\
                 Content-Length: {}\r\nConnection: close\r\n\r\n{body}",
                body.len()
            );
            let _ = stream.write_all(response.as_bytes());
        });

        format!("http://{addr}/predict")
    }

    #[test]
    fn test_posts_json_and_reads_reply() {
        let url = serve_once("200 OK", r#"{"riskScore": 12}"#);
        let transport = HttpTransport::new(Duration::from_secs(2));

        let reply = transport.post_json(&url, &json!({"age": 40})).expect("Should answer");
        assert_eq!(reply, json!({"riskScore": 12}));
    }

    #[test]
    fn test_status_error_keeps_server_message() {
        let url = serve_once(
            "500 Internal Server Error",
            r#"{"error": "model not loaded", "riskScore": 50}"#,
        );
        let transport = HttpTransport::new(Duration::from_secs(2));

        let result = transport.post_json(&url, &json!({"age": 40}));
        assert_eq!(
            result,
            Err(TransportError::Status(500, "model not loaded".to_string()))
        );
    }

    #[test]
    fn test_unreachable_host_is_connection_error() {
        // Port 9 on localhost is discard; nothing should be listening.
        let transport = HttpTransport::new(Duration::from_millis(200));
        let result = transport.post_json("http://127.0.0.1:9/predict", &Value::Null);
        assert!(matches!(result, Err(TransportError::Connection(_))));
    }
}
