//! HTTP plumbing for the dashboard API.

mod basic;
mod client;

pub use basic::BasicClient;
pub use client::HttpClient;

use anyhow::{Context, Result, anyhow};
use reqwest::{Method, Request, Url};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::debug;

/// Joins `base` and an absolute endpoint `path`, then appends `params` as
/// query pairs in order.
pub fn endpoint_url(base: &str, path: &str, params: &[(&str, String)]) -> Result<Url> {
    let raw = format!("{}{}", base.trim_end_matches('/'), path);
    let mut url = Url::parse(&raw).with_context(|| format!("invalid API URL '{raw}'"))?;

    if !params.is_empty() {
        let mut pairs = url.query_pairs_mut();
        for (key, value) in params {
            pairs.append_pair(key, value);
        }
    }

    Ok(url)
}

/// Executes `req` and decodes a JSON body, failing on non-2xx responses.
async fn send_json<C: HttpClient, T: DeserializeOwned>(client: &C, req: Request) -> Result<T> {
    let method = req.method().clone();
    let url = req.url().clone();

    let resp = client
        .execute(req)
        .await
        .with_context(|| format!("{method} {url} failed"))?;

    let status = resp.status();
    debug!(%method, %url, %status, "API response");

    if !status.is_success() {
        let body = resp.text().await.unwrap_or_default();
        return Err(anyhow!("{method} {url} returned status {status}: {body}"));
    }

    resp.json::<T>()
        .await
        .with_context(|| format!("failed to decode response from {url}"))
}

pub async fn get_json<C: HttpClient, T: DeserializeOwned>(client: &C, url: Url) -> Result<T> {
    send_json(client, Request::new(Method::GET, url)).await
}

pub async fn post_json<C, B, T>(client: &C, url: Url, body: &B) -> Result<T>
where
    C: HttpClient,
    B: Serialize + ?Sized,
    T: DeserializeOwned,
{
    let mut req = Request::new(Method::POST, url);
    *req.body_mut() = Some(serde_json::to_vec(body)?.into());
    req.headers_mut().insert(
        reqwest::header::CONTENT_TYPE,
        reqwest::header::HeaderValue::from_static("application/json"),
    );
    send_json(client, req).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    #[test]
    fn test_endpoint_url_without_params() {
        let url = endpoint_url("http://localhost:8000", "/api/v1/health", &[]).unwrap();
        assert_eq!(url.as_str(), "http://localhost:8000/api/v1/health");
    }

    #[test]
    fn test_endpoint_url_trims_trailing_slash() {
        let url = endpoint_url("http://localhost:8000/", "/api/v1/health", &[]).unwrap();
        assert_eq!(url.path(), "/api/v1/health");
    }

    #[test]
    fn test_endpoint_url_encodes_params() {
        let params = vec![
            ("location", "hhs 1".to_string()),
            ("limit", "7".to_string()),
        ];
        let url = endpoint_url("http://api", "/api/v1/surveillance/current", &params).unwrap();
        assert_eq!(url.query(), Some("location=hhs+1&limit=7"));
    }

    #[test]
    fn test_endpoint_url_rejects_garbage_base() {
        assert!(endpoint_url("not a url", "/x", &[]).is_err());
    }

    /// Answers one request on a loopback port with `status` and a JSON
    /// `body`, handing back the raw request text.
    async fn serve_once(
        status: &'static str,
        body: &'static str,
    ) -> (String, tokio::task::JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let base = format!("http://{}", listener.local_addr().unwrap());

        let handle = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut request = Vec::new();
            let mut buf = [0u8; 1024];
            loop {
                let n = socket.read(&mut buf).await.unwrap();
                request.extend_from_slice(&buf[..n]);
                let text = String::from_utf8_lossy(&request).to_string();
                if let Some(end) = text.find("\r\n\r\n") {
                    let length = text
                        .lines()
                        .find_map(|l| {
                            let l = l.to_lowercase();
                            l.strip_prefix("content-length:")
                                .and_then(|v| v.trim().parse::<usize>().ok())
                        })
                        .unwrap_or(0);
                    if request.len() >= end + 4 + length || n == 0 {
                        break;
                    }
                }
                if n == 0 {
                    break;
                }
            }

            let response = format!(
                "HTTP/1.1 {status}\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{body}",
                body.len()
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            String::from_utf8_lossy(&request).to_string()
        });

        (base, handle)
    }

    #[tokio::test]
    async fn test_get_json_decodes_body() {
        let (base, server) = serve_once("200 OK", r#"{"status":"operational"}"#).await;
        let client = BasicClient::new(std::time::Duration::from_secs(5)).unwrap();

        let url = endpoint_url(&base, "/api/v1/health", &[("location", "US".to_string())]).unwrap();
        let body: serde_json::Value = get_json(&client, url).await.unwrap();
        assert_eq!(body["status"], "operational");

        let request = server.await.unwrap();
        assert!(request.starts_with("GET /api/v1/health?location=US "));
    }

    #[tokio::test]
    async fn test_post_json_sends_body() {
        let (base, server) = serve_once("200 OK", r#"{"accepted":true}"#).await;
        let client = BasicClient::new(std::time::Duration::from_secs(5)).unwrap();

        let url = endpoint_url(&base, "/api/v1/models/train", &[]).unwrap();
        let payload = serde_json::json!({"location": "US"});
        let body: serde_json::Value = post_json(&client, url, &payload).await.unwrap();
        assert_eq!(body["accepted"], true);

        let request = server.await.unwrap();
        assert!(request.starts_with("POST /api/v1/models/train "));
        assert!(request.to_lowercase().contains("content-type: application/json"));
        assert!(request.ends_with(r#"{"location":"US"}"#));
    }

    #[tokio::test]
    async fn test_error_status_is_reported() {
        let (base, _server) =
            serve_once("503 Service Unavailable", r#"{"detail":"warming up"}"#).await;
        let client = BasicClient::new(std::time::Duration::from_secs(5)).unwrap();

        let url = endpoint_url(&base, "/api/v1/health/ready", &[]).unwrap();
        let err = get_json::<_, serde_json::Value>(&client, url).await.unwrap_err();
        let message = err.to_string();
        assert!(message.contains("503"));
        assert!(message.contains("warming up"));
    }

    #[tokio::test]
    async fn test_get_json_reports_connection_failure() {
        let client = BasicClient::new(std::time::Duration::from_millis(200)).unwrap();
        // port 9 (discard) on loopback is not expected to speak HTTP
        let url = endpoint_url("http://127.0.0.1:9", "/api/v1/health", &[]).unwrap();
        let result: Result<serde_json::Value> = get_json(&client, url).await;
        assert!(result.is_err());
    }
}
