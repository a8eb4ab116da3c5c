use std::time::Duration;

use reqwest::Client;

use rst_common::standard::async_trait::async_trait;
use rst_common::standard::serde_json::{Map, Value};
use rst_common::with_logging::log::debug;

use sitelink_core::connect::types::{
    ConnectError, RemoteClientBuilder, RemoteMethod, RemoteResponse,
};

/// `HttpRemoteClient` calls the remote management API over HTTP
///
/// Every response body is expected to be a JSON `{success, data}` envelope. Transport errors,
/// non 2xx statuses and undecodable bodies are reported as [`ConnectError::RemoteError`]
#[derive(Clone, Debug)]
pub struct HttpRemoteClient {
    base_url: String,
    api_key: String,
    http: Client,
}

impl HttpRemoteClient {
    pub fn new(base_url: &str, api_key: &str, timeout: Duration) -> Result<Self, ConnectError> {
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|err| ConnectError::RemoteError(err.to_string()))?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
            http,
        })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }
}

fn query_pairs(query: &Map<String, Value>) -> Vec<(String, String)> {
    query
        .iter()
        .map(|(key, val)| {
            let text = match val {
                Value::String(text) => text.to_owned(),
                other => other.to_string(),
            };

            (key.to_owned(), text)
        })
        .collect()
}

#[async_trait]
impl RemoteClientBuilder for HttpRemoteClient {
    async fn call(
        &self,
        path: String,
        query: Map<String, Value>,
        body: Map<String, Value>,
        method: RemoteMethod,
    ) -> Result<RemoteResponse, ConnectError> {
        let url = self.endpoint(&path);
        debug!("[remote:call] {} {}", method, url);

        let mut req = match method {
            RemoteMethod::Get => self.http.get(url),
            RemoteMethod::Post => self.http.post(url),
            RemoteMethod::Put => self.http.put(url),
            RemoteMethod::Delete => self.http.delete(url),
        };

        if !query.is_empty() {
            req = req.query(&query_pairs(&query));
        }

        if !body.is_empty() && method != RemoteMethod::Get {
            req = req.json(&body);
        }

        if !self.api_key.is_empty() {
            req = req.bearer_auth(&self.api_key);
        }

        let resp = req
            .send()
            .await
            .map_err(|err| ConnectError::RemoteError(err.to_string()))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(ConnectError::RemoteError(format!(
                "unexpected status: {}",
                status
            )));
        }

        let raw = resp
            .json::<Value>()
            .await
            .map_err(|err| ConnectError::RemoteError(err.to_string()))?;

        Ok(RemoteResponse::from_raw(raw))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use mockito::Matcher;
    use rst_common::standard::serde_json::json;
    use rst_common::with_tokio::tokio;

    fn generate_client(base_url: &str, api_key: &str) -> HttpRemoteClient {
        HttpRemoteClient::new(base_url, api_key, Duration::from_secs(5)).unwrap()
    }

    #[tokio::test]
    async fn test_call_generate_token() {
        let mut server = mockito::Server::new_async().await;
        let body = json!({"success": true, "data": {"token": "abc"}});

        let mock = server
            .mock("GET", "/connects/5/generate-token")
            .match_header("authorization", "Bearer label|secret")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(body.to_string())
            .create_async()
            .await;

        let client = generate_client(&format!("{}/", server.url()), "label|secret");
        let resp = client
            .call(
                "connects/5/generate-token".to_string(),
                Map::new(),
                Map::new(),
                RemoteMethod::Get,
            )
            .await;

        mock.assert();
        assert!(resp.is_ok());

        let resp = resp.unwrap();
        assert!(resp.success);
        assert_eq!(resp.token(), Some("abc".to_string()));
        assert_eq!(resp.raw, body);
    }

    #[tokio::test]
    async fn test_call_with_query_and_body() {
        let mut server = mockito::Server::new_async().await;

        let mock = server
            .mock("POST", "/connects")
            .match_query(Matcher::UrlEncoded("page".into(), "2".into()))
            .match_body(Matcher::Json(json!({"title": "Example"})))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"success": false, "data": null}"#)
            .create_async()
            .await;

        let mut query = Map::new();
        query.insert("page".to_string(), json!(2));

        let mut body = Map::new();
        body.insert("title".to_string(), json!("Example"));

        let client = generate_client(&server.url(), "");
        let resp = client
            .call("/connects".to_string(), query, body, RemoteMethod::Post)
            .await;

        mock.assert();
        assert!(!resp.unwrap().success);
    }

    #[tokio::test]
    async fn test_call_unexpected_status() {
        let mut server = mockito::Server::new_async().await;

        let mock = server
            .mock("GET", "/connects/5/generate-token")
            .with_status(500)
            .with_body("internal error")
            .create_async()
            .await;

        let client = generate_client(&server.url(), "");
        let resp = client
            .call(
                "connects/5/generate-token".to_string(),
                Map::new(),
                Map::new(),
                RemoteMethod::Get,
            )
            .await;

        mock.assert();
        assert!(matches!(resp, Err(ConnectError::RemoteError(_))));
        assert!(resp.unwrap_err().to_string().contains("500"));
    }

    #[tokio::test]
    async fn test_call_invalid_body() {
        let mut server = mockito::Server::new_async().await;

        let mock = server
            .mock("GET", "/connects/5/generate-token")
            .with_status(200)
            .with_body("<html>maintenance</html>")
            .create_async()
            .await;

        let client = generate_client(&server.url(), "");
        let resp = client
            .call(
                "connects/5/generate-token".to_string(),
                Map::new(),
                Map::new(),
                RemoteMethod::Get,
            )
            .await;

        mock.assert();
        assert!(matches!(resp, Err(ConnectError::RemoteError(_))));
    }

    #[tokio::test]
    async fn test_call_unreachable() {
        let client = generate_client("http://127.0.0.1:1", "");
        let resp = client
            .call(
                "connects/5/generate-token".to_string(),
                Map::new(),
                Map::new(),
                RemoteMethod::Get,
            )
            .await;

        assert!(matches!(resp, Err(ConnectError::RemoteError(_))));
    }
}
