use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;

use crate::config::Config;
use crate::constants;
use crate::error::{Error, Result};
use crate::planning_center::types::ListingItem;
use crate::types::ContentType;

/// Source of listing items for a collection endpoint.
///
/// The listing service only depends on this trait, so tests can swap in a
/// canned source.
#[async_trait]
pub trait ListingFetcher: Send + Sync {
    /// Fetch one page of at most `limit` items from `endpoint`.
    async fn fetch_listing(&self, endpoint: &str, limit: u32) -> Result<Vec<ListingItem>>;

    /// Collection URL for a content type.
    fn endpoint(&self, content_type: ContentType) -> String {
        content_type.endpoint(constants::api::DEFAULT_BASE_URL)
    }
}

/// Client for accessing Planning Center Online API
#[derive(Clone)]
pub struct PlanningCenterClient {
    app_id: String,
    secret: String,
    base_url: String,
    client: Client,
}

impl PlanningCenterClient {
    /// Create a new Planning Center client from config
    pub fn new(config: &Config) -> Self {
        Self {
            app_id: config.pco_app_id.clone(),
            secret: config.pco_secret.clone(),
            base_url: config.api_base_url.clone(),
            client: Client::builder()
                .timeout(config.http_timeout)
                .user_agent(config.user_agent())
                .build()
                .unwrap_or_default(),
        }
    }

    /// Check if credentials are configured
    fn is_configured(&self) -> bool {
        !self.app_id.is_empty() && !self.secret.is_empty()
    }

    /// API base URL endpoints are resolved against.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Make an authenticated GET request with query parameters
    async fn get_with_query(&self, url: &str, query: &[(&str, &str)]) -> Result<Value> {
        let resp = self.client
            .get(url)
            .basic_auth(&self.app_id, Some(&self.secret))
            .header("Accept", "application/json")
            .query(query)
            .send()
            .await
            .map_err(|e| Error::Network(format!("Request to {} failed: {}", url, e)))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(Error::pco_status(
                format!("Request to {} returned {}", url, status),
                status.as_u16(),
            ));
        }

        resp.json().await
            .map_err(|e| Error::pco(format!("Unexpected Planning Center response from {}: {}", url, e)))
    }
}

#[async_trait]
impl ListingFetcher for PlanningCenterClient {
    async fn fetch_listing(&self, endpoint: &str, limit: u32) -> Result<Vec<ListingItem>> {
        if !self.is_configured() {
            return Err(Error::config(
                "Missing Planning Center API credentials",
                "Set PCO_APP_ID and PCO_SECRET environment variables",
            ));
        }

        tracing::debug!("Fetching {} (per_page={})", endpoint, limit);

        let limit = limit.to_string();
        let json = self.get_with_query(endpoint, &[
            (constants::api::PAGE_SIZE_PARAM, limit.as_str()),
        ]).await?;

        let items = parse_listing(&json)?;
        tracing::debug!("Fetched {} items from {}", items.len(), endpoint);
        Ok(items)
    }

    fn endpoint(&self, content_type: ContentType) -> String {
        content_type.endpoint(&self.base_url)
    }
}

/// Extract the `data` array of a collection response
pub fn parse_listing(json: &Value) -> Result<Vec<ListingItem>> {
    let data = json.get("data")
        .and_then(Value::as_array)
        .ok_or_else(|| Error::pco("Unexpected Planning Center response: missing 'data' array"))?;

    Ok(data.iter().map(ListingItem::from_resource).collect())
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]

    use super::*;
    use serde_json::json;
    use wiremock::{
        matchers::{header, method, path, query_param},
        Mock, MockServer, ResponseTemplate,
    };

    fn client_for(server: &MockServer, app_id: &str, secret: &str) -> PlanningCenterClient {
        PlanningCenterClient::new(&Config::for_api(server.uri(), app_id, secret))
    }

    #[test]
    fn parse_listing_requires_data_array() {
        assert!(matches!(
            parse_listing(&json!({"data": null})),
            Err(Error::PlanningCenter { status: None, .. })
        ));
        assert!(parse_listing(&json!({"errors": []})).is_err());
        assert!(parse_listing(&json!({"data": {"id": "1"}})).is_err());
        assert!(parse_listing(&json!([1, 2])).is_err());
        assert!(parse_listing(&json!({"data": []})).unwrap().is_empty());
    }

    #[test]
    fn parse_listing_keeps_every_entry() {
        let items = parse_listing(&json!({
            "data": [
                {"attributes": {"name": "One"}},
                "garbage",
                {"attributes": {"name": "Three"}}
            ]
        }))
        .unwrap();

        assert_eq!(items.len(), 3);
        assert_eq!(items[1], ListingItem::default());
        assert_eq!(items[2].name.as_deref(), Some("Three"));
    }

    #[tokio::test]
    async fn fetch_sends_basic_auth_and_page_size() {
        let server = MockServer::start().await;
        // base64("app:secret")
        Mock::given(method("GET"))
            .and(path("/groups/v2/groups"))
            .and(query_param("per_page", "3"))
            .and(header("authorization", "Basic YXBwOnNlY3JldA=="))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "data": [{"attributes": {"name": "Young Adults"}}]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server, "app", "secret");
        let endpoint = client.endpoint(ContentType::Groups);
        let items = client.fetch_listing(&endpoint, 3).await.unwrap();

        assert_eq!(items, vec![ListingItem::named("Young Adults")]);
    }

    #[tokio::test]
    async fn missing_credentials_skip_the_request() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": []})))
            .expect(0)
            .mount(&server)
            .await;

        let client = client_for(&server, "app", "");
        let err = client
            .fetch_listing(&client.endpoint(ContentType::Events), 5)
            .await
            .unwrap_err();

        assert!(matches!(err, Error::Config { .. }));
    }

    #[tokio::test]
    async fn non_success_status_is_an_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/sermons/v2/series"))
            .respond_with(ResponseTemplate::new(401))
            .mount(&server)
            .await;

        let client = client_for(&server, "app", "wrong");
        let err = client
            .fetch_listing(&client.endpoint(ContentType::Sermons), 5)
            .await
            .unwrap_err();

        assert_eq!(err.status(), Some(401));
    }

    #[tokio::test]
    async fn non_json_body_is_an_unexpected_response() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>maintenance</html>"))
            .mount(&server)
            .await;

        let client = client_for(&server, "app", "secret");
        let err = client
            .fetch_listing(&client.endpoint(ContentType::Events), 5)
            .await
            .unwrap_err();

        match err {
            Error::PlanningCenter { message, status: None, .. } => {
                assert!(message.starts_with("Unexpected Planning Center response"));
            }
            other => panic!("Expected unexpected-response error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn unreachable_server_is_a_network_error() {
        let client = PlanningCenterClient::new(&Config::for_api("http://127.0.0.1:9", "app", "secret"));
        let err = client
            .fetch_listing(&client.endpoint(ContentType::Events), 5)
            .await
            .unwrap_err();

        assert!(matches!(err, Error::Network(_)));
    }
}
