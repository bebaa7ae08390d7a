//! `/notifications` endpoints.

use async_trait::async_trait;
use reqwest::Method;
use submanager_application::gateway::{ApiError, UnauthorizedPolicy};
use submanager_application::ports::NotificationApi;
use submanager_domain::{Notification, RenewalCheck, UnreadCount};

use crate::adapters::BackendClient;

#[async_trait]
impl NotificationApi for BackendClient {
    async fn list_notifications(&self, limit: u32) -> Result<Vec<Notification>, ApiError> {
        let url = self.endpoint_with_query("/notifications/", &[("limit", limit.to_string())])?;
        self.get_json(url).await
    }

    async fn unread_count(&self) -> Result<u64, ApiError> {
        let unread: UnreadCount = self
            .get_json(self.endpoint("/notifications/unread-count")?)
            .await?;
        Ok(unread.count)
    }

    async fn mark_read(&self, id: &str) -> Result<(), ApiError> {
        let url = self.resource("/notifications", id, &["read"])?;
        self.send_discarding(self.request(Method::PUT, url)).await
    }

    async fn check_renewals(&self) -> Result<RenewalCheck, ApiError> {
        let url = self.endpoint("/notifications/check-renewals")?;
        self.fetch(self.request(Method::POST, url), UnauthorizedPolicy::Invalidate)
            .await
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;

    use super::*;
    use submanager_application::{InvalidationSignal, MemoryTokenStore};
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    async fn setup() -> (MockServer, BackendClient) {
        let server = MockServer::start().await;
        let client = BackendClient::new(
            &server.uri(),
            Duration::from_secs(5),
            Arc::new(MemoryTokenStore::new()),
            InvalidationSignal::new(),
        )
        .unwrap();
        (server, client)
    }

    #[tokio::test]
    async fn test_list_uses_limit() {
        let (server, client) = setup().await;
        Mock::given(method("GET"))
            .and(path("/notifications/"))
            .and(query_param("limit", "50"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([{
                "_id": "n1",
                "message": "Netflix renews in 3 days",
                "type": "renewal_reminder",
                "is_read": false
            }])))
            .mount(&server)
            .await;

        let notifications = client.list_notifications(50).await.unwrap();

        assert_eq!(notifications.len(), 1);
        assert_eq!(notifications[0].id, "n1");
        assert!(!notifications[0].is_read);
    }

    #[tokio::test]
    async fn test_unread_count_and_mark_read() {
        let (server, client) = setup().await;
        Mock::given(method("GET"))
            .and(path("/notifications/unread-count"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!({"unread_count": 4})),
            )
            .mount(&server)
            .await;
        Mock::given(method("PUT"))
            .and(path("/notifications/n1/read"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({})))
            .expect(1)
            .mount(&server)
            .await;

        assert_eq!(client.unread_count().await.unwrap(), 4);
        client.mark_read("n1").await.unwrap();
    }
}
