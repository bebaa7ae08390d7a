//! `POST /token` and `GET /users/me`.

use async_trait::async_trait;
use reqwest::Method;
use reqwest::multipart::Form;
use submanager_application::gateway::{ApiError, UnauthorizedPolicy};
use submanager_application::ports::AuthApi;
use submanager_domain::{Credential, Identity, TokenGrant};

use crate::adapters::BackendClient;

#[async_trait]
impl AuthApi for BackendClient {
    async fn authenticate(&self, email: &str, password: &str) -> Result<Credential, ApiError> {
        let form = Form::new()
            .text("username", email.to_string())
            .text("password", password.to_string());
        let request = self
            .request(Method::POST, self.endpoint("/token")?)
            .multipart(form);

        // A 401 here is a wrong password, not an expired session.
        let grant: TokenGrant = self.fetch(request, UnauthorizedPolicy::PassThrough).await?;
        Ok(grant.into_credential())
    }

    async fn fetch_current_identity(&self) -> Result<Identity, ApiError> {
        self.get_json(self.endpoint("/users/me")?).await
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;

    use super::*;
    use submanager_application::{InvalidationSignal, MemoryTokenStore, TokenStore};
    use wiremock::matchers::{body_string_contains, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    async fn setup(store: &MemoryTokenStore) -> (MockServer, BackendClient) {
        let server = MockServer::start().await;
        let client = BackendClient::new(
            &server.uri(),
            Duration::from_secs(5),
            Arc::new(store.clone()),
            InvalidationSignal::new(),
        )
        .unwrap();
        (server, client)
    }

    #[tokio::test]
    async fn test_authenticate_posts_multipart_form() {
        let store = MemoryTokenStore::new();
        let (server, client) = setup(&store).await;
        Mock::given(method("POST"))
            .and(path("/token"))
            .and(body_string_contains("name=\"username\""))
            .and(body_string_contains("a@b.com"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "access_token": "fresh-token",
                "token_type": "bearer"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let credential = client.authenticate("a@b.com", "secret").await.unwrap();

        assert_eq!(credential.expose(), "fresh-token");
        // Saving is the session manager's job.
        assert!(store.read().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_identity_lookup() {
        let store = MemoryTokenStore::with_credential(Credential::new("tok"));
        let (server, client) = setup(&store).await;
        Mock::given(method("GET"))
            .and(path("/users/me"))
            .and(header("Authorization", "Bearer tok"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "_id": "64f0",
                "email": "root@example.com",
                "is_admin": true
            })))
            .mount(&server)
            .await;

        let identity = client.fetch_current_identity().await.unwrap();

        assert_eq!(identity.email, "root@example.com");
        assert!(identity.is_admin);
        assert_eq!(identity.id.as_deref(), Some("64f0"));
    }
}
