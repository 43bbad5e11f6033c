//! Supabase REST API client for state reconciliation.

use crate::error::{SyncError, SyncResult};
use crate::reconciler::{ConfirmedEventRow, NotificationReadRow, RemoteStateQuery};
use serde::de::DeserializeOwned;
use tracing::{debug, error};

/// Supabase REST API client serving the reconciler's two read queries.
#[derive(Clone)]
pub struct RemoteClient {
    http_client: reqwest::Client,
    api_url: String,
    anon_key: String,
    access_token: Option<String>,
}

impl RemoteClient {
    /// Create a new Supabase client.
    ///
    /// # Arguments
    /// * `api_url` - The Supabase project API URL (e.g., `https://xyz.supabase.co`)
    /// * `anon_key` - The Supabase anonymous API key
    pub fn new(api_url: impl Into<String>, anon_key: impl Into<String>) -> Self {
        Self {
            http_client: reqwest::Client::new(),
            api_url: api_url.into(),
            anon_key: anon_key.into(),
            access_token: None,
        }
    }

    /// Create a client from the application configuration, validating the
    /// endpoint URL up front.
    pub fn from_config(config: &client_config_and_utils::Config) -> SyncResult<Self> {
        let url = config
            .supabase_url()
            .map_err(|e| SyncError::Config(e.to_string()))?;
        Ok(Self::new(
            url.as_str().trim_end_matches('/'),
            config.supabase_publishable_key.clone(),
        ))
    }

    /// Set or clear the user's access token.
    ///
    /// Until a token is set, requests authenticate with the anonymous key
    /// only. The token is an opaque string; refreshing it is the caller's
    /// concern.
    pub fn set_access_token(&mut self, token: Option<String>) {
        self.access_token = token;
    }

    /// Build the REST API URL for a table.
    fn rest_url(&self, table: &str) -> String {
        format!("{}/rest/v1/{}", self.api_url, table)
    }

    /// The bearer credential for the Authorization header.
    fn bearer(&self) -> &str {
        self.access_token.as_deref().unwrap_or(&self.anon_key)
    }

    /// Perform a GET returning JSON rows.
    async fn fetch_rows<T: DeserializeOwned>(&self, url: &str) -> SyncResult<Vec<T>> {
        debug!(url, "Fetching rows from Supabase");

        let response = self
            .http_client
            .get(url)
            .header("apikey", &self.anon_key)
            .header("Authorization", format!("Bearer {}", self.bearer()))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            if is_missing_resource(status.as_u16(), &body) {
                return Err(SyncError::ResourceMissing(body));
            }
            error!("Supabase request failed: {} - {}", status, body);
            return Err(SyncError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        Ok(response.json().await?)
    }
}

/// Whether a failed response means the backing table is absent rather
/// than the request having transiently failed.
///
/// PostgREST reports a missing relation as Postgres error 42P01 or, when
/// the table is outside the exposed schema, as PGRST205 with HTTP 404.
fn is_missing_resource(status: u16, body: &str) -> bool {
    status == 404 || body.contains("42P01") || body.contains("PGRST205")
}

impl RemoteStateQuery for RemoteClient {
    async fn list_confirmed_events(&self) -> SyncResult<Vec<ConfirmedEventRow>> {
        let url = format!(
            "{}?select=id,status,updated_at&status=eq.confirmed",
            self.rest_url("calendar_events")
        );
        self.fetch_rows(&url).await
    }

    async fn list_read_notifications(&self, actor_id: &str) -> SyncResult<Vec<NotificationReadRow>> {
        let url = format!(
            "{}?select=notification_id&user_id=eq.{}&read=is.true",
            self.rest_url("notification_reads"),
            actor_id
        );
        self.fetch_rows(&url).await
    }
}

impl std::fmt::Debug for RemoteClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RemoteClient")
            .field("api_url", &self.api_url)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_creation() {
        let client = RemoteClient::new("https://test.supabase.co", "test-key");
        assert_eq!(client.api_url, "https://test.supabase.co");
        assert_eq!(client.anon_key, "test-key");
        assert!(client.access_token.is_none());
    }

    #[test]
    fn test_from_config() {
        let config = client_config_and_utils::Config::default();
        let client = RemoteClient::from_config(&config).unwrap();
        assert_eq!(client.anon_key, config.supabase_publishable_key);
        assert!(client.api_url.starts_with("https://"));
        assert!(!client.api_url.ends_with('/'));
    }

    #[test]
    fn test_from_config_rejects_invalid_url() {
        let mut config = client_config_and_utils::Config::default();
        config.supabase_url = "not a url".to_string();
        assert!(RemoteClient::from_config(&config).is_err());
    }

    #[test]
    fn test_rest_url() {
        let client = RemoteClient::new("https://test.supabase.co", "test-key");
        assert_eq!(
            client.rest_url("calendar_events"),
            "https://test.supabase.co/rest/v1/calendar_events"
        );
    }

    #[test]
    fn test_bearer_prefers_access_token() {
        let mut client = RemoteClient::new("https://test.supabase.co", "anon");
        assert_eq!(client.bearer(), "anon");

        client.set_access_token(Some("user-jwt".to_string()));
        assert_eq!(client.bearer(), "user-jwt");

        client.set_access_token(None);
        assert_eq!(client.bearer(), "anon");
    }

    #[test]
    fn test_missing_resource_classification() {
        assert!(is_missing_resource(404, ""));
        assert!(is_missing_resource(400, r#"{"code":"42P01","message":"relation does not exist"}"#));
        assert!(is_missing_resource(
            406,
            r#"{"code":"PGRST205","message":"Could not find the table"}"#
        ));

        assert!(!is_missing_resource(500, "internal error"));
        assert!(!is_missing_resource(401, r#"{"message":"JWT expired"}"#));
    }
}
