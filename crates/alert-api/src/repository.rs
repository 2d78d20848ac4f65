//! HTTP-backed alert repository.

use std::sync::Arc;

use alert_core::{async_trait, AlertError, AlertRepository, Region};
use reqwest::Request;
use secrecy::{ExposeSecret, SecretString};
use tracing::debug;

use crate::config::{ApiConfig, ConfigurationProvider};
use crate::deserializer;
use crate::request::ApiRequestProvider;
use crate::sender::{ApiResponse, HttpSender, ReqwestSender};

/// Repository for the public alert API.
///
/// Each query builds a request, sends it with the cached authorization token
/// and decodes the response. The token is read once at construction.
#[derive(Clone)]
pub struct AlertApiRepository {
    requests: ApiRequestProvider,
    sender: Arc<dyn HttpSender>,
    token: SecretString,
}

impl AlertApiRepository {
    /// Create a repository from a request provider and sender.
    pub fn new(
        requests: ApiRequestProvider,
        sender: Arc<dyn HttpSender>,
    ) -> Result<Self, AlertError> {
        let token = requests.authorization_token()?;
        Ok(Self {
            requests,
            sender,
            token,
        })
    }

    /// Create a repository using a `reqwest` sender with default settings.
    pub fn connect(config: ApiConfig) -> Result<Self, AlertError> {
        let config: Arc<dyn ConfigurationProvider> = Arc::new(config);
        let requests = ApiRequestProvider::new(config)?;
        Self::new(requests, Arc::new(ReqwestSender::new()?))
    }

    /// Get the request provider.
    pub fn requests(&self) -> &ApiRequestProvider {
        &self.requests
    }

    async fn send(&self, request: Request) -> Result<ApiResponse, AlertError> {
        debug!(url = %request.url(), "Alert API request");
        self.sender
            .send(request, Some(self.token.expose_secret()))
            .await
    }
}

#[async_trait]
impl AlertRepository for AlertApiRepository {
    async fn get_region(&self, name: &str) -> Result<Region, AlertError> {
        let request = self.requests.region_alerts_request(name)?;
        let response = self.send(request).await?;
        deserializer::region_from_response(&response)
    }

    async fn get_all_regions(&self) -> Result<Vec<Region>, AlertError> {
        let request = self.requests.regions_request()?;
        let response = self.send(request).await?;
        deserializer::regions_from_states_response(&response)
    }

    async fn get_regions_with_alert(&self) -> Result<Vec<Region>, AlertError> {
        let request = self.requests.regions_with_alert_request()?;
        let response = self.send(request).await?;
        deserializer::regions_from_response(&response)
    }

    async fn get_last_action_index(&self) -> Result<i64, AlertError> {
        let request = self.requests.status_request()?;
        let response = self.send(request).await?;
        deserializer::last_action_index_from_response(&response)
    }
}

impl std::fmt::Debug for AlertApiRepository {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AlertApiRepository")
            .field("requests", &self.requests)
            .finish()
    }
}
