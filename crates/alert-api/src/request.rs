//! Request construction for the alert API endpoints.

use std::sync::Arc;

use alert_core::{ensure_not_blank, AlertError};
use reqwest::{Method, Request, Url};
use secrecy::SecretString;

use crate::config::ConfigurationProvider;

/// Builds requests for each alert API endpoint.
///
/// The base URL is read once at construction; endpoint paths and region ids
/// are resolved per request.
#[derive(Clone)]
pub struct ApiRequestProvider {
    config: Arc<dyn ConfigurationProvider>,
    base_url: String,
}

impl ApiRequestProvider {
    /// Create a request provider from a configuration source.
    pub fn new(config: Arc<dyn ConfigurationProvider>) -> Result<Self, AlertError> {
        let base_url = config.base_url()?;
        Ok(Self { config, base_url })
    }

    /// Get the authorization token from the configuration source.
    pub fn authorization_token(&self) -> Result<SecretString, AlertError> {
        self.config.authorization_token()
    }

    /// Get the configuration source.
    pub fn config(&self) -> &Arc<dyn ConfigurationProvider> {
        &self.config
    }

    /// Request for a single region's alerts, resolved from its configured name.
    pub fn region_alerts_request(&self, region_name: &str) -> Result<Request, AlertError> {
        ensure_not_blank("region_name", region_name)?;

        let endpoint = self.config.endpoints()?.regions_with_alerts;
        let region_id = self.config.region_id(region_name)?;
        let encoded = urlencoding::encode(&region_id);

        self.get(&format!("{}{}{}", self.base_url, endpoint, encoded))
    }

    /// Request for all regions (states envelope).
    pub fn regions_request(&self) -> Result<Request, AlertError> {
        let endpoint = self.config.endpoints()?.regions;
        self.get(&format!("{}{}", self.base_url, endpoint))
    }

    /// Request for the regions that currently have alerts.
    pub fn regions_with_alert_request(&self) -> Result<Request, AlertError> {
        let endpoint = self.config.endpoints()?.regions_with_alerts;
        self.get(&format!("{}{}", self.base_url, endpoint))
    }

    /// Request for the API-wide status (last action index).
    pub fn status_request(&self) -> Result<Request, AlertError> {
        let endpoint = self.config.endpoints()?.status;
        self.get(&format!("{}{}", self.base_url, endpoint))
    }

    fn get(&self, url: &str) -> Result<Request, AlertError> {
        let url = Url::parse(url)
            .map_err(|e| AlertError::invalid_argument("url", format!("{}: {}", url, e)))?;
        Ok(Request::new(Method::GET, url))
    }
}

impl std::fmt::Debug for ApiRequestProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiRequestProvider")
            .field("base_url", &self.base_url)
            .finish()
    }
}
