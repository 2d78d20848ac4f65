//! Configuration types for the alert API.

use std::env;
use std::fs;
use std::path::Path;

use alert_core::AlertError;
use indexmap::IndexMap;
use secrecy::SecretString;
use tracing::debug;

/// Default API base URL.
pub const DEFAULT_BASE_URL: &str = "https://api.ukrainealarm.com";

/// Default location of the region name → id mapping.
pub const DEFAULT_REGION_IDS_FILE: &str = "./region_ids.json";

const TOKEN_KEY: &str = "ALERT_API_TOKEN";
const REGION_IDS_KEY: &str = "regionIds";
const REGION_IDS_FILE_KEY: &str = "ALERT_REGION_IDS_FILE";

/// Relative endpoint paths, appended to the base URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    /// Regions with alerts; also the prefix for single-region queries.
    pub regions_with_alerts: String,
    pub region_history: String,
    pub status: String,
    /// All regions (states envelope).
    pub regions: String,
    pub webhook: String,
}

impl Endpoints {
    /// Create endpoint paths. Every path must be non-blank.
    pub fn new(
        regions_with_alerts: impl Into<String>,
        region_history: impl Into<String>,
        status: impl Into<String>,
        regions: impl Into<String>,
        webhook: impl Into<String>,
    ) -> Result<Self, AlertError> {
        let endpoints = Self {
            regions_with_alerts: regions_with_alerts.into(),
            region_history: region_history.into(),
            status: status.into(),
            regions: regions.into(),
            webhook: webhook.into(),
        };

        endpoints.validate()?;
        Ok(endpoints)
    }

    /// Fail with [`AlertError::MissingConfiguration`] naming the variable of
    /// the first blank path.
    pub fn validate(&self) -> Result<(), AlertError> {
        let paths = [
            ("ALERT_API_ENDPOINT_ALERTS", &self.regions_with_alerts),
            ("ALERT_API_ENDPOINT_REGION_HISTORY", &self.region_history),
            ("ALERT_API_ENDPOINT_STATUS", &self.status),
            ("ALERT_API_ENDPOINT_REGIONS", &self.regions),
            ("ALERT_API_ENDPOINT_WEBHOOK", &self.webhook),
        ];

        match paths.iter().find(|(_, path)| path.trim().is_empty()) {
            Some((key, _)) => Err(AlertError::MissingConfiguration(key.to_string())),
            None => Ok(()),
        }
    }
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            regions_with_alerts: "/api/v3/alerts/".to_string(),
            region_history: "/api/v3/alerts/regionHistory".to_string(),
            status: "/api/v3/alerts/status".to_string(),
            regions: "/api/v3/regions".to_string(),
            webhook: "/api/v3/webhook".to_string(),
        }
    }
}

/// Source of API settings and secrets.
///
/// Every accessor fails with [`AlertError::MissingConfiguration`] naming the
/// missing key when the value is absent or empty.
pub trait ConfigurationProvider: Send + Sync {
    fn authorization_token(&self) -> Result<SecretString, AlertError>;

    fn base_url(&self) -> Result<String, AlertError>;

    fn endpoints(&self) -> Result<Endpoints, AlertError>;

    /// Resolve a configured region name to its API identifier.
    fn region_id(&self, region_name: &str) -> Result<String, AlertError>;

    /// Names of all configured regions, in configuration order.
    fn region_names(&self) -> Result<Vec<String>, AlertError> {
        Ok(self.region_name_id_pairs()?.into_keys().collect())
    }

    fn region_name_id_pairs(&self) -> Result<IndexMap<String, String>, AlertError>;
}

/// Configuration for connecting to the alert API.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Base URL of the API (e.g., "https://api.ukrainealarm.com").
    pub base_url: String,
    /// Relative endpoint paths.
    pub endpoints: Endpoints,
    token: Option<SecretString>,
    region_ids: IndexMap<String, String>,
}

impl ApiConfig {
    /// Create a new configuration with the given base URL and token.
    pub fn new(base_url: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            endpoints: Endpoints::default(),
            token: Some(SecretString::from(token.into())),
            region_ids: IndexMap::new(),
        }
    }

    /// Load configuration from environment variables.
    ///
    /// Required (checked when first used):
    /// - `ALERT_API_TOKEN` - Authorization token
    ///
    /// Optional (with defaults):
    /// - `ALERT_API_URL` - Default: https://api.ukrainealarm.com
    /// - `ALERT_API_ENDPOINT_ALERTS` - Default: /api/v3/alerts/
    /// - `ALERT_API_ENDPOINT_REGION_HISTORY` - Default: /api/v3/alerts/regionHistory
    /// - `ALERT_API_ENDPOINT_STATUS` - Default: /api/v3/alerts/status
    /// - `ALERT_API_ENDPOINT_REGIONS` - Default: /api/v3/regions
    /// - `ALERT_API_ENDPOINT_WEBHOOK` - Default: /api/v3/webhook
    /// - `ALERT_REGION_IDS_FILE` - JSON object of region name → id. Default: ./region_ids.json
    pub fn from_env() -> Result<Self, AlertError> {
        let defaults = Endpoints::default();
        let endpoints = Endpoints::new(
            env_or("ALERT_API_ENDPOINT_ALERTS", &defaults.regions_with_alerts),
            env_or("ALERT_API_ENDPOINT_REGION_HISTORY", &defaults.region_history),
            env_or("ALERT_API_ENDPOINT_STATUS", &defaults.status),
            env_or("ALERT_API_ENDPOINT_REGIONS", &defaults.regions),
            env_or("ALERT_API_ENDPOINT_WEBHOOK", &defaults.webhook),
        )?;

        let base_url = env_or("ALERT_API_URL", DEFAULT_BASE_URL);
        let token = non_empty_env(TOKEN_KEY).map(SecretString::from);

        let region_ids_file = env_or(REGION_IDS_FILE_KEY, DEFAULT_REGION_IDS_FILE);
        let region_ids = if Path::new(&region_ids_file).exists() {
            load_region_ids(&region_ids_file)?
        } else {
            debug!(path = %region_ids_file, "Region id file not found");
            IndexMap::new()
        };

        debug!(
            base_url = %base_url,
            regions = region_ids.len(),
            "Loaded alert API configuration"
        );

        Ok(Self {
            base_url,
            endpoints,
            token,
            region_ids,
        })
    }

    /// Builder method to set the endpoint paths.
    pub fn with_endpoints(mut self, endpoints: Endpoints) -> Self {
        self.endpoints = endpoints;
        self
    }

    /// Builder method to add a region name → id pair.
    pub fn with_region_id(mut self, name: impl Into<String>, id: impl Into<String>) -> Self {
        self.region_ids.insert(name.into(), id.into());
        self
    }

    /// Builder method to replace all region name → id pairs.
    pub fn with_region_ids(mut self, region_ids: IndexMap<String, String>) -> Self {
        self.region_ids = region_ids;
        self
    }

    /// Builder method to drop the authorization token.
    pub fn without_token(mut self) -> Self {
        self.token = None;
        self
    }
}

impl ConfigurationProvider for ApiConfig {
    fn authorization_token(&self) -> Result<SecretString, AlertError> {
        self.token
            .clone()
            .ok_or_else(|| AlertError::MissingConfiguration(TOKEN_KEY.to_string()))
    }

    fn base_url(&self) -> Result<String, AlertError> {
        if self.base_url.trim().is_empty() {
            return Err(AlertError::MissingConfiguration("ALERT_API_URL".to_string()));
        }
        Ok(self.base_url.clone())
    }

    fn endpoints(&self) -> Result<Endpoints, AlertError> {
        self.endpoints.validate()?;
        Ok(self.endpoints.clone())
    }

    fn region_id(&self, region_name: &str) -> Result<String, AlertError> {
        self.region_ids
            .get(region_name)
            .filter(|id| !id.trim().is_empty())
            .cloned()
            .ok_or_else(|| {
                AlertError::MissingConfiguration(format!("{}:{}", REGION_IDS_KEY, region_name))
            })
    }

    fn region_name_id_pairs(&self) -> Result<IndexMap<String, String>, AlertError> {
        if self.region_ids.is_empty() {
            return Err(AlertError::MissingConfiguration(REGION_IDS_KEY.to_string()));
        }

        if let Some((name, _)) = self.region_ids.iter().find(|(_, id)| id.trim().is_empty()) {
            return Err(AlertError::MissingConfiguration(format!(
                "{}:{}",
                REGION_IDS_KEY, name
            )));
        }

        Ok(self.region_ids.clone())
    }
}

fn non_empty_env(key: &str) -> Option<String> {
    env::var(key).ok().filter(|value| !value.trim().is_empty())
}

fn env_or(key: &str, default: &str) -> String {
    non_empty_env(key).unwrap_or_else(|| default.to_string())
}

fn load_region_ids(path: &str) -> Result<IndexMap<String, String>, AlertError> {
    let data = fs::read_to_string(path).map_err(|e| invalid_region_ids_file(path, e))?;
    serde_json::from_str(&data).map_err(|e| invalid_region_ids_file(path, e))
}

fn invalid_region_ids_file(path: &str, error: impl std::fmt::Display) -> AlertError {
    AlertError::InvalidConfiguration {
        key: REGION_IDS_FILE_KEY,
        reason: format!("{}: {}", path, error),
    }
}
