/// Blocking HTTP client for the provider API.
use std::time::Duration;

use reqwest::blocking::{Client, RequestBuilder};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::debug;

use super::errors::{self, ApiError};
use super::models::{
    Firewall, FirewallRule, FirewallRuleConfig, InstanceSize, LoadBalancer, Region,
};

/// Base URL used when the config file does not name one.
pub const DEFAULT_API_URL: &str = "https://api.civo.com";

/// Per-request timeout.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// The API operations the commands depend on.
///
/// [`ApiClient`] talks HTTP; tests substitute an in-memory implementation.
pub trait CloudApi {
    /// Region code requests are scoped to (may be empty before region resolution).
    fn region(&self) -> &str;

    /// List every region available to the account.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` on transport failure or a non-success response.
    fn list_regions(&self) -> Result<Vec<Region>, ApiError>;

    /// List firewalls in the current region.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` on transport failure or a non-success response.
    fn list_firewalls(&self) -> Result<Vec<Firewall>, ApiError>;

    /// List the rules of one firewall.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` on transport failure or a non-success response.
    fn list_firewall_rules(&self, firewall_id: &str) -> Result<Vec<FirewallRule>, ApiError>;

    /// Create a rule in the firewall named by `config.firewall_id`.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` on transport failure or a non-success response.
    fn new_firewall_rule(&self, config: &FirewallRuleConfig) -> Result<FirewallRule, ApiError>;

    /// List instance sizes, including Kubernetes node sizes.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` on transport failure or a non-success response.
    fn list_instance_sizes(&self) -> Result<Vec<InstanceSize>, ApiError>;

    /// List load balancers in the current region.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` on transport failure or a non-success response.
    fn list_load_balancers(&self) -> Result<Vec<LoadBalancer>, ApiError>;
}

/// HTTP implementation of [`CloudApi`].
pub struct ApiClient {
    http: Client,
    base_url: String,
    api_key: String,
    region: String,
}

/// A POST body with the region attached alongside the payload's own fields.
#[derive(Serialize)]
struct RegionScoped<'a, T: Serialize> {
    #[serde(flatten)]
    body: &'a T,
    region: &'a str,
}

impl ApiClient {
    /// Build a client for `base_url` authenticating with `api_key`.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Transport` if the TLS backend cannot be initialised.
    pub fn new(base_url: &str, api_key: &str, region: &str) -> Result<Self, ApiError> {
        let http = Client::builder()
            .user_agent(concat!("civo-cli/", env!("CARGO_PKG_VERSION")))
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_owned(),
            api_key: api_key.to_owned(),
            region: region.to_owned(),
        })
    }

    /// Scope subsequent requests to `region`.
    pub fn set_region(&mut self, region: &str) {
        region.clone_into(&mut self.region);
    }

    /// Absolute URL for an API path such as `/v2/sizes`.
    #[must_use]
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let url = self.endpoint(path);
        debug!(method = "GET", %url, region = %self.region, "api request");
        let mut request = self.http.get(&url);
        if !self.region.is_empty() {
            request = request.query(&[("region", self.region.as_str())]);
        }
        self.send(request, &url)
    }

    fn post<B: Serialize, T: DeserializeOwned>(&self, path: &str, body: &B) -> Result<T, ApiError> {
        let url = self.endpoint(path);
        debug!(method = "POST", %url, region = %self.region, "api request");
        let request = self.http.post(&url).json(&RegionScoped {
            body,
            region: &self.region,
        });
        self.send(request, &url)
    }

    fn send<T: DeserializeOwned>(&self, request: RequestBuilder, url: &str) -> Result<T, ApiError> {
        let response = request.bearer_auth(&self.api_key).send()?;
        let status = response.status();
        let body = response.text()?;
        debug!(status = status.as_u16(), bytes = body.len(), "api response");

        if !status.is_success() {
            return Err(errors::from_status(status.as_u16(), &body));
        }

        serde_json::from_str(&body).map_err(|source| ApiError::Decode {
            context: url.to_owned(),
            source,
        })
    }
}

impl CloudApi for ApiClient {
    fn region(&self) -> &str {
        &self.region
    }

    fn list_regions(&self) -> Result<Vec<Region>, ApiError> {
        self.get("/v2/regions")
    }

    fn list_firewalls(&self) -> Result<Vec<Firewall>, ApiError> {
        self.get("/v2/firewalls")
    }

    fn list_firewall_rules(&self, firewall_id: &str) -> Result<Vec<FirewallRule>, ApiError> {
        self.get(&format!("/v2/firewalls/{firewall_id}/rules"))
    }

    fn new_firewall_rule(&self, config: &FirewallRuleConfig) -> Result<FirewallRule, ApiError> {
        self.post(&format!("/v2/firewalls/{}/rules", config.firewall_id), config)
    }

    fn list_instance_sizes(&self) -> Result<Vec<InstanceSize>, ApiError> {
        self.get("/v2/sizes")
    }

    fn list_load_balancers(&self) -> Result<Vec<LoadBalancer>, ApiError> {
        self.get("/v2/loadbalancers")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_joins_slashes() {
        let client = ApiClient::new("https://api.example.com/", "key", "LON1").unwrap();
        assert_eq!(
            client.endpoint("/v2/sizes"),
            "https://api.example.com/v2/sizes"
        );
        assert_eq!(
            client.endpoint("v2/regions"),
            "https://api.example.com/v2/regions"
        );
    }

    #[test]
    fn test_set_region() {
        let mut client = ApiClient::new(DEFAULT_API_URL, "key", "").unwrap();
        assert_eq!(client.region(), "");
        client.set_region("NYC1");
        assert_eq!(client.region(), "NYC1");
    }

    #[test]
    fn test_post_body_carries_region() {
        let config = FirewallRuleConfig {
            firewall_id: "fw-1".to_owned(),
            protocol: "TCP".to_owned(),
            start_port: "443".to_owned(),
            end_port: "443".to_owned(),
            cidr: vec!["10.0.0.0/8".to_owned()],
            direction: "ingress".to_owned(),
            label: "https".to_owned(),
        };
        let body = serde_json::to_value(RegionScoped {
            body: &config,
            region: "FRA1",
        })
        .unwrap();
        assert_eq!(body["region"], "FRA1");
        assert_eq!(body["firewall_id"], "fw-1");
        assert_eq!(body["label"], "https");
    }
}
