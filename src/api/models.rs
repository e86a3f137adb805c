/// Request and response bodies of the provider API.
///
/// Only the fields the CLI reads or prints are modelled. Response fields that
/// are missing or `null` decode to their zero value.
use serde::{Deserialize, Deserializer, Serialize};

/// Decode `null` as the type's default.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

/// A datacenter region, e.g. `LON1`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Region {
    #[serde(deserialize_with = "null_as_default")]
    pub code: String,
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub country: String,
    /// Whether the provider recommends this region for new accounts.
    #[serde(deserialize_with = "null_as_default")]
    pub default: bool,
}

/// A firewall, the container for firewall rules.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Firewall {
    #[serde(deserialize_with = "null_as_default")]
    pub id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub network_id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub rules_count: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub instance_count: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub cluster_count: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub loadbalancer_count: i64,
}

/// A single rule inside a firewall.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FirewallRule {
    #[serde(deserialize_with = "null_as_default")]
    pub id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub firewall_id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub protocol: String,
    #[serde(deserialize_with = "null_as_default")]
    pub start_port: String,
    #[serde(deserialize_with = "null_as_default")]
    pub end_port: String,
    #[serde(deserialize_with = "null_as_default")]
    pub cidr: Vec<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub direction: String,
    #[serde(deserialize_with = "null_as_default")]
    pub label: String,
}

/// Request body for creating a firewall rule.
///
/// The region is added by the client when the request is sent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FirewallRuleConfig {
    pub firewall_id: String,
    pub protocol: String,
    pub start_port: String,
    pub end_port: String,
    pub cidr: Vec<String>,
    pub direction: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub label: String,
}

/// An instance size (plan).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct InstanceSize {
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub nice_name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub description: String,
    #[serde(deserialize_with = "null_as_default")]
    pub cpu_cores: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub ram_mb: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub disk_gb: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub selectable: bool,
}

/// A load balancer backend target.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Backend {
    #[serde(deserialize_with = "null_as_default")]
    pub ip: String,
    #[serde(deserialize_with = "null_as_default")]
    pub protocol: String,
    #[serde(deserialize_with = "null_as_default")]
    pub source_port: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub target_port: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub health_check_port: i64,
}

/// A load balancer.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LoadBalancer {
    #[serde(deserialize_with = "null_as_default")]
    pub id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub algorithm: String,
    #[serde(deserialize_with = "null_as_default")]
    pub backends: Vec<Backend>,
    #[serde(deserialize_with = "null_as_default")]
    pub external_traffic_policy: String,
    #[serde(deserialize_with = "null_as_default")]
    pub session_affinity: String,
    /// Session affinity timeout in seconds.
    #[serde(deserialize_with = "null_as_default")]
    pub session_affinity_config_timeout: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub public_ip: String,
    #[serde(deserialize_with = "null_as_default")]
    pub private_ip: String,
    #[serde(deserialize_with = "null_as_default")]
    pub firewall_id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub cluster_id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub state: String,
    /// Fields the CLI does not model, kept so JSON output shows the whole object.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}
