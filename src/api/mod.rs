/// Public API for the provider's HTTP layer.
pub mod client;
pub mod errors;
#[cfg(test)]
pub mod fake;
pub mod models;

pub use client::{ApiClient, CloudApi, DEFAULT_API_URL};
pub use errors::ApiError;
pub use models::{Firewall, FirewallRuleConfig, InstanceSize, LoadBalancer, Region};
