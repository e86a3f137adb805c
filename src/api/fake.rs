/// In-memory `CloudApi` used by unit tests.
use std::cell::RefCell;

use super::client::CloudApi;
use super::errors::ApiError;
use super::models::{
    Firewall, FirewallRule, FirewallRuleConfig, InstanceSize, LoadBalancer, Region,
};

#[derive(Default)]
pub struct FakeApi {
    pub region: String,
    pub regions: Vec<Region>,
    pub firewalls: Vec<Firewall>,
    pub rules: Vec<FirewallRule>,
    pub sizes: Vec<InstanceSize>,
    pub load_balancers: Vec<LoadBalancer>,
    /// Rule configs received by `new_firewall_rule`, in call order.
    pub created: RefCell<Vec<FirewallRuleConfig>>,
    /// When set, every call fails with this status.
    pub fail_status: Option<u16>,
}

impl FakeApi {
    fn check(&self) -> Result<(), ApiError> {
        match self.fail_status {
            Some(status) => Err(super::errors::from_status(
                status,
                r#"{"code":"fake_failure","reason":"fake failure"}"#,
            )),
            None => Ok(()),
        }
    }
}

impl CloudApi for FakeApi {
    fn region(&self) -> &str {
        &self.region
    }

    fn list_regions(&self) -> Result<Vec<Region>, ApiError> {
        self.check()?;
        Ok(self.regions.clone())
    }

    fn list_firewalls(&self) -> Result<Vec<Firewall>, ApiError> {
        self.check()?;
        Ok(self.firewalls.clone())
    }

    fn list_firewall_rules(&self, firewall_id: &str) -> Result<Vec<FirewallRule>, ApiError> {
        self.check()?;
        Ok(self
            .rules
            .iter()
            .filter(|r| r.firewall_id == firewall_id)
            .cloned()
            .collect())
    }

    fn new_firewall_rule(&self, config: &FirewallRuleConfig) -> Result<FirewallRule, ApiError> {
        self.check()?;
        self.created.borrow_mut().push(config.clone());
        Ok(FirewallRule {
            id: "rule-1".to_owned(),
            firewall_id: config.firewall_id.clone(),
            protocol: config.protocol.clone(),
            start_port: config.start_port.clone(),
            end_port: config.end_port.clone(),
            cidr: config.cidr.clone(),
            direction: config.direction.clone(),
            label: config.label.clone(),
        })
    }

    fn list_instance_sizes(&self) -> Result<Vec<InstanceSize>, ApiError> {
        self.check()?;
        Ok(self.sizes.clone())
    }

    fn list_load_balancers(&self) -> Result<Vec<LoadBalancer>, ApiError> {
        self.check()?;
        Ok(self.load_balancers.clone())
    }
}

pub fn firewall(id: &str, name: &str) -> Firewall {
    Firewall {
        id: id.to_owned(),
        name: name.to_owned(),
        ..Firewall::default()
    }
}

pub fn region(code: &str, default: bool) -> Region {
    Region {
        code: code.to_owned(),
        name: format!("{code} region"),
        country: "GB".to_owned(),
        default,
    }
}
