/// Firewall rule construction from command-line flags.
use super::errors::CloudError;
use crate::api::FirewallRuleConfig;

/// The only direction the API currently accepts for new rules.
pub const INGRESS: &str = "ingress";

/// Raw flag values for `firewall rule create`.
#[derive(Debug, Clone, Default)]
pub struct RuleFlags {
    pub protocol: String,
    pub start_port: String,
    pub end_port: Option<String>,
    /// Comma-separated CIDR list.
    pub cidr: String,
    pub direction: String,
    pub label: Option<String>,
}

/// Validate the flags that do not depend on the API.
///
/// Runs before any request is sent so bad input fails fast.
///
/// # Errors
///
/// Returns `CloudError::InvalidFlag` for an empty or unsupported direction,
/// an empty start port, or an empty CIDR list.
pub fn validate(flags: &RuleFlags) -> Result<(), CloudError> {
    match flags.direction.as_str() {
        INGRESS => {}
        "" => {
            return Err(CloudError::InvalidFlag(
                "'--direction' flag can't be empty".to_owned(),
            ));
        }
        other => {
            return Err(CloudError::InvalidFlag(format!(
                "'--direction' flag only support '{INGRESS}' as of now, not '{other}'"
            )));
        }
    }

    if flags.start_port.trim().is_empty() {
        return Err(CloudError::InvalidFlag(
            "'--startport' flag can't be empty".to_owned(),
        ));
    }

    if split_cidr(&flags.cidr).is_empty() {
        return Err(CloudError::InvalidFlag(
            "'--cidr' flag needs at least one address range".to_owned(),
        ));
    }

    Ok(())
}

/// Build the create-rule request for `firewall_id`.
///
/// The end port defaults to the start port (a single-port rule).
///
/// # Errors
///
/// As [`validate`].
pub fn build_rule_config(
    firewall_id: &str,
    flags: &RuleFlags,
) -> Result<FirewallRuleConfig, CloudError> {
    validate(flags)?;

    let start_port = flags.start_port.trim().to_owned();
    let end_port = flags
        .end_port
        .as_deref()
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .map_or_else(|| start_port.clone(), str::to_owned);

    Ok(FirewallRuleConfig {
        firewall_id: firewall_id.to_owned(),
        protocol: flags.protocol.clone(),
        start_port,
        end_port,
        cidr: split_cidr(&flags.cidr),
        direction: flags.direction.clone(),
        label: flags.label.clone().unwrap_or_default(),
    })
}

fn split_cidr(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|c| !c.is_empty())
        .map(str::to_owned)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn flags() -> RuleFlags {
        RuleFlags {
            protocol: "TCP".to_owned(),
            start_port: "80".to_owned(),
            end_port: None,
            cidr: "0.0.0.0/0".to_owned(),
            direction: "ingress".to_owned(),
            label: None,
        }
    }

    #[test]
    fn test_empty_direction_rejected() {
        let f = RuleFlags {
            direction: String::new(),
            ..flags()
        };
        let err = build_rule_config("fw", &f).unwrap_err();
        assert_eq!(err.to_string(), "'--direction' flag can't be empty");
    }

    #[test]
    fn test_other_direction_rejected() {
        for direction in ["egress", "INGRESS", "inbound"] {
            let f = RuleFlags {
                direction: direction.to_owned(),
                ..flags()
            };
            let err = validate(&f).unwrap_err();
            assert_eq!(
                err.to_string(),
                format!("'--direction' flag only support 'ingress' as of now, not '{direction}'")
            );
        }
    }

    #[test]
    fn test_end_port_defaults_to_start() {
        let cfg = build_rule_config("fw-1", &flags()).unwrap();
        assert_eq!(cfg.start_port, "80");
        assert_eq!(cfg.end_port, "80");
        assert_eq!(cfg.firewall_id, "fw-1");
        assert!(cfg.label.is_empty());
    }

    #[test]
    fn test_port_range_and_cidr_list() {
        let f = RuleFlags {
            end_port: Some("8080".to_owned()),
            cidr: "10.0.0.0/8, 192.168.0.0/16,".to_owned(),
            label: Some("internal".to_owned()),
            ..flags()
        };
        let cfg = build_rule_config("fw-1", &f).unwrap();
        assert_eq!(cfg.end_port, "8080");
        assert_eq!(cfg.cidr, vec!["10.0.0.0/8", "192.168.0.0/16"]);
        assert_eq!(cfg.label, "internal");
    }

    #[test]
    fn test_empty_cidr_rejected() {
        let f = RuleFlags {
            cidr: " , ".to_owned(),
            ..flags()
        };
        assert!(matches!(validate(&f), Err(CloudError::InvalidFlag(_))));
    }
}
