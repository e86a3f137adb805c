/// Domain layer: resource lookup, firewall rule building, region selection.
pub mod errors;
pub mod region;
pub mod resolve;
pub mod rule;

pub use errors::CloudError;
pub use region::ensure_current_region;
pub use resolve::{find_firewall, find_load_balancer};
pub use rule::{RuleFlags, build_rule_config};
