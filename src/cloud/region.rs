/// Region selection for API requests.
use std::path::Path;

use tracing::{debug, info};

use super::errors::CloudError;
use crate::api::{CloudApi, Region};
use crate::config::Config;

/// The region requests should be scoped to.
///
/// Uses `--region`, then the config's default region. When neither is set,
/// asks the API for its regions, picks the recommended one, and stores it in
/// the config at `config_path` so later invocations skip the lookup.
///
/// # Errors
///
/// Returns `CloudError::Api` if the region list cannot be fetched,
/// `CloudError::NoRegions` if the account has no regions at all, and
/// `CloudError::Config` if the choice cannot be saved.
pub fn ensure_current_region(
    api: &dyn CloudApi,
    config: &mut Config,
    config_path: &Path,
    flag: Option<&str>,
) -> Result<String, CloudError> {
    if let Some(region) = config.region(flag) {
        debug!(%region, "using configured region");
        return Ok(region);
    }

    let regions = api.list_regions()?;
    let chosen = pick_default(&regions)
        .ok_or(CloudError::NoRegions)?
        .code
        .clone();

    info!(region = %chosen, "no default region configured, saving the API default");
    config.meta.default_region.clone_from(&chosen);
    config.save(config_path)?;
    Ok(chosen)
}

/// The region flagged as default, or the first one listed.
#[must_use]
pub fn pick_default(regions: &[Region]) -> Option<&Region> {
    regions.iter().find(|r| r.default).or_else(|| regions.first())
}
