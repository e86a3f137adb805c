/// Command dispatch: routes `Command` enum variants to their implementations.
pub mod apikey;
pub mod firewall;
pub mod firewall_rule;
pub mod instance;
pub mod loadbalancer;
pub mod region;

use std::io::{self, Write};
use std::path::Path;

use crate::api::ApiClient;
use crate::cli::OutputCtx;
use crate::cli::args::{Cli, Command, FirewallCommand};
use crate::cloud::{CloudError, ensure_current_region};
use crate::config::{self, Config, TOKEN_ENV};

/// Dispatch the parsed command line to its handler.
///
/// # Errors
///
/// Returns `CloudError` on any command failure.
pub fn dispatch(cli: &Cli, ctx: &OutputCtx) -> Result<(), CloudError> {
    let config_path = config::resolve_path(cli.config.as_deref())?;
    let mut config = Config::load(&config_path)?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    let region_flag = cli.region.as_deref();

    let result = match &cli.command {
        Command::Apikey(command) => apikey::run(command, &mut config, &config_path, ctx, &mut out),
        Command::Region(command) => {
            let api = connect(&mut config, &config_path, region_flag)?;
            region::run(command, &api, &mut config, &config_path, ctx, &mut out)
        }
        Command::Firewall(FirewallCommand::List) => {
            let api = connect(&mut config, &config_path, region_flag)?;
            firewall::list(&api, ctx, &mut out)
        }
        Command::Firewall(FirewallCommand::Rule(command)) => {
            let api = connect(&mut config, &config_path, region_flag)?;
            firewall_rule::run(command, &api, ctx, &mut out)
        }
        Command::Instance(command) => {
            let api = connect(&mut config, &config_path, region_flag)?;
            instance::run(command, &api, ctx, &mut out)
        }
        Command::Loadbalancer(command) => {
            let api = connect(&mut config, &config_path, region_flag)?;
            loadbalancer::run(command, &api, ctx, &mut out)
        }
    };
    result?;

    out.flush()?;
    Ok(())
}

/// Resolve credentials and region, and build the API client.
fn connect(
    config: &mut Config,
    config_path: &Path,
    region_flag: Option<&str>,
) -> Result<ApiClient, CloudError> {
    let api_key = config.api_key(std::env::var(TOKEN_ENV).ok())?;
    let mut client = ApiClient::new(config.api_url(), &api_key, "")?;
    let region = ensure_current_region(&client, config, config_path, region_flag)?;
    client.set_region(&region);
    Ok(client)
}
