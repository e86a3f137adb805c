/// `apikey` commands: manage the API keys stored in the config file.
use std::io::Write;
use std::path::Path;

use crate::cli::args::ApikeyCommand;
use crate::cli::output::yes_no;
use crate::cli::{OutputCtx, OutputFormat, OutputWriter};
use crate::cloud::CloudError;
use crate::config::Config;

/// Run a `civo apikey` subcommand. Never contacts the API.
///
/// # Errors
///
/// Returns `CloudError::Config` for an unknown key name or a config write failure.
pub fn run(
    command: &ApikeyCommand,
    config: &mut Config,
    config_path: &Path,
    ctx: &OutputCtx,
    out: &mut dyn Write,
) -> Result<(), CloudError> {
    let (name, message) = match command {
        ApikeyCommand::List => return list(config, ctx, out),
        ApikeyCommand::Save { name, key } => {
            if key.trim().is_empty() {
                return Err(CloudError::InvalidFlag("the API key can't be empty".to_owned()));
            }
            config.save_apikey(name, key.trim());
            (name, format!("Saved the API key {name} and made it current"))
        }
        ApikeyCommand::Use { name } => {
            config.use_apikey(name)?;
            (name, format!("The current API key is now {name}"))
        }
        ApikeyCommand::Remove { name } => {
            config.remove_apikey(name)?;
            (name, format!("Removed the API key {name}"))
        }
    };
    config.save(config_path)?;

    let mut ow = OutputWriter::new();
    ow.append_data_with_label("name", name.as_str(), "Name");

    match ctx.format {
        OutputFormat::Json => ow.write_single_object_json(out, ctx.pretty),
        OutputFormat::Custom => ow.write_custom_output(out, ctx.template()),
        OutputFormat::Human => {
            writeln!(out, "{message}")?;
            Ok(())
        }
    }
}

fn list(config: &Config, ctx: &OutputCtx, out: &mut dyn Write) -> Result<(), CloudError> {
    let mut ow = OutputWriter::new();
    for name in config.apikeys.keys() {
        ow.start_line();
        ow.append_data_with_label("name", name.as_str(), "Name");
        ow.append_data_with_label(
            "current",
            yes_no(*name == config.meta.current_apikey),
            "Current",
        );
    }
    ow.write(ctx, out)
}
