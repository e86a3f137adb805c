/// `region` commands: list regions, set the default region.
use std::io::Write;
use std::path::Path;

use crate::api::CloudApi;
use crate::cli::args::RegionCommand;
use crate::cli::output::yes_no;
use crate::cli::{OutputCtx, OutputFormat, OutputWriter};
use crate::cloud::CloudError;
use crate::config::Config;

/// Run a `civo region` subcommand.
///
/// # Errors
///
/// Returns `CloudError` on API failure, an unknown region code, or a config write failure.
pub fn run(
    command: &RegionCommand,
    api: &dyn CloudApi,
    config: &mut Config,
    config_path: &Path,
    ctx: &OutputCtx,
    out: &mut dyn Write,
) -> Result<(), CloudError> {
    match command {
        RegionCommand::List => list(api, ctx, out),
        RegionCommand::Use { code } => use_region(code, api, config, config_path, ctx, out),
    }
}

fn list(api: &dyn CloudApi, ctx: &OutputCtx, out: &mut dyn Write) -> Result<(), CloudError> {
    let _t_list = ctx.timer("list_regions");
    let regions = api.list_regions()?;
    drop(_t_list);

    let mut ow = OutputWriter::new();
    for region in &regions {
        ow.start_line();
        ow.append_data_with_label("code", region.code.as_str(), "Code");
        ow.append_data_with_label("name", region.name.as_str(), "Name");
        ow.append_data_with_label("country", region.country.as_str(), "Country");
        ow.append_data_with_label(
            "current",
            yes_no(region.code.eq_ignore_ascii_case(api.region())),
            "Current",
        );
    }

    ow.write(ctx, out)
}

fn use_region(
    code: &str,
    api: &dyn CloudApi,
    config: &mut Config,
    config_path: &Path,
    ctx: &OutputCtx,
    out: &mut dyn Write,
) -> Result<(), CloudError> {
    let _t_list = ctx.timer("list_regions");
    let regions = api.list_regions()?;
    drop(_t_list);

    let region = regions
        .iter()
        .find(|r| r.code.eq_ignore_ascii_case(code))
        .ok_or_else(|| {
            CloudError::InvalidFlag(format!(
                "region '{code}' is not available, run `civo region list` to see the options"
            ))
        })?;

    config.meta.default_region.clone_from(&region.code);
    config.save(config_path)?;

    let mut ow = OutputWriter::new();
    ow.append_data_with_label("code", region.code.as_str(), "Code");
    ow.append_data_with_label("name", region.name.as_str(), "Name");

    match ctx.format {
        OutputFormat::Json => ow.write_single_object_json(out, ctx.pretty),
        OutputFormat::Custom => ow.write_custom_output(out, ctx.template()),
        OutputFormat::Human => {
            writeln!(out, "The default region was set to {} ({})", region.name, region.code)?;
            Ok(())
        }
    }
}
