/// `firewall rule` commands: create and list firewall rules.
use std::io::Write;

use console::style;

use crate::api::{CloudApi, FirewallRuleConfig};
use crate::cli::args::{RuleCommand, RuleCreateArgs, RuleListArgs};
use crate::cli::{OutputCtx, OutputFormat, OutputWriter};
use crate::cloud::rule::validate;
use crate::cloud::{CloudError, RuleFlags, build_rule_config, find_firewall};

/// Run a `civo firewall rule` subcommand.
///
/// # Errors
///
/// Returns `CloudError` on invalid flags, an unresolvable firewall, or API failure.
pub fn run(
    command: &RuleCommand,
    api: &dyn CloudApi,
    ctx: &OutputCtx,
    out: &mut dyn Write,
) -> Result<(), CloudError> {
    match command {
        RuleCommand::Create(args) => create(args, api, ctx, out),
        RuleCommand::List(args) => list(args, api, ctx, out),
    }
}

fn create(
    args: &RuleCreateArgs,
    api: &dyn CloudApi,
    ctx: &OutputCtx,
    out: &mut dyn Write,
) -> Result<(), CloudError> {
    let flags = RuleFlags {
        protocol: args.protocol.clone(),
        start_port: args.start_port.clone(),
        end_port: args.end_port.clone(),
        cidr: args.cidr.clone(),
        direction: args.direction.clone(),
        label: args.label.clone(),
    };
    validate(&flags)?;

    let _t_find = ctx.timer("find_firewall");
    let firewall = find_firewall(api, &args.firewall)?;
    drop(_t_find);

    let config = build_rule_config(&firewall.id, &flags)?;

    let _t_create = ctx.timer("new_firewall_rule");
    let rule = api.new_firewall_rule(&config)?;
    drop(_t_create);

    let mut ow = OutputWriter::new();
    ow.start_line();
    ow.append_data("id", rule.id.as_str());
    ow.append_data("name", rule.label.as_str());

    match ctx.format {
        OutputFormat::Json => ow.write_single_object_json(out, ctx.pretty),
        OutputFormat::Custom => ow.write_custom_output(out, ctx.template()),
        OutputFormat::Human => {
            writeln!(out, "{}", created_message(&rule.label, &config, &rule.id))?;
            Ok(())
        }
    }
}

/// The sentence printed after a rule is created.
fn created_message(label: &str, config: &FirewallRuleConfig, id: &str) -> String {
    let called = if label.is_empty() {
        String::new()
    } else {
        format!("called {} ", style(label).green())
    };
    let ports = if config.start_port == config.end_port {
        format!("port {}", style(&config.start_port).green())
    } else {
        format!(
            "ports {}-{}",
            style(&config.start_port).green(),
            style(&config.end_port).green()
        )
    };
    let cidr = style(config.cidr.join(", ")).green();
    format!("Created a firewall rule {called}allowing access to {ports} from {cidr} with ID {id}")
}

fn list(
    args: &RuleListArgs,
    api: &dyn CloudApi,
    ctx: &OutputCtx,
    out: &mut dyn Write,
) -> Result<(), CloudError> {
    let _t_find = ctx.timer("find_firewall");
    let firewall = find_firewall(api, &args.firewall)?;
    drop(_t_find);

    let _t_list = ctx.timer("list_firewall_rules");
    let rules = api.list_firewall_rules(&firewall.id)?;
    drop(_t_list);

    let mut ow = OutputWriter::new();
    for rule in &rules {
        ow.start_line();
        ow.append_data_with_label("id", rule.id.as_str(), "ID");
        ow.append_data_with_label("direction", rule.direction.as_str(), "Direction");
        ow.append_data_with_label("protocol", rule.protocol.as_str(), "Protocol");
        ow.append_data_with_label("start_port", rule.start_port.as_str(), "Start Port");
        ow.append_data_with_label("end_port", rule.end_port.as_str(), "End Port");
        ow.append_data_with_label("cidr", rule.cidr.join(", "), "Cidr");
        ow.append_data_with_label("label", rule.label.as_str(), "Label");
    }

    ow.write(ctx, out)
}
