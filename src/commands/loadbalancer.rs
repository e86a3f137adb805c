/// `loadbalancer` commands: show one load balancer or list them all.
use std::io::Write;

use crate::api::{CloudApi, LoadBalancer};
use crate::cli::args::{LoadBalancerCommand, LoadBalancerShowArgs};
use crate::cli::output::write_json;
use crate::cli::{OutputCtx, OutputFormat, OutputWriter};
use crate::cloud::{CloudError, find_load_balancer};

/// Run a `civo loadbalancer` subcommand.
///
/// # Errors
///
/// Returns `CloudError` on an unresolvable load balancer or API failure.
pub fn run(
    command: &LoadBalancerCommand,
    api: &dyn CloudApi,
    ctx: &OutputCtx,
    out: &mut dyn Write,
) -> Result<(), CloudError> {
    match command {
        LoadBalancerCommand::Show(args) => show(args, api, ctx, out),
        LoadBalancerCommand::List => list(api, ctx, out),
    }
}

fn show(
    args: &LoadBalancerShowArgs,
    api: &dyn CloudApi,
    ctx: &OutputCtx,
    out: &mut dyn Write,
) -> Result<(), CloudError> {
    let _t_find = ctx.timer("find_load_balancer");
    let lb = find_load_balancer(api, &args.target)?;
    drop(_t_find);

    match ctx.format {
        // The full API object, not the row.
        OutputFormat::Json => write_json(out, &lb, ctx.pretty),
        OutputFormat::Human => detail_writer(&lb, false).write_table(out, ctx.no_header),
        OutputFormat::Custom => detail_writer(&lb, true).write_custom_output(out, ctx.template()),
    }
}

/// One row describing `lb`; `extended` adds the fields only custom output offers.
fn detail_writer(lb: &LoadBalancer, extended: bool) -> OutputWriter {
    let mut ow = OutputWriter::new();
    ow.start_line();
    ow.append_data_with_label("id", lb.id.as_str(), "ID");
    ow.append_data_with_label("name", lb.name.as_str(), "Name");
    ow.append_data_with_label("algorithm", lb.algorithm.as_str(), "Algorithm");
    ow.append_data_with_label("public_ip", lb.public_ip.as_str(), "Public IP");
    ow.append_data_with_label("state", lb.state.as_str(), "State");

    if extended {
        ow.append_data_with_label("private_ip", lb.private_ip.as_str(), "Private IP");
        ow.append_data_with_label("firewall_id", lb.firewall_id.as_str(), "Firewall ID");
        ow.append_data_with_label("cluster_id", lb.cluster_id.as_str(), "Cluster ID");
        ow.append_data_with_label(
            "external_traffic_policy",
            lb.external_traffic_policy.as_str(),
            "External Traffic Policy",
        );
        ow.append_data_with_label(
            "session_affinity",
            lb.session_affinity.as_str(),
            "Session Affinity",
        );
        ow.append_data_with_label(
            "session_affinity_config_timeout",
            lb.session_affinity_config_timeout.to_string(),
            "Session Affinity Config Timeout",
        );
    }

    ow.append_data("Backends", backend_ips(lb));
    ow
}

fn list(api: &dyn CloudApi, ctx: &OutputCtx, out: &mut dyn Write) -> Result<(), CloudError> {
    let _t_list = ctx.timer("list_load_balancers");
    let load_balancers = api.list_load_balancers()?;
    drop(_t_list);

    let mut ow = OutputWriter::new();
    for lb in &load_balancers {
        ow.start_line();
        ow.append_data_with_label("id", lb.id.as_str(), "ID");
        ow.append_data_with_label("name", lb.name.as_str(), "Name");
        ow.append_data_with_label("algorithm", lb.algorithm.as_str(), "Algorithm");
        ow.append_data_with_label("public_ip", lb.public_ip.as_str(), "Public IP");
        ow.append_data_with_label("state", lb.state.as_str(), "State");
        ow.append_data_with_label("backends", backend_ips(lb), "Backends");
    }

    ow.write(ctx, out)
}

fn backend_ips(lb: &LoadBalancer) -> String {
    lb.backends
        .iter()
        .map(|b| b.ip.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}
