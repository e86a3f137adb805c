/// `firewall list` command: list the firewalls of the current region.
use std::io::Write;

use crate::api::CloudApi;
use crate::cli::{OutputCtx, OutputWriter};
use crate::cloud::CloudError;

/// Run `civo firewall list`.
///
/// # Errors
///
/// Returns `CloudError::Api` if the API call fails.
pub fn list(api: &dyn CloudApi, ctx: &OutputCtx, out: &mut dyn Write) -> Result<(), CloudError> {
    let _t_list = ctx.timer("list_firewalls");
    let firewalls = api.list_firewalls()?;
    drop(_t_list);

    let mut ow = OutputWriter::new();
    for fw in &firewalls {
        ow.start_line();
        ow.append_data_with_label("id", fw.id.as_str(), "ID");
        ow.append_data_with_label("name", fw.name.as_str(), "Name");
        ow.append_data_with_label("network_id", fw.network_id.as_str(), "Network ID");
        ow.append_data_with_label("rules_count", fw.rules_count.to_string(), "Total Rules");
        ow.append_data_with_label("instance_count", fw.instance_count.to_string(), "Total Instances");
        ow.append_data_with_label("cluster_count", fw.cluster_count.to_string(), "Total Clusters");
        ow.append_data_with_label(
            "loadbalancer_count",
            fw.loadbalancer_count.to_string(),
            "Total LoadBalancer",
        );
    }

    ow.write(ctx, out)
}
