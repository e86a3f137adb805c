/// `instance size` command: list the sizes instances can be created with.
use std::io::Write;

use crate::api::{CloudApi, InstanceSize};
use crate::cli::args::InstanceCommand;
use crate::cli::output::yes_no;
use crate::cli::{OutputCtx, OutputWriter};
use crate::cloud::CloudError;

/// Name fragments of Kubernetes node sizes, which the size endpoint also returns.
const KUBERNETES_SIZE_MARKERS: [&str; 2] = [".kube.", ".k3s."];

/// Run a `civo instance` subcommand.
///
/// # Errors
///
/// Returns `CloudError::Api` if the API call fails.
pub fn run(
    command: &InstanceCommand,
    api: &dyn CloudApi,
    ctx: &OutputCtx,
    out: &mut dyn Write,
) -> Result<(), CloudError> {
    match command {
        InstanceCommand::Size => sizes(api, ctx, out),
    }
}

fn sizes(api: &dyn CloudApi, ctx: &OutputCtx, out: &mut dyn Write) -> Result<(), CloudError> {
    let _t_list = ctx.timer("list_instance_sizes");
    let sizes = api.list_instance_sizes()?;
    drop(_t_list);

    let mut ow = OutputWriter::new();
    for size in sizes.iter().filter(|s| is_instance_size(s)) {
        ow.start_line();
        ow.append_data_with_label("name", size.name.as_str(), "Name");
        ow.append_data_with_label("description", size.description.as_str(), "Description");
        ow.append_data_with_label("type", "Instance", "Type");
        ow.append_data_with_label("cpu_cores", size.cpu_cores.to_string(), "CPU");
        ow.append_data_with_label("ram_mb", size.ram_mb.to_string(), "RAM");
        ow.append_data_with_label("disk_gb", size.disk_gb.to_string(), "SSD");
        ow.append_data_with_label("selectable", yes_no(size.selectable), "Selectable");
    }

    ow.write(ctx, out)
}

/// Whether `size` is a plain instance size rather than a Kubernetes node size.
fn is_instance_size(size: &InstanceSize) -> bool {
    !KUBERNETES_SIZE_MARKERS
        .iter()
        .any(|marker| size.name.contains(marker))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::fake::FakeApi;
    use crate::cli::OutputFormat;

    fn size(name: &str, cpu: i64, selectable: bool) -> InstanceSize {
        InstanceSize {
            name: name.to_owned(),
            description: format!("{name} description"),
            cpu_cores: cpu,
            ram_mb: 2048,
            disk_gb: 25,
            selectable,
            ..InstanceSize::default()
        }
    }

    fn api() -> FakeApi {
        FakeApi {
            sizes: vec![
                size("g3.small", 1, true),
                size("g3.k3s.small", 1, true),
                size("g4s.kube.medium", 2, true),
                size("g3.xlarge", 6, false),
            ],
            ..FakeApi::default()
        }
    }

    fn output(format: OutputFormat, fields: Option<&str>) -> String {
        let ctx = OutputCtx::new(format, fields, false, false).unwrap();
        let mut buf = Vec::new();
        run(&InstanceCommand::Size, &api(), &ctx, &mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_kubernetes_sizes_filtered() {
        let s = output(OutputFormat::Custom, Some("name"));
        assert_eq!(s, "g3.small\ng3.xlarge\n");
    }

    #[test]
    fn test_json_fields() {
        let s = output(OutputFormat::Json, None);
        let parsed: serde_json::Value = serde_json::from_str(&s).unwrap();
        let rows = parsed.as_array().unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0]["type"], "Instance");
        assert_eq!(rows[0]["cpu_cores"], "1");
        assert_eq!(rows[1]["selectable"], "No");
    }

    #[test]
    fn test_table_headers() {
        let s = output(OutputFormat::Human, None);
        for header in ["Name", "Description", "Type", "CPU", "RAM", "SSD", "Selectable"] {
            assert!(s.contains(header), "missing header {header}");
        }
        assert!(!s.contains("kube"));
    }
}
