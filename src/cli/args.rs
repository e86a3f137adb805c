/// CLI argument definitions via clap derive.
use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

/// civo — manage Civo cloud resources.
#[derive(Debug, Parser)]
#[command(
    name = "civo",
    about = "Manage Civo cloud resources from the CLI",
    version,
    arg_required_else_help = true
)]
pub struct Cli {
    /// Output format.
    #[arg(short, long, global = true, value_name = "FORMAT", default_value = "human")]
    pub output: OutputFormat,

    /// Template for `-o custom`: each field key is replaced by its value,
    /// e.g. -f "id: name". `\t` and `\n` are expanded.
    #[arg(short, long, global = true, value_name = "TEMPLATE")]
    pub fields: Option<String>,

    /// Pretty-print JSON output.
    #[arg(long, global = true)]
    pub pretty: bool,

    /// Omit table headers (useful for awk/cut processing).
    #[arg(long, global = true)]
    pub no_header: bool,

    /// Region to use for this command instead of the configured default.
    #[arg(long, global = true, value_name = "CODE")]
    pub region: Option<String>,

    /// Config file to use instead of ~/.civo.json.
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Log API requests and timings to stderr.
    #[arg(long, global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Output format variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Default)]
pub enum OutputFormat {
    /// Aligned table or sentence (human-readable).
    #[default]
    Human,
    /// JSON object or array (compact unless --pretty).
    Json,
    /// One line per result rendered from the --fields template.
    Custom,
}

/// All subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Manage firewalls and firewall rules.
    #[command(subcommand, visible_alias = "fw")]
    Firewall(FirewallCommand),
    /// Instance details.
    #[command(subcommand)]
    Instance(InstanceCommand),
    /// Inspect load balancers.
    #[command(subcommand, visible_alias = "lb")]
    Loadbalancer(LoadBalancerCommand),
    /// List regions and choose the default one.
    #[command(subcommand)]
    Region(RegionCommand),
    /// Manage stored API keys.
    #[command(subcommand)]
    Apikey(ApikeyCommand),
}

/// `civo firewall ...`
#[derive(Debug, Subcommand)]
pub enum FirewallCommand {
    /// List firewalls.
    #[command(visible_alias = "ls")]
    List,
    /// Manage the rules of a firewall.
    #[command(subcommand)]
    Rule(RuleCommand),
}

/// `civo firewall rule ...`
#[derive(Debug, Subcommand)]
pub enum RuleCommand {
    /// Create a new firewall rule.
    #[command(visible_aliases = ["new", "add"])]
    Create(RuleCreateArgs),
    /// List the rules of a firewall.
    #[command(visible_alias = "ls")]
    List(RuleListArgs),
}

/// Arguments for `civo firewall rule create`.
#[derive(Debug, Parser)]
pub struct RuleCreateArgs {
    /// Firewall ID or name.
    #[arg(value_name = "FIREWALL")]
    pub firewall: String,

    /// Protocol: TCP, UDP or ICMP.
    #[arg(short, long, default_value = "TCP")]
    pub protocol: String,

    /// First port of the range to open.
    #[arg(short = 's', long = "startport", value_name = "PORT")]
    pub start_port: String,

    /// Last port of the range (defaults to the start port).
    #[arg(short = 'e', long = "endport", value_name = "PORT")]
    pub end_port: Option<String>,

    /// Comma-separated CIDR ranges allowed by the rule.
    #[arg(short, long, default_value = "0.0.0.0/0")]
    pub cidr: String,

    /// Traffic direction; only "ingress" is supported.
    #[arg(short, long, default_value = "ingress")]
    pub direction: String,

    /// A label for the rule.
    #[arg(short, long)]
    pub label: Option<String>,
}

/// Arguments for `civo firewall rule list`.
#[derive(Debug, Parser)]
pub struct RuleListArgs {
    /// Firewall ID or name.
    #[arg(value_name = "FIREWALL")]
    pub firewall: String,
}

/// `civo instance ...`
#[derive(Debug, Subcommand)]
pub enum InstanceCommand {
    /// List instance sizes.
    #[command(visible_aliases = ["sizes", "all"])]
    Size,
}

/// `civo loadbalancer ...`
#[derive(Debug, Subcommand)]
pub enum LoadBalancerCommand {
    /// Show a load balancer.
    ///
    /// Fields available to -o custom: id, name, algorithm, public_ip, state,
    /// private_ip, firewall_id, cluster_id, external_traffic_policy,
    /// session_affinity, session_affinity_config_timeout, Backends.
    #[command(visible_aliases = ["get", "inspect"])]
    Show(LoadBalancerShowArgs),
    /// List load balancers.
    #[command(visible_alias = "ls")]
    List,
}

/// Arguments for `civo loadbalancer show`.
#[derive(Debug, Parser)]
pub struct LoadBalancerShowArgs {
    /// Load balancer ID or name.
    #[arg(value_name = "ID|NAME")]
    pub target: String,
}

/// `civo region ...`
#[derive(Debug, Subcommand)]
pub enum RegionCommand {
    /// List available regions.
    #[command(visible_alias = "ls")]
    List,
    /// Set the default region.
    #[command(visible_alias = "current")]
    Use {
        /// Region code, e.g. LON1.
        code: String,
    },
}

/// `civo apikey ...`
#[derive(Debug, Subcommand)]
pub enum ApikeyCommand {
    /// Store an API key and make it current.
    #[command(visible_alias = "add")]
    Save {
        /// Name to store the key under.
        name: String,
        /// The API key.
        key: String,
    },
    /// List stored API keys.
    #[command(visible_alias = "ls")]
    List,
    /// Make a stored API key current.
    Use {
        /// Name of a stored key.
        name: String,
    },
    /// Delete a stored API key.
    #[command(visible_alias = "rm")]
    Remove {
        /// Name of a stored key.
        name: String,
    },
}
