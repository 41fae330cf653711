use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use super::colors::{ColorMode, Colors, ThemeMode};
use crate::generator::{GroupingRule, ImportTarget};

#[derive(Parser, Debug)]
#[command(name = "oas3-endpoint-gen")]
#[command(author, version, about = "OpenAPI to TypeScript endpoint generator")]
#[command(styles = Colors::clap_styles())]
pub struct Cli {
  #[command(subcommand)]
  pub command: Commands,

  /// Control color output
  #[arg(long, value_enum, default_value = "auto", global = true)]
  pub color: ColorMode,

  /// Terminal theme (dark or light background)
  #[arg(long, value_enum, default_value = "auto", global = true)]
  pub theme: ThemeMode,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
  /// List information from an OpenAPI specification
  List {
    #[command(subcommand)]
    list_command: ListCommands,
  },
  /// Generate TypeScript endpoint modules from an OpenAPI specification
  Generate(GenerateCommand),
}

#[derive(Args, Debug, Clone)]
#[allow(clippy::struct_excessive_bools)]
pub struct GenerateCommand {
  /// Path to the OpenAPI specification file (JSON or YAML)
  #[arg(short, long, value_name = "FILE", required_unless_present = "config")]
  pub input: Option<PathBuf>,

  /// Directory the generated modules are written to (replaced on every run)
  #[arg(short, long, value_name = "DIR", required_unless_present = "config")]
  pub output: Option<PathBuf>,

  /// JSON file with a list of generation entries, run one after another
  #[arg(short, long, value_name = "FILE", conflicts_with_all = ["input", "output"])]
  pub config: Option<PathBuf>,

  /// How routes are split into directories: none, path-segment[-N] or tag[-N]
  #[arg(long, value_name = "RULE", default_value = "none")]
  pub grouping: GroupingRule,

  /// Keep only these groups (comma-separated)
  #[arg(long, value_name = "GROUPS", value_delimiter = ',')]
  pub only_groups: Option<Vec<String>>,

  /// Drop these groups (comma-separated)
  #[arg(long, value_name = "GROUPS", value_delimiter = ',')]
  pub exclude_groups: Option<Vec<String>>,

  /// Include only these operations (comma-separated operation ids or unit names)
  #[arg(long, value_name = "IDS", value_delimiter = ',')]
  pub only: Option<Vec<String>>,

  /// Exclude these operations (comma-separated operation ids or unit names)
  #[arg(long, value_name = "IDS", value_delimiter = ',')]
  pub exclude: Option<Vec<String>>,

  /// Re-export the whole tree under this namespace
  #[arg(long, value_name = "NAME")]
  pub namespace: Option<String>,

  /// Prepended to every request path
  #[arg(long, value_name = "PREFIX", default_value = "")]
  pub path_prefix: String,

  /// Appended to every request path
  #[arg(long, value_name = "SUFFIX", default_value = "")]
  pub path_suffix: String,

  /// Prefix unit names with the N-th path segment (0 when given without a value)
  #[arg(long, value_name = "N", num_args = 0..=1, default_missing_value = "0")]
  pub add_path_segment: Option<usize>,

  /// Module the runtime symbols are imported from
  #[arg(long, value_name = "MODULE")]
  pub runtime_module: Option<String>,

  /// Override for the `Endpoint` constructor, as module#export
  #[arg(long, value_name = "MODULE#EXPORT")]
  pub endpoint: Option<ImportTarget>,

  /// Override for the `http` client, as module#export
  #[arg(long, value_name = "MODULE#EXPORT")]
  pub http_client: Option<ImportTarget>,

  /// Override for the `queryClient`, as module#export
  #[arg(long, value_name = "MODULE#EXPORT")]
  pub query_client: Option<ImportTarget>,

  /// Fold path and query parameters into a single `params` argument
  #[arg(long, default_value_t = false)]
  pub combine_path_and_query: bool,

  /// Write tags and groups as plain strings instead of enum members
  #[arg(long, default_value_t = false)]
  pub no_unit_meta: bool,

  /// Keep shared types that nothing references
  #[arg(long, default_value_t = false)]
  pub no_sweep: bool,

  /// Enable verbose output with detailed progress information
  #[arg(short, long, default_value_t = false)]
  pub verbose: bool,

  /// Suppress non-essential output (errors only)
  #[arg(short, long, default_value_t = false)]
  pub quiet: bool,
}

#[derive(Subcommand, Debug)]
pub enum ListCommands {
  /// List every route with the unit name and group it would get
  Routes {
    /// Path to the OpenAPI specification file (JSON or YAML)
    #[arg(short, long, value_name = "FILE")]
    input: PathBuf,

    /// Grouping rule used for the GROUP column
    #[arg(long, value_name = "RULE", default_value = "none")]
    group_by: GroupingRule,
  },
}
