use std::{
  collections::HashSet,
  path::{Path, PathBuf},
};

use anyhow::Context;
use chrono::{Local, Timelike};
use crossterm::style::Stylize;
use serde::Deserialize;

use crate::{
  generator::{
    GenerationStats, GeneratorConfig, GroupFilter, GroupingRule, ImportTarget, InjectableSymbols, Namespace,
    Orchestrator,
  },
  ui::{Colors, cli::GenerateCommand},
  utils::spec::SpecLoader,
};

fn format_timestamp() -> String {
  let now = Local::now();
  format!("[{:02}:{:02}:{:02}]", now.hour(), now.minute(), now.second())
}

/// One resolved generation run.
#[derive(Debug, Clone)]
pub struct GenerateJob {
  pub input: PathBuf,
  pub output: PathBuf,
  pub config: GeneratorConfig,
}

/// Where the runs come from: the command line, or a batch file.
#[derive(Debug, Clone)]
pub struct GenerateConfig {
  pub jobs: Vec<Result<GenerateJob, String>>,
  pub verbose: bool,
  pub quiet: bool,
}

impl GenerateConfig {
  pub async fn from_command(command: GenerateCommand) -> anyhow::Result<Self> {
    let (verbose, quiet) = (command.verbose, command.quiet);

    let jobs = match command.config.clone() {
      Some(path) => {
        let content = tokio::fs::read_to_string(&path)
          .await
          .with_context(|| format!("failed to read config file {}", path.display()))?;
        let base = path.parent().unwrap_or_else(|| Path::new("."));
        parse_batch(&content)?
          .into_iter()
          .enumerate()
          .map(|(index, entry)| entry.into_job(base).map_err(|reason| format!("entry {}: {reason}", index + 1)))
          .collect()
      }
      None => vec![job_from_command(command)],
    };

    Ok(Self { jobs, verbose, quiet })
  }
}

fn job_from_command(command: GenerateCommand) -> Result<GenerateJob, String> {
  let GenerateCommand {
    input,
    output,
    grouping,
    only_groups,
    exclude_groups,
    only,
    exclude,
    namespace,
    path_prefix,
    path_suffix,
    add_path_segment,
    runtime_module,
    endpoint,
    http_client,
    query_client,
    combine_path_and_query,
    no_unit_meta,
    no_sweep,
    ..
  } = command;

  let input = input.ok_or("missing input")?;
  let output = output.ok_or("missing output")?;

  let config = GeneratorConfig::builder()
    .path_prefix(path_prefix)
    .path_suffix(path_suffix)
    .grouping(grouping)
    .group_filter(GroupFilter::new(to_set(only_groups), to_set(exclude_groups)))
    .maybe_only_operations(to_set(only))
    .maybe_excluded_operations(to_set(exclude))
    .maybe_namespace(namespace.map(Namespace::Literal))
    .maybe_add_path_segment(add_path_segment)
    .injectables(injectables(runtime_module, endpoint, http_client, query_client))
    .combine_path_and_query(combine_path_and_query)
    .unit_meta(!no_unit_meta)
    .sweep(!no_sweep)
    .build();

  Ok(GenerateJob { input, output, config })
}

fn to_set(values: Option<Vec<String>>) -> Option<HashSet<String>> {
  values.map(|values| values.into_iter().collect())
}

fn injectables(
  runtime_module: Option<String>,
  endpoint: Option<ImportTarget>,
  http_client: Option<ImportTarget>,
  query_client: Option<ImportTarget>,
) -> InjectableSymbols {
  InjectableSymbols::builder()
    .maybe_runtime_module(runtime_module)
    .maybe_endpoint(endpoint)
    .maybe_http_client(http_client)
    .maybe_query_client(query_client)
    .build()
}

/// A batch file is either a bare list of entries or `{ "configs": [...] }`.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum BatchFile {
  List(Vec<BatchEntry>),
  Wrapped { configs: Vec<BatchEntry> },
}

fn parse_batch(content: &str) -> anyhow::Result<Vec<BatchEntry>> {
  let file = serde_json::from_str::<BatchFile>(content).context("config file must be a list of entries or an object with 'configs'")?;
  Ok(match file {
    BatchFile::List(entries) | BatchFile::Wrapped { configs: entries } => entries,
  })
}

/// `true` means index 0.
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(untagged)]
enum PathSegmentSetting {
  Enabled(bool),
  Index(usize),
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct BatchEntry {
  input: Option<PathBuf>,
  output: Option<PathBuf>,
  grouping: Option<String>,
  only_groups: Option<Vec<String>>,
  exclude_groups: Option<Vec<String>>,
  only: Option<Vec<String>>,
  exclude: Option<Vec<String>>,
  namespace: Option<String>,
  path_prefix: String,
  path_suffix: String,
  add_path_segment: Option<PathSegmentSetting>,
  runtime_module: Option<String>,
  endpoint: Option<String>,
  http_client: Option<String>,
  query_client: Option<String>,
  combine_path_and_query: bool,
  unit_meta: Option<bool>,
  sweep: Option<bool>,
}

impl BatchEntry {
  /// Relative paths are resolved against the config file's directory.
  fn into_job(self, base: &Path) -> Result<GenerateJob, String> {
    let input = self
      .input
      .filter(|p| !p.as_os_str().is_empty())
      .ok_or("missing input")?;
    let output = self
      .output
      .filter(|p| !p.as_os_str().is_empty())
      .ok_or("missing output")?;

    let grouping = self
      .grouping
      .as_deref()
      .map(str::parse::<GroupingRule>)
      .transpose()
      .map_err(|e| e.to_string())?
      .unwrap_or_default();
    let target = |value: Option<String>| {
      value
        .as_deref()
        .map(str::parse::<ImportTarget>)
        .transpose()
        .map_err(|e| e.to_string())
    };
    let add_path_segment = match self.add_path_segment {
      Some(PathSegmentSetting::Enabled(true)) => Some(0),
      Some(PathSegmentSetting::Index(index)) => Some(index),
      Some(PathSegmentSetting::Enabled(false)) | None => None,
    };

    let config = GeneratorConfig::builder()
      .path_prefix(self.path_prefix)
      .path_suffix(self.path_suffix)
      .grouping(grouping)
      .group_filter(GroupFilter::new(to_set(self.only_groups), to_set(self.exclude_groups)))
      .maybe_only_operations(to_set(self.only))
      .maybe_excluded_operations(to_set(self.exclude))
      .maybe_namespace(self.namespace.map(Namespace::Literal))
      .maybe_add_path_segment(add_path_segment)
      .injectables(injectables(
        self.runtime_module,
        target(self.endpoint)?,
        target(self.http_client)?,
        target(self.query_client)?,
      ))
      .combine_path_and_query(self.combine_path_and_query)
      .unit_meta(self.unit_meta.unwrap_or(true))
      .sweep(self.sweep.unwrap_or(true))
      .build();

    Ok(GenerateJob {
      input: base.join(input),
      output: base.join(output),
      config,
    })
  }
}

struct GenerateLogger<'a> {
  config: &'a GenerateConfig,
  colors: &'a Colors,
}

impl<'a> GenerateLogger<'a> {
  fn new(config: &'a GenerateConfig, colors: &'a Colors) -> Self {
    Self { config, colors }
  }

  fn info(&self, message: &str) {
    if !self.config.quiet {
      println!("{} {message}", format_timestamp().with(self.colors.timestamp()));
    }
  }

  fn stat(&self, label: &str, value: String) {
    if !self.config.quiet {
      println!(
        "            {:<25} {}",
        label.with(self.colors.label()),
        value.with(self.colors.value())
      );
    }
  }

  fn log_loading(&self, job: &GenerateJob) {
    self.info(
      &format!("Loading OpenAPI spec from: {}", job.input.display())
        .with(self.colors.primary())
        .to_string(),
    );
  }

  fn log_writing(&self, job: &GenerateJob) {
    self.info(
      &format!("Writing endpoints to: {}", job.output.display())
        .with(self.colors.primary())
        .to_string(),
    );
  }

  fn skipped(&self, reason: &str) {
    eprintln!(
      "{} {}",
      "Skipped:".with(self.colors.warning()),
      reason.with(self.colors.primary())
    );
  }

  fn failed(&self, job: &GenerateJob, error: &anyhow::Error) {
    eprintln!(
      "{} {}: {}",
      "Error:".with(self.colors.accent()),
      job.input.display(),
      format!("{error:#}").with(self.colors.primary())
    );
  }

  fn print_statistics(&self, stats: &GenerationStats) {
    if self.config.quiet {
      return;
    }

    self.stat("Routes collected:", stats.routes_collected.to_string());
    self.stat("Endpoints generated:", stats.units_generated.to_string());
    if stats.groups_generated > 0 {
      self.stat("Groups:", stats.groups_generated.to_string());
    }
    self.stat("Data contracts:", stats.contracts_registered.to_string());
    self.stat(
      "",
      format!("{} shared, {} inlined", stats.shared_contracts, stats.local_contracts),
    );
    if stats.placeholder_contracts > 0 {
      self.stat("", format!("{} placeholders", stats.placeholder_contracts));
    }
    if self.config.verbose {
      self.stat("Synthesized types:", stats.synthesized_contracts.to_string());
    }
    self.stat("Files written:", stats.files_written.to_string());
    if stats.sweep_rounds > 0 {
      self.stat(
        "Unused types removed:",
        format!("{} in {} rounds", stats.declarations_swept, stats.sweep_rounds),
      );
    }
    if !stats.warnings.is_empty() {
      self.stat("Warnings:", stats.warnings.len().to_string());
    }

    self.print_cycles(stats);
    self.print_warnings(stats);
  }

  fn print_cycles(&self, stats: &GenerationStats) {
    if stats.cycles_detected == 0 {
      return;
    }

    self.stat("Cycles:", stats.cycles_detected.to_string());

    if self.config.verbose {
      for (i, cycle) in stats.cycle_details.iter().enumerate() {
        println!(
          "              {}: {}",
          format!("Cycle {}", i + 1).with(self.colors.accent()),
          cycle.join(" -> ").with(self.colors.info())
        );
      }
    }
  }

  fn print_warnings(&self, stats: &GenerationStats) {
    let mut printed_header = false;
    for warning in &stats.warnings {
      if !warning.is_skipped_item() && !self.config.verbose {
        continue;
      }

      if !printed_header {
        println!();
        printed_header = true;
      }

      let label = if warning.is_skipped_item() { "Skipped:" } else { "Warning:" };
      eprintln!(
        "{} {}",
        label.with(self.colors.warning()),
        format!("{warning}").with(self.colors.primary())
      );
    }
  }

  fn log_success(&self) {
    if !self.config.quiet {
      println!();
      println!(
        "{} {}",
        format_timestamp().with(self.colors.timestamp()),
        "Successfully generated TypeScript endpoints".with(self.colors.success())
      );
    }
  }
}

/// Outcome of one job that did not fail.
enum JobOutcome {
  Generated,
  Skipped(String),
}

async fn run_job(job: &GenerateJob, logger: &GenerateLogger<'_>) -> anyhow::Result<JobOutcome> {
  let metadata = tokio::fs::metadata(&job.input)
    .await
    .with_context(|| format!("failed to read {}", job.input.display()))?;
  if metadata.len() == 0 {
    return Ok(JobOutcome::Skipped(format!("{} is empty", job.input.display())));
  }

  logger.log_loading(job);
  let loader = SpecLoader::open(&job.input).await?;
  if loader.is_empty() {
    return Ok(JobOutcome::Skipped(format!("{} is empty", job.input.display())));
  }
  let document = loader.parse()?;

  logger.log_writing(job);
  let stats = Orchestrator::new(document, job.config.clone())
    .generate_to_dir(&job.output)
    .await?;
  logger.print_statistics(&stats);
  Ok(JobOutcome::Generated)
}

/// Runs every job. Skipped entries only warn; the command fails if any job
/// failed, after all of them have been attempted.
pub async fn generate_code(config: GenerateConfig, colors: &Colors) -> anyhow::Result<()> {
  let logger = GenerateLogger::new(&config, colors);
  let mut failed = 0;
  let mut generated = 0;

  for job in &config.jobs {
    let job = match job {
      Ok(job) => job,
      Err(reason) => {
        logger.skipped(reason);
        continue;
      }
    };

    match run_job(job, &logger).await {
      Ok(JobOutcome::Generated) => generated += 1,
      Ok(JobOutcome::Skipped(reason)) => logger.skipped(&reason),
      Err(error) => {
        logger.failed(job, &error);
        failed += 1;
      }
    }
  }

  if failed > 0 {
    anyhow::bail!("{failed} of {} generation runs failed", config.jobs.len());
  }
  if generated > 0 {
    logger.log_success();
  }
  Ok(())
}
