use strum::Display;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct GenerationStats {
  pub routes_collected: usize,
  pub units_generated: usize,
  pub groups_generated: usize,
  pub contracts_registered: usize,
  pub shared_contracts: usize,
  pub local_contracts: usize,
  pub synthesized_contracts: usize,
  pub placeholder_contracts: usize,
  pub files_written: usize,
  pub declarations_swept: usize,
  pub sweep_rounds: usize,
  pub cycles_detected: usize,
  pub cycle_details: Vec<Vec<String>>,
  pub warnings: Vec<GenerationWarning>,
}

impl GenerationStats {
  pub fn record_routes(&mut self, count: usize) {
    self.routes_collected += count;
  }

  pub fn record_unit(&mut self, synthesized_contracts: usize) {
    self.units_generated += 1;
    self.synthesized_contracts += synthesized_contracts;
  }

  pub fn record_placement(&mut self, shared: usize, local: usize, placeholders: usize) {
    self.shared_contracts += shared;
    self.local_contracts += local;
    self.placeholder_contracts += placeholders;
  }

  pub fn record_cycle(&mut self, cycle: Vec<String>) {
    self.cycles_detected += 1;
    self.cycle_details.push(cycle);
  }

  pub fn record_cycles(&mut self, cycles: Vec<Vec<String>>) {
    for cycle in cycles {
      self.record_cycle(cycle);
    }
  }

  pub fn record_sweep(&mut self, rounds: usize, removed: usize) {
    self.sweep_rounds += rounds;
    self.declarations_swept += removed;
  }

  pub fn record_warning(&mut self, warning: GenerationWarning) {
    self.warnings.push(warning);
  }

  pub fn record_warnings(&mut self, warnings: impl IntoIterator<Item = GenerationWarning>) {
    self.warnings.extend(warnings);
  }
}

#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum GenerationWarning {
  #[strum(to_string = "Failed to convert schema '{schema_name}': {error}")]
  SchemaConversionFailed { schema_name: String, error: String },
  #[strum(to_string = "Failed to convert operation '{method} {path}': {error}")]
  OperationConversionFailed {
    method: String,
    path: String,
    error: String,
  },
  #[strum(to_string = "Unit name '{original}' already used in '{directory}', renamed to '{renamed}'")]
  UnitNameCollision {
    original: String,
    renamed: String,
    directory: String,
  },
  #[strum(to_string = "Group '{group}' would shadow a root module, written to '{directory}'")]
  GroupDirectoryRenamed { group: String, directory: String },
  #[strum(to_string = "Type '{requested}' already exists, '{unit}' declares its own as '{renamed}'")]
  SynthesizedNameCollision {
    unit: String,
    requested: String,
    renamed: String,
  },
  #[strum(to_string = "Type '{name}' referenced by '{unit}' is not declared, emitted as 'any'")]
  MissingContract { name: String, unit: String },
  #[strum(to_string = "Dead type sweep failed, shared types left as written: {error}")]
  SweepFailed { error: String },
}

impl GenerationWarning {
  pub fn is_skipped_item(&self) -> bool {
    matches!(
      self,
      Self::SchemaConversionFailed { .. } | Self::OperationConversionFailed { .. }
    )
  }
}
