pub(crate) mod assembler;
pub(crate) mod ast;
pub mod config;
pub(crate) mod exports;
pub(crate) mod grouping;
pub(crate) mod meta;
pub mod metrics;
pub(crate) mod naming;
pub(crate) mod normalizer;
pub mod orchestrator;
pub(crate) mod output_tree;
pub(crate) mod placement;
pub(crate) mod source;
pub(crate) mod sweeper;

#[cfg(test)]
mod tests;

pub use config::{
  GeneratorConfig, GroupFilter, GroupingRule, ImportTarget, Injectable, InjectableSymbols, Namespace,
};
pub use metrics::{GenerationStats, GenerationWarning};
pub use orchestrator::Orchestrator;
