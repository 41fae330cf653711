use std::path::Path;

use comfy_table::{Attribute, Cell, CellAlignment, ContentArrangement, Row, Table};
use crossterm::style::Stylize;

use crate::{
  generator::{GeneratorConfig, GroupingRule, Orchestrator, grouping::GroupedRoutes},
  ui::{Colors, colors::IntoComfyColor, term_width},
  utils::spec::SpecLoader,
};

/// One line of the listing.
#[derive(Debug, Clone, PartialEq, Eq)]
struct RouteRow {
  group: String,
  unit: String,
  method: String,
  path: String,
}

fn route_rows(routes: &GroupedRoutes) -> Vec<RouteRow> {
  let row = |group: &str, route: &crate::generator::ast::Route| RouteRow {
    group: group.to_string(),
    unit: route.unit_name.clone(),
    method: route.method.to_string(),
    path: route.raw_path.clone(),
  };

  match routes {
    GroupedRoutes::Flat(routes) => routes.iter().map(|route| row("", route)).collect(),
    GroupedRoutes::Grouped(groups) => groups
      .iter()
      .flat_map(|(group, routes)| routes.iter().map(move |route| row(group.as_str(), route)))
      .collect(),
  }
}

pub async fn list_routes(input: &Path, grouping: GroupingRule, colors: &Colors) -> anyhow::Result<()> {
  let document = SpecLoader::open(input).await?.parse()?;
  let config = GeneratorConfig::builder().grouping(grouping).sweep(false).build();
  let (grouping, stats) = Orchestrator::new(document, config).routes();
  let rows = route_rows(&grouping.routes);

  let mut table = Table::new();
  table
    .load_preset("  ── ──            ")
    .set_content_arrangement(ContentArrangement::Dynamic)
    .set_width(term_width());

  let mut header = Row::new();
  for title in ["GROUP", "UNIT", "METHOD", "PATH"] {
    header.add_cell(Cell::new(title).fg(IntoComfyColor::into(colors.label())));
  }
  table.set_header(header);

  for route in rows {
    let mut row = Row::new();
    row.add_cell(Cell::new(route.group).fg(IntoComfyColor::into(colors.info())));
    row.add_cell(
      Cell::new(route.unit)
        .fg(IntoComfyColor::into(colors.value()))
        .add_attribute(Attribute::Bold),
    );
    row.add_cell(
      Cell::new(route.method)
        .fg(IntoComfyColor::into(colors.accent()))
        .set_alignment(CellAlignment::Right),
    );
    row.add_cell(Cell::new(route.path).fg(IntoComfyColor::into(colors.primary())));
    table.add_row(row);
  }

  println!("{table}");

  for warning in stats.warnings.iter().filter(|w| w.is_skipped_item()) {
    eprintln!(
      "{} {}",
      "Skipped:".with(colors.warning()),
      warning.to_string().with(colors.primary())
    );
  }

  Ok(())
}
