//! Pure conversion functions: TOML config structs -> crate API config types.

use anyhow::{Context, Result, bail};

use invspec_stochastic::{BuildConfig, Selection};

use crate::config::BuildToml;

/// Parses a selection policy name into the corresponding enum variant.
pub fn parse_selection(s: &str) -> Result<Selection> {
    match s.to_lowercase().as_str() {
        "uniform" => Ok(Selection::Uniform),
        "largest" | "largest_diagonal" => Ok(Selection::LargestDiagonal),
        "first" | "first_feasible" => Ok(Selection::FirstFeasible),
        other => bail!("unknown selection policy: {other:?}"),
    }
}

/// Returns the canonical name of a selection policy.
pub fn selection_name(selection: Selection) -> &'static str {
    match selection {
        Selection::Uniform => "uniform",
        Selection::LargestDiagonal => "largest",
        Selection::FirstFeasible => "first",
    }
}

/// Builds a validated [`BuildConfig`] from the TOML build section.
pub fn build_config(build: &BuildToml) -> Result<BuildConfig> {
    let cfg = BuildConfig::new()
        .with_selection(parse_selection(&build.selection)?)
        .with_tolerance(build.tolerance);
    cfg.validate().context("invalid [build] configuration")?;
    Ok(cfg)
}
