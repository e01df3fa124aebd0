//! Generate command: construct stochastic matrices for a spectrum.

use anyhow::{Context, Result, bail};
use tracing::{debug, info, info_span};

use invspec_stochastic::{make_rng, stochastic_matrices};

use crate::cli::GenerateArgs;
use crate::config::InvspecConfig;
use crate::convert;
use crate::output::{self, GenerateOutput, MatrixEntry};

/// Run the generation pipeline.
pub fn run(args: GenerateArgs) -> Result<()> {
    let _cmd = info_span!("generate").entered();

    // 1. Load config and apply CLI overrides
    let mut config = match &args.config {
        Some(path) => InvspecConfig::load(path)?,
        None => InvspecConfig::default(),
    };
    config.apply_overrides(&args);

    // 2. Construct
    let doc = generate(&config)?;

    // 3. Write JSON
    let json = output::to_json(&doc)?;
    output::write_json(config.output.path.as_deref(), &json)
}

/// Builds the output document for a resolved configuration.
pub fn generate(config: &InvspecConfig) -> Result<GenerateOutput> {
    let eigenvalues = config.spectrum.eigenvalues.as_ref().ok_or_else(|| {
        anyhow::anyhow!("no eigenvalues: set [spectrum].eigenvalues in config or use --eigenvalues")
    })?;
    let build_cfg = convert::build_config(&config.build)?;
    let count = config.build.count;
    if count == 0 {
        bail!("count must be at least 1");
    }

    let sampler = stochastic_matrices(eigenvalues, &build_cfg, make_rng(config.seed))
        .context("invalid spectrum")?;
    let spectrum = sampler.spectrum().values().to_vec();
    info!(
        n_eigenvalues = spectrum.len(),
        count,
        seed = ?config.seed,
        "constructing matrices"
    );

    // `count` is user input; let the vector grow rather than reserving it.
    let matrices = sampler
        .take(count)
        .enumerate()
        .map(|(index, result)| -> Result<MatrixEntry> {
            let sample = result.with_context(|| format!("failed to construct matrix {index}"))?;
            debug!(index, rmsd = sample.rmsd(), "matrix constructed");
            Ok(MatrixEntry::new(index, &sample))
        })
        .collect::<Result<Vec<_>>>()?;
    info!(n_matrices = matrices.len(), "construction complete");

    Ok(GenerateOutput {
        eigenvalues: spectrum,
        seed: config.seed,
        selection: convert::selection_name(build_cfg.selection()).to_string(),
        tolerance: build_cfg.tolerance(),
        matrices,
    })
}
