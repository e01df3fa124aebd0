//! Check command: re-verify matrices from a generated document.

use anyhow::{Context, Result, bail};
use tracing::{info, info_span, warn};

use invspec_stochastic::{
    NEGATIVITY_TOLERANCE, ROW_SUM_TOLERANCE, Spectrum, eigenvalues, get_valid_spectrum,
    spectral_rmsd, validate_stochastic,
};

use crate::cli::CheckArgs;
use crate::output::{self, CheckOutput, GenerateOutput, MatrixEntry, MatrixReport};

/// Run the standalone verification.
pub fn run(args: CheckArgs) -> Result<()> {
    let _cmd = info_span!("check").entered();

    // 1. Read the document
    let text = std::fs::read_to_string(&args.input)
        .with_context(|| format!("failed to read input: {}", args.input.display()))?;
    let doc: GenerateOutput =
        serde_json::from_str(&text).context("failed to parse matrix document")?;
    info!(
        path = %args.input.display(),
        n_matrices = doc.matrices.len(),
        "document loaded"
    );

    // 2. Verify
    let tolerance = args.tolerance.unwrap_or(doc.tolerance);
    let report = check(&doc, tolerance)?;

    // 3. Write report
    let json = output::to_json(&report)?;
    output::write_json(args.output.as_deref(), &json)?;

    if report.n_failed > 0 {
        bail!(
            "{} of {} matrices failed verification",
            report.n_failed,
            report.n_matrices
        );
    }
    Ok(())
}

/// Verifies every matrix of a document against its recorded spectrum.
pub fn check(doc: &GenerateOutput, tolerance: f64) -> Result<CheckOutput> {
    if !tolerance.is_finite() || tolerance <= 0.0 {
        bail!("tolerance must be finite and positive, got {tolerance}");
    }
    let spectrum =
        get_valid_spectrum(&doc.eigenvalues).context("document lists an invalid spectrum")?;

    let reports: Vec<MatrixReport> = doc
        .matrices
        .iter()
        .map(|entry| check_matrix(entry, &spectrum, tolerance))
        .collect();
    let n_failed = reports.iter().filter(|r| !r.passed).count();

    Ok(CheckOutput {
        tolerance,
        n_matrices: reports.len(),
        n_failed,
        reports,
    })
}

/// Verifies one entry. Malformed entries become failed reports, never errors.
fn check_matrix(entry: &MatrixEntry, spectrum: &Spectrum, tolerance: f64) -> MatrixReport {
    let matrix = match output::from_rows(&entry.matrix) {
        Ok(matrix) => matrix,
        Err(e) => {
            warn!(index = entry.index, error = %e, "malformed matrix");
            return MatrixReport {
                index: entry.index,
                dim: entry.matrix.len(),
                stochastic: false,
                stochastic_error: Some(format!("{e:#}")),
                rmsd: None,
                passed: false,
                eigenvalues: Vec::new(),
            };
        }
    };

    // Non-square input has no eigenvalues; validation below reports why.
    let evs = eigenvalues(&matrix).unwrap_or_default();
    let stochastic = validate_stochastic(&matrix, ROW_SUM_TOLERANCE, NEGATIVITY_TOLERANCE);
    let rmsd = spectral_rmsd(&matrix, spectrum).ok();
    let passed = stochastic.is_ok() && rmsd.is_some_and(|d| d <= tolerance);
    if !passed {
        warn!(index = entry.index, ?rmsd, "matrix failed verification");
    }

    MatrixReport {
        index: entry.index,
        dim: matrix.nrows(),
        stochastic: stochastic.is_ok(),
        stochastic_error: stochastic.err().map(|e| e.to_string()),
        rmsd,
        passed,
        eigenvalues: evs.iter().map(|ev| [ev.re, ev.im]).collect(),
    }
}
