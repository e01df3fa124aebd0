use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::cli::GenerateArgs;

/// Top-level invspec configuration.
#[derive(Debug, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct InvspecConfig {
    /// Global RNG seed.
    #[serde(default)]
    pub seed: Option<u64>,

    /// Requested spectrum.
    #[serde(default)]
    pub spectrum: SpectrumToml,

    /// Construction settings.
    #[serde(default)]
    pub build: BuildToml,

    /// Output settings.
    #[serde(default)]
    pub output: OutputToml,
}

impl InvspecConfig {
    /// Reads and parses a TOML configuration file.
    pub fn load(path: &Path) -> Result<Self> {
        let toml_str = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file: {}", path.display()))?;
        toml::from_str(&toml_str).context("failed to parse TOML config")
    }

    /// Applies command-line overrides on top of file values.
    pub fn apply_overrides(&mut self, args: &GenerateArgs) {
        if let Some(seed) = args.seed {
            self.seed = Some(seed);
        }
        if let Some(eigenvalues) = &args.eigenvalues {
            self.spectrum.eigenvalues = Some(eigenvalues.clone());
        }
        if let Some(count) = args.count {
            self.build.count = count;
        }
        if let Some(selection) = &args.selection {
            self.build.selection = selection.clone();
        }
        if let Some(path) = &args.output {
            self.output.path = Some(path.clone());
        }
    }
}

#[derive(Debug, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct SpectrumToml {
    /// Non-trivial eigenvalues; `None` when neither file nor CLI set them.
    #[serde(default)]
    pub eigenvalues: Option<Vec<f64>>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BuildToml {
    #[serde(default = "default_selection")]
    pub selection: String,
    #[serde(default = "default_tolerance")]
    pub tolerance: f64,
    #[serde(default = "default_count")]
    pub count: usize,
}

impl Default for BuildToml {
    fn default() -> Self {
        Self {
            selection: default_selection(),
            tolerance: default_tolerance(),
            count: default_count(),
        }
    }
}

fn default_selection() -> String {
    "uniform".to_string()
}
fn default_tolerance() -> f64 {
    invspec_stochastic::DEFAULT_TOLERANCE
}
fn default_count() -> usize {
    1
}

#[derive(Debug, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct OutputToml {
    pub path: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_uses_defaults() {
        let cfg: InvspecConfig = toml::from_str("").unwrap();
        assert!(cfg.seed.is_none());
        assert!(cfg.spectrum.eigenvalues.is_none());
        assert_eq!(cfg.build.selection, "uniform");
        assert_eq!(cfg.build.tolerance, 1e-10);
        assert_eq!(cfg.build.count, 1);
        assert!(cfg.output.path.is_none());
    }

    #[test]
    fn full_file() {
        let cfg: InvspecConfig = toml::from_str(
            r#"
            seed = 123

            [spectrum]
            eigenvalues = [0.9, 0.8]

            [build]
            selection = "largest"
            tolerance = 1e-9
            count = 4

            [output]
            path = "out.json"
            "#,
        )
        .unwrap();
        assert_eq!(cfg.seed, Some(123));
        assert_eq!(cfg.spectrum.eigenvalues, Some(vec![0.9, 0.8]));
        assert_eq!(cfg.build.selection, "largest");
        assert_eq!(cfg.build.tolerance, 1e-9);
        assert_eq!(cfg.build.count, 4);
        assert_eq!(cfg.output.path, Some(PathBuf::from("out.json")));
    }

    #[test]
    fn unknown_field_rejected() {
        let result: Result<InvspecConfig, _> = toml::from_str("[build]\nsplits = 3\n");
        assert!(result.is_err());
    }

    #[test]
    fn overrides_win() {
        let mut cfg: InvspecConfig =
            toml::from_str("seed = 1\n[spectrum]\neigenvalues = [0.5]\n").unwrap();
        let args = GenerateArgs {
            eigenvalues: Some(vec![0.3, 0.2]),
            seed: Some(9),
            count: Some(2),
            selection: Some("first".to_string()),
            ..Default::default()
        };
        cfg.apply_overrides(&args);
        assert_eq!(cfg.seed, Some(9));
        assert_eq!(cfg.spectrum.eigenvalues, Some(vec![0.3, 0.2]));
        assert_eq!(cfg.build.count, 2);
        assert_eq!(cfg.build.selection, "first");
        assert!(cfg.output.path.is_none());
    }

    #[test]
    fn load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("invspec.toml");
        std::fs::write(&path, "seed = 5\n").unwrap();
        let cfg = InvspecConfig::load(&path).unwrap();
        assert_eq!(cfg.seed, Some(5));
    }

    #[test]
    fn load_missing_file() {
        let result = InvspecConfig::load(Path::new("/nonexistent/invspec.toml"));
        assert!(result.is_err());
    }
}
