//! Reproducibility information attached to every report.

use serde::{Deserialize, Serialize};

/// Schema version of the JSON report.
pub const SCHEMA_VERSION: &str = "0.1.0";

/// Information for reproducing a sweep.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReproducibilityInfo {
    /// Brigade version used.
    pub brigade_version: String,
    /// CLI arguments used for this run.
    pub cli_args: Vec<String>,
    /// Schema version of the output format.
    pub schema_version: String,
    /// Seed of the verifier's sampled inputs.
    pub verifier_seed: u64,
    /// Base seed of stress injection.
    pub stress_seed: u64,
}

impl ReproducibilityInfo {
    /// Capture the current context.
    pub fn capture(cli_args: &[String], verifier_seed: u64, stress_seed: u64) -> Self {
        Self {
            brigade_version: env!("CARGO_PKG_VERSION").to_string(),
            cli_args: cli_args.to_vec(),
            schema_version: SCHEMA_VERSION.into(),
            verifier_seed,
            stress_seed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reproducibility_capture() {
        let args = vec![
            "brigade".into(),
            "sweep".into(),
            "--config".into(),
            "sweep.yaml".into(),
        ];
        let info = ReproducibilityInfo::capture(&args, 42, 7);

        assert!(!info.brigade_version.is_empty());
        assert_eq!(info.cli_args.len(), 4);
        assert_eq!(info.schema_version, "0.1.0");
        assert_eq!((info.verifier_seed, info.stress_seed), (42, 7));
    }
}
