use crate::cli::ScoreArgs;
use crate::error::{CliError, Result};
use budeff::core::forcefield::scoring::DegeneratePolicy;
use budeff::core::spatial::neighbors::SearchStrategy;
use budeff::engine::config as core_config;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::debug;

#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
enum PartialSearchStrategy {
    CellGrid,
    Exhaustive,
}

impl From<PartialSearchStrategy> for SearchStrategy {
    fn from(p: PartialSearchStrategy) -> Self {
        match p {
            PartialSearchStrategy::CellGrid => SearchStrategy::CellGrid,
            PartialSearchStrategy::Exhaustive => SearchStrategy::Exhaustive,
        }
    }
}

#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
enum PartialDegeneratePolicy {
    Skip,
    Fail,
}

impl From<PartialDegeneratePolicy> for DegeneratePolicy {
    fn from(p: PartialDegeneratePolicy) -> Self {
        match p {
            PartialDegeneratePolicy::Skip => DegeneratePolicy::Skip,
            PartialDegeneratePolicy::Fail => DegeneratePolicy::Fail,
        }
    }
}

#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields)]
struct PartialForcefieldConfig {
    path: Option<PathBuf>,
    id: Option<String>,
}

#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields)]
struct PartialScoringConfig {
    cutoff: Option<f64>,
    dielectric: Option<f64>,
    #[serde(rename = "neighbor-search")]
    neighbor_search: Option<PartialSearchStrategy>,
    #[serde(rename = "on-degenerate")]
    on_degenerate: Option<PartialDegeneratePolicy>,
}

#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields)]
pub struct PartialScoreConfig {
    forcefield: Option<PartialForcefieldConfig>,
    scoring: Option<PartialScoringConfig>,
}

/// Fully resolved settings for one `score` invocation.
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub forcefield_path: PathBuf,
    pub forcefield_id: Option<String>,
    pub scoring: core_config::ScoringConfig,
}

impl PartialScoreConfig {
    pub fn from_file(path: &Path) -> Result<Self> {
        debug!("Loading configuration from file: {:?}", path);
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| CliError::FileParsing {
            path: path.to_path_buf(),
            source: e.into(),
        })
    }

    /// Command-line values win over the file; anything left unset falls back to
    /// the library defaults.
    pub fn merge_with_cli(mut self, args: &ScoreArgs) -> Result<AppConfig> {
        let ff_config = self.forcefield.take().unwrap_or_default();
        let scoring_config = self.scoring.take().unwrap_or_default();

        let forcefield_path = args
            .forcefield
            .clone()
            .or(ff_config.path)
            .ok_or_else(|| {
                CliError::Config(
                    "A value for 'forcefield' is required either in the config file or via CLI argument."
                        .to_string(),
                )
            })?;
        let forcefield_id = args.forcefield_id.clone().or(ff_config.id);

        let mut builder = core_config::ScoringConfigBuilder::new();
        if let Some(cutoff) = args.cutoff.or(scoring_config.cutoff) {
            builder = builder.cutoff(cutoff);
        }
        if let Some(dielectric) = args.dielectric.or(scoring_config.dielectric) {
            builder = builder.dielectric(dielectric);
        }

        let strategy = if args.exhaustive {
            SearchStrategy::Exhaustive
        } else {
            scoring_config
                .neighbor_search
                .map(SearchStrategy::from)
                .unwrap_or_default()
        };
        let policy = if args.fail_on_degenerate {
            DegeneratePolicy::Fail
        } else {
            scoring_config
                .on_degenerate
                .map(DegeneratePolicy::from)
                .unwrap_or_default()
        };

        let scoring = builder
            .strategy(strategy)
            .degenerate_policy(policy)
            .build()
            .map_err(|e| CliError::Config(e.to_string()))?;

        Ok(AppConfig {
            forcefield_path,
            forcefield_id,
            scoring,
        })
    }
}

/// Loads the optional config file named in `args` and merges it with the
/// command line.
pub fn build_config(args: &ScoreArgs) -> Result<AppConfig> {
    let partial = match &args.config {
        Some(path) => PartialScoreConfig::from_file(path)?,
        None => PartialScoreConfig::default(),
    };
    partial.merge_with_cli(args)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::{Cli, Commands};
    use clap::Parser;
    use std::fs;
    use tempfile::tempdir;

    fn parse_score_args(extra: &[&str]) -> ScoreArgs {
        let mut argv = vec!["budeff", "score", "-a", "atoms.csv"];
        argv.extend_from_slice(extra);
        match Cli::parse_from(argv).command {
            Commands::Score(args) => args,
        }
    }

    #[test]
    fn cli_only_configuration_uses_library_defaults() {
        let args = parse_score_args(&["-f", "bude_2016v1.json"]);
        let config = build_config(&args).unwrap();

        assert_eq!(config.forcefield_path, PathBuf::from("bude_2016v1.json"));
        assert_eq!(config.forcefield_id, None);
        assert_eq!(config.scoring, core_config::ScoringConfig::default());
    }

    #[test]
    fn file_values_are_loaded_and_merged() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("score.toml");
        fs::write(
            &config_path,
            r#"
            [forcefield]
            path = "forcefields"
            id = "bude_2015v1"

            [scoring]
            cutoff = 9.5
            dielectric = 2.0
            neighbor-search = "exhaustive"
            on-degenerate = "fail"
            "#,
        )
        .unwrap();

        let args = parse_score_args(&["-c", config_path.to_str().unwrap()]);
        let config = build_config(&args).unwrap();

        assert_eq!(config.forcefield_path, PathBuf::from("forcefields"));
        assert_eq!(config.forcefield_id.as_deref(), Some("bude_2015v1"));
        assert_eq!(config.scoring.cutoff, Some(9.5));
        assert_eq!(config.scoring.dielectric, 2.0);
        assert_eq!(config.scoring.strategy, SearchStrategy::Exhaustive);
        assert_eq!(config.scoring.degenerate_policy, DegeneratePolicy::Fail);
    }

    #[test]
    fn cli_args_override_file_values() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("score.toml");
        fs::write(
            &config_path,
            r#"
            [forcefield]
            path = "from-file.json"

            [scoring]
            cutoff = 9.5
            dielectric = 2.0
            "#,
        )
        .unwrap();

        let args = parse_score_args(&[
            "-c",
            config_path.to_str().unwrap(),
            "-f",
            "from-cli.json",
            "--cutoff",
            "6.0",
            "--exhaustive",
        ]);
        let config = build_config(&args).unwrap();

        assert_eq!(config.forcefield_path, PathBuf::from("from-cli.json"));
        assert_eq!(config.scoring.cutoff, Some(6.0));
        assert_eq!(config.scoring.dielectric, 2.0);
        assert_eq!(config.scoring.strategy, SearchStrategy::Exhaustive);
    }

    #[test]
    fn missing_forcefield_returns_error() {
        let args = parse_score_args(&[]);
        let result = build_config(&args);
        assert!(matches!(result, Err(CliError::Config(_))));
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("score.toml");
        fs::write(&config_path, "[scoring]\nsteric-weight = 2.0\n").unwrap();

        let result = PartialScoreConfig::from_file(&config_path);
        assert!(matches!(result, Err(CliError::FileParsing { .. })));
    }

    #[test]
    fn invalid_values_are_reported_as_config_errors() {
        let args = parse_score_args(&["-f", "ff.json", "--dielectric", "0"]);
        let result = build_config(&args);
        assert!(matches!(result, Err(CliError::Config(_))));
    }
}
