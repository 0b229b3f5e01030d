//! # CLI Interface
//!
//! Argument structure for the `seedtree` binary, built with `clap` derive.
//! Subcommands: `derive`, `registry check`, `decode` and `version`.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::logging::LogFormat;

/// Deterministic identity hierarchies from one root secret.
///
/// Derives Ed25519 keypairs for purpose labels, renders them as feed ids
/// through the type-tag registry, and checks or queries registry data.
#[derive(Parser, Debug)]
#[command(
    name = "seedtree",
    about = "Derive identity hierarchies and inspect the type-tag registry",
    version,
    propagate_version = true
)]
pub struct SeedtreeCli {
    /// Log output format (logs go to stderr).
    #[arg(long, global = true, value_enum, default_value_t = LogFormat::Pretty)]
    pub log_format: LogFormat,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Derive keypairs for purpose labels and print their feed ids.
    Derive(DeriveArgs),
    /// Registry data file operations.
    Registry(RegistryArgs),
    /// Classify and decode a sigil/suffix text id.
    Decode(DecodeArgs),
    /// Print version information and exit.
    Version,
}

/// Where to load the registry from. Defaults to the built-in table.
#[derive(Args, Debug, Clone, Default)]
pub struct RegistrySource {
    /// Path to a registry JSON data file.
    #[arg(long, env = "SEEDTREE_REGISTRY")]
    pub registry: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub struct DeriveArgs {
    /// Hex-encoded 32-byte root secret.
    ///
    /// Prefer the environment variable over the flag so the secret stays
    /// out of shell history.
    #[arg(
        long,
        env = "SEEDTREE_ROOT_SECRET",
        hide_env_values = true,
        required_unless_present = "generate"
    )]
    pub root_secret: Option<String>,

    /// Draw a fresh root secret from the OS RNG and print it with the result.
    ///
    /// Cannot be combined with a root secret, including one set through
    /// `SEEDTREE_ROOT_SECRET`.
    #[arg(long, conflicts_with = "root_secret")]
    pub generate: bool,

    /// Purpose label to derive. Repeatable. Without any, the metafeed label
    /// is used.
    #[arg(long = "label", short = 'l')]
    pub labels: Vec<String>,

    /// Also derive `subfeed-1` through `subfeed-N`.
    #[arg(long, default_value_t = 0)]
    pub subfeeds: u32,

    /// Keypair algorithm.
    #[arg(long, default_value = seedtree::config::DEFAULT_ALGORITHM)]
    pub algorithm: String,

    /// Include the full exported keys (private half included) in the output.
    #[arg(long)]
    pub export: bool,

    #[command(flatten)]
    pub source: RegistrySource,
}

#[derive(Args, Debug)]
pub struct RegistryArgs {
    #[command(subcommand)]
    pub command: RegistryCommand,
}

#[derive(Subcommand, Debug)]
pub enum RegistryCommand {
    /// Validate a registry data file and print a summary.
    Check(RegistrySource),
}

#[derive(Args, Debug)]
pub struct DecodeArgs {
    /// Text id, e.g. `@<base64>.ed25519`.
    pub text: String,

    #[command(flatten)]
    pub source: RegistrySource,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn verify_cli_structure() {
        SeedtreeCli::command().debug_assert();
    }

    #[test]
    fn derive_with_generate_needs_no_secret() {
        let cli = SeedtreeCli::try_parse_from(["seedtree", "derive", "--generate", "--subfeeds", "3"])
            .unwrap();
        match cli.command {
            Commands::Derive(args) => {
                assert!(args.generate);
                assert_eq!(args.subfeeds, 3);
                assert_eq!(args.algorithm, "ed25519");
                assert!(args.labels.is_empty());
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn repeated_labels_are_collected() {
        let cli = SeedtreeCli::try_parse_from([
            "seedtree",
            "derive",
            "--root-secret",
            "00",
            "-l",
            "a",
            "--label",
            "b",
        ])
        .unwrap();
        let Commands::Derive(args) = cli.command else {
            panic!("expected derive");
        };
        assert_eq!(args.labels, vec!["a".to_string(), "b".to_string()]);
    }

    #[test]
    fn generate_conflicts_with_root_secret() {
        let err = SeedtreeCli::try_parse_from([
            "seedtree",
            "derive",
            "--generate",
            "--root-secret",
            "00",
        ])
        .unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::ArgumentConflict);
    }

    #[test]
    fn log_format_is_global() {
        let cli = SeedtreeCli::try_parse_from([
            "seedtree",
            "registry",
            "check",
            "--log-format",
            "json",
        ])
        .unwrap();
        assert_eq!(cli.log_format, LogFormat::Json);
    }
}
