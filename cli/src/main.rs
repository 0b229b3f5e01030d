// Copyright (c) 2026 ALAS Technology. MIT License.
// See LICENSE for details.

//! # seedtree
//!
//! Entry point for the `seedtree` binary. Parses CLI arguments, initializes
//! logging, runs one command and prints its result as JSON on stdout.
//!
//! - `derive`          derive keypairs for purpose labels from a root secret
//! - `registry check`  validate a registry data file
//! - `decode`          classify and decode a text id
//! - `version`         print build version information

mod cli;
mod logging;

use anyhow::{bail, Context, Result};
use clap::Parser;
use serde_json::{json, Value};

use seedtree::encoding::decode_text;
use seedtree::identity::{Deriver, PurposeLabel, RootSecret};
use seedtree::registry::{Registry, RegistryError};

use cli::{Commands, DecodeArgs, DeriveArgs, RegistryCommand, RegistrySource, SeedtreeCli};

fn main() -> Result<()> {
    let cli = SeedtreeCli::parse();
    logging::init_logging(logging::DEFAULT_FILTER, cli.log_format);

    let output = match cli.command {
        Commands::Derive(args) => derive(args)?,
        Commands::Registry(args) => match args.command {
            RegistryCommand::Check(source) => check_registry(&source)?,
        },
        Commands::Decode(args) => decode(&args)?,
        Commands::Version => {
            print_version();
            return Ok(());
        }
    };

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

fn load_registry(source: &RegistrySource) -> Result<Registry> {
    match &source.registry {
        Some(path) => Registry::from_path(path)
            .with_context(|| format!("failed to load registry from {}", path.display())),
        None => Registry::builtin().context("built-in registry failed validation"),
    }
}

/// Derives every requested label and renders the public halves as feed ids.
fn derive(args: DeriveArgs) -> Result<Value> {
    let registry = load_registry(&args.source)?;

    let (root, generated) = match (args.generate, args.root_secret.as_deref()) {
        (true, None) => (RootSecret::generate(), true),
        (true, Some(_)) => bail!("--generate cannot be combined with a supplied root secret"),
        (false, Some(hex_secret)) => (
            RootSecret::from_hex(hex_secret).context("invalid root secret")?,
            false,
        ),
        (false, None) => bail!("a root secret is required (--root-secret or --generate)"),
    };

    let mut labels: Vec<PurposeLabel> = if args.labels.is_empty() {
        vec![PurposeLabel::metafeed()]
    } else {
        args.labels.iter().map(|l| PurposeLabel::from(l.as_str())).collect()
    };
    labels.extend(PurposeLabel::subfeeds(args.subfeeds));

    let identities = Deriver::new()
        .derive_many(&root, &labels, &args.algorithm)
        .with_context(|| format!("derivation with algorithm {:?} failed", args.algorithm))?;

    let mut rendered = Vec::with_capacity(identities.len());
    for identity in &identities {
        let mut entry = json!({
            "label": identity.label.to_string(),
            "id": identity.keypair.feed_id(&registry)?,
        });
        if args.export {
            entry["keys"] = serde_json::to_value(identity.keypair.export(&registry)?)?;
        }
        rendered.push(entry);
    }

    tracing::info!(count = rendered.len(), generated, "derived identities");

    let mut output = json!({
        "algorithm": args.algorithm,
        "identities": rendered,
    });
    if generated {
        output["root_secret"] = Value::String(root.to_hex());
    }
    Ok(output)
}

/// Loads and validates a registry, reporting every violation on failure.
fn check_registry(source: &RegistrySource) -> Result<Value> {
    let registry = match &source.registry {
        Some(path) => Registry::from_path(path),
        None => Registry::builtin(),
    };
    let registry = match registry {
        Ok(registry) => registry,
        Err(RegistryError::Invalid(invalid)) => {
            for violation in invalid.violations() {
                tracing::error!(%violation, "registry violation");
            }
            bail!(
                "registry is invalid: {} violation(s)",
                invalid.violations().len()
            );
        }
        Err(e) => return Err(e).context("failed to read registry"),
    };

    let formats = registry.all_formats().count();
    Ok(json!({
        "source": source
            .registry
            .as_ref()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "builtin".to_string()),
        "valid": true,
        "types": registry.types().len(),
        "formats": formats,
        "sigils": registry.sigils().iter().map(|s| s.to_string()).collect::<Vec<_>>(),
    }))
}

/// Classifies a text id and shows its codes and payload.
fn decode(args: &DecodeArgs) -> Result<Value> {
    let registry = load_registry(&args.source)?;
    let value = decode_text(&registry, &args.text)
        .with_context(|| format!("cannot decode {:?}", args.text))?;
    let (type_code, format_code) = registry.code_for(&value.type_name, &value.format)?;

    Ok(json!({
        "type": value.type_name,
        "format": value.format,
        "type_code": type_code,
        "format_code": format_code,
        "data_hex": hex::encode(&value.data),
        "data_length": value.data.len(),
    }))
}

fn print_version() {
    println!("seedtree {}", env!("CARGO_PKG_VERSION"));
    println!("domain   {}", seedtree::config::DOMAIN_TAG);
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const BACKUP_HEX: &str = "4e2ce5ca70cd12cc0cee0a5285b61fbc3b5f4042287858e613f9a8bf98a70d39";

    fn derive_args(root_secret: Option<&str>) -> DeriveArgs {
        DeriveArgs {
            root_secret: root_secret.map(str::to_string),
            generate: root_secret.is_none(),
            labels: Vec::new(),
            subfeeds: 0,
            algorithm: "ed25519".to_string(),
            export: false,
            source: RegistrySource::default(),
        }
    }

    #[test]
    fn derive_defaults_to_metafeed() {
        let out = derive(derive_args(Some(BACKUP_HEX))).unwrap();
        let identities = out["identities"].as_array().unwrap();
        assert_eq!(identities.len(), 1);
        assert_eq!(identities[0]["label"], "ssb-meta-feed-seed-v1:metafeed");
        assert!(out.get("root_secret").is_none());
    }

    #[test]
    fn derive_is_deterministic_and_appends_subfeeds() {
        let mut args = derive_args(Some(BACKUP_HEX));
        args.subfeeds = 2;
        let a = derive(args).unwrap();
        let mut args = derive_args(Some(BACKUP_HEX));
        args.subfeeds = 2;
        let b = derive(args).unwrap();
        assert_eq!(a, b);

        let identities = a["identities"].as_array().unwrap();
        assert_eq!(identities.len(), 3);
        assert_eq!(identities[2]["label"], "ssb-meta-feed-seed-v1:subfeed-2");
    }

    #[test]
    fn generated_secret_is_reported() {
        let out = derive(derive_args(None)).unwrap();
        let hex_secret = out["root_secret"].as_str().unwrap();
        let again = derive(derive_args(Some(hex_secret))).unwrap();
        assert_eq!(out["identities"], again["identities"]);
    }

    #[test]
    fn export_includes_keys() {
        let mut args = derive_args(Some(BACKUP_HEX));
        args.export = true;
        let out = derive(args).unwrap();
        let keys = &out["identities"][0]["keys"];
        assert_eq!(keys["curve"], "ed25519");
        assert_eq!(keys["id"], out["identities"][0]["id"]);
    }

    #[test]
    fn unknown_algorithm_is_an_error() {
        let mut args = derive_args(Some(BACKUP_HEX));
        args.algorithm = "rsa".to_string();
        assert!(derive(args).is_err());
    }

    #[test]
    fn generate_with_supplied_secret_is_rejected() {
        let mut args = derive_args(Some(BACKUP_HEX));
        args.generate = true;
        let err = derive(args).unwrap_err();
        assert!(err.to_string().contains("--generate"));
    }

    #[test]
    fn bad_root_secret_is_an_error() {
        assert!(derive(derive_args(Some("abcd"))).is_err());
    }

    #[test]
    fn builtin_registry_checks_out() {
        let out = check_registry(&RegistrySource::default()).unwrap();
        assert_eq!(out["valid"], true);
        assert_eq!(out["sigils"].as_array().unwrap().len(), 3);
    }

    #[test]
    fn invalid_registry_file_fails_check() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"[{{"type":"a","code":1,"formats":[{{"format":"x","code":0}}]}}]"#
        )
        .unwrap();
        let source = RegistrySource {
            registry: Some(file.path().to_path_buf()),
        };
        assert!(check_registry(&source).is_err());
    }

    #[test]
    fn decode_derived_feed_id() {
        let derived = derive(derive_args(Some(BACKUP_HEX))).unwrap();
        let id = derived["identities"][0]["id"].as_str().unwrap().to_string();
        let out = decode(&DecodeArgs {
            text: id,
            source: RegistrySource::default(),
        })
        .unwrap();
        assert_eq!(out["type"], "feed");
        assert_eq!(out["format"], "classic");
        assert_eq!(out["type_code"], 0);
        assert_eq!(out["data_length"], 32);
    }
}
