//! The validated, read-only registry and its lookups.

use crate::config::BUILTIN_REGISTRY_JSON;
use crate::registry::entry::{Format, TypeEntry};
use crate::registry::validate::{validate, InvalidRegistry};
use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// What a failed lookup was looking for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Lookup {
    Sigil(char),
    SigilSuffix { sigil: char, suffix: Option<String> },
    Suffix(String),
    Name { type_name: String, format: String },
    Code { type_code: u8, format_code: u8 },
}

impl fmt::Display for Lookup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Lookup::Sigil(sigil) => write!(f, "sigil {sigil:?}"),
            Lookup::SigilSuffix { sigil, suffix } => {
                write!(f, "sigil {sigil:?} with suffix {suffix:?}")
            }
            Lookup::Suffix(suffix) => write!(f, "suffix {suffix:?}"),
            Lookup::Name { type_name, format } => write!(f, "{type_name}/{format}"),
            Lookup::Code {
                type_code,
                format_code,
            } => write!(f, "code {type_code}/{format_code}"),
        }
    }
}

#[derive(Debug, Error)]
pub enum RegistryError {
    /// The candidate table broke at least one structural invariant. No
    /// registry was built.
    #[error("registry invalid: {0}")]
    Invalid(#[from] InvalidRegistry),

    /// A lookup missed. Recoverable; the registry itself is fine.
    #[error("no registry entry for {0}")]
    NotFound(Lookup),

    #[error("registry data is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("failed to read registry file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// A type/format pair resolved against a registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormatRef<'a> {
    pub type_entry: &'a TypeEntry,
    pub format: &'a Format,
}

impl<'a> FormatRef<'a> {
    pub fn type_name(&self) -> &'a str {
        &self.type_entry.name
    }

    pub fn format_name(&self) -> &'a str {
        &self.format.name
    }

    /// `(type.code, format.code)`, the binary tag.
    pub fn codes(&self) -> (u8, u8) {
        (self.type_entry.code, self.format.code)
    }
}

impl fmt::Display for FormatRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.type_entry.name, self.format.name)
    }
}

/// The type-tag registry.
///
/// Only obtainable through [`Registry::load`] (or the JSON front ends that
/// call it), so every instance in existence has passed validation. There is
/// no mutation API; share it behind an `Arc` and read it from anywhere.
#[derive(Debug, Clone)]
pub struct Registry {
    types: Vec<TypeEntry>,
    type_index: HashMap<String, usize>,
    sigil_owner: HashMap<char, usize>,
    sigilless_suffix: HashMap<String, (usize, usize)>,
}

impl Registry {
    /// Validate `entries` and, only if every invariant holds, freeze them.
    pub fn load(entries: Vec<TypeEntry>) -> Result<Self, RegistryError> {
        if let Err(invalid) = validate(&entries) {
            tracing::debug!(
                violations = invalid.violations().len(),
                first = %invalid.first(),
                "rejected registry"
            );
            return Err(invalid.into());
        }

        let mut type_index = HashMap::new();
        let mut sigil_owner = HashMap::new();
        let mut sigilless_suffix = HashMap::new();
        for (ti, ty) in entries.iter().enumerate() {
            type_index.insert(ty.name.clone(), ti);
            for (fi, format) in ty.formats.iter().enumerate() {
                match (format.sigil, &format.suffix) {
                    (Some(sigil), _) => {
                        sigil_owner.entry(sigil).or_insert(ti);
                    }
                    (None, Some(suffix)) => {
                        sigilless_suffix.insert(suffix.clone(), (ti, fi));
                    }
                    (None, None) => {}
                }
            }
        }

        tracing::debug!(
            types = entries.len(),
            sigils = sigil_owner.len(),
            "registry loaded"
        );

        Ok(Self {
            types: entries,
            type_index,
            sigil_owner,
            sigilless_suffix,
        })
    }

    pub fn from_json(json: &str) -> Result<Self, RegistryError> {
        let entries: Vec<TypeEntry> = serde_json::from_str(json)?;
        Self::load(entries)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, RegistryError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| RegistryError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&json)
    }

    /// The table compiled into the crate.
    pub fn builtin() -> Result<Self, RegistryError> {
        Self::from_json(BUILTIN_REGISTRY_JSON)
    }

    pub fn types(&self) -> &[TypeEntry] {
        &self.types
    }

    pub fn get_type(&self, name: &str) -> Option<&TypeEntry> {
        self.type_index.get(name).map(|&i| &self.types[i])
    }

    /// Distinct sigils, in table order.
    pub fn sigils(&self) -> Vec<char> {
        let mut sigils = Vec::new();
        for sigil in self.all_formats().filter_map(|r| r.format.sigil) {
            if !sigils.contains(&sigil) {
                sigils.push(sigil);
            }
        }
        sigils
    }

    /// Every `(type, format)` pair, in code order.
    pub fn all_formats(&self) -> impl Iterator<Item = FormatRef<'_>> {
        self.types.iter().flat_map(|ty| {
            ty.formats.iter().map(move |format| FormatRef {
                type_entry: ty,
                format,
            })
        })
    }

    /// The lowest-coded format carrying `sigil`.
    pub fn classify_by_sigil(&self, sigil: char) -> Result<FormatRef<'_>, RegistryError> {
        self.formats_with_sigil(sigil)
            .next()
            .ok_or(RegistryError::NotFound(Lookup::Sigil(sigil)))
    }

    /// The exact format for a sigil-prefixed text form.
    pub fn classify_by_sigil_and_suffix(
        &self,
        sigil: char,
        suffix: Option<&str>,
    ) -> Result<FormatRef<'_>, RegistryError> {
        self.formats_with_sigil(sigil)
            .find(|r| r.format.suffix.as_deref() == suffix)
            .ok_or_else(|| {
                RegistryError::NotFound(Lookup::SigilSuffix {
                    sigil,
                    suffix: suffix.map(str::to_string),
                })
            })
    }

    /// The sigil-less format with exactly this suffix.
    pub fn classify_by_suffix(&self, suffix: &str) -> Result<FormatRef<'_>, RegistryError> {
        self.sigilless_suffix
            .get(suffix)
            .map(|&(ti, fi)| self.at(ti, fi))
            .ok_or_else(|| RegistryError::NotFound(Lookup::Suffix(suffix.to_string())))
    }

    /// All formats of the owning type that carry `sigil`, in code order.
    pub fn formats_with_sigil(&self, sigil: char) -> impl Iterator<Item = FormatRef<'_>> {
        self.sigil_owner
            .get(&sigil)
            .map(|&ti| &self.types[ti])
            .into_iter()
            .flat_map(move |ty| {
                ty.formats
                    .iter()
                    .filter(move |f| f.sigil == Some(sigil))
                    .map(move |format| FormatRef {
                        type_entry: ty,
                        format,
                    })
            })
    }

    /// Formats disambiguated by suffix alone.
    pub fn sigilless_suffixed(&self) -> impl Iterator<Item = FormatRef<'_>> {
        self.all_formats()
            .filter(|r| r.format.sigil.is_none() && r.format.suffix.is_some())
    }

    pub fn resolve(&self, type_name: &str, format: &str) -> Result<FormatRef<'_>, RegistryError> {
        self.get_type(type_name)
            .and_then(|ty| {
                ty.formats
                    .iter()
                    .find(|f| f.name == format)
                    .map(|f| FormatRef {
                        type_entry: ty,
                        format: f,
                    })
            })
            .ok_or_else(|| {
                RegistryError::NotFound(Lookup::Name {
                    type_name: type_name.to_string(),
                    format: format.to_string(),
                })
            })
    }

    /// The stable numeric pair used on the binary wire.
    pub fn code_for(&self, type_name: &str, format: &str) -> Result<(u8, u8), RegistryError> {
        self.resolve(type_name, format).map(|r| r.codes())
    }

    /// Reverse of [`code_for`](Self::code_for).
    pub fn by_code(&self, type_code: u8, format_code: u8) -> Result<FormatRef<'_>, RegistryError> {
        let (ti, fi) = (usize::from(type_code), usize::from(format_code));
        match self.types.get(ti) {
            Some(ty) if fi < ty.formats.len() => Ok(self.at(ti, fi)),
            _ => Err(RegistryError::NotFound(Lookup::Code {
                type_code,
                format_code,
            })),
        }
    }

    fn at(&self, ti: usize, fi: usize) -> FormatRef<'_> {
        let ty = &self.types[ti];
        FormatRef {
            type_entry: ty,
            format: &ty.formats[fi],
        }
    }
}
