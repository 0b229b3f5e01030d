//! Structural invariants of a candidate registry.
//!
//! Seven checks, always run in this order and always all of them:
//!
//! 1. `type.code` equals the type's index.
//! 2. `format.code` equals the format's index within its type.
//! 3. Type names are unique.
//! 4. Format names are unique within their type.
//! 5. A sigil belongs to one type entry only.
//! 6. `(sigil, suffix)` is unique over every format that has either.
//! 7. Suffixes of sigil-less formats are unique.
//!
//! Each check reports at most its first violation, so a broken table yields
//! between one and seven violations, in check order.

use crate::registry::entry::TypeEntry;
use std::collections::{HashMap, HashSet};
use std::fmt;
use thiserror::Error;

/// A single broken invariant, naming the entry that broke it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Violation {
    #[error("type {type_name:?} at index {index} has code {code}")]
    TypeCode {
        type_name: String,
        index: usize,
        code: u8,
    },

    #[error("format {format:?} of type {type_name:?} at index {index} has code {code}")]
    FormatCode {
        type_name: String,
        format: String,
        index: usize,
        code: u8,
    },

    #[error("type name {type_name:?} at index {index} is already used at index {first}")]
    DuplicateTypeName {
        type_name: String,
        first: usize,
        index: usize,
    },

    #[error("format name {format:?} appears twice in type {type_name:?}")]
    DuplicateFormatName { type_name: String, format: String },

    #[error("sigil {sigil:?} of type {type_name:?} is already used by type {owner:?}")]
    SigilShared {
        sigil: char,
        owner: String,
        type_name: String,
    },

    #[error(
        "sigil {sigil:?} with suffix {suffix:?} on {type_name:?}/{format:?} is already taken"
    )]
    DuplicateSigilSuffix {
        sigil: Option<char>,
        suffix: Option<String>,
        type_name: String,
        format: String,
    },

    #[error("sigil-less suffix {suffix:?} on {type_name:?}/{format:?} is already taken")]
    DuplicateSuffix {
        suffix: String,
        type_name: String,
        format: String,
    },
}

/// Every violation found in one candidate table. Never empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidRegistry {
    violations: Vec<Violation>,
}

impl InvalidRegistry {
    pub fn first(&self) -> &Violation {
        &self.violations[0]
    }

    pub fn violations(&self) -> &[Violation] {
        &self.violations
    }
}

impl fmt::Display for InvalidRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.first())?;
        if self.violations.len() > 1 {
            write!(f, " (and {} more)", self.violations.len() - 1)?;
        }
        Ok(())
    }
}

impl std::error::Error for InvalidRegistry {}

/// Run all seven checks. `Ok(())` only if every one of them passes.
pub fn validate(types: &[TypeEntry]) -> Result<(), InvalidRegistry> {
    let checks: [fn(&[TypeEntry]) -> Option<Violation>; 7] = [
        check_type_codes,
        check_format_codes,
        check_type_names,
        check_format_names,
        check_sigil_ownership,
        check_sigil_suffix_pairs,
        check_sigilless_suffixes,
    ];
    let violations: Vec<Violation> = checks.iter().filter_map(|check| check(types)).collect();
    if violations.is_empty() {
        Ok(())
    } else {
        Err(InvalidRegistry { violations })
    }
}

fn check_type_codes(types: &[TypeEntry]) -> Option<Violation> {
    types
        .iter()
        .enumerate()
        .find(|(index, ty)| usize::from(ty.code) != *index)
        .map(|(index, ty)| Violation::TypeCode {
            type_name: ty.name.clone(),
            index,
            code: ty.code,
        })
}

fn check_format_codes(types: &[TypeEntry]) -> Option<Violation> {
    types.iter().find_map(|ty| {
        ty.formats
            .iter()
            .enumerate()
            .find(|(index, format)| usize::from(format.code) != *index)
            .map(|(index, format)| Violation::FormatCode {
                type_name: ty.name.clone(),
                format: format.name.clone(),
                index,
                code: format.code,
            })
    })
}

fn check_type_names(types: &[TypeEntry]) -> Option<Violation> {
    let mut seen: HashMap<&str, usize> = HashMap::new();
    for (index, ty) in types.iter().enumerate() {
        if let Some(&first) = seen.get(ty.name.as_str()) {
            return Some(Violation::DuplicateTypeName {
                type_name: ty.name.clone(),
                first,
                index,
            });
        }
        seen.insert(&ty.name, index);
    }
    None
}

fn check_format_names(types: &[TypeEntry]) -> Option<Violation> {
    types.iter().find_map(|ty| {
        let mut seen: HashSet<&str> = HashSet::new();
        ty.formats
            .iter()
            .find(|format| !seen.insert(&format.name))
            .map(|format| Violation::DuplicateFormatName {
                type_name: ty.name.clone(),
                format: format.name.clone(),
            })
    })
}

// Ownership is per entry, not per name: two entries sharing a name are two
// owners.
fn check_sigil_ownership(types: &[TypeEntry]) -> Option<Violation> {
    let mut owners: HashMap<char, usize> = HashMap::new();
    for (index, ty) in types.iter().enumerate() {
        for sigil in ty.formats.iter().filter_map(|f| f.sigil) {
            match owners.get(&sigil) {
                Some(&owner) if owner != index => {
                    return Some(Violation::SigilShared {
                        sigil,
                        owner: types[owner].name.clone(),
                        type_name: ty.name.clone(),
                    });
                }
                Some(_) => {}
                None => {
                    owners.insert(sigil, index);
                }
            }
        }
    }
    None
}

fn check_sigil_suffix_pairs(types: &[TypeEntry]) -> Option<Violation> {
    let mut seen: HashSet<(Option<char>, Option<&str>)> = HashSet::new();
    for ty in types {
        for format in ty.formats.iter().filter(|f| f.has_text_form()) {
            let key = (format.sigil, format.suffix.as_deref());
            if !seen.insert(key) {
                return Some(Violation::DuplicateSigilSuffix {
                    sigil: format.sigil,
                    suffix: format.suffix.clone(),
                    type_name: ty.name.clone(),
                    format: format.name.clone(),
                });
            }
        }
    }
    None
}

fn check_sigilless_suffixes(types: &[TypeEntry]) -> Option<Violation> {
    let mut seen: HashSet<&str> = HashSet::new();
    for ty in types {
        for format in &ty.formats {
            let (None, Some(suffix)) = (format.sigil, format.suffix.as_deref()) else {
                continue;
            };
            if !seen.insert(suffix) {
                return Some(Violation::DuplicateSuffix {
                    suffix: suffix.to_string(),
                    type_name: ty.name.clone(),
                    format: format.name.clone(),
                });
            }
        }
    }
    None
}
