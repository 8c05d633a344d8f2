//! Naming conventions for generated types and files
//!
//! Two schemas are supported. In library mode a package holds one generic and
//! its variants are named after the parameter type (`stack.Int`, file `int.go`).
//! In application mode a package holds one custom type and its variants are
//! named after the generic (`foobar.Stack`, file `stack.go`).

use std::path::Path;

/// Prefix of the concrete type alias (`genT` -> `genInt`)
pub const ALIAS_PREFIX: &str = "gen";

/// Naming schema
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    Library,
    #[default]
    Application,
}

impl Mode {
    pub fn from_lib_flag(lib: bool) -> Self {
        if lib {
            Mode::Library
        } else {
            Mode::Application
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Mode::Library => "library",
            Mode::Application => "application",
        }
    }
}

/// Names derived for one instantiation
///
/// The alias is always title-cased (`int8` -> `genInt8`). In library mode
/// `AnyT` takes the parameter type exactly as given (`int8` stays `int8`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Naming {
    /// Replacement for `genT`
    pub alias: String,
    /// Replacement for `AnyT`
    pub type_name: String,
    /// Output file name inside the destination package
    pub file_name: String,
}

impl Naming {
    /// Derive names for parametrising `generic` (template base name) with `kind`
    pub fn derive(generic: &str, kind: &str, mode: Mode) -> Self {
        let (type_name, file_name) = match mode {
            Mode::Library => (kind.to_string(), format!("{}.go", kind.to_lowercase())),
            Mode::Application => (title(generic), format!("{}.go", generic)),
        };

        Self {
            alias: alias_name(kind),
            type_name,
            file_name,
        }
    }
}

/// Concrete alias name for a parameter type
pub fn alias_name(kind: &str) -> String {
    format!("{}{}", ALIAS_PREFIX, title(kind))
}

/// Base name of a template path without its extension (`stream/stream.go` -> `stream`)
pub fn generic_name(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// Upper-case the first letter of every word, as Go's `strings.Title` does.
///
/// A word starts after an ASCII character that is not a letter, digit or `_`,
/// or after non-ASCII whitespace, so `int8` becomes `Int8` and `pkg.item`
/// becomes `Pkg.Item`.
pub fn title(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut prev_separator = true;

    for c in s.chars() {
        if prev_separator {
            out.extend(c.to_uppercase());
        } else {
            out.push(c);
        }
        prev_separator = is_separator(c);
    }

    out
}

fn is_separator(c: char) -> bool {
    if c.is_ascii() {
        !(c.is_ascii_alphanumeric() || c == '_')
    } else {
        c.is_whitespace()
    }
}
