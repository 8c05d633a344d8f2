//! Destination package discovery
//!
//! The generated file lands in a Go package directory (normally the directory
//! `go generate` runs in). Its package name comes from `--package`, then
//! `$GOPACKAGE`, then the `package` clause of the Go sources already there.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::error::{Error, Result};
use crate::template::find_package_clause;

/// Package the generated file is written into
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Destination {
    /// Package directory
    pub dir: PathBuf,
    /// Package name
    pub package: String,
}

impl Destination {
    /// Resolve the destination package for `dir`
    pub fn resolve(dir: &Path, package: Option<&str>) -> Result<Self> {
        let from_env = env::var("GOPACKAGE").ok();
        Self::resolve_with(dir, package, from_env.as_deref())
    }

    fn resolve_with(dir: &Path, package: Option<&str>, from_env: Option<&str>) -> Result<Self> {
        if !dir.is_dir() {
            return Err(Error::Configuration(format!(
                "destination is not a directory: {}",
                dir.display()
            )));
        }

        let explicit = package
            .or(from_env)
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .map(str::to_string);

        let package = match explicit {
            Some(name) => name,
            None => scan_package(dir)?.ok_or_else(|| {
                Error::Configuration(format!("no buildable Go source files in {}", dir.display()))
            })?,
        };

        Ok(Self {
            dir: dir.to_path_buf(),
            package,
        })
    }

    /// Full path of a file inside the package
    pub fn join(&self, file_name: &str) -> PathBuf {
        self.dir.join(file_name)
    }
}

/// Whether the Go tool would build this file as part of the package
fn is_package_source(name: &str) -> bool {
    name.ends_with(".go")
        && !name.ends_with("_test.go")
        && !name.starts_with('_')
        && !name.starts_with('.')
}

/// Package name declared by the first Go source in `dir`
fn scan_package(dir: &Path) -> Result<Option<String>> {
    let entries = WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .filter(|e| e.file_name().to_str().is_some_and(is_package_source));

    for entry in entries {
        let path = entry.path();
        let content = fs::read_to_string(path).map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        })?;

        if let Some((_, _, name)) = find_package_clause(&content) {
            let name = name.strip_suffix("_test").unwrap_or(name);
            tracing::debug!(file = %path.display(), package = name, "package discovered");
            return Ok(Some(name.to_string()));
        }
    }

    Ok(None)
}
