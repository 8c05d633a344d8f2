//! Template search root resolution
//!
//! Generic templates are addressed by import path (`github.com/fogfish/golem/stream/stream.go`)
//! and resolved under `<root>/src`, mirroring a GOPATH workspace.

use std::env;
use std::ffi::OsString;
use std::path::{Path, PathBuf};

/// Root directory under which `src/<generic>` is looked up
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRoot {
    pub root: PathBuf,
}

impl SearchRoot {
    /// Resolve from an explicit flag, then `$GOPATH`, then `~/go`
    pub fn resolve(flag: Option<&Path>) -> Self {
        Self::resolve_with(flag, env::var_os("GOPATH"), dirs::home_dir())
    }

    fn resolve_with(flag: Option<&Path>, gopath: Option<OsString>, home: Option<PathBuf>) -> Self {
        if let Some(root) = flag {
            return Self {
                root: root.to_path_buf(),
            };
        }

        // GOPATH may be a list; the first entry wins
        let from_env = gopath
            .as_deref()
            .and_then(|list| env::split_paths(list).find(|p| !p.as_os_str().is_empty()));

        let root = from_env.unwrap_or_else(|| home.unwrap_or_else(|| PathBuf::from("~")).join("go"));

        Self { root }
    }

    /// Location of a generic template
    ///
    /// An absolute `generic` is returned unchanged.
    pub fn locate(&self, generic: &Path) -> PathBuf {
        self.root.join("src").join(generic)
    }
}
