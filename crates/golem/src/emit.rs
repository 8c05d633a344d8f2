//! Writing generated sources
//!
//! Every generated file starts with a provenance header:
//!
//! ```text
//! // Code generated by `golem` package
//! // Source: github.com/fogfish/golem/stack/stack.go
//! // Time: 2019-06-01 10:00:00 UTC
//! ```
//!
//! Regeneration overwrites the file in place; there is no temp-file swap.

use chrono::{DateTime, Utc};
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// First line of every generated file
pub const GENERATED_MARKER: &str = "// Code generated by `golem` package";

/// Header and body of a generated file
pub fn render_output(body: &str, source: &str, time: DateTime<Utc>) -> String {
    let mut out = String::with_capacity(body.len() + 128);
    out.push_str(GENERATED_MARKER);
    out.push('\n');
    out.push_str(&format!("// Source: {}\n", source));
    out.push_str(&format!("// Time: {}\n\n", time));
    out.push_str(body);
    out
}

/// Write a generated file to `dir/file_name`, returning its path
pub fn emit(
    body: &str,
    source: &str,
    dir: &Path,
    file_name: &str,
    time: DateTime<Utc>,
) -> Result<PathBuf> {
    let path = dir.join(file_name);
    let output = render_output(body, source, time);

    let write_err = |source| Error::Write {
        path: path.clone(),
        source,
    };

    let mut options = OpenOptions::new();
    options.write(true).create(true).truncate(true);

    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(0o666);
    }

    let mut file = options.open(&path).map_err(write_err)?;
    file.write_all(output.as_bytes()).map_err(write_err)?;

    Ok(path)
}
