//! Command line definition and dispatch

use anyhow::{Context, Result};
use chrono::Utc;
use clap::{ArgAction, Parser};
use std::ffi::OsString;
use std::path::PathBuf;

use golem::{Destination, Generator, Matching, Mode, Request, SearchRoot};

/// golem - instantiate a specific type from a generic definition
#[derive(Parser, Debug)]
#[command(name = "golem")]
#[command(version)]
#[command(about = "Instantiate a concrete Go type from a generic definition")]
#[command(after_help = "\
PLACEHOLDERS:
    genT    type parameter, declared as `type genT interface{}`
    AnyT    the generic type itself

MODES:
    --lib   library schema: stack.Int, file int.go
            (default) application schema: foobar.Stack, file stack.go

EXAMPLES:
    //go:generate golem -lib -type Int -generic github.com/fogfish/golem/stack/stack.go
    //go:generate golem -type FooBar -generic github.com/fogfish/golem/stack/stack.go")]
pub struct Cli {
    /// Type parameter substituted into the generic
    #[arg(long = "type", value_name = "NAME")]
    pub kind: String,

    /// Import path of the generic template, relative to <ROOT>/src
    #[arg(long, value_name = "PATH")]
    pub generic: PathBuf,

    /// Use the library naming schema
    #[arg(
        long,
        num_args = 0..=1,
        default_value_t = false,
        default_missing_value = "true",
        action = ArgAction::Set
    )]
    pub lib: bool,

    /// Template search root (default: $GOPATH, then ~/go)
    #[arg(long, value_name = "DIR")]
    pub root: Option<PathBuf>,

    /// Destination package directory
    #[arg(long, value_name = "DIR", default_value = ".")]
    pub dir: PathBuf,

    /// Destination package name (default: $GOPACKAGE, then the package clause of existing sources)
    #[arg(long, value_name = "NAME")]
    pub package: Option<String>,

    /// Only replace placeholders that are whole identifiers
    #[arg(long)]
    pub boundary: bool,

    /// Fail if the template lacks `type genT interface{}`
    #[arg(long)]
    pub require_decl: bool,

    /// Print the generated file instead of writing it
    #[arg(long)]
    pub stdout: bool,
}

impl Cli {
    fn request(&self) -> Request {
        Request {
            kind: self.kind.clone(),
            generic: self.generic.clone(),
            mode: Mode::from_lib_flag(self.lib),
            matching: if self.boundary {
                Matching::Identifier
            } else {
                Matching::Literal
            },
            require_declaration: self.require_decl,
        }
    }
}

/// Accept Go-style single dash long flags (`-type Foo`, `-lib=true`)
pub fn normalize_args<I>(args: I) -> Vec<OsString>
where
    I: IntoIterator<Item = OsString>,
{
    let mut args = args.into_iter();
    let mut out: Vec<OsString> = args.next().into_iter().collect();
    let mut rest_positional = false;

    for arg in args {
        let long_single_dash = arg.to_str().is_some_and(|s| {
            s.len() > 2 && s.starts_with('-') && !s.starts_with("--")
        });

        if rest_positional || !long_single_dash {
            rest_positional |= arg == "--";
            out.push(arg);
        } else {
            let mut fixed = OsString::from("-");
            fixed.push(&arg);
            out.push(fixed);
        }
    }

    out
}

pub fn run(cli: Cli) -> Result<()> {
    let root = SearchRoot::resolve(cli.root.as_deref());
    let destination = Destination::resolve(&cli.dir, cli.package.as_deref())
        .context("cannot resolve destination package")?;

    tracing::debug!(
        root = %root.root.display(),
        dir = %destination.dir.display(),
        package = %destination.package,
        "resolved"
    );

    let generator = Generator::new(root, destination);
    let request = cli.request();

    if cli.stdout {
        let generated = generator.prepare(&request, Utc::now())?;
        print!("{}", generated.content);
        return Ok(());
    }

    let generated = generator.generate(&request, Utc::now())?;
    tracing::info!("{}", generated.label());

    Ok(())
}

/// Exit code for a failed run, taken from the first `golem::Error` in the chain
pub fn exit_code(err: &anyhow::Error) -> u8 {
    err.chain()
        .find_map(|e| e.downcast_ref::<golem::Error>())
        .map_or(1, golem::Error::exit_code)
}
