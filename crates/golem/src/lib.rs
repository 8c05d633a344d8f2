//! golem - instantiate concrete Go types from generic definitions
//!
//! Go has no type parameters, so a generic is written once against `interface{}`
//! and specialised at build time from a `go:generate` line:
//!
//! ```text
//! //go:generate golem -type Foo -generic github.com/fogfish/golem/stream/stream.go
//! ```
//!
//! It is literally "read the generic, replace `genT` and `AnyT`, fix the package
//! name, write the file". No parsing, no type checking; `go build` on the
//! result is the validation.

pub mod config;
pub mod emit;
pub mod error;
pub mod generator;
pub mod loader;
pub mod naming;
pub mod package;
pub mod template;

pub use config::SearchRoot;
pub use error::{Error, Result};
pub use generator::{Generated, Generator, Request};
pub use naming::{Mode, Naming};
pub use package::Destination;
pub use template::{instantiate, Binding, Matching, Template};
