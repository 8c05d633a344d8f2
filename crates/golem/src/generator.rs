//! One instantiation from template to generated file

use chrono::{DateTime, Utc};
use std::path::{Path, PathBuf};

use crate::config::SearchRoot;
use crate::emit::{emit, render_output};
use crate::error::{Error, Result};
use crate::loader::load;
use crate::naming::{generic_name, Mode, Naming};
use crate::package::Destination;
use crate::template::{Binding, Matching, Slot, Template};

/// What to instantiate and how
#[derive(Debug, Clone)]
pub struct Request {
    /// Parameter type (`-type`)
    pub kind: String,
    /// Template import path (`-generic`)
    pub generic: PathBuf,
    pub mode: Mode,
    pub matching: Matching,
    /// Fail instead of passing through a template without `type genT interface{}`
    pub require_declaration: bool,
}

/// Result of an instantiation
#[derive(Debug, Clone)]
pub struct Generated {
    /// Base name of the generic (`stack`)
    pub generic: String,
    /// Type replacing `AnyT`
    pub type_name: String,
    /// Output file location
    pub path: PathBuf,
    /// Full file content including the header
    pub content: String,
}

impl Generated {
    /// Short `<generic>.<Type>` label
    pub fn label(&self) -> String {
        format!("{}.{}", self.generic, self.type_name)
    }
}

pub struct Generator {
    root: SearchRoot,
    destination: Destination,
}

impl Generator {
    pub fn new(root: SearchRoot, destination: Destination) -> Self {
        Self { root, destination }
    }

    /// Build the generated file in memory
    pub fn prepare(&self, request: &Request, time: DateTime<Utc>) -> Result<Generated> {
        let instance = self.instantiate(request)?;
        let content = render_output(&instance.body, &instance.source, time);

        Ok(Generated {
            path: self.destination.join(&instance.naming.file_name),
            generic: instance.generic,
            type_name: instance.naming.type_name,
            content,
        })
    }

    /// Instantiate and write into the destination package
    pub fn generate(&self, request: &Request, time: DateTime<Utc>) -> Result<Generated> {
        let instance = self.instantiate(request)?;
        let path = emit(
            &instance.body,
            &instance.source,
            &self.destination.dir,
            &instance.naming.file_name,
            time,
        )?;

        Ok(Generated {
            path,
            generic: instance.generic,
            type_name: instance.naming.type_name,
            content: render_output(&instance.body, &instance.source, time),
        })
    }

    fn instantiate(&self, request: &Request) -> Result<Instance> {
        if request.kind.trim().is_empty() {
            return Err(Error::Configuration("type name must not be empty".to_string()));
        }

        let location = self.root.locate(&request.generic);
        let generic = generic_name(&location);
        let naming = Naming::derive(&generic, &request.kind, request.mode);

        tracing::debug!(
            location = %location.display(),
            mode = request.mode.name(),
            alias = %naming.alias,
            type_name = %naming.type_name,
            "instantiating"
        );

        let text = load(&location)?;
        let template = Template::parse(&text, request.matching);
        check_declaration(&template, &location, request.require_declaration)?;

        tracing::debug!(
            alias_refs = template.slot_count(Slot::AliasRef),
            type_refs = template.slot_count(Slot::TypeRef),
            "template parsed"
        );

        let binding = Binding::new(&request.kind, &naming, &self.destination.package);

        Ok(Instance {
            body: template.render(&binding),
            source: request.generic.to_string_lossy().into_owned(),
            generic,
            naming,
        })
    }
}

struct Instance {
    body: String,
    source: String,
    generic: String,
    naming: Naming,
}

fn check_declaration(template: &Template, source: &Path, required: bool) -> Result<()> {
    if template.has_declaration() {
        return Ok(());
    }
    if required {
        return template.require_declaration();
    }
    tracing::warn!(
        source = %source.display(),
        "template has no `type genT interface{{}}` declaration, alias left unbound"
    );
    Ok(())
}
