//! Generic template model and substitution
//!
//! A generic template is plain Go code written against two placeholders:
//!
//! ```go
//! package stack
//!
//! type genT interface{}
//!
//! type AnyT struct {
//!     elements []genT
//! }
//! ```
//!
//! `genT` is the type parameter, `AnyT` is the exported generic type. The
//! template is scanned once into literal text and typed slots; rendering binds
//! every slot to a concrete name and returns new text. The template itself is
//! never modified, so one parse can be rendered for several bindings.

use regex::Regex;
use std::sync::OnceLock;

use crate::error::{Error, Result};
use crate::naming::Naming;

/// Placeholder for the type parameter
pub const ALIAS_TOKEN: &str = "genT";

/// Placeholder for the exported generic type
pub const TYPE_TOKEN: &str = "AnyT";

/// Declaration binding the type parameter to "any type"
pub const ALIAS_DECLARATION: &str = "type genT interface{}";

fn package_clause() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"\Apackage[ \t]+([\p{L}_][\p{L}\p{N}_]*)").expect("package clause pattern")
    })
}

/// Byte offset of the first token that is not whitespace or a comment
///
/// `None` when a block comment is left unterminated.
fn skip_comments(text: &str) -> Option<usize> {
    let mut pos = 0;
    loop {
        let rest = &text[pos..];
        let trimmed = rest.trim_start();
        pos += rest.len() - trimmed.len();

        if trimmed.starts_with("//") {
            pos += trimmed.find('\n').map_or(trimmed.len(), |i| i + 1);
        } else if let Some(body) = trimmed.strip_prefix("/*") {
            pos += 2 + body.find("*/")? + 2;
        } else {
            return Some(pos);
        }
    }
}

/// Span and name of the package clause
///
/// The clause must be the first token after leading comments, so a
/// `package` line inside a comment or later in the file never matches.
pub(crate) fn find_package_clause(text: &str) -> Option<(usize, usize, &str)> {
    let start = skip_comments(text)?;
    let name = package_clause().captures(&text[start..])?.get(1)?;
    Some((start + name.start(), start + name.end(), name.as_str()))
}

/// How placeholder tokens are located in the template body
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Matching {
    /// Every substring occurrence, including inside comments, strings and
    /// longer identifiers (`genTree` becomes `genIntree`)
    #[default]
    Literal,
    /// Only occurrences not adjacent to `[A-Za-z0-9_]`
    Identifier,
}

/// Kind of a replaceable slot
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Slot {
    /// `type genT interface{}`
    AliasDecl,
    /// `genT`
    AliasRef,
    /// `AnyT`
    TypeRef,
    /// Identifier of the `package` clause
    PackageName,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Text(String),
    Slot(Slot),
}

/// Values bound to the slots of a template
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Binding {
    /// Parameter type exactly as requested (`int8`)
    pub kind: String,
    /// Concrete alias replacing `genT` (`genInt8`)
    pub alias: String,
    /// Type name replacing `AnyT`
    pub type_name: String,
    /// Destination package name
    pub package: String,
}

impl Binding {
    pub fn new(kind: &str, naming: &Naming, package: &str) -> Self {
        Self {
            kind: kind.to_string(),
            alias: naming.alias.clone(),
            type_name: naming.type_name.clone(),
            package: package.to_string(),
        }
    }

    fn value(&self, slot: Slot) -> String {
        match slot {
            Slot::AliasDecl => format!("type {} {}", self.alias, self.kind),
            Slot::AliasRef => self.alias.clone(),
            Slot::TypeRef => self.type_name.clone(),
            Slot::PackageName => self.package.clone(),
        }
    }
}

/// A parsed generic template
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    segments: Vec<Segment>,
}

impl Template {
    /// Scan template text for placeholder slots
    ///
    /// Only the first `type genT interface{}` becomes the declaration slot;
    /// any further copy is left to the generic `genT` matching. Only the
    /// package clause (the first token after leading comments) is a slot.
    pub fn parse(text: &str, matching: Matching) -> Self {
        let mut reserved: Vec<(usize, usize, Slot)> = Vec::new();

        let decl = text.find(ALIAS_DECLARATION).map(|start| (start, start + ALIAS_DECLARATION.len()));
        if let Some((start, end)) = decl {
            reserved.push((start, end, Slot::AliasDecl));
        }

        if let Some((start, end, _)) = find_package_clause(text) {
            let overlaps_decl = decl.is_some_and(|(s, e)| start < e && s < end);
            if !overlaps_decl {
                reserved.push((start, end, Slot::PackageName));
            }
        }

        reserved.sort_by_key(|(start, _, _)| *start);

        let mut segments = Vec::new();
        let mut cursor = 0;
        for (start, end, slot) in reserved {
            scan_tokens(&text[cursor..start], matching, &mut segments);
            segments.push(Segment::Slot(slot));
            cursor = end;
        }
        scan_tokens(&text[cursor..], matching, &mut segments);

        Self { segments }
    }

    /// Whether the template declares `type genT interface{}`
    pub fn has_declaration(&self) -> bool {
        self.slot_count(Slot::AliasDecl) > 0
    }

    /// Fail unless the template declares its type parameter
    pub fn require_declaration(&self) -> Result<()> {
        if self.has_declaration() {
            Ok(())
        } else {
            Err(Error::MalformedTemplate(format!(
                "missing `{}` declaration",
                ALIAS_DECLARATION
            )))
        }
    }

    pub fn slot_count(&self, slot: Slot) -> usize {
        self.segments
            .iter()
            .filter(|s| matches!(s, Segment::Slot(k) if *k == slot))
            .count()
    }

    /// Produce the concrete source for a binding
    pub fn render(&self, binding: &Binding) -> String {
        let mut out = String::new();
        for segment in &self.segments {
            match segment {
                Segment::Text(text) => out.push_str(text),
                Segment::Slot(slot) => out.push_str(&binding.value(*slot)),
            }
        }
        out
    }
}

/// Instantiate template text with literal token matching
pub fn instantiate(text: &str, binding: &Binding) -> String {
    Template::parse(text, Matching::Literal).render(binding)
}

fn is_ident_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

fn on_boundary(text: &str, start: usize, end: usize) -> bool {
    let before = text[..start].chars().next_back().map_or(true, |c| !is_ident_char(c));
    let after = text[end..].chars().next().map_or(true, |c| !is_ident_char(c));
    before && after
}

/// Split a region into text and `genT`/`AnyT` reference slots
fn scan_tokens(region: &str, matching: Matching, segments: &mut Vec<Segment>) {
    let mut hits: Vec<(usize, &str, Slot)> = region
        .match_indices(ALIAS_TOKEN)
        .map(|(i, t)| (i, t, Slot::AliasRef))
        .chain(region.match_indices(TYPE_TOKEN).map(|(i, t)| (i, t, Slot::TypeRef)))
        .filter(|(i, t, _)| matching == Matching::Literal || on_boundary(region, *i, i + t.len()))
        .collect();
    hits.sort_by_key(|(i, _, _)| *i);

    let mut cursor = 0;
    for (start, token, slot) in hits {
        if start > cursor {
            segments.push(Segment::Text(region[cursor..start].to_string()));
        }
        segments.push(Segment::Slot(slot));
        cursor = start + token.len();
    }
    if cursor < region.len() {
        segments.push(Segment::Text(region[cursor..].to_string()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::naming::Mode;

    const STACK: &str = "package stack\n\ntype genT interface{}\n\ntype AnyT struct { elements []genT }\n";

    fn library(kind: &str, package: &str) -> Binding {
        Binding::new(kind, &Naming::derive("stack", kind, Mode::Library), package)
    }

    #[test]
    fn test_stack_scenario() {
        let out = instantiate(STACK, &library("Int", "stack"));

        assert!(out.contains("package stack\n"));
        assert!(out.contains("type genInt Int\n"));
        assert!(out.contains("type Int struct { elements []genInt }"));
        assert!(!out.contains("genT"));
        assert!(!out.contains("AnyT"));
    }

    #[test]
    fn test_exact_output() {
        let out = instantiate(STACK, &library("int", "queue"));

        assert_eq!(
            out,
            "package queue\n\ntype genInt int\n\ntype int struct { elements []genInt }\n"
        );
    }

    #[test]
    fn test_kind_casing_is_kept_in_declaration() {
        let out = instantiate(STACK, &library("int8", "stack"));

        assert!(out.contains("type genInt8 int8\n"));
        assert!(out.contains("type int8 struct { elements []genInt8 }"));
        assert!(!out.contains("Int8 struct"));
    }

    #[test]
    fn test_application_binding() {
        let binding = Binding::new("FooBar", &Naming::derive("stack", "FooBar", Mode::Application), "foobar");
        let out = instantiate(STACK, &binding);

        assert!(out.starts_with("package foobar\n"));
        assert!(out.contains("type genFooBar FooBar"));
        assert!(out.contains("type Stack struct { elements []genFooBar }"));
    }

    #[test]
    fn test_all_references_replaced() {
        let text = "package seq\n\ntype genT interface{}\n\n\
                    type AnyT []genT\n\n\
                    func (s AnyT) Push(x genT) AnyT { return append(s, x) }\n\
                    func (s AnyT) Head() genT { return s[0] }\n";
        let template = Template::parse(text, Matching::Literal);

        assert_eq!(template.slot_count(Slot::AliasDecl), 1);
        assert_eq!(template.slot_count(Slot::AliasRef), 3);
        assert_eq!(template.slot_count(Slot::TypeRef), 4);
        assert_eq!(template.slot_count(Slot::PackageName), 1);

        let out = template.render(&library("string", "seq"));
        assert!(!out.contains(ALIAS_TOKEN));
        assert!(!out.contains(TYPE_TOKEN));
        assert!(out.contains("func (s string) Push(x genString) string"));
    }

    #[test]
    fn test_package_line_isolation() {
        let text = "// Package stack implements a package of stacks\n\
                    package stack\n\n\
                    // this package is generic\n\
                    const doc = \"package main\"\n\
                    type genT interface{}\n";
        let out = instantiate(text, &library("int", "ints"));

        assert!(out.contains("// Package stack implements a package of stacks\n"));
        assert!(out.contains("\npackage ints\n"));
        assert!(out.contains("// this package is generic\n"));
        assert!(out.contains("const doc = \"package main\"\n"));
    }

    #[test]
    fn test_package_line_keeps_trailing_syntax() {
        let text = "package stack // import \"example.com/stack\"\n";
        let out = instantiate(text, &library("int", "ints"));

        assert_eq!(out, "package ints // import \"example.com/stack\"\n");
    }

    #[test]
    fn test_only_first_package_clause_rewritten() {
        let text = "package a\n/*\npackage b\n*/\n";
        let out = instantiate(text, &library("int", "z"));

        assert_eq!(out, "package z\n/*\npackage b\n*/\n");
    }

    #[test]
    fn test_package_line_inside_block_comment_is_skipped() {
        let text = "/*\npackage stack is documented here\n*/\npackage stack\n";
        let out = instantiate(text, &library("int", "ints"));

        assert_eq!(out, "/*\npackage stack is documented here\n*/\npackage ints\n");
    }

    #[test]
    fn test_package_clause_after_leading_comments() {
        let text = "// Copyright\n\n/* one */ /* two\n*/\n// package fake\npackage real // tail\n";

        let (start, end, name) = find_package_clause(text).unwrap();
        assert_eq!(name, "real");
        assert_eq!(&text[start..end], "real");
        assert_eq!(find_package_clause("/* unterminated\npackage x\n"), None);
        assert_eq!(find_package_clause("type x int\npackage y\n"), None);
    }

    #[test]
    fn test_literal_matching_rewrites_comments_and_identifiers() {
        let text = "type genT interface{}\n// genT is AnyT's element\nvar genTree AnyThing\n";
        let out = instantiate(text, &library("int", "p"));

        assert!(out.contains("// genInt is int's element\n"));
        assert!(out.contains("var genIntree inthing\n"));
    }

    #[test]
    fn test_identifier_matching_skips_longer_names() {
        let text = "type genT interface{}\nvar genTree AnyThing\nvar x AnyT = AnyT{}\nfunc f(genT) {}\n";
        let out = Template::parse(text, Matching::Identifier).render(&library("int", "p"));

        assert!(out.contains("var genTree AnyThing\n"));
        assert!(out.contains("var x int = int{}\n"));
        assert!(out.contains("func f(genInt) {}\n"));
    }

    #[test]
    fn test_missing_declaration_passes_through() {
        let text = "package stack\n\ntype genT = interface{}\n\ntype AnyT []genT\n";
        let template = Template::parse(text, Matching::Literal);

        assert!(!template.has_declaration());
        assert!(template.require_declaration().is_err());

        // references are still renamed, nothing binds the alias to the kind
        let out = template.render(&library("int", "stack"));
        assert!(out.contains("type genInt = interface{}\n"));
        assert!(!out.contains("type genInt int"));
    }

    #[test]
    fn test_only_first_declaration_is_bound() {
        let text = "type genT interface{}\ntype genT interface{}\n";
        let out = instantiate(text, &library("int", "p"));

        assert_eq!(out, "type genInt int\ntype genInt interface{}\n");
    }

    #[test]
    fn test_render_is_repeatable() {
        let template = Template::parse(STACK, Matching::Literal);
        let a = template.render(&library("int", "stack"));
        let b = template.render(&library("int", "stack"));
        let c = template.render(&library("string", "stack"));

        assert_eq!(a, b);
        assert!(c.contains("type genString string"));
    }

    #[test]
    fn test_no_slots() {
        let text = "// plain file\n";
        let template = Template::parse(text, Matching::Literal);

        assert_eq!(template.slot_count(Slot::PackageName), 0);
        assert_eq!(template.render(&library("int", "p")), text);
    }
}
