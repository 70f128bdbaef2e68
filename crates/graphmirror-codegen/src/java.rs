//! Java source helpers: identifiers, literals, import blocks and per-class
//! field allocation.

use std::collections::{BTreeSet, HashMap};
use std::fmt::{self, Write};

use tracing::warn;

use crate::{CodegenError, CollisionPolicy};

const RESERVED: &[&str] = &[
    "abstract", "assert", "boolean", "break", "byte", "case", "catch", "char", "class", "const",
    "continue", "default", "do", "double", "else", "enum", "extends", "false", "final",
    "finally", "float", "for", "goto", "if", "implements", "import", "instanceof", "int",
    "interface", "long", "native", "new", "null", "package", "private", "protected", "public",
    "return", "short", "static", "strictfp", "super", "switch", "synchronized", "this", "throw",
    "throws", "transient", "true", "try", "void", "volatile", "while", "_",
];

pub(crate) const SCHEMA: &str = "org.springframework.data.neo4j.core.schema";

pub(crate) fn is_reserved(name: &str) -> bool {
    RESERVED.contains(&name)
}

fn is_identifier_start(c: char) -> bool {
    c.is_alphabetic() || c == '_' || c == '$'
}

fn is_identifier_part(c: char) -> bool {
    c.is_alphanumeric() || c == '_' || c == '$'
}

/// Coerce a normalised name into a legal Java identifier.
///
/// Illegal characters become `_`, a leading digit gets a `_` prefix and
/// reserved words get a `_` suffix. Legal identifiers pass through unchanged.
pub(crate) fn identifier(name: &str) -> String {
    let mut out: String = name
        .chars()
        .map(|c| if is_identifier_part(c) { c } else { '_' })
        .collect();
    if !out.chars().next().is_some_and(is_identifier_start) {
        out.insert(0, '_');
    }
    if is_reserved(&out) {
        out.push('_');
    }
    out
}

/// Simple names a generated file imports or relies on from `java.lang`.
/// A class with one of these names would shadow the type it refers to.
const SHADOWED_TYPES: &[&str] = &[
    "Boolean", "Data", "Double", "GeneratedValue", "Id", "Integer", "LocalDateTime", "Long",
    "Neo4jRepository", "Node", "Object", "Property", "Relationship", "RelationshipId",
    "RelationshipProperties", "Repository", "Set", "String", "TargetNode",
];

/// [`identifier`] for a generated class; names that would shadow an
/// imported or `java.lang` type also get a `_` suffix.
pub(crate) fn class_identifier(name: &str) -> String {
    let mut out = identifier(name);
    if SHADOWED_TYPES.contains(&out.as_str()) {
        out.push('_');
    }
    out
}

pub(crate) fn is_package_name(package: &str) -> bool {
    package.split('.').all(|segment| {
        let mut chars = segment.chars();
        chars.next().is_some_and(is_identifier_start)
            && chars.all(is_identifier_part)
            && !is_reserved(segment)
    })
}

/// A double-quoted Java string literal.
pub(crate) fn string_literal(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('"');
    for c in value.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c.is_control() => out.push_str(&format!("\\u{:04x}", c as u32)),
            c => out.push(c),
        }
    }
    out.push('"');
    out
}

/// `package ...;` followed by a sorted import block.
pub(crate) fn write_header(
    out: &mut String,
    package: &str,
    imports: &BTreeSet<String>,
) -> fmt::Result {
    writeln!(out, "package {package};")?;
    writeln!(out)?;
    for import in imports {
        writeln!(out, "import {import};")?;
    }
    if !imports.is_empty() {
        writeln!(out)?;
    }
    Ok(())
}

/// One `private` field with its annotations.
#[derive(Debug, Clone)]
pub(crate) struct Field {
    pub name: String,
    pub ty: String,
    pub annotations: Vec<String>,
    /// Human-readable source of the field, for collision reports.
    pub origin: String,
}

impl Field {
    pub fn new(name: impl Into<String>, ty: impl Into<String>, origin: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ty: ty.into(),
            annotations: Vec::new(),
            origin: origin.into(),
        }
    }

    pub fn annotated(mut self, annotation: impl Into<String>) -> Self {
        self.annotations.push(annotation.into());
        self
    }

    fn write(&self, out: &mut String) -> fmt::Result {
        for annotation in &self.annotations {
            writeln!(out, "    {annotation}")?;
        }
        writeln!(out, "    private {} {};", self.ty, self.name)
    }
}

/// Fields of one class, in declaration order, with unique names.
///
/// Fixed fields (identity, endpoints) are never displaced.
#[derive(Debug)]
pub(crate) struct ClassFields {
    class: String,
    policy: CollisionPolicy,
    fields: Vec<Field>,
    fixed: usize,
    by_name: HashMap<String, usize>,
}

impl ClassFields {
    pub fn new(class: &str, policy: CollisionPolicy) -> Self {
        Self {
            class: class.to_string(),
            policy,
            fields: Vec::new(),
            fixed: 0,
            by_name: HashMap::new(),
        }
    }

    pub fn push_fixed(&mut self, field: Field) {
        self.by_name.insert(field.name.clone(), self.fields.len());
        self.fields.push(field);
        self.fixed = self.fields.len();
    }

    pub fn is_fixed(&self, name: &str) -> bool {
        self.by_name.get(name).is_some_and(|&i| i < self.fixed)
    }

    pub fn push(&mut self, field: Field) -> Result<(), CodegenError> {
        let Some(&existing) = self.by_name.get(&field.name) else {
            self.by_name.insert(field.name.clone(), self.fields.len());
            self.fields.push(field);
            return Ok(());
        };

        let first = self.fields[existing].origin.clone();
        match self.policy {
            CollisionPolicy::Fail => Err(CodegenError::NameCollision {
                name: format!("{}.{}", self.class, field.name),
                first,
                second: field.origin,
            }),
            CollisionPolicy::LastWins if existing < self.fixed => {
                warn!(
                    class = %self.class,
                    field = %field.name,
                    kept = %first,
                    dropped = %field.origin,
                    "field name collides with a fixed field; dropping"
                );
                Ok(())
            }
            CollisionPolicy::LastWins => {
                warn!(
                    class = %self.class,
                    field = %field.name,
                    replaced = %first,
                    by = %field.origin,
                    "field name collision; keeping the later declaration"
                );
                self.fields[existing] = field;
                Ok(())
            }
        }
    }

    /// Class body fields, each preceded by a blank line.
    pub fn write(&self, out: &mut String) -> fmt::Result {
        for field in &self.fields {
            writeln!(out)?;
            field.write(out)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identifiers_are_made_legal() {
        assert_eq!(identifier("orderDate"), "orderDate");
        assert_eq!(identifier("class"), "class_");
        assert_eq!(identifier("2fa"), "_2fa");
        assert_eq!(identifier("e-mail"), "e_mail");
        assert_eq!(identifier("Größe"), "Größe");
    }

    #[test]
    fn class_names_do_not_shadow_imported_types() {
        assert_eq!(class_identifier("Person"), "Person");
        assert_eq!(class_identifier("Node"), "Node_");
        assert_eq!(class_identifier("Property"), "Property_");
        assert_eq!(class_identifier("String"), "String_");
        assert_eq!(class_identifier("Class"), "Class");
        assert_eq!(class_identifier("Nodes"), "Nodes");
    }

    #[test]
    fn literals_are_escaped() {
        assert_eq!(string_literal("PERSON"), "\"PERSON\"");
        assert_eq!(string_literal("a\"b\\c"), "\"a\\\"b\\\\c\"");
        assert_eq!(string_literal("x\u{1}"), "\"x\\u0001\"");
    }

    #[test]
    fn header_lists_sorted_imports() {
        let imports: BTreeSet<String> = ["lombok.Data", "java.util.Set"]
            .into_iter()
            .map(String::from)
            .collect();
        let mut out = String::new();
        write_header(&mut out, "main.entity", &imports).unwrap();
        assert_eq!(
            out,
            "package main.entity;\n\nimport java.util.Set;\nimport lombok.Data;\n\n"
        );
    }

    #[test]
    fn colliding_fields_fail_by_default() {
        let mut fields = ClassFields::new("Person", CollisionPolicy::Fail);
        fields.push(Field::new("knows", "String", "property `KNOWS`")).unwrap();
        let err = fields
            .push(Field::new("knows", "Set<Person>", "outgoing `KNOWS`"))
            .unwrap_err();
        match err {
            CodegenError::NameCollision { name, first, second } => {
                assert_eq!(name, "Person.knows");
                assert_eq!(first, "property `KNOWS`");
                assert_eq!(second, "outgoing `KNOWS`");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn last_wins_replaces_in_place_but_keeps_fixed_fields() {
        let mut fields = ClassFields::new("Person", CollisionPolicy::LastWins);
        fields.push_fixed(Field::new("id", "Long", "identity"));
        fields.push(Field::new("name", "String", "property `name`")).unwrap();
        fields.push(Field::new("age", "Integer", "property `age`")).unwrap();
        fields.push(Field::new("name", "Integer", "property `NAME`")).unwrap();
        fields.push(Field::new("id", "String", "outgoing `ID`")).unwrap();

        assert!(fields.is_fixed("id"));
        assert!(!fields.is_fixed("name"));

        let mut out = String::new();
        fields.write(&mut out).unwrap();
        assert_eq!(
            out,
            "\n    private Long id;\n\n    private Integer name;\n\n    private Integer age;\n"
        );
    }
}
