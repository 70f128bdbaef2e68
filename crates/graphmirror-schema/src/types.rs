//! Property type inference.
//!
//! The database reports property types as open-ended string tags. APOC's
//! `apoc.meta.type` yields `INTEGER`, `FLOAT`, `DATE_TIME`, ...; Neo4j 5's
//! `valueType` yields `INTEGER NOT NULL`, `ZONED DATETIME NOT NULL`, ... Both
//! are folded into [`PropertyType`], which keeps unrecognised tags in an
//! explicit [`PropertyType::Other`] arm. Mapping to [`JavaType`] is total:
//! anything that is not a number, a boolean or a date-time becomes `String`.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A property type tag as reported by the graph engine.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum PropertyType {
    Integer,
    Float,
    Boolean,
    DateTime,
    String,
    /// Any tag without a dedicated mapping (lists, maps, points, dates, ...).
    Other(String),
}

impl PropertyType {
    /// Parse an engine-reported tag. Never fails.
    pub fn from_tag(tag: &str) -> Self {
        let trimmed = tag.trim();
        let mut normalized = trimmed.to_ascii_uppercase().replace(['-', ' '], "_");
        if let Some(stripped) = normalized.strip_suffix("_NOT_NULL") {
            normalized = stripped.to_string();
        }

        match normalized.as_str() {
            "INTEGER" | "INT" | "LONG" => Self::Integer,
            "FLOAT" | "DOUBLE" => Self::Float,
            "BOOLEAN" => Self::Boolean,
            "DATETIME" | "DATE_TIME" | "ZONED_DATETIME" | "ZONED_DATE_TIME" | "LOCAL_DATETIME"
            | "LOCAL_DATE_TIME" | "LOCALDATETIME" => Self::DateTime,
            "STRING" => Self::String,
            _ => Self::Other(trimmed.to_string()),
        }
    }

    /// Canonical tag, as written into schema snapshots.
    pub fn tag(&self) -> &str {
        match self {
            Self::Integer => "INTEGER",
            Self::Float => "FLOAT",
            Self::Boolean => "BOOLEAN",
            Self::DateTime => "DATETIME",
            Self::String => "STRING",
            Self::Other(tag) => tag,
        }
    }

    pub fn java_type(&self) -> JavaType {
        match self {
            Self::Integer => JavaType::Integer,
            Self::Float => JavaType::Double,
            Self::Boolean => JavaType::Boolean,
            Self::DateTime => JavaType::LocalDateTime,
            Self::String | Self::Other(_) => JavaType::String,
        }
    }
}

impl From<String> for PropertyType {
    fn from(tag: String) -> Self {
        Self::from_tag(&tag)
    }
}

impl From<PropertyType> for String {
    fn from(ty: PropertyType) -> Self {
        ty.tag().to_string()
    }
}

impl fmt::Display for PropertyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// Static field types emitted into entity sources.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum JavaType {
    Integer,
    Double,
    Boolean,
    LocalDateTime,
    String,
}

impl JavaType {
    /// The name used in a field declaration.
    pub fn simple_name(self) -> &'static str {
        match self {
            Self::Integer => "Integer",
            Self::Double => "Double",
            Self::Boolean => "Boolean",
            Self::LocalDateTime => "LocalDateTime",
            Self::String => "String",
        }
    }

    /// Import required outside `java.lang`, if any.
    pub fn import(self) -> Option<&'static str> {
        match self {
            Self::LocalDateTime => Some("java.time.LocalDateTime"),
            _ => None,
        }
    }
}

impl fmt::Display for JavaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.simple_name())
    }
}

/// Map a raw engine tag straight to its Java type.
pub fn map_type_tag(tag: &str) -> JavaType {
    PropertyType::from_tag(tag).java_type()
}
