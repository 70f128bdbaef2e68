//! Inferred schema records.
//!
//! A [`NodeSchema`] is a *point sample*: its properties come from one
//! arbitrary node carrying the label, so labels whose nodes have
//! heterogeneous property sets are described incompletely. Connectivity is
//! different: it is aggregated over every node of the label.
//!
//! All collections are ordered so that rendering a schema is deterministic
//! regardless of the order in which the database reported it.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::types::PropertyType;

/// A node label as reported by the database catalog.
pub type GraphLabel = String;

/// A relationship type as reported by the database catalog.
pub type RelationshipTypeName = String;

/// The inferred shape of one label.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct NodeSchema {
    pub label: GraphLabel,
    /// Property key → type tag of the sampled node.
    #[serde(default)]
    pub properties: BTreeMap<String, PropertyType>,
    /// Outgoing relationship type → target label.
    #[serde(default)]
    pub outgoing: BTreeMap<RelationshipTypeName, GraphLabel>,
    /// Incoming relationship type → source label.
    #[serde(default)]
    pub incoming: BTreeMap<RelationshipTypeName, GraphLabel>,
}

impl NodeSchema {
    pub fn new(label: impl Into<GraphLabel>) -> Self {
        Self {
            label: label.into(),
            ..Self::default()
        }
    }

    pub fn with_property(mut self, key: impl Into<String>, ty: PropertyType) -> Self {
        self.properties.insert(key.into(), ty);
        self
    }

    pub fn with_outgoing(mut self, rel_type: impl Into<String>, target: impl Into<String>) -> Self {
        self.outgoing.insert(rel_type.into(), target.into());
        self
    }

    pub fn with_incoming(mut self, rel_type: impl Into<String>, source: impl Into<String>) -> Self {
        self.incoming.insert(rel_type.into(), source.into());
        self
    }

    /// True when neither the sample nor the connectivity queries found anything.
    pub fn is_bare(&self) -> bool {
        self.properties.is_empty() && self.outgoing.is_empty() && self.incoming.is_empty()
    }
}

/// The inferred shape of one relationship type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelationshipSchema {
    #[serde(rename = "type")]
    pub rel_type: RelationshipTypeName,
    pub start_label: GraphLabel,
    pub end_label: GraphLabel,
    #[serde(default)]
    pub properties: BTreeSet<String>,
}

impl RelationshipSchema {
    pub fn new(
        rel_type: impl Into<String>,
        start_label: impl Into<String>,
        end_label: impl Into<String>,
    ) -> Self {
        Self {
            rel_type: rel_type.into(),
            start_label: start_label.into(),
            end_label: end_label.into(),
            properties: BTreeSet::new(),
        }
    }

    pub fn with_property(mut self, key: impl Into<String>) -> Self {
        self.properties.insert(key.into());
        self
    }
}

/// Everything one introspection run discovered.
///
/// `nodes` is sorted by label and `relationships` by type; relationship types
/// without any instance are absent.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct GraphSchema {
    #[serde(default)]
    pub nodes: Vec<NodeSchema>,
    #[serde(default)]
    pub relationships: Vec<RelationshipSchema>,
}

impl GraphSchema {
    /// Build a schema, restoring the canonical ordering.
    pub fn new(mut nodes: Vec<NodeSchema>, mut relationships: Vec<RelationshipSchema>) -> Self {
        nodes.sort_by(|a, b| a.label.cmp(&b.label));
        relationships.sort_by(|a, b| a.rel_type.cmp(&b.rel_type));
        Self {
            nodes,
            relationships,
        }
    }

    pub fn node(&self, label: &str) -> Option<&NodeSchema> {
        self.nodes.iter().find(|n| n.label == label)
    }

    pub fn relationship(&self, rel_type: &str) -> Option<&RelationshipSchema> {
        self.relationships.iter().find(|r| r.rel_type == rel_type)
    }
}
