//! Schema introspection for graphmirror
//!
//! Infers a [`GraphSchema`] from a live property graph:
//! - catalog queries enumerate labels and relationship types
//! - one arbitrary node per label supplies property keys and type tags
//! - distinct (relationship type, neighbour label) pairs per label supply
//!   outgoing/incoming connectivity
//! - one arbitrary relationship per type supplies its keys and endpoint labels
//!
//! The queries themselves sit behind [`SchemaSource`]; [`Neo4jSource`] speaks
//! Bolt via `neo4rs`, while [`Introspector`] owns the inference rules and is
//! agnostic of where rows come from.
//!
//! Every query failure is fatal. Nothing is retried and nothing is skipped
//! per label.

pub mod cypher;
mod error;
mod introspector;
#[cfg(any(test, feature = "testing"))]
pub mod memory;
mod neo4j;

pub use cypher::TypeProbe;
pub use error::IntrospectError;
pub use graphmirror_schema::GraphSchema;
pub use introspector::Introspector;
pub use neo4j::{ConnectionConfig, Neo4jSource};

/// One distinct (relationship type, neighbour label) pair seen from a label.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct Connection {
    pub rel_type: String,
    pub neighbor_label: String,
}

impl Connection {
    pub fn new(rel_type: impl Into<String>, neighbor_label: impl Into<String>) -> Self {
        Self {
            rel_type: rel_type.into(),
            neighbor_label: neighbor_label.into(),
        }
    }
}

/// Keys and endpoint labels of one sampled relationship.
///
/// Endpoint labels are `None` when the endpoint node carries no label.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RelationshipSample {
    pub keys: Vec<String>,
    pub start_label: Option<String>,
    pub end_label: Option<String>,
}

/// Read-only access to the catalog and data of a property graph.
///
/// Each method corresponds to one query and blocks until its rows are in.
pub trait SchemaSource {
    /// All node labels known to the catalog.
    fn labels(&mut self) -> Result<Vec<String>, IntrospectError>;

    /// All relationship types known to the catalog.
    fn relationship_types(&mut self) -> Result<Vec<String>, IntrospectError>;

    /// `(key, type tag)` for every property of one arbitrary node carrying
    /// `label`; empty when no node carries it.
    fn sample_node_properties(&mut self, label: &str)
        -> Result<Vec<(String, String)>, IntrospectError>;

    /// Distinct outgoing (type, target label) pairs over all nodes of `label`.
    fn outgoing_connections(&mut self, label: &str) -> Result<Vec<Connection>, IntrospectError>;

    /// Distinct incoming (type, source label) pairs over all nodes of `label`.
    fn incoming_connections(&mut self, label: &str) -> Result<Vec<Connection>, IntrospectError>;

    /// One arbitrary relationship of `rel_type`, if any exists.
    fn sample_relationship(
        &mut self,
        rel_type: &str,
    ) -> Result<Option<RelationshipSample>, IntrospectError>;
}

impl<S: SchemaSource + ?Sized> SchemaSource for &mut S {
    fn labels(&mut self) -> Result<Vec<String>, IntrospectError> {
        (**self).labels()
    }

    fn relationship_types(&mut self) -> Result<Vec<String>, IntrospectError> {
        (**self).relationship_types()
    }

    fn sample_node_properties(
        &mut self,
        label: &str,
    ) -> Result<Vec<(String, String)>, IntrospectError> {
        (**self).sample_node_properties(label)
    }

    fn outgoing_connections(&mut self, label: &str) -> Result<Vec<Connection>, IntrospectError> {
        (**self).outgoing_connections(label)
    }

    fn incoming_connections(&mut self, label: &str) -> Result<Vec<Connection>, IntrospectError> {
        (**self).incoming_connections(label)
    }

    fn sample_relationship(
        &mut self,
        rel_type: &str,
    ) -> Result<Option<RelationshipSample>, IntrospectError> {
        (**self).sample_relationship(rel_type)
    }
}
