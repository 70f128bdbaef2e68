//! In-memory [`SchemaSource`] for tests.
//!
//! Mirrors the Bolt queries' semantics: the catalog lists labels and types
//! that are in use plus any explicitly declared ones, the "arbitrary" sampled
//! node or relationship is the first inserted, and endpoint labels are each
//! node's first label.

use std::collections::BTreeSet;

use crate::cypher;
use crate::{Connection, IntrospectError, RelationshipSample, SchemaSource};

#[derive(Debug, Clone)]
struct MemNode {
    labels: Vec<String>,
    properties: Vec<(String, String)>,
}

#[derive(Debug, Clone)]
struct MemRelationship {
    rel_type: String,
    start: usize,
    end: usize,
    keys: Vec<String>,
}

#[derive(Debug, Clone, Default)]
pub struct MemoryGraph {
    nodes: Vec<MemNode>,
    relationships: Vec<MemRelationship>,
    declared_labels: Vec<String>,
    declared_types: Vec<String>,
    failing_labels: BTreeSet<String>,
    queries: Vec<String>,
}

impl MemoryGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a node; properties are `(key, type tag)` pairs. Returns its index.
    pub fn add_node(&mut self, labels: &[&str], properties: &[(&str, &str)]) -> usize {
        self.nodes.push(MemNode {
            labels: labels.iter().map(|l| l.to_string()).collect(),
            properties: properties
                .iter()
                .map(|(k, t)| (k.to_string(), t.to_string()))
                .collect(),
        });
        self.nodes.len() - 1
    }

    pub fn add_relationship(&mut self, start: usize, rel_type: &str, end: usize, keys: &[&str]) {
        self.relationships.push(MemRelationship {
            rel_type: rel_type.to_string(),
            start,
            end,
            keys: keys.iter().map(|k| k.to_string()).collect(),
        });
    }

    /// Make the catalog report a label even though no node carries it.
    pub fn declare_label(&mut self, label: &str) {
        self.declared_labels.push(label.to_string());
    }

    /// Make the catalog report a relationship type that has no instances.
    pub fn declare_relationship_type(&mut self, rel_type: &str) {
        self.declared_types.push(rel_type.to_string());
    }

    /// Every per-label query for `label` fails.
    pub fn fail_on_label(&mut self, label: &str) {
        self.failing_labels.insert(label.to_string());
    }

    /// Cypher text of every query answered so far, in order.
    pub fn queries(&self) -> &[String] {
        &self.queries
    }

    fn record(&mut self, query: String, label: Option<&str>) -> Result<(), IntrospectError> {
        let failing = label.is_some_and(|l| self.failing_labels.contains(l));
        self.queries.push(query.clone());
        if failing {
            return Err(IntrospectError::Engine {
                query,
                message: "injected failure".to_string(),
            });
        }
        Ok(())
    }

    fn first_label(&self, node: usize) -> Option<String> {
        self.nodes.get(node).and_then(|n| n.labels.first().cloned())
    }

    fn has_label(&self, node: usize, label: &str) -> bool {
        self.nodes
            .get(node)
            .is_some_and(|n| n.labels.iter().any(|l| l == label))
    }

    fn connections(&self, label: &str, outgoing: bool) -> Vec<Connection> {
        let mut pairs = BTreeSet::new();
        for rel in &self.relationships {
            let (here, there) = if outgoing {
                (rel.start, rel.end)
            } else {
                (rel.end, rel.start)
            };
            if !self.has_label(here, label) {
                continue;
            }
            if let Some(neighbor) = self.first_label(there) {
                pairs.insert(Connection::new(rel.rel_type.clone(), neighbor));
            }
        }
        pairs.into_iter().collect()
    }
}

impl SchemaSource for MemoryGraph {
    fn labels(&mut self) -> Result<Vec<String>, IntrospectError> {
        self.record(cypher::LABELS.to_string(), None)?;
        let mut labels: Vec<String> = self
            .nodes
            .iter()
            .flat_map(|n| n.labels.iter().cloned())
            .collect();
        labels.extend(self.declared_labels.iter().cloned());
        Ok(labels)
    }

    fn relationship_types(&mut self) -> Result<Vec<String>, IntrospectError> {
        self.record(cypher::RELATIONSHIP_TYPES.to_string(), None)?;
        let mut types: Vec<String> = self
            .relationships
            .iter()
            .map(|r| r.rel_type.clone())
            .collect();
        types.extend(self.declared_types.iter().cloned());
        Ok(types)
    }

    fn sample_node_properties(
        &mut self,
        label: &str,
    ) -> Result<Vec<(String, String)>, IntrospectError> {
        self.record(
            cypher::sample_node_properties(label, cypher::TypeProbe::Apoc),
            Some(label),
        )?;
        Ok(self
            .nodes
            .iter()
            .find(|n| n.labels.iter().any(|l| l == label))
            .map(|n| n.properties.clone())
            .unwrap_or_default())
    }

    fn outgoing_connections(&mut self, label: &str) -> Result<Vec<Connection>, IntrospectError> {
        self.record(cypher::outgoing_connections(label), Some(label))?;
        Ok(self.connections(label, true))
    }

    fn incoming_connections(&mut self, label: &str) -> Result<Vec<Connection>, IntrospectError> {
        self.record(cypher::incoming_connections(label), Some(label))?;
        Ok(self.connections(label, false))
    }

    fn sample_relationship(
        &mut self,
        rel_type: &str,
    ) -> Result<Option<RelationshipSample>, IntrospectError> {
        self.record(cypher::sample_relationship(rel_type), None)?;
        Ok(self
            .relationships
            .iter()
            .find(|r| r.rel_type == rel_type)
            .map(|r| RelationshipSample {
                keys: r.keys.clone(),
                start_label: self.first_label(r.start),
                end_label: self.first_label(r.end),
            }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_reports_used_and_declared_names() {
        let mut graph = MemoryGraph::new();
        let a = graph.add_node(&["A", "EXTRA"], &[]);
        graph.add_relationship(a, "SELF", a, &[]);
        graph.declare_label("EMPTY");
        graph.declare_relationship_type("UNUSED");

        let labels: BTreeSet<String> = graph.labels().unwrap().into_iter().collect();
        assert_eq!(
            labels.into_iter().collect::<Vec<_>>(),
            ["A", "EMPTY", "EXTRA"]
        );
        let types: BTreeSet<String> = graph.relationship_types().unwrap().into_iter().collect();
        assert!(types.contains("UNUSED"));
        assert_eq!(graph.queries().len(), 2);
    }

    #[test]
    fn neighbours_are_reported_by_first_label() {
        let mut graph = MemoryGraph::new();
        let a = graph.add_node(&["A"], &[]);
        let b = graph.add_node(&["B", "C"], &[]);
        graph.add_relationship(a, "TO", b, &[]);

        assert_eq!(
            graph.outgoing_connections("A").unwrap(),
            vec![Connection::new("TO", "B")]
        );
        // Matching uses any label; reporting uses the first.
        assert_eq!(
            graph.incoming_connections("C").unwrap(),
            vec![Connection::new("TO", "A")]
        );
    }
}
