use std::collections::{BTreeMap, BTreeSet};

use graphmirror_schema::{GraphSchema, NodeSchema, PropertyType, RelationshipSchema};
use tracing::{debug, info, warn};

use crate::{Connection, IntrospectError, SchemaSource};

/// Builds [`GraphSchema`] records from a [`SchemaSource`].
///
/// Catalog results are treated as sets and walked in sorted order, so the
/// resulting schema does not depend on catalog iteration order.
pub struct Introspector<S> {
    source: S,
}

impl<S: SchemaSource> Introspector<S> {
    pub fn new(source: S) -> Self {
        Self { source }
    }

    /// Discover every label and relationship type. Aborts on the first failure.
    pub fn introspect(&mut self) -> Result<GraphSchema, IntrospectError> {
        let labels: BTreeSet<String> = self.source.labels()?.into_iter().collect();
        info!(count = labels.len(), "discovered node labels");

        let mut nodes = Vec::with_capacity(labels.len());
        for label in &labels {
            nodes.push(self.node_schema(label)?);
        }

        let rel_types: BTreeSet<String> = self.source.relationship_types()?.into_iter().collect();
        info!(count = rel_types.len(), "discovered relationship types");

        let mut relationships = Vec::new();
        for rel_type in &rel_types {
            if let Some(schema) = self.relationship_schema(rel_type)? {
                relationships.push(schema);
            }
        }

        Ok(GraphSchema::new(nodes, relationships))
    }

    /// Sample one node of `label` and aggregate the label's connectivity.
    pub fn node_schema(&mut self, label: &str) -> Result<NodeSchema, IntrospectError> {
        let mut schema = NodeSchema::new(label);

        for (key, tag) in self.source.sample_node_properties(label)? {
            schema.properties.insert(key, PropertyType::from_tag(&tag));
        }
        if schema.properties.is_empty() {
            debug!(label, "sample found no properties; emitting identity-only entity");
        }

        let outgoing = self.source.outgoing_connections(label)?;
        schema.outgoing = fold_connections(label, "outgoing", outgoing);
        let incoming = self.source.incoming_connections(label)?;
        schema.incoming = fold_connections(label, "incoming", incoming);

        debug!(
            label,
            properties = schema.properties.len(),
            outgoing = schema.outgoing.len(),
            incoming = schema.incoming.len(),
            "inferred node schema"
        );
        Ok(schema)
    }

    /// Sample one relationship of `rel_type`; `None` when the type has no instances.
    pub fn relationship_schema(
        &mut self,
        rel_type: &str,
    ) -> Result<Option<RelationshipSchema>, IntrospectError> {
        let Some(sample) = self.source.sample_relationship(rel_type)? else {
            debug!(rel_type, "no relationships of this type; skipping");
            return Ok(None);
        };

        let (Some(start_label), Some(end_label)) = (sample.start_label, sample.end_label) else {
            warn!(rel_type, "sampled relationship has an unlabelled endpoint; skipping");
            return Ok(None);
        };

        Ok(Some(RelationshipSchema {
            rel_type: rel_type.to_string(),
            start_label,
            end_label,
            properties: sample.keys.into_iter().collect(),
        }))
    }
}

/// Collapse distinct pairs into one neighbour per relationship type.
///
/// When a type reaches several labels the lexicographically first one wins.
fn fold_connections(
    label: &str,
    direction: &str,
    connections: Vec<Connection>,
) -> BTreeMap<String, String> {
    let pairs: BTreeSet<Connection> = connections.into_iter().collect();
    let mut folded: BTreeMap<String, String> = BTreeMap::new();

    for Connection {
        rel_type,
        neighbor_label,
    } in pairs
    {
        match folded.get(&rel_type) {
            Some(kept) => warn!(
                label,
                direction,
                rel_type = %rel_type,
                kept = %kept,
                dropped = %neighbor_label,
                "relationship type reaches several labels; keeping the first"
            ),
            None => {
                folded.insert(rel_type, neighbor_label);
            }
        }
    }
    folded
}
