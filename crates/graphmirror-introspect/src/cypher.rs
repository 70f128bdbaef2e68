//! Cypher text for the introspection queries.
//!
//! Labels and relationship types are spliced into patterns (Cypher has no
//! parameters for them), always backtick-quoted with embedded backticks
//! doubled.

/// Catalog query: every node label. Column `label`.
pub const LABELS: &str = "CALL db.labels() YIELD label RETURN label";

/// Catalog query: every relationship type. Column `relationshipType`.
pub const RELATIONSHIP_TYPES: &str =
    "CALL db.relationshipTypes() YIELD relationshipType RETURN relationshipType";

/// Function used to report a property's dynamic type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TypeProbe {
    /// `apoc.meta.type(value)`; requires the APOC plugin.
    #[default]
    Apoc,
    /// `valueType(value)`; built into Neo4j 5.
    ValueType,
}

impl TypeProbe {
    fn call(self, value: &str) -> String {
        match self {
            Self::Apoc => format!("apoc.meta.type({value})"),
            Self::ValueType => format!("valueType({value})"),
        }
    }
}

pub fn quote_identifier(name: &str) -> String {
    format!("`{}`", name.replace('`', "``"))
}

/// Every key of one arbitrary node carrying `label`. Columns `key`, `type`.
///
/// The node is pinned before unwinding so the sample covers all of its keys.
pub fn sample_node_properties(label: &str, probe: TypeProbe) -> String {
    format!(
        "MATCH (n:{}) WITH n LIMIT 1 UNWIND keys(n) AS key RETURN key, {} AS type ORDER BY key",
        quote_identifier(label),
        probe.call("n[key]")
    )
}

/// Distinct outgoing pairs. Columns `type`, `label`.
pub fn outgoing_connections(label: &str) -> String {
    connections(label, "-[r]->")
}

/// Distinct incoming pairs. Columns `type`, `label`.
pub fn incoming_connections(label: &str) -> String {
    connections(label, "<-[r]-")
}

fn connections(label: &str, arrow: &str) -> String {
    format!(
        "MATCH (n:{}){arrow}(m) \
         WITH DISTINCT type(r) AS type, labels(m)[0] AS label \
         WHERE label IS NOT NULL \
         RETURN type, label ORDER BY type, label",
        quote_identifier(label)
    )
}

/// One arbitrary relationship of `rel_type`. Columns `keys`, `startLabel`, `endLabel`.
pub fn sample_relationship(rel_type: &str) -> String {
    format!(
        "MATCH (a)-[r:{}]->(b) \
         RETURN keys(r) AS keys, labels(a)[0] AS startLabel, labels(b)[0] AS endLabel \
         LIMIT 1",
        quote_identifier(rel_type)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identifiers_are_backtick_quoted() {
        assert_eq!(quote_identifier("PERSON"), "`PERSON`");
        assert_eq!(quote_identifier("customer order"), "`customer order`");
        assert_eq!(quote_identifier("we`ird"), "`we``ird`");
    }

    #[test]
    fn node_sample_pins_one_node_before_unwinding() {
        let q = sample_node_properties("PERSON", TypeProbe::Apoc);
        assert_eq!(
            q,
            "MATCH (n:`PERSON`) WITH n LIMIT 1 UNWIND keys(n) AS key \
             RETURN key, apoc.meta.type(n[key]) AS type ORDER BY key"
        );
        let q = sample_node_properties("PERSON", TypeProbe::ValueType);
        assert!(q.contains("valueType(n[key]) AS type"));
    }

    #[test]
    fn connectivity_queries_use_the_raw_label() {
        let out = outgoing_connections("order item");
        assert!(out.starts_with("MATCH (n:`order item`)-[r]->(m) "));
        assert!(out.contains("WITH DISTINCT type(r) AS type, labels(m)[0] AS label"));
        assert!(out.ends_with("ORDER BY type, label"));

        let inc = incoming_connections("order item");
        assert!(inc.starts_with("MATCH (n:`order item`)<-[r]-(m) "));
    }

    #[test]
    fn relationship_sample_returns_endpoint_labels() {
        let q = sample_relationship("PART_OF");
        assert!(q.starts_with("MATCH (a)-[r:`PART_OF`]->(b) "));
        assert!(q.contains("labels(a)[0] AS startLabel"));
        assert!(q.contains("labels(b)[0] AS endLabel"));
        assert!(q.ends_with("LIMIT 1"));
    }
}
