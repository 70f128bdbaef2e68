//! Bolt-backed [`SchemaSource`].
//!
//! `neo4rs` is async; introspection is not. The source owns a current-thread
//! runtime and blocks on each query, draining the row stream completely
//! before returning so the pooled connection goes back to the pool on both
//! success and failure.

use neo4rs::{query, ConfigBuilder, Graph, Row};
use serde::de::DeserializeOwned;
use tracing::{debug, info};

use crate::cypher::{self, TypeProbe};
use crate::{Connection, IntrospectError, RelationshipSample, SchemaSource};

const PING: &str = "RETURN 1";

/// Where and how to reach the database.
#[derive(Debug, Clone)]
pub struct ConnectionConfig {
    pub uri: String,
    pub user: String,
    pub password: String,
    /// Target database; the server default when `None`.
    pub database: Option<String>,
    pub fetch_size: usize,
}

impl Default for ConnectionConfig {
    fn default() -> Self {
        Self {
            uri: "bolt://localhost:7687".to_string(),
            user: "neo4j".to_string(),
            password: String::new(),
            database: None,
            fetch_size: 500,
        }
    }
}

pub struct Neo4jSource {
    runtime: tokio::runtime::Runtime,
    graph: Graph,
    probe: TypeProbe,
}

impl Neo4jSource {
    pub fn connect(config: &ConnectionConfig, probe: TypeProbe) -> Result<Self, IntrospectError> {
        let connect_err = |source| IntrospectError::Connect {
            uri: config.uri.clone(),
            source,
        };

        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(IntrospectError::Runtime)?;

        let mut builder = ConfigBuilder::default()
            .uri(config.uri.as_str())
            .user(config.user.as_str())
            .password(config.password.as_str())
            .fetch_size(config.fetch_size)
            .max_connections(1);
        if let Some(db) = &config.database {
            builder = builder.db(db.as_str());
        }
        let neo_config = builder.build().map_err(connect_err)?;
        let graph = runtime
            .block_on(Graph::connect(neo_config))
            .map_err(connect_err)?;
        // The pool dials lazily; make an unreachable server fail here.
        runtime
            .block_on(graph.run(query(PING)))
            .map_err(connect_err)?;

        info!(uri = %config.uri, database = ?config.database, "connected to graph database");
        Ok(Self {
            runtime,
            graph,
            probe,
        })
    }

    fn rows(&self, cypher: &str) -> Result<Vec<Row>, IntrospectError> {
        debug!(query = cypher, "running introspection query");
        let query_err = |source| IntrospectError::Query {
            query: cypher.to_string(),
            source,
        };

        self.runtime.block_on(async {
            let mut stream = self.graph.execute(query(cypher)).await.map_err(query_err)?;
            let mut rows = Vec::new();
            while let Some(row) = stream.next().await.map_err(query_err)? {
                rows.push(row);
            }
            Ok(rows)
        })
    }

    fn column<T: DeserializeOwned>(row: &Row, cypher: &str, column: &str) -> Result<T, IntrospectError> {
        row.get::<T>(column).map_err(|source| IntrospectError::Decode {
            query: cypher.to_string(),
            column: column.to_string(),
            source,
        })
    }

    fn single_column(&self, cypher: &str, column: &str) -> Result<Vec<String>, IntrospectError> {
        self.rows(cypher)?
            .iter()
            .map(|row| Self::column(row, cypher, column))
            .collect()
    }

    fn connections(&self, cypher: &str) -> Result<Vec<Connection>, IntrospectError> {
        self.rows(cypher)?
            .iter()
            .map(|row| {
                Ok(Connection {
                    rel_type: Self::column(row, cypher, "type")?,
                    neighbor_label: Self::column(row, cypher, "label")?,
                })
            })
            .collect()
    }
}

impl SchemaSource for Neo4jSource {
    fn labels(&mut self) -> Result<Vec<String>, IntrospectError> {
        self.single_column(cypher::LABELS, "label")
    }

    fn relationship_types(&mut self) -> Result<Vec<String>, IntrospectError> {
        self.single_column(cypher::RELATIONSHIP_TYPES, "relationshipType")
    }

    fn sample_node_properties(
        &mut self,
        label: &str,
    ) -> Result<Vec<(String, String)>, IntrospectError> {
        let cypher = cypher::sample_node_properties(label, self.probe);
        self.rows(&cypher)?
            .iter()
            .map(|row| {
                let key: String = Self::column(row, &cypher, "key")?;
                // A null tag means the probe could not classify the value.
                let tag: Option<String> = Self::column(row, &cypher, "type")?;
                Ok((key, tag.unwrap_or_default()))
            })
            .collect()
    }

    fn outgoing_connections(&mut self, label: &str) -> Result<Vec<Connection>, IntrospectError> {
        self.connections(&cypher::outgoing_connections(label))
    }

    fn incoming_connections(&mut self, label: &str) -> Result<Vec<Connection>, IntrospectError> {
        self.connections(&cypher::incoming_connections(label))
    }

    fn sample_relationship(
        &mut self,
        rel_type: &str,
    ) -> Result<Option<RelationshipSample>, IntrospectError> {
        let cypher = cypher::sample_relationship(rel_type);
        let rows = self.rows(&cypher)?;
        let Some(row) = rows.first() else {
            return Ok(None);
        };
        Ok(Some(RelationshipSample {
            keys: Self::column(row, &cypher, "keys")?,
            start_label: Self::column(row, &cypher, "startLabel")?,
            end_label: Self::column(row, &cypher, "endLabel")?,
        }))
    }
}
