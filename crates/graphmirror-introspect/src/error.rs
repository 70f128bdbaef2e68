use thiserror::Error;

#[derive(Debug, Error)]
pub enum IntrospectError {
    #[error("cannot connect to graph database at {uri}: {source}")]
    Connect {
        uri: String,
        #[source]
        source: neo4rs::Error,
    },

    #[error("query failed: {query}: {source}")]
    Query {
        query: String,
        #[source]
        source: neo4rs::Error,
    },

    #[error("cannot decode column `{column}` of query {query}: {source}")]
    Decode {
        query: String,
        column: String,
        #[source]
        source: neo4rs::DeError,
    },

    #[error("cannot start driver runtime: {0}")]
    Runtime(#[source] std::io::Error),

    /// Failure reported by a non-Bolt [`SchemaSource`](crate::SchemaSource).
    #[error("query failed: {query}: {message}")]
    Engine { query: String, message: String },
}
