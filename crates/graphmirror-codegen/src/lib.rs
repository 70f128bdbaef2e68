//! Spring Data Neo4j code synthesis for graphmirror
//!
//! Turns a [`GraphSchema`](graphmirror_schema::GraphSchema) into Java
//! sources:
//! - one `@Node` entity per label
//! - one `@RelationshipProperties` entity per relationship type that has
//!   instances
//! - one `Neo4jRepository` interface per node entity
//!
//! Synthesis is pure and deterministic; only [`OutputDir`] touches the
//! filesystem. [`Generator`] runs the phases in their fixed order.

mod artifact;
mod config;
pub mod entity;
mod error;
mod generator;
mod java;
pub mod repository;
mod writer;

pub use artifact::{ArtifactKind, GeneratedArtifact, SOURCE_EXTENSION};
pub use config::{CollisionPolicy, GeneratorConfig};
pub use entity::{entity_class_name, relationship_class_name, EntityArtifacts, EntitySynthesizer};
pub use error::CodegenError;
pub use generator::{EntityPhase, GenerationReport, Generator};
pub use repository::RepositorySynthesizer;
pub use writer::OutputDir;
