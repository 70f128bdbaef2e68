//! One `Neo4jRepository` interface per node entity.

use std::collections::BTreeSet;
use std::fmt::Write;

use crate::java;
use crate::{ArtifactKind, CodegenError, GeneratedArtifact, GeneratorConfig};

const NEO4J_REPOSITORY: &str = "org.springframework.data.neo4j.repository.Neo4jRepository";
const STEREOTYPE_REPOSITORY: &str = "org.springframework.stereotype.Repository";

pub struct RepositorySynthesizer<'a> {
    config: &'a GeneratorConfig,
}

impl<'a> RepositorySynthesizer<'a> {
    pub fn new(config: &'a GeneratorConfig) -> Self {
        Self { config }
    }

    /// Repositories for exactly the given entity names, in name order.
    pub fn synthesize(
        &self,
        entity_names: &BTreeSet<String>,
    ) -> Result<Vec<GeneratedArtifact>, CodegenError> {
        entity_names
            .iter()
            .map(|entity| self.repository(entity))
            .collect()
    }

    pub fn repository(&self, entity: &str) -> Result<GeneratedArtifact, CodegenError> {
        let name = format!("{entity}Repository");
        let imports: BTreeSet<String> = [
            format!("{}.{entity}", self.config.entity_package),
            NEO4J_REPOSITORY.to_string(),
            STEREOTYPE_REPOSITORY.to_string(),
        ]
        .into_iter()
        .collect();

        let mut body = String::new();
        java::write_header(&mut body, &self.config.repository_package, &imports)?;
        writeln!(body, "@Repository")?;
        writeln!(
            body,
            "public interface {name} extends Neo4jRepository<{entity}, Long> {{"
        )?;
        writeln!(body, "}}")?;

        Ok(GeneratedArtifact {
            name,
            kind: ArtifactKind::Repository,
            body,
        })
    }
}
