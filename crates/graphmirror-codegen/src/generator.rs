//! The generation pipeline: entities first, then repositories.

use std::collections::BTreeSet;
use std::path::PathBuf;

use graphmirror_introspect::{GraphSchema, Introspector, SchemaSource};
use tracing::info;

use crate::entity::EntitySynthesizer;
use crate::repository::RepositorySynthesizer;
use crate::{CodegenError, GeneratorConfig, OutputDir};

/// Result of the entity phase.
#[derive(Debug, Clone, Default)]
pub struct EntityPhase {
    /// Node entity class names; the repository phase emits one per name.
    pub entity_names: BTreeSet<String>,
    pub node_paths: Vec<PathBuf>,
    pub relationship_paths: Vec<PathBuf>,
}

/// Every file a run wrote, grouped by artifact kind.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GenerationReport {
    pub node_entities: Vec<PathBuf>,
    pub relationship_entities: Vec<PathBuf>,
    pub repositories: Vec<PathBuf>,
}

impl GenerationReport {
    pub fn total(&self) -> usize {
        self.node_entities.len() + self.relationship_entities.len() + self.repositories.len()
    }
}

#[derive(Debug, Clone)]
pub struct Generator {
    config: GeneratorConfig,
}

impl Generator {
    pub fn new(config: GeneratorConfig) -> Result<Self, CodegenError> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Synthesize all entity classes, then write them.
    ///
    /// A write failure aborts the remaining writes; files already written
    /// stay on disk.
    pub fn generate_entities(&self, schema: &GraphSchema) -> Result<EntityPhase, CodegenError> {
        let artifacts = EntitySynthesizer::new(&self.config).synthesize(schema)?;
        let out = OutputDir::acquire(self.config.entity_dir())?;

        let mut phase = EntityPhase {
            entity_names: artifacts.node_entity_names(),
            ..EntityPhase::default()
        };
        for artifact in artifacts.nodes.values() {
            phase.node_paths.push(out.write(artifact)?);
        }
        for artifact in artifacts.relationships.values() {
            phase.relationship_paths.push(out.write(artifact)?);
        }

        info!(
            dir = %out.path().display(),
            nodes = phase.node_paths.len(),
            relationships = phase.relationship_paths.len(),
            "entity generation finished"
        );
        Ok(phase)
    }

    pub fn generate_repositories(
        &self,
        entity_names: &BTreeSet<String>,
    ) -> Result<Vec<PathBuf>, CodegenError> {
        let artifacts = RepositorySynthesizer::new(&self.config).synthesize(entity_names)?;
        let out = OutputDir::acquire(self.config.repository_dir())?;

        let paths = artifacts
            .iter()
            .map(|artifact| out.write(artifact))
            .collect::<Result<Vec<_>, _>>()?;

        info!(
            dir = %out.path().display(),
            repositories = paths.len(),
            "repository generation finished"
        );
        Ok(paths)
    }

    pub fn generate(&self, schema: &GraphSchema) -> Result<GenerationReport, CodegenError> {
        let entities = self.generate_entities(schema)?;
        let repositories = self.generate_repositories(&entities.entity_names)?;
        Ok(GenerationReport {
            node_entities: entities.node_paths,
            relationship_entities: entities.relationship_paths,
            repositories,
        })
    }

    /// Introspect `source` completely, then generate from the result.
    pub fn generate_from_source<S: SchemaSource>(
        &self,
        source: S,
    ) -> Result<GenerationReport, CodegenError> {
        let schema = Introspector::new(source).introspect()?;
        self.generate(&schema)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::CollisionPolicy;
    use graphmirror_introspect::memory::MemoryGraph;
    use graphmirror_introspect::IntrospectError;
    use graphmirror_schema::{NodeSchema, PropertyType, RelationshipSchema};
    use std::fs;
    use std::path::Path;

    fn generator(root: &Path) -> Generator {
        Generator::new(GeneratorConfig {
            out_root: root.to_path_buf(),
            ..GeneratorConfig::default()
        })
        .unwrap()
    }

    fn people() -> MemoryGraph {
        let mut graph = MemoryGraph::new();
        let ann = graph.add_node(&["PERSON"], &[("name", "STRING"), ("age", "INTEGER")]);
        let bob = graph.add_node(&["PERSON"], &[("name", "STRING")]);
        graph.add_relationship(ann, "KNOWS", bob, &[]);
        graph
    }

    fn file_names(paths: &[PathBuf]) -> Vec<String> {
        paths
            .iter()
            .filter_map(|p| p.file_name())
            .map(|n| n.to_string_lossy().into_owned())
            .collect()
    }

    #[test]
    fn pipeline_writes_entities_then_repositories() {
        let dir = tempfile::tempdir().unwrap();
        let report = generator(dir.path()).generate_from_source(people()).unwrap();

        assert_eq!(file_names(&report.node_entities), ["Person.java"]);
        assert_eq!(
            file_names(&report.relationship_entities),
            ["KnowsRelationship.java"]
        );
        assert_eq!(file_names(&report.repositories), ["PersonRepository.java"]);
        assert_eq!(report.total(), 3);

        let entity_dir = dir.path().join("src/main/java/main/entity");
        let person = fs::read_to_string(entity_dir.join("Person.java")).unwrap();
        assert!(person.contains("private Set<Person> knows;"));
        assert!(person.contains("private Set<Person> knowsIncoming;"));
        assert!(dir
            .path()
            .join("src/main/java/main/repository/PersonRepository.java")
            .is_file());
    }

    #[test]
    fn empty_schema_still_creates_both_directories() {
        let dir = tempfile::tempdir().unwrap();
        let report = generator(dir.path())
            .generate(&GraphSchema::default())
            .unwrap();
        assert_eq!(report.total(), 0);
        assert!(dir.path().join("src/main/java/main/entity").is_dir());
        assert!(dir.path().join("src/main/java/main/repository").is_dir());
    }

    #[test]
    fn collision_under_fail_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let schema = GraphSchema::new(
            vec![
                NodeSchema::new("ORDER_ITEM").with_property("qty", PropertyType::Integer),
                NodeSchema::new("order item"),
            ],
            vec![],
        );
        let err = generator(dir.path()).generate(&schema).unwrap_err();
        assert!(matches!(err, CodegenError::NameCollision { .. }));
        assert!(!dir.path().join("src").exists());
    }

    #[test]
    fn last_wins_keeps_repositories_in_step_with_entities() {
        let dir = tempfile::tempdir().unwrap();
        let generator = Generator::new(GeneratorConfig {
            out_root: dir.path().to_path_buf(),
            on_collision: CollisionPolicy::LastWins,
            ..GeneratorConfig::default()
        })
        .unwrap();
        let schema = GraphSchema::new(
            vec![NodeSchema::new("ORDER_ITEM"), NodeSchema::new("order item")],
            vec![],
        );
        let report = generator.generate(&schema).unwrap();
        assert_eq!(file_names(&report.node_entities), ["OrderItem.java"]);
        assert_eq!(file_names(&report.repositories), ["OrderItemRepository.java"]);
    }

    #[test]
    fn introspection_failure_aborts_before_writing() {
        let dir = tempfile::tempdir().unwrap();
        let mut graph = people();
        graph.fail_on_label("PERSON");

        let err = generator(dir.path()).generate_from_source(graph).unwrap_err();
        assert!(matches!(
            err,
            CodegenError::Introspect(IntrospectError::Engine { .. })
        ));
        assert!(!dir.path().join("src").exists());
    }

    #[test]
    fn write_failure_keeps_earlier_files_and_stops_the_run() {
        let dir = tempfile::tempdir().unwrap();
        let schema = GraphSchema::new(
            vec![
                NodeSchema::new("CITY"),
                NodeSchema::new("PERSON").with_outgoing("KNOWS", "PERSON"),
            ],
            vec![RelationshipSchema::new("KNOWS", "PERSON", "PERSON")],
        );
        let entities = dir.path().join("src/main/java/main/entity");
        fs::create_dir_all(entities.join("Person.java")).unwrap();

        let err = generator(dir.path()).generate(&schema).unwrap_err();
        match err {
            CodegenError::Write { artifact, .. } => assert_eq!(artifact, "Person"),
            other => panic!("unexpected error: {other}"),
        }
        assert!(entities.join("City.java").is_file());
        assert!(!entities.join("KnowsRelationship.java").exists());
        assert!(!dir.path().join("src/main/java/main/repository").exists());
    }

    #[test]
    fn invalid_packages_are_rejected_up_front() {
        let err = Generator::new(GeneratorConfig {
            repository_package: "main.repository.".to_string(),
            ..GeneratorConfig::default()
        })
        .unwrap_err();
        assert!(matches!(err, CodegenError::InvalidPackage { .. }));
    }
}
