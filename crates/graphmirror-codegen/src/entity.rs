//! Entity synthesis: one `@Node` class per label, one
//! `@RelationshipProperties` class per sampled relationship type.
//!
//! All entity classes share one directory, so node and relationship class
//! names live in a single namespace and collisions are checked across both.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt::Write;

use graphmirror_schema::{class_name_of, field_name_of, GraphSchema, NodeSchema, RelationshipSchema};
use tracing::{debug, warn};

use crate::java::{self, ClassFields, Field, SCHEMA};
use crate::{ArtifactKind, CodegenError, CollisionPolicy, GeneratedArtifact, GeneratorConfig};

/// Java class name for a node label.
pub fn entity_class_name(label: &str) -> Result<String, CodegenError> {
    let class = class_name_of(label);
    if class.is_empty() {
        return Err(CodegenError::EmptyName {
            kind: "label",
            identifier: label.to_string(),
        });
    }
    Ok(java::class_identifier(&class))
}

/// Java class name for a relationship type: `PART_OF` → `PartOfRelationship`.
pub fn relationship_class_name(rel_type: &str) -> Result<String, CodegenError> {
    let class = class_name_of(rel_type);
    if class.is_empty() {
        return Err(CodegenError::EmptyName {
            kind: "relationship type",
            identifier: rel_type.to_string(),
        });
    }
    Ok(java::class_identifier(&format!("{class}Relationship")))
}

fn field_name(kind: &'static str, identifier: &str) -> Result<String, CodegenError> {
    let name = field_name_of(identifier);
    if name.is_empty() {
        return Err(CodegenError::EmptyName {
            kind,
            identifier: identifier.to_string(),
        });
    }
    Ok(name)
}

fn schema_import(name: &str) -> String {
    format!("{SCHEMA}.{name}")
}

/// Entity artifacts keyed by class name.
#[derive(Debug, Default)]
pub struct EntityArtifacts {
    pub nodes: BTreeMap<String, GeneratedArtifact>,
    pub relationships: BTreeMap<String, GeneratedArtifact>,
}

impl EntityArtifacts {
    /// Names of the node entities; exactly the set of repository targets.
    pub fn node_entity_names(&self) -> BTreeSet<String> {
        self.nodes.keys().cloned().collect()
    }
}

pub struct EntitySynthesizer<'a> {
    config: &'a GeneratorConfig,
}

impl<'a> EntitySynthesizer<'a> {
    pub fn new(config: &'a GeneratorConfig) -> Self {
        Self { config }
    }

    /// Synthesize every entity in the schema. Nothing is written here, so a
    /// collision under [`CollisionPolicy::Fail`] leaves the output untouched.
    pub fn synthesize(&self, schema: &GraphSchema) -> Result<EntityArtifacts, CodegenError> {
        let mut artifacts = EntityArtifacts::default();
        let mut origins: BTreeMap<String, String> = BTreeMap::new();

        for node in &schema.nodes {
            let artifact = self.node_entity(node)?;
            self.claim(&mut origins, &artifact.name, format!("label `{}`", node.label))?;
            artifacts.relationships.remove(&artifact.name);
            artifacts.nodes.insert(artifact.name.clone(), artifact);
        }

        for rel in &schema.relationships {
            let artifact = self.relationship_entity(rel)?;
            self.claim(
                &mut origins,
                &artifact.name,
                format!("relationship type `{}`", rel.rel_type),
            )?;
            artifacts.nodes.remove(&artifact.name);
            artifacts.relationships.insert(artifact.name.clone(), artifact);
        }

        debug!(
            nodes = artifacts.nodes.len(),
            relationships = artifacts.relationships.len(),
            "synthesized entities"
        );
        Ok(artifacts)
    }

    fn claim(
        &self,
        origins: &mut BTreeMap<String, String>,
        name: &str,
        origin: String,
    ) -> Result<(), CodegenError> {
        if let Some(first) = origins.get(name) {
            match self.config.on_collision {
                CollisionPolicy::Fail => {
                    return Err(CodegenError::NameCollision {
                        name: name.to_string(),
                        first: first.clone(),
                        second: origin,
                    });
                }
                CollisionPolicy::LastWins => warn!(
                    class = name,
                    replaced = %first,
                    by = %origin,
                    "class name collision; keeping the later declaration"
                ),
            }
        }
        origins.insert(name.to_string(), origin);
        Ok(())
    }

    pub fn node_entity(&self, node: &NodeSchema) -> Result<GeneratedArtifact, CodegenError> {
        let class = entity_class_name(&node.label)?;
        let mut imports: BTreeSet<String> = ["lombok.Data".to_string()]
            .into_iter()
            .chain(["GeneratedValue", "Id", "Node"].map(schema_import))
            .collect();

        let mut fields = ClassFields::new(&class, self.config.on_collision);
        fields.push_fixed(
            Field::new("id", "Long", "identity field")
                .annotated("@Id")
                .annotated("@GeneratedValue"),
        );

        for (key, ty) in &node.properties {
            let java_type = ty.java_type();
            if let Some(import) = java_type.import() {
                imports.insert(import.to_string());
            }
            let field = property_field(&fields, key, java_type.simple_name())?;
            if !field.annotations.is_empty() {
                imports.insert(schema_import("Property"));
            }
            fields.push(field)?;
        }

        let connectivity = node
            .outgoing
            .iter()
            .map(|(rel, label)| (rel, label, "OUTGOING", ""))
            .chain(
                node.incoming
                    .iter()
                    .map(|(rel, label)| (rel, label, "INCOMING", "Incoming")),
            );
        for (rel_type, neighbor, direction, suffix) in connectivity {
            let neighbor_class = entity_class_name(neighbor)?;
            let name = format!("{}{suffix}", field_name("relationship type", rel_type)?);
            fields.push(
                Field::new(
                    java::identifier(&name),
                    format!("Set<{neighbor_class}>"),
                    format!("{} relationship `{rel_type}`", direction.to_lowercase()),
                )
                .annotated(format!(
                    "@Relationship(type = {}, direction = Relationship.Direction.{direction})",
                    java::string_literal(rel_type)
                )),
            )?;
            imports.insert("java.util.Set".to_string());
            imports.insert(schema_import("Relationship"));
        }

        let annotations = [
            "@Data".to_string(),
            format!("@Node({})", java::string_literal(&node.label)),
        ];
        let body = render_class(
            &self.config.entity_package,
            &imports,
            &annotations,
            &class,
            &fields,
        )?;
        Ok(GeneratedArtifact {
            name: class,
            kind: ArtifactKind::NodeEntity,
            body,
        })
    }

    pub fn relationship_entity(
        &self,
        rel: &RelationshipSchema,
    ) -> Result<GeneratedArtifact, CodegenError> {
        let class = relationship_class_name(&rel.rel_type)?;
        let start_class = entity_class_name(&rel.start_label)?;
        let end_class = entity_class_name(&rel.end_label)?;

        let mut imports: BTreeSet<String> = ["lombok.Data".to_string()]
            .into_iter()
            .chain(
                [
                    "GeneratedValue",
                    "Relationship",
                    "RelationshipId",
                    "RelationshipProperties",
                    "TargetNode",
                ]
                .map(schema_import),
            )
            .collect();

        let mut fields = ClassFields::new(&class, self.config.on_collision);
        fields.push_fixed(
            Field::new("id", "Long", "identity field")
                .annotated("@RelationshipId")
                .annotated("@GeneratedValue"),
        );
        fields.push_fixed(
            Field::new("startNode", start_class, "start node").annotated(format!(
                "@Relationship(type = {})",
                java::string_literal(&rel.rel_type)
            )),
        );
        fields.push_fixed(Field::new("endNode", end_class, "end node").annotated("@TargetNode"));

        // Relationship properties are not type-sampled; they are all strings.
        for key in &rel.properties {
            let field = property_field(&fields, key, "String")?;
            if !field.annotations.is_empty() {
                imports.insert(schema_import("Property"));
            }
            fields.push(field)?;
        }

        let annotations = ["@Data".to_string(), "@RelationshipProperties".to_string()];
        let body = render_class(
            &self.config.entity_package,
            &imports,
            &annotations,
            &class,
            &fields,
        )?;
        Ok(GeneratedArtifact {
            name: class,
            kind: ArtifactKind::RelationshipEntity,
            body,
        })
    }
}

/// Field for a graph property. A field that would shadow a fixed field is
/// renamed with a `Property` suffix; `@Property` maps any renamed field back
/// to its key.
fn property_field(fields: &ClassFields, key: &str, ty: &str) -> Result<Field, CodegenError> {
    let mut name = java::identifier(&field_name("property key", key)?);
    if fields.is_fixed(&name) {
        debug!(key, field = %name, "property shadows a fixed field; renaming");
        name.push_str("Property");
    }

    let field = Field::new(name, ty, format!("property `{key}`"));
    if field.name == key {
        Ok(field)
    } else {
        let annotation = format!("@Property({})", java::string_literal(key));
        Ok(field.annotated(annotation))
    }
}

fn render_class(
    package: &str,
    imports: &BTreeSet<String>,
    annotations: &[String],
    class: &str,
    fields: &ClassFields,
) -> Result<String, CodegenError> {
    let mut out = String::new();
    java::write_header(&mut out, package, imports)?;
    for annotation in annotations {
        writeln!(out, "{annotation}")?;
    }
    writeln!(out, "public class {class} {{")?;
    fields.write(&mut out)?;
    writeln!(out, "}}")?;
    Ok(out)
}
