/// Extension of every generated file.
pub const SOURCE_EXTENSION: &str = "java";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArtifactKind {
    NodeEntity,
    RelationshipEntity,
    Repository,
}

/// One generated source file, not yet written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedArtifact {
    /// Class or interface name; also the file stem.
    pub name: String,
    pub kind: ArtifactKind,
    pub body: String,
}

impl GeneratedArtifact {
    pub fn file_name(&self) -> String {
        format!("{}.{SOURCE_EXTENSION}", self.name)
    }
}
