use std::fs;
use std::path::{Path, PathBuf};

use tracing::info;

use crate::{CodegenError, GeneratedArtifact};

/// An existing output directory. Files written into it replace earlier ones
/// of the same name.
#[derive(Debug, Clone)]
pub struct OutputDir {
    path: PathBuf,
}

impl OutputDir {
    /// Create `path` and any missing parents.
    pub fn acquire(path: impl Into<PathBuf>) -> Result<Self, CodegenError> {
        let path = path.into();
        fs::create_dir_all(&path).map_err(|source| CodegenError::CreateDir {
            path: path.clone(),
            source,
        })?;
        Ok(Self { path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn write(&self, artifact: &GeneratedArtifact) -> Result<PathBuf, CodegenError> {
        let path = self.path.join(artifact.file_name());
        fs::write(&path, &artifact.body).map_err(|source| CodegenError::Write {
            artifact: artifact.name.clone(),
            path: path.clone(),
            source,
        })?;
        info!(
            artifact = %artifact.name,
            path = %path.display(),
            bytes = artifact.body.len(),
            "wrote artifact"
        );
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ArtifactKind;

    fn artifact(name: &str, body: &str) -> GeneratedArtifact {
        GeneratedArtifact {
            name: name.to_string(),
            kind: ArtifactKind::NodeEntity,
            body: body.to_string(),
        }
    }

    #[test]
    fn acquire_creates_nested_directories() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("src/main/java/main/entity");
        let out = OutputDir::acquire(&nested).unwrap();
        assert!(nested.is_dir());
        assert_eq!(out.path(), nested);

        // Acquiring an existing directory is fine.
        OutputDir::acquire(&nested).unwrap();
    }

    #[test]
    fn write_overwrites_previous_content() {
        let dir = tempfile::tempdir().unwrap();
        let out = OutputDir::acquire(dir.path()).unwrap();

        let path = out.write(&artifact("Person", "first")).unwrap();
        assert_eq!(path, dir.path().join("Person.java"));
        out.write(&artifact("Person", "second")).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "second");
    }

    #[test]
    fn acquire_fails_under_a_file() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("blocker");
        fs::write(&blocker, "").unwrap();

        let err = OutputDir::acquire(blocker.join("entity")).unwrap_err();
        assert!(matches!(err, CodegenError::CreateDir { .. }));
    }

    #[test]
    fn write_failure_names_the_artifact() {
        let dir = tempfile::tempdir().unwrap();
        let out = OutputDir::acquire(dir.path()).unwrap();
        fs::create_dir(dir.path().join("Person.java")).unwrap();

        match out.write(&artifact("Person", "body")).unwrap_err() {
            CodegenError::Write { artifact, .. } => assert_eq!(artifact, "Person"),
            other => panic!("unexpected error: {other}"),
        }
    }
}
