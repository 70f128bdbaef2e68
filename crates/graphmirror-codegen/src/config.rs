use std::path::PathBuf;

use crate::java;
use crate::CodegenError;

/// What to do when two graph names generate the same Java name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CollisionPolicy {
    /// Abort before anything is written.
    #[default]
    Fail,
    /// Keep the later declaration and log a warning.
    LastWins,
}

#[derive(Debug, Clone)]
pub struct GeneratorConfig {
    /// Project directory the source tree lives in.
    pub out_root: PathBuf,
    /// Source tree relative to `out_root`, e.g. `src/main/java`.
    pub source_root: PathBuf,
    pub entity_package: String,
    pub repository_package: String,
    pub on_collision: CollisionPolicy,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            out_root: PathBuf::from("."),
            source_root: PathBuf::from("src/main/java"),
            entity_package: "main.entity".to_string(),
            repository_package: "main.repository".to_string(),
            on_collision: CollisionPolicy::Fail,
        }
    }
}

impl GeneratorConfig {
    pub fn entity_dir(&self) -> PathBuf {
        self.package_dir(&self.entity_package)
    }

    pub fn repository_dir(&self) -> PathBuf {
        self.package_dir(&self.repository_package)
    }

    fn package_dir(&self, package: &str) -> PathBuf {
        let mut dir = self.out_root.join(&self.source_root);
        dir.extend(package.split('.'));
        dir
    }

    pub fn validate(&self) -> Result<(), CodegenError> {
        for package in [&self.entity_package, &self.repository_package] {
            if !java::is_package_name(package) {
                return Err(CodegenError::InvalidPackage {
                    package: package.clone(),
                });
            }
        }
        Ok(())
    }
}
