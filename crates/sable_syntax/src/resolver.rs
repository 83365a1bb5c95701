//! Include resolution.
//!
//! The parser never touches the filesystem directly: it asks a [`ModuleResolver`] for the source behind an
//! `include` path. Two strategies are tried in order:
//!
//! 1. a sibling file `<base_dir>/<path>.<ext>`;
//! 2. a directory `<base_dir>/<path>/` holding `<module_file>.<ext>`, in which case the include is a *module*.
//!
//! [`FsResolver`] reads from disk; [`MemoryResolver`] serves a fixed map of files (tests, editors, tooling).

use std::collections::BTreeMap;
use std::fs;
use std::path::{Component, Path, PathBuf};

use thiserror::Error;

use crate::config::ParseConfig;

/// Error during include resolution.
#[derive(Debug, Error)]
pub enum ResolveError {
    #[error("cannot resolve include '{path}': neither '{}' nor '{}' exists", file.display(), module.display())]
    NotFound {
        path: String,
        file: PathBuf,
        module: PathBuf,
    },

    #[error("failed to read '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("circular include of '{}'", .0.display())]
    Circular(PathBuf),
}

/// Source text located for an include.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedModule {
    pub source: String,
    /// File the source was read from.
    pub file: PathBuf,
    /// Directory nested includes resolve against.
    pub dir: PathBuf,
    /// `true` when the include named a directory holding a module file.
    pub is_module: bool,
}

/// Locate the source text for an `include`.
pub trait ModuleResolver {
    fn resolve(&self, base_dir: &Path, include_path: &str) -> Result<ResolvedModule, ResolveError>;
}

/// Candidate locations for `include_path`: the sibling file, then the directory module file.
fn candidates(base_dir: &Path, include_path: &str, extension: &str, module_file: &str) -> (PathBuf, PathBuf) {
    let file = base_dir.join(format!("{include_path}.{extension}"));
    let module = base_dir.join(include_path).join(format!("{module_file}.{extension}"));
    (file, module)
}

/// Resolves includes against the filesystem.
#[derive(Debug, Clone)]
pub struct FsResolver {
    extension: String,
    module_file: String,
}

impl Default for FsResolver {
    fn default() -> Self {
        Self::from_config(&ParseConfig::default())
    }
}

impl FsResolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use the extension and module file stem from `config`.
    pub fn from_config(config: &ParseConfig) -> Self {
        Self {
            extension: config.extension.clone(),
            module_file: config.module_file.clone(),
        }
    }

    fn read(path: &Path) -> Result<String, ResolveError> {
        fs::read_to_string(path).map_err(|source| ResolveError::Io {
            path: path.to_path_buf(),
            source,
        })
    }
}

impl ModuleResolver for FsResolver {
    #[tracing::instrument(skip(self), fields(base_dir = %base_dir.display()))]
    fn resolve(&self, base_dir: &Path, include_path: &str) -> Result<ResolvedModule, ResolveError> {
        let (file, module) = candidates(base_dir, include_path, &self.extension, &self.module_file);

        if file.is_file() {
            let source = Self::read(&file)?;
            let file = fs::canonicalize(&file).unwrap_or(file);
            let dir = file.parent().map(Path::to_path_buf).unwrap_or_else(|| base_dir.to_path_buf());
            return Ok(ResolvedModule {
                source,
                file,
                dir,
                is_module: false,
            });
        }

        if module.is_file() {
            let source = Self::read(&module)?;
            let file = fs::canonicalize(&module).unwrap_or(module);
            let dir = file.parent().map(Path::to_path_buf).unwrap_or_else(|| base_dir.join(include_path));
            return Ok(ResolvedModule {
                source,
                file,
                dir,
                is_module: true,
            });
        }

        Err(ResolveError::NotFound {
            path: include_path.to_string(),
            file,
            module,
        })
    }
}

/// Resolves includes from an in-memory map of files.
///
/// Paths are compared after dropping `.` components, so `./lib.sbl` and `lib.sbl` name the same file.
#[derive(Debug, Clone)]
pub struct MemoryResolver {
    files: BTreeMap<PathBuf, String>,
    extension: String,
    module_file: String,
}

impl Default for MemoryResolver {
    fn default() -> Self {
        let config = ParseConfig::default();
        Self {
            files: BTreeMap::new(),
            extension: config.extension,
            module_file: config.module_file,
        }
    }
}

impl MemoryResolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add (or replace) a file.
    pub fn with_file(mut self, path: impl AsRef<Path>, source: impl Into<String>) -> Self {
        self.insert(path, source);
        self
    }

    /// Add (or replace) a file.
    pub fn insert(&mut self, path: impl AsRef<Path>, source: impl Into<String>) {
        self.files.insert(normalize(path.as_ref()), source.into());
    }

    fn lookup(&self, path: &Path) -> Option<(PathBuf, String)> {
        let key = normalize(path);
        self.files.get(&key).map(|source| (key, source.clone()))
    }
}

fn normalize(path: &Path) -> PathBuf {
    path.components().filter(|c| !matches!(c, Component::CurDir)).collect()
}

impl ModuleResolver for MemoryResolver {
    fn resolve(&self, base_dir: &Path, include_path: &str) -> Result<ResolvedModule, ResolveError> {
        let (file, module) = candidates(base_dir, include_path, &self.extension, &self.module_file);

        let (found, is_module) = match self.lookup(&file) {
            Some(found) => (found, false),
            None => match self.lookup(&module) {
                Some(found) => (found, true),
                None => {
                    return Err(ResolveError::NotFound {
                        path: include_path.to_string(),
                        file,
                        module,
                    });
                }
            },
        };

        let (file, source) = found;
        let dir = file.parent().map(Path::to_path_buf).unwrap_or_default();
        Ok(ResolvedModule {
            source,
            file,
            dir,
            is_module,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_resolver_prefers_sibling_file() {
        let resolver = MemoryResolver::new()
            .with_file("lib.sbl", "let a = 1")
            .with_file("lib/module.sbl", "let b = 2");
        let module = resolver.resolve(Path::new("."), "lib").unwrap();
        assert_eq!(module.source, "let a = 1");
        assert!(!module.is_module);
        assert_eq!(module.file, PathBuf::from("lib.sbl"));
    }

    #[test]
    fn test_memory_resolver_falls_back_to_module_file() {
        let resolver = MemoryResolver::new().with_file("./pkg/util/module.sbl", "let u = 1");
        let module = resolver.resolve(Path::new("pkg"), "util").unwrap();
        assert!(module.is_module);
        assert_eq!(module.dir, PathBuf::from("pkg/util"));
    }

    #[test]
    fn test_memory_resolver_not_found_names_both_candidates() {
        let err = MemoryResolver::new().resolve(Path::new("."), "missing").unwrap_err();
        let message = err.to_string();
        assert!(message.contains("missing.sbl"), "{message}");
        assert!(message.contains("module.sbl"), "{message}");
        assert!(matches!(err, ResolveError::NotFound { .. }));
    }

    #[test]
    fn test_fs_resolver_uses_configured_extension() {
        let config = ParseConfig::new().with_extension("script").with_module_file("index");
        let resolver = FsResolver::from_config(&config);
        let err = resolver.resolve(Path::new("/nonexistent-dir"), "thing").unwrap_err();
        match err {
            ResolveError::NotFound { file, module, .. } => {
                assert_eq!(file, PathBuf::from("/nonexistent-dir/thing.script"));
                assert_eq!(module, PathBuf::from("/nonexistent-dir/thing/index.script"));
            }
            other => panic!("expected NotFound, got {other:?}"),
        }
    }

    #[test]
    fn test_circular_error_message() {
        let err = ResolveError::Circular(PathBuf::from("a.sbl"));
        assert_eq!(err.to_string(), "circular include of 'a.sbl'");
    }
}
