//! Parse configuration.

use std::path::{Path, PathBuf};

/// Settings for one parse: how positions are labelled and where includes are looked up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseConfig {
    /// Name reported in every position and diagnostic
    pub filename: String,
    /// Directory `include` paths are resolved against
    pub work_dir: PathBuf,
    /// Source file extension, without the dot
    pub extension: String,
    /// File stem looked up inside a directory include (`<dir>/<module_file>.<extension>`)
    pub module_file: String,
}

impl Default for ParseConfig {
    fn default() -> Self {
        Self {
            filename: "<input>".to_string(),
            work_dir: PathBuf::from("."),
            extension: "sbl".to_string(),
            module_file: "module".to_string(),
        }
    }
}

impl ParseConfig {
    /// Create a new config with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Config for parsing the file at `path`: positions name the file, includes resolve next to it.
    pub fn for_file(path: &Path) -> Self {
        let work_dir = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        Self::default()
            .with_filename(path.display().to_string())
            .with_work_dir(work_dir)
    }

    /// Set the filename used in positions
    pub fn with_filename(mut self, filename: impl Into<String>) -> Self {
        self.filename = filename.into();
        self
    }

    /// Set the include base directory
    pub fn with_work_dir(mut self, work_dir: impl Into<PathBuf>) -> Self {
        self.work_dir = work_dir.into();
        self
    }

    /// Set the source extension (a leading `.` is ignored)
    pub fn with_extension(mut self, extension: impl Into<String>) -> Self {
        let extension = extension.into();
        self.extension = extension.trim_start_matches('.').to_string();
        self
    }

    /// Set the module file stem used for directory includes
    pub fn with_module_file(mut self, module_file: impl Into<String>) -> Self {
        self.module_file = module_file.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ParseConfig::default();
        assert_eq!(config.filename, "<input>");
        assert_eq!(config.work_dir, PathBuf::from("."));
        assert_eq!(config.extension, "sbl");
        assert_eq!(config.module_file, "module");
    }

    #[test]
    fn test_new_equals_default() {
        assert_eq!(ParseConfig::new(), ParseConfig::default());
    }

    #[test]
    fn test_for_file_uses_parent_directory() {
        let config = ParseConfig::for_file(Path::new("scripts/app/main.sbl"));
        assert_eq!(config.filename, "scripts/app/main.sbl");
        assert_eq!(config.work_dir, PathBuf::from("scripts/app"));
    }

    #[test]
    fn test_for_bare_file_uses_current_directory() {
        let config = ParseConfig::for_file(Path::new("main.sbl"));
        assert_eq!(config.work_dir, PathBuf::from("."));
    }

    #[test]
    fn test_with_extension_strips_dot() {
        let config = ParseConfig::new().with_extension(".script");
        assert_eq!(config.extension, "script");
        // Other fields unchanged
        assert_eq!(config.module_file, "module");
    }

    #[test]
    fn test_builder_chain_all() {
        let config = ParseConfig::new()
            .with_filename("x.sbl")
            .with_work_dir("/tmp/project")
            .with_extension("sb")
            .with_module_file("index");
        assert_eq!(config.filename, "x.sbl");
        assert_eq!(config.work_dir, PathBuf::from("/tmp/project"));
        assert_eq!(config.extension, "sb");
        assert_eq!(config.module_file, "index");
    }
}
