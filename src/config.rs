//! Compilation options shared by the library entry points and the CLI.

use std::path::{Path, PathBuf};

/// File extension of serialized compilation units.
pub const UNIT_EXTENSION: &str = "snbc";

/// Unit name used when none can be derived from the input.
pub const DEFAULT_UNIT_NAME: &str = "main";

/// How the parser treats statements it cannot parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RecoveryMode {
    /// Drop the statement and skip one token, reporting nothing.
    #[default]
    Lenient,
    /// Record a diagnostic, skip past the end-of-line that closes the
    /// statement and fail the parse.
    Strict,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ParseOptions {
    /// Name given to the program and to the compilation unit built from it
    pub unit_name: String,
    pub recovery: RecoveryMode,
}

impl Default for ParseOptions {
    fn default() -> Self {
        ParseOptions {
            unit_name: String::from(DEFAULT_UNIT_NAME),
            recovery: RecoveryMode::default(),
        }
    }
}

impl ParseOptions {
    pub fn with_unit_name(mut self, unit_name: impl Into<String>) -> Self {
        self.unit_name = unit_name.into();
        self
    }

    pub fn with_recovery(mut self, recovery: RecoveryMode) -> Self {
        self.recovery = recovery;
        self
    }

    pub fn strict() -> Self {
        ParseOptions::default().with_recovery(RecoveryMode::Strict)
    }
}

/// Derives a unit name from a source path, `src/main.sn` gives `main`.
pub fn unit_name_for(path: &Path) -> String {
    path.file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .filter(|stem| !stem.is_empty())
        .unwrap_or_else(|| String::from(DEFAULT_UNIT_NAME))
}

/// `<directory>/<unit_name>.<extension>`
pub fn output_path(directory: &Path, unit_name: &str, extension: &str) -> PathBuf {
    directory.join(format!("{}.{}", unit_name, extension))
}

/// Companion artifact written next to `artifact`, `out/app.snbc` gives `out/app.ll`.
pub fn sibling_path(artifact: &Path, extension: &str) -> PathBuf {
    artifact.with_extension(extension)
}

#[cfg(test)]
mod tests {
    use std::path::{Path, PathBuf};

    use super::*;

    #[test]
    fn test_default_options() {
        let options = ParseOptions::default();
        assert_eq!(options.unit_name, "main");
        assert_eq!(options.recovery, RecoveryMode::Lenient);
        assert_eq!(ParseOptions::strict().recovery, RecoveryMode::Strict);
    }

    #[test]
    fn test_unit_name_for() {
        assert_eq!(unit_name_for(Path::new("src/main.sn")), "main");
        assert_eq!(unit_name_for(Path::new("hello")), "hello");
        assert_eq!(unit_name_for(Path::new("")), "main");
    }

    #[test]
    fn test_output_path() {
        assert_eq!(
            output_path(Path::new("build"), "main", UNIT_EXTENSION),
            PathBuf::from("build/main.snbc")
        );
    }

    #[test]
    fn test_sibling_path_follows_output() {
        assert_eq!(
            sibling_path(Path::new("out/app.snbc"), "ll"),
            PathBuf::from("out/app.ll")
        );
        assert_eq!(sibling_path(Path::new("app"), "ll"), PathBuf::from("app.ll"));
    }
}
