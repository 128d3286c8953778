use crate::errors::{FileOperation, IoError};
use indexmap::IndexMap;
use miette::Diagnostic;
use serde::Deserialize;
use std::{
    fs,
    path::{Component, Path, PathBuf},
};
use thiserror::Error;

#[derive(Debug, Error, Diagnostic)]
pub enum LayoutError {
    #[error("I/O error within layout domain")]
    #[diagnostic(code(kryptx_scaffold::layout::io))]
    Io(#[from] IoError),

    #[error("Unable to parse layout file at '{path}': {source}")]
    #[diagnostic(
        code(kryptx_scaffold::layout::parse_toml),
        help("A layout file needs an [entries] table mapping directories to lists of file names")
    )]
    ParseToml {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid directory '{directory}': {reason}")]
    #[diagnostic(
        code(kryptx_scaffold::layout::invalid_directory),
        help("Directories must be relative to the base path and stay inside it")
    )]
    InvalidDirectory { directory: String, reason: String },

    #[error("invalid file name '{file}' under '{directory}': {reason}")]
    #[diagnostic(
        code(kryptx_scaffold::layout::invalid_file_name),
        help("File names must be a single path segment; put subdirectories in the table key")
    )]
    InvalidFileName {
        directory: String,
        file: String,
        reason: String,
    },
}

const KRYPTX_NAME: &str = "KryptX";

const KRYPTX_STRUCTURE: &[(&str, &[&str])] = &[
    ("cmd/client", &["main.go"]),
    ("cmd/server", &["main.go"]),
    ("internal/config", &["config.go", "vault.go"]),
    ("internal/network", &["wireguard.go", "dns.go", "killswitch.go"]),
    ("internal/gui", &["app.go", "theme.go", "components.go"]),
    ("internal/security", &["encryption.go", "auth.go"]),
    ("internal/utils", &["logger.go", "system.go"]),
    ("pkg/api", &["client.go", "server.go"]),
    ("web", &["index.html", "style.css", "script.js"]),
    ("configs", &["client.yaml", "server.yaml"]),
    ("scripts", &["build.sh", "install.sh"]),
    ("", &["go.mod", "go.sum", "Makefile", "README.md"]),
];

fn default_name() -> String {
    "custom".to_string()
}

/// An ordered table of directories and the empty files to create in each.
///
/// The empty key stands for the base directory itself. Entries are walked in
/// declaration order.
#[derive(Debug, Clone, Deserialize)]
pub struct Layout {
    #[serde(default = "default_name")]
    pub name: String,
    #[serde(default)]
    pub message: Option<String>,
    pub entries: IndexMap<String, Vec<String>>,
}
impl Layout {
    /// The compiled-in KryptX project skeleton.
    pub fn kryptx() -> Self {
        let entries: IndexMap<String, Vec<String>> = KRYPTX_STRUCTURE
            .iter()
            .map(|(directory, files)| {
                let files: Vec<String> = files.iter().map(|file| file.to_string()).collect();
                (directory.to_string(), files)
            })
            .collect();

        Self {
            name: KRYPTX_NAME.to_string(),
            message: None,
            entries,
        }
    }

    pub fn from_entries<D, F>(name: &str, entries: impl IntoIterator<Item = (D, Vec<F>)>) -> Self
    where
        D: Into<String>,
        F: Into<String>,
    {
        let entries: IndexMap<String, Vec<String>> = entries
            .into_iter()
            .map(|(directory, files)| {
                let files: Vec<String> = files.into_iter().map(|file| file.into()).collect();
                (directory.into(), files)
            })
            .collect();

        Self {
            name: name.to_string(),
            message: None,
            entries,
        }
    }

    /// Reads, parses and validates a layout file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, LayoutError> {
        let path = path.as_ref();

        log::debug!("reading layout file: {}", path.display());

        let content = fs::read_to_string(path)
            .map_err(|error| IoError::new(FileOperation::Read, path.to_path_buf(), error))?;

        let layout = Layout::parse(&content, path)?;

        layout.validate()?;

        Ok(layout)
    }

    fn parse(content: &str, path: &Path) -> Result<Self, LayoutError> {
        toml::from_str(content).map_err(|err| LayoutError::ParseToml {
            path: path.to_path_buf(),
            source: err,
        })
    }

    /// Rejects entries that would escape the base directory or that smuggle
    /// subdirectories into file names.
    pub fn validate(&self) -> Result<(), LayoutError> {
        for (directory, files) in &self.entries {
            validate_directory(directory)?;

            for file in files {
                validate_file_name(directory, file)?;
            }
        }

        Ok(())
    }

    pub fn completion_message(&self) -> String {
        match &self.message {
            Some(message) => message.clone(),
            None => format!("[✔] {} folder structure created successfully.", self.name),
        }
    }

    pub fn file_count(&self) -> usize {
        self.entries.values().map(Vec::len).sum()
    }
}

fn validate_directory(directory: &str) -> Result<(), LayoutError> {
    let invalid = |reason: &str| LayoutError::InvalidDirectory {
        directory: directory.to_string(),
        reason: reason.to_string(),
    };

    for component in Path::new(directory).components() {
        match component {
            Component::Normal(_) | Component::CurDir => {}
            Component::ParentDir => return Err(invalid("'..' is not allowed")),
            Component::RootDir | Component::Prefix(_) => {
                return Err(invalid("absolute paths are not allowed"))
            }
        }
    }

    Ok(())
}

fn validate_file_name(directory: &str, file: &str) -> Result<(), LayoutError> {
    let invalid = |reason: &str| LayoutError::InvalidFileName {
        directory: directory.to_string(),
        file: file.to_string(),
        reason: reason.to_string(),
    };

    if file.is_empty() {
        return Err(invalid("file name is empty"));
    }
    if file == "." || file == ".." {
        return Err(invalid("file name must not be '.' or '..'"));
    }
    if file.contains('/') || file.contains(std::path::MAIN_SEPARATOR) {
        return Err(invalid("file name contains a path separator"));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kryptx_layout_keeps_table_order() {
        let layout = Layout::kryptx();
        let directories: Vec<&str> = layout.entries.keys().map(String::as_str).collect();

        assert_eq!(directories.first(), Some(&"cmd/client"));
        assert_eq!(directories.last(), Some(&""));
        assert_eq!(directories.len(), 12);
        assert_eq!(layout.file_count(), 27);
        assert_eq!(
            layout.entries["internal/network"],
            vec!["wireguard.go", "dns.go", "killswitch.go"]
        );
    }

    #[test]
    fn test_kryptx_layout_is_valid() {
        assert!(Layout::kryptx().validate().is_ok());
    }

    #[test]
    fn test_kryptx_completion_message() {
        assert_eq!(
            Layout::kryptx().completion_message(),
            "[✔] KryptX folder structure created successfully."
        );
    }

    #[test]
    fn test_parse_keeps_document_order() {
        let content = r#"
            name = "demo"

            [entries]
            "zeta" = ["z.txt"]
            "alpha/beta" = ["b.txt", "a.txt"]
            "" = ["root.txt"]
        "#;
        let layout = Layout::parse(content, Path::new("scaffold.toml")).unwrap();
        let directories: Vec<&str> = layout.entries.keys().map(String::as_str).collect();

        assert_eq!(layout.name, "demo");
        assert_eq!(directories, vec!["zeta", "alpha/beta", ""]);
        assert_eq!(layout.entries["alpha/beta"], vec!["b.txt", "a.txt"]);
    }

    #[test]
    fn test_parse_defaults_and_custom_message() {
        let content = r#"
            message = "all done"

            [entries]
            "" = ["a"]
        "#;
        let layout = Layout::parse(content, Path::new("scaffold.toml")).unwrap();

        assert_eq!(layout.name, "custom");
        assert_eq!(layout.completion_message(), "all done");
    }

    #[test]
    fn test_parse_without_entries_is_err() {
        let result = Layout::parse("name = \"x\"", Path::new("scaffold.toml"));

        assert!(matches!(result, Err(LayoutError::ParseToml { .. })));
    }

    #[test]
    fn test_validate_rejects_parent_dir() {
        let layout = Layout::from_entries("bad", [("../outside", vec!["f.txt"])]);

        assert!(matches!(
            layout.validate(),
            Err(LayoutError::InvalidDirectory { .. })
        ));
    }

    #[test]
    fn test_validate_rejects_absolute_dir() {
        let layout = Layout::from_entries("bad", [("/etc", vec!["f.txt"])]);

        assert!(matches!(
            layout.validate(),
            Err(LayoutError::InvalidDirectory { .. })
        ));
    }

    #[test]
    fn test_validate_rejects_nested_file_name() {
        let layout = Layout::from_entries("bad", [("a", vec!["b/c.txt"])]);

        assert!(matches!(
            layout.validate(),
            Err(LayoutError::InvalidFileName { .. })
        ));
    }

    #[test]
    fn test_validate_rejects_empty_file_name() {
        let layout = Layout::from_entries("bad", [("", vec![""])]);

        assert!(matches!(
            layout.validate(),
            Err(LayoutError::InvalidFileName { .. })
        ));
    }

    #[test]
    fn test_from_file_missing_is_io_err() {
        let dir = tempfile::tempdir().unwrap();
        let result = Layout::from_file(dir.path().join("missing.toml"));

        assert!(matches!(result, Err(LayoutError::Io(_))));
    }
}
