use crate::{
    errors::{FileOperation, IoError},
    layout::{Layout, LayoutError},
};
use git2::Repository;
use miette::Diagnostic;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// File a layout directory or git repository must carry at its root.
pub const LAYOUT_FILE_NAME: &str = "scaffold.toml";

#[derive(Error, Debug, Diagnostic)]
pub enum SourceError {
    #[error("I/O error within source domain")]
    #[diagnostic(code(kryptx_scaffold::source::io))]
    Io(#[from] IoError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Layout(#[from] LayoutError),

    #[error("unable to clone repo at: '{url}': {source}")]
    #[diagnostic(
        code(kryptx_scaffold::source::git_clone),
        help("Make sure that username and project name are correct")
    )]
    GitClone {
        url: String,
        path: PathBuf,
        source: git2::Error,
    },

    #[error("invalid git prefix provided: {url}")]
    #[diagnostic(
        code(kryptx_scaffold::source::invalid_git_prefix),
        help("Valid git prefix are: ['gh', 'gl', 'git@', 'git+http', 'git+https']")
    )]
    InvalidGitPrefix { url: String },
}

/// Where a layout comes from.
#[derive(Debug, Clone, PartialEq)]
pub enum Source {
    Builtin,
    Local(PathBuf),
    Git(String),
}
impl Source {
    fn is_git(source: &str) -> bool {
        lazy_static::lazy_static! {
            static ref GIT_URL_REGEX: regex::Regex = regex::Regex::new(
                r"(?x)        # Enable extended mode
                ^(?:
                    # 1) gh:account/repo
                    gh:[^/]+/[^/]+
                    |
                    # 2) gl:account/repo
                    gl:[^/]+/[^/]+
                    |
                    # 3) git@host:account/repo.git
                    git@[A-Za-z0-9._-]+:[^/]+/[^/]+\.git
                    |
                    # 4) git+http(s)://...
                    git\+https?://.*
                )$"
            ).expect("a valid regex pattern");
        }

        GIT_URL_REGEX.is_match(source)
    }

    fn expand_git_url(url: &str) -> Result<String, SourceError> {
        if let Some(stripped) = url.strip_prefix("gh:") {
            Ok(format!("https://github.com/{}.git", stripped))
        } else if let Some(stripped) = url.strip_prefix("gl:") {
            Ok(format!("https://gitlab.com/{}.git", stripped))
        } else if let Some(stripped) = url.strip_prefix("git+") {
            Ok(stripped.to_string())
        } else if url.starts_with("git@") {
            Ok(url.to_string())
        } else {
            Err(SourceError::InvalidGitPrefix {
                url: url.to_string(),
            })
        }
    }

    /// Classifies a `--layout` argument. `None` means the built-in layout.
    pub fn parse(source: Option<&str>) -> Self {
        match source {
            None => Source::Builtin,
            Some(source) if Source::is_git(source) => Source::Git(source.to_string()),
            Some(source) => Source::Local(PathBuf::from(source)),
        }
    }

    /// Loads and validates the layout this source points to.
    pub fn load(&self) -> Result<Layout, SourceError> {
        match self {
            Source::Builtin => Ok(Layout::kryptx()),
            Source::Local(path) => Source::load_local(path),
            Source::Git(url) => Source::load_git(url),
        }
    }

    fn load_local(path: &Path) -> Result<Layout, SourceError> {
        let metadata = std::fs::metadata(path)
            .map_err(|error| IoError::new(FileOperation::Stat, path.to_path_buf(), error))?;

        let layout_file = if metadata.is_dir() {
            path.join(LAYOUT_FILE_NAME)
        } else {
            path.to_path_buf()
        };

        Ok(Layout::from_file(layout_file)?)
    }

    fn load_git(url: &str) -> Result<Layout, SourceError> {
        let expanded_url = Source::expand_git_url(url)?;

        let directory = tempfile::tempdir()
            .map_err(|error| IoError::new(FileOperation::Mkdir, std::env::temp_dir(), error))?;

        log::debug!(
            "cloning {} into {}",
            expanded_url,
            directory.path().display()
        );

        Repository::clone(&expanded_url, directory.path()).map_err(|err| {
            SourceError::GitClone {
                url: expanded_url.clone(),
                path: directory.path().to_path_buf(),
                source: err,
            }
        })?;

        // `directory` is removed when it goes out of scope, after the layout is read.
        Ok(Layout::from_file(directory.path().join(LAYOUT_FILE_NAME))?)
    }
}
