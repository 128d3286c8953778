use crate::{
    materialize::{self, Materialized},
    preview, prompt,
    source::{self, Source},
};
use colored::Colorize;
use std::path::PathBuf;

#[derive(Debug, thiserror::Error, miette::Diagnostic)]
pub enum ScaffoldError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Source(#[from] source::SourceError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Materialize(#[from] materialize::MaterializeError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Prompt(#[from] prompt::PromptError),
}

/// What a call to [`scaffold`] should do.
#[derive(Debug, Clone)]
pub struct Options {
    /// Directory the layout is created under.
    pub base: PathBuf,
    /// Layout source argument; `None` selects the built-in KryptX layout.
    pub layout: Option<String>,
    pub dry_run: bool,
    pub confirm: bool,
    /// Print a `create` line for every file.
    pub echo: bool,
}
impl Options {
    pub fn new(base: impl Into<PathBuf>) -> Self {
        Self {
            base: base.into(),
            layout: None,
            dry_run: false,
            confirm: false,
            echo: false,
        }
    }
}

#[derive(Debug, PartialEq)]
pub enum Outcome {
    Created(Materialized),
    Previewed,
    Canceled,
}

/// Resolves the layout and materializes it under `options.base`.
///
/// # Errors
///
/// Returns a [`ScaffoldError`] if:
///
/// - The layout source cannot be read, cloned or parsed, or holds entries
///   that escape the base directory.
/// - The confirmation prompt fails.
/// - A directory or file cannot be created; earlier entries are kept.
pub fn scaffold(options: &Options) -> Result<Outcome, ScaffoldError> {
    let source = Source::parse(options.layout.as_deref());

    log::debug!("loading layout from source: {:?}", source);

    let layout = source.load()?;

    if options.dry_run || options.confirm {
        preview::preview_as_tree(&layout, &options.base);
    }

    if options.dry_run {
        return Ok(Outcome::Previewed);
    }

    if options.confirm && !prompt::apply_changes()? {
        println!("{}", "Canceled, nothing was written.".yellow());

        return Ok(Outcome::Canceled);
    }

    let materialized = materialize::materialize(&options.base, &layout, options.echo)?;

    println!("{}", layout.completion_message());

    Ok(Outcome::Created(materialized))
}
