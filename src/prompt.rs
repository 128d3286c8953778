use inquire::Confirm;
use miette::Diagnostic;
use thiserror::Error;

#[derive(Error, Debug, Diagnostic)]
pub enum PromptError {
    #[error("unable to read confirmation from the terminal")]
    #[diagnostic(
        code(kryptx_scaffold::prompt::confirm),
        help("--confirm needs an interactive terminal; drop the flag to write without asking")
    )]
    Confirm {
        #[source]
        source: inquire::InquireError,
    },
}

/// Asks whether the previewed tree should be written to disk.
pub fn apply_changes() -> Result<bool, PromptError> {
    Confirm::new("Create this structure?")
        .with_default(false)
        .with_help_message("Existing files listed in the preview will be truncated")
        .prompt()
        .map_err(|error| PromptError::Confirm { source: error })
}
