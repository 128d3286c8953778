pub mod api;
pub mod errors;
pub mod layout;
pub mod materialize;
pub mod preview;
pub mod prompt;
pub mod source;
