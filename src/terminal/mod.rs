//! Terminal front end

pub mod command;
pub mod host;
pub mod repl;

pub use host::TerminalHost;
pub use repl::Repl;
