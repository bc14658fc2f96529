#![forbid(unsafe_code)]

pub mod handler;
mod session;

pub use handler::{LineOutcome, execute_command, process_line, process_tokens};
pub use session::Session;
