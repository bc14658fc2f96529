#![forbid(unsafe_code)]

mod command;
mod parse;
mod reply;
mod tokenize;

pub use command::{Command, SetOptions};
pub use parse::Parse;
pub use reply::Reply;
pub use tokenize::tokenize;
