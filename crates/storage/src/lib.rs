#![forbid(unsafe_code)]

mod db;
mod entry;

pub use db::{Db, DbConfig};
pub use entry::{Entry, Kind, Value};
