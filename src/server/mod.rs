//! Storage wiring shared by the binary and tests

mod db;

pub use db::{create_pool, ping};
