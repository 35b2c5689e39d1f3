pub mod db;
pub mod error;
pub mod loader;
pub mod models;

pub use rusqlite;
