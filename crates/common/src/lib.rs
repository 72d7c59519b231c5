pub mod config;
pub mod db;
pub mod deploy;
pub mod error;
pub mod registry;
pub mod store;
pub mod types;
