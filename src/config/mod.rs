/// Database configuration and connection management
pub mod database;

/// Category seed configuration loading from config.toml
pub mod categories;
