/// SQLite pool setup and migrations
pub mod connection;
/// Row types and their queries
pub mod models;
/// SQLite implementation of the persistence boundary
pub mod sqlite;
/// The persistence boundary consumed by the command router
pub mod store;
