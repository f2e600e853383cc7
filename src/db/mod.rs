// db/mod.rs - Database side of fixture loading
//
// - driver: driver ids, url schemes, identifier and literal quoting
// - config: connection settings from code or the environment
// - connection: the ConnectionHandle owning one session
// - queries: statement text for delete-all and row inserts

pub mod config;
pub mod connection;
pub mod driver;
pub mod queries;

pub use config::ConnectionConfig;
pub use connection::ConnectionHandle;
pub use driver::Driver;
