pub mod db;
pub mod models;
pub mod schema;
pub mod settings;
pub mod telemetry;
