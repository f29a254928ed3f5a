pub mod context;
pub mod errors;
pub mod routes;
pub mod startup;
pub mod types;
pub mod utils;
