pub mod cache;
pub mod cli;
pub mod config;
pub mod gateway;
pub mod generator;
pub mod types;
pub mod utils;

// Re-export commonly used types
pub use config::Config;
pub use generator::catalog::ProjectCatalog;
pub use generator::enrich::ProjectEnricher;
pub use generator::workflow::launch;
