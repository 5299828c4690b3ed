pub mod catalog;
pub mod context;
pub mod enrich;
pub mod extractors;
pub mod outlet;
pub mod workflow;
