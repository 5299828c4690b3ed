pub mod image_resolver;
pub mod readme_summary;

pub use image_resolver::{ImageReferenceResolver, find_first_image_reference};
pub use readme_summary::{ReadmeSummaryExtractor, shorten_to_sentences};
