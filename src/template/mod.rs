pub mod cache;
pub mod error;
pub mod fetch;

pub use cache::TemplateCache;
pub use error::TemplateError;
pub use fetch::{HttpTemplateSource, TemplateSource};
