pub mod client;
pub mod error;
pub mod types;

pub use client::SupabaseClient;
pub use error::SupabaseError;
pub use types::{ArticleMeta, ArticleRecord, AuthorRecord};
