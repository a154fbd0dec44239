pub mod config;
pub mod error;
pub mod http;
pub mod meta;
pub mod supabase;
pub mod template;

pub use error::PageError;
