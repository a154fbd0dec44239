pub mod inject;

pub use inject::{escape_quotes, inject};
