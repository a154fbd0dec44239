pub mod origin;
pub mod routes;

pub use origin::Origin;
pub use routes::{router, AppState};
