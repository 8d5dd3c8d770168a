pub mod auth;
pub mod cors;
pub mod session;

pub use auth::{AdminIdentity, AuthMiddleware};
pub use cors::create_cors;
pub use session::{SessionId, SessionMiddleware};
