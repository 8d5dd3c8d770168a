pub mod jwt;
pub mod password;
pub mod search;
pub mod session_lock;
pub mod validation;

pub use jwt::*;
pub use password::*;
pub use search::contains_any;
pub use session_lock::SessionLocks;
pub use validation::*;
