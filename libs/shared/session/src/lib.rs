pub mod session;
pub mod store;

pub use session::Session;
pub use store::{FileSessionStore, MemorySessionStore, SessionStore};
pub use store::{ACCESS_TOKEN_KEY, REFRESH_TOKEN_KEY, ROLES_KEY};
