pub mod extractor;
pub mod password;
pub mod session;

pub use session::{clear_session_cookie, session_token, AdminCredentials, SessionGate, SESSION_COOKIE};
