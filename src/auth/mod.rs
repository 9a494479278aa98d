//! Authentication module.
//!
//! Password hashing, user registration, the token session store and the
//! authorization guard every protected operation goes through.

mod guard;
mod password;
mod registration;
mod session;

pub use guard::authenticate;
pub use password::{hash_password, verify_password, PasswordError};
pub use registration::{register, RegistrationRequest};
pub use session::{login, logout, SessionStore, AUTH_KEY_PREFIX, DEFAULT_SESSION_TTL_SECS};
