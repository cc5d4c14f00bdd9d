//! Account persistence (JSON) and the local backend that serves form
//! submissions against it.
//!
//! The account and the preferences are each a single JSON document under the
//! data directory. Passwords are kept only as Argon2 hashes.

mod backend;
mod error;
mod hasher;
mod manager;

pub use backend::LocalBackend;
pub use error::StorageError;
pub use hasher::{hash_password, verify_password};
pub use manager::{
    AccountManager, Preferences, SEED_EMAIL, SEED_NAME, SEED_PASSWORD, StoredAccount,
};
