//! Credential hashing and access-token services.

pub mod password;
pub mod token;

pub use password::{hash_password, verify_password};
pub use token::{decode_access_token, issue_access_token, AuthConfig, Claims, TokenError, TokenUser};
