pub mod password;

pub use password::{hash_password, hash_passwords, verify_password, Password, PasswordHashString};
