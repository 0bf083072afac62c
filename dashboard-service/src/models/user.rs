use crate::utils::Password;
use uuid::Uuid;

/// A user to seed. The password is plaintext until hashed at seed time.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub password: Password,
}
