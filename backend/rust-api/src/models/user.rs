use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Admin,
    Student,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Student => "student",
        }
    }
}

/// One roster entry. Passwords are stored bcrypt-hashed; the plaintext never
/// leaves the login handler.
#[derive(Debug, Clone)]
pub struct Account {
    pub email: String,
    pub password_hash: String,
    pub role: Role,
}

#[derive(Debug, Serialize)]
pub struct AccountProfile {
    pub email: String,
    pub role: Role,
}

impl From<&Account> for AccountProfile {
    fn from(account: &Account) -> Self {
        Self {
            email: account.email.clone(),
            role: account.role,
        }
    }
}

#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(length(min = 1, message = "Please enter both email and password"))]
    pub email: String,
    #[validate(length(min = 1, message = "Please enter both email and password"))]
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub access_token: String,
    pub user: AccountProfile,
}

#[derive(Debug, Deserialize, Validate)]
pub struct AddStudentRequest {
    #[validate(length(min = 1, message = "Please enter both email and password"))]
    pub email: String,
    #[validate(length(min = 1, message = "Please enter both email and password"))]
    pub password: String,
}
