use anyhow::{Context, Result};
use bcrypt::{hash, verify, DEFAULT_COST};

use crate::models::{Account, AccountProfile, ActionResult, Role};

/// In-memory account roster, seeded from config with one admin and one
/// student. Identity is consumed for attribution only; the session engine
/// never looks at it.
pub struct AccountService {
    accounts: Vec<Account>,
}

impl AccountService {
    pub fn new(seed: &[(String, String, Role)]) -> Result<Self> {
        let mut accounts = Vec::with_capacity(seed.len());
        for (email, password, role) in seed {
            accounts.push(Account {
                email: email.trim().to_lowercase(),
                password_hash: hash(password, DEFAULT_COST)
                    .context("Failed to hash seed password")?,
                role: *role,
            });
        }
        Ok(Self { accounts })
    }

    /// Verify credentials; `None` means invalid email or password (the caller
    /// must not distinguish the two).
    pub fn authenticate(&self, email: &str, password: &str) -> Option<AccountProfile> {
        let normalized = email.trim().to_lowercase();
        let account = self.accounts.iter().find(|a| a.email == normalized)?;
        match verify(password, &account.password_hash) {
            Ok(true) => Some(AccountProfile::from(account)),
            Ok(false) => None,
            Err(e) => {
                tracing::warn!("Password verification failed for {}: {}", normalized, e);
                None
            }
        }
    }

    pub fn list_students(&self) -> Vec<AccountProfile> {
        self.accounts
            .iter()
            .filter(|a| a.role == Role::Student)
            .map(AccountProfile::from)
            .collect()
    }

    pub fn add_student(&mut self, email: &str, password: &str) -> ActionResult {
        let normalized = email.trim().to_lowercase();
        if normalized.is_empty() || password.trim().is_empty() {
            return ActionResult::rejected("Please enter both email and password");
        }
        if self.accounts.iter().any(|a| a.email == normalized) {
            return ActionResult::rejected("This email already exists");
        }
        let password_hash = match hash(password.trim(), DEFAULT_COST) {
            Ok(h) => h,
            Err(e) => {
                tracing::error!("Failed to hash student password: {}", e);
                return ActionResult::rejected("Could not store password");
            }
        };
        self.accounts.push(Account {
            email: normalized.clone(),
            password_hash,
            role: Role::Student,
        });
        tracing::info!("Student account added: {}", normalized);
        ActionResult::ok(format!("Student {} added successfully!", normalized))
    }

    pub fn delete_student(&mut self, email: &str) -> ActionResult {
        let normalized = email.trim().to_lowercase();
        let before = self.accounts.len();
        self.accounts
            .retain(|a| !(a.role == Role::Student && a.email == normalized));
        if self.accounts.len() == before {
            return ActionResult::rejected("Student not found");
        }
        tracing::info!("Student account removed: {}", normalized);
        ActionResult::ok("Student deleted")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn roster() -> AccountService {
        AccountService::new(&[
            ("admin@jee.com".to_string(), "admin123".to_string(), Role::Admin),
            ("test@gmail.com".to_string(), "test123".to_string(), Role::Student),
        ])
        .unwrap()
    }

    #[test]
    fn authenticate_normalizes_email_and_checks_password() {
        let accounts = roster();
        let profile = accounts.authenticate("  Admin@JEE.com ", "admin123").unwrap();
        assert_eq!(profile.role, Role::Admin);
        assert!(accounts.authenticate("admin@jee.com", "wrong").is_none());
        assert!(accounts.authenticate("ghost@jee.com", "admin123").is_none());
    }

    #[test]
    fn add_student_validates_and_rejects_duplicates() {
        let mut accounts = roster();
        assert!(!accounts.add_student("", "pw").success);
        assert!(!accounts.add_student("x@y.com", "  ").success);

        let result = accounts.add_student("New@Student.com", "secret1");
        assert!(result.success);
        assert!(accounts.authenticate("new@student.com", "secret1").is_some());

        let dup = accounts.add_student("new@student.com", "other");
        assert!(!dup.success);
        assert_eq!(dup.message, "This email already exists");
    }

    #[test]
    fn delete_student_leaves_admins_alone() {
        let mut accounts = roster();
        assert!(!accounts.delete_student("admin@jee.com").success);
        assert!(accounts.delete_student("test@gmail.com").success);
        assert!(accounts.list_students().is_empty());
    }
}
