//! Password hashing built on bcrypt.

use once_cell::sync::Lazy;

use crate::domain::foundation::AuthError;

/// Hash compared against when the username is unknown, so a login attempt
/// for a missing user costs the same as one with a wrong password and
/// response timing does not reveal which usernames exist.
static DUMMY_HASH: Lazy<String> =
    Lazy::new(|| bcrypt::hash("portdeck-dummy-password", bcrypt::DEFAULT_COST).expect("bcrypt"));

/// Hashes and verifies passwords with a configured bcrypt work factor.
#[derive(Debug, Clone)]
pub struct PasswordService {
    cost: u32,
}

impl PasswordService {
    /// Creates a password service with the given bcrypt cost.
    pub fn new(cost: u32) -> Self {
        Self { cost }
    }

    /// Hashes a plaintext password.
    pub fn hash(&self, password: &str) -> Result<String, AuthError> {
        bcrypt::hash(password, self.cost)
            .map_err(|e| AuthError::service_unavailable(format!("Hashing failed: {}", e)))
    }

    /// Verifies a password against a stored hash. A malformed hash counts
    /// as a failed verification.
    pub fn verify(&self, password: &str, hash: &str) -> bool {
        bcrypt::verify(password, hash).unwrap_or(false)
    }

    /// Verifies against the stored hash when present, or against a fixed
    /// dummy hash when not. The dummy path always fails but takes the
    /// same time as a real comparison.
    pub fn verify_or_dummy(&self, password: &str, hash: Option<&str>) -> bool {
        match hash {
            Some(hash) => self.verify(password, hash),
            None => {
                let _ = self.verify(password, &DUMMY_HASH);
                false
            }
        }
    }
}
