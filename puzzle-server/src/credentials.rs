use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;
use uuid::Uuid;

use puzzle_persistence::{StoreError, UserRepository};

/// Argon2id hash in PHC string format
pub fn hash_password(password: &str) -> Result<String, argon2::password_hash::Error> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default().hash_password(password.as_bytes(), &salt)?;
    Ok(hash.to_string())
}

pub fn verify_password(password: &str, stored: &str) -> bool {
    let Ok(parsed) = PasswordHash::new(stored) else {
        return false;
    };
    Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok()
}

/// Id of the account matching `login` and `password`.
///
/// Unknown logins and wrong passwords both yield `None`.
pub async fn verify_credentials(
    user_repository: &UserRepository,
    login: &str,
    password: &str,
) -> Result<Option<Uuid>, StoreError> {
    let Some((user_id, stored)) = user_repository.find_credentials(login).await? else {
        tracing::warn!("Login attempt for unknown account");
        return Ok(None);
    };

    if verify_password(password, &stored) {
        Ok(Some(user_id))
    } else {
        tracing::warn!("Wrong password for user {}", user_id);
        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_and_verify() {
        let stored = hash_password("hunter2").unwrap();

        assert!(stored.starts_with("$argon2id$"));
        assert!(verify_password("hunter2", &stored));
        assert!(!verify_password("hunter3", &stored));
        assert!(!stored.contains("hunter2"));
    }

    #[test]
    fn test_hashes_are_salted() {
        assert_ne!(
            hash_password("same").unwrap(),
            hash_password("same").unwrap()
        );
    }

    #[test]
    fn test_malformed_stored_hash() {
        assert!(!verify_password("anything", "salt$digest"));
        assert!(!verify_password("anything", ""));
    }
}
