//! bcrypt hashing on the blocking pool.

use crate::error::{AuthError, AuthErrorExt};

pub(crate) const MIN_LENGTH: usize = 8;
/// bcrypt only looks at the first 72 bytes; longer secrets are refused instead of truncated.
pub(crate) const MAX_BYTES: usize = 72;

/// Checked against [`decoy`] when a login names no known admin.
const DECOY_SECRET: &str = "lobby-decoy-secret";

/// A hash at the configured cost so unknown usernames cost as much bcrypt work as wrong
/// passwords.
pub(crate) fn decoy(cost: u32) -> Result<String, AuthError> {
    bcrypt::hash(DECOY_SECRET, cost).context("Hashing the login decoy")
}

pub(crate) fn check_strength(password: &str) -> Result<(), AuthError> {
    if password.chars().count() < MIN_LENGTH {
        return Err(AuthError::validation(format!(
            "Password must be at least {MIN_LENGTH} characters long"
        )));
    }
    if password.len() > MAX_BYTES {
        return Err(AuthError::validation(format!("Password must not exceed {MAX_BYTES} bytes")));
    }
    Ok(())
}

pub(crate) async fn hash(password: &str, cost: u32) -> Result<String, AuthError> {
    let password = password.to_owned();
    tokio::task::spawn_blocking(move || bcrypt::hash(password, cost))
        .await
        .map_err(|err| AuthError::from(format!("Hashing task failed: {err}")))?
        .context("Hashing password")
}

/// A malformed stored hash counts as a mismatch.
pub(crate) async fn verify(password: &str, hash: &str) -> Result<bool, AuthError> {
    let password = password.to_owned();
    let hash = hash.to_owned();
    let outcome = tokio::task::spawn_blocking(move || bcrypt::verify(password, &hash))
        .await
        .map_err(|err| AuthError::from(format!("Verification task failed: {err}")))?;

    match outcome {
        Ok(matches) => Ok(matches),
        Err(err) => {
            tracing::warn!(error = %err, "Stored password hash is unreadable");
            Ok(false)
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn decoy_is_a_verifiable_hash() {
        let decoy = decoy(4).unwrap();
        assert!(decoy.starts_with("$2b$04$"));
        assert!(verify(DECOY_SECRET, &decoy).await.unwrap());
        assert!(!verify("s3cret-pass", &decoy).await.unwrap());
    }

    #[tokio::test]
    async fn hash_then_verify() {
        let hashed = hash("correct horse", 4).await.unwrap();
        assert!(hashed.starts_with("$2"));
        assert!(verify("correct horse", &hashed).await.unwrap());
        assert!(!verify("wrong horse", &hashed).await.unwrap());
    }

    #[tokio::test]
    async fn garbage_hash_is_a_mismatch() {
        assert!(!verify("anything", "not-a-hash").await.unwrap());
    }

    #[test]
    fn strength_bounds() {
        assert!(check_strength("short").is_err());
        assert!(check_strength("eight ch").is_ok());
        assert!(check_strength(&"x".repeat(73)).is_err());
    }
}
