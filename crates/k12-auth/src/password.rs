//! bcrypt on the blocking thread pool.
//!
//! Hashing at the default cost takes on the order of a second, so it never
//! runs on an async worker.

use k12_core::AppError;

use crate::error::AuthError;

fn join_error(e: tokio::task::JoinError) -> AuthError {
    AuthError::App(AppError::internal(anyhow::anyhow!(
        "Task join error: {}",
        e
    )))
}

pub async fn hash_password(password: &str, cost: u32) -> Result<String, AuthError> {
    let password = password.to_string();
    let hashed = tokio::task::spawn_blocking(move || k12_core::hash_password(&password, cost))
        .await
        .map_err(join_error)??;
    Ok(hashed)
}

pub async fn verify_password(password: &str, hash: &str) -> Result<bool, AuthError> {
    let (password, hash) = (password.to_string(), hash.to_string());
    let matches = tokio::task::spawn_blocking(move || k12_core::verify_password(&password, &hash))
        .await
        .map_err(join_error)??;
    Ok(matches)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_hash_then_verify() {
        let hashed = hash_password("secret123", 4).await.unwrap();

        assert!(verify_password("secret123", &hashed).await.unwrap());
        assert!(!verify_password("secret124", &hashed).await.unwrap());
    }
}
