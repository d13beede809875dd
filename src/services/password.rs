/*
 * Responsibility
 * - パスワードのハッシュ化と検証 (argon2, PHC string)
 * - CPU バウンドなので spawn_blocking で実行する
 * - 不一致は Ok(false)。プリミティブ側の失敗は Err として上に伝える (不一致扱いにしない)
 */
use argon2::{
    Argon2, PasswordHash, PasswordHasher, PasswordVerifier,
    password_hash::{SaltString, rand_core::OsRng},
};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PasswordError {
    #[error("password hashing failed")]
    Hash,
    #[error("hashing task failed")]
    Join,
}

/// salt は呼び出しごとに生成する。同じ平文でも別のハッシュになる。
pub async fn hash(plain: String) -> Result<String, PasswordError> {
    tokio::task::spawn_blocking(move || {
        let salt = SaltString::generate(&mut OsRng);
        Argon2::default()
            .hash_password(plain.as_bytes(), &salt)
            .map(|h| h.to_string())
            .map_err(|err| {
                tracing::error!(error = %err, "argon2 hash failed");
                PasswordError::Hash
            })
    })
    .await
    .map_err(|_| PasswordError::Join)?
}

pub async fn verify(plain: String, hash: String) -> Result<bool, PasswordError> {
    tokio::task::spawn_blocking(move || {
        let parsed = PasswordHash::new(&hash).map_err(|err| {
            tracing::error!(error = %err, "stored password hash is malformed");
            PasswordError::Hash
        })?;

        match Argon2::default().verify_password(plain.as_bytes(), &parsed) {
            Ok(()) => Ok(true),
            Err(argon2::password_hash::Error::Password) => Ok(false),
            Err(err) => {
                tracing::error!(error = %err, "argon2 verify failed");
                Err(PasswordError::Hash)
            }
        }
    })
    .await
    .map_err(|_| PasswordError::Join)?
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn hash_then_verify_roundtrip() {
        let hashed = hash("hunter2".into()).await.unwrap();
        assert!(verify("hunter2".into(), hashed.clone()).await.unwrap());
        assert!(!verify("hunter3".into(), hashed).await.unwrap());
    }

    #[tokio::test]
    async fn salts_differ_between_calls() {
        let a = hash("same password".into()).await.unwrap();
        let b = hash("same password".into()).await.unwrap();
        assert_ne!(a, b);
    }

    #[tokio::test]
    async fn malformed_hash_is_an_error_not_a_mismatch() {
        assert!(verify("pw".into(), "not-a-phc-string".into()).await.is_err());
    }
}
