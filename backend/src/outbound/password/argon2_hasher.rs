//! Argon2id implementation of the [`PasswordHasher`] port.
//!
//! Hashing is deliberately slow, so both operations run on the blocking
//! thread pool instead of stalling the actix worker.

use argon2::Argon2;
use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{
    self, PasswordHash as PhcString, PasswordHasher as _, PasswordVerifier as _, SaltString,
};
use async_trait::async_trait;
use zeroize::Zeroizing;

use crate::domain::PasswordHash;
use crate::domain::ports::{PasswordHasher, PasswordHasherError};

/// Argon2id hasher with the crate's default parameters.
#[derive(Debug, Default, Clone, Copy)]
pub struct Argon2PasswordHasher;

fn hash_blocking(password: &[u8]) -> Result<PasswordHash, PasswordHasherError> {
    let salt = SaltString::generate(&mut OsRng);
    let phc = Argon2::default()
        .hash_password(password, &salt)
        .map_err(|err| PasswordHasherError::hash(err.to_string()))?;
    PasswordHash::new(phc.to_string()).map_err(|err| PasswordHasherError::hash(err.to_string()))
}

fn verify_blocking(password: &[u8], stored: &str) -> Result<bool, PasswordHasherError> {
    let parsed =
        PhcString::new(stored).map_err(|err| PasswordHasherError::malformed_hash(err.to_string()))?;
    match Argon2::default().verify_password(password, &parsed) {
        Ok(()) => Ok(true),
        Err(password_hash::Error::Password) => Ok(false),
        Err(err) => Err(PasswordHasherError::hash(err.to_string())),
    }
}

#[async_trait]
impl PasswordHasher for Argon2PasswordHasher {
    async fn hash(&self, password: &str) -> Result<PasswordHash, PasswordHasherError> {
        let password = Zeroizing::new(password.as_bytes().to_vec());
        tokio::task::spawn_blocking(move || hash_blocking(&password))
            .await
            .map_err(|err| PasswordHasherError::hash(err.to_string()))?
    }

    async fn verify(
        &self,
        password: &str,
        hash: &PasswordHash,
    ) -> Result<bool, PasswordHasherError> {
        let password = Zeroizing::new(password.as_bytes().to_vec());
        let stored = hash.as_ref().to_owned();
        tokio::task::spawn_blocking(move || verify_blocking(&password, &stored))
            .await
            .map_err(|err| PasswordHasherError::hash(err.to_string()))?
    }
}
