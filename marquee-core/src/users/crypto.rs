use argon2::{
    Algorithm, Argon2, Params, ParamsBuilder, Version,
    password_hash::{
        self, PasswordHash, PasswordHasher as _, PasswordVerifier as _,
        SaltString,
    },
};
use rand::{TryRngCore, rngs::OsRng};
use thiserror::Error;
use zeroize::Zeroizing;

use crate::error::UserError;

/// Argon2id password hashing with a server-side pepper.
///
/// The pepper is appended to the password before hashing and never stored
/// alongside the hash.
#[derive(Debug)]
pub struct PasswordHasher {
    argon2: Argon2<'static>,
    pepper: Zeroizing<Vec<u8>>,
}

#[derive(Debug, Error)]
pub enum CryptoError {
    #[error("password pepper must not be empty")]
    EmptyPepper,
    #[error("invalid Argon2 parameters: {0}")]
    InvalidParams(String),
    #[error("password hashing error: {0}")]
    PasswordHash(String),
}

impl From<password_hash::Error> for CryptoError {
    fn from(err: password_hash::Error) -> Self {
        CryptoError::PasswordHash(err.to_string())
    }
}

impl From<CryptoError> for UserError {
    fn from(err: CryptoError) -> Self {
        UserError::Crypto(err.to_string())
    }
}

impl PasswordHasher {
    const DEFAULT_MEMORY_KIB: u32 = 64 * 1024; // 64 MiB
    const DEFAULT_ITERATIONS: u32 = 3;
    const DEFAULT_PARALLELISM: u32 = 1;
    const SALT_LENGTH: usize = password_hash::Salt::RECOMMENDED_LENGTH;

    pub fn new(pepper: impl AsRef<[u8]>) -> Result<Self, CryptoError> {
        Self::with_params(
            pepper,
            ParamsBuilder::new()
                .m_cost(Self::DEFAULT_MEMORY_KIB)
                .t_cost(Self::DEFAULT_ITERATIONS)
                .p_cost(Self::DEFAULT_PARALLELISM)
                .output_len(32)
                .build()
                .map_err(|err| CryptoError::InvalidParams(err.to_string()))?,
        )
    }

    /// Cheap parameters for tests and constrained environments.
    pub fn with_params(
        pepper: impl AsRef<[u8]>,
        params: Params,
    ) -> Result<Self, CryptoError> {
        let pepper = pepper.as_ref();
        if pepper.is_empty() {
            return Err(CryptoError::EmptyPepper);
        }

        Ok(Self {
            argon2: Argon2::new(Algorithm::Argon2id, Version::default(), params),
            pepper: Zeroizing::new(pepper.to_vec()),
        })
    }

    fn peppered(&self, password: &str) -> Zeroizing<Vec<u8>> {
        let mut material = Zeroizing::new(Vec::with_capacity(
            password.len() + self.pepper.len(),
        ));
        material.extend_from_slice(password.as_bytes());
        material.extend_from_slice(&self.pepper);
        material
    }

    /// Hash with a fresh random salt. Returns a PHC string.
    pub fn hash_password(&self, password: &str) -> Result<String, CryptoError> {
        let material = self.peppered(password);

        let mut salt_bytes = [0u8; Self::SALT_LENGTH];
        OsRng
            .try_fill_bytes(&mut salt_bytes)
            .map_err(|err| CryptoError::PasswordHash(err.to_string()))?;
        let salt = SaltString::encode_b64(&salt_bytes)?;

        Ok(self.argon2.hash_password(&material, &salt)?.to_string())
    }

    pub fn verify_password(
        &self,
        password: &str,
        password_hash: &str,
    ) -> Result<bool, CryptoError> {
        let parsed = PasswordHash::new(password_hash)?;
        let material = self.peppered(password);
        Ok(self.argon2.verify_password(&material, &parsed).is_ok())
    }
}

#[cfg(test)]
pub(crate) fn test_hasher() -> PasswordHasher {
    let params = Params::new(Params::MIN_M_COST, 1, 1, None).unwrap();
    PasswordHasher::with_params("test-pepper", params).unwrap()
}
