//! Error taxonomy for the Keyforge engine.
//!
//! Three disjoint failure classes with different caller contracts:
//!
//! - [`CryptoError::Data`]: the caller supplied invalid parameters or an
//!   invalid spec. Raised synchronously at the point of misuse, never
//!   silently corrected.
//! - [`CryptoError::BadCredentials`]: an integrity/authentication check
//!   failed during decryption. This is expected, recoverable caller input
//!   (wrong password), not an infrastructure fault; callers typically
//!   prompt for a different secret. The engine never retries internally.
//! - [`CryptoError::Provider`]: the injected primitive provider failed
//!   (unsupported algorithm, misconfiguration). Always carries the
//!   original cause.
//!
//! Errors never carry key material, and no error is used for ordinary
//! control flow.

use thiserror::Error;

/// Result alias used across the engine.
pub type Result<T> = std::result::Result<T, CryptoError>;

/// Errors from keyset, derivation, and key-generation operations.
#[derive(Debug, Error)]
pub enum CryptoError {
    /// Invalid parameters or spec supplied by the caller
    #[error("invalid data: {reason}")]
    Data {
        /// What was wrong with the supplied data
        reason: String,
    },

    /// The supplied secret/password did not authenticate
    #[error("bad credentials: integrity check failed")]
    BadCredentials,

    /// The underlying primitive provider failed
    #[error("provider failure: {context}")]
    Provider {
        /// What the engine was asking the provider for
        context: String,
        /// The provider's own error, when it produced one
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
}

impl CryptoError {
    /// Build a data-validation error.
    pub fn data(reason: impl Into<String>) -> Self {
        Self::Data { reason: reason.into() }
    }

    /// Build a provider error without an underlying cause.
    pub fn provider(context: impl Into<String>) -> Self {
        Self::Provider { context: context.into(), source: None }
    }

    /// Build a provider error wrapping the original cause.
    pub fn provider_with_source(
        context: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Provider { context: context.into(), source: Some(Box::new(source)) }
    }

    /// True for the recoverable wrong-password condition.
    ///
    /// Callers branch on this to re-prompt rather than abort: every other
    /// variant indicates misuse or infrastructure failure.
    pub fn is_bad_credentials(&self) -> bool {
        matches!(self, Self::BadCredentials)
    }

    /// True for caller-input validation failures.
    pub fn is_data(&self) -> bool {
        matches!(self, Self::Data { .. })
    }
}
