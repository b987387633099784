// Copyright (C) Microsoft Corporation. All rights reserved.

//! Key handles for the payment SDK's signing and verification paths.
//!
//! This crate loads RSA (and other OpenSSL-supported) keys from the forms the
//! payment platform hands them out in and keeps them as native OpenSSL handles:
//!
//! - **PEM text**: `PRIVATE KEY`, `RSA PRIVATE KEY`, `ENCRYPTED PRIVATE KEY`,
//!   `PUBLIC KEY`, `RSA PUBLIC KEY` and `CERTIFICATE` blocks
//! - **Bare base64 bodies**: key material with the PEM armor stripped
//! - **Paths**: plain filesystem paths or `file://` URLs to either of the above
//!
//! # Key Lifecycle
//!
//! A [`PayKey`] is either empty or holds exactly one native handle. It is
//! loaded once, released exactly once (explicitly through
//! [`PayKey::release`] or on drop), and copied only by exporting the key to
//! text and parsing that text again. Native handles are never duplicated.
//!
//! Parsing and exporting are delegated to a [`KeyKind`], which fixes the
//! handle type and the accepted formats:
//!
//! - [`PrivateKeyKind`] backs [`PayPrivateKey`]
//! - [`PublicKeyKind`] backs [`PayPublicKey`]

mod key;
mod kind;
mod private;
mod public;
mod source;

#[cfg(test)]
mod test_helpers;

use std::fmt::Display;

pub use key::*;
pub use kind::*;
use openssl::error::ErrorStack;
pub use private::*;
pub use public::*;
pub use source::*;
use thiserror::Error;

/// Error type for key loading and export.
///
/// Loading failures (`AlreadyLoaded`, `InvalidKey`) form the invalid-key
/// category, see [`KeyError::is_invalid_key`]. Export failures surface as
/// `OpenSsl`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum KeyError {
    /// The key already holds a native handle.
    #[error("Resource of key has already been initialized")]
    AlreadyLoaded,

    /// The key material or path could not be turned into a native handle.
    #[error("Invalid key: {reason} ({input})")]
    InvalidKey {
        /// Library or I/O error text.
        reason: String,
        /// The source that was being loaded.
        input: String,
    },

    /// The native library failed to export the handle.
    #[error("OpenSSL error: {0}")]
    OpenSsl(String),

    /// The key holds no native handle.
    #[error("Key is not loaded")]
    NotLoaded,
}

impl KeyError {
    pub(crate) fn invalid_key(reason: impl Display, input: &str) -> Self {
        KeyError::InvalidKey {
            reason: reason.to_string(),
            input: input.to_string(),
        }
    }

    /// Returns `true` for errors raised while loading key material.
    pub fn is_invalid_key(&self) -> bool {
        matches!(self, KeyError::AlreadyLoaded | KeyError::InvalidKey { .. })
    }
}

impl From<ErrorStack> for KeyError {
    fn from(err: ErrorStack) -> Self {
        KeyError::OpenSsl(err.to_string())
    }
}
