// Copyright (C) Microsoft Corporation. All rights reserved.

//! Per-key-type loading contract.

use super::*;

/// Parses key material into a native handle and exports it back to text.
///
/// A [`PayKey`] owns the handle; the kind only knows how to create one from a
/// source string and how to print one. Implementations decide which formats
/// they accept, so type-specific validation (private vs public) lives here.
pub trait KeyKind {
    /// The native key handle.
    type Handle;

    /// Human readable name used in logs, e.g. `"private key"`.
    const LABEL: &'static str;

    /// Loads a native handle from key material or a path to it.
    ///
    /// # Errors
    ///
    /// Returns `KeyError::InvalidKey` carrying the library error text and the
    /// offending `source` if the material cannot be read or parsed.
    fn get_key(&self, source: &str) -> Result<Self::Handle, KeyError>;

    /// Exports a native handle to its textual (PEM) form.
    ///
    /// # Errors
    ///
    /// Returns `KeyError::OpenSsl` if the library cannot export the handle.
    fn key_to_string(&self, handle: &Self::Handle) -> Result<String, KeyError>;
}
