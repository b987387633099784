// Copyright (C) Microsoft Corporation. All rights reserved.

//! Generic key holding at most one native handle.
//!
//! [`PayKey`] is the owner of a native key handle produced by a [`KeyKind`].
//! It enforces the load-once rule, releases the handle exactly once, and
//! implements copying as export-then-reparse.
//!
//! # States
//!
//! - **Empty**: no handle held, [`PayKey::is_loaded`] returns `false`
//! - **Loaded**: one handle held
//!
//! `load` moves an empty key to loaded and fails on a loaded key. `release`
//! (or drop) moves a loaded key back to empty.

mod persist;

use std::fmt;
use std::str::FromStr;

use tracing::*;

use super::*;

/// A key backed by a native handle.
///
/// The handle type and the accepted formats are fixed by `K`. See
/// [`PayPrivateKey`] and [`PayPublicKey`] for the OpenSSL-backed forms.
///
/// `PayKey` is not `Clone`: copying reparses the exported key and can fail,
/// so it is exposed as [`PayKey::try_clone`].
pub struct PayKey<K: KeyKind> {
    kind: K,
    resource: Option<K::Handle>,
}

impl<K: KeyKind + Default> PayKey<K> {
    /// Creates a key from key material or a path, using default options.
    ///
    /// # Errors
    ///
    /// Returns `KeyError::InvalidKey` if the source cannot be parsed.
    pub fn create(source: &str) -> Result<Self, KeyError> {
        Self::create_with(K::default(), source)
    }

    /// Creates an empty key with default options.
    pub fn empty() -> Self {
        Self::empty_with(K::default())
    }

    /// Wraps an existing native handle without validating it.
    pub fn from_resource(handle: K::Handle) -> Self {
        Self::from_resource_with(K::default(), handle)
    }
}

impl<K: KeyKind> PayKey<K> {
    /// Creates an empty key that will load with `kind`.
    pub fn empty_with(kind: K) -> Self {
        Self {
            kind,
            resource: None,
        }
    }

    /// Creates a key from key material or a path, using `kind`.
    ///
    /// # Errors
    ///
    /// Returns `KeyError::InvalidKey` if the source cannot be parsed.
    #[instrument(skip_all, fields(kind = K::LABEL))]
    pub fn create_with(kind: K, source: &str) -> Result<Self, KeyError> {
        let mut key = Self::empty_with(kind);
        key.load(source)?;
        Ok(key)
    }

    /// Wraps an existing native handle without validating it.
    pub fn from_resource_with(kind: K, handle: K::Handle) -> Self {
        Self {
            kind,
            resource: Some(handle),
        }
    }

    /// Loads key material or a path into this empty key.
    ///
    /// # Errors
    ///
    /// - `KeyError::AlreadyLoaded` if the key already holds a handle
    /// - `KeyError::InvalidKey` if the source cannot be parsed
    #[instrument(skip_all, fields(kind = K::LABEL))]
    pub fn load(&mut self, source: &str) -> Result<(), KeyError> {
        if self.is_loaded() {
            debug!(invalid = true, "Load refused, key already loaded");
            return Err(KeyError::AlreadyLoaded);
        }

        // Errors carry the source, which may be key material; log the
        // category only.
        let handle = match self.kind.get_key(source) {
            Ok(handle) => handle,
            Err(err) => {
                debug!(invalid = err.is_invalid_key(), "Load failed");
                return Err(err);
            }
        };
        self.resource = Some(handle);
        debug!("Loaded {}", K::LABEL);
        Ok(())
    }

    /// Returns `true` if the key holds a native handle.
    pub fn is_loaded(&self) -> bool {
        self.resource.is_some()
    }

    /// Frees the native handle if one is held. Calling this on an empty key
    /// does nothing.
    pub fn release(&mut self) {
        if self.is_loaded() {
            trace!("Releasing {}", K::LABEL);
        }
        self.resource = None;
    }

    /// Copies the key by exporting it and loading the export into a new key.
    ///
    /// The native handle is never duplicated. `self` is left untouched.
    ///
    /// # Errors
    ///
    /// - `KeyError::NotLoaded` if the key is empty
    /// - `KeyError::OpenSsl` if the key cannot be exported
    /// - `KeyError::InvalidKey` if the export cannot be parsed again
    #[instrument(skip_all, fields(kind = K::LABEL))]
    pub fn try_clone(&self) -> Result<Self, KeyError>
    where
        K: Clone,
    {
        let material = self.as_string()?;
        let mut copy = Self::empty_with(self.kind.clone());
        copy.load(&material)?;
        Ok(copy)
    }

    /// Exports the key to its textual form.
    ///
    /// # Errors
    ///
    /// - `KeyError::NotLoaded` if the key is empty
    /// - `KeyError::OpenSsl` if the library cannot export the handle
    pub fn as_string(&self) -> Result<String, KeyError> {
        let handle = self.resource.as_ref().ok_or(KeyError::NotLoaded)?;
        self.kind.key_to_string(handle)
    }

    /// Returns the native handle without transferring ownership.
    pub fn as_resource(&self) -> Option<&K::Handle> {
        self.resource.as_ref()
    }

    /// Moves the native handle out of the key. The key is empty afterwards
    /// and its drop releases nothing.
    pub fn into_resource(mut self) -> Option<K::Handle> {
        self.resource.take()
    }

    /// Returns the kind this key loads with.
    pub fn kind(&self) -> &K {
        &self.kind
    }
}

impl<K: KeyKind> Drop for PayKey<K> {
    fn drop(&mut self) {
        self.release();
    }
}

impl<K: KeyKind> fmt::Debug for PayKey<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PayKey")
            .field("kind", &K::LABEL)
            .field("loaded", &self.is_loaded())
            .finish()
    }
}

impl<K: KeyKind + Default> FromStr for PayKey<K> {
    type Err = KeyError;

    fn from_str(source: &str) -> Result<Self, Self::Err> {
        Self::create(source)
    }
}

#[cfg(test)]
mod tests;
