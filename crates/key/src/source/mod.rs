// Copyright (C) Microsoft Corporation. All rights reserved.

//! Key source classification.
//!
//! The payment platform hands keys out in several forms. A source string is
//! classified as one of:
//!
//! - **PEM**: text starting with a `-----BEGIN` line
//! - **Path**: a `file://` URL, or the name of an existing regular file
//! - **Base64 body**: anything else, taken as PEM content without its armor
//!
//! A file is read and its contents are classified again as PEM or base64
//! body. Paths inside files are not followed.

use std::fs;
use std::path::Path;
use std::path::PathBuf;

use openssl::error::ErrorStack;
use tracing::*;

use super::*;

const PEM_PREFIX: &str = "-----BEGIN";
const FILE_SCHEME: &str = "file://";
const PEM_LINE_WIDTH: usize = 64;

/// Classified form of a key source string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeySource<'a> {
    /// PEM text, trimmed.
    Pem(&'a str),

    /// Path to a file holding PEM text or a base64 body.
    Path(PathBuf),

    /// Base64 body with all whitespace removed.
    Base64(String),
}

impl<'a> KeySource<'a> {
    /// Classifies `source`.
    pub fn classify(source: &'a str) -> Self {
        let trimmed = source.trim();

        if trimmed.starts_with(PEM_PREFIX) {
            return KeySource::Pem(trimmed);
        }

        if let Some(path) = trimmed.strip_prefix(FILE_SCHEME) {
            return KeySource::Path(PathBuf::from(path));
        }

        if !trimmed.is_empty() && Path::new(trimmed).is_file() {
            return KeySource::Path(PathBuf::from(trimmed));
        }

        KeySource::Base64(trimmed.split_whitespace().collect())
    }

    fn kind_name(&self) -> &'static str {
        match self {
            KeySource::Pem(_) => "pem",
            KeySource::Path(_) => "path",
            KeySource::Base64(_) => "base64",
        }
    }
}

/// Wraps a base64 body into PEM armor with the given label, 64 columns wide.
pub fn wrap_pem(body: &str, label: &str) -> String {
    let chars: Vec<char> = body.chars().filter(|c| !c.is_whitespace()).collect();
    let mut pem = format!("-----BEGIN {label}-----\n");
    for line in chars.chunks(PEM_LINE_WIDTH) {
        pem.extend(line);
        pem.push('\n');
    }
    pem.push_str(&format!("-----END {label}-----\n"));
    pem
}

/// Resolves `source` to candidate PEM documents.
///
/// PEM text yields itself. A base64 body yields one document per label, in
/// order, so the caller can try each armor in turn.
pub(crate) fn pem_candidates(source: &str, labels: &[&str]) -> Result<Vec<String>, KeyError> {
    let classified = KeySource::classify(source);
    trace!(source = classified.kind_name(), "Resolving key source");

    match classified {
        KeySource::Pem(text) => Ok(vec![text.to_string()]),
        KeySource::Path(path) => {
            let contents =
                fs::read_to_string(&path).map_err(|err| KeyError::invalid_key(err, source))?;
            let contents = contents.trim();
            if contents.starts_with(PEM_PREFIX) {
                Ok(vec![contents.to_string()])
            } else {
                body_candidates(contents, labels, source)
            }
        }
        KeySource::Base64(body) => body_candidates(&body, labels, source),
    }
}

fn body_candidates(body: &str, labels: &[&str], source: &str) -> Result<Vec<String>, KeyError> {
    if body.trim().is_empty() {
        return Err(KeyError::invalid_key("empty key material", source));
    }

    Ok(labels.iter().map(|label| wrap_pem(body, label)).collect())
}

/// Parses the first candidate PEM document of `source` that `parse` accepts.
///
/// # Errors
///
/// Returns `KeyError::InvalidKey` with the last library error and `source`
/// if no candidate parses.
pub(crate) fn parse_first<T>(
    source: &str,
    labels: &[&str],
    mut parse: impl FnMut(&[u8]) -> Result<T, ErrorStack>,
) -> Result<T, KeyError> {
    let mut last_error = None;
    for pem in pem_candidates(source, labels)? {
        match parse(pem.as_bytes()) {
            Ok(handle) => return Ok(handle),
            Err(err) => last_error = Some(err),
        }
    }

    let reason = last_error
        .map(|err| err.to_string())
        .unwrap_or_else(|| "no key material".to_string());
    Err(KeyError::invalid_key(reason, source))
}
