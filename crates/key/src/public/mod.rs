// Copyright (C) Microsoft Corporation. All rights reserved.

//! OpenSSL-backed public keys.
//!
//! [`PayPublicKey`] holds an OpenSSL `PKey<Public>` handle. It loads
//! SubjectPublicKeyInfo PEM (`PUBLIC KEY`), PKCS#1 PEM (`RSA PUBLIC KEY`),
//! X.509 certificates (`CERTIFICATE`, public key extracted) and bare base64
//! bodies of any of these, tried in that order. Exports are
//! SubjectPublicKeyInfo PEM.

use openssl::error::ErrorStack;
use openssl::pkey::PKey;
use openssl::pkey::Public;
use openssl::rsa::Rsa;
use openssl::x509::X509;

use super::*;

const PUBLIC_KEY_LABELS: &[&str] = &["PUBLIC KEY", "RSA PUBLIC KEY", "CERTIFICATE"];
const CERTIFICATE_HEADER: &[u8] = b"-----BEGIN CERTIFICATE-----";
const RSA_PUBLIC_KEY_HEADER: &[u8] = b"-----BEGIN RSA PUBLIC KEY-----";

/// Loading options for public keys. There are none yet.
#[derive(Debug, Clone, Copy, Default)]
pub struct PublicKeyKind;

fn parse_public_pem(pem: &[u8]) -> Result<PKey<Public>, ErrorStack> {
    if pem.starts_with(CERTIFICATE_HEADER) {
        return X509::from_pem(pem)?.public_key();
    }

    if pem.starts_with(RSA_PUBLIC_KEY_HEADER) {
        let rsa = Rsa::public_key_from_pem_pkcs1(pem)?;
        return PKey::from_rsa(rsa);
    }

    PKey::public_key_from_pem(pem)
}

impl KeyKind for PublicKeyKind {
    type Handle = PKey<Public>;

    const LABEL: &'static str = "public key";

    fn get_key(&self, source: &str) -> Result<Self::Handle, KeyError> {
        parse_first(source, PUBLIC_KEY_LABELS, parse_public_pem)
    }

    fn key_to_string(&self, handle: &Self::Handle) -> Result<String, KeyError> {
        let pem = handle.public_key_to_pem()?;
        String::from_utf8(pem).map_err(|err| KeyError::OpenSsl(err.to_string()))
    }
}

/// A public key backed by an OpenSSL handle.
pub type PayPublicKey = PayKey<PublicKeyKind>;

impl PayKey<PublicKeyKind> {
    /// Returns the key size in bits.
    ///
    /// # Errors
    ///
    /// Returns `KeyError::NotLoaded` if the key is empty.
    pub fn bits(&self) -> Result<u32, KeyError> {
        self.as_resource()
            .map(|handle| handle.bits())
            .ok_or(KeyError::NotLoaded)
    }

    /// Returns `true` if both keys hold handles with the same public
    /// parameters.
    pub fn public_eq(&self, other: &PayPublicKey) -> bool {
        match (self.as_resource(), other.as_resource()) {
            (Some(a), Some(b)) => a.public_eq(&**b),
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests;
