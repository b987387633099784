// Copyright (C) Microsoft Corporation. All rights reserved.

//! Shared fixtures for unit tests.

#![allow(clippy::unwrap_used)]

use std::sync::Once;
use std::sync::OnceLock;

use openssl::asn1::Asn1Time;
use openssl::bn::BigNum;
use openssl::ec::EcGroup;
use openssl::ec::EcKey;
use openssl::hash::MessageDigest;
use openssl::nid::Nid;
use openssl::pkey::PKey;
use openssl::pkey::Private;
use openssl::rsa::Rsa;
use openssl::x509::X509NameBuilder;
use openssl::x509::X509;
use tracing::metadata::LevelFilter;

/// Initializes `tracing` output for the test binary once.
pub(crate) fn init_tracing() {
    static ONCE: Once = Once::new();

    ONCE.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_ansi(false)
            .with_test_writer()
            .with_max_level(LevelFilter::TRACE)
            .try_init();
    });
}

/// A 2048-bit RSA key generated once per test binary.
pub(crate) fn rsa_key() -> PKey<Private> {
    static PEM: OnceLock<Vec<u8>> = OnceLock::new();

    let pem = PEM.get_or_init(|| {
        let rsa = Rsa::generate(2048).unwrap();
        PKey::from_rsa(rsa)
            .unwrap()
            .private_key_to_pem_pkcs8()
            .unwrap()
    });
    PKey::private_key_from_pem(pem).unwrap()
}

/// PKCS#8 PEM of [`rsa_key`].
pub(crate) fn rsa_pkcs8_pem() -> String {
    String::from_utf8(rsa_key().private_key_to_pem_pkcs8().unwrap()).unwrap()
}

/// PKCS#1 PEM of [`rsa_key`].
pub(crate) fn rsa_pkcs1_pem() -> String {
    String::from_utf8(rsa_key().rsa().unwrap().private_key_to_pem().unwrap()).unwrap()
}

/// SubjectPublicKeyInfo PEM of [`rsa_key`].
pub(crate) fn rsa_public_pem() -> String {
    String::from_utf8(rsa_key().public_key_to_pem().unwrap()).unwrap()
}

/// PKCS#1 public PEM of [`rsa_key`].
pub(crate) fn rsa_public_pkcs1_pem() -> String {
    String::from_utf8(rsa_key().rsa().unwrap().public_key_to_pem_pkcs1().unwrap()).unwrap()
}

/// A P-256 private key in PKCS#8 PEM.
pub(crate) fn ec_pkcs8_pem() -> String {
    let group = EcGroup::from_curve_name(Nid::X9_62_PRIME256V1).unwrap();
    let ec = EcKey::generate(&group).unwrap();
    let pkey = PKey::from_ec_key(ec).unwrap();
    String::from_utf8(pkey.private_key_to_pem_pkcs8().unwrap()).unwrap()
}

/// A self-signed certificate for [`rsa_key`] in PEM.
pub(crate) fn rsa_certificate_pem() -> String {
    let key = rsa_key();

    let mut name = X509NameBuilder::new().unwrap();
    name.append_entry_by_text("CN", "paysdk key test").unwrap();
    let name = name.build();

    let mut builder = X509::builder().unwrap();
    builder.set_version(2).unwrap();
    let serial = BigNum::from_u32(1).unwrap().to_asn1_integer().unwrap();
    builder.set_serial_number(&serial).unwrap();
    builder.set_subject_name(&name).unwrap();
    builder.set_issuer_name(&name).unwrap();
    builder.set_pubkey(&key).unwrap();
    builder
        .set_not_before(&Asn1Time::days_from_now(0).unwrap())
        .unwrap();
    builder
        .set_not_after(&Asn1Time::days_from_now(1).unwrap())
        .unwrap();
    builder.sign(&key, MessageDigest::sha256()).unwrap();

    String::from_utf8(builder.build().to_pem().unwrap()).unwrap()
}

/// Strips the PEM armor and line breaks, leaving the base64 body.
pub(crate) fn pem_body(pem: &str) -> String {
    pem.lines()
        .filter(|line| !line.starts_with("-----"))
        .collect::<Vec<_>>()
        .concat()
}
