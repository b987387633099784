// Copyright (C) Microsoft Corporation. All rights reserved.

//! Tests for OpenSSL-backed public keys.
#![allow(clippy::unwrap_used)]


use super::*;
use crate::test_helpers::*;
