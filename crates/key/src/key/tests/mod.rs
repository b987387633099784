// Copyright (C) Microsoft Corporation. All rights reserved.

//! Tests for the generic key lifecycle, driven by an in-memory key kind.
#![allow(clippy::unwrap_used)]


pub(crate) use counting_kind::*;

use super::*;
use crate::test_helpers::*;
