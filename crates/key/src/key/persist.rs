// Copyright (C) Microsoft Corporation. All rights reserved.

//! Serde hooks: a key serializes to its exported string and deserializes by
//! loading that string into an empty key.

use serde::de::Error as _;
use serde::ser::Error as _;
use serde::Deserialize;
use serde::Deserializer;
use serde::Serialize;
use serde::Serializer;

use super::*;

impl<K: KeyKind> Serialize for PayKey<K> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let material = self.as_string().map_err(S::Error::custom)?;
        serializer.serialize_str(&material)
    }
}

impl<'de, K: KeyKind + Default> Deserialize<'de> for PayKey<K> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let material = String::deserialize(deserializer)?;
        let mut key = Self::empty();
        key.load(&material).map_err(D::Error::custom)?;
        Ok(key)
    }
}
