//! Deserialization of BigUnsigned.

use core::fmt::Formatter;
use core::str::FromStr;

use crate::BigUnsigned;
use serde::de::Error;
use serde::de::Visitor;
use serde::{Deserialize, Deserializer};

#[cfg(not(feature = "std"))]
use alloc::{format, string::String};

pub struct BigUnsignedVisitor {}

impl<'de> Deserialize<'de> for BigUnsigned {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(BigUnsignedVisitor {})
    }
}

impl<'de> Visitor<'de> for BigUnsignedVisitor {
    type Value = BigUnsigned;

    fn expecting(&self, formatter: &mut Formatter) -> core::fmt::Result {
        write!(formatter, "a decimal `String` or an unsigned `Number`")
    }

    fn visit_u64<E: Error>(self, v: u64) -> Result<Self::Value, E> {
        Ok(BigUnsigned::from_u64(v))
    }

    fn visit_str<E: Error>(self, v: &str) -> Result<Self::Value, E> {
        match BigUnsigned::from_str(v) {
            Ok(o) => Ok(o),
            Err(e) => Err(Error::custom(format!("{e:?}"))),
        }
    }

    fn visit_string<E: Error>(self, v: String) -> Result<Self::Value, E> {
        self.visit_str(&v)
    }
}
