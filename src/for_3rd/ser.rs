//! Serialization of BigUnsigned and DecimalDigits.
//! Both serialize to their decimal string.

use crate::BigUnsigned;
use crate::DecimalDigits;
use serde::{Serialize, Serializer};

#[cfg(not(feature = "std"))]
use alloc::string::ToString;

impl Serialize for BigUnsigned {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl Serialize for DecimalDigits {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

#[cfg(test)]
mod tests {
    use serde_json::to_string;

    use crate::{to_decimal_digits, BigUnsigned};

    #[test]
    fn to_json() {
        assert_eq!(to_string(&BigUnsigned::zero()).unwrap(), "\"0\"");
        assert_eq!(
            to_string(&BigUnsigned::from_u32(1).shift_left(100).unwrap()).unwrap(),
            "\"1267650600228229401496703205376\""
        );
        assert_eq!(to_string(&to_decimal_digits(-2.5, 2).unwrap()).unwrap(), "\"-2.50\"");
        assert_eq!(to_string(&to_decimal_digits(f64::NAN, 2).unwrap()).unwrap(), "\"qNaN\"");
    }
}
