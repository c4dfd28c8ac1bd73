//! Host capabilities the engine depends on.

use crate::defs::{DoubleWord, Error, Word};
use lazy_static::lazy_static;

const _: () = assert!(core::mem::size_of::<Word>() == 4);
const _: () = assert!(core::mem::size_of::<DoubleWord>() == 8);
const _: () = assert!(core::mem::size_of::<f64>() == 8);

lazy_static! {
    static ref LITTLE_ENDIAN: bool = probe_byte_order();
}

// Look at the first byte of 1u32 as it is laid out in memory.
fn probe_byte_order() -> bool {
    let x: u32 = 1;
    x.to_ne_bytes()[0] == 1
}

/// Returns true if the host stores multi-byte values least significant byte first.
/// The probe runs once; later calls return the cached answer.
pub fn is_little_endian() -> bool {
    *LITTLE_ENDIAN
}

/// Fails with `EndiannessUnsupported` on hosts that are not little-endian.
pub fn check_byte_order() -> Result<(), Error> {
    if is_little_endian() {
        Ok(())
    } else {
        tracing::warn!("rejecting host: byte order is not little-endian");
        Err(Error::EndiannessUnsupported)
    }
}

#[cfg(test)]
mod tests {

    use super::*;

    #[test]
    fn test_byte_order() {
        assert_eq!(is_little_endian(), cfg!(target_endian = "little"));
        assert_eq!(is_little_endian(), is_little_endian());

        if cfg!(target_endian = "little") {
            assert!(check_byte_order().is_ok());
        } else {
            assert_eq!(check_byte_order(), Err(Error::EndiannessUnsupported));
        }
    }
}
