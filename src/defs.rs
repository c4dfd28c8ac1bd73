//! Definitions.

use core::fmt::Display;

/// A limb.
pub type Word = u32;

/// Doubled limb, wide enough for a limb product plus carries.
pub type DoubleWord = u64;

/// Maximum value of a limb.
pub const WORD_MAX: Word = Word::MAX;

/// Base of limbs.
pub const WORD_BASE: DoubleWord = WORD_MAX as DoubleWord + 1;

/// Size of a limb in bits.
pub const WORD_BIT_SIZE: usize = core::mem::size_of::<Word>() * 8;

/// Limb with the most significant bit set.
pub const WORD_SIGNIFICANT_BIT: Word = WORD_MAX << (WORD_BIT_SIZE - 1);

/// Maximum number of limbs in a big integer.
///
/// Exact conversion of a double needs at most 34 limbs: the denominator
/// of the smallest subnormal is 2^1074, and fraction extraction multiplies
/// a remainder below it by ten. The bound leaves a few limbs of headroom
/// and is not meant for general arbitrary-precision work.
pub const MAX_LIMBS: usize = 40;

/// Default number of fractional digits for `%f`.
pub const DEFAULT_PRECISION: usize = 6;

/// Sign.
#[derive(PartialEq, Eq, Copy, Clone, Debug, Hash)]
pub enum Sign {
    /// Negative.
    Neg = -1,

    /// Positive.
    Pos = 1,
}

impl Sign {
    /// Changes the sign to the opposite.
    pub fn invert(&self) -> Self {
        match *self {
            Sign::Pos => Sign::Neg,
            Sign::Neg => Sign::Pos,
        }
    }

    /// Returns true if `self` is positive.
    pub fn is_positive(&self) -> bool {
        *self == Sign::Pos
    }

    /// Returns true if `self` is negative.
    pub fn is_negative(&self) -> bool {
        *self == Sign::Neg
    }
}

/// Possible errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Error {
    /// The result needs more than `MAX_LIMBS` limbs.
    CapacityExceeded,

    /// Divizor is zero.
    DivisionByZero,

    /// The host is not little-endian.
    EndiannessUnsupported,

    /// An operand ordering precondition is violated, e.g. subtracting a larger number.
    InvalidPrecondition,

    /// Invalid argument.
    InvalidArgument,

    /// Memory allocation error.
    MemoryAllocation,

    /// The output buffer has no room for the data.
    BufferInsufficient,

    /// Unknown or malformed conversion specifier in a format string.
    InvalidFormatSpecifier,

    /// Format argument kind does not match its conversion specifier.
    ArgumentMismatch,

    /// Format string references more arguments than were supplied.
    MissingArgument,

    /// Writing to the output device failed.
    OutputFailed,
}

#[cfg(feature = "std")]
impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        None
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let repr = match self {
            Error::CapacityExceeded => "limb capacity exceeded",
            Error::DivisionByZero => "division by zero",
            Error::EndiannessUnsupported => "big-endian hosts are not supported",
            Error::InvalidPrecondition => "operand precondition violated",
            Error::InvalidArgument => "invalid argument",
            Error::MemoryAllocation => "memory allocation failure",
            Error::BufferInsufficient => "insufficient buffer",
            Error::InvalidFormatSpecifier => "invalid format specifier",
            Error::ArgumentMismatch => "argument does not match format specifier",
            Error::MissingArgument => "missing format argument",
            Error::OutputFailed => "output write failed",
        };
        f.write_str(repr)
    }
}
