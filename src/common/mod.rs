//! Helpers shared by the limb arithmetic.

pub mod util;
