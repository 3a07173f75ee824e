//! Logging macros.
//!
//! Thin wrappers over the `log` facade that compile to nothing when the `log`
//! feature is disabled. Only the driver and the registry log; operators stay
//! silent.

#[allow(unused)]
macro_rules! trace { ($($x:tt)*) => (
    #[cfg(feature = "log")] {
        ::log::trace!($($x)*)
    }
) }

#[allow(unused)]
macro_rules! debug { ($($x:tt)*) => (
    #[cfg(feature = "log")] {
        ::log::debug!($($x)*)
    }
) }

#[allow(unused)]
macro_rules! warn2 { ($($x:tt)*) => (
    #[cfg(feature = "log")] {
        ::log::warn!($($x)*)
    }
) }

#[allow(unused)]
pub(crate) use {debug, trace, warn2 as warn};
