//! Pieces shared by the auxchain binaries.

pub mod logging;
