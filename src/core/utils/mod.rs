//! Shared utilities (logging macros must be declared before their users).

#[macro_use]
pub mod logging;
