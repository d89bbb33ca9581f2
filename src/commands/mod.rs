//! Subcommands of the `wing_aero` binary.

pub mod plan;
pub mod reduce;
pub mod yplus;
