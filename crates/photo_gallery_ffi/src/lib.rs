//! Flutter-facing bindings for the photo gallery core.

pub mod api;
