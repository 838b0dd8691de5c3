//! Gallery domain model.
//!
//! # Responsibility
//! - Define the persisted photo record shape.
//! - Define the transient capture result handed over by the camera.
//!
//! # Invariants
//! - The persisted record keeps exactly two fields, `filePath` and
//!   `webViewPath`, so existing snapshots stay readable.

pub mod photo;
