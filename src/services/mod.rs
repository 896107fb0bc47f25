//! Host-side collaborators for the editor core.
//!
//! ARCHITECTURE
//! ============
//! The editor crate only sees traits for persistence, media and variables.
//! These modules are the implementations the command-line host plugs in,
//! plus the gesture replay driver used to exercise the engine offline.

pub mod media;
pub mod persistence;
pub mod replay;
pub mod variables;
