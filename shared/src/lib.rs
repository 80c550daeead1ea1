//! Types shared between the simulation server and its clients.
//!
//! Everything here is serde-serializable and exported as TypeScript bindings
//! so the UI layer reads the exact same shapes.

pub mod config;
pub mod protocol;
