//! Domain types and the response shaping layer for the Richiesta Assistenza
//! backend.
//!
//! [`shaping`] turns raw records from the data-access layer into the stable
//! JSON shape consumed by the frontend. It is pure and never fails: malformed
//! input degrades to `null` fields and a logged warning.

pub mod error;
pub mod request_enums;
pub mod shaping;
pub mod types;
