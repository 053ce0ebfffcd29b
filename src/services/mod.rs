//! Service layer wiring the relay's startup sequence

mod attestation_service;

pub use attestation_service::*;
