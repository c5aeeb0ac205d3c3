/*
 * Copyright 2025 Security Union LLC
 *
 * Licensed under either of
 *
 * * Apache License, Version 2.0
 *   (http://www.apache.org/licenses/LICENSE-2.0)
 * * MIT license
 *   (http://opensource.org/licenses/MIT)
 *
 * at your option.
 */

//! Shared API types for the identity federation relay.
//!
//! This crate defines the contract between the relay and the frontend that
//! holds its session tokens. It has no HTTP framework or JWT library types.

pub mod claims;
pub mod error;

pub use claims::{IdentityClaims, SessionClaims};
pub use error::ErrorBody;
