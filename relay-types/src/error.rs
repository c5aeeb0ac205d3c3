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

//! API error body.

use serde::{Deserialize, Serialize};

/// JSON body returned by protected endpoints on failure: `{ "error": "..." }`.
///
/// Messages are deliberately generic; clients never learn why a token was
/// rejected.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct ErrorBody {
    pub error: String,
}

impl ErrorBody {
    pub const NO_TOKEN: &'static str = "No token";
    pub const INVALID_TOKEN: &'static str = "Invalid token";

    pub fn no_token() -> Self {
        Self {
            error: Self::NO_TOKEN.to_string(),
        }
    }

    pub fn invalid_token() -> Self {
        Self {
            error: Self::INVALID_TOKEN.to_string(),
        }
    }
}
