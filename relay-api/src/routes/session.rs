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

use axum::Json;
use relay_types::SessionClaims;

use crate::auth::SessionUser;

/// GET /me -- returns the verified session claims (`email`, `name`, `iat`,
/// `exp`, plus any optional profile fields).
///
/// The `SessionUser` extractor rejects absent or invalid tokens with 401.
pub async fn me(SessionUser(claims): SessionUser) -> Json<SessionClaims> {
    Json(claims)
}
