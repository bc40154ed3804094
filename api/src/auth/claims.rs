use serde::{Deserialize, Serialize};

/// Token payload. `role` is the user's platform role at the time the token
/// was issued; guards re-parse it rather than trusting route input.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    pub sub: i64,
    pub exp: usize,
    pub role: String,
}

#[derive(Debug, Clone)]
pub struct AuthUser(pub Claims);
