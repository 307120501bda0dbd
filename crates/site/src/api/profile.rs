// Profile API route
// Decision: In demo mode the profile is an anonymous visitor, mirroring the open dashboard

use axum::{extract::State, Json};
use chrono::{DateTime, Utc};
use meridian_gate::{CurrentSession, SessionClaims};
use serde::Serialize;
use uuid::Uuid;

use crate::state::AppState;

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Profile {
    pub id: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub session_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub signed_in_at: Option<DateTime<Utc>>,
    pub auth_mode: &'static str,
}

impl Profile {
    /// Visitor profile for demo mode (or a public call without a session)
    pub fn anonymous(auth_mode: &'static str) -> Self {
        Self {
            id: Uuid::nil().to_string(),
            name: "Demo visitor".to_string(),
            email: None,
            session_id: None,
            signed_in_at: None,
            auth_mode,
        }
    }

    pub fn from_claims(claims: &SessionClaims, auth_mode: &'static str) -> Self {
        Self {
            id: claims.sub.clone(),
            name: claims.display_name().to_string(),
            email: claims.email.clone(),
            session_id: claims.sid.clone(),
            signed_in_at: DateTime::from_timestamp(claims.iat, 0).filter(|_| claims.iat > 0),
            auth_mode,
        }
    }
}

/// GET /api/profile
pub async fn get_profile(
    State(state): State<AppState>,
    CurrentSession(session): CurrentSession,
) -> Json<Profile> {
    let mode = state.auth_mode().as_str();
    let profile = match session {
        Some(claims) => Profile::from_claims(&claims, mode),
        None => Profile::anonymous(mode),
    };
    Json(profile)
}
