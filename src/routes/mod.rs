// Route exports
pub mod matches;
pub mod questionnaire;

use actix_web::{web, HttpResponse};
use std::sync::Arc;
use uuid::Uuid;
use crate::models::ErrorResponse;
use crate::services::{LikedPetsStore, MatchingService, SessionStore, SharedSession, SupabaseClient};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<SupabaseClient>,
    pub matching: MatchingService,
    pub sessions: Arc<SessionStore>,
    pub likes: Arc<LikedPetsStore>,
}

impl AppState {
    /// Look up a session by its path parameter
    pub async fn session(&self, raw_id: &str) -> Result<SharedSession, HttpResponse> {
        let id = parse_session_id(raw_id)?;

        self.sessions.get(&id).await.ok_or_else(|| {
            HttpResponse::NotFound().json(ErrorResponse {
                error: "Session not found".to_string(),
                message: format!("Session {} does not exist or has expired", id),
                status_code: 404,
            })
        })
    }
}

pub fn parse_session_id(raw_id: &str) -> Result<Uuid, HttpResponse> {
    Uuid::parse_str(raw_id).map_err(|_| {
        HttpResponse::BadRequest().json(ErrorResponse {
            error: "Invalid session id".to_string(),
            message: format!("'{}' is not a valid session id", raw_id),
            status_code: 400,
        })
    })
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1")
            .configure(questionnaire::configure)
            .configure(matches::configure),
    );
}
