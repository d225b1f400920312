use actix_web::{web, HttpResponse, Responder};
use validator::Validate;
use crate::core::{PetCardView, SwipeDeck};
use crate::models::{
    DeckResponse, ErrorResponse, FindMatchesResponse, HealthResponse, LikedPetsResponse,
    SwipeAction, SwipeRequest,
};
use crate::models::requests::validate_client_id;
use crate::routes::AppState;
use crate::services::{Session, SupabaseError};

/// Configure matching, swipe and pet routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/health", web::get().to(health_check))
        .route("/sessions/{id}/submit", web::post().to(submit_questionnaire))
        .route("/sessions/{id}/deck", web::get().to(get_deck))
        .route("/sessions/{id}/swipe", web::post().to(swipe))
        .route("/likes/{client_id}", web::get().to(get_liked_pets))
        .route("/pets/{id}", web::get().to(get_pet));
}

/// Health check endpoint
async fn health_check() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now(),
    })
}

fn deck_response(deck: &SwipeDeck) -> DeckResponse {
    DeckResponse {
        active: deck.active().map(PetCardView::from).collect(),
        liked_count: deck.liked_count(),
        passed_count: deck.passed_count(),
        is_finished: deck.is_finished(),
        summary: deck.summary(),
    }
}

/// Submit a completed questionnaire and load the swipe deck
///
/// POST /api/v1/sessions/{id}/submit
///
/// Returns 422 while any answer is missing. A failed store query is logged and
/// answered with an empty match list flagged `degraded`.
async fn submit_questionnaire(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> impl Responder {
    let session = match state.session(&path).await {
        Ok(session) => session,
        Err(response) => return response,
    };
    let mut session = session.lock().await;

    if session.is_matched() {
        return HttpResponse::Conflict().json(ErrorResponse {
            error: "Questionnaire already submitted".to_string(),
            message: "Matches for this session were already found".to_string(),
            status_code: 409,
        });
    }

    let Some(response) = session.draft.complete() else {
        return HttpResponse::UnprocessableEntity().json(ErrorResponse {
            error: "Questionnaire incomplete".to_string(),
            message: format!(
                "{} of {} questions answered",
                session.draft.answered(),
                crate::models::QUESTION_COUNT
            ),
            status_code: 422,
        });
    };

    tracing::info!("Finding matches for session {}: {:?}", path.as_str(), response);

    let outcome = state.matching.submit(response).await;
    let degraded = outcome.query_error.is_some();
    if let Some(error) = &outcome.query_error {
        tracing::warn!("Session {} matched without store results: {}", path.as_str(), error);
    }
    let matches: Vec<PetCardView> = outcome.pets.iter().map(PetCardView::from).collect();
    let total_results = matches.len();

    session.finish_matching(SwipeDeck::new(outcome.pets));

    tracing::info!("Returning {} matches for session {}", total_results, path.as_str());

    HttpResponse::Ok().json(FindMatchesResponse {
        matches,
        total_results,
        degraded,
    })
}

/// GET /api/v1/sessions/{id}/deck
async fn get_deck(state: web::Data<AppState>, path: web::Path<String>) -> impl Responder {
    let session = match state.session(&path).await {
        Ok(session) => session,
        Err(response) => return response,
    };
    let session = session.lock().await;

    HttpResponse::Ok().json(deck_response(&session.deck))
}

/// Like or pass on a candidate
///
/// POST /api/v1/sessions/{id}/swipe
///
/// Request body:
/// ```json
/// { "petId": "string", "action": "like|pass" }
/// ```
async fn swipe(
    state: web::Data<AppState>,
    path: web::Path<String>,
    req: web::Json<SwipeRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        return HttpResponse::BadRequest().json(ErrorResponse {
            error: "Validation failed".to_string(),
            message: errors.to_string(),
            status_code: 400,
        });
    }

    let session = match state.session(&path).await {
        Ok(session) => session,
        Err(response) => return response,
    };
    let mut session = session.lock().await;

    let swiped = match req.action {
        SwipeAction::Like => match session.deck.like(&req.pet_id) {
            Some(pet) => {
                record_like(&state, &mut session, pet).await;
                true
            }
            None => false,
        },
        SwipeAction::Pass => session.deck.pass(&req.pet_id),
    };

    if !swiped {
        return HttpResponse::NotFound().json(ErrorResponse {
            error: "Pet not in deck".to_string(),
            message: format!("Pet {} is not awaiting a decision", req.pet_id),
            status_code: 404,
        });
    }

    tracing::debug!("Session {} {:?} pet {}", path.as_str(), req.action, req.pet_id);

    HttpResponse::Ok().json(deck_response(&session.deck))
}

/// Append to the client's liked file and refresh the session's copy from it
async fn record_like(state: &AppState, session: &mut Session, pet: crate::models::CandidatePet) {
    match state.likes.append(&session.client_id, pet.clone()).await {
        Ok(log) => session.liked = log,
        Err(e) => {
            tracing::warn!("Failed to persist liked pets for {}: {}", session.client_id, e);
            session.liked.append(pet);
        }
    }
}

/// GET /api/v1/likes/{client_id}
async fn get_liked_pets(state: web::Data<AppState>, path: web::Path<String>) -> impl Responder {
    let client_id = path.into_inner();

    if validate_client_id(&client_id).is_err() {
        return HttpResponse::BadRequest().json(ErrorResponse {
            error: "Invalid client id".to_string(),
            message: "Client ids may only contain letters, digits, '-' and '_'".to_string(),
            status_code: 400,
        });
    }

    match state.likes.load(&client_id).await {
        Ok(log) => {
            let liked_pets = log.entries().to_vec();
            HttpResponse::Ok().json(LikedPetsResponse {
                client_id,
                count: liked_pets.len(),
                liked_pets,
            })
        }
        Err(e) => {
            tracing::error!("Failed to read liked pets for {}: {}", client_id, e);
            HttpResponse::InternalServerError().json(ErrorResponse {
                error: "Failed to read liked pets".to_string(),
                message: e.to_string(),
                status_code: 500,
            })
        }
    }
}

/// GET /api/v1/pets/{id}
async fn get_pet(state: web::Data<AppState>, path: web::Path<String>) -> impl Responder {
    match state.store.get_pet(&path).await {
        Ok(pet) => HttpResponse::Ok().json(PetCardView::from(&pet)),
        Err(SupabaseError::NotFound(message)) => HttpResponse::NotFound().json(ErrorResponse {
            error: "Pet not found".to_string(),
            message,
            status_code: 404,
        }),
        Err(e) => {
            tracing::error!("Error fetching pet {}: {}", path.as_str(), e);
            HttpResponse::InternalServerError().json(ErrorResponse {
                error: "Failed to load pet details".to_string(),
                message: e.to_string(),
                status_code: 500,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::CandidatePet;

    #[test]
    fn test_health_check_response() {
        let response = HealthResponse {
            status: "healthy".to_string(),
            version: "0.1.0".to_string(),
            timestamp: chrono::Utc::now(),
        };

        assert_eq!(response.status, "healthy");
    }

    #[test]
    fn test_deck_response_summary() {
        let pet = CandidatePet {
            id: "1".to_string(),
            name: "Rex".to_string(),
            description: None,
            long_description: None,
            picture: None,
            age: Some(2),
            species: true,
            energy_level: 3,
            good_with_kids: 2,
            good_with_pets: 3,
            ease_of_care: 1,
        };

        let mut deck = SwipeDeck::new(vec![pet]);
        let response = deck_response(&deck);
        assert_eq!(response.active.len(), 1);
        assert!(response.summary.is_none());

        deck.like("1");
        let response = deck_response(&deck);
        assert!(response.is_finished);
        assert_eq!(response.summary.as_deref(), Some("You liked 1 pet!"));
    }
}
