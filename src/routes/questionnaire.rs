use actix_web::{web, HttpResponse, Responder};
use validator::Validate;
use crate::core::Questionnaire;
use crate::models::{
    DraftResponse, ErrorResponse, QuestionResponse, StartSessionRequest, StartSessionResponse,
    SubmitAnswerRequest,
};
use crate::routes::{parse_session_id, AppState};
use crate::services::Session;

/// Configure questionnaire and session routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/questionnaire", web::get().to(list_questions))
        .route("/questionnaire/{step}", web::get().to(get_question))
        .route("/sessions", web::post().to(start_session))
        .route("/sessions/{id}", web::delete().to(end_session))
        .route("/sessions/{id}/answers", web::put().to(submit_answer));
}

/// GET /api/v1/questionnaire
async fn list_questions() -> impl Responder {
    HttpResponse::Ok().json(Questionnaire::questions())
}

/// GET /api/v1/questionnaire/{step}
///
/// Steps that are not a number between 1 and 4 resolve to step 1.
async fn get_question(path: web::Path<String>) -> impl Responder {
    let step = Questionnaire::resolve_step(&path);

    match Questionnaire::step(step) {
        Some(question) => HttpResponse::Ok().json(QuestionResponse {
            question,
            progress: Questionnaire::progress(step),
            is_last_step: Questionnaire::is_last_step(step),
        }),
        None => HttpResponse::NotFound().json(ErrorResponse {
            error: "Question not found".to_string(),
            message: format!("No question for step {}", step),
            status_code: 404,
        }),
    }
}

/// Start a questionnaire session
///
/// POST /api/v1/sessions
///
/// Request body:
/// ```json
/// { "clientId": "string" }
/// ```
///
/// The client's liked-pets log is read here and returned with the session id.
async fn start_session(
    state: web::Data<AppState>,
    req: web::Json<StartSessionRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        return HttpResponse::BadRequest().json(ErrorResponse {
            error: "Validation failed".to_string(),
            message: errors.to_string(),
            status_code: 400,
        });
    }

    let liked = match state.likes.load(&req.client_id).await {
        Ok(log) => log,
        Err(e) => {
            tracing::warn!("Failed to read liked pets for {}, starting empty: {}", req.client_id, e);
            Default::default()
        }
    };
    let liked_pets = liked.entries().to_vec();

    let session_id = state
        .sessions
        .create(Session::new(req.client_id.clone(), liked))
        .await;

    tracing::info!(
        "Started session {} for client {} ({} liked pets)",
        session_id,
        req.client_id,
        liked_pets.len()
    );

    HttpResponse::Created().json(StartSessionResponse {
        session_id: session_id.to_string(),
        liked_pets,
    })
}

/// DELETE /api/v1/sessions/{id}
async fn end_session(state: web::Data<AppState>, path: web::Path<String>) -> impl Responder {
    let session_id = match parse_session_id(&path) {
        Ok(id) => id,
        Err(response) => return response,
    };

    state.sessions.remove(&session_id).await;
    HttpResponse::NoContent().finish()
}

/// Record one answer
///
/// PUT /api/v1/sessions/{id}/answers
///
/// Request body:
/// ```json
/// { "question": 1, "answer": 2 }
/// ```
async fn submit_answer(
    state: web::Data<AppState>,
    path: web::Path<String>,
    req: web::Json<SubmitAnswerRequest>,
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

    if session.is_matched() {
        return HttpResponse::Conflict().json(ErrorResponse {
            error: "Questionnaire already submitted".to_string(),
            message: "Start a new session to change answers".to_string(),
            status_code: 409,
        });
    }

    if let Err(e) = session.draft.apply_answer(req.question, req.answer) {
        return HttpResponse::BadRequest().json(ErrorResponse {
            error: "Invalid answer".to_string(),
            message: e.to_string(),
            status_code: 400,
        });
    }

    tracing::debug!("Session {} answered question {} with {}", path.as_str(), req.question, req.answer);

    HttpResponse::Ok().json(DraftResponse {
        responses: session.draft,
        answered: session.draft.answered(),
        is_complete: session.draft.is_complete(),
    })
}
