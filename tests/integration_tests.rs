// Integration tests for Pawdr Match against a mocked Supabase backend

use actix_web::{http::StatusCode, test, web, App};
use mockito::{Matcher, Server};
use pawdr_match::core::MatchFilter;
use pawdr_match::models::{
    CandidatePet, ExistingPets, ExperienceLevel, OutdoorPreference, QuestionnaireResponse,
    SpeciesPreference,
};
use pawdr_match::routes::{self, AppState};
use pawdr_match::services::{
    LikedPetsStore, MatchingService, SessionStore, SupabaseClient, SupabaseError, SupabaseTables,
};
use serde_json::Value;
use std::path::Path;
use std::sync::Arc;

fn client(url: String) -> Arc<SupabaseClient> {
    let tables = SupabaseTables {
        pets: "Pets".to_string(),
        responses: "adopter_response".to_string(),
    };
    Arc::new(SupabaseClient::new(url, "anon".to_string(), tables, 5).unwrap())
}

fn service(url: String) -> MatchingService {
    MatchingService::new(client(url), MatchFilter::default())
}

fn response(
    outdoor: OutdoorPreference,
    pets: ExistingPets,
    experience: ExperienceLevel,
    species: SpeciesPreference,
) -> QuestionnaireResponse {
    QuestionnaireResponse {
        outdoor_preference: outdoor,
        existing_pets: pets,
        experience_level: experience,
        species_preference: species,
    }
}

fn pet_row(id: i64, species: bool, energy_level: i32, good_with_pets: i32) -> serde_json::Value {
    serde_json::json!({
        "id": id,
        "name": format!("Pet {}", id),
        "description": "Friendly",
        "species": species,
        "energy_level": energy_level,
        "good_with_kids": 2,
        "good_with_pets": good_with_pets,
        "ease_of_care": 1,
    })
}

#[tokio::test]
async fn test_very_active_query_hits_store_with_energy_floor() {
    let mut server = Server::new_async().await;
    let rows = serde_json::json!([pet_row(1, true, 3, 0), pet_row(2, false, 4, 1)]);
    let mock = server
        .mock("GET", "/rest/v1/Pets")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("select".into(), "*".into()),
            Matcher::UrlEncoded("energy_level".into(), "gte.3".into()),
        ]))
        .match_header("apikey", "anon")
        .match_header("authorization", "Bearer anon")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(rows.to_string())
        .create_async()
        .await;

    let service = service(server.url());
    let answers = response(
        OutdoorPreference::VeryActive,
        ExistingPets::NoPets,
        ExperienceLevel::SpecialNeeds,
        SpeciesPreference::Either,
    );

    let pets = service.find_matching_pets(&answers).await.unwrap();

    mock.assert_async().await;
    assert_eq!(pets.len(), 2);
    let high = service.filter().thresholds().energy_high;
    assert!(pets.iter().all(|p| p.energy_level >= high));
    assert_eq!(pets[0].id, "1");
}

#[tokio::test]
async fn test_cat_query_has_no_pet_compatibility_filter() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/rest/v1/Pets")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("species".into(), "eq.false".into()),
            Matcher::UrlEncoded("energy_level".into(), "lte.2".into()),
            Matcher::UrlEncoded("ease_of_care".into(), "lte.1".into()),
        ]))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(serde_json::json!([pet_row(7, false, 1, 0)]).to_string())
        .create_async()
        .await;

    let service = service(server.url());
    let answers = response(
        OutdoorPreference::Homebound,
        ExistingPets::NoPets,
        ExperienceLevel::Novice,
        SpeciesPreference::Cat,
    );

    let query = service.filter().build_query(&answers);
    assert!(!pawdr_match::services::supabase::render_query(&query).contains("good_with_pets"));

    let pets = service.find_matching_pets(&answers).await.unwrap();

    mock.assert_async().await;
    assert!(pets.iter().all(|p| !p.species));
    assert_eq!(pets[0].good_with_pets, 0);
}

#[tokio::test]
async fn test_empty_store_yields_empty_result() {
    let mut server = Server::new_async().await;
    let _pets = server
        .mock("GET", "/rest/v1/Pets")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body("[]")
        .create_async()
        .await;
    let _save = server
        .mock("POST", "/rest/v1/adopter_response")
        .with_status(201)
        .with_header("content-type", "application/json")
        .with_body(r#"[{"q_outdoor_pref":1,"q_pets":2,"q_experience_level":0,"q_preference":true}]"#)
        .create_async()
        .await;

    let service = service(server.url());
    let answers = response(
        OutdoorPreference::SometimesActive,
        ExistingPets::NeedTime,
        ExperienceLevel::Novice,
        SpeciesPreference::Dog,
    );

    let direct = service.find_matching_pets(&answers).await.unwrap();
    assert!(direct.is_empty());

    let outcome = service.submit(answers).await;
    assert!(outcome.pets.is_empty());
    assert!(outcome.query_error.is_none());
}

#[tokio::test]
async fn test_store_failure_is_caught_by_submit() {
    let mut server = Server::new_async().await;
    let _pets = server
        .mock("GET", "/rest/v1/Pets")
        .match_query(Matcher::Any)
        .with_status(500)
        .with_body("boom")
        .expect_at_least(1)
        .create_async()
        .await;

    let service = service(server.url());
    let answers = response(
        OutdoorPreference::VeryActive,
        ExistingPets::Friendly,
        ExperienceLevel::Experienced,
        SpeciesPreference::Either,
    );

    let err = service.find_matching_pets(&answers).await.unwrap_err();
    assert!(matches!(err, SupabaseError::ApiError { status: 500, .. }));

    let outcome = service.submit(answers).await;
    assert!(outcome.pets.is_empty());
    assert!(outcome.query_error.is_some());
}

#[tokio::test]
async fn test_save_failure_does_not_affect_matching() {
    let mut server = Server::new_async().await;
    let _pets = server
        .mock("GET", "/rest/v1/Pets")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(serde_json::json!([pet_row(3, true, 3, 3)]).to_string())
        .create_async()
        .await;
    let _save = server
        .mock("POST", "/rest/v1/adopter_response")
        .with_status(400)
        .with_body(r#"{"message":"invalid input"}"#)
        .create_async()
        .await;

    let service = service(server.url());
    let answers = response(
        OutdoorPreference::VeryActive,
        ExistingPets::NeedTime,
        ExperienceLevel::SpecialNeeds,
        SpeciesPreference::Dog,
    );

    let saved = service.save_response_in_background(answers).await.unwrap();
    assert!(!saved);

    let outcome = service.submit(answers).await;
    assert_eq!(outcome.pets.len(), 1);
    assert!(outcome.query_error.is_none());
}

#[tokio::test]
async fn test_saved_response_round_trip() {
    let mut server = Server::new_async().await;
    let answers = response(
        OutdoorPreference::Homebound,
        ExistingPets::Friendly,
        ExperienceLevel::Experienced,
        SpeciesPreference::Either,
    );
    let mock = server
        .mock("POST", "/rest/v1/adopter_response")
        .match_header("prefer", "return=representation")
        .match_body(Matcher::Json(serde_json::json!([{
            "q_outdoor_pref": 0,
            "q_pets": 1,
            "q_experience_level": 1,
            "q_preference": null,
        }])))
        .with_status(201)
        .with_header("content-type", "application/json")
        .with_body(
            r#"[{"id":12,"created_at":"2025-01-01T00:00:00Z","q_outdoor_pref":0,"q_pets":1,"q_experience_level":1,"q_preference":null}]"#,
        )
        .create_async()
        .await;

    let stored = client(server.url()).save_response(&answers).await.unwrap();

    mock.assert_async().await;
    assert_eq!(stored, answers);
}

#[tokio::test]
async fn test_get_pet_not_found() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("GET", "/rest/v1/Pets")
        .match_query(Matcher::UrlEncoded("id".into(), "eq.99".into()))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body("[]")
        .create_async()
        .await;

    let err = client(server.url()).get_pet("99").await.unwrap_err();
    assert!(matches!(err, SupabaseError::NotFound(_)));
}

#[tokio::test]
async fn test_get_pet_found() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("GET", "/rest/v1/Pets")
        .match_query(Matcher::UrlEncoded("id".into(), "eq.5".into()))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(serde_json::json!([pet_row(5, true, 2, 2)]).to_string())
        .create_async()
        .await;

    let pet: CandidatePet = client(server.url()).get_pet("5").await.unwrap();
    assert_eq!(pet.id, "5");
    assert_eq!(pet.description.as_deref(), Some("Friendly"));
}

#[tokio::test]
async fn test_malformed_rows_are_reported() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("GET", "/rest/v1/Pets")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"unexpected":"object"}"#)
        .create_async()
        .await;

    let answers = response(
        OutdoorPreference::Homebound,
        ExistingPets::NoPets,
        ExperienceLevel::Novice,
        SpeciesPreference::Either,
    );
    let err = service(server.url()).find_matching_pets(&answers).await.unwrap_err();
    assert!(matches!(err, SupabaseError::InvalidResponse(_)));
}

// HTTP handlers

const SAVED_ROW: &str =
    r#"[{"q_outdoor_pref":2,"q_pets":0,"q_experience_level":2,"q_preference":true}]"#;

fn app_state(url: String, likes_dir: &Path) -> AppState {
    let store = client(url);
    AppState {
        matching: MatchingService::new(Arc::clone(&store), MatchFilter::default()),
        store,
        sessions: Arc::new(SessionStore::new(100, 60)),
        likes: Arc::new(LikedPetsStore::new(likes_dir)),
    }
}

async fn mock_store(server: &mut mockito::ServerGuard, pets: Value) -> (mockito::Mock, mockito::Mock) {
    let query = server
        .mock("GET", "/rest/v1/Pets")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(pets.to_string())
        .create_async()
        .await;
    let save = server
        .mock("POST", "/rest/v1/adopter_response")
        .with_status(201)
        .with_header("content-type", "application/json")
        .with_body(SAVED_ROW)
        .create_async()
        .await;
    (query, save)
}

fn start_request(client_id: &str) -> test::TestRequest {
    test::TestRequest::post()
        .uri("/api/v1/sessions")
        .set_json(serde_json::json!({ "clientId": client_id }))
}

fn answer_request(session: &str, question: u8, answer: u8) -> test::TestRequest {
    test::TestRequest::put()
        .uri(&format!("/api/v1/sessions/{}/answers", session))
        .set_json(serde_json::json!({ "question": question, "answer": answer }))
}

fn submit_request(session: &str) -> test::TestRequest {
    test::TestRequest::post().uri(&format!("/api/v1/sessions/{}/submit", session))
}

fn swipe_request(session: &str, pet_id: &str, action: &str) -> test::TestRequest {
    test::TestRequest::post()
        .uri(&format!("/api/v1/sessions/{}/swipe", session))
        .set_json(serde_json::json!({ "petId": pet_id, "action": action }))
}

fn liked_ids_on_disk(dir: &Path, client_id: &str) -> Vec<String> {
    let raw = std::fs::read(dir.join(format!("{}.json", client_id))).unwrap();
    let entries: Vec<Value> = serde_json::from_slice(&raw).unwrap();
    entries
        .iter()
        .map(|e| e["id"].as_str().unwrap().to_string())
        .collect()
}

const FULL_ANSWERS: [(u8, u8); 4] = [(1, 2), (2, 0), (3, 2), (4, 1)];

#[actix_web::test]
async fn test_questionnaire_and_swipe_routes() {
    let mut server = Server::new_async().await;
    let _mocks = mock_store(
        &mut server,
        serde_json::json!([pet_row(1, true, 3, 3), pet_row(2, true, 4, 1)]),
    )
    .await;
    let dir = tempfile::tempdir().unwrap();
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(app_state(server.url(), dir.path())))
            .configure(routes::configure_routes),
    )
    .await;

    let resp = test::call_service(&app, start_request("tab").to_request()).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let body: Value = test::read_body_json(resp).await;
    let session = body["sessionId"].as_str().unwrap().to_string();
    assert_eq!(body["likedPets"], serde_json::json!([]));

    // Incomplete drafts are never submitted
    let resp = test::call_service(&app, answer_request(&session, 1, 2).to_request()).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let resp = test::call_service(&app, submit_request(&session).to_request()).await;
    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);

    for (question, answer) in FULL_ANSWERS {
        let resp = test::call_service(&app, answer_request(&session, question, answer).to_request()).await;
        assert_eq!(resp.status(), StatusCode::OK);
    }

    let resp = test::call_service(&app, submit_request(&session).to_request()).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["total_results"], 2);
    assert_eq!(body["degraded"], false);

    // Matched sessions are closed to further answers and submits
    let resp = test::call_service(&app, submit_request(&session).to_request()).await;
    assert_eq!(resp.status(), StatusCode::CONFLICT);
    let resp = test::call_service(&app, answer_request(&session, 2, 1).to_request()).await;
    assert_eq!(resp.status(), StatusCode::CONFLICT);

    // A like is written to the client's file
    let resp = test::call_service(&app, swipe_request(&session, "1", "like").to_request()).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(liked_ids_on_disk(dir.path(), "tab"), vec!["1"]);

    // A pass is not
    let resp = test::call_service(&app, swipe_request(&session, "2", "pass").to_request()).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["isFinished"], true);
    assert_eq!(body["summary"], "You liked 1 pet!");
    assert_eq!(liked_ids_on_disk(dir.path(), "tab"), vec!["1"]);

    // Unknown and already swiped pets are not in the deck
    let resp = test::call_service(&app, swipe_request(&session, "99", "like").to_request()).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let resp = test::call_service(&app, swipe_request(&session, "1", "like").to_request()).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let req = test::TestRequest::get().uri("/api/v1/likes/tab").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["count"], 1);
    assert_eq!(body["likedPets"][0]["id"], "1");

    let req = test::TestRequest::get().uri("/api/v1/likes/bad.id").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn test_two_sessions_for_one_client_keep_both_likes() {
    let mut server = Server::new_async().await;
    let _mocks = mock_store(
        &mut server,
        serde_json::json!([pet_row(1, true, 3, 3), pet_row(2, true, 4, 1)]),
    )
    .await;
    let dir = tempfile::tempdir().unwrap();
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(app_state(server.url(), dir.path())))
            .configure(routes::configure_routes),
    )
    .await;

    let mut sessions = Vec::new();
    for _ in 0..2 {
        let body: Value = test::call_and_read_body_json(&app, start_request("c").to_request()).await;
        let session = body["sessionId"].as_str().unwrap().to_string();
        for (question, answer) in FULL_ANSWERS {
            test::call_service(&app, answer_request(&session, question, answer).to_request()).await;
        }
        let resp = test::call_service(&app, submit_request(&session).to_request()).await;
        assert_eq!(resp.status(), StatusCode::OK);
        sessions.push(session);
    }

    let resp = test::call_service(&app, swipe_request(&sessions[0], "1", "like").to_request()).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let resp = test::call_service(&app, swipe_request(&sessions[1], "2", "like").to_request()).await;
    assert_eq!(resp.status(), StatusCode::OK);

    assert_eq!(liked_ids_on_disk(dir.path(), "c"), vec!["1", "2"]);

    let req = test::TestRequest::get().uri("/api/v1/likes/c").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["count"], 2);
}

#[actix_web::test]
async fn test_failed_store_query_is_flagged_degraded() {
    let mut server = Server::new_async().await;
    let _pets = server
        .mock("GET", "/rest/v1/Pets")
        .match_query(Matcher::Any)
        .with_status(500)
        .with_body("boom")
        .create_async()
        .await;
    let dir = tempfile::tempdir().unwrap();
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(app_state(server.url(), dir.path())))
            .configure(routes::configure_routes),
    )
    .await;

    let body: Value = test::call_and_read_body_json(&app, start_request("c").to_request()).await;
    let session = body["sessionId"].as_str().unwrap().to_string();
    for (question, answer) in FULL_ANSWERS {
        test::call_service(&app, answer_request(&session, question, answer).to_request()).await;
    }

    let resp = test::call_service(&app, submit_request(&session).to_request()).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["degraded"], true);
    assert_eq!(body["total_results"], 0);

    let req = test::TestRequest::get()
        .uri(&format!("/api/v1/sessions/{}/deck", session))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["summary"], "Try adjusting your preferences to see more pets.");
}

#[actix_web::test]
async fn test_invalid_answers_and_sessions_are_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(app_state("http://127.0.0.1:9".to_string(), dir.path())))
            .configure(routes::configure_routes),
    )
    .await;

    let body: Value = test::call_and_read_body_json(&app, start_request("c").to_request()).await;
    let session = body["sessionId"].as_str().unwrap().to_string();

    let resp = test::call_service(&app, answer_request(&session, 1, 7).to_request()).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let resp = test::call_service(&app, answer_request(&session, 5, 0).to_request()).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let unknown = uuid::Uuid::new_v4().to_string();
    let resp = test::call_service(&app, submit_request(&unknown).to_request()).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let resp = test::call_service(&app, submit_request("not-a-uuid").to_request()).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let resp = test::call_service(&app, start_request("../etc").to_request()).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}
