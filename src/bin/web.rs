//! Single binary web server: REST API over the tournament store.
//! Run with: cargo run --bin web
//! Listens on 0.0.0.0:8080 by default so the app is reachable via DNS on a VPS.
//! Override with env: HOST (e.g. 0.0.0.0), PORT (e.g. 8080). Set DATA_FILE to persist
//! tournaments to a JSON file; otherwise they are kept in memory.

use actix_web::{
    delete, get, post, put,
    web::{Bytes, Data, Json, Path},
    App, HttpResponse, HttpServer, Responder,
};
use bracket_tournament_web::{
    add_participant, add_participants, can_finalize, create_tournament, finalize_round,
    participant_status, remove_participant, rename_participant, reset_tournament, score_match,
    start_tournament, transfer, update_settings, JsonFileStore, MatchId, MemoryStore,
    ParticipantId, StoreError, Tournament, TournamentError, TournamentId, TournamentSettings,
    TournamentStore,
};
use serde::Deserialize;
use std::sync::Arc;

/// Shared store: one record per tournament, keyed by id.
type AppState = Data<dyn TournamentStore>;

#[derive(serde::Serialize)]
struct HealthResponse {
    ok: bool,
    service: &'static str,
}

#[derive(Deserialize)]
struct ParticipantNameBody {
    name: String,
}

#[derive(Deserialize)]
struct ScoreBody {
    score_1: i64,
    score_2: i64,
}

/// Path segment: tournament id (e.g. /api/tournaments/{id})
#[derive(Deserialize)]
struct TournamentPath {
    id: TournamentId,
}

/// Path segments: tournament id and participant id
#[derive(Deserialize)]
struct TournamentParticipantPath {
    id: TournamentId,
    participant_id: ParticipantId,
}

#[derive(Deserialize)]
struct TournamentMatchPath {
    id: TournamentId,
    match_id: MatchId,
}

#[derive(Deserialize)]
struct TournamentRoundPath {
    id: TournamentId,
    round: u32,
}

fn error_json(e: &dyn std::fmt::Display) -> serde_json::Value {
    serde_json::json!({ "error": e.to_string() })
}

/// 404 for unknown ids, 400 for everything else the core rejects.
fn tournament_error(e: &TournamentError) -> HttpResponse {
    if e.is_not_found() {
        HttpResponse::NotFound().json(error_json(e))
    } else {
        HttpResponse::BadRequest().json(error_json(e))
    }
}

fn store_error(e: &StoreError) -> HttpResponse {
    log::error!("Store failure: {}", e);
    HttpResponse::InternalServerError().json(error_json(e))
}

fn not_found(id: TournamentId) -> HttpResponse {
    tournament_error(&TournamentError::TournamentNotFound(id))
}

/// Load a tournament, apply `op` and persist the result (read, mutate, write as one unit).
fn apply<F>(state: &AppState, id: TournamentId, op: F) -> HttpResponse
where
    F: FnOnce(&Tournament) -> Result<Tournament, TournamentError>,
{
    let current = match state.get(id) {
        Ok(Some(t)) => t,
        Ok(None) => return not_found(id),
        Err(e) => return store_error(&e),
    };
    let next = match op(&current) {
        Ok(t) => t,
        Err(e) => return tournament_error(&e),
    };
    if next == current {
        return HttpResponse::Ok().json(&next);
    }
    match state.put(&next) {
        Ok(()) => HttpResponse::Ok().json(&next),
        Err(e) => store_error(&e),
    }
}

#[get("/api/health")]
async fn api_health() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        ok: true,
        service: "bracket-tournament-web",
    })
}

#[get("/api/tournaments")]
async fn api_list_tournaments(state: AppState) -> HttpResponse {
    match state.list() {
        Ok(all) => HttpResponse::Ok().json(all),
        Err(e) => store_error(&e),
    }
}

/// Create a new tournament (returns it with id; client stores id for subsequent requests).
#[post("/api/tournaments")]
async fn api_create_tournament(state: AppState, body: Json<TournamentSettings>) -> HttpResponse {
    let tournament = match create_tournament(&body) {
        Ok(t) => t,
        Err(e) => return tournament_error(&e),
    };
    match state.put(&tournament) {
        Ok(()) => HttpResponse::Created().json(&tournament),
        Err(e) => store_error(&e),
    }
}

#[get("/api/tournaments/{id}")]
async fn api_get_tournament(state: AppState, path: Path<TournamentPath>) -> HttpResponse {
    match state.get(path.id) {
        Ok(Some(t)) => HttpResponse::Ok().json(t),
        Ok(None) => not_found(path.id),
        Err(e) => store_error(&e),
    }
}

/// Update settings (scoring and seeding locked once started).
#[put("/api/tournaments/{id}")]
async fn api_update_tournament(
    state: AppState,
    path: Path<TournamentPath>,
    body: Json<TournamentSettings>,
) -> HttpResponse {
    apply(&state, path.id, |t| update_settings(t, &body))
}

#[delete("/api/tournaments/{id}")]
async fn api_delete_tournament(state: AppState, path: Path<TournamentPath>) -> HttpResponse {
    match state.delete(path.id) {
        Ok(true) => HttpResponse::NoContent().finish(),
        Ok(false) => not_found(path.id),
        Err(e) => store_error(&e),
    }
}

/// Add a participant (tournament must not be started).
#[post("/api/tournaments/{id}/participants")]
async fn api_add_participant(
    state: AppState,
    path: Path<TournamentPath>,
    body: Json<ParticipantNameBody>,
) -> HttpResponse {
    apply(&state, path.id, |t| add_participant(t, &body.name))
}

/// Add participants from a CSV body (one name per row).
#[post("/api/tournaments/{id}/participants/import")]
async fn api_import_participants(state: AppState, path: Path<TournamentPath>, body: Bytes) -> HttpResponse {
    let names = match transfer::parse_roster_csv(&body) {
        Ok(names) => names,
        Err(e) => return HttpResponse::BadRequest().json(error_json(&e)),
    };
    apply(&state, path.id, |t| add_participants(t, names.as_slice()))
}

#[put("/api/tournaments/{id}/participants/{participant_id}")]
async fn api_rename_participant(
    state: AppState,
    path: Path<TournamentParticipantPath>,
    body: Json<ParticipantNameBody>,
) -> HttpResponse {
    apply(&state, path.id, |t| {
        rename_participant(t, path.participant_id, &body.name)
    })
}

/// Remove a participant by id (tournament must not be started).
#[delete("/api/tournaments/{id}/participants/{participant_id}")]
async fn api_remove_participant(state: AppState, path: Path<TournamentParticipantPath>) -> HttpResponse {
    apply(&state, path.id, |t| remove_participant(t, path.participant_id))
}

#[get("/api/tournaments/{id}/participants/{participant_id}/status")]
async fn api_participant_status(state: AppState, path: Path<TournamentParticipantPath>) -> HttpResponse {
    let t = match state.get(path.id) {
        Ok(Some(t)) => t,
        Ok(None) => return not_found(path.id),
        Err(e) => return store_error(&e),
    };
    if t.participant(path.participant_id).is_none() {
        return tournament_error(&TournamentError::ParticipantNotFound(path.participant_id));
    }
    HttpResponse::Ok().json(serde_json::json!({
        "participant_id": path.participant_id,
        "status": participant_status(&t, path.participant_id),
    }))
}

/// Start the tournament: seed round 1.
#[post("/api/tournaments/{id}/start")]
async fn api_start_tournament(state: AppState, path: Path<TournamentPath>) -> HttpResponse {
    apply(&state, path.id, start_tournament)
}

/// Record scores for one match; the winner follows from the scoring mode.
#[put("/api/tournaments/{id}/matches/{match_id}/score")]
async fn api_score_match(
    state: AppState,
    path: Path<TournamentMatchPath>,
    body: Json<ScoreBody>,
) -> HttpResponse {
    apply(&state, path.id, |t| {
        score_match(t, path.match_id, body.score_1, body.score_2)
    })
}

#[get("/api/tournaments/{id}/rounds/{round}")]
async fn api_round_status(state: AppState, path: Path<TournamentRoundPath>) -> HttpResponse {
    match state.get(path.id) {
        Ok(Some(t)) => HttpResponse::Ok().json(serde_json::json!({
            "round": path.round,
            "can_finalize": can_finalize(&t, path.round),
            "finalized": t.is_round_finalized(path.round),
        })),
        Ok(None) => not_found(path.id),
        Err(e) => store_error(&e),
    }
}

/// Finalize a round. A round that is not finalizable leaves the tournament unchanged.
#[post("/api/tournaments/{id}/rounds/{round}/finalize")]
async fn api_finalize_round(state: AppState, path: Path<TournamentRoundPath>) -> HttpResponse {
    apply(&state, path.id, |t| Ok(finalize_round(t, path.round)))
}

/// Reset: back to the unstarted state with the same participants.
#[post("/api/tournaments/{id}/reset")]
async fn api_reset_tournament(state: AppState, path: Path<TournamentPath>) -> HttpResponse {
    apply(&state, path.id, |t| Ok(reset_tournament(t)))
}

#[get("/api/export")]
async fn api_export(state: AppState) -> HttpResponse {
    let all = match state.list() {
        Ok(all) => all,
        Err(e) => return store_error(&e),
    };
    match transfer::export_json(&all) {
        Ok(json) => HttpResponse::Ok()
            .content_type("application/json")
            .body(json),
        Err(e) => HttpResponse::InternalServerError().json(error_json(&e)),
    }
}

/// Import a JSON array of tournaments, replacing records with the same id.
#[post("/api/import")]
async fn api_import(state: AppState, body: String) -> HttpResponse {
    let records = match transfer::parse_import(&body) {
        Ok(records) => records,
        Err(e) => return tournament_error(&e),
    };
    match transfer::merge_into(state.get_ref(), &records) {
        Ok(imported) => HttpResponse::Ok().json(serde_json::json!({ "imported": imported })),
        Err(e) => store_error(&e),
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn configure(cfg: &mut actix_web::web::ServiceConfig) {
    cfg.service(api_health)
        .service(api_list_tournaments)
        .service(api_create_tournament)
        .service(api_get_tournament)
        .service(api_update_tournament)
        .service(api_delete_tournament)
        .service(api_import_participants)
        .service(api_add_participant)
        .service(api_participant_status)
        .service(api_rename_participant)
        .service(api_remove_participant)
        .service(api_start_tournament)
        .service(api_score_match)
        .service(api_round_status)
        .service(api_finalize_round)
        .service(api_reset_tournament)
        .service(api_export)
        .service(api_import);
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let host = std::env::var("HOST").unwrap_or_else(|_| default_host());
    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or_else(default_port);
    let bind = (host.as_str(), port);

    let store: Arc<dyn TournamentStore> = match std::env::var("DATA_FILE") {
        Ok(path) => {
            let store = JsonFileStore::open(path).map_err(|e| {
                log::error!("Cannot open data file: {}", e);
                std::io::Error::new(std::io::ErrorKind::Other, e.to_string())
            })?;
            log::info!("Persisting tournaments to {}", store.path().display());
            Arc::new(store)
        }
        Err(_) => {
            log::info!("DATA_FILE not set; tournaments are kept in memory only");
            Arc::new(MemoryStore::new())
        }
    };
    let state: AppState = Data::from(store);

    log::info!("Starting server at http://{}:{}", bind.0, bind.1);
    HttpServer::new(move || App::new().app_data(state.clone()).configure(configure))
        .bind(bind)?
        .run()
        .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{http::StatusCode, test};

    fn memory_state() -> AppState {
        let store: Arc<dyn TournamentStore> = Arc::new(MemoryStore::new());
        Data::from(store)
    }

    #[actix_web::test]
    async fn create_add_and_start_over_http() {
        let app = test::init_service(App::new().app_data(memory_state()).configure(configure)).await;

        let req = test::TestRequest::post()
            .uri("/api/tournaments")
            .set_json(serde_json::json!({ "name": "Friday Cup", "game": "Darts" }))
            .to_request();
        let created: Tournament = test::call_and_read_body_json(&app, req).await;
        assert!(!created.started);

        for name in ["Ann", "Ben", "Cat"] {
            let req = test::TestRequest::post()
                .uri(&format!("/api/tournaments/{}/participants", created.id))
                .set_json(serde_json::json!({ "name": name }))
                .to_request();
            let resp = test::call_service(&app, req).await;
            assert_eq!(resp.status(), StatusCode::OK);
        }

        let req = test::TestRequest::post()
            .uri(&format!("/api/tournaments/{}/start", created.id))
            .to_request();
        let started: Tournament = test::call_and_read_body_json(&app, req).await;
        assert!(started.started);
        assert_eq!(started.total_rounds, 2);
        assert_eq!(started.matches.len(), 3);

        let req = test::TestRequest::post()
            .uri(&format!("/api/tournaments/{}/participants", created.id))
            .set_json(serde_json::json!({ "name": "Dan" }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[actix_web::test]
    async fn unknown_tournament_is_404() {
        let app = test::init_service(App::new().app_data(memory_state()).configure(configure)).await;
        let req = test::TestRequest::post()
            .uri(&format!("/api/tournaments/{}/reset", uuid::Uuid::new_v4()))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }
}
