use axum::extract::{FromRequest, Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{get, post, put};
use axum::{Json, Router};
use shared::{
    CreateCrewDetailPayload, CreateGalleyDetailPayload, FlightRecordPayload,
    UpdateCrewDetailPayload, UpdateGalleyDetailPayload,
};
use tracing::info;

use crate::db::DbConnection;
use crate::domain::{CrewDetailService, FlightRecordService, GalleyDetailService};
use crate::error::ApiError;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    pub flight_records: FlightRecordService,
    pub galley_details: GalleyDetailService,
    pub crew_details: CrewDetailService,
}

impl AppState {
    pub fn new(db: DbConnection) -> Self {
        Self {
            flight_records: FlightRecordService::new(db.clone()),
            galley_details: GalleyDetailService::new(db.clone()),
            crew_details: CrewDetailService::new(db),
        }
    }
}

/// Request-body extractor that funnels deserialization failures
/// through [`ApiError`], so a mistyped field (text where a number
/// belongs, say) comes back as the standard 400 error body rather
/// than axum's plain-text 422.
#[derive(FromRequest)]
#[from_request(via(Json), rejection(ApiError))]
struct JsonBody<T>(T);

/// Assemble the full HTTP surface. Methods not routed here get a 405
/// with an `Allow` header from the method router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route(
            "/flight-records",
            get(list_flight_records).post(create_flight_record),
        )
        .route(
            "/flight-records/:id",
            get(get_flight_record)
                .put(update_flight_record)
                .delete(delete_flight_record),
        )
        .route("/galley-details", post(create_galley_detail))
        .route(
            "/galley-details/:id",
            put(update_galley_detail).delete(delete_galley_detail),
        )
        .route("/crew-details", post(create_crew_detail))
        .route(
            "/crew-details/:id",
            put(update_crew_detail).delete(delete_crew_detail),
        )
        .with_state(state)
}

async fn list_flight_records(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    info!("GET /flight-records");
    let records = state.flight_records.list().await?;
    Ok(Json(records))
}

async fn create_flight_record(
    State(state): State<AppState>,
    JsonBody(payload): JsonBody<FlightRecordPayload>,
) -> Result<impl IntoResponse, ApiError> {
    info!("POST /flight-records");
    let record = state.flight_records.create(payload).await?;
    Ok((StatusCode::CREATED, Json(record)))
}

async fn get_flight_record(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, ApiError> {
    info!("GET /flight-records/{}", id);
    let detail = state.flight_records.get(id).await?;
    Ok(Json(detail))
}

async fn update_flight_record(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    JsonBody(payload): JsonBody<FlightRecordPayload>,
) -> Result<impl IntoResponse, ApiError> {
    info!("PUT /flight-records/{}", id);
    let record = state.flight_records.update(id, payload).await?;
    Ok(Json(record))
}

async fn delete_flight_record(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, ApiError> {
    info!("DELETE /flight-records/{}", id);
    let response = state.flight_records.delete(id).await?;
    Ok(Json(response))
}

async fn create_galley_detail(
    State(state): State<AppState>,
    JsonBody(payload): JsonBody<CreateGalleyDetailPayload>,
) -> Result<impl IntoResponse, ApiError> {
    info!("POST /galley-details");
    let detail = state.galley_details.create(payload).await?;
    Ok((StatusCode::CREATED, Json(detail)))
}

async fn update_galley_detail(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    JsonBody(payload): JsonBody<UpdateGalleyDetailPayload>,
) -> Result<impl IntoResponse, ApiError> {
    info!("PUT /galley-details/{}", id);
    let detail = state.galley_details.update(id, payload).await?;
    Ok(Json(detail))
}

async fn delete_galley_detail(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, ApiError> {
    info!("DELETE /galley-details/{}", id);
    let response = state.galley_details.delete(id).await?;
    Ok(Json(response))
}

async fn create_crew_detail(
    State(state): State<AppState>,
    JsonBody(payload): JsonBody<CreateCrewDetailPayload>,
) -> Result<impl IntoResponse, ApiError> {
    info!("POST /crew-details");
    let detail = state.crew_details.create(payload).await?;
    Ok((StatusCode::CREATED, Json(detail)))
}

async fn update_crew_detail(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    JsonBody(payload): JsonBody<UpdateCrewDetailPayload>,
) -> Result<impl IntoResponse, ApiError> {
    info!("PUT /crew-details/{}", id);
    let detail = state.crew_details.update(id, payload).await?;
    Ok(Json(detail))
}

async fn delete_crew_detail(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, ApiError> {
    info!("DELETE /crew-details/{}", id);
    let response = state.crew_details.delete(id).await?;
    Ok(Json(response))
}
