use axum::Json;
use axum::body::Body;
use axum::extract::{Path, State};
use axum::http::{HeaderValue, StatusCode, header};
use axum::response::{IntoResponse, Response};
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use common::CheeseId;
use tracing::instrument;

use crate::error::{AppError, ErrorBody};
use crate::extractors::json::AppJson;
use crate::models::cheese::*;
use crate::services::catalogue::CheesePicture;
use crate::services::error::CatalogueError;
use crate::state::AppState;
use crate::utils::params::{parse_id, parse_weight};

#[utoipa::path(
    post,
    path = "/",
    tag = "Cheeses",
    operation_id = "createCheese",
    summary = "Create a new cheese",
    description = "Adds a cheese to the catalogue. The id is chosen by the client and must not already exist. \
        `picture` may be base64 image content, a path or a URL; other strings are rejected.",
    request_body = CreateCheeseRequest,
    responses(
        (status = 201, description = "Cheese created", body = CheeseResponse),
        (status = 400, description = "Duplicate id or invalid body", body = ErrorBody),
    ),
)]
#[instrument(skip(state, payload), fields(id = payload.id))]
pub async fn create_cheese(
    State(state): State<AppState>,
    AppJson(payload): AppJson<CreateCheeseRequest>,
) -> Result<impl IntoResponse, AppError> {
    validate_create_cheese(&payload)?;

    let created = state.catalogue.create_cheese(payload.into_cheese()?)?;

    Ok((StatusCode::CREATED, Json(created)))
}

#[utoipa::path(
    get,
    path = "/",
    tag = "Cheeses",
    operation_id = "listCheeses",
    summary = "List all cheeses",
    description = "Returns every cheese in insertion order. `picture` is the public image path, or null.",
    responses(
        (status = 200, description = "All cheeses", body = [CheeseResponse]),
        (status = 500, description = "Unexpected failure", body = ErrorBody),
    ),
)]
#[instrument(skip(state))]
pub async fn list_cheeses(
    State(state): State<AppState>,
) -> Result<Json<Vec<CheeseResponse>>, AppError> {
    Ok(Json(state.catalogue.get_cheeses()?))
}

#[utoipa::path(
    get,
    path = "/{id}",
    tag = "Cheeses",
    operation_id = "getCheese",
    summary = "Get a cheese by ID",
    params(("id" = i64, Path, description = "Cheese ID")),
    responses(
        (status = 200, description = "Cheese details", body = CheeseResponse),
        (status = 404, description = "Cheese not found", body = ErrorBody),
    ),
)]
#[instrument(skip(state))]
pub async fn get_cheese(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<CheeseResponse>, AppError> {
    let id = existing_id(&id)?;
    state
        .catalogue
        .get_cheese(id)?
        .map(Json)
        .ok_or_else(|| CatalogueError::NotFound.into())
}

#[utoipa::path(
    get,
    path = "/{id}/price",
    tag = "Cheeses",
    operation_id = "getCheesePrice",
    summary = "Get the price per kilo of a cheese",
    params(("id" = i64, Path, description = "Cheese ID")),
    responses(
        (status = 200, description = "Cheese price", body = PriceResponse),
        (status = 404, description = "Cheese not found", body = ErrorBody),
    ),
)]
#[instrument(skip(state))]
pub async fn get_cheese_price(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<PriceResponse>, AppError> {
    let cheese_id = existing_id(&id)?;
    let price = state.catalogue.get_cheese_price(cheese_id)?;
    Ok(Json(PriceResponse { cheese_id, price }))
}

#[utoipa::path(
    get,
    path = "/{id}/picture",
    tag = "Cheeses",
    operation_id = "getCheesePicture",
    summary = "Get the picture of a cheese",
    description = "Returns stored image bytes as `image/jpeg`. Cheeses whose picture is a reference \
        answer with a temporary redirect to it.",
    params(("id" = i64, Path, description = "Cheese ID")),
    responses(
        (status = 200, description = "Image bytes (`image/jpeg`)"),
        (status = 307, description = "Picture is stored as a reference"),
        (status = 404, description = "Cheese or picture not found", body = ErrorBody),
    ),
)]
#[instrument(skip(state))]
pub async fn get_cheese_picture(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Response, AppError> {
    let picture = match parse_id(&id) {
        Some(id) => state.catalogue.get_cheese_picture(id)?,
        None => None,
    };

    match picture {
        Some(CheesePicture::Encoded(encoded)) => {
            let bytes = STANDARD
                .decode(encoded)
                .map_err(|e| AppError::Internal(format!("Corrupt picture encoding: {e}")))?;
            Response::builder()
                .header(header::CONTENT_TYPE, "image/jpeg")
                .body(Body::from(bytes))
                .map_err(|e| AppError::Internal(e.to_string()))
        }
        Some(CheesePicture::Reference(reference)) => {
            let location = HeaderValue::try_from(reference)
                .map_err(|e| AppError::Internal(format!("Invalid picture reference: {e}")))?;
            Ok((StatusCode::TEMPORARY_REDIRECT, [(header::LOCATION, location)]).into_response())
        }
        None => Err(AppError::NotFound("Cheese picture not found".into())),
    }
}

#[utoipa::path(
    get,
    path = "/{id}/cost/{weight}",
    tag = "Cheeses",
    operation_id = "getCheeseCost",
    summary = "Calculate the cost of a weight of cheese",
    description = "Multiplies the price per kilo by `weight` (kilograms, may be fractional). \
        The weight is validated before the cheese is looked up.",
    params(
        ("id" = i64, Path, description = "Cheese ID"),
        ("weight" = f64, Path, description = "Weight in kilograms"),
    ),
    responses(
        (status = 200, description = "Total cost", body = CostResponse),
        (status = 400, description = "Invalid weight", body = ErrorBody),
        (status = 404, description = "Cheese not found", body = ErrorBody),
    ),
)]
#[instrument(skip(state))]
pub async fn get_cheese_cost(
    State(state): State<AppState>,
    Path((id, weight)): Path<(String, String)>,
) -> Result<Json<CostResponse>, AppError> {
    let weight = parse_weight(&weight)?;
    let cheese_id = existing_id(&id)?;
    let total_cost = state.catalogue.calculate_cheese_cost(cheese_id, weight)?;
    Ok(Json(CostResponse {
        cheese_id,
        weight,
        total_cost,
    }))
}

#[utoipa::path(
    put,
    path = "/{id}",
    tag = "Cheeses",
    operation_id = "updateCheese",
    summary = "Replace an existing cheese",
    description = "Replaces the whole record. The path id wins over any id in the body, and omitted \
        optional fields are cleared rather than merged.",
    params(("id" = i64, Path, description = "Cheese ID")),
    request_body = UpdateCheeseRequest,
    responses(
        (status = 200, description = "Cheese updated", body = CheeseResponse),
        (status = 400, description = "Invalid body", body = ErrorBody),
        (status = 404, description = "Cheese not found", body = ErrorBody),
    ),
)]
#[instrument(skip(state, payload))]
pub async fn update_cheese(
    State(state): State<AppState>,
    Path(id): Path<String>,
    AppJson(payload): AppJson<UpdateCheeseRequest>,
) -> Result<Json<CheeseResponse>, AppError> {
    let id = existing_id(&id)?;
    validate_update_cheese(&payload)?;

    let updated = state.catalogue.update_cheese(payload.into_cheese(id)?)?;

    Ok(Json(updated))
}

#[utoipa::path(
    delete,
    path = "/{id}",
    tag = "Cheeses",
    operation_id = "deleteCheese",
    summary = "Delete a cheese by ID",
    params(("id" = i64, Path, description = "Cheese ID")),
    responses(
        (status = 204, description = "Cheese deleted"),
        (status = 404, description = "Cheese not found", body = ErrorBody),
    ),
)]
#[instrument(skip(state))]
pub async fn delete_cheese(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    let id = existing_id(&id)?;
    state.catalogue.delete_cheese(id)?;
    Ok(StatusCode::NO_CONTENT)
}

/// An unparseable id can never match a stored cheese.
fn existing_id(raw: &str) -> Result<CheeseId, AppError> {
    parse_id(raw).ok_or_else(|| CatalogueError::NotFound.into())
}
