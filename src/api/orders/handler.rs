//! Order API Handlers

use axum::{
    Json,
    extract::{Path, Query, State},
    http::{StatusCode, header},
    response::IntoResponse,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::core::ServerState;
use crate::db::models::{OrderAddRequest, OrderResponse, OrderUpdateRequest};
use crate::services::OrderService;
use crate::utils::{AppError, AppResult};

/// GET /api/orders - all orders with their items
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<OrderResponse>>> {
    let orders = OrderService::new(&state).get_all_orders().await?;
    Ok(Json(orders))
}

/// GET /api/orders/:id
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<OrderResponse>> {
    let order = OrderService::new(&state).get_order(id).await?;
    Ok(Json(order))
}

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    pub search_by: String,
    #[serde(default)]
    pub search_text: String,
}

/// GET /api/orders/search?search_by=customer_name&search_text=...
pub async fn search(
    State(state): State<ServerState>,
    Query(query): Query<SearchQuery>,
) -> AppResult<Json<Vec<OrderResponse>>> {
    let orders = OrderService::new(&state)
        .filter_orders(&query.search_by, &query.search_text)
        .await?;
    Ok(Json(orders))
}

/// POST /api/orders - create an order with its items
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<OrderAddRequest>,
) -> AppResult<impl IntoResponse> {
    let response = OrderService::new(&state).add_order(payload).await?;
    let location = format!("/api/orders/{}", response.order_id);
    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(response),
    ))
}

/// PUT /api/orders/:id - direct overwrite of customer name and total
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<OrderUpdateRequest>,
) -> AppResult<Json<OrderResponse>> {
    if id != payload.order_id {
        return Err(AppError::invalid("Mismatch order id"));
    }
    let response = OrderService::new(&state).update_order(payload).await?;
    Ok(Json(response))
}

/// DELETE /api/orders/:id - cascades to the order's items
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
) -> AppResult<StatusCode> {
    let deleted = OrderService::new(&state).delete_order(id).await?;
    if deleted {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::not_found(format!("Order {id} not found")))
    }
}
