//! Order Item API Handlers

use axum::{
    Json,
    extract::{Path, State},
    http::{StatusCode, header},
    response::IntoResponse,
};
use uuid::Uuid;

use crate::core::ServerState;
use crate::db::models::{OrderItemAddRequest, OrderItemResponse, OrderItemUpdateRequest};
use crate::services::OrderItemService;
use crate::utils::{AppError, AppResult};

/// GET /api/items - every item across all orders
pub async fn list_all(
    State(state): State<ServerState>,
) -> AppResult<Json<Vec<OrderItemResponse>>> {
    let items = OrderItemService::new(&state).get_all_items().await?;
    Ok(Json(items))
}

/// GET /api/orders/:order_id/items
pub async fn list_by_order(
    State(state): State<ServerState>,
    Path(order_id): Path<Uuid>,
) -> AppResult<Json<Vec<OrderItemResponse>>> {
    let items = OrderItemService::new(&state)
        .get_items_by_order(order_id)
        .await?;
    Ok(Json(items))
}

/// GET /api/orders/:order_id/items/:item_id
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path((order_id, item_id)): Path<(Uuid, Uuid)>,
) -> AppResult<Json<OrderItemResponse>> {
    let item = OrderItemService::new(&state).get_item(item_id).await?;
    if item.order_id != order_id {
        return Err(AppError::not_found("Order-item not found in order"));
    }
    Ok(Json(item))
}

/// POST /api/orders/:order_id/items
pub async fn create(
    State(state): State<ServerState>,
    Path(order_id): Path<Uuid>,
    Json(payload): Json<OrderItemAddRequest>,
) -> AppResult<impl IntoResponse> {
    if payload.order_id != Some(order_id) {
        return Err(AppError::invalid("Mismatch order id"));
    }
    let response = OrderItemService::new(&state)
        .add_item(order_id, payload)
        .await?;
    let location = format!(
        "/api/orders/{}/items/{}",
        response.order_id, response.order_item_id
    );
    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(response),
    ))
}

/// PUT /api/orders/:order_id/items/:item_id
pub async fn update(
    State(state): State<ServerState>,
    Path((order_id, item_id)): Path<(Uuid, Uuid)>,
    Json(payload): Json<OrderItemUpdateRequest>,
) -> AppResult<Json<OrderItemResponse>> {
    if payload.order_item_id != item_id {
        return Err(AppError::invalid("Mismatch item id"));
    }
    if payload.order_id != order_id {
        return Err(AppError::invalid("Mismatch order id"));
    }
    let response = OrderItemService::new(&state).update_item(payload).await?;
    Ok(Json(response))
}

/// DELETE /api/orders/:order_id/items/:item_id
pub async fn delete(
    State(state): State<ServerState>,
    Path((order_id, item_id)): Path<(Uuid, Uuid)>,
) -> AppResult<StatusCode> {
    let service = OrderItemService::new(&state);
    let item = service.get_item(item_id).await?;
    if item.order_id != order_id {
        return Err(AppError::invalid("Mismatch order id"));
    }
    let deleted = service.delete_item(item_id).await?;
    if deleted {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::internal("Order-item delete affected no rows"))
    }
}

/// DELETE /api/orders/:order_id/items - bulk cascade
pub async fn delete_by_order(
    State(state): State<ServerState>,
    Path(order_id): Path<Uuid>,
) -> AppResult<StatusCode> {
    OrderItemService::new(&state)
        .delete_items_by_order(order_id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
