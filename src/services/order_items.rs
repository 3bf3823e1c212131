//! Order Item Service

use std::sync::Arc;

use uuid::Uuid;

use crate::core::ServerState;
use crate::db::models::{OrderItem, OrderItemAddRequest, OrderItemResponse, OrderItemUpdateRequest};
use crate::db::{DbService, UnitOfWork, repository};
use crate::events::{EventBus, OrderEvent};
use crate::money;
use crate::utils::validation::{MAX_PRODUCT_NAME_LEN, validate_required_text};
use crate::utils::{AppError, AppResult};

pub struct OrderItemService {
    db: DbService,
    events: Arc<EventBus>,
}

impl OrderItemService {
    pub fn new(state: &ServerState) -> Self {
        Self {
            db: state.db.clone(),
            events: state.events.clone(),
        }
    }

    /// Add an item to an existing order and bump the order total inline
    pub async fn add_item(
        &self,
        order_id: Uuid,
        request: OrderItemAddRequest,
    ) -> AppResult<OrderItemResponse> {
        validate_required_text(&request.product_name, "product_name", MAX_PRODUCT_NAME_LEN)?;
        money::validate_item_amounts(request.quantity, request.unit_price, request.total_price)?;

        let mut uow = UnitOfWork::begin(&self.db).await?;
        let order = repository::order::find_by_id(uow.conn(), order_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Order {order_id} not found")))?;

        let item = OrderItem {
            order_item_id: Uuid::new_v4(),
            order_id,
            product_name: request.product_name,
            quantity: request.quantity,
            unit_price: request.unit_price,
            total_price: request.total_price,
        };
        let rows = repository::order_item::insert(uow.conn(), &item).await?;
        uow.record(rows);

        let new_total =
            money::to_f64(money::to_decimal(order.total_amount) + money::to_decimal(item.total_price));
        let rows = repository::order::update_total_amount(uow.conn(), order_id, new_total).await?;
        uow.record(rows);

        uow.commit().await?;
        tracing::info!(order_id = %order_id, order_item_id = %item.order_item_id, "order-item added");

        Ok(OrderItemResponse::from(item))
    }

    pub async fn get_item(&self, order_item_id: Uuid) -> AppResult<OrderItemResponse> {
        let mut conn = self.db.acquire().await?;
        let item = repository::order_item::find_by_id(&mut conn, order_item_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Order-item {order_item_id} not found")))?;
        Ok(OrderItemResponse::from(item))
    }

    pub async fn get_items_by_order(&self, order_id: Uuid) -> AppResult<Vec<OrderItemResponse>> {
        let mut conn = self.db.acquire().await?;
        let items = repository::order_item::find_by_order_id(&mut conn, order_id).await?;
        Ok(items.into_iter().map(OrderItemResponse::from).collect())
    }

    pub async fn get_all_items(&self) -> AppResult<Vec<OrderItemResponse>> {
        let mut conn = self.db.acquire().await?;
        let items = repository::order_item::find_all(&mut conn).await?;
        Ok(items.into_iter().map(OrderItemResponse::from).collect())
    }

    /// Update an item's mutable fields; the price delta cascades to the
    /// parent order total through the relay.
    ///
    /// A missing parent order (or missing item) here is surfaced as a
    /// generic failure rather than not-found; callers reach this path only
    /// after the HTTP layer has already matched the ids.
    pub async fn update_item(
        &self,
        request: OrderItemUpdateRequest,
    ) -> AppResult<OrderItemResponse> {
        validate_required_text(&request.product_name, "product_name", MAX_PRODUCT_NAME_LEN)?;
        money::validate_item_amounts(request.quantity, request.unit_price, request.total_price)?;

        let mut uow = UnitOfWork::begin(&self.db).await?;
        repository::order::find_by_id(uow.conn(), request.order_id)
            .await?
            .ok_or_else(|| {
                AppError::internal(format!("Matching order {} not found", request.order_id))
            })?;

        let old_total = repository::order_item::update(uow.conn(), &request)
            .await?
            .ok_or_else(|| {
                AppError::internal(format!("Order-item {} not found", request.order_item_id))
            })?;
        uow.record(1);

        let delta = money::to_decimal(request.total_price) - money::to_decimal(old_total);
        let rows = self
            .events
            .publish(
                uow.conn(),
                &OrderEvent::ItemChanged {
                    order_id: request.order_id,
                    delta_amount: delta,
                },
            )
            .await?;
        uow.record(rows);

        uow.commit().await?;
        tracing::info!(order_item_id = %request.order_item_id, delta = %delta, "order-item updated");

        Ok(OrderItemResponse {
            order_item_id: request.order_item_id,
            order_id: request.order_id,
            product_name: request.product_name,
            quantity: request.quantity,
            unit_price: request.unit_price,
            total_price: request.total_price,
        })
    }

    /// Delete one item and subtract its line total from the parent order.
    ///
    /// If the parent order is already gone the total adjustment is silently
    /// skipped; the item delete still proceeds.
    pub async fn delete_item(&self, order_item_id: Uuid) -> AppResult<bool> {
        let mut uow = UnitOfWork::begin(&self.db).await?;
        let item = repository::order_item::find_by_id(uow.conn(), order_item_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Order-item {order_item_id} not found")))?;

        if let Some(order) = repository::order::find_by_id(uow.conn(), item.order_id).await? {
            let new_total = money::to_f64(
                money::to_decimal(order.total_amount) - money::to_decimal(item.total_price),
            );
            let rows =
                repository::order::update_total_amount(uow.conn(), order.order_id, new_total)
                    .await?;
            uow.record(rows);
        }

        let rows = repository::order_item::delete(uow.conn(), order_item_id).await?;
        uow.record(rows);

        let affected = uow.commit().await?;
        tracing::info!(order_item_id = %order_item_id, affected, "order-item deleted");
        Ok(affected > 0)
    }

    /// Bulk delete of an order's items with one aggregate negative delta
    pub async fn delete_items_by_order(&self, order_id: Uuid) -> AppResult<bool> {
        let mut uow = UnitOfWork::begin(&self.db).await?;
        let (rows, removed_total) =
            repository::order_item::delete_by_order_id(uow.conn(), order_id).await?;
        uow.record(rows);

        if let Some(order) = repository::order::find_by_id(uow.conn(), order_id).await? {
            let new_total = money::to_f64(
                money::to_decimal(order.total_amount) - money::to_decimal(removed_total),
            );
            let updated =
                repository::order::update_total_amount(uow.conn(), order_id, new_total).await?;
            uow.record(updated);
        }

        let affected = uow.commit().await?;
        tracing::info!(order_id = %order_id, affected, "order-items deleted in bulk");
        Ok(affected > 0)
    }
}
