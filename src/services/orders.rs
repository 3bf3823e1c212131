//! Order Service

use std::sync::Arc;

use chrono::{Datelike, Local};
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::core::ServerState;
use crate::db::models::{
    Order, OrderAddRequest, OrderItem, OrderItemResponse, OrderResponse, OrderUpdateRequest,
};
use crate::db::{DbService, UnitOfWork, repository};
use crate::events::{EventBus, OrderEvent};
use crate::money;
use crate::utils::validation::{MAX_CUSTOMER_NAME_LEN, validate_required_text};
use crate::utils::{AppError, AppResult};

pub struct OrderService {
    db: DbService,
    events: Arc<EventBus>,
}

impl OrderService {
    pub fn new(state: &ServerState) -> Self {
        Self {
            db: state.db.clone(),
            events: state.events.clone(),
        }
    }

    /// Create an order with its initial items.
    ///
    /// Allocates the per-year sequence number, mints all identities, and
    /// sets the total to the Decimal-accumulated sum of the submitted line
    /// totals, all in one unit of work.
    pub async fn add_order(&self, request: OrderAddRequest) -> AppResult<OrderResponse> {
        validate_required_text(&request.customer_name, "customer_name", MAX_CUSTOMER_NAME_LEN)?;
        for item in &request.order_items {
            validate_required_text(
                &item.product_name,
                "product_name",
                crate::utils::validation::MAX_PRODUCT_NAME_LEN,
            )?;
            money::validate_item_amounts(item.quantity, item.unit_price, item.total_price)?;
        }

        let mut uow = UnitOfWork::begin(&self.db).await?;

        let today = Local::now().date_naive();
        let year = today.year();
        let sequence = repository::sequence::next_value(uow.conn(), year).await?;

        let order_id = Uuid::new_v4();
        let order_number = format!("Order_{year}_{sequence:05}");

        let mut total = Decimal::ZERO;
        for item in &request.order_items {
            total += money::to_decimal(item.total_price);
        }

        let order = Order {
            order_id,
            order_number,
            customer_name: request.customer_name,
            order_date: today,
            total_amount: money::to_f64(total),
        };
        let rows = repository::order::insert(uow.conn(), &order).await?;
        uow.record(rows);

        let mut item_responses = Vec::with_capacity(request.order_items.len());
        for item_request in request.order_items {
            let item = OrderItem {
                order_item_id: Uuid::new_v4(),
                order_id,
                product_name: item_request.product_name,
                quantity: item_request.quantity,
                unit_price: item_request.unit_price,
                total_price: item_request.total_price,
            };
            let rows = repository::order_item::insert(uow.conn(), &item).await?;
            uow.record(rows);
            item_responses.push(OrderItemResponse::from(item));
        }

        uow.commit().await?;
        tracing::info!(order_id = %order.order_id, order_number = %order.order_number, "order created");

        Ok(OrderResponse::from_order(order, item_responses))
    }

    /// Fetch one order with its items
    pub async fn get_order(&self, order_id: Uuid) -> AppResult<OrderResponse> {
        let mut conn = self.db.acquire().await?;
        let order = repository::order::find_by_id(&mut conn, order_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Order {order_id} not found")))?;
        let items = repository::order_item::find_by_order_id(&mut conn, order_id).await?;
        Ok(OrderResponse::from_order(
            order,
            items.into_iter().map(OrderItemResponse::from).collect(),
        ))
    }

    /// Fetch all orders, each with its items
    pub async fn get_all_orders(&self) -> AppResult<Vec<OrderResponse>> {
        let mut conn = self.db.acquire().await?;
        let orders = repository::order::find_all(&mut conn).await?;
        let mut responses = Vec::with_capacity(orders.len());
        for order in orders {
            let items = repository::order_item::find_by_order_id(&mut conn, order.order_id).await?;
            responses.push(OrderResponse::from_order(
                order,
                items.into_iter().map(OrderItemResponse::from).collect(),
            ));
        }
        Ok(responses)
    }

    /// Case-sensitive substring search on one stringified field.
    ///
    /// An unrecognized field name falls back to returning all orders
    /// unfiltered. Like the plain list endpoint's historical behavior,
    /// filtered responses do not attach items.
    pub async fn filter_orders(
        &self,
        search_by: &str,
        search_text: &str,
    ) -> AppResult<Vec<OrderResponse>> {
        let mut conn = self.db.acquire().await?;
        let orders = repository::order::find_all(&mut conn).await?;

        let filtered = orders
            .into_iter()
            .filter(|order| match search_by {
                "order_id" => order.order_id.to_string().contains(search_text),
                "order_date" => order
                    .order_date
                    .format("%d %m %Y")
                    .to_string()
                    .contains(search_text),
                "order_number" => order.order_number.contains(search_text),
                "customer_name" => order.customer_name.contains(search_text),
                "total_amount" => format!("{:.2}", order.total_amount).contains(search_text),
                _ => true,
            })
            .map(OrderResponse::from)
            .collect();

        Ok(filtered)
    }

    /// Direct overwrite of customer name and total amount.
    ///
    /// The total override bypasses the item-sum derivation; callers that
    /// want the derived behavior mutate items instead.
    pub async fn update_order(&self, request: OrderUpdateRequest) -> AppResult<OrderResponse> {
        validate_required_text(&request.customer_name, "customer_name", MAX_CUSTOMER_NAME_LEN)?;
        money::validate_total_amount(request.total_amount)?;

        let mut uow = UnitOfWork::begin(&self.db).await?;
        let mut order = repository::order::find_by_id(uow.conn(), request.order_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Order {} not found", request.order_id)))?;

        order.customer_name = request.customer_name;
        order.total_amount = request.total_amount;

        let rows = repository::order::update(uow.conn(), &order).await?;
        uow.record(rows);
        uow.commit().await?;
        tracing::info!(order_id = %order.order_id, "order updated");

        Ok(OrderResponse::from(order))
    }

    /// Delete an order and, through the relay, all of its items
    pub async fn delete_order(&self, order_id: Uuid) -> AppResult<bool> {
        let mut uow = UnitOfWork::begin(&self.db).await?;
        repository::order::find_by_id(uow.conn(), order_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Order {order_id} not found")))?;

        // Items must go before the order row (foreign key); the cleanup
        // subscriber stages those deletes on this same transaction.
        let rows = self
            .events
            .publish(uow.conn(), &OrderEvent::OrderRemoved { order_id })
            .await?;
        uow.record(rows);

        let rows = repository::order::delete(uow.conn(), order_id).await?;
        uow.record(rows);

        let affected = uow.commit().await?;
        tracing::info!(order_id = %order_id, affected, "order deleted");
        Ok(affected > 0)
    }
}
