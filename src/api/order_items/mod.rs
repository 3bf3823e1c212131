//! Order Items API module

mod handler;

use axum::{Router, routing::get};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new()
        .nest("/api/orders/{order_id}/items", routes())
        .route("/api/items", get(handler::list_all))
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route(
            "/",
            get(handler::list_by_order)
                .post(handler::create)
                .delete(handler::delete_by_order),
        )
        .route(
            "/{item_id}",
            get(handler::get_by_id)
                .put(handler::update)
                .delete(handler::delete),
        )
}
