//! Order endpoints.

use std::sync::Arc;

use application::{
    CancelOrder, CreateOrder, CreateOrderInput, GetOrder, ListOrders, ListOrdersOutput,
    OrderOutput, UpdateOrder, UpdateOrderInput,
};
use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use common::OrderId;
use notifier::OrderPublisher;
use order_store::OrderRepository;

use crate::error::ApiError;

/// Shared application state accessible from all handlers.
pub struct AppState<R, P> {
    pub repository: R,
    pub create_order: CreateOrder<R, P>,
    pub update_order: UpdateOrder<R>,
    pub cancel_order: CancelOrder<R>,
    pub get_order: GetOrder<R>,
    pub list_orders: ListOrders<R>,
}

impl<R, P> AppState<R, P>
where
    R: OrderRepository + Clone,
    P: OrderPublisher,
{
    pub fn new(repository: R, publisher: P) -> Self {
        Self {
            create_order: CreateOrder::new(repository.clone(), publisher),
            update_order: UpdateOrder::new(repository.clone()),
            cancel_order: CancelOrder::new(repository.clone()),
            get_order: GetOrder::new(repository.clone()),
            list_orders: ListOrders::new(repository.clone()),
            repository,
        }
    }
}

fn body<T>(payload: Result<Json<T>, JsonRejection>) -> Result<T, ApiError> {
    payload
        .map(|Json(value)| value)
        .map_err(|rejection| ApiError::BadRequest(format!("invalid input: {}", rejection.body_text())))
}

/// POST /orders: create a pending order and announce it.
#[tracing::instrument(skip(state, payload))]
pub async fn create<R, P>(
    State(state): State<Arc<AppState<R, P>>>,
    payload: Result<Json<CreateOrderInput>, JsonRejection>,
) -> Result<(StatusCode, Json<OrderOutput>), ApiError>
where
    R: OrderRepository + 'static,
    P: OrderPublisher + 'static,
{
    let input = body(payload)?;
    let output = state.create_order.execute(input).await?;
    Ok((StatusCode::CREATED, Json(output)))
}

/// GET /orders/{id}: fetch one order.
#[tracing::instrument(skip(state))]
pub async fn get<R, P>(
    State(state): State<Arc<AppState<R, P>>>,
    Path(id): Path<String>,
) -> Result<Json<OrderOutput>, ApiError>
where
    R: OrderRepository + 'static,
    P: OrderPublisher + 'static,
{
    let output = state.get_order.execute(&OrderId::from(id)).await?;
    Ok(Json(output))
}

/// GET /orders: list every order.
#[tracing::instrument(skip(state))]
pub async fn list<R, P>(
    State(state): State<Arc<AppState<R, P>>>,
) -> Result<Json<ListOrdersOutput>, ApiError>
where
    R: OrderRepository + 'static,
    P: OrderPublisher + 'static,
{
    let output = state.list_orders.execute().await?;
    Ok(Json(output))
}

/// PUT /orders/{id}: replace the customer name and items of a pending order.
#[tracing::instrument(skip(state, payload))]
pub async fn update<R, P>(
    State(state): State<Arc<AppState<R, P>>>,
    Path(id): Path<String>,
    payload: Result<Json<UpdateOrderInput>, JsonRejection>,
) -> Result<Json<OrderOutput>, ApiError>
where
    R: OrderRepository + 'static,
    P: OrderPublisher + 'static,
{
    let input = body(payload)?;
    let output = state
        .update_order
        .execute(&OrderId::from(id), input)
        .await?;
    Ok(Json(output))
}

/// DELETE /orders/{id}: cancel a pending order.
#[tracing::instrument(skip(state))]
pub async fn cancel<R, P>(
    State(state): State<Arc<AppState<R, P>>>,
    Path(id): Path<String>,
) -> Result<Json<OrderOutput>, ApiError>
where
    R: OrderRepository + 'static,
    P: OrderPublisher + 'static,
{
    let output = state.cancel_order.execute(&OrderId::from(id)).await?;
    Ok(Json(output))
}
