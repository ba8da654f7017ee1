use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use serde_json::json;

use crate::{
    application::usecases::customers::CustomerUseCase,
    domain::{
        repositories::customers::CustomerRepository,
        value_objects::customers::{CreateCustomerModel, CustomerFilter, UpdateCustomerModel},
    },
    infrastructure::postgres::{
        postgres_connection::PgPoolSquad, repositories::customers::CustomerPostgres,
    },
};

pub fn routes(db_pool: Arc<PgPoolSquad>) -> Router {
    let customer_repository = CustomerPostgres::new(Arc::clone(&db_pool));
    let customer_usecase = CustomerUseCase::new(Arc::new(customer_repository));

    Router::new()
        .route(
            "/",
            post(create_customer::<CustomerPostgres>).get(list_customers::<CustomerPostgres>),
        )
        .route(
            "/:customer_id",
            get(get_customer_by_id::<CustomerPostgres>)
                .put(update_customer::<CustomerPostgres>)
                .delete(delete_customer::<CustomerPostgres>),
        )
        .with_state(Arc::new(customer_usecase))
}

pub async fn create_customer<T>(
    State(customer_usecase): State<Arc<CustomerUseCase<T>>>,
    Json(create_customer_model): Json<CreateCustomerModel>,
) -> impl IntoResponse
where
    T: CustomerRepository + Send + Sync,
{
    match customer_usecase.create(create_customer_model).await {
        Ok(customer) => (StatusCode::CREATED, Json(customer)).into_response(),
        Err(err) => err.into_response(),
    }
}

pub async fn list_customers<T>(
    State(customer_usecase): State<Arc<CustomerUseCase<T>>>,
    Query(filter): Query<CustomerFilter>,
) -> impl IntoResponse
where
    T: CustomerRepository + Send + Sync,
{
    match customer_usecase.list(filter).await {
        Ok(customers) => (StatusCode::OK, Json(customers)).into_response(),
        Err(err) => err.into_response(),
    }
}

pub async fn get_customer_by_id<T>(
    State(customer_usecase): State<Arc<CustomerUseCase<T>>>,
    Path(customer_id): Path<i32>,
) -> impl IntoResponse
where
    T: CustomerRepository + Send + Sync,
{
    match customer_usecase.get_by_id(customer_id).await {
        Ok(customer) => (StatusCode::OK, Json(customer)).into_response(),
        Err(err) => err.into_response(),
    }
}

pub async fn update_customer<T>(
    State(customer_usecase): State<Arc<CustomerUseCase<T>>>,
    Path(customer_id): Path<i32>,
    Json(update_customer_model): Json<UpdateCustomerModel>,
) -> impl IntoResponse
where
    T: CustomerRepository + Send + Sync,
{
    match customer_usecase
        .update(customer_id, update_customer_model)
        .await
    {
        Ok(customer) => (StatusCode::OK, Json(customer)).into_response(),
        Err(err) => err.into_response(),
    }
}

pub async fn delete_customer<T>(
    State(customer_usecase): State<Arc<CustomerUseCase<T>>>,
    Path(customer_id): Path<i32>,
) -> impl IntoResponse
where
    T: CustomerRepository + Send + Sync,
{
    match customer_usecase.delete(customer_id).await {
        Ok(()) => (StatusCode::OK, Json(json!({ "success": true }))).into_response(),
        Err(err) => err.into_response(),
    }
}
