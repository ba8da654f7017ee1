use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use serde::Deserialize;

use crate::{
    application::usecases::subscriptions::SubscriptionUseCase,
    domain::{
        repositories::{
            customers::CustomerRepository, service_packages::ServicePackageRepository,
            subscriptions::SubscriptionRepository,
        },
        value_objects::subscriptions::CreateSubscriptionModel,
    },
    infrastructure::postgres::{
        postgres_connection::PgPoolSquad,
        repositories::{
            customers::CustomerPostgres, service_packages::ServicePackagePostgres,
            subscriptions::SubscriptionPostgres,
        },
    },
};

#[derive(Debug, Deserialize)]
pub struct SubscriptionListQuery {
    pub customer_id: Option<i32>,
}

pub fn routes(db_pool: Arc<PgPoolSquad>) -> Router {
    let subscription_repository = SubscriptionPostgres::new(Arc::clone(&db_pool));
    let customer_repository = CustomerPostgres::new(Arc::clone(&db_pool));
    let package_repository = ServicePackagePostgres::new(Arc::clone(&db_pool));
    let subscription_usecase = SubscriptionUseCase::new(
        Arc::new(subscription_repository),
        Arc::new(customer_repository),
        Arc::new(package_repository),
    );

    Router::new()
        .route(
            "/",
            post(
                create_subscription::<SubscriptionPostgres, CustomerPostgres, ServicePackagePostgres>,
            )
            .get(list_subscriptions::<SubscriptionPostgres, CustomerPostgres, ServicePackagePostgres>),
        )
        .route(
            "/active/:customer_id",
            get(get_active_subscription::<
                SubscriptionPostgres,
                CustomerPostgres,
                ServicePackagePostgres,
            >),
        )
        .with_state(Arc::new(subscription_usecase))
}

pub async fn create_subscription<S, C, P>(
    State(subscription_usecase): State<Arc<SubscriptionUseCase<S, C, P>>>,
    Json(create_subscription_model): Json<CreateSubscriptionModel>,
) -> impl IntoResponse
where
    S: SubscriptionRepository + Send + Sync,
    C: CustomerRepository + Send + Sync,
    P: ServicePackageRepository + Send + Sync,
{
    match subscription_usecase.create(create_subscription_model).await {
        Ok(subscription) => (StatusCode::CREATED, Json(subscription)).into_response(),
        Err(err) => err.into_response(),
    }
}

pub async fn list_subscriptions<S, C, P>(
    State(subscription_usecase): State<Arc<SubscriptionUseCase<S, C, P>>>,
    Query(query): Query<SubscriptionListQuery>,
) -> impl IntoResponse
where
    S: SubscriptionRepository + Send + Sync,
    C: CustomerRepository + Send + Sync,
    P: ServicePackageRepository + Send + Sync,
{
    match subscription_usecase.list(query.customer_id).await {
        Ok(subscriptions) => (StatusCode::OK, Json(subscriptions)).into_response(),
        Err(err) => err.into_response(),
    }
}

pub async fn get_active_subscription<S, C, P>(
    State(subscription_usecase): State<Arc<SubscriptionUseCase<S, C, P>>>,
    Path(customer_id): Path<i32>,
) -> impl IntoResponse
where
    S: SubscriptionRepository + Send + Sync,
    C: CustomerRepository + Send + Sync,
    P: ServicePackageRepository + Send + Sync,
{
    match subscription_usecase.active_for_customer(customer_id).await {
        Ok(subscription) => (StatusCode::OK, Json(subscription)).into_response(),
        Err(err) => err.into_response(),
    }
}
