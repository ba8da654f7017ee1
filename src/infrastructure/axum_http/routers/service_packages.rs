use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use serde_json::json;

use crate::{
    application::usecases::service_packages::ServicePackageUseCase,
    domain::{
        repositories::service_packages::ServicePackageRepository,
        value_objects::service_packages::{CreateServicePackageModel, UpdateServicePackageModel},
    },
    infrastructure::postgres::{
        postgres_connection::PgPoolSquad, repositories::service_packages::ServicePackagePostgres,
    },
};

pub fn routes(db_pool: Arc<PgPoolSquad>) -> Router {
    let package_repository = ServicePackagePostgres::new(Arc::clone(&db_pool));
    let package_usecase = ServicePackageUseCase::new(Arc::new(package_repository));

    Router::new()
        .route(
            "/",
            post(create_service_package::<ServicePackagePostgres>)
                .get(list_service_packages::<ServicePackagePostgres>),
        )
        .route(
            "/:package_id",
            get(get_service_package_by_id::<ServicePackagePostgres>)
                .put(update_service_package::<ServicePackagePostgres>)
                .delete(delete_service_package::<ServicePackagePostgres>),
        )
        .with_state(Arc::new(package_usecase))
}

pub async fn create_service_package<T>(
    State(package_usecase): State<Arc<ServicePackageUseCase<T>>>,
    Json(create_service_package_model): Json<CreateServicePackageModel>,
) -> impl IntoResponse
where
    T: ServicePackageRepository + Send + Sync,
{
    match package_usecase.create(create_service_package_model).await {
        Ok(package) => (StatusCode::CREATED, Json(package)).into_response(),
        Err(err) => err.into_response(),
    }
}

pub async fn list_service_packages<T>(
    State(package_usecase): State<Arc<ServicePackageUseCase<T>>>,
) -> impl IntoResponse
where
    T: ServicePackageRepository + Send + Sync,
{
    match package_usecase.list().await {
        Ok(packages) => (StatusCode::OK, Json(packages)).into_response(),
        Err(err) => err.into_response(),
    }
}

pub async fn get_service_package_by_id<T>(
    State(package_usecase): State<Arc<ServicePackageUseCase<T>>>,
    Path(package_id): Path<i32>,
) -> impl IntoResponse
where
    T: ServicePackageRepository + Send + Sync,
{
    match package_usecase.get_by_id(package_id).await {
        Ok(package) => (StatusCode::OK, Json(package)).into_response(),
        Err(err) => err.into_response(),
    }
}

pub async fn update_service_package<T>(
    State(package_usecase): State<Arc<ServicePackageUseCase<T>>>,
    Path(package_id): Path<i32>,
    Json(update_service_package_model): Json<UpdateServicePackageModel>,
) -> impl IntoResponse
where
    T: ServicePackageRepository + Send + Sync,
{
    match package_usecase
        .update(package_id, update_service_package_model)
        .await
    {
        Ok(package) => (StatusCode::OK, Json(package)).into_response(),
        Err(err) => err.into_response(),
    }
}

pub async fn delete_service_package<T>(
    State(package_usecase): State<Arc<ServicePackageUseCase<T>>>,
    Path(package_id): Path<i32>,
) -> impl IntoResponse
where
    T: ServicePackageRepository + Send + Sync,
{
    match package_usecase.delete(package_id).await {
        Ok(()) => (StatusCode::OK, Json(json!({ "success": true }))).into_response(),
        Err(err) => err.into_response(),
    }
}
