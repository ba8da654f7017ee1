use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};

use crate::{
    application::usecases::dashboards::DashboardUseCase,
    domain::repositories::dashboards::DashboardRepository,
    infrastructure::postgres::{
        postgres_connection::PgPoolSquad, repositories::dashboards::DashboardPostgres,
    },
};

pub fn routes(db_pool: Arc<PgPoolSquad>) -> Router {
    let dashboard_repository = DashboardPostgres::new(Arc::clone(&db_pool));
    let dashboard_usecase = DashboardUseCase::new(Arc::new(dashboard_repository));

    Router::new()
        .route("/admin/stats", get(get_admin_stats::<DashboardPostgres>))
        .route(
            "/client/:customer_id",
            get(get_client_dashboard::<DashboardPostgres>),
        )
        .with_state(Arc::new(dashboard_usecase))
}

pub async fn get_admin_stats<T>(
    State(dashboard_usecase): State<Arc<DashboardUseCase<T>>>,
) -> impl IntoResponse
where
    T: DashboardRepository + Send + Sync,
{
    match dashboard_usecase.admin_stats().await {
        Ok(stats) => (StatusCode::OK, Json(stats)).into_response(),
        Err(err) => err.into_response(),
    }
}

pub async fn get_client_dashboard<T>(
    State(dashboard_usecase): State<Arc<DashboardUseCase<T>>>,
    Path(customer_id): Path<i32>,
) -> impl IntoResponse
where
    T: DashboardRepository + Send + Sync,
{
    match dashboard_usecase.client_dashboard(customer_id).await {
        Ok(dashboard) => (StatusCode::OK, Json(dashboard)).into_response(),
        Err(err) => err.into_response(),
    }
}
