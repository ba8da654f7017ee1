use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, patch, post},
};
use serde::Serialize;

use crate::{
    application::usecases::invoices::InvoiceUseCase,
    domain::{
        repositories::{
            customers::CustomerRepository, invoices::InvoiceRepository,
            subscriptions::SubscriptionRepository,
        },
        value_objects::invoices::{CreateInvoiceModel, InvoiceFilter, UpdateInvoiceStatusModel},
    },
    infrastructure::postgres::{
        postgres_connection::PgPoolSquad,
        repositories::{
            customers::CustomerPostgres, invoices::InvoicePostgres,
            subscriptions::SubscriptionPostgres,
        },
    },
};

#[derive(Debug, Serialize)]
pub struct GenerateMonthlyInvoicesResponse {
    pub generated: usize,
}

pub fn routes(db_pool: Arc<PgPoolSquad>) -> Router {
    let invoice_repository = InvoicePostgres::new(Arc::clone(&db_pool));
    let customer_repository = CustomerPostgres::new(Arc::clone(&db_pool));
    let subscription_repository = SubscriptionPostgres::new(Arc::clone(&db_pool));
    let invoice_usecase = InvoiceUseCase::new(
        Arc::new(invoice_repository),
        Arc::new(customer_repository),
        Arc::new(subscription_repository),
    );

    Router::new()
        .route(
            "/",
            post(create_invoice::<InvoicePostgres, CustomerPostgres, SubscriptionPostgres>)
                .get(list_invoices::<InvoicePostgres, CustomerPostgres, SubscriptionPostgres>),
        )
        .route(
            "/generate-monthly",
            post(generate_monthly_invoices::<InvoicePostgres, CustomerPostgres, SubscriptionPostgres>),
        )
        .route(
            "/:invoice_id",
            get(get_invoice_by_id::<InvoicePostgres, CustomerPostgres, SubscriptionPostgres>),
        )
        .route(
            "/:invoice_id/status",
            patch(update_invoice_status::<InvoicePostgres, CustomerPostgres, SubscriptionPostgres>),
        )
        .with_state(Arc::new(invoice_usecase))
}

pub async fn create_invoice<I, C, S>(
    State(invoice_usecase): State<Arc<InvoiceUseCase<I, C, S>>>,
    Json(create_invoice_model): Json<CreateInvoiceModel>,
) -> impl IntoResponse
where
    I: InvoiceRepository + Send + Sync,
    C: CustomerRepository + Send + Sync,
    S: SubscriptionRepository + Send + Sync,
{
    match invoice_usecase.create(create_invoice_model).await {
        Ok(invoice) => (StatusCode::CREATED, Json(invoice)).into_response(),
        Err(err) => err.into_response(),
    }
}

pub async fn list_invoices<I, C, S>(
    State(invoice_usecase): State<Arc<InvoiceUseCase<I, C, S>>>,
    Query(filter): Query<InvoiceFilter>,
) -> impl IntoResponse
where
    I: InvoiceRepository + Send + Sync,
    C: CustomerRepository + Send + Sync,
    S: SubscriptionRepository + Send + Sync,
{
    match invoice_usecase.list(filter).await {
        Ok(invoices) => (StatusCode::OK, Json(invoices)).into_response(),
        Err(err) => err.into_response(),
    }
}

pub async fn get_invoice_by_id<I, C, S>(
    State(invoice_usecase): State<Arc<InvoiceUseCase<I, C, S>>>,
    Path(invoice_id): Path<i32>,
) -> impl IntoResponse
where
    I: InvoiceRepository + Send + Sync,
    C: CustomerRepository + Send + Sync,
    S: SubscriptionRepository + Send + Sync,
{
    match invoice_usecase.get_by_id(invoice_id).await {
        Ok(invoice) => (StatusCode::OK, Json(invoice)).into_response(),
        Err(err) => err.into_response(),
    }
}

pub async fn update_invoice_status<I, C, S>(
    State(invoice_usecase): State<Arc<InvoiceUseCase<I, C, S>>>,
    Path(invoice_id): Path<i32>,
    Json(update_invoice_status_model): Json<UpdateInvoiceStatusModel>,
) -> impl IntoResponse
where
    I: InvoiceRepository + Send + Sync,
    C: CustomerRepository + Send + Sync,
    S: SubscriptionRepository + Send + Sync,
{
    match invoice_usecase
        .update_status(invoice_id, update_invoice_status_model)
        .await
    {
        Ok(invoice) => (StatusCode::OK, Json(invoice)).into_response(),
        Err(err) => err.into_response(),
    }
}

pub async fn generate_monthly_invoices<I, C, S>(
    State(invoice_usecase): State<Arc<InvoiceUseCase<I, C, S>>>,
) -> impl IntoResponse
where
    I: InvoiceRepository + Send + Sync,
    C: CustomerRepository + Send + Sync,
    S: SubscriptionRepository + Send + Sync,
{
    match invoice_usecase.generate_monthly().await {
        Ok(run) => (
            StatusCode::OK,
            Json(GenerateMonthlyInvoicesResponse {
                generated: run.generated,
            }),
        )
            .into_response(),
        Err(err) => err.into_response(),
    }
}
