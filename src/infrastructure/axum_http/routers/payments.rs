use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::post,
};
use serde::Deserialize;

use crate::{
    application::usecases::payments::PaymentUseCase,
    domain::{
        repositories::{invoices::InvoiceRepository, payments::PaymentRepository},
        value_objects::payments::CreatePaymentModel,
    },
    infrastructure::postgres::{
        postgres_connection::PgPoolSquad,
        repositories::{invoices::InvoicePostgres, payments::PaymentPostgres},
    },
};

#[derive(Debug, Deserialize)]
pub struct PaymentListQuery {
    pub customer_id: Option<i32>,
}

pub fn routes(db_pool: Arc<PgPoolSquad>) -> Router {
    let payment_repository = PaymentPostgres::new(Arc::clone(&db_pool));
    let invoice_repository = InvoicePostgres::new(Arc::clone(&db_pool));
    let payment_usecase = PaymentUseCase::new(
        Arc::new(payment_repository),
        Arc::new(invoice_repository),
    );

    Router::new()
        .route(
            "/",
            post(create_payment::<PaymentPostgres, InvoicePostgres>)
                .get(list_payments::<PaymentPostgres, InvoicePostgres>),
        )
        .with_state(Arc::new(payment_usecase))
}

pub async fn create_payment<P, I>(
    State(payment_usecase): State<Arc<PaymentUseCase<P, I>>>,
    Json(create_payment_model): Json<CreatePaymentModel>,
) -> impl IntoResponse
where
    P: PaymentRepository + Send + Sync,
    I: InvoiceRepository + Send + Sync,
{
    match payment_usecase.record(create_payment_model).await {
        Ok(payment) => (StatusCode::CREATED, Json(payment)).into_response(),
        Err(err) => err.into_response(),
    }
}

pub async fn list_payments<P, I>(
    State(payment_usecase): State<Arc<PaymentUseCase<P, I>>>,
    Query(query): Query<PaymentListQuery>,
) -> impl IntoResponse
where
    P: PaymentRepository + Send + Sync,
    I: InvoiceRepository + Send + Sync,
{
    match payment_usecase.list(query.customer_id).await {
        Ok(payments) => (StatusCode::OK, Json(payments)).into_response(),
        Err(err) => err.into_response(),
    }
}
