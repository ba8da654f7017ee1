use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;

use crate::application::usecases::{
    customers::CustomerError, dashboards::DashboardError, invoices::InvoiceError,
    payments::PaymentError, service_packages::ServicePackageError,
    subscriptions::SubscriptionError,
};

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub code: u16,
    pub message: String,
}

fn error_response(status: StatusCode, message: String) -> Response {
    let body = Json(ErrorResponse {
        code: status.as_u16(),
        message,
    });

    (status, body).into_response()
}

// Usecase errors already log their cause; here only the client-facing shape
// is decided. Internal detail never leaks into the response body.

impl IntoResponse for CustomerError {
    fn into_response(self) -> Response {
        let message = match &self {
            CustomerError::Internal(_) => "Internal server error".to_string(),
            other => other.to_string(),
        };
        error_response(self.status_code(), message)
    }
}

impl IntoResponse for ServicePackageError {
    fn into_response(self) -> Response {
        let message = match &self {
            ServicePackageError::Internal(_) => "Internal server error".to_string(),
            other => other.to_string(),
        };
        error_response(self.status_code(), message)
    }
}

impl IntoResponse for SubscriptionError {
    fn into_response(self) -> Response {
        let message = match &self {
            SubscriptionError::Internal(_) => "Internal server error".to_string(),
            other => other.to_string(),
        };
        error_response(self.status_code(), message)
    }
}

impl IntoResponse for InvoiceError {
    fn into_response(self) -> Response {
        let message = match &self {
            InvoiceError::Internal(_) => "Internal server error".to_string(),
            other => other.to_string(),
        };
        error_response(self.status_code(), message)
    }
}

impl IntoResponse for PaymentError {
    fn into_response(self) -> Response {
        let message = match &self {
            PaymentError::Internal(_) => "Internal server error".to_string(),
            other => other.to_string(),
        };
        error_response(self.status_code(), message)
    }
}

impl IntoResponse for DashboardError {
    fn into_response(self) -> Response {
        let message = match &self {
            DashboardError::Internal(_) => "Internal server error".to_string(),
            other => other.to_string(),
        };
        error_response(self.status_code(), message)
    }
}
