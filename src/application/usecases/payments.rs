use std::sync::Arc;

use thiserror::Error;
use tracing::{error, info, warn};

use crate::domain::{
    repositories::{invoices::InvoiceRepository, payments::PaymentRepository},
    value_objects::{
        enums::invoice_statuses::InvoiceStatus,
        payments::{CreatePaymentModel, PaymentModel},
    },
};

#[derive(Debug, Error)]
pub enum PaymentError {
    #[error("invoice not found")]
    InvoiceNotFound,
    #[error("invoice is already paid")]
    AlreadyPaid,
    #[error("invalid payment input: {0}")]
    Invalid(String),
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl PaymentError {
    pub fn status_code(&self) -> axum::http::StatusCode {
        use axum::http::StatusCode;
        match self {
            PaymentError::InvoiceNotFound => StatusCode::NOT_FOUND,
            PaymentError::AlreadyPaid => StatusCode::CONFLICT,
            PaymentError::Invalid(_) => StatusCode::BAD_REQUEST,
            PaymentError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

pub type PaymentResult<T> = std::result::Result<T, PaymentError>;

pub struct PaymentUseCase<P, I>
where
    P: PaymentRepository + Send + Sync,
    I: InvoiceRepository + Send + Sync,
{
    payment_repo: Arc<P>,
    invoice_repo: Arc<I>,
}

impl<P, I> PaymentUseCase<P, I>
where
    P: PaymentRepository + Send + Sync,
    I: InvoiceRepository + Send + Sync,
{
    pub fn new(payment_repo: Arc<P>, invoice_repo: Arc<I>) -> Self {
        Self {
            payment_repo,
            invoice_repo,
        }
    }

    /// The amount is validated for positivity only; a single payment settles
    /// the invoice regardless of its total.
    pub async fn record(
        &self,
        create_payment_model: CreatePaymentModel,
    ) -> PaymentResult<PaymentModel> {
        create_payment_model
            .validate()
            .map_err(PaymentError::Invalid)?;

        let invoice_id = create_payment_model.invoice_id;

        let invoice = self
            .invoice_repo
            .find_by_id(invoice_id)
            .await
            .map_err(|err| {
                error!(invoice_id, db_error = ?err, "payments: failed to load invoice");
                PaymentError::Internal(err)
            })?
            .ok_or_else(|| {
                warn!(invoice_id, "payments: invoice does not exist");
                PaymentError::InvoiceNotFound
            })?;

        if InvoiceStatus::from_str(&invoice.status) == Some(InvoiceStatus::Paid) {
            warn!(invoice_id, "payments: invoice is already paid");
            return Err(PaymentError::AlreadyPaid);
        }

        let payment = self
            .payment_repo
            .record_and_settle(create_payment_model.into_entity())
            .await
            .map_err(|err| {
                error!(invoice_id, db_error = ?err, "payments: failed to record payment");
                PaymentError::Internal(err)
            })?
            // A concurrent writer settled the invoice between the check and
            // the transaction; nothing was recorded.
            .ok_or_else(|| {
                warn!(invoice_id, "payments: invoice settled concurrently");
                PaymentError::AlreadyPaid
            })?;

        info!(
            payment_id = payment.id,
            invoice_id, "payments: payment recorded, invoice settled"
        );
        Ok(PaymentModel::from(payment))
    }

    pub async fn list(&self, customer_id: Option<i32>) -> PaymentResult<Vec<PaymentModel>> {
        let payments = self.payment_repo.list(customer_id).await.map_err(|err| {
            error!(db_error = ?err, "payments: failed to list payments");
            PaymentError::Internal(err)
        })?;

        Ok(payments.into_iter().map(PaymentModel::from).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, Utc};
    use mockall::predicate::eq;
    use rust_decimal::Decimal;

    use crate::domain::{
        entities::{invoices::InvoiceEntity, payments::PaymentEntity},
        repositories::{invoices::MockInvoiceRepository, payments::MockPaymentRepository},
        value_objects::enums::payment_methods::PaymentMethod,
    };

    fn sample_invoice(id: i32, status: InvoiceStatus) -> InvoiceEntity {
        let now = Utc::now();
        InvoiceEntity {
            id,
            invoice_number: format!("INV-202608-{:06}", id),
            customer_id: 1,
            subscription_id: 42,
            issue_date: NaiveDate::from_ymd_opt(2026, 8, 1).unwrap(),
            due_date: NaiveDate::from_ymd_opt(2026, 8, 16).unwrap(),
            service_period_start: NaiveDate::from_ymd_opt(2026, 8, 1).unwrap(),
            service_period_end: NaiveDate::from_ymd_opt(2026, 8, 31).unwrap(),
            service_details: "Monthly service: Fiber 100 - Home fiber".to_string(),
            total_amount: "29.99".parse().unwrap(),
            status: status.to_string(),
            created_at: now,
            updated_at: now,
        }
    }

    fn sample_payment_model(invoice_id: i32) -> CreatePaymentModel {
        CreatePaymentModel {
            invoice_id,
            payment_date: NaiveDate::from_ymd_opt(2026, 8, 10).unwrap(),
            payment_method: PaymentMethod::BankTransfer,
            amount_paid: "29.99".parse().unwrap(),
            notes: None,
        }
    }

    #[tokio::test]
    async fn records_payment_against_unpaid_invoice() {
        let mut invoice_repo = MockInvoiceRepository::new();
        invoice_repo
            .expect_find_by_id()
            .with(eq(5))
            .returning(|_| Box::pin(async { Ok(Some(sample_invoice(5, InvoiceStatus::Unpaid))) }));
        let mut payment_repo = MockPaymentRepository::new();
        payment_repo
            .expect_record_and_settle()
            .times(1)
            .withf(|insert| insert.invoice_id == 5 && insert.payment_method == "bank_transfer")
            .returning(|insert| {
                Box::pin(async move {
                    Ok(Some(PaymentEntity {
                        id: 9,
                        invoice_id: insert.invoice_id,
                        payment_date: insert.payment_date,
                        payment_method: insert.payment_method,
                        amount_paid: insert.amount_paid,
                        notes: insert.notes,
                        created_at: Utc::now(),
                        updated_at: Utc::now(),
                    }))
                })
            });

        let usecase = PaymentUseCase::new(Arc::new(payment_repo), Arc::new(invoice_repo));
        let payment = usecase.record(sample_payment_model(5)).await.unwrap();

        assert_eq!(payment.id, 9);
        assert_eq!(payment.invoice_id, 5);
    }

    #[tokio::test]
    async fn rejects_payment_on_paid_invoice() {
        let mut invoice_repo = MockInvoiceRepository::new();
        invoice_repo
            .expect_find_by_id()
            .with(eq(5))
            .returning(|_| Box::pin(async { Ok(Some(sample_invoice(5, InvoiceStatus::Paid))) }));
        let mut payment_repo = MockPaymentRepository::new();
        payment_repo.expect_record_and_settle().never();

        let usecase = PaymentUseCase::new(Arc::new(payment_repo), Arc::new(invoice_repo));
        let result = usecase.record(sample_payment_model(5)).await;

        assert!(matches!(result, Err(PaymentError::AlreadyPaid)));
    }

    #[tokio::test]
    async fn rejects_payment_on_missing_invoice() {
        let mut invoice_repo = MockInvoiceRepository::new();
        invoice_repo
            .expect_find_by_id()
            .with(eq(5))
            .returning(|_| Box::pin(async { Ok(None) }));
        let mut payment_repo = MockPaymentRepository::new();
        payment_repo.expect_record_and_settle().never();

        let usecase = PaymentUseCase::new(Arc::new(payment_repo), Arc::new(invoice_repo));
        let result = usecase.record(sample_payment_model(5)).await;

        assert!(matches!(result, Err(PaymentError::InvoiceNotFound)));
    }

    #[tokio::test]
    async fn lost_settlement_race_reports_already_paid() {
        let mut invoice_repo = MockInvoiceRepository::new();
        invoice_repo
            .expect_find_by_id()
            .with(eq(5))
            .returning(|_| Box::pin(async { Ok(Some(sample_invoice(5, InvoiceStatus::Unpaid))) }));
        let mut payment_repo = MockPaymentRepository::new();
        payment_repo
            .expect_record_and_settle()
            .returning(|_| Box::pin(async { Ok(None) }));

        let usecase = PaymentUseCase::new(Arc::new(payment_repo), Arc::new(invoice_repo));
        let result = usecase.record(sample_payment_model(5)).await;

        assert!(matches!(result, Err(PaymentError::AlreadyPaid)));
    }

    #[tokio::test]
    async fn rejects_non_positive_amount() {
        let invoice_repo = MockInvoiceRepository::new();
        let payment_repo = MockPaymentRepository::new();

        let usecase = PaymentUseCase::new(Arc::new(payment_repo), Arc::new(invoice_repo));
        let mut model = sample_payment_model(5);
        model.amount_paid = Decimal::ZERO;
        let result = usecase.record(model).await;

        assert!(matches!(result, Err(PaymentError::Invalid(_))));
    }

    #[tokio::test]
    async fn overpayment_still_settles_in_full() {
        let mut invoice_repo = MockInvoiceRepository::new();
        invoice_repo
            .expect_find_by_id()
            .with(eq(5))
            .returning(|_| Box::pin(async { Ok(Some(sample_invoice(5, InvoiceStatus::Unpaid))) }));
        let mut payment_repo = MockPaymentRepository::new();
        payment_repo
            .expect_record_and_settle()
            .times(1)
            .returning(|insert| {
                Box::pin(async move {
                    Ok(Some(PaymentEntity {
                        id: 9,
                        invoice_id: insert.invoice_id,
                        payment_date: insert.payment_date,
                        payment_method: insert.payment_method,
                        amount_paid: insert.amount_paid,
                        notes: insert.notes,
                        created_at: Utc::now(),
                        updated_at: Utc::now(),
                    }))
                })
            });

        let usecase = PaymentUseCase::new(Arc::new(payment_repo), Arc::new(invoice_repo));
        let mut model = sample_payment_model(5);
        model.amount_paid = "100.00".parse().unwrap();

        assert!(usecase.record(model).await.is_ok());
    }
}
