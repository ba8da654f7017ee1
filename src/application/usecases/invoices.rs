use std::{collections::HashSet, sync::Arc};

use anyhow::{Context, Result as AnyResult};
use chrono::{Datelike, Duration, NaiveDate, Utc};
use rand::{Rng, distributions::Alphanumeric};
use thiserror::Error;
use tracing::{error, info, warn};

use crate::domain::{
    entities::invoices::InsertInvoiceEntity,
    repositories::{
        customers::CustomerRepository, invoices::InvoiceRepository,
        subscriptions::SubscriptionRepository,
    },
    value_objects::{
        enums::invoice_statuses::InvoiceStatus,
        invoices::{BillingCandidate, CreateInvoiceModel, InvoiceFilter, InvoiceModel,
            UpdateInvoiceStatusModel},
    },
};

#[derive(Debug, Error)]
pub enum InvoiceError {
    #[error("invoice not found")]
    NotFound,
    #[error("customer not found")]
    CustomerNotFound,
    #[error("subscription not found")]
    SubscriptionNotFound,
    #[error("invalid invoice input: {0}")]
    Invalid(String),
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl InvoiceError {
    pub fn status_code(&self) -> axum::http::StatusCode {
        use axum::http::StatusCode;
        match self {
            InvoiceError::NotFound
            | InvoiceError::CustomerNotFound
            | InvoiceError::SubscriptionNotFound => StatusCode::NOT_FOUND,
            InvoiceError::Invalid(_) => StatusCode::BAD_REQUEST,
            InvoiceError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

pub type InvoiceResult<T> = std::result::Result<T, InvoiceError>;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct MonthlyInvoiceRun {
    pub scanned: usize,
    pub generated: usize,
}

pub struct InvoiceUseCase<I, C, S>
where
    I: InvoiceRepository + Send + Sync,
    C: CustomerRepository + Send + Sync,
    S: SubscriptionRepository + Send + Sync,
{
    invoice_repo: Arc<I>,
    customer_repo: Arc<C>,
    subscription_repo: Arc<S>,
}

impl<I, C, S> InvoiceUseCase<I, C, S>
where
    I: InvoiceRepository + Send + Sync,
    C: CustomerRepository + Send + Sync,
    S: SubscriptionRepository + Send + Sync,
{
    pub fn new(invoice_repo: Arc<I>, customer_repo: Arc<C>, subscription_repo: Arc<S>) -> Self {
        Self {
            invoice_repo,
            customer_repo,
            subscription_repo,
        }
    }

    pub async fn create(
        &self,
        create_invoice_model: CreateInvoiceModel,
    ) -> InvoiceResult<InvoiceModel> {
        create_invoice_model
            .validate()
            .map_err(InvoiceError::Invalid)?;

        let customer_id = create_invoice_model.customer_id;
        let subscription_id = create_invoice_model.subscription_id;

        self.customer_repo
            .find_by_id(customer_id)
            .await
            .map_err(|err| {
                error!(customer_id, db_error = ?err, "invoices: failed to load customer");
                InvoiceError::Internal(err)
            })?
            .ok_or_else(|| {
                warn!(customer_id, "invoices: customer does not exist");
                InvoiceError::CustomerNotFound
            })?;

        self.subscription_repo
            .find_by_id(subscription_id)
            .await
            .map_err(|err| {
                error!(subscription_id, db_error = ?err, "invoices: failed to load subscription");
                InvoiceError::Internal(err)
            })?
            .ok_or_else(|| {
                warn!(subscription_id, "invoices: subscription does not exist");
                InvoiceError::SubscriptionNotFound
            })?;

        let invoice = self
            .invoice_repo
            .create(InsertInvoiceEntity {
                invoice_number: manual_invoice_number(),
                customer_id,
                subscription_id,
                issue_date: create_invoice_model.issue_date,
                due_date: create_invoice_model.due_date,
                service_period_start: create_invoice_model.service_period_start,
                service_period_end: create_invoice_model.service_period_end,
                service_details: create_invoice_model.service_details,
                total_amount: create_invoice_model.total_amount,
                status: InvoiceStatus::Unpaid.to_string(),
            })
            .await
            .map_err(|err| {
                error!(
                    customer_id,
                    subscription_id,
                    db_error = ?err,
                    "invoices: failed to create invoice"
                );
                InvoiceError::Internal(err)
            })?;

        info!(
            invoice_id = invoice.id,
            invoice_number = %invoice.invoice_number,
            "invoices: invoice created"
        );
        Ok(InvoiceModel::from(invoice))
    }

    pub async fn list(&self, filter: InvoiceFilter) -> InvoiceResult<Vec<InvoiceModel>> {
        let invoices = self.invoice_repo.list(filter).await.map_err(|err| {
            error!(db_error = ?err, "invoices: failed to list invoices");
            InvoiceError::Internal(err)
        })?;

        Ok(invoices.into_iter().map(InvoiceModel::from).collect())
    }

    pub async fn get_by_id(&self, invoice_id: i32) -> InvoiceResult<InvoiceModel> {
        let invoice = self
            .invoice_repo
            .find_by_id(invoice_id)
            .await
            .map_err(|err| {
                error!(invoice_id, db_error = ?err, "invoices: failed to load invoice");
                InvoiceError::Internal(err)
            })?
            .ok_or(InvoiceError::NotFound)?;

        Ok(InvoiceModel::from(invoice))
    }

    pub async fn update_status(
        &self,
        invoice_id: i32,
        update_invoice_status_model: UpdateInvoiceStatusModel,
    ) -> InvoiceResult<InvoiceModel> {
        let invoice = self
            .invoice_repo
            .update_status(invoice_id, update_invoice_status_model.status)
            .await
            .map_err(|err| {
                error!(invoice_id, db_error = ?err, "invoices: failed to update status");
                InvoiceError::Internal(err)
            })?
            .ok_or_else(|| {
                warn!(invoice_id, "invoices: status update target not found");
                InvoiceError::NotFound
            })?;

        info!(
            invoice_id,
            status = %invoice.status,
            "invoices: invoice status updated"
        );
        Ok(InvoiceModel::from(invoice))
    }

    /// Issues the current month's invoice for every active subscription that
    /// does not have one yet. Re-running within the same month is a no-op for
    /// already-covered subscriptions.
    pub async fn generate_monthly(&self) -> InvoiceResult<MonthlyInvoiceRun> {
        self.generate_for(Utc::now().date_naive()).await
    }

    async fn generate_for(&self, today: NaiveDate) -> InvoiceResult<MonthlyInvoiceRun> {
        let (month_start, next_month_start) = billing_period(today)?;

        let candidates = self
            .invoice_repo
            .list_billing_candidates()
            .await
            .map_err(|err| {
                error!(db_error = ?err, "invoice_generation: failed to load candidates");
                InvoiceError::Internal(err)
            })?;

        let invoiced: HashSet<i32> = self
            .invoice_repo
            .subscription_ids_invoiced_between(month_start, next_month_start)
            .await
            .map_err(|err| {
                error!(db_error = ?err, "invoice_generation: failed to load existing invoices");
                InvoiceError::Internal(err)
            })?
            .into_iter()
            .collect();

        let mut run = MonthlyInvoiceRun {
            scanned: candidates.len(),
            ..Default::default()
        };

        for candidate in candidates {
            if invoiced.contains(&candidate.subscription_id) {
                continue;
            }

            let insert = build_monthly_invoice(&candidate, today, month_start, next_month_start)?;

            // A single failed insert aborts the run; the next invocation
            // picks up exactly the subscriptions that are still uncovered.
            self.invoice_repo.create(insert).await.map_err(|err| {
                error!(
                    subscription_id = candidate.subscription_id,
                    generated = run.generated,
                    db_error = ?err,
                    "invoice_generation: insert failed, aborting run"
                );
                InvoiceError::Internal(err)
            })?;

            run.generated += 1;
        }

        info!(
            scanned = run.scanned,
            generated = run.generated,
            period_start = %month_start,
            "invoice_generation: completed"
        );

        Ok(run)
    }
}

fn build_monthly_invoice(
    candidate: &BillingCandidate,
    today: NaiveDate,
    month_start: NaiveDate,
    next_month_start: NaiveDate,
) -> AnyResult<InsertInvoiceEntity> {
    let service_period_end = next_month_start
        .checked_sub_signed(Duration::days(1))
        .context("failed to compute service period end")?;
    let due_date = today
        .checked_add_signed(Duration::days(15))
        .context("failed to compute due date")?;

    Ok(InsertInvoiceEntity {
        invoice_number: monthly_invoice_number(month_start, candidate.subscription_id),
        customer_id: candidate.customer_id,
        subscription_id: candidate.subscription_id,
        issue_date: today,
        due_date,
        service_period_start: month_start,
        service_period_end,
        service_details: format!(
            "Monthly service: {} - {}",
            candidate.package_name, candidate.package_description
        ),
        total_amount: candidate.monthly_price,
        status: InvoiceStatus::Unpaid.to_string(),
    })
}

fn billing_period(today: NaiveDate) -> AnyResult<(NaiveDate, NaiveDate)> {
    let month_start = NaiveDate::from_ymd_opt(today.year(), today.month(), 1)
        .context("failed to compute billing period start")?;
    let next_month_start = if today.month() == 12 {
        NaiveDate::from_ymd_opt(today.year() + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(today.year(), today.month() + 1, 1)
    }
    .context("failed to compute next billing period start")?;

    Ok((month_start, next_month_start))
}

fn monthly_invoice_number(month_start: NaiveDate, subscription_id: i32) -> String {
    format!(
        "INV-{}{:02}-{:06}",
        month_start.year(),
        month_start.month(),
        subscription_id
    )
}

fn manual_invoice_number() -> String {
    let suffix: String = rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(9)
        .map(char::from)
        .collect();
    format!(
        "INV-{}-{}",
        Utc::now().timestamp_millis(),
        suffix.to_lowercase()
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::anyhow;
    use mockall::predicate::eq;
    use rust_decimal::Decimal;

    use crate::domain::{
        entities::invoices::InvoiceEntity,
        repositories::{
            customers::MockCustomerRepository, invoices::MockInvoiceRepository,
            subscriptions::MockSubscriptionRepository,
        },
    };

    fn sample_candidate(subscription_id: i32) -> BillingCandidate {
        BillingCandidate {
            subscription_id,
            customer_id: 1,
            package_name: "Fiber 100".to_string(),
            package_description: "Home fiber".to_string(),
            monthly_price: "29.99".parse::<Decimal>().unwrap(),
        }
    }

    fn entity_from_insert(id: i32, insert: InsertInvoiceEntity) -> InvoiceEntity {
        let now = Utc::now();
        InvoiceEntity {
            id,
            invoice_number: insert.invoice_number,
            customer_id: insert.customer_id,
            subscription_id: insert.subscription_id,
            issue_date: insert.issue_date,
            due_date: insert.due_date,
            service_period_start: insert.service_period_start,
            service_period_end: insert.service_period_end,
            service_details: insert.service_details,
            total_amount: insert.total_amount,
            status: insert.status,
            created_at: now,
            updated_at: now,
        }
    }

    fn usecase(
        invoice_repo: MockInvoiceRepository,
    ) -> InvoiceUseCase<MockInvoiceRepository, MockCustomerRepository, MockSubscriptionRepository>
    {
        InvoiceUseCase::new(
            Arc::new(invoice_repo),
            Arc::new(MockCustomerRepository::new()),
            Arc::new(MockSubscriptionRepository::new()),
        )
    }

    #[tokio::test]
    async fn generates_invoice_for_uncovered_active_subscription() {
        let today = NaiveDate::from_ymd_opt(2026, 8, 7).unwrap();

        let mut invoice_repo = MockInvoiceRepository::new();
        invoice_repo
            .expect_list_billing_candidates()
            .returning(|| Box::pin(async { Ok(vec![sample_candidate(42)]) }));
        invoice_repo
            .expect_subscription_ids_invoiced_between()
            .with(
                eq(NaiveDate::from_ymd_opt(2026, 8, 1).unwrap()),
                eq(NaiveDate::from_ymd_opt(2026, 9, 1).unwrap()),
            )
            .returning(|_, _| Box::pin(async { Ok(vec![]) }));
        invoice_repo
            .expect_create()
            .times(1)
            .withf(move |insert| {
                insert.invoice_number == "INV-202608-000042"
                    && insert.subscription_id == 42
                    && insert.customer_id == 1
                    && insert.issue_date == today
                    && insert.due_date == NaiveDate::from_ymd_opt(2026, 8, 22).unwrap()
                    && insert.service_period_start == NaiveDate::from_ymd_opt(2026, 8, 1).unwrap()
                    && insert.service_period_end == NaiveDate::from_ymd_opt(2026, 8, 31).unwrap()
                    && insert.total_amount == "29.99".parse::<Decimal>().unwrap()
                    && insert.status == "unpaid"
                    && insert.service_details == "Monthly service: Fiber 100 - Home fiber"
            })
            .returning(|insert| Box::pin(async move { Ok(entity_from_insert(100, insert)) }));

        let run = usecase(invoice_repo).generate_for(today).await.unwrap();

        assert_eq!(run, MonthlyInvoiceRun { scanned: 1, generated: 1 });
    }

    #[tokio::test]
    async fn rerun_within_month_generates_nothing() {
        let today = NaiveDate::from_ymd_opt(2026, 8, 20).unwrap();

        let mut invoice_repo = MockInvoiceRepository::new();
        invoice_repo
            .expect_list_billing_candidates()
            .returning(|| Box::pin(async { Ok(vec![sample_candidate(42)]) }));
        invoice_repo
            .expect_subscription_ids_invoiced_between()
            .returning(|_, _| Box::pin(async { Ok(vec![42]) }));
        invoice_repo.expect_create().never();

        let run = usecase(invoice_repo).generate_for(today).await.unwrap();

        assert_eq!(run, MonthlyInvoiceRun { scanned: 1, generated: 0 });
    }

    #[tokio::test]
    async fn insert_failure_aborts_the_run() {
        let today = NaiveDate::from_ymd_opt(2026, 8, 7).unwrap();

        let mut invoice_repo = MockInvoiceRepository::new();
        invoice_repo
            .expect_list_billing_candidates()
            .returning(|| {
                Box::pin(async { Ok(vec![sample_candidate(1), sample_candidate(2)]) })
            });
        invoice_repo
            .expect_subscription_ids_invoiced_between()
            .returning(|_, _| Box::pin(async { Ok(vec![]) }));
        invoice_repo
            .expect_create()
            .times(1)
            .returning(|_| Box::pin(async { Err(anyhow!("duplicate key")) }));

        let result = usecase(invoice_repo).generate_for(today).await;

        assert!(matches!(result, Err(InvoiceError::Internal(_))));
    }

    #[tokio::test]
    async fn december_period_rolls_into_next_year() {
        let today = NaiveDate::from_ymd_opt(2026, 12, 15).unwrap();
        let (month_start, next_month_start) = billing_period(today).unwrap();

        assert_eq!(month_start, NaiveDate::from_ymd_opt(2026, 12, 1).unwrap());
        assert_eq!(
            next_month_start,
            NaiveDate::from_ymd_opt(2027, 1, 1).unwrap()
        );
    }

    #[tokio::test]
    async fn manual_create_requires_existing_subscription() {
        let mut invoice_repo = MockInvoiceRepository::new();
        invoice_repo.expect_create().never();
        let mut customer_repo = MockCustomerRepository::new();
        customer_repo.expect_find_by_id().with(eq(1)).returning(|_| {
            Box::pin(async {
                let now = Utc::now();
                Ok(Some(crate::domain::entities::customers::CustomerEntity {
                    id: 1,
                    full_name: "John Carter".to_string(),
                    full_address: "12 Elm Street".to_string(),
                    phone_number: "0812345678".to_string(),
                    email_address: "john@example.com".to_string(),
                    join_date: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
                    status: "active".to_string(),
                    created_at: now,
                    updated_at: now,
                }))
            })
        });
        let mut subscription_repo = MockSubscriptionRepository::new();
        subscription_repo
            .expect_find_by_id()
            .with(eq(5))
            .returning(|_| Box::pin(async { Ok(None) }));

        let usecase = InvoiceUseCase::new(
            Arc::new(invoice_repo),
            Arc::new(customer_repo),
            Arc::new(subscription_repo),
        );

        let result = usecase
            .create(CreateInvoiceModel {
                customer_id: 1,
                subscription_id: 5,
                issue_date: NaiveDate::from_ymd_opt(2026, 8, 7).unwrap(),
                due_date: NaiveDate::from_ymd_opt(2026, 8, 22).unwrap(),
                service_period_start: NaiveDate::from_ymd_opt(2026, 8, 1).unwrap(),
                service_period_end: NaiveDate::from_ymd_opt(2026, 8, 31).unwrap(),
                service_details: "Monthly service".to_string(),
                total_amount: "29.99".parse().unwrap(),
            })
            .await;

        assert!(matches!(result, Err(InvoiceError::SubscriptionNotFound)));
    }

    #[test]
    fn manual_invoice_numbers_carry_the_expected_shape() {
        let number = manual_invoice_number();
        let mut parts = number.splitn(3, '-');
        assert_eq!(parts.next(), Some("INV"));
        assert!(parts.next().unwrap().parse::<i64>().is_ok());
        assert_eq!(parts.next().unwrap().len(), 9);
    }
}
