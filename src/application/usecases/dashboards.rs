use std::sync::Arc;

use thiserror::Error;
use tracing::error;

use crate::domain::{
    repositories::dashboards::DashboardRepository,
    value_objects::{
        customers::CustomerModel,
        dashboards::{AdminStatsDto, ClientDashboardDto},
        enums::subscription_statuses::SubscriptionStatus,
        invoices::InvoiceModel,
        payments::PaymentModel,
        service_packages::ServicePackageModel,
        subscriptions::SubscriptionModel,
    },
};

#[derive(Debug, Error)]
pub enum DashboardError {
    #[error("customer not found")]
    CustomerNotFound,
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl DashboardError {
    pub fn status_code(&self) -> axum::http::StatusCode {
        use axum::http::StatusCode;
        match self {
            DashboardError::CustomerNotFound => StatusCode::NOT_FOUND,
            DashboardError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

pub type DashboardResult<T> = std::result::Result<T, DashboardError>;

pub struct DashboardUseCase<T>
where
    T: DashboardRepository + Send + Sync,
{
    dashboard_repo: Arc<T>,
}

impl<T> DashboardUseCase<T>
where
    T: DashboardRepository + Send + Sync,
{
    pub fn new(dashboard_repo: Arc<T>) -> Self {
        Self { dashboard_repo }
    }

    pub async fn admin_stats(&self) -> DashboardResult<AdminStatsDto> {
        let total_active_customers =
            self.dashboard_repo
                .count_active_customers()
                .await
                .map_err(|err| {
                    error!(db_error = ?err, "dashboards: failed to count active customers");
                    DashboardError::Internal(err)
                })?;

        let total_unpaid_invoices =
            self.dashboard_repo
                .count_unpaid_invoices()
                .await
                .map_err(|err| {
                    error!(db_error = ?err, "dashboards: failed to count unpaid invoices");
                    DashboardError::Internal(err)
                })?;

        let estimated_monthly_revenue = self
            .dashboard_repo
            .sum_active_subscription_prices()
            .await
            .map_err(|err| {
                error!(db_error = ?err, "dashboards: failed to sum subscription prices");
                DashboardError::Internal(err)
            })?;

        Ok(AdminStatsDto {
            total_active_customers,
            total_unpaid_invoices,
            estimated_monthly_revenue,
        })
    }

    pub async fn client_dashboard(&self, customer_id: i32) -> DashboardResult<ClientDashboardDto> {
        let customer = self
            .dashboard_repo
            .find_customer(customer_id)
            .await
            .map_err(|err| {
                error!(customer_id, db_error = ?err, "dashboards: failed to load customer");
                DashboardError::Internal(err)
            })?
            .ok_or(DashboardError::CustomerNotFound)?;

        let subscriptions = self
            .dashboard_repo
            .list_subscriptions_with_packages(customer_id)
            .await
            .map_err(|err| {
                error!(customer_id, db_error = ?err, "dashboards: failed to load subscriptions");
                DashboardError::Internal(err)
            })?;

        // Rows arrive newest-first: the freshest active subscription wins,
        // otherwise fall back to the most recent one of any status.
        let current = subscriptions
            .iter()
            .find(|(subscription, _)| {
                SubscriptionStatus::from_str(&subscription.status)
                    == Some(SubscriptionStatus::Active)
            })
            .or_else(|| subscriptions.first())
            .cloned();

        let (active_subscription, service_package) = match current {
            Some((subscription, package)) => (
                Some(SubscriptionModel::from(subscription)),
                Some(ServicePackageModel::from(package)),
            ),
            None => (None, None),
        };

        let invoices = self
            .dashboard_repo
            .list_customer_invoices(customer_id)
            .await
            .map_err(|err| {
                error!(customer_id, db_error = ?err, "dashboards: failed to load invoices");
                DashboardError::Internal(err)
            })?;

        let payments = self
            .dashboard_repo
            .list_customer_payments(customer_id)
            .await
            .map_err(|err| {
                error!(customer_id, db_error = ?err, "dashboards: failed to load payments");
                DashboardError::Internal(err)
            })?;

        Ok(ClientDashboardDto {
            customer: CustomerModel::from(customer),
            active_subscription,
            service_package,
            invoices: invoices.into_iter().map(InvoiceModel::from).collect(),
            payments: payments.into_iter().map(PaymentModel::from).collect(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, NaiveDate, Utc};
    use mockall::predicate::eq;
    use rust_decimal::Decimal;

    use crate::domain::{
        entities::{
            customers::CustomerEntity, service_packages::ServicePackageEntity,
            subscriptions::SubscriptionEntity,
        },
        repositories::dashboards::MockDashboardRepository,
    };

    fn sample_customer(id: i32) -> CustomerEntity {
        let now = Utc::now();
        CustomerEntity {
            id,
            full_name: "John Carter".to_string(),
            full_address: "12 Elm Street".to_string(),
            phone_number: "0812345678".to_string(),
            email_address: "john@example.com".to_string(),
            join_date: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
            status: "active".to_string(),
            created_at: now,
            updated_at: now,
        }
    }

    fn sample_package(id: i32) -> ServicePackageEntity {
        let now = Utc::now();
        ServicePackageEntity {
            id,
            package_name: "Fiber 100".to_string(),
            speed: "100 Mbps".to_string(),
            monthly_price: "29.99".parse().unwrap(),
            package_description: "Home fiber".to_string(),
            created_at: now,
            updated_at: now,
        }
    }

    fn sample_subscription(id: i32, status: SubscriptionStatus, age_days: i64) -> SubscriptionEntity {
        let created_at = Utc::now() - Duration::days(age_days);
        SubscriptionEntity {
            id,
            customer_id: 1,
            package_id: 2,
            start_date: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
            end_date: None,
            status: status.to_string(),
            created_at,
            updated_at: created_at,
        }
    }

    #[tokio::test]
    async fn admin_stats_default_to_zero_on_empty_store() {
        let mut dashboard_repo = MockDashboardRepository::new();
        dashboard_repo
            .expect_count_active_customers()
            .returning(|| Box::pin(async { Ok(0) }));
        dashboard_repo
            .expect_count_unpaid_invoices()
            .returning(|| Box::pin(async { Ok(0) }));
        dashboard_repo
            .expect_sum_active_subscription_prices()
            .returning(|| Box::pin(async { Ok(Decimal::ZERO) }));

        let usecase = DashboardUseCase::new(Arc::new(dashboard_repo));
        let stats = usecase.admin_stats().await.unwrap();

        assert_eq!(
            stats,
            AdminStatsDto {
                total_active_customers: 0,
                total_unpaid_invoices: 0,
                estimated_monthly_revenue: Decimal::ZERO,
            }
        );
    }

    #[tokio::test]
    async fn prefers_newest_active_subscription() {
        let mut dashboard_repo = MockDashboardRepository::new();
        dashboard_repo
            .expect_find_customer()
            .with(eq(1))
            .returning(|_| Box::pin(async { Ok(Some(sample_customer(1))) }));
        dashboard_repo
            .expect_list_subscriptions_with_packages()
            .with(eq(1))
            .returning(|_| {
                Box::pin(async {
                    Ok(vec![
                        (
                            sample_subscription(30, SubscriptionStatus::Suspended, 1),
                            sample_package(2),
                        ),
                        (
                            sample_subscription(20, SubscriptionStatus::Active, 5),
                            sample_package(2),
                        ),
                        (
                            sample_subscription(10, SubscriptionStatus::Active, 30),
                            sample_package(2),
                        ),
                    ])
                })
            });
        dashboard_repo
            .expect_list_customer_invoices()
            .returning(|_| Box::pin(async { Ok(vec![]) }));
        dashboard_repo
            .expect_list_customer_payments()
            .returning(|_| Box::pin(async { Ok(vec![]) }));

        let usecase = DashboardUseCase::new(Arc::new(dashboard_repo));
        let dashboard = usecase.client_dashboard(1).await.unwrap();

        assert_eq!(dashboard.active_subscription.unwrap().id, 20);
        assert_eq!(dashboard.service_package.unwrap().id, 2);
    }

    #[tokio::test]
    async fn falls_back_to_most_recent_subscription_when_none_active() {
        let mut dashboard_repo = MockDashboardRepository::new();
        dashboard_repo
            .expect_find_customer()
            .with(eq(1))
            .returning(|_| Box::pin(async { Ok(Some(sample_customer(1))) }));
        dashboard_repo
            .expect_list_subscriptions_with_packages()
            .with(eq(1))
            .returning(|_| {
                Box::pin(async {
                    Ok(vec![
                        (
                            sample_subscription(30, SubscriptionStatus::Suspended, 1),
                            sample_package(2),
                        ),
                        (
                            sample_subscription(20, SubscriptionStatus::Inactive, 5),
                            sample_package(2),
                        ),
                    ])
                })
            });
        dashboard_repo
            .expect_list_customer_invoices()
            .returning(|_| Box::pin(async { Ok(vec![]) }));
        dashboard_repo
            .expect_list_customer_payments()
            .returning(|_| Box::pin(async { Ok(vec![]) }));

        let usecase = DashboardUseCase::new(Arc::new(dashboard_repo));
        let dashboard = usecase.client_dashboard(1).await.unwrap();

        assert_eq!(dashboard.active_subscription.unwrap().id, 30);
    }

    #[tokio::test]
    async fn missing_customer_is_not_found() {
        let mut dashboard_repo = MockDashboardRepository::new();
        dashboard_repo
            .expect_find_customer()
            .with(eq(404))
            .returning(|_| Box::pin(async { Ok(None) }));

        let usecase = DashboardUseCase::new(Arc::new(dashboard_repo));
        let result = usecase.client_dashboard(404).await;

        assert!(matches!(result, Err(DashboardError::CustomerNotFound)));
    }

    #[tokio::test]
    async fn no_subscriptions_yield_empty_slots() {
        let mut dashboard_repo = MockDashboardRepository::new();
        dashboard_repo
            .expect_find_customer()
            .with(eq(1))
            .returning(|_| Box::pin(async { Ok(Some(sample_customer(1))) }));
        dashboard_repo
            .expect_list_subscriptions_with_packages()
            .returning(|_| Box::pin(async { Ok(vec![]) }));
        dashboard_repo
            .expect_list_customer_invoices()
            .returning(|_| Box::pin(async { Ok(vec![]) }));
        dashboard_repo
            .expect_list_customer_payments()
            .returning(|_| Box::pin(async { Ok(vec![]) }));

        let usecase = DashboardUseCase::new(Arc::new(dashboard_repo));
        let dashboard = usecase.client_dashboard(1).await.unwrap();

        assert!(dashboard.active_subscription.is_none());
        assert!(dashboard.service_package.is_none());
        assert!(dashboard.invoices.is_empty());
        assert!(dashboard.payments.is_empty());
    }
}
