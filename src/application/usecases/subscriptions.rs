use std::sync::Arc;

use thiserror::Error;
use tracing::{error, info, warn};

use crate::domain::{
    repositories::{
        customers::CustomerRepository, service_packages::ServicePackageRepository,
        subscriptions::SubscriptionRepository,
    },
    value_objects::subscriptions::{CreateSubscriptionModel, SubscriptionModel},
};

#[derive(Debug, Error)]
pub enum SubscriptionError {
    #[error("customer not found")]
    CustomerNotFound,
    #[error("service package not found")]
    PackageNotFound,
    #[error("invalid subscription input: {0}")]
    Invalid(String),
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl SubscriptionError {
    pub fn status_code(&self) -> axum::http::StatusCode {
        use axum::http::StatusCode;
        match self {
            SubscriptionError::CustomerNotFound | SubscriptionError::PackageNotFound => {
                StatusCode::NOT_FOUND
            }
            SubscriptionError::Invalid(_) => StatusCode::BAD_REQUEST,
            SubscriptionError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

pub type SubscriptionResult<T> = std::result::Result<T, SubscriptionError>;

pub struct SubscriptionUseCase<S, C, P>
where
    S: SubscriptionRepository + Send + Sync,
    C: CustomerRepository + Send + Sync,
    P: ServicePackageRepository + Send + Sync,
{
    subscription_repo: Arc<S>,
    customer_repo: Arc<C>,
    package_repo: Arc<P>,
}

impl<S, C, P> SubscriptionUseCase<S, C, P>
where
    S: SubscriptionRepository + Send + Sync,
    C: CustomerRepository + Send + Sync,
    P: ServicePackageRepository + Send + Sync,
{
    pub fn new(subscription_repo: Arc<S>, customer_repo: Arc<C>, package_repo: Arc<P>) -> Self {
        Self {
            subscription_repo,
            customer_repo,
            package_repo,
        }
    }

    pub async fn create(
        &self,
        create_subscription_model: CreateSubscriptionModel,
    ) -> SubscriptionResult<SubscriptionModel> {
        create_subscription_model
            .validate()
            .map_err(SubscriptionError::Invalid)?;

        let customer_id = create_subscription_model.customer_id;
        let package_id = create_subscription_model.package_id;

        self.customer_repo
            .find_by_id(customer_id)
            .await
            .map_err(|err| {
                error!(customer_id, db_error = ?err, "subscriptions: failed to load customer");
                SubscriptionError::Internal(err)
            })?
            .ok_or_else(|| {
                warn!(customer_id, "subscriptions: customer does not exist");
                SubscriptionError::CustomerNotFound
            })?;

        self.package_repo
            .find_by_id(package_id)
            .await
            .map_err(|err| {
                error!(package_id, db_error = ?err, "subscriptions: failed to load package");
                SubscriptionError::Internal(err)
            })?
            .ok_or_else(|| {
                warn!(package_id, "subscriptions: package does not exist");
                SubscriptionError::PackageNotFound
            })?;

        let subscription = self
            .subscription_repo
            .create(create_subscription_model.into_entity())
            .await
            .map_err(|err| {
                error!(
                    customer_id,
                    package_id,
                    db_error = ?err,
                    "subscriptions: failed to create subscription"
                );
                SubscriptionError::Internal(err)
            })?;

        info!(
            subscription_id = subscription.id,
            customer_id, package_id, "subscriptions: subscription created"
        );
        Ok(SubscriptionModel::from(subscription))
    }

    pub async fn list(
        &self,
        customer_id: Option<i32>,
    ) -> SubscriptionResult<Vec<SubscriptionModel>> {
        let subscriptions = self.subscription_repo.list(customer_id).await.map_err(|err| {
            error!(db_error = ?err, "subscriptions: failed to list subscriptions");
            SubscriptionError::Internal(err)
        })?;

        Ok(subscriptions
            .into_iter()
            .map(SubscriptionModel::from)
            .collect())
    }

    pub async fn active_for_customer(
        &self,
        customer_id: i32,
    ) -> SubscriptionResult<Option<SubscriptionModel>> {
        let subscription = self
            .subscription_repo
            .find_newest_active_by_customer(customer_id)
            .await
            .map_err(|err| {
                error!(customer_id, db_error = ?err, "subscriptions: failed to load active subscription");
                SubscriptionError::Internal(err)
            })?;

        Ok(subscription.map(SubscriptionModel::from))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, Utc};
    use mockall::predicate::eq;

    use crate::domain::{
        entities::{
            customers::CustomerEntity, service_packages::ServicePackageEntity,
            subscriptions::SubscriptionEntity,
        },
        repositories::{
            customers::MockCustomerRepository, service_packages::MockServicePackageRepository,
            subscriptions::MockSubscriptionRepository,
        },
        value_objects::enums::subscription_statuses::SubscriptionStatus,
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

    fn sample_subscription(id: i32, customer_id: i32, package_id: i32) -> SubscriptionEntity {
        let now = Utc::now();
        SubscriptionEntity {
            id,
            customer_id,
            package_id,
            start_date: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
            end_date: None,
            status: SubscriptionStatus::Active.to_string(),
            created_at: now,
            updated_at: now,
        }
    }

    fn sample_create_model(customer_id: i32, package_id: i32) -> CreateSubscriptionModel {
        CreateSubscriptionModel {
            customer_id,
            package_id,
            start_date: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
            end_date: None,
            status: SubscriptionStatus::Active,
        }
    }

    #[tokio::test]
    async fn create_fails_for_missing_customer() {
        let mut subscription_repo = MockSubscriptionRepository::new();
        subscription_repo.expect_create().never();
        let mut customer_repo = MockCustomerRepository::new();
        customer_repo
            .expect_find_by_id()
            .with(eq(1))
            .returning(|_| Box::pin(async { Ok(None) }));
        let package_repo = MockServicePackageRepository::new();

        let usecase = SubscriptionUseCase::new(
            Arc::new(subscription_repo),
            Arc::new(customer_repo),
            Arc::new(package_repo),
        );
        let result = usecase.create(sample_create_model(1, 2)).await;

        assert!(matches!(result, Err(SubscriptionError::CustomerNotFound)));
    }

    #[tokio::test]
    async fn create_fails_for_missing_package() {
        let mut subscription_repo = MockSubscriptionRepository::new();
        subscription_repo.expect_create().never();
        let mut customer_repo = MockCustomerRepository::new();
        customer_repo
            .expect_find_by_id()
            .with(eq(1))
            .returning(|_| Box::pin(async { Ok(Some(sample_customer(1))) }));
        let mut package_repo = MockServicePackageRepository::new();
        package_repo
            .expect_find_by_id()
            .with(eq(2))
            .returning(|_| Box::pin(async { Ok(None) }));

        let usecase = SubscriptionUseCase::new(
            Arc::new(subscription_repo),
            Arc::new(customer_repo),
            Arc::new(package_repo),
        );
        let result = usecase.create(sample_create_model(1, 2)).await;

        assert!(matches!(result, Err(SubscriptionError::PackageNotFound)));
    }

    #[tokio::test]
    async fn create_persists_when_references_exist() {
        let mut subscription_repo = MockSubscriptionRepository::new();
        subscription_repo
            .expect_create()
            .times(1)
            .returning(|entity| {
                Box::pin(async move {
                    Ok(sample_subscription(10, entity.customer_id, entity.package_id))
                })
            });
        let mut customer_repo = MockCustomerRepository::new();
        customer_repo
            .expect_find_by_id()
            .with(eq(1))
            .returning(|_| Box::pin(async { Ok(Some(sample_customer(1))) }));
        let mut package_repo = MockServicePackageRepository::new();
        package_repo
            .expect_find_by_id()
            .with(eq(2))
            .returning(|_| Box::pin(async { Ok(Some(sample_package(2))) }));

        let usecase = SubscriptionUseCase::new(
            Arc::new(subscription_repo),
            Arc::new(customer_repo),
            Arc::new(package_repo),
        );
        let subscription = usecase.create(sample_create_model(1, 2)).await.unwrap();

        assert_eq!(subscription.id, 10);
        assert_eq!(subscription.status, SubscriptionStatus::Active);
    }

    #[tokio::test]
    async fn rejects_end_date_before_start_date() {
        let subscription_repo = MockSubscriptionRepository::new();
        let customer_repo = MockCustomerRepository::new();
        let package_repo = MockServicePackageRepository::new();

        let usecase = SubscriptionUseCase::new(
            Arc::new(subscription_repo),
            Arc::new(customer_repo),
            Arc::new(package_repo),
        );

        let mut model = sample_create_model(1, 2);
        model.end_date = NaiveDate::from_ymd_opt(2024, 2, 1);
        let result = usecase.create(model).await;

        assert!(matches!(result, Err(SubscriptionError::Invalid(_))));
    }
}
