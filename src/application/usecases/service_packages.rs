use std::sync::Arc;

use thiserror::Error;
use tracing::{error, info, warn};

use crate::domain::{
    repositories::service_packages::ServicePackageRepository,
    value_objects::service_packages::{
        CreateServicePackageModel, ServicePackageModel, UpdateServicePackageModel,
    },
};

#[derive(Debug, Error)]
pub enum ServicePackageError {
    #[error("service package not found")]
    NotFound,
    #[error("invalid service package input: {0}")]
    Invalid(String),
    #[error("service package is still referenced by subscriptions")]
    ReferencedBySubscriptions,
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl ServicePackageError {
    pub fn status_code(&self) -> axum::http::StatusCode {
        use axum::http::StatusCode;
        match self {
            ServicePackageError::NotFound => StatusCode::NOT_FOUND,
            ServicePackageError::Invalid(_) => StatusCode::BAD_REQUEST,
            ServicePackageError::ReferencedBySubscriptions => StatusCode::CONFLICT,
            ServicePackageError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

pub type ServicePackageResult<T> = std::result::Result<T, ServicePackageError>;

pub struct ServicePackageUseCase<T>
where
    T: ServicePackageRepository + Send + Sync,
{
    package_repo: Arc<T>,
}

impl<T> ServicePackageUseCase<T>
where
    T: ServicePackageRepository + Send + Sync,
{
    pub fn new(package_repo: Arc<T>) -> Self {
        Self { package_repo }
    }

    pub async fn create(
        &self,
        create_service_package_model: CreateServicePackageModel,
    ) -> ServicePackageResult<ServicePackageModel> {
        create_service_package_model
            .validate()
            .map_err(ServicePackageError::Invalid)?;

        let package = self
            .package_repo
            .create(create_service_package_model.into_entity())
            .await
            .map_err(|err| {
                error!(db_error = ?err, "service_packages: failed to create package");
                ServicePackageError::Internal(err)
            })?;

        info!(package_id = package.id, "service_packages: package created");
        Ok(ServicePackageModel::from(package))
    }

    pub async fn list(&self) -> ServicePackageResult<Vec<ServicePackageModel>> {
        let packages = self
            .package_repo
            .list_by_ascending_price()
            .await
            .map_err(|err| {
                error!(db_error = ?err, "service_packages: failed to list packages");
                ServicePackageError::Internal(err)
            })?;

        Ok(packages
            .into_iter()
            .map(ServicePackageModel::from)
            .collect())
    }

    pub async fn get_by_id(&self, package_id: i32) -> ServicePackageResult<ServicePackageModel> {
        let package = self
            .package_repo
            .find_by_id(package_id)
            .await
            .map_err(|err| {
                error!(package_id, db_error = ?err, "service_packages: failed to load package");
                ServicePackageError::Internal(err)
            })?
            .ok_or(ServicePackageError::NotFound)?;

        Ok(ServicePackageModel::from(package))
    }

    pub async fn update(
        &self,
        package_id: i32,
        update_service_package_model: UpdateServicePackageModel,
    ) -> ServicePackageResult<ServicePackageModel> {
        update_service_package_model
            .validate()
            .map_err(ServicePackageError::Invalid)?;

        let package = self
            .package_repo
            .update(package_id, update_service_package_model.into_entity())
            .await
            .map_err(|err| {
                error!(package_id, db_error = ?err, "service_packages: failed to update package");
                ServicePackageError::Internal(err)
            })?
            .ok_or_else(|| {
                warn!(package_id, "service_packages: update target not found");
                ServicePackageError::NotFound
            })?;

        info!(package_id, "service_packages: package updated");
        Ok(ServicePackageModel::from(package))
    }

    /// Any referencing subscription blocks deletion, whatever its status.
    pub async fn delete(&self, package_id: i32) -> ServicePackageResult<()> {
        self.package_repo
            .find_by_id(package_id)
            .await
            .map_err(|err| {
                error!(package_id, db_error = ?err, "service_packages: failed to load package");
                ServicePackageError::Internal(err)
            })?
            .ok_or_else(|| {
                warn!(package_id, "service_packages: delete target not found");
                ServicePackageError::NotFound
            })?;

        let referencing = self
            .package_repo
            .count_referencing_subscriptions(package_id)
            .await
            .map_err(|err| {
                error!(package_id, db_error = ?err, "service_packages: failed to count references");
                ServicePackageError::Internal(err)
            })?;
        if referencing > 0 {
            warn!(
                package_id,
                referencing, "service_packages: delete blocked by subscriptions"
            );
            return Err(ServicePackageError::ReferencedBySubscriptions);
        }

        self.package_repo.delete(package_id).await.map_err(|err| {
            error!(package_id, db_error = ?err, "service_packages: delete failed");
            ServicePackageError::Internal(err)
        })?;

        info!(package_id, "service_packages: package deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use mockall::predicate::eq;
    use rust_decimal::Decimal;

    use crate::domain::{
        entities::service_packages::ServicePackageEntity,
        repositories::service_packages::MockServicePackageRepository,
    };

    fn sample_package(id: i32) -> ServicePackageEntity {
        let now = Utc::now();
        ServicePackageEntity {
            id,
            package_name: "Fiber 100".to_string(),
            speed: "100 Mbps".to_string(),
            monthly_price: "29.99".parse::<Decimal>().unwrap(),
            package_description: "Home fiber".to_string(),
            created_at: now,
            updated_at: now,
        }
    }

    #[tokio::test]
    async fn delete_blocked_while_any_subscription_references_package() {
        let mut package_repo = MockServicePackageRepository::new();
        package_repo
            .expect_find_by_id()
            .with(eq(3))
            .returning(|_| Box::pin(async { Ok(Some(sample_package(3))) }));
        // An inactive subscription still counts as a reference.
        package_repo
            .expect_count_referencing_subscriptions()
            .with(eq(3))
            .returning(|_| Box::pin(async { Ok(1) }));
        package_repo.expect_delete().never();

        let usecase = ServicePackageUseCase::new(Arc::new(package_repo));
        let result = usecase.delete(3).await;

        assert!(matches!(
            result,
            Err(ServicePackageError::ReferencedBySubscriptions)
        ));
    }

    #[tokio::test]
    async fn delete_succeeds_without_references() {
        let mut package_repo = MockServicePackageRepository::new();
        package_repo
            .expect_find_by_id()
            .with(eq(3))
            .returning(|_| Box::pin(async { Ok(Some(sample_package(3))) }));
        package_repo
            .expect_count_referencing_subscriptions()
            .with(eq(3))
            .returning(|_| Box::pin(async { Ok(0) }));
        package_repo
            .expect_delete()
            .with(eq(3))
            .times(1)
            .returning(|_| Box::pin(async { Ok(()) }));

        let usecase = ServicePackageUseCase::new(Arc::new(package_repo));
        assert!(usecase.delete(3).await.is_ok());
    }

    #[tokio::test]
    async fn create_rejects_zero_price() {
        let mut package_repo = MockServicePackageRepository::new();
        package_repo.expect_create().never();

        let usecase = ServicePackageUseCase::new(Arc::new(package_repo));
        let result = usecase
            .create(CreateServicePackageModel {
                package_name: "Fiber 100".to_string(),
                speed: "100 Mbps".to_string(),
                monthly_price: Decimal::ZERO,
                package_description: "Home fiber".to_string(),
            })
            .await;

        assert!(matches!(result, Err(ServicePackageError::Invalid(_))));
    }
}
