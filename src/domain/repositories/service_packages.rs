use anyhow::Result;
use async_trait::async_trait;
use mockall::automock;

use crate::domain::entities::service_packages::{
    InsertServicePackageEntity, ServicePackageEntity, UpdateServicePackageEntity,
};

#[async_trait]
#[automock]
pub trait ServicePackageRepository {
    async fn create(
        &self,
        insert_service_package_entity: InsertServicePackageEntity,
    ) -> Result<ServicePackageEntity>;
    async fn list_by_ascending_price(&self) -> Result<Vec<ServicePackageEntity>>;
    async fn find_by_id(&self, package_id: i32) -> Result<Option<ServicePackageEntity>>;
    async fn update(
        &self,
        package_id: i32,
        update_service_package_entity: UpdateServicePackageEntity,
    ) -> Result<Option<ServicePackageEntity>>;
    async fn count_referencing_subscriptions(&self, package_id: i32) -> Result<i64>;
    async fn delete(&self, package_id: i32) -> Result<()>;
}
