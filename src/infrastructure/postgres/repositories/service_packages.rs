use anyhow::Result;
use async_trait::async_trait;
use diesel::{OptionalExtension, RunQueryDsl, dsl::count_star, insert_into, prelude::*, update};
use std::sync::Arc;

use crate::{
    domain::{
        entities::service_packages::{
            InsertServicePackageEntity, ServicePackageEntity, UpdateServicePackageEntity,
        },
        repositories::service_packages::ServicePackageRepository,
    },
    infrastructure::postgres::{
        postgres_connection::PgPoolSquad,
        schema::{customer_subscriptions, service_packages},
    },
};

pub struct ServicePackagePostgres {
    db_pool: Arc<PgPoolSquad>,
}

impl ServicePackagePostgres {
    pub fn new(db_pool: Arc<PgPoolSquad>) -> Self {
        Self { db_pool }
    }
}

#[async_trait]
impl ServicePackageRepository for ServicePackagePostgres {
    async fn create(
        &self,
        insert_service_package_entity: InsertServicePackageEntity,
    ) -> Result<ServicePackageEntity> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let package = insert_into(service_packages::table)
            .values(&insert_service_package_entity)
            .get_result::<ServicePackageEntity>(&mut conn)?;

        Ok(package)
    }

    async fn list_by_ascending_price(&self) -> Result<Vec<ServicePackageEntity>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let rows = service_packages::table
            .select(ServicePackageEntity::as_select())
            .order(service_packages::monthly_price.asc())
            .load::<ServicePackageEntity>(&mut conn)?;

        Ok(rows)
    }

    async fn find_by_id(&self, package_id: i32) -> Result<Option<ServicePackageEntity>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let package = service_packages::table
            .filter(service_packages::id.eq(package_id))
            .first::<ServicePackageEntity>(&mut conn)
            .optional()?;

        Ok(package)
    }

    async fn update(
        &self,
        package_id: i32,
        update_service_package_entity: UpdateServicePackageEntity,
    ) -> Result<Option<ServicePackageEntity>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let package = update(service_packages::table.filter(service_packages::id.eq(package_id)))
            .set(&update_service_package_entity)
            .get_result::<ServicePackageEntity>(&mut conn)
            .optional()?;

        Ok(package)
    }

    async fn count_referencing_subscriptions(&self, package_id: i32) -> Result<i64> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let total = customer_subscriptions::table
            .filter(customer_subscriptions::package_id.eq(package_id))
            .select(count_star())
            .first::<i64>(&mut conn)?;

        Ok(total)
    }

    async fn delete(&self, package_id: i32) -> Result<()> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        diesel::delete(service_packages::table.filter(service_packages::id.eq(package_id)))
            .execute(&mut conn)?;

        Ok(())
    }
}
