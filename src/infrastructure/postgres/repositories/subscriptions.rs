use anyhow::Result;
use async_trait::async_trait;
use diesel::{OptionalExtension, RunQueryDsl, insert_into, prelude::*};
use std::sync::Arc;

use crate::{
    domain::{
        entities::subscriptions::{InsertSubscriptionEntity, SubscriptionEntity},
        repositories::subscriptions::SubscriptionRepository,
        value_objects::enums::subscription_statuses::SubscriptionStatus,
    },
    infrastructure::postgres::{
        postgres_connection::PgPoolSquad, schema::customer_subscriptions,
    },
};

pub struct SubscriptionPostgres {
    db_pool: Arc<PgPoolSquad>,
}

impl SubscriptionPostgres {
    pub fn new(db_pool: Arc<PgPoolSquad>) -> Self {
        Self { db_pool }
    }
}

#[async_trait]
impl SubscriptionRepository for SubscriptionPostgres {
    async fn create(
        &self,
        insert_subscription_entity: InsertSubscriptionEntity,
    ) -> Result<SubscriptionEntity> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let subscription = insert_into(customer_subscriptions::table)
            .values(&insert_subscription_entity)
            .get_result::<SubscriptionEntity>(&mut conn)?;

        Ok(subscription)
    }

    async fn list(&self, customer_id: Option<i32>) -> Result<Vec<SubscriptionEntity>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let mut query = customer_subscriptions::table
            .select(SubscriptionEntity::as_select())
            .into_boxed();

        if let Some(customer_id) = customer_id {
            query = query.filter(customer_subscriptions::customer_id.eq(customer_id));
        }

        let rows = query
            .order(customer_subscriptions::created_at.desc())
            .load::<SubscriptionEntity>(&mut conn)?;

        Ok(rows)
    }

    async fn find_by_id(&self, subscription_id: i32) -> Result<Option<SubscriptionEntity>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let subscription = customer_subscriptions::table
            .filter(customer_subscriptions::id.eq(subscription_id))
            .first::<SubscriptionEntity>(&mut conn)
            .optional()?;

        Ok(subscription)
    }

    async fn find_newest_active_by_customer(
        &self,
        customer_id: i32,
    ) -> Result<Option<SubscriptionEntity>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let subscription = customer_subscriptions::table
            .filter(customer_subscriptions::customer_id.eq(customer_id))
            .filter(customer_subscriptions::status.eq(SubscriptionStatus::Active.to_string()))
            .order(customer_subscriptions::created_at.desc())
            .first::<SubscriptionEntity>(&mut conn)
            .optional()?;

        Ok(subscription)
    }
}
