use anyhow::Result;
use async_trait::async_trait;
use mockall::automock;

use crate::domain::entities::subscriptions::{InsertSubscriptionEntity, SubscriptionEntity};

#[async_trait]
#[automock]
pub trait SubscriptionRepository {
    async fn create(
        &self,
        insert_subscription_entity: InsertSubscriptionEntity,
    ) -> Result<SubscriptionEntity>;
    async fn list(&self, customer_id: Option<i32>) -> Result<Vec<SubscriptionEntity>>;
    async fn find_by_id(&self, subscription_id: i32) -> Result<Option<SubscriptionEntity>>;
    async fn find_newest_active_by_customer(
        &self,
        customer_id: i32,
    ) -> Result<Option<SubscriptionEntity>>;
}
