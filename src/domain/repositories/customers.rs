use anyhow::Result;
use async_trait::async_trait;
use mockall::automock;

use crate::domain::{
    entities::customers::{CustomerEntity, InsertCustomerEntity, UpdateCustomerEntity},
    value_objects::customers::CustomerFilter,
};

#[async_trait]
#[automock]
pub trait CustomerRepository {
    async fn create(&self, insert_customer_entity: InsertCustomerEntity) -> Result<CustomerEntity>;
    async fn list(&self, filter: CustomerFilter) -> Result<Vec<CustomerEntity>>;
    async fn find_by_id(&self, customer_id: i32) -> Result<Option<CustomerEntity>>;
    async fn update(
        &self,
        customer_id: i32,
        update_customer_entity: UpdateCustomerEntity,
    ) -> Result<Option<CustomerEntity>>;
    async fn count_active_subscriptions(&self, customer_id: i32) -> Result<i64>;
    async fn count_unpaid_invoices(&self, customer_id: i32) -> Result<i64>;
    async fn delete_with_billing_history(&self, customer_id: i32) -> Result<()>;
}
