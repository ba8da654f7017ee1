use anyhow::Result;
use async_trait::async_trait;
use mockall::automock;
use rust_decimal::Decimal;

use crate::domain::entities::{
    customers::CustomerEntity, invoices::InvoiceEntity, payments::PaymentEntity,
    service_packages::ServicePackageEntity, subscriptions::SubscriptionEntity,
};

#[async_trait]
#[automock]
pub trait DashboardRepository {
    async fn count_active_customers(&self) -> Result<i64>;
    async fn count_unpaid_invoices(&self) -> Result<i64>;
    async fn sum_active_subscription_prices(&self) -> Result<Decimal>;
    async fn find_customer(&self, customer_id: i32) -> Result<Option<CustomerEntity>>;
    /// The customer's subscriptions joined with their packages, newest first.
    async fn list_subscriptions_with_packages(
        &self,
        customer_id: i32,
    ) -> Result<Vec<(SubscriptionEntity, ServicePackageEntity)>>;
    async fn list_customer_invoices(&self, customer_id: i32) -> Result<Vec<InvoiceEntity>>;
    async fn list_customer_payments(&self, customer_id: i32) -> Result<Vec<PaymentEntity>>;
}
