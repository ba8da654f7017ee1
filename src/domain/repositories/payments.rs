use anyhow::Result;
use async_trait::async_trait;
use mockall::automock;

use crate::domain::entities::payments::{InsertPaymentEntity, PaymentEntity};

#[async_trait]
#[automock]
pub trait PaymentRepository {
    /// Inserts the payment and settles its invoice in one transaction.
    /// Returns `None` when the invoice was already paid at update time.
    async fn record_and_settle(
        &self,
        insert_payment_entity: InsertPaymentEntity,
    ) -> Result<Option<PaymentEntity>>;
    async fn list(&self, customer_id: Option<i32>) -> Result<Vec<PaymentEntity>>;
}
