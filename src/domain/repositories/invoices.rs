use anyhow::Result;
use async_trait::async_trait;
use chrono::NaiveDate;
use mockall::automock;

use crate::domain::{
    entities::invoices::{InsertInvoiceEntity, InvoiceEntity},
    value_objects::{
        enums::invoice_statuses::InvoiceStatus,
        invoices::{BillingCandidate, InvoiceFilter},
    },
};

#[async_trait]
#[automock]
pub trait InvoiceRepository {
    async fn create(&self, insert_invoice_entity: InsertInvoiceEntity) -> Result<InvoiceEntity>;
    async fn list(&self, filter: InvoiceFilter) -> Result<Vec<InvoiceEntity>>;
    async fn find_by_id(&self, invoice_id: i32) -> Result<Option<InvoiceEntity>>;
    async fn update_status(
        &self,
        invoice_id: i32,
        status: InvoiceStatus,
    ) -> Result<Option<InvoiceEntity>>;
    /// Active subscriptions joined with their customer and package.
    async fn list_billing_candidates(&self) -> Result<Vec<BillingCandidate>>;
    /// Subscription ids holding an invoice whose service period starts in
    /// `[period_start, period_end)`.
    async fn subscription_ids_invoiced_between(
        &self,
        period_start: NaiveDate,
        period_end: NaiveDate,
    ) -> Result<Vec<i32>>;
}
