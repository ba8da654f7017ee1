use anyhow::Result;
use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use diesel::{OptionalExtension, RunQueryDsl, insert_into, prelude::*, update};
use std::sync::Arc;

use crate::{
    domain::{
        entities::invoices::{InsertInvoiceEntity, InvoiceEntity},
        repositories::invoices::InvoiceRepository,
        value_objects::{
            enums::{invoice_statuses::InvoiceStatus, subscription_statuses::SubscriptionStatus},
            invoices::{BillingCandidate, InvoiceFilter},
        },
    },
    infrastructure::postgres::{
        postgres_connection::PgPoolSquad,
        schema::{customer_subscriptions, customers, invoices, service_packages},
    },
};

pub struct InvoicePostgres {
    db_pool: Arc<PgPoolSquad>,
}

impl InvoicePostgres {
    pub fn new(db_pool: Arc<PgPoolSquad>) -> Self {
        Self { db_pool }
    }
}

#[async_trait]
impl InvoiceRepository for InvoicePostgres {
    async fn create(&self, insert_invoice_entity: InsertInvoiceEntity) -> Result<InvoiceEntity> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let invoice = insert_into(invoices::table)
            .values(&insert_invoice_entity)
            .get_result::<InvoiceEntity>(&mut conn)?;

        Ok(invoice)
    }

    async fn list(&self, filter: InvoiceFilter) -> Result<Vec<InvoiceEntity>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let mut query = invoices::table
            .select(InvoiceEntity::as_select())
            .into_boxed();

        if let Some(status) = filter.status {
            query = query.filter(invoices::status.eq(status.to_string()));
        }
        if let Some(customer_id) = filter.customer_id {
            query = query.filter(invoices::customer_id.eq(customer_id));
        }
        if let Some(start_date) = filter.start_date {
            query = query.filter(invoices::issue_date.ge(start_date));
        }
        if let Some(end_date) = filter.end_date {
            query = query.filter(invoices::issue_date.le(end_date));
        }

        let rows = query
            .order(invoices::created_at.desc())
            .load::<InvoiceEntity>(&mut conn)?;

        Ok(rows)
    }

    async fn find_by_id(&self, invoice_id: i32) -> Result<Option<InvoiceEntity>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let invoice = invoices::table
            .filter(invoices::id.eq(invoice_id))
            .first::<InvoiceEntity>(&mut conn)
            .optional()?;

        Ok(invoice)
    }

    async fn update_status(
        &self,
        invoice_id: i32,
        status: InvoiceStatus,
    ) -> Result<Option<InvoiceEntity>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let invoice = update(invoices::table.filter(invoices::id.eq(invoice_id)))
            .set((
                invoices::status.eq(status.to_string()),
                invoices::updated_at.eq(Utc::now()),
            ))
            .get_result::<InvoiceEntity>(&mut conn)
            .optional()?;

        Ok(invoice)
    }

    async fn list_billing_candidates(&self) -> Result<Vec<BillingCandidate>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let rows = customer_subscriptions::table
            .inner_join(customers::table.on(customer_subscriptions::customer_id.eq(customers::id)))
            .inner_join(
                service_packages::table
                    .on(customer_subscriptions::package_id.eq(service_packages::id)),
            )
            .filter(customer_subscriptions::status.eq(SubscriptionStatus::Active.to_string()))
            .select((
                customer_subscriptions::id,
                customer_subscriptions::customer_id,
                service_packages::package_name,
                service_packages::package_description,
                service_packages::monthly_price,
            ))
            .load::<(i32, i32, String, String, rust_decimal::Decimal)>(&mut conn)?;

        Ok(rows
            .into_iter()
            .map(
                |(subscription_id, customer_id, package_name, package_description, monthly_price)| {
                    BillingCandidate {
                        subscription_id,
                        customer_id,
                        package_name,
                        package_description,
                        monthly_price,
                    }
                },
            )
            .collect())
    }

    async fn subscription_ids_invoiced_between(
        &self,
        period_start: NaiveDate,
        period_end: NaiveDate,
    ) -> Result<Vec<i32>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let subscription_ids = invoices::table
            .filter(invoices::service_period_start.ge(period_start))
            .filter(invoices::service_period_start.lt(period_end))
            .select(invoices::subscription_id)
            .load::<i32>(&mut conn)?;

        Ok(subscription_ids)
    }
}
