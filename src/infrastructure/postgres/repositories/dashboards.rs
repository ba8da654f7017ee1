use anyhow::Result;
use async_trait::async_trait;
use diesel::{OptionalExtension, RunQueryDsl, dsl::{count_star, sum}, prelude::*};
use rust_decimal::Decimal;
use std::sync::Arc;

use crate::{
    domain::{
        entities::{
            customers::CustomerEntity, invoices::InvoiceEntity, payments::PaymentEntity,
            service_packages::ServicePackageEntity, subscriptions::SubscriptionEntity,
        },
        repositories::dashboards::DashboardRepository,
        value_objects::enums::{
            customer_statuses::CustomerStatus, invoice_statuses::InvoiceStatus,
            subscription_statuses::SubscriptionStatus,
        },
    },
    infrastructure::postgres::{
        postgres_connection::PgPoolSquad,
        schema::{customer_subscriptions, customers, invoices, payments, service_packages},
    },
};

pub struct DashboardPostgres {
    db_pool: Arc<PgPoolSquad>,
}

impl DashboardPostgres {
    pub fn new(db_pool: Arc<PgPoolSquad>) -> Self {
        Self { db_pool }
    }
}

#[async_trait]
impl DashboardRepository for DashboardPostgres {
    async fn count_active_customers(&self) -> Result<i64> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let total = customers::table
            .filter(customers::status.eq(CustomerStatus::Active.to_string()))
            .select(count_star())
            .first::<i64>(&mut conn)?;

        Ok(total)
    }

    async fn count_unpaid_invoices(&self) -> Result<i64> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let total = invoices::table
            .filter(invoices::status.eq(InvoiceStatus::Unpaid.to_string()))
            .select(count_star())
            .first::<i64>(&mut conn)?;

        Ok(total)
    }

    async fn sum_active_subscription_prices(&self) -> Result<Decimal> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let total = customer_subscriptions::table
            .inner_join(
                service_packages::table
                    .on(customer_subscriptions::package_id.eq(service_packages::id)),
            )
            .filter(customer_subscriptions::status.eq(SubscriptionStatus::Active.to_string()))
            .select(sum(service_packages::monthly_price))
            .first::<Option<Decimal>>(&mut conn)?;

        Ok(total.unwrap_or(Decimal::ZERO))
    }

    async fn find_customer(&self, customer_id: i32) -> Result<Option<CustomerEntity>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let customer = customers::table
            .filter(customers::id.eq(customer_id))
            .first::<CustomerEntity>(&mut conn)
            .optional()?;

        Ok(customer)
    }

    async fn list_subscriptions_with_packages(
        &self,
        customer_id: i32,
    ) -> Result<Vec<(SubscriptionEntity, ServicePackageEntity)>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let rows = customer_subscriptions::table
            .inner_join(
                service_packages::table
                    .on(customer_subscriptions::package_id.eq(service_packages::id)),
            )
            .filter(customer_subscriptions::customer_id.eq(customer_id))
            .select((
                SubscriptionEntity::as_select(),
                ServicePackageEntity::as_select(),
            ))
            .order(customer_subscriptions::created_at.desc())
            .load::<(SubscriptionEntity, ServicePackageEntity)>(&mut conn)?;

        Ok(rows)
    }

    async fn list_customer_invoices(&self, customer_id: i32) -> Result<Vec<InvoiceEntity>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let rows = invoices::table
            .filter(invoices::customer_id.eq(customer_id))
            .select(InvoiceEntity::as_select())
            .order(invoices::created_at.desc())
            .load::<InvoiceEntity>(&mut conn)?;

        Ok(rows)
    }

    async fn list_customer_payments(&self, customer_id: i32) -> Result<Vec<PaymentEntity>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let rows = payments::table
            .inner_join(invoices::table.on(payments::invoice_id.eq(invoices::id)))
            .filter(invoices::customer_id.eq(customer_id))
            .select(PaymentEntity::as_select())
            .order(payments::created_at.desc())
            .load::<PaymentEntity>(&mut conn)?;

        Ok(rows)
    }
}
