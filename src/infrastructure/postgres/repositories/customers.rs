use anyhow::Result;
use async_trait::async_trait;
use diesel::{Connection, OptionalExtension, RunQueryDsl, dsl::count_star, insert_into, prelude::*, update};
use std::sync::Arc;

use crate::{
    domain::{
        entities::customers::{CustomerEntity, InsertCustomerEntity, UpdateCustomerEntity},
        repositories::customers::CustomerRepository,
        value_objects::{
            customers::CustomerFilter,
            enums::{invoice_statuses::InvoiceStatus, subscription_statuses::SubscriptionStatus},
        },
    },
    infrastructure::postgres::{
        postgres_connection::PgPoolSquad,
        schema::{customer_subscriptions, customers, invoices, payments},
    },
};

pub struct CustomerPostgres {
    db_pool: Arc<PgPoolSquad>,
}

impl CustomerPostgres {
    pub fn new(db_pool: Arc<PgPoolSquad>) -> Self {
        Self { db_pool }
    }
}

#[async_trait]
impl CustomerRepository for CustomerPostgres {
    async fn create(&self, insert_customer_entity: InsertCustomerEntity) -> Result<CustomerEntity> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let customer = insert_into(customers::table)
            .values(&insert_customer_entity)
            .get_result::<CustomerEntity>(&mut conn)?;

        Ok(customer)
    }

    async fn list(&self, filter: CustomerFilter) -> Result<Vec<CustomerEntity>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let mut query = customers::table
            .select(CustomerEntity::as_select())
            .into_boxed();

        if let Some(status) = filter.status {
            query = query.filter(customers::status.eq(status.to_string()));
        }

        if let Some(search) = filter.search.filter(|term| !term.trim().is_empty()) {
            let pattern = format!("%{}%", search.trim());
            query = query.filter(
                customers::full_name
                    .ilike(pattern.clone())
                    .or(customers::email_address.ilike(pattern.clone()))
                    .or(customers::phone_number.ilike(pattern)),
            );
        }

        let rows = query
            .order(customers::created_at.desc())
            .load::<CustomerEntity>(&mut conn)?;

        Ok(rows)
    }

    async fn find_by_id(&self, customer_id: i32) -> Result<Option<CustomerEntity>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let customer = customers::table
            .filter(customers::id.eq(customer_id))
            .first::<CustomerEntity>(&mut conn)
            .optional()?;

        Ok(customer)
    }

    async fn update(
        &self,
        customer_id: i32,
        update_customer_entity: UpdateCustomerEntity,
    ) -> Result<Option<CustomerEntity>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let customer = update(customers::table.filter(customers::id.eq(customer_id)))
            .set(&update_customer_entity)
            .get_result::<CustomerEntity>(&mut conn)
            .optional()?;

        Ok(customer)
    }

    async fn count_active_subscriptions(&self, customer_id: i32) -> Result<i64> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let total = customer_subscriptions::table
            .filter(customer_subscriptions::customer_id.eq(customer_id))
            .filter(customer_subscriptions::status.eq(SubscriptionStatus::Active.to_string()))
            .select(count_star())
            .first::<i64>(&mut conn)?;

        Ok(total)
    }

    async fn count_unpaid_invoices(&self, customer_id: i32) -> Result<i64> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let total = invoices::table
            .filter(invoices::customer_id.eq(customer_id))
            .filter(invoices::status.eq(InvoiceStatus::Unpaid.to_string()))
            .select(count_star())
            .first::<i64>(&mut conn)?;

        Ok(total)
    }

    async fn delete_with_billing_history(&self, customer_id: i32) -> Result<()> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        conn.transaction::<_, diesel::result::Error, _>(|conn| {
            let invoice_ids = invoices::table
                .filter(invoices::customer_id.eq(customer_id))
                .select(invoices::id)
                .load::<i32>(conn)?;

            diesel::delete(payments::table.filter(payments::invoice_id.eq_any(invoice_ids)))
                .execute(conn)?;
            diesel::delete(invoices::table.filter(invoices::customer_id.eq(customer_id)))
                .execute(conn)?;
            diesel::delete(
                customer_subscriptions::table
                    .filter(customer_subscriptions::customer_id.eq(customer_id)),
            )
            .execute(conn)?;
            diesel::delete(customers::table.filter(customers::id.eq(customer_id))).execute(conn)?;

            Ok(())
        })?;

        Ok(())
    }
}
