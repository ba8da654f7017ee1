use anyhow::Result;
use async_trait::async_trait;
use chrono::Utc;
use diesel::{Connection, RunQueryDsl, insert_into, prelude::*, update};
use std::sync::Arc;

use crate::{
    domain::{
        entities::payments::{InsertPaymentEntity, PaymentEntity},
        repositories::payments::PaymentRepository,
        value_objects::enums::invoice_statuses::InvoiceStatus,
    },
    infrastructure::postgres::{
        postgres_connection::PgPoolSquad,
        schema::{invoices, payments},
    },
};

pub struct PaymentPostgres {
    db_pool: Arc<PgPoolSquad>,
}

impl PaymentPostgres {
    pub fn new(db_pool: Arc<PgPoolSquad>) -> Self {
        Self { db_pool }
    }
}

#[async_trait]
impl PaymentRepository for PaymentPostgres {
    async fn record_and_settle(
        &self,
        insert_payment_entity: InsertPaymentEntity,
    ) -> Result<Option<PaymentEntity>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let payment = conn.transaction::<_, diesel::result::Error, _>(|conn| {
            // The guard on status makes a lost race roll the whole unit back
            // instead of stacking a second settlement on a paid invoice.
            let settled = update(
                invoices::table
                    .filter(invoices::id.eq(insert_payment_entity.invoice_id))
                    .filter(invoices::status.ne(InvoiceStatus::Paid.to_string())),
            )
            .set((
                invoices::status.eq(InvoiceStatus::Paid.to_string()),
                invoices::updated_at.eq(Utc::now()),
            ))
            .execute(conn)?;

            if settled == 0 {
                return Ok(None);
            }

            let payment = insert_into(payments::table)
                .values(&insert_payment_entity)
                .get_result::<PaymentEntity>(conn)?;

            Ok(Some(payment))
        })?;

        Ok(payment)
    }

    async fn list(&self, customer_id: Option<i32>) -> Result<Vec<PaymentEntity>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let rows = match customer_id {
            Some(customer_id) => payments::table
                .inner_join(invoices::table.on(payments::invoice_id.eq(invoices::id)))
                .filter(invoices::customer_id.eq(customer_id))
                .select(PaymentEntity::as_select())
                .order(payments::created_at.desc())
                .load::<PaymentEntity>(&mut conn)?,
            None => payments::table
                .select(PaymentEntity::as_select())
                .order(payments::created_at.desc())
                .load::<PaymentEntity>(&mut conn)?,
        };

        Ok(rows)
    }
}
