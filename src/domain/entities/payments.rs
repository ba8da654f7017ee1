use chrono::{DateTime, NaiveDate, Utc};
use diesel::prelude::*;
use rust_decimal::Decimal;

use crate::infrastructure::postgres::schema::payments;

#[derive(Debug, Clone, Identifiable, Selectable, Queryable)]
#[diesel(table_name = payments)]
pub struct PaymentEntity {
    pub id: i32,
    pub invoice_id: i32,
    pub payment_date: NaiveDate,
    pub payment_method: String,
    pub amount_paid: Decimal,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = payments)]
pub struct InsertPaymentEntity {
    pub invoice_id: i32,
    pub payment_date: NaiveDate,
    pub payment_method: String,
    pub amount_paid: Decimal,
    pub notes: Option<String>,
}
