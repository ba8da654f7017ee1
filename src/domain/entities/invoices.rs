use chrono::{DateTime, NaiveDate, Utc};
use diesel::prelude::*;
use rust_decimal::Decimal;

use crate::infrastructure::postgres::schema::invoices;

#[derive(Debug, Clone, Identifiable, Selectable, Queryable)]
#[diesel(table_name = invoices)]
pub struct InvoiceEntity {
    pub id: i32,
    pub invoice_number: String,
    pub customer_id: i32,
    pub subscription_id: i32,
    pub issue_date: NaiveDate,
    pub due_date: NaiveDate,
    pub service_period_start: NaiveDate,
    pub service_period_end: NaiveDate,
    pub service_details: String,
    pub total_amount: Decimal,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = invoices)]
pub struct InsertInvoiceEntity {
    pub invoice_number: String,
    pub customer_id: i32,
    pub subscription_id: i32,
    pub issue_date: NaiveDate,
    pub due_date: NaiveDate,
    pub service_period_start: NaiveDate,
    pub service_period_end: NaiveDate,
    pub service_details: String,
    pub total_amount: Decimal,
    pub status: String,
}
