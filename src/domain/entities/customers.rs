use chrono::{DateTime, NaiveDate, Utc};
use diesel::prelude::*;

use crate::infrastructure::postgres::schema::customers;

#[derive(Debug, Clone, Identifiable, Selectable, Queryable)]
#[diesel(table_name = customers)]
pub struct CustomerEntity {
    pub id: i32,
    pub full_name: String,
    pub full_address: String,
    pub phone_number: String,
    pub email_address: String,
    pub join_date: NaiveDate,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = customers)]
pub struct InsertCustomerEntity {
    pub full_name: String,
    pub full_address: String,
    pub phone_number: String,
    pub email_address: String,
    pub join_date: NaiveDate,
    pub status: String,
}

// updated_at is not optional so even a no-field update bumps the timestamp.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = customers)]
pub struct UpdateCustomerEntity {
    pub full_name: Option<String>,
    pub full_address: Option<String>,
    pub phone_number: Option<String>,
    pub email_address: Option<String>,
    pub join_date: Option<NaiveDate>,
    pub status: Option<String>,
    pub updated_at: DateTime<Utc>,
}
