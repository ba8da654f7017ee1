use chrono::{DateTime, NaiveDate, Utc};
use diesel::prelude::*;

use crate::infrastructure::postgres::schema::customer_subscriptions;

#[derive(Debug, Clone, Identifiable, Selectable, Queryable)]
#[diesel(table_name = customer_subscriptions)]
pub struct SubscriptionEntity {
    pub id: i32,
    pub customer_id: i32,
    pub package_id: i32,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = customer_subscriptions)]
pub struct InsertSubscriptionEntity {
    pub customer_id: i32,
    pub package_id: i32,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    pub status: String,
}
