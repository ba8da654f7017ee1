use chrono::{DateTime, Utc};
use diesel::prelude::*;
use rust_decimal::Decimal;

use crate::infrastructure::postgres::schema::service_packages;

#[derive(Debug, Clone, Identifiable, Selectable, Queryable)]
#[diesel(table_name = service_packages)]
pub struct ServicePackageEntity {
    pub id: i32,
    pub package_name: String,
    pub speed: String,
    pub monthly_price: Decimal,
    pub package_description: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = service_packages)]
pub struct InsertServicePackageEntity {
    pub package_name: String,
    pub speed: String,
    pub monthly_price: Decimal,
    pub package_description: String,
}

#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = service_packages)]
pub struct UpdateServicePackageEntity {
    pub package_name: Option<String>,
    pub speed: Option<String>,
    pub monthly_price: Option<Decimal>,
    pub package_description: Option<String>,
    pub updated_at: DateTime<Utc>,
}
