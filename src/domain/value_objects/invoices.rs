use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::{
    entities::invoices::InvoiceEntity,
    value_objects::{customers::require_non_empty, enums::invoice_statuses::InvoiceStatus},
};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct InvoiceModel {
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
    pub status: InvoiceStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<InvoiceEntity> for InvoiceModel {
    fn from(value: InvoiceEntity) -> Self {
        Self {
            id: value.id,
            invoice_number: value.invoice_number,
            customer_id: value.customer_id,
            subscription_id: value.subscription_id,
            issue_date: value.issue_date,
            due_date: value.due_date,
            service_period_start: value.service_period_start,
            service_period_end: value.service_period_end,
            service_details: value.service_details,
            total_amount: value.total_amount,
            status: InvoiceStatus::from_str(&value.status).unwrap_or_default(),
            created_at: value.created_at,
            updated_at: value.updated_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CreateInvoiceModel {
    pub customer_id: i32,
    pub subscription_id: i32,
    pub issue_date: NaiveDate,
    pub due_date: NaiveDate,
    pub service_period_start: NaiveDate,
    pub service_period_end: NaiveDate,
    pub service_details: String,
    pub total_amount: Decimal,
}

impl CreateInvoiceModel {
    pub fn validate(&self) -> Result<(), String> {
        require_non_empty(&self.service_details, "service_details")?;
        if self.total_amount <= Decimal::ZERO {
            return Err("total_amount must be positive".to_string());
        }
        if self.service_period_end < self.service_period_start {
            return Err("service_period_end must not precede service_period_start".to_string());
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UpdateInvoiceStatusModel {
    pub status: InvoiceStatus,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct InvoiceFilter {
    pub status: Option<InvoiceStatus>,
    pub customer_id: Option<i32>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

/// An active subscription joined with its customer and package, as fed into
/// the monthly generation run.
#[derive(Debug, Clone, PartialEq)]
pub struct BillingCandidate {
    pub subscription_id: i32,
    pub customer_id: i32,
    pub package_name: String,
    pub package_description: String,
    pub monthly_price: Decimal,
}
