use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::{
    entities::payments::{InsertPaymentEntity, PaymentEntity},
    value_objects::enums::payment_methods::PaymentMethod,
};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PaymentModel {
    pub id: i32,
    pub invoice_id: i32,
    pub payment_date: NaiveDate,
    pub payment_method: PaymentMethod,
    pub amount_paid: Decimal,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<PaymentEntity> for PaymentModel {
    fn from(value: PaymentEntity) -> Self {
        Self {
            id: value.id,
            invoice_id: value.invoice_id,
            payment_date: value.payment_date,
            payment_method: PaymentMethod::from_str(&value.payment_method)
                .unwrap_or(PaymentMethod::Cash),
            amount_paid: value.amount_paid,
            notes: value.notes,
            created_at: value.created_at,
            updated_at: value.updated_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CreatePaymentModel {
    pub invoice_id: i32,
    pub payment_date: NaiveDate,
    pub payment_method: PaymentMethod,
    pub amount_paid: Decimal,
    pub notes: Option<String>,
}

impl CreatePaymentModel {
    pub fn validate(&self) -> Result<(), String> {
        if self.amount_paid <= Decimal::ZERO {
            return Err("amount_paid must be positive".to_string());
        }
        Ok(())
    }

    pub fn into_entity(self) -> InsertPaymentEntity {
        InsertPaymentEntity {
            invoice_id: self.invoice_id,
            payment_date: self.payment_date,
            payment_method: self.payment_method.to_string(),
            amount_paid: self.amount_paid,
            notes: self.notes,
        }
    }
}
