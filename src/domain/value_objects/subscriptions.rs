use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::{
    entities::subscriptions::{InsertSubscriptionEntity, SubscriptionEntity},
    value_objects::enums::subscription_statuses::SubscriptionStatus,
};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SubscriptionModel {
    pub id: i32,
    pub customer_id: i32,
    pub package_id: i32,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    pub status: SubscriptionStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<SubscriptionEntity> for SubscriptionModel {
    fn from(value: SubscriptionEntity) -> Self {
        Self {
            id: value.id,
            customer_id: value.customer_id,
            package_id: value.package_id,
            start_date: value.start_date,
            end_date: value.end_date,
            status: SubscriptionStatus::from_str(&value.status).unwrap_or_default(),
            created_at: value.created_at,
            updated_at: value.updated_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CreateSubscriptionModel {
    pub customer_id: i32,
    pub package_id: i32,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    #[serde(default)]
    pub status: SubscriptionStatus,
}

impl CreateSubscriptionModel {
    pub fn validate(&self) -> Result<(), String> {
        if let Some(end_date) = self.end_date {
            if end_date < self.start_date {
                return Err("end_date must not precede start_date".to_string());
            }
        }
        Ok(())
    }

    pub fn into_entity(self) -> InsertSubscriptionEntity {
        InsertSubscriptionEntity {
            customer_id: self.customer_id,
            package_id: self.package_id,
            start_date: self.start_date,
            end_date: self.end_date,
            status: self.status.to_string(),
        }
    }
}
