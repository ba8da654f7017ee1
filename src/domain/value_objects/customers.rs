use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::{
    entities::customers::{CustomerEntity, InsertCustomerEntity, UpdateCustomerEntity},
    value_objects::enums::customer_statuses::CustomerStatus,
};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CustomerModel {
    pub id: i32,
    pub full_name: String,
    pub full_address: String,
    pub phone_number: String,
    pub email_address: String,
    pub join_date: NaiveDate,
    pub status: CustomerStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<CustomerEntity> for CustomerModel {
    fn from(value: CustomerEntity) -> Self {
        Self {
            id: value.id,
            full_name: value.full_name,
            full_address: value.full_address,
            phone_number: value.phone_number,
            email_address: value.email_address,
            join_date: value.join_date,
            status: CustomerStatus::from_str(&value.status).unwrap_or_default(),
            created_at: value.created_at,
            updated_at: value.updated_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CreateCustomerModel {
    pub full_name: String,
    pub full_address: String,
    pub phone_number: String,
    pub email_address: String,
    pub join_date: NaiveDate,
    #[serde(default)]
    pub status: CustomerStatus,
}

impl CreateCustomerModel {
    pub fn validate(&self) -> Result<(), String> {
        require_non_empty(&self.full_name, "full_name")?;
        require_non_empty(&self.full_address, "full_address")?;
        require_non_empty(&self.phone_number, "phone_number")?;
        require_plausible_email(&self.email_address)?;
        Ok(())
    }

    pub fn into_entity(self) -> InsertCustomerEntity {
        InsertCustomerEntity {
            full_name: self.full_name,
            full_address: self.full_address,
            phone_number: self.phone_number,
            email_address: self.email_address,
            join_date: self.join_date,
            status: self.status.to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct UpdateCustomerModel {
    pub full_name: Option<String>,
    pub full_address: Option<String>,
    pub phone_number: Option<String>,
    pub email_address: Option<String>,
    pub join_date: Option<NaiveDate>,
    pub status: Option<CustomerStatus>,
}

impl UpdateCustomerModel {
    pub fn validate(&self) -> Result<(), String> {
        if let Some(full_name) = &self.full_name {
            require_non_empty(full_name, "full_name")?;
        }
        if let Some(full_address) = &self.full_address {
            require_non_empty(full_address, "full_address")?;
        }
        if let Some(phone_number) = &self.phone_number {
            require_non_empty(phone_number, "phone_number")?;
        }
        if let Some(email_address) = &self.email_address {
            require_plausible_email(email_address)?;
        }
        Ok(())
    }

    pub fn into_entity(self) -> UpdateCustomerEntity {
        UpdateCustomerEntity {
            full_name: self.full_name,
            full_address: self.full_address,
            phone_number: self.phone_number,
            email_address: self.email_address,
            join_date: self.join_date,
            status: self.status.map(|status| status.to_string()),
            updated_at: Utc::now(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct CustomerFilter {
    pub status: Option<CustomerStatus>,
    pub search: Option<String>,
}

pub fn require_non_empty(value: &str, field: &str) -> Result<(), String> {
    if value.trim().is_empty() {
        return Err(format!("{} must not be empty", field));
    }
    Ok(())
}

fn require_plausible_email(value: &str) -> Result<(), String> {
    let plausible = value
        .split_once('@')
        .is_some_and(|(local, domain)| !local.is_empty() && domain.contains('.'));
    if !plausible {
        return Err("email_address is not a valid email address".to_string());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_create() -> CreateCustomerModel {
        CreateCustomerModel {
            full_name: "John Carter".to_string(),
            full_address: "12 Elm Street".to_string(),
            phone_number: "0812345678".to_string(),
            email_address: "john@example.com".to_string(),
            join_date: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
            status: CustomerStatus::Active,
        }
    }

    #[test]
    fn accepts_valid_input() {
        assert!(sample_create().validate().is_ok());
    }

    #[test]
    fn rejects_blank_name() {
        let mut model = sample_create();
        model.full_name = "   ".to_string();
        assert!(model.validate().is_err());
    }

    #[test]
    fn rejects_mail_without_domain_dot() {
        let mut model = sample_create();
        model.email_address = "john@localhost".to_string();
        assert!(model.validate().is_err());
    }

    #[test]
    fn update_validates_only_provided_fields() {
        let model = UpdateCustomerModel {
            phone_number: Some("0899999999".to_string()),
            ..Default::default()
        };
        assert!(model.validate().is_ok());

        let model = UpdateCustomerModel {
            email_address: Some("not-an-email".to_string()),
            ..Default::default()
        };
        assert!(model.validate().is_err());
    }
}
