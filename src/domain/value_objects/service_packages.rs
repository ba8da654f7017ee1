use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::{
    entities::service_packages::{
        InsertServicePackageEntity, ServicePackageEntity, UpdateServicePackageEntity,
    },
    value_objects::customers::require_non_empty,
};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ServicePackageModel {
    pub id: i32,
    pub package_name: String,
    pub speed: String,
    pub monthly_price: Decimal,
    pub package_description: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<ServicePackageEntity> for ServicePackageModel {
    fn from(value: ServicePackageEntity) -> Self {
        Self {
            id: value.id,
            package_name: value.package_name,
            speed: value.speed,
            monthly_price: value.monthly_price,
            package_description: value.package_description,
            created_at: value.created_at,
            updated_at: value.updated_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CreateServicePackageModel {
    pub package_name: String,
    pub speed: String,
    pub monthly_price: Decimal,
    pub package_description: String,
}

impl CreateServicePackageModel {
    pub fn validate(&self) -> Result<(), String> {
        require_non_empty(&self.package_name, "package_name")?;
        require_non_empty(&self.speed, "speed")?;
        require_non_empty(&self.package_description, "package_description")?;
        require_positive_price(self.monthly_price)?;
        Ok(())
    }

    pub fn into_entity(self) -> InsertServicePackageEntity {
        InsertServicePackageEntity {
            package_name: self.package_name,
            speed: self.speed,
            monthly_price: self.monthly_price,
            package_description: self.package_description,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct UpdateServicePackageModel {
    pub package_name: Option<String>,
    pub speed: Option<String>,
    pub monthly_price: Option<Decimal>,
    pub package_description: Option<String>,
}

impl UpdateServicePackageModel {
    pub fn validate(&self) -> Result<(), String> {
        if let Some(package_name) = &self.package_name {
            require_non_empty(package_name, "package_name")?;
        }
        if let Some(speed) = &self.speed {
            require_non_empty(speed, "speed")?;
        }
        if let Some(package_description) = &self.package_description {
            require_non_empty(package_description, "package_description")?;
        }
        if let Some(monthly_price) = self.monthly_price {
            require_positive_price(monthly_price)?;
        }
        Ok(())
    }

    pub fn into_entity(self) -> UpdateServicePackageEntity {
        UpdateServicePackageEntity {
            package_name: self.package_name,
            speed: self.speed,
            monthly_price: self.monthly_price,
            package_description: self.package_description,
            updated_at: Utc::now(),
        }
    }
}

fn require_positive_price(value: Decimal) -> Result<(), String> {
    if value <= Decimal::ZERO {
        return Err("monthly_price must be positive".to_string());
    }
    Ok(())
}
