use std::sync::Arc;

use thiserror::Error;
use tracing::{error, info, warn};

use crate::domain::{
    repositories::customers::CustomerRepository,
    value_objects::customers::{
        CreateCustomerModel, CustomerFilter, CustomerModel, UpdateCustomerModel,
    },
};

#[derive(Debug, Error)]
pub enum CustomerError {
    #[error("customer not found")]
    NotFound,
    #[error("invalid customer input: {0}")]
    Invalid(String),
    #[error("customer still has active subscriptions")]
    HasActiveSubscriptions,
    #[error("customer still has unpaid invoices")]
    HasUnpaidInvoices,
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl CustomerError {
    pub fn status_code(&self) -> axum::http::StatusCode {
        use axum::http::StatusCode;
        match self {
            CustomerError::NotFound => StatusCode::NOT_FOUND,
            CustomerError::Invalid(_) => StatusCode::BAD_REQUEST,
            CustomerError::HasActiveSubscriptions | CustomerError::HasUnpaidInvoices => {
                StatusCode::CONFLICT
            }
            CustomerError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

pub type CustomerResult<T> = std::result::Result<T, CustomerError>;

pub struct CustomerUseCase<T>
where
    T: CustomerRepository + Send + Sync,
{
    customer_repo: Arc<T>,
}

impl<T> CustomerUseCase<T>
where
    T: CustomerRepository + Send + Sync,
{
    pub fn new(customer_repo: Arc<T>) -> Self {
        Self { customer_repo }
    }

    pub async fn create(
        &self,
        create_customer_model: CreateCustomerModel,
    ) -> CustomerResult<CustomerModel> {
        create_customer_model
            .validate()
            .map_err(CustomerError::Invalid)?;

        let customer = self
            .customer_repo
            .create(create_customer_model.into_entity())
            .await
            .map_err(|err| {
                error!(db_error = ?err, "customers: failed to create customer");
                CustomerError::Internal(err)
            })?;

        info!(customer_id = customer.id, "customers: customer created");
        Ok(CustomerModel::from(customer))
    }

    pub async fn list(&self, filter: CustomerFilter) -> CustomerResult<Vec<CustomerModel>> {
        let customers = self.customer_repo.list(filter).await.map_err(|err| {
            error!(db_error = ?err, "customers: failed to list customers");
            CustomerError::Internal(err)
        })?;

        Ok(customers.into_iter().map(CustomerModel::from).collect())
    }

    pub async fn get_by_id(&self, customer_id: i32) -> CustomerResult<CustomerModel> {
        let customer = self
            .customer_repo
            .find_by_id(customer_id)
            .await
            .map_err(|err| {
                error!(customer_id, db_error = ?err, "customers: failed to load customer");
                CustomerError::Internal(err)
            })?
            .ok_or(CustomerError::NotFound)?;

        Ok(CustomerModel::from(customer))
    }

    pub async fn update(
        &self,
        customer_id: i32,
        update_customer_model: UpdateCustomerModel,
    ) -> CustomerResult<CustomerModel> {
        update_customer_model
            .validate()
            .map_err(CustomerError::Invalid)?;

        let customer = self
            .customer_repo
            .update(customer_id, update_customer_model.into_entity())
            .await
            .map_err(|err| {
                error!(customer_id, db_error = ?err, "customers: failed to update customer");
                CustomerError::Internal(err)
            })?
            .ok_or_else(|| {
                warn!(customer_id, "customers: update target not found");
                CustomerError::NotFound
            })?;

        info!(customer_id, "customers: customer updated");
        Ok(CustomerModel::from(customer))
    }

    /// Deletion guards run in order so each failure keeps its own error:
    /// the customer must exist, hold no active subscription, and hold no
    /// unpaid invoice before the cascade may run.
    pub async fn delete(&self, customer_id: i32) -> CustomerResult<()> {
        self.customer_repo
            .find_by_id(customer_id)
            .await
            .map_err(|err| {
                error!(customer_id, db_error = ?err, "customers: failed to load customer");
                CustomerError::Internal(err)
            })?
            .ok_or_else(|| {
                warn!(customer_id, "customers: delete target not found");
                CustomerError::NotFound
            })?;

        let active_subscriptions = self
            .customer_repo
            .count_active_subscriptions(customer_id)
            .await
            .map_err(|err| {
                error!(customer_id, db_error = ?err, "customers: failed to count subscriptions");
                CustomerError::Internal(err)
            })?;
        if active_subscriptions > 0 {
            warn!(
                customer_id,
                active_subscriptions, "customers: delete blocked by active subscriptions"
            );
            return Err(CustomerError::HasActiveSubscriptions);
        }

        let unpaid_invoices = self
            .customer_repo
            .count_unpaid_invoices(customer_id)
            .await
            .map_err(|err| {
                error!(customer_id, db_error = ?err, "customers: failed to count invoices");
                CustomerError::Internal(err)
            })?;
        if unpaid_invoices > 0 {
            warn!(
                customer_id,
                unpaid_invoices, "customers: delete blocked by unpaid invoices"
            );
            return Err(CustomerError::HasUnpaidInvoices);
        }

        self.customer_repo
            .delete_with_billing_history(customer_id)
            .await
            .map_err(|err| {
                error!(customer_id, db_error = ?err, "customers: cascade delete failed");
                CustomerError::Internal(err)
            })?;

        info!(customer_id, "customers: customer deleted with billing history");
        Ok(())
    }
}
