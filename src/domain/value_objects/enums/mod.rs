pub mod customer_statuses;
pub mod invoice_statuses;
pub mod payment_methods;
pub mod subscription_statuses;
