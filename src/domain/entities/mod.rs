pub mod customers;
pub mod invoices;
pub mod payments;
pub mod service_packages;
pub mod subscriptions;
