pub mod customers;
pub mod dashboards;
pub mod enums;
pub mod invoices;
pub mod payments;
pub mod service_packages;
pub mod subscriptions;
