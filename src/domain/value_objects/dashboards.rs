use rust_decimal::Decimal;
use serde::Serialize;

use crate::domain::value_objects::{
    customers::CustomerModel, invoices::InvoiceModel, payments::PaymentModel,
    service_packages::ServicePackageModel, subscriptions::SubscriptionModel,
};

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct AdminStatsDto {
    pub total_active_customers: i64,
    pub total_unpaid_invoices: i64,
    pub estimated_monthly_revenue: Decimal,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ClientDashboardDto {
    pub customer: CustomerModel,
    pub active_subscription: Option<SubscriptionModel>,
    pub service_package: Option<ServicePackageModel>,
    pub invoices: Vec<InvoiceModel>,
    pub payments: Vec<PaymentModel>,
}
