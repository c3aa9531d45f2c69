//! Admin Dashboard Stats

use serde::{Deserialize, Serialize};

/// Aggregated store metrics for the admin dashboard.
///
/// `total_revenue` sums `total_amount` over delivered orders only.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdminStats {
    pub total_products: i64,
    pub total_orders: i64,
    pub total_customers: i64,
    pub total_agents: i64,
    pub total_revenue: f64,
}
