pub mod health;
pub mod metrics;
pub mod sale_order;
