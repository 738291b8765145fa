pub mod abc_curve;
pub mod consolidation;
pub mod filters;
pub mod finance_service;
pub mod title_aggregator;

pub use finance_service::FinanceService;
