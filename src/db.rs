pub mod billing_repo;
pub use billing_repo::BillingRepository;
pub mod finance_repo;
pub use finance_repo::FinanceRepository;
pub mod client_repo;
pub use client_repo::ClientRepository;
pub mod client_cache;
pub use client_cache::ClientDirectory;
