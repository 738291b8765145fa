pub mod abc;
pub mod billing;
pub mod filters;
pub mod finance;
pub mod ingest;
