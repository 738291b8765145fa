pub mod financeiro;
pub mod health;
