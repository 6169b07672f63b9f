pub mod billing;
pub mod health;
pub mod revenue;
