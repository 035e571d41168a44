pub mod health;
pub mod sales;
pub mod schedule;
pub mod upload;
