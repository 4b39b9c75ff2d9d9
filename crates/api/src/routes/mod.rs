pub mod data;
pub mod health;
