pub mod health;
pub mod metrics;
pub mod pages;
pub mod race;
