pub mod config;
pub mod epiweek;
pub mod fetch;
pub mod metrics;
pub mod models;
pub mod output;
pub mod query;
pub mod views;
