pub mod dashboard_api;
