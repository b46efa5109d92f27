mod client;

pub use client::RestDashboardClient;
