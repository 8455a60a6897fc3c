// Integration tests for API endpoints and database-backed flows

pub mod database_flow_test;
