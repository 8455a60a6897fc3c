//! Gym membership backend: member onboarding, trainer matching and attendance
//! tracking behind an axum HTTP API.

pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod services;
