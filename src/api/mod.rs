// API routes and handlers

pub mod health;
pub mod routes;
pub mod members;
pub mod trainers;
pub mod match_requests;
pub mod attendance;
