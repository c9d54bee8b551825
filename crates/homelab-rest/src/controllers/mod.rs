//! REST API controllers.

pub mod health_controller;
pub mod service_controller;
