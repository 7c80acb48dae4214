#![doc = "The `taskdesk` library crate."]
#![doc = ""]
#![doc = "This crate contains the core business logic, domain models, authentication"]
#![doc = "and authorization mechanisms, routing configuration, and error handling for"]
#![doc = "the TaskDesk application. It is used by the main binary (`main.rs`) to"]
#![doc = "construct and run the application."]

pub mod auth;
pub mod config;
pub mod error;
pub mod models;
pub mod routes;
