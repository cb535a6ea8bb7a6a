#![doc = "The `taskpad` library crate."]
#![doc = ""]
#![doc = "Contains the domain models, JWT authentication core (token codec,"]
#![doc = "access guard, identity extraction), routing configuration, and error"]
#![doc = "handling for the Taskpad API. The binary in `main.rs` wires these"]
#![doc = "pieces together and runs the server."]

pub mod auth;
pub mod config;
pub mod error;
pub mod models;
pub mod response;
pub mod routes;
