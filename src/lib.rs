#![doc = "The `jobboard` library crate."]
#![doc = ""]
#![doc = "Companies post jobs, job seekers apply to them, and the posting company decides on"]
#![doc = "each application. This crate holds the domain models, access policy, storage,"]
#![doc = "services, authentication, routing and error handling. The binary (`main.rs`)"]
#![doc = "assembles them into an actix-web server."]

pub mod auth;
pub mod config;
pub mod error;
pub mod models;
pub mod policy;
pub mod routes;
pub mod services;
pub mod store;

// The App itself is assembled in main.rs and in the integration tests; returning a
// configured `App` from here runs into its unnameable service factory type.
