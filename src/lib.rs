//! Lead Capture API Library
//!
//! A public form submits leads (name, email, phone, feedback); staff page
//! through them, mark them contacted, or delete them.
//!
//! # Modules
//!
//! - `config`: Configuration management.
//! - `db`: Database connection and pool management.
//! - `db_storage`: Postgres lead storage.
//! - `memory_store`: In-process lead storage.
//! - `store`: The `LeadStore` trait.
//! - `services`: Lead operations (create, list, update status, delete).
//! - `handlers`: HTTP request handlers.
//! - `routes`: Router assembly and middleware.
//! - `docs`: OpenAPI document.
//! - `models`: Lead and request/response models.
//! - `validation`: Field validation shared by server and client.
//! - `pagination`: Page/limit coercion.
//! - `errors`: Error handling types.
//! - `client`: HTTP client plus form and list-view state.

pub mod client;
pub mod config;
pub mod db;
pub mod db_storage;
pub mod docs;
pub mod errors;
pub mod handlers;
pub mod memory_store;
pub mod models;
pub mod pagination;
pub mod routes;
pub mod services;
pub mod store;
pub mod validation;
