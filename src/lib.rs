//! Zoho Lead Intake API Library
//!
//! This library provides the core functionality for the form-to-CRM intake
//! service: configuration, error types, wire models, the Zoho API client,
//! and the HTTP handlers.
//!
//! # Modules
//!
//! - `config`: Configuration management.
//! - `errors`: Error handling types.
//! - `form_handler`: HTTP request handlers and router.
//! - `form_models`: Form submission and CRM payload models.
//! - `zoho_client`: Zoho accounts/CRM API client.

pub mod config;
pub mod errors;
pub mod form_handler;
pub mod form_models;
pub mod zoho_client;
