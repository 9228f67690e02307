//! # HTTP Bridge
//!
//! HTTP abstraction for the Drive integration core.
//!
//! ## Overview
//!
//! This crate provides:
//! - A runtime-agnostic `HttpClient` trait that upper layers consume
//! - Request/response types with builder helpers
//! - A pooled reqwest-backed implementation for native hosts
//!
//! Status interpretation deliberately lives above this layer: a non-2xx
//! response is returned as a normal `HttpResponse`, never as an error.
//! There is also no retry machinery here. A single failure is terminal
//! for the call that made it.

pub mod client;
pub mod error;
pub mod request;

pub use client::{HttpClient, ReqwestHttpClient};
pub use error::{HttpError, Result};
pub use request::{HttpMethod, HttpRequest, HttpResponse};
