//! HTTP API Bindings
//!
//! Frontend bindings to the collections and logs services. A single
//! [`HttpApi`] built from the app config serves every page.

mod http;

pub use http::HttpApi;
