//! HTTP gateway: routes, session middleware, envelope mapping and OpenAPI documentation.

pub mod auth;
pub mod config;
pub mod dto;
pub mod error;
pub mod extract;
pub mod openapi;
pub mod routes;
pub mod state;
