//! gRPC clients for the Car24 backend services.
//!
//! [`connect`] turns a [`BackendConfig`] into the [`Backends`](car24_core::Backends)
//! bundle the gateway runs on. Calls go through the tonic clients generated
//! into `car24_core::proto`.

pub mod config;
pub mod connect;
pub mod grpc;
pub mod services;

pub use config::{BackendConfig, ServiceAddress};
pub use connect::connect;
pub use grpc::GrpcClient;
pub use services::{GrpcCrud, GrpcIdentity};
