//! Wire messages and generated clients for the backend gRPC services.
//!
//! Generated at build time from `proto/` at the repository root. Messages of
//! the `client_service` and `order_service` packages also derive serde and
//! utoipa so the gateway can bind and document them directly.

pub mod common {
    tonic::include_proto!("common");
}

pub mod client_service {
    tonic::include_proto!("client_service");
}

pub mod order_service {
    tonic::include_proto!("order_service");
}
