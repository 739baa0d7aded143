use std::sync::Arc;

use car24_core::resource::{Cars, Discounts, Mechanics, Models, Orders, Tarifs, Users};
use car24_core::{AppError, Backends};

use crate::config::BackendConfig;
use crate::grpc::GrpcClient;
use crate::services::{GrpcCrud, GrpcIdentity};

/// Build every backend client from `config`.
///
/// Channels connect lazily: an unreachable service surfaces as an upstream
/// `Unavailable` error on its first call rather than failing startup.
/// One channel per service is shared by all of its resources.
pub fn connect(config: &BackendConfig) -> Result<Backends, AppError> {
    let users = GrpcClient::connect_lazy(&config.user_service.uri(), config.timeout)?;
    let orders = GrpcClient::connect_lazy(&config.order_service.uri(), config.timeout)?;

    tracing::info!(
        user_service = %config.user_service.uri(),
        order_service = %config.order_service.uri(),
        timeout_secs = config.timeout.as_secs(),
        "Backend clients configured"
    );

    Ok(Backends {
        identity: Arc::new(GrpcIdentity::new(users.clone())),
        users: Arc::new(GrpcCrud::<Users>::new(users)),
        orders: Arc::new(GrpcCrud::<Orders>::new(orders.clone())),
        cars: Arc::new(GrpcCrud::<Cars>::new(orders.clone())),
        discounts: Arc::new(GrpcCrud::<Discounts>::new(orders.clone())),
        mechanics: Arc::new(GrpcCrud::<Mechanics>::new(orders.clone())),
        models: Arc::new(GrpcCrud::<Models>::new(orders.clone())),
        tarifs: Arc::new(GrpcCrud::<Tarifs>::new(orders)),
    })
}
