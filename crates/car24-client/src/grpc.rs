use std::time::{Duration, Instant};

use car24_core::{AppError, UpstreamKind};
use tonic::transport::{Channel, Endpoint};
use tonic::{Code, Request, Response, Status};

/// Unary gRPC caller over one shared, lazily connected channel.
///
/// Cloning is cheap: clones multiplex requests over the same connection.
#[derive(Clone)]
pub struct GrpcClient {
    channel: Channel,
    timeout: Duration,
}

impl GrpcClient {
    /// Create a client for `uri` without dialing; the first call connects.
    pub fn connect_lazy(uri: &str, timeout: Duration) -> Result<Self, AppError> {
        let endpoint = Endpoint::from_shared(uri.to_string())
            .map_err(|e| AppError::ConfigError(format!("Invalid backend address '{uri}': {e}")))?
            .connect_timeout(timeout)
            .timeout(timeout);

        Ok(Self {
            channel: endpoint.connect_lazy(),
            timeout,
        })
    }

    /// Handle to the shared channel, for constructing generated clients.
    pub fn channel(&self) -> Channel {
        self.channel.clone()
    }

    /// Wrap `message` in a request carrying the call deadline as `grpc-timeout`.
    pub fn request<T>(&self, message: T) -> Request<T> {
        let mut request = Request::new(message);
        request.set_timeout(self.timeout);
        request
    }

    /// Await a generated client call, logging its outcome and classifying failures.
    ///
    /// `method` is only used as a log label. Dropping the returned future
    /// cancels the call.
    pub async fn call<T>(
        &self,
        method: &'static str,
        call: impl Future<Output = Result<Response<T>, Status>>,
    ) -> Result<T, AppError> {
        let started = Instant::now();

        match call.await {
            Ok(response) => {
                tracing::debug!(
                    method,
                    elapsed_ms = started.elapsed().as_millis() as u64,
                    "Backend call succeeded"
                );
                Ok(response.into_inner())
            }
            Err(status) => {
                tracing::warn!(
                    method,
                    code = ?status.code(),
                    elapsed_ms = started.elapsed().as_millis() as u64,
                    "Backend call failed: {}",
                    status.message()
                );
                Err(status_to_error(status))
            }
        }
    }
}

/// Classify a gRPC status by its code. The message is kept verbatim.
pub fn status_to_error(status: Status) -> AppError {
    let kind = match status.code() {
        Code::Cancelled => UpstreamKind::Cancelled,
        Code::InvalidArgument | Code::OutOfRange => UpstreamKind::InvalidArgument,
        Code::DeadlineExceeded => UpstreamKind::DeadlineExceeded,
        Code::NotFound => UpstreamKind::NotFound,
        Code::AlreadyExists => UpstreamKind::AlreadyExists,
        Code::PermissionDenied => UpstreamKind::PermissionDenied,
        Code::ResourceExhausted => UpstreamKind::ResourceExhausted,
        Code::FailedPrecondition | Code::Aborted => UpstreamKind::FailedPrecondition,
        Code::Unimplemented => UpstreamKind::Unimplemented,
        Code::Unavailable => UpstreamKind::Unavailable,
        Code::Unauthenticated => UpstreamKind::Unauthenticated,
        Code::Internal | Code::DataLoss => UpstreamKind::Internal,
        Code::Ok | Code::Unknown => UpstreamKind::Unknown,
    };
    AppError::upstream(kind, status.message())
}
