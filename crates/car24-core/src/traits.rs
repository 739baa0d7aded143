use std::sync::Arc;

use async_trait::async_trait;

use crate::error::AppError;
use crate::proto::client_service::{Client, ClientPhoneNumberReq, CreateOtp, OtpReceipt, VerifyOtp};
use crate::proto::common::{ListRequest, PatchRequest, PrimaryKey};
use crate::resource::{Cars, Discounts, Mechanics, Models, Orders, Resource, Tarifs, Users};

/// One-time code operations of the identity (client) service.
#[async_trait]
pub trait IdentityService: Send + Sync {
    /// Generate and dispatch a code for the phone number.
    async fn create_user_otp(&self, request: CreateOtp) -> Result<OtpReceipt, AppError>;

    /// Consume the code. Fails with an upstream `NotFound` when nothing matches.
    async fn verify_user_otp(&self, request: VerifyOtp) -> Result<(), AppError>;

    /// Look up the client registered under a phone number.
    /// Fails with an upstream `NotFound` when there is none.
    async fn check_user(&self, request: ClientPhoneNumberReq) -> Result<Client, AppError>;
}

/// The six calls every resource service exposes.
#[async_trait]
pub trait CrudService<R: Resource>: Send + Sync {
    async fn create(&self, input: R::Create) -> Result<R::Entity, AppError>;

    async fn get_by_id(&self, key: PrimaryKey) -> Result<R::Entity, AppError>;

    async fn get_list(&self, request: ListRequest) -> Result<R::List, AppError>;

    async fn update(&self, input: R::Update) -> Result<R::Entity, AppError>;

    async fn update_patch(&self, request: PatchRequest) -> Result<R::Entity, AppError>;

    async fn delete(&self, key: PrimaryKey) -> Result<(), AppError>;
}

/// Every backend capability the gateway consumes, established once at startup.
#[derive(Clone)]
pub struct Backends {
    pub identity: Arc<dyn IdentityService>,
    pub users: Arc<dyn CrudService<Users>>,
    pub orders: Arc<dyn CrudService<Orders>>,
    pub cars: Arc<dyn CrudService<Cars>>,
    pub discounts: Arc<dyn CrudService<Discounts>>,
    pub mechanics: Arc<dyn CrudService<Mechanics>>,
    pub models: Arc<dyn CrudService<Models>>,
    pub tarifs: Arc<dyn CrudService<Tarifs>>,
}

impl Backends {
    /// The service backing resource `R`.
    pub fn crud<R: Resource>(&self) -> &Arc<dyn CrudService<R>> {
        R::service(self)
    }
}
