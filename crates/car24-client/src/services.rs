use std::marker::PhantomData;

use async_trait::async_trait;
use car24_core::proto::client_service::client_service_client::ClientServiceClient;
use car24_core::proto::client_service::{
    Client, ClientPhoneNumberReq, CreateOtp, OtpReceipt, VerifyOtp,
};
use car24_core::proto::common::{ListRequest, PatchRequest, PrimaryKey};
use car24_core::proto::order_service::car_service_client::CarServiceClient;
use car24_core::proto::order_service::discount_service_client::DiscountServiceClient;
use car24_core::proto::order_service::mechanic_service_client::MechanicServiceClient;
use car24_core::proto::order_service::model_service_client::ModelServiceClient;
use car24_core::proto::order_service::order_service_client::OrderServiceClient;
use car24_core::proto::order_service::tarif_service_client::TarifServiceClient;
use car24_core::resource::{Cars, Discounts, Mechanics, Models, Orders, Tarifs, Users};
use car24_core::{AppError, CrudService, IdentityService, Resource};

use crate::grpc::GrpcClient;

/// [`CrudService`] for resource `R` over its generated gRPC client.
pub struct GrpcCrud<R> {
    client: GrpcClient,
    _resource: PhantomData<fn() -> R>,
}

impl<R> GrpcCrud<R> {
    pub fn new(client: GrpcClient) -> Self {
        Self {
            client,
            _resource: PhantomData,
        }
    }
}

impl<R> Clone for GrpcCrud<R> {
    fn clone(&self) -> Self {
        Self::new(self.client.clone())
    }
}

/// Implements [`CrudService`] for `GrpcCrud<$resource>` on top of `$stub`.
macro_rules! grpc_crud {
    ($resource:ty, $stub:ident, $service:literal) => {
        #[async_trait]
        impl CrudService<$resource> for GrpcCrud<$resource> {
            async fn create(
                &self,
                input: <$resource as Resource>::Create,
            ) -> Result<<$resource as Resource>::Entity, AppError> {
                let mut stub = $stub::new(self.client.channel());
                self.client
                    .call(
                        concat!($service, "/Create"),
                        stub.create(self.client.request(input)),
                    )
                    .await
            }

            async fn get_by_id(
                &self,
                key: PrimaryKey,
            ) -> Result<<$resource as Resource>::Entity, AppError> {
                let mut stub = $stub::new(self.client.channel());
                self.client
                    .call(
                        concat!($service, "/GetByID"),
                        stub.get_by_id(self.client.request(key)),
                    )
                    .await
            }

            async fn get_list(
                &self,
                request: ListRequest,
            ) -> Result<<$resource as Resource>::List, AppError> {
                let mut stub = $stub::new(self.client.channel());
                self.client
                    .call(
                        concat!($service, "/GetList"),
                        stub.get_list(self.client.request(request)),
                    )
                    .await
            }

            async fn update(
                &self,
                input: <$resource as Resource>::Update,
            ) -> Result<<$resource as Resource>::Entity, AppError> {
                let mut stub = $stub::new(self.client.channel());
                self.client
                    .call(
                        concat!($service, "/Update"),
                        stub.update(self.client.request(input)),
                    )
                    .await
            }

            async fn update_patch(
                &self,
                request: PatchRequest,
            ) -> Result<<$resource as Resource>::Entity, AppError> {
                let mut stub = $stub::new(self.client.channel());
                self.client
                    .call(
                        concat!($service, "/UpdatePatch"),
                        stub.update_patch(self.client.request(request)),
                    )
                    .await
            }

            async fn delete(&self, key: PrimaryKey) -> Result<(), AppError> {
                let mut stub = $stub::new(self.client.channel());
                self.client
                    .call(
                        concat!($service, "/Delete"),
                        stub.delete(self.client.request(key)),
                    )
                    .await
            }
        }
    };
}

grpc_crud!(Users, ClientServiceClient, "client_service.ClientService");
grpc_crud!(Orders, OrderServiceClient, "order_service.OrderService");
grpc_crud!(Cars, CarServiceClient, "order_service.CarService");
grpc_crud!(Discounts, DiscountServiceClient, "order_service.DiscountService");
grpc_crud!(Mechanics, MechanicServiceClient, "order_service.MechanicService");
grpc_crud!(Models, ModelServiceClient, "order_service.ModelService");
grpc_crud!(Tarifs, TarifServiceClient, "order_service.TarifService");

/// One-time code and account lookup calls on the client service.
#[derive(Clone)]
pub struct GrpcIdentity {
    client: GrpcClient,
}

impl GrpcIdentity {
    pub fn new(client: GrpcClient) -> Self {
        Self { client }
    }

    fn stub(&self) -> ClientServiceClient<tonic::transport::Channel> {
        ClientServiceClient::new(self.client.channel())
    }
}

#[async_trait]
impl IdentityService for GrpcIdentity {
    async fn create_user_otp(&self, request: CreateOtp) -> Result<OtpReceipt, AppError> {
        let mut stub = self.stub();
        self.client
            .call(
                "client_service.ClientService/CreateUserOTP",
                stub.create_user_otp(self.client.request(request)),
            )
            .await
    }

    async fn verify_user_otp(&self, request: VerifyOtp) -> Result<(), AppError> {
        let mut stub = self.stub();
        self.client
            .call(
                "client_service.ClientService/VerifyUserOTP",
                stub.verify_user_otp(self.client.request(request)),
            )
            .await
    }

    async fn check_user(&self, request: ClientPhoneNumberReq) -> Result<Client, AppError> {
        let mut stub = self.stub();
        self.client
            .call(
                "client_service.ClientService/Check",
                stub.check(self.client.request(request)),
            )
            .await
    }
}
