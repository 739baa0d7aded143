//! Route modules for the proxied resources, one per backend entity.
//!
//! Each module holds six documented handlers delegating to [`super::crud`],
//! a `router()` and a `Doc` OpenAPI fragment merged into the main document.

macro_rules! resource_routes {
    (
        $module:ident: $marker:ty, tag = $tag:literal,
        collection = $collection:literal, item = $item:literal,
        entity = $entity:ty, create = $create:ty, update = $update:ty, list = $list:ty $(,)?
    ) => {
        pub mod $module {
            use std::sync::Arc;

            use axum::Router;
            use axum::extract::{Path, State};
            use axum::response::IntoResponse;
            use axum::routing::{get, post};

            use crate::dto::{Envelope, ErrorEnvelope, ListQuery, PatchBody};
            use crate::error::ApiError;
            use crate::extract::{JsonBody, QueryParams};
            use crate::routes::crud;
            use crate::state::AppState;

            use super::*;

            pub fn router() -> Router<Arc<AppState>> {
                Router::new()
                    .route($collection, post(create).get(get_list))
                    .route(
                        $item,
                        get(get_by_id).put(update).patch(update_patch).delete(delete),
                    )
            }

            #[derive(utoipa::OpenApi)]
            #[openapi(paths(create, get_by_id, get_list, update, update_patch, delete))]
            pub struct Doc;

            #[utoipa::path(
                post,
                path = $collection,
                operation_id = concat!("create_", $tag),
                request_body = $create,
                responses(
                    (status = 201, description = "Created", body = Envelope<$entity>),
                    (status = 400, description = "Malformed body", body = ErrorEnvelope),
                    (status = 500, description = "Backend failure", body = ErrorEnvelope),
                ),
                security((), ("bearer" = [])),
                tag = $tag
            )]
            pub async fn create(
                State(state): State<Arc<AppState>>,
                JsonBody(input): JsonBody<$create>,
            ) -> Result<impl IntoResponse, ApiError> {
                crud::create::<$marker>(&state, input).await
            }

            #[utoipa::path(
                get,
                path = $item,
                operation_id = concat!("get_", $tag),
                params(("id" = String, Path, description = "Record UUID")),
                responses(
                    (status = 200, description = "Record", body = Envelope<$entity>),
                    (status = 400, description = "Invalid id", body = ErrorEnvelope),
                    (status = 404, description = "No such record", body = ErrorEnvelope),
                ),
                security((), ("bearer" = [])),
                tag = $tag
            )]
            pub async fn get_by_id(
                State(state): State<Arc<AppState>>,
                Path(id): Path<String>,
            ) -> Result<impl IntoResponse, ApiError> {
                crud::get_by_id::<$marker>(&state, &id).await
            }

            #[utoipa::path(
                get,
                path = $collection,
                operation_id = concat!("list_", $tag),
                params(ListQuery),
                responses(
                    (status = 200, description = "One page of records", body = Envelope<$list>),
                    (status = 400, description = "Invalid pagination", body = ErrorEnvelope),
                ),
                security((), ("bearer" = [])),
                tag = $tag
            )]
            pub async fn get_list(
                State(state): State<Arc<AppState>>,
                QueryParams(query): QueryParams<ListQuery>,
            ) -> Result<impl IntoResponse, ApiError> {
                crud::get_list::<$marker>(&state, query).await
            }

            #[utoipa::path(
                put,
                path = $item,
                operation_id = concat!("update_", $tag),
                params(("id" = String, Path, description = "Record UUID, overrides any id in the body")),
                request_body = $update,
                responses(
                    (status = 200, description = "Updated record", body = Envelope<$entity>),
                    (status = 400, description = "Invalid id or body", body = ErrorEnvelope),
                    (status = 404, description = "No such record", body = ErrorEnvelope),
                ),
                security((), ("bearer" = [])),
                tag = $tag
            )]
            pub async fn update(
                State(state): State<Arc<AppState>>,
                Path(id): Path<String>,
                JsonBody(input): JsonBody<$update>,
            ) -> Result<impl IntoResponse, ApiError> {
                crud::update::<$marker>(&state, &id, input).await
            }

            #[utoipa::path(
                patch,
                path = $item,
                operation_id = concat!("patch_", $tag),
                params(("id" = String, Path, description = "Record UUID")),
                request_body = PatchBody,
                responses(
                    (status = 200, description = "Updated record", body = Envelope<$entity>),
                    (status = 400, description = "Invalid id or body", body = ErrorEnvelope),
                    (status = 404, description = "No such record", body = ErrorEnvelope),
                ),
                security((), ("bearer" = [])),
                tag = $tag
            )]
            pub async fn update_patch(
                State(state): State<Arc<AppState>>,
                Path(id): Path<String>,
                JsonBody(body): JsonBody<PatchBody>,
            ) -> Result<impl IntoResponse, ApiError> {
                crud::update_patch::<$marker>(&state, &id, body).await
            }

            #[utoipa::path(
                delete,
                path = $item,
                operation_id = concat!("delete_", $tag),
                params(("id" = String, Path, description = "Record UUID")),
                responses(
                    (status = 204, description = "Deleted"),
                    (status = 400, description = "Invalid id", body = ErrorEnvelope),
                    (status = 404, description = "No such record", body = ErrorEnvelope),
                ),
                security((), ("bearer" = [])),
                tag = $tag
            )]
            pub async fn delete(
                State(state): State<Arc<AppState>>,
                Path(id): Path<String>,
            ) -> Result<impl IntoResponse, ApiError> {
                crud::delete::<$marker>(&state, &id).await
            }
        }
    };
}

use car24_core::proto::client_service::{Client, CreateClient, GetListClientResponse, UpdateClient};
use car24_core::proto::order_service::{
    Car, CreateCar, CreateDiscount, CreateMechanic, CreateModel, CreateOrder, CreateTarif,
    Discount, GetListCarResponse, GetListDiscountResponse, GetListMechanicResponse,
    GetListModelResponse, GetListOrderResponse, GetListTarifResponse, Mechanic, Model, Order,
    Tarif, UpdateCar, UpdateDiscount, UpdateMechanic, UpdateModel, UpdateOrder, UpdateTarif,
};
use car24_core::resource::{Cars, Discounts, Mechanics, Models, Orders, Tarifs, Users};

resource_routes!(
    users: Users, tag = "user",
    collection = "/user", item = "/user/{id}",
    entity = Client, create = CreateClient, update = UpdateClient, list = GetListClientResponse,
);
resource_routes!(
    orders: Orders, tag = "order",
    collection = "/order", item = "/order/{id}",
    entity = Order, create = CreateOrder, update = UpdateOrder, list = GetListOrderResponse,
);
resource_routes!(
    cars: Cars, tag = "car",
    collection = "/car", item = "/car/{id}",
    entity = Car, create = CreateCar, update = UpdateCar, list = GetListCarResponse,
);
resource_routes!(
    discounts: Discounts, tag = "discount",
    collection = "/discount", item = "/discount/{id}",
    entity = Discount, create = CreateDiscount, update = UpdateDiscount,
    list = GetListDiscountResponse,
);
resource_routes!(
    mechanics: Mechanics, tag = "mechanic",
    collection = "/mechanic", item = "/mechanic/{id}",
    entity = Mechanic, create = CreateMechanic, update = UpdateMechanic,
    list = GetListMechanicResponse,
);
resource_routes!(
    models: Models, tag = "model",
    collection = "/model", item = "/model/{id}",
    entity = Model, create = CreateModel, update = UpdateModel, list = GetListModelResponse,
);
resource_routes!(
    tarifs: Tarifs, tag = "tarif",
    collection = "/tarif", item = "/tarif/{id}",
    entity = Tarif, create = CreateTarif, update = UpdateTarif, list = GetListTarifResponse,
);
