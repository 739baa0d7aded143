//! Type-level description of the CRUD resources the gateway proxies.
//!
//! Each resource is an uninhabited marker type tying together its wire
//! messages, its path name and the backend service that owns it, so handlers
//! and clients can be written once and instantiated per resource.

use std::sync::Arc;

use prost::Message;
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::proto::client_service::{Client, CreateClient, GetListClientResponse, UpdateClient};
use crate::proto::order_service::{
    Car, CreateCar, CreateDiscount, CreateMechanic, CreateModel, CreateOrder, CreateTarif,
    Discount, GetListCarResponse, GetListDiscountResponse, GetListMechanicResponse,
    GetListModelResponse, GetListOrderResponse, GetListTarifResponse, Mechanic, Model, Order,
    Tarif, UpdateCar, UpdateDiscount, UpdateMechanic, UpdateModel, UpdateOrder, UpdateTarif,
};
use crate::traits::{Backends, CrudService};

pub trait Resource: Sized + Send + Sync + 'static {
    /// Singular name, used as the route segment and in error messages.
    const NAME: &'static str;

    type Entity: Message + Default + Serialize + Send + Sync + 'static;
    type Create: Message + Default + DeserializeOwned + Send + Sync + 'static;
    type Update: Message + Default + DeserializeOwned + Send + Sync + 'static;
    type List: Message + Default + Serialize + Send + Sync + 'static;

    /// Set the record id on an update message.
    fn assign_id(update: &mut Self::Update, id: String);

    fn service(backends: &Backends) -> &Arc<dyn CrudService<Self>>;
}

macro_rules! resource {
    (
        $(#[$meta:meta])*
        $marker:ident, $name:literal, $field:ident,
        $entity:ty, $create:ty, $update:ty, $list:ty
    ) => {
        $(#[$meta])*
        #[derive(Debug)]
        pub enum $marker {}

        impl Resource for $marker {
            const NAME: &'static str = $name;

            type Entity = $entity;
            type Create = $create;
            type Update = $update;
            type List = $list;

            fn assign_id(update: &mut Self::Update, id: String) {
                update.id = id;
            }

            fn service(backends: &Backends) -> &Arc<dyn CrudService<Self>> {
                &backends.$field
            }
        }
    };
}

resource!(
    /// Registered clients of the identity service.
    Users, "user", users,
    Client, CreateClient, UpdateClient, GetListClientResponse
);
resource!(Orders, "order", orders, Order, CreateOrder, UpdateOrder, GetListOrderResponse);
resource!(Cars, "car", cars, Car, CreateCar, UpdateCar, GetListCarResponse);
resource!(
    Discounts, "discount", discounts,
    Discount, CreateDiscount, UpdateDiscount, GetListDiscountResponse
);
resource!(
    Mechanics, "mechanic", mechanics,
    Mechanic, CreateMechanic, UpdateMechanic, GetListMechanicResponse
);
resource!(Models, "model", models, Model, CreateModel, UpdateModel, GetListModelResponse);
resource!(Tarifs, "tarif", tarifs, Tarif, CreateTarif, UpdateTarif, GetListTarifResponse);
