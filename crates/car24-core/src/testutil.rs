//! Test utilities: mock implementations of the backend capability traits.
//!
//! Handwritten mocks for dependency injection in unit and integration tests.
//! All mocks use `Arc<Mutex<_>>` for interior mutability, allowing
//! test assertions on recorded calls.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::error::AppError;
use crate::proto::client_service::{Client, ClientPhoneNumberReq, CreateOtp, OtpReceipt, VerifyOtp};
use crate::proto::common::{ListRequest, PatchRequest, PrimaryKey};
use crate::resource::Resource;
use crate::traits::{Backends, CrudService, IdentityService};

// ---------------------------------------------------------------------------
// MockIdentity
// ---------------------------------------------------------------------------

/// Mock identity service with one configurable result per operation.
///
/// Unconfigured operations succeed with a default message.
#[derive(Clone, Default)]
pub struct MockIdentity {
    calls: Arc<Mutex<Vec<String>>>,
    create: Arc<Mutex<Option<Result<OtpReceipt, AppError>>>>,
    verify: Arc<Mutex<Option<Result<(), AppError>>>>,
    check: Arc<Mutex<Option<Result<Client, AppError>>>>,
}

impl MockIdentity {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_create(self, result: Result<OtpReceipt, AppError>) -> Self {
        *self.create.lock().unwrap() = Some(result);
        self
    }

    pub fn with_verify(self, result: Result<(), AppError>) -> Self {
        *self.verify.lock().unwrap() = Some(result);
        self
    }

    pub fn with_check(self, result: Result<Client, AppError>) -> Self {
        *self.check.lock().unwrap() = Some(result);
        self
    }

    /// Calls made so far, in order, as `operation:arguments` strings.
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: String) {
        self.calls.lock().unwrap().push(call);
    }
}

#[async_trait]
impl IdentityService for MockIdentity {
    async fn create_user_otp(&self, request: CreateOtp) -> Result<OtpReceipt, AppError> {
        self.record(format!("create_user_otp:{}", request.phone_number));
        self.create.lock().unwrap().take().unwrap_or_else(|| {
            Ok(OtpReceipt {
                phone_number: request.phone_number,
                ..Default::default()
            })
        })
    }

    async fn verify_user_otp(&self, request: VerifyOtp) -> Result<(), AppError> {
        self.record(format!(
            "verify_user_otp:{}:{}",
            request.phone_number, request.code
        ));
        self.verify.lock().unwrap().take().unwrap_or(Ok(()))
    }

    async fn check_user(&self, request: ClientPhoneNumberReq) -> Result<Client, AppError> {
        self.record(format!("check_user:{}", request.phone_number));
        self.check.lock().unwrap().take().unwrap_or_else(|| {
            Ok(Client {
                phone_number: request.phone_number,
                ..Default::default()
            })
        })
    }
}

// ---------------------------------------------------------------------------
// MockCrud
// ---------------------------------------------------------------------------

/// Mock CRUD service that records every call and the last request of each kind.
pub struct MockCrud<R: Resource> {
    calls: Arc<Mutex<Vec<String>>>,
    /// Queue for create/get/update/patch. Each call pops the first element.
    /// If empty, returns a default entity.
    entities: Arc<Mutex<Vec<Result<R::Entity, AppError>>>>,
    lists: Arc<Mutex<Vec<Result<R::List, AppError>>>>,
    pub last_update: Arc<Mutex<Option<R::Update>>>,
    pub last_patch: Arc<Mutex<Option<PatchRequest>>>,
    pub last_list: Arc<Mutex<Option<ListRequest>>>,
}

impl<R: Resource> Clone for MockCrud<R> {
    fn clone(&self) -> Self {
        Self {
            calls: self.calls.clone(),
            entities: self.entities.clone(),
            lists: self.lists.clone(),
            last_update: self.last_update.clone(),
            last_patch: self.last_patch.clone(),
            last_list: self.last_list.clone(),
        }
    }
}

impl<R: Resource> Default for MockCrud<R> {
    fn default() -> Self {
        Self {
            calls: Arc::new(Mutex::new(Vec::new())),
            entities: Arc::new(Mutex::new(Vec::new())),
            lists: Arc::new(Mutex::new(Vec::new())),
            last_update: Arc::new(Mutex::new(None)),
            last_patch: Arc::new(Mutex::new(None)),
            last_list: Arc::new(Mutex::new(None)),
        }
    }
}

impl<R: Resource> MockCrud<R> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entity(self, result: Result<R::Entity, AppError>) -> Self {
        self.entities.lock().unwrap().push(result);
        self
    }

    pub fn with_list(self, result: Result<R::List, AppError>) -> Self {
        self.lists.lock().unwrap().push(result);
        self
    }

    /// Calls made so far, in order, as `operation[:id]` strings.
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: String) {
        self.calls.lock().unwrap().push(call);
    }

    fn next_entity(&self) -> Result<R::Entity, AppError> {
        let mut entities = self.entities.lock().unwrap();
        if entities.is_empty() {
            Ok(R::Entity::default())
        } else {
            entities.remove(0)
        }
    }
}

#[async_trait]
impl<R: Resource> CrudService<R> for MockCrud<R> {
    async fn create(&self, _input: R::Create) -> Result<R::Entity, AppError> {
        self.record("create".to_string());
        self.next_entity()
    }

    async fn get_by_id(&self, key: PrimaryKey) -> Result<R::Entity, AppError> {
        self.record(format!("get_by_id:{}", key.id));
        self.next_entity()
    }

    async fn get_list(&self, request: ListRequest) -> Result<R::List, AppError> {
        self.record("get_list".to_string());
        *self.last_list.lock().unwrap() = Some(request);
        let mut lists = self.lists.lock().unwrap();
        if lists.is_empty() {
            Ok(R::List::default())
        } else {
            lists.remove(0)
        }
    }

    async fn update(&self, input: R::Update) -> Result<R::Entity, AppError> {
        self.record("update".to_string());
        *self.last_update.lock().unwrap() = Some(input);
        self.next_entity()
    }

    async fn update_patch(&self, request: PatchRequest) -> Result<R::Entity, AppError> {
        self.record(format!("update_patch:{}", request.id));
        *self.last_patch.lock().unwrap() = Some(request);
        self.next_entity()
    }

    async fn delete(&self, key: PrimaryKey) -> Result<(), AppError> {
        self.record(format!("delete:{}", key.id));
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// MockBackends
// ---------------------------------------------------------------------------

/// Handles to every mock behind a [`Backends`] value.
#[derive(Clone, Default)]
pub struct MockBackends {
    pub identity: MockIdentity,
    pub users: MockCrud<crate::resource::Users>,
    pub orders: MockCrud<crate::resource::Orders>,
    pub cars: MockCrud<crate::resource::Cars>,
    pub discounts: MockCrud<crate::resource::Discounts>,
    pub mechanics: MockCrud<crate::resource::Mechanics>,
    pub models: MockCrud<crate::resource::Models>,
    pub tarifs: MockCrud<crate::resource::Tarifs>,
}

impl MockBackends {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the trait-object view the gateway consumes; the mocks stay shared.
    pub fn backends(&self) -> Backends {
        Backends {
            identity: Arc::new(self.identity.clone()),
            users: Arc::new(self.users.clone()),
            orders: Arc::new(self.orders.clone()),
            cars: Arc::new(self.cars.clone()),
            discounts: Arc::new(self.discounts.clone()),
            mechanics: Arc::new(self.mechanics.clone()),
            models: Arc::new(self.models.clone()),
            tarifs: Arc::new(self.tarifs.clone()),
        }
    }

    /// Total number of calls made against any CRUD mock.
    pub fn crud_call_count(&self) -> usize {
        self.users.calls().len()
            + self.orders.calls().len()
            + self.cars.calls().len()
            + self.discounts.calls().len()
            + self.mechanics.calls().len()
            + self.models.calls().len()
            + self.tarifs.calls().len()
    }
}
