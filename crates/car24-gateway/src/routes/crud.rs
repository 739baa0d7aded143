//! Generic bodies of the six resource handlers.
//!
//! Every operation validates its input, forwards exactly one call to the
//! resource's backend service and wraps the result in the envelope.

use axum::Json;
use axum::http::StatusCode;

use car24_core::{CrudService, Resource};
use car24_core::patch::json_to_struct;
use car24_core::proto::common::{ListRequest, PatchRequest, PrimaryKey};
use car24_core::validation::{Pagination, parse_id};

use crate::dto::{Envelope, ListQuery, PatchBody};
use crate::error::ApiError;
use crate::state::AppState;

pub async fn create<R: Resource>(
    state: &AppState,
    input: R::Create,
) -> Result<(StatusCode, Json<Envelope<R::Entity>>), ApiError> {
    let entity = state.backends.crud::<R>().create(input).await?;
    Ok((StatusCode::CREATED, Json(Envelope::created(entity))))
}

pub async fn get_by_id<R: Resource>(
    state: &AppState,
    raw_id: &str,
) -> Result<Json<Envelope<R::Entity>>, ApiError> {
    let key = primary_key::<R>(raw_id)?;
    let entity = state.backends.crud::<R>().get_by_id(key).await?;
    Ok(Json(Envelope::ok(entity)))
}

pub async fn get_list<R: Resource>(
    state: &AppState,
    query: ListQuery,
) -> Result<Json<Envelope<R::List>>, ApiError> {
    let page = Pagination::parse(query.offset.as_deref(), query.limit.as_deref())?;
    let request = ListRequest {
        offset: i64::from(page.offset),
        limit: i64::from(page.limit),
        search: query.search.unwrap_or_default(),
    };
    let list = state.backends.crud::<R>().get_list(request).await?;
    Ok(Json(Envelope::ok(list)))
}

/// The path id replaces whatever id the body carried.
pub async fn update<R: Resource>(
    state: &AppState,
    raw_id: &str,
    mut input: R::Update,
) -> Result<Json<Envelope<R::Entity>>, ApiError> {
    let key = primary_key::<R>(raw_id)?;
    R::assign_id(&mut input, key.id);
    let entity = state.backends.crud::<R>().update(input).await?;
    Ok(Json(Envelope::ok(entity)))
}

pub async fn update_patch<R: Resource>(
    state: &AppState,
    raw_id: &str,
    body: PatchBody,
) -> Result<Json<Envelope<R::Entity>>, ApiError> {
    let key = primary_key::<R>(raw_id)?;
    let fields = json_to_struct(body.data)?;
    let request = PatchRequest {
        id: key.id,
        fields: Some(fields),
    };
    let entity = state.backends.crud::<R>().update_patch(request).await?;
    Ok(Json(Envelope::ok(entity)))
}

pub async fn delete<R: Resource>(state: &AppState, raw_id: &str) -> Result<StatusCode, ApiError> {
    let key = primary_key::<R>(raw_id)?;
    state.backends.crud::<R>().delete(key).await?;
    Ok(StatusCode::NO_CONTENT)
}

fn primary_key<R: Resource>(raw_id: &str) -> Result<PrimaryKey, ApiError> {
    let id = parse_id(raw_id, R::NAME)?;
    Ok(PrimaryKey { id: id.to_string() })
}
