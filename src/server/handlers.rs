//! HTTP handlers (spec §6): thin adapters that parse a request into a use
//! case call and render its result. No handler touches a port directly —
//! every one goes through `application::*` against the shared [`Registry`].

use axum::extract::{Multipart, Path, State};
use axum::http::StatusCode;
use axum::Json;
use std::collections::HashSet;
use uuid::Uuid;

use crate::application::crud::collections::{
    CreateCollection, DeleteCollection, GetCollection, ListCollectionsForSubscription,
};
use crate::application::crud::queries::{GetQueryResult, GetQueryResultMetadata, InitiateSearch};
use crate::application::crud::resource_types::ListResourceTypes;
use crate::application::crud::resources::{
    DeleteResource, GetResource, ListResourcesForCollection, UploadResource,
};
use crate::application::crud::subscriptions::{
    CreateSubscription, DeleteSubscription, GetSubscription, ListSubscriptions,
};
use crate::domain::error::Error;
use crate::domain::types::{Collection, Resource, ResourceStatus, Subscription};
use crate::server::dto::*;
use crate::server::error::AppError;
use crate::server::state::AppState;

type JsonResult<T> = Result<Json<T>, AppError>;

// ---- Subscriptions ---------------------------------------------------

pub async fn create_subscription(
    State(state): State<AppState>,
    Json(body): Json<NewSubscription>,
) -> JsonResult<SubscriptionResponse> {
    let subscription = Subscription {
        id: Uuid::new_v4(),
        name: body.name,
        is_active: matches!(body.status, SubscriptionStatus::Active),
        resource_type_ids: body.resource_type_ids,
        collection_ids: HashSet::new(),
        organisation_id: None,
        user_id: None,
    };
    let created = CreateSubscription::new(&state.registry).execute(subscription).await?;
    Ok(Json(created.into()))
}

pub async fn list_subscriptions(State(state): State<AppState>) -> JsonResult<Vec<SubscriptionResponse>> {
    let subscriptions = ListSubscriptions::new(&state.registry).execute().await?;
    Ok(Json(subscriptions.into_iter().map(Into::into).collect()))
}

pub async fn get_subscription(
    State(state): State<AppState>,
    Path(sid): Path<Uuid>,
) -> JsonResult<SubscriptionResponse> {
    let subscription = GetSubscription::new(&state.registry)
        .execute(sid)
        .await?
        .ok_or_else(|| Error::not_found(format!("subscription {sid}")))?;
    Ok(Json(subscription.into()))
}

pub async fn list_subscription_resource_types(
    State(state): State<AppState>,
    Path(sid): Path<Uuid>,
) -> JsonResult<Vec<ResourceTypeResponse>> {
    let subscription = GetSubscription::new(&state.registry)
        .execute(sid)
        .await?
        .ok_or_else(|| Error::not_found(format!("subscription {sid}")))?;
    let all_types = ListResourceTypes::new(&state.registry).execute().await?;
    let allowed: Vec<ResourceTypeResponse> = all_types
        .into_iter()
        .filter(|rt| subscription.resource_type_ids.contains(&rt.id))
        .map(Into::into)
        .collect();
    Ok(Json(allowed))
}

pub async fn list_subscription_collections(
    State(state): State<AppState>,
    Path(sid): Path<Uuid>,
) -> JsonResult<Vec<CollectionResponse>> {
    let collections = ListCollectionsForSubscription::new(&state.registry).execute(sid).await?;
    Ok(Json(collections.into_iter().map(Into::into).collect()))
}

pub async fn create_collection_under_subscription(
    State(state): State<AppState>,
    Path(sid): Path<Uuid>,
    Json(body): Json<NewCollection>,
) -> JsonResult<CollectionResponse> {
    let collection = Collection {
        id: Uuid::new_v4(),
        subscription_id: sid,
        name: body.name,
        description: body.description,
        resource_type_ids: body.resource_type_ids,
    };
    let created = CreateCollection::new(&state.registry).execute(collection).await?;
    Ok(Json(created.into()))
}

pub async fn delete_subscription(
    State(state): State<AppState>,
    Path(sid): Path<Uuid>,
) -> JsonResult<DeleteResponse> {
    let existed = GetSubscription::new(&state.registry).execute(sid).await?.is_some();
    if !existed {
        return Err(Error::not_found(format!("subscription {sid}")).into());
    }
    let deleted = DeleteSubscription::new(&state.registry).execute(sid).await?;
    Ok(Json(DeleteResponse { deleted }))
}

// ---- Collections -------------------------------------------------------

pub async fn get_collection(
    State(state): State<AppState>,
    Path(cid): Path<Uuid>,
) -> JsonResult<CollectionResponse> {
    let collection = GetCollection::new(&state.registry)
        .execute(cid)
        .await?
        .ok_or_else(|| Error::not_found(format!("collection {cid}")))?;
    Ok(Json(collection.into()))
}

pub async fn list_collection_resource_types(
    State(state): State<AppState>,
    Path(cid): Path<Uuid>,
) -> JsonResult<Vec<ResourceTypeResponse>> {
    let collection = GetCollection::new(&state.registry)
        .execute(cid)
        .await?
        .ok_or_else(|| Error::not_found(format!("collection {cid}")))?;
    let all_types = ListResourceTypes::new(&state.registry).execute().await?;
    let allowed: Vec<ResourceTypeResponse> = all_types
        .into_iter()
        .filter(|rt| collection.resource_type_ids.contains(&rt.id))
        .map(Into::into)
        .collect();
    Ok(Json(allowed))
}

pub async fn list_collection_resources(
    State(state): State<AppState>,
    Path(cid): Path<Uuid>,
) -> JsonResult<Vec<ResourceResponse>> {
    let resources = ListResourcesForCollection::new(&state.registry).execute(cid).await?;
    Ok(Json(resources.into_iter().map(Into::into).collect()))
}

pub async fn delete_collection(
    State(state): State<AppState>,
    Path(cid): Path<Uuid>,
) -> JsonResult<DeleteResponse> {
    let existed = GetCollection::new(&state.registry).execute(cid).await?.is_some();
    if !existed {
        return Err(Error::not_found(format!("collection {cid}")).into());
    }
    let deleted = DeleteCollection::new(&state.registry).execute(cid).await?;
    Ok(Json(DeleteResponse { deleted }))
}

/// `POST /collections/{cid}/{rtid}`: multipart upload of `new_resource`
/// (the file), optional `name`, repeated `webhooks` fields.
pub async fn upload_resource(
    State(state): State<AppState>,
    Path((cid, rtid)): Path<(Uuid, Uuid)>,
    mut multipart: Multipart,
) -> JsonResult<ResourceUploadResponse> {
    let mut file_name = String::new();
    let mut file_content: Vec<u8> = Vec::new();
    let mut name: Option<String> = None;
    let mut webhooks: Vec<String> = Vec::new();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| Error::validation(format!("malformed multipart body: {e}")))?
    {
        match field.name().unwrap_or("").to_string().as_str() {
            "new_resource" => {
                file_name = field.file_name().unwrap_or("upload").to_string();
                file_content = field
                    .bytes()
                    .await
                    .map_err(|e| Error::validation(format!("failed to read file field: {e}")))?
                    .to_vec();
            }
            "name" => {
                name = Some(
                    field
                        .text()
                        .await
                        .map_err(|e| Error::validation(format!("failed to read name field: {e}")))?,
                );
            }
            "webhooks" => {
                webhooks.push(
                    field
                        .text()
                        .await
                        .map_err(|e| Error::validation(format!("failed to read webhooks field: {e}")))?,
                );
            }
            _ => {}
        }
    }

    if file_name.is_empty() {
        return Err(Error::validation("multipart body missing `new_resource` field").into());
    }

    let resource = Resource {
        id: Uuid::new_v4(),
        collection_id: cid,
        resource_type_id: rtid,
        name: name.unwrap_or_else(|| file_name.clone()),
        file_name,
        file_type: None,
        file: Some(file_content),
        markdown_content: None,
        callback_urls: webhooks.clone(),
        status: ResourceStatus::Pending,
        error: None,
    };

    let created = UploadResource::new(&state.registry).execute(resource).await?;

    Ok(Json(ResourceUploadResponse {
        status: created.status,
        resource_url: format!("/resources/{}", created.id),
        webhooks,
    }))
}

pub async fn collection_query(
    State(state): State<AppState>,
    Path(cid): Path<Uuid>,
    Json(body): Json<CollectionQueryRequest>,
) -> JsonResult<InitiateSearchResponse> {
    let search = InitiateSearch::new(&state.registry)
        .execute(cid, body.prompt, Vec::new(), body.filters, body.webhooks)
        .await?;
    Ok(Json(InitiateSearchResponse {
        search_url: format!("/query-results/{}", search.id),
    }))
}

// ---- Resources ----------------------------------------------------------

pub async fn delete_resource(
    State(state): State<AppState>,
    Path(rid): Path<Uuid>,
) -> JsonResult<DeleteResponse> {
    let existed = GetResource::new(&state.registry).execute(rid).await?.is_some();
    if !existed {
        return Err(Error::not_found(format!("resource {rid}")).into());
    }
    let deleted = DeleteResource::new(&state.registry).execute(rid).await?;
    Ok(Json(DeleteResponse { deleted }))
}

/// `POST /resource/{rid}/query`: scopes the search to a single resource by
/// default. An explicit `resource_ids` in the body overrides that default
/// rather than adding to it, matching `{prompt, resource_ids?}` in spec §6.
pub async fn resource_query(
    State(state): State<AppState>,
    Path(rid): Path<Uuid>,
    Json(body): Json<ResourceQueryRequest>,
) -> JsonResult<InitiateSearchResponse> {
    let resource = GetResource::new(&state.registry)
        .execute(rid)
        .await?
        .ok_or_else(|| Error::not_found(format!("resource {rid}")))?;

    let resource_ids = if body.resource_ids.is_empty() {
        vec![rid]
    } else {
        body.resource_ids
    };

    let search = InitiateSearch::new(&state.registry)
        .execute(resource.collection_id, body.prompt, resource_ids, body.filters, body.webhooks)
        .await?;
    Ok(Json(InitiateSearchResponse {
        search_url: format!("/query-results/{}", search.id),
    }))
}

// ---- Resource types -------------------------------------------------------

pub async fn list_resource_types(State(state): State<AppState>) -> JsonResult<Vec<ResourceTypeResponse>> {
    let types = ListResourceTypes::new(&state.registry).execute().await?;
    Ok(Json(types.into_iter().map(Into::into).collect()))
}

// ---- Query results ---------------------------------------------------------

pub async fn get_query_result(
    State(state): State<AppState>,
    Path(qid): Path<Uuid>,
) -> JsonResult<QueryResultResponse> {
    let (search, results) = GetQueryResult::new(&state.registry).execute(qid).await?;
    Ok(Json((search, results).into()))
}

pub async fn get_query_result_metadata(
    State(state): State<AppState>,
    Path(qid): Path<Uuid>,
) -> JsonResult<QueryResultMetadataResponse> {
    let search = GetQueryResultMetadata::new(&state.registry).execute(qid).await?;
    Ok(Json(search.into()))
}

// ---- Root -------------------------------------------------------------

pub async fn root() -> &'static str {
    "Knowledge Service: multi-tenant RAG over a property graph. See /subscriptions/, /collections/{cid}/{rtid}, /collections/{cid}/query."
}

pub async fn not_found() -> (StatusCode, &'static str) {
    (StatusCode::NOT_FOUND, "not found")
}
