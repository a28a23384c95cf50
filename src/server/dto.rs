//! Request/response bodies for the HTTP surface (spec §6). Kept separate
//! from the domain types: these are wire shapes, not entities.

use crate::domain::types::{
    Collection, Resource, ResourceStatus, ResourceType, SearchRequest, SearchResult, SearchStatus,
    Subscription,
};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubscriptionStatus {
    Active,
    Inactive,
}

#[derive(Debug, Deserialize)]
pub struct NewSubscription {
    pub name: String,
    #[serde(default)]
    pub resource_type_ids: HashSet<Uuid>,
    pub status: SubscriptionStatus,
}

#[derive(Debug, Serialize)]
pub struct SubscriptionResponse {
    pub id: Uuid,
    pub name: String,
    pub is_active: bool,
    pub resource_type_ids: HashSet<Uuid>,
    pub collection_ids: HashSet<Uuid>,
}

impl From<Subscription> for SubscriptionResponse {
    fn from(s: Subscription) -> Self {
        Self {
            id: s.id,
            name: s.name,
            is_active: s.is_active,
            resource_type_ids: s.resource_type_ids,
            collection_ids: s.collection_ids,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct NewCollection {
    pub name: String,
    #[serde(default)]
    pub resource_type_ids: HashSet<Uuid>,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct CollectionResponse {
    pub id: Uuid,
    pub subscription_id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub resource_type_ids: HashSet<Uuid>,
}

impl From<Collection> for CollectionResponse {
    fn from(c: Collection) -> Self {
        Self {
            id: c.id,
            subscription_id: c.subscription_id,
            name: c.name,
            description: c.description,
            resource_type_ids: c.resource_type_ids,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ResourceTypeResponse {
    pub id: Uuid,
    pub name: String,
    pub tooltip: String,
}

impl From<ResourceType> for ResourceTypeResponse {
    fn from(rt: ResourceType) -> Self {
        Self {
            id: rt.id,
            name: rt.name,
            tooltip: rt.tooltip,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ResourceResponse {
    pub id: Uuid,
    pub collection_id: Uuid,
    pub resource_type_id: Uuid,
    pub name: String,
    pub file_name: String,
    pub file_type: Option<String>,
    pub status: ResourceStatus,
    pub error: Option<String>,
}

impl From<Resource> for ResourceResponse {
    fn from(r: Resource) -> Self {
        Self {
            id: r.id,
            collection_id: r.collection_id,
            resource_type_id: r.resource_type_id,
            name: r.name,
            file_name: r.file_name,
            file_type: r.file_type,
            status: r.status,
            error: r.error,
        }
    }
}

/// Response for `POST /collections/{cid}/{rtid}`.
#[derive(Debug, Serialize)]
pub struct ResourceUploadResponse {
    pub status: ResourceStatus,
    pub resource_url: String,
    pub webhooks: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct DeleteResponse {
    pub deleted: bool,
}

/// Body for `POST /collections/{cid}/query`.
#[derive(Debug, Deserialize)]
pub struct CollectionQueryRequest {
    pub prompt: String,
    #[serde(default)]
    pub filters: HashMap<String, String>,
    #[serde(default)]
    pub webhooks: Vec<String>,
}

/// Body for `POST /resource/{rid}/query`.
#[derive(Debug, Deserialize)]
pub struct ResourceQueryRequest {
    pub prompt: String,
    #[serde(default)]
    pub resource_ids: Vec<Uuid>,
    #[serde(default)]
    pub filters: HashMap<String, String>,
    #[serde(default)]
    pub webhooks: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct InitiateSearchResponse {
    pub search_url: String,
}

#[derive(Debug, Serialize)]
pub struct SearchResultItem {
    pub chunk_id: Uuid,
    pub content: String,
    pub score: f32,
}

impl From<SearchResult> for SearchResultItem {
    fn from(r: SearchResult) -> Self {
        Self {
            chunk_id: r.chunk_id,
            content: r.content,
            score: r.score,
        }
    }
}

/// Response for `GET /query-results/{qid}`: either the terminal answer, or
/// a pending marker while the pipeline is still running (spec §6).
#[derive(Debug, Serialize)]
#[serde(tag = "status")]
pub enum QueryResultResponse {
    #[serde(rename = "pending")]
    Pending,
    #[serde(rename = "ready")]
    Ready {
        response: Option<String>,
        credential_url: Option<String>,
        results: Vec<SearchResultItem>,
    },
    #[serde(rename = "failed")]
    Failed { error: Option<String> },
}

impl From<(SearchRequest, Vec<SearchResult>)> for QueryResultResponse {
    fn from((search, results): (SearchRequest, Vec<SearchResult>)) -> Self {
        match search.status {
            SearchStatus::Ready => QueryResultResponse::Ready {
                response: search.response,
                credential_url: search.credential_url,
                results: results.into_iter().map(Into::into).collect(),
            },
            SearchStatus::Failed => QueryResultResponse::Failed { error: search.error },
            _ => QueryResultResponse::Pending,
        }
    }
}

/// Response for `GET /query-results/{qid}/metadata`: cheap polling without
/// the result payload.
#[derive(Debug, Serialize)]
pub struct QueryResultMetadataResponse {
    pub id: Uuid,
    pub collection_id: Uuid,
    pub query: String,
    pub status: SearchStatus,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl From<SearchRequest> for QueryResultMetadataResponse {
    fn from(s: SearchRequest) -> Self {
        Self {
            id: s.id,
            collection_id: s.collection_id,
            query: s.query,
            status: s.status,
            created_at: s.created_at,
        }
    }
}
