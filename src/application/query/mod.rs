//! The query pipeline (spec §4.2 stages 7-12): save request, vectorise,
//! similarity search, prompt render, model invocation, credential issuance,
//! webhook fan-out.

mod execute_the_rag_prompt;
mod identify_related_content;
mod initiate_search_request;
mod issue_credentials;
mod ventilate_search_results;
mod vectorise_the_search_query;

pub use execute_the_rag_prompt::ExecuteTheRagPrompt;
pub use identify_related_content::IdentifyRelatedContent;
pub use initiate_search_request::InitiateSearchRequest;
pub use issue_credentials::IssueCredentials;
pub use ventilate_search_results::VentilateSearchResults;
pub use vectorise_the_search_query::VectoriseTheSearchQuery;
