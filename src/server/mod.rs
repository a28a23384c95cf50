//! The HTTP façade (spec §4, C8 "External façade ports... adapters only"):
//! translates each request in spec §6 into a use-case call against the
//! shared [`state::AppState`] registry. Business logic lives entirely in
//! `application`; nothing here does more than parse, dispatch, and render.

pub mod dto;
pub mod error;
pub mod handlers;
pub mod routes;
pub mod state;

pub use routes::build_router;
pub use state::AppState;
