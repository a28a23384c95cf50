//! Default `LanguageModel` adapter: deterministic hash-based embeddings and
//! a templated echo response, so the whole pipeline is exercisable in
//! tests without a real model or credential-wallet API behind it.

use crate::domain::error::Result;
use crate::domain::ports::LanguageModel;
use async_trait::async_trait;
use sha2::{Digest, Sha256};
use uuid::Uuid;

const EMBEDDING_DIM: usize = 32;

#[derive(Default)]
pub struct DeterministicLanguageModel;

impl DeterministicLanguageModel {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl LanguageModel for DeterministicLanguageModel {
    async fn embed(&self, text: &str) -> Result<Vec<f32>> {
        let mut hasher = Sha256::new();
        hasher.update(text.as_bytes());
        let digest = hasher.finalize();
        Ok(digest
            .iter()
            .cycle()
            .take(EMBEDDING_DIM)
            .map(|b| (*b as f32) / 255.0)
            .collect())
    }

    async fn generate_rag(&self, prompt: &str) -> Result<String> {
        Ok(format!("[deterministic answer for prompt of {} chars]", prompt.len()))
    }

    async fn issue_credential(&self, search_id: Uuid) -> Result<String> {
        Ok(format!("https://credentials.example.com/{search_id}"))
    }
}
