//! Read-only knowledge-base browsing (`/api/kb/*`).
//!
//! Paging and search bounds are clamped client-side to the ranges the service
//! accepts, so an out-of-range argument never turns into a 422.

use crate::client::AnalysisClient;
use crate::errors::{AppError, ValidationError};
use crate::models::kb::{ClauseType, KbChunk, KbContract, KbContractsPage, KbHealth, KbStats};

pub const DEFAULT_PAGE_SIZE: u32 = 20;
pub const MAX_PAGE_SIZE: u32 = 100;
pub const DEFAULT_TOP_K: u32 = 5;
pub const MAX_TOP_K: u32 = 20;

impl AnalysisClient {
    /// GET /api/kb/health
    pub async fn kb_health(&self) -> Result<KbHealth, AppError> {
        self.get_json("/api/kb/health", &[]).await
    }

    /// GET /api/kb/stats
    pub async fn kb_stats(&self) -> Result<KbStats, AppError> {
        self.get_json("/api/kb/stats", &[]).await
    }

    /// GET /api/kb/contracts?limit=&offset=
    pub async fn kb_contracts(&self, limit: u32, offset: u32) -> Result<KbContractsPage, AppError> {
        let limit = limit.clamp(1, MAX_PAGE_SIZE);
        self.get_json(
            "/api/kb/contracts",
            &[("limit", limit.to_string()), ("offset", offset.to_string())],
        )
        .await
    }

    /// GET /api/kb/contracts/{id}
    pub async fn kb_contract(&self, contract_id: &str) -> Result<KbContract, AppError> {
        // Contract ids are file-derived and may carry spaces or slashes.
        let id = urlencoding::encode(contract_id);
        self.get_json(&format!("/api/kb/contracts/{id}"), &[]).await
    }

    /// GET /api/kb/contracts/{id}/chunks
    pub async fn kb_contract_chunks(&self, contract_id: &str) -> Result<Vec<KbChunk>, AppError> {
        let id = urlencoding::encode(contract_id);
        self.get_json(&format!("/api/kb/contracts/{id}/chunks"), &[]).await
    }

    /// GET /api/kb/search?query=&clause_type=&top_k=
    pub async fn kb_search(
        &self,
        query: &str,
        clause_type: Option<ClauseType>,
        top_k: u32,
    ) -> Result<Vec<KbChunk>, AppError> {
        let query = query.trim();
        if query.is_empty() {
            return Err(ValidationError::EmptyQuery.into());
        }

        let mut params = vec![
            ("query", query.to_string()),
            ("top_k", top_k.clamp(1, MAX_TOP_K).to_string()),
        ];
        if let Some(clause_type) = clause_type {
            params.push(("clause_type", clause_type.as_str().to_string()));
        }
        self.get_json("/api/kb/search", &params).await
    }
}
