use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::models::context::CompanyType;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ClauseType {
    Termination,
    Ip,
    NonCompete,
    Confidentiality,
    Compensation,
    General,
}

impl ClauseType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Termination => "termination",
            Self::Ip => "ip",
            Self::NonCompete => "non_compete",
            Self::Confidentiality => "confidentiality",
            Self::Compensation => "compensation",
            Self::General => "general",
        }
    }
}

impl std::str::FromStr for ClauseType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "termination" => Ok(Self::Termination),
            "ip" => Ok(Self::Ip),
            "non_compete" | "non-compete" => Ok(Self::NonCompete),
            "confidentiality" => Ok(Self::Confidentiality),
            "compensation" => Ok(Self::Compensation),
            "general" => Ok(Self::General),
            other => Err(format!("unknown clause type '{other}'")),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct KbHealth {
    pub chroma_path: String,
    pub processed_count: u64,
    pub collection_count: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct KbStats {
    pub num_contracts: u64,
    pub num_chunks: u64,
    #[serde(default)]
    pub clause_type_counts: BTreeMap<String, u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct KbContract {
    pub contract_id: String,
    pub filename: String,
    #[serde(default)]
    pub company_type: Option<CompanyType>,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub extra: BTreeMap<String, Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct KbContractsPage {
    pub contracts: Vec<KbContract>,
    pub total: u64,
    pub offset: u64,
    pub limit: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct KbChunk {
    pub contract_id: String,
    pub chunk_id: String,
    pub clause_type: ClauseType,
    pub text_preview: String,
    #[serde(default)]
    pub similarity: Option<f64>,
}
