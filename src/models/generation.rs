use serde::{Deserialize, Serialize};

use crate::models::document::{DocumentId, DownloadFormat};

#[derive(Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Debug, Default)]
#[serde(rename_all = "lowercase")]
pub enum DocumentLength {
    Short,
    #[default]
    Medium,
    Long,
}

impl DocumentLength {
    pub const ALL: [DocumentLength; 3] = [Self::Short, Self::Medium, Self::Long];

    pub fn label(&self) -> &'static str {
        match self {
            DocumentLength::Short => "짧게",
            DocumentLength::Medium => "보통",
            DocumentLength::Long => "길게",
        }
    }
}

#[derive(Clone, PartialEq, Serialize, Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct GenerationRequest {
    pub user_id: i64,
    pub document_type: String,
    pub topic: String,
    pub keywords: Vec<String>,
    pub length: DocumentLength,
    pub additional_instructions: Option<String>,
    pub reference_document_id: Option<DocumentId>,
}

#[derive(Clone, PartialEq, Serialize, Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedDocument {
    pub document_id: DocumentId,
    #[serde(default)]
    pub document_type: Option<String>,
    /// Milliseconds spent on the backend
    #[serde(default)]
    pub processing_time: Option<u64>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default, deserialize_with = "crate::models::null_as_default")]
    pub content: String,
}

/// A download button offered for a generated document
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct DownloadAction {
    pub document_id: DocumentId,
    pub format: DownloadFormat,
}
