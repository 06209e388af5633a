use std::rc::Rc;

use serde::{Deserialize, Serialize};

pub type DocumentId = i64;

/// Row of the remote document catalog
#[derive(Clone, PartialEq, Serialize, Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct DocumentSummary {
    pub document_id: DocumentId,
    #[serde(default, deserialize_with = "crate::models::null_as_default")]
    pub title: String,
    #[serde(default)]
    pub document_type: Option<String>,
    #[serde(default)]
    pub upload_date: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub file_size: Option<u64>,
}

#[derive(Clone, PartialEq, Serialize, Deserialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct DocumentDetail {
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub summary: Option<SummaryInfo>,
    #[serde(default)]
    pub error: Option<String>,
}

#[derive(Clone, PartialEq, Serialize, Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct SummaryInfo {
    #[serde(default)]
    pub summary_text: Option<String>,
    /// JSON-encoded list of strings
    #[serde(default)]
    pub tags: Option<String>,
}

impl SummaryInfo {
    pub fn tag_list(&self) -> Vec<String> {
        self.tags
            .as_deref()
            .and_then(|raw| serde_json::from_str::<Vec<String>>(raw).ok())
            .unwrap_or_default()
    }
}

/// Acknowledgement of `/documents/upload`; the backend decides which fields it fills
#[derive(Clone, PartialEq, Serialize, Deserialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct UploadAck {
    #[serde(default)]
    pub document_id: Option<DocumentId>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

/// File picked in the upload form, already read into memory
#[derive(Clone, PartialEq, Debug)]
pub struct SelectedFile {
    pub name: String,
    pub size: u64,
    pub mime_type: String,
    pub bytes: Rc<Vec<u8>>,
}

impl SelectedFile {
    pub fn new(name: impl Into<String>, mime_type: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            size: bytes.len() as u64,
            mime_type: mime_type.into(),
            bytes: Rc::new(bytes),
        }
    }

    pub fn extension(&self) -> Option<String> {
        file_extension(&self.name)
    }
}

/// Lowercased extension without the dot
pub fn file_extension(name: &str) -> Option<String> {
    let (stem, ext) = name.rsplit_once('.')?;
    if stem.is_empty() || ext.is_empty() {
        return None;
    }
    Some(ext.to_lowercase())
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum DownloadFormat {
    Txt,
    Docx,
    Pdf,
}

impl DownloadFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            DownloadFormat::Txt => "txt",
            DownloadFormat::Docx => "docx",
            DownloadFormat::Pdf => "pdf",
        }
    }

    pub fn mime_type(&self) -> &'static str {
        match self {
            DownloadFormat::Txt => "text/plain;charset=utf-8",
            DownloadFormat::Docx => {
                "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
            }
            DownloadFormat::Pdf => "application/pdf",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            DownloadFormat::Txt => "TXT",
            DownloadFormat::Docx => "DOCX",
            DownloadFormat::Pdf => "PDF",
        }
    }
}

/// Bytes ready to be handed to the browser as a file
#[derive(Clone, PartialEq, Debug)]
pub struct DownloadArtifact {
    pub file_name: String,
    pub mime_type: &'static str,
    pub bytes: Vec<u8>,
}
