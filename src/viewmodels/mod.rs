// ============================================================================
// VIEWMODELS - One controller per page
// ============================================================================
// Each controller owns its form input and one `Operation` per concurrent
// request, talks to the backend through `AppContext::api` and announces
// every transition with `AppContext::changed`.
// ============================================================================

pub mod validation;
pub mod auth_viewmodel;
pub mod upload_viewmodel;
pub mod document_list_viewmodel;
pub mod style_learning_viewmodel;
pub mod generation_viewmodel;
pub mod token_usage_viewmodel;

pub use validation::ValidationError;
pub use auth_viewmodel::{AuthViewModel, LoginForm, RegisterForm};
pub use upload_viewmodel::UploadViewModel;
pub use document_list_viewmodel::{DocumentListViewModel, SortDirection, SortKey};
pub use style_learning_viewmodel::StyleLearningViewModel;
pub use generation_viewmodel::{GenerationForm, GenerationViewModel};
pub use token_usage_viewmodel::{DailyBar, TokenUsageViewModel};

use crate::models::document::{DocumentSummary, DownloadArtifact};
use crate::services::api_client::DocumentQuery;
use crate::services::error::ApiError;
use crate::state::context::AppContext;
use crate::state::request_state::Operation;

pub type DocumentsOp = Operation<Vec<DocumentSummary>>;

/// Load or refresh a document list. While a list is already shown it stays
/// visible during the refresh, and a failed refresh keeps it with an error
/// toast.
pub(crate) fn fetch_documents(ctx: &AppContext, documents: &DocumentsOp, query: DocumentQuery) {
    let Some(session) = ctx.require_session() else {
        return;
    };

    let ticket = if documents.data().is_some() {
        documents.issue()
    } else {
        documents.begin()
    };
    ctx.changed();

    let documents = documents.clone();
    let task_ctx = ctx.clone();
    ctx.spawn(async move {
        let ctx = task_ctx;
        let result = ctx.api.search_documents(session.user_id, &query).await;
        if !documents.is_current(ticket) {
            return;
        }
        match result {
            Ok(list) => {
                log::info!("📄 [DOCS] {} documents loaded", list.len());
                documents.finish::<ApiError>(ticket, Ok(list));
            }
            Err(error) => {
                if documents.data().is_some() {
                    documents.settle(ticket);
                } else {
                    documents.finish(ticket, Err(error.clone()));
                }
                ctx.report_error("문서 목록을 불러오는데 실패했습니다", &error);
            }
        }
        ctx.changed();
    });
}

/// `{base}_{unix_millis}.{ext}`; characters browsers refuse in file names become `_`
pub(crate) fn artifact_name(base: &str, extension: &str) -> String {
    let cleaned: String = base
        .trim()
        .chars()
        .map(|c| if matches!(c, '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|') { '_' } else { c })
        .collect();
    let base = if cleaned.is_empty() { "document" } else { cleaned.as_str() };
    format!("{}_{}.{}", base, chrono::Utc::now().timestamp_millis(), extension)
}

/// Hand a downloaded artifact to the file sink and toast the outcome
pub(crate) fn deliver(ctx: &AppContext, artifact: DownloadArtifact) {
    let file_name = artifact.file_name.clone();
    match ctx.files.save(artifact) {
        Ok(()) => {
            log::info!("💾 [DOWNLOAD] Saved {}", file_name);
            ctx.notifier.success("다운로드가 시작되었습니다.");
        }
        Err(reason) => {
            log::error!("❌ [DOWNLOAD] {} could not be saved: {}", file_name, reason);
            ctx.notifier.error("다운로드에 실패했습니다.");
        }
    }
}
