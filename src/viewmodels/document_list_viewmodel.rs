// ============================================================================
// DOCUMENT LIST VIEWMODEL - Browse, search, inspect, delete and download
// ============================================================================
// Keyword/type searches go to the backend after the input has been quiet for
// the debounce window. Sorting and the type filter are applied locally over
// the fetched list and never cause a request.
// ============================================================================

use std::cell::{Cell, RefCell};
use std::cmp::Ordering;
use std::rc::Rc;

use crate::models::document::{
    DocumentDetail, DocumentId, DocumentSummary, DownloadArtifact, DownloadFormat,
};
use crate::services::api_client::DocumentQuery;
use crate::services::error::{ApiError, ErrorInfo};
use crate::state::context::AppContext;
use crate::state::debounce::Debouncer;
use crate::state::request_state::{Operation, RequestState};
use crate::viewmodels::validation::ValidationError;
use crate::viewmodels::{artifact_name, deliver, fetch_documents, DocumentsOp};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SortKey {
    Title,
    UploadDate,
    DocumentType,
}

impl SortKey {
    pub const ALL: [SortKey; 3] = [SortKey::Title, SortKey::UploadDate, SortKey::DocumentType];

    pub fn label(&self) -> &'static str {
        match self {
            SortKey::Title => "제목",
            SortKey::UploadDate => "업로드일",
            SortKey::DocumentType => "유형",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SortDirection {
    Ascending,
    Descending,
}

impl SortDirection {
    pub fn toggled(self) -> Self {
        match self {
            SortDirection::Ascending => SortDirection::Descending,
            SortDirection::Descending => SortDirection::Ascending,
        }
    }

    pub fn arrow(&self) -> &'static str {
        match self {
            SortDirection::Ascending => "▲",
            SortDirection::Descending => "▼",
        }
    }
}

/// Case-folded so "apple" and "Apple" sort together; ties fall back to the id
fn compare(a: &DocumentSummary, b: &DocumentSummary, key: SortKey) -> Ordering {
    fn folded(value: Option<&str>) -> String {
        value.unwrap_or("").to_lowercase()
    }
    match key {
        SortKey::Title => folded(Some(&a.title)).cmp(&folded(Some(&b.title))),
        SortKey::UploadDate => a.upload_date.cmp(&b.upload_date),
        SortKey::DocumentType => {
            folded(a.document_type.as_deref()).cmp(&folded(b.document_type.as_deref()))
        }
    }
}

pub fn sort_documents(documents: &mut [DocumentSummary], key: SortKey, direction: SortDirection) {
    documents.sort_by(|a, b| {
        let primary = match direction {
            SortDirection::Ascending => compare(a, b, key),
            SortDirection::Descending => compare(a, b, key).reverse(),
        };
        primary.then(a.document_id.cmp(&b.document_id))
    });
}

#[derive(Clone)]
pub struct DocumentListViewModel {
    ctx: AppContext,
    query: Rc<RefCell<DocumentQuery>>,
    sort: Rc<Cell<Option<(SortKey, SortDirection)>>>,
    debouncer: Debouncer,
    documents: DocumentsOp,
    selected: Rc<RefCell<Option<DocumentSummary>>>,
    detail: Operation<DocumentDetail>,
    deleting: Rc<RefCell<Vec<DocumentId>>>,
    download: Operation<DownloadFormat>,
}

impl DocumentListViewModel {
    pub fn new(ctx: AppContext) -> Self {
        let debouncer = Debouncer::new(ctx.config.search_debounce_ms, ctx.scheduler.clone());
        Self {
            ctx,
            query: Rc::new(RefCell::new(DocumentQuery::default())),
            sort: Rc::new(Cell::new(None)),
            debouncer,
            documents: DocumentsOp::new(),
            selected: Rc::new(RefCell::new(None)),
            detail: Operation::new(),
            deleting: Rc::new(RefCell::new(Vec::new())),
            download: Operation::new(),
        }
    }

    pub fn activate(&self) {
        self.run_search();
    }

    pub fn query(&self) -> DocumentQuery {
        self.query.borrow().clone()
    }

    pub fn documents_state(&self) -> RequestState<Vec<DocumentSummary>> {
        self.documents.state()
    }

    pub fn sort(&self) -> Option<(SortKey, SortDirection)> {
        self.sort.get()
    }

    /// The fetched list with the local type filter and sort applied
    pub fn visible_documents(&self) -> Vec<DocumentSummary> {
        let query = self.query();
        let mut documents: Vec<DocumentSummary> = self
            .documents
            .data()
            .unwrap_or_default()
            .into_iter()
            .filter(|doc| match query.document_type.as_deref() {
                Some(kind) if !kind.is_empty() => doc.document_type.as_deref() == Some(kind),
                _ => true,
            })
            .collect();
        if let Some((key, direction)) = self.sort.get() {
            sort_documents(&mut documents, key, direction);
        }
        documents
    }

    pub fn has_filters(&self) -> bool {
        !self.query.borrow().is_empty()
    }

    /// Every keystroke restarts the debounce window
    pub fn set_keyword(&self, keyword: impl Into<String>) {
        self.query.borrow_mut().keyword = keyword.into();
        self.schedule_search();
    }

    pub fn set_document_type(&self, document_type: Option<String>) {
        self.query.borrow_mut().document_type = document_type.filter(|t| !t.is_empty());
        self.ctx.changed();
        self.schedule_search();
    }

    fn schedule_search(&self) {
        let vm = self.clone();
        self.debouncer.trigger(move || {
            // Signed out while the timer was pending
            if vm.ctx.session.load().is_some() {
                vm.run_search();
            }
        });
    }

    /// Search button / Enter: skip the debounce window
    pub fn search_now(&self) {
        self.debouncer.cancel();
        self.run_search();
    }

    fn run_search(&self) {
        let query = self.query();
        log::debug!("🔍 [DOCS] Searching {:?}", query);
        fetch_documents(&self.ctx, &self.documents, query);
    }

    /// Signed out: drop the pending search, filters, list and selection
    pub fn clear(&self) {
        self.debouncer.cancel();
        *self.query.borrow_mut() = DocumentQuery::default();
        self.sort.set(None);
        self.documents.reset();
        self.selected.borrow_mut().take();
        self.detail.reset();
        self.deleting.borrow_mut().clear();
        self.download.reset();
    }

    pub fn reset_filters(&self) {
        self.debouncer.cancel();
        *self.query.borrow_mut() = DocumentQuery::default();
        self.sort.set(None);
        self.run_search();
    }

    /// Same key flips the direction, a new key starts ascending
    pub fn sort_by(&self, key: SortKey) {
        let next = match self.sort.get() {
            Some((current, direction)) if current == key => (key, direction.toggled()),
            _ => (key, SortDirection::Ascending),
        };
        self.sort.set(Some(next));
        self.ctx.changed();
    }

    pub fn selected_id(&self) -> Option<DocumentId> {
        self.selected.borrow().as_ref().map(|doc| doc.document_id)
    }

    pub fn selected_document(&self) -> Option<DocumentSummary> {
        self.selected.borrow().clone()
    }

    pub fn detail_state(&self) -> RequestState<DocumentDetail> {
        self.detail.state()
    }

    pub fn is_deleting(&self, document_id: DocumentId) -> bool {
        self.deleting.borrow().contains(&document_id)
    }

    pub fn is_downloading(&self) -> bool {
        self.download.is_loading()
    }

    /// Show a document and fetch its content and summary
    pub fn select(&self, document: DocumentSummary) {
        let document_id = document.document_id;
        *self.selected.borrow_mut() = Some(document);
        let ticket = self.detail.begin();
        self.ctx.changed();

        let vm = self.clone();
        self.ctx.spawn(async move {
            let result = vm.ctx.api.document_detail(document_id).await;
            if !vm.detail.is_current(ticket) {
                return;
            }
            match result {
                Ok(detail) => {
                    vm.detail.finish::<ApiError>(ticket, Ok(detail));
                }
                Err(error) => {
                    log::warn!("⚠️ [DOCS] Detail of {} failed: {}", document_id, error);
                    vm.detail.finish(
                        ticket,
                        Err(ErrorInfo {
                            message: "문서 내용을 불러오는데 실패했습니다.".to_string(),
                            status: error.status(),
                        }),
                    );
                    if matches!(error, ApiError::Unauthorized) {
                        vm.ctx.report_error("문서 내용을 불러오는데 실패했습니다", &error);
                    }
                }
            }
            vm.ctx.changed();
        });
    }

    pub fn clear_selection(&self) {
        self.selected.borrow_mut().take();
        self.detail.reset();
        self.ctx.changed();
    }

    pub fn delete(&self, document_id: DocumentId) {
        if self.ctx.require_session().is_none() {
            return;
        }
        log::info!("🗑️ [DOCS] Deleting document {}", document_id);
        self.deleting.borrow_mut().push(document_id);
        self.ctx.changed();

        let vm = self.clone();
        self.ctx.spawn(async move {
            let result = vm.ctx.api.delete_document(document_id).await;
            vm.deleting.borrow_mut().retain(|id| *id != document_id);
            match result {
                Ok(()) => {
                    vm.documents
                        .update_data(|docs| docs.retain(|d| d.document_id != document_id));
                    if vm.selected_id() == Some(document_id) {
                        vm.selected.borrow_mut().take();
                        vm.detail.reset();
                    }
                    vm.ctx.notifier.success("문서가 삭제되었습니다.");
                    vm.run_search();
                }
                Err(error) => vm.ctx.report_error("문서 삭제에 실패했습니다", &error),
            }
            vm.ctx.changed();
        });
    }

    pub fn download_selected(&self, format: DownloadFormat) {
        let Some(document) = self.selected_document() else {
            self.ctx
                .notifier
                .warning(ValidationError::NoDocumentSelected.to_string());
            return;
        };
        if self.ctx.require_session().is_none() {
            return;
        }

        let ticket = self.download.begin();
        self.ctx.changed();

        let vm = self.clone();
        self.ctx.spawn(async move {
            let result = vm
                .ctx
                .api
                .download_document(document.document_id, format)
                .await;
            if !vm.download.is_current(ticket) {
                return;
            }
            match result {
                Ok(bytes) => {
                    vm.download.finish::<ApiError>(ticket, Ok(format));
                    deliver(
                        &vm.ctx,
                        DownloadArtifact {
                            file_name: artifact_name(&document.title, format.as_str()),
                            mime_type: format.mime_type(),
                            bytes,
                        },
                    );
                }
                Err(error) => {
                    vm.download.finish(ticket, Err(error.clone()));
                    vm.ctx.report_error("다운로드에 실패했습니다", &error);
                }
            }
            vm.ctx.changed();
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::notification::NotificationKind;
    use crate::services::transport::Method;
    use crate::state::route::Route;
    use crate::test_support::{json, json_response, TestEnv};

    fn doc(id: DocumentId, title: &str, kind: &str) -> serde_json::Value {
        json!({ "documentId": id, "title": title, "documentType": kind, "uploadDate": "2024-01-01T00:00:00" })
    }

    fn loaded(env: &TestEnv, docs: serde_json::Value) -> DocumentListViewModel {
        let vm = DocumentListViewModel::new(env.ctx.clone());
        env.transport.reply_json(200, docs);
        vm.activate();
        env.run();
        vm
    }

    fn titles(docs: &[DocumentSummary]) -> Vec<(String, DocumentId)> {
        docs.iter().map(|d| (d.title.clone(), d.document_id)).collect()
    }

    #[test]
    fn keystrokes_inside_the_window_make_one_request() {
        let env = TestEnv::logged_in();
        let vm = DocumentListViewModel::new(env.ctx.clone());
        env.transport.reply_json(200, json!([doc(1, "abc", "메모")]));

        for (i, text) in ["a", "ab", "abc"].into_iter().enumerate() {
            if i > 0 {
                env.advance(120);
            }
            vm.set_keyword(text);
        }

        env.advance(299);
        assert_eq!(env.transport.request_count(), 0);

        env.advance(1);
        assert_eq!(env.transport.request_count(), 1);
        let request = env.transport.last_request().unwrap();
        assert_eq!(request.method, Method::Get);
        assert!(request.url.ends_with("/mysql/documents/user/1/search"));
        assert_eq!(request.query_param("keyword"), Some("abc"));
        assert_eq!(request.query_param("type"), None);
        assert_eq!(vm.visible_documents().len(), 1);
    }

    #[test]
    fn empty_filters_use_the_plain_list() {
        let env = TestEnv::logged_in();
        let vm = loaded(&env, json!([]));
        assert!(env
            .transport
            .last_request()
            .unwrap()
            .url
            .ends_with("/mysql/documents/user/1"));

        env.transport.reply_json(200, json!([]));
        vm.set_document_type(Some("보고서".into()));
        vm.search_now();
        env.run();
        let request = env.transport.last_request().unwrap();
        assert!(request.url.ends_with("/search"));
        assert_eq!(request.query_param("type"), Some("보고서"));
        assert_eq!(request.query_param("keyword"), None);

        // The cancelled debounce timer must not fire a second search
        env.advance(1000);
        assert_eq!(env.transport.request_count(), 2);
    }

    #[test]
    fn reset_clears_filters_and_reloads() {
        let env = TestEnv::logged_in();
        let vm = loaded(&env, json!([]));
        vm.set_keyword("q");
        vm.sort_by(SortKey::Title);

        env.transport.reply_json(200, json!([]));
        vm.reset_filters();
        env.advance(1000);

        assert_eq!(vm.query(), DocumentQuery::default());
        assert!(vm.sort().is_none());
        assert_eq!(env.transport.request_count(), 2);
        assert!(env
            .transport
            .last_request()
            .unwrap()
            .url
            .ends_with("/mysql/documents/user/1"));
    }

    #[test]
    fn a_stale_search_never_overwrites_a_newer_one() {
        let env = TestEnv::logged_in();
        let vm = DocumentListViewModel::new(env.ctx.clone());

        let slow = env.transport.defer();
        vm.set_keyword("old");
        vm.search_now();
        env.run();

        env.transport.reply_json(200, json!([doc(2, "new", "메모")]));
        vm.set_keyword("new");
        vm.search_now();
        env.run();
        assert_eq!(titles(&vm.visible_documents()), vec![("new".to_string(), 2)]);

        slow.send(Ok(json_response(200, json!([doc(1, "old", "메모")]))))
            .unwrap();
        env.run();
        assert_eq!(titles(&vm.visible_documents()), vec![("new".to_string(), 2)]);
    }

    #[test]
    fn resorting_is_idempotent() {
        let env = TestEnv::logged_in();
        let vm = loaded(
            &env,
            json!([
                doc(3, "banana", "메모"),
                doc(4, "apple", "보고서"),
                doc(1, "Cherry", "메모"),
                doc(2, "Apple", "이메일"),
            ]),
        );

        vm.sort_by(SortKey::Title);
        let ascending = vm.visible_documents();
        assert_eq!(
            titles(&ascending),
            vec![
                ("Apple".to_string(), 2),
                ("apple".to_string(), 4),
                ("banana".to_string(), 3),
                ("Cherry".to_string(), 1),
            ]
        );

        vm.sort_by(SortKey::Title);
        assert_eq!(vm.sort(), Some((SortKey::Title, SortDirection::Descending)));
        assert_eq!(vm.visible_documents()[0].title, "Cherry");

        vm.sort_by(SortKey::Title);
        assert_eq!(vm.visible_documents(), ascending);
        assert_eq!(env.transport.request_count(), 1);
    }

    #[test]
    fn type_filter_is_applied_locally() {
        let env = TestEnv::logged_in();
        let vm = loaded(
            &env,
            json!([doc(1, "a", "메모"), doc(2, "b", "보고서"), doc(3, "c", "메모")]),
        );
        vm.set_document_type(Some("메모".into()));
        let ids: Vec<_> = vm.visible_documents().iter().map(|d| d.document_id).collect();
        assert_eq!(ids, vec![1, 3]);
    }

    #[test]
    fn selecting_fetches_the_detail() {
        let env = TestEnv::logged_in();
        let vm = loaded(&env, json!([doc(9, "plan", "기획서")]));
        let document = vm.visible_documents()[0].clone();

        env.transport.reply_json(
            200,
            json!({ "content": "본문", "summary": { "summaryText": "요약", "tags": "[\"a\"]" } }),
        );
        vm.select(document);
        assert!(vm.detail_state().is_loading());
        env.run();

        assert!(env
            .transport
            .last_request()
            .unwrap()
            .url
            .ends_with("/integrated/documents/9"));
        let detail = vm.detail_state().data().cloned().unwrap();
        assert_eq!(detail.content.as_deref(), Some("본문"));
        assert_eq!(detail.summary.unwrap().tag_list(), vec!["a"]);
    }

    #[test]
    fn detail_failure_is_shown_in_place() {
        let env = TestEnv::logged_in();
        let vm = loaded(&env, json!([doc(9, "plan", "기획서")]));
        env.transport.reply_json(404, json!({ "message": "not found" }));
        vm.select(vm.visible_documents()[0].clone());
        env.run();
        assert_eq!(
            vm.detail_state().error().map(|e| e.message.clone()),
            Some("문서 내용을 불러오는데 실패했습니다.".to_string())
        );
    }

    #[test]
    fn delete_removes_locally_clears_selection_and_refetches() {
        let env = TestEnv::logged_in();
        let vm = loaded(&env, json!([doc(1, "a", "메모"), doc(2, "b", "메모")]));

        env.transport.reply_json(200, json!({ "content": "x" }));
        vm.select(vm.visible_documents()[0].clone());
        env.run();
        assert_eq!(vm.selected_id(), Some(1));

        env.transport.reply_text(200, "deleted");
        let refetch = env.transport.defer();
        vm.delete(1);
        assert!(vm.is_deleting(1));
        env.run();

        // Removed locally while the refetch is still in flight
        assert!(!vm.is_deleting(1));
        assert_eq!(titles(&vm.visible_documents()), vec![("b".to_string(), 2)]);
        assert_eq!(vm.selected_id(), None);
        assert!(vm.detail_state().is_idle());
        assert_eq!(
            env.last_notification(),
            Some((NotificationKind::Success, "문서가 삭제되었습니다.".into()))
        );

        let requests = env.transport.requests();
        assert_eq!(requests[2].method, Method::Delete);
        assert!(requests[2].url.ends_with("/mysql/documents/1"));
        assert!(requests[3].url.ends_with("/mysql/documents/user/1"));

        refetch
            .send(Ok(json_response(200, json!([doc(2, "b", "메모"), doc(5, "e", "메모")]))))
            .unwrap();
        env.run();
        assert_eq!(vm.visible_documents().len(), 2);
    }

    #[test]
    fn failed_delete_keeps_the_document() {
        let env = TestEnv::logged_in();
        let vm = loaded(&env, json!([doc(1, "a", "메모")]));
        env.transport.reply_json(500, json!({ "message": "locked" }));
        vm.delete(1);
        env.run();
        assert_eq!(vm.visible_documents().len(), 1);
        assert_eq!(
            env.last_notification(),
            Some((NotificationKind::Error, "문서 삭제에 실패했습니다: locked".into()))
        );
    }

    #[test]
    fn download_hands_the_bytes_to_the_file_sink() {
        let env = TestEnv::logged_in();
        let vm = loaded(&env, json!([doc(4, "월간 보고서", "보고서")]));
        env.transport.reply_json(200, json!({ "content": "x" }));
        vm.select(vm.visible_documents()[0].clone());
        env.run();

        env.transport.reply_bytes(200, b"PDFDATA".to_vec());
        vm.download_selected(DownloadFormat::Pdf);
        env.run();

        let request = env.transport.last_request().unwrap();
        assert!(request.url.ends_with("/integrated/documents/4/download"));
        assert_eq!(request.query_param("format"), Some("pdf"));

        let saved = env.files.saved();
        assert_eq!(saved.len(), 1);
        assert!(saved[0].file_name.starts_with("월간 보고서_"));
        assert!(saved[0].file_name.ends_with(".pdf"));
        assert_eq!(saved[0].mime_type, "application/pdf");
        assert_eq!(saved[0].bytes, b"PDFDATA".to_vec());
    }

    #[test]
    fn download_without_selection_warns() {
        let env = TestEnv::logged_in();
        let vm = loaded(&env, json!([]));
        vm.download_selected(DownloadFormat::Txt);
        env.run();
        assert_eq!(env.transport.request_count(), 1);
        assert_eq!(env.last_notification().unwrap().0, NotificationKind::Warning);
    }

    #[test]
    fn refresh_reloads_with_the_current_filters() {
        let env = TestEnv::logged_in();
        let vm = loaded(&env, json!([doc(1, "a", "메모")]));
        vm.set_document_type(Some("메모".into()));

        env.transport
            .reply_json(200, json!([doc(1, "a", "메모"), doc(2, "b", "메모")]));
        vm.search_now();
        env.run();
        env.advance(1000);

        assert_eq!(env.transport.request_count(), 2);
        assert_eq!(
            env.transport.last_request().unwrap().query_param("type"),
            Some("메모")
        );
        assert_eq!(vm.visible_documents().len(), 2);
    }

    #[test]
    fn a_debounced_search_is_dropped_once_signed_out() {
        let env = TestEnv::logged_in();
        let vm = DocumentListViewModel::new(env.ctx.clone());
        env.ctx.navigation.go(Route::Documents);

        vm.set_keyword("보고서");
        env.ctx.session.clear();
        env.advance(300);

        assert_eq!(env.transport.request_count(), 0);
        assert_eq!(env.ctx.navigation.current(), Route::Documents);
        assert!(env.notifications().is_empty());
    }

    #[test]
    fn clear_forgets_the_list_filters_and_selection() {
        let env = TestEnv::logged_in();
        let vm = loaded(&env, json!([doc(1, "a", "메모")]));
        env.transport
            .reply_json(200, json!({ "documentId": 1, "title": "a", "content": "body" }));
        vm.select(vm.visible_documents()[0].clone());
        env.run();
        vm.set_keyword("a");
        vm.sort_by(SortKey::Title);

        vm.clear();
        env.advance(1000);

        assert!(vm.documents_state().is_idle());
        assert!(vm.visible_documents().is_empty());
        assert!(vm.selected_id().is_none());
        assert!(vm.detail_state().is_idle());
        assert!(vm.sort().is_none());
        assert_eq!(vm.query(), DocumentQuery::default());
        assert_eq!(env.transport.request_count(), 2);
    }

    #[test]
    fn without_a_session_nothing_is_requested() {
        let env = TestEnv::new();
        let vm = DocumentListViewModel::new(env.ctx.clone());
        env.ctx.navigation.go(Route::Documents);
        vm.activate();
        env.run();
        assert_eq!(env.transport.request_count(), 0);
        assert_eq!(env.ctx.navigation.current(), Route::Login);
    }
}
