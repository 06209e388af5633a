// ============================================================================
// UPLOAD VIEWMODEL - Pick a reference document and send it to the backend
// ============================================================================
// Extension and size are checked locally before any network call. After a
// successful upload the picked file is cleared and the user's document list
// is fetched again.
// ============================================================================

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use crate::models::document::{DocumentSummary, SelectedFile, UploadAck};
use crate::services::api_client::DocumentQuery;
use crate::services::error::ApiError;
use crate::state::context::AppContext;
use crate::state::request_state::{Operation, RequestState};
use crate::viewmodels::validation::{validate_upload, validate_upload_meta};
use crate::viewmodels::{fetch_documents, DocumentsOp};

#[derive(Clone)]
pub struct UploadViewModel {
    ctx: AppContext,
    selected: Rc<RefCell<Option<SelectedFile>>>,
    summarize: Rc<Cell<bool>>,
    upload: Operation<UploadAck>,
    documents: DocumentsOp,
}

impl UploadViewModel {
    pub fn new(ctx: AppContext) -> Self {
        Self {
            ctx,
            selected: Rc::new(RefCell::new(None)),
            summarize: Rc::new(Cell::new(false)),
            upload: Operation::new(),
            documents: DocumentsOp::new(),
        }
    }

    /// Page entry: show the user's documents
    pub fn activate(&self) {
        self.refresh();
    }

    pub fn refresh(&self) {
        fetch_documents(&self.ctx, &self.documents, DocumentQuery::default());
    }

    pub fn selected(&self) -> Option<SelectedFile> {
        self.selected.borrow().clone()
    }

    pub fn summarize(&self) -> bool {
        self.summarize.get()
    }

    pub fn upload_state(&self) -> RequestState<UploadAck> {
        self.upload.state()
    }

    pub fn documents_state(&self) -> RequestState<Vec<DocumentSummary>> {
        self.documents.state()
    }

    /// Checked before the file is read; a refusal warns like `select_file`
    pub fn accepts(&self, name: &str, size: u64) -> bool {
        match validate_upload_meta(name, size, self.ctx.config.max_upload_bytes) {
            Ok(()) => true,
            Err(error) => {
                log::warn!("⚠️ [UPLOAD] Rejected {} before reading: {}", name, error);
                self.ctx.notifier.warning(error.to_string());
                false
            }
        }
    }

    /// An invalid pick is refused with a warning; the previous pick stays
    pub fn select_file(&self, file: SelectedFile) {
        if let Err(error) = validate_upload(Some(&file), self.ctx.config.max_upload_bytes) {
            log::warn!("⚠️ [UPLOAD] Rejected {}: {}", file.name, error);
            self.ctx.notifier.warning(error.to_string());
            return;
        }
        log::info!("📎 [UPLOAD] Selected {} ({} bytes)", file.name, file.size);
        *self.selected.borrow_mut() = Some(file);
        self.ctx.changed();
    }

    pub fn clear_selection(&self) {
        self.selected.borrow_mut().take();
        self.ctx.changed();
    }

    /// Signed out: forget the pick and the fetched list
    pub fn clear(&self) {
        self.selected.borrow_mut().take();
        self.summarize.set(false);
        self.upload.reset();
        self.documents.reset();
    }

    pub fn set_summarize(&self, summarize: bool) {
        self.summarize.set(summarize);
    }

    pub fn upload(&self) {
        let file = {
            let selected = self.selected.borrow();
            match validate_upload(selected.as_ref(), self.ctx.config.max_upload_bytes) {
                Ok(file) => file.clone(),
                Err(error) => {
                    self.ctx.notifier.warning(error.to_string());
                    return;
                }
            }
        };
        let Some(session) = self.ctx.require_session() else {
            return;
        };
        let summarize = self.summarize.get();

        log::info!("📤 [UPLOAD] Uploading {} (summarize={})", file.name, summarize);
        let ticket = self.upload.begin();
        self.ctx.changed();

        let vm = self.clone();
        self.ctx.spawn(async move {
            let result = vm
                .ctx
                .api
                .upload_document(session.user_id, &file, summarize)
                .await;
            if !vm.upload.is_current(ticket) {
                return;
            }
            match result {
                Ok(ack) => {
                    log::info!("✅ [UPLOAD] {} uploaded", file.name);
                    vm.upload.finish::<ApiError>(ticket, Ok(ack));
                    vm.selected.borrow_mut().take();
                    vm.ctx.notifier.success("업로드 성공!");
                    vm.refresh();
                }
                Err(error) => {
                    vm.upload.finish(ticket, Err(error.clone()));
                    vm.ctx.report_error("업로드 실패", &error);
                }
            }
            vm.ctx.changed();
        });
    }
}
