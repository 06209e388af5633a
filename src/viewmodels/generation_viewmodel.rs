// ============================================================================
// GENERATION VIEWMODEL - Write a new document in the learned style
// ============================================================================

use std::cell::RefCell;
use std::rc::Rc;

use crate::models::document::{DocumentId, DocumentSummary, DownloadArtifact, DownloadFormat};
use crate::models::generation::{
    DocumentLength, DownloadAction, GeneratedDocument, GenerationRequest,
};
use crate::services::api_client::DocumentQuery;
use crate::services::error::ApiError;
use crate::state::context::AppContext;
use crate::state::request_state::{Operation, RequestState};
use crate::utils::constants::DEFAULT_DOCUMENT_TYPE;
use crate::viewmodels::validation::{require, ValidationError};
use crate::viewmodels::{artifact_name, deliver, fetch_documents, DocumentsOp};

/// Raw form input; `keywords` is the comma separated text field
#[derive(Clone, Debug, PartialEq)]
pub struct GenerationForm {
    pub topic: String,
    pub document_type: String,
    pub keywords: String,
    pub length: DocumentLength,
    pub additional_instructions: String,
    pub reference_document_id: Option<DocumentId>,
}

impl Default for GenerationForm {
    fn default() -> Self {
        Self {
            topic: String::new(),
            document_type: DEFAULT_DOCUMENT_TYPE.to_string(),
            keywords: String::new(),
            length: DocumentLength::default(),
            additional_instructions: String::new(),
            reference_document_id: None,
        }
    }
}

pub fn split_keywords(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|k| !k.is_empty())
        .map(str::to_string)
        .collect()
}

impl GenerationForm {
    pub fn to_request(&self, user_id: i64) -> Result<GenerationRequest, ValidationError> {
        require(&self.topic, "주제를 입력해주세요.")?;
        let reference = self
            .reference_document_id
            .ok_or(ValidationError::NoReferenceDocument)?;

        let instructions = self.additional_instructions.trim();
        Ok(GenerationRequest {
            user_id,
            document_type: self.document_type.clone(),
            topic: self.topic.trim().to_string(),
            keywords: split_keywords(&self.keywords),
            length: self.length,
            additional_instructions: if instructions.is_empty() {
                None
            } else {
                Some(instructions.to_string())
            },
            reference_document_id: Some(reference),
        })
    }
}

#[derive(Clone)]
pub struct GenerationViewModel {
    ctx: AppContext,
    form: Rc<RefCell<GenerationForm>>,
    /// Topic the shown result was generated for; names the downloads
    generated_topic: Rc<RefCell<String>>,
    references: DocumentsOp,
    generation: Operation<GeneratedDocument>,
    download: Operation<DownloadFormat>,
}

impl GenerationViewModel {
    pub fn new(ctx: AppContext) -> Self {
        Self {
            ctx,
            form: Rc::new(RefCell::new(GenerationForm::default())),
            generated_topic: Rc::new(RefCell::new(String::new())),
            references: DocumentsOp::new(),
            generation: Operation::new(),
            download: Operation::new(),
        }
    }

    pub fn activate(&self) {
        fetch_documents(&self.ctx, &self.references, DocumentQuery::default());
    }

    pub fn form(&self) -> GenerationForm {
        self.form.borrow().clone()
    }

    pub fn edit(&self, f: impl FnOnce(&mut GenerationForm)) {
        f(&mut self.form.borrow_mut());
    }

    pub fn references_state(&self) -> RequestState<Vec<DocumentSummary>> {
        self.references.state()
    }

    pub fn generation_state(&self) -> RequestState<GeneratedDocument> {
        self.generation.state()
    }

    pub fn is_downloading(&self) -> bool {
        self.download.is_loading()
    }

    /// Offered once a document has been generated
    pub fn download_actions(&self) -> Vec<DownloadAction> {
        self.generation.with(|state| match state.data() {
            Some(document) => [DownloadFormat::Txt, DownloadFormat::Docx]
                .into_iter()
                .map(|format| DownloadAction {
                    document_id: document.document_id,
                    format,
                })
                .collect(),
            None => Vec::new(),
        })
    }

    pub fn submit(&self) {
        let Some(session) = self.ctx.require_session() else {
            return;
        };
        let request = match self.form.borrow().to_request(session.user_id) {
            Ok(request) => request,
            Err(error) => {
                self.ctx.notifier.warning(error.to_string());
                return;
            }
        };

        log::info!(
            "✍️ [GENERATE] {} / {} ({} keywords)",
            request.document_type,
            request.topic,
            request.keywords.len()
        );
        *self.generated_topic.borrow_mut() = request.topic.clone();
        let ticket = self.generation.begin();
        self.ctx.changed();

        let vm = self.clone();
        self.ctx.spawn(async move {
            let result = vm.ctx.api.generate_document(&request).await;
            if !vm.generation.is_current(ticket) {
                return;
            }
            match result {
                Ok(document) => {
                    log::info!(
                        "✅ [GENERATE] Document {} in {:?} ms",
                        document.document_id,
                        document.processing_time
                    );
                    vm.generation.finish::<ApiError>(ticket, Ok(document));
                    vm.ctx.notifier.success("문서 생성 완료!");
                }
                Err(error) => {
                    vm.generation.finish(ticket, Err(error.clone()));
                    vm.ctx.report_error("문서 생성 실패", &error);
                }
            }
            vm.ctx.changed();
        });
    }

    pub fn download(&self, action: DownloadAction) {
        if self.ctx.require_session().is_none() {
            return;
        }
        let topic = self.generated_topic.borrow().clone();
        let ticket = self.download.begin();
        self.ctx.changed();

        let vm = self.clone();
        self.ctx.spawn(async move {
            let result = vm
                .ctx
                .api
                .download_document(action.document_id, action.format)
                .await;
            if !vm.download.is_current(ticket) {
                return;
            }
            match result {
                Ok(bytes) => {
                    vm.download.finish::<ApiError>(ticket, Ok(action.format));
                    deliver(
                        &vm.ctx,
                        DownloadArtifact {
                            file_name: artifact_name(&topic, action.format.as_str()),
                            mime_type: action.format.mime_type(),
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

    /// Signed out: the reference list belongs to the old user too
    pub fn clear(&self) {
        self.references.reset();
        self.reset();
    }

    /// Back to the default form; a generation still in flight is ignored
    pub fn reset(&self) {
        *self.form.borrow_mut() = GenerationForm::default();
        self.generated_topic.borrow_mut().clear();
        self.generation.reset();
        self.download.reset();
        self.ctx.changed();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::notification::NotificationKind;
    use crate::services::transport::{Method, RequestBody};
    use crate::test_support::{json, json_response, TestEnv};

    fn ready(env: &TestEnv) -> GenerationViewModel {
        env.transport.reply_json(
            200,
            json!([{ "documentId": 3, "title": "참고 보고서", "documentType": "보고서" }]),
        );
        let vm = GenerationViewModel::new(env.ctx.clone());
        vm.activate();
        env.run();
        vm
    }

    #[test]
    fn keywords_are_split_trimmed_and_filtered() {
        assert_eq!(
            split_keywords(" 매출, 성장 ,,  , 전략 "),
            vec!["매출", "성장", "전략"]
        );
        assert!(split_keywords("").is_empty());
    }

    #[test]
    fn blank_instructions_become_null() {
        let form = GenerationForm {
            topic: "t".into(),
            additional_instructions: "   ".into(),
            reference_document_id: Some(1),
            ..GenerationForm::default()
        };
        let request = form.to_request(1).unwrap();
        assert_eq!(request.additional_instructions, None);
        assert_eq!(request.length, DocumentLength::Medium);
        assert_eq!(request.document_type, "보고서");
    }

    #[test]
    fn empty_topic_or_missing_reference_never_calls_generate() {
        let env = TestEnv::logged_in();
        let vm = ready(&env);

        vm.edit(|f| {
            f.topic = "   ".into();
            f.reference_document_id = Some(3);
        });
        vm.submit();
        assert_eq!(
            env.last_notification(),
            Some((NotificationKind::Warning, "주제를 입력해주세요.".into()))
        );

        vm.edit(|f| {
            f.topic = "4분기 실적".into();
            f.reference_document_id = None;
        });
        vm.submit();
        assert_eq!(
            env.last_notification(),
            Some((NotificationKind::Warning, "참조 문서를 선택해주세요.".into()))
        );

        env.run();
        assert_eq!(env.transport.request_count(), 1);
        assert!(vm.generation_state().is_idle());
        assert!(vm.download_actions().is_empty());
    }

    #[test]
    fn generated_document_enables_txt_and_docx_downloads() {
        let env = TestEnv::logged_in();
        let vm = ready(&env);
        vm.edit(|f| {
            f.topic = "4분기 실적".into();
            f.keywords = "매출, 성장".into();
            f.length = DocumentLength::Long;
            f.reference_document_id = Some(3);
        });

        let reply = env.transport.defer();
        vm.submit();
        env.run();
        assert!(vm.generation_state().is_loading());

        reply
            .send(Ok(json_response(
                200,
                json!({
                    "documentId": 42,
                    "documentType": "보고서",
                    "processingTime": 1200,
                    "status": "DONE",
                    "content": "생성된 본문"
                }),
            )))
            .unwrap();
        env.run();

        let document = vm.generation_state().data().cloned().unwrap();
        assert_eq!(document.document_id, 42);
        assert_eq!(document.content, "생성된 본문");
        assert_eq!(
            vm.download_actions(),
            vec![
                DownloadAction { document_id: 42, format: DownloadFormat::Txt },
                DownloadAction { document_id: 42, format: DownloadFormat::Docx },
            ]
        );

        let request = env.transport.last_request().unwrap();
        assert_eq!(request.method, Method::Post);
        assert!(request.url.ends_with("/documents/generate"));
        match request.body {
            RequestBody::Json(body) => {
                assert_eq!(body["userId"], 1);
                assert_eq!(body["topic"], "4분기 실적");
                assert_eq!(body["keywords"], json!(["매출", "성장"]));
                assert_eq!(body["length"], "long");
                assert_eq!(body["referenceDocumentId"], 3);
                assert!(body["additionalInstructions"].is_null());
            }
            other => panic!("expected JSON, got {:?}", other),
        }
        assert_eq!(env.last_notification().unwrap().0, NotificationKind::Success);
    }

    #[test]
    fn download_uses_the_topic_for_the_file_name() {
        let env = TestEnv::logged_in();
        let vm = ready(&env);
        vm.edit(|f| {
            f.topic = "주간 회의".into();
            f.reference_document_id = Some(3);
        });
        env.transport
            .reply_json(200, json!({ "documentId": 42, "content": "c" }));
        vm.submit();
        env.run();

        env.transport.reply_bytes(200, b"docx-bytes".to_vec());
        vm.download(vm.download_actions()[1]);
        env.run();

        let request = env.transport.last_request().unwrap();
        assert!(request.url.ends_with("/integrated/documents/42/download"));
        assert_eq!(request.query_param("format"), Some("docx"));
        let saved = env.files.saved();
        assert!(saved[0].file_name.starts_with("주간 회의_"));
        assert!(saved[0].file_name.ends_with(".docx"));
    }

    #[test]
    fn reset_restores_defaults_and_drops_in_flight_results() {
        let env = TestEnv::logged_in();
        let vm = ready(&env);
        vm.edit(|f| {
            f.topic = "t".into();
            f.document_type = "메모".into();
            f.length = DocumentLength::Short;
            f.reference_document_id = Some(3);
        });
        let reply = env.transport.defer();
        vm.submit();
        env.run();

        vm.reset();
        assert_eq!(vm.form(), GenerationForm::default());

        reply
            .send(Ok(json_response(200, json!({ "documentId": 1, "content": "late" }))))
            .unwrap();
        env.run();
        assert!(vm.generation_state().is_idle());
    }

    #[test]
    fn backend_failure_lands_as_failure() {
        let env = TestEnv::logged_in();
        let vm = ready(&env);
        vm.edit(|f| {
            f.topic = "t".into();
            f.reference_document_id = Some(3);
        });
        env.transport.reply_text(500, "LLM timeout");
        vm.submit();
        env.run();
        assert_eq!(
            vm.generation_state().error().map(|e| e.message.clone()),
            Some("LLM timeout".to_string())
        );
        assert_eq!(
            env.last_notification(),
            Some((NotificationKind::Error, "문서 생성 실패: LLM timeout".into()))
        );
    }
}
