// ============================================================================
// STYLE LEARNING VIEWMODEL
// ============================================================================

use crate::models::document::DocumentSummary;
use crate::models::style::StyleLearningResult;
use crate::services::api_client::DocumentQuery;
use crate::services::error::ApiError;
use crate::state::context::AppContext;
use crate::state::request_state::{Operation, RequestState};
use crate::viewmodels::validation::validate_style_corpus;
use crate::viewmodels::{fetch_documents, DocumentsOp};

#[derive(Clone)]
pub struct StyleLearningViewModel {
    ctx: AppContext,
    documents: DocumentsOp,
    learning: Operation<StyleLearningResult>,
}

impl StyleLearningViewModel {
    pub fn new(ctx: AppContext) -> Self {
        Self {
            ctx,
            documents: DocumentsOp::new(),
            learning: Operation::new(),
        }
    }

    pub fn activate(&self) {
        self.refresh();
    }

    pub fn refresh(&self) {
        fetch_documents(&self.ctx, &self.documents, DocumentQuery::default());
    }

    pub fn documents_state(&self) -> RequestState<Vec<DocumentSummary>> {
        self.documents.state()
    }

    pub fn learning_state(&self) -> RequestState<StyleLearningResult> {
        self.learning.state()
    }

    pub fn document_count(&self) -> usize {
        self.documents
            .with(|state| state.data().map(Vec::len).unwrap_or(0))
    }

    pub fn clear(&self) {
        self.documents.reset();
        self.learning.reset();
    }

    pub fn learn(&self) {
        if let Err(error) = validate_style_corpus(self.document_count()) {
            self.ctx.notifier.warning(error.to_string());
            return;
        }
        let Some(session) = self.ctx.require_session() else {
            return;
        };

        log::info!("🧠 [STYLE] Learning style from {} documents", self.document_count());
        let ticket = self.learning.begin();
        self.ctx.changed();

        let vm = self.clone();
        self.ctx.spawn(async move {
            let result = vm.ctx.api.learn_style(session.user_id).await;
            if !vm.learning.is_current(ticket) {
                return;
            }
            match result {
                Ok(outcome) => {
                    log::info!("✅ [STYLE] {:?}", outcome.status);
                    vm.learning.finish::<ApiError>(ticket, Ok(outcome));
                    vm.ctx.notifier.success("문체 학습 완료!");
                }
                Err(error) => {
                    vm.learning.finish(ticket, Err(error.clone()));
                    vm.ctx.report_error("문체 학습 실패", &error);
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
    use crate::test_support::{json, TestEnv};

    fn with_documents(env: &TestEnv, count: usize) -> StyleLearningViewModel {
        let docs: Vec<_> = (0..count)
            .map(|i| json!({ "documentId": i, "title": format!("doc {}", i) }))
            .collect();
        env.transport.reply_json(200, json!(docs));
        let vm = StyleLearningViewModel::new(env.ctx.clone());
        vm.activate();
        env.run();
        vm
    }

    #[test]
    fn two_documents_are_not_enough() {
        let env = TestEnv::logged_in();
        let vm = with_documents(&env, 2);

        vm.learn();
        env.run();

        assert_eq!(env.transport.request_count(), 1);
        assert!(vm.learning_state().is_idle());
        assert_eq!(
            env.last_notification(),
            Some((
                NotificationKind::Warning,
                "문체 학습을 위해서는 최소 3개의 문서가 필요합니다.".into()
            ))
        );
    }

    #[test]
    fn learning_posts_for_the_current_user() {
        let env = TestEnv::logged_in();
        let vm = with_documents(&env, 3);

        env.transport.reply_json(
            200,
            json!({ "documentCount": 3, "status": "COMPLETED", "message": "done" }),
        );
        vm.learn();
        assert!(vm.learning_state().is_loading());
        env.run();

        let request = env.transport.last_request().unwrap();
        assert_eq!(request.method, Method::Post);
        assert!(request.url.ends_with("/style/learn/1"));
        let result = vm.learning_state().data().cloned().unwrap();
        assert_eq!(result.document_count, Some(3));
        assert_eq!(result.status.as_deref(), Some("COMPLETED"));
        assert_eq!(env.last_notification().unwrap().0, NotificationKind::Success);
    }

    #[test]
    fn failure_is_reported() {
        let env = TestEnv::logged_in();
        let vm = with_documents(&env, 4);
        env.transport.reply_json(500, json!({ "message": "model busy" }));
        vm.learn();
        env.run();
        assert_eq!(
            vm.learning_state().error().map(|e| e.status),
            Some(Some(500))
        );
        assert_eq!(
            env.last_notification(),
            Some((NotificationKind::Error, "문체 학습 실패: model busy".into()))
        );
    }
}
