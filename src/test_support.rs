//! Native stand-ins for the browser: scripted HTTP, a manual clock and a
//! single-threaded executor.

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::rc::Rc;

use async_trait::async_trait;
use futures::channel::oneshot;
use futures::executor::{LocalPool, LocalSpawner};
use futures::future::LocalBoxFuture;
use futures::task::LocalSpawnExt;

pub use serde_json::json;

use crate::config::AppConfig;
use crate::models::document::DownloadArtifact;
use crate::models::notification::{Notification, NotificationKind};
use crate::models::session::Session;
use crate::services::error::ApiError;
use crate::services::transport::{HttpRequest, HttpResponse, Transport};
use crate::state::context::AppContext;
use crate::state::platform::{FileSink, Scheduler, Spawner, TimerHandle};
use crate::utils::storage::MemoryStore;

type Reply = Result<HttpResponse, ApiError>;

enum Scripted {
    Ready(Reply),
    Deferred(oneshot::Receiver<Reply>),
}

#[derive(Default)]
struct Script {
    requests: Vec<HttpRequest>,
    replies: VecDeque<Scripted>,
}

/// Answers requests in FIFO order from pre-recorded replies
#[derive(Clone, Default)]
pub struct ScriptedTransport {
    script: Rc<RefCell<Script>>,
}

pub fn status_text(status: u16) -> &'static str {
    match status {
        200 => "OK",
        201 => "Created",
        204 => "No Content",
        400 => "Bad Request",
        401 => "Unauthorized",
        404 => "Not Found",
        500 => "Internal Server Error",
        503 => "Service Unavailable",
        _ => "",
    }
}

pub fn response(status: u16, body: Vec<u8>) -> HttpResponse {
    HttpResponse {
        status,
        status_text: status_text(status).to_string(),
        body,
    }
}

pub fn json_response(status: u16, value: serde_json::Value) -> HttpResponse {
    response(status, serde_json::to_vec(&value).unwrap())
}

impl ScriptedTransport {
    pub fn new() -> Self {
        Self::default()
    }

    fn push(&self, reply: Scripted) {
        self.script.borrow_mut().replies.push_back(reply);
    }

    pub fn reply_json(&self, status: u16, value: serde_json::Value) {
        self.push(Scripted::Ready(Ok(json_response(status, value))));
    }

    pub fn reply_text(&self, status: u16, text: &str) {
        self.push(Scripted::Ready(Ok(response(status, text.as_bytes().to_vec()))));
    }

    pub fn reply_bytes(&self, status: u16, bytes: Vec<u8>) {
        self.push(Scripted::Ready(Ok(response(status, bytes))));
    }

    pub fn reply_error(&self, error: ApiError) {
        self.push(Scripted::Ready(Err(error)));
    }

    /// The next request waits until the returned sender fires
    pub fn defer(&self) -> oneshot::Sender<Reply> {
        let (tx, rx) = oneshot::channel();
        self.push(Scripted::Deferred(rx));
        tx
    }

    pub fn requests(&self) -> Vec<HttpRequest> {
        self.script.borrow().requests.clone()
    }

    pub fn request_count(&self) -> usize {
        self.script.borrow().requests.len()
    }

    pub fn last_request(&self) -> Option<HttpRequest> {
        self.script.borrow().requests.last().cloned()
    }
}

#[async_trait(?Send)]
impl Transport for ScriptedTransport {
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
        let reply = {
            let mut script = self.script.borrow_mut();
            let label = format!("{} {}", request.method.as_str(), request.url);
            script.requests.push(request);
            script
                .replies
                .pop_front()
                .unwrap_or_else(|| panic!("unexpected request: {}", label))
        };
        match reply {
            Scripted::Ready(reply) => reply,
            Scripted::Deferred(rx) => rx
                .await
                .unwrap_or_else(|_| Err(ApiError::Network("reply dropped".into()))),
        }
    }
}

struct PendingTimer {
    id: u64,
    due: u64,
    task: Box<dyn FnOnce()>,
    cancelled: Rc<Cell<bool>>,
}

#[derive(Default)]
struct Timers {
    now: u64,
    next_id: u64,
    pending: Vec<PendingTimer>,
}

struct CancelOnDrop(Rc<Cell<bool>>);

impl Drop for CancelOnDrop {
    fn drop(&mut self) {
        self.0.set(true);
    }
}

/// Virtual clock; time only moves through `advance`
#[derive(Clone, Default)]
pub struct ManualScheduler {
    timers: Rc<RefCell<Timers>>,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn now(&self) -> u64 {
        self.timers.borrow().now
    }

    pub fn pending_count(&self) -> usize {
        self.timers
            .borrow()
            .pending
            .iter()
            .filter(|t| !t.cancelled.get())
            .count()
    }

    /// Run every timer due within the next `ms`, in due order
    pub fn advance(&self, ms: u64) {
        let target = self.now() + ms;
        loop {
            let next = {
                let mut timers = self.timers.borrow_mut();
                timers.pending.retain(|t| !t.cancelled.get());
                let position = timers
                    .pending
                    .iter()
                    .enumerate()
                    .filter(|(_, t)| t.due <= target)
                    .min_by_key(|(_, t)| (t.due, t.id))
                    .map(|(i, _)| i);
                position.map(|i| {
                    let timer = timers.pending.remove(i);
                    timers.now = timer.due;
                    timer
                })
            };
            match next {
                Some(timer) => (timer.task)(),
                None => break,
            }
        }
        self.timers.borrow_mut().now = target;
    }
}

impl Scheduler for ManualScheduler {
    fn schedule(&self, delay_ms: u32, task: Box<dyn FnOnce()>) -> TimerHandle {
        let cancelled = Rc::new(Cell::new(false));
        let mut timers = self.timers.borrow_mut();
        timers.next_id += 1;
        let timer = PendingTimer {
            id: timers.next_id,
            due: timers.now + delay_ms as u64,
            task,
            cancelled: cancelled.clone(),
        };
        timers.pending.push(timer);
        TimerHandle::new(CancelOnDrop(cancelled))
    }
}

pub struct PoolSpawner(LocalSpawner);

impl Spawner for PoolSpawner {
    fn spawn(&self, task: LocalBoxFuture<'static, ()>) {
        self.0.spawn_local(task).expect("test pool is alive");
    }
}

#[derive(Clone, Default)]
pub struct RecordingFileSink {
    saved: Rc<RefCell<Vec<DownloadArtifact>>>,
}

impl RecordingFileSink {
    pub fn saved(&self) -> Vec<DownloadArtifact> {
        self.saved.borrow().clone()
    }
}

impl FileSink for RecordingFileSink {
    fn save(&self, artifact: DownloadArtifact) -> Result<(), String> {
        self.saved.borrow_mut().push(artifact);
        Ok(())
    }
}

pub fn test_session() -> Session {
    Session {
        user_id: 1,
        username: "tester".into(),
        email: Some("tester@example.com".into()),
        auth_token: "test-token".into(),
    }
}

/// A complete context over the fakes above
pub struct TestEnv {
    pub pool: RefCell<LocalPool>,
    pub transport: ScriptedTransport,
    pub scheduler: ManualScheduler,
    pub store: MemoryStore,
    pub files: RecordingFileSink,
    pub ctx: AppContext,
}

impl TestEnv {
    pub fn new() -> Self {
        let pool = LocalPool::new();
        let spawner = PoolSpawner(pool.spawner());
        let transport = ScriptedTransport::new();
        let scheduler = ManualScheduler::new();
        let store = MemoryStore::new();
        let files = RecordingFileSink::default();
        let config = AppConfig {
            backend_url: "http://api.test".into(),
            ..AppConfig::default()
        };
        let ctx = AppContext::new(
            config,
            Rc::new(transport.clone()),
            Rc::new(store.clone()),
            Rc::new(scheduler.clone()),
            Rc::new(spawner),
            Rc::new(files.clone()),
        );
        Self {
            pool: RefCell::new(pool),
            transport,
            scheduler,
            store,
            files,
            ctx,
        }
    }

    pub fn logged_in() -> Self {
        let env = Self::new();
        env.ctx.session.save(&test_session()).unwrap();
        env
    }

    /// Drive spawned tasks until none can make progress
    pub fn run(&self) {
        self.pool.borrow_mut().run_until_stalled();
    }

    /// Move the clock, then let whatever the timers spawned run
    pub fn advance(&self, ms: u64) {
        self.scheduler.advance(ms);
        self.run();
    }

    pub fn notifications(&self) -> Vec<Notification> {
        self.ctx.notifier.items()
    }

    pub fn last_notification(&self) -> Option<(NotificationKind, String)> {
        self.notifications()
            .last()
            .map(|n| (n.kind, n.message.clone()))
    }
}
