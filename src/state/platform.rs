// ============================================================================
// PLATFORM - Timers, task spawning and file saving
// ============================================================================
// Browser implementations sit on gloo-timers / wasm-bindgen-futures / the
// DOM; controllers only see the traits.
// ============================================================================

use std::any::Any;

use futures::future::LocalBoxFuture;
use gloo_timers::callback::Timeout;

use crate::models::document::DownloadArtifact;

/// Keeps a scheduled task alive. Dropping the handle cancels the task.
pub struct TimerHandle {
    inner: Option<Box<dyn Any>>,
}

impl TimerHandle {
    pub fn new<T: 'static>(inner: T) -> Self {
        Self {
            inner: Some(Box::new(inner)),
        }
    }

    /// Let the task run even though nobody holds the handle anymore
    pub fn detach(mut self) {
        if let Some(inner) = self.inner.take() {
            std::mem::forget(inner);
        }
    }
}

pub trait Scheduler {
    fn schedule(&self, delay_ms: u32, task: Box<dyn FnOnce()>) -> TimerHandle;
}

#[derive(Clone, Copy, Default)]
pub struct BrowserScheduler;

impl Scheduler for BrowserScheduler {
    fn schedule(&self, delay_ms: u32, task: Box<dyn FnOnce()>) -> TimerHandle {
        // gloo's Timeout clears itself on drop
        TimerHandle::new(Timeout::new(delay_ms, task))
    }
}

pub trait Spawner {
    fn spawn(&self, task: LocalBoxFuture<'static, ()>);
}

#[derive(Clone, Copy, Default)]
pub struct BrowserSpawner;

impl Spawner for BrowserSpawner {
    fn spawn(&self, task: LocalBoxFuture<'static, ()>) {
        wasm_bindgen_futures::spawn_local(task);
    }
}

/// Where downloaded documents end up
pub trait FileSink {
    fn save(&self, artifact: DownloadArtifact) -> Result<(), String>;
}

#[derive(Clone, Copy, Default)]
pub struct BrowserFileSink;

impl FileSink for BrowserFileSink {
    fn save(&self, artifact: DownloadArtifact) -> Result<(), String> {
        crate::dom::trigger_download(&artifact).map_err(|e| format!("{:?}", e))
    }
}
