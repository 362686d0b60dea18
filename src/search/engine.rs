use std::collections::{HashSet, VecDeque};
use std::num::NonZeroUsize;
use std::sync::Arc;

use lru::LruCache;
use tokio::runtime::{Builder, Handle, Runtime};
use tokio::sync::mpsc::{
    UnboundedReceiver, UnboundedSender, error::TryRecvError, unbounded_channel,
};
use tokio::task::JoinHandle;

use crate::dictionary::DictionaryFilter;
use crate::error::{AppError, AppResult};
use crate::model::{LanguageCode, SearchResult};

pub type SessionId = u64;

/// Identifies one submitted filter pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FilterTicket {
    pub session: SessionId,
    pub generation: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterEvent {
    Completed {
        ticket: FilterTicket,
        results: Arc<[SearchResult]>,
    },
    Failed {
        ticket: FilterTicket,
        message: String,
    },
}

impl FilterEvent {
    pub fn ticket(&self) -> FilterTicket {
        match self {
            Self::Completed { ticket, .. } | Self::Failed { ticket, .. } => *ticket,
        }
    }
}

/// Asynchronous filtering as seen by a search screen.
///
/// `submit` must return without waiting for the filter; completions are
/// collected later through `drain_events`, in any order.
pub trait FilterService {
    fn open_session(&mut self) -> SessionId;

    fn submit(
        &mut self,
        session: SessionId,
        language: &LanguageCode,
        query: &str,
    ) -> AppResult<FilterTicket>;

    /// Drops queued work and any later events of `session`.
    fn close_session(&mut self, session: SessionId);

    fn drain_events(&mut self) -> Vec<FilterEvent>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineOptions {
    /// Cached `(language, query)` results; 0 disables the cache.
    pub cache_entries: usize,
}

impl Default for EngineOptions {
    fn default() -> Self {
        Self { cache_entries: 128 }
    }
}

#[derive(Debug, Clone)]
struct FilterJob {
    ticket: FilterTicket,
    language: LanguageCode,
    query: String,
}

enum WorkerRequest {
    Query(FilterJob),
    Close(SessionId),
    Shutdown,
}

enum WorkerControl {
    Continue,
    Shutdown,
}

type ResultCache = LruCache<(LanguageCode, String), Arc<[SearchResult]>>;

pub struct FilterEngine {
    request_tx: UnboundedSender<WorkerRequest>,
    event_rx: UnboundedReceiver<FilterEvent>,
    next_session: SessionId,
    next_generation: u64,
    /// Sessions opened and not yet closed.
    live: HashSet<SessionId>,
    _runtime: FilterWorkerRuntime,
    worker: Option<JoinHandle<()>>,
}

struct FilterWorkerRuntime {
    _owned: Option<Runtime>,
    handle: Handle,
}

impl FilterWorkerRuntime {
    fn new() -> AppResult<Self> {
        if let Ok(handle) = Handle::try_current() {
            return Ok(Self {
                _owned: None,
                handle,
            });
        }

        let runtime = Builder::new_multi_thread()
            .enable_all()
            .thread_name("prevo-filter")
            .build()
            .map_err(|source| {
                AppError::io_with_context(source, "failed to start filter runtime")
            })?;
        let handle = runtime.handle().clone();
        Ok(Self {
            _owned: Some(runtime),
            handle,
        })
    }

    fn spawn_blocking<F>(&self, task: F) -> JoinHandle<()>
    where
        F: FnOnce() + Send + 'static,
    {
        self.handle.spawn_blocking(task)
    }
}

impl FilterEngine {
    pub fn new(dictionary: Arc<dyn DictionaryFilter>, options: EngineOptions) -> AppResult<Self> {
        let (request_tx, request_rx) = unbounded_channel();
        let (event_tx, event_rx) = unbounded_channel();
        let runtime = FilterWorkerRuntime::new()?;
        let cache = NonZeroUsize::new(options.cache_entries).map(LruCache::new);
        let worker =
            runtime.spawn_blocking(move || worker_main(request_rx, event_tx, dictionary, cache));

        Ok(Self {
            request_tx,
            event_rx,
            next_session: 0,
            next_generation: 0,
            live: HashSet::new(),
            _runtime: runtime,
            worker: Some(worker),
        })
    }
}

impl FilterService for FilterEngine {
    fn open_session(&mut self) -> SessionId {
        self.next_session = self.next_session.saturating_add(1);
        self.live.insert(self.next_session);
        tracing::debug!(session = self.next_session, "filter session opened");
        self.next_session
    }

    fn submit(
        &mut self,
        session: SessionId,
        language: &LanguageCode,
        query: &str,
    ) -> AppResult<FilterTicket> {
        if !self.live.contains(&session) {
            return Err(AppError::invariant(format!(
                "filter submitted for unknown or closed session {session}"
            )));
        }
        self.next_generation = self.next_generation.saturating_add(1);

        let ticket = FilterTicket {
            session,
            generation: self.next_generation,
        };
        let job = FilterJob {
            ticket,
            language: language.clone(),
            query: query.to_string(),
        };

        self.request_tx
            .send(WorkerRequest::Query(job))
            .map_err(|_| AppError::unsupported("filter worker is not available"))?;

        Ok(ticket)
    }

    fn close_session(&mut self, session: SessionId) {
        if !self.live.remove(&session) {
            return;
        }
        tracing::debug!(session, "filter session closed");
        let _ = self.request_tx.send(WorkerRequest::Close(session));
    }

    fn drain_events(&mut self) -> Vec<FilterEvent> {
        let mut drained = Vec::new();

        loop {
            match self.event_rx.try_recv() {
                Ok(event) => {
                    if self.live.contains(&event.ticket().session) {
                        drained.push(event);
                    }
                }
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => break,
            }
        }

        drained
    }
}

impl Drop for FilterEngine {
    fn drop(&mut self) {
        let _ = self.request_tx.send(WorkerRequest::Shutdown);
        if let Some(worker) = self.worker.take() {
            worker.abort();
        }
    }
}

fn worker_main(
    mut request_rx: UnboundedReceiver<WorkerRequest>,
    event_tx: UnboundedSender<FilterEvent>,
    dictionary: Arc<dyn DictionaryFilter>,
    mut cache: Option<ResultCache>,
) {
    let mut queue: VecDeque<FilterJob> = VecDeque::new();

    loop {
        if queue.is_empty() {
            let Some(request) = request_rx.blocking_recv() else {
                break;
            };
            if let WorkerControl::Shutdown = enqueue(&mut queue, request) {
                break;
            }
        }

        if let WorkerControl::Shutdown = flush_requests(&mut request_rx, &mut queue) {
            break;
        }

        let Some(job) = queue.pop_front() else {
            continue;
        };
        let event = run_job(job, dictionary.as_ref(), cache.as_mut());
        if event_tx.send(event).is_err() {
            break;
        }
    }
}

fn enqueue(queue: &mut VecDeque<FilterJob>, request: WorkerRequest) -> WorkerControl {
    match request {
        WorkerRequest::Query(job) => {
            // Only the newest query of a session can still be current.
            queue.retain(|queued| queued.ticket.session != job.ticket.session);
            queue.push_back(job);
            WorkerControl::Continue
        }
        WorkerRequest::Close(session) => {
            queue.retain(|queued| queued.ticket.session != session);
            WorkerControl::Continue
        }
        WorkerRequest::Shutdown => WorkerControl::Shutdown,
    }
}

fn flush_requests(
    request_rx: &mut UnboundedReceiver<WorkerRequest>,
    queue: &mut VecDeque<FilterJob>,
) -> WorkerControl {
    loop {
        match request_rx.try_recv() {
            Ok(request) => {
                if let WorkerControl::Shutdown = enqueue(queue, request) {
                    return WorkerControl::Shutdown;
                }
            }
            Err(TryRecvError::Empty) => break,
            Err(TryRecvError::Disconnected) => return WorkerControl::Shutdown,
        }
    }

    WorkerControl::Continue
}

fn run_job(
    job: FilterJob,
    dictionary: &dyn DictionaryFilter,
    cache: Option<&mut ResultCache>,
) -> FilterEvent {
    let key = (job.language, job.query);
    let Some(cache) = cache else {
        return filter_event(job.ticket, dictionary.filter(&key.0, &key.1));
    };

    if let Some(results) = cache.get(&key) {
        return FilterEvent::Completed {
            ticket: job.ticket,
            results: Arc::clone(results),
        };
    }

    let event = filter_event(job.ticket, dictionary.filter(&key.0, &key.1));
    if let FilterEvent::Completed { results, .. } = &event {
        cache.put(key, Arc::clone(results));
    }
    event
}

fn filter_event(ticket: FilterTicket, outcome: AppResult<Vec<SearchResult>>) -> FilterEvent {
    match outcome {
        Ok(results) => FilterEvent::Completed {
            ticket,
            results: results.into(),
        },
        Err(err) => FilterEvent::Failed {
            ticket,
            message: err.to_string(),
        },
    }
}
