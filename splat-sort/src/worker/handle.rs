use std::collections::VecDeque;
use std::sync::{Mutex, mpsc};
use std::thread::JoinHandle;
use std::time::Duration;

use tracing::{debug, warn};

use super::protocol::{SortResult, WorkerRequest};
use super::sort_worker::SortWorker;
use crate::error::WorkerError;

/// Producer-side endpoint of the sort worker.
///
/// On native targets the worker runs on a dedicated thread and all traffic
/// goes through channels; [`SortWorkerHandle::try_recv`] never blocks. On
/// wasm32 there are no threads, so the worker runs inline on submission and
/// its reply is held until the next poll. Both keep the same contract.
pub struct SortWorkerHandle {
    transport: Transport,
}

enum Transport {
    Thread {
        requests: Option<mpsc::Sender<WorkerRequest>>,
        // Receiver is not Sync; the mutex lets the handle live in shared resources.
        results: Mutex<mpsc::Receiver<SortResult>>,
        thread: Option<JoinHandle<()>>,
    },
    Inline {
        worker: Box<SortWorker>,
        pending: VecDeque<SortResult>,
    },
}

impl SortWorkerHandle {
    /// Start a worker using the best transport for the target.
    pub fn spawn() -> Result<Self, WorkerError> {
        #[cfg(not(target_arch = "wasm32"))]
        return Self::spawn_thread();

        #[cfg(target_arch = "wasm32")]
        return Ok(Self::inline());
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn spawn_thread() -> Result<Self, WorkerError> {
        use constants::sorting::SORT_WORKER_THREAD_NAME;

        let (request_tx, request_rx) = mpsc::channel::<WorkerRequest>();
        let (result_tx, result_rx) = mpsc::channel::<SortResult>();

        let thread = std::thread::Builder::new()
            .name(SORT_WORKER_THREAD_NAME.into())
            .spawn(move || {
                let mut worker = SortWorker::new();
                for request in request_rx {
                    if let Some(result) = worker.handle(request) {
                        if result_tx.send(result).is_err() {
                            break;
                        }
                    }
                }
                debug!("Sort worker thread exiting");
            })?;

        Ok(Self {
            transport: Transport::Thread {
                requests: Some(request_tx),
                results: Mutex::new(result_rx),
                thread: Some(thread),
            },
        })
    }

    /// A worker that runs synchronously inside [`SortWorkerHandle::submit`].
    pub fn inline() -> Self {
        Self {
            transport: Transport::Inline {
                worker: Box::default(),
                pending: VecDeque::new(),
            },
        }
    }

    pub fn is_threaded(&self) -> bool {
        matches!(self.transport, Transport::Thread { .. })
    }

    pub fn submit(&mut self, request: WorkerRequest) -> Result<(), WorkerError> {
        match &mut self.transport {
            Transport::Thread { requests, .. } => requests
                .as_ref()
                .ok_or(WorkerError::Disconnected)?
                .send(request)
                .map_err(|_| WorkerError::Disconnected),
            Transport::Inline { worker, pending } => {
                if let Some(result) = worker.handle(request) {
                    pending.push_back(result);
                }
                Ok(())
            }
        }
    }

    /// Take a finished result if one is ready.
    pub fn try_recv(&mut self) -> Result<Option<SortResult>, WorkerError> {
        match &mut self.transport {
            Transport::Thread { results, .. } => {
                let receiver = results.get_mut().map_err(|_| WorkerError::Disconnected)?;
                match receiver.try_recv() {
                    Ok(result) => Ok(Some(result)),
                    Err(mpsc::TryRecvError::Empty) => Ok(None),
                    Err(mpsc::TryRecvError::Disconnected) => Err(WorkerError::Disconnected),
                }
            }
            Transport::Inline { pending, .. } => Ok(pending.pop_front()),
        }
    }

    /// Wait up to `timeout` for a result.
    pub fn recv_timeout(&mut self, timeout: Duration) -> Result<Option<SortResult>, WorkerError> {
        match &mut self.transport {
            Transport::Thread { results, .. } => {
                let receiver = results.get_mut().map_err(|_| WorkerError::Disconnected)?;
                match receiver.recv_timeout(timeout) {
                    Ok(result) => Ok(Some(result)),
                    Err(mpsc::RecvTimeoutError::Timeout) => Ok(None),
                    Err(mpsc::RecvTimeoutError::Disconnected) => Err(WorkerError::Disconnected),
                }
            }
            Transport::Inline { pending, .. } => Ok(pending.pop_front()),
        }
    }
}

impl Drop for SortWorkerHandle {
    fn drop(&mut self) {
        if let Transport::Thread {
            requests, thread, ..
        } = &mut self.transport
        {
            // Closing the request channel ends the worker loop.
            requests.take();
            if let Some(thread) = thread.take() {
                if thread.join().is_err() {
                    warn!("Sort worker thread panicked");
                }
            }
        }
    }
}

impl std::fmt::Debug for SortWorkerHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SortWorkerHandle")
            .field("threaded", &self.is_threaded())
            .finish()
    }
}
