/*
 * Copyright (c) 2024. Govcraft
 *
 * Licensed under either of
 *   * Apache License, Version 2.0 (the "License");
 *     you may not use this file except in compliance with the License.
 *     You may obtain a copy of the License at http://www.apache.org/licenses/LICENSE-2.0
 *   * MIT license: http://opensource.org/licenses/MIT
 *
 * Unless required by applicable law or agreed to in writing, software
 * distributed under the License is distributed on an "AS IS" BASIS,
 * WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
 * See the applicable License for the specific language governing permissions and
 * limitations under that License.
 */

use std::any::Any;
use std::collections::VecDeque;
use std::panic::AssertUnwindSafe;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, PoisonError, Weak};

use anyhow::anyhow;
use futures::FutureExt;
use tracing::{instrument, trace};

use crate::engine::{WorkerContext, WorkerPool, CURRENT_WORKER};
use crate::message::{DispatchError, Envelope};
use crate::traits::EngineListener;

fn panic_message(payload: &(dyn Any + Send)) -> String {
    payload
        .downcast_ref::<&str>()
        .map(|message| (*message).to_string())
        .or_else(|| payload.downcast_ref::<String>().cloned())
        .unwrap_or_else(|| "opaque panic payload".to_string())
}

/// The messaging engine behind one actor: mailbox storage, worker
/// scheduling, and fairness.
///
/// The engine owns the physical queue and decides when a worker is assigned.
/// At most one scheduling pass runs at a time (guarded by the `active` flag),
/// which is what gives the [`EngineListener`] its one-worker-at-a-time
/// precondition. The listener is held weakly; the actor core owns the engine,
/// not the other way around.
pub struct MessagingCore {
    queue: Mutex<VecDeque<Envelope>>,
    active: AtomicBool,
    fair: AtomicBool,
    pool: Mutex<WorkerPool>,
    listener: Weak<dyn EngineListener>,
}

impl MessagingCore {
    pub(crate) fn new(pool: WorkerPool, listener: Weak<dyn EngineListener>, fair: bool) -> Self {
        Self {
            queue: Mutex::new(VecDeque::new()),
            active: AtomicBool::new(false),
            fair: AtomicBool::new(fair),
            pool: Mutex::new(pool),
            listener,
        }
    }

    /// Enqueues a message. Never blocks the caller.
    pub fn store(self: &Arc<Self>, envelope: Envelope) {
        self.queue
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push_back(envelope);
        self.schedule();
    }

    /// Removes and returns the head of the queue without blocking.
    pub fn sweep_next_message(&self) -> Option<Envelope> {
        self.queue
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .pop_front()
    }

    /// Rebinds the engine to a different worker pool. Passes already running
    /// finish where they are; subsequent passes land on the new pool.
    pub fn attach_to_pool(&self, pool: WorkerPool) {
        *self.pool.lock().unwrap_or_else(PoisonError::into_inner) = pool;
    }

    /// The pool this engine currently schedules onto.
    pub fn pool(&self) -> WorkerPool {
        self.pool
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Retrieves the fairness flag.
    ///
    /// Fair engines give the worker back to the pool after each processed
    /// message; non-fair engines keep it until the queue empties. Non-fair
    /// tends to perform better and is the default.
    pub fn is_fair(&self) -> bool {
        self.fair.load(Ordering::Acquire)
    }

    /// Makes the engine fair.
    pub fn make_fair(&self) {
        self.fair.store(true, Ordering::Release);
    }

    /// Spawns a scheduling pass if there is work and no pass is running.
    fn schedule(self: &Arc<Self>) {
        let has_messages = !self
            .queue
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .is_empty();
        if !has_messages {
            return;
        }
        if self
            .active
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            return;
        }
        trace!("Scheduling a worker pass");
        let pool = self.pool();
        let engine = Arc::clone(self);
        pool.spawn(engine.run_pass());
    }

    #[instrument(skip(self))]
    async fn run_pass(self: Arc<Self>) {
        let worker = WorkerContext::new();
        let context = worker.clone();
        CURRENT_WORKER.scope(worker, self.drain(context)).await;
    }

    /// One scheduling pass: assign, drain, report, unassign, reschedule.
    async fn drain(self: Arc<Self>, worker: WorkerContext) {
        let Some(listener) = self.listener.upgrade() else {
            self.active.store(false, Ordering::Release);
            return;
        };
        listener.thread_assigned();
        let mut reported = false;
        loop {
            if !listener.continue_processing_messages() {
                break;
            }
            let Some(envelope) = self.sweep_next_message() else {
                break;
            };
            // A panicking handler is a fault like any other; it must not take
            // the worker down with it.
            let dispatch = AssertUnwindSafe(listener.handle_message(envelope)).catch_unwind();
            let result = tokio::select! {
                biased;
                _ = worker.interrupted() => Err(DispatchError::Interrupted),
                result = dispatch => match result {
                    Ok(outcome) => outcome,
                    Err(payload) => Err(DispatchError::fault(anyhow!(
                        "message handler panicked: {}",
                        panic_message(&payload)
                    ))),
                },
            };
            match result {
                Ok(()) => {
                    if self.is_fair() {
                        break;
                    }
                }
                Err(error) => {
                    trace!("Worker pass aborted: {error}");
                    listener.register_error(error).await;
                    reported = true;
                    break;
                }
            }
        }
        listener.thread_unassigned();
        // The terminator cancels the interrupt while holding the actor's
        // worker slot; an interrupt that landed after the last dequeue is
        // picked up here rather than lost.
        if !reported && worker.is_interrupted() && listener.continue_processing_messages() {
            listener.register_error(DispatchError::Interrupted).await;
        }
        self.active.store(false, Ordering::Release);
        if listener.continue_processing_messages() {
            // Stores that raced the end of this pass get a fresh one.
            self.schedule();
        }
    }
}
