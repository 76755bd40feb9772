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

use std::fmt;
use std::fmt::Formatter;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};
use std::time::Duration;

use acton_ern::Ern;
use async_trait::async_trait;
use tokio::task::AbortHandle;
use tracing::{error, instrument, trace};

use crate::common::registry;
use crate::common::{
    ActorHandle, ActorReply, ExceptionHandler, JoinLatch, LifecycleHandler, MessageHandler,
};
use crate::engine::{MessagingCore, WorkerContext, WorkerPool, CURRENT_WORKER};
use crate::message::{ActorError, DispatchError, Envelope, MessageContext, SystemSignal};
use crate::traits::{ActorMessage, EngineListener};

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// The set of user-supplied handlers an actor runs with.
pub(crate) struct Reactors {
    /// Called once per dequeued application payload.
    pub(crate) message: MessageHandler,
    /// Called when the `Start` marker is dispatched.
    pub(crate) after_start: LifecycleHandler,
    /// Called when a timeout marker survives cancellation.
    pub(crate) on_timeout: LifecycleHandler,
    /// The termination hook, called exactly once per incarnation.
    pub(crate) after_stop: LifecycleHandler,
    /// Called when a worker is interrupted by an external termination.
    pub(crate) on_interrupt: LifecycleHandler,
    /// Called with the fault that is about to terminate the actor.
    pub(crate) on_exception: ExceptionHandler,
}

impl Default for Reactors {
    fn default() -> Self {
        Self {
            message: Box::new(|context| {
                trace!(
                    "No message handler registered; dropping {:?}",
                    context.message()
                );
                ActorReply::done()
            }),
            after_start: Box::new(|_handle| ActorReply::ready()),
            on_timeout: Box::new(|_handle| ActorReply::ready()),
            after_stop: Box::new(|_handle| ActorReply::ready()),
            on_interrupt: Box::new(|_handle| ActorReply::ready()),
            on_exception: Box::new(|handle, source| {
                error!(actor = %handle.id(), "Unhandled error in message handler: {source:?}");
                ActorReply::ready()
            }),
        }
    }
}

/// Clears the transient sender slot when the payload step ends, whether the
/// handler returned, failed, or was cancelled mid-await.
struct SenderGuard<'a> {
    slot: &'a Mutex<Option<ActorHandle>>,
}

impl Drop for SenderGuard<'_> {
    fn drop(&mut self) {
        lock(self.slot).take();
    }
}

/// The execution core behind one actor.
///
/// Holds the lifecycle flags, the worker and timeout slots, the join latch,
/// and the user handlers; implements [`EngineListener`] so its messaging
/// engine can drive it. Each lifecycle flag is independently atomic with a
/// single writer, so no coarser lock guards them as a group.
pub(crate) struct ActorCore {
    pub(crate) id: Ern,
    /// True before the first start and after a stop or terminate request.
    stopped: AtomicBool,
    /// True once the actor has fully ceased processing.
    terminated: AtomicBool,
    /// True once a terminate request has been accepted; gates the dispatch
    /// loop into shutdown mode.
    terminating: AtomicBool,
    /// The worker currently inside the dispatch callback, if any. Written by
    /// `thread_assigned`/`thread_unassigned`, read by the termination
    /// protocol; the terminator interrupts while holding this lock.
    current_worker: Mutex<Option<WorkerContext>>,
    /// At most one outstanding scheduled timeout.
    pending_timeout: Mutex<Option<AbortHandle>>,
    /// The sender of the payload currently being processed.
    current_sender: Mutex<Option<ActorHandle>>,
    join_latch: Mutex<JoinLatch>,
    reactors: Reactors,
    engine: Arc<MessagingCore>,
    self_ref: Weak<ActorCore>,
}

impl fmt::Debug for ActorCore {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("ActorCore").field("id", &self.id).finish()
    }
}

impl ActorCore {
    /// Builds a core in the Created state (all three flags set) together with
    /// its engine; the core is the engine's listener.
    pub(crate) fn new(id: Ern, pool: WorkerPool, fair: bool, reactors: Reactors) -> Arc<Self> {
        Arc::new_cyclic(|weak: &Weak<ActorCore>| {
            let listener: Weak<dyn EngineListener> = weak.clone();
            ActorCore {
                id,
                stopped: AtomicBool::new(true),
                terminated: AtomicBool::new(true),
                terminating: AtomicBool::new(true),
                current_worker: Mutex::new(None),
                pending_timeout: Mutex::new(None),
                current_sender: Mutex::new(None),
                join_latch: Mutex::new(JoinLatch::new()),
                reactors,
                engine: Arc::new(MessagingCore::new(pool, listener, fair)),
                self_ref: weak.clone(),
            }
        })
    }

    pub(crate) fn engine(&self) -> &Arc<MessagingCore> {
        &self.engine
    }

    /// The join latch of the current incarnation.
    pub(crate) fn join_latch(&self) -> JoinLatch {
        lock(&self.join_latch).clone()
    }

    pub(crate) fn current_sender(&self) -> Option<ActorHandle> {
        lock(&self.current_sender).clone()
    }

    fn handle(&self) -> Option<ActorHandle> {
        self.self_ref.upgrade().map(ActorHandle::from_core)
    }

    pub(crate) fn is_active(&self) -> bool {
        !self.terminated.load(Ordering::Acquire)
    }

    /// Moves a stopped actor to Active. The stopped flag doubles as the
    /// start guard: losing the swap means the actor was already started.
    pub(crate) fn do_start(&self) -> Result<(), ActorError> {
        if self
            .stopped
            .compare_exchange(true, false, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            return Err(ActorError::AlreadyStarted);
        }
        {
            let mut latch = lock(&self.join_latch);
            if latch.is_complete() {
                *latch = JoinLatch::new();
            }
        }
        self.terminating.store(false, Ordering::Release);
        self.terminated.store(false, Ordering::Release);
        trace!(actor = %self.id, "Actor started");
        Ok(())
    }

    /// Accepts a stop request. Only the call that flips the flag posts the
    /// `Stop` marker, so repeated stops stay idempotent.
    pub(crate) fn request_stop(&self) {
        if self
            .stopped
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_ok()
        {
            self.post_signal(SystemSignal::Stop);
        }
    }

    /// The cross-task-safe termination protocol.
    #[instrument(skip(self), fields(actor = %self.id))]
    pub(crate) async fn terminate(&self) {
        if !self.is_active() {
            return;
        }
        self.request_stop();
        self.terminating.store(true, Ordering::Release);
        if self.is_worker_task() {
            // Nothing can race this task for this actor; finish in place so
            // the join latch is bound before control returns to the engine.
            self.finish_termination().await;
            return;
        }
        tokio::task::yield_now().await;
        let signalled = {
            let slot = lock(&self.current_worker);
            match slot.as_ref() {
                Some(worker) => {
                    worker.interrupt();
                    true
                }
                None => false,
            }
        };
        if !signalled {
            // No worker to interrupt; the next scheduled dispatch finishes.
            self.post_signal(SystemSignal::Terminate);
        }
    }

    /// Runs the termination hook, flips `terminated`, and binds the join
    /// latch. Reached only from the actor's own worker task.
    async fn finish_termination(&self) {
        self.cancel_timeout();
        if let Some(handle) = self.handle() {
            (self.reactors.after_stop)(handle).await;
        }
        self.terminated.store(true, Ordering::Release);
        lock(&self.join_latch).complete();
        trace!(actor = %self.id, "Actor terminated");
    }

    /// True when the calling task is the worker currently bound to this actor.
    fn is_worker_task(&self) -> bool {
        let Ok(task_worker) = CURRENT_WORKER.try_with(|worker| worker.id()) else {
            return false;
        };
        lock(&self.current_worker)
            .as_ref()
            .map(|worker| worker.id() == task_worker)
            .unwrap_or(false)
    }

    pub(crate) fn post(
        &self,
        message: Arc<dyn ActorMessage + Send + Sync + 'static>,
        reply_to: Option<ActorHandle>,
    ) {
        self.engine.store(Envelope::new(message, reply_to));
    }

    pub(crate) fn post_signal(&self, signal: SystemSignal) {
        self.post(Arc::new(signal), None);
    }

    /// Arms a one-shot delivery of the `Timeout` marker after `after`,
    /// invalidating any previously armed one.
    pub(crate) fn set_timeout(&self, after: Duration) {
        let Some(handle) = self.handle() else {
            return;
        };
        let task = self.engine.pool().spawn(async move {
            tokio::time::sleep(after).await;
            if handle.is_active() {
                handle.core.post_signal(SystemSignal::Timeout);
            }
        });
        let previous = lock(&self.pending_timeout).replace(task.abort_handle());
        if let Some(previous) = previous {
            previous.abort();
        }
    }

    fn cancel_timeout(&self) {
        if let Some(pending) = lock(&self.pending_timeout).take() {
            pending.abort();
        }
    }
}

#[async_trait]
impl EngineListener for ActorCore {
    async fn handle_message(&self, envelope: Envelope) -> Result<(), DispatchError> {
        let signal = envelope.signal();
        if signal == Some(SystemSignal::Start) {
            if let Some(handle) = self.handle() {
                (self.reactors.after_start)(handle).await;
            }
            return Ok(());
        }
        // Any real arrival invalidates a pending timeout.
        self.cancel_timeout();
        if signal == Some(SystemSignal::Timeout) {
            if let Some(handle) = self.handle() {
                (self.reactors.on_timeout)(handle).await;
            }
        }
        if self.terminating.load(Ordering::Acquire) || signal == Some(SystemSignal::Stop) {
            self.finish_termination().await;
            return Ok(());
        }
        if signal.is_some() {
            // A spent control marker; markers never reach the message handler.
            return Ok(());
        }
        *lock(&self.current_sender) = envelope.reply_to.clone();
        let _sender_guard = SenderGuard {
            slot: &self.current_sender,
        };
        let Some(handle) = self.handle() else {
            return Ok(());
        };
        trace!(actor = %self.id, "Dispatching {:?}", envelope.message);
        let context = MessageContext::new(envelope.message, envelope.timestamp, handle);
        (self.reactors.message)(context)
            .await
            .map_err(DispatchError::fault)
    }

    fn continue_processing_messages(&self) -> bool {
        self.is_active()
    }

    fn thread_assigned(&self) {
        let Ok(worker) = CURRENT_WORKER.try_with(|worker| worker.clone()) else {
            return;
        };
        if let Some(handle) = self.handle() {
            registry::register_current_actor(worker.id(), handle);
        }
        *lock(&self.current_worker) = Some(worker);
    }

    fn thread_unassigned(&self) {
        if let Some(worker) = lock(&self.current_worker).take() {
            registry::deregister_current_actor(worker.id());
        }
    }

    async fn register_error(&self, error: DispatchError) {
        match &error {
            DispatchError::Interrupted => {
                trace!(actor = %self.id, "Worker interrupted");
                if let Some(handle) = self.handle() {
                    (self.reactors.on_interrupt)(handle).await;
                }
            }
            DispatchError::Fault(source) => {
                if let Some(handle) = self.handle() {
                    (self.reactors.on_exception)(handle, Arc::clone(source)).await;
                }
            }
        }
        self.terminate().await;
    }
}
