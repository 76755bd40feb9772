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
use std::hash::{Hash, Hasher};
use std::sync::Arc;
use std::time::Duration;

use acton_ern::Ern;
use static_assertions::assert_impl_all;

use crate::actor::ActorCore;
use crate::common::registry;
use crate::engine::WorkerPool;
use crate::message::{ActorError, SystemSignal};
use crate::traits::ActorMessage;

/// The reference callers hold to a running (or stopped) actor.
///
/// Handles are cheap to clone and safe to use from any task. Every operation
/// here either completes synchronously or, for [`terminate`](ActorHandle::terminate)
/// and [`join`](ActorHandle::join), suspends without blocking a worker.
#[derive(Debug, Clone)]
pub struct ActorHandle {
    pub(crate) id: Ern,
    pub(crate) core: Arc<ActorCore>,
}

impl PartialEq for ActorHandle {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for ActorHandle {}

impl Hash for ActorHandle {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl ActorHandle {
    pub(crate) fn from_core(core: Arc<ActorCore>) -> Self {
        Self {
            id: core.id.clone(),
            core,
        }
    }

    /// The actor's unique identifier.
    pub fn id(&self) -> Ern {
        self.id.clone()
    }

    /// The root name component of the actor's identifier.
    pub fn name(&self) -> String {
        self.id.root.to_string()
    }

    /// Restarts a stopped actor and posts the `Start` marker.
    ///
    /// # Errors
    ///
    /// [`ActorError::AlreadyStarted`] when the actor is not in the stopped
    /// state; no flag changes in that case.
    pub fn start(&self) -> Result<ActorHandle, ActorError> {
        self.core.do_start()?;
        self.core.post_signal(SystemSignal::Start);
        Ok(self.clone())
    }

    /// Restarts a stopped actor without posting the `Start` marker.
    ///
    /// # Errors
    ///
    /// [`ActorError::AlreadyStarted`] when the actor is not in the stopped
    /// state.
    pub fn silent_start(&self) -> Result<ActorHandle, ActorError> {
        self.core.do_start()?;
        Ok(self.clone())
    }

    /// Requests a graceful stop: one `Stop` marker is enqueued and processed
    /// after everything already in the mailbox. No-op when already stopped.
    pub fn stop(&self) -> &Self {
        self.core.request_stop();
        self
    }

    /// Terminates the actor, discarding any queued payload messages. Safe to
    /// call from any task, including the actor's own message handler; in the
    /// latter case termination completes before the handler returns.
    pub async fn terminate(&self) {
        self.core.terminate().await;
    }

    /// Enqueues an application message. When called from inside another
    /// actor's handler, that actor is recorded as the sender so the receiver
    /// can [`reply`](crate::message::MessageContext::reply).
    pub fn send(&self, message: impl ActorMessage) -> &Self {
        let sender = registry::current_actor();
        self.core.post(Arc::new(message), sender);
        self
    }

    /// Waits until the actor has fully terminated.
    pub async fn join(&self) {
        let latch = self.core.join_latch();
        latch.join().await;
    }

    /// True until the actor has fully ceased processing.
    pub fn is_active(&self) -> bool {
        self.core.is_active()
    }

    /// Retrieves the actor's fairness flag.
    pub fn is_fair(&self) -> bool {
        self.core.engine().is_fair()
    }

    /// Makes the actor fair: the engine releases its worker after each
    /// processed message instead of draining the queue.
    pub fn make_fair(&self) -> &Self {
        self.core.engine().make_fair();
        self
    }

    /// Arms a one-shot timeout: the `on_timeout` hook runs after `after`
    /// unless any other message arrives first. Re-arming replaces the
    /// previous timeout.
    pub fn set_timeout(&self, after: Duration) -> &Self {
        self.core.set_timeout(after);
        self
    }

    /// Rebinds the actor's engine to a different worker pool.
    pub fn attach_to_pool(&self, pool: WorkerPool) {
        self.core.engine().attach_to_pool(pool);
    }

    pub(crate) fn current_sender(&self) -> Option<ActorHandle> {
        self.core.current_sender()
    }
}

assert_impl_all!(ActorHandle: Send, Sync);
