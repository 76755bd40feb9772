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

use std::sync::Arc;

use acton_ern::Ern;
use dashmap::DashMap;
use tracing::trace;

use crate::actor::{ActorCore, Reactors};
use crate::common::{ActorHandle, FutureBox, HandlerFuture, CONFIG};
use crate::engine::WorkerPool;
use crate::message::{MessageContext, SystemSignal};

/// Configures an actor before it starts processing messages.
///
/// A builder collects the message handler and lifecycle hooks, then
/// [`start`](ActorBuilder::start) (or
/// [`silent_start`](ActorBuilder::silent_start)) hands back the
/// [`ActorHandle`] used for all further interaction. Registering a second
/// message handler replaces the first; an actor runs with exactly one.
pub struct ActorBuilder {
    id: Ern,
    pool: WorkerPool,
    fair: bool,
    roots: Arc<DashMap<String, ActorHandle>>,
    reactors: Reactors,
}

impl ActorBuilder {
    pub(crate) fn new(id: Ern, pool: WorkerPool, roots: Arc<DashMap<String, ActorHandle>>) -> Self {
        trace!("NEW ACTOR: {}", &id);
        Self {
            id,
            pool,
            fair: CONFIG.defaults.fair,
            roots,
            reactors: Reactors::default(),
        }
    }

    /// The identifier the actor will carry.
    pub fn id(&self) -> &Ern {
        &self.id
    }

    /// Sets the handler invoked once per application message, with the
    /// payload and sender reference available through the context.
    ///
    /// # Parameters
    /// - `message_processor`: The function to handle each message.
    pub fn on_message(
        &mut self,
        message_processor: impl Fn(MessageContext) -> HandlerFuture + Send + Sync + 'static,
    ) -> &mut Self {
        self.reactors.message = Box::new(message_processor);
        self
    }

    /// Sets the hook called when the actor processes its `Start` marker.
    pub fn after_start<F>(&mut self, f: F) -> &mut Self
    where
        F: Fn(ActorHandle) -> FutureBox + Send + Sync + 'static,
    {
        self.reactors.after_start = Box::new(f);
        self
    }

    /// Sets the hook called when an armed timeout fires before any other
    /// message arrives.
    pub fn on_timeout<F>(&mut self, f: F) -> &mut Self
    where
        F: Fn(ActorHandle) -> FutureBox + Send + Sync + 'static,
    {
        self.reactors.on_timeout = Box::new(f);
        self
    }

    /// Sets the termination hook, run exactly once as the actor shuts down.
    pub fn after_stop<F>(&mut self, f: F) -> &mut Self
    where
        F: Fn(ActorHandle) -> FutureBox + Send + Sync + 'static,
    {
        self.reactors.after_stop = Box::new(f);
        self
    }

    /// Sets the hook called when the actor's worker is interrupted by an
    /// external termination request.
    pub fn on_interrupt<F>(&mut self, f: F) -> &mut Self
    where
        F: Fn(ActorHandle) -> FutureBox + Send + Sync + 'static,
    {
        self.reactors.on_interrupt = Box::new(f);
        self
    }

    /// Sets the hook called with a handler fault before the actor is
    /// terminated. The default logs the fault.
    pub fn on_exception<F>(&mut self, f: F) -> &mut Self
    where
        F: Fn(ActorHandle, Arc<anyhow::Error>) -> FutureBox + Send + Sync + 'static,
    {
        self.reactors.on_exception = Box::new(f);
        self
    }

    /// Makes the actor fair: its engine releases the worker back to the pool
    /// after each processed message. Actors are non-fair by default.
    pub fn make_fair(&mut self) -> &mut Self {
        self.fair = true;
        self
    }

    /// Builds the actor, starts it, and posts the `Start` marker so the
    /// `after_start` hook runs before the first message.
    pub fn start(self) -> ActorHandle {
        let handle = self.build();
        // A freshly built core is always in the stopped state.
        handle.core.do_start().ok();
        handle.core.post_signal(SystemSignal::Start);
        handle
    }

    /// Builds and starts the actor without posting the `Start` marker, so the
    /// `after_start` hook never runs for this incarnation.
    pub fn silent_start(self) -> ActorHandle {
        let handle = self.build();
        handle.core.do_start().ok();
        handle
    }

    fn build(self) -> ActorHandle {
        let core = ActorCore::new(self.id, self.pool, self.fair, self.reactors);
        let handle = ActorHandle::from_core(core);
        self.roots.insert(handle.id().to_string(), handle.clone());
        handle
    }
}
