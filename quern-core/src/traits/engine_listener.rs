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
use async_trait::async_trait;

use crate::message::{DispatchError, Envelope};

/// The callback interface a [`MessagingCore`](crate::engine::MessagingCore)
/// drives while a worker is assigned to an actor.
///
/// The actor core implements this trait exactly once and hands itself to the
/// engine at construction. Every method executes on whichever worker task the
/// engine scheduled; the engine guarantees at most one worker runs these
/// callbacks for a given listener at any instant.
#[async_trait]
pub trait EngineListener: Send + Sync + 'static {
    /// Processes one dequeued envelope.
    ///
    /// An `Err` aborts the current scheduling pass and is routed back through
    /// [`register_error`](EngineListener::register_error).
    async fn handle_message(&self, envelope: Envelope) -> Result<(), DispatchError>;

    /// Queried between messages to decide whether the worker stays assigned.
    fn continue_processing_messages(&self) -> bool;

    /// Invoked when a worker takes the actor, before the first dequeue.
    fn thread_assigned(&self);

    /// Invoked when the worker hands the actor back, after the last dequeue.
    fn thread_unassigned(&self);

    /// Receives interruptions and handler faults surfaced during a pass.
    async fn register_error(&self, error: DispatchError);
}
