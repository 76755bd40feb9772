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

use std::sync::atomic::{AtomicU64, Ordering};

use tokio_util::sync::CancellationToken;

static NEXT_WORKER_ID: AtomicU64 = AtomicU64::new(0);

/// The identity of one scheduling pass's worker.
///
/// Worker ids are process-unique and never reused, so a stale id can never
/// alias a live worker in the actor registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WorkerId(u64);

impl WorkerId {
    pub(crate) fn next() -> Self {
        WorkerId(NEXT_WORKER_ID.fetch_add(1, Ordering::Relaxed))
    }
}

/// The context of the worker currently executing an actor: its identity plus
/// the interrupt signal an external terminator can cancel.
///
/// One context exists per scheduling pass; cancelling the token of a pass
/// that has already ended is harmless to whatever that worker runs next.
#[derive(Debug, Clone)]
pub struct WorkerContext {
    id: WorkerId,
    interrupt: CancellationToken,
}

impl WorkerContext {
    pub(crate) fn new() -> Self {
        Self {
            id: WorkerId::next(),
            interrupt: CancellationToken::new(),
        }
    }

    /// This worker's identity.
    pub fn id(&self) -> WorkerId {
        self.id
    }

    /// Signals this worker to unwind out of its current wait or handler.
    pub(crate) fn interrupt(&self) {
        self.interrupt.cancel();
    }

    pub(crate) fn is_interrupted(&self) -> bool {
        self.interrupt.is_cancelled()
    }

    pub(crate) async fn interrupted(&self) {
        self.interrupt.cancelled().await;
    }
}

tokio::task_local! {
    /// The worker context of the scheduling pass running on this task.
    pub(crate) static CURRENT_WORKER: WorkerContext;
}
