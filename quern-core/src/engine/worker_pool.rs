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

use std::future::Future;

use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tokio_util::task::TaskTracker;

/// The shared pool worker passes and timer tasks are spawned onto.
///
/// A thin wrapper over the current Tokio runtime handle plus a
/// [`TaskTracker`], so a runtime shutdown can wait for every scheduling pass
/// it ever produced. Clones share the same tracker.
///
/// Must be created from within a Tokio runtime.
#[derive(Debug, Clone)]
pub struct WorkerPool {
    handle: Handle,
    tracker: TaskTracker,
}

impl WorkerPool {
    /// Creates a pool bound to the current runtime.
    pub fn new() -> Self {
        Self {
            handle: Handle::current(),
            tracker: TaskTracker::new(),
        }
    }

    /// Spawns a tracked task on the pool.
    pub fn spawn<F>(&self, task: F) -> JoinHandle<F::Output>
    where
        F: Future + Send + 'static,
        F::Output: Send + 'static,
    {
        self.tracker.spawn_on(task, &self.handle)
    }

    /// The tracker covering every task this pool has spawned.
    pub fn tracker(&self) -> &TaskTracker {
        &self.tracker
    }
}

impl Default for WorkerPool {
    fn default() -> Self {
        Self::new()
    }
}
