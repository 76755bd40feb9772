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

//! Process-wide lookup from worker identity to the actor it is executing.
//!
//! Written only by the dispatch core's `thread_assigned`/`thread_unassigned`
//! callbacks; read by anything that needs to know "who am I running as",
//! most importantly sender capture in [`ActorHandle::send`](crate::common::ActorHandle::send).

use dashmap::DashMap;
use lazy_static::lazy_static;

use crate::common::ActorHandle;
use crate::engine::{WorkerId, CURRENT_WORKER};

lazy_static! {
    static ref WORKER_ACTORS: DashMap<WorkerId, ActorHandle> = DashMap::new();
}

/// Returns the actor currently executing on this task, if this task is a
/// worker assigned to one.
pub fn current_actor() -> Option<ActorHandle> {
    let worker_id = CURRENT_WORKER.try_with(|worker| worker.id()).ok()?;
    WORKER_ACTORS
        .get(&worker_id)
        .map(|entry| entry.value().clone())
}

pub(crate) fn register_current_actor(worker_id: WorkerId, handle: ActorHandle) {
    WORKER_ACTORS.insert(worker_id, handle);
}

pub(crate) fn deregister_current_actor(worker_id: WorkerId) {
    WORKER_ACTORS.remove(&worker_id);
}
