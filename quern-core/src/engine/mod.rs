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

//! The messaging engine: mailbox ownership, worker scheduling, and the
//! identity of the worker currently bound to an actor.

pub use messaging_core::MessagingCore;
pub use worker::{WorkerContext, WorkerId};
pub(crate) use worker::CURRENT_WORKER;
pub use worker_pool::WorkerPool;

mod messaging_core;
mod worker;
mod worker_pool;
