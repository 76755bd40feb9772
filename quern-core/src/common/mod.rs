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

//! Common utilities and structures used throughout the Quern framework.

pub use actor_handle::ActorHandle;
pub use actor_reply::ActorReply;
pub use app::ActorApp;
pub use config::{DefaultsConfig, QuernConfig, TimeoutConfig, CONFIG};
pub use join_latch::JoinLatch;
pub use runtime::ActorRuntime;
pub use types::{FutureBox, HandlerFuture};
pub(crate) use types::{ExceptionHandler, LifecycleHandler, MessageHandler};

pub mod registry;

mod actor_handle;
mod actor_reply;
mod app;
mod config;
mod join_latch;
mod runtime;
mod types;
