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

//! Common type aliases for handler closures and their futures.
//!
//! This module centralizes the boxed-future signatures shared by the actor
//! builder, the dispatch core, and user-facing helper constructors.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use crate::common::ActorHandle;
use crate::message::MessageContext;

/// A pinned, boxed, dynamically dispatched future with `Output = ()`.
/// This is the return type of lifecycle hooks.
pub type FutureBox = Pin<Box<dyn Future<Output = ()> + Send + 'static>>;

/// The future returned by the application message handler. A `Err` result is
/// routed to the actor's exception hook and terminates the actor.
pub type HandlerFuture = Pin<Box<dyn Future<Output = anyhow::Result<()>> + Send + 'static>>;

/// The single per-message application handler.
pub(crate) type MessageHandler =
    Box<dyn Fn(MessageContext) -> HandlerFuture + Send + Sync + 'static>;

/// A lifecycle hook (`after_start`, `on_timeout`, `after_stop`, `on_interrupt`).
pub(crate) type LifecycleHandler = Box<dyn Fn(ActorHandle) -> FutureBox + Send + Sync + 'static>;

/// The exception hook, invoked with the handler fault that terminated the actor.
pub(crate) type ExceptionHandler =
    Box<dyn Fn(ActorHandle, Arc<anyhow::Error>) -> FutureBox + Send + Sync + 'static>;
