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

#![forbid(unsafe_code)]
// #![warn(missing_docs)]
//! Quern Core Library
//!
//! This library provides the execution core of the Quern actor framework:
//! the looping dispatch engine, the lifecycle state machine, and the
//! cross-task termination protocol. An actor processes one message at a time
//! from its mailbox, multiplexed onto a shared pool of Tokio workers.

/// Common utilities and structures used throughout the Quern framework.
pub(crate) mod common;

pub(crate) mod actor;
pub(crate) mod engine;
pub(crate) mod message;
/// Trait definitions used in the Quern framework.
pub(crate) mod traits;

/// Prelude module for convenient imports.
///
/// This module re-exports commonly used items from the `common`, `engine`,
/// `message`, and `traits` modules, as well as the `async_trait` crate.
pub mod prelude {
    pub use acton_ern::*;
    pub use async_trait;

    pub use crate::actor::ActorBuilder;
    pub use crate::common::registry::current_actor;
    pub use crate::common::{
        ActorApp, ActorHandle, ActorReply, ActorRuntime, FutureBox, HandlerFuture, JoinLatch,
        QuernConfig, CONFIG,
    };
    pub use crate::engine::{MessagingCore, WorkerContext, WorkerId, WorkerPool};
    pub use crate::message::{
        ActorError, DispatchError, Envelope, MessageContext, SystemSignal,
    };
    pub use crate::traits::{ActorMessage, EngineListener};
}
