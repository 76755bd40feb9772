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

//! Convenient boxed-future return values for handlers and hooks.

use std::future::Future;

use crate::common::{FutureBox, HandlerFuture};

/// A utility namespace for creating the boxed futures handlers must return.
///
/// Lifecycle hooks return [`FutureBox`] and the message handler returns
/// [`HandlerFuture`]; these helpers cover the common synchronous cases so
/// handlers that do no async work stay one-liners.
///
/// It acts purely as a namespace and is not intended to be instantiated.
pub struct ActorReply;

impl ActorReply {
    /// An immediately resolving, no-operation hook future.
    #[inline]
    #[must_use]
    pub fn ready() -> FutureBox {
        Box::pin(async {})
    }

    /// An immediately resolving, successful handler future.
    #[inline]
    #[must_use]
    pub fn done() -> HandlerFuture {
        Box::pin(async { Ok(()) })
    }

    /// Boxes an existing future for use as a hook return value.
    #[inline]
    pub fn from_async<F>(future: F) -> FutureBox
    where
        F: Future<Output = ()> + Send + 'static,
    {
        Box::pin(future)
    }
}
