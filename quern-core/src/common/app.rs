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

use dashmap::DashMap;

use crate::common::runtime::RuntimeInner;
use crate::common::ActorRuntime;
use crate::engine::WorkerPool;

/// Represents the Quern system.
///
/// The `ActorApp` struct is the entry point of the framework: launching it
/// binds a worker pool to the current Tokio runtime and yields the
/// [`ActorRuntime`] actors are created through.
#[derive(Default, Debug, Clone)]
pub struct ActorApp;

impl ActorApp {
    /// Launches the Quern system.
    ///
    /// Must be called from within a Tokio runtime.
    ///
    /// # Returns
    ///
    /// An [`ActorRuntime`] ready to create actors.
    pub fn launch() -> ActorRuntime {
        ActorRuntime(RuntimeInner {
            pool: WorkerPool::new(),
            roots: Arc::new(DashMap::new()),
        })
    }
}
