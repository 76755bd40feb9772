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

use acton_ern::Ern;
use anyhow::anyhow;
use dashmap::DashMap;
use futures::future::join_all;
use tracing::{instrument, trace};

use crate::actor::ActorBuilder;
use crate::common::{ActorHandle, CONFIG};
use crate::engine::WorkerPool;

/// Represents a ready state of the Quern system.
///
/// A runtime owns the default worker pool and tracks the actors created
/// through it so the whole system can be shut down in one call.
#[derive(Debug, Clone)]
pub struct ActorRuntime(pub(crate) RuntimeInner);

#[derive(Debug, Clone)]
pub(crate) struct RuntimeInner {
    pub(crate) pool: WorkerPool,
    pub(crate) roots: Arc<DashMap<String, ActorHandle>>,
}

impl ActorRuntime {
    /// Creates a builder for a new actor with the default configured name.
    pub fn new_actor(&mut self) -> ActorBuilder {
        self.new_actor_with_name(CONFIG.defaults.actor_name.clone())
    }

    /// Creates a builder for a new actor with the provided root name.
    pub fn new_actor_with_name(&mut self, name: impl Into<String>) -> ActorBuilder {
        let id = Ern::with_root(name.into()).unwrap_or_default();
        trace!("Creating actor builder for {}", id);
        ActorBuilder::new(id, self.0.pool.clone(), Arc::clone(&self.0.roots))
    }

    /// Retrieves the number of actors created through this runtime.
    pub fn actor_count(&self) -> usize {
        self.0.roots.len()
    }

    /// The runtime's default worker pool.
    pub fn pool(&self) -> WorkerPool {
        self.0.pool.clone()
    }

    /// Shuts the system down: terminates every actor created through this
    /// runtime, waits for each to complete, then waits for the pool to drain.
    ///
    /// # Errors
    ///
    /// Fails when shutdown does not complete within the configured
    /// `system_shutdown_timeout`.
    #[instrument(skip(self))]
    pub async fn shutdown_all(&mut self) -> anyhow::Result<()> {
        let timeout = CONFIG.system_shutdown_timeout();
        let pool = self.0.pool.clone();
        let roots = Arc::clone(&self.0.roots);
        let shutdown = async move {
            let stop_futures: Vec<_> = roots
                .iter()
                .map(|item| {
                    let handle = item.value().clone();
                    async move {
                        handle.terminate().await;
                        handle.join().await;
                        trace!(actor = %handle.id(), "Actor shut down");
                    }
                })
                .collect();
            join_all(stop_futures).await;

            let tracker = pool.tracker().clone();
            tracker.close();
            tracker.wait().await;
        };
        tokio::time::timeout(timeout, shutdown)
            .await
            .map_err(|_| anyhow!("System shutdown timed out after {timeout:?}"))?;
        Ok(())
    }
}
