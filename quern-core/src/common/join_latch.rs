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

use tokio_util::sync::CancellationToken;

/// A one-shot completion latch bound when an actor finishes terminating.
///
/// Any number of tasks may [`join`](JoinLatch::join) it; all of them wake when
/// the latch completes, and joins issued after completion return immediately.
#[derive(Debug, Clone, Default)]
pub struct JoinLatch {
    token: CancellationToken,
}

impl JoinLatch {
    /// Creates a fresh, unbound latch.
    pub fn new() -> Self {
        Self::default()
    }

    /// Completes the latch, waking every joined task. Idempotent.
    pub(crate) fn complete(&self) {
        self.token.cancel();
    }

    /// True once the latch has completed.
    pub fn is_complete(&self) -> bool {
        self.token.is_cancelled()
    }

    /// Waits until the latch completes.
    pub async fn join(&self) {
        self.token.cancelled().await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn join_returns_once_complete() {
        let latch = JoinLatch::new();
        assert!(!latch.is_complete());
        latch.complete();
        latch.complete();
        assert!(latch.is_complete());
        latch.join().await;
    }
}
