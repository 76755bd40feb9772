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

/// Errors reported synchronously to callers of the actor API.
#[derive(Debug)]
pub enum ActorError {
    /// The actor was not in the stopped state when `start` was called.
    AlreadyStarted,
    /// `reply` was called while processing a message that carried no sender.
    NoSender,
}

impl std::fmt::Display for ActorError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ActorError::AlreadyStarted => {
                write!(f, "Actor has already been started")
            }
            ActorError::NoSender => {
                write!(f, "Cannot reply: the current message carries no sender")
            }
        }
    }
}

impl std::error::Error for ActorError {}

/// Errors surfaced by the messaging engine while a worker processes messages.
///
/// Both variants unconditionally terminate the actor after its matching error
/// hook has run; they are never re-thrown to an unrelated caller.
#[derive(Debug, Clone)]
pub enum DispatchError {
    /// The worker was interrupted as part of an external termination request.
    Interrupted,
    /// The application message handler (or the engine itself) failed.
    Fault(Arc<anyhow::Error>),
}

impl DispatchError {
    /// Wraps a handler fault.
    pub fn fault(error: anyhow::Error) -> Self {
        DispatchError::Fault(Arc::new(error))
    }
}

impl std::fmt::Display for DispatchError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DispatchError::Interrupted => write!(f, "Worker interrupted during termination"),
            DispatchError::Fault(source) => write!(f, "Message handler failed: {source}"),
        }
    }
}

impl std::error::Error for DispatchError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            DispatchError::Interrupted => None,
            DispatchError::Fault(source) => {
                let source: &anyhow::Error = source;
                Some(source.as_ref())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_names_the_failure() {
        let error = DispatchError::fault(anyhow::anyhow!("boom"));
        assert!(error.to_string().contains("boom"));
        assert_eq!(
            ActorError::AlreadyStarted.to_string(),
            "Actor has already been started"
        );
    }
}
