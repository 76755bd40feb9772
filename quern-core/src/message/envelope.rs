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
use std::time::SystemTime;

use static_assertions::assert_impl_all;

use crate::common::ActorHandle;
use crate::message::SystemSignal;
use crate::traits::ActorMessage;

/// The unit of communication stored in an actor's mailbox.
///
/// An envelope carries either an application payload or a
/// [`SystemSignal`] control marker, together with the send time and an
/// optional reference back to the sending actor.
#[derive(Debug, Clone)]
pub struct Envelope {
    /// The message contained in the envelope.
    pub message: Arc<dyn ActorMessage + Send + Sync + 'static>,
    /// The time when the message was sent.
    pub timestamp: SystemTime,
    /// The actor that sent this message, when the send happened on an
    /// actor's own worker task. Replies are routed here.
    pub reply_to: Option<ActorHandle>,
}

impl Envelope {
    /// Creates a new envelope carrying `message`, stamped with the current time.
    pub fn new(
        message: Arc<dyn ActorMessage + Send + Sync + 'static>,
        reply_to: Option<ActorHandle>,
    ) -> Self {
        let timestamp = SystemTime::now();
        Envelope {
            message,
            timestamp,
            reply_to,
        }
    }

    /// Returns the control marker this envelope carries, if any.
    pub(crate) fn signal(&self) -> Option<SystemSignal> {
        self.message.as_any().downcast_ref::<SystemSignal>().cloned()
    }
}

// Ensures that Envelope implements the Send trait.
assert_impl_all!(Envelope: Send);
