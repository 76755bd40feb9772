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

use derive_new::new;
use static_assertions::assert_impl_all;

use crate::common::ActorHandle;
use crate::message::ActorError;
use crate::traits::ActorMessage;

/// The view of one dequeued payload message handed to the message handler.
///
/// It carries the type-erased payload, the send time, and the receiving
/// actor's own handle, and gives access to the transient sender reference
/// tracked for the duration of this one message.
#[derive(new, Clone, Debug)]
pub struct MessageContext {
    pub(crate) message: Arc<dyn ActorMessage + Send + Sync + 'static>,
    pub(crate) timestamp: SystemTime,
    pub(crate) handle: ActorHandle,
}

impl MessageContext {
    /// Returns the type-erased payload.
    pub fn message(&self) -> &(dyn ActorMessage + Send + Sync + 'static) {
        self.message.as_ref()
    }

    /// Downcasts the payload to a concrete message type.
    pub fn message_as<M: ActorMessage>(&self) -> Option<&M> {
        self.message.as_any().downcast_ref::<M>()
    }

    /// The time the message was sent.
    pub fn timestamp(&self) -> SystemTime {
        self.timestamp
    }

    /// The handle of the actor processing this message.
    pub fn handle(&self) -> &ActorHandle {
        &self.handle
    }

    /// The actor that sent the current message, if the send happened on an
    /// actor's worker task. Valid only while this message is being processed;
    /// the slot is cleared before control returns to the engine.
    pub fn sender(&self) -> Option<ActorHandle> {
        self.handle.current_sender()
    }

    /// Sends `message` back to whoever sent the current one.
    pub fn reply(&self, message: impl ActorMessage) -> Result<(), ActorError> {
        match self.sender() {
            Some(sender) => {
                sender.send(message);
                Ok(())
            }
            None => Err(ActorError::NoSender),
        }
    }
}

// This static assertion ensures a context can cross task boundaries inside
// handler futures.
assert_impl_all!(MessageContext: Send);
