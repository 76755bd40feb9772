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
use std::fmt::Debug;

/// Control markers used to drive actor lifecycle transitions.
///
/// These markers are distinct from regular application messages even though
/// they travel through the same mailbox: the dispatch core recognizes them by
/// downcast and never hands one to the application message handler.
///
/// This enum is marked `#[non_exhaustive]` to allow for future expansion
/// without breaking existing code.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SystemSignal {
    /// Posted by `start()`; triggers the `after_start` hook.
    Start,
    /// Posted once per stop cycle by `stop()`; the dispatch loop converts it
    /// into the termination finish routine.
    Stop,
    /// Posted by an external `terminate()` when no worker is bound to the
    /// actor, so the next scheduled pass performs the finish routine.
    Terminate,
    /// Posted by an expired timeout timer; triggers the `on_timeout` hook.
    /// Cancelled by the arrival of any earlier message.
    Timeout,
}
