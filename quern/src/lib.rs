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

//! # Quern
//!
//! Quern is a small actor framework built around a looping dispatch core:
//! each actor grinds through its mailbox one message at a time on a shared
//! pool of Tokio workers, with a race-free lifecycle and a cross-task
//! termination protocol.
//!
//! ## Key Concepts
//!
//! - **Actors**: units of sequential computation configured through an
//!   [`ActorBuilder`](prelude::ActorBuilder) (one message handler plus
//!   lifecycle hooks) and driven through an
//!   [`ActorHandle`](prelude::ActorHandle).
//! - **Messages**: any `Clone + Debug + Send + Sync` type, declared tersely
//!   with [`#[quern_message]`](prelude::quern_message). Control markers
//!   ([`SystemSignal`](prelude::SystemSignal)) share the mailbox but never
//!   reach the application handler.
//! - **Engine**: each actor's [`MessagingCore`](prelude::MessagingCore) owns
//!   the mailbox and schedules passes on a shared
//!   [`WorkerPool`](prelude::WorkerPool); fair actors release their worker
//!   after every message.
//! - **Lifecycle**: start, stop, terminate, and join from any task; external
//!   termination interrupts a bound worker, self-termination completes in
//!   place.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use quern::prelude::*;
//!
//! #[quern_message]
//! struct Ping;
//!
//! #[tokio::main]
//! async fn main() {
//!     let mut runtime = ActorApp::launch();
//!     let mut builder = runtime.new_actor_with_name("ping");
//!     builder.on_message(|context| {
//!         println!("got {:?}", context.message());
//!         ActorReply::done()
//!     });
//!     let handle = builder.start();
//!     handle.send(Ping);
//!     handle.terminate().await;
//! }
//! ```

/// A prelude module for conveniently importing the most commonly used items.
///
/// Re-exports the core prelude (actor builder and handle, runtime, engine
/// surface, message types, and the `acton-ern`/`async-trait` helpers) plus
/// the [`quern_message`](quern_macro::quern_message) attribute macro.
pub mod prelude {
    pub use quern_core::prelude::*;
    pub use quern_macro::quern_message;
}
