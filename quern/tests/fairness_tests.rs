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
#![allow(dead_code, unused_doc_comments)]

use std::sync::{Arc, Mutex};
use std::time::Duration;

use quern::prelude::*;

use crate::setup::initialize_tracing;
use crate::setup::messages::Tagged;

mod setup;

/// Actors are non-fair by default; `make_fair` flips the engine flag.
#[tokio::test(flavor = "multi_thread")]
async fn test_fairness_flag_is_forwarded() -> anyhow::Result<()> {
    initialize_tracing();
    let mut runtime: ActorRuntime = ActorApp::launch();

    let handle = runtime.new_actor_with_name("plain").start();
    assert!(!handle.is_fair());
    handle.make_fair();
    assert!(handle.is_fair());

    let mut fair_builder = runtime.new_actor_with_name("fairborn");
    fair_builder.make_fair();
    let fair_handle = fair_builder.start();
    assert!(fair_handle.is_fair());

    handle.terminate().await;
    fair_handle.terminate().await;
    tokio::time::timeout(Duration::from_secs(5), handle.join()).await?;
    tokio::time::timeout(Duration::from_secs(5), fair_handle.join()).await?;
    Ok(())
}

/// Fairness only changes worker hand-back between messages; the functional
/// outcome is the same: every message is processed, in enqueue order.
#[tokio::test(flavor = "multi_thread")]
async fn test_fair_actor_processes_all_messages_in_order() -> anyhow::Result<()> {
    initialize_tracing();
    let mut runtime: ActorRuntime = ActorApp::launch();

    let labels = Arc::new(Mutex::new(Vec::new()));

    let mut builder = runtime.new_actor_with_name("fairworker");
    builder.make_fair();
    let seen = Arc::clone(&labels);
    builder.on_message(move |context| {
        let seen = Arc::clone(&seen);
        Box::pin(async move {
            if let Some(tagged) = context.message_as::<Tagged>() {
                seen.lock()
                    .expect("label log poisoned")
                    .push(tagged.label.clone());
            }
            Ok(())
        })
    });
    let handle = builder.start();
    assert!(handle.is_fair());

    handle
        .send(Tagged {
            label: "one".into(),
        })
        .send(Tagged {
            label: "two".into(),
        });
    tokio::time::sleep(Duration::from_millis(500)).await;
    assert_eq!(
        labels.lock().expect("label log poisoned").clone(),
        vec!["one".to_string(), "two".to_string()]
    );

    handle.terminate().await;
    tokio::time::timeout(Duration::from_secs(5), handle.join()).await?;
    Ok(())
}
