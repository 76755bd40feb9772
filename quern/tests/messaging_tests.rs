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

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use quern::prelude::*;

use crate::setup::initialize_tracing;
use crate::setup::messages::{Kickoff, Ping, Pong, Tagged};

mod setup;

/// Messages sent from outside any actor carry no sender reference.
#[tokio::test(flavor = "multi_thread")]
async fn test_external_sends_have_no_sender() -> anyhow::Result<()> {
    initialize_tracing();
    let mut runtime: ActorRuntime = ActorApp::launch();

    let saw_sender = Arc::new(AtomicBool::new(true));

    let mut builder = runtime.new_actor_with_name("receiver");
    let sender_flag = Arc::clone(&saw_sender);
    builder.on_message(move |context| {
        let sender_flag = Arc::clone(&sender_flag);
        Box::pin(async move {
            sender_flag.store(context.sender().is_some(), Ordering::SeqCst);
            Ok(())
        })
    });
    let handle = builder.start();

    handle.send(Ping);
    tokio::time::sleep(Duration::from_millis(300)).await;
    assert!(!saw_sender.load(Ordering::SeqCst));

    handle.terminate().await;
    tokio::time::timeout(Duration::from_secs(5), handle.join()).await?;
    Ok(())
}

/// Actor-to-actor sends capture the sending actor, and `reply` routes back
/// to it: caller -> echo -> caller.
#[tokio::test(flavor = "multi_thread")]
async fn test_reply_reaches_the_sender() -> anyhow::Result<()> {
    initialize_tracing();
    let mut runtime: ActorRuntime = ActorApp::launch();

    let pongs = Arc::new(AtomicUsize::new(0));

    let mut echo_builder = runtime.new_actor_with_name("echo");
    echo_builder.on_message(move |context| {
        Box::pin(async move {
            if context.message_as::<Ping>().is_some() {
                context.reply(Pong)?;
            }
            Ok(())
        })
    });
    let echo = echo_builder.start();

    let mut caller_builder = runtime.new_actor_with_name("caller");
    let echo_for_caller = echo.clone();
    let pong_count = Arc::clone(&pongs);
    caller_builder.on_message(move |context| {
        let echo = echo_for_caller.clone();
        let pongs = Arc::clone(&pong_count);
        Box::pin(async move {
            if context.message_as::<Kickoff>().is_some() {
                // Sent from this actor's worker, so the echo actor sees us
                // as the sender.
                echo.send(Ping);
            } else if context.message_as::<Pong>().is_some() {
                pongs.fetch_add(1, Ordering::SeqCst);
            }
            Ok(())
        })
    });
    let caller = caller_builder.start();

    caller.send(Kickoff);
    tokio::time::sleep(Duration::from_millis(500)).await;
    assert_eq!(pongs.load(Ordering::SeqCst), 1);

    caller.terminate().await;
    echo.terminate().await;
    tokio::time::timeout(Duration::from_secs(5), caller.join()).await?;
    tokio::time::timeout(Duration::from_secs(5), echo.join()).await?;
    Ok(())
}

/// Replying to a message that carried no sender fails with `NoSender`.
#[tokio::test(flavor = "multi_thread")]
async fn test_reply_without_sender_is_an_error() -> anyhow::Result<()> {
    initialize_tracing();
    let mut runtime: ActorRuntime = ActorApp::launch();

    let reply_failed = Arc::new(AtomicBool::new(false));

    let mut builder = runtime.new_actor_with_name("mute");
    let failed = Arc::clone(&reply_failed);
    builder.on_message(move |context| {
        let failed = Arc::clone(&failed);
        Box::pin(async move {
            if matches!(context.reply(Pong), Err(ActorError::NoSender)) {
                failed.store(true, Ordering::SeqCst);
            }
            Ok(())
        })
    });
    let handle = builder.start();

    handle.send(Ping);
    tokio::time::sleep(Duration::from_millis(300)).await;
    assert!(reply_failed.load(Ordering::SeqCst));

    handle.terminate().await;
    tokio::time::timeout(Duration::from_secs(5), handle.join()).await?;
    Ok(())
}

/// `current_actor` resolves to the executing actor inside a handler and to
/// nothing outside of one.
#[tokio::test(flavor = "multi_thread")]
async fn test_current_actor_lookup() -> anyhow::Result<()> {
    initialize_tracing();
    let mut runtime: ActorRuntime = ActorApp::launch();

    assert!(current_actor().is_none());

    let is_self = Arc::new(AtomicBool::new(false));

    let mut builder = runtime.new_actor_with_name("introspective");
    let self_flag = Arc::clone(&is_self);
    builder.on_message(move |context| {
        let self_flag = Arc::clone(&self_flag);
        Box::pin(async move {
            let current = current_actor();
            self_flag.store(
                current.as_ref().map(|actor| actor.id()) == Some(context.handle().id()),
                Ordering::SeqCst,
            );
            Ok(())
        })
    });
    let handle = builder.start();

    handle.send(Ping);
    tokio::time::sleep(Duration::from_millis(300)).await;
    assert!(is_self.load(Ordering::SeqCst));
    assert!(current_actor().is_none());

    handle.terminate().await;
    tokio::time::timeout(Duration::from_secs(5), handle.join()).await?;
    Ok(())
}

/// A handler fault runs the exception hook once and then unconditionally
/// terminates the actor; the error never escapes to other callers.
#[tokio::test(flavor = "multi_thread")]
async fn test_handler_fault_terminates_the_actor() -> anyhow::Result<()> {
    initialize_tracing();
    let mut runtime: ActorRuntime = ActorApp::launch();

    let faults = Arc::new(AtomicUsize::new(0));
    let stops = Arc::new(AtomicUsize::new(0));
    let messages = Arc::new(Mutex::new(Vec::new()));

    let mut builder = runtime.new_actor_with_name("faulty");
    let fault_count = Arc::clone(&faults);
    let stop_count = Arc::clone(&stops);
    let fault_messages = Arc::clone(&messages);
    builder
        .on_message(move |_context| {
            Box::pin(async move { Err(anyhow::anyhow!("payload went sour")) })
        })
        .on_exception(move |_handle, source| {
            fault_count.fetch_add(1, Ordering::SeqCst);
            fault_messages
                .lock()
                .expect("fault log poisoned")
                .push(source.to_string());
            ActorReply::ready()
        })
        .after_stop(move |_handle| {
            stop_count.fetch_add(1, Ordering::SeqCst);
            ActorReply::ready()
        });
    let handle = builder.start();

    handle.send(Ping);
    tokio::time::timeout(Duration::from_secs(5), handle.join()).await?;
    assert!(!handle.is_active());
    assert_eq!(faults.load(Ordering::SeqCst), 1);
    assert_eq!(stops.load(Ordering::SeqCst), 1);
    let recorded = messages.lock().expect("fault log poisoned");
    assert!(recorded[0].contains("payload went sour"));
    Ok(())
}

/// Rebinding an actor's engine to a fresh pool keeps messages flowing.
#[tokio::test(flavor = "multi_thread")]
async fn test_attach_to_new_pool() -> anyhow::Result<()> {
    initialize_tracing();
    let mut runtime: ActorRuntime = ActorApp::launch();

    let pings = Arc::new(AtomicUsize::new(0));

    let mut builder = runtime.new_actor_with_name("migrant");
    let ping_count = Arc::clone(&pings);
    builder.on_message(move |_context| {
        let pings = Arc::clone(&ping_count);
        Box::pin(async move {
            pings.fetch_add(1, Ordering::SeqCst);
            Ok(())
        })
    });
    let handle = builder.start();

    handle.send(Ping);
    tokio::time::sleep(Duration::from_millis(200)).await;

    handle.attach_to_pool(WorkerPool::new());
    handle.send(Ping);
    tokio::time::sleep(Duration::from_millis(300)).await;
    assert_eq!(pings.load(Ordering::SeqCst), 2);

    handle.terminate().await;
    tokio::time::timeout(Duration::from_secs(5), handle.join()).await?;
    Ok(())
}

/// A panicking handler is treated as a fault: the exception hook runs and
/// the actor terminates instead of wedging its worker.
#[tokio::test(flavor = "multi_thread")]
async fn test_handler_panic_terminates_the_actor() -> anyhow::Result<()> {
    initialize_tracing();
    let mut runtime: ActorRuntime = ActorApp::launch();

    let faults = Arc::new(AtomicUsize::new(0));

    let mut builder = runtime.new_actor_with_name("panicky");
    let fault_count = Arc::clone(&faults);
    builder
        .on_message(move |_context| Box::pin(async move { panic!("handler blew up") }))
        .on_exception(move |_handle, _source| {
            fault_count.fetch_add(1, Ordering::SeqCst);
            ActorReply::ready()
        });
    let handle = builder.start();

    handle.send(Ping);
    tokio::time::timeout(Duration::from_secs(5), handle.join()).await?;
    assert!(!handle.is_active());
    assert_eq!(faults.load(Ordering::SeqCst), 1);
    Ok(())
}

/// Payload data rides along intact.
#[tokio::test(flavor = "multi_thread")]
async fn test_payload_contents_are_delivered() -> anyhow::Result<()> {
    initialize_tracing();
    let mut runtime: ActorRuntime = ActorApp::launch();

    let labels = Arc::new(Mutex::new(Vec::new()));

    let mut builder = runtime.new_actor_with_name("collector");
    let seen = Arc::clone(&labels);
    builder.on_message(move |context| {
        let seen = Arc::clone(&seen);
        Box::pin(async move {
            if let Some(tagged) = context.message_as::<Tagged>() {
                seen.lock().expect("label log poisoned").push(tagged.label.clone());
            }
            Ok(())
        })
    });
    let handle = builder.start();

    handle
        .send(Tagged {
            label: "first".into(),
        })
        .send(Tagged {
            label: "second".into(),
        });
    tokio::time::sleep(Duration::from_millis(300)).await;
    assert_eq!(
        labels.lock().expect("label log poisoned").clone(),
        vec!["first".to_string(), "second".to_string()]
    );

    handle.terminate().await;
    tokio::time::timeout(Duration::from_secs(5), handle.join()).await?;
    Ok(())
}
