//! Driving the terminal front end with scripted input.

#![allow(clippy::unwrap_used, clippy::expect_used)] // Test code can use unwrap/expect

use priorities::terminal::{self, FULL_NOTICE};
use priorities::{PrioritiesConfig, TodoEnvironment, TodoManager};
use priorities_testing::{InMemoryKeyValueStore, SequentialIds, test_clock};
use std::sync::Arc;
use std::time::Duration;
use tokio::io::{AsyncWriteExt, BufReader};

fn manager() -> TodoManager {
    TodoManager::new(TodoEnvironment::new(
        Arc::new(test_clock()),
        Arc::new(SequentialIds::new("todo")),
        Arc::new(InMemoryKeyValueStore::new()),
        PrioritiesConfig::default(),
    ))
}

async fn drive(manager: &TodoManager, script: &str) -> String {
    let mut out = Vec::new();
    terminal::run(manager, script.as_bytes(), &mut out)
        .await
        .unwrap();
    String::from_utf8(out).unwrap()
}

#[tokio::test(start_paused = true)]
async fn adds_and_completes_by_position() {
    let manager = manager();
    manager.load().await.unwrap();

    let out = drive(&manager, "Write report\n\nCall the bank\ndone 1\nquit\nignored\n").await;

    assert!(out.contains("What are your top priorities today?"));
    assert!(out.contains("  1. [x] Write report\n"));
    assert!(out.contains("(2/5 priorities)"));
    assert_eq!(manager.todos().await.len(), 2);
}

#[tokio::test(start_paused = true)]
async fn input_is_disabled_when_full() {
    let manager = manager();
    manager.load().await.unwrap();

    let out = drive(&manager, "a\nb\nc\nd\ne\nf\n").await;

    assert!(out.contains(FULL_NOTICE));
    assert_eq!(manager.view().await.count, 5);
}

#[tokio::test(start_paused = true)]
async fn unknown_position_is_reported() {
    let manager = manager();
    manager.load().await.unwrap();

    let out = drive(&manager, "done 4\n").await;

    assert!(out.contains("No priority #4"));
}

#[tokio::test(start_paused = true)]
async fn redraws_when_a_completed_entry_expires() {
    let manager = manager();
    manager.load().await.unwrap();
    let (mut keyboard, input) = tokio::io::duplex(256);
    let mut out = Vec::new();

    let typing = async move {
        keyboard.write_all(b"Write report\ndone 1\n").await.unwrap();
        tokio::time::sleep(Duration::from_millis(1100)).await;
        keyboard.write_all(b"quit\n").await.unwrap();
    };
    let (result, ()) = tokio::join!(
        terminal::run(&manager, BufReader::new(input), &mut out),
        typing
    );
    result.unwrap();

    let out = String::from_utf8(out).unwrap();
    // Initial, after the add, after `done 1`, and the unprompted one on expiry
    assert_eq!(out.matches("Priorities  (").count(), 4);
    let last = out.rsplit("Priorities  (").next().unwrap();
    assert!(last.starts_with("0/5 priorities)"), "last render: {last}");
    assert!(manager.todos().await.is_empty());
}
