//! Tests for [`CancellationToken`].

use std::thread;

use crate::{CancellationToken, OperationCancelled};

#[test]
fn fresh_token_is_not_cancelled() {
    let token = CancellationToken::new();
    assert!(!token.is_cancelled());
    assert_eq!(token.check(), Ok(()));
}

#[test]
fn clones_share_the_flag() {
    let token = CancellationToken::new();
    let clone = token.clone();
    clone.cancel();
    assert!(token.is_cancelled());
    assert_eq!(token.check(), Err(OperationCancelled));
}

#[test]
fn cancellation_crosses_threads() {
    let token = CancellationToken::new();
    let worker = token.clone();
    thread::spawn(move || worker.cancel())
        .join()
        .expect("worker thread should finish");
    assert!(token.is_cancelled());
}

#[test]
fn error_message_is_stable() {
    assert_eq!(OperationCancelled.to_string(), "operation cancelled");
}
