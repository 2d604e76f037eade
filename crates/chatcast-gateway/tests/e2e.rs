//! Gateway over real sockets, driven by the chatcast client.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use std::net::SocketAddr;
use std::time::Duration;

use tokio::net::TcpListener;
use tokio::sync::oneshot;
use tokio::time::{sleep, timeout};

use chatcast_client::{Client, MessageStream};
use chatcast_core::{Message, User};
use chatcast_gateway::app_state::AppState;
use chatcast_gateway::config::ChatcastConfig;
use chatcast_gateway::server;

struct Gateway {
    addr: SocketAddr,
    state: AppState,
    _shutdown: oneshot::Sender<()>,
}

async fn start_gateway() -> Gateway {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let state = AppState::new(ChatcastConfig::default()).unwrap();

    let (shutdown, stop) = oneshot::channel::<()>();
    tokio::spawn(server::serve(listener, state.clone(), async move {
        let _ = stop.await;
    }));
    Gateway {
        addr,
        state,
        _shutdown: shutdown,
    }
}

async fn wait_for_streams(state: &AppState, n: usize) {
    let registry = state.registry();
    timeout(Duration::from_secs(2), async {
        while registry.len() != n {
            sleep(Duration::from_millis(10)).await;
        }
    })
    .await
    .unwrap_or_else(|_| panic!("registry never reached {n} streams (has {})", registry.len()));
}

async fn next_message(stream: &mut MessageStream) -> Message {
    timeout(Duration::from_secs(2), stream.recv())
        .await
        .expect("timed out waiting for message")
        .expect("stream closed")
        .expect("bad frame")
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn both_streams_get_hi_then_only_remaining_gets_bye() {
    let gw = start_gateway().await;
    let client = Client::new(gw.addr.to_string());

    let alice = User::new("a1", "Alice");
    let bob = User::new("b1", "Bob");
    let mut a = client.connect(&alice).await.unwrap();
    let mut b = client.connect(&bob).await.unwrap();
    wait_for_streams(&gw.state, 2).await;

    let ack = client.publish(&Message::new(alice.clone(), "hi", "1")).await.unwrap();
    assert!(ack.failed.is_empty());

    let got_a = next_message(&mut a).await;
    let got_b = next_message(&mut b).await;
    assert_eq!(got_a.content, "hi");
    assert!(got_a.is_from(&alice));
    assert_eq!(got_b, got_a);

    b.close().await.unwrap();
    wait_for_streams(&gw.state, 1).await;

    let ack = client.publish(&Message::new(alice.clone(), "bye", "2")).await.unwrap();
    assert!(ack.failed.is_empty());
    assert_eq!(next_message(&mut a).await.content, "bye");

    let metrics = gw.state.metrics();
    assert_eq!(metrics.streams_opened.get(&[]), 2);
    assert_eq!(metrics.streams_active.get(&[]), 1);
}

#[tokio::test]
async fn publish_with_no_streams_is_acked() {
    let gw = start_gateway().await;
    let client = Client::new(gw.addr.to_string());

    let ack = client
        .publish(&Message::new(User::new("x", "Nobody"), "anyone?", "0"))
        .await
        .unwrap();
    assert!(ack.failed.is_empty());
}

#[tokio::test]
async fn stream_without_name_is_refused() {
    let gw = start_gateway().await;
    let client = Client::new(gw.addr.to_string());

    let err = client.connect(&User::new("id-only", "")).await.err().expect("must fail");
    assert_eq!(err.client_code().as_str(), "STREAM_UNAVAILABLE");
    assert!(gw.state.registry().is_empty());
}

#[tokio::test]
async fn publish_without_sender_id_is_bad_request() {
    let gw = start_gateway().await;
    let client = Client::new(gw.addr.to_string());

    let err = client
        .publish(&Message::new(User::new("", "Ghost"), "boo", "0"))
        .await
        .expect_err("must fail");
    assert_eq!(err.client_code().as_str(), "BAD_REQUEST");
    assert!(err.to_string().contains("BAD_REQUEST"));
}

#[tokio::test]
async fn same_id_may_stream_twice() {
    let gw = start_gateway().await;
    let client = Client::new(gw.addr.to_string());

    let carol = User::new("c1", "Carol");
    let mut first = client.connect(&carol).await.unwrap();
    let mut second = client.connect(&carol).await.unwrap();
    wait_for_streams(&gw.state, 2).await;

    client.publish(&Message::new(carol.clone(), "echo", "0")).await.unwrap();
    assert_eq!(next_message(&mut first).await.content, "echo");
    assert_eq!(next_message(&mut second).await.content, "echo");
}
