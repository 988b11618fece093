mod common;

use std::time::Duration;

use common::{FakeService, record, running};
use scrapewatch_client::ClientError;
use scrapewatch_session::{Event, Poller, ResultFetcher};
use tokio::sync::mpsc;
use tokio::sync::mpsc::error::TryRecvError;
use tokio::time::Instant;

const POLL: Duration = Duration::from_secs(2);
const FETCH: Duration = Duration::from_secs(10);

#[tokio::test(start_paused = true)]
async fn poller_first_query_waits_one_interval() {
    let service = FakeService::new();
    service.push_status(Ok(running(0.1, 0.0)));
    let (tx, mut rx) = mpsc::unbounded_channel();
    let mut poller = Poller::new(service.clone(), POLL, tx);

    let started = Instant::now();
    poller.start();
    let event = rx.recv().await.expect("status event");

    assert_eq!(started.elapsed(), POLL);
    match event {
        Event::Status {
            generation,
            outcome: Ok(snapshot),
        } => {
            assert_eq!(Some(generation), poller.generation());
            assert!(snapshot.active);
        }
        other => panic!("unexpected event {other:?}"),
    }
}

#[tokio::test(start_paused = true)]
async fn poller_restart_keeps_a_single_repetition() {
    let service = FakeService::new();
    let (tx, mut rx) = mpsc::unbounded_channel();
    let mut poller = Poller::new(service.clone(), POLL, tx);

    poller.start();
    let first = poller.generation();
    poller.start();
    let second = poller.generation();
    assert_ne!(first, second);
    assert!(poller.is_running());

    for tick in 1..=3 {
        match rx.recv().await.expect("status event") {
            Event::Status { generation, .. } => assert_eq!(Some(generation), second),
            other => panic!("unexpected event {other:?}"),
        }
        // let anything else due at this instant run before counting
        tokio::time::sleep(Duration::from_millis(500)).await;
        assert_eq!(service.status_calls(), tick);
        assert!(matches!(rx.try_recv(), Err(TryRecvError::Empty)));
    }
}

#[tokio::test(start_paused = true)]
async fn poller_stops_itself_after_transport_failure() {
    let service = FakeService::new();
    service.push_status(Ok(running(0.2, 0.0)));
    service.push_status(Err(ClientError::Timeout("status timed out".to_string())));
    let (tx, mut rx) = mpsc::unbounded_channel();
    let mut poller = Poller::new(service.clone(), POLL, tx);

    poller.start();
    let generation = poller.generation().unwrap();

    assert!(matches!(
        rx.recv().await,
        Some(Event::Status { outcome: Ok(_), .. })
    ));
    match rx.recv().await {
        Some(Event::Status {
            generation: failed,
            outcome: Err(e),
        }) => {
            assert_eq!(failed, generation);
            assert!(e.is_transport());
        }
        other => panic!("unexpected event {other:?}"),
    }

    tokio::time::sleep(POLL * 5).await;
    assert_eq!(service.status_calls(), 2);
    assert!(!poller.is_running());
    // still current until the owner acknowledges the failure
    assert!(poller.is_current(generation));
    assert!(matches!(rx.try_recv(), Err(TryRecvError::Empty)));
}

#[tokio::test(start_paused = true)]
async fn poller_stop_is_idempotent() {
    let service = FakeService::new();
    let (tx, mut rx) = mpsc::unbounded_channel();
    let mut poller = Poller::new(service.clone(), POLL, tx);

    poller.stop();
    poller.start();
    let generation = poller.generation().unwrap();
    poller.stop();
    poller.stop();

    assert!(!poller.is_running());
    assert_eq!(poller.generation(), None);
    assert!(!poller.is_current(generation));

    tokio::time::sleep(POLL * 3).await;
    assert_eq!(service.status_calls(), 0);
    assert!(matches!(rx.try_recv(), Err(TryRecvError::Empty)));
}

#[tokio::test(start_paused = true)]
async fn dropping_poller_cancels_repetition() {
    let service = FakeService::new();
    let (tx, mut rx) = mpsc::unbounded_channel();
    {
        let mut poller = Poller::new(service.clone(), POLL, tx);
        poller.start();
    }

    tokio::time::sleep(POLL * 3).await;
    assert_eq!(service.status_calls(), 0);
    assert!(matches!(rx.try_recv(), Err(TryRecvError::Disconnected)));
}

#[tokio::test(start_paused = true)]
async fn fetcher_runs_immediately_then_on_cadence() {
    let service = FakeService::new();
    service.set_results(vec![record("a"), record("b")]);
    let (tx, mut rx) = mpsc::unbounded_channel();
    let mut fetcher = ResultFetcher::new(service.clone(), FETCH, tx);

    let started = Instant::now();
    fetcher.start();

    match rx.recv().await {
        Some(Event::Results(Ok(records))) => assert_eq!(records.len(), 2),
        other => panic!("unexpected event {other:?}"),
    }
    assert_eq!(started.elapsed(), Duration::ZERO);

    assert!(matches!(rx.recv().await, Some(Event::Results(Ok(_)))));
    assert_eq!(started.elapsed(), FETCH);
    assert!(fetcher.is_running());
}

#[tokio::test(start_paused = true)]
async fn fetcher_keeps_going_after_failure() {
    let service = FakeService::new();
    service.fail_results(1);
    service.set_results(vec![record("a")]);
    let (tx, mut rx) = mpsc::unbounded_channel();
    let mut fetcher = ResultFetcher::new(service.clone(), FETCH, tx);

    fetcher.start();

    assert!(matches!(rx.recv().await, Some(Event::Results(Err(_)))));
    assert!(matches!(rx.recv().await, Some(Event::Results(Ok(_)))));
    assert!(fetcher.is_running());

    fetcher.stop();
    fetcher.stop();
    tokio::time::sleep(FETCH * 2).await;
    assert_eq!(service.results_calls(), 2);
    assert!(!fetcher.is_running());
}
