use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::Mutex as StdMutex;

use async_trait::async_trait;
use tokio::time::{self, Duration, Instant};
use tokio_util::sync::CancellationToken;

use super::types::NotificationRequest;
use super::{NotificationQueue, QueueOptions};
use crate::config::NotificationLevel;
use crate::match_state::{Attribution, MatchSnapshot, MatchState};
use crate::sinks::{DisplaySink, ImageFetcher, PresentationSignal};

struct RecordingSink {
    shown: StdMutex<Vec<(String, String, Instant)>>,
    fail: bool,
}

impl RecordingSink {
    fn new() -> Arc<Self> {
        Arc::new(Self {
            shown: StdMutex::new(Vec::new()),
            fail: false,
        })
    }

    fn failing() -> Arc<Self> {
        Arc::new(Self {
            shown: StdMutex::new(Vec::new()),
            fail: true,
        })
    }

    fn titles(&self) -> Vec<String> {
        self.shown
            .lock()
            .unwrap()
            .iter()
            .map(|(t, _, _)| t.clone())
            .collect()
    }

    fn messages(&self) -> Vec<String> {
        self.shown
            .lock()
            .unwrap()
            .iter()
            .map(|(_, m, _)| m.clone())
            .collect()
    }

    fn timestamps(&self) -> Vec<Instant> {
        self.shown
            .lock()
            .unwrap()
            .iter()
            .map(|(_, _, at)| *at)
            .collect()
    }

    fn count(&self) -> usize {
        self.shown.lock().unwrap().len()
    }
}

impl DisplaySink for RecordingSink {
    fn show(
        &self,
        title: &str,
        message: &str,
        _icon: Option<&Path>,
        _timeout_ms: u64,
    ) -> Result<(), anyhow::Error> {
        self.shown
            .lock()
            .unwrap()
            .push((title.to_string(), message.to_string(), Instant::now()));
        if self.fail {
            anyhow::bail!("display surface unavailable");
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum SignalEvent {
    Present(PathBuf),
    Reset,
}

struct RecordingSignal {
    events: StdMutex<Vec<(SignalEvent, Instant)>>,
}

impl RecordingSignal {
    fn new() -> Arc<Self> {
        Arc::new(Self {
            events: StdMutex::new(Vec::new()),
        })
    }

    fn events(&self) -> Vec<(SignalEvent, Instant)> {
        self.events.lock().unwrap().clone()
    }
}

impl PresentationSignal for RecordingSignal {
    fn present(&self, asset: &Path) -> Result<(), anyhow::Error> {
        self.events
            .lock()
            .unwrap()
            .push((SignalEvent::Present(asset.to_path_buf()), Instant::now()));
        Ok(())
    }

    fn reset(&self) -> Result<(), anyhow::Error> {
        self.events
            .lock()
            .unwrap()
            .push((SignalEvent::Reset, Instant::now()));
        Ok(())
    }
}

struct NoImages;

#[async_trait]
impl ImageFetcher for NoImages {
    async fn player_portrait(
        &self,
        _player: &str,
        _home_team: &str,
        _away_team: &str,
    ) -> Result<image::DynamicImage, anyhow::Error> {
        anyhow::bail!("imagery backend offline")
    }

    async fn team_badge(&self, _team: &str) -> Result<image::DynamicImage, anyhow::Error> {
        anyhow::bail!("imagery backend offline")
    }
}

fn temp_dir(tag: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("matchday-queue-{}-{tag}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

fn build_queue(
    sink: Arc<RecordingSink>,
    signal: Arc<RecordingSignal>,
    workers: usize,
    font: Option<Vec<u8>>,
    tag: &str,
) -> (NotificationQueue, CancellationToken) {
    let token = CancellationToken::new();
    let queue = NotificationQueue::new(
        sink,
        signal,
        Arc::new(NoImages),
        QueueOptions {
            asset_dir: temp_dir(tag),
            media_dir: temp_dir(tag),
            render_workers: workers,
            font,
        },
        token.clone(),
    );
    (queue, token)
}

fn goal_snapshot(home_team: &str, scorer: Option<&str>) -> MatchSnapshot {
    let mut snap = MatchSnapshot::quiet(MatchState {
        match_id: format!("m-{home_team}"),
        home_team: home_team.into(),
        away_team: "Spurs".into(),
        home_score: 1,
        away_score: 0,
        status: "L".into(),
        match_time: "73'".into(),
        last_goal_scorer: scorer.map(|name| Attribution {
            shirt: "10".into(),
            player: name.into(),
            team: None,
        }),
        last_yellow_card: None,
        last_red_card: None,
    });
    snap.goal = true;
    snap
}

fn all_levels() -> NotificationLevel {
    NotificationLevel::from_flags(true, true, true)
}

#[tokio::test(start_paused = true)]
async fn fifo_order_matches_submission_order() {
    let sink = RecordingSink::new();
    let (queue, _token) = build_queue(sink.clone(), RecordingSignal::new(), 1, None, "fifo");
    queue.configure(all_levels(), false, false, 10).await;

    // interleaved submissions from three concurrent callers; the lock
    // pins down the true global submission order
    let log = Arc::new(tokio::sync::Mutex::new(Vec::new()));
    let mut handles = Vec::new();
    for caller in 0..3 {
        let queue = queue.clone();
        let log = log.clone();
        handles.push(tokio::spawn(async move {
            for i in 0..3 {
                let team = format!("Team{caller}x{i}");
                let snap = goal_snapshot(&team, None);
                let mut order = log.lock().await;
                queue.submit(&snap).await;
                order.push(snap.to_string());
            }
        }));
    }
    for handle in handles {
        handle.await.unwrap();
    }

    time::sleep(Duration::from_secs(5)).await;

    let submitted = log.lock().await.clone();
    assert_eq!(submitted.len(), 9);
    assert_eq!(sink.messages(), submitted);
}

#[tokio::test(start_paused = true)]
async fn timeout_gap_between_items_is_honored() {
    let sink = RecordingSink::new();
    let (queue, _token) = build_queue(sink.clone(), RecordingSignal::new(), 1, None, "gap");
    queue.configure(all_levels(), false, false, 5000).await;

    queue.submit(&goal_snapshot("Arsenal", None)).await;
    queue.submit(&goal_snapshot("Chelsea", None)).await;

    time::sleep(Duration::from_secs(30)).await;

    let stamps = sink.timestamps();
    assert_eq!(stamps.len(), 2);
    assert!(stamps[1] - stamps[0] >= Duration::from_millis(5000));
}

#[tokio::test(start_paused = true)]
async fn display_failure_does_not_stall_the_queue() {
    let sink = RecordingSink::failing();
    let (queue, _token) = build_queue(sink.clone(), RecordingSignal::new(), 1, None, "fail");
    queue.configure(all_levels(), false, false, 10).await;

    queue.submit(&goal_snapshot("Arsenal", None)).await;
    queue.submit(&goal_snapshot("Chelsea", None)).await;

    time::sleep(Duration::from_secs(1)).await;
    assert_eq!(sink.count(), 2);
}

#[tokio::test(start_paused = true)]
async fn repeated_advanced_enable_starts_one_pool() {
    let sink = RecordingSink::new();
    let (queue, _token) = build_queue(
        sink,
        RecordingSignal::new(),
        4,
        Some(vec![0u8; 16]),
        "pool",
    );

    queue.configure(all_levels(), true, true, 10).await;
    time::sleep(Duration::from_millis(50)).await;
    assert_eq!(queue.render_worker_count(), 4);

    queue.configure(all_levels(), true, true, 10).await;
    queue.configure(all_levels(), true, true, 10).await;
    time::sleep(Duration::from_millis(50)).await;
    assert_eq!(queue.render_worker_count(), 4);

    // disabling advanced mode does not shrink the pool
    queue.configure(all_levels(), true, false, 10).await;
    time::sleep(Duration::from_millis(50)).await;
    assert_eq!(queue.render_worker_count(), 4);
}

#[tokio::test(start_paused = true)]
async fn advanced_without_font_falls_back_to_standard() {
    let sink = RecordingSink::new();
    let (queue, _token) = build_queue(sink.clone(), RecordingSignal::new(), 2, None, "nofont");
    queue.configure(all_levels(), true, true, 10).await;

    queue.submit(&goal_snapshot("Arsenal", Some("A. Smith"))).await;
    time::sleep(Duration::from_secs(1)).await;

    let titles = sink.titles();
    assert_eq!(titles.len(), 1);
    assert_eq!(titles[0], "GOAL! A. Smith");
}

#[tokio::test(start_paused = true)]
async fn render_failure_degrades_to_text_not_silence() {
    // garbage font bytes: the pool starts but every render fails
    let sink = RecordingSink::new();
    let (queue, _token) = build_queue(
        sink.clone(),
        RecordingSignal::new(),
        2,
        Some(vec![0u8; 16]),
        "badfont",
    );
    queue.configure(all_levels(), true, true, 10).await;

    queue.submit(&goal_snapshot("Arsenal", Some("A. Smith"))).await;
    time::sleep(Duration::from_secs(5)).await;

    let titles = sink.titles();
    assert_eq!(titles.len(), 1);
    assert_eq!(titles[0], "GOAL! A. Smith");
}

#[tokio::test(start_paused = true)]
async fn advanced_asset_drives_presentation_signal() {
    let sink = RecordingSink::new();
    let signal = RecordingSignal::new();
    let (queue, _token) = build_queue(sink, signal.clone(), 1, None, "signal");
    queue.configure(all_levels(), false, false, 1000).await;

    let asset = temp_dir("signal-asset").join("notif.png");
    std::fs::write(&asset, b"png").unwrap();

    queue
        .inner()
        .display_tx
        .send(NotificationRequest::AdvancedPrepared {
            asset: asset.clone(),
            timeout_ms: 1000,
        })
        .unwrap();

    time::sleep(Duration::from_secs(10)).await;

    let events = signal.events();
    assert_eq!(events.len(), 2);
    assert_eq!(events[0].0, SignalEvent::Present(asset.clone()));
    assert_eq!(events[1].0, SignalEvent::Reset);
    // visible for timeout + transition delay before the reset
    assert!(events[1].1 - events[0].1 >= Duration::from_millis(2500));
    // transient asset is cleaned up after display
    assert!(!asset.exists());
}

#[tokio::test(start_paused = true)]
async fn cancellation_stops_consumption_promptly() {
    let sink = RecordingSink::new();
    let (queue, token) = build_queue(sink.clone(), RecordingSignal::new(), 1, None, "cancel");
    queue.configure(all_levels(), false, false, 60_000).await;

    queue.submit(&goal_snapshot("Arsenal", None)).await;
    queue.submit(&goal_snapshot("Chelsea", None)).await;
    queue.submit(&goal_snapshot("Leeds", None)).await;

    // let the worker pop the first item, which then sleeps 60s
    time::sleep(Duration::from_millis(100)).await;
    assert_eq!(sink.count(), 1);

    token.cancel();

    // well past the remaining timeouts; nothing further is popped
    time::sleep(Duration::from_secs(300)).await;
    assert_eq!(sink.count(), 1);
}

#[tokio::test(start_paused = true)]
async fn cancellation_stops_render_pool() {
    let sink = RecordingSink::new();
    let (queue, token) = build_queue(
        sink.clone(),
        RecordingSignal::new(),
        3,
        Some(vec![0u8; 16]),
        "cancel-render",
    );
    queue.configure(all_levels(), true, true, 10).await;
    time::sleep(Duration::from_millis(50)).await;
    assert_eq!(queue.render_worker_count(), 3);

    token.cancel();
    time::sleep(Duration::from_secs(1)).await;
    assert_eq!(queue.render_worker_count(), 0);

    // tasks submitted after cancellation are never consumed
    queue.submit(&goal_snapshot("Arsenal", Some("A. Smith"))).await;
    time::sleep(Duration::from_secs(60)).await;
    assert_eq!(sink.count(), 0);
}

#[tokio::test(start_paused = true)]
async fn goal_with_scorer_end_to_end() {
    let sink = RecordingSink::new();
    let (queue, _token) = build_queue(sink.clone(), RecordingSignal::new(), 1, None, "e2e");
    queue
        .configure(
            NotificationLevel::empty().with(NotificationLevel::GOALSCORER),
            true,
            false,
            10,
        )
        .await;

    queue.submit(&goal_snapshot("Arsenal", Some("A. Smith"))).await;
    time::sleep(Duration::from_secs(1)).await;

    let shown = sink.shown.lock().unwrap().clone();
    assert_eq!(shown.len(), 1);
    assert!(shown[0].0.contains("A. Smith"));
    assert_eq!(shown[0].1, "Arsenal 1-0 Spurs");
}
