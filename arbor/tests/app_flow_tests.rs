// End-to-end flows through the example application tree

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use pretty_assertions::assert_eq;
use std::path::Path;
use tempfile::TempDir;

use arbor::{AppConfig, AppRoot, ConfigSource, RootNode, RuntimeConfig};
use arbor_core::test_helpers::Harness;
use arbor_core::{LifecycleState, Message};

const COMPLETE: &str = r#"
[profile]
name = "ada"
role = "engineer"
team = "compilers"

[dashboard]
heartbeat_ms = 200
"#;

fn key(code: KeyCode) -> Message {
    Message::Key(KeyEvent::new(code, KeyModifiers::NONE))
}

fn harness(path: &Path, reconf: bool) -> Harness<AppRoot> {
    let source = ConfigSource::new(path).force_form(reconf);
    Harness::new(AppRoot::assemble(source, RuntimeConfig::default()))
}

/// Run init, the first resize and everything that follows for a few cycles.
async fn start(harness: &mut Harness<AppRoot>, cycles: usize) {
    let mut queue = harness.init().await;
    queue.insert(
        0,
        Message::Resize {
            width: 80,
            height: 24,
        },
    );
    for msg in queue {
        harness.pump(msg, cycles).await;
    }
}

fn state_of(harness: &Harness<AppRoot>, id: &str) -> LifecycleState {
    harness.root().core().registry().find(id).expect("linked node").state()
}

#[tokio::test(start_paused = true)]
async fn test_complete_config_goes_straight_to_dashboard() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("arbor.toml");
    std::fs::write(&path, COMPLETE).unwrap();

    let mut harness = harness(&path, false);
    start(&mut harness, 8).await;

    let root = harness.root();
    let cfg = root.configurator_id().as_str().to_string();
    let dash = root.dashboard_id().as_str().to_string();
    assert_eq!(state_of(&harness, &cfg), LifecycleState::Finished);
    assert_eq!(state_of(&harness, &dash), LifecycleState::Active);
    assert_eq!(state_of(&harness, "heartbeat-1"), LifecycleState::Active);
    assert_eq!(harness.root().core().focused().map(|id| id.as_str()), Some(dash.as_str()));

    let screen = harness.root().view();
    assert!(screen.contains("Name: ada"));
    assert!(screen.contains("every 200 ms"));
    assert!(!harness.is_stopped());
}

#[tokio::test(start_paused = true)]
async fn test_missing_config_opens_form_and_saves() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("nested").join("arbor.toml");

    let mut harness = harness(&path, false);
    start(&mut harness, 4).await;
    let cfg = harness.root().configurator_id().as_str().to_string();
    assert_eq!(state_of(&harness, &cfg), LifecycleState::Active);
    assert!(harness.root().view().contains("> Name: "));

    for c in "ada".chars() {
        harness.deliver(key(KeyCode::Char(c))).await;
    }
    harness.deliver(key(KeyCode::Enter)).await;
    assert!(harness.root().view().contains("error: Role must not be empty"));

    harness.deliver(key(KeyCode::Tab)).await;
    for c in "dev".chars() {
        harness.deliver(key(KeyCode::Char(c))).await;
    }
    harness.deliver(key(KeyCode::Tab)).await;
    for c in "core".chars() {
        harness.deliver(key(KeyCode::Char(c))).await;
    }
    let produced = harness.deliver(key(KeyCode::Enter)).await;
    assert_eq!(produced.len(), 1);
    assert!(path.exists());

    for msg in produced {
        harness.pump(msg, 6).await;
    }
    let saved = AppConfig::load(&path).unwrap();
    assert!(saved.is_complete());
    assert_eq!(saved.profile.team, "core");
    assert_eq!(state_of(&harness, &cfg), LifecycleState::Finished);
}

#[tokio::test(start_paused = true)]
async fn test_reconf_forces_form() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("arbor.toml");
    std::fs::write(&path, COMPLETE).unwrap();

    let mut harness = harness(&path, true);
    start(&mut harness, 4).await;

    let screen = harness.root().view();
    assert!(screen.contains("Name: ada"));
    assert!(screen.contains("Tab/Up/Down move"));
}

#[tokio::test(start_paused = true)]
async fn test_dashboard_shutdown_ends_program() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("arbor.toml");
    std::fs::write(&path, COMPLETE).unwrap();

    let mut harness = harness(&path, false);
    start(&mut harness, 8).await;

    let remaining = harness.pump(key(KeyCode::Char('s')), 20).await;
    assert!(harness.is_stopped());
    assert!(remaining.is_empty());
    assert!(harness.root().is_quitting());
    assert!(harness.root().last_error().is_none());
    assert_eq!(state_of(&harness, "heartbeat-1"), LifecycleState::Finished);
    assert!(harness.root().view().contains("See you later!"));
}

#[tokio::test]
async fn test_ctrl_c_quits_immediately() {
    let dir = TempDir::new().unwrap();
    let mut harness = harness(&dir.path().join("arbor.toml"), false);

    let ctrl_c = Message::Key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
    let produced = harness.deliver(ctrl_c).await;
    assert!(matches!(&produced[..], [Message::Quit]));
    assert!(harness.root().is_quitting());
}

#[tokio::test]
async fn test_malformed_config_terminates_with_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("arbor.toml");
    std::fs::write(&path, "[profile\n").unwrap();

    let mut harness = harness(&path, false);
    start(&mut harness, 4).await;

    assert!(harness.is_stopped());
    let err = harness.root().last_error().expect("error recorded");
    assert!(err.to_string().starts_with("parsing "));
    assert!(harness.root().view().contains("application error"));
}
