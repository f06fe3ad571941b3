mod common;

use std::{sync::Arc, time::Duration};

use tokio::task::JoinSet;

use tinylink::{
    cli::{SessionCommand, parse_command, spawn_request},
    management::SessionState,
};

use common::{Script, session};

#[test]
fn test_parse_shorten_command() {
    assert_eq!(
        parse_command("shorten https://example.com/a"),
        SessionCommand::Shorten("https://example.com/a".to_string())
    );
    assert_eq!(
        parse_command("  s   https://example.com/a  "),
        SessionCommand::Shorten("https://example.com/a".to_string())
    );
}

#[test]
fn test_parse_bare_url_is_shorten() {
    assert_eq!(
        parse_command("https://very-long-domain.example/path?x=1"),
        SessionCommand::Shorten("https://very-long-domain.example/path?x=1".to_string())
    );
}

#[test]
fn test_parse_shorten_without_argument_keeps_empty_url() {
    // Validation reports the empty input, not the parser.
    assert_eq!(parse_command("shorten"), SessionCommand::Shorten(String::new()));
}

#[test]
fn test_parse_simple_commands() {
    assert_eq!(parse_command("stats"), SessionCommand::Stats);
    assert_eq!(parse_command("REFRESH"), SessionCommand::Stats);
    assert_eq!(parse_command("copy"), SessionCommand::Copy);
    assert_eq!(parse_command("open"), SessionCommand::Open);
    assert_eq!(parse_command("show"), SessionCommand::Show);
    assert_eq!(parse_command("help"), SessionCommand::Help);
    assert_eq!(parse_command("quit"), SessionCommand::Quit);
    assert_eq!(parse_command("exit"), SessionCommand::Quit);
}

#[test]
fn test_parse_empty_and_unknown() {
    assert_eq!(parse_command(""), SessionCommand::Empty);
    assert_eq!(parse_command("   "), SessionCommand::Empty);
    assert_eq!(
        parse_command("frobnicate now"),
        SessionCommand::Unknown("frobnicate".to_string())
    );
}

#[tokio::test]
async fn test_spawned_stats_requests_share_busy_flag() {
    let (session, backend) = session(Script {
        stats_delay: Duration::from_millis(200),
        ..Default::default()
    })
    .await;
    session.shorten("https://example.com").await.unwrap();
    let session = Arc::new(session);
    let mut tasks = JoinSet::new();

    assert!(spawn_request(&mut tasks, &session, SessionCommand::Stats));
    assert!(spawn_request(&mut tasks, &session, SessionCommand::Stats));

    // The caller is free while the request is out.
    tokio::time::sleep(Duration::from_millis(50)).await;
    assert!(session.is_fetching_stats());

    tasks.join_all().await;
    assert_eq!(backend.stats_calls(), 1);
    assert!(!session.is_fetching_stats());
    assert_eq!(session.state().await, SessionState::StatsReady);
}

#[tokio::test]
async fn test_spawned_shorten_is_observable_while_in_flight() {
    let (session, backend) = session(Script {
        shorten_delay: Duration::from_millis(200),
        ..Default::default()
    })
    .await;
    let session = Arc::new(session);
    let mut tasks = JoinSet::new();

    let command = parse_command("https://example.com/long");
    assert!(spawn_request(&mut tasks, &session, command));

    tokio::time::sleep(Duration::from_millis(50)).await;
    assert!(session.is_submitting());
    assert_eq!(session.state().await, SessionState::Submitting);

    tasks.join_all().await;
    assert_eq!(backend.shorten_calls(), 1);
    assert_eq!(session.short_url().await.as_deref(), Some("https://tiny.example/abc123"));
}

#[tokio::test]
async fn test_local_commands_are_not_spawned() {
    let (session, backend) = session(Script::default()).await;
    let session = Arc::new(session);
    let mut tasks = JoinSet::new();

    for command in [SessionCommand::Show, SessionCommand::Copy, SessionCommand::Quit] {
        assert!(!spawn_request(&mut tasks, &session, command));
    }

    assert!(tasks.is_empty());
    assert_eq!(backend.shorten_calls() + backend.stats_calls(), 0);
}
