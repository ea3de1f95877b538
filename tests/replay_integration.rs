use std::io::Write;

use portfolio_motion::config::Config;
use portfolio_motion::replay::{replay, ReplayError, Trace};
use portfolio_motion::sections::SectionId;
use tempfile::NamedTempFile;

const TRACE: &str = r#"{
    "viewport_height": 900,
    "sections": [
        { "id": "home", "top": 0, "height": 900 },
        { "id": "about", "top": 900, "height": 700 },
        { "id": "projects", "top": 1600, "height": 1200 }
    ],
    "events": [
        { "at_ms": 0, "type": "move", "x": 300, "y": 200 },
        { "at_ms": 100, "type": "over", "ancestry": [{ "tag": "div", "classes": ["clickable"] }] },
        { "at_ms": 200, "type": "out", "related": null },
        { "at_ms": 400, "type": "scroll", "y": 1000 },
        { "at_ms": 420, "type": "scroll", "y": 1100 },
        { "at_ms": 700, "type": "hide", "section": "about" },
        { "at_ms": 700, "type": "scroll", "y": 1300 },
        { "at_ms": 900, "type": "show", "section": "about" },
        { "at_ms": 900, "type": "scroll", "y": 1000 }
    ]
}"#;

#[test]
fn test_replay_with_config_file() {
    let mut config_file = NamedTempFile::new().unwrap();
    writeln!(
        config_file,
        "[follower]\nframe_interval_ms = 20\nidle_window_ms = 500\n\n[logging]\nlevel = \"debug\""
    )
    .unwrap();
    let config = Config::load(config_file.path()).unwrap();

    let trace = Trace::from_json(TRACE).unwrap();
    let frames = replay(&trace, &config).unwrap();

    // Frame interval from config; duration defaults to last event + idle window + one frame
    assert_eq!(frames[1].at_ms, 20);
    assert_eq!(frames.last().unwrap().at_ms, 1420);

    let at = |ms: u64| frames.iter().find(|f| f.at_ms == ms).copied().unwrap();

    assert!(at(100).cursor.state.hovering);
    assert!(!at(200).cursor.state.hovering);

    // Idle after 500ms without movement
    assert!(!at(480).cursor.state.idle);
    assert!(at(500).cursor.state.idle);

    assert_eq!(at(380).active_section, SectionId::Home);
    assert_eq!(at(400).active_section, SectionId::About);

    // About hidden; Projects top at 300 is in focus
    assert_eq!(at(700).active_section, SectionId::Projects);
    // About shown again and back in focus
    assert_eq!(at(900).active_section, SectionId::About);
}

#[test]
fn test_frames_serialize_as_json_lines() {
    let trace = Trace::from_json(TRACE).unwrap();
    let frames = replay(&trace, &Config::default()).unwrap();

    let line = serde_json::to_string(&frames[0]).unwrap();
    let value: serde_json::Value = serde_json::from_str(&line).unwrap();
    assert_eq!(value["at_ms"], 0);
    assert_eq!(value["active_section"], "home");
    assert_eq!(value["cursor"]["visible"], true);
    assert_eq!(value["cursor"]["state"]["idle"], false);
    assert_eq!(value["intro"], "title");
    assert_eq!(value["overlay"], "shown");
    assert!(value["modal"].is_null());
}

#[test]
fn test_trace_interval_overrides_config() {
    let mut trace = Trace::from_json(TRACE).unwrap();
    trace.frame_interval_ms = Some(50);
    trace.duration_ms = Some(1000);

    let frames = replay(&trace, &Config::default()).unwrap();
    assert_eq!(frames.len(), 21);
    assert!(frames.iter().all(|f| f.at_ms % 50 == 0));
}

#[test]
fn test_duplicate_section_rejected() {
    let json = r#"{
        "viewport_height": 900,
        "sections": [
            { "id": "home", "top": 0, "height": 900 },
            { "id": "home", "top": 900, "height": 700 }
        ]
    }"#;
    let trace = Trace::from_json(json).unwrap();
    assert!(matches!(
        replay(&trace, &Config::default()),
        Err(ReplayError::DuplicateSection(SectionId::Home))
    ));
}

#[test]
fn test_empty_trace_still_replays() {
    let trace = Trace::from_json(r#"{ "viewport_height": 900 }"#).unwrap();
    let frames = replay(&trace, &Config::default()).unwrap();
    assert!(!frames.is_empty());
    assert!(frames.iter().all(|f| !f.cursor.visible));
    assert!(frames.iter().all(|f| f.active_section == SectionId::Home));
}
