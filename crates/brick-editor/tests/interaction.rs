//! Integration tests: pointer interaction, statistics, and persistence
//! through the `Editor` (brick-editor ↔ brick-core ↔ brick-render).

use brick_core::model::{BrickColor, BrickType};
use brick_core::{ConfigError, EditorConfig, Point, Size};
use brick_editor::persist::{self, MODELS_KEY};
use brick_editor::{
    Button, Editor, EditorError, InputEvent, KeyValueStore, MemoryStore, Notice, Outcome, Theme,
};
use pretty_assertions::assert_eq;
use std::collections::BTreeMap;

fn make_editor() -> Editor {
    let _ = env_logger::builder().is_test(true).try_init();
    Editor::new(EditorConfig {
        seed: Some(7),
        ..EditorConfig::default()
    })
    .unwrap()
    .with_clock(|| "2024-03-09T10:15:00.000Z".to_string())
}

// ─── Batch add ──────────────────────────────────────────────────────────

#[test]
fn batch_add_three_red_two_by_twos() {
    let mut editor = make_editor();
    editor.set_brick_type("2x2");
    editor.set_color("#ef4444").unwrap();
    editor.set_size(40).unwrap();
    let ids = editor.add_bricks(3);

    assert_eq!(ids.len(), 3);
    assert_eq!(editor.scene().len(), 3);

    let stats = editor.statistics();
    assert_eq!(stats.total_blocks, 3);
    assert_eq!(
        stats.block_types,
        BTreeMap::from([(BrickType::TwoByTwo, 3)])
    );
    assert_eq!(
        stats.used_colors.into_iter().collect::<Vec<_>>(),
        vec![BrickColor::verbatim("#ef4444")]
    );
}

#[test]
fn batch_positions_are_grid_aligned_and_inside() {
    let mut editor = make_editor();
    editor.set_brick_type("2x4");
    editor.add_bricks(100);
    for brick in editor.scene().bricks() {
        assert_eq!(brick.x % 20.0, 0.0);
        assert_eq!(brick.y % 20.0, 0.0);
        let b = brick.bounds();
        assert!(b.x0 >= 0.0 && b.x1 <= 800.0, "x out of area: {b:?}");
        assert!(b.y0 >= 0.0 && b.y1 <= 600.0, "y out of area: {b:?}");
    }
}

#[test]
fn batch_count_is_clamped() {
    let mut editor = make_editor();
    assert_eq!(editor.add_bricks(0).len(), 1);
    assert_eq!(editor.add_bricks(250).len(), 100);
    assert_eq!(editor.set_count(0), 1);
    assert_eq!(editor.set_count(500), 100);
    assert_eq!(editor.decrement_count(), 99);
    assert_eq!(editor.set_count(100), 100);
    assert_eq!(editor.increment_count(), 100);
}

#[test]
fn same_seed_same_layout() {
    let mut a = make_editor();
    let mut b = make_editor();
    a.add_bricks(10);
    b.add_bricks(10);
    assert_eq!(a.scene().records(), b.scene().records());
}

// ─── Click & drag ───────────────────────────────────────────────────────

#[test]
fn click_on_empty_area_places_snapped_brick() {
    let mut editor = make_editor();
    editor.handle_event(&InputEvent::down(105.0, 52.0));
    assert_eq!(editor.handle_event(&InputEvent::up(105.0, 52.0)), Outcome::Changed);

    let brick = &editor.scene().bricks()[0];
    assert_eq!(brick.origin(), Point::new(80.0, 40.0));
    assert_eq!(editor.history().len(), 1);
    assert_eq!(
        editor.activity().latest().unwrap().message,
        "Added a 2x2 brick by click."
    );
}

#[test]
fn click_near_edge_is_clamped_inside() {
    let mut editor = make_editor();
    editor.set_brick_type("2x4");
    editor.handle_event(&InputEvent::down(799.0, 599.0));
    editor.handle_event(&InputEvent::up(799.0, 599.0));
    assert_eq!(editor.scene().bricks()[0].origin(), Point::new(720.0, 560.0));
}

#[test]
fn drag_from_five_five_snaps_to_twenty_zero() {
    let mut editor = make_editor();
    editor.toggle_grid();
    assert!(!editor.grid().enabled);
    editor.add_brick_at(Point::new(25.0, 25.0));
    assert_eq!(editor.scene().bricks()[0].origin(), Point::new(5.0, 5.0));

    editor.toggle_grid();
    editor.handle_event(&InputEvent::down(10.0, 10.0));
    assert_eq!(editor.handle_event(&InputEvent::moved(22.0, 13.0)), Outcome::Preview);
    assert!(editor.is_dragging());
    assert_eq!(editor.dragged_brick(), Some(editor.scene().bricks()[0].id));

    // The scene is untouched until release; only the preview moved.
    assert_eq!(editor.scene().bricks()[0].origin(), Point::new(5.0, 5.0));
    assert_eq!(editor.visible_bricks()[0].origin(), Point::new(20.0, 0.0));

    assert_eq!(editor.handle_event(&InputEvent::up(22.0, 13.0)), Outcome::Changed);
    assert_eq!(editor.scene().bricks()[0].origin(), Point::new(20.0, 0.0));
    assert_eq!(editor.dragged_brick(), None);
}

#[test]
fn drag_never_removes_the_brick() {
    let mut editor = make_editor();
    editor.add_brick_at(Point::new(200.0, 200.0));
    editor.handle_event(&InputEvent::down(200.0, 200.0));
    editor.handle_event(&InputEvent::moved(260.0, 200.0));
    editor.handle_event(&InputEvent::up(260.0, 200.0));
    assert_eq!(editor.scene().len(), 1);
}

#[test]
fn release_far_from_press_moves_instead_of_removing() {
    let mut editor = make_editor();
    editor.add_brick_at(Point::new(100.0, 100.0));
    editor.handle_event(&InputEvent::down(90.0, 90.0));
    assert_eq!(editor.handle_event(&InputEvent::up(400.0, 400.0)), Outcome::Changed);

    assert_eq!(editor.scene().len(), 1);
    assert_eq!(editor.scene().bricks()[0].origin(), Point::new(400.0, 400.0));
    assert_eq!(editor.activity().latest().unwrap().message, "Moved a brick.");
}

#[test]
fn grid_change_is_not_retroactive() {
    let mut editor = make_editor();
    editor.toggle_grid();
    editor.add_brick_at(Point::new(33.0, 47.0));
    let before = editor.scene().bricks()[0].origin();

    editor.toggle_grid();
    editor.set_cell_size(50).unwrap();
    assert_eq!(editor.scene().bricks()[0].origin(), before);
}

#[test]
fn right_click_does_nothing() {
    let mut editor = make_editor();
    editor.add_brick_at(Point::new(100.0, 100.0));
    let down = InputEvent::PointerDown {
        x: 100.0,
        y: 100.0,
        button: Button::Secondary,
    };
    assert_eq!(editor.handle_event(&down), Outcome::Unchanged);
    assert_eq!(editor.handle_event(&InputEvent::up(100.0, 100.0)), Outcome::Unchanged);
    assert_eq!(editor.scene().len(), 1);
}

#[test]
fn statistics_track_every_mutation() {
    let mut editor = make_editor();
    editor.add_bricks(4);
    editor.set_color("#8b5cf6").unwrap();
    editor.add_brick_at(Point::new(300.0, 300.0));
    assert_eq!(editor.statistics().total_blocks, editor.scene().len());

    let first = editor.scene().bricks()[0].id;
    editor.remove_brick(first);
    assert_eq!(editor.statistics().total_blocks, editor.scene().len());

    editor.undo();
    assert_eq!(editor.statistics().total_blocks, editor.scene().len());
    assert_eq!(editor.statistics().distinct_colors(), 2);
}

// ─── Tool settings ──────────────────────────────────────────────────────

#[test]
fn invalid_settings_are_rejected() {
    let mut editor = make_editor();
    assert!(editor.set_color("blue-ish").is_err());
    assert!(editor.set_size(0).is_err());
    assert!(editor.set_cell_size(0).is_err());
    assert_eq!(editor.tools().color.as_str(), "#ef4444");
    assert_eq!(editor.tools().size, 40);
    assert_eq!(editor.grid().cell_size, 20);
}

#[test]
fn invalid_config_is_rejected() {
    let zero_size = EditorConfig::from_json(r#"{ "tools": { "size": 0 } }"#);
    assert!(matches!(zero_size, Err(ConfigError::InvalidSize)));

    let mut config = EditorConfig::default();
    config.grid.cell_size = 0;
    assert!(matches!(
        Editor::new(config),
        Err(EditorError::Config(ConfigError::InvalidCellSize))
    ));

    let mut config = EditorConfig::default();
    config.tools.color = BrickColor::verbatim("banana");
    assert!(matches!(
        Editor::new(config),
        Err(EditorError::Config(ConfigError::Color(_)))
    ));
}

#[test]
fn config_color_is_normalized() {
    let config =
        EditorConfig::from_json(r#"{ "tools": { "color": "rgb(239, 68, 68)" } }"#).unwrap();
    let mut editor = Editor::new(config).unwrap();
    editor.add_bricks(1);
    assert_eq!(
        editor.statistics().used_colors.into_iter().collect::<Vec<_>>(),
        vec![BrickColor::verbatim("#ef4444")]
    );
}

#[test]
fn size_factor_scales_new_bricks() {
    let mut editor = make_editor();
    editor.set_brick_type("1x4");
    editor.set_size(60).unwrap();
    editor.add_bricks(1);
    assert_eq!(editor.scene().bricks()[0].extent(), Size::new(120.0, 30.0));
}

// ─── Persistence ────────────────────────────────────────────────────────

#[test]
fn save_model_writes_expected_json() {
    let mut editor = make_editor();
    let mut store = MemoryStore::new();
    editor.add_brick_at(Point::new(100.0, 100.0));

    assert_eq!(editor.save_model(&mut store).unwrap(), Outcome::Unchanged);
    let raw = store.load(MODELS_KEY).unwrap();
    let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(
        value,
        serde_json::json!([{
            "timestamp": "2024-03-09T10:15:00.000Z",
            "blocks": [{ "type": "2x2", "color": "#ef4444", "size": 40, "x": 80.0, "y": 80.0 }],
            "statistics": {
                "totalBlocks": 1,
                "usedColors": ["#ef4444"],
                "blockTypes": { "2x2": 1 }
            }
        }])
    );
    assert_eq!(editor.saved_models(&store).len(), 1);
}

#[test]
fn save_empty_scene_is_a_notice() {
    let mut editor = make_editor();
    let mut store = MemoryStore::new();
    assert_eq!(
        editor.save_model(&mut store).unwrap(),
        Outcome::Notice(Notice::NothingToSave)
    );
    assert!(store.load(MODELS_KEY).is_none());
}

#[test]
fn corrupt_saved_models_fail_closed() {
    let mut editor = make_editor();
    let mut store = MemoryStore::new();
    store.save(MODELS_KEY, "{\"oops\":").unwrap();
    assert!(editor.saved_models(&store).is_empty());
    assert_eq!(editor.dashboard(&store).saved_models, 0);

    editor.add_bricks(2);
    editor.save_model(&mut store).unwrap();
    assert_eq!(editor.saved_models(&store).len(), 1);
}

#[test]
fn preferences_roundtrip() {
    let mut store = MemoryStore::new();
    let mut editor = make_editor();
    editor.toggle_grid();
    editor.set_cell_size(10).unwrap();
    assert_eq!(editor.toggle_theme(), Theme::Dark);
    editor.save_preferences(&mut store).unwrap();

    let mut fresh = make_editor();
    fresh.load_preferences(&store);
    assert!(!fresh.grid().enabled);
    assert_eq!(fresh.grid().cell_size, 10);
    assert_eq!(fresh.theme(), Theme::Dark);
    assert_eq!(persist::load_theme(&store), Theme::Dark);
}

// ─── Dashboard ──────────────────────────────────────────────────────────

#[test]
fn dashboard_summarizes_scene_and_activity() {
    let mut editor = make_editor();
    let mut store = MemoryStore::new();
    editor.add_bricks(2);
    editor.set_color("#3b82f6").unwrap();
    editor.set_brick_type("1x1");
    editor.add_bricks(1);
    editor.save_model(&mut store).unwrap();
    for _ in 0..12 {
        editor.toggle_grid();
    }

    let dash = editor.dashboard(&store);
    assert_eq!(dash.total_blocks, 3);
    assert_eq!(dash.used_colors, 2);
    assert_eq!(dash.saved_models, 1);
    assert_eq!(dash.type_chart.labels, vec!["2x2", "1x1"]);
    assert_eq!(dash.type_chart.data, vec![2, 1]);
    assert_eq!(dash.color_chart.background_color, vec!["#ef4444", "#3b82f6"]);
    assert_eq!(dash.recent_activity.len(), 10);
    assert_eq!(editor.activity().len(), 15);
    assert_eq!(dash.recent_activity[0].message, "Grid snap enabled.");
    assert_eq!(dash.recent_activity[0].timestamp, "2024-03-09T10:15:00.000Z");
}

#[test]
fn independent_editors_do_not_share_state() {
    let mut a = make_editor();
    let b = make_editor();
    a.add_bricks(3);
    assert_eq!(a.scene().len(), 3);
    assert!(b.is_empty());
    assert!(b.history().is_empty());
}
