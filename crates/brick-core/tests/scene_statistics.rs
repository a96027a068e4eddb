//! Integration tests: saved records → Scene → statistics.
//!
//! Exercises `brick-core` end to end: stored JSON is loaded verbatim,
//! rebuilt into a scene, and tallied.

use brick_core::geometry;
use brick_core::model::{BrickColor, BrickRecord, BrickType};
use brick_core::{Point, Scene, Size, Statistics};
use pretty_assertions::assert_eq;
use serde::Deserialize;

#[derive(Deserialize)]
struct Saved {
    blocks: Vec<BrickRecord>,
    statistics: Statistics,
}

fn load_fixture() -> Saved {
    let input = include_str!("fixtures/saved_models.json");
    let mut models: Vec<Saved> = serde_json::from_str(input).unwrap();
    assert_eq!(models.len(), 1);
    models.remove(0)
}

// ─── Loading ────────────────────────────────────────────────────────────

#[test]
fn stored_statistics_match_recomputed() {
    let saved = load_fixture();
    let scene = Scene::from_records(saved.blocks);
    assert_eq!(scene.statistics(), saved.statistics);
}

#[test]
fn stored_colors_are_kept_verbatim() {
    let scene = Scene::from_records(load_fixture().blocks);
    let colors: Vec<&str> = scene.bricks().iter().map(|b| b.color.as_str()).collect();
    assert_eq!(
        colors,
        vec!["#10b981", "#eab308", "#10b981", "rgb(1, 2, 3)", "#EAB308"]
    );

    // Case differences are distinct colors in statistics.
    assert_eq!(scene.statistics().distinct_colors(), 4);
    assert_eq!(
        BrickColor::verbatim("rgb(1, 2, 3)").rgb(),
        Some([1, 2, 3])
    );
}

#[test]
fn unknown_designation_loads_with_fallback_extent() {
    let scene = Scene::from_records(load_fixture().blocks);
    let odd = &scene.bricks()[3];
    assert_eq!(odd.kind, BrickType::Other("3x3".into()));
    assert!(!odd.kind.is_known());
    assert_eq!(odd.extent(), Size::new(40.0, 40.0));
    assert_eq!(scene.statistics().count_of(&odd.kind), 1);
}

#[test]
fn extents_follow_size_factor() {
    let scene = Scene::from_records(load_fixture().blocks);
    let extents: Vec<Size> = scene.bricks().iter().map(|b| b.extent()).collect();
    assert_eq!(
        extents,
        vec![
            Size::new(80.0, 40.0),
            Size::new(20.0, 20.0),
            Size::new(120.0, 60.0),
            Size::new(40.0, 40.0),
            Size::new(20.0, 10.0),
        ]
    );
}

#[test]
fn records_roundtrip_through_scene() {
    let saved = load_fixture();
    let scene = Scene::from_records(saved.blocks.clone());
    assert_eq!(scene.records(), saved.blocks);
}

// ─── Mutation ───────────────────────────────────────────────────────────

#[test]
fn statistics_follow_add_and_remove() {
    let mut scene = Scene::from_records(load_fixture().blocks);
    let id = scene.add_brick(
        BrickType::OneByOne,
        BrickColor::verbatim("#eab308"),
        40,
        Point::new(300.0, 300.0),
    );
    let stats = scene.statistics();
    assert_eq!(stats.total_blocks, 6);
    assert_eq!(stats.count_of(&BrickType::OneByOne), 2);

    let removed = scene.remove_brick(id).unwrap();
    assert_eq!(removed.origin(), Point::new(300.0, 300.0));
    assert_eq!(scene.statistics(), load_fixture().statistics);
}

#[test]
fn removing_last_of_a_type_drops_its_key() {
    let mut scene = Scene::from_records(load_fixture().blocks);
    let id = scene.bricks()[1].id;
    scene.remove_brick(id);
    let stats = scene.statistics();
    assert_eq!(stats.count_of(&BrickType::OneByOne), 0);
    assert!(!stats.block_types.contains_key(&BrickType::OneByOne));
}

#[test]
fn color_counts_in_first_placed_order() {
    let scene = Scene::from_records(load_fixture().blocks);
    let counts: Vec<(String, usize)> = scene
        .color_counts()
        .into_iter()
        .map(|(c, n)| (c.as_str().to_string(), n))
        .collect();
    assert_eq!(
        counts,
        vec![
            ("#10b981".to_string(), 2),
            ("#eab308".to_string(), 1),
            ("rgb(1, 2, 3)".to_string(), 1),
            ("#EAB308".to_string(), 1),
        ]
    );
}

#[test]
fn clear_empties_statistics() {
    let mut scene = Scene::from_records(load_fixture().blocks);
    scene.clear();
    assert!(scene.is_empty());
    assert_eq!(scene.statistics(), Statistics::default());
}

// ─── Placement math ─────────────────────────────────────────────────────

#[test]
fn snapped_and_clamped_positions_stay_inside() {
    let area = Size::new(800.0, 600.0);
    for kind in BrickType::ALL {
        let extent = geometry::scaled_size(&kind, 40);
        for cursor in [(-50.0, -50.0), (0.0, 0.0), (799.0, 599.0), (1200.0, 900.0)] {
            let corner = Point::new(cursor.0 - extent.width / 2.0, cursor.1 - extent.height / 2.0);
            let at = geometry::clamp_to_area(geometry::snap(corner, 20, true), extent, area);
            assert!(at.x >= 0.0 && at.x + extent.width <= area.width, "{kind} {at:?}");
            assert!(at.y >= 0.0 && at.y + extent.height <= area.height, "{kind} {at:?}");
        }
    }
}
