//! Level loop behavior through the public API

use fish::sim::input::HeldKeys;
use fish::sim::level::time_label;
use fish::sim::{Key, Level, LevelConfig, LevelState, Screen, ScreenRequest, SpriteMetrics, World};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

const EPS: f32 = 1e-3;
const KEYS: [Key; 5] = [Key::Left, Key::Right, Key::Up, Key::Down, Key::Menu];

fn level() -> Level {
    Level::new(LevelConfig::default(), &SpriteMetrics::default())
}

/// A random subset of direction keys, never the menu key
fn random_keys(rng: &mut StdRng) -> HeldKeys {
    let held: Vec<Key> = KEYS[..4]
        .iter()
        .copied()
        .filter(|_| rng.random_bool(0.4))
        .collect();
    HeldKeys::of(&held)
}

#[test]
fn player_and_camera_stay_in_bounds_under_random_input() {
    let config = LevelConfig::default();
    let metrics = SpriteMetrics::default();
    let [player_w, player_h] = metrics.size(fish::sim::TextureKey::Player);
    let [world_w, world_h] = config.world_size;
    let [view_w, view_h] = config.view_size;

    for seed in 0..8 {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut level = Level::new(config.clone(), &metrics);

        for _ in 0..2_000 {
            let dt = rng.random_range(0.0..0.1);
            level.update(dt, &random_keys(&mut rng));

            let [x, y] = level.player().position;
            assert!((0.0..=world_w - player_w).contains(&x), "x = {x}");
            assert!((0.0..=world_h - player_h).contains(&y), "y = {y}");

            let [cx, cy] = level.camera().center;
            assert!(cx >= view_w / 2.0 - EPS && cx <= world_w - view_w / 2.0 + EPS);
            assert!(cy >= view_h / 2.0 - EPS && cy <= world_h - view_h / 2.0 + EPS);
        }
    }
}

#[test]
fn win_happens_once_and_only_on_overlap() {
    for seed in 0..8 {
        let mut rng = StdRng::seed_from_u64(100 + seed);
        let mut level = level();
        let mut transitions = 0;
        let mut frozen: Option<f32> = None;

        for _ in 0..3_000 {
            let before = level.state();
            level.update(rng.random_range(0.005..0.05), &random_keys(&mut rng));
            let after = level.state();

            if before == LevelState::Playing && after == LevelState::Won {
                transitions += 1;
                assert!(
                    level
                        .player()
                        .bounding_rect()
                        .overlaps(&level.target().bounding_rect()),
                    "won without overlap"
                );
                frozen = Some(level.elapsed());
            }
            assert!(!(before == LevelState::Won && after == LevelState::Playing));

            if let Some(elapsed) = frozen {
                assert_eq!(level.elapsed(), elapsed);
                assert_eq!(level.time_label(), time_label(elapsed));
            }
        }
        assert!(transitions <= 1);
    }
}

#[test]
fn moving_right_is_linear() {
    let mut level = level();
    for _ in 0..10 {
        level.update(0.1, &HeldKeys::of(&[Key::Right]));
    }
    let [x, y] = level.player().position;
    assert!((x - 320.0).abs() < EPS, "x = {x}");
    assert_eq!(y, 20.0);
    assert_eq!(level.state(), LevelState::Playing);
}

#[test]
fn left_wins_over_up() {
    let mut level = level();
    level.update(0.05, &HeldKeys::of(&[Key::Left, Key::Up]));
    let [x, y] = level.player().position;
    assert!((x - 5.0).abs() < EPS);
    assert_eq!(y, 20.0);
}

#[test]
fn timer_label_truncates() {
    let mut level = level();
    for _ in 0..79 {
        level.update(0.1, &HeldKeys::none());
    }
    assert!((level.elapsed() - 7.9).abs() < EPS);
    assert_eq!(level.time_label(), "Time: 7");
}

#[test]
fn overlap_on_consecutive_frames_starts_animations_once() {
    let config = LevelConfig {
        player_start: [360.0, 300.0],
        ..Default::default()
    };
    let mut level = Level::new(config, &SpriteMetrics::default());

    // Frame K: already overlapping
    level.update(0.5, &HeldKeys::none());
    assert!(level.state().is_won());
    let frozen = level.elapsed();
    let target_actions = level.target().action_count();
    let banner_actions = level.banner().action_count();
    assert_eq!(target_actions, 1);
    assert_eq!(banner_actions, 1);

    // Frame K+1: still overlapping
    level.update(0.016, &HeldKeys::none());
    assert_eq!(level.elapsed(), frozen);
    assert_eq!(level.target().action_count(), target_actions);
    assert_eq!(level.banner().action_count(), banner_actions);
}

#[test]
fn target_vanishes_and_banner_pulses_after_win() {
    let config = LevelConfig {
        player_start: [360.0, 300.0],
        ..Default::default()
    };
    let mut world = World::new(config, SpriteMetrics::default());
    world.tick(0.1, &HeldKeys::none());

    for _ in 0..180 {
        world.tick(1.0 / 60.0, &HeldKeys::none());
    }

    let level = world.level().expect("still on the level");
    let scene = world.scene();
    // Target is faded out and shrunk; the banner is on the UI layer
    assert_eq!(level.target().appearance.color[3], 0.0);
    assert_eq!(level.target().appearance.scale, [0.0, 0.0]);
    assert_eq!(level.target().action_count(), 0);
    assert_eq!(scene.ui.len(), 1);
    assert!(level.banner().action_count() == 1, "banner pulses forever");
}

#[test]
fn menu_key_navigates_and_start_returns_to_fresh_level() {
    let mut world = World::default();
    world.tick(2.0, &HeldKeys::of(&[Key::Up]));
    world.tick(0.1, &HeldKeys::of(&[Key::Menu]));
    assert_eq!(world.screen().name(), "menu");

    world.tick(0.1, &HeldKeys::of(&[Key::Start]));
    let level = world.level().expect("level restarted");
    assert_eq!(level.player().position, [20.0, 20.0]);
    assert_eq!(level.time_label(), "Time: 0");
}

#[test]
fn menu_key_is_ignored_while_moving() {
    let mut level = level();
    let request = level.update(0.1, &HeldKeys::of(&[Key::Down, Key::Menu]));
    assert_eq!(request, None);

    let request = level.update(0.1, &HeldKeys::of(&[Key::Menu]));
    assert_eq!(request, Some(ScreenRequest::Menu));
}
