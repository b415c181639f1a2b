use super::*;

use std::time::Duration;

use crate::common::geometry::MoveBox;
use crate::common::test_utils::run_system_once;
use crate::plugins::combatants::AiBrain;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::solver::step_direction;

fn ai() -> Controller {
    Controller::Ai(AiBrain { last_action: Duration::ZERO })
}

fn spawn(world: &mut World, controller: Controller, pos: Vec2, speed: f32, destination: Option<Vec2>) -> Entity {
    let mut motion = Motion::new(speed, MoveBox::new(0.0, 1000.0, 0.0, 1000.0));
    motion.destination = destination;

    let e = world
        .spawn((
            controller,
            LifeState::Alive,
            motion,
            ArenaPosition(pos),
            VisualSize(Vec2::new(50.0, 50.0)),
        ))
        .id();
    world.resource_mut::<Roster>().push(e);
    e
}

fn pos(world: &World, e: Entity) -> Vec2 {
    world.get::<ArenaPosition>(e).unwrap().0
}

fn world() -> World {
    let mut world = World::new();
    world.init_resource::<Roster>();
    world
}

#[test]
fn player_walks_to_destination_without_overshoot() {
    let mut world = world();
    let p = spawn(&mut world, Controller::Player, Vec2::new(100.0, 100.0), 30.0, Some(Vec2::new(200.0, 100.0)));

    let mut xs = Vec::new();
    for _ in 0..4 {
        run_system_once(&mut world, move_combatants);
        xs.push(pos(&world, p).x);
    }

    assert_eq!(xs, vec![130.0, 160.0, 190.0, 200.0]);
    assert_eq!(pos(&world, p).y, 100.0);
}

#[test]
fn idle_and_dying_combatants_stay_put() {
    let mut world = world();
    let idle = spawn(&mut world, Controller::Player, Vec2::new(100.0, 100.0), 5.0, None);
    let dying = spawn(&mut world, ai(), Vec2::new(500.0, 500.0), 5.0, Some(Vec2::ZERO));
    *world.get_mut::<LifeState>(dying).unwrap() = LifeState::Dying;

    run_system_once(&mut world, move_combatants);

    assert_eq!(pos(&world, idle), Vec2::new(100.0, 100.0));
    assert_eq!(pos(&world, dying), Vec2::new(500.0, 500.0));
}

#[test]
fn disabled_movement_is_respected() {
    let mut world = world();
    let e = spawn(&mut world, Controller::Player, Vec2::new(100.0, 100.0), 5.0, Some(Vec2::new(300.0, 300.0)));
    world.get_mut::<Motion>(e).unwrap().can_move = false;

    run_system_once(&mut world, move_combatants);

    assert_eq!(pos(&world, e), Vec2::new(100.0, 100.0));
}

#[test]
fn blocked_player_does_not_move_on_that_axis() {
    let mut world = world();
    let p = spawn(&mut world, Controller::Player, Vec2::new(100.0, 100.0), 5.0, Some(Vec2::new(400.0, 120.0)));
    // wall directly to the right
    spawn(&mut world, ai(), Vec2::new(150.0, 100.0), 0.0, None);

    run_system_once(&mut world, move_combatants);

    assert_eq!(pos(&world, p), Vec2::new(100.0, 105.0));
    assert!(!world.get::<Motion>(p).unwrap().reverse_x);
}

#[test]
fn blocked_enemy_flips_its_bias_instead_of_moving() {
    let mut world = world();
    let e = spawn(&mut world, ai(), Vec2::new(2.0, 100.0), 3.0, Some(Vec2::new(0.0, 100.0)));

    run_system_once(&mut world, move_combatants);
    assert_eq!(pos(&world, e).x, 2.0);
    assert!(world.get::<Motion>(e).unwrap().reverse_x);

    // reversed: moves away from the destination
    run_system_once(&mut world, move_combatants);
    assert_eq!(pos(&world, e).x, 5.0);
}

#[test]
fn later_entities_see_earlier_moves() {
    let mut world = world();
    // a moves right into the gap, b then wants to move left into the same gap
    let a = spawn(&mut world, Controller::Player, Vec2::new(100.0, 100.0), 5.0, Some(Vec2::new(400.0, 100.0)));
    let b = spawn(&mut world, Controller::Player, Vec2::new(158.0, 100.0), 5.0, Some(Vec2::new(0.0, 100.0)));

    run_system_once(&mut world, move_combatants);

    assert_eq!(pos(&world, a).x, 105.0);
    assert_eq!(pos(&world, b).x, 158.0);
}

#[test]
fn entities_missing_from_the_roster_are_not_moved() {
    let mut world = world();
    let e = spawn(&mut world, Controller::Player, Vec2::new(100.0, 100.0), 5.0, Some(Vec2::new(300.0, 100.0)));
    world.resource_mut::<Roster>().remove(e);

    run_system_once(&mut world, move_combatants);

    assert_eq!(pos(&world, e), Vec2::new(100.0, 100.0));
}

#[test]
fn steps_then_clamps_on_the_final_tick() {
    let mut x = 100.0;
    let mut seen = Vec::new();

    for _ in 0..4 {
        x = advance(x, 200.0, 30.0).unwrap();
        seen.push(x);
    }

    assert_eq!(seen, vec![130.0, 160.0, 190.0, 200.0]);
}

#[test]
fn moves_down_toward_a_smaller_target() {
    assert_eq!(advance(50.0, 0.0, 20.0).unwrap(), 30.0);
    assert_eq!(advance(10.0, 0.0, 20.0).unwrap(), 0.0);
}

#[test]
fn equal_positions_do_not_move() {
    assert_eq!(advance(42.5, 42.5, 7.0).unwrap(), 42.5);
}

#[test]
fn negative_speed_moves_away_from_target() {
    assert_eq!(advance(100.0, 200.0, -3.0).unwrap(), 97.0);
    assert_eq!(advance(300.0, 200.0, -3.0).unwrap(), 303.0);
}

#[test]
fn nan_input_is_an_error() {
    assert!(matches!(
        advance(f32::NAN, 10.0, 1.0),
        Err(MovementError::NonComparable { .. })
    ));
    assert!(advance(10.0, f32::NAN, 1.0).is_err());
}

#[test]
fn never_overshoots_for_positive_speed() {
    let mut rng = StdRng::seed_from_u64(0x5eed);

    for _ in 0..10_000 {
        let current: f32 = rng.gen_range(-2000.0..2000.0);
        let target: f32 = rng.gen_range(-2000.0..2000.0);
        let speed: f32 = rng.gen_range(0.01..500.0);

        let next = advance(current, target, speed).unwrap();

        if current <= target {
            assert!(next <= target, "{current} -> {next} passed {target}");
            assert!(next >= current);
        } else {
            assert!(next >= target, "{current} -> {next} passed {target}");
            assert!(next <= current);
        }
        assert_eq!(advance(target, target, speed).unwrap(), target);
    }
}

#[test]
fn step_direction_follows_speed_sign() {
    assert_eq!(step_direction(0.0, 10.0, 2.0), 1.0);
    assert_eq!(step_direction(0.0, 10.0, -2.0), -1.0);
    assert_eq!(step_direction(10.0, 0.0, 2.0), -1.0);
    assert_eq!(step_direction(5.0, 5.0, 2.0), 0.0);
}

fn arena() -> MoveBox {
    MoveBox::new(0.0, 1000.0, 0.0, 1000.0)
}

fn b(x: f32, y: f32, w: f32, h: f32) -> Bounds {
    Bounds::new(Vec2::new(x, y), Vec2::new(w, h))
}

#[test]
fn free_space_is_fully_open() {
    let open = resolve(&arena(), &0, b(400.0, 400.0, 50.0, 50.0), &[], 5.0);
    assert_eq!(open, OpenDirections::default());
}

#[test]
fn abutting_peer_on_the_right_blocks_only_right() {
    let source = b(100.0, 100.0, 50.0, 50.0);
    let peers = [(0, source), (1, b(150.0, 100.0, 50.0, 50.0))];

    let open = resolve(&arena(), &0, source, &peers, 5.0);

    assert!(!open.right);
    assert!(open.left);
    assert!(open.up);
    assert!(open.down);
}

#[test]
fn abutting_peer_on_the_left_blocks_only_left() {
    let source = b(100.0, 100.0, 50.0, 50.0);
    let peers = [(1, b(50.0, 120.0, 50.0, 50.0))];

    let open = resolve(&arena(), &0, source, &peers, 5.0);

    assert!(!open.left);
    assert!(open.right);
}

#[test]
fn abutting_peer_below_blocks_only_down() {
    let source = b(100.0, 100.0, 50.0, 50.0);
    let peers = [(1, b(110.0, 150.0, 50.0, 50.0))];

    let open = resolve(&arena(), &0, source, &peers, 5.0);

    assert!(!open.down);
    assert!(open.up);
    assert!(open.left);
    assert!(open.right);
}

#[test]
fn peer_beyond_one_step_does_not_block() {
    let source = b(100.0, 100.0, 50.0, 50.0);
    let peers = [(1, b(160.0, 100.0, 50.0, 50.0))];

    assert!(resolve(&arena(), &0, source, &peers, 5.0).right);
    assert!(!resolve(&arena(), &0, source, &peers, 15.0).right);
}

#[test]
fn unaligned_peer_is_ignored() {
    let source = b(100.0, 100.0, 50.0, 50.0);
    // diagonal: touches neither span
    let peers = [(1, b(150.0, 150.0, 50.0, 50.0))];

    assert_eq!(resolve(&arena(), &0, source, &peers, 5.0), OpenDirections::default());
}

#[test]
fn source_never_blocks_itself() {
    let source = b(100.0, 100.0, 50.0, 50.0);
    let peers = [(7, source)];

    assert_eq!(resolve(&arena(), &7, source, &peers, 5.0), OpenDirections::default());
}

#[test]
fn arena_edges_block_steps_that_would_cross_them() {
    let arena = MoveBox::new(500.0, 1000.0, 0.0, 600.0);

    let open = resolve(&arena, &0, b(502.0, 2.0, 50.0, 50.0), &[], 5.0);
    assert!(!open.left);
    assert!(!open.up);
    assert!(open.right);
    assert!(open.down);

    let open = resolve(&arena, &0, b(946.0, 548.0, 50.0, 50.0), &[], 5.0);
    assert!(!open.right);
    assert!(!open.down);
}

#[test]
fn allows_maps_sign_to_direction() {
    let open = OpenDirections { up: false, right: true, down: true, left: false };

    assert!(open.allows_x(1.0));
    assert!(!open.allows_x(-1.0));
    assert!(!open.allows_y(-1.0));
    assert!(open.allows_y(1.0));
    assert!(open.allows_x(0.0));
}
