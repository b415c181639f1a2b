use super::*;

use std::time::Duration;

use bevy::ecs::message::Messages;

use crate::common::geometry::{ArenaPosition, VisualSize};
use crate::common::layers::Side;
use crate::common::test_utils::run_system_once;
use crate::common::tunables::Tunables;
use crate::plugins::catalog::Catalog;
use crate::plugins::combatants::{AiBrain, CharacterId, Controller, LifeState};

use super::sweep::{advance_sprites, sweep_marked};
use super::trigger::trigger_actions;

fn world() -> World {
    let mut world = World::new();
    world.insert_resource(Catalog::default());
    world.insert_resource(Tunables::default());
    world.init_resource::<ActionSequence>();
    world.init_resource::<Messages<FireAction>>();
    world.init_resource::<Messages<PlaySound>>();
    world.insert_resource(Time::<Fixed>::default());
    world
}

fn set_elapsed(world: &mut World, ms: u64) {
    let mut t = Time::<Fixed>::default();
    t.advance_by(Duration::from_millis(ms));
    world.insert_resource(t);
}

fn spawn_shooter(world: &mut World, character: &str, controller: Controller) -> Entity {
    world
        .spawn((
            CharacterId(character.to_string()),
            controller,
            LifeState::Alive,
            ArenaPosition(Vec2::new(100.0, 200.0)),
            ActionCooldowns::default(),
        ))
        .id()
}

fn fire(world: &mut World, shooter: Entity, key: &str) {
    world.write_message(FireAction { shooter, key: key.to_string() });
    run_system_once(world, trigger_actions);
}

fn sprites(world: &mut World) -> Vec<ActionSprite> {
    let mut q = world.query::<&ActionSprite>();
    q.iter(world).cloned().collect()
}

fn spawn_sprite(world: &mut World, pos: Vec2, velocity: Vec2, lifetime_ms: u64) -> Entity {
    let owner = world.spawn_empty().id();
    world
        .spawn((
            ActionSprite {
                id: 1,
                key: "fire".to_string(),
                owner,
                side: Side::Player,
                damage: 10.0,
                velocity,
                lifetime: Duration::from_millis(lifetime_ms),
                spawned_at: Duration::ZERO,
                mark_delete: false,
                trigger_events: true,
            },
            ArenaPosition(pos),
            VisualSize(Vec2::new(24.0, 6.0)),
        ))
        .id()
}

#[test]
fn cooldown_skips_triggers_inside_the_timeout() {
    let mut world = world();
    let shooter = spawn_shooter(&mut world, "drone", Controller::Ai(AiBrain { last_action: Duration::ZERO }));

    // drone "fire" has a 750 ms trigger timeout
    set_elapsed(&mut world, 0);
    fire(&mut world, shooter, "fire");
    assert_eq!(sprites(&mut world).len(), 1);

    set_elapsed(&mut world, 500);
    fire(&mut world, shooter, "fire");
    assert_eq!(sprites(&mut world).len(), 1);

    set_elapsed(&mut world, 800);
    fire(&mut world, shooter, "fire");
    assert_eq!(sprites(&mut world).len(), 2);
}

#[test]
fn cooldowns_are_tracked_per_key() {
    let mut cooldowns = ActionCooldowns::default();
    let timeout = Duration::from_millis(750);

    assert!(cooldowns.try_begin("fire", Duration::ZERO, timeout));
    assert!(cooldowns.try_begin("missile", Duration::from_millis(100), timeout));
    assert!(!cooldowns.try_begin("fire", Duration::from_millis(749), timeout));
    assert!(cooldowns.try_begin("fire", Duration::from_millis(750), timeout));
    assert_eq!(cooldowns.last_trigger("fire"), Some(Duration::from_millis(750)));
}

#[test]
fn fired_sprite_copies_template_values() {
    let mut world = world();
    let shooter = spawn_shooter(&mut world, "drone", Controller::Ai(AiBrain { last_action: Duration::ZERO }));

    fire(&mut world, shooter, "missile");

    let mut q = world.query::<(&ActionSprite, &ArenaPosition, &VisualSize)>();
    let (sprite, pos, size) = q.single(&world).unwrap();

    assert_eq!(sprite.owner, shooter);
    assert_eq!(sprite.side, Side::Enemy);
    assert_eq!(sprite.damage, 25.0);
    assert_eq!(sprite.velocity, Vec2::new(-7.0, 0.0));
    assert_eq!(sprite.lifetime, Duration::from_millis(6000));
    assert!(sprite.trigger_events);
    assert!(!sprite.mark_delete);
    // shooter at (100, 200) + offset (-32, 26)
    assert_eq!(pos.0, Vec2::new(68.0, 226.0));
    // missile visual 32x12 scaled by 1.25
    assert_eq!(size.0, Vec2::new(40.0, 15.0));
}

#[test]
fn firing_requests_the_visual_sound() {
    let mut world = world();
    let shooter = spawn_shooter(&mut world, "fighter", Controller::Player);

    fire(&mut world, shooter, "fire");

    let played: Vec<PlaySound> = world.resource_mut::<Messages<PlaySound>>().drain().collect();
    assert_eq!(played, vec![PlaySound { sound_id: "laser_shot".to_string(), volume: 0.4 }]);
}

#[test]
fn unknown_sound_is_reported_but_still_fires() {
    let mut world = world();
    world.resource_mut::<Catalog>().sounds.clear();
    let shooter = spawn_shooter(&mut world, "fighter", Controller::Player);

    fire(&mut world, shooter, "fire");

    assert_eq!(sprites(&mut world).len(), 1);
    assert!(world.resource_mut::<Messages<PlaySound>>().drain().next().is_none());
}

#[test]
fn unknown_action_is_dropped_without_state_change() {
    let mut world = world();
    let shooter = spawn_shooter(&mut world, "fighter", Controller::Player);

    fire(&mut world, shooter, "missile");

    assert!(sprites(&mut world).is_empty());
    assert_eq!(world.get::<ActionCooldowns>(shooter).unwrap().last_trigger("missile"), None);
}

#[test]
fn plan_reports_each_missing_reference() {
    let mut catalog = Catalog::default();

    assert!(matches!(
        plan_trigger(&catalog, "mothership", "fire"),
        Err(ActionError::UnknownCharacter(_))
    ));
    assert!(matches!(
        plan_trigger(&catalog, "fighter", "missile"),
        Err(ActionError::UnknownAction { .. })
    ));

    catalog.visuals.remove("laser");
    assert!(matches!(
        plan_trigger(&catalog, "fighter", "fire"),
        Err(ActionError::MissingVisual { .. })
    ));
}

#[test]
fn dying_shooters_do_not_fire() {
    let mut world = world();
    let shooter = spawn_shooter(&mut world, "fighter", Controller::Player);
    *world.get_mut::<LifeState>(shooter).unwrap() = LifeState::Dying;

    fire(&mut world, shooter, "fire");

    assert!(sprites(&mut world).is_empty());
}

#[test]
fn sprite_ids_are_unique() {
    let mut world = world();
    let a = spawn_shooter(&mut world, "fighter", Controller::Player);
    let b = spawn_shooter(&mut world, "fighter", Controller::Player);

    fire(&mut world, a, "fire");
    fire(&mut world, b, "fire");

    let ids: Vec<u64> = sprites(&mut world).iter().map(|s| s.id).collect();
    assert_eq!(ids.len(), 2);
    assert_ne!(ids[0], ids[1]);
}

#[test]
fn sprites_travel_by_velocity() {
    let mut world = world();
    let e = spawn_sprite(&mut world, Vec2::new(100.0, 100.0), Vec2::new(14.0, -2.0), 0);

    run_system_once(&mut world, advance_sprites);

    assert_eq!(world.get::<ArenaPosition>(e).unwrap().0, Vec2::new(114.0, 98.0));
    assert!(!world.get::<ActionSprite>(e).unwrap().mark_delete);
}

#[test]
fn sprites_leaving_the_field_are_marked_in_both_directions() {
    let mut world = world();
    let right = spawn_sprite(&mut world, Vec2::new(1910.0, 100.0), Vec2::new(14.0, 0.0), 0);
    let left = spawn_sprite(&mut world, Vec2::new(-20.0, 100.0), Vec2::new(-10.0, 0.0), 0);
    let inside = spawn_sprite(&mut world, Vec2::new(900.0, 100.0), Vec2::new(-10.0, 0.0), 0);

    run_system_once(&mut world, advance_sprites);

    assert!(world.get::<ActionSprite>(right).unwrap().mark_delete);
    assert!(world.get::<ActionSprite>(left).unwrap().mark_delete);
    assert!(!world.get::<ActionSprite>(inside).unwrap().mark_delete);
}

#[test]
fn lifetime_expiry_marks_sprites() {
    let mut world = world();
    let short = spawn_sprite(&mut world, Vec2::new(500.0, 100.0), Vec2::ZERO, 1000);
    let unlimited = spawn_sprite(&mut world, Vec2::new(500.0, 300.0), Vec2::ZERO, 0);

    set_elapsed(&mut world, 999);
    run_system_once(&mut world, advance_sprites);
    assert!(!world.get::<ActionSprite>(short).unwrap().mark_delete);

    set_elapsed(&mut world, 1000);
    run_system_once(&mut world, advance_sprites);
    assert!(world.get::<ActionSprite>(short).unwrap().mark_delete);
    assert!(!world.get::<ActionSprite>(unlimited).unwrap().mark_delete);
}

#[test]
fn sweep_despawns_only_marked_sprites() {
    let mut world = world();
    let marked = spawn_sprite(&mut world, Vec2::ZERO, Vec2::ZERO, 0);
    let kept = spawn_sprite(&mut world, Vec2::ZERO, Vec2::ZERO, 0);
    world.get_mut::<ActionSprite>(marked).unwrap().mark_delete = true;

    run_system_once(&mut world, sweep_marked);

    assert!(world.get_entity(marked).is_err());
    assert!(world.get_entity(kept).is_ok());
}
