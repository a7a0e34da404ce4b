//! Bevy ECS Integration Tests
//!
//! These tests verify that bevy_ecs behaves as the showcase expects. They
//! serve as a compatibility layer to detect breaking changes when upgrading
//! bevy_ecs versions.
//!
//! # Test Categories
//!
//! 1. **Generic components** - one component type per tweened shape
//! 2. **Events & Observers** - `Observer::new` entities, `commands.trigger`
//! 3. **Schedules** - chained ordering, deferred commands
//! 4. **Read-only world access** - `World::get` and `get_resource` from `&World`
//!
//! # Usage
//!
//! Run these tests after upgrading bevy_ecs to detect API changes:
//!
//! ```sh
//! cargo test --test bevy_ecs_integration
//! ```

use bevy_ecs::prelude::*;
use bevy_ecs::system::SystemState;
use std::sync::{Arc, Mutex};

use jsge_showcase::components::aabb::Aabb;
use jsge_showcase::components::frameanimation::FrameAnimation;
use jsge_showcase::components::shapes::{Circle, Polygon};
use jsge_showcase::components::tween::{Easing, TweenAnimation, TweenProperties, TweenProperty};
use jsge_showcase::events::collision::OverlapEvent;
use jsge_showcase::events::tween::TweenFinishedEvent;

#[derive(Resource, Debug, Default)]
struct Log(Vec<&'static str>);

fn radius_tween() -> TweenAnimation<Circle> {
    TweenAnimation::easing(
        TweenProperties::new()
            .with_start(TweenProperty::Radius, 10.0)
            .with_end(TweenProperty::Radius, 40.0),
        Circle::new(0.0, 0.0, 0.0),
        &[TweenProperty::Radius],
        Easing::Linear,
        2.0,
    )
    .unwrap()
}

// =============================================================================
// CATEGORY 1: Generic components
// =============================================================================

#[test]
fn generic_components_are_distinct_types() {
    let mut world = World::new();
    world.spawn(radius_tween());
    world.spawn(FrameAnimation::new(0.1, vec!["a", "b"]));
    world.spawn(FrameAnimation::new(0.1, vec![1u8, 2]));

    assert_eq!(world.query::<&TweenAnimation<Circle>>().iter(&world).count(), 1);
    assert_eq!(world.query::<&TweenAnimation<Polygon>>().iter(&world).count(), 0);
    assert_eq!(
        world
            .query::<&FrameAnimation<&'static str>>()
            .iter(&world)
            .count(),
        1
    );
    assert_eq!(world.query::<&FrameAnimation<u8>>().iter(&world).count(), 1);
}

#[test]
fn spawn_batch_of_tuples() {
    let mut world = World::new();
    let boxes = (0..10).map(|i| (Aabb::from_rect(i as f32, 0.0, 1.0, 1.0),));
    let ids: Vec<Entity> = world.spawn_batch(boxes).collect();
    assert_eq!(ids.len(), 10);
    assert_eq!(world.get::<Aabb>(ids[3]).unwrap().x1, 3.0);
}

// =============================================================================
// CATEGORY 2: Events & Observers
// =============================================================================

#[test]
fn observer_spawned_as_entity() {
    let mut world = World::new();

    let received = Arc::new(Mutex::new(None));
    let received_clone = received.clone();

    world.spawn(Observer::new(move |trigger: On<TweenFinishedEvent>| {
        *received_clone.lock().unwrap() = Some(trigger.event().entity);
    }));
    world.flush();

    let entity = world.spawn_empty().id();
    world.trigger(TweenFinishedEvent { entity });

    assert_eq!(*received.lock().unwrap(), Some(entity));
}

#[test]
fn observer_with_resource_param() {
    let mut world = World::new();
    world.init_resource::<Log>();
    world.add_observer(|_trigger: On<OverlapEvent>, mut log: ResMut<Log>| {
        log.0.push("overlap");
    });
    world.flush();

    let a = world.spawn_empty().id();
    let b = world.spawn_empty().id();
    let area = Aabb::from_rect(0.0, 0.0, 1.0, 1.0);
    world.trigger(OverlapEvent { a, b, area });
    world.trigger(OverlapEvent { a: b, b: a, area });

    assert_eq!(world.resource::<Log>().0, vec!["overlap", "overlap"]);
}

#[test]
fn commands_trigger_event() {
    let mut world = World::new();

    let count = Arc::new(Mutex::new(0));
    let count_clone = count.clone();

    world.add_observer(move |_trigger: On<TweenFinishedEvent>| {
        *count_clone.lock().unwrap() += 1;
    });
    world.flush();

    let entity = world.spawn_empty().id();
    let mut state = SystemState::<Commands>::new(&mut world);
    let mut commands = state.get_mut(&mut world);
    commands.trigger(TweenFinishedEvent { entity });
    assert_eq!(*count.lock().unwrap(), 0);
    state.apply(&mut world);

    assert_eq!(*count.lock().unwrap(), 1);
}

// =============================================================================
// CATEGORY 3: Schedules
// =============================================================================

fn first(mut log: ResMut<Log>) {
    log.0.push("first");
}

fn second(mut log: ResMut<Log>) {
    log.0.push("second");
}

fn third(mut log: ResMut<Log>) {
    log.0.push("third");
}

#[test]
fn schedule_system_ordering_chain() {
    let mut world = World::new();
    world.init_resource::<Log>();

    let mut schedule = Schedule::default();
    schedule.add_systems((first, second, third).chain());
    schedule.run(&mut world);
    schedule.run(&mut world);

    assert_eq!(
        world.resource::<Log>().0,
        vec!["first", "second", "third", "first", "second", "third"]
    );
}

fn trigger_from_system(query: Query<Entity, With<Aabb>>, mut commands: Commands) {
    for entity in query.iter() {
        commands.trigger(TweenFinishedEvent { entity });
    }
}

#[test]
fn schedule_applies_triggered_commands() {
    let mut world = World::new();
    let seen = Arc::new(Mutex::new(Vec::new()));
    let seen_clone = seen.clone();
    world.add_observer(move |trigger: On<TweenFinishedEvent>| {
        seen_clone.lock().unwrap().push(trigger.event().entity);
    });
    let entity = world.spawn(Aabb::default()).id();

    let mut schedule = Schedule::default();
    schedule.add_systems(trigger_from_system);
    schedule.run(&mut world);

    assert_eq!(*seen.lock().unwrap(), vec![entity]);
}

// =============================================================================
// CATEGORY 4: Read-only world access
// =============================================================================

fn describe(world: &World, entity: Entity) -> Option<f32> {
    world
        .get::<TweenAnimation<Circle>>(entity)
        .map(|t| t.component().radius)
}

#[test]
fn read_components_through_shared_world() {
    let mut world = World::new();
    world.init_resource::<Log>();
    let entity = world.spawn(radius_tween()).id();

    world
        .get_mut::<TweenAnimation<Circle>>(entity)
        .unwrap()
        .update(1.0);

    let shared: &World = &world;
    assert_eq!(describe(shared, entity), Some(25.0));
    assert!(shared.get_resource::<Log>().is_some());
    assert!(shared.get::<Aabb>(entity).is_none());
}
