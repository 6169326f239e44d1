//! End-to-end behavior of the goat tree against small hand-built worlds.

#![allow(clippy::unwrap_used)]

use std::sync::Arc;

use animalia_agents::{BehaviorConfig, Entity, Goat, goat_tree};
use animalia_bt::Status;
use animalia_types::{EntityId, EntityState, ObstacleType, StaticObstacle, Stats, Vector2D, WorldId};
use animalia_world::World;

fn world_with(resources: &[(ObstacleType, Vector2D)]) -> World {
    let mut world = World::new(WorldId::new(1), 20, 20, 1234).unwrap();
    for (kind, position) in resources {
        world.add_obstacle(StaticObstacle::new(*kind, *position));
    }
    world
}

fn goat(position: Vector2D, stats: Stats) -> Entity {
    let tree = Arc::new(goat_tree(BehaviorConfig::default()).unwrap());
    Entity::new(Goat::new(EntityId::new(0), position, stats), tree)
}

fn step(world: &mut World, entity: &mut Entity) -> Status {
    world.advance_clock().unwrap();
    entity.tick(world)
}

#[test]
fn content_goat_starts_roaming_in_one_tick() {
    let mut world = world_with(&[]);
    let mut entity = goat(Vector2D::new(10.0, 10.0), Stats::new(10, 10, 10));

    assert_eq!(step(&mut world, &mut entity), Status::Running);
    assert_eq!(entity.state(), EntityState::Roaming);
    assert!(entity.goat().target_pos.is_some());
}

#[test]
fn thirst_at_trigger_heads_for_water() {
    let water = Vector2D::new(5.0, 5.0);
    let mut world = world_with(&[(ObstacleType::WaterSource, water)]);
    let mut entity = goat(Vector2D::ZERO, Stats::new(10, 80, 10));

    assert_eq!(step(&mut world, &mut entity), Status::Running);
    assert_eq!(entity.state(), EntityState::FindWater);
    assert_eq!(entity.goat().target_pos, Some(water));
    assert_eq!(entity.goat().last_state_change_at, 1);
}

#[test]
fn thirst_below_trigger_keeps_roaming() {
    let water = Vector2D::new(5.0, 5.0);
    let mut world = world_with(&[(ObstacleType::WaterSource, water)]);
    let mut entity = goat(Vector2D::ZERO, Stats::new(10, 79, 10));

    step(&mut world, &mut entity);
    assert_eq!(entity.state(), EntityState::Roaming);
}

#[test]
fn missing_water_falls_through_to_hunger_in_same_tick() {
    let food = Vector2D::new(2.0, 7.0);
    let mut world = world_with(&[(ObstacleType::FoodSource, food)]);
    let mut entity = goat(Vector2D::ZERO, Stats::new(85, 90, 10));

    assert_eq!(step(&mut world, &mut entity), Status::Running);
    assert_eq!(entity.state(), EntityState::FindFood);
    assert_eq!(entity.goat().target_pos, Some(food));
}

#[test]
fn eating_on_the_spot_stops_once_satisfied() {
    let food = Vector2D::new(4.0, 4.0);
    let mut world = world_with(&[(ObstacleType::FoodSource, food)]);
    let mut entity = goat(food, Stats::new(80, 10, 10));

    let mut statuses = Vec::new();
    for _ in 0..28 {
        statuses.push(step(&mut world, &mut entity));
    }

    assert!(statuses.iter().take(27).all(|s| *s == Status::Running));
    assert_eq!(statuses.last(), Some(&Status::Success));
    assert_eq!(entity.goat().stats.hunger, 24);
    assert_eq!(entity.goat().target_pos, None);
    // Standing still costs nothing.
    assert_eq!(entity.goat().stats.thirst, 10);
}

#[test]
fn walk_to_water_then_drink_until_satisfied() {
    let water = Vector2D::new(3.0, 0.0);
    let mut world = world_with(&[(ObstacleType::WaterSource, water)]);
    let mut entity = goat(Vector2D::ZERO, Stats::new(10, 80, 10));

    for expected_x in [1.0, 2.0, 3.0] {
        assert_eq!(step(&mut world, &mut entity), Status::Running);
        assert!(entity.goat().position.distance(Vector2D::new(expected_x, 0.0)) < 1e-9);
    }
    // Three moving ticks: thirst +2 each, hunger and tiredness +1 each.
    assert_eq!(entity.goat().stats, Stats::new(13, 86, 13));

    let mut drinking_ticks = 0;
    while step(&mut world, &mut entity) == Status::Running {
        drinking_ticks += 1;
        assert!(drinking_ticks < 100, "goat never finished drinking");
    }
    // 86 -> 20 in steps of 2: 33 drinking ticks, the last one succeeding.
    assert_eq!(drinking_ticks, 32);
    assert_eq!(entity.goat().stats.thirst, 20);
    assert_eq!(entity.goat().target_pos, None);
    assert_eq!(entity.state(), EntityState::FindWater);

    step(&mut world, &mut entity);
    assert_eq!(entity.state(), EntityState::Roaming);
}

#[test]
fn urgent_needs_are_served_one_branch_at_a_time() {
    let water = Vector2D::new(6.0, 6.0);
    let food = Vector2D::new(12.0, 6.0);
    let mut world = world_with(&[
        (ObstacleType::WaterSource, water),
        (ObstacleType::FoodSource, food),
    ]);
    let mut entity = goat(water, Stats::new(90, 90, 10));

    step(&mut world, &mut entity);
    assert_eq!(entity.state(), EntityState::FindWater);

    while entity.goat().target_pos.is_some() {
        step(&mut world, &mut entity);
        assert_ne!(entity.state(), EntityState::FindFood);
    }
    assert_eq!(entity.goat().stats.thirst, 20);

    step(&mut world, &mut entity);
    assert_eq!(entity.state(), EntityState::FindFood);
    assert_eq!(entity.goat().target_pos, Some(food));
}

#[test]
fn tired_goat_rests_on_a_walkable_cell() {
    let mut world = world_with(&[]);
    let mut entity = goat(Vector2D::new(3.0, 3.0), Stats::new(10, 10, 80));

    step(&mut world, &mut entity);
    assert_eq!(entity.state(), EntityState::Resting);
    let target = entity.goat().target_pos.unwrap();
    let (x, y) = world.grid().cell_of(target).unwrap();
    assert!(world.grid().is_walkable(x, y));
}

#[test]
fn running_roam_is_not_interrupted_by_new_needs() {
    let water = Vector2D::new(1.0, 1.0);
    let mut world = world_with(&[(ObstacleType::WaterSource, water)]);
    let mut entity = goat(Vector2D::ZERO, Stats::new(10, 10, 10));
    entity.goat_mut().target_pos = Some(Vector2D::new(19.0, 0.0));

    step(&mut world, &mut entity);
    assert_eq!(entity.state(), EntityState::Roaming);

    entity.goat_mut().stats = Stats::new(10, 95, 10);
    step(&mut world, &mut entity);
    assert_eq!(entity.state(), EntityState::Roaming);
    assert_eq!(entity.goat().target_pos, Some(Vector2D::new(19.0, 0.0)));
}

#[test]
fn forced_state_is_tolerated_and_overwritten_by_next_pick() {
    let mut world = world_with(&[]);
    let mut entity = goat(Vector2D::new(5.0, 5.0), Stats::new(10, 10, 10));

    assert!(entity.force_state(EntityState::Resting, 0));
    assert_eq!(entity.state(), EntityState::Resting);

    step(&mut world, &mut entity);
    assert_eq!(entity.state(), EntityState::Roaming);
}
