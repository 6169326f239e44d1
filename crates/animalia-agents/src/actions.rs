//! Leaf bodies of the goat tree.
//!
//! Each function here is one `Action` leaf. The tree builder wraps them in
//! closures that capture the relevant slice of [`BehaviorConfig`]; keeping
//! the bodies as plain functions lets tests drive a single leaf directly.

use animalia_bt::Status;
use animalia_types::{EntityState, Vector2D, Vital};
use animalia_world::World;
use tracing::debug;

use crate::config::{BehaviorConfig, NeedThresholds};
use crate::goat::Goat;

/// Point the goat at `destination` and relabel it, or fail when there is
/// nowhere to go.
pub fn set_destination(
    goat: &mut Goat,
    destination: Option<Vector2D>,
    state: EntityState,
    tick: u64,
) -> Status {
    let Some(target) = destination else {
        debug!(entity = %goat.id, %state, tick, "no destination available");
        return Status::Failure;
    };
    goat.target_pos = Some(target);
    goat.set_state(state, tick);
    Status::Success
}

/// Walk toward the target, then consume there until the vital is satisfied.
///
/// While walking: one step, the walk cost, `Running`. At the target: the
/// vital drops by `consume_per_tick`; once it is at or below
/// `thresholds.satisfied` the target is cleared and the leaf succeeds.
pub fn walk_then_consume(
    goat: &mut Goat,
    vital: Vital,
    thresholds: NeedThresholds,
    config: &BehaviorConfig,
) -> Status {
    if !goat.has_arrived(config.arrival_radius) {
        goat.step_toward_target(config.speed, config.arrival_radius);
        goat.pay_walk_cost(config.walk_cost);
        return Status::Running;
    }

    let relief = i32::from(config.consume_per_tick).saturating_neg();
    let level = goat.stats.adjust(vital, relief);
    if level <= thresholds.satisfied {
        goat.target_pos = None;
        debug!(entity = %goat.id, %vital, level, "need satisfied");
        return Status::Success;
    }
    Status::Running
}

/// Pick a fresh roaming target when there is none or the old one is
/// reached, and label the goat as roaming.
pub fn pick_roam_target(goat: &mut Goat, world: &mut World, config: &BehaviorConfig) -> Status {
    if goat.target_pos.is_none() || goat.has_arrived(config.arrival_radius) {
        match world.random_walkable_position() {
            Some(target) => goat.target_pos = Some(target),
            None => {
                debug!(entity = %goat.id, "no walkable cell to roam to");
                return Status::Failure;
            }
        }
    }
    goat.set_state(EntityState::Roaming, world.tick());
    Status::Success
}

/// Walk toward the roaming target, then idle there until the tick is a
/// multiple of the idle period.
pub fn roam(goat: &mut Goat, world: &World, config: &BehaviorConfig) -> Status {
    if !goat.has_arrived(config.arrival_radius) {
        goat.step_toward_target(config.speed, config.arrival_radius);
        goat.pay_walk_cost(config.walk_cost);
        return Status::Running;
    }
    if world.clock().is_multiple_of(config.roam_idle_period) {
        Status::Success
    } else {
        Status::Running
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use animalia_types::{EntityId, Stats, WorldId};

    use super::*;

    fn goat_at(position: Vector2D, stats: Stats) -> Goat {
        Goat::new(EntityId::new(1), position, stats)
    }

    #[test]
    fn missing_destination_fails_without_touching_goat() {
        let mut goat = goat_at(Vector2D::ZERO, Stats::new(10, 90, 10));
        let status = set_destination(&mut goat, None, EntityState::FindWater, 3);
        assert_eq!(status, Status::Failure);
        assert_eq!(goat.state, EntityState::Roaming);
        assert_eq!(goat.target_pos, None);
    }

    #[test]
    fn destination_sets_target_and_label() {
        let mut goat = goat_at(Vector2D::ZERO, Stats::new(10, 90, 10));
        let water = Vector2D::new(4.0, 4.0);
        let status = set_destination(&mut goat, Some(water), EntityState::FindWater, 3);
        assert_eq!(status, Status::Success);
        assert_eq!(goat.target_pos, Some(water));
        assert_eq!(goat.state, EntityState::FindWater);
        assert_eq!(goat.last_state_change_at, 3);
    }

    #[test]
    fn consuming_at_threshold_succeeds_and_clears_target() {
        let food = Vector2D::new(3.0, 3.0);
        let mut goat = goat_at(food, Stats::new(25, 10, 10));
        goat.target_pos = Some(food);
        let config = BehaviorConfig::default();

        let status = walk_then_consume(&mut goat, Vital::Hunger, config.hunger, &config);
        assert_eq!(status, Status::Success);
        assert_eq!(goat.stats.hunger, 23);
        assert_eq!(goat.target_pos, None);
    }

    #[test]
    fn consuming_above_threshold_keeps_running() {
        let water = Vector2D::new(1.0, 1.0);
        let mut goat = goat_at(water, Stats::new(10, 30, 10));
        goat.target_pos = Some(water);
        let config = BehaviorConfig::default();

        let status = walk_then_consume(&mut goat, Vital::Thirst, config.thirst, &config);
        assert_eq!(status, Status::Running);
        assert_eq!(goat.stats.thirst, 28);
        assert_eq!(goat.target_pos, Some(water));
    }

    #[test]
    fn walking_pays_walk_cost_and_runs() {
        let mut goat = goat_at(Vector2D::ZERO, Stats::new(10, 10, 10));
        goat.target_pos = Some(Vector2D::new(5.0, 0.0));
        let config = BehaviorConfig::default();

        let status = walk_then_consume(&mut goat, Vital::Thirst, config.thirst, &config);
        assert_eq!(status, Status::Running);
        assert_eq!(goat.stats, Stats::new(11, 12, 11));
        assert!(goat.position.same_as(Vector2D::new(1.0, 0.0)));
    }

    #[test]
    fn roam_target_is_kept_until_reached() {
        let mut world = World::new(WorldId::new(1), 20, 20, 5).unwrap();
        let config = BehaviorConfig::default();
        let mut goat = goat_at(Vector2D::ZERO, Stats::default());

        assert_eq!(pick_roam_target(&mut goat, &mut world, &config), Status::Success);
        let first = goat.target_pos.unwrap();
        assert_eq!(pick_roam_target(&mut goat, &mut world, &config), Status::Success);
        if !first.same_as(goat.position) {
            assert_eq!(goat.target_pos, Some(first));
        }
        assert_eq!(goat.state, EntityState::Roaming);
    }

    #[test]
    fn idle_roamer_finishes_only_on_period_ticks() {
        let mut world = World::new(WorldId::new(1), 5, 5, 5).unwrap();
        let config = BehaviorConfig::default();
        let spot = Vector2D::new(2.0, 2.0);
        let mut goat = goat_at(spot, Stats::default());
        goat.target_pos = Some(spot);

        let mut finished_at = Vec::new();
        for _ in 0..100 {
            let tick = world.advance_clock().unwrap();
            if roam(&mut goat, &world, &config) == Status::Success {
                finished_at.push(tick);
            }
        }
        assert_eq!(finished_at, vec![40, 80]);
    }
}
