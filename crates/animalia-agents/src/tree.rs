//! The goat behavior tree.
//!
//! ```text
//! Selector
//! ├── Sequence  thirst    [thirst >= trigger] → find water → walk & drink
//! ├── Sequence  hunger    [hunger >= trigger] → find food  → walk & eat
//! ├── Sequence  tiredness [tired  >= trigger] → find spot  → walk & rest
//! └── Sequence  roaming   pick roam target → walk & idle
//! ```
//!
//! Branch order is priority order. When several needs are urgent at once
//! the earliest branch wins and the others wait until it finishes.

use animalia_bt::{BehaviorTree, Node, NodeIdGenerator, TickContext, TreeError};
use animalia_types::{EntityState, Vector2D, Vital};
use animalia_world::World;

use crate::actions;
use crate::config::BehaviorConfig;
use crate::goat::Goat;

/// Tick context seen by goat tree leaves.
pub type GoatContext<'a> = TickContext<'a, Goat, World>;

/// The goat tree type.
pub type GoatTree = BehaviorTree<Goat, World>;

/// One urgent-need branch.
#[derive(Clone, Copy)]
struct Need {
    vital: Vital,
    state: EntityState,
    locate: fn(&mut World) -> Option<Vector2D>,
    condition_name: &'static str,
    find_name: &'static str,
    consume_name: &'static str,
}

const THIRST: Need = Need {
    vital: Vital::Thirst,
    state: EntityState::FindWater,
    locate: World::random_water_source,
    condition_name: "is_thirsty",
    find_name: "find_water",
    consume_name: "drink",
};

const HUNGER: Need = Need {
    vital: Vital::Hunger,
    state: EntityState::FindFood,
    locate: World::random_food_source,
    condition_name: "is_hungry",
    find_name: "find_food",
    consume_name: "eat",
};

// Rest spots are any walkable cell; rest areas are only drawn on the map.
const TIREDNESS: Need = Need {
    vital: Vital::Tiredness,
    state: EntityState::Resting,
    locate: World::random_walkable_position,
    condition_name: "is_tired",
    find_name: "find_rest_spot",
    consume_name: "rest",
};

/// Build the goat tree with the given tunables.
///
/// # Errors
///
/// Returns a [`TreeError`] if the assembled tree is malformed, which would
/// indicate a bug in this builder.
pub fn goat_tree(config: BehaviorConfig) -> Result<GoatTree, TreeError> {
    let mut ids = NodeIdGenerator::new();
    let root = ids.next_id();
    let branches = vec![
        need_branch(&mut ids, THIRST, config),
        need_branch(&mut ids, HUNGER, config),
        need_branch(&mut ids, TIREDNESS, config),
        roaming_branch(&mut ids, config),
    ];
    BehaviorTree::new(Node::selector(root, branches))
}

fn need_branch(ids: &mut NodeIdGenerator, need: Need, config: BehaviorConfig) -> Node<Goat, World> {
    let thresholds = config.thresholds(need.vital);
    let sequence = ids.next_id();

    let urgent = Node::condition(ids.next_id(), need.condition_name, move |ctx: &GoatContext<'_>| {
        ctx.blackboard.stats.get(need.vital) >= thresholds.trigger
    });

    let find = Node::action(ids.next_id(), need.find_name, move |ctx: &mut GoatContext<'_>| {
        let destination = (need.locate)(ctx.world);
        let tick = ctx.world.tick();
        actions::set_destination(ctx.blackboard, destination, need.state, tick)
    });

    let consume = Node::action(ids.next_id(), need.consume_name, move |ctx: &mut GoatContext<'_>| {
        actions::walk_then_consume(ctx.blackboard, need.vital, thresholds, &config)
    });

    Node::sequence(sequence, vec![urgent, find, consume])
}

fn roaming_branch(ids: &mut NodeIdGenerator, config: BehaviorConfig) -> Node<Goat, World> {
    let sequence = ids.next_id();

    let pick = Node::action(ids.next_id(), "pick_roam_target", move |ctx: &mut GoatContext<'_>| {
        actions::pick_roam_target(ctx.blackboard, ctx.world, &config)
    });

    let walk = Node::action(ids.next_id(), "roam", move |ctx: &mut GoatContext<'_>| {
        actions::roam(ctx.blackboard, ctx.world, &config)
    });

    Node::sequence(sequence, vec![pick, walk])
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn ids_are_sequential_and_parent_first() {
        let tree = goat_tree(BehaviorConfig::default()).unwrap();
        let ids: Vec<usize> = tree.node_ids().iter().map(|id| id.index()).collect();
        assert_eq!(ids, (0..16).collect::<Vec<_>>());
        assert_eq!(tree.slot_count(), 16);
    }

    #[test]
    fn branches_are_in_priority_order() {
        let tree = goat_tree(BehaviorConfig::default()).unwrap();
        let names: Vec<&str> = tree
            .root()
            .children()
            .iter()
            .map(|branch| branch.children().first().map_or("", Node::name))
            .collect();
        assert_eq!(names, vec!["is_thirsty", "is_hungry", "is_tired", "pick_roam_target"]);
    }
}
