//! Resumable behavior trees for Animalia.
//!
//! A tree is a closed enum of four node kinds ([`Node`]): `Sequence`,
//! `Selector`, `Action` and `Condition`. Trees are generic over a
//! blackboard `B` (the agent being driven) and a world `W`, so leaf bodies
//! get statically typed access to both instead of downcasting.
//!
//! Ticking is a synchronous depth-first walk. A composite whose child
//! returns [`Status::Running`] records that child's index in the entity's
//! [`NodeStates`] and resumes there on the next tick, skipping earlier
//! siblings. That makes long-running actions such as "walk to the water"
//! cheap: the tree does not re-evaluate from the root every tick.
//!
//! # Modules
//!
//! - [`status`] -- The tri-state [`Status`]
//! - [`id`] -- [`NodeId`] and the sequential [`NodeIdGenerator`]
//! - [`context`] -- [`TickContext`] and per-entity [`NodeStates`]
//! - [`node`] -- [`Node`] and the composite tick rules
//! - [`tree`] -- [`BehaviorTree`], a validated root
//! - [`error`] -- [`TreeError`]

pub mod context;
pub mod error;
pub mod id;
pub mod node;
pub mod status;
pub mod tree;

pub use context::{NodeStates, TickContext};
pub use error::TreeError;
pub use id::{NodeId, NodeIdGenerator};
pub use node::{ActionFn, ConditionFn, Node};
pub use status::Status;
pub use tree::BehaviorTree;

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::collections::VecDeque;

    use super::*;

    /// Blackboard that scripts leaf results and records which leaves ran.
    #[derive(Debug, Default)]
    struct Script {
        results: std::collections::HashMap<&'static str, VecDeque<Status>>,
        log: Vec<&'static str>,
    }

    impl Script {
        fn with(mut self, leaf: &'static str, results: &[Status]) -> Self {
            self.results.insert(leaf, results.iter().copied().collect());
            self
        }

        fn next(&mut self, leaf: &'static str) -> Status {
            self.log.push(leaf);
            self.results
                .get_mut(leaf)
                .and_then(VecDeque::pop_front)
                .unwrap_or(Status::Success)
        }
    }

    type Ctx<'a> = TickContext<'a, Script, ()>;

    fn scripted(ids: &mut NodeIdGenerator, leaf: &'static str) -> Node<Script, ()> {
        Node::action(ids.next_id(), leaf, move |ctx: &mut Ctx<'_>| {
            ctx.blackboard.next(leaf)
        })
    }

    fn tick(tree: &BehaviorTree<Script, ()>, script: &mut Script, states: &mut NodeStates) -> Status {
        tree.tick(script, &mut (), states)
    }

    #[test]
    fn sequence_runs_children_in_order_until_failure() {
        let mut ids = NodeIdGenerator::new();
        let root = Node::sequence(
            ids.next_id(),
            vec![
                scripted(&mut ids, "a"),
                scripted(&mut ids, "b"),
                scripted(&mut ids, "c"),
            ],
        );
        let tree = BehaviorTree::new(root).unwrap();
        let mut states = tree.new_states();
        let mut script = Script::default().with("b", &[Status::Failure]);

        assert_eq!(tick(&tree, &mut script, &mut states), Status::Failure);
        assert_eq!(script.log, vec!["a", "b"]);

        script.log.clear();
        assert_eq!(tick(&tree, &mut script, &mut states), Status::Success);
        assert_eq!(script.log, vec!["a", "b", "c"]);
        assert!(states.as_slice().iter().all(|slot| *slot == 0));
    }

    #[test]
    fn selector_stops_at_first_success() {
        let mut ids = NodeIdGenerator::new();
        let root = Node::selector(
            ids.next_id(),
            vec![
                scripted(&mut ids, "a"),
                scripted(&mut ids, "b"),
                scripted(&mut ids, "c"),
            ],
        );
        let tree = BehaviorTree::new(root).unwrap();
        let mut states = tree.new_states();
        let mut script = Script::default().with("a", &[Status::Failure]);

        assert_eq!(tick(&tree, &mut script, &mut states), Status::Success);
        assert_eq!(script.log, vec!["a", "b"]);
    }

    #[test]
    fn selector_fails_when_every_child_fails() {
        let mut ids = NodeIdGenerator::new();
        let root = Node::selector(
            ids.next_id(),
            vec![scripted(&mut ids, "a"), scripted(&mut ids, "b")],
        );
        let tree = BehaviorTree::new(root).unwrap();
        let mut states = tree.new_states();
        let mut script = Script::default()
            .with("a", &[Status::Failure])
            .with("b", &[Status::Failure]);

        assert_eq!(tick(&tree, &mut script, &mut states), Status::Failure);
        assert_eq!(states.get(NodeId::from_raw(0)), 0);
    }

    #[test]
    fn running_child_is_resumed_without_ticking_earlier_siblings() {
        let mut ids = NodeIdGenerator::new();
        let root = Node::sequence(
            ids.next_id(),
            vec![
                scripted(&mut ids, "first"),
                scripted(&mut ids, "walk"),
                scripted(&mut ids, "last"),
            ],
        );
        let tree = BehaviorTree::new(root).unwrap();
        let mut states = tree.new_states();
        let mut script = Script::default().with(
            "walk",
            &[Status::Running, Status::Running, Status::Running],
        );

        for _ in 0..3 {
            assert_eq!(tick(&tree, &mut script, &mut states), Status::Running);
            assert_eq!(states.get(NodeId::from_raw(0)), 1);
        }
        assert_eq!(script.log, vec!["first", "walk", "walk", "walk"]);

        script.log.clear();
        assert_eq!(tick(&tree, &mut script, &mut states), Status::Success);
        assert_eq!(script.log, vec!["walk", "last"]);
        assert_eq!(states.get(NodeId::from_raw(0)), 0);
    }

    #[test]
    fn selector_resumes_at_saved_branch() {
        let mut ids = NodeIdGenerator::new();
        let root = Node::selector(
            ids.next_id(),
            vec![scripted(&mut ids, "urgent"), scripted(&mut ids, "idle")],
        );
        let tree = BehaviorTree::new(root).unwrap();
        let mut states = tree.new_states();
        let mut script = Script::default()
            .with("urgent", &[Status::Failure])
            .with("idle", &[Status::Running, Status::Success]);

        assert_eq!(tick(&tree, &mut script, &mut states), Status::Running);
        assert_eq!(tick(&tree, &mut script, &mut states), Status::Success);
        // "urgent" is not re-checked while "idle" is still running.
        assert_eq!(script.log, vec!["urgent", "idle", "idle"]);
    }

    #[test]
    fn nested_running_records_index_on_every_composite() {
        // selector(0) -> [seq(1) -> [c(2), r(3)], s(4)]
        let mut ids = NodeIdGenerator::new();
        let root_id = ids.next_id();
        let seq_id = ids.next_id();
        let seq = Node::sequence(
            seq_id,
            vec![scripted(&mut ids, "c"), scripted(&mut ids, "r")],
        );
        let root = Node::selector(root_id, vec![seq, scripted(&mut ids, "s")]);
        let tree = BehaviorTree::new(root).unwrap();
        let mut states = tree.new_states();
        let mut script = Script::default().with("r", &[Status::Running]);

        assert_eq!(tick(&tree, &mut script, &mut states), Status::Running);
        assert_eq!(states.get(root_id), 0);
        assert_eq!(states.get(seq_id), 1);

        script.log.clear();
        assert_eq!(tick(&tree, &mut script, &mut states), Status::Success);
        assert_eq!(script.log, vec!["r"]);
        assert_eq!(states.as_slice(), &[0, 0, 0, 0, 0]);
    }

    #[test]
    fn resume_then_fail_restarts_sequence_from_first_child() {
        let mut ids = NodeIdGenerator::new();
        let seq_id = ids.next_id();
        let root = Node::sequence(
            seq_id,
            vec![scripted(&mut ids, "a"), scripted(&mut ids, "b")],
        );
        let tree = BehaviorTree::new(root).unwrap();
        let mut states = tree.new_states();
        let mut script = Script::default().with("b", &[Status::Running, Status::Failure]);

        assert_eq!(tick(&tree, &mut script, &mut states), Status::Running);
        assert_eq!(tick(&tree, &mut script, &mut states), Status::Failure);
        assert_eq!(states.get(seq_id), 0);

        script.log.clear();
        assert_eq!(tick(&tree, &mut script, &mut states), Status::Success);
        assert_eq!(script.log, vec!["a", "b"]);
    }

    #[test]
    fn conditions_map_booleans_and_are_idempotent() {
        #[derive(Debug)]
        struct Level(u8);

        let mut ids = NodeIdGenerator::new();
        let root = Node::condition(ids.next_id(), "high", |ctx: &TickContext<'_, Level, ()>| {
            ctx.blackboard.0 >= 80
        });
        let tree = BehaviorTree::new(root).unwrap();
        let mut states = tree.new_states();

        let mut level = Level(80);
        for _ in 0..3 {
            assert_eq!(tree.tick(&mut level, &mut (), &mut states), Status::Success);
        }
        level.0 = 79;
        assert_eq!(tree.tick(&mut level, &mut (), &mut states), Status::Failure);
        assert_eq!(level.0, 79);
    }

    #[test]
    fn duplicate_ids_are_rejected() {
        let shared = NodeId::from_raw(1);
        let root: Node<Script, ()> = Node::sequence(
            NodeId::from_raw(0),
            vec![
                Node::action(shared, "a", |_: &mut Ctx<'_>| Status::Success),
                Node::condition(shared, "b", |_: &Ctx<'_>| true),
            ],
        );

        let err = BehaviorTree::new(root).unwrap_err();
        assert_eq!(
            err,
            TreeError::DuplicateNodeId {
                id: shared,
                first: "a",
                second: "b",
            }
        );
    }

    #[test]
    fn slot_count_covers_highest_id() {
        let mut ids = NodeIdGenerator::new();
        let root = Node::selector(
            ids.next_id(),
            vec![
                Node::sequence(ids.next_id(), vec![scripted(&mut ids, "a")]),
                scripted(&mut ids, "b"),
            ],
        );
        let tree = BehaviorTree::new(root).unwrap();
        assert_eq!(tree.slot_count(), ids.issued());
        assert_eq!(
            tree.node_ids(),
            (0..4).map(NodeId::from_raw).collect::<Vec<_>>()
        );
    }

    #[test]
    fn one_tree_drives_independent_entities() {
        let mut ids = NodeIdGenerator::new();
        let root = Node::sequence(
            ids.next_id(),
            vec![scripted(&mut ids, "a"), scripted(&mut ids, "b")],
        );
        let tree = BehaviorTree::new(root).unwrap();

        let mut busy = Script::default().with("b", &[Status::Running]);
        let mut busy_states = tree.new_states();
        let mut idle = Script::default();
        let mut idle_states = tree.new_states();

        assert_eq!(tick(&tree, &mut busy, &mut busy_states), Status::Running);
        assert_eq!(tick(&tree, &mut idle, &mut idle_states), Status::Success);
        assert_eq!(busy_states.get(NodeId::from_raw(0)), 1);
        assert_eq!(idle_states.get(NodeId::from_raw(0)), 0);
    }

    /// A guard that patrols until the player comes close, then chases and
    /// attacks.
    #[derive(Debug)]
    struct Guard {
        distance_to_player: i32,
        health: i32,
        actions: Vec<&'static str>,
    }

    type GuardCtx<'a> = TickContext<'a, Guard, ()>;

    fn guard_tree() -> BehaviorTree<Guard, ()> {
        let mut ids = NodeIdGenerator::new();
        let root = ids.next_id();

        let flee_id = ids.next_id();
        let flee = Node::sequence(
            flee_id,
            vec![
                Node::condition(ids.next_id(), "is_hurt", |ctx: &GuardCtx<'_>| {
                    ctx.blackboard.health < 30
                }),
                Node::action(ids.next_id(), "flee", |ctx: &mut GuardCtx<'_>| {
                    ctx.blackboard.actions.push("flee");
                    Status::Running
                }),
            ],
        );

        let attack_id = ids.next_id();
        let attack = Node::sequence(
            attack_id,
            vec![
                Node::condition(ids.next_id(), "player_near", |ctx: &GuardCtx<'_>| {
                    ctx.blackboard.distance_to_player <= 5
                }),
                Node::action(ids.next_id(), "chase", |ctx: &mut GuardCtx<'_>| {
                    let guard = &mut *ctx.blackboard;
                    guard.actions.push("chase");
                    if guard.distance_to_player > 1 {
                        guard.distance_to_player = guard.distance_to_player.saturating_sub(1);
                        Status::Running
                    } else {
                        Status::Success
                    }
                }),
                Node::action(ids.next_id(), "attack", |ctx: &mut GuardCtx<'_>| {
                    ctx.blackboard.actions.push("attack");
                    Status::Success
                }),
            ],
        );

        let patrol = Node::action(ids.next_id(), "patrol", |ctx: &mut GuardCtx<'_>| {
            ctx.blackboard.actions.push("patrol");
            Status::Success
        });

        BehaviorTree::new(Node::selector(root, vec![flee, attack, patrol])).unwrap()
    }

    #[test]
    fn guard_patrols_then_chases_then_attacks() {
        let tree = guard_tree();
        let mut states = tree.new_states();
        let mut guard = Guard {
            distance_to_player: 10,
            health: 100,
            actions: Vec::new(),
        };

        assert_eq!(tree.tick(&mut guard, &mut (), &mut states), Status::Success);
        assert_eq!(guard.actions, vec!["patrol"]);

        guard.distance_to_player = 3;
        guard.actions.clear();
        assert_eq!(tree.tick(&mut guard, &mut (), &mut states), Status::Running);
        assert_eq!(tree.tick(&mut guard, &mut (), &mut states), Status::Running);
        assert_eq!(tree.tick(&mut guard, &mut (), &mut states), Status::Success);
        assert_eq!(guard.actions, vec!["chase", "chase", "chase", "attack"]);
        assert_eq!(guard.distance_to_player, 1);
    }

    #[test]
    fn hurt_guard_flees_first() {
        let tree = guard_tree();
        let mut states = tree.new_states();
        let mut guard = Guard {
            distance_to_player: 2,
            health: 10,
            actions: Vec::new(),
        };

        assert_eq!(tree.tick(&mut guard, &mut (), &mut states), Status::Running);
        assert_eq!(guard.actions, vec!["flee"]);
    }

    #[derive(Debug, Default)]
    struct Gates {
        first: bool,
        second: bool,
        third: bool,
        ran: Vec<&'static str>,
    }

    type GateCtx<'a> = TickContext<'a, Gates, ()>;

    fn gated(
        ids: &mut NodeIdGenerator,
        name: &'static str,
        open: fn(&Gates) -> bool,
    ) -> Node<Gates, ()> {
        Node::sequence(
            ids.next_id(),
            vec![
                Node::condition(ids.next_id(), "gate", move |ctx: &GateCtx<'_>| {
                    open(&*ctx.blackboard)
                }),
                Node::action(ids.next_id(), name, move |ctx: &mut GateCtx<'_>| {
                    ctx.blackboard.ran.push(name);
                    Status::Success
                }),
            ],
        )
    }

    #[test]
    fn three_sequences_first_two_fail_on_condition() {
        let mut ids = NodeIdGenerator::new();
        let root_id = ids.next_id();
        let branches = vec![
            gated(&mut ids, "first", |g| g.first),
            gated(&mut ids, "second", |g| g.second),
            gated(&mut ids, "third", |g| g.third),
        ];
        let tree = BehaviorTree::new(Node::selector(root_id, branches)).unwrap();
        let mut states = tree.new_states();
        let mut gates = Gates {
            third: true,
            ..Gates::default()
        };

        assert_eq!(tree.tick(&mut gates, &mut (), &mut states), Status::Success);
        assert_eq!(gates.ran, vec!["third"]);
        assert_eq!(states.get(root_id), 0);

        // Next tick starts over at the first branch.
        gates.first = true;
        assert_eq!(tree.tick(&mut gates, &mut (), &mut states), Status::Success);
        assert_eq!(gates.ran, vec!["third", "first"]);
        assert_eq!(states.get(root_id), 0);
    }
}
