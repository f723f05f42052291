use uct_mcts::{
    game_state::{Action, Outcome, Player},
    policy::{
        backpropagation::{BackpropagationPolicy, StandardPolicy},
        selection::{SelectionPolicy, UCTPolicy},
    },
    tree::{NodeId, SearchTree},
    GameState,
};

/// Simple game state for testing: a fixed menu of actions, never finished
#[derive(Clone, Debug)]
struct TestGameState {
    actions: Vec<TestAction>,
    player: TestPlayer,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
struct TestPlayer(u8);

impl Player for TestPlayer {}

#[derive(Clone, Debug, PartialEq, Eq)]
struct TestAction(u8);

impl Action for TestAction {}

impl GameState for TestGameState {
    type Action = TestAction;
    type Player = TestPlayer;

    fn get_legal_actions(&self) -> Vec<Self::Action> {
        self.actions.clone()
    }

    fn apply_action(&self, _action: &Self::Action) -> uct_mcts::Result<Self> {
        Ok(TestGameState {
            actions: self.actions.clone(),
            player: TestPlayer(1 - self.player.0),
        })
    }

    fn outcome(&self) -> Option<Outcome<TestPlayer>> {
        None
    }

    fn get_current_player(&self) -> Self::Player {
        self.player
    }
}

const ME: TestPlayer = TestPlayer(0);
const THEM: TestPlayer = TestPlayer(1);

fn tree_with_children(count: u8) -> (SearchTree<TestGameState>, Vec<NodeId>) {
    let state = TestGameState {
        actions: (0..count).map(TestAction).collect(),
        player: ME,
    };
    let mut tree = SearchTree::new(state);
    let root = tree.root();
    let children = (0..count).map(|_| tree.expand(root).unwrap()).collect();
    (tree, children)
}

/// Records `wins` wins for the root mover and `visits - wins` losses on
/// `child`, mirroring each simulation at the root
fn record(tree: &mut SearchTree<TestGameState>, child: NodeId, wins: u64, visits: u64) {
    let policy = StandardPolicy::new();
    let root = tree.root();
    for i in 0..visits {
        let outcome = if i < wins {
            Outcome::Win(ME)
        } else {
            Outcome::Win(THEM)
        };
        policy.update_stats(tree.get_mut(child), &outcome);
        policy.update_stats(tree.get_mut(root), &outcome);
    }
}

fn create_test_tree_for_policy() -> (SearchTree<TestGameState>, Vec<NodeId>) {
    let (mut tree, children) = tree_with_children(2);

    // Child 0: strong (45 of 50), Child 1: weak (4 of 10)
    record(&mut tree, children[0], 45, 50);
    record(&mut tree, children[1], 4, 10);

    (tree, children)
}

#[test]
fn test_uct_exploration_exploitation_balance() {
    let (tree, children) = create_test_tree_for_policy();
    let root = tree.root();

    println!(
        "Child 0: value = {:?}, visits = {}",
        tree.value(children[0]),
        tree.get(children[0]).visits()
    );

    // With low exploration constant, exploitation dominates
    let policy_exploitative = UCTPolicy::new(0.1);
    assert_eq!(
        policy_exploitative.select_child(&tree, root).unwrap(),
        children[0],
        "With low exploration constant, should prefer child with higher value"
    );

    // With extremely high exploration constant, the less visited child wins
    let policy_explorative = UCTPolicy::new(100.0);
    assert_eq!(
        policy_explorative.select_child(&tree, root).unwrap(),
        children[1],
        "With very high exploration constant, should prefer less-visited child"
    );
}

#[test]
fn test_uct_score_matches_formula() {
    let (tree, children) = create_test_tree_for_policy();

    // value = 45 - 5 = 40 over 50 visits; parent has 60 visits
    let expected = 40.0 / 50.0 + 1.4 * (2.0 * 60f64.ln() / 50.0).sqrt();
    let score = tree.uct_score(children[0], 1.4).unwrap();
    assert!((score - expected).abs() < 1e-12);

    assert_eq!(tree.value(children[1]), Some(-2));
}

#[test]
fn test_value_is_relative_to_parent_mover() {
    let (mut tree, children) = tree_with_children(1);
    let child = children[0];
    record(&mut tree, child, 3, 4);

    // The root mover (ME) reads 3 - 1; the child's own mover would read 1 - 3
    assert_eq!(tree.value(child), Some(2));
    assert_eq!(tree.get(child).value_for(&ME), 2);
    assert_eq!(tree.get(child).value_for(&THEM), -2);
    assert_eq!(tree.get(child).state().get_current_player(), THEM);
}

#[test]
fn test_greedy_selection_is_monotonic_in_wins() {
    // Three children with equal visits; raising one child's wins never lowers
    // its rank
    for extra_wins in 0..=10u64 {
        let (mut tree, children) = tree_with_children(3);
        record(&mut tree, children[0], 6, 10);
        record(&mut tree, children[1], 5 + extra_wins.min(5), 10);
        record(&mut tree, children[2], 4, 10);

        let best = UCTPolicy::greedy()
            .select_child(&tree, tree.root())
            .unwrap();

        if extra_wins >= 2 {
            assert_eq!(best, children[1], "extra wins {}", extra_wins);
        } else {
            assert_eq!(best, children[0], "extra wins {}", extra_wins);
        }
    }
}

#[test]
fn test_ties_break_to_first_expanded_child() {
    let (mut tree, children) = tree_with_children(3);
    for &child in &children {
        record(&mut tree, child, 5, 10);
    }

    for constant in [0.0, 1.4, 10.0] {
        assert_eq!(
            UCTPolicy::new(constant).select_child(&tree, tree.root()).unwrap(),
            children[0]
        );
    }
}

#[test]
fn test_default_constant() {
    assert!((UCTPolicy::default().exploration_constant - 1.4).abs() < f64::EPSILON);
    assert_eq!(UCTPolicy::greedy().exploration_constant, 0.0);
}

#[test]
fn test_clone_box() {
    let policy = UCTPolicy::new(1.4);
    let boxed: Box<dyn SelectionPolicy<TestGameState>> = Box::new(policy);
    let cloned = boxed.clone_box();

    let (tree, children) = create_test_tree_for_policy();
    assert_eq!(
        cloned.select_child(&tree, tree.root()).unwrap(),
        boxed.select_child(&tree, tree.root()).unwrap()
    );
    assert!(children.contains(&cloned.select_child(&tree, tree.root()).unwrap()));
}
