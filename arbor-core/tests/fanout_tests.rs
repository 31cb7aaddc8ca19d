// Fan-out integration tests across nested branches

use arbor_core::{Activation, Child, Common, DefaultBranch, LifecycleState, Message, NodeId, RootCore};
use pretty_assertions::assert_eq;

mod common;
use common::{branch, cycle, leaf, resize};

fn nested() -> RootCore {
    let core = RootCore::new();
    core.link(branch(
        "panel",
        Activation::OnResize,
        vec![
            leaf("a", Activation::OnResize),
            leaf("b", Activation::OnResize),
        ],
    ));
    core.link(leaf("c", Activation::OnResize));
    core
}

fn focused_ids(core: &RootCore) -> Vec<String> {
    let mut ids: Vec<String> = ["panel", "a", "b", "c"]
        .into_iter()
        .filter(|id| core.registry().find(id).is_some_and(|n| n.is_focused()))
        .map(str::to_string)
        .collect();
    ids.sort();
    ids
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_fan_out_reaches_every_child_once() {
    let mut core = RootCore::new();
    let ids: Vec<NodeId> = (0..16).map(|i| NodeId::from(format!("leaf-{}", i))).collect();
    let group = DefaultBranch::new(Common::new(NodeId::from("group")));
    for id in &ids {
        group.link(leaf(id.as_str(), Activation::OnResize));
    }
    core.link(Child::branch(group));

    cycle(&mut core, resize()).await;
    let produced = cycle(&mut core, Message::shut_down(ids.clone())).await;

    let group = core.must_get("group");
    let registry = group.registry().expect("group is a branch");
    assert_eq!(registry.len(), ids.len());
    assert_eq!(produced.len(), ids.len());
    for id in &ids {
        assert_eq!(registry.must_get(id.as_str()).state(), LifecycleState::ShuttingDown);
    }
}

#[tokio::test]
async fn test_focus_is_exclusive_tree_wide() {
    let mut core = nested();

    cycle(&mut core, Message::set_focus(NodeId::from("b"))).await;
    assert_eq!(focused_ids(&core), vec!["b".to_string()]);

    cycle(&mut core, Message::set_focus(NodeId::from("c"))).await;
    assert_eq!(focused_ids(&core), vec!["c".to_string()]);

    cycle(&mut core, Message::clear_focus()).await;
    assert!(focused_ids(&core).is_empty());
}

#[tokio::test]
async fn test_set_disabled_redefines_disabled_set() {
    let mut core = nested();

    cycle(&mut core, Message::set_disabled([NodeId::from("a"), NodeId::from("c")])).await;
    let find = |id: &str| core.registry().find(id).expect("node linked");
    assert!(find("a").is_disabled());
    assert!(find("c").is_disabled());
    assert!(!find("b").is_disabled());

    cycle(&mut core, Message::set_disabled([NodeId::from("b")])).await;
    let find = |id: &str| core.registry().find(id).expect("node linked");
    assert!(!find("a").is_disabled());
    assert!(find("b").is_disabled());
    assert!(!find("c").is_disabled());
}

#[tokio::test]
async fn test_disabled_branch_blocks_subtree() {
    let mut core = nested();
    cycle(&mut core, Message::set_disabled([NodeId::from("panel")])).await;

    cycle(&mut core, resize()).await;
    let find = |id: &str| core.registry().find(id).expect("node linked");
    assert_eq!(find("panel").state(), LifecycleState::Inactive);
    assert_eq!(find("a").state(), LifecycleState::Inactive);
    assert_eq!(find("c").state(), LifecycleState::Active);

    // Property changes still pass through the disabled branch
    cycle(&mut core, Message::set_focus(NodeId::from("a"))).await;
    assert_eq!(focused_ids(&core), vec!["a".to_string()]);

    cycle(&mut core, Message::set_disabled(Vec::new())).await;
    cycle(&mut core, resize()).await;
    let find = |id: &str| core.registry().find(id).expect("node linked");
    assert_eq!(find("panel").state(), LifecycleState::Active);
    assert_eq!(find("a").state(), LifecycleState::Active);
    assert_eq!(find("b").state(), LifecycleState::Active);
}
