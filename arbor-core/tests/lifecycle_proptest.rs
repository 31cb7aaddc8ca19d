// Property-based tests for the node protocol

use proptest::prelude::*;
use std::sync::Arc;

use arbor_core::{Activation, Common, DefaultLeaf, LeafNode, Message, NodeId};

const IDS: [&str; 3] = ["a", "b", "c"];

// Strategy for generating target sets over a small id space
fn targets_strategy() -> impl Strategy<Value = Vec<NodeId>> {
    prop::sample::subsequence(IDS.to_vec(), 0..=IDS.len())
        .prop_map(|ids| ids.into_iter().map(NodeId::from).collect())
}

// Strategy for generating control and input messages
fn message_strategy() -> impl Strategy<Value = Message> {
    prop_oneof![
        Just(Message::Resize {
            width: 80,
            height: 24
        }),
        targets_strategy().prop_map(Message::shut_down),
        prop::sample::select(IDS.to_vec()).prop_map(|id| Message::lifecycle_finished(NodeId::from(id))),
        prop::sample::select(IDS.to_vec()).prop_map(|id| Message::set_focus(NodeId::from(id))),
        Just(Message::clear_focus()),
        targets_strategy().prop_map(Message::set_disabled),
    ]
}

fn fresh() -> Arc<dyn LeafNode> {
    Arc::new(DefaultLeaf::new(
        Common::new(NodeId::from("a")).with_activation(Activation::OnResize),
    ))
}

proptest! {
    // Property: lifecycle state never moves backwards
    #[test]
    fn test_lifecycle_is_monotonic(msgs in prop::collection::vec(message_strategy(), 0..40)) {
        let mut node = fresh();
        for msg in &msgs {
            let before = node.state();
            let (next, _) = node.update(msg);
            prop_assert!(next.state() >= before);
            node = next;
        }
    }

    // Property: a disabled node ignores everything but property changes
    #[test]
    fn test_disabled_short_circuit(msgs in prop::collection::vec(message_strategy(), 0..40)) {
        let mut node = fresh();
        for msg in &msgs {
            let (next, cmd) = node.update(msg);
            if node.is_disabled() && !msg.is_property_change() {
                prop_assert!(cmd.is_empty());
                prop_assert_eq!(next.state(), node.state());
                prop_assert_eq!(next.properties(), node.properties());
            }
            node = next;
        }
    }

    // Property: only the focus target ends up focused
    #[test]
    fn test_focus_follows_target(target in prop::sample::select(IDS.to_vec())) {
        let (next, _) = fresh().update(&Message::set_focus(NodeId::from(target)));
        prop_assert_eq!(next.is_focused(), target == "a");
    }
}
