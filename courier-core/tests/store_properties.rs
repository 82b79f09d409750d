//! Property tests for the message store.

use courier_core::{ChannelKind, MessageStatus, MessageStore};
use proptest::prelude::*;

#[derive(Debug, Clone)]
enum Operation {
    Submit(ChannelKind),
    Deliver(usize),
    Fail(usize),
}

fn operation_strategy() -> impl Strategy<Value = Operation> {
    prop_oneof![
        Just(Operation::Submit(ChannelKind::Reliable)),
        Just(Operation::Submit(ChannelKind::Unreliable)),
        (0usize..64).prop_map(Operation::Deliver),
        (0usize..64).prop_map(Operation::Fail),
    ]
}

proptest! {
    #[test]
    fn terminal_status_never_changes(operations in prop::collection::vec(operation_strategy(), 1..200)) {
        let mut store = MessageStore::new();
        let mut ids = Vec::new();
        let mut first_terminal = std::collections::HashMap::new();

        for operation in operations {
            match operation {
                Operation::Submit(kind) => {
                    ids.push(store.submit("payload", kind, None).id);
                }
                Operation::Deliver(index) => {
                    if let Some(&id) = ids.get(index) {
                        if store.mark_delivered(id, true).is_ok() {
                            prop_assert!(first_terminal.insert(id, MessageStatus::Delivered).is_none());
                        }
                    }
                }
                Operation::Fail(index) => {
                    if let Some(&id) = ids.get(index) {
                        if store.mark_failed(id).is_ok() {
                            prop_assert!(first_terminal.insert(id, MessageStatus::Failed).is_none());
                        }
                    }
                }
            }
        }

        for (id, status) in first_terminal {
            prop_assert_eq!(store.get(id).map(|message| message.status), Some(status));
        }
    }

    #[test]
    fn ids_increase_in_submission_order(kinds in prop::collection::vec(any::<bool>(), 1..100)) {
        let mut store = MessageStore::new();
        for reliable in kinds {
            let kind = if reliable { ChannelKind::Reliable } else { ChannelKind::Unreliable };
            store.submit("payload", kind, None);
        }

        for kind in ChannelKind::ALL {
            let ids: Vec<_> = store.list_by_channel(kind).map(|message| message.id).collect();
            prop_assert!(ids.windows(2).all(|pair| pair[0] < pair[1]));
        }
    }
}
