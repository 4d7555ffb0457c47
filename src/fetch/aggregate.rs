use crate::fetch::worker::WorkerOutput;
use crate::model::Snapshot;

/// Merges every worker's private stores into one snapshot
///
/// Runs exactly once, on the coordinating task, after every worker has
/// joined; no worker ever touches the global stores. Merge order does
/// not matter: system keys are disjoint across workers by construction
/// of the partitioner, and overlapping stargate keys carry identical
/// records fetched from the same immutable resource, so either value may
/// win. The merge is a union, so repeating it over the same outputs
/// produces the same snapshot.
///
/// # Arguments
///
/// * `outputs` - One result per worker, in any order
pub fn merge_outputs(outputs: impl IntoIterator<Item = WorkerOutput>) -> Snapshot {
    let mut snapshot = Snapshot::new();
    for output in outputs {
        snapshot.systems.extend(output.systems);
        snapshot.stargates.extend(output.stargates);
    }
    snapshot
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ResourceId, ResourceRecord};
    use serde_json::json;

    fn record(name: &str) -> ResourceRecord {
        serde_json::from_value(json!({ "name": name })).unwrap()
    }

    fn output(systems: &[(u64, &str)], stargates: &[(u64, &str)]) -> WorkerOutput {
        let mut out = WorkerOutput::default();
        for &(id, name) in systems {
            out.systems.insert(ResourceId(id), record(name));
        }
        for &(id, name) in stargates {
            out.stargates.insert(ResourceId(id), record(name));
        }
        out
    }

    #[test]
    fn test_merge_unions_disjoint_systems() {
        let merged = merge_outputs(vec![
            output(&[(1, "Alpha"), (2, "Beta")], &[(101, "Gate A")]),
            output(&[(3, "Gamma"), (4, "Delta")], &[]),
        ]);

        assert_eq!(
            merged.systems.keys().copied().collect::<Vec<_>>(),
            vec![ResourceId(1), ResourceId(2), ResourceId(3), ResourceId(4)]
        );
        assert_eq!(
            merged.stargates.keys().copied().collect::<Vec<_>>(),
            vec![ResourceId(101)]
        );
        // Values arrive unchanged.
        assert_eq!(merged.systems[&ResourceId(2)].label(), Some("Beta"));
    }

    #[test]
    fn test_merge_order_does_not_matter() {
        let forward = merge_outputs(vec![
            output(&[(1, "Alpha")], &[(101, "Gate")]),
            output(&[(2, "Beta")], &[(101, "Gate")]),
        ]);
        let backward = merge_outputs(vec![
            output(&[(2, "Beta")], &[(101, "Gate")]),
            output(&[(1, "Alpha")], &[(101, "Gate")]),
        ]);

        assert_eq!(forward, backward);
    }

    #[test]
    fn test_merge_is_idempotent() {
        let make = || {
            vec![
                output(&[(1, "Alpha")], &[(101, "Gate A")]),
                output(&[(2, "Beta")], &[(102, "Gate B")]),
            ]
        };

        // A second merge of the same outputs is a union, not an append.
        assert_eq!(merge_outputs(make()), merge_outputs(make()));
    }

    #[test]
    fn test_merge_empty() {
        let merged = merge_outputs(Vec::new());
        assert!(merged.systems.is_empty());
        assert!(merged.stargates.is_empty());
    }
}
