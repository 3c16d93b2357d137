#![no_main]

use avl_dict::model::SnapshotEquivalenceInput;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|input: SnapshotEquivalenceInput| {
    avl_dict::model::run_snapshot_equivalence(input.values, input.start, input.ops);
});
