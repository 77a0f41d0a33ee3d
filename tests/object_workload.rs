// model = "claude-opus-4-5"
// created = 2026-02-06
// modified = 2026-02-06
// driver = "Isaac Clayton"

//! Randomized workload tests for the object layer.
//!
//! A seeded generator produces editing scripts (sequential typing plus
//! random-point inserts from several actors), and every script is checked
//! against a flat Vec model: the object must place each op exactly where
//! the model says, report the same global offset, and read back in the
//! same order regardless of how often pages split along the way.

use rand::rngs::StdRng;
use rand::Rng;
use rand::SeedableRng;

use quire::{Id, Object, ObjectOptions, Op, RawType, Value};

// =============================================================================
// Script generation and model application
// =============================================================================

/// One scripted insertion: which existing row to reference (None = root),
/// which actor produced it, and the payload.
#[derive(Clone, Debug)]
struct Edit {
    reference: Option<usize>,
    actor: &'static [u8],
    value: i64,
}

const ACTORS: [&[u8]; 3] = [b"alice", b"bob", b"carol"];

/// A script of `steps` edits: mostly appends after the latest row, with a
/// steady trickle of inserts after random earlier rows.
fn generate_script(seed: u64, steps: usize) -> Vec<Edit> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut script = Vec::with_capacity(steps);

    for step in 0..steps {
        let reference = if step == 0 {
            None
        } else if rng.gen_bool(0.7) {
            Some(step - 1)
        } else {
            Some(rng.gen_range(0..step))
        };

        script.push(Edit {
            reference,
            actor: ACTORS[rng.gen_range(0..ACTORS.len())],
            value: step as i64,
        });
    }

    return script;
}

/// Run `script` against an object with the given page size, mirroring
/// every step in a Vec model and checking the returned offsets against it.
fn run_script(script: &[Edit], max_page_size: i64) -> (Object, Vec<i64>) {
    let options = ObjectOptions {
        max_page_size,
        ..ObjectOptions::default()
    };
    let mut object = Object::with_options(RawType::VarInt, options);

    // ids[step] is the identity the step-th edit created
    let mut ids: Vec<Id> = Vec::with_capacity(script.len());
    // the model: step numbers in document order
    let mut model: Vec<i64> = Vec::new();

    for (step, edit) in script.iter().enumerate() {
        let id = Id::new(step as i64 + 1, edit.actor);
        let reference = match edit.reference {
            None => Id::root(),
            Some(target) => ids[target].clone(),
        };

        let position = match edit.reference {
            None => 0,
            Some(target) => {
                let target_value = script[target].value;
                let at = model
                    .iter()
                    .position(|&v| v == target_value)
                    .expect("referenced row missing from model");
                at + 1
            }
        };

        let op = Op::insert(id.clone(), reference, Value::int(edit.value));
        let offset = object.insert(op).expect("insert failed");

        assert_eq!(offset as usize, position, "offset diverged at step {}", step);
        model.insert(position, edit.value);
        ids.push(id);
    }

    return (object, model);
}

fn read_ints(object: &Object) -> Vec<i64> {
    return object.values().iter().map(|v| v.as_int()).collect();
}

// =============================================================================
// Workloads
// =============================================================================

#[test]
fn sequential_typing_reads_back_in_order() {
    let mut object = Object::with_options(
        RawType::VarInt,
        ObjectOptions {
            max_page_size: 16,
            ..ObjectOptions::default()
        },
    );

    for i in 0..1000i64 {
        let reference = if i == 0 { Id::root() } else { Id::new(i, b"me") };
        let op = Op::insert(Id::new(i + 1, b"me"), reference, Value::int(i));
        assert_eq!(object.insert(op), Ok(i));
    }

    assert!(object.page_count() > 1, "expected page splits");
    assert_eq!(object.row_count(), 1000);
    assert_eq!(read_ints(&object), (0..1000).collect::<Vec<i64>>());
}

#[test]
fn random_edits_match_the_model() {
    for seed in 0..8u64 {
        let script = generate_script(seed, 300);
        let (object, model) = run_script(&script, 32);

        assert_eq!(object.row_count(), model.len() as i64);
        assert_eq!(read_ints(&object), model, "seed {}", seed);
    }
}

#[test]
fn every_stored_identity_stays_resolvable() {
    // references to arbitrary old rows keep resolving after many splits,
    // which fails loudly if a page's filter ever loses an identity
    let script = generate_script(42, 400);
    let (mut object, mut model) = run_script(&script, 16);
    assert!(object.page_count() > 10);

    for target in (0..400usize).step_by(7) {
        let edit = &script[target];
        let probe_id = Id::new(10_000 + target as i64, b"probe");
        let reference = Id::new(target as i64 + 1, edit.actor);
        let op = Op::insert(probe_id, reference, Value::int(-1));

        let offset = object.insert(op).expect("old identity unresolvable");

        let at = model
            .iter()
            .position(|&v| v == edit.value)
            .expect("model lost a row");
        assert_eq!(offset as usize, at + 1);
        model.insert(at + 1, -1);
    }

    assert_eq!(read_ints(&object), model);
}

#[test]
fn final_sequence_is_independent_of_page_size() {
    let script = generate_script(7, 250);

    let (baseline, _) = run_script(&script, 200);
    let expected = read_ints(&baseline);

    for max_page_size in [2, 3, 8, 33, 1000] {
        let (object, _) = run_script(&script, max_page_size);
        assert_eq!(
            read_ints(&object),
            expected,
            "row sequence changed at page size {}",
            max_page_size
        );
    }
}

#[test]
fn unknown_references_fail_without_corrupting() {
    let script = generate_script(3, 100);
    let (mut object, model) = run_script(&script, 16);

    let op = Op::insert(
        Id::new(5000, b"me"),
        Id::new(4999, b"stranger"),
        Value::int(0),
    );
    assert!(object.insert(op).is_err());
    assert_eq!(read_ints(&object), model);
}

#[test]
fn byte_array_workload_roundtrips() {
    let mut rng = StdRng::seed_from_u64(11);
    let mut object = Object::with_options(
        RawType::ByteArray,
        ObjectOptions {
            max_page_size: 8,
            ..ObjectOptions::default()
        },
    );

    let mut expected: Vec<Vec<u8>> = Vec::new();
    for i in 0..100i64 {
        let reference = if i == 0 { Id::root() } else { Id::new(i, b"me") };
        let payload: Vec<u8> = (0..rng.gen_range(0..16)).map(|_| rng.gen()).collect();
        let op = Op::insert(Id::new(i + 1, b"me"), reference, Value::bytes(&payload));
        object.insert(op).expect("insert failed");
        expected.push(payload);
    }

    let got: Vec<Vec<u8>> = object
        .values()
        .iter()
        .map(|v| v.as_bytes().to_vec())
        .collect();
    assert_eq!(got, expected);
}
