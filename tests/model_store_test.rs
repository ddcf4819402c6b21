mod common;

use textboost::prelude::*;
use textboost::TextBoostError;

use common::*;


fn assert_same_model(f: &BoostingClassifier, g: &BoostingClassifier) {
    assert_eq!(f.n_categories(), g.n_categories());
    assert_eq!(f.n_rounds(), g.n_rounds());
    assert_eq!(f.discretization(), g.discretization());
    for (r, (a, b)) in f.rounds().iter().zip(g.rounds()).enumerate() {
        assert_eq!(a, b, "round {r} differs.");
    }
}


#[test]
fn memory_round_trip_keeps_rounds_and_scores() {
    let f = small_classifier();
    let storage = MemoryStorage::new();

    ModelStore::write(&storage, "model", &f).unwrap();
    let g = ModelStore::read(&storage, "model").unwrap();
    assert_same_model(&f, &g);

    let index = SparseIndexBuilder::new(2, 2)
        .document(&[(0, 0.3), (1, 0.7)], &[1])
        .document(&[], &[0])
        .build();
    for doc in 0..2 {
        let expect = f.scores(&index, doc);
        let result = g.scores(&index, doc);
        assert_eq!(expect, result, "expected {expect:?}, got {result:?}.");
    }
}


#[test]
fn file_round_trip_of_a_trained_model() {
    let index = three_category_index();
    let disc = EqualWidth::new(4).discretize(&index).unwrap();
    let f = AdaBoostMH::init(&index, disc)
        .rounds(5)
        .run(&PivotSearch::new())
        .unwrap();

    let dir = tempfile::tempdir().unwrap();
    let storage = FileStorage::new(dir.path());
    ModelStore::write(&storage, "trained", &f).unwrap();

    assert!(storage.exists(&ModelStore::header_resource("trained")));
    assert!(storage.exists(&ModelStore::discretization_resource("trained")));
    for cat in 0..3 {
        assert!(storage.exists(&ModelStore::category_resource("trained", cat)));
    }

    let g = ModelStore::read(&storage, "trained").unwrap();
    assert_same_model(&f, &g);
    for doc in 0..index.n_documents() {
        let expect = f.scores(&index, doc);
        let result = g.scores(&index, doc);
        assert_eq!(expect, result, "expected {expect:?}, got {result:?}.");
    }
}


#[test]
fn truncated_category_loads_absent_rounds() {
    let f = small_classifier();
    let storage = MemoryStorage::new();
    ModelStore::write(&storage, "model", &f).unwrap();

    // Keep the round count and half of the first hypothesis.
    let name = ModelStore::category_resource("model", 0);
    let bytes = storage.get(&name).unwrap();
    storage.put(&name, bytes[..10].to_vec());

    let g = ModelStore::read(&storage, "model").unwrap();
    assert_eq!(g.n_rounds(), 2);
    for h in g.hypotheses(0) {
        assert!(h.is_absent());
        assert_eq!(h.c1().len(), 2);
    }
    let expect = f.hypotheses(1).cloned().collect::<Vec<_>>();
    let result = g.hypotheses(1).cloned().collect::<Vec<_>>();
    assert_eq!(expect, result);
}


#[test]
fn corrupted_header_is_rejected() {
    let f = small_classifier();
    let storage = MemoryStorage::new();
    ModelStore::write(&storage, "model", &f).unwrap();

    let name = ModelStore::header_resource("model");
    let mut bytes = storage.get(&name).unwrap();
    bytes[0] = b'X';
    storage.put(&name, bytes);

    let result = ModelStore::read(&storage, "model");
    assert!(matches!(result, Err(TextBoostError::InvalidModel { .. })));
}


#[test]
fn missing_category_is_an_error() {
    let f = small_classifier();
    let storage = MemoryStorage::new();
    ModelStore::write(&storage, "model", &f).unwrap();
    storage.remove(&ModelStore::category_resource("model", 1));

    assert!(ModelStore::read(&storage, "model").is_err());
}


#[test]
fn customizer_round_trip() {
    let storage = MemoryStorage::new();
    let customizer = ClassifierCustomizer::new()
        .max_iterations(1)
        .grouped(true);

    ModelStore::write_customizer(&storage, "model", &customizer).unwrap();
    let result = ModelStore::read_customizer(&storage, "model").unwrap();
    assert_eq!(customizer, result);
}


fn set_u32(storage: &MemoryStorage, resource: &str, at: usize, value: u32) {
    let mut bytes = storage.get(resource).unwrap();
    bytes[at..at + 4].copy_from_slice(&value.to_le_bytes());
    storage.put(resource, bytes);
}


fn is_load_error<T>(result: &Result<T, TextBoostError>) -> bool {
    matches!(
        result,
        Err(TextBoostError::InvalidModel { .. } | TextBoostError::Io(_))
    )
}


#[test]
fn huge_category_count_is_an_error() {
    let storage = MemoryStorage::new();
    ModelStore::write(&storage, "model", &small_classifier()).unwrap();
    // magic (4) + version (1), then the category count.
    set_u32(&storage, &ModelStore::header_resource("model"), 5, u32::MAX);

    let result = ModelStore::read(&storage, "model");
    assert!(is_load_error(&result), "expected a load error, got {:?}.", result.err());
}


#[test]
fn huge_feature_count_is_an_error() {
    let storage = MemoryStorage::new();
    ModelStore::write(&storage, "model", &small_classifier()).unwrap();
    set_u32(&storage, &ModelStore::discretization_resource("model"), 0, u32::MAX);

    let result = ModelStore::read(&storage, "model");
    assert!(
        matches!(result, Err(TextBoostError::InvalidModel { .. })),
        "expected an invalid model, got {:?}.", result.err()
    );
}


#[test]
fn huge_bin_count_is_an_error() {
    let storage = MemoryStorage::new();
    ModelStore::write(&storage, "model", &small_classifier()).unwrap();
    // Bin count of feature 0.
    set_u32(&storage, &ModelStore::discretization_resource("model"), 4, u32::MAX);

    let result = ModelStore::read(&storage, "model");
    assert!(is_load_error(&result), "expected a load error, got {:?}.", result.err());
}


#[test]
fn huge_round_count_is_an_error() {
    let storage = MemoryStorage::new();
    ModelStore::write(&storage, "model", &small_classifier()).unwrap();
    let name = ModelStore::discretization_resource("model");
    let at = storage.get(&name).unwrap().len() - 4;
    set_u32(&storage, &name, at, u32::MAX);

    let result = ModelStore::read(&storage, "model");
    assert!(
        matches!(result, Err(TextBoostError::InvalidModel { .. })),
        "expected an invalid model, got {:?}.", result.err()
    );
}


#[test]
fn rounds_beyond_the_model_count_are_ignored() {
    let f = small_classifier();
    let storage = MemoryStorage::new();
    ModelStore::write(&storage, "model", &f).unwrap();

    // Both category streams still hold two rounds.
    let name = ModelStore::discretization_resource("model");
    let at = storage.get(&name).unwrap().len() - 4;
    set_u32(&storage, &name, at, 1);

    let g = ModelStore::read(&storage, "model").unwrap();
    assert_eq!(g.n_rounds(), 1);
    assert_eq!(g.rounds(), &f.rounds()[..1]);
}
