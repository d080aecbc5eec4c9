use std::collections::BTreeSet;

use lexigraph::memory::{SnapshotLoader, SnapshotWriter};
use lexigraph::{
    describe_phrase, ConceptId, ConceptStore, ConceptType, GraphError, PhraseSegmenter,
    RelationKind, RelationResolver,
};

fn dog_and_animal() -> ConceptStore {
    let mut store = ConceptStore::new();
    store.create_concept("dog", ConceptType::Noun).unwrap();
    store.create_concept("animal", ConceptType::Noun).unwrap();
    store
        .add_relation(ConceptId(1), RelationKind::Superset, &["animal"])
        .unwrap();
    store
}

#[test]
fn describing_dog_does_not_expand_superset() {
    let store = dog_and_animal();

    let segments = PhraseSegmenter::new(&store).segment("dog").unwrap();
    assert_eq!(segments.len(), 1);
    assert_eq!(segments[0].id, ConceptId(1));

    let described = describe_phrase(&store, "dog").unwrap();
    let ids: Vec<_> = described.iter().map(|concept| concept.id).collect();
    assert_eq!(ids, vec![ConceptId(1)]);
}

#[test]
fn describing_unknown_word_reports_it() {
    let store = dog_and_animal();
    assert_eq!(
        describe_phrase(&store, "cat").unwrap_err(),
        GraphError::UnmatchedPhrase {
            remainder: "cat".into()
        }
    );
}

#[test]
fn later_match_does_not_rescue_unmatched_leading_word() {
    let store = dog_and_animal();
    assert_eq!(
        PhraseSegmenter::new(&store).segment("cat dog").unwrap_err(),
        GraphError::UnmatchedPhrase {
            remainder: "cat dog".into()
        }
    );
}

#[test]
fn graph_with_cycles_survives_persistence_and_resolution() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("graph.json");

    let mut store = ConceptStore::new();
    for name in ["pets", "dogs", "cats", "strays", "fido", "rex", "tom"] {
        store.create_concept(name, ConceptType::Noun).unwrap();
    }
    // pets = union(dog, cat); dogs = union(fido, rex); cats = union(tom, pets)
    store
        .add_relation(ConceptId(1), RelationKind::Union, &["dog", "cat"])
        .unwrap();
    store
        .add_relation(ConceptId(2), RelationKind::Union, &["fido", "rex"])
        .unwrap();
    store
        .add_relation(ConceptId(3), RelationKind::Union, &["tom", "pet"])
        .unwrap();
    // strays = example(dogs, cats)
    store
        .add_relation(ConceptId(4), RelationKind::Example, &["dogs", "cats"])
        .unwrap();

    SnapshotWriter::save_to_path(&path, &store).unwrap();
    let restored = SnapshotLoader::load_store(&path).unwrap();
    assert_eq!(restored, store);

    let resolver = RelationResolver::new(&restored);
    let pets = resolver.resolve(ConceptId(1));
    // cats revisits pets while pets is in progress, which contributes nothing.
    assert_eq!(
        pets,
        BTreeSet::from([ConceptId(5), ConceptId(6), ConceptId(7)])
    );
    assert_eq!(
        resolver.resolve(ConceptId(3)),
        BTreeSet::from([ConceptId(5), ConceptId(6), ConceptId(7)])
    );
    // dogs and cats resolve to {fido, rex} and {tom, fido, rex}.
    assert_eq!(
        resolver.resolve(ConceptId(4)),
        BTreeSet::from([ConceptId(5), ConceptId(6)])
    );
}

#[test]
fn failed_relation_leaves_owner_unchanged() {
    let mut store = dog_and_animal();
    let before = store.get(ConceptId(1)).unwrap().relations.len();
    let err = store
        .add_relation(ConceptId(1), RelationKind::Union, &["animal", "cat"])
        .unwrap_err();
    assert!(matches!(err, GraphError::UnknownConcept { .. }));
    assert_eq!(store.get(ConceptId(1)).unwrap().relations.len(), before);
}
