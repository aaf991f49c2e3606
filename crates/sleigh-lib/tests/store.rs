use sleigh_lib::{Behavior, Coordinates, Error, Store};

fn coords(lat: f64, lon: f64) -> Coordinates {
    Coordinates { lat, lon }
}

fn fixture_store() -> Store {
    Store::open_in_memory().expect("in-memory store")
}

#[test]
fn create_location_starts_with_zero_good_children() {
    let mut store = fixture_store();
    let location = store.create_location("Madrid", coords(40.4, -3.7)).unwrap();

    assert_eq!(location.good_children, 0);
    assert!(!location.id.is_empty());

    let fetched = store.location(&location.id).unwrap().unwrap();
    assert_eq!(fetched, location);
}

#[test]
fn duplicate_location_name_is_rejected_without_inserting() {
    let mut store = fixture_store();
    store.create_location("Madrid", coords(40.4, -3.7)).unwrap();

    let err = store
        .create_location("Madrid", coords(0.0, 0.0))
        .unwrap_err();
    assert!(matches!(err, Error::DuplicateLocation { .. }));
    assert_eq!(store.location_count().unwrap(), 1);
}

#[test]
fn location_names_are_case_sensitive() {
    let mut store = fixture_store();
    store.create_location("Madrid", coords(40.4, -3.7)).unwrap();

    // A different casing is a different name.
    assert!(store.create_location("madrid", coords(40.4, -3.7)).is_ok());
    assert_eq!(store.location_count().unwrap(), 2);
}

#[test]
fn good_child_increments_only_its_location() {
    let mut store = fixture_store();
    let madrid = store.create_location("Madrid", coords(40.4, -3.7)).unwrap();
    let bogota = store.create_location("Bogota", coords(4.7, -74.1)).unwrap();

    store
        .register_child("Ana", Behavior::Good, &madrid.id)
        .unwrap();

    let madrid = store.location(&madrid.id).unwrap().unwrap();
    let bogota = store.location(&bogota.id).unwrap().unwrap();
    assert_eq!(madrid.good_children, 1);
    assert_eq!(bogota.good_children, 0);
}

#[test]
fn bad_child_does_not_touch_good_count() {
    let mut store = fixture_store();
    let madrid = store.create_location("Madrid", coords(40.4, -3.7)).unwrap();

    store
        .register_child("Luis", Behavior::Bad, &madrid.id)
        .unwrap();

    let madrid = store.location(&madrid.id).unwrap().unwrap();
    assert_eq!(madrid.good_children, 0);
}

#[test]
fn child_with_unknown_location_is_rejected_without_inserting() {
    let mut store = fixture_store();

    let err = store
        .register_child("Ana", Behavior::Good, "no-such-id")
        .unwrap_err();
    assert!(matches!(err, Error::UnknownLocation { .. }));
    assert_eq!(store.child_count().unwrap(), 0);
}

#[test]
fn duplicate_child_name_is_rejected_without_inserting() {
    let mut store = fixture_store();
    let madrid = store.create_location("Madrid", coords(40.4, -3.7)).unwrap();

    store
        .register_child("Ana", Behavior::Good, &madrid.id)
        .unwrap();
    let err = store
        .register_child("Ana", Behavior::Bad, &madrid.id)
        .unwrap_err();

    assert!(matches!(err, Error::DuplicateChild { .. }));
    assert_eq!(store.child_count().unwrap(), 1);

    // The failed registration must not have bumped the counter either.
    let madrid = store.location(&madrid.id).unwrap().unwrap();
    assert_eq!(madrid.good_children, 1);
}

#[test]
fn children_are_filtered_by_behavior() {
    let mut store = fixture_store();
    let madrid = store.create_location("Madrid", coords(40.4, -3.7)).unwrap();

    store
        .register_child("Ana", Behavior::Good, &madrid.id)
        .unwrap();
    store
        .register_child("Luis", Behavior::Bad, &madrid.id)
        .unwrap();
    store
        .register_child("Carmen", Behavior::Good, &madrid.id)
        .unwrap();

    let good = store.children_with_behavior(Behavior::Good).unwrap();
    let bad = store.children_with_behavior(Behavior::Bad).unwrap();

    assert_eq!(
        good.iter().map(|c| c.name.as_str()).collect::<Vec<_>>(),
        vec!["Ana", "Carmen"]
    );
    assert_eq!(
        bad.iter().map(|c| c.name.as_str()).collect::<Vec<_>>(),
        vec!["Luis"]
    );
}

#[test]
fn locations_rank_by_good_count_descending() {
    let mut store = fixture_store();
    let quiet = store.create_location("Quiet", coords(0.0, 0.0)).unwrap();
    let busy = store.create_location("Busy", coords(0.0, 1.0)).unwrap();
    let middling = store.create_location("Middling", coords(0.0, 2.0)).unwrap();

    for name in ["Ana", "Luis", "Carmen"] {
        store.register_child(name, Behavior::Good, &busy.id).unwrap();
    }
    store
        .register_child("Pedro", Behavior::Good, &middling.id)
        .unwrap();

    let ranked = store.locations_by_good_count().unwrap();
    let names: Vec<_> = ranked.iter().map(|l| l.name.as_str()).collect();
    assert_eq!(names, vec!["Busy", "Middling", "Quiet"]);

    let counts: Vec<_> = ranked.iter().map(|l| l.good_children).collect();
    assert_eq!(counts, vec![3, 1, 0]);
    let _ = quiet;
}

#[test]
fn ranking_is_non_increasing_with_ties() {
    let mut store = fixture_store();
    for name in ["A", "B", "C", "D"] {
        store.create_location(name, coords(0.0, 0.0)).unwrap();
    }

    let ranked = store.locations_by_good_count().unwrap();
    assert_eq!(ranked.len(), 4);
    for pair in ranked.windows(2) {
        assert!(pair[0].good_children >= pair[1].good_children);
    }
}

#[test]
fn empty_store_returns_empty_collections() {
    let store = fixture_store();
    assert!(store.locations_by_good_count().unwrap().is_empty());
    assert!(store
        .children_with_behavior(Behavior::Good)
        .unwrap()
        .is_empty());
}

#[test]
fn store_persists_across_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("registry.db");

    {
        let mut store = Store::open(&path).unwrap();
        let madrid = store.create_location("Madrid", coords(40.4, -3.7)).unwrap();
        store
            .register_child("Ana", Behavior::Good, &madrid.id)
            .unwrap();
    }

    let store = Store::open(&path).unwrap();
    assert_eq!(store.location_count().unwrap(), 1);
    assert_eq!(store.child_count().unwrap(), 1);
    let madrid = store.location_by_name("Madrid").unwrap().unwrap();
    assert_eq!(madrid.good_children, 1);
}
