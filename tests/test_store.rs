use std::sync::Arc;

use roster::store::{FileStore, MemoryStore, NewRecord, NumberFilter, QueryFilter, Record, RecordStore};

fn person(first: &str, last: &str) -> NewRecord {
    NewRecord {
        first: first.to_string(),
        last: last.to_string(),
    }
}

fn all() -> QueryFilter {
    QueryFilter::default()
}

#[test]
fn test_memory_store_assigns_sequential_ids() {
    let store = MemoryStore::new();
    assert!(store.is_empty());

    let a = store.append(person("Mick", "Jagger")).unwrap();
    let b = store.append(person("Keith", "Richards")).unwrap();

    assert_eq!(a.id, 1);
    assert_eq!(b.id, 2);
    assert_eq!(store.len(), 2);
}

#[test]
fn test_filter_matching() {
    let store = MemoryStore::new();
    store.append(person("Ann", "Lee")).unwrap();
    store.append(person("Bob", "Lee")).unwrap();
    store.append(person("Ann", "Ray")).unwrap();

    let by_first = QueryFilter {
        first: Some("Ann".to_string()),
        ..QueryFilter::default()
    };
    let ids: Vec<u64> = store.query(&by_first).unwrap().iter().map(|r| r.id).collect();
    assert_eq!(ids, vec![1, 3]);

    let by_both = QueryFilter {
        first: Some("Ann".to_string()),
        last: Some("Lee".to_string()),
        ..QueryFilter::default()
    };
    assert_eq!(store.query(&by_both).unwrap().len(), 1);

    let by_number = QueryFilter {
        number: Some(NumberFilter::Id(2)),
        ..QueryFilter::default()
    };
    assert_eq!(store.query(&by_number).unwrap()[0].first, "Bob");

    let missing = QueryFilter {
        number: Some(NumberFilter::Id(99)),
        ..QueryFilter::default()
    };
    assert!(store.query(&missing).unwrap().is_empty());

    let out_of_range = QueryFilter {
        number: Some(NumberFilter::OutOfRange),
        ..QueryFilter::default()
    };
    assert!(store.query(&out_of_range).unwrap().is_empty());
}

#[test]
fn test_file_store_missing_file_is_empty() {
    let dir = tempfile::tempdir().unwrap();
    let store = FileStore::new(dir.path().join("db.json"));

    assert!(store.query(&all()).unwrap().is_empty());
}

#[test]
fn test_file_store_persists_across_instances() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("db.json");

    {
        let store = FileStore::new(&path);
        store.append(person("Mick", "Jagger")).unwrap();
        store.append(person("Keith", "Richards")).unwrap();
    }

    let store = FileStore::new(&path);
    let records = store.query(&all()).unwrap();
    assert_eq!(
        records,
        vec![
            Record { id: 1, first: "Mick".to_string(), last: "Jagger".to_string() },
            Record { id: 2, first: "Keith".to_string(), last: "Richards".to_string() },
        ]
    );

    let next = store.append(person("Ron", "Wood")).unwrap();
    assert_eq!(next.id, 3);
}

#[test]
fn test_file_store_format() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("db.json");
    let store = FileStore::new(&path);

    store.append(person("Ann", "Lee")).unwrap();

    let raw = std::fs::read_to_string(&path).unwrap();
    let json: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(json, serde_json::json!([{ "number": 1, "first": "Ann", "last": "Lee" }]));
    assert!(!dir.path().join("db.json.tmp").exists());
}

#[test]
fn test_file_store_id_follows_max() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("db.json");
    std::fs::write(&path, r#"[{"number":7,"first":"A","last":"B"},{"number":3,"first":"C","last":"D"}]"#)
        .unwrap();

    let store = FileStore::new(&path);
    let record = store.append(person("E", "F")).unwrap();

    assert_eq!(record.id, 8);
}

#[test]
fn test_file_store_corrupt_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("db.json");
    std::fs::write(&path, "not json").unwrap();
    let store = FileStore::new(&path);

    // Queries degrade to empty, appends refuse to clobber the file
    assert!(store.query(&all()).unwrap().is_empty());
    assert!(store.append(person("A", "B")).is_err());
    assert_eq!(std::fs::read_to_string(&path).unwrap(), "not json");
}

#[test]
fn test_file_store_concurrent_appends_keep_every_record() {
    let dir = tempfile::tempdir().unwrap();
    let store = Arc::new(FileStore::new(dir.path().join("db.json")));

    let handles: Vec<_> = (0..8)
        .map(|i| {
            let store = Arc::clone(&store);
            std::thread::spawn(move || {
                for j in 0..5 {
                    store.append(person(&format!("t{}", i), &format!("n{}", j))).unwrap();
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    let records = store.query(&all()).unwrap();
    let mut ids: Vec<u64> = records.iter().map(|r| r.id).collect();
    ids.sort();
    assert_eq!(ids, (1..=40).collect::<Vec<u64>>());
}
