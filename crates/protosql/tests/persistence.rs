//! End-to-end persistence scenarios against the in-memory engine.

use std::sync::Arc;

use rand::distr::{Alphanumeric, SampleString};
use rand::Rng;

use protosql::InMemoryRepository;
use protosql_core::message::{
    Descriptor, EnumDescriptor, FieldDescriptor, FieldKind, FieldValue, MessageInstance,
    MessageSchema,
};
use protosql_core::storage::Persistence;

const ID_FIELD: &str = "query";

fn search_request_schema() -> Arc<dyn Descriptor> {
    Arc::new(
        MessageSchema::new("domain.SearchRequest")
            .with_field(FieldDescriptor::new("query", FieldKind::String).required())
            .with_field(FieldDescriptor::new("page_number", FieldKind::Int32))
            .with_field(FieldDescriptor::new("result_per_page", FieldKind::Int32))
            .with_field(FieldDescriptor::new(
                "corpus",
                FieldKind::Enum(EnumDescriptor::new(
                    "Corpus",
                    ["UNIVERSAL", "WEB", "IMAGES", "LOCAL", "NEWS", "PRODUCTS", "VIDEO"],
                )),
            )),
    )
}

fn random_request(rng: &mut impl Rng) -> MessageInstance {
    let query = Alphanumeric.sample_string(rng, 16);
    MessageInstance::new(search_request_schema())
        .set("query", query)
        .set("page_number", rng.random_range(0..1000))
        .set("result_per_page", rng.random_range(1..100))
        .set("corpus", FieldValue::Enum("WEB".to_string()))
}

fn count(store: &mut InMemoryRepository) -> usize {
    store
        .select(None, None, &search_request_schema())
        .unwrap()
        .map(|messages| messages.len())
        .unwrap_or(0)
}

#[test]
fn insert_then_select_round_trips_the_message() {
    let mut store = InMemoryRepository::new();
    let request = MessageInstance::new(search_request_schema())
        .set("query", "Test query")
        .set("page_number", 1)
        .set("result_per_page", 20)
        .set("corpus", FieldValue::Enum("UNIVERSAL".to_string()));

    store.insert(&request, ID_FIELD).unwrap();

    let id = FieldValue::String("Test query".to_string());
    let found = store
        .select(Some(ID_FIELD), Some(&id), &search_request_schema())
        .unwrap()
        .unwrap();
    assert_eq!(found, vec![request]);
}

#[test]
fn a_hundred_random_inserts_are_all_retained() {
    let mut rng = rand::rng();
    let mut store = InMemoryRepository::new();
    for _ in 0..100 {
        store.insert(&random_request(&mut rng), ID_FIELD).unwrap();
    }
    assert_eq!(count(&mut store), 100);
}

#[test]
fn deleting_one_by_one_counts_down_to_an_empty_table() {
    let mut rng = rand::rng();
    let mut store = InMemoryRepository::new();
    let requests: Vec<MessageInstance> =
        (0..25).map(|_| random_request(&mut rng)).collect();
    for request in &requests {
        store.insert(request, ID_FIELD).unwrap();
    }

    for (index, request) in requests.iter().enumerate() {
        store.delete(request, ID_FIELD).unwrap();
        assert_eq!(count(&mut store), requests.len() - index - 1);

        let id = request.get(ID_FIELD).unwrap().clone();
        let remaining = store
            .select(Some(ID_FIELD), Some(&id), &search_request_schema())
            .unwrap()
            .unwrap();
        assert!(remaining.is_empty());
    }

    // The table was populated once, so it reads as empty rather than absent.
    assert_eq!(
        store.select(None, None, &search_request_schema()).unwrap(),
        Some(vec![])
    );
}

#[test]
fn delete_with_no_matching_identity_leaves_rows_untouched() {
    let mut rng = rand::rng();
    let mut store = InMemoryRepository::new();
    for _ in 0..10 {
        store.insert(&random_request(&mut rng), ID_FIELD).unwrap();
    }

    let absent = MessageInstance::new(search_request_schema()).set("query", "no such query");
    store.delete(&absent, ID_FIELD).unwrap();
    assert_eq!(count(&mut store), 10);
}

#[test]
fn delete_all_empties_the_table() {
    let mut rng = rand::rng();
    let mut store = InMemoryRepository::new();
    for _ in 0..10 {
        store.insert(&random_request(&mut rng), ID_FIELD).unwrap();
    }

    store.delete_all(&*search_request_schema()).unwrap();
    assert_eq!(
        store.select(None, None, &search_request_schema()).unwrap(),
        Some(vec![])
    );
}

#[test]
fn update_in_place_changes_non_identity_fields() {
    let mut store = InMemoryRepository::new();
    let original = MessageInstance::new(search_request_schema())
        .set("query", "Test query")
        .set("page_number", 1);
    store.insert(&original, ID_FIELD).unwrap();

    let updated = original.clone().set("page_number", 42);
    store.update(&updated, ID_FIELD, None).unwrap();

    let id = FieldValue::String("Test query".to_string());
    let found = store
        .select(Some(ID_FIELD), Some(&id), &search_request_schema())
        .unwrap()
        .unwrap();
    assert_eq!(found, vec![updated]);
}

#[test]
fn update_that_changes_the_identity_uses_the_previous_value() {
    let mut store = InMemoryRepository::new();
    let original = MessageInstance::new(search_request_schema())
        .set("query", "Test query")
        .set("page_number", 1);
    store.insert(&original, ID_FIELD).unwrap();

    let renamed = original.clone().set("query", "NEW QUERY DATA");
    let previous = FieldValue::String("Test query".to_string());
    store
        .update(&renamed, ID_FIELD, Some(&previous))
        .unwrap();

    let new_id = FieldValue::String("NEW QUERY DATA".to_string());
    let found = store
        .select(Some(ID_FIELD), Some(&new_id), &search_request_schema())
        .unwrap()
        .unwrap();
    assert_eq!(found, vec![renamed]);

    let old_id = FieldValue::String("Test query".to_string());
    let stale = store
        .select(Some(ID_FIELD), Some(&old_id), &search_request_schema())
        .unwrap()
        .unwrap();
    assert!(stale.is_empty());
}

#[test]
fn enum_values_survive_storage_by_name() {
    let mut store = InMemoryRepository::new();
    let request = MessageInstance::new(search_request_schema())
        .set("query", "with enum")
        .set("corpus", FieldValue::Enum("PRODUCTS".to_string()));
    store.insert(&request, ID_FIELD).unwrap();

    let id = FieldValue::String("with enum".to_string());
    let found = store
        .select(Some(ID_FIELD), Some(&id), &search_request_schema())
        .unwrap()
        .unwrap();
    assert_eq!(
        found[0].get("corpus"),
        Some(&FieldValue::Enum("PRODUCTS".to_string()))
    );
}
