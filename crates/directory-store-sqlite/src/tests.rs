//! Integration tests for `SqliteStore` against an in-memory database.

use directory_core::{
  message::ContactInput,
  query::SupplierQuery,
  store::SupplierStore,
  supplier::{DEFAULT_RATING, NewSupplier, SupplierInput},
};

use crate::{Error, SqliteStore, seed::sample_suppliers};

async fn store() -> SqliteStore {
  SqliteStore::open_in_memory()
    .await
    .expect("in-memory store")
}

async fn seeded() -> SqliteStore {
  let s = store().await;
  s.seed_if_empty(&sample_suppliers()).await.unwrap();
  s
}

fn names(suppliers: &[directory_core::supplier::Supplier]) -> Vec<&str> {
  suppliers.iter().map(|s| s.name.as_str()).collect()
}

// ─── Create / get ────────────────────────────────────────────────────────────

#[tokio::test]
async fn create_applies_defaults() {
  let s = store().await;
  let input = SupplierInput {
    name: Some("Apex Electronics".into()),
    ..Default::default()
  };

  let created = s.create_supplier(input.validate().unwrap()).await.unwrap();
  let fetched = s.get_supplier(created.id).await.unwrap().unwrap();

  assert_eq!(fetched.rating, DEFAULT_RATING);
  assert_eq!(fetched.products, "");
  assert_eq!(fetched.notes, "");
  assert!(fetched.category.is_none());
}

#[tokio::test]
async fn create_then_get_roundtrips_every_field() {
  let s = store().await;
  let input = sample_suppliers().remove(0);

  let created = s.create_supplier(input.clone()).await.unwrap();
  let fetched = s.get_supplier(created.id).await.unwrap().unwrap();

  assert_eq!(fetched, created);
  assert_eq!(fetched.name, input.name);
  assert_eq!(fetched.category, input.category);
  assert_eq!(fetched.email, input.email);
  assert_eq!(fetched.phone, input.phone);
  assert_eq!(fetched.whatsapp, input.whatsapp);
  assert_eq!(fetched.location, input.location);
  assert_eq!(fetched.rating, input.rating);
  assert_eq!(fetched.products, input.products);
  assert_eq!(fetched.notes, input.notes);
}

#[tokio::test]
async fn ids_are_unique_and_increasing() {
  let s = store().await;
  let a = s.create_supplier(NewSupplier::new("A")).await.unwrap();
  let b = s.create_supplier(NewSupplier::new("B")).await.unwrap();
  assert!(b.id > a.id);
}

#[tokio::test]
async fn get_missing_returns_none() {
  let s = store().await;
  assert!(s.get_supplier(9999).await.unwrap().is_none());
  assert!(!s.supplier_exists(9999).await.unwrap());
}

#[tokio::test]
async fn out_of_range_rating_is_stored_verbatim() {
  let s = store().await;
  let created = s
    .create_supplier(NewSupplier::new("Odd").with_rating(17.25))
    .await
    .unwrap();
  let fetched = s.get_supplier(created.id).await.unwrap().unwrap();
  assert_eq!(fetched.rating, 17.25);
}

// ─── Update ──────────────────────────────────────────────────────────────────

#[tokio::test]
async fn update_replaces_fields_but_keeps_identity() {
  let s = store().await;
  let original = s
    .create_supplier(
      NewSupplier::new("Old Name")
        .with_category("Metals")
        .with_products("Rods")
        .with_rating(3.0),
    )
    .await
    .unwrap();

  let replacement = SupplierInput {
    name: Some("New Name".into()),
    ..Default::default()
  }
  .validate()
  .unwrap();

  let updated = s
    .update_supplier(original.id, replacement)
    .await
    .unwrap()
    .unwrap();

  assert_eq!(updated.id, original.id);
  assert_eq!(updated.created_at, original.created_at);
  assert_eq!(updated.name, "New Name");
  // Full replace: omitted fields fall back to defaults.
  assert!(updated.category.is_none());
  assert_eq!(updated.products, "");
  assert_eq!(updated.rating, DEFAULT_RATING);

  let fetched = s.get_supplier(original.id).await.unwrap().unwrap();
  assert_eq!(fetched, updated);
}

#[tokio::test]
async fn update_missing_returns_none() {
  let s = store().await;
  let result = s
    .update_supplier(42, NewSupplier::new("Ghost"))
    .await
    .unwrap();
  assert!(result.is_none());
  assert_eq!(s.count_suppliers().await.unwrap(), 0);
}

// ─── Delete / cascade ────────────────────────────────────────────────────────

#[tokio::test]
async fn delete_missing_is_not_an_error() {
  let s = store().await;
  assert!(!s.delete_supplier(9999).await.unwrap());
}

#[tokio::test]
async fn delete_cascades_to_messages() {
  let s = store().await;
  let doomed = s.create_supplier(NewSupplier::new("Doomed")).await.unwrap();
  let kept = s.create_supplier(NewSupplier::new("Kept")).await.unwrap();

  for text in ["one", "two"] {
    let input = ContactInput { message: Some(text.into()), ..Default::default() };
    s.record_message(input.for_supplier(doomed.id)).await.unwrap();
  }
  s.record_message(ContactInput::default().for_supplier(kept.id))
    .await
    .unwrap();

  assert!(s.delete_supplier(doomed.id).await.unwrap());

  assert!(s.get_supplier(doomed.id).await.unwrap().is_none());
  assert!(s.list_messages(doomed.id).await.unwrap().is_empty());
  assert_eq!(s.list_messages(kept.id).await.unwrap().len(), 1);
}

// ─── List / filter ───────────────────────────────────────────────────────────

#[tokio::test]
async fn list_orders_by_rating_then_name() {
  let s = store().await;
  for (name, rating) in [("Delta", 4.0), ("alpha", 4.0), ("Bravo", 4.8), ("Charlie", 4.0)] {
    s.create_supplier(NewSupplier::new(name).with_rating(rating))
      .await
      .unwrap();
  }

  let all = s.list_suppliers(&SupplierQuery::default()).await.unwrap();
  // Name order is byte-wise, so lower-case sorts after upper-case.
  assert_eq!(names(&all), ["Bravo", "Charlie", "Delta", "alpha"]);
}

#[tokio::test]
async fn ordering_holds_under_every_filter() {
  let s = seeded().await;
  let queries = [
    SupplierQuery::default(),
    SupplierQuery::search("i"),
    SupplierQuery::category("Metals"),
    SupplierQuery::new(Some("e".into()), Some("Textiles".into())),
  ];
  for q in &queries {
    let rows = s.list_suppliers(q).await.unwrap();
    for pair in rows.windows(2) {
      assert!(
        pair[0].rating > pair[1].rating
          || (pair[0].rating == pair[1].rating && pair[0].name <= pair[1].name),
        "bad order for {q:?}"
      );
    }
  }
}

#[tokio::test]
async fn search_matches_name_substring() {
  let s = store().await;
  s.create_supplier(NewSupplier::new("Apex Electronics").with_category("Electronics"))
    .await
    .unwrap();
  s.create_supplier(NewSupplier::new("Textile House").with_category("Textiles"))
    .await
    .unwrap();

  let rows = s.list_suppliers(&SupplierQuery::search("tex")).await.unwrap();
  assert_eq!(names(&rows), ["Textile House"]);
}

#[tokio::test]
async fn category_filter_is_exact() {
  let s = store().await;
  s.create_supplier(NewSupplier::new("Apex Electronics").with_category("Electronics"))
    .await
    .unwrap();
  s.create_supplier(NewSupplier::new("Textile House").with_category("Textiles"))
    .await
    .unwrap();

  let rows = s
    .list_suppliers(&SupplierQuery::category("Electronics"))
    .await
    .unwrap();
  assert_eq!(names(&rows), ["Apex Electronics"]);

  let rows = s
    .list_suppliers(&SupplierQuery::category("electronics"))
    .await
    .unwrap();
  assert!(rows.is_empty());
}

#[tokio::test]
async fn all_category_with_search_ignores_category() {
  let s = seeded().await;
  let q = SupplierQuery::new(Some("a".into()), Some("All".into()));
  let rows = s.list_suppliers(&q).await.unwrap();

  // Every sample row carries an "a" in name, products or location.
  assert_eq!(rows.len(), 3);
  for r in &rows {
    let haystack = format!(
      "{} {} {}",
      r.name,
      r.products,
      r.location.as_deref().unwrap_or_default()
    )
    .to_lowercase();
    assert!(haystack.contains('a'));
  }
}

#[tokio::test]
async fn search_covers_products_and_location() {
  let s = seeded().await;

  let rows = s.list_suppliers(&SupplierQuery::search("steel")).await.unwrap();
  assert_eq!(names(&rows), ["MetalWorks"]);

  let rows = s.list_suppliers(&SupplierQuery::search("delhi")).await.unwrap();
  assert_eq!(names(&rows), ["Textile House"]);
}

#[tokio::test]
async fn search_is_case_insensitive() {
  let s = seeded().await;
  let rows = s.list_suppliers(&SupplierQuery::search("APEX")).await.unwrap();
  assert_eq!(names(&rows), ["Apex Electronics"]);
}

#[tokio::test]
async fn search_and_category_must_both_match() {
  let s = seeded().await;

  let q = SupplierQuery::new(Some("india".into()), Some("Metals".into()));
  let rows = s.list_suppliers(&q).await.unwrap();
  assert_eq!(names(&rows), ["MetalWorks"]);

  let q = SupplierQuery::new(Some("steel".into()), Some("Textiles".into()));
  assert!(s.list_suppliers(&q).await.unwrap().is_empty());
}

#[tokio::test]
async fn search_treats_wildcards_literally() {
  let s = store().await;
  s.create_supplier(NewSupplier::new("100% Cotton")).await.unwrap();
  s.create_supplier(NewSupplier::new("1000 Threads")).await.unwrap();

  let rows = s.list_suppliers(&SupplierQuery::search("0%")).await.unwrap();
  assert_eq!(names(&rows), ["100% Cotton"]);

  let rows = s.list_suppliers(&SupplierQuery::search("_")).await.unwrap();
  assert!(rows.is_empty());
}

// ─── Messages ────────────────────────────────────────────────────────────────

#[tokio::test]
async fn record_message_stores_values() {
  let s = seeded().await;
  let input = ContactInput {
    method:  Some("whatsapp".into()),
    message: Some("hi".into()),
  };

  let msg = s.record_message(input.for_supplier(1)).await.unwrap();
  let listed = s.list_messages(1).await.unwrap();

  assert_eq!(listed, vec![msg.clone()]);
  assert_eq!(msg.supplier_id, 1);
  assert_eq!(msg.method, "whatsapp");
  assert_eq!(msg.message, "hi");
}

#[tokio::test]
async fn record_message_for_missing_supplier_fails() {
  let s = store().await;
  let result = s
    .record_message(ContactInput::default().for_supplier(9999))
    .await;
  assert!(matches!(result, Err(Error::Database(_))));
  assert!(s.list_messages(9999).await.unwrap().is_empty());
}

#[tokio::test]
async fn messages_are_newest_first() {
  let s = seeded().await;
  for text in ["first", "second", "third"] {
    let input = ContactInput { message: Some(text.into()), ..Default::default() };
    s.record_message(input.for_supplier(2)).await.unwrap();
  }

  let listed = s.list_messages(2).await.unwrap();
  let bodies: Vec<_> = listed.iter().map(|m| m.message.as_str()).collect();
  assert_eq!(bodies, ["third", "second", "first"]);
  assert!(listed.windows(2).all(|w| w[0].created_at >= w[1].created_at));
}

#[tokio::test]
async fn list_messages_for_unknown_supplier_is_empty() {
  let s = store().await;
  assert!(s.list_messages(12345).await.unwrap().is_empty());
}

// ─── Seeding ─────────────────────────────────────────────────────────────────

#[tokio::test]
async fn seed_only_runs_on_empty_table() {
  let s = store().await;
  assert_eq!(s.seed_if_empty(&sample_suppliers()).await.unwrap(), 3);
  assert_eq!(s.seed_if_empty(&sample_suppliers()).await.unwrap(), 0);
  assert_eq!(s.count_suppliers().await.unwrap(), 3);
}

#[tokio::test]
async fn seed_skips_non_empty_table() {
  let s = store().await;
  s.create_supplier(NewSupplier::new("Existing")).await.unwrap();
  assert_eq!(s.seed_if_empty(&sample_suppliers()).await.unwrap(), 0);
  assert_eq!(s.count_suppliers().await.unwrap(), 1);
}

// ─── File-backed lifecycle ───────────────────────────────────────────────────

#[tokio::test]
async fn reopening_a_file_keeps_rows_and_schema() {
  let dir = std::env::temp_dir().join(format!(
    "directory-store-test-{}-{}",
    std::process::id(),
    chrono::Utc::now().timestamp_nanos_opt().unwrap_or_default()
  ));
  std::fs::create_dir_all(&dir).unwrap();
  let path = dir.join("directory.sqlite");

  let first = SqliteStore::open(&path).await.unwrap();
  let created = first.create_supplier(NewSupplier::new("Durable")).await.unwrap();
  first.close().await.unwrap();

  let second = SqliteStore::open(&path).await.unwrap();
  let fetched = second.get_supplier(created.id).await.unwrap().unwrap();
  assert_eq!(fetched.name, "Durable");
  assert_eq!(second.seed_if_empty(&sample_suppliers()).await.unwrap(), 0);
  second.close().await.unwrap();

  std::fs::remove_dir_all(&dir).ok();
}
