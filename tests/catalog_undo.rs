use catalogd::{
    book::{BookDraft, BookUpdate},
    core::MemoryBookStore,
    error::CatalogError,
    op::CatalogOp,
    persist::BookStore,
    service::CatalogService,
};

fn catalog() -> CatalogService {
    CatalogService::new(Box::new(MemoryBookStore::new()))
}

fn draft(title: &str, isbn: &str) -> BookDraft {
    BookDraft {
        title: title.to_string(),
        author: "Frank Herbert".to_string(),
        isbn: isbn.to_string(),
        publication_year: Some(1965),
        price: Some(9.99),
    }
}

#[test]
fn create_assigns_monotonic_ids() {
    let mut catalog = catalog();
    let a = catalog.create(draft("Dune", "1111111111")).unwrap();
    let b = catalog.create(draft("Dune Messiah", "2222222222")).unwrap();
    let c = catalog.create(draft("Children of Dune", "3333333333")).unwrap();

    assert_eq!((a.id, b.id, c.id), (1, 2, 3));
    assert_eq!(catalog.history().len(), 3);
}

#[test]
fn undo_removes_most_recent_create_only() {
    let mut catalog = catalog();
    let a = catalog.create(draft("Dune", "1111111111")).unwrap();
    let b = catalog.create(draft("Dune Messiah", "2222222222")).unwrap();
    assert_eq!(catalog.history().len(), 2);

    catalog.undo_last().unwrap();

    assert_eq!(catalog.history(), vec!["Save book: Dune".to_string()]);
    assert!(catalog.book_by_id(a.id).unwrap().is_some());
    assert!(catalog.book_by_id(b.id).unwrap().is_none());
}

#[test]
fn delete_then_undo_restores_fields_under_new_id() {
    let mut catalog = catalog();
    let original = catalog.create(draft("T", "1234567890")).unwrap();

    catalog.delete(original.id).unwrap();
    assert!(catalog.book_by_id(original.id).unwrap().is_none());

    catalog.undo_last().unwrap();

    let books = catalog.all_books().unwrap();
    assert_eq!(books.len(), 1);
    let restored = &books[0];
    assert_eq!(restored.title, "T");
    assert_eq!(restored.author, "Frank Herbert");
    assert_eq!(restored.isbn, "1234567890");
    assert_ne!(restored.id, original.id);
}

#[test]
fn undo_on_empty_log_is_a_noop() {
    let mut catalog = catalog();
    catalog.undo_last().unwrap();
    assert!(catalog.history().is_empty());
    assert!(catalog.all_books().unwrap().is_empty());
}

#[test]
fn failed_delete_never_enters_the_log() {
    let mut catalog = catalog();
    let err = catalog.delete(99).unwrap_err();
    assert!(matches!(err, CatalogError::NotFound(99)));
    assert!(catalog.history().is_empty());
}

#[test]
fn rejected_create_never_enters_the_log() {
    let mut catalog = catalog();
    let err = catalog.create(draft("Dune", "12345")).unwrap_err();
    assert!(matches!(err, CatalogError::Validation(_)));
    assert!(catalog.history().is_empty());
    assert!(catalog.all_books().unwrap().is_empty());
}

#[test]
fn update_bypasses_the_undo_log() {
    let mut catalog = catalog();
    let book = catalog.create(draft("Dune", "1111111111")).unwrap();

    let updated = catalog
        .update(
            book.id,
            BookUpdate {
                title: "Dune (Revised)".to_string(),
                author: "Frank Herbert".to_string(),
                isbn: "1111111111".to_string(),
                publication_year: None,
                price: None,
            },
        )
        .unwrap();
    assert_eq!(updated.title, "Dune (Revised)");
    assert_eq!(updated.publication_year, None);

    // Only the create is in the history; undo removes the book entirely.
    assert_eq!(catalog.history().len(), 1);
    catalog.undo_last().unwrap();
    assert!(catalog.all_books().unwrap().is_empty());
}

#[test]
fn update_of_missing_book_fails() {
    let mut catalog = catalog();
    let err = catalog
        .update(
            5,
            BookUpdate {
                title: "X".to_string(),
                author: "Y".to_string(),
                isbn: "1234567890".to_string(),
                publication_year: None,
                price: None,
            },
        )
        .unwrap_err();
    assert!(matches!(err, CatalogError::NotFound(5)));
}

#[test]
fn history_lists_descriptions_oldest_first() {
    let mut catalog = catalog();
    let a = catalog.create(draft("Dune", "1111111111")).unwrap();
    catalog.delete(a.id).unwrap();

    assert_eq!(
        catalog.history(),
        vec![
            "Save book: Dune".to_string(),
            format!("Delete book with ID: {}", a.id),
        ]
    );
}

#[test]
fn clear_history_discards_without_compensating() {
    let mut catalog = catalog();
    catalog.create(draft("Dune", "1111111111")).unwrap();
    catalog.create(draft("Dune Messiah", "2222222222")).unwrap();

    catalog.clear_history();

    assert!(catalog.history().is_empty());
    assert_eq!(catalog.all_books().unwrap().len(), 2);

    // Nothing left to undo; the books stay.
    catalog.undo_last().unwrap();
    assert_eq!(catalog.all_books().unwrap().len(), 2);
}

#[test]
fn save_undo_deletes_exactly_the_captured_id() {
    let mut store = MemoryBookStore::new();
    let mut op = CatalogOp::save(draft("Dune", "1111111111"));

    let saved_id = op.execute(&mut store).unwrap().unwrap();
    assert!(store.find_by_id(saved_id).unwrap().is_some());

    op.undo(&mut store).unwrap();
    assert!(store.find_by_id(saved_id).unwrap().is_none());

    // Second undo is a safety no-op: the captured id was cleared.
    op.undo(&mut store).unwrap();
    assert!(store.find_all().unwrap().is_empty());
}

#[test]
fn unexecuted_op_undo_is_a_noop() {
    let mut store = MemoryBookStore::new();
    store.insert(&draft("Dune", "1111111111")).unwrap();

    let mut op = CatalogOp::delete(1);
    op.undo(&mut store).unwrap();
    assert_eq!(store.find_all().unwrap().len(), 1);
}
