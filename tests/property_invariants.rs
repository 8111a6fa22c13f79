use proptest::prelude::*;

use catalogd::{
    book::BookDraft,
    core::MemoryBookStore,
    persist::BookStore,
    service::CatalogService,
    validate::{self, RuleSet, ValidationError},
};

fn valid_draft_strategy() -> impl Strategy<Value = BookDraft> {
    (
        "[A-Za-z]{1,16}",
        "[A-Za-z]{1,12}",
        prop_oneof!["[0-9]{10}", "[0-9]{13}"],
        prop::option::of(1000..=2030i32),
        prop::option::of(0.0..500.0f64),
    )
        .prop_map(|(title, author, isbn, publication_year, price)| BookDraft {
            title,
            author,
            isbn,
            publication_year,
            price,
        })
}

proptest! {
    #[test]
    fn standard_rule_set_accepts_all_valid_drafts(draft in valid_draft_strategy()) {
        prop_assert_eq!(validate::validate(RuleSet::Standard, &draft), Ok(()));
    }

    #[test]
    fn out_of_range_years_are_rejected(
        draft in valid_draft_strategy(),
        year in prop_oneof![-4000..1000i32, 2031..9999i32],
    ) {
        let mut draft = draft;
        draft.publication_year = Some(year);
        prop_assert_eq!(
            validate::validate(RuleSet::Standard, &draft),
            Err(ValidationError::YearOutOfRange(year))
        );
    }

    #[test]
    fn empty_title_wins_over_any_other_violation(
        draft in valid_draft_strategy(),
        bad_isbn in "[0-9]{1,6}",
    ) {
        let mut draft = draft;
        draft.title = "   ".to_string();
        draft.isbn = bad_isbn;
        draft.price = Some(-1.0);
        prop_assert_eq!(
            validate::validate(RuleSet::Standard, &draft),
            Err(ValidationError::EmptyTitle)
        );
    }

    #[test]
    fn memory_indices_agree_with_full_scans(
        drafts in prop::collection::vec(valid_draft_strategy(), 1..40),
        author_idx in 0usize..40,
        term in "[A-Za-z]{1,3}",
    ) {
        let mut store = MemoryBookStore::new();
        for draft in &drafts {
            store.insert(draft).unwrap();
        }
        let all = store.find_all().unwrap();

        let author = &drafts[author_idx % drafts.len()].author;
        let by_index: Vec<_> = store.find_by_author(author).unwrap().into_iter().map(|b| b.id).collect();
        let by_scan: Vec<_> = all.iter().filter(|b| &b.author == author).map(|b| b.id).collect();
        prop_assert_eq!(by_index, by_scan);

        let needle = term.to_lowercase();
        let by_title: Vec<_> = store.find_by_title(&term).unwrap().into_iter().map(|b| b.id).collect();
        let title_scan: Vec<_> = all
            .iter()
            .filter(|b| b.title.to_lowercase().contains(&needle))
            .map(|b| b.id)
            .collect();
        prop_assert_eq!(by_title, title_scan);
    }

    #[test]
    fn isbn_search_returns_at_most_one_matching_record(
        drafts in prop::collection::vec(valid_draft_strategy(), 1..30),
        probe_idx in 0usize..30,
    ) {
        let mut store = MemoryBookStore::new();
        for draft in &drafts {
            store.insert(draft).unwrap();
        }

        let isbn = &drafts[probe_idx % drafts.len()].isbn;
        let hit = store.find_by_isbn(isbn).unwrap();
        match hit {
            Some(book) => prop_assert_eq!(&book.isbn, isbn),
            None => prop_assert!(false, "inserted isbn must be found"),
        }
    }

    #[test]
    fn create_undo_sequences_track_a_model_stack(
        actions in prop::collection::vec(
            prop_oneof![
                valid_draft_strategy().prop_map(Some),
                Just(None),
            ],
            1..60,
        ),
    ) {
        let mut catalog = CatalogService::new(Box::new(MemoryBookStore::new()));
        let mut model: Vec<String> = Vec::new();

        for action in actions {
            match action {
                Some(draft) => {
                    let title = draft.title.clone();
                    catalog.create(draft).unwrap();
                    model.push(title);
                }
                None => {
                    catalog.undo_last().unwrap();
                    model.pop();
                }
            }

            prop_assert_eq!(catalog.history().len(), model.len());
            let titles: Vec<String> = catalog
                .all_books()
                .unwrap()
                .into_iter()
                .map(|b| b.title)
                .collect();
            prop_assert_eq!(&titles, &model);
        }

        while !model.is_empty() {
            catalog.undo_last().unwrap();
            model.pop();
        }
        prop_assert!(catalog.all_books().unwrap().is_empty());
    }
}
