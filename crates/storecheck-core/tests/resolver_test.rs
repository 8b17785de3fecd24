use storecheck_core::{
    ElementHandle, MatchRule, MemoryDocument, Resolution, ResolutionError, resolve, resolve_with,
};

fn products_page() -> MemoryDocument {
    MemoryDocument::new().with_count(".product-item", "div", 3)
}

#[tokio::test]
async fn test_single_matching_candidate_is_chosen() {
    let doc = products_page();
    let snapshot = doc.snapshot();

    let res = resolve(&[".product-card", ".product-item", ".product"], &snapshot, 1)
        .await
        .unwrap();

    assert_eq!(res.selector(), Some(".product-item"));
    assert_eq!(res.count, 3);
    assert_eq!(res.elements.len(), 3);
    let indexes: Vec<usize> = res.elements.iter().map(|el| el.index).collect();
    assert_eq!(indexes, vec![0, 1, 2]);
}

#[tokio::test]
async fn test_first_qualifying_candidate_wins_over_larger_match() {
    let doc = MemoryDocument::new()
        .with_count("[data-product]", "div", 1)
        .with_count(".product", "div", 12);
    let snapshot = doc.snapshot();

    let res = resolve(&["[data-product]", ".product"], &snapshot, 1)
        .await
        .unwrap();

    assert_eq!(res.selector(), Some("[data-product]"));
    assert_eq!(res.count, 1);
}

#[tokio::test]
async fn test_no_match_is_not_an_error() {
    let doc = products_page();
    let snapshot = doc.snapshot();

    let res = resolve(&["#nonexistent", ".also-missing"], &snapshot, 1)
        .await
        .unwrap();

    assert_eq!(res, Resolution::none());
    assert_eq!(res.selector(), None);
    assert_eq!(res.count, 0);
    assert!(!res.is_match());
}

#[tokio::test]
async fn test_min_matches_zero_returns_first_candidate() {
    let doc = products_page();
    let snapshot = doc.snapshot();

    let res = resolve(&["#nonexistent", ".product-item"], &snapshot, 0)
        .await
        .unwrap();

    assert_eq!(res.selector(), Some("#nonexistent"));
    assert_eq!(res.count, 0);
    assert!(res.elements.is_empty());
}

#[tokio::test]
async fn test_min_matches_above_one_skips_thin_candidates() {
    let doc = MemoryDocument::new()
        .with_count(".card", "div", 1)
        .with_count(".product-item", "div", 3);
    let snapshot = doc.snapshot();

    let res = resolve(&[".card", ".product-item"], &snapshot, 2)
        .await
        .unwrap();

    assert_eq!(res.selector(), Some(".product-item"));
    assert_eq!(res.count, 3);
}

#[tokio::test]
async fn test_exactly_rule_skips_ambiguous_candidate() {
    let doc = MemoryDocument::new()
        .with_count(r#"select[name*="sort_by"]"#, "select", 2)
        .with_count(".facets select", "select", 1);
    let snapshot = doc.snapshot();

    let res = resolve_with(
        &[r#"select[name*="sort_by"]"#, ".facets select"],
        &snapshot,
        MatchRule::Exactly(1),
    )
    .await
    .unwrap();

    assert_eq!(res.selector(), Some(".facets select"));
    assert_eq!(res.count, 1);
}

#[tokio::test]
async fn test_repeated_resolution_is_identical() {
    let doc = MemoryDocument::new().with(
        "img",
        vec![
            ElementHandle::new(0, "img").with_attr("alt", "Espresso").visible(),
            ElementHandle::new(0, "img").with_attr("alt", ""),
        ],
    );
    let snapshot = doc.snapshot();
    let candidates = [".product__media img", "img"];

    let first = resolve(&candidates, &snapshot, 1).await.unwrap();
    let second = resolve(&candidates, &snapshot, 1).await.unwrap();

    assert_eq!(first, second);
    assert_eq!(first.elements[1].index, 1);
}

#[tokio::test]
async fn test_stale_snapshot_fails_with_document_unavailable() {
    let mut doc = products_page();
    let snapshot = doc.snapshot();
    doc.navigate(MemoryDocument::new().with_count(".product-item", "div", 1));

    assert!(snapshot.is_stale());
    let err = resolve(&[".product-item"], &snapshot, 1).await.unwrap_err();
    assert!(matches!(err, ResolutionError::DocumentUnavailable { .. }));
    assert_eq!(err.code(), "DOCUMENT_UNAVAILABLE");
    assert!(err.is_retryable());

    let fresh = doc.snapshot();
    let res = resolve(&[".product-item"], &fresh, 1).await.unwrap();
    assert_eq!(res.count, 1);
}

#[tokio::test]
async fn test_invalid_selector_propagates() {
    let doc = MemoryDocument::new()
        .with_count(".product", "div", 2)
        .reject("div[[");
    let snapshot = doc.snapshot();

    let err = resolve(&["div[[", ".product"], &snapshot, 1)
        .await
        .unwrap_err();
    assert_eq!(
        err,
        ResolutionError::InvalidSelectorSyntax {
            selector: "div[[".to_string()
        }
    );
    assert!(!err.is_retryable());
}

#[tokio::test]
async fn test_invalid_selector_after_a_match_is_never_queried() {
    let doc = MemoryDocument::new()
        .with_count(".product", "div", 2)
        .reject("div[[");
    let snapshot = doc.snapshot();

    let res = resolve(&[".product", "div[["], &snapshot, 1).await.unwrap();
    assert_eq!(res.selector(), Some(".product"));
}

#[tokio::test]
async fn test_empty_candidate_list_is_rejected() {
    let doc = products_page();
    let snapshot = doc.snapshot();

    let err = resolve(&[], &snapshot, 1).await.unwrap_err();
    assert_eq!(err, ResolutionError::NoCandidates);
}
