//! Element queries

use markq::{
    class_predicate, get_all, get_first, load_html, Document, ParseOptions, QueryError,
    QueryTarget, XPathError, XPathIndex,
};

fn load(html: &str) -> Document {
    load_html(html, ParseOptions::NO_BLANKS, Some("UTF-8")).unwrap()
}

fn sample() -> Document {
    load(
        r#"<!DOCTYPE html>
        <html><body>
          <div id="main" class="bar foo baz">
            <p id="first">one</p>
            <p>two</p>
          </div>
          <div id="solo" class="foo"><p>three</p></div>
          <div id="other" class="foobar"></div>
        </body></html>"#,
    )
}

// ============================================================================
// Not-found semantics
// ============================================================================

#[test]
fn test_no_matches_is_not_found_for_both() {
    let doc = sample();
    assert!(matches!(
        get_first(&doc, "//nonexistent", None),
        Err(QueryError::ElementNotFound { .. })
    ));
    assert!(matches!(
        get_all(&doc, "//nonexistent", None),
        Err(QueryError::ElementNotFound { .. })
    ));
}

#[test]
fn test_not_found_message_names_query() {
    let doc = sample();
    let err = get_first(&doc, "//table", None).unwrap_err();
    assert!(err.to_string().contains("//table"));
}

#[test]
fn test_attribute_only_matches_asymmetry() {
    let doc = sample();

    // getFirst treats an element-less match set as failure...
    let first = get_first(&doc, "//@id", None);
    assert!(matches!(first, Err(QueryError::NoElementMatches { .. })));
    assert!(first.unwrap_err().is_not_found());

    // ...while getAll returns an empty list for the same query
    let all = get_all(&doc, "//@id", None).unwrap();
    assert!(all.is_empty());
}

#[test]
fn test_text_matches_are_filtered() {
    let doc = sample();
    let mixed = get_all(&doc, "//p/text() | //p", None).unwrap();
    assert_eq!(mixed.len(), 3);
    assert!(mixed.iter().all(|e| e.tag_name() == "p"));
}

// ============================================================================
// Results
// ============================================================================

#[test]
fn test_results_in_document_order() {
    let doc = sample();
    let texts: Vec<_> = get_all(&doc, "//p", None)
        .unwrap()
        .iter()
        .map(|p| p.text_content())
        .collect();
    assert_eq!(texts, ["one", "two", "three"]);
    assert_eq!(get_first(&doc, "//p", None).unwrap().attr("id"), Some("first"));
}

#[test]
fn test_prebuilt_index_is_reused() {
    let doc = sample();
    let index = XPathIndex::new(&doc);
    for _ in 0..3 {
        assert_eq!(get_all(&index, "//div", None).unwrap().len(), 3);
    }
    assert_eq!(index.cached_expressions(), 1);
}

#[test]
fn test_expression_errors_surface() {
    let doc = sample();
    assert!(matches!(
        get_all(&doc, "//p[", None),
        Err(QueryError::Query(XPathError::Compile(_)))
    ));
    assert!(matches!(
        get_first(&doc, "count(//p)", None),
        Err(QueryError::Query(XPathError::NotANodeSet))
    ));
}

// ============================================================================
// Context resolution
// ============================================================================

#[test]
fn test_document_target_with_context() {
    let doc = sample();
    let solo = get_first(&doc, "//div[@id='solo']", None).unwrap();
    let inner = get_all(&doc, ".//p", Some(solo.as_node())).unwrap();
    assert_eq!(inner.len(), 1);
    assert_eq!(inner[0].text_content(), "three");
}

#[test]
fn test_index_target_with_context() {
    let doc = sample();
    let index = XPathIndex::new(&doc);
    let main = get_first(&index, "//div[@id='main']", None).unwrap();
    assert_eq!(get_all(&index, "p", Some(main.as_node())).unwrap().len(), 2);
    // No context: relative paths start at the document node
    assert!(get_all(&index, "p", None).is_err());
}

#[test]
fn test_node_target_forces_context() {
    let doc = sample();
    let main = get_first(&doc, "//div[@id='main']", None).unwrap();
    let solo = get_first(&doc, "//div[@id='solo']", None).unwrap();

    let without = get_all(main, "p", None).unwrap();
    let with_other = get_all(main, "p", Some(solo.as_node())).unwrap();
    assert_eq!(without.len(), 2);
    assert_eq!(without, with_other);
    assert_eq!(get_first(QueryTarget::Node(main.as_node()), "p", None).unwrap().attr("id"), Some("first"));
}

#[test]
fn test_context_from_other_document_rejected() {
    let doc = sample();
    let other = load("<p>elsewhere</p>");
    let foreign = get_first(&other, "//p", None).unwrap();
    assert!(matches!(
        get_all(&doc, "p", Some(foreign.as_node())),
        Err(QueryError::InvalidArgument(_))
    ));
}

// ============================================================================
// Class predicate
// ============================================================================

#[test]
fn test_class_predicate_matches_whole_tokens() {
    let doc = sample();
    let query = format!("//div[{}]", class_predicate("foo"));
    let ids: Vec<_> = get_all(&doc, &query, None)
        .unwrap()
        .iter()
        .filter_map(|div| div.attr("id"))
        .collect();
    assert_eq!(ids, ["main", "solo"]);
}

#[test]
fn test_class_predicate_tolerates_whitespace() {
    let doc = load("<span class=\"  a\n\tb  \">x</span>");
    let query = format!("//span[{}]", class_predicate("b"));
    assert!(get_first(&doc, &query, None).is_ok());
}

#[test]
fn test_class_predicate_is_not_escaped() {
    assert_eq!(
        class_predicate("it's"),
        "contains(concat(' ', normalize-space(@class), ' '), ' it's ')"
    );
    let doc = sample();
    let query = format!("//div[{}]", class_predicate("it's"));
    assert!(matches!(
        get_all(&doc, &query, None),
        Err(QueryError::Query(XPathError::Compile(_)))
    ));
}
