//! Search tiers against a small catalog, including the fallback path with a
//! real HTTP embedder that cannot reach its endpoint.

use kleykod_label::LabelError;
use kleykod_label::config::{ModelConfig, RetryPolicy, SearchConfig};
use kleykod_label::search::{
    ModelStatus, ProductCard, SearchError, SearchTier, SemanticSearcher, check_model, fuzzy_search,
};
use pretty_assertions::assert_eq;

fn card(name: &str, article: &str, color: &str) -> ProductCard {
    ProductCard {
        name: name.into(),
        article: article.into(),
        color: color.into(),
        ..Default::default()
    }
}

fn catalog() -> Vec<ProductCard> {
    vec![
        card("Кроссовки беговые", "RUN-01", "синий"),
        card("Кроссовки детские", "KID-05", "красный"),
        card("Ботинки зимние", "BT-22", "чёрный"),
        card("Футболка хлопковая", "TS-100", "белый"),
        card("Шапка вязаная", "HAT-9", "серый"),
    ]
}

fn offline_config() -> SearchConfig {
    SearchConfig {
        model: ModelConfig {
            // nothing listens on the discard port
            endpoint: "http://127.0.0.1:9/v1/embeddings".into(),
            timeout_secs: 2,
            ..Default::default()
        },
        retry: RetryPolicy {
            max_attempts: 1,
            backoff_secs: 0,
        },
        ..Default::default()
    }
}

#[test]
fn test_fuzzy_empty_catalog() {
    let items: Vec<ProductCard> = Vec::new();
    assert_eq!(fuzzy_search(&items, "shoe", 10), Vec::<&ProductCard>::new());
}

#[test]
fn test_fuzzy_matches_any_attribute() {
    let items = catalog();
    // "ё" and "е" match each other; the exact color ranks first
    let by_color = fuzzy_search(&items, "черный", 10);
    assert_eq!(by_color[0].article, "BT-22");

    let by_article = fuzzy_search(&items, "ts-100", 10);
    assert_eq!(by_article[0].name, "Футболка хлопковая");
}

#[tokio::test]
async fn test_unreachable_model_falls_back_to_fuzzy() {
    let searcher = SemanticSearcher::http(offline_config());
    let items = catalog();

    for query in ["кросовки", "зимние ботинки", "шапка", "", "zzzz"] {
        let outcome = searcher.search(&items, query, 3).await;
        let expected = fuzzy_search(&items, query, 3);
        assert_eq!(outcome.tier(), Some(SearchTier::Fuzzy), "query {:?}", query);
        assert_eq!(outcome.items(), Some(expected.as_slice()), "query {:?}", query);
    }

    assert_eq!(searcher.status(), ModelStatus::Failed);
    assert!(!searcher.is_semantic_ready());
    assert!(!searcher.is_semantic_loading());
}

#[tokio::test]
async fn test_model_check_reports_unreachable_endpoint() {
    let err = check_model(offline_config().model).await.unwrap_err();
    assert!(
        matches!(err, LabelError::Search(SearchError::ModelLoad(_))),
        "unexpected error {:?}",
        err
    );
}
