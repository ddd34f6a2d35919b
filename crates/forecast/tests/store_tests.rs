//! Integration tests for run fallback in the forecast store.

mod common;

use std::sync::Arc;

use common::{catalog, dataset, run};
use forecast::{previous_runs, ForecastConfig, ForecastError, ForecastStore, MemorySource, Product};

fn store(source: Arc<MemorySource>, max_attempts: u32) -> ForecastStore {
    let config = ForecastConfig {
        max_attempts,
        ..ForecastConfig::default()
    };
    ForecastStore::new(source, &config)
}

// =============================================================================
// Fallback Tests
// =============================================================================

#[tokio::test]
async fn test_candidate_published_uses_single_fetch() {
    let source = Arc::new(catalog(&[run(7, 0)]));
    let store = store(source.clone(), 6);

    let (used, dataset) = store
        .fetch_with_fallback(Product::Operational, run(7, 0))
        .await
        .unwrap();

    assert_eq!(used, run(7, 0));
    assert_eq!(dataset.run, run(7, 0));
    assert_eq!(source.attempts(), 1);
}

#[tokio::test]
async fn test_fallback_makes_n_plus_one_attempts() {
    // Candidate and the two runs before it are missing
    let source = Arc::new(catalog(&[run(5, 12)]));
    let store = store(source.clone(), 6);

    let (used, _) = store
        .fetch_with_fallback(Product::Operational, run(7, 0))
        .await
        .unwrap();

    assert_eq!(used, run(5, 12));
    assert_eq!(source.attempts(), 4);
    assert_eq!(
        source.requests(),
        vec![
            (Product::Operational, run(7, 0)),
            (Product::Operational, run(6, 12)),
            (Product::Operational, run(6, 0)),
            (Product::Operational, run(5, 12)),
        ]
    );
}

#[tokio::test]
async fn test_fallback_exhausted() {
    // Published, but one cycle beyond the attempt budget
    let source = Arc::new(catalog(&[run(5, 12)]));
    let store = store(source.clone(), 3);

    let err = store
        .fetch_with_fallback(Product::Operational, run(7, 0))
        .await
        .unwrap_err();

    assert_eq!(
        err,
        ForecastError::NoForecastAvailable {
            product: Product::Operational,
            candidate: run(7, 0),
            attempts: 3,
        }
    );
    assert!(err.is_no_forecast());
    assert_eq!(source.attempts(), 3);
}

#[tokio::test]
async fn test_source_failure_is_not_retried() {
    let source = Arc::new(
        catalog(&[run(6, 12)]).with_failure(Product::Operational, run(7, 0), "connection reset"),
    );
    let store = store(source.clone(), 6);

    let err = store
        .fetch_with_fallback(Product::Operational, run(7, 0))
        .await
        .unwrap_err();

    assert_eq!(err, ForecastError::Source("connection reset".to_string()));
    assert_eq!(source.attempts(), 1);
}

#[tokio::test]
async fn test_products_fall_back_independently() {
    let source = Arc::new(
        MemorySource::new()
            .with_dataset(dataset(Product::Operational, run(7, 0)))
            .with_dataset(dataset(Product::Ensemble, run(6, 12))),
    );
    let store = store(source, 6);

    let (oper, _) = store
        .fetch_with_fallback(Product::Operational, run(7, 0))
        .await
        .unwrap();
    let (enfo, _) = store
        .fetch_with_fallback(Product::Ensemble, run(7, 0))
        .await
        .unwrap();

    assert_eq!(oper, run(7, 0));
    assert_eq!(enfo, run(6, 12));
}

#[tokio::test]
async fn test_fetch_run_reports_missing_run() {
    let store = store(Arc::new(MemorySource::new()), 6);

    let err = store.fetch_run(Product::Ensemble, run(7, 0)).await.unwrap_err();

    assert!(err.is_retryable());
    assert_eq!(
        err,
        ForecastError::RunUnavailable {
            product: Product::Ensemble,
            run: run(7, 0),
        }
    );
}

// =============================================================================
// Historical Runs
// =============================================================================

#[test]
fn test_previous_runs_cover_two_days() {
    let runs = previous_runs(run(7, 0), 5, 12);
    assert_eq!(
        runs,
        vec![run(5, 0), run(5, 12), run(6, 0), run(6, 12), run(7, 0)]
    );
}

#[test]
fn test_previous_runs_zero_count() {
    assert!(previous_runs(run(7, 0), 0, 12).is_empty());
}
