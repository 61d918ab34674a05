//! End-to-end runs of the score pipeline against a mocked API

use std::fs;
use std::sync::Arc;

use chrono::{DateTime, TimeZone, Utc};
use sentiscore::config::{Config, StorageConfig};
use sentiscore::core::http::FetchError;
use sentiscore::core::runtime::{PipelineError, ScoreRuntime};
use sentiscore::db::{read_latest_snapshot, sanitize_and_load};
use sentiscore::indicators::IndicatorError;
use sentiscore::models::market::{MarketSnapshot, StableAggregate};
use sentiscore::services::market_data::StaticMarketDataProvider;
use wiremock::matchers::{method, path};
use wiremock::{Mock, ResponseTemplate};

use crate::test_utils::{
    market_chart_body, mock_market_chart, mock_stable_markets, stable_markets_body, TestPipeline,
};

fn run_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, 15, 12, 0, 0).unwrap()
}

fn rising_closes() -> Vec<f64> {
    let mut closes = vec![100.0; 14];
    closes.push(110.0);
    closes
}

#[tokio::test]
async fn full_run_writes_all_three_stores() {
    let app = TestPipeline::new().await;
    mock_market_chart(&app.server, market_chart_body(&rising_closes(), &[1000.0; 15])).await;
    mock_stable_markets(&app.server, stable_markets_body(1_000_000.0, 0.0)).await;

    let report = app.runtime().run_at(run_time()).await.expect("run succeeds");

    assert!(report.breakdown.impulse.momentum > 0.0);
    assert_eq!(report.scores().stables, 0.5);
    assert!(report.scores().weighted > 0.0 && report.scores().weighted < 1.0);
    assert_eq!(report.record.confidence, report.scores().weighted);
    assert_eq!(report.record.leverage, 0);

    let cumulative = sanitize_and_load(&app.storage().cumulative_log).unwrap();
    assert_eq!(cumulative.rows, vec![report.record.clone()]);

    let monthly_path = app.storage().reports_dir.join("2024-03.csv");
    assert_eq!(report.monthly.path, monthly_path);
    assert_eq!(sanitize_and_load(&monthly_path).unwrap().rows.len(), 1);

    let snapshot = read_latest_snapshot(&app.storage().latest_snapshot).unwrap();
    assert_eq!(snapshot.utc, "2024-03-15T12:00:00Z");
    assert_eq!(&snapshot.scores, report.scores());

    assert!(report.summary().starts_with("OK 2024-03-15T12:00:00Z"));
    assert_eq!(app.server.received_requests().await.unwrap().len(), 2);
}

#[tokio::test]
async fn rerun_appends_cumulative_but_not_monthly() {
    let app = TestPipeline::new().await;
    mock_market_chart(&app.server, market_chart_body(&rising_closes(), &[1000.0; 15])).await;
    mock_stable_markets(&app.server, stable_markets_body(2_000_000.0, -10_000.0)).await;

    let runtime = app.runtime();
    runtime.run_at(run_time()).await.expect("first run");
    let second = runtime.run_at(run_time()).await.expect("second run");

    assert_eq!(second.cumulative.rows, 2);
    assert_eq!(second.monthly.rows, 1);
    assert!(!second.monthly.appended);
    assert!(second.summary().ends_with("(duplicate, skipped)"));
    // Shrinking stablecoin supply leans towards risk appetite.
    assert!(second.scores().stables > 0.5);
}

#[tokio::test]
async fn malformed_history_is_cleaned_on_run() {
    let app = TestPipeline::new().await;
    mock_market_chart(&app.server, market_chart_body(&rising_closes(), &[1000.0; 15])).await;
    mock_stable_markets(&app.server, stable_markets_body(1_000_000.0, 0.0)).await;

    let cumulative = &app.storage().cumulative_log;
    fs::write(
        cumulative,
        "timestamp,pair,action,leverage,confidence,note,Score_ETF,Score_Stables,Score_Stress,Score_Gewichtet\n\
         2024-03-14T12:00:00Z,BTC/CHF,hold,0,0.5,coingecko-auto,0.5,0.5,0.5,0.5\n\
         2024-03-14T13:00:00Z,BTC/CHF,hold,0,0.5,truncated\n",
    )
    .unwrap();

    let report = app.runtime().run_at(run_time()).await.expect("run succeeds");
    assert_eq!(report.cumulative.rows, 2);
    assert_eq!(report.cumulative.rejected, 1);
    assert!(!fs::read_to_string(cumulative).unwrap().contains("truncated"));
}

#[tokio::test]
async fn insufficient_data_leaves_files_untouched() {
    let app = TestPipeline::new().await;
    mock_market_chart(&app.server, market_chart_body(&[100.0; 14], &[1000.0; 14])).await;
    mock_stable_markets(&app.server, stable_markets_body(1_000_000.0, 0.0)).await;

    let prior = "timestamp,pair,action,leverage,confidence,note,Score_ETF,Score_Stables,Score_Stress,Score_Gewichtet\n\
                 2024-03-14T12:00:00Z,BTC/CHF,hold,0,0.5,n,0.5,0.5,0.5,0.5\n\
                 not,a,valid,row\n";
    fs::write(&app.storage().cumulative_log, prior).unwrap();

    let err = app
        .runtime()
        .run_at(run_time())
        .await
        .expect_err("too few closes");

    assert!(matches!(
        err,
        PipelineError::Indicator(IndicatorError::InsufficientData {
            series: "closes",
            required: 15,
            actual: 14,
        })
    ));
    assert_eq!(fs::read_to_string(&app.storage().cumulative_log).unwrap(), prior);
    assert!(!app.storage().reports_dir.exists());
    assert!(!app.storage().latest_snapshot.exists());
}

#[tokio::test]
async fn unreachable_endpoint_fails_without_writing() {
    let app = TestPipeline::new().await;
    mock_market_chart(&app.server, market_chart_body(&rising_closes(), &[1000.0; 15])).await;
    Mock::given(method("GET"))
        .and(path("/coins/markets"))
        .respond_with(ResponseTemplate::new(429))
        .mount(&app.server)
        .await;

    let err = app
        .runtime()
        .run_at(run_time())
        .await
        .expect_err("stablecoin endpoint is rate limited");

    match err {
        PipelineError::Fetch(FetchError::Exhausted { url, attempts, .. }) => {
            assert!(url.ends_with("/coins/markets"));
            assert_eq!(attempts, 3);
        }
        other => panic!("expected fetch failure, got {:?}", other),
    }
    assert!(!app.storage().cumulative_log.exists());
    assert!(!app.storage().reports_dir.exists());
    assert!(!app.storage().latest_snapshot.exists());
}

#[tokio::test]
async fn custom_labels_and_weights_flow_into_record() {
    let mut app = TestPipeline::new().await;
    app.config.labels.pair = "BTC/USD".to_string();
    app.config.labels.action = "buy".to_string();
    app.config.weights.etf = 0.0;
    app.config.weights.stables = 1.0;
    app.config.weights.stress = 0.0;
    mock_market_chart(&app.server, market_chart_body(&rising_closes(), &[1000.0; 15])).await;
    mock_stable_markets(&app.server, stable_markets_body(1_000_000.0, 0.0)).await;

    let report = app.runtime().run_at(run_time()).await.expect("run succeeds");

    assert_eq!(report.record.pair, "BTC/USD");
    assert_eq!(report.record.action, "buy");
    assert_eq!(report.scores().weighted, 0.5);
}

#[tokio::test]
async fn static_provider_runs_offline() {
    let dir = tempfile::TempDir::new().unwrap();
    let config = Config {
        storage: StorageConfig::rooted_at(dir.path()),
        ..Config::default()
    };
    let provider = StaticMarketDataProvider::new(
        MarketSnapshot::from_values(&rising_closes(), &[1000.0; 15]),
        StableAggregate::new(1_000_000.0, 5_000.0),
    );
    let runtime = ScoreRuntime::new(config, Arc::new(provider));

    let breakdown = runtime.compute_scores().await.expect("scores");
    assert!(!dir.path().join("signals.csv").exists());
    assert_eq!(breakdown.stables_flow.relative_change, 0.005);
    assert!((breakdown.scores.stables - 0.25).abs() < 1e-9);

    let report = runtime.run_at(run_time()).await.expect("run succeeds");
    assert_eq!(report.snapshot_path, dir.path().join("latest.json"));
    assert!(report.snapshot_path.exists());
}
