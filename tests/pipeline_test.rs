mod common;

use assert_matches::assert_matches;
use common::{example_fixture, mixed_fixture, Fixture};
use trader_sentiment::analytics::{AnalyticsPipeline, PipelineError, PROFILE_FILE, TRADER_DAY_FILE};
use trader_sentiment::data_ingestion::CsvError;
use trader_sentiment::domain_types::{FrequencyTier, LeverageTier, Sentiment, WinnerTier};

fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

#[test]
fn test_end_to_end_example_from_files() {
    let fixture = example_fixture();
    let snapshot = AnalyticsPipeline::default()
        .load_and_run(&fixture.data_config())
        .unwrap();

    assert_eq!(snapshot.median_size, Some(500.0));
    let a = snapshot.profile("A").unwrap();
    assert_eq!(a.total_trades, 2);
    assert!(approx(a.total_pnl, -50.0));
    assert!(approx(a.winrate, 0.5));
    assert!(approx(a.max_drawdown, -150.0));
    assert!(approx(a.avg_leverage, 1.0));

    let days: Vec<_> = snapshot.days_for("A").collect();
    assert_eq!(days.len(), 2);
    assert_eq!(days[0].sentiment, Sentiment::Greed);
    assert_eq!(days[1].sentiment, Sentiment::Fear);
}

#[test]
fn test_mixed_dataset_profiles() {
    let fixture = mixed_fixture();
    let snapshot = AnalyticsPipeline::default()
        .load_and_run(&fixture.data_config())
        .unwrap();

    // 0xDDD4 在 03-10 的交易沒有情緒覆蓋
    assert_eq!(snapshot.ingestion.trade_rows, 11);
    assert_eq!(snapshot.ingestion.trades_joined, 10);
    assert_eq!(snapshot.ingestion.trades_unmatched, 1);
    assert_eq!(snapshot.ingestion.pnl_coerced, 1);
    assert_eq!(snapshot.median_size, Some(1250.0));

    let aaa = snapshot.profile("0xAAA1").unwrap();
    assert_eq!(aaa.total_trades, 3);
    assert_eq!(aaa.active_days, 2);
    assert!(approx(aaa.trades_per_day, 1.5));
    assert!(approx(aaa.total_pnl, 160.5));
    assert!(approx(aaa.avg_leverage, 4.0 / 3.0));
    assert!(approx(aaa.max_drawdown, -20.0));
    assert_eq!(aaa.lev_tier, LeverageTier::Mid);
    assert_eq!(aaa.freq_tier, FrequencyTier::High);
    assert_eq!(aaa.winner_tier, WinnerTier::ConsistentWinner);

    let bbb = snapshot.profile("0xBBB2").unwrap();
    assert!(approx(bbb.total_pnl, 150.0));
    assert!(approx(bbb.winrate, 1.0 / 3.0));
    assert!(approx(bbb.avg_leverage, 4.0));
    assert_eq!(bbb.max_drawdown, 0.0);
    assert_eq!(bbb.lev_tier, LeverageTier::High);
    assert_eq!(bbb.winner_tier, WinnerTier::VolatileWinner);

    let ccc = snapshot.profile("0xCCC3").unwrap();
    assert!(approx(ccc.max_drawdown, -1.0));
    assert_eq!(ccc.lev_tier, LeverageTier::Low);
    assert_eq!(ccc.freq_tier, FrequencyTier::Low);
    assert_eq!(ccc.winner_tier, WinnerTier::ConsistentWinner);

    let ddd = snapshot.profile("0xDDD4").unwrap();
    assert_eq!(ddd.total_trades, 1);
    assert_eq!(ddd.pnl_volatility, None);
    assert_eq!(ddd.winner_tier, WinnerTier::VolatileWinner);
    assert_eq!(snapshot.degenerate.undefined_volatility, 1);

    assert_eq!(snapshot.trader_days.len(), 8);
}

#[test]
fn test_coerced_pnl_row_is_kept() {
    let fixture = Fixture::new(
        &[("2024-01-01", "Fear")],
        &[
            ("A", "01-01-2024 10:00", "BUY", "N/A", "100"),
            ("A", "01-01-2024 11:00", "SELL", "5", "oops"),
        ],
    );
    let snapshot = AnalyticsPipeline::default()
        .load_and_run(&fixture.data_config())
        .unwrap();

    let a = snapshot.profile("A").unwrap();
    assert_eq!(a.total_trades, 2);
    assert!(approx(a.total_pnl, 5.0));
    assert_eq!(snapshot.ingestion.pnl_coerced, 1);
    assert_eq!(snapshot.ingestion.size_coerced, 1);
}

#[test]
fn test_aggregation_consistency() {
    let fixture = mixed_fixture();
    let snapshot = AnalyticsPipeline::default()
        .load_and_run(&fixture.data_config())
        .unwrap();

    for profile in &snapshot.profiles {
        let days: Vec<_> = snapshot.days_for(&profile.account).collect();
        let n_trades: u32 = days.iter().map(|d| d.n_trades).sum();
        let pnl: f64 = days.iter().map(|d| d.daily_pnl).sum();

        assert_eq!(n_trades, profile.total_trades);
        assert!(approx(pnl, profile.total_pnl));
        assert_eq!(days.len() as u32, profile.active_days);

        for day in days {
            assert_eq!(day.lev_tier, profile.lev_tier);
            assert_eq!(day.freq_tier, profile.freq_tier);
            assert_eq!(day.winner_tier, profile.winner_tier);
            assert_eq!(day.trader_avg_lev, profile.avg_leverage);
            assert_eq!(day.winrate, profile.winrate);
            assert_eq!(day.trades_per_day, profile.trades_per_day);
            assert_eq!(day.is_greed, day.sentiment.is_greed());
        }
    }
}

#[test]
fn test_idempotent() {
    let fixture = mixed_fixture();
    let pipeline = AnalyticsPipeline::default();
    let first = pipeline.load_and_run(&fixture.data_config()).unwrap();
    let second = pipeline.load_and_run(&fixture.data_config()).unwrap();

    assert_eq!(first.profiles, second.profiles);
    assert_eq!(first.trader_days, second.trader_days);
    assert_eq!(first.thresholds, second.thresholds);
}

#[test]
fn test_missing_trade_column_is_fatal() {
    let fixture = mixed_fixture();
    let mut data = fixture.data_config();
    data.trade_columns.pnl = "Realized PnL".to_string();

    let result = AnalyticsPipeline::default().load_and_run(&data);
    assert_matches!(
        result,
        Err(PipelineError::DataFormat(CsvError::MissingColumn { columns, .. })) if columns == "Realized PnL"
    );
}

#[test]
fn test_duplicate_sentiment_date_is_fatal() {
    let fixture = Fixture::new(
        &[("2024-01-01", "Fear"), ("2024-01-01", "Greed")],
        &[("A", "01-01-2024 10:00", "BUY", "1", "1")],
    );
    let result = AnalyticsPipeline::default().load_and_run(&fixture.data_config());
    assert_matches!(
        result,
        Err(PipelineError::DataFormat(CsvError::DuplicateDate { .. }))
    );
}

#[test]
fn test_unparseable_timestamp_is_fatal() {
    let fixture = Fixture::new(
        &[("2024-01-01", "Fear")],
        &[("A", "yesterday", "BUY", "1", "1")],
    );
    let result = AnalyticsPipeline::default().load_and_run(&fixture.data_config());
    assert_matches!(
        result,
        Err(PipelineError::DataFormat(CsvError::TimestampParseError { line: 2, .. }))
    );
}

#[test]
fn test_missing_file_is_fatal() {
    let fixture = example_fixture();
    let mut data = fixture.data_config();
    data.trades_path = fixture.dir.path().join("missing.csv").to_string_lossy().into_owned();

    let result = AnalyticsPipeline::default().load_and_run(&data);
    assert_matches!(result, Err(PipelineError::DataFormat(CsvError::IoError(_))));
}

#[test]
fn test_export_round_trip() {
    let fixture = mixed_fixture();
    let snapshot = AnalyticsPipeline::default()
        .load_and_run(&fixture.data_config())
        .unwrap();

    let out = fixture.dir.path().join("export");
    let written = snapshot.export(&out).unwrap();
    assert_eq!(written, vec![out.join(PROFILE_FILE), out.join(TRADER_DAY_FILE)]);

    let trader_day = std::fs::read_to_string(out.join(TRADER_DAY_FILE)).unwrap();
    let header = trader_day.lines().next().unwrap();
    assert_eq!(
        header,
        "account,date,sentiment,is_greed,daily_pnl,n_trades,win_rate,avg_lev,avg_size,\
         lev_tier,freq_tier,winner_tier,trader_avg_lev,winrate,trades_per_day"
    );
    assert_eq!(trader_day.lines().count(), 9);
    assert!(trader_day.contains("0xAAA1,2024-03-01,Fear,0"));
}
