use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::{anyhow, bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;
use tracing::{error, info};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use trader_sentiment::analytics::{AnalyticsPipeline, AnalyticsSnapshot, SnapshotCache};
use trader_sentiment::config::{self, DataConfig, LogConfig};
use trader_sentiment::data_ingestion::ReportFormatter;
use trader_sentiment::views::{self, render, Overview, SegmentAxis, SegmentTable, StrategyRules};

#[derive(Parser)]
#[command(name = "trader_sentiment", about = "交易者行為與恐懼貪婪指數分析工具")]
struct Cli {
    /// 情緒資料 CSV（覆寫配置）
    #[arg(long, global = true)]
    sentiment: Option<PathBuf>,

    /// 交易歷史 CSV（覆寫配置）
    #[arg(long, global = true)]
    trades: Option<PathBuf>,

    /// 輸出格式
    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

#[derive(Clone, Copy, ValueEnum)]
enum Axis {
    Leverage,
    Frequency,
    Winner,
}

impl From<Axis> for SegmentAxis {
    fn from(axis: Axis) -> Self {
        match axis {
            Axis::Leverage => SegmentAxis::Leverage,
            Axis::Frequency => SegmentAxis::Frequency,
            Axis::Winner => SegmentAxis::Winner,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// 總覽與 Fear/Greed 每日 PnL 分佈
    Overview,

    /// 分層 × 情緒統計
    Segments {
        #[arg(long, value_enum, default_value_t = Axis::Leverage)]
        by: Axis,
    },

    /// 以子字串搜尋帳戶並顯示明細
    Lookup {
        query: String,

        /// 選擇第 n 個符合的帳戶（從 0 起算）
        #[arg(long, default_value_t = 0)]
        pick: usize,
    },

    /// 由資料推導的策略規則
    Rules,

    /// 攝取報告與退化輸入紀錄
    Report,

    /// 將帳戶輪廓表與帳戶 × 日表輸出為 CSV
    Export {
        #[arg(long, default_value = "output")]
        out: PathBuf,
    },
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    // 初始化配置
    let app_config = config::init_config().context("無法載入配置")?;

    // 初始化日誌系統，guard 需存活到 main 結束才會寫完緩衝的日誌
    let _guard = init_logging(&app_config.log)?;

    let mut data = app_config.data.clone();
    apply_overrides(&mut data, &cli);

    let pipeline = AnalyticsPipeline::new(app_config.analysis.clone()).context("分析參數無效")?;
    let cache = SnapshotCache::new();
    let snapshot = match cache.get_or_load(|| pipeline.load_and_run(&data)) {
        Ok(snapshot) => snapshot,
        Err(e) => {
            error!("無法載入資料: {}", e);
            eprintln!("無法載入資料: {}", e);
            return Ok(ExitCode::FAILURE);
        }
    };

    run_command(&cli, &pipeline, snapshot)?;
    Ok(ExitCode::SUCCESS)
}

fn apply_overrides(data: &mut DataConfig, cli: &Cli) {
    if let Some(path) = &cli.sentiment {
        data.sentiment_path = path.to_string_lossy().into_owned();
    }
    if let Some(path) = &cli.trades {
        data.trades_path = path.to_string_lossy().into_owned();
    }
}

fn run_command(cli: &Cli, pipeline: &AnalyticsPipeline, snapshot: Arc<AnalyticsSnapshot>) -> Result<()> {
    let format = cli.format;

    match &cli.command {
        Commands::Overview => {
            let overview = Overview::from_snapshot(&snapshot).context("無法計算總覽")?;
            let distribution = views::pnl_distribution(&snapshot, pipeline.config());
            match format {
                OutputFormat::Text => {
                    print!("{}", render::overview_text(&overview));
                    print!("{}", render::distribution_text(&distribution));
                }
                OutputFormat::Json => print_json(&serde_json::json!({
                    "overview": overview,
                    "distribution": distribution,
                }))?,
            }
        }
        Commands::Segments { by } => {
            let table = SegmentTable::from_snapshot(&snapshot, (*by).into()).context("無法計算分層統計")?;
            match format {
                OutputFormat::Text => print!("{}", render::segments_text(&table)),
                OutputFormat::Json => print_json(&table)?,
            }
        }
        Commands::Lookup { query, pick } => {
            let matches = views::search(&snapshot, query);
            if matches.is_empty() {
                match format {
                    OutputFormat::Text => print!("{}", render::matches_text(query, &matches)),
                    OutputFormat::Json => print_json(&serde_json::json!({ "matches": matches }))?,
                }
                return Ok(());
            }

            let Some(account) = matches.get(*pick) else {
                bail!("--pick {} 超出範圍，共有 {} 個符合的帳戶", pick, matches.len());
            };
            let detail = views::detail(&snapshot, account)
                .ok_or_else(|| anyhow!("找不到帳戶: {}", account))?;

            match format {
                OutputFormat::Text => {
                    print!("{}", render::matches_text(query, &matches));
                    println!();
                    print!("{}", render::detail_text(&detail));
                }
                OutputFormat::Json => print_json(&serde_json::json!({
                    "matches": matches,
                    "detail": detail,
                }))?,
            }
        }
        Commands::Rules => {
            let rules = StrategyRules::from_snapshot(&snapshot).context("無法計算策略規則")?;
            match format {
                OutputFormat::Text => print!("{}", render::rules_text(&rules)),
                OutputFormat::Json => print_json(&rules)?,
            }
        }
        Commands::Report => match format {
            OutputFormat::Text => {
                print!("{}", ReportFormatter::format_text(&snapshot.ingestion));
                println!();
                print!("{}", snapshot.degenerate.format_text());
            }
            OutputFormat::Json => print_json(&serde_json::json!({
                "ingestion": snapshot.ingestion,
                "degenerate": snapshot.degenerate,
                "thresholds": snapshot.thresholds,
                "median_size": snapshot.median_size,
            }))?,
        },
        Commands::Export { out } => {
            let written = snapshot
                .export(out)
                .with_context(|| format!("無法輸出至 {}", out.display()))?;
            for path in written {
                println!("{}", path.display());
            }
        }
    }

    Ok(())
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

// 初始化日誌系統，輸出至 stderr 或輪替的日誌檔
fn init_logging(log_config: &LogConfig) -> Result<Option<WorkerGuard>> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(log_config.level.to_lowercase()));

    let (writer, guard) = match &log_config.directory {
        Some(directory) => {
            let rotation = match log_config.rotation.as_deref().map(str::to_lowercase).as_deref() {
                Some("minutely") => Rotation::MINUTELY,
                Some("hourly") => Rotation::HOURLY,
                Some("never") => Rotation::NEVER,
                _ => Rotation::DAILY,
            };
            let appender = RollingFileAppender::new(rotation, directory, "trader_sentiment.log");
            let (non_blocking, guard) = tracing_appender::non_blocking(appender);
            (BoxMakeWriter::new(non_blocking), Some(guard))
        }
        None => (BoxMakeWriter::new(std::io::stderr), None),
    };

    let builder = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_ansi(log_config.directory.is_none())
        .with_writer(writer);

    let result = if log_config.format.eq_ignore_ascii_case("json") {
        tracing::subscriber::set_global_default(builder.json().finish())
    } else {
        tracing::subscriber::set_global_default(builder.finish())
    };
    result.map_err(|e| anyhow!("設置日誌系統失敗: {}", e))?;

    info!("日誌系統初始化完成");
    Ok(guard)
}
