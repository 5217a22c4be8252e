use std::path::PathBuf;

use particle_dash::api::{DashboardConfig, DashboardSession, RangeDecision};
use particle_dash::ingest::{ChartCatalog, build_dataset, parse_ebas_file};
use particle_dash::render::{RecordingHost, RecordingSurface};
use serde_json::json;

struct CliArgs {
    input: PathBuf,
    window: Option<(i64, i64)>,
    analysis_id: String,
    config: Option<PathBuf>,
}

fn main() {
    let _ = particle_dash::telemetry::init_default_tracing();
    if let Err(err) = run() {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), String> {
    let args = parse_args()?;
    let config = match &args.config {
        Some(path) => {
            let raw = std::fs::read_to_string(path)
                .map_err(|err| format!("failed to read `{}`: {err}", path.display()))?;
            DashboardConfig::from_json_str(&raw).map_err(|err| err.to_string())?
        }
        None => DashboardConfig::default(),
    };

    let table = parse_ebas_file(&args.input).map_err(|err| err.to_string())?;
    let catalog = ChartCatalog::builtin().map_err(|err| err.to_string())?;
    let dataset = build_dataset(&table, &catalog, &args.analysis_id);

    let mut host = RecordingHost::new();
    let mut session: DashboardSession<RecordingSurface> =
        DashboardSession::init(dataset, config, &mut host, None).map_err(|err| err.to_string())?;

    if let Some((start, end)) = args.window {
        if session.request_window(start, end) == RangeDecision::Rejected {
            return Err(format!("window {start}..={end} selects no points"));
        }
    }

    let mut charts = serde_json::Map::new();
    for chart_id in session.mounted_chart_ids() {
        let Some(spec) = session
            .surface(chart_id)
            .and_then(|surface| surface.last_spec.as_ref())
        else {
            continue;
        };
        let value = spec.to_json_value().map_err(|err| err.to_string())?;
        charts.insert(chart_id.to_owned(), value);
    }

    let output = json!({
        "time_period": table.time_period(),
        "session": session.snapshot(),
        "controls": session.value_range_controls(),
        "charts": charts,
    });
    let rendered = serde_json::to_string_pretty(&output)
        .map_err(|err| format!("failed to serialize output: {err}"))?;
    println!("{rendered}");
    Ok(())
}

fn parse_args() -> Result<CliArgs, String> {
    let mut input: Option<PathBuf> = None;
    let mut window: Option<(i64, i64)> = None;
    let mut analysis_id = "cli".to_owned();
    let mut config: Option<PathBuf> = None;

    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--window" => {
                let value = args
                    .next()
                    .ok_or_else(|| "missing value for --window".to_owned())?;
                let (start, end) = value
                    .split_once(':')
                    .ok_or_else(|| format!("window `{value}` must look like START:END"))?;
                let parse = |text: &str| {
                    text.parse::<i64>()
                        .map_err(|_| format!("window bound `{text}` is not an integer"))
                };
                window = Some((parse(start)?, parse(end)?));
            }
            "--analysis-id" => {
                analysis_id = args
                    .next()
                    .ok_or_else(|| "missing value for --analysis-id".to_owned())?;
            }
            "--config" => {
                let value = args
                    .next()
                    .ok_or_else(|| "missing value for --config".to_owned())?;
                config = Some(PathBuf::from(value));
            }
            "-h" | "--help" => {
                println!(
                    "Usage: cargo run --bin dashboard_spec_dump -- <file.nas> [--window START:END] [--analysis-id <id>] [--config <path>]"
                );
                std::process::exit(0);
            }
            other if other.starts_with('-') => {
                return Err(format!("unknown argument `{other}`"));
            }
            other => {
                if input.is_some() {
                    return Err(format!("unexpected extra input `{other}`"));
                }
                input = Some(PathBuf::from(other));
            }
        }
    }

    Ok(CliArgs {
        input: input.ok_or_else(|| "missing input file".to_owned())?,
        window,
        analysis_id,
        config,
    })
}
