mod cli;
mod config;
mod effects;
mod logging;
mod render;

use std::process::ExitCode;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use travelog_core::{update, AppState, LoadStatus, Msg, Reference};
use travelog_engine::{EngineConfig, EngineHandle, PipelineOptions};
use travelog_logging::{travel_error, travel_info};

use cli::Cli;
use config::AppConfig;
use effects::EffectRunner;

pub fn run_app() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();
    let config = AppConfig::load(&cli.config)?;
    let level = config.level_filter(cli.log_level.as_deref())?;
    logging::initialize(cli.log, level);
    travel_info!("Using configuration from {:?}", cli.config);

    let engine = EngineHandle::new(engine_config(&cli, &config));
    let runner = EffectRunner::new(engine);
    let source = cli.source.unwrap_or(config.source);

    let (mut state, effects) = update(AppState::new(), Msg::RefreshRequested { source });
    runner.run(effects);

    loop {
        let msg = runner
            .next_msg()
            .context("refresh worker stopped before finishing")?;
        let (next, effects) = update(state, msg);
        state = next;
        runner.run(effects);

        if state.consume_dirty() {
            if let Some(note) = render::render_progress(&state.view()) {
                eprintln!("{note}");
            }
        }
        if matches!(state.status(), LoadStatus::Ready | LoadStatus::Failed) {
            break;
        }
    }

    let view = state.view();
    let Some(itinerary) = view.itinerary.as_ref() else {
        let reason = view.error.as_deref().unwrap_or("no data");
        travel_error!("Travel data unavailable: {}", reason);
        eprintln!("Travel data unavailable: {reason}");
        return Ok(ExitCode::FAILURE);
    };

    let sort = cli.sort_options();
    if cli.json {
        let list = cli.list.then_some((view.records.as_slice(), sort));
        println!("{}", render::render_json(itinerary, view.rejected_rows, list)?);
    } else {
        print!("{}", render::render_text(itinerary, view.rejected_rows));
        if cli.list {
            println!("\nAll records");
            print!("{}", render::render_list(&view.records, sort));
        }
    }
    Ok(ExitCode::SUCCESS)
}

fn engine_config(cli: &Cli, config: &AppConfig) -> EngineConfig {
    let mut engine = EngineConfig::new(config.source_urls());
    engine.settings = config.fetch_settings();
    engine.options = PipelineOptions {
        validation: config.validation,
        dedupe: config.dedupe || cli.dedupe,
        filter: cli.filter(),
    };
    if let Some(today) = cli.today {
        engine.clock = Arc::new(move || Reference::from_date(today));
    }
    engine
}

