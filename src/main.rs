mod app;
mod cli;
mod config;
mod consts;
mod error;
mod output;
mod portrait;
mod record;
mod roster;
mod settings;
mod source;

use std::fs;

use clap::Parser;
use log::{LevelFilter, debug, error, info};

use cli::Cli;
use config::Config;
use error::AppError;
use output::{output_roster_json, output_summary_json, print_roster_table, print_run_table};
use roster::ROSTER;
use settings::Settings;
use source::WikipediaSource;

fn init_logging(debug: bool) {
    let mut clog = colog::default_builder();
    clog.filter(
        None,
        if debug {
            LevelFilter::Debug
        } else {
            LevelFilter::Info
        },
    );
    clog.init();
}

fn execute(cli: &Cli) -> Result<(), AppError> {
    let settings = Settings::resolve(cli);
    debug!("Settings: {settings:?}");

    let selected = roster::select(ROSTER, &cli.only)?;
    let plan = app::plan(&selected, &settings);

    if cli.list {
        if cli.json {
            println!("{}", output_roster_json(&plan));
        } else {
            print_roster_table(&plan, cli.use_color());
        }
        return Ok(());
    }

    fs::create_dir_all(&settings.avatars_dir).map_err(|source| AppError::AvatarsDir {
        path: settings.avatars_dir.clone(),
        source,
    })?;

    // A model that fails to load fails each pending entry, not the run
    let mut normalizer = if app::needs_processing(&plan, settings.skip_existing) {
        info!("Loading face detection and background removal models...");
        match portrait::load_normalizer(&settings.face_model, &settings.segmentation_model) {
            Ok(normalizer) => Some(normalizer),
            Err(e) => {
                error!("Failed to load model: {e}");
                None
            }
        }
    } else {
        None
    };

    let source = WikipediaSource::new(settings.thumb_width);
    let summary = app::run(&plan, &settings, &source, normalizer.as_mut());

    if cli.json {
        println!("{}", output_summary_json(&summary));
    } else {
        print_run_table(&summary, cli.use_color());
    }
    Ok(())
}

fn main() {
    let cli = Cli::parse().with_config(&Config::load());
    init_logging(cli.debug);

    if let Err(e) = execute(&cli) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
