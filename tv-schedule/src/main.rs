use anyhow::{Context, Result};
use clap::{Arg, ArgAction, ArgMatches, Command};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

use tv_schedule::display::{print_week_schedule, write_schedule_to_file};
use tv_schedule::web::{self, AppState};
use tv_schedule::{load_and_build, run, Config};

fn cli() -> Command {
    Command::new("tv-schedule")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Builds a weekly TV schedule with playable URLs from CSV tables")
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .value_name("FILE")
                .help("TOML configuration file")
                .global(true),
        )
        .arg(
            Arg::new("channels")
                .long("channels")
                .value_name("CSV")
                .help("Channel reference table (default: URLs.csv)")
                .global(true),
        )
        .arg(
            Arg::new("schedule")
                .long("schedule")
                .value_name("CSV")
                .help("Raw schedule table (default: rawTable.csv)")
                .global(true),
        )
        .arg(
            Arg::new("output")
                .short('o')
                .long("output")
                .value_name("JSON")
                .help("Output schedule file (default: schedule.json)")
                .global(true),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help("Enable debug logging")
                .action(ArgAction::SetTrue)
                .global(true),
        )
        .subcommand(Command::new("build").about("Build schedule.json and print the week (default)"))
        .subcommand(
            Command::new("web").about("Serve the schedule viewer").arg(
                Arg::new("port")
                    .short('p')
                    .long("port")
                    .value_name("PORT")
                    .help("Port to listen on (default: 8080)")
                    .value_parser(clap::value_parser!(u16)),
            ),
        )
}

fn load_config(matches: &ArgMatches) -> Result<Config> {
    let config_path = matches.get_one::<String>("config").map(PathBuf::from);
    let mut config = Config::load(config_path.as_deref())?;

    if let Some(path) = matches.get_one::<String>("channels") {
        config.input.channels = PathBuf::from(path);
    }
    if let Some(path) = matches.get_one::<String>("schedule") {
        config.input.schedule = PathBuf::from(path);
    }
    if let Some(path) = matches.get_one::<String>("output") {
        config.output.path = PathBuf::from(path);
    }

    Ok(config)
}

#[tokio::main]
async fn main() -> Result<()> {
    let matches = cli().get_matches();

    let default_filter = if matches.get_flag("verbose") {
        "tv_schedule=debug,info"
    } else {
        "tv_schedule=info,warn"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .with_writer(std::io::stderr)
        .init();

    let mut config = load_config(&matches)?;

    match matches.subcommand() {
        Some(("web", web_matches)) => {
            if let Some(port) = web_matches.get_one::<u16>("port") {
                config.web.port = *port;
            }

            let (channels, build) = load_and_build(&config)?;
            write_schedule_to_file(&build.schedule, &config.output.path)?;
            info!("Wrote schedule to {}", config.output.path.display());

            let state = AppState::new(
                build.schedule,
                channels,
                config.output.path.clone(),
                config.web.admin_password.clone(),
            );
            web::start_server(state, config.web.port, config.web.static_dir.clone())
                .await
                .context("web server failed")?;
        }
        _ => {
            let build = run(&config)?;
            print_week_schedule(&build.schedule);
            println!(
                "\nSuccessfully generated '{}' ({} of {} rows scheduled, {} warnings)",
                config.output.path.display(),
                build.rows_scheduled,
                build.rows_read,
                build.warnings().count()
            );
        }
    }

    Ok(())
}
