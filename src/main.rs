// Timetable Weaver
// Command-line entry point

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};

use timetable_weaver::models::coordinate::Coordinate;
use timetable_weaver::models::schedule::CellState;
use timetable_weaver::models::settings::Settings;
use timetable_weaver::services::csv;
use timetable_weaver::services::grid::ScheduleGrid;
use timetable_weaver::services::settings::{initial_grid, SettingsService};
use timetable_weaver::services::share::{self, NoticeLevel};

#[derive(Parser)]
#[command(name = "timetable-weaver")]
#[command(about = "Build, share and restore weekly timetables")]
struct Cli {
    /// Settings file (defaults to the per-user config directory)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Import a CSV schedule and print a share link for it
    Share {
        /// CSV file with Day, Time and Title columns
        csv: PathBuf,

        /// Base URL the link points at (overrides share_base_url)
        #[arg(long)]
        base_url: Option<String>,
    },
    /// Restore a shared schedule and write it as CSV
    Open {
        /// Share link or bare token
        link: String,

        /// Write the CSV here instead of stdout
        #[arg(short, long)]
        out: Option<PathBuf>,
    },
    /// Print a summary of a shared schedule
    Show {
        /// Share link or bare token
        link: String,
    },
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let settings = load_settings(cli.config)?;

    match cli.command {
        Commands::Share { csv, base_url } => cmd_share(&settings, csv, base_url),
        Commands::Open { link, out } => cmd_open(&settings, &link, out),
        Commands::Show { link } => cmd_show(&settings, &link),
    }
}

fn load_settings(path: Option<PathBuf>) -> Result<Settings> {
    let service = match path {
        Some(path) => SettingsService::new(path),
        None => match SettingsService::default_location() {
            Some(service) => service,
            None => {
                log::warn!("No config directory available, using default settings");
                return Ok(Settings::default());
            }
        },
    };
    service.load()
}

fn cmd_share(settings: &Settings, path: PathBuf, base_url: Option<String>) -> Result<()> {
    let mut grid = initial_grid(settings)?;
    let count = csv::import_from_file(&mut grid, &path)?;

    let base = base_url.unwrap_or_else(|| settings.share_base_url.clone());
    let url = share::share_url(&base, &grid.snapshot()).context("Failed to build share link")?;

    log::info!("Shared {} events from {}", count, path.display());
    println!("{}", url);
    Ok(())
}

fn cmd_open(settings: &Settings, link: &str, out: Option<PathBuf>) -> Result<()> {
    let grid = restore(settings, link)?;
    match out {
        Some(path) => {
            csv::export_to_file(&grid, &path)?;
            println!("Wrote {} events to {}", grid.events().len(), path.display());
        }
        None => print!("{}", csv::export(&grid)),
    }
    Ok(())
}

fn cmd_show(settings: &Settings, link: &str) -> Result<()> {
    let grid = restore(settings, link)?;
    print!("{}", render_summary(&grid));
    Ok(())
}

fn restore(settings: &Settings, link: &str) -> Result<ScheduleGrid> {
    let token = share::resolve_token(link);
    let outcome = share::load(initial_grid(settings)?, Some(&token));

    if let Some(notice) = &outcome.notice {
        match notice.level {
            NoticeLevel::Error => bail!("{}: {}", notice.title, notice.description),
            NoticeLevel::Info => eprintln!("{}: {}", notice.title, notice.description),
        }
    }
    Ok(outcome.grid)
}

fn render_summary(grid: &ScheduleGrid) -> String {
    let mut out = format!(
        "{}\n{} days x {} time slots, {} events\n",
        grid.heading_text(),
        grid.days().len(),
        grid.time_slots().len(),
        grid.events().len()
    );

    for (day_index, day) in grid.days().labels().iter().enumerate() {
        let mut lines = Vec::new();
        for (time_index, time) in grid.time_slots().labels().iter().enumerate() {
            let key = Coordinate::new(day_index, time_index);
            if let CellState::Anchor { event, span } = grid.cell_state(key) {
                let mut line = format!("  {:<10} {}", time, event.title);
                if !event.subtitle.is_empty() {
                    line.push_str(&format!(" ({})", event.subtitle));
                }
                if span > 1 {
                    line.push_str(&format!(" [{} {}]", span, grid.merge_axis().name()));
                }
                lines.push(line);
            }
        }
        if !lines.is_empty() {
            out.push_str(&format!("{}\n", day));
            for line in lines {
                out.push_str(&line);
                out.push('\n');
            }
        }
    }

    out
}
