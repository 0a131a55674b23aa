use std::fmt::Write as _;
use std::path::{Path, PathBuf};

use anyhow::Context;
use celtic_rs::{
    ALL_MONTHS, Almanac, AlmanacConfig, CelticDate, CelticMonth, DayReport, FestivalOccurrence,
    NaiveDate, UpcomingFestival,
};
use chrono::Datelike;
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "celtic", about = "Celtic lunisolar calendar CLI")]
struct Cli {
    /// Configuration file (TOML)
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// More logging on stderr (-v debug, -vv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Args, Debug, Clone, Copy)]
struct DateArgs {
    /// Gregorian date (YYYY-MM-DD), default today
    #[arg(long)]
    date: Option<NaiveDate>,
    /// Days to move from the date (negative goes back)
    #[arg(long, default_value_t = 0, allow_hyphen_values = true)]
    offset: i64,
}

impl DateArgs {
    fn resolve(self) -> anyhow::Result<NaiveDate> {
        let base = self.date.unwrap_or_else(today);
        Ok(Almanac::navigate(base, self.offset)?)
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Celtic month and day of a date
    Date {
        #[command(flatten)]
        at: DateArgs,
    },
    /// Gregorian date of a Celtic month and day
    ToGregorian {
        /// Month name, e.g. Samonios
        month: CelticMonth,
        /// Day of month (1-30)
        day: u32,
        /// Gregorian year the lunisolar year is anchored in, default this year
        #[arg(long)]
        year: Option<i32>,
    },
    /// First new moon of a Gregorian year
    NewMoon {
        /// Gregorian year, default this year
        year: Option<i32>,
    },
    /// Cycle position and month lengths of a year
    Cycle {
        /// Gregorian year, default this year
        year: Option<i32>,
    },
    /// Lunar illumination and phase of a date
    Phase {
        #[command(flatten)]
        at: DateArgs,
    },
    /// Luck of a date
    Luck {
        #[command(flatten)]
        at: DateArgs,
    },
    /// All festivals of a lunisolar year
    Festivals {
        /// Gregorian year the lunisolar year is anchored in, default this year
        year: Option<i32>,
    },
    /// Nearest festival after a date
    NextFestival {
        #[command(flatten)]
        at: DateArgs,
    },
    /// Equinoxes and solstices of a year
    Seasons {
        /// Gregorian year, default this year
        year: Option<i32>,
    },
    /// Everything known about a date
    Report {
        #[command(flatten)]
        at: DateArgs,
    },
}

fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

fn this_year() -> i32 {
    today().year()
}

fn init_tracing(verbose: u8) {
    let filter = match verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load_almanac(path: Option<&Path>) -> anyhow::Result<Almanac> {
    let config = match path {
        Some(path) => AlmanacConfig::load(path)?,
        None => AlmanacConfig::default(),
    };
    tracing::debug!(config = ?path, "building almanac");
    Ok(Almanac::new(config)?)
}

fn festival_line(occurrence: &FestivalOccurrence) -> String {
    let f = &occurrence.festival;
    format!(
        "{}  {:<16} {}",
        occurrence.date,
        CelticDate::new(f.month, f.day).to_string(),
        f.display_name()
    )
}

fn upcoming_line(upcoming: &UpcomingFestival) -> String {
    let days = upcoming.days_away;
    format!(
        "{} on {} (in {days} day{})",
        upcoming.occurrence.festival.display_name(),
        upcoming.occurrence.date,
        if days == 1 { "" } else { "s" }
    )
}

fn celtic_line(celtic: CelticDate) -> String {
    if celtic.overflowed {
        format!("{celtic} (past the end of the year)")
    } else {
        celtic.to_string()
    }
}

fn format_report(report: &DayReport) -> Result<String, std::fmt::Error> {
    let mut out = String::new();
    writeln!(out, "Date:        {}", report.date)?;
    writeln!(out, "Celtic date: {}", celtic_line(report.celtic))?;
    writeln!(
        out,
        "Moon:        {:.1}% illuminated, {}",
        report.illumination_percent, report.phase
    )?;
    writeln!(out, "Phases:")?;
    for f in &report.forecast {
        writeln!(out, "  {}  {} {}", f.date, f.phase.glyph(), f.phase)?;
    }
    for (label, luck) in [("today", &report.luck_today), ("tomorrow", &report.luck_tomorrow)] {
        writeln!(
            out,
            "Luck {label:<9} {} ({}%)",
            luck.luck,
            luck.luck.strength_percent()
        )?;
    }
    if let Some(today) = &report.festival_today {
        writeln!(out, "Festival:    {}", today.festival.display_name())?;
    }
    if let Some(next) = &report.next_festival {
        writeln!(out, "Next:        {}", upcoming_line(next))?;
    }
    match &report.seasonal_events {
        Ok(events) if events.is_empty() => {}
        Ok(events) => {
            writeln!(out, "Seasons:")?;
            for c in events {
                writeln!(
                    out,
                    "  {:<16} {} ({} days away)",
                    c.instant.event.name(),
                    c.instant.at.date(),
                    c.days_away
                )?;
            }
        }
        Err(e) => writeln!(out, "Seasons:     unavailable ({e})")?,
    }
    Ok(out)
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let almanac = load_almanac(cli.config.as_deref())?;

    match cli.command {
        Commands::Date { at } => {
            let date = at.resolve()?;
            let celtic = almanac.to_celtic_date(date)?;
            let year = almanac.lunisolar_year(date)?;
            println!("{date}: {}", celtic_line(celtic));
            println!(
                "  Year anchored {} (cycle position {}, {} days)",
                year.anchor,
                year.cycle.position,
                year.cycle.total_days()
            );
        }

        Commands::ToGregorian { month, day, year } => {
            let year = year.unwrap_or_else(this_year);
            let celtic = CelticDate::new(month, day);
            let date = almanac
                .from_celtic_date(year, celtic)
                .with_context(|| format!("{celtic} in the year anchored {year}"))?;
            println!("{celtic} ({year}): {date}");
        }

        Commands::NewMoon { year } => {
            let year = year.unwrap_or_else(this_year);
            println!("First new moon of {year}: {}", almanac.first_new_moon_of_year(year)?);
        }

        Commands::Cycle { year } => {
            let year = year.unwrap_or_else(this_year);
            let cycle = almanac.cycle_year(year);
            println!(
                "{year}: cycle position {}, {} months, {} days",
                cycle.position,
                cycle.month_count(),
                cycle.total_days()
            );
            for (month, length) in ALL_MONTHS.iter().zip(cycle.month_lengths) {
                println!("  {:<13} {length}", month.name());
            }
        }

        Commands::Phase { at } => {
            let date = at.resolve()?;
            let reading = almanac.lunar_reading(date)?;
            let display = almanac.display_phase(date)?;
            println!(
                "{date}: {:.1}% illuminated ({})",
                reading.illumination_percent,
                if reading.waxing { "waxing" } else { "waning" }
            );
            println!("  Phase:   {}", almanac.lunar_phase(date)?);
            println!("  Display: {} {display}", display.glyph());
        }

        Commands::Luck { at } => {
            let date = at.resolve()?;
            let luck = almanac.luck(date)?;
            println!(
                "{date} ({}): {luck} ({}%)",
                almanac.to_celtic_date(date)?,
                luck.strength_percent()
            );
        }

        Commands::Festivals { year } => {
            let year = year.unwrap_or_else(this_year);
            for occurrence in almanac.festivals_for_year(year)? {
                println!("{}", festival_line(&occurrence));
            }
        }

        Commands::NextFestival { at } => {
            let date = at.resolve()?;
            match almanac.next_festival(date)? {
                Some(next) => println!("{}", upcoming_line(&next)),
                None => println!("No festivals configured"),
            }
        }

        Commands::Seasons { year } => {
            let year = year.unwrap_or_else(this_year);
            for instant in almanac.seasonal_events(year)? {
                println!(
                    "{:<16} {} UTC",
                    instant.event.name(),
                    instant.at.format("%Y-%m-%d %H:%M")
                );
            }
        }

        Commands::Report { at } => {
            let report = almanac.day_report(at.date.unwrap_or_else(today), at.offset)?;
            print!("{}", format_report(&report)?);
        }
    }
    Ok(())
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    if let Err(e) = run(cli) {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}
