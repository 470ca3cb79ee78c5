use clap::{Args, Parser, Subcommand};
use tracing::info;
use turnos::config::Config;
use turnos::date::{is_today, normalize_date_input, DateOrder, LocaleConfig, WeekStart};
use turnos::navigation::{resolve_view_date, ViewKind, ViewRange};
use turnos::startup;

/// Shift calendar dates: view ranges and date normalization
#[derive(Parser, Debug)]
#[command(name = "turnos", version, about)]
struct Cli {
    /// IANA time zone, e.g. America/Argentina/Buenos_Aires
    #[arg(long, global = true)]
    timezone: Option<String>,

    /// BCP-47 locale tag, e.g. es-AR
    #[arg(long, global = true)]
    locale: Option<String>,

    /// First day of the week: monday or sunday
    #[arg(long, global = true)]
    week_start: Option<WeekStart>,

    /// Short date order: dmy or mdy
    #[arg(long, global = true)]
    date_order: Option<DateOrder>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Show a single day
    Day(ViewArgs),
    /// Show the week containing a date
    Week(ViewArgs),
    /// Show the month grid containing a date
    Month(ViewArgs),
    /// Print the canonical YYYY-MM-DD form of a date
    Normalize {
        /// Date as YYYY-MM-DD or in the locale's short form
        input: String,
    },
}

#[derive(Args, Debug)]
struct ViewArgs {
    /// Date to open the view at (YYYY-MM-DD); defaults to today
    #[arg(long)]
    date: Option<String>,
}

fn main() -> miette::Result<()> {
    // Initialize logging
    startup::init_logging()?;

    let cli = Cli::parse();

    // Load configuration and apply command line overrides
    let mut config = startup::load_config()?;
    apply_overrides(&mut config, &cli);
    let locale_config = startup::install_locale_config(&config)?;

    match cli.command {
        Command::Day(args) => show_view(ViewKind::Day, args, &locale_config),
        Command::Week(args) => show_view(ViewKind::Week, args, &locale_config),
        Command::Month(args) => show_view(ViewKind::Month, args, &locale_config),
        Command::Normalize { input } => {
            let normalized = normalize_date_input(&input, Some(&locale_config))?;
            println!("{}", normalized);
            Ok(())
        }
    }
}

fn apply_overrides(config: &mut Config, cli: &Cli) {
    if let Some(timezone) = &cli.timezone {
        config.timezone = timezone.clone();
    }
    if let Some(locale) = &cli.locale {
        config.locale = locale.clone();
    }
    if cli.week_start.is_some() {
        config.week_starts_on = cli.week_start;
    }
    if cli.date_order.is_some() {
        config.date_order = cli.date_order;
    }
}

fn show_view(kind: ViewKind, args: ViewArgs, config: &LocaleConfig) -> miette::Result<()> {
    let anchor = resolve_view_date(args.date.as_deref(), Some(config));
    let view = ViewRange::for_view(kind, anchor)?;
    let (from, to) = view.query_params();

    info!("Showing {} view from {} to {}", kind, from, to);

    println!("{}", view.title());
    println!("from={} to={}", from, to);

    for week in view.dates.chunks(7) {
        let row: Vec<String> = week
            .iter()
            .map(|date| {
                if !view.contains(date) {
                    format!("({})", date.format_iso())
                } else if is_today(date) {
                    format!("[{}]", date.format_iso())
                } else {
                    format!(" {} ", date.format_iso())
                }
            })
            .collect();
        println!("{}", row.join(" "));
    }

    Ok(())
}
