use clap::Parser;
use jiff::civil::DateTime;
use jiff::Zoned;
use occurs::{ConfigError, ScheduleConfiguration};
use std::path::{Path, PathBuf};
use std::{fs, process};
use tracing_subscriber::EnvFilter;

const MAX_OCCURRENCES: usize = 1000;

#[derive(Parser)]
#[command(
    name = "occurs",
    about = "Next run times and descriptions of schedule configurations",
    version
)]
struct Cli {
    /// Path to a JSON schedule configuration
    #[arg(env = "OCCURS_CONFIG")]
    config: Option<PathBuf>,

    /// Reference date-time (e.g., 2020-01-08T06:00:00). Defaults to the local wall clock.
    #[arg(long)]
    now: Option<String>,

    /// Number of occurrences to show
    #[arg(short, long, default_value = "1")]
    n: usize,

    /// Output as JSON
    #[arg(long)]
    json: bool,

    /// Validate the configuration without computing
    #[arg(long)]
    check: bool,

    /// Print the schedule description
    #[arg(long)]
    describe: bool,

    /// Locale tag for --describe (EN-US, EN-UK, ES-ES)
    #[arg(long)]
    locale: Option<String>,

    /// Show the normalized configuration document as JSON
    #[arg(long)]
    parse: bool,

    /// Log resolution steps to stderr
    #[arg(short, long)]
    verbose: bool,
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn fail(err: ConfigError) -> ! {
    eprintln!("error: {err}");
    process::exit(1);
}

fn load(path: &Path) -> ScheduleConfiguration {
    let json = match fs::read_to_string(path) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("error: cannot read {}: {e}", path.display());
            process::exit(1);
        }
    };
    tracing::debug!(path = %path.display(), "loading configuration");
    ScheduleConfiguration::from_json(&json).unwrap_or_else(|e| fail(e))
}

fn print_json(value: &serde_json::Value) {
    match serde_json::to_string(value) {
        Ok(json) => println!("{json}"),
        Err(e) => {
            eprintln!("error: failed to serialize: {e}");
            process::exit(1);
        }
    }
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let path = match cli.config {
        Some(ref path) => path,
        None => {
            eprintln!("error: no configuration provided (pass a path or set OCCURS_CONFIG)");
            process::exit(2);
        }
    };

    let mut schedule = load(path);
    if let Some(ref tag) = cli.locale {
        schedule = schedule.with_locale(tag.as_str());
    }

    if cli.check {
        println!("\u{2713} valid");
        process::exit(0);
    }

    if cli.parse {
        match schedule.to_json() {
            Ok(json) => {
                println!("{json}");
                process::exit(0);
            }
            Err(e) => fail(e),
        }
    }

    let now: DateTime = match cli.now {
        Some(ref s) => match s.parse() {
            Ok(dt) => dt,
            Err(e) => {
                eprintln!("error: invalid --now datetime: {e}");
                process::exit(2);
            }
        },
        None => Zoned::now().datetime(),
    };

    if cli.describe {
        let text = schedule.describe(now).unwrap_or_else(|e| fail(e));
        if cli.json {
            print_json(&serde_json::Value::String(text));
        } else {
            println!("{text}");
        }
        process::exit(0);
    }

    let mut n = cli.n;
    if n > MAX_OCCURRENCES {
        eprintln!("warning: capped at {MAX_OCCURRENCES} occurrences");
        n = MAX_OCCURRENCES;
    }

    let results: Vec<DateTime> = match schedule.next_n_from(now, n) {
        Ok(slots) => slots.into_iter().flatten().collect(),
        Err(e) => fail(e),
    };

    if results.is_empty() {
        eprintln!("no upcoming occurrences");
        process::exit(0);
    }

    if cli.json {
        let iso_strings = results.iter().map(|dt| dt.to_string().into()).collect();
        print_json(&serde_json::Value::Array(iso_strings));
    } else {
        for dt in &results {
            println!("{dt}");
        }
    }
}
