mod table;

use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use std::io::Read;
use std::path::PathBuf;

use github_lens_common::Config;
use github_lens_core::{
    bucket_count, build_reports, export_json, language_distribution, read_logins, rounding_digits, CountMap,
    GithubClient, ReportSettings,
};

// validate bucket count at CLI parse time
fn parse_top_n(s: &str) -> Result<usize, String> {
    let v: i64 = s.parse().map_err(|_| format!("not an integer: {s}"))?;
    bucket_count(v).map_err(|e| e.to_string())
}

fn parse_digits(s: &str) -> Result<u32, String> {
    let v: u32 = s.parse().map_err(|_| format!("not a non-negative integer: {s}"))?;
    rounding_digits(v).map_err(|e| e.to_string())
}

#[derive(Parser)]
#[command(name = "github-lens", version, about = "GitHub user language and activity report")]
struct Cli {
    /// -v for info, -vv for debug (RUST_LOG overrides)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// fetch every login listed in FILES, print a table and export JSON
    Report {
        #[arg(required = true)]
        files: Vec<PathBuf>,
        #[arg(long)]
        output: Option<PathBuf>,
        #[arg(long, value_parser = parse_top_n, allow_hyphen_values = true)]
        top: Option<usize>,
        #[arg(long)]
        no_table: bool,
    },
    /// distribution of a local JSON object of key → count ("-" reads stdin)
    Dist {
        counts: String,
        #[arg(long, value_parser = parse_top_n, allow_hyphen_values = true)]
        top: Option<usize>,
        #[arg(long, value_parser = parse_digits)]
        digits: Option<u32>,
    },
    Completions { shell: Shell },
}

fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level)).init();
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    let config = Config::load().unwrap_or_else(|e| {
        log::warn!("{e}; using default config");
        Config::default()
    });
    match cli.command {
        Commands::Report { files, output, top, no_table } => run_report(files, output, top, no_table, &config)?,
        Commands::Dist { counts, top, digits } => run_dist(&counts, top, digits, &config)?,
        Commands::Completions { shell } => {
            clap_complete::generate(shell, &mut Cli::command(), "github-lens", &mut std::io::stdout());
        }
    }
    Ok(())
}

fn run_report(
    files: Vec<PathBuf>,
    output: Option<PathBuf>,
    top: Option<usize>,
    no_table: bool,
    config: &Config,
) -> anyhow::Result<()> {
    let logins = read_logins(&files);
    if logins.is_empty() {
        anyhow::bail!("no logins found in input files");
    }
    let mut settings = ReportSettings::from_config(&config.distribution)?;
    if let Some(n) = top {
        settings.top_n = n;
    }
    log::info!(
        "{} logins, top {}, window {}-{}",
        logins.len(), settings.top_n, settings.window.min_year(), settings.window.max_year()
    );

    let client = GithubClient::new(&config.github)?;
    let reports = build_reports(&client, &logins, &settings);
    if reports.len() < logins.len() {
        log::warn!("{} of {} users could not be fetched", logins.len() - reports.len(), logins.len());
    }
    if !no_table {
        print!("{}", table::render_reports(&reports));
    }

    let out_path = output.unwrap_or_else(|| PathBuf::from(&config.export.output_path));
    export_json(&out_path, &reports)?;
    println!("Exported {} users to {}", reports.len(), out_path.display());
    Ok(())
}

fn run_dist(counts: &str, top: Option<usize>, digits: Option<u32>, config: &Config) -> anyhow::Result<()> {
    let text = if counts == "-" {
        let mut s = String::new();
        std::io::stdin().read_to_string(&mut s)?;
        s
    } else {
        std::fs::read_to_string(counts)?
    };
    let counts: CountMap<String> = serde_json::from_str(&text)?;
    let top_n = match top {
        Some(n) => n,
        None => bucket_count(config.distribution.top_n)?,
    };
    let digits = match digits {
        Some(d) => d,
        None => rounding_digits(config.distribution.language_digits)?,
    };
    println!("{}", language_distribution(&counts, top_n, digits));
    Ok(())
}
