use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;

use volcano_explorer::config::{ExplorerConfig, DEFAULT_DATASET};
use volcano_explorer::explorer::{ElevationOutcome, Explorer, Mode, DEFAULT_RANK};
use volcano_explorer::ingestion::DatasetFormat;
use volcano_explorer::processing::TieBreak;
use volcano_explorer::render::{OutputFormat, Renderer, TextRender};
use volcano_explorer::types::CategoricalField;

#[derive(Parser, Debug)]
#[command(
    name = "volcano-explorer",
    version,
    about = "Explore a volcano catalog: per-country maps, frequency rankings and elevation comparisons"
)]
struct Cli {
    /// Dataset file (.csv, .json or .ndjson).
    #[arg(long, short = 'd', env = "VOLCANO_DATASET", default_value = DEFAULT_DATASET)]
    dataset: PathBuf,

    /// Dataset format; inferred from the extension when omitted.
    #[arg(long)]
    format: Option<DatasetFormat>,

    /// Output format: text or json.
    #[arg(long, short = 'o', default_value = "text")]
    output: OutputFormat,

    /// Width in characters of the longest bar.
    #[arg(long, default_value_t = 40)]
    bar_width: usize,

    /// Ordering of equal counts in rankings: first-seen or alphabetical.
    #[arg(long, default_value = "first-seen")]
    tie_break: TieBreak,

    /// Rank used by `count` when --rank is not given.
    #[arg(long, env = "VOLCANO_DEFAULT_RANK", default_value_t = DEFAULT_RANK)]
    default_rank: usize,

    /// Show at most this many rows in `home` unless --limit is given.
    #[arg(long, env = "VOLCANO_TABLE_LIMIT")]
    table_limit: Option<usize>,

    /// Append dataset load outcomes to this file.
    #[arg(long, env = "VOLCANO_AUDIT_LOG")]
    audit_log: Option<PathBuf>,

    /// Raise log verbosity (-v info, -vv debug). RUST_LOG takes precedence.
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Show the whole catalog as a table.
    Home {
        /// Show at most this many rows.
        #[arg(long)]
        limit: Option<usize>,
    },
    /// List countries for the map, or with --eligible those allowed in elevation comparisons.
    Countries {
        #[arg(long)]
        eligible: bool,
    },
    /// Map one country's volcanoes.
    Map {
        /// Country name, exactly as in the dataset.
        country: String,
    },
    /// Rank the most frequent values of a field.
    Count {
        /// country, dominant-rock-type or primary-volcano-type.
        #[arg(long, short, default_value = "country")]
        field: CategoricalField,
        /// How many values to show (clamped to the number of distinct values).
        #[arg(long, short)]
        rank: Option<usize>,
    },
    /// Compare mean/max/min elevation across 2-5 countries.
    Elevation {
        countries: Vec<String>,
    },
    /// Read commands interactively from stdin.
    Shell,
}

/// One line typed into the interactive shell.
#[derive(Parser, Debug)]
#[command(name = "volcano-explorer", no_binary_name = true, disable_version_flag = true)]
struct ShellLine {
    #[command(subcommand)]
    command: Command,
}

impl Cli {
    fn config(&self) -> ExplorerConfig {
        ExplorerConfig {
            dataset: self.dataset.clone(),
            format: self.format,
            output: self.output,
            bar_width: self.bar_width,
            default_rank: self.default_rank,
            tie_break: self.tie_break,
            table_limit: self.table_limit,
            audit_log: self.audit_log.clone(),
        }
    }
}

fn init_logging(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default)).init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = cli.config();
    let catalog = config
        .load_request()
        .run()
        .with_context(|| format!("failed to load dataset {}", config.dataset.display()))?;

    let mut explorer = config.explorer(catalog);
    let renderer = config.renderer();
    let stdout = io::stdout();
    let mut out = stdout.lock();

    match cli.command {
        Command::Shell => run_shell(&mut explorer, &renderer, &config, io::stdin().lock(), &mut out),
        command => execute(&mut explorer, &renderer, &config, command, &mut out),
    }
}

fn emit<V, W>(renderer: &Renderer, view: &V, out: &mut W) -> Result<()>
where
    V: TextRender + Serialize,
    W: Write,
{
    let text = renderer.render(view).context("failed to serialize view")?;
    out.write_all(text.as_bytes())?;
    if !text.ends_with('\n') {
        writeln!(out)?;
    }
    Ok(())
}

fn emit_list<W: Write>(renderer: &Renderer, items: &[String], out: &mut W) -> Result<()> {
    match renderer.format {
        OutputFormat::Text => {
            for item in items {
                writeln!(out, "{item}")?;
            }
        }
        OutputFormat::Json => writeln!(out, "{}", serde_json::to_string_pretty(items)?)?,
    }
    Ok(())
}

fn execute<W: Write>(
    explorer: &mut Explorer,
    renderer: &Renderer,
    config: &ExplorerConfig,
    command: Command,
    out: &mut W,
) -> Result<()> {
    match command {
        Command::Home { limit } => emit(renderer, &explorer.home(limit.or(config.table_limit)), out),
        Command::Countries { eligible } => {
            let choices = if eligible {
                explorer.elevation_country_choices()
            } else {
                explorer.map_country_choices()
            };
            emit_list(renderer, &choices, out)
        }
        Command::Map { country } => {
            if !explorer.map_country_choices().contains(&country) {
                log::warn!("country '{country}' does not appear in the dataset (names are case-sensitive)");
            }
            let view = explorer.map(&country);
            emit(renderer, &*view, out)
        }
        Command::Count { field, rank } => emit(renderer, &explorer.counting_chart(field, rank), out),
        Command::Elevation { countries } => match explorer.elevation_chart(&countries) {
            ElevationOutcome::Chart(chart) => emit(renderer, &chart, out),
            other => match other.notice() {
                Some(notice) => emit(renderer, &notice, out),
                None => Ok(()),
            },
        },
        Command::Shell => {
            writeln!(out, "already in an interactive session")?;
            Ok(())
        }
    }
}

fn run_shell<R, W>(
    explorer: &mut Explorer,
    renderer: &Renderer,
    config: &ExplorerConfig,
    mut input: R,
    out: &mut W,
) -> Result<()>
where
    R: BufRead,
    W: Write,
{
    let modes: Vec<&str> = Mode::ALL.iter().map(|m| m.label()).collect();
    writeln!(
        out,
        "Volcanoes! {} records loaded. Modes: {}.",
        explorer.catalog().len(),
        modes.join(", ")
    )?;
    writeln!(out, "Type 'help' for commands, 'stats' for cache counters, 'quit' to leave.")?;

    let mut line = String::new();
    loop {
        write!(out, "> ")?;
        out.flush()?;
        line.clear();
        if input.read_line(&mut line)? == 0 {
            break;
        }

        let words = split_words(&line);
        match words.first().map(String::as_str) {
            None => continue,
            Some("quit" | "exit") => break,
            Some("stats") => {
                let stats = explorer.map_cache_stats();
                writeln!(
                    out,
                    "map cache: {} entries, {} hits, {} misses",
                    stats.entries, stats.hits, stats.misses
                )?;
                continue;
            }
            Some(_) => {}
        }

        match ShellLine::try_parse_from(words) {
            Ok(parsed) => execute(explorer, renderer, config, parsed.command, out)?,
            Err(e) => write!(out, "{e}")?,
        }
    }
    Ok(())
}

/// Split a shell line on whitespace, keeping quoted runs together ("United States").
fn split_words(line: &str) -> Vec<String> {
    let mut words = Vec::new();
    let mut current = String::new();
    let mut quote: Option<char> = None;
    let mut in_word = false;

    for ch in line.chars() {
        match quote {
            Some(q) if ch == q => quote = None,
            Some(_) => current.push(ch),
            None if ch == '"' || ch == '\'' => {
                quote = Some(ch);
                in_word = true;
            }
            None if ch.is_whitespace() => {
                if in_word {
                    words.push(std::mem::take(&mut current));
                    in_word = false;
                }
            }
            None => {
                current.push(ch);
                in_word = true;
            }
        }
    }
    if in_word {
        words.push(current);
    }
    words
}

#[cfg(test)]
mod tests {
    use super::*;
    use volcano_explorer::types::{Catalog, VolcanoRecord};

    #[test]
    fn split_words_keeps_quoted_names() {
        assert_eq!(
            split_words("elevation \"United States\" Chile 'Papua New Guinea'\n"),
            vec!["elevation", "United States", "Chile", "Papua New Guinea"]
        );
        assert!(split_words("   \n").is_empty());
        assert_eq!(split_words("map \"\""), vec!["map", ""]);
    }

    #[test]
    fn shell_line_parses_subcommands() {
        let parsed = ShellLine::try_parse_from(["count", "--field", "rock", "--rank", "3"]).unwrap();
        match parsed.command {
            Command::Count { field, rank } => {
                assert_eq!(field, CategoricalField::DominantRockType);
                assert_eq!(rank, Some(3));
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn cli_defaults() {
        let cli = Cli::try_parse_from(["volcano-explorer", "elevation", "Chile", "Peru"]).unwrap();
        let cfg = cli.config();
        assert_eq!(cfg.default_rank, 5);
        assert_eq!(cfg.table_limit, None);
        assert_eq!(cfg.output, OutputFormat::Text);
        assert!(matches!(cli.command, Command::Elevation { ref countries } if countries.len() == 2));
    }

    #[test]
    fn cli_overrides_rank_and_table_limit() {
        let cli = Cli::try_parse_from([
            "volcano-explorer",
            "--default-rank",
            "2",
            "--table-limit",
            "1",
            "home",
        ])
        .unwrap();
        let cfg = cli.config();
        assert_eq!(cfg.default_rank, 2);
        assert_eq!(cfg.table_limit, Some(1));

        let mut explorer = cfg.explorer(sample_catalog());
        let text = run(&mut explorer, &cfg, Command::Home { limit: None });
        assert!(text.contains("... 1 of 22 rows shown"));
        let text = run(&mut explorer, &cfg, Command::Count { field: CategoricalField::Country, rank: None });
        assert!(text.starts_with("Top 2 Volcano Counts for Countries"));
    }

    fn sample_catalog() -> Catalog {
        let mut records = Vec::new();
        for i in 0..10 {
            records.push(VolcanoRecord::new(format!("c{i}"), "Chile", 2000 + i));
            records.push(VolcanoRecord::new(format!("j{i}"), "Japan", 1000 + i));
        }
        records.push(VolcanoRecord::new("Etna", "Italy", 3295));
        records.push(VolcanoRecord::new("Vesuvius", "Italy", 1281));
        Catalog::new(records)
    }

    fn run(explorer: &mut Explorer, config: &ExplorerConfig, command: Command) -> String {
        let mut out = Vec::new();
        execute(explorer, &config.renderer(), config, command, &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    fn elevation(countries: &[&str]) -> Command {
        Command::Elevation {
            countries: countries.iter().map(|c| c.to_string()).collect(),
        }
    }

    #[test]
    fn elevation_names_ineligible_countries() {
        let config = ExplorerConfig::default();
        let mut explorer = config.explorer(sample_catalog());
        let text = run(&mut explorer, &config, elevation(&["japan", "Italy"]));
        assert_eq!(
            text,
            "Only countries with more than 9 volcanoes can be compared; not eligible: japan, Italy\n\
             choose from: Chile, Japan\n"
        );

        let text = run(&mut explorer, &config, elevation(&["Japan", "Chile"]));
        assert!(text.starts_with("Aggregate Information for Selected Countries' Elevation\nChile\n"));
    }

    #[test]
    fn elevation_guidance_is_json_in_json_mode() {
        let config = ExplorerConfig {
            output: OutputFormat::Json,
            ..Default::default()
        };
        let mut explorer = config.explorer(sample_catalog());

        let text = run(&mut explorer, &config, elevation(&["Chile"]));
        let v: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(v, serde_json::json!({"guidance": "Please select at least 1 more country"}));

        let text = run(&mut explorer, &config, elevation(&["Chile", "Italy"]));
        let v: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(v["rejected"], serde_json::json!(["Italy"]));
        assert_eq!(v["choices"], serde_json::json!(["Chile", "Japan"]));
    }
}
