use std::fs;
use std::io::{self, Write};
use std::process::ExitCode;

use clap::{ArgAction, Parser, Subcommand};
use tracing::Level;

use expr_analyzer::render::{Format, RenderOptions};
use expr_analyzer::{analyze, analyze_batch, AnalysisResult, EXAMPLES};

#[derive(Parser)]
#[command(name = "expr-analyzer")]
#[command(about = "Lexer and LL(1) parser for +/* expressions", version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Формат вывода (см. `formats`)
    #[arg(short, long, global = true, default_value = "text", value_parser = parse_format)]
    format: Format,

    /// Не выводить дерево разбора
    #[arg(long, global = true)]
    no_tree: bool,

    /// Подробнее логи: -v info, -vv debug, -vvv trace
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Анализирует каждое выражение отдельно
    Analyze {
        /// Выражения
        #[arg(required = true)]
        expressions: Vec<String>,
    },

    /// Файл с выражениями, по одному на строку ("-" для stdin)
    Batch {
        /// Исходник
        input: String,
    },

    /// Список встроенных примеров
    Examples {
        /// Сразу проанализировать их
        #[arg(long)]
        run: bool,
    },

    /// Список поддерживаемых форматов вывода
    Formats,
}

// Неизвестный формат отсекается clap'ом ещё до анализа
fn parse_format(name: &str) -> Result<Format, String> {
    Format::from_name(name).ok_or_else(|| {
        let known: Vec<&str> = Format::all().iter().map(|f| f.name()).collect();
        format!("unknown format '{}', expected one of: {}", name, known.join(", "))
    })
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };

    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(io::stderr)
        .init();
}

/// 0 - всё принято, 1 - есть отвергнутые выражения,
/// 2 - ошибка командной строки (так выходит clap).
fn main() -> Result<ExitCode, Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let results: Vec<AnalysisResult> = match cli.command {
        Commands::Analyze { expressions } => {
            expressions.iter().map(|e| analyze(e)).collect()
        }
        Commands::Batch { input } => {
            let source = if input == "-" {
                io::read_to_string(io::stdin())?
            } else {
                fs::read_to_string(&input)?
            };
            tracing::info!(%input, bytes = source.len(), "read batch");
            analyze_batch(&source)
        }
        Commands::Examples { run: false } => {
            for example in EXAMPLES {
                println!("{}", example);
            }
            return Ok(ExitCode::SUCCESS);
        }
        Commands::Examples { run: true } => {
            EXAMPLES.iter().map(|e| analyze(e)).collect()
        }
        Commands::Formats => {
            println!("Supported formats:");
            for format in Format::all() {
                println!("  {:6} - {}", format.name(), format.description());
            }
            return Ok(ExitCode::SUCCESS);
        }
    };

    let renderer = cli.format.create(RenderOptions { show_tree: !cli.no_tree });
    let stdout = io::stdout();
    let mut out = stdout.lock();
    renderer.render(&results, &mut out)?;
    out.flush()?;

    let rejected = results.iter().filter(|r| !r.accepted).count();
    tracing::info!(total = results.len(), rejected, "done");

    if rejected == 0 {
        Ok(ExitCode::SUCCESS)
    } else {
        Ok(ExitCode::FAILURE)
    }
}
