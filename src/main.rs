use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use indicatif::ProgressBar;
use mwdump::config::PROGRESS_INTERVAL;
use mwdump::stats::DumpStats;
use mwdump::DumpParser;
use std::io::{self, BufWriter, Write};
use std::process::ExitCode;
use std::time::Instant;
use tracing::{error, info, warn, Level};
use tracing_subscriber::FmtSubscriber;

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

#[derive(Parser)]
#[command(name = "mwdump")]
#[command(about = "Stream pages out of MediaWiki XML dumps")]
struct Cli {
    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Count pages, redirects and namespaces in a dump
    Stats(StatsArgs),
    /// Write pages as JSON Lines to stdout
    Pages(PagesArgs),
}

#[derive(Args)]
struct StatsArgs {
    /// Path to the dump file (.xml, .xml.bz2 or .xml.gz)
    #[arg(short, long)]
    input: String,

    /// Print the summary as JSON
    #[arg(long)]
    json: bool,
}

#[derive(Args)]
struct PagesArgs {
    /// Path to the dump file (.xml, .xml.bz2 or .xml.gz)
    #[arg(short, long)]
    input: String,

    /// Only emit pages in this namespace (by name; "" is the main namespace)
    #[arg(long)]
    namespace: Option<String>,

    /// Stop after emitting this many pages
    #[arg(long)]
    limit: Option<u64>,

    /// Drop page text from the output
    #[arg(long)]
    no_text: bool,
}

fn run_stats(args: StatsArgs) -> Result<()> {
    let start = Instant::now();
    let mut parser = DumpParser::new(&args.input);
    let mut stats = DumpStats::new();
    let pb = ProgressBar::new_spinner();

    for page in parser
        .pages()
        .with_context(|| format!("Failed to open dump: {}", args.input))?
    {
        let page = page.with_context(|| format!("Failed to parse dump: {}", args.input))?;
        stats.record(&page);
        if stats.pages() % PROGRESS_INTERVAL == 0 {
            pb.set_message(format!("{} pages", stats.pages()));
            pb.tick();
        }
    }
    pb.finish_and_clear();

    let summary = stats.summarize(parser.namespaces());
    info!(
        duration_secs = start.elapsed().as_secs_f64(),
        pages = summary.pages,
        "Stats complete"
    );

    if args.json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
        return Ok(());
    }

    println!("=== Summary ===");
    println!("Pages:               {}", summary.pages);
    println!("Redirects:           {}", summary.redirects);
    println!("Pages without text:  {}", summary.without_text);
    println!("Namespaces declared: {}", summary.namespaces_declared);
    println!();
    for ns in &summary.namespaces {
        let name = if ns.name.is_empty() { "(main)" } else { &ns.name };
        println!("{:>6}  {:<24} {}", ns.key, name, ns.pages);
    }

    Ok(())
}

fn run_pages(args: PagesArgs) -> Result<()> {
    let mut parser = DumpParser::new(&args.input);
    let stdout = io::stdout();
    let mut out = BufWriter::with_capacity(128 * 1024, stdout.lock());
    let mut emitted = 0u64;

    {
        let pages = parser
            .pages()
            .with_context(|| format!("Failed to open dump: {}", args.input))?;

        for page in pages {
            if args.limit.is_some_and(|limit| emitted >= limit) {
                break;
            }
            let mut page = page.with_context(|| format!("Failed to parse dump: {}", args.input))?;
            if let Some(wanted) = &args.namespace {
                if &page.namespace.name != wanted {
                    continue;
                }
            }
            if args.no_text {
                page.text = None;
            }
            serde_json::to_writer(&mut out, &page)?;
            out.write_all(b"\n")?;
            emitted += 1;
        }
    }
    out.flush()?;

    if let Some(wanted) = &args.namespace {
        if parser.namespaces().key_for_name(wanted).is_none() {
            warn!(namespace = %wanted, "Namespace is not declared in this dump");
        }
    }
    info!(pages = emitted, "Pages written");

    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_writer(io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber).expect("Failed to set tracing subscriber");

    let result = match cli.command {
        Commands::Stats(args) => run_stats(args),
        Commands::Pages(args) => run_pages(args),
    };

    match result {
        Ok(()) => {
            info!("Completed successfully");
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("Error: {:#}", e);
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}
