//! Command line front end: view the supported frames of an MP3 file or
//! replace the text of one of them.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;
use tagframe::{Config, EditRequest, Error, Rewrite, TagCollection, CATALOG};

#[derive(Parser, Debug)]
#[command(name = "tagframe", version)]
#[command(about = "View and edit ID3v2 text frames of MP3 files")]
struct Args {
    /// File an edit is staged in before it replaces the original
    #[arg(long, env = "TAGFRAME_TEMP", default_value = "temp.mp3", global = true)]
    temp_file: PathBuf,

    /// Maximum number of frames shown by view
    #[arg(long, default_value_t = CATALOG.len(), global = true)]
    limit: usize,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Show the supported frames of a file
    View { path: PathBuf },

    /// Replace the text of one frame
    Edit {
        /// Frame selector, see `tagframe codes`
        #[arg(allow_hyphen_values = true)]
        selector: String,

        path: PathBuf,

        /// New text; words are joined with single spaces
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        text: Vec<String>,
    },

    /// List the frame selectors accepted by edit
    Codes,
}

const RULE: &str = "===========================================================================";

fn print_tags(tags: &TagCollection) {
    println!("{}", RULE);
    println!("| {:<15}:{:6}{:<50}|", "Tag Name", "", "Tag Data");
    println!("{}", RULE);
    for frame in tags {
        println!("| {:<15}:{:6}{:<50}|", frame.kind.label(), "", frame.text());
    }
    println!("{}", RULE);
}

fn print_codes() {
    println!("===================================");
    println!("| {:<15}:{:>15} |", "Tag Code", "Tag Name");
    println!("===================================");
    for kind in CATALOG.iter() {
        println!("| {:<15}:{:>15} |", kind.selector(), kind.label());
    }
    println!("===================================");
}

fn run(command: Command, config: &Config) -> Result<(), Error> {
    match command {
        Command::View { path } => {
            let tags = tagframe::view(&path, config)?;
            print_tags(&tags);
        }
        Command::Edit {
            selector,
            path,
            text,
        } => {
            let request = EditRequest::new(&selector, &path, &text)?;
            match tagframe::edit(&request, config)? {
                Rewrite::Replaced { .. } => println!("INFO: Tag Edited Successfully"),
                Rewrite::Unchanged => println!(
                    "WARNING: no {} frame in {}, nothing changed",
                    request.kind,
                    path.display()
                ),
            }
        }
        Command::Codes => print_codes(),
    }
    Ok(())
}

// RUST_LOG wins; info when it is unset or empty
fn log_filter(directives: &str) -> EnvFilter {
    EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .parse_lossy(directives)
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(log_filter(
            &std::env::var(EnvFilter::DEFAULT_ENV).unwrap_or_default(),
        ))
        .init();

    let args = Args::parse();
    let config = Config {
        temp_path: args.temp_file,
        frame_limit: args.limit,
    };

    match run(args.command, &config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("ERROR: {}", e);
            ExitCode::FAILURE
        }
    }
}
