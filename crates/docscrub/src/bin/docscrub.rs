// ABOUTME: CLI binary for docscrub: cleans one HTML file and writes file/tables/content artifacts.
// ABOUTME: Prompts for the input path and menu options when they are not given as arguments.

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::Parser;
use docscrub::menu::render_menu;
use docscrub::options::DEFAULT_OUTPUT_DIR;
use docscrub::{parse_tokens, CleanerOptions, DocumentProcessor, Plan, ProcessError};
use inquire::{InquireError, Text};
use tracing_subscriber::{filter::LevelFilter, fmt};

#[derive(Parser, Debug)]
#[command(name = "docscrub")]
#[command(about = "Clean an HTML lesson and split out its tables and readable content")]
struct Args {
    /// HTML file to process (prompted for when omitted)
    #[arg()]
    path: Option<PathBuf>,

    /// Directory receiving file-N.html, tables-N.html and content-N.html
    #[arg(short = 'o', long = "output-dir", default_value = DEFAULT_OUTPUT_DIR)]
    output_dir: PathBuf,

    /// Menu option tokens: 0 clean, 1 remove tables, 2 separate tables, 3 save content, 4 exit
    #[arg(short = 'O', long = "option")]
    options: Vec<String>,

    /// JSON file toggling individual cleanup rules
    #[arg(long = "rules")]
    rules: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count)]
    verbose: u8,
}

fn init_tracing(level: LevelFilter) {
    let subscriber = fmt()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();

    if tracing::subscriber::set_global_default(subscriber).is_err() {
        tracing::warn!("Tracing subscriber already set; skipping re-initialization.");
    }
}

fn log_level(verbose: u8) -> LevelFilter {
    match verbose {
        0 => LevelFilter::WARN,
        1 => LevelFilter::INFO,
        2 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    }
}

/// Stand-in path for failures reading the terminal before a file is chosen.
const STDIN_PATH: &str = "<stdin>";

/// Prompt for a line of input. `Ok(None)` when the user cancels.
fn prompt(message: &str, help: &str, path: &Path, op: &str) -> docscrub::Result<Option<String>> {
    match Text::new(message).with_help_message(help).prompt() {
        Ok(value) => Ok(Some(value)),
        Err(InquireError::OperationCanceled | InquireError::OperationInterrupted) => Ok(None),
        Err(err) => Err(prompt_error(path, op, err)),
    }
}

fn prompt_error(path: &Path, op: &str, err: InquireError) -> ProcessError {
    ProcessError::unexpected(path, op, Some(anyhow::Error::new(err)))
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_tracing(log_level(args.verbose));

    let path = match args.path {
        Some(path) => path,
        None => match prompt(
            "Enter the path to the HTML file:",
            "e.g. lessons/aula-1.html",
            Path::new(STDIN_PATH),
            "prompt input path",
        ) {
            Ok(Some(value)) if !value.trim().is_empty() => PathBuf::from(value.trim()),
            Ok(_) => {
                println!("No file selected.");
                return ExitCode::SUCCESS;
            }
            Err(e) => {
                eprintln!("Error: {}", e);
                return ExitCode::from(1);
            }
        },
    };

    let cleaner_options = match &args.rules {
        Some(rules) => match CleanerOptions::from_json_file(rules) {
            Ok(opts) => opts,
            Err(e) => {
                eprintln!("error loading rules: {}", e);
                return ExitCode::from(1);
            }
        },
        None => CleanerOptions::default(),
    };

    let mut processor = match DocumentProcessor::builder()
        .output_dir(&args.output_dir)
        .cleaner_options(cleaner_options)
        .open(&path)
    {
        Ok(processor) => processor,
        Err(e) => {
            eprintln!("Error initializing processor: {}", e);
            return ExitCode::from(1);
        }
    };

    let tokens = if args.options.is_empty() {
        println!("{}", render_menu());
        match prompt(
            "Enter the numbers of the desired options (e.g., 0 3):",
            "space separated",
            processor.path(),
            "prompt options",
        ) {
            Ok(Some(value)) => vec![value],
            Ok(None) => vec![],
            Err(e) => {
                eprintln!("Error: {}", e);
                return ExitCode::from(1);
            }
        }
    } else {
        args.options.clone()
    };

    let selection = parse_tokens(tokens.iter().map(String::as_str));
    for token in &selection.unknown {
        tracing::warn!(token = %token, "ignoring unknown option");
    }

    match selection.plan() {
        Plan::Exit => {
            println!("Exiting...");
            return ExitCode::SUCCESS;
        }
        Plan::Nothing => {
            println!("No options selected.");
            return ExitCode::SUCCESS;
        }
        Plan::ContentOnly => {
            println!("Saving content...");
            match processor.save_only_content() {
                Ok(artifact) => println!("Content saved as: {}", artifact.path.display()),
                Err(e) => {
                    eprintln!("Error: {}", e);
                    return ExitCode::from(1);
                }
            }
        }
        Plan::Process(options) => {
            if options.separate_content {
                println!("Saving content...");
            }
            if options.wrap_images {
                println!("Cleaning HTML content...");
            }
            if options.separate_tables {
                println!("Separating and removing tables...");
            } else if options.remove_tables {
                println!("Removing tables...");
            }

            match processor.process(options) {
                Ok(report) => {
                    if let Some(content) = &report.content {
                        println!("Content saved as: {}", content.path.display());
                    }
                    if let Some(tables) = &report.tables {
                        println!("Tables saved as: {}", tables.path.display());
                    } else if options.separate_tables {
                        println!("No tables found to separate.");
                    }
                    println!("File saved as: {}", report.file.path.display());
                }
                Err(e) => {
                    eprintln!("Error: {}", e);
                    return ExitCode::from(1);
                }
            }
        }
    }

    println!("Process completed.");
    ExitCode::SUCCESS
}
