use chrono::Local;
use clap::{Parser, Subcommand};
use formfill::prelude::*;
use std::fs;
use tracing::Level;

/// Inspect, fill and submit script-embedded web forms
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Print debug diagnostics (repeat for trace output)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print a commented listing of every field of the form
    Schema {
        /// Form URL (viewform or formResponse)
        url: String,
        /// Output file path (default: console)
        #[arg(short, long)]
        output: Option<String>,
        /// Only include required fields
        #[arg(short = 'r', long)]
        required: bool,
        /// Don't include explain comment for each field
        #[arg(short = 'c', long)]
        no_comment: bool,
        /// Pre-fill the listing with random answers
        #[arg(long)]
        fill: bool,
    },
    /// Fill the form and submit the answers
    Submit {
        /// Form URL (viewform or formResponse)
        url: String,
        /// Only include required fields
        #[arg(short = 'r', long)]
        required: bool,
        /// JSON file with scripted answers (overrides and daily roster)
        #[arg(long)]
        values: Option<String>,
        /// Build and print the payload without sending it
        #[arg(long)]
        dry_run: bool,
    },
}

fn main() {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => Level::INFO,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::fmt().with_max_level(level).init();

    let client = HttpClient::new(ClientConfig::default())
        .unwrap_or_else(|e| exit_with_error(&format!("Failed to create HTTP client: {}", e)));

    match cli.command {
        Command::Schema {
            url,
            output,
            required,
            no_comment,
            fill,
        } => run_schema(&client, &url, output, required, !no_comment, fill),
        Command::Submit {
            url,
            required,
            values,
            dry_run,
        } => run_submit(&client, &url, required, values, dry_run),
    }
}

fn fetch_form(client: &HttpClient, url: &str, only_required: bool) -> Form {
    Form::builder(client)
        .only_required(only_required)
        .fetch(url)
        .unwrap_or_else(|e| exit_with_error(&format!("Can't get form entries: {}", e)))
}

fn run_schema(
    client: &HttpClient,
    url: &str,
    output: Option<String>,
    only_required: bool,
    with_comment: bool,
    fill: bool,
) {
    let form = fetch_form(client, url, only_required);

    let listing = if fill {
        let outcome = form
            .fill(&mut RandomFill::new())
            .unwrap_or_else(|e| exit_with_error(&format!("Failed to fill form: {}", e)));
        let history = outcome.page_history_field();
        let mut fields = outcome.fields;
        fields.extend(history);
        SchemaFormatter::format_fields(&fields, with_comment)
    } else {
        form.render(with_comment)
    };

    match output {
        None => println!("{}", listing),
        Some(path) => {
            fs::write(&path, listing).unwrap_or_else(|e| {
                exit_with_error(&format!("Failed to write '{}': {}", path, e))
            });
            println!("Saved to {}", path);
        }
    }
}

fn run_submit(
    client: &HttpClient,
    url: &str,
    only_required: bool,
    values_path: Option<String>,
    dry_run: bool,
) {
    let form = fetch_form(client, url, only_required);

    let outcome = match values_path {
        Some(path) => {
            let config = ScriptedConfig::from_file(&path)
                .unwrap_or_else(|e| exit_with_error(&e.to_string()));
            let today = Local::now().date_naive();
            form.fill(&mut ScriptedFill::for_date(config, today, RandomFill::new()))
        }
        None => form.fill(&mut RandomFill::new()),
    }
    .unwrap_or_else(|e| exit_with_error(&format!("Failed to fill form: {}", e)));

    let payload = outcome.to_payload();
    println!("Submitting to {}", form.response_url());
    println!("Data: {}", payload.to_json());

    if dry_run {
        println!("Dry run, nothing sent.");
        return;
    }
    match form.submit(client, &payload) {
        Ok(()) => println!("Done!!!"),
        Err(e) => exit_with_error(&format!("Can't submit form: {}", e)),
    }
}

fn exit_with_error(message: &str) -> ! {
    eprintln!("\nError: {}", message);
    std::process::exit(1);
}
