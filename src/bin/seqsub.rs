use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand};
use miette::IntoDiagnostic;
use tracing::info;
use tracing_subscriber::EnvFilter;

use seqsub::accession::RecordType;
use seqsub::app::{App, FormInput, SubmitOptions, read_json};
use seqsub::config::ConfigLoader;
use seqsub::entry::SequenceEntryToEdit;
use seqsub::error::SeqsubError;
use seqsub::output::JsonOutput;
use seqsub::store::OutputDir;

#[derive(Parser)]
#[command(name = "seqsub")]
#[command(about = "Build submission and revision payloads for sequence entries")]
#[command(version, author)]
struct Cli {
    #[arg(long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    #[command(about = "Write metadata.tsv and sequences.fasta for a new entry")]
    Submit(SubmitArgs),
    #[command(about = "Print the reviewed-entry request body for an edited entry")]
    Revise(ReviseArgs),
    #[command(about = "Parse accession lists for a dataset or seqset")]
    Accessions(AccessionsArgs),
    #[command(about = "Show configured metadata fields grouped by header")]
    Fields,
}

#[derive(Args)]
struct SubmitArgs {
    #[arg(long)]
    form: PathBuf,

    #[arg(long, default_value = ".")]
    out: String,

    #[arg(long)]
    submission_id: Option<String>,

    #[arg(long)]
    allow_no_sequences: bool,

    #[arg(long)]
    dry_run: bool,
}

#[derive(Args)]
struct ReviseArgs {
    #[arg(long)]
    entry: PathBuf,

    #[arg(long)]
    edits: Option<PathBuf>,
}

#[derive(Args)]
struct AccessionsArgs {
    #[arg(long, default_value = "")]
    focal: String,

    #[arg(long, default_value = "")]
    background: String,

    #[arg(long = "type")]
    record_type: Option<RecordType>,
}

fn main() -> ExitCode {
    if let Err(report) = run() {
        eprintln!("{report:?}");
        if let Some(error) = report.downcast_ref::<SeqsubError>() {
            return ExitCode::from(map_exit_code(error));
        }
        return ExitCode::from(1);
    }
    ExitCode::SUCCESS
}

fn map_exit_code(error: &SeqsubError) -> u8 {
    match error {
        SeqsubError::NothingToSubmit
        | SeqsubError::NoSequences
        | SeqsubError::MissingSubmissionId => 2,
        SeqsubError::MissingConfig => 2,
        SeqsubError::Filesystem(_) | SeqsubError::Tsv(_) => 3,
        _ => 1,
    }
}

fn run() -> miette::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = ConfigLoader::resolve(cli.config.as_deref())?;
    info!(organism = %config.organism, segments = config.segments.len(), "config loaded");
    let app = App::new(config);

    match cli.command {
        Commands::Submit(args) => {
            let form: FormInput = read_json(&args.form)?;
            let options = SubmitOptions {
                require_sequences: !args.allow_no_sequences,
                dry_run: args.dry_run,
            };
            let result = app.submit(
                &form,
                args.submission_id.as_deref(),
                &OutputDir::new(args.out),
                options,
            )?;
            JsonOutput::print_submit(&result).into_diagnostic()
        }
        Commands::Revise(args) => {
            let entry: SequenceEntryToEdit = read_json(&args.entry)?;
            let edits = args
                .edits
                .as_deref()
                .map(read_json::<FormInput>)
                .transpose()?;
            let result = app.revise(&entry, edits.as_ref())?;
            info!(fields = ?result.modified_fields, "modified fields");
            JsonOutput::print_revise(&result).into_diagnostic()
        }
        Commands::Accessions(args) => {
            let result = app.accessions(&args.focal, &args.background, args.record_type);
            JsonOutput::print_accessions(&result).into_diagnostic()
        }
        Commands::Fields => JsonOutput::print_fields(&app.fields()).into_diagnostic(),
    }
}
