//! CLI command implementations.
//!
//! Contains the glue between parsed arguments and the retrieval pipeline.

use crate::cli::output::{OutputFormat, format_run_report, format_search};
use crate::cli::parser::{Cli, Commands, SessionArgs};
use crate::cli::prompt::Prompter;
use crate::core::{LengthRange, RetrievalConfig, Session};
use crate::entrez::EutilsClient;
use crate::error::{InputError, Result};
use crate::genbank::filter_genbank;
use crate::pipeline::{Retriever, RunReport};
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

/// Executes the CLI command.
///
/// # Arguments
///
/// * `cli` - Parsed CLI arguments.
///
/// # Returns
///
/// Result with output string on success.
///
/// # Errors
///
/// Returns an error if the command fails to execute.
pub fn execute(cli: &Cli) -> Result<String> {
    let format = OutputFormat::parse(&cli.format);

    match &cli.command {
        Commands::Run {
            session,
            taxid,
            min_len,
            max_len,
            max_records,
            search_cap,
            csv,
            plot,
        } => {
            let stdin = io::stdin();
            let mut prompter = Prompter::new(stdin.lock(), io::stderr());
            let config = resolve_run_config(
                &mut prompter,
                session,
                RunArgs {
                    taxid: taxid.clone(),
                    min_len: *min_len,
                    max_len: *max_len,
                    max_records: *max_records,
                    search_cap: *search_cap,
                    csv: csv.clone(),
                    plot: plot.clone(),
                },
            )?;
            cmd_run(&config, session.eutils_url.as_deref(), format)
        }
        Commands::Search {
            session,
            taxid,
            search_cap,
        } => cmd_search(session, taxid, *search_cap, format),
        Commands::Filter {
            input,
            min_len,
            max_len,
            csv,
            plot,
        } => cmd_filter(
            input,
            LengthRange::new(*min_len, *max_len),
            csv,
            plot,
            format,
        ),
    }
}

/// Run options other than the session.
#[derive(Debug, Clone)]
pub struct RunArgs {
    /// Taxonomic ID, if given.
    pub taxid: Option<String>,
    /// Minimum length, if given.
    pub min_len: Option<usize>,
    /// Maximum length, if given.
    pub max_len: Option<usize>,
    /// Fetch cap.
    pub max_records: usize,
    /// Search cap.
    pub search_cap: usize,
    /// CSV report path.
    pub csv: PathBuf,
    /// Chart path.
    pub plot: PathBuf,
}

/// Fills in a [`RetrievalConfig`], prompting for whatever is missing.
///
/// Prompts come in the order email, API key, taxonomic ID, minimum length,
/// maximum length, skipping values already supplied.
///
/// # Errors
///
/// Returns an input error if a prompt hits end of input or a length is
/// not a non-negative integer.
pub fn resolve_run_config<R: BufRead, W: Write>(
    prompter: &mut Prompter<R, W>,
    session: &SessionArgs,
    args: RunArgs,
) -> Result<RetrievalConfig> {
    let email = prompter.or_ask(session.email.clone(), "Enter your email: ", "email")?;
    let api_key = prompter.or_ask(
        session.api_key.clone(),
        "Enter your NCBI API key: ",
        "api_key",
    )?;
    let taxid = prompter.or_ask(args.taxid, "Enter taxonomic ID: ", "taxid")?;
    let min_len =
        prompter.or_ask_length(args.min_len, "Enter minimum sequence length: ", "min_len")?;
    let max_len =
        prompter.or_ask_length(args.max_len, "Enter maximum sequence length: ", "max_len")?;

    let mut config = RetrievalConfig::new(
        Session::new(email, api_key),
        taxid,
        LengthRange::new(min_len, max_len),
    );
    config.search_cap = args.search_cap;
    config.fetch_cap = args.max_records;
    config.csv_path = args.csv;
    config.plot_path = args.plot;
    Ok(config)
}

fn client(session: Session, eutils_url: Option<&str>) -> Result<EutilsClient> {
    let client = EutilsClient::new(session)?;
    Ok(match eutils_url {
        Some(url) => client.with_base_url(url),
        None => client,
    })
}

// ==================== Command Implementations ====================

fn cmd_run(
    config: &RetrievalConfig,
    eutils_url: Option<&str>,
    format: OutputFormat,
) -> Result<String> {
    let retriever = Retriever::new(client(config.session.clone(), eutils_url)?);
    let report = retriever.run(config)?;
    Ok(format_run_report(&report, format))
}

fn cmd_search(
    session_args: &SessionArgs,
    taxid: &str,
    search_cap: usize,
    format: OutputFormat,
) -> Result<String> {
    let session = Session::new(
        session_args.email.clone().unwrap_or_default(),
        session_args.api_key.clone().unwrap_or_default(),
    );
    let retriever = Retriever::new(client(session, session_args.eutils_url.as_deref())?);
    let search = retriever.search_taxid(taxid, search_cap)?;
    Ok(format_search(&search, format))
}

fn cmd_filter(
    input: &Path,
    range: LengthRange,
    csv: &Path,
    plot: &Path,
    format: OutputFormat,
) -> Result<String> {
    let file = std::fs::File::open(input).map_err(|e| InputError::FileUnreadable {
        path: input.to_string_lossy().to_string(),
        reason: e.to_string(),
    })?;
    let outcome = filter_genbank(io::BufReader::new(file), range)?;
    let report = RunReport::export(outcome, csv, plot)?;
    Ok(format_run_report(&report, format))
}
