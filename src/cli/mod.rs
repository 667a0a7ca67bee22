//! Command-line front end: search a saved page and print the result.

use std::path::{Path, PathBuf};
use std::time::Instant;

use log::{debug, info};

use pagemark_core::{Document, DomError, NodeId, SearchSession, Viewport, ViewportError};

use crate::config::{Config, ConfigError};
use crate::html::load_document;


pub const USAGE: &str = "\
USAGE:
    pagemark [OPTIONS] <FILE> <TERM>

OPTIONS:
    --next <N>         Step forward N matches after the search
    --prev <N>         Step backward N matches after the search
    --restore          Clear the highlights and print the restored page
    --config <PATH>    Read configuration from PATH
    --print-config     Print the default configuration to stdout
    --version, -V      Print version information
    --help, -h         Print this help message";

#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error("{0}\n\n{USAGE}")]
    Usage(String),
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("cannot build page: {0}")]
    Page(#[from] DomError),
    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// What the user asked for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Search(Options),
    PrintConfig,
    Version,
    Help,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Options {
    pub file: PathBuf,
    pub term: String,
    pub next: usize,
    pub prev: usize,
    pub restore: bool,
    pub config: Option<PathBuf>,
}

/// Parse arguments, excluding the program name.
pub fn parse_args<I, S>(args: I) -> Result<Action, CliError>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let mut opts = Options::default();
    let mut positional = Vec::new();
    let mut args = args.into_iter().map(Into::into);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--help" | "-h" => return Ok(Action::Help),
            "--version" | "-V" => return Ok(Action::Version),
            "--print-config" => return Ok(Action::PrintConfig),
            "--restore" => opts.restore = true,
            "--next" => opts.next = count(&arg, args.next())?,
            "--prev" => opts.prev = count(&arg, args.next())?,
            "--config" => {
                let path = args
                    .next()
                    .ok_or_else(|| CliError::Usage("--config needs a path".to_owned()))?;
                opts.config = Some(PathBuf::from(path));
            }
            "--" => positional.extend(args.by_ref()),
            flag if flag.starts_with("--") => {
                return Err(CliError::Usage(format!("unknown option {flag}")));
            }
            _ => positional.push(arg),
        }
    }

    let mut positional = positional.into_iter();
    match (positional.next(), positional.next(), positional.next()) {
        (Some(file), Some(term), None) => {
            opts.file = PathBuf::from(file);
            opts.term = term;
            Ok(Action::Search(opts))
        }
        (_, _, Some(extra)) => Err(CliError::Usage(format!("unexpected argument {extra}"))),
        _ => Err(CliError::Usage("expected <FILE> and <TERM>".to_owned())),
    }
}

fn count(flag: &str, value: Option<String>) -> Result<usize, CliError> {
    value
        .and_then(|v| v.parse().ok())
        .ok_or_else(|| CliError::Usage(format!("{flag} needs a non-negative number")))
}

/// Resolve the config: an explicit path must load, the default path may be
/// missing or broken.
pub fn load_config(explicit: Option<&Path>) -> Result<Config, CliError> {
    match explicit {
        Some(path) => {
            let cfg = Config::try_load_from(path)?;
            info!("config: loaded from {}", path.display());
            Ok(cfg)
        }
        None => Ok(Config::load()),
    }
}

/// Result of a run, ready to print.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    /// Body markup after the search (or after restoring).
    pub html: String,
    pub status: String,
}

/// Logs where the page would scroll; a terminal has no viewport.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogViewport;

impl Viewport for LogViewport {
    fn scroll_to_center(&mut self, doc: &Document, node: NodeId) -> Result<(), ViewportError> {
        if !doc.is_connected(node) {
            return Err(ViewportError::Disconnected(node));
        }
        debug!("viewport: centering {node} ({:?})", doc.text_content(node));
        Ok(())
    }
}

/// Load the page and run one debounced search over it.
pub fn run(opts: &Options, config: &Config) -> Result<Report, CliError> {
    let source = std::fs::read_to_string(&opts.file).map_err(|source| CliError::Read {
        path: opts.file.clone(),
        source,
    })?;
    let mut doc = load_document(&source)?;
    Ok(search_page(&mut doc, opts, config))
}

/// Drive a session over `doc` the way the overlay would, without waiting
/// out the debounce in real time.
pub fn search_page(doc: &mut Document, opts: &Options, config: &Config) -> Report {
    let mut viewport = LogViewport;
    let mut session = SearchSession::new(config.search.marker_style(), config.search.debounce());

    let start = Instant::now();
    session.set_search_term(&opts.term, start);
    let due = session.next_deadline().unwrap_or(start);
    session.tick(due, doc, &mut viewport);
    info!("search: {} matches for {:?}", session.results().len(), opts.term);

    for _ in 0..opts.next {
        session.next(doc, &mut viewport);
    }
    for _ in 0..opts.prev {
        session.prev(doc, &mut viewport);
    }
    let status = session.status_text();

    if opts.restore {
        session.teardown(doc);
    }
    Report {
        html: doc.inner_html(doc.body()),
        status,
    }
}
