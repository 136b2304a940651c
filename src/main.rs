use anyhow::Context;
use barq::catalog::{parse_user_items, Catalog, CatalogDb};
use barq::error::BarqError;
use barq::keys::{KeyComboSet, KeyEvent};
use barq::output::{format_human, json_response, ErrorResponse, OutputFormat};
use barq::query::{Engine, SearchEngines, SearchPreferences};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

const RESOLVE_EXAMPLES: &str = "\
EXAMPLES:
    # Resolve a query against a catalog file
    barq resolve --catalog store.json \"banana\"

    # Several segments at once; tag filter and arithmetic
    barq resolve --catalog store.json \"#produce;2+2;37\"

    # Organic PLU request with JSON output
    barq resolve --catalog store.json --format json \"banana!\"
";

const CODE_EXAMPLES: &str = "\
EXAMPLES:
    # Classify and convert a PLU
    barq code 4011

    # A 14-digit SKU yields its embedded UPC
    barq code 21234500001234
";

const COMBO_EXAMPLES: &str = "\
EXAMPLES:
    # Does ctrl+shift+c satisfy the combo string \"^+c\"?
    barq combo \"^+c\" --key c --ctrl --shift
";

#[derive(Parser)]
#[command(
    name = "barq",
    about = "Query resolution and barcode code engine for retail checkout lookups",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Resolve a raw query string into matches, codes, and derived results
    #[command(after_help = RESOLVE_EXAMPLES)]
    Resolve {
        /// Raw query string (may contain several separator-delimited segments)
        query: String,
        /// Path to a catalog JSON file ({name, version, organization?, items})
        #[arg(long)]
        catalog: Option<PathBuf>,
        /// Path to a user items file (name: value lines)
        #[arg(long)]
        user_items: Option<PathBuf>,
        /// Separator between query segments
        #[arg(long, default_value = ";")]
        separator: String,
        /// Prefix introducing a tag-filter directive
        #[arg(long, default_value = "#")]
        tag_prefix: String,
        /// Suffix requesting the organic PLU transform
        #[arg(long, default_value = "!")]
        organic_modifier: String,
        /// Prefix introducing a search-engine directive (empty disables)
        #[arg(long, default_value = "")]
        search_prefix: String,
        /// Disable scannable produce barcodes for the no-cheat organization
        #[arg(long)]
        no_cheat: bool,
        /// Override the catalog's organization id
        #[arg(long, default_value = "")]
        organization: String,
        /// Maximum matches to print per segment (0 = all)
        #[arg(long, default_value_t = 4)]
        limit: usize,
        /// Treat the query as a finished speech transcript and normalize it
        #[arg(long)]
        transcript: bool,
        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Human)]
        format: OutputFormat,
    },
    /// Classify a code string and derive its scannable UPC
    #[command(after_help = CODE_EXAMPLES)]
    Code {
        /// Code string to classify (PLU, UPC, or SKU shaped)
        value: String,
        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Human)]
        format: OutputFormat,
    },
    /// Test a key-combo configuration string against a synthetic event
    #[command(after_help = COMBO_EXAMPLES)]
    Combo {
        /// Combo configuration string, e.g. "^+c" or "^Space, F5"
        combo: String,
        /// Logical key name of the event
        #[arg(long, default_value = "")]
        key: String,
        /// Physical key code of the event
        #[arg(long, default_value = "")]
        code: String,
        #[arg(long)]
        ctrl: bool,
        #[arg(long)]
        alt: bool,
        #[arg(long)]
        shift: bool,
        #[arg(long)]
        meta: bool,
    },
}

fn main() {
    let cli = Cli::parse();
    if let Err(err) = dispatch(&cli) {
        emit_error(&err);
        std::process::exit(1);
    }
}

fn dispatch(cli: &Cli) -> Result<(), BarqError> {
    match &cli.command {
        Command::Resolve {
            query,
            catalog,
            user_items,
            separator,
            tag_prefix,
            organic_modifier,
            search_prefix,
            no_cheat,
            organization,
            limit,
            transcript,
            format,
        } => run_resolve(ResolveParams {
            query: query.clone(),
            catalog: catalog.clone(),
            user_items: user_items.clone(),
            separator: separator.clone(),
            tag_prefix: tag_prefix.clone(),
            organic_modifier: organic_modifier.clone(),
            search_prefix: search_prefix.clone(),
            no_cheat: *no_cheat,
            organization: organization.clone(),
            limit: *limit,
            transcript: *transcript,
            format: *format,
        }),
        Command::Code { value, format } => run_code(value, *format),
        Command::Combo {
            combo,
            key,
            code,
            ctrl,
            alt,
            shift,
            meta,
        } => {
            let event = KeyEvent {
                key: key.clone(),
                code: code.clone(),
                ctrl: *ctrl,
                alt: *alt,
                shift: *shift,
                meta: *meta,
            };
            run_combo(combo, &event)
        }
    }
}

/// Resolve parameters bundled into a single struct, mirroring the CLI
/// surface.
struct ResolveParams {
    query: String,
    catalog: Option<PathBuf>,
    user_items: Option<PathBuf>,
    separator: String,
    tag_prefix: String,
    organic_modifier: String,
    search_prefix: String,
    no_cheat: bool,
    organization: String,
    limit: usize,
    transcript: bool,
    format: OutputFormat,
}

fn run_resolve(params: ResolveParams) -> Result<(), BarqError> {
    if params.query.is_empty() {
        return Err(BarqError::EmptyQuery);
    }

    let db = params
        .catalog
        .as_deref()
        .map(load_catalog_db)
        .transpose()?;
    let user_items = match params.user_items.as_deref() {
        Some(path) => parse_user_items(&std::fs::read_to_string(path)?),
        None => Vec::new(),
    };
    let catalog = Catalog::compile(db.as_ref(), &user_items);

    let prefs = SearchPreferences {
        items_per_page: params.limit.max(1),
        item_tag_prefix: params.tag_prefix,
        organic_modifier: params.organic_modifier,
        query_separator: params.separator,
        default_query: String::new(),
        search_prefix: params.search_prefix,
        no_cheat: params.no_cheat,
        organization_id: params.organization,
    }
    .sanitized();

    let raw = if params.transcript {
        barq::augment::normalize_transcript(&params.query)
    } else {
        params.query.clone()
    };

    let mut engine = Engine::new();
    let result = engine.evaluate(&raw, &prefs, &catalog, &SearchEngines::default());

    match params.format {
        OutputFormat::Human => print!("{}", format_human(&result, params.limit)),
        OutputFormat::Json => {
            let response = json_response(&result);
            println!("{}", serde_json::to_string_pretty(&response)?);
        }
    }
    Ok(())
}

fn run_code(value: &str, format: OutputFormat) -> Result<(), BarqError> {
    let derived = barq::code::derive_code(value);
    match format {
        OutputFormat::Human => {
            println!("classification: {}", derived.classification);
            if let Some(upc) = &derived.upc {
                println!("upc: {}", upc);
            }
            if let Some(pretty) = &derived.pretty {
                println!("display: {}", pretty);
            }
            if derived.upc.is_none() {
                println!("no specific classification; symbology fallback applies");
            }
        }
        OutputFormat::Json => {
            let response = json_response(&derived);
            println!("{}", serde_json::to_string_pretty(&response)?);
        }
    }
    Ok(())
}

fn run_combo(combo: &str, event: &KeyEvent) -> Result<(), BarqError> {
    let set = KeyComboSet::parse(combo);
    let matched = set.matches(event);
    println!("{}", if matched { "match" } else { "no match" });
    Ok(())
}

fn load_catalog_db(path: &std::path::Path) -> Result<CatalogDb, BarqError> {
    if !path.exists() {
        return Err(BarqError::CatalogNotFound {
            path: path.display().to_string(),
        });
    }
    let text = std::fs::read_to_string(path)?;
    serde_json::from_str(&text).map_err(|e| BarqError::CatalogInvalid {
        reason: e.to_string(),
    })
}

fn emit_error(err: &BarqError) {
    let response = ErrorResponse {
        code: err.error_code().to_string(),
        error: err.severity().to_string(),
        message: err.to_string(),
        remediation: err.remediation().map(|s| s.to_string()),
    };
    match serde_json::to_string_pretty(&response)
        .context("serializing error response")
    {
        Ok(json) => eprintln!("{}", json),
        Err(_) => eprintln!("{}: {}", err.error_code(), err),
    }
}
