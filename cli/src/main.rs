use std::io::{self, Write};

use chrono::Utc;
use clap::builder::BoolishValueParser;
use clap::{ArgAction, CommandFactory, Parser};
use tracing_subscriber::EnvFilter;
use x509::CertificateLocations;

mod error;
mod expiry;
mod load;
mod output;
mod print;
mod tls;

use error::Result;
use load::LoadOptions;
use output::OutputFormat;
use print::PrintOptions;

#[derive(Parser)]
#[command(name = "certinfo", version)]
#[command(about = "Print X.509 certificate info from files, stdin and TLS endpoints", long_about = None)]
#[command(override_usage = "certinfo [flags] [<file>|<host:port> ...]")]
struct Cli {
    /// Certificate files or host:port TLS endpoints
    #[arg(value_name = "FILE|HOST:PORT")]
    locations: Vec<String>,

    /// Print only subject and expiry of each certificate
    #[arg(long, env = "CERTINFO_EXPIRY", action = ArgAction::SetTrue, value_parser = BoolishValueParser::new())]
    expiry: bool,

    /// Remove duplicate certificates
    #[arg(long, env = "CERTINFO_NO_DUPLICATE", action = ArgAction::SetTrue, value_parser = BoolishValueParser::new())]
    no_duplicate: bool,

    /// Remove expired certificates
    #[arg(long, env = "CERTINFO_NO_EXPIRED", action = ArgAction::SetTrue, value_parser = BoolishValueParser::new())]
    no_expired: bool,

    /// Skip verification of the server certificate chain
    #[arg(long, env = "CERTINFO_INSECURE", action = ArgAction::SetTrue, value_parser = BoolishValueParser::new())]
    insecure: bool,

    /// Print PEM after each certificate
    #[arg(long, env = "CERTINFO_PEM", action = ArgAction::SetTrue, value_parser = BoolishValueParser::new())]
    pem: bool,

    /// Print only PEM blocks
    #[arg(long, env = "CERTINFO_PEM_ONLY", action = ArgAction::SetTrue, value_parser = BoolishValueParser::new())]
    pem_only: bool,

    /// Print decoded extensions
    #[arg(long, env = "CERTINFO_EXTENSIONS", action = ArgAction::SetTrue, value_parser = BoolishValueParser::new())]
    extensions: bool,

    /// Print public key details
    #[arg(long, env = "CERTINFO_PUBLIC_KEY", action = ArgAction::SetTrue, value_parser = BoolishValueParser::new())]
    public_key: bool,

    /// Print signature algorithm and value
    #[arg(long, env = "CERTINFO_SIGNATURE", action = ArgAction::SetTrue, value_parser = BoolishValueParser::new())]
    signature: bool,

    /// Keep certificates whose subject contains this string
    #[arg(long, env = "CERTINFO_SUBJECT_LIKE", value_name = "SUBJECT")]
    subject_like: Option<String>,

    /// Keep certificates whose issuer contains this string
    #[arg(long, env = "CERTINFO_ISSUER_LIKE", value_name = "ISSUER")]
    issuer_like: Option<String>,

    /// Sort certificates and locations by expiry
    #[arg(long, env = "CERTINFO_SORT_EXPIRY", action = ArgAction::SetTrue, value_parser = BoolishValueParser::new())]
    sort_expiry: bool,

    /// Server name for SNI and verification, defaults to the host
    #[arg(long, env = "CERTINFO_SERVER_NAME", value_name = "NAME")]
    server_name: Option<String>,

    /// Output format
    #[arg(short, long, value_enum, env = "CERTINFO_OUTPUT", default_value = "text")]
    output: OutputFormat,

    /// Log debug messages to stderr
    #[arg(short, long, env = "CERTINFO_VERBOSE", action = ArgAction::SetTrue, value_parser = BoolishValueParser::new())]
    verbose: bool,
}

impl Cli {
    fn print_options(&self) -> PrintOptions {
        PrintOptions {
            pem: self.pem,
            extensions: self.extensions,
            public_key: self.public_key,
            signature: self.signature,
        }
    }

    /// Applies the filters in a fixed order: expired, duplicates, subject,
    /// issuer, then sorting.
    fn filter(&self, mut locations: CertificateLocations) -> CertificateLocations {
        if self.no_expired {
            locations = locations.remove_expired(Utc::now());
        }
        if self.no_duplicate {
            locations = locations.remove_duplicates();
        }
        if let Some(subject) = non_empty(&self.subject_like) {
            locations = locations.subject_like(subject);
        }
        if let Some(issuer) = non_empty(&self.issuer_like) {
            locations = locations.issuer_like(issuer);
        }
        if self.sort_expiry {
            locations = locations.sort_by_expiry();
        }
        locations
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|value| !value.is_empty())
}

fn init_logger(verbose: bool) {
    let level = if verbose { "debug" } else { "error" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logger(cli.verbose);

    let options = LoadOptions {
        server_name: non_empty(&cli.server_name),
        insecure: cli.insecure,
    };
    let locations = load::load_locations(&cli.locations, &options);
    if locations.is_empty() {
        Cli::command().print_help()?;
        return Ok(());
    }
    let locations = cli.filter(locations);

    let stdout = io::stdout();
    let mut out = stdout.lock();
    if let Some(rendered) = output::render(cli.output, &locations)? {
        out.write_all(rendered.as_bytes())?;
    } else if cli.expiry {
        expiry::print(&mut out, &locations, Utc::now())?;
    } else if cli.pem_only {
        print::pem_only(&mut out, &locations)?;
    } else {
        print::locations(&mut out, &locations, cli.print_options())?;
    }
    out.flush()?;
    Ok(())
}
