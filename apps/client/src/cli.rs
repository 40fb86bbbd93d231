use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

use fairdeal_client::client::kb::{DEFAULT_PAGE_SIZE, DEFAULT_TOP_K};
use fairdeal_client::models::kb::ClauseType;
use fairdeal_client::models::CompanyType;

#[derive(Parser, Debug)]
#[command(name = "fairdeal")]
#[command(about = "Employment contract fairness analysis client", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Analysis service base URL (overrides FAIRDEAL_API_URL)
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Analyze a PDF or DOCX contract
    Analyze {
        /// Contract file
        file: PathBuf,

        /// Role you are being hired for
        #[arg(long)]
        role: Option<String>,

        /// Years of experience (mapped onto the nearest bucket)
        #[arg(long)]
        experience: Option<f64>,

        #[arg(long, value_enum)]
        company_type: Option<CompanyTypeArg>,

        #[arg(long)]
        location: Option<String>,

        #[arg(long)]
        industry: Option<String>,

        /// Write the full result as JSON into this directory
        #[arg(long)]
        export: Option<PathBuf>,

        /// Print the plain-text summary after the report
        #[arg(long)]
        summary: bool,
    },

    /// Show or reset the saved candidate context
    Context {
        #[command(subcommand)]
        action: ContextAction,
    },

    /// Query the contract knowledge base
    Kb {
        #[command(subcommand)]
        action: KbAction,
    },
}

#[derive(Subcommand, Debug)]
pub enum ContextAction {
    Show,
    Reset,
}

#[derive(Subcommand, Debug)]
pub enum KbAction {
    Health,
    Stats,
    /// List ingested contracts
    Contracts {
        #[arg(long, default_value_t = DEFAULT_PAGE_SIZE)]
        limit: u32,
        #[arg(long, default_value_t = 0)]
        offset: u32,
    },
    /// Show one contract's metadata
    Contract { id: String },
    /// List a contract's clause chunks
    Chunks { id: String },
    /// Semantic clause search
    Search {
        query: String,
        #[arg(long, value_parser = parse_clause_type)]
        clause_type: Option<ClauseType>,
        #[arg(long, default_value_t = DEFAULT_TOP_K)]
        top_k: u32,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum CompanyTypeArg {
    Product,
    Service,
    Startup,
}

impl From<CompanyTypeArg> for CompanyType {
    fn from(arg: CompanyTypeArg) -> Self {
        match arg {
            CompanyTypeArg::Product => CompanyType::Product,
            CompanyTypeArg::Service => CompanyType::Service,
            CompanyTypeArg::Startup => CompanyType::Startup,
        }
    }
}

fn parse_clause_type(raw: &str) -> Result<ClauseType, String> {
    raw.parse()
}
