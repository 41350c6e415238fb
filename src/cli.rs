use clap::Parser;

#[derive(clap::Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable detailed debug logging (global)
    #[arg(long, default_value_t = false)]
    pub debug: bool,

    /// Enable verbose logging (global)
    #[arg(long, default_value_t = false)]
    pub verbose: bool,
}

#[derive(clap::Subcommand, Debug)]
pub enum Commands {
    /// Run one security scan against an API endpoint
    Scan {
        /// Target URL (e.g. https://api.example.com/v1/users)
        url: String,

        /// Display name for the scan configuration
        #[arg(long, default_value = "ad-hoc scan")]
        name: String,

        /// HTTP method for the probe request
        #[arg(short = 'X', long, default_value = "GET")]
        method: String,

        /// Extra request header, name:value (repeatable)
        #[arg(short = 'H', long = "header")]
        headers: Vec<String>,

        /// Request body
        #[arg(short = 'd', long)]
        body: Option<String>,

        /// Bearer token (mutually exclusive with --basic/--oauth2)
        #[arg(long, conflicts_with_all = ["basic", "oauth2"])]
        bearer: Option<String>,

        /// Basic credential, already base64-encoded
        #[arg(long, conflicts_with = "oauth2")]
        basic: Option<String>,

        /// OAuth2 access token
        #[arg(long)]
        oauth2: Option<String>,

        /// Request timeout in seconds
        #[arg(long, default_value_t = 10_u64)]
        timeout: u64,

        /// Write the scan result as JSON to this file
        #[arg(short = 'o', long, value_name = "FILE")]
        output: Option<String>,
    },

    /// Compare two stored scan results (new/resolved findings, score delta)
    Diff {
        /// Earlier result, as written by `scan -o`
        before: String,

        /// Later result
        after: String,
    },
}

pub fn parse_cli() -> Cli {
    Cli::parse()
}
