use clap::{Parser, Subcommand};

/// Extended help shown after `ledgerlens dashboard --help` and
/// `ledgerlens analysis --help`.
pub const SUMMARY_AFTER_HELP: &str = "\
How input works:
  Ledgerlens reads one flat list of transaction records and summarizes it.

  Accepted formats:
    JSON — one top-level array of transaction objects
    CSV  — one header row with record field names

  <path> is a local file path.
  To read stdin explicitly, use `-` as the path.
  Example: cat transactions.json | ledgerlens dashboard -
  With no path and no piped stdin, LEDGERLENS_SOURCE is used.

Record schema:
  JSON example (one top-level array):
  [
    {
      \"amount\": 42.15,
      \"merchant\": \"Fresh Mart\",
      \"category\": \"Groceries\",
      \"gender\": \"F\",
      \"fraud\": 0
    }
  ]

  CSV example (header + rows):
  amount,merchant,category,gender,fraud
  42.15,Fresh Mart,Groceries,F,0
  15.99,Netflix,Entertainment,M,1

Field rules:
  amount (required):
    A number. Records with a missing or non-numeric amount are kept for
    merchant/category listing but add nothing to totals, mean or median.

  merchant, category (required):
    Grouping labels. Blank labels leave the record out of that grouping.

  gender (optional):
    M or F (MALE/FEMALE accepted; stray quotes such as 'M' are ignored).
    Other values are left out of gender counts.

  fraud (optional):
    0 (no fraud) or 1 (fraud). Other values are left out of fraud counts.

Logging:
  Set LEDGERLENS_LOG (e.g. `debug`) or pass --verbose; logs go to stderr.
";

#[derive(Debug, Parser)]
#[command(
    name = "ledgerlens",
    version,
    about = "transaction summary dashboards for the terminal",
    disable_help_subcommand = true
)]
pub struct Cli {
    /// Emit debug logs on stderr
    #[arg(long, global = true)]
    pub verbose: bool,
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Summarize gender, fraud status, merchant and category totals, mean and median
    #[command(after_long_help = SUMMARY_AFTER_HELP)]
    Dashboard {
        /// Path to a JSON or CSV file (use `-` for stdin)
        path: Option<String>,
        /// Emit machine-readable JSON output
        #[arg(long)]
        json: bool,
    },
    /// Summarize merchant and category totals with mean and median amounts
    #[command(after_long_help = SUMMARY_AFTER_HELP)]
    Analysis {
        /// Path to a JSON or CSV file (use `-` for stdin)
        path: Option<String>,
        /// Emit machine-readable JSON output
        #[arg(long)]
        json: bool,
    },
}

#[cfg(test)]
pub fn parse_from<I, T>(itr: I) -> Result<Cli, clap::Error>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    Cli::try_parse_from(itr)
}
