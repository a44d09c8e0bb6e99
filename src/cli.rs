use std::path::PathBuf;

use clap::Parser;

use cfg_ll1::RecoveryPolicy;

/// Transforms a grammar into LL(1) form and parses every line of an input
/// file with it.
#[derive(Parser, Debug)]
#[command(version, about)]
pub struct Cli {
    /// File containing the grammar
    pub grammar: PathBuf,

    /// File containing one candidate string per line
    pub input: PathBuf,

    /// File the report is written to
    pub output: PathBuf,

    /// Consecutive errors after which a line is abandoned
    #[arg(long, value_name = "COUNT", default_value_t = 10)]
    pub max_errors: usize,

    /// Only skip tokens on a missing table entry
    #[arg(long)]
    pub no_follow_recovery: bool,

    /// Transitions after which a line is abandoned
    #[arg(long, value_name = "COUNT")]
    pub max_steps: Option<usize>,

    /// Print only the summary to the console
    #[arg(short, long)]
    pub quiet: bool,
}

impl Cli {
    pub fn policy(&self) -> RecoveryPolicy {
        let default = RecoveryPolicy::default();
        RecoveryPolicy {
            max_error_streak: self.max_errors,
            follow_recovery: !self.no_follow_recovery,
            max_steps: self.max_steps.or(default.max_steps),
        }
    }
}
