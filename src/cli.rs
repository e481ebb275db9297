use std::path::PathBuf;

use clap::{ArgAction, ArgGroup, Args, Parser, Subcommand};

use crate::{application::RunOptions, domain::Category};

#[derive(Parser, Debug)]
#[command(
    name = "speedtracker",
    version,
    about = "A program for tracking internet download speeds.",
    long_about = None
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Print diagnostics on stderr
    #[arg(short, long, global = true, action = ArgAction::SetTrue)]
    pub verbose: bool,

    /// URL of the small test file
    #[arg(long, value_name = "URL", env = "SPEEDTRACKER_SMALL_URL", global = true)]
    pub small_url: Option<String>,

    /// URL of the medium test file
    #[arg(long, value_name = "URL", env = "SPEEDTRACKER_MEDIUM_URL", global = true)]
    pub medium_url: Option<String>,

    /// URL of the large test file
    #[arg(long, value_name = "URL", env = "SPEEDTRACKER_LARGE_URL", global = true)]
    pub large_url: Option<String>,

    /// Give up on a download after this many seconds
    #[arg(long, value_name = "SECONDS", env = "SPEEDTRACKER_TIMEOUT", global = true)]
    pub timeout: Option<u64>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Measure once with the small file (default)
    Quick,
    /// Measure repeatedly and report the average
    Test(TestArgs),
}

#[derive(Args, Debug)]
#[command(group(ArgGroup::new("size").args(["small", "medium", "large"])))]
pub struct TestArgs {
    /// Only write to the log file
    #[arg(short = 'q', long, action = ArgAction::SetTrue)]
    pub silent: bool,

    /// Use the small file
    #[arg(short, long, action = ArgAction::SetTrue)]
    pub small: bool,

    /// Use the medium file (default)
    #[arg(short, long, action = ArgAction::SetTrue)]
    pub medium: bool,

    /// Use the large file
    #[arg(short, long, action = ArgAction::SetTrue)]
    pub large: bool,

    /// Number of tests to run
    #[arg(short, long, value_name = "NUM", default_value_t = 3)]
    pub number: usize,

    /// Print the report as JSON
    #[arg(long, action = ArgAction::SetTrue)]
    pub json: bool,

    /// Append the report to this file
    #[arg(value_name = "LOGFILE")]
    pub logfile: Option<PathBuf>,
}

impl TestArgs {
    pub fn category(&self) -> Category {
        if self.small {
            Category::Small
        } else if self.large {
            Category::Large
        } else {
            Category::Medium
        }
    }

    pub fn run_options(&self) -> RunOptions {
        RunOptions {
            category: self.category(),
            repetitions: self.number,
            silent: self.silent,
            json: self.json,
            log_file: self.logfile.clone(),
        }
    }
}
