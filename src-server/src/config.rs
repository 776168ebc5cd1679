//! Server Configuration
//!
//! Command line flags with environment fallbacks (a `.env` file is loaded
//! first by `main`).

use clap::Parser;
use std::net::SocketAddr;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[clap(name = "course-studio-server", about = "Course Studio lesson API")]
pub struct Cli {
    /// Address to listen on
    #[clap(long, env = "COURSE_STUDIO_BIND", default_value = "127.0.0.1:3000")]
    pub bind: SocketAddr,
    /// SQLite database file (":memory:" for a throwaway database)
    #[clap(long, env = "COURSE_STUDIO_DB", default_value = "course_studio.db")]
    pub db_path: PathBuf,
    /// Origins allowed to call the API from a browser
    #[clap(long, value_name = "ORIGIN", env = "COURSE_STUDIO_CORS", value_delimiter = ';')]
    pub cors_allow_origins: Vec<String>,
    #[clap(short = 'v', long = "verbose", action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    /// `RUST_LOG` wins; otherwise `-v` flags pick the level
    pub fn log_filter(&self) -> EnvFilter {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            let level = match self.verbose {
                0 => "info",
                1 => "debug",
                _ => "trace",
            };
            EnvFilter::new(level)
        })
    }
}
