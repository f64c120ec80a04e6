//! CLI interface for Tome.
//!
//! Each subcommand is non-interactive: a deadline JSON document in,
//! structured output out. Commands that change a deadline write the
//! updated document to `--out` (if given) or stdout, and describe what
//! happened on stderr.
//!
//! Nothing is stored between runs; the document is the state.

mod document;
mod format;
mod minutes;
mod pace;
mod status;

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use jiff::civil::Date;
use tome::config::Config;
use tome::model::{Flexibility, Format, Status};

/// Tome: keep your reading deadlines.
#[derive(Debug, Parser)]
#[command(name = "tome", after_long_help = WORKFLOW_HELP)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

const WORKFLOW_HELP: &str = r#"Workflow: reading an advance copy
  1. tome new --title "Piranesi" --format ebook --total 272 --due 2026-11-30 --status applied --out piranesi.json
  2. tome status piranesi.json reading --out piranesi.json
  3. tome progress piranesi.json 140 --out piranesi.json
  4. tome pace piranesi.json
  5. tome status piranesi.json to-review --yes --out piranesi.json
  6. tome status piranesi.json complete --reviews reviews.json --out piranesi.json

Audiobooks:
  tome new --title "Dune" --format audio --total 21 --minutes 2 --due 2026-12-01
  tome progress dune.json 5 --minutes 45
  tome minutes split 630"#;

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Create a deadline. Prints the new document.
    New {
        #[arg(long)]
        title: String,

        #[arg(long)]
        author: Option<String>,

        #[arg(long, value_enum)]
        format: FormatArg,

        /// Pages. For audio: hours when `--minutes` is given, total minutes
        /// otherwise.
        #[arg(long)]
        total: u32,

        /// Extra minutes on top of `--total` hours (audio only).
        #[arg(long)]
        minutes: Option<u32>,

        /// Target finish date (YYYY-MM-DD).
        #[arg(long)]
        due: Date,

        /// The finish date cannot slide.
        #[arg(long)]
        strict: bool,

        /// Starting status.
        #[arg(long, value_enum, default_value_t = InitialStatusArg::Pending)]
        status: InitialStatusArg,

        /// Where the reader already is (pages, or minutes for audio).
        #[arg(long, default_value_t = 0)]
        start_at: u32,

        /// Write the document to this file instead of stdout.
        #[arg(long)]
        out: Option<PathBuf>,
    },

    /// Log progress on a deadline.
    Progress {
        /// Deadline document.
        file: PathBuf,

        /// Pages read so far. For audio: hours listened when `--minutes` is
        /// given, total minutes otherwise.
        value: u32,

        /// Extra minutes on top of `value` hours (audio only).
        #[arg(long)]
        minutes: Option<u32>,

        #[arg(long)]
        out: Option<PathBuf>,
    },

    /// Show the pace needed to finish on time.
    Pace {
        /// Deadline document.
        file: PathBuf,

        /// Pretend today is this date (YYYY-MM-DD).
        #[arg(long)]
        today: Option<Date>,
    },

    /// Request a status change.
    ///
    /// Instant changes are applied right away. Changes that need a yes/no
    /// answer print the question unless `--yes` or `--no` is given.
    /// Finishing from reading or paused hands off to `tome finish`.
    Status {
        /// Deadline document.
        file: PathBuf,

        /// Status to move to.
        #[arg(value_enum)]
        target: StatusArg,

        /// Review platforms document, consulted when leaving to-review.
        #[arg(long)]
        reviews: Option<PathBuf>,

        /// Answer yes to the confirmation question.
        #[arg(long, conflicts_with = "no")]
        yes: bool,

        /// Answer no to the confirmation question.
        #[arg(long)]
        no: bool,

        #[arg(long)]
        out: Option<PathBuf>,
    },

    /// Finish the completion flow for a book leaving reading or paused.
    Finish {
        /// Deadline document.
        file: PathBuf,

        /// What the reader asked for: complete or did-not-finish.
        #[arg(value_enum)]
        target: FinishArg,

        /// Final page or minute reached, if it changed.
        #[arg(long)]
        final_progress: Option<u32>,

        /// Park the book in to-review instead of finalizing.
        #[arg(long)]
        review: bool,

        #[arg(long)]
        out: Option<PathBuf>,
    },

    /// Convert between total minutes and hours + minutes.
    Minutes {
        #[command(subcommand)]
        command: minutes::MinutesCommand,
    },
}

/// CLI-facing format, mapped to the domain `Format`.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum FormatArg {
    Physical,
    Ebook,
    Audio,
}

impl FormatArg {
    fn to_domain(self) -> Format {
        match self {
            Self::Physical => Format::Physical,
            Self::Ebook => Format::EBook,
            Self::Audio => Format::Audio,
        }
    }
}

/// Statuses a new deadline may start in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum InitialStatusArg {
    Pending,
    Applied,
    Reading,
}

impl InitialStatusArg {
    fn to_domain(self) -> Status {
        match self {
            Self::Pending => Status::Pending,
            Self::Applied => Status::Applied,
            Self::Reading => Status::Reading,
        }
    }
}

impl std::fmt::Display for InitialStatusArg {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.to_domain().as_str())
    }
}

/// CLI-facing status, mapped to the domain `Status`.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum StatusArg {
    Pending,
    Applied,
    Reading,
    Paused,
    ToReview,
    Complete,
    DidNotFinish,
    Rejected,
    Withdrew,
}

impl StatusArg {
    fn to_domain(self) -> Status {
        match self {
            Self::Pending => Status::Pending,
            Self::Applied => Status::Applied,
            Self::Reading => Status::Reading,
            Self::Paused => Status::Paused,
            Self::ToReview => Status::ToReview,
            Self::Complete => Status::Complete,
            Self::DidNotFinish => Status::DidNotFinish,
            Self::Rejected => Status::Rejected,
            Self::Withdrew => Status::Withdrew,
        }
    }
}

/// The two ways out of the completion flow.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum FinishArg {
    Complete,
    DidNotFinish,
}

impl FinishArg {
    fn to_domain(self) -> Status {
        match self {
            Self::Complete => Status::Complete,
            Self::DidNotFinish => Status::DidNotFinish,
        }
    }
}

/// Run the CLI, returning an error message on failure.
pub fn run(config: &Config) -> Result<(), String> {
    let cli = Cli::parse();

    match cli.command {
        Command::New {
            title,
            author,
            format,
            total,
            minutes,
            due,
            strict,
            status,
            start_at,
            out,
        } => {
            let flexibility = if strict {
                Flexibility::Strict
            } else {
                Flexibility::Flexible
            };
            let request = document::NewRequest {
                title,
                author,
                format: format.to_domain(),
                total,
                minutes,
                due,
                flexibility,
                status: status.to_domain(),
                start_at,
            };
            document::cmd_new(request, out.as_deref())
        }
        Command::Progress {
            file,
            value,
            minutes,
            out,
        } => document::cmd_progress(&file, value, minutes, out.as_deref()),
        Command::Pace { file, today } => {
            let today = match today {
                Some(date) => date,
                None => config.today()?,
            };
            pace::cmd_pace(config, &file, today)
        }
        Command::Status {
            file,
            target,
            reviews,
            yes,
            no,
            out,
        } => {
            let answer = match (yes, no) {
                (true, _) => Some(true),
                (_, true) => Some(false),
                _ => None,
            };
            status::cmd_status(
                &file,
                target.to_domain(),
                reviews.as_deref(),
                answer,
                out.as_deref(),
            )
        }
        Command::Finish {
            file,
            target,
            final_progress,
            review,
            out,
        } => status::cmd_finish(
            &file,
            target.to_domain(),
            final_progress,
            review,
            out.as_deref(),
        ),
        Command::Minutes { command } => minutes::cmd_minutes(&command),
    }
}
