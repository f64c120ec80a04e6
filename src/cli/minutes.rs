//! Minutes command: audiobook length conversions.

use clap::Subcommand;
use tome::duration;

#[derive(Debug, Subcommand)]
pub enum MinutesCommand {
    /// Split total minutes into hours and minutes.
    Split {
        /// Total minutes.
        #[arg(allow_negative_numbers = true)]
        total: i64,
    },

    /// Join hours and minutes into total minutes.
    Join {
        /// Hours; fractions allowed (e.g. `1.5`).
        #[arg(allow_negative_numbers = true)]
        hours: f64,

        #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
        minutes: f64,
    },
}

pub(super) fn cmd_minutes(command: &MinutesCommand) -> Result<(), String> {
    match *command {
        MinutesCommand::Split { total } => {
            let hm = duration::to_hours_and_minutes(total).map_err(|e| e.to_string())?;
            println!("{hm}");
        }
        MinutesCommand::Join { hours, minutes } => {
            let total = duration::to_total_minutes(hours, minutes).map_err(|e| e.to_string())?;
            println!("{total}");
        }
    }
    Ok(())
}
