//! Command-line and environment configuration.

use chrono::{Local, NaiveDate};
use clap::{Parser, Subcommand};
use shiftboard_core::default_log_level;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "shiftboard", version, about = "Caregiver shift scheduling")]
pub struct Cli {
    /// SQLite database file.
    #[arg(long, env = "SHIFTBOARD_DB_PATH", default_value = "instance/schedule.db", global = true)]
    pub db: PathBuf,

    /// trace|debug|info|warn|error; defaults by build mode.
    #[arg(long, env = "SHIFTBOARD_LOG_LEVEL", global = true)]
    pub log_level: Option<String>,

    /// Absolute directory for rotating log files; logs go to stderr when unset.
    #[arg(long, env = "SHIFTBOARD_LOG_DIR", global = true)]
    pub log_dir: Option<String>,

    /// JSON roster/template used when the store has no caregivers.
    #[arg(long, env = "SHIFTBOARD_SEED_CONFIG", global = true)]
    pub seed_config: Option<PathBuf>,

    /// Reference date (YYYY-MM-DD) for week windows and seeding; defaults to the local date.
    #[arg(long, global = true)]
    pub today: Option<NaiveDate>,

    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    pub fn log_level(&self) -> &str {
        self.log_level.as_deref().unwrap_or(default_log_level())
    }

    pub fn today(&self) -> NaiveDate {
        self.today.unwrap_or_else(|| Local::now().date_naive())
    }
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Open the database and seed it when empty.
    Init,
    /// Drop all schedule data, recreate the schema and reseed.
    Reset {
        #[arg(long)]
        yes: bool,
    },
    /// Weekly calendar view.
    Calendar,
    /// Hour-by-hour coverage view.
    Hourly,
    /// Per-caregiver week view.
    CaregiverWeek,
    /// Grant reporting view.
    Grant,
    ListCaregivers,
    AddShift {
        #[arg(long)]
        caregiver_id: Option<String>,
        #[arg(long)]
        shift_type: Option<String>,
        /// YYYY-MM-DD.
        #[arg(long)]
        date: Option<String>,
    },
    RemoveShift {
        #[arg(long)]
        shift_id: Option<String>,
    },
    AddCaregiver {
        #[arg(long)]
        name: Option<String>,
    },
    UpdateCaregiver {
        id: i64,
        #[arg(long)]
        name: Option<String>,
    },
    DeleteCaregiver {
        id: i64,
    },
}

#[cfg(test)]
mod tests {
    use super::{Cli, Command};
    use chrono::NaiveDate;
    use clap::{CommandFactory, Parser};

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn add_shift_flags_parse_into_optional_fields() {
        let cli = Cli::try_parse_from([
            "shiftboard",
            "--db",
            "/tmp/s.db",
            "--today",
            "2024-06-05",
            "add-shift",
            "--caregiver-id",
            "2",
            "--shift-type",
            "A",
        ])
        .unwrap();
        assert_eq!(cli.today(), NaiveDate::from_ymd_opt(2024, 6, 5).unwrap());
        match cli.command {
            Command::AddShift {
                caregiver_id,
                shift_type,
                date,
            } => {
                assert_eq!(caregiver_id.as_deref(), Some("2"));
                assert_eq!(shift_type.as_deref(), Some("A"));
                assert_eq!(date, None);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }
}
