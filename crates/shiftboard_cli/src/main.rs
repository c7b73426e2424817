//! Shiftboard command-line entry point.
//!
//! # Responsibility
//! - Resolve configuration from flags and environment.
//! - Bootstrap logging, storage and the one-time seed before serving a command.
//! - Dispatch one boundary operation and print its JSON envelope.
//!
//! # Invariants
//! - Data is only dropped by the explicit `reset --yes` subcommand.

mod config;

use clap::Parser;
use config::{Cli, Command};
use log::{error, info};
use serde::Serialize;
use shiftboard_core::api::STATUS_OK;
use shiftboard_core::db::{open_db, reset_schema};
use shiftboard_core::{
    init_logging, init_stderr_logging, seed_if_empty, AddShiftForm, ApiResponse,
    CaregiverPayload, RemoveShiftForm, ScheduleApi, SeedConfig,
};
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = Cli::parse();

    let logging = match cli.log_dir.as_deref() {
        Some(dir) => init_logging(cli.log_level(), dir),
        None => init_stderr_logging(cli.log_level()),
    };
    if let Err(err) = logging {
        eprintln!("shiftboard: {err}");
        return ExitCode::FAILURE;
    }

    match run(&cli) {
        Ok(rendered) => {
            println!("{}", rendered.json);
            if rendered.success {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            }
        }
        Err(err) => {
            error!("event=cli_run module=cli status=error error={err}");
            eprintln!("shiftboard: {err}");
            ExitCode::FAILURE
        }
    }
}

/// Encoded envelope plus whether it reported success.
struct Rendered {
    json: String,
    success: bool,
}

fn render<B: Serialize>(response: ApiResponse<B>) -> Result<Rendered, String> {
    let json = serde_json::to_string_pretty(&response)
        .map_err(|err| format!("failed to encode response: {err}"))?;
    Ok(Rendered {
        json,
        success: response.is_success(),
    })
}

fn run(cli: &Cli) -> Result<Rendered, String> {
    if let Some(parent) = cli.db.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|err| {
            format!("failed to create database directory `{}`: {err}", parent.display())
        })?;
    }
    let mut conn = open_db(&cli.db).map_err(|err| err.to_string())?;

    if let Command::Reset { yes } = &cli.command {
        if !yes {
            return Err("reset drops every caregiver and shift; pass --yes to confirm".to_string());
        }
        reset_schema(&mut conn).map_err(|err| err.to_string())?;
    }

    let seed_config = match cli.seed_config.as_deref() {
        Some(path) => SeedConfig::load(path).map_err(|err| err.to_string())?,
        None => SeedConfig::default(),
    };
    let today = cli.today();
    let report = seed_if_empty(&conn, &seed_config, today).map_err(|err| err.to_string())?;
    info!("event=cli_bootstrap module=cli status=ok today={today}");

    let api = ScheduleApi::new(&conn);
    match &cli.command {
        Command::Init | Command::Reset { .. } => render(ApiResponse {
            status: STATUS_OK,
            body: report,
        }),
        Command::Calendar => render(api.calendar(today)),
        Command::Hourly => render(api.hourly(today)),
        Command::CaregiverWeek => render(api.caregiver_week(today)),
        Command::Grant => render(api.grant(today)),
        Command::ListCaregivers => render(api.list_caregivers()),
        Command::AddShift {
            caregiver_id,
            shift_type,
            date,
        } => render(api.add_shift(&AddShiftForm {
            caregiver_id: caregiver_id.clone(),
            shift_type: shift_type.clone(),
            date: date.clone(),
        })),
        Command::RemoveShift { shift_id } => render(api.remove_shift(&RemoveShiftForm {
            shift_id: shift_id.clone(),
        })),
        Command::AddCaregiver { name } => {
            render(api.add_caregiver(&CaregiverPayload { name: name.clone() }))
        }
        Command::UpdateCaregiver { id, name } => {
            render(api.update_caregiver(*id, &CaregiverPayload { name: name.clone() }))
        }
        Command::DeleteCaregiver { id } => render(api.delete_caregiver(*id)),
    }
}
