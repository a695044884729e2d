use std::path::PathBuf;

use anyhow::Result;
use chrono::{Local, NaiveDate};
use clap::{Parser, Subcommand};
use rust_decimal::Decimal;
use salon_client::{BookingRequest, ClientConfig};
use salon_desk::commands::{self, Context, parse_enum};
use salon_desk::setup_environment;
use shared::SlotTime;
use shared::commission::CommissionType;
use shared::grid::DEFAULT_SLOT_HEIGHT;
use shared::models::{AppointmentState, MovementKind, PaymentMethod};

#[derive(Parser)]
#[command(name = "salon-desk")]
#[command(about = "Front desk tools for the salon back office")]
struct Cli {
    /// Backend base URL (overrides SALON_API_URL)
    #[arg(long, global = true)]
    api_url: Option<String>,

    /// Bearer token (overrides SALON_API_TOKEN)
    #[arg(long, global = true)]
    token: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the day grid and its appointments
    Agenda {
        /// Day to show (YYYY-MM-DD), today by default
        #[arg(short, long)]
        date: Option<NaiveDate>,

        /// Pixel height of a slot row
        #[arg(long, default_value_t = DEFAULT_SLOT_HEIGHT)]
        slot_height: u32,
    },
    /// List free start times of a staff member
    Slots {
        #[arg(short, long)]
        staff: i64,

        #[arg(short, long)]
        date: Option<NaiveDate>,

        /// Service length in minutes
        #[arg(long, default_value_t = 15)]
        duration: u32,
    },
    /// Book an appointment
    Book {
        #[arg(short, long)]
        staff: i64,

        #[arg(short, long)]
        date: Option<NaiveDate>,

        /// Start time (HH:MM)
        #[arg(short, long)]
        time: SlotTime,

        #[arg(long)]
        client: i64,

        #[arg(long)]
        service: i64,

        /// Service length in minutes
        #[arg(long)]
        duration: u32,

        #[arg(long)]
        notes: Option<String>,
    },
    /// Move an appointment to another staff member or time
    Move {
        appointment: i64,

        /// Day the appointment is on (YYYY-MM-DD)
        #[arg(short, long)]
        date: Option<NaiveDate>,

        #[arg(short, long)]
        staff: i64,

        /// New start time (HH:MM)
        #[arg(short, long)]
        time: SlotTime,
    },
    /// Change an appointment's state
    State {
        appointment: i64,

        /// confirmed, client_arrived, completed, cancelled or no_show
        #[arg(value_parser = parse_enum::<AppointmentState>)]
        state: AppointmentState,

        #[arg(short, long)]
        date: Option<NaiveDate>,

        #[arg(long)]
        reason: Option<String>,
    },
    /// Cash drawer
    Caja {
        #[command(subcommand)]
        command: CajaCommands,
    },
    /// Commission calculator
    Commission {
        #[command(subcommand)]
        command: CommissionCommands,
    },
    /// List roles, or the roles granting a permission
    Roles {
        #[arg(long)]
        check: Option<String>,
    },
}

#[derive(Subcommand)]
enum CajaCommands {
    /// Show the open drawer (expected total withheld)
    Status,
    Open {
        #[arg(long)]
        operator_id: i64,

        #[arg(long)]
        operator_name: String,

        /// Starting cash
        #[arg(long)]
        float: Decimal,

        #[arg(long)]
        note: Option<String>,
    },
    /// Register a cash-in or cash-out
    Movement {
        /// in or out
        #[arg(value_parser = parse_enum::<MovementKind>)]
        kind: MovementKind,

        amount: Decimal,

        #[arg(long, default_value = "")]
        concept: String,

        /// cash, card, transfer or other
        #[arg(long, default_value = "cash", value_parser = parse_enum::<PaymentMethod>)]
        method: PaymentMethod,
    },
    /// Blind close: submit the counted cash, then see the difference
    Close {
        #[arg(long)]
        counted: Decimal,

        #[arg(long)]
        note: Option<String>,
    },
}

#[derive(Subcommand)]
enum CommissionCommands {
    /// Commission owed on a single amount
    Calc {
        #[arg(long)]
        base: Decimal,

        /// percentage or fixed
        #[arg(long = "type", value_parser = parse_enum::<CommissionType>)]
        kind: CommissionType,

        #[arg(long)]
        rate: Decimal,
    },
    /// Projected earnings of a staff member over invoice lines (JSON file)
    Project {
        #[arg(short, long)]
        staff: i64,

        lines: PathBuf,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    setup_environment();
    let cli = Cli::parse();

    let mut config = ClientConfig::from_env();
    if let Some(url) = cli.api_url {
        config.base_url = url;
    }
    if let Some(token) = cli.token {
        config = config.with_token(token);
    }

    let today = || Local::now().date_naive();

    let ctx = Context::connect(&config)?;

    let result = match cli.command {
        Commands::Agenda { date, slot_height } => {
            commands::agenda::run(&ctx, date.unwrap_or_else(today), slot_height).await
        }
        Commands::Slots {
            staff,
            date,
            duration,
        } => commands::agenda::slots(&ctx, date.unwrap_or_else(today), staff, duration).await,
        Commands::Book {
            staff,
            date,
            time,
            client,
            service,
            duration,
            notes,
        } => {
            let request = BookingRequest {
                staff_id: staff,
                slot: time,
                client_id: client,
                service_id: service,
                duration_minutes: duration,
                notes,
            };
            commands::cita::book(&ctx, date.unwrap_or_else(today), request).await
        }
        Commands::Move {
            appointment,
            date,
            staff,
            time,
        } => {
            commands::cita::reassign(&ctx, date.unwrap_or_else(today), appointment, staff, time)
                .await
        }
        Commands::State {
            appointment,
            state,
            date,
            reason,
        } => {
            commands::cita::change_state(&ctx, date.unwrap_or_else(today), appointment, state, reason)
                .await
        }
        Commands::Caja { command } => match command {
            CajaCommands::Status => commands::caja::status(&ctx).await,
            CajaCommands::Open {
                operator_id,
                operator_name,
                float,
                note,
            } => commands::caja::open(&ctx, operator_id, operator_name, float, note).await,
            CajaCommands::Movement {
                kind,
                amount,
                concept,
                method,
            } => commands::caja::movement(&ctx, kind, amount, concept, method).await,
            CajaCommands::Close { counted, note } => {
                commands::caja::close(&ctx, counted, note).await
            }
        },
        Commands::Commission { command } => match command {
            CommissionCommands::Calc { base, kind, rate } => {
                commands::commission::calculate(base, kind, rate)
            }
            CommissionCommands::Project { staff, lines } => {
                commands::commission::project(&ctx, staff, &lines).await
            }
        },
        Commands::Roles { check } => commands::roles::run(&ctx, check).await,
    };

    if let Err(e) = &result {
        tracing::error!("Command failed: {:#}", e);
    }
    result
}
