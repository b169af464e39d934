use std::process::ExitCode;

use anyhow::Context;

use chrono::{Local, NaiveDate};

use clap::Parser;

use meeting_scheduler::domain::TimeSlot;
use meeting_scheduler::scheduler::{
    BookingForm, BookingView, HttpBookingStore, HttpNotifier, Notice, Scheduler, SubmitOutcome,
};
use meeting_scheduler::settings::Settings;
use meeting_scheduler::telemetry;

/// Request a meeting through the meeting service
#[derive(Debug, Parser)]
#[command(name = "schedule", version)]
struct Args {
    /// Print the bookable time slots and exit
    #[arg(long)]
    list_slots: bool,

    #[arg(long, default_value = "")]
    name: String,
    #[arg(long, default_value = "")]
    email: String,
    #[arg(long, default_value = "")]
    phone: String,
    #[arg(long, default_value = "")]
    subject: String,
    #[arg(long, default_value = "")]
    message: String,

    /// Meeting day, YYYY-MM-DD
    #[arg(long)]
    date: Option<NaiveDate>,
    /// One of the bookable slots, e.g. "10:00 AM"
    #[arg(long, value_parser = parse_slot)]
    time: Option<TimeSlot>,
}

fn parse_slot(value: &str) -> Result<TimeSlot, String> {
    value.parse().map_err(|e: meeting_scheduler::error::Error| e.to_string())
}

/// Prints notices to the terminal in place of toasts
#[derive(Debug, Default)]
struct TerminalView;

impl BookingView for TerminalView {
    fn show_notice(&mut self, notice: Notice) {
        if notice.destructive {
            eprintln!("{}: {}", notice.title, notice.description);
        } else {
            println!("{} {}", notice.title, notice.description);
        }
    }

    fn close(&mut self) {}
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let args = Args::parse();

    if args.list_slots {
        for slot in TimeSlot::catalog() {
            println!("{}", slot);
        }
        return Ok(ExitCode::SUCCESS);
    }

    let subscriber = telemetry::create_subscriber("warn", std::io::stderr);
    telemetry::set_subscriber(subscriber)?;

    let settings = Settings::load()?;
    let api_base_url = settings.scheduler.api_base_url()?;
    let client = reqwest::Client::builder()
        .build()
        .context("Failed to build http client")?;

    let store = HttpBookingStore::new(client.clone(), &api_base_url)?;
    let notifier = HttpNotifier::new(client, &api_base_url)?;

    let form = BookingForm {
        name: args.name,
        email: args.email,
        phone: args.phone,
        subject: args.subject,
        message: args.message,
        date: args.date,
        time: args.time,
    };
    let scheduler =
        Scheduler::new(store, notifier, settings.scheduler.request_timeout()).with_form(form);

    let today = Local::now().date_naive();
    let outcome = scheduler.submit(today, &mut TerminalView).await;

    Ok(match outcome {
        SubmitOutcome::Settled(settlement) if settlement.is_scheduled() => ExitCode::SUCCESS,
        _ => ExitCode::FAILURE,
    })
}
