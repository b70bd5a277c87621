//! Exam Results
//!
//! Main application entry point

use std::future::Future;

use anyhow::Context;
use tracing::{info, warn};

use exam_results::{
    config::Settings,
    database::{DatabaseService, StoreClient},
    handlers::{self, MenuOption},
    services::ServiceFactory,
    state::CancelHandle,
    utils::logging,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration
    let settings = Settings::new().context("Failed to load configuration")?;
    settings.validate()?;

    // Initialize logging; the guard flushes the file writer on exit
    let _log_guard = logging::init_logging(&settings.logging)?;

    info!("Starting {}...", exam_results::info());

    // Initialize the data store client
    let client = StoreClient::new(&settings.store)?;
    info!(rest_url = %client.rest_url(), "Data store client created");

    let database = DatabaseService::new(client);
    let services = ServiceFactory::new(database, settings.clone());

    if let Err(e) = services.health_check().await {
        warn!(error = %e, "Data store health check failed; views will show fetch errors");
    }

    let mut console = handlers::console::stdio();
    let menu: Vec<String> = MenuOption::ALL.iter().map(|option| option.label().to_string()).collect();

    loop {
        let choice = tokio::select! {
            choice = console.choose("== Exam Results ==", &menu) => choice?,
            _ = tokio::signal::ctrl_c() => None,
        };
        let Some(option) = choice.map(|index| MenuOption::ALL[index]) else {
            break;
        };

        match option {
            MenuOption::Dashboard => {
                let mut view = services.dashboard();
                let handle = view.cancel_handle();
                cancel_on_interrupt(handle, handlers::dashboard::show_dashboard(&mut console, &mut view)).await?;
            }
            MenuOption::Students => {
                let mut view = services.roster();
                let handle = view.cancel_handle();
                cancel_on_interrupt(handle, handlers::students::manage_students(&mut console, &mut view)).await?;
            }
            MenuOption::EnterMarks => {
                let mut view = services.mark_entry();
                let handle = view.cancel_handle();
                cancel_on_interrupt(handle, handlers::marks::enter_marks(&mut console, &mut view)).await?;
            }
            MenuOption::ExamAnalysis => {
                let mut view = services.exam_analysis();
                let handle = view.cancel_handle();
                cancel_on_interrupt(handle, handlers::analysis::explore_results(&mut console, &mut view)).await?;
            }
            MenuOption::Quit => break,
        }
    }

    info!("Exam Results has been shut down.");
    Ok(())
}

/// Run one view activation; Ctrl-C cancels its in-flight requests and leaves the view
async fn cancel_on_interrupt<F>(handle: CancelHandle, activation: F) -> exam_results::Result<()>
where
    F: Future<Output = exam_results::Result<()>>,
{
    tokio::select! {
        outcome = activation => outcome,
        _ = tokio::signal::ctrl_c() => {
            handle.cancel();
            warn!("View interrupted");
            Ok(())
        }
    }
}
