// Fantasy insights dashboard entry point.
//
// Startup sequence:
// 1. Initialize tracing (log to file, not terminal)
// 2. Load config
// 3. Open the preference store
// 4. Build the data source
// 5. Restore the theme
// 6. Load the season catalog (required documents)
// 7. Resolve the location from the command line or the store
// 8. Create mpsc channels
// 9. Spawn the app task, run the TUI
// 10. Wait for the app task and report its outcome

use insights_tui::app;
use insights_tui::tui;

use insights_core::catalog::Catalog;
use insights_core::config;
use insights_core::controller::Controller;
use insights_core::location::Location;
use insights_core::store::PreferenceStore;
use insights_core::theme::Theme;

use anyhow::Context;
use tokio::sync::mpsc;
use tracing::{error, info, warn};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. Initialize tracing
    init_tracing()?;
    info!("Fantasy insights starting up");

    // 2. Load config
    let config = config::load_config().context("failed to load configuration")?;
    info!("Config loaded: data source {:?}", config.data.source);

    // 3. Open the preference store
    let db_path = config.storage.resolve_db_path();
    if let Some(parent) = db_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }
    let store = PreferenceStore::open(&db_path.to_string_lossy())
        .context("failed to open preference store")?;
    info!("Preference store opened at {}", db_path.display());

    // 4. Build the data source
    let cwd = std::env::current_dir().context("failed to resolve working directory")?;
    let source = config
        .data
        .build_source(&cwd)
        .context("failed to build data source")?;

    // 5. Restore the theme; unknown stored ids fall back to the config default
    let theme = match store.theme() {
        Ok(Some(id)) => Theme::by_id(&id),
        Ok(None) => None,
        Err(e) => {
            warn!("Failed to read stored theme: {:#}", e);
            None
        }
    }
    .or_else(|| Theme::by_id(&config.ui.default_theme))
    .unwrap_or_else(Theme::default_theme);
    info!("Theme: {}", theme.id);

    // 6. Load the season catalog
    let catalog = Catalog::load(source.as_ref())
        .await
        .context("failed to load season catalog")?;

    // 7. Location: `fantasy-insights season=2023` wins over the stored one
    let location = match std::env::args().nth(1) {
        Some(query) => Location::parse(&query),
        None => store.location().unwrap_or_else(|e| {
            warn!("Failed to read stored location: {:#}", e);
            Location::default()
        }),
    };
    info!("Starting location: {:?}", location.to_query_string());

    // 8. Create mpsc channels
    let (cmd_tx, cmd_rx) = mpsc::channel(64);
    let (team_tx, team_rx) = mpsc::channel(16);
    let (ui_tx, ui_rx) = mpsc::channel(64);

    let controller = Controller::new(source, catalog, location);
    let app_state = app::AppState::new(controller, store, theme, team_tx);

    // 9. Spawn the app task, then run the TUI until the user quits or the
    //    app task exits (which closes ui_rx)
    let app_handle = tokio::spawn(app::run(cmd_rx, team_rx, ui_tx, app_state));
    info!("Application ready");

    if let Err(e) = tui::run(ui_rx, cmd_tx).await {
        error!("TUI error: {}", e);
    }

    // 10. Wait for the app task (with timeout)
    match tokio::time::timeout(std::time::Duration::from_secs(5), app_handle).await {
        Ok(Ok(Ok(()))) => {}
        Ok(Ok(Err(e))) => {
            error!("Application loop error: {:#}", e);
            return Err(e);
        }
        Ok(Err(e)) => {
            error!("Application task failed: {}", e);
            return Err(e).context("application task failed");
        }
        Err(_) => warn!("Application task did not stop within 5s"),
    }

    info!("Fantasy insights shut down cleanly");
    Ok(())
}

/// Initialize tracing to log to a file (not the terminal, which is used by the TUI).
fn init_tracing() -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::EnvFilter;

    let log_dir = std::env::current_dir()?.join("logs");
    std::fs::create_dir_all(&log_dir)?;

    let log_file = std::fs::File::create(log_dir.join("fantasy-insights.log"))?;

    let subscriber = fmt::Subscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("insights_core=info,insights_tui=info,warn")),
        )
        .with_writer(log_file)
        .with_ansi(false)
        .with_target(true)
        .with_thread_ids(true)
        .with_line_number(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .context("failed to set tracing subscriber")?;

    Ok(())
}
