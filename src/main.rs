//! Confly: launcher-style Confluence content search
//!
//! Opens a launcher window, fetches the first page of workspace content
//! from the Confluence REST API, and renders it as a searchable list.
//! Enter opens the selected page in the browser, Ctrl+. copies its URL.
//!
//! Settings come from CONFLY_INSTANCE/CONFLY_USER/CONFLY_TOKEN or from
//! the settings.json file under the XDG config dir.

mod actions;
mod app;
mod confluence;
mod settings;

use app::Confly;
use iced::{window, Size};
use settings::Settings;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> iced::Result {
    let _ = tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();

    let settings = match Settings::load() {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("confly: {}", e);
            std::process::exit(1);
        }
    };

    tracing::info!("Starting confly for {}", settings.instance);

    iced::application(Confly::title, Confly::update, Confly::view)
        .subscription(Confly::subscription)
        .theme(Confly::theme)
        .window(window::Settings {
            size: Size::new(700.0, 400.0),
            position: window::Position::Centered,
            decorations: false,
            transparent: true,
            level: window::Level::AlwaysOnTop,
            resizable: true,
            ..Default::default()
        })
        .antialiasing(true)
        .run_with(move || Confly::new(settings.clone()))
}
