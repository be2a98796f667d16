mod messages;
mod state;
mod update;
mod view;

pub use state::App;

use crate::config::AppConfig;
use crate::storage::KeyValueStore;
use crate::transcript::Session;
use iced::{Size, Theme, window};

/// Launch the player window for a resolved session.
pub fn run_app(
    config: AppConfig,
    session: Session,
    store: Box<dyn KeyValueStore>,
) -> iced::Result {
    let window_settings = window::Settings {
        size: Size::new(config.window_width, config.window_height),
        ..window::Settings::default()
    };

    iced::application("CineLingua", App::update, App::view)
        .window(window_settings)
        .subscription(App::subscription)
        .theme(|app: &App| {
            if app.is_night() {
                Theme::Dark
            } else {
                Theme::Light
            }
        })
        .run_with(move || App::bootstrap(config, session, store))
}
