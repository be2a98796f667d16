use super::super::super::messages::Message;
use super::super::super::state::{App, SOURCE_SCROLL_ID, TARGET_SCROLL_ID};
use super::super::Effect;
use crate::lookup::lookup_word;
use iced::Event;
use iced::Task;
use iced::event;
use iced::keyboard;
use iced::mouse;
use iced::touch;
use iced::widget::scrollable::{self, AbsoluteOffset};
use iced::window;
use tracing::{debug, info};

impl App {
    pub(super) fn run_effect(&mut self, effect: Effect) -> Task<Message> {
        match effect {
            Effect::SaveConfig => {
                self.save_video_config();
                Task::none()
            }
            Effect::SaveWordbook => {
                self.persist_wordbook();
                Task::none()
            }
            Effect::ScrollPanes(offsets) => Task::batch([
                scrollable::scroll_to(
                    SOURCE_SCROLL_ID.clone(),
                    AbsoluteOffset {
                        x: 0.0,
                        y: offsets.source,
                    },
                ),
                scrollable::scroll_to(
                    TARGET_SCROLL_ID.clone(),
                    AbsoluteOffset {
                        x: 0.0,
                        y: offsets.target,
                    },
                ),
            ]),
            Effect::Lookup { request_id, word } => {
                let endpoint = self.config.lookup_endpoint.clone();
                let timeout = self.config.lookup_timeout();
                debug!(request_id, %word, "Dispatching lookup task");
                Task::perform(lookup_word(endpoint, word, timeout), move |result| {
                    Message::LookupFinished { request_id, result }
                })
            }
            Effect::QuitSafely => {
                for action in self.sync.shutdown() {
                    debug!(?action, "Stopped sync polling for shutdown");
                }
                if let Err(err) = self.clock.pause() {
                    debug!("Player already gone at shutdown: {err}");
                }
                self.clock.detach();
                self.save_video_config();
                self.persist_wordbook();
                info!("Safe quit complete");
                iced::exit()
            }
        }
    }
}

/// Wheel and touch gestures are reported even when a scrollable captured
/// them; keyboard shortcuts only when no widget did.
pub(super) fn runtime_event_to_message(
    event: Event,
    status: event::Status,
    _window_id: window::Id,
) -> Option<Message> {
    match event {
        Event::Mouse(mouse::Event::WheelScrolled { .. }) => Some(Message::UserScrollGesture),
        Event::Touch(touch::Event::FingerMoved { .. }) => Some(Message::UserScrollGesture),
        _ if status == event::Status::Captured => None,
        Event::Window(window::Event::Resized(size)) => Some(Message::WindowResized {
            width: size.width,
            height: size.height,
        }),
        Event::Keyboard(keyboard::Event::KeyPressed { key, modifiers, .. }) => {
            Some(Message::KeyPressed { key, modifiers })
        }
        _ => None,
    }
}
