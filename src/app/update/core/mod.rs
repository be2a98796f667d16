mod reducer;
mod runtime;
mod shortcuts;

use super::super::messages::Message;
use super::super::state::App;
use iced::event;
use iced::time;
use iced::window;
use iced::{Subscription, Task};

impl App {
    pub fn subscription(app: &App) -> Subscription<Message> {
        let mut subscriptions: Vec<Subscription<Message>> = vec![
            event::listen_with(runtime::runtime_event_to_message),
            time::every(app.config.player_event_poll_interval())
                .map(|_| Message::PollSystemSignals),
        ];

        if let Some(handle) = app.sync.poll_handle() {
            subscriptions.push(
                time::every(app.config.poll_interval())
                    .with(handle.generation())
                    .map(|(generation, now)| Message::PollTick { generation, now }),
            );
        }

        if app.sync.is_animating() {
            subscriptions.push(window::frames().map(Message::AnimationFrame));
        }

        Subscription::batch(subscriptions)
    }

    pub fn update(&mut self, message: Message) -> Task<Message> {
        let effects = self.reduce(message);
        if effects.is_empty() {
            Task::none()
        } else {
            Task::batch(effects.into_iter().map(|effect| self.run_effect(effect)))
        }
    }
}
