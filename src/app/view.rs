use super::messages::Message;
use super::state::{
    ANCHOR_MODES, App, LINE_PADDING_PX, LINE_SPACING_PX, MAX_FONT_SIZE, MAX_LINE_SPACING,
    MIN_FONT_SIZE, MIN_LINE_SPACING, PANE_PADDING_PX, SIDE_PANEL_WIDTH_PX, TranscriptStatus,
    scroll_id,
};
use crate::lookup::{LookupResult, LookupStatus};
use crate::player::PlayerState;
use crate::sync::{Pane, PaneViewport};
use iced::alignment::Vertical;
use iced::widget::text::{LineHeight, Wrapping};
use iced::widget::{
    Column, Row, button, checkbox, column, container, horizontal_space, mouse_area, pick_list,
    row, scrollable, slider, text, text_input,
};
use iced::{Background, Element, Length, Theme};

impl App {
    pub fn view(&self) -> Element<'_, Message> {
        let mut content: Column<'_, Message> = column![self.controls(), self.display_controls()]
            .padding(16)
            .spacing(12)
            .height(Length::Fill);

        if let Some(status) = self.status_line() {
            content = content.push(text(status));
        }

        let panes: Element<'_, Message> = if self.config.side_by_side {
            row![self.pane_view(Pane::Source), self.pane_view(Pane::Target)]
                .spacing(12)
                .height(Length::Fill)
                .into()
        } else {
            column![self.pane_tabs(), self.pane_view(self.panes.visible())]
                .spacing(8)
                .height(Length::Fill)
                .into()
        };
        content = content.push(panes);

        let mut layout: Row<'_, Message> = row![container(content).width(Length::Fill)].spacing(16);

        if self.config.show_wordbook || self.config.show_lookup {
            layout = layout.push(self.side_panel());
        }

        layout.into()
    }

    fn controls(&self) -> Element<'_, Message> {
        let state = self.clock.get_state().ok();
        let play_pause = match state {
            Some(PlayerState::Playing) => button("Pause").on_press(Message::Pause),
            Some(_) => button("Play").on_press(Message::Play),
            None => button("Play"),
        };

        let jump = if self.sync.active_index().is_some() {
            button("Jump to current").on_press(Message::JumpToActive)
        } else {
            button("Jump to current")
        };

        let theme_label = if self.is_night() {
            "Day Mode"
        } else {
            "Night Mode"
        };
        let wordbook_toggle = button(if self.config.show_wordbook {
            "Hide Wordbook"
        } else {
            "Show Wordbook"
        })
        .on_press(Message::ToggleWordbookPanel);
        let lookup_toggle = button(if self.config.show_lookup {
            "Hide Lookup"
        } else {
            "Show Lookup"
        })
        .on_press(Message::ToggleLookupPanel);

        let follow_label = if self.sync.is_auto_follow() {
            "Following"
        } else {
            "Free scroll"
        };

        row![
            play_pause,
            jump,
            button(theme_label).on_press(Message::ToggleTheme),
            wordbook_toggle,
            lookup_toggle,
            text(self.playback_label()),
            text(follow_label),
        ]
        .spacing(10)
        .align_y(Vertical::Center)
        .width(Length::Fill)
        .into()
    }

    fn display_controls(&self) -> Element<'_, Message> {
        row![
            column![
                text(format!("Font: {}", self.config.font_size)),
                slider(
                    MIN_FONT_SIZE as f32..=MAX_FONT_SIZE as f32,
                    self.config.font_size as f32,
                    |value| Message::FontSizeChanged(value.round() as u32),
                )
            ]
            .spacing(4)
            .width(Length::FillPortion(1)),
            column![
                text(format!("Line spacing: {:.1}", self.config.line_spacing)),
                slider(
                    MIN_LINE_SPACING..=MAX_LINE_SPACING,
                    self.config.line_spacing,
                    Message::LineSpacingChanged,
                )
                .step(0.1)
            ]
            .spacing(4)
            .width(Length::FillPortion(1)),
            column![
                text("Anchor"),
                pick_list(
                    &ANCHOR_MODES[..],
                    Some(self.config.scroll_anchor),
                    Message::AnchorModeChanged,
                )
            ]
            .spacing(4),
            checkbox("Side by side", self.config.side_by_side)
                .on_toggle(Message::SideBySideChanged),
            checkbox("Add clicked lines", self.config.forward_clicks_to_wordbook)
                .on_toggle(Message::ForwardClicksChanged),
        ]
        .spacing(12)
        .align_y(Vertical::Center)
        .width(Length::Fill)
        .into()
    }

    fn pane_tabs(&self) -> Element<'_, Message> {
        let visible = self.panes.visible();
        let tabs = Pane::ALL.into_iter().map(|pane| {
            let label = match pane {
                Pane::Source => "Original",
                Pane::Target => "Translation",
            };
            let tab = button(label);
            if pane == visible {
                Element::from(tab)
            } else {
                Element::from(tab.on_press(Message::SelectPane(pane)))
            }
        });
        Row::with_children(tabs).spacing(8).into()
    }

    fn pane_view(&self, pane: Pane) -> Element<'_, Message> {
        let font_size = self.config.font_size as f32;
        let line_height = LineHeight::Relative(self.config.line_spacing);
        let highlight = self.highlight_color();

        let lines = self.panes.lines(pane).iter().map(|line| {
            let active = line.active;
            let label = container(
                text(line.label.as_str())
                    .size(font_size)
                    .line_height(line_height)
                    .wrapping(Wrapping::WordOrGlyph)
                    .width(Length::Fill),
            )
            .width(Length::Fill)
            .padding(LINE_PADDING_PX)
            .style(move |_theme: &Theme| {
                if active {
                    container::Style {
                        background: Some(Background::Color(highlight)),
                        ..container::Style::default()
                    }
                } else {
                    container::Style::default()
                }
            });
            Element::from(mouse_area(label).on_press(Message::LineClicked {
                pane,
                index: line.index,
            }))
        });

        let body = Column::with_children(lines)
            .spacing(LINE_SPACING_PX)
            .padding(PANE_PADDING_PX)
            .width(Length::Fill);

        let view = scrollable(body)
            .id(scroll_id(pane))
            .on_scroll(move |viewport| Message::PaneScrolled {
                pane,
                viewport: PaneViewport {
                    offset_y: viewport.absolute_offset().y,
                    viewport_width: viewport.bounds().width,
                    viewport_height: viewport.bounds().height,
                    content_height: viewport.content_bounds().height,
                },
            })
            .width(Length::Fill)
            .height(Length::Fill);

        mouse_area(view)
            .on_enter(Message::PaneHovered(Some(pane)))
            .on_exit(Message::PaneHovered(None))
            .into()
    }

    fn side_panel(&self) -> Element<'_, Message> {
        let mut panel: Column<'_, Message> = column![].spacing(16);
        if self.config.show_wordbook {
            panel = panel.push(self.wordbook_panel());
        }
        if self.config.show_lookup {
            panel = panel.push(self.lookup_panel());
        }
        container(scrollable(panel))
            .width(Length::Fixed(SIDE_PANEL_WIDTH_PX))
            .padding(12)
            .into()
    }

    fn wordbook_panel(&self) -> Element<'_, Message> {
        let form = column![
            text_input("Original", &self.wordbook_form.source)
                .on_input(Message::WordbookSourceChanged)
                .on_submit(Message::WordbookAddSubmitted),
            text_input("Translation", &self.wordbook_form.translation)
                .on_input(Message::WordbookTranslationChanged)
                .on_submit(Message::WordbookAddSubmitted),
            button("Add").on_press(Message::WordbookAddSubmitted),
        ]
        .spacing(6);

        let mut panel: Column<'_, Message> = column![
            text(format!("Wordbook ({})", self.wordbook.len())).size(18.0),
            form
        ]
        .spacing(8);

        if let Some(notice) = &self.wordbook_form.notice {
            panel = panel.push(text(notice.as_str()).size(14.0));
        }

        if self.wordbook.is_empty() {
            return panel.push(text("No saved words yet.").size(14.0)).into();
        }

        let entries = self
            .wordbook
            .entries()
            .iter()
            .enumerate()
            .map(|(index, entry)| {
                let translation = if entry.translated_text.is_empty() {
                    "-"
                } else {
                    entry.translated_text.as_str()
                };
                let line = row![
                    column![
                        text(entry.source_text.as_str()),
                        text(translation).size(14.0)
                    ]
                    .width(Length::Fill),
                    checkbox("Learned", entry.learned)
                        .on_toggle(move |_| Message::WordbookToggleLearned(index)),
                    button("Delete").on_press(Message::WordbookDelete(index)),
                ]
                .spacing(8)
                .align_y(Vertical::Center);
                Element::from(line)
            });

        panel
            .push(Column::with_children(entries).spacing(6))
            .into()
    }

    fn lookup_panel(&self) -> Element<'_, Message> {
        let search = row![
            text_input("Look up a word", &self.lookup.query)
                .on_input(Message::LookupQueryChanged)
                .on_submit(Message::LookupSubmitted)
                .width(Length::Fill),
            button("Search").on_press(Message::LookupSubmitted),
        ]
        .spacing(6)
        .align_y(Vertical::Center);

        let status: Element<'_, Message> = match &self.lookup.status {
            LookupStatus::Idle => horizontal_space().into(),
            LookupStatus::Pending { word, .. } => text(format!("Looking up '{word}'...")).into(),
            LookupStatus::Found(result) => lookup_result_view(result),
            LookupStatus::NotFound(message) | LookupStatus::Failed(message) => {
                text(message.as_str()).into()
            }
        };

        column![text("Lookup").size(18.0), search, status]
            .spacing(8)
            .into()
    }

    fn playback_label(&self) -> String {
        let state = match self.clock.get_state() {
            Ok(state) => state.to_string(),
            Err(_) => "loading".to_string(),
        };
        let seconds = self.clock.get_current_time().unwrap_or(0.0).max(0.0);
        format!("{} {}", format_clock(seconds), state)
    }

    fn status_line(&self) -> Option<String> {
        match &self.transcript_status {
            TranscriptStatus::Loading => Some("Loading transcript...".to_string()),
            TranscriptStatus::Ready(0) => Some("Transcript has no lines.".to_string()),
            TranscriptStatus::Ready(_) => None,
            TranscriptStatus::Failed(reason) => {
                Some(format!("Transcript unavailable: {reason}"))
            }
        }
    }
}

fn lookup_result_view(result: &LookupResult) -> Element<'_, Message> {
    let heading = match &result.part_of_speech {
        Some(pos) => format!("{} ({pos})", result.word),
        None => result.word.clone(),
    };
    let mut body: Column<'_, Message> =
        column![text(heading).size(16.0), text(result.definition.as_str())].spacing(4);
    for example in &result.examples {
        body = body.push(text(format!("e.g. {example}")).size(14.0));
    }
    if !result.synonyms.is_empty() {
        body = body.push(text(format!("Synonyms: {}", result.synonyms.join(", "))).size(14.0));
    }
    if !result.antonyms.is_empty() {
        body = body.push(text(format!("Antonyms: {}", result.antonyms.join(", "))).size(14.0));
    }
    body.into()
}

fn format_clock(seconds: f64) -> String {
    let total = seconds.floor() as u64;
    format!("{:02}:{:02}", total / 60, total % 60)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clock_label_is_minutes_and_seconds() {
        assert_eq!(format_clock(0.0), "00:00");
        assert_eq!(format_clock(75.9), "01:15");
        assert_eq!(format_clock(3600.0), "60:00");
    }
}
