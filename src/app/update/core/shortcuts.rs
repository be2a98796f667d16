use super::super::super::messages::Message;
use super::super::super::state::App;
use iced::keyboard::{Key, Modifiers, key};

impl App {
    pub(super) fn shortcut_message_for_key(
        &self,
        key: Key,
        modifiers: Modifiers,
    ) -> Option<Message> {
        let pressed = match key.as_ref() {
            Key::Named(key::Named::Space) => "space".to_string(),
            Key::Named(key::Named::Tab) => "tab".to_string(),
            Key::Character(ch) => ch.to_ascii_lowercase(),
            _ => return None,
        };

        let bindings: [(&str, &str, Message); 6] = [
            (
                self.config.key_toggle_play_pause.as_str(),
                "space",
                Message::TogglePlayPause,
            ),
            (self.config.key_safe_quit.as_str(), "q", Message::SafeQuit),
            (
                self.config.key_jump_to_active.as_str(),
                "j",
                Message::JumpToActive,
            ),
            (self.config.key_switch_pane.as_str(), "tab", Message::SwitchPane),
            (
                self.config.key_toggle_wordbook.as_str(),
                "ctrl+w",
                Message::ToggleWordbookPanel,
            ),
            (
                self.config.key_toggle_lookup.as_str(),
                "ctrl+l",
                Message::ToggleLookupPanel,
            ),
        ];

        bindings
            .into_iter()
            .find(|(raw, fallback, _)| Self::shortcut_matches(raw, fallback, &pressed, modifiers))
            .map(|(_, _, message)| message)
    }

    pub(super) fn shortcut_matches(
        raw: &str,
        fallback: &str,
        pressed: &str,
        modifiers: Modifiers,
    ) -> bool {
        let normalized = Self::normalize_shortcut_token(raw, fallback);

        let mut required_ctrl = false;
        let mut required_alt = false;
        let mut required_logo = false;
        let mut required_shift = false;
        let mut required_key: Option<&str> = None;

        for token in normalized
            .split('+')
            .map(str::trim)
            .filter(|s| !s.is_empty())
        {
            match token {
                "ctrl" | "control" => required_ctrl = true,
                "alt" => required_alt = true,
                "logo" | "meta" | "super" | "cmd" | "command" => required_logo = true,
                "shift" => required_shift = true,
                key => required_key = Some(key),
            }
        }

        let required_key = required_key.unwrap_or(fallback);
        if pressed != required_key {
            return false;
        }

        modifiers.control() == required_ctrl
            && modifiers.alt() == required_alt
            && modifiers.logo() == required_logo
            && modifiers.shift() == required_shift
    }

    pub(super) fn normalize_shortcut_token(raw: &str, fallback: &str) -> String {
        let normalized = raw.trim().to_ascii_lowercase();
        if normalized.is_empty() {
            fallback.to_string()
        } else {
            normalized.replace("spacebar", "space")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use iced::keyboard::Modifiers;

    #[test]
    fn normalizes_spacebar_alias() {
        assert_eq!(App::normalize_shortcut_token(" SpaceBar ", "x"), "space");
    }

    #[test]
    fn empty_binding_uses_fallback() {
        assert!(App::shortcut_matches("", "j", "j", Modifiers::empty()));
    }

    #[test]
    fn matches_ctrl_w_shortcut() {
        assert!(App::shortcut_matches("ctrl+w", "x", "w", Modifiers::CTRL));
    }

    #[test]
    fn rejects_unexpected_extra_modifier() {
        assert!(!App::shortcut_matches(
            "ctrl+l",
            "x",
            "l",
            Modifiers::CTRL | Modifiers::SHIFT,
        ));
    }

    #[test]
    fn plain_key_rejects_ctrl_variant() {
        assert!(!App::shortcut_matches("tab", "tab", "tab", Modifiers::CTRL));
    }
}
