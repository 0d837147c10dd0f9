use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::util::text_input::TextInput;

/// Map a base key to its US-layout shifted symbol
fn shift_symbol(c: char) -> Option<char> {
    match c {
        '/' => Some('?'),
        '1' => Some('!'),
        '2' => Some('@'),
        '3' => Some('#'),
        '-' => Some('_'),
        '=' => Some('+'),
        ';' => Some(':'),
        _ => None,
    }
}

/// Normalize key events from terminals using the kitty keyboard protocol.
///
/// Kitty sends `Char(lowercase) + SHIFT` where legacy terminals send
/// `Char(UPPERCASE) + SHIFT`, and the base symbol where they send the shifted
/// one. Legacy events pass through unchanged.
pub(super) fn normalize_key(mut key: KeyEvent) -> KeyEvent {
    if let KeyCode::Char(c) = key.code
        && key.modifiers.contains(KeyModifiers::SHIFT)
    {
        if c.is_ascii_lowercase() {
            key.code = KeyCode::Char(c.to_ascii_uppercase());
        } else if let Some(shifted) = shift_symbol(c) {
            key.code = KeyCode::Char(shifted);
            key.modifiers.remove(KeyModifiers::SHIFT);
        }
    }
    key
}

/// Line-editing keys shared by every text field. Returns false for keys it
/// does not handle so the caller can act on them.
pub(super) fn edit_text(input: &mut TextInput, key: KeyEvent) -> bool {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    match key.code {
        KeyCode::Char('w') if ctrl => input.delete_word(),
        KeyCode::Char('u') if ctrl => input.clear(),
        KeyCode::Char('a') if ctrl => input.home(),
        KeyCode::Char('e') if ctrl => input.end(),
        KeyCode::Char(_) if ctrl || key.modifiers.contains(KeyModifiers::ALT) => return false,
        KeyCode::Char(c) => input.insert(c),
        KeyCode::Backspace => input.backspace(),
        KeyCode::Delete => input.delete(),
        KeyCode::Left => input.left(),
        KeyCode::Right => input.right(),
        KeyCode::Home => input.home(),
        KeyCode::End => input.end(),
        _ => return false,
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kitty_shift_letters_become_uppercase() {
        let key = normalize_key(KeyEvent::new(KeyCode::Char('a'), KeyModifiers::SHIFT));
        assert_eq!(key.code, KeyCode::Char('A'));
        let key = normalize_key(KeyEvent::new(KeyCode::Char('/'), KeyModifiers::SHIFT));
        assert_eq!(key.code, KeyCode::Char('?'));
        assert!(!key.modifiers.contains(KeyModifiers::SHIFT));
    }

    #[test]
    fn legacy_keys_pass_through() {
        let key = KeyEvent::new(KeyCode::Char('A'), KeyModifiers::SHIFT);
        assert_eq!(normalize_key(key), key);
        let key = KeyEvent::new(KeyCode::Char('?'), KeyModifiers::NONE);
        assert_eq!(normalize_key(key), key);
    }

    #[test]
    fn text_keys_edit_buffer() {
        let mut input = TextInput::default();
        assert!(edit_text(&mut input, KeyEvent::new(KeyCode::Char('h'), KeyModifiers::NONE)));
        assert!(edit_text(&mut input, KeyEvent::new(KeyCode::Char('I'), KeyModifiers::SHIFT)));
        assert_eq!(input.value(), "hI");
        assert!(edit_text(&mut input, KeyEvent::new(KeyCode::Char('u'), KeyModifiers::CONTROL)));
        assert_eq!(input.value(), "");
        assert!(!edit_text(&mut input, KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE)));
        assert!(!edit_text(&mut input, KeyEvent::new(KeyCode::Char('s'), KeyModifiers::CONTROL)));
    }
}
