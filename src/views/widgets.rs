use ratatui::widgets::ListState;

/// Cursor over a list whose items live elsewhere (the message provider owns
/// the cards; this only remembers which one is highlighted).
#[derive(Default, Debug)]
pub struct CardCursor {
    pub state: ListState,
}

impl CardCursor {
    pub fn selected(&self, len: usize) -> Option<usize> {
        self.state.selected().filter(|i| *i < len)
    }

    /// Keeps the selection inside `0..len` after the list changed.
    pub fn clamp(&mut self, len: usize) {
        match (self.state.selected(), len) {
            (_, 0) => self.state.select(None),
            (None, _) => self.state.select(Some(0)),
            (Some(i), len) if i >= len => self.state.select(Some(len - 1)),
            _ => {}
        }
    }

    pub fn next(&mut self, len: usize) {
        if len == 0 {
            self.state.select(None);
            return;
        }
        let i = match self.state.selected() {
            Some(i) if i + 1 < len => i + 1,
            Some(_) => len - 1,
            None => 0,
        };
        self.state.select(Some(i));
    }

    pub fn previous(&mut self, len: usize) {
        if len == 0 {
            self.state.select(None);
            return;
        }
        let i = match self.state.selected() {
            Some(i) => i.saturating_sub(1).min(len - 1),
            None => 0,
        };
        self.state.select(Some(i));
    }
}

/// Fixed list with a movable highlight, used by the emoji picker.
pub struct StatefulList<T> {
    pub state: ListState,
    pub items: Vec<T>,
}

impl<T> StatefulList<T> {
    pub fn with_items(items: Vec<T>) -> StatefulList<T> {
        let mut state = ListState::default();
        // Start with the first item selected
        if !items.is_empty() {
            state.select(Some(0));
        }
        StatefulList { state, items }
    }

    pub fn selected_item(&self) -> Option<&T> {
        self.state.selected().and_then(|i| self.items.get(i))
    }

    pub fn next(&mut self) {
        if self.items.is_empty() {
            return;
        }
        let i = match self.state.selected() {
            Some(i) => (i + 1) % self.items.len(),
            None => 0,
        };
        self.state.select(Some(i));
    }

    pub fn previous(&mut self) {
        if self.items.is_empty() {
            return;
        }
        let i = match self.state.selected() {
            Some(0) | None => self.items.len() - 1,
            Some(i) => i - 1,
        };
        self.state.select(Some(i));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cursor_stays_in_bounds() {
        let mut cursor = CardCursor::default();
        cursor.clamp(3);
        assert_eq!(cursor.selected(3), Some(0));

        cursor.previous(3);
        assert_eq!(cursor.selected(3), Some(0));
        cursor.next(3);
        cursor.next(3);
        cursor.next(3);
        assert_eq!(cursor.selected(3), Some(2));

        // list shrank after a delete
        cursor.clamp(2);
        assert_eq!(cursor.selected(2), Some(1));
        cursor.clamp(0);
        assert_eq!(cursor.selected(0), None);
    }

    #[test]
    fn picker_wraps_around() {
        let mut picker = StatefulList::with_items(vec!["a", "b", "c"]);
        assert_eq!(picker.selected_item(), Some(&"a"));
        picker.previous();
        assert_eq!(picker.selected_item(), Some(&"c"));
        picker.next();
        assert_eq!(picker.selected_item(), Some(&"a"));

        let mut empty: StatefulList<&str> = StatefulList::with_items(vec![]);
        empty.next();
        assert_eq!(empty.selected_item(), None);
    }
}
