/// Which photo, if any, is currently focused.
///
/// At most one item is selected at a time. Selecting the selected item
/// again clears it.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Selection {
    selected: Option<usize>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    pub fn is_selected(&self, index: usize) -> bool {
        self.selected == Some(index)
    }

    pub fn is_active(&self) -> bool {
        self.selected.is_some()
    }

    /// Toggle `index`: select it, or clear if it already is the selection.
    ///
    /// Returns the new selection.
    pub fn select(&mut self, index: usize) -> Option<usize> {
        self.selected = if self.selected == Some(index) {
            None
        } else {
            Some(index)
        };
        self.selected
    }

    pub fn clear(&mut self) {
        self.selected = None;
    }
}
