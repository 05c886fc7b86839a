//! Source picker menu presented to the user.

use crate::CaptureSource;

/// Label of the entry that refuses the capture.
pub const CANCEL_LABEL: &str = "Cancel";

/// What a picker entry stands for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Choice {
    /// Index into the enumerated sources.
    Source(usize),
    Cancel,
}

/// A single menu entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MenuEntry {
    Item { label: String, choice: Choice },
    Separator,
}

/// Ordered entries shown by the host's picker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChoiceMenu {
    entries: Vec<MenuEntry>,
    cancelable: bool,
}

impl ChoiceMenu {
    /// One entry per source in enumeration order, then a separator and
    /// [`CANCEL_LABEL`].
    pub fn for_sources(sources: &[CaptureSource]) -> Self {
        let mut entries: Vec<MenuEntry> = sources
            .iter()
            .enumerate()
            .map(|(index, source)| MenuEntry::Item {
                label: source.label().to_string(),
                choice: Choice::Source(index),
            })
            .collect();

        entries.push(MenuEntry::Separator);
        entries.push(MenuEntry::Item {
            label: CANCEL_LABEL.to_string(),
            choice: Choice::Cancel,
        });

        Self {
            entries,
            cancelable: true,
        }
    }

    pub fn entries(&self) -> &[MenuEntry] {
        &self.entries
    }

    /// Whether the picker may be dismissed without picking anything.
    pub fn cancelable(&self) -> bool {
        self.cancelable
    }

    /// Selectable entries, skipping separators.
    pub fn items(&self) -> impl Iterator<Item = (&str, Choice)> {
        self.entries.iter().filter_map(|entry| match entry {
            MenuEntry::Item { label, choice } => Some((label.as_str(), *choice)),
            MenuEntry::Separator => None,
        })
    }
}
