use std::collections::HashMap;

/// One deduplicated footnote.
#[derive(Clone, Debug)]
pub struct FootnoteEntry {
    pub number: u32,
    pub text: String,
    pub link: Option<String>,
    printed: bool,
}

/// Content-keyed footnote table. Two footnotes with identical text collapse
/// to one entry and share a number; numbers are assigned in first-seen order
/// and entries live until the render pass ends.
///
/// The hash index makes the lookup O(1); ordering still comes solely from
/// the entry vector.
#[derive(Default)]
pub struct FootnoteTable {
    entries: Vec<FootnoteEntry>,
    index: HashMap<String, usize>,
}

impl FootnoteTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up `text`, registering it with the next sequential number on
    /// first sight. Returns the assigned number either way.
    pub fn check(&mut self, text: &str, link: Option<&str>) -> u32 {
        if let Some(&i) = self.index.get(text) {
            return self.entries[i].number;
        }
        let number = self.entries.len() as u32 + 1;
        self.index.insert(text.to_string(), self.entries.len());
        self.entries.push(FootnoteEntry {
            number,
            text: text.to_string(),
            link: link.map(str::to_string),
            printed: false,
        });
        number
    }

    /// Entries not yet flushed, in assigned-number order; marks them printed.
    pub fn take_unprinted(&mut self) -> Vec<FootnoteEntry> {
        let mut out = Vec::new();
        for entry in &mut self.entries {
            if !entry.printed {
                entry.printed = true;
                out.push(entry.clone());
            }
        }
        out
    }

    pub fn has_unprinted(&self) -> bool {
        self.entries.iter().any(|e| !e.printed)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
