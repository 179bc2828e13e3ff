use std::collections::BTreeMap;

use crate::{DraftStyle, RequestId};

/// Why a style is waiting on the generator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PendingKind {
    /// First rendition of the style, derived from the base draft.
    Restyle,
    /// Rewrite of an existing entry from user feedback.
    Revision,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct PendingDraft {
    request_id: RequestId,
    kind: PendingKind,
}

/// Outcome of asking the cache to show another style.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StyleSwitch {
    /// There is no base draft to derive from.
    NoBase,
    /// The style is already current.
    Unchanged,
    /// The style was cached; the current pointer moved.
    Cached,
    /// The style is already being generated; the current pointer moved.
    AlreadyPending,
    /// The style must be generated from `base`. Nothing changed yet.
    Generate { base: String },
}

/// Generated draft text per style for the selected headline.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DraftCache {
    entries: BTreeMap<DraftStyle, String>,
    current: DraftStyle,
    pending: BTreeMap<DraftStyle, PendingDraft>,
}

impl DraftCache {
    /// Drops every entry and stores `base` as the current base-style draft.
    pub fn start(&mut self, base: String) {
        self.clear();
        self.entries.insert(DraftStyle::BASE, base);
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.pending.clear();
        self.current = DraftStyle::BASE;
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn current(&self) -> DraftStyle {
        self.current
    }

    pub fn text(&self, style: DraftStyle) -> Option<&str> {
        self.entries.get(&style).map(String::as_str)
    }

    /// Text to show: the current style's entry, or the base draft while the
    /// current style is still being generated.
    pub fn current_text(&self) -> Option<&str> {
        self.text(self.current)
            .or_else(|| self.text(DraftStyle::BASE))
    }

    pub fn is_cached(&self, style: DraftStyle) -> bool {
        self.entries.contains_key(&style)
    }

    pub fn is_pending(&self, style: DraftStyle) -> bool {
        self.pending.contains_key(&style)
    }

    pub fn cached_styles(&self) -> Vec<DraftStyle> {
        self.entries.keys().copied().collect()
    }

    pub fn pending_styles(&self) -> Vec<DraftStyle> {
        self.pending.keys().copied().collect()
    }

    pub fn switch_to(&mut self, style: DraftStyle) -> StyleSwitch {
        if !self.is_cached(DraftStyle::BASE) {
            return StyleSwitch::NoBase;
        }
        if style == self.current {
            return StyleSwitch::Unchanged;
        }
        if self.is_cached(style) {
            self.current = style;
            return StyleSwitch::Cached;
        }
        if self.is_pending(style) {
            self.current = style;
            return StyleSwitch::AlreadyPending;
        }
        StyleSwitch::Generate {
            base: self.text(DraftStyle::BASE).unwrap_or_default().to_owned(),
        }
    }

    /// Marks `style` as waiting on `request_id`. A restyle also makes the
    /// style current.
    pub fn begin(&mut self, style: DraftStyle, request_id: RequestId, kind: PendingKind) {
        self.pending.insert(style, PendingDraft { request_id, kind });
        if kind == PendingKind::Restyle {
            self.current = style;
        }
    }

    /// Stores generated text if `request_id` is the one `style` waits on.
    pub fn complete(&mut self, style: DraftStyle, request_id: RequestId, text: String) -> bool {
        if self.take_pending(style, request_id).is_none() {
            return false;
        }
        self.entries.insert(style, text);
        true
    }

    /// Clears the pending marker after a failed request. A failed restyle
    /// leaves the style uncached and falls back to the base style.
    pub fn fail(&mut self, style: DraftStyle, request_id: RequestId) -> Option<PendingKind> {
        let pending = self.take_pending(style, request_id)?;
        if pending.kind == PendingKind::Restyle && self.current == style {
            self.current = DraftStyle::BASE;
        }
        Some(pending.kind)
    }

    fn take_pending(&mut self, style: DraftStyle, request_id: RequestId) -> Option<PendingDraft> {
        match self.pending.get(&style) {
            Some(pending) if pending.request_id == request_id => self.pending.remove(&style),
            _ => None,
        }
    }
}
