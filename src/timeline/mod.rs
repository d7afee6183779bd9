//! Fixed-capacity array of frame slots.
//!
//! Each slot holds drawables in insertion order, which is also paint order. Slots only
//! grow; there is no removal.

pub mod config;

use crate::drawable::{Circle, Drawable, Formula, Text, WrappedText};
use crate::foundation::error::{FrameloomError, FrameloomResult};

pub use config::{AnimationConfig, MAX_FRAMES};

/// One slot entry: a drawable, or a group painted in order as if placed one by one.
#[derive(Clone, Debug, PartialEq)]
pub enum SlotEntry {
    /// A single drawable.
    Single(Drawable),
    /// An ordered group, flattened at compile time.
    Sequence(Vec<Drawable>),
}

impl SlotEntry {
    /// The drawables this entry paints, in order.
    pub fn drawables(&self) -> &[Drawable] {
        match self {
            Self::Single(d) => std::slice::from_ref(d),
            Self::Sequence(ds) => ds,
        }
    }
}

impl From<Drawable> for SlotEntry {
    fn from(d: Drawable) -> Self {
        Self::Single(d)
    }
}

impl From<Vec<Drawable>> for SlotEntry {
    fn from(ds: Vec<Drawable>) -> Self {
        Self::Sequence(ds)
    }
}

impl From<Circle> for SlotEntry {
    fn from(d: Circle) -> Self {
        Self::Single(d.into())
    }
}

impl From<Text> for SlotEntry {
    fn from(d: Text) -> Self {
        Self::Single(d.into())
    }
}

impl From<WrappedText> for SlotEntry {
    fn from(d: WrappedText) -> Self {
        Self::Single(d.into())
    }
}

impl From<Formula> for SlotEntry {
    fn from(d: Formula) -> Self {
        Self::Single(d.into())
    }
}

/// Ordered contents of one frame.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Slot {
    entries: Vec<SlotEntry>,
}

impl Slot {
    /// Entries in insertion order.
    pub fn entries(&self) -> &[SlotEntry] {
        &self.entries
    }

    /// Number of entries (a sequence counts once).
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing has been placed here.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Every drawable in paint order, with sequences flattened.
    pub fn drawables(&self) -> impl Iterator<Item = &Drawable> {
        self.entries.iter().flat_map(SlotEntry::drawables)
    }
}

/// Frame slots for one animation.
#[derive(Clone, Debug)]
pub struct Timeline {
    config: AnimationConfig,
    slots: Vec<Slot>,
}

impl Timeline {
    /// Allocate `config.total_frames()` empty slots.
    pub fn new(config: AnimationConfig) -> FrameloomResult<Self> {
        config.validate()?;
        let slots = vec![Slot::default(); config.total_frames()];
        Ok(Self { config, slots })
    }

    /// The configuration the timeline was built from.
    pub fn config(&self) -> &AnimationConfig {
        &self.config
    }

    /// Number of slots.
    pub fn total_frames(&self) -> usize {
        self.slots.len()
    }

    /// Slot `index`, if it exists.
    pub fn slot(&self, index: usize) -> Option<&Slot> {
        self.slots.get(index)
    }

    /// All slots in frame order.
    pub fn slots(&self) -> &[Slot] {
        &self.slots
    }

    /// Append to slot `index`, painting on top of what is already there.
    pub fn place(&mut self, index: usize, entry: impl Into<SlotEntry>) -> FrameloomResult<()> {
        let total = self.slots.len();
        let slot = self
            .slots
            .get_mut(index)
            .ok_or_else(|| FrameloomError::out_of_range(index, total))?;
        slot.entries.push(entry.into());
        Ok(())
    }

    /// Place the `k`-th item at `start + k`.
    ///
    /// Stops at the first index past the end. Items placed before the failure stay.
    pub fn place_sequence<I>(&mut self, start: usize, entries: I) -> FrameloomResult<()>
    where
        I: IntoIterator,
        I::Item: Into<SlotEntry>,
    {
        let total = self.slots.len();
        for (offset, entry) in entries.into_iter().enumerate() {
            let index = start
                .checked_add(offset)
                .ok_or_else(|| FrameloomError::out_of_range(usize::MAX, total))?;
            self.place(index, entry)?;
        }
        Ok(())
    }

    /// Every placed drawable across all slots, in frame then paint order.
    pub fn drawables(&self) -> impl Iterator<Item = &Drawable> {
        self.slots.iter().flat_map(Slot::drawables)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/timeline/mod.rs"]
mod tests;
