use crate::error::SimError;
use crate::segment::Segment;

/// A round's worth of segments: a fixed number of slots, each either holding a
/// segment or empty.
///
/// An empty slot means the segment was never sent or was dropped in transit;
/// consumers treat both the same way. Positions matter: the receiver answers
/// slot `i` of the data batch in slot `i` of the ACK batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Batch {
    slots: Vec<Option<Segment>>,
    /// Next slot `push` will fill.
    cursor: usize,
}

impl Batch {
    pub fn new(capacity: usize) -> Self {
        Self {
            slots: vec![None; capacity],
            cursor: 0,
        }
    }

    /// Build a batch from explicit slots, e.g. to replay a recorded round.
    pub fn from_slots(slots: Vec<Option<Segment>>) -> Self {
        let cursor = slots
            .iter()
            .rposition(Option::is_some)
            .map_or(0, |last| last + 1);
        Self { slots, cursor }
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Empty every slot.
    pub fn clear(&mut self) {
        self.slots.iter_mut().for_each(|slot| *slot = None);
        self.cursor = 0;
    }

    /// Append a segment after the last filled slot.
    pub fn push(&mut self, segment: Segment) -> Result<usize, SimError> {
        let idx = self.cursor;
        let capacity = self.slots.len();
        let slot = self
            .slots
            .get_mut(idx)
            .ok_or(SimError::BatchFull { capacity })?;
        *slot = Some(segment);
        self.cursor += 1;
        Ok(idx)
    }

    /// Place a segment at a fixed position.
    pub fn set(&mut self, idx: usize, segment: Segment) -> Result<(), SimError> {
        let capacity = self.slots.len();
        let slot = self
            .slots
            .get_mut(idx)
            .ok_or(SimError::BatchFull { capacity })?;
        *slot = Some(segment);
        self.cursor = self.cursor.max(idx + 1);
        Ok(())
    }

    pub fn get(&self, idx: usize) -> Option<&Segment> {
        self.slots.get(idx).and_then(Option::as_ref)
    }

    /// Empty a slot, returning what it held.
    pub fn take(&mut self, idx: usize) -> Option<Segment> {
        self.slots.get_mut(idx).and_then(Option::take)
    }

    pub fn slots(&self) -> &[Option<Segment>] {
        &self.slots
    }

    /// Occupied slots with their positions, in slot order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, &Segment)> {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(idx, slot)| slot.as_ref().map(|seg| (idx, seg)))
    }

    /// Number of occupied slots.
    pub fn count(&self) -> usize {
        self.slots.iter().filter(|slot| slot.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.iter().all(Option::is_none)
    }
}
