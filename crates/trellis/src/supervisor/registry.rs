//! Widget registration in serial order.

use crate::widget::WidgetId;

/// A registered widget and its registration serial.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WidgetSlot {
    /// Monotonically increasing; never reused.
    pub serial: u64,
    pub id: WidgetId,
}

/// The supervisor's ordered list of registered widgets.
#[derive(Debug, Default)]
pub(crate) struct Registry {
    slots: Vec<WidgetSlot>,
    next_serial: u64,
}

impl Registry {
    /// Register a widget, returning its serial. Re-adding returns the
    /// existing serial.
    pub(crate) fn add(&mut self, id: WidgetId) -> (u64, bool) {
        if let Some(slot) = self.slots.iter().find(|slot| slot.id == id) {
            return (slot.serial, false);
        }
        let serial = self.next_serial;
        self.next_serial += 1;
        self.slots.push(WidgetSlot { serial, id });
        (serial, true)
    }

    pub(crate) fn remove(&mut self, id: WidgetId) -> bool {
        let before = self.slots.len();
        self.slots.retain(|slot| slot.id != id);
        self.slots.len() != before
    }

    /// Drop slots for which `keep` returns false, returning the dropped ones.
    pub(crate) fn retain(&mut self, mut keep: impl FnMut(WidgetId) -> bool) -> Vec<WidgetSlot> {
        let mut dropped = Vec::new();
        self.slots.retain(|slot| {
            let kept = keep(slot.id);
            if !kept {
                dropped.push(*slot);
            }
            kept
        });
        dropped
    }

    pub(crate) fn snapshot(&self) -> Vec<WidgetSlot> {
        self.slots.clone()
    }

    pub(crate) fn len(&self) -> usize {
        self.slots.len()
    }
}

/// A restartable iterator over a snapshot of the registry, in ascending
/// serial order.
///
/// Widgets registered after the snapshot was taken are not visited, so it is
/// safe to register widgets while iterating.
#[derive(Debug, Clone)]
pub struct WidgetSlots {
    slots: Vec<WidgetSlot>,
    cursor: usize,
}

impl WidgetSlots {
    pub(crate) fn new(slots: Vec<WidgetSlot>) -> Self {
        Self { slots, cursor: 0 }
    }

    /// Start again from the lowest serial.
    pub fn restart(&mut self) {
        self.cursor = 0;
    }

    /// Every slot in the snapshot, regardless of iteration progress.
    pub fn as_slice(&self) -> &[WidgetSlot] {
        &self.slots
    }
}

impl Iterator for WidgetSlots {
    type Item = WidgetSlot;

    fn next(&mut self) -> Option<Self::Item> {
        let slot = self.slots.get(self.cursor).copied()?;
        self.cursor += 1;
        Some(slot)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.slots.len() - self.cursor;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for WidgetSlots {}

#[cfg(test)]
mod tests {
    use slotmap::SlotMap;

    use super::*;

    fn ids(n: usize) -> Vec<WidgetId> {
        let mut map: SlotMap<WidgetId, ()> = SlotMap::with_key();
        (0..n).map(|_| map.insert(())).collect()
    }

    #[test]
    fn test_add_is_idempotent() {
        let ids = ids(2);
        let mut registry = Registry::default();
        assert_eq!(registry.add(ids[0]), (0, true));
        assert_eq!(registry.add(ids[1]), (1, true));
        assert_eq!(registry.add(ids[0]), (0, false));
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn test_serials_are_never_reused() {
        let ids = ids(3);
        let mut registry = Registry::default();
        registry.add(ids[0]);
        registry.add(ids[1]);
        assert!(registry.remove(ids[1]));
        assert!(!registry.remove(ids[1]));
        assert_eq!(registry.add(ids[2]), (2, true));
    }

    #[test]
    fn test_retain_reports_dropped_slots() {
        let ids = ids(3);
        let mut registry = Registry::default();
        for &id in &ids {
            registry.add(id);
        }
        let dropped = registry.retain(|id| id != ids[1]);
        assert_eq!(dropped, vec![WidgetSlot { serial: 1, id: ids[1] }]);
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn test_slots_iterator_restarts() {
        let ids = ids(2);
        let mut registry = Registry::default();
        registry.add(ids[0]);
        registry.add(ids[1]);

        let mut slots = WidgetSlots::new(registry.snapshot());
        assert_eq!(slots.len(), 2);
        assert_eq!(slots.next().map(|s| s.serial), Some(0));
        assert_eq!(slots.len(), 1);
        slots.restart();
        let serials: Vec<u64> = slots.map(|s| s.serial).collect();
        assert_eq!(serials, vec![0, 1]);
    }
}
