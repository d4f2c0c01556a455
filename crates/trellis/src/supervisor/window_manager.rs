//! Focus history of top-level windows.
//!
//! Managed windows form a most-recently-focused list: the head is the focused
//! window and the top of the draw order, the tail is drawn first. The list is
//! an index arena so raising a window is a constant-time relink, and it never
//! shrinks: closing a window only hides it.

use std::collections::HashMap;

use crate::widget::WidgetId;

#[derive(Debug, Clone, Copy)]
struct FocusNode {
    window: WidgetId,
    prev: Option<usize>,
    next: Option<usize>,
}

/// Doubly linked focus list with cached top and bottom.
#[derive(Debug, Default)]
pub(crate) struct FocusList {
    nodes: Vec<FocusNode>,
    index: HashMap<WidgetId, usize>,
    top: Option<usize>,
    bottom: Option<usize>,
}

impl FocusList {
    pub(crate) fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub(crate) fn contains(&self, window: WidgetId) -> bool {
        self.index.contains_key(&window)
    }

    /// The focused window.
    pub(crate) fn head(&self) -> Option<WidgetId> {
        self.top.map(|i| self.nodes[i].window)
    }

    /// Add a window at the head, returning the previous head.
    ///
    /// Does nothing if the window is already in the list.
    pub(crate) fn insert(&mut self, window: WidgetId) -> Option<WidgetId> {
        if self.contains(window) {
            return None;
        }
        let old_head = self.head();
        let i = self.nodes.len();
        self.nodes.push(FocusNode {
            window,
            prev: None,
            next: None,
        });
        self.index.insert(window, i);
        self.link_front(i);
        old_head
    }

    /// Move a window to the head, returning the previous head.
    ///
    /// Returns `None` if the window is unknown or already the head.
    pub(crate) fn raise(&mut self, window: WidgetId) -> Option<WidgetId> {
        let &i = self.index.get(&window)?;
        if self.top == Some(i) {
            return None;
        }
        let old_head = self.head();
        self.unlink(i);
        self.link_front(i);
        old_head
    }

    /// Windows from the focused one down to the least recently focused.
    pub(crate) fn top_to_bottom(&self) -> Vec<WidgetId> {
        let mut out = Vec::with_capacity(self.nodes.len());
        let mut cursor = self.top;
        while let Some(i) = cursor {
            out.push(self.nodes[i].window);
            cursor = self.nodes[i].next;
        }
        out
    }

    /// Windows in draw order.
    pub(crate) fn bottom_to_top(&self) -> Vec<WidgetId> {
        let mut out = Vec::with_capacity(self.nodes.len());
        let mut cursor = self.bottom;
        while let Some(i) = cursor {
            out.push(self.nodes[i].window);
            cursor = self.nodes[i].prev;
        }
        out
    }

    fn unlink(&mut self, i: usize) {
        let FocusNode { prev, next, .. } = self.nodes[i];
        match prev {
            Some(p) => self.nodes[p].next = next,
            None => self.top = next,
        }
        match next {
            Some(n) => self.nodes[n].prev = prev,
            None => self.bottom = prev,
        }
    }

    fn link_front(&mut self, i: usize) {
        self.nodes[i].prev = None;
        self.nodes[i].next = self.top;
        match self.top {
            Some(t) => self.nodes[t].prev = Some(i),
            None => self.bottom = Some(i),
        }
        self.top = Some(i);
    }
}

#[cfg(test)]
mod tests {
    use slotmap::SlotMap;

    use super::*;

    fn windows(n: usize) -> Vec<WidgetId> {
        let mut map: SlotMap<WidgetId, ()> = SlotMap::with_key();
        (0..n).map(|_| map.insert(())).collect()
    }

    #[test]
    fn test_insert_goes_to_head() {
        let w = windows(3);
        let mut list = FocusList::default();
        assert_eq!(list.insert(w[0]), None);
        assert_eq!(list.insert(w[1]), Some(w[0]));
        assert_eq!(list.insert(w[2]), Some(w[1]));

        assert_eq!(list.head(), Some(w[2]));
        assert_eq!(list.top_to_bottom(), vec![w[2], w[1], w[0]]);
        assert_eq!(list.bottom_to_top(), vec![w[0], w[1], w[2]]);
    }

    #[test]
    fn test_insert_twice_is_noop() {
        let w = windows(2);
        let mut list = FocusList::default();
        list.insert(w[0]);
        list.insert(w[1]);
        assert_eq!(list.insert(w[0]), None);
        assert_eq!(list.top_to_bottom().len(), 2);
        assert_eq!(list.head(), Some(w[1]));
    }

    #[test]
    fn test_raise_bottom_updates_bottom() {
        let w = windows(3);
        let mut list = FocusList::default();
        for &id in &w {
            list.insert(id);
        }
        assert_eq!(list.raise(w[0]), Some(w[2]));
        assert_eq!(list.top_to_bottom(), vec![w[0], w[2], w[1]]);
        assert_eq!(list.bottom_to_top(), vec![w[1], w[2], w[0]]);
    }

    #[test]
    fn test_raise_middle_and_head() {
        let w = windows(3);
        let mut list = FocusList::default();
        for &id in &w {
            list.insert(id);
        }
        assert_eq!(list.raise(w[1]), Some(w[2]));
        assert_eq!(list.top_to_bottom(), vec![w[1], w[2], w[0]]);

        assert_eq!(list.raise(w[1]), None);
        assert_eq!(list.top_to_bottom(), vec![w[1], w[2], w[0]]);
    }

    #[test]
    fn test_raise_unknown_window() {
        let w = windows(2);
        let mut list = FocusList::default();
        list.insert(w[0]);
        assert_eq!(list.raise(w[1]), None);
        assert_eq!(list.top_to_bottom().len(), 1);
    }

    #[test]
    fn test_single_window_list() {
        let w = windows(1);
        let mut list = FocusList::default();
        assert!(list.is_empty());
        list.insert(w[0]);
        assert_eq!(list.raise(w[0]), None);
        assert_eq!(list.top_to_bottom(), vec![w[0]]);
        assert_eq!(list.bottom_to_top(), vec![w[0]]);
    }
}
