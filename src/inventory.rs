//! Remaining-count bookkeeping for placeable elements.
//!
//! The board never consults this; the session checks stock before placing
//! and restocks on removal, keeping counts consistent with the player layer.

use std::collections::HashMap;

use crate::grid::{Color, Element};
use crate::level::InventoryDef;

/// Per-element remaining counts
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Inventory {
    counts: HashMap<Element, u32>,
}

impl Inventory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_def(def: &InventoryDef) -> Self {
        let mut inv = Self::new();
        inv.set(Element::MirrorSlash, def.mirror_slash);
        inv.set(Element::MirrorBackslash, def.mirror_backslash);
        inv.set(Element::Prism, def.prism);
        inv.set(Element::Filter(Color::Red), def.filter_red);
        inv.set(Element::Filter(Color::Green), def.filter_green);
        inv.set(Element::Filter(Color::Blue), def.filter_blue);
        inv
    }

    pub fn set(&mut self, element: Element, count: u32) {
        if count == 0 {
            self.counts.remove(&element);
        } else {
            self.counts.insert(element, count);
        }
    }

    pub fn count(&self, element: Element) -> u32 {
        self.counts.get(&element).copied().unwrap_or(0)
    }

    /// Consume one unit of stock. Returns false when none remain.
    pub fn take(&mut self, element: Element) -> bool {
        match self.counts.get_mut(&element) {
            Some(n) if *n > 0 => {
                *n -= 1;
                if *n == 0 {
                    self.counts.remove(&element);
                }
                true
            }
            _ => false,
        }
    }

    /// Return one unit of stock (after a removal)
    pub fn restock(&mut self, element: Element) {
        *self.counts.entry(element).or_insert(0) += 1;
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }
}
