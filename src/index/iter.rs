//! index/iter: позиционный курсор по SortedRefIndex.
//!
//! Курсор валиден, пока 0 <= pos < size; move_to_next/previous могут выйти за края,
//! проверка is_valid(): на вызывающей стороне (get() на невалидной позиции -> NoSuchElement).
//!
//! Детект конкурентной модификации: только advisory: при создании курсор запоминает эпоху
//! своего типа; is_concurrent_modification() сравнивает её с текущей. Ничего не
//! инвалидируется автоматически.

use std::cmp::Ordering;
use std::fmt;

use super::compare::ObjRef;
use super::epochs::EpochCell;
use super::sorted::{lower_bound, SharedCmp, SharedRefs};
use crate::error::IndexError;

/// Cursor over the live sequence of an index (not a copy of its data).
#[derive(Clone)]
pub struct PositionalIterator {
    refs: SharedRefs,
    cmp: SharedCmp,
    epoch: EpochCell,
    snapshot: u64,
    pos: isize,
}

impl PositionalIterator {
    pub(crate) fn new(refs: SharedRefs, cmp: SharedCmp, epoch: EpochCell) -> Self {
        let snapshot = epoch.current();
        Self {
            refs,
            cmp,
            epoch,
            snapshot,
            pos: 0,
        }
    }

    #[inline]
    pub fn position(&self) -> isize {
        self.pos
    }

    #[inline]
    pub fn index_size(&self) -> usize {
        self.refs.borrow().len()
    }

    #[inline]
    pub fn is_valid(&self) -> bool {
        self.pos >= 0 && (self.pos as usize) < self.index_size()
    }

    pub fn move_to_first(&mut self) {
        self.pos = 0;
    }

    /// -1 on an empty index.
    pub fn move_to_last(&mut self) {
        self.pos = self.index_size() as isize - 1;
    }

    pub fn move_to_next(&mut self) {
        self.pos += 1;
    }

    pub fn move_to_previous(&mut self) {
        self.pos -= 1;
    }

    /// Lowest position with `r`'s key, or the ascending insertion point for it.
    pub fn move_to(&mut self, r: ObjRef) {
        let refs = self.refs.borrow();
        self.pos = lower_bound(&refs, self.cmp.as_ref(), r) as isize;
    }

    /// Element under the cursor.
    pub fn get(&self) -> Result<ObjRef, IndexError> {
        let refs = self.refs.borrow();
        if self.pos >= 0 {
            if let Some(&r) = refs.get(self.pos as usize) {
                return Ok(r);
            }
        }
        Err(IndexError::NoSuchElement {
            position: self.pos,
            size: refs.len(),
        })
    }

    /// Independent cursor at the same position over the same sequence.
    pub fn copy(&self) -> Self {
        self.clone()
    }

    /// Compare the elements under two cursors with this cursor's comparator.
    pub fn compare_to(&self, other: &PositionalIterator) -> Result<Ordering, IndexError> {
        let a = self.get()?;
        let b = other.get()?;
        Ok(self.cmp.compare(a, b))
    }

    // -------------------- concurrent modification --------------------

    pub fn is_concurrent_modification(&self) -> bool {
        self.snapshot != self.epoch.current()
    }

    /// Accept the current state; the position is left as is.
    pub fn reset_concurrent_modification(&mut self) {
        self.snapshot = self.epoch.current();
    }
}

/// Yields elements from the current position forward, advancing the cursor.
impl Iterator for PositionalIterator {
    type Item = ObjRef;

    fn next(&mut self) -> Option<ObjRef> {
        let r = self.get().ok()?;
        self.move_to_next();
        Some(r)
    }
}

impl fmt::Debug for PositionalIterator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PositionalIterator")
            .field("type_code", &self.epoch.type_code())
            .field("pos", &self.pos)
            .field("size", &self.index_size())
            .field("snapshot", &self.snapshot)
            .finish()
    }
}
