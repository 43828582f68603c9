//! index/sorted: отсортированный индекс ссылок одного типа.
//!
//! Последовательность ссылок по возрастанию ключа компаратора. Дубликаты ключей
//! допустимы; среди равных ключей сохраняется порядок вставки.
//!
//! - insert(): быстрый путь: append, если ref >= последнего; иначе бинарный поиск,
//!   при совпадении ключа: вставка за серией равных ключей (шаги по серии: в метрику).
//!   Всегда bump эпохи.
//! - find()/contains(): бинарный поиск по ключу; позиция: *какой-то* элемент с равным ключом.
//! - remove(): удаляет только точно ту же ссылку. От найденной позиции скан вниз, затем вверх,
//!   пока ключ равен. Bump эпохи только при реальном удалении.
//!   Скан не ограничен: длинные серии равных ключей: патологический случай (метрика + warn).
//! - flush(): очистка; если ёмкость выросла выше начальной: перевыделение под начальную.

use std::cell::RefCell;
use std::cmp::Ordering;
use std::fmt;
use std::rc::Rc;

use log::{debug, warn};

use super::compare::{HasRef, ObjRef, RefComparator, NULL_REF};
use super::epochs::{EpochCell, ModificationEpochs};
use super::iter::PositionalIterator;
use crate::config::StoreConfig;
use crate::metrics;
use crate::types::TypeCode;

pub(crate) type SharedRefs = Rc<RefCell<Vec<ObjRef>>>;
pub(crate) type SharedCmp = Rc<dyn RefComparator>;

/// Binary search by key: Ok(some key-equal position) or Err(insertion point).
#[inline]
pub(crate) fn search(refs: &[ObjRef], cmp: &dyn RefComparator, r: ObjRef) -> Result<usize, usize> {
    refs.binary_search_by(|&x| cmp.compare(x, r))
}

/// First position whose key is not less than `r`'s.
#[inline]
pub(crate) fn lower_bound(refs: &[ObjRef], cmp: &dyn RefComparator, r: ObjRef) -> usize {
    refs.partition_point(|&x| cmp.compare(x, r) == Ordering::Less)
}

/// Sorted view of the references of one type under one comparator.
pub struct SortedRefIndex {
    type_code: TypeCode,
    refs: SharedRefs,
    cmp: SharedCmp,
    epoch: EpochCell,
    initial_capacity: usize,
    remove_scan_warn: usize,
}

impl SortedRefIndex {
    /// Index with defaults from `StoreConfig::default()`.
    pub fn new<C>(type_code: TypeCode, cmp: C, epochs: &ModificationEpochs) -> Self
    where
        C: RefComparator + 'static,
    {
        Self::with_config(type_code, cmp, epochs, &StoreConfig::default())
    }

    pub fn with_config<C>(
        type_code: TypeCode,
        cmp: C,
        epochs: &ModificationEpochs,
        cfg: &StoreConfig,
    ) -> Self
    where
        C: RefComparator + 'static,
    {
        Self {
            type_code,
            refs: Rc::new(RefCell::new(Vec::with_capacity(cfg.index_initial_capacity))),
            cmp: Rc::new(cmp),
            epoch: epochs.cell(type_code),
            initial_capacity: cfg.index_initial_capacity,
            remove_scan_warn: cfg.remove_scan_warn,
        }
    }

    #[inline]
    pub fn type_code(&self) -> TypeCode {
        self.type_code
    }

    #[inline]
    pub fn size(&self) -> usize {
        self.refs.borrow().len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.size() == 0
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.refs.borrow().capacity()
    }

    #[inline]
    pub fn initial_capacity(&self) -> usize {
        self.initial_capacity
    }

    /// Reference stored at `pos`.
    pub fn get(&self, pos: usize) -> Option<ObjRef> {
        self.refs.borrow().get(pos).copied()
    }

    /// Copy of the current sequence, in index order.
    pub fn to_vec(&self) -> Vec<ObjRef> {
        self.refs.borrow().clone()
    }

    /// Current epoch of this index's type.
    pub fn epoch(&self) -> u64 {
        self.epoch.current()
    }

    // -------------------- mutation --------------------

    /// Insert `r` after every element whose key is <= its key. Always succeeds.
    pub fn insert(&mut self, r: ObjRef) {
        debug_assert!(r != NULL_REF, "null reference inserted into index");
        {
            let mut refs = self.refs.borrow_mut();
            let mut steps = 0u64;
            let append = match refs.last() {
                None => true,
                Some(&last) => self.cmp.compare(r, last) != Ordering::Less,
            };
            if append {
                refs.push(r);
            } else {
                let pos = match search(&refs, self.cmp.as_ref(), r) {
                    Ok(mut p) => {
                        // За серию равных ключей: новые дубликаты идут после старых.
                        p += 1;
                        while p < refs.len() && self.cmp.compare(refs[p], r) == Ordering::Equal {
                            p += 1;
                            steps += 1;
                        }
                        p
                    }
                    Err(p) => p,
                };
                refs.insert(pos, r);
            }
            metrics::record_index_insert(append, steps);
        }
        self.epoch.bump();
    }

    /// Remove exactly `r` (not merely a key-equal element). Returns true if removed.
    pub fn remove(&mut self, r: ObjRef) -> bool {
        let (found, steps) = {
            let refs = self.refs.borrow();
            let pos = match search(&refs, self.cmp.as_ref(), r) {
                Ok(p) => p,
                Err(_) => {
                    metrics::record_index_remove(false, 0);
                    return false;
                }
            };
            if refs[pos] == r {
                (Some(pos), 0)
            } else {
                self.scan_key_run(&refs, pos, r)
            }
        };

        if self.remove_scan_warn > 0 && steps > self.remove_scan_warn as u64 {
            warn!(
                "index type={} remove({}) scanned {} key-duplicates (size={})",
                self.type_code,
                r,
                steps,
                self.size()
            );
        }

        match found {
            Some(p) => {
                self.refs.borrow_mut().remove(p);
                metrics::record_index_remove(true, steps);
                self.epoch.bump();
                true
            }
            None => {
                metrics::record_index_remove(false, steps);
                false
            }
        }
    }

    /// Look for `r` among the key-equal neighbours of `pos`: down first, then up.
    fn scan_key_run(&self, refs: &[ObjRef], pos: usize, r: ObjRef) -> (Option<usize>, u64) {
        let mut steps = 0u64;
        for p in (0..pos).rev() {
            steps += 1;
            if self.cmp.compare(refs[p], r) != Ordering::Equal {
                break;
            }
            if refs[p] == r {
                return (Some(p), steps);
            }
        }
        for (p, &x) in refs.iter().enumerate().skip(pos + 1) {
            steps += 1;
            if self.cmp.compare(x, r) != Ordering::Equal {
                break;
            }
            if x == r {
                return (Some(p), steps);
            }
        }
        (None, steps)
    }

    /// Drop all elements; storage goes back to the initial capacity if it grew.
    pub fn flush(&mut self) {
        let was_empty = {
            let mut refs = self.refs.borrow_mut();
            let was_empty = refs.is_empty();
            if refs.capacity() > self.initial_capacity {
                *refs = Vec::with_capacity(self.initial_capacity);
            } else {
                refs.clear();
            }
            was_empty
        };
        if !was_empty {
            self.epoch.bump();
        }
        metrics::record_index_flush();
        debug!("index type={} flushed", self.type_code);
    }

    // -------------------- lookup --------------------

    /// Position of some element with `r`'s key.
    pub fn find(&self, r: ObjRef) -> Option<usize> {
        search(&self.refs.borrow(), self.cmp.as_ref(), r).ok()
    }

    #[inline]
    pub fn contains(&self, r: ObjRef) -> bool {
        self.find(r).is_some()
    }

    pub fn contains_obj<H: HasRef + ?Sized>(&self, obj: &H) -> bool {
        self.contains(obj.obj_ref())
    }

    /// The stored reference with `obj`'s key (possibly a different reference).
    pub fn find_obj<H: HasRef + ?Sized>(&self, obj: &H) -> Option<ObjRef> {
        let pos = self.find(obj.obj_ref())?;
        self.get(pos)
    }

    pub fn delete_obj<H: HasRef + ?Sized>(&mut self, obj: &H) -> bool {
        self.remove(obj.obj_ref())
    }

    // -------------------- cursors --------------------

    /// Cursor at the first element.
    pub fn cursor(&self) -> PositionalIterator {
        PositionalIterator::new(self.refs.clone(), self.cmp.clone(), self.epoch.clone())
    }

    /// Cursor moved to `r` (see `PositionalIterator::move_to`).
    pub fn cursor_at(&self, r: ObjRef) -> PositionalIterator {
        let mut it = self.cursor();
        it.move_to(r);
        it
    }
}

impl fmt::Debug for SortedRefIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SortedRefIndex")
            .field("type_code", &self.type_code)
            .field("size", &self.size())
            .field("capacity", &self.capacity())
            .field("initial_capacity", &self.initial_capacity)
            .field("epoch", &self.epoch.current())
            .finish()
    }
}
