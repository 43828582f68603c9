//! types/bits: таблица subsumption: по одной растущей битовой строке на код типа.
//!
//! bit[t] в строке s установлен <=> s subsumes t (для не-массивных типов).
//! Строки растут независимо: set() расширяет строку до нужного слова, get() за
//! пределами строки возвращает false. Ранее установленные биты при росте не теряются.

use super::TypeCode;

#[derive(Clone, Debug, Default)]
pub(crate) struct BitRow {
    words: Vec<u64>,
}

impl BitRow {
    #[inline]
    pub(crate) fn set(&mut self, bit: usize) {
        let word = bit / 64;
        if word >= self.words.len() {
            self.words.resize(word + 1, 0);
        }
        self.words[word] |= 1u64 << (bit % 64);
    }

    #[inline]
    pub(crate) fn get(&self, bit: usize) -> bool {
        match self.words.get(bit / 64) {
            Some(w) => (w & (1u64 << (bit % 64))) != 0,
            None => false,
        }
    }

    pub(crate) fn count_ones(&self) -> usize {
        self.words.iter().map(|w| w.count_ones() as usize).sum()
    }
}

/// Rows indexed by type code; row 0 is the unused "unknown" slot.
#[derive(Clone, Debug)]
pub(crate) struct SubsumptionTable {
    rows: Vec<BitRow>,
}

impl SubsumptionTable {
    pub(crate) fn new() -> Self {
        Self {
            rows: vec![BitRow::default()],
        }
    }

    /// Append an empty row for a freshly allocated type code.
    pub(crate) fn push_row(&mut self) {
        self.rows.push(BitRow::default());
    }

    #[inline]
    pub(crate) fn set(&mut self, sup: TypeCode, sub: TypeCode) {
        if let Some(row) = self.rows.get_mut(sup as usize) {
            row.set(sub as usize);
        }
    }

    #[inline]
    pub(crate) fn get(&self, sup: TypeCode, sub: TypeCode) -> bool {
        self.rows
            .get(sup as usize)
            .map(|r| r.get(sub as usize))
            .unwrap_or(false)
    }

    /// Number of types `sup` subsumes according to its row (reflexive bit included).
    pub(crate) fn row_len(&self, sup: TypeCode) -> usize {
        self.rows
            .get(sup as usize)
            .map(BitRow::count_ones)
            .unwrap_or(0)
    }
}
