//! index/epochs: счётчики модификаций по коду типа.
//!
//! Таблицей владеет внешний репозиторий индексов; индексы и курсоры получают
//! EpochCell (хэндл на одну ячейку) и умеют только читать и увеличивать счётчик.
//! Структурное изменение любого индекса типа видно всем курсорам этого типа.
//!
//! Модель однопоточная: Rc<RefCell<..>>, хэндлы намеренно !Send. Таблица растёт лениво:
//! чтение ячейки за пределами таблицы даёт 0, bump() расширяет её.

use std::cell::RefCell;
use std::rc::Rc;

use crate::types::TypeCode;

/// Shared type code -> modification counter table.
#[derive(Clone, Debug, Default)]
pub struct ModificationEpochs {
    cells: Rc<RefCell<Vec<u64>>>,
}

impl ModificationEpochs {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-size for `types` type codes (code 0 included).
    pub fn with_types(types: usize) -> Self {
        Self {
            cells: Rc::new(RefCell::new(vec![0; types + 1])),
        }
    }

    pub fn current(&self, type_code: TypeCode) -> u64 {
        self.cells
            .borrow()
            .get(type_code as usize)
            .copied()
            .unwrap_or(0)
    }

    pub fn bump(&self, type_code: TypeCode) {
        let mut cells = self.cells.borrow_mut();
        let i = type_code as usize;
        if i >= cells.len() {
            cells.resize(i + 1, 0);
        }
        cells[i] = cells[i].wrapping_add(1);
    }

    /// Handle on one type's counter.
    pub fn cell(&self, type_code: TypeCode) -> EpochCell {
        EpochCell {
            table: self.clone(),
            type_code,
        }
    }

    pub fn len(&self) -> usize {
        self.cells.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Read/bump access to a single type's counter.
#[derive(Clone, Debug)]
pub struct EpochCell {
    table: ModificationEpochs,
    type_code: TypeCode,
}

impl EpochCell {
    #[inline]
    pub fn current(&self) -> u64 {
        self.table.current(self.type_code)
    }

    #[inline]
    pub fn bump(&self) {
        self.table.bump(self.type_code)
    }

    #[inline]
    pub fn type_code(&self) -> TypeCode {
        self.type_code
    }
}
