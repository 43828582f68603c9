//! index: отсортированные индексы ссылок на объекты и позиционные курсоры.
//!
//! Индекс не владеет объектами: хранит только ссылки (ObjRef) и внешний компаратор.
//! Курсоры разделяют живую последовательность с индексом (Rc), поэтому
//! могут пережить мутации и обнаружить их через эпохи модификаций.

mod compare;
mod epochs;
mod iter;
mod sorted;

pub use compare::{ByKey, HasRef, NaturalOrder, ObjRef, RefComparator, NULL_REF};
pub use epochs::{EpochCell, ModificationEpochs};
pub use iter::PositionalIterator;
pub use sorted::SortedRefIndex;
