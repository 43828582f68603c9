#![allow(non_snake_case)]

// Базовые модули
pub mod consts;
pub mod config;
pub mod error;
pub mod metrics;

// Реестр типов: src/types/{mod,core,declare,subsume,array,names,bits,dump}.rs
pub mod types;

// Отсортированные индексы ссылок: src/index/{mod,compare,epochs,sorted,iter}.rs
pub mod index;

// CLI (бинарь typestore)
pub mod cli;

// Удобные реэкспорты
pub use config::{StoreBuilder, StoreConfig};
pub use error::{IndexError, TypeSystemError};
pub use index::{
    ByKey, EpochCell, HasRef, ModificationEpochs, NaturalOrder, ObjRef, PositionalIterator,
    RefComparator, SortedRefIndex, NULL_REF,
};
pub use types::{FeatureCode, FeatureDef, TypeClass, TypeCode, TypeDef, TypeSystem, TypeSystemStats};
