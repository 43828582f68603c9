//! types: реестр типов и фич (type system).
//!
//! Раскладка:
//! - core.rs   : структура TypeSystem, bootstrap встроенных типов, lookup по имени/коду
//! - declare.rs: объявления: add_top_type / add_type / add_feature / add_string_subtype / commit
//! - subsume.rs: subsumption (битовые строки + структурное правило для массивов), иерархия,
//!                appropriate features, классификация типов
//! - array.rs  : ленивый синтез array-типов (memoized по коду компонента)
//! - dump.rs   : диагностический Display + сводная статистика
//! - bits.rs   : растущие битовые строки
//! - names.rs  : синтаксис имён, встроенные имена массивов, symbol table
//!
//! Жизненный цикл: объявления до commit(); после commit() реестр только читается,
//! кроме array_type(), который остаётся доступным (требует &mut).

pub(crate) mod bits;
pub mod names;

mod array;
mod core;
mod declare;
mod dump;
mod subsume;

pub use self::core::TypeSystem;
pub use self::dump::TypeSystemStats;

/// Type handle. `UNKNOWN_TYPE_CODE` (0) marks a miss.
pub type TypeCode = u32;
/// Feature handle. `UNKNOWN_FEATURE_CODE` (0) marks a miss.
pub type FeatureCode = u32;

/// A registered type.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TypeDef {
    pub name: String,
    pub code: TypeCode,
    /// 0 only for the top type.
    pub parent: TypeCode,
    pub inheritance_final: bool,
    pub feature_final: bool,
    /// Set for array types.
    pub component: Option<TypeCode>,
    /// Set for string subtypes: slot in the string-set table.
    pub string_set: Option<usize>,
}

impl TypeDef {
    pub(crate) fn new(name: &str, code: TypeCode, parent: TypeCode) -> Self {
        Self {
            name: name.to_string(),
            code,
            parent,
            inheritance_final: false,
            feature_final: false,
            component: None,
            string_set: None,
        }
    }

    #[inline]
    pub fn is_array(&self) -> bool {
        self.component.is_some()
    }

    #[inline]
    pub fn is_string_subtype(&self) -> bool {
        self.string_set.is_some()
    }

    /// Last dotted segment of the name.
    pub fn short_name(&self) -> &str {
        match self.name.rfind(crate::consts::NAMESPACE_SEPARATOR) {
            Some(pos) => &self.name[pos + 1..],
            None => &self.name,
        }
    }
}

/// A registered feature. `name` is the full name on the introducing type.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FeatureDef {
    pub code: FeatureCode,
    pub short_name: String,
    pub name: String,
    pub domain: TypeCode,
    pub range: TypeCode,
    pub multiple_refs_allowed: bool,
}

/// Storage class of a type, derived from the built-in scaffolding.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TypeClass {
    Boolean,
    Byte,
    Short,
    Int,
    Float,
    Long,
    Double,
    /// core.String and all of its subtypes.
    String,
    BooleanArray,
    ByteArray,
    ShortArray,
    IntArray,
    FloatArray,
    LongArray,
    DoubleArray,
    StringArray,
    /// Any non-primitive array.
    FsArray,
    /// Ordinary object type.
    Fs,
}

impl TypeClass {
    /// Values of this class are stored inline rather than as object references.
    pub fn is_primitive(self) -> bool {
        matches!(
            self,
            TypeClass::Boolean
                | TypeClass::Byte
                | TypeClass::Short
                | TypeClass::Int
                | TypeClass::Float
                | TypeClass::Long
                | TypeClass::Double
                | TypeClass::String
        )
    }
}
