//! Типизированные ошибки ядра.
//!
//! - `TypeSystemError`: ошибки объявлений (add_type/add_feature/...). Состояние реестра
//!   при ошибке не меняется.
//! - `IndexError`: неправильное использование курсора (get() на невалидной позиции).
//!
//! Промахи поиска (неизвестное имя/код) ошибками не являются: возвращаются
//! UNKNOWN_*_CODE / None.

use crate::types::TypeCode;

/// Errors raised by declarations on a `TypeSystem`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TypeSystemError {
    /// Declarations after `commit()`.
    #[error("type system is committed; no further declarations are allowed")]
    TypeSystemLocked,

    #[error("type {type_name} is inheritance-final and cannot be subtyped")]
    InheritanceFinal { type_name: String },

    #[error("type {type_name} is feature-final; no features can be added")]
    FeatureFinal { type_name: String },

    /// Same short name already reachable from the domain with a different range.
    #[error(
        "feature {short_name} on {domain} with range {range} conflicts with \
         existing declaration on {old_domain} with range {old_range}"
    )]
    DuplicateFeature {
        short_name: String,
        domain: String,
        range: String,
        old_domain: String,
        old_range: String,
    },

    #[error("bad type name syntax: {0:?}")]
    BadTypeSyntax(String),

    #[error("bad feature name syntax: {0:?}")]
    BadFeatureSyntax(String),

    /// A declaration referenced a code that is not a type of this registry.
    #[error("unknown type code {code}")]
    UnknownType { code: TypeCode },

    #[error("built-in type {0} is not declared in this type system")]
    MissingBuiltin(&'static str),
}

/// Errors raised by index cursors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IndexError {
    #[error("no element at position {position} (index size {size})")]
    NoSuchElement { position: isize, size: usize },
}
