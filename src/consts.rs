//! Общие константы: коды-сентинелы, разделители имён, имена встроенных типов.

use crate::types::{FeatureCode, TypeCode};

// -------- Codes --------
pub const UNKNOWN_TYPE_CODE: TypeCode = 0;
pub const UNKNOWN_FEATURE_CODE: FeatureCode = 0;

// Первый выдаваемый код (0 зарезервирован под "unknown").
pub const LEAST_TYPE_CODE: TypeCode = 1;
pub const LEAST_FEATURE_CODE: FeatureCode = 1;

// -------- Names --------
// Full feature name = <TypeName>:<short>
pub const FEATURE_SEPARATOR: char = ':';
pub const NAMESPACE_SEPARATOR: char = '.';
pub const ARRAY_TYPE_SUFFIX: &str = "[]";

// -------- Built-in types --------
pub const TYPE_NAME_TOP: &str = "core.TOP";

pub const TYPE_NAME_INTEGER: &str = "core.Integer";
pub const TYPE_NAME_FLOAT: &str = "core.Float";
pub const TYPE_NAME_STRING: &str = "core.String";
pub const TYPE_NAME_BOOLEAN: &str = "core.Boolean";
pub const TYPE_NAME_BYTE: &str = "core.Byte";
pub const TYPE_NAME_SHORT: &str = "core.Short";
pub const TYPE_NAME_LONG: &str = "core.Long";
pub const TYPE_NAME_DOUBLE: &str = "core.Double";

pub const TYPE_NAME_ARRAY_BASE: &str = "core.ArrayBase";
// Array of TOP: the generic object array.
pub const TYPE_NAME_FS_ARRAY: &str = "core.FSArray";

pub const TYPE_NAME_INTEGER_ARRAY: &str = "core.IntegerArray";
pub const TYPE_NAME_FLOAT_ARRAY: &str = "core.FloatArray";
pub const TYPE_NAME_STRING_ARRAY: &str = "core.StringArray";
pub const TYPE_NAME_BOOLEAN_ARRAY: &str = "core.BooleanArray";
pub const TYPE_NAME_BYTE_ARRAY: &str = "core.ByteArray";
pub const TYPE_NAME_SHORT_ARRAY: &str = "core.ShortArray";
pub const TYPE_NAME_LONG_ARRAY: &str = "core.LongArray";
pub const TYPE_NAME_DOUBLE_ARRAY: &str = "core.DoubleArray";

/// Primitive component names in bootstrap order.
pub const PRIMITIVE_TYPE_NAMES: [&str; 8] = [
    TYPE_NAME_INTEGER,
    TYPE_NAME_FLOAT,
    TYPE_NAME_STRING,
    TYPE_NAME_BOOLEAN,
    TYPE_NAME_BYTE,
    TYPE_NAME_SHORT,
    TYPE_NAME_LONG,
    TYPE_NAME_DOUBLE,
];

/// (component, array) pairs with fixed array names. Everything else is `<Component>[]`.
pub const BUILTIN_ARRAY_NAMES: [(&str, &str); 9] = [
    (TYPE_NAME_TOP, TYPE_NAME_FS_ARRAY),
    (TYPE_NAME_INTEGER, TYPE_NAME_INTEGER_ARRAY),
    (TYPE_NAME_FLOAT, TYPE_NAME_FLOAT_ARRAY),
    (TYPE_NAME_STRING, TYPE_NAME_STRING_ARRAY),
    (TYPE_NAME_BOOLEAN, TYPE_NAME_BOOLEAN_ARRAY),
    (TYPE_NAME_BYTE, TYPE_NAME_BYTE_ARRAY),
    (TYPE_NAME_SHORT, TYPE_NAME_SHORT_ARRAY),
    (TYPE_NAME_LONG, TYPE_NAME_LONG_ARRAY),
    (TYPE_NAME_DOUBLE, TYPE_NAME_DOUBLE_ARRAY),
];

// -------- Index defaults --------
pub const DEFAULT_INDEX_INITIAL_CAPACITY: usize = 16;
// Порог длины двустороннего скана в remove(), после которого пишем warn.
pub const DEFAULT_REMOVE_SCAN_WARN: usize = 64;
