//! types/names: синтаксис имён, таблицы встроенных имён массивов, symbol table.
//!
//! Синтаксис:
//! - identifier = ASCII-буква, далее буквы/цифры/'_'
//! - type name  = identifier ('.' identifier)*
//! - feature    = identifier (короткое имя; полное имя "<Type>:<short>")

use std::collections::HashMap;
use std::sync::OnceLock;

use crate::consts::{ARRAY_TYPE_SUFFIX, BUILTIN_ARRAY_NAMES, FEATURE_SEPARATOR, NAMESPACE_SEPARATOR};

pub fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

pub fn is_type_name(name: &str) -> bool {
    !name.is_empty() && name.split(NAMESPACE_SEPARATOR).all(is_identifier)
}

/// `<TypeName>:<short>`
pub fn feature_full_name(type_name: &str, short_name: &str) -> String {
    let mut s = String::with_capacity(type_name.len() + 1 + short_name.len());
    s.push_str(type_name);
    s.push(FEATURE_SEPARATOR);
    s.push_str(short_name);
    s
}

// -------------------- built-in array names (process-wide, immutable) --------------------

static COMPONENT_TO_ARRAY_NAME: OnceLock<HashMap<&'static str, &'static str>> = OnceLock::new();
static ARRAY_TO_COMPONENT_NAME: OnceLock<HashMap<&'static str, &'static str>> = OnceLock::new();

fn component_to_array_name() -> &'static HashMap<&'static str, &'static str> {
    COMPONENT_TO_ARRAY_NAME.get_or_init(|| BUILTIN_ARRAY_NAMES.iter().copied().collect())
}

fn array_to_component_name() -> &'static HashMap<&'static str, &'static str> {
    ARRAY_TO_COMPONENT_NAME
        .get_or_init(|| BUILTIN_ARRAY_NAMES.iter().map(|&(c, a)| (a, c)).collect())
}

/// Fixed name for built-in components, `<Component>[]` otherwise.
pub fn array_type_name(component_name: &str) -> String {
    match component_to_array_name().get(component_name) {
        Some(fixed) => (*fixed).to_string(),
        None => format!("{component_name}{ARRAY_TYPE_SUFFIX}"),
    }
}

/// Component name for a built-in array name (e.g. IntegerArray -> Integer).
pub fn builtin_array_component(array_name: &str) -> Option<&'static str> {
    array_to_component_name().get(array_name).copied()
}

/// Strip a trailing `[]`, if any.
pub fn array_component_name(array_name: &str) -> Option<&str> {
    array_name.strip_suffix(ARRAY_TYPE_SUFFIX)
}

// -------------------- symbol table --------------------

/// Name <-> code, codes are dense and start at 1.
#[derive(Clone, Debug, Default)]
pub(crate) struct SymbolTable {
    names: Vec<String>,
    codes: HashMap<String, u32>,
}

impl SymbolTable {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Bind a new name to the next code. Caller checks `contains` first.
    pub(crate) fn insert(&mut self, name: &str) -> u32 {
        let code = self.names.len() as u32 + 1;
        self.names.push(name.to_string());
        self.codes.insert(name.to_string(), code);
        code
    }

    #[inline]
    pub(crate) fn contains(&self, name: &str) -> bool {
        self.codes.contains_key(name)
    }

    /// 0 on miss.
    #[inline]
    pub(crate) fn code(&self, name: &str) -> u32 {
        self.codes.get(name).copied().unwrap_or(0)
    }

    pub(crate) fn name(&self, code: u32) -> Option<&str> {
        if code == 0 {
            return None;
        }
        self.names.get(code as usize - 1).map(String::as_str)
    }

    #[inline]
    pub(crate) fn len(&self) -> usize {
        self.names.len()
    }
}
