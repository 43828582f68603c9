//! types/core: структура TypeSystem, bootstrap встроенных типов и lookup API.
//!
//! Коды типов/фич плотные и начинаются с 1; types[code - 1] / features[code - 1].
//! Таблицы, индексируемые кодом напрямую (tree, approp, subsumes), держат пустой слот 0.
//!
//! Все промахи поиска возвращают UNKNOWN_*_CODE или None и никогда не паникуют.

use std::collections::HashMap;

use log::debug;

use super::bits::SubsumptionTable;
use super::names::{feature_full_name, SymbolTable};
use super::{FeatureCode, FeatureDef, TypeCode, TypeDef};
use crate::config::StoreConfig;
use crate::consts::*;

/// Codes of the built-in scaffolding types. 0 while a role is not declared.
#[derive(Clone, Copy, Debug, Default)]
pub(crate) struct Builtins {
    pub integer: TypeCode,
    pub float: TypeCode,
    pub string: TypeCode,
    pub boolean: TypeCode,
    pub byte: TypeCode,
    pub short: TypeCode,
    pub long: TypeCode,
    pub double: TypeCode,
    pub array_base: TypeCode,
    pub fs_array: TypeCode,
    pub integer_array: TypeCode,
    pub float_array: TypeCode,
    pub string_array: TypeCode,
    pub boolean_array: TypeCode,
    pub byte_array: TypeCode,
    pub short_array: TypeCode,
    pub long_array: TypeCode,
    pub double_array: TypeCode,
}

impl Builtins {
    /// Record a built-in role if `name` is one of the built-in names.
    pub(crate) fn note(&mut self, name: &str, code: TypeCode) {
        let slot = match name {
            TYPE_NAME_INTEGER => &mut self.integer,
            TYPE_NAME_FLOAT => &mut self.float,
            TYPE_NAME_STRING => &mut self.string,
            TYPE_NAME_BOOLEAN => &mut self.boolean,
            TYPE_NAME_BYTE => &mut self.byte,
            TYPE_NAME_SHORT => &mut self.short,
            TYPE_NAME_LONG => &mut self.long,
            TYPE_NAME_DOUBLE => &mut self.double,
            TYPE_NAME_ARRAY_BASE => &mut self.array_base,
            TYPE_NAME_FS_ARRAY => &mut self.fs_array,
            TYPE_NAME_INTEGER_ARRAY => &mut self.integer_array,
            TYPE_NAME_FLOAT_ARRAY => &mut self.float_array,
            TYPE_NAME_STRING_ARRAY => &mut self.string_array,
            TYPE_NAME_BOOLEAN_ARRAY => &mut self.boolean_array,
            TYPE_NAME_BYTE_ARRAY => &mut self.byte_array,
            TYPE_NAME_SHORT_ARRAY => &mut self.short_array,
            TYPE_NAME_LONG_ARRAY => &mut self.long_array,
            TYPE_NAME_DOUBLE_ARRAY => &mut self.double_array,
            _ => return,
        };
        *slot = code;
    }

    #[inline]
    pub(crate) fn is_primitive_array(&self, code: TypeCode) -> bool {
        code != UNKNOWN_TYPE_CODE
            && [
                self.integer_array,
                self.float_array,
                self.string_array,
                self.boolean_array,
                self.byte_array,
                self.short_array,
                self.long_array,
                self.double_array,
            ]
            .contains(&code)
    }
}

/// `true` iff `role` is declared and equals `code`.
#[inline]
pub(crate) fn is_role(role: TypeCode, code: TypeCode) -> bool {
    role != UNKNOWN_TYPE_CODE && role == code
}

/// Registry of types and features.
#[derive(Clone, Debug)]
pub struct TypeSystem {
    pub(crate) type_names: SymbolTable,
    pub(crate) feature_names: SymbolTable,
    /// Full feature names on every type the feature is appropriate for.
    pub(crate) feature_map: HashMap<String, FeatureCode>,

    pub(crate) types: Vec<TypeDef>,
    pub(crate) features: Vec<FeatureDef>,

    /// Direct children per type code.
    pub(crate) tree: Vec<Vec<TypeCode>>,
    pub(crate) subsumes: SubsumptionTable,
    /// Appropriate features per type code, inherited ones first.
    pub(crate) approp: Vec<Vec<FeatureCode>>,

    pub(crate) top: TypeCode,
    pub(crate) builtins: Builtins,

    pub(crate) string_sets: Vec<Vec<String>>,
    pub(crate) component_to_array: HashMap<TypeCode, TypeCode>,
    pub(crate) array_to_component: HashMap<TypeCode, TypeCode>,

    pub(crate) locked: bool,
    pub(crate) num_committed_types: usize,
}

impl Default for TypeSystem {
    fn default() -> Self {
        Self::new()
    }
}

impl TypeSystem {
    /// A registry without any type. Declare the root with `add_top_type`.
    pub fn empty() -> Self {
        Self {
            type_names: SymbolTable::new(),
            feature_names: SymbolTable::new(),
            feature_map: HashMap::new(),
            types: Vec::new(),
            features: Vec::new(),
            tree: vec![Vec::new()],
            subsumes: SubsumptionTable::new(),
            approp: vec![Vec::new()],
            top: UNKNOWN_TYPE_CODE,
            builtins: Builtins::default(),
            string_sets: Vec::new(),
            component_to_array: HashMap::new(),
            array_to_component: HashMap::new(),
            locked: false,
            num_committed_types: 0,
        }
    }

    /// A registry with the built-in scaffolding (TOP, primitives, array base, built-in arrays).
    pub fn new() -> Self {
        let mut ts = Self::empty();
        ts.bootstrap_builtins();
        ts
    }

    /// `new()` or `empty()` depending on `cfg.bootstrap_builtins`.
    pub fn with_config(cfg: &StoreConfig) -> Self {
        if cfg.bootstrap_builtins {
            Self::new()
        } else {
            Self::empty()
        }
    }

    fn bootstrap_builtins(&mut self) {
        let top = match self.add_top_type(TYPE_NAME_TOP) {
            Some(c) => c,
            None => return,
        };

        // Integer/Float/String, затем ArrayBase и массивы, затем остальные примитивы.
        let (first, rest) = PRIMITIVE_TYPE_NAMES.split_at(3);
        for name in first {
            self.add_type_internal(name, top);
        }
        let array_base = self.add_type_internal(TYPE_NAME_ARRAY_BASE, top);

        self.array_type(top);
        for name in first {
            let c = self.type_code(name);
            self.array_type(c);
        }
        for name in rest {
            let c = self.add_type_internal(name, top);
            self.array_type(c);
        }

        for name in PRIMITIVE_TYPE_NAMES {
            let c = self.type_code(name);
            self.mark_final(c);
        }
        self.mark_final(array_base);

        debug!(
            "type system bootstrapped: {} built-in types (top={}, array_base={}, fs_array={})",
            self.type_names.len(),
            top,
            array_base,
            self.builtins.fs_array
        );
    }

    pub(crate) fn mark_final(&mut self, code: TypeCode) {
        if let Some(t) = self.type_mut(code) {
            t.inheritance_final = true;
            t.feature_final = true;
        }
    }

    /// Fresh per-code slots: children list, subsumption row, appropriate features.
    pub(crate) fn new_type_slot(&mut self) {
        self.tree.push(Vec::new());
        self.subsumes.push_row();
        self.approp.push(Vec::new());
    }

    pub(crate) fn type_mut(&mut self, code: TypeCode) -> Option<&mut TypeDef> {
        if code == UNKNOWN_TYPE_CODE {
            return None;
        }
        self.types.get_mut(code as usize - 1)
    }

    // -------------------- state --------------------

    #[inline]
    pub fn is_committed(&self) -> bool {
        self.locked
    }

    /// Number of types, synthesized arrays included.
    #[inline]
    pub fn num_types(&self) -> usize {
        self.type_names.len()
    }

    #[inline]
    pub fn num_features(&self) -> usize {
        self.feature_names.len()
    }

    /// Types visible to `types()`; frozen by `commit()`.
    #[inline]
    pub fn num_committed_types(&self) -> usize {
        self.num_committed_types
    }

    #[inline]
    pub fn top_type(&self) -> TypeCode {
        self.top
    }

    #[inline]
    pub fn is_type(&self, code: TypeCode) -> bool {
        code >= LEAST_TYPE_CODE && (code as usize) <= self.num_types()
    }

    /// Alias of `is_type`; array codes are ordinary type codes.
    #[inline]
    pub fn is_valid_type_code(&self, code: TypeCode) -> bool {
        self.is_type(code)
    }

    #[inline]
    pub fn is_feature(&self, code: FeatureCode) -> bool {
        code >= LEAST_FEATURE_CODE && (code as usize) <= self.num_features()
    }

    // -------------------- types by name / code --------------------

    /// UNKNOWN_TYPE_CODE on miss.
    pub fn type_code(&self, name: &str) -> TypeCode {
        self.type_names.code(name)
    }

    pub fn type_name(&self, code: TypeCode) -> Option<&str> {
        self.type_names.name(code)
    }

    pub fn type_for_code(&self, code: TypeCode) -> Option<&TypeDef> {
        if !self.is_type(code) {
            return None;
        }
        self.types.get(code as usize - 1)
    }

    pub fn type_by_name(&self, name: &str) -> Option<&TypeDef> {
        self.type_for_code(self.type_code(name))
    }

    /// Parent code; UNKNOWN_TYPE_CODE for the top type and for misses.
    pub fn parent(&self, code: TypeCode) -> TypeCode {
        self.type_for_code(code)
            .map(|t| t.parent)
            .unwrap_or(UNKNOWN_TYPE_CODE)
    }

    /// Types in code order, up to the committed count.
    pub fn types(&self) -> impl Iterator<Item = &TypeDef> + '_ {
        self.types.iter().take(self.num_committed_types)
    }

    // -------------------- features --------------------

    pub fn features(&self) -> impl Iterator<Item = &FeatureDef> + '_ {
        self.features.iter()
    }

    pub fn feature_for_code(&self, code: FeatureCode) -> Option<&FeatureDef> {
        if !self.is_feature(code) {
            return None;
        }
        self.features.get(code as usize - 1)
    }

    /// Lookup by `<TypeName>:<short>` on any type the feature is appropriate for.
    /// UNKNOWN_FEATURE_CODE on miss.
    pub fn feature_code(&self, full_name: &str) -> FeatureCode {
        self.feature_map
            .get(full_name)
            .copied()
            .unwrap_or(UNKNOWN_FEATURE_CODE)
    }

    pub fn feature_by_full_name(&self, full_name: &str) -> Option<&FeatureDef> {
        self.feature_for_code(self.feature_code(full_name))
    }

    /// Feature `short` as seen from `type_code` (own or inherited).
    pub fn feature_by_base_name(&self, type_code: TypeCode, short: &str) -> Option<&FeatureDef> {
        let type_name = self.type_name(type_code)?;
        self.feature_by_full_name(&feature_full_name(type_name, short))
    }

    /// Introducing type of a feature; UNKNOWN_TYPE_CODE on miss.
    pub fn feature_domain(&self, feat: FeatureCode) -> TypeCode {
        self.feature_for_code(feat)
            .map(|f| f.domain)
            .unwrap_or(UNKNOWN_TYPE_CODE)
    }

    pub fn feature_range(&self, feat: FeatureCode) -> TypeCode {
        self.feature_for_code(feat)
            .map(|f| f.range)
            .unwrap_or(UNKNOWN_TYPE_CODE)
    }

    // -------------------- string subtypes --------------------

    #[inline]
    pub fn is_string_subtype(&self, code: TypeCode) -> bool {
        self.type_for_code(code)
            .map(TypeDef::is_string_subtype)
            .unwrap_or(false)
    }

    /// Sorted allowed values of a string subtype.
    pub fn string_set(&self, code: TypeCode) -> Option<&[String]> {
        let slot = self.type_for_code(code)?.string_set?;
        self.string_sets.get(slot).map(Vec::as_slice)
    }
}
