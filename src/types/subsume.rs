//! types/subsume: отношение subsumption, навигация по иерархии, appropriate features.
//!
//! Обычные типы: один бит-тест в строке надтипа (O(1)).
//! Массивы: никогда через битсет, только структурно:
//! - A[] subsumes B[]  <=> A subsumes B
//! - TOP и ArrayBase subsume любой массив
//! - FSArray и любой не-примитивный X[] subsume друг друга (взаимно, не антисимметрично)

use super::core::{is_role, TypeSystem};
use super::{FeatureCode, TypeClass, TypeCode};
use crate::consts::UNKNOWN_TYPE_CODE;

impl TypeSystem {
    /// Reflexive-transitive "is-a": does `sup` subsume `sub`?
    pub fn subsumes(&self, sup: TypeCode, sub: TypeCode) -> bool {
        if sup == sub {
            return self.is_type(sup);
        }
        let b = &self.builtins;
        if is_role(b.fs_array, sup) {
            return !b.is_primitive_array(sub) && self.is_array_type(sub);
        }
        if is_role(b.fs_array, sub) {
            return sup == self.top
                || is_role(b.array_base, sup)
                || (!b.is_primitive_array(sup) && self.is_array_type(sup));
        }

        let sup_is_array = self.is_array_type(sup);
        let sub_is_array = self.is_array_type(sub);
        if sup_is_array {
            if sub_is_array {
                return self.subsumes(self.component_type(sup), self.component_type(sub));
            }
            return false;
        } else if sub_is_array {
            return sup == self.top || is_role(b.array_base, sup);
        }
        self.subsumes.get(sup, sub)
    }

    /// New type under `parent`: every ancestor-or-self of `parent` now subsumes it.
    pub(crate) fn update_subsumption(&mut self, code: TypeCode, parent: TypeCode) {
        let mut ancestor = parent;
        while ancestor != UNKNOWN_TYPE_CODE {
            self.subsumes.set(ancestor, code);
            ancestor = self.parent(ancestor);
        }
        self.subsumes.set(code, code);
    }

    /// Is `b` a direct child of `a` in the declared tree?
    pub fn directly_subsumes(&self, a: TypeCode, b: TypeCode) -> bool {
        self.tree
            .get(a as usize)
            .map(|children| children.contains(&b))
            .unwrap_or(false)
    }

    /// Direct children; empty for array types and misses.
    pub fn direct_subtypes(&self, code: TypeCode) -> Vec<TypeCode> {
        if self.is_array_type(code) || !self.is_type(code) {
            return Vec::new();
        }
        self.tree[code as usize].clone()
    }

    /// All committed types `code` subsumes, except `code` itself.
    pub fn properly_subsumed_types(&self, code: TypeCode) -> Vec<TypeCode> {
        self.types()
            .map(|t| t.code)
            .filter(|&t| t != code && self.subsumes(code, t))
            .collect()
    }

    /// The more specific of two comparable types.
    pub fn unify(&self, a: TypeCode, b: TypeCode) -> Option<TypeCode> {
        if self.subsumes(a, b) {
            Some(b)
        } else if self.subsumes(b, a) {
            Some(a)
        } else {
            None
        }
    }

    /// Number of types in `code`'s subsumption row (reflexive bit included).
    /// Arrays under FSArray are not counted: their relation is structural.
    pub fn subsumption_row_len(&self, code: TypeCode) -> usize {
        self.subsumes.row_len(code)
    }

    // -------------------- appropriate features --------------------

    /// `feat` is readable/writable on `code` iff its domain subsumes `code`.
    pub fn is_appropriate(&self, code: TypeCode, feat: FeatureCode) -> bool {
        match self.feature_for_code(feat) {
            Some(f) => self.subsumes(f.domain, code),
            None => false,
        }
    }

    /// Appropriate features of `code`, inherited first. `None` for invalid codes.
    pub fn appropriate_features(&self, code: TypeCode) -> Option<&[FeatureCode]> {
        if !self.is_type(code) {
            return None;
        }
        self.approp.get(code as usize).map(Vec::as_slice)
    }

    /// Features introduced on `code` itself.
    pub fn intro_features(&self, code: TypeCode) -> Vec<FeatureCode> {
        self.appropriate_features(code)
            .unwrap_or(&[])
            .iter()
            .copied()
            .filter(|&f| self.feature_domain(f) == code)
            .collect()
    }

    /// 1-based slot of `feat` in its domain's feature list (0 on miss).
    /// Subtypes copy the list in order, so the slot is the same on every subtype.
    pub fn feature_offset(&self, feat: FeatureCode) -> usize {
        let domain = self.feature_domain(feat);
        self.appropriate_features(domain)
            .and_then(|fs| fs.iter().position(|&f| f == feat))
            .map(|p| p + 1)
            .unwrap_or(0)
    }

    // -------------------- classification --------------------

    pub fn type_class(&self, code: TypeCode) -> TypeClass {
        let b = &self.builtins;
        if code == UNKNOWN_TYPE_CODE {
            return TypeClass::Fs;
        }
        if is_role(b.boolean, code) {
            return TypeClass::Boolean;
        }
        if is_role(b.byte, code) {
            return TypeClass::Byte;
        }
        if is_role(b.short, code) {
            return TypeClass::Short;
        }
        if is_role(b.integer, code) {
            return TypeClass::Int;
        }
        if is_role(b.float, code) {
            return TypeClass::Float;
        }
        if is_role(b.long, code) {
            return TypeClass::Long;
        }
        if is_role(b.double, code) {
            return TypeClass::Double;
        }
        if b.string != UNKNOWN_TYPE_CODE && self.subsumes(b.string, code) {
            return TypeClass::String;
        }
        if is_role(b.boolean_array, code) {
            return TypeClass::BooleanArray;
        }
        if is_role(b.byte_array, code) {
            return TypeClass::ByteArray;
        }
        if is_role(b.short_array, code) {
            return TypeClass::ShortArray;
        }
        if is_role(b.integer_array, code) {
            return TypeClass::IntArray;
        }
        if is_role(b.float_array, code) {
            return TypeClass::FloatArray;
        }
        if is_role(b.long_array, code) {
            return TypeClass::LongArray;
        }
        if is_role(b.double_array, code) {
            return TypeClass::DoubleArray;
        }
        if is_role(b.string_array, code) {
            return TypeClass::StringArray;
        }
        if self.is_array_type(code) {
            return TypeClass::FsArray;
        }
        TypeClass::Fs
    }

    /// Values are object references (not primitives, not strings).
    pub fn is_ref_type(&self, code: TypeCode) -> bool {
        !self.type_class(code).is_primitive()
    }

    /// Primitives, core.String and its subtypes.
    pub fn is_primitive_type(&self, code: TypeCode) -> bool {
        self.type_class(code).is_primitive()
    }
}
