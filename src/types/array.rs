//! types/array: ленивый синтез array-типов.
//!
//! array_type(C):
//! - кэш по коду компонента (повторный вызов возвращает тот же код);
//! - родитель: ArrayBase, если C примитивный или TOP, иначе FSArray;
//! - имя: фиксированное для встроенных компонентов, иначе "<C>[]";
//! - до commit() и если родитель не FSArray: тип вшивается под ArrayBase в дерево
//!   и получает биты subsumption. После commit() синтез разрешён, дерево не меняется.

use log::{debug, warn};

use super::core::TypeSystem;
use super::names::array_type_name;
use super::{TypeCode, TypeDef};
use crate::consts::UNKNOWN_TYPE_CODE;
use crate::metrics;

impl TypeSystem {
    /// Array type with component `component`, synthesized on first use.
    /// UNKNOWN_TYPE_CODE for invalid components or when the array scaffolding is missing.
    pub fn array_type(&mut self, component: TypeCode) -> TypeCode {
        if let Some(&code) = self.component_to_array.get(&component) {
            metrics::record_array_cache_hit();
            return code;
        }
        if !self.is_type(component) {
            return UNKNOWN_TYPE_CODE;
        }
        let parent = self.array_parent_for(component);
        if parent == UNKNOWN_TYPE_CODE {
            return UNKNOWN_TYPE_CODE;
        }
        self.add_array_type(component, parent)
    }

    /// Cached array type without synthesizing it.
    pub fn existing_array_type(&self, component: TypeCode) -> TypeCode {
        self.component_to_array
            .get(&component)
            .copied()
            .unwrap_or(UNKNOWN_TYPE_CODE)
    }

    /// Structural parent for arrays of `component`.
    pub fn array_parent_for(&self, component: TypeCode) -> TypeCode {
        if component == self.top || self.is_primitive_type(component) {
            self.builtins.array_base
        } else {
            self.builtins.fs_array
        }
    }

    fn add_array_type(&mut self, component: TypeCode, parent: TypeCode) -> TypeCode {
        let name = match self.type_name(component) {
            Some(n) => array_type_name(n),
            None => return UNKNOWN_TYPE_CODE,
        };
        if self.type_names.contains(&name) {
            warn!("array type name {name} is already bound to a non-array type");
            return UNKNOWN_TYPE_CODE;
        }

        let code = self.type_names.insert(&name);
        self.component_to_array.insert(component, code);
        self.array_to_component.insert(code, component);
        self.new_type_slot();

        let mut def = TypeDef::new(&name, code, parent);
        def.component = Some(component);
        def.inheritance_final = true;
        def.feature_final = true;
        self.types.push(def);
        if !self.locked {
            self.num_committed_types = self.types.len();
        }
        self.builtins.note(&name, code);

        // Массивы не-примитивов остаются под FSArray только структурно.
        if !self.locked && parent != self.builtins.fs_array {
            let base = self.builtins.array_base;
            self.tree[base as usize].push(code);
            self.update_subsumption(code, base);
        }

        metrics::record_array_type_synthesized();
        debug!(
            "array type {name} ({code}) < {parent}{}",
            if self.locked { " [post-commit]" } else { "" }
        );
        code
    }

    #[inline]
    pub fn is_array_type(&self, code: TypeCode) -> bool {
        self.array_to_component.contains_key(&code)
    }

    /// Component of an array type; UNKNOWN_TYPE_CODE for non-arrays.
    pub fn component_type(&self, code: TypeCode) -> TypeCode {
        self.array_to_component
            .get(&code)
            .copied()
            .unwrap_or(UNKNOWN_TYPE_CODE)
    }
}
