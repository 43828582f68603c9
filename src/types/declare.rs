//! types/declare: объявления типов и фич (до commit()).
//!
//! Все проверки выполняются до любой мутации: при ошибке реестр остаётся прежним.

use log::{debug, info};

use super::core::TypeSystem;
use super::names::{builtin_array_component, feature_full_name, is_identifier, is_type_name};
use super::{FeatureCode, FeatureDef, TypeCode, TypeDef};
use crate::consts::{TYPE_NAME_STRING, UNKNOWN_TYPE_CODE};
use crate::error::TypeSystemError;
use crate::metrics;

impl TypeSystem {
    /// Declare the root type. Only succeeds once, on an empty, uncommitted registry.
    pub fn add_top_type(&mut self, name: &str) -> Option<TypeCode> {
        if self.locked || self.type_names.len() > 0 {
            return None;
        }
        let code = self.type_names.insert(name);
        self.top = code;
        self.new_type_slot();
        self.subsumes.set(code, code);
        self.types.push(TypeDef::new(name, code, UNKNOWN_TYPE_CODE));
        self.num_committed_types = self.types.len();
        self.builtins.note(name, code);

        metrics::record_type_declared();
        debug!("top type {name} ({code})");
        Some(code)
    }

    /// Declare `name` as a direct subtype of `parent`.
    ///
    /// `Ok(None)` if the name is already bound. A built-in array name resolves to the
    /// synthesized array type of its component.
    pub fn add_type(
        &mut self,
        name: &str,
        parent: TypeCode,
    ) -> Result<Option<TypeCode>, TypeSystemError> {
        if self.locked {
            return Err(TypeSystemError::TypeSystemLocked);
        }
        let parent_def = self
            .type_for_code(parent)
            .ok_or(TypeSystemError::UnknownType { code: parent })?;
        if parent_def.inheritance_final {
            return Err(TypeSystemError::InheritanceFinal {
                type_name: parent_def.name.clone(),
            });
        }

        if let Some(component) = builtin_array_component(name) {
            let c = self.type_code(component);
            if c == UNKNOWN_TYPE_CODE {
                return Ok(None);
            }
            let a = self.array_type(c);
            return Ok((a != UNKNOWN_TYPE_CODE).then_some(a));
        }

        if !is_type_name(name) {
            return Err(TypeSystemError::BadTypeSyntax(name.to_string()));
        }
        let code = self.add_type_internal(name, parent);
        Ok((code != UNKNOWN_TYPE_CODE).then_some(code))
    }

    /// No lock/finality/syntax checks. UNKNOWN_TYPE_CODE if the name is taken.
    pub(crate) fn add_type_internal(&mut self, name: &str, parent: TypeCode) -> TypeCode {
        if self.type_names.contains(name) || !self.is_type(parent) {
            return UNKNOWN_TYPE_CODE;
        }
        let code = self.type_names.insert(name);
        self.new_type_slot();
        self.tree[parent as usize].push(code);
        self.update_subsumption(code, parent);

        // Наследуем appropriate features родителя (коды те же), полные имена: под новым типом.
        let inherited = self.approp[parent as usize].clone();
        for feat in inherited {
            if let Some(f) = self.feature_for_code(feat) {
                let full = feature_full_name(name, &f.short_name);
                self.feature_map.insert(full, feat);
            }
            self.approp[code as usize].push(feat);
        }

        self.types.push(TypeDef::new(name, code, parent));
        self.num_committed_types = self.types.len();
        self.builtins.note(name, code);

        metrics::record_type_declared();
        debug!("type {name} ({code}) < {parent}");
        code
    }

    /// Declare feature `short_name` on `domain` with range `range`.
    ///
    /// Re-declaring a feature that is already visible from `domain` (own, inherited, or
    /// declared on a subtype) with the same range returns the existing code.
    pub fn add_feature(
        &mut self,
        short_name: &str,
        domain: TypeCode,
        range: TypeCode,
        multiple_refs_allowed: bool,
    ) -> Result<FeatureCode, TypeSystemError> {
        if self.locked {
            return Err(TypeSystemError::TypeSystemLocked);
        }
        let domain_def = self
            .type_for_code(domain)
            .ok_or(TypeSystemError::UnknownType { code: domain })?;
        if !self.is_type(range) {
            return Err(TypeSystemError::UnknownType { code: range });
        }

        if let Some(f) = self.feature_by_base_name(domain, short_name) {
            if f.range == range {
                metrics::record_feature_redeclared();
                return Ok(f.code);
            }
        }
        if domain_def.feature_final {
            return Err(TypeSystemError::FeatureFinal {
                type_name: domain_def.name.clone(),
            });
        }
        if !is_identifier(short_name) {
            return Err(TypeSystemError::BadFeatureSyntax(short_name.to_string()));
        }

        let mut scope = self.properly_subsumed_types(domain);
        scope.push(domain);

        for &t in &scope {
            let full = feature_full_name(self.type_name(t).unwrap_or_default(), short_name);
            let Some(old) = self.feature_by_full_name(&full) else {
                continue;
            };
            if old.range == range {
                metrics::record_feature_redeclared();
                return Ok(old.code);
            }
            return Err(TypeSystemError::DuplicateFeature {
                short_name: short_name.to_string(),
                domain: self.type_name(domain).unwrap_or_default().to_string(),
                range: self.type_name(range).unwrap_or_default().to_string(),
                old_domain: self.type_name(old.domain).unwrap_or_default().to_string(),
                old_range: self.type_name(old.range).unwrap_or_default().to_string(),
            });
        }

        let full = feature_full_name(&domain_def.name, short_name);
        let code = self.feature_names.insert(&full);
        for &t in &scope {
            let name = feature_full_name(self.type_name(t).unwrap_or_default(), short_name);
            self.feature_map.insert(name, code);
        }
        for t in 1..=self.num_types() as TypeCode {
            if self.subsumes(domain, t) {
                self.approp[t as usize].push(code);
            }
        }
        self.features.push(FeatureDef {
            code,
            short_name: short_name.to_string(),
            name: full,
            domain,
            range,
            multiple_refs_allowed,
        });

        metrics::record_feature_declared();
        debug!("feature {} ({code}): {domain} > {range}", self.features[code as usize - 1].name);
        Ok(code)
    }

    /// Final subtype of the built-in string type restricted to `values` (stored sorted, deduplicated).
    pub fn add_string_subtype<S: AsRef<str>>(
        &mut self,
        name: &str,
        values: &[S],
    ) -> Result<Option<TypeCode>, TypeSystemError> {
        if self.locked {
            return Err(TypeSystemError::TypeSystemLocked);
        }
        let string = self.builtins.string;
        if string == UNKNOWN_TYPE_CODE {
            return Err(TypeSystemError::MissingBuiltin(TYPE_NAME_STRING));
        }
        if !is_type_name(name) {
            return Err(TypeSystemError::BadTypeSyntax(name.to_string()));
        }

        // String наследование закрыто для add_type, но не для строковых подтипов.
        let code = self.add_type_internal(name, string);
        if code == UNKNOWN_TYPE_CODE {
            return Ok(None);
        }

        let mut set: Vec<String> = values.iter().map(|v| v.as_ref().to_string()).collect();
        set.sort();
        set.dedup();
        let slot = self.string_sets.len();
        self.string_sets.push(set);
        if let Some(t) = self.type_mut(code) {
            t.string_set = Some(slot);
        }
        self.mark_final(code);
        Ok(Some(code))
    }

    /// Forbid features on `code`. Pre-commit only.
    pub fn set_feature_final(&mut self, code: TypeCode) -> Result<(), TypeSystemError> {
        if self.locked {
            return Err(TypeSystemError::TypeSystemLocked);
        }
        let t = self
            .type_mut(code)
            .ok_or(TypeSystemError::UnknownType { code })?;
        t.feature_final = true;
        Ok(())
    }

    /// Forbid subtypes of `code`. Pre-commit only.
    pub fn set_inheritance_final(&mut self, code: TypeCode) -> Result<(), TypeSystemError> {
        if self.locked {
            return Err(TypeSystemError::TypeSystemLocked);
        }
        let t = self
            .type_mut(code)
            .ok_or(TypeSystemError::UnknownType { code })?;
        t.inheritance_final = true;
        Ok(())
    }

    /// Lock the registry. Idempotent.
    pub fn commit(&mut self) {
        if self.locked {
            return;
        }
        self.locked = true;
        self.num_committed_types = self.types.len();
        metrics::record_commit();
        info!(
            "type system committed: {} types, {} features",
            self.num_committed_types,
            self.num_features()
        );
    }
}
