//! types/dump: диагностический вывод иерархии (не формат обмена) и сводная статистика.
//!
//! Формат:
//!   ~core.TOP (1);
//!   core.Integer (2) < core.TOP (1);
//!   ...
//!   x.Token:pos (1): x.Token (20) > core.Integer (2);

use std::fmt;

use serde::Serialize;

use super::core::TypeSystem;
use super::TypeCode;

/// Counts for status output.
#[derive(Debug, Clone, Default, Serialize)]
pub struct TypeSystemStats {
    pub types: usize,
    pub committed_types: usize,
    pub features: usize,
    pub array_types: usize,
    pub string_subtypes: usize,
    pub committed: bool,
    pub max_subsumption_row: usize,
}

impl TypeSystem {
    pub fn stats(&self) -> TypeSystemStats {
        TypeSystemStats {
            types: self.num_types(),
            committed_types: self.num_committed_types(),
            features: self.num_features(),
            array_types: self.array_to_component.len(),
            string_subtypes: self.string_sets.len(),
            committed: self.is_committed(),
            max_subsumption_row: (1..=self.num_types() as TypeCode)
                .map(|t| self.subsumption_row_len(t))
                .max()
                .unwrap_or(0),
        }
    }

    fn type_label(&self, code: TypeCode) -> String {
        format!("{} ({})", self.type_name(code).unwrap_or("?"), code)
    }
}

impl fmt::Display for TypeSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.top != 0 {
            writeln!(f, "~{};", self.type_label(self.top))?;
        }
        for t in self.types.iter().filter(|t| t.code != self.top) {
            writeln!(f, "{} < {};", self.type_label(t.code), self.type_label(t.parent))?;
        }
        for feat in self.features() {
            writeln!(
                f,
                "{} ({}): {} > {};",
                feat.name,
                feat.code,
                self.type_label(feat.domain),
                self.type_label(feat.range)
            )?;
        }
        Ok(())
    }
}
