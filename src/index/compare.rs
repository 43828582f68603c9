//! index/compare: ссылки на объекты и внешний компаратор.
//!
//! Ссылка: непрозрачное ненулевое целое; равенство: только по значению (identity).
//! Порядок задаёт компаратор, который обязан оставаться неизменным всю жизнь индекса.
//! Равенство ключей (Ordering::Equal) не означает равенства ссылок.

use std::cmp::Ordering;

/// Opaque non-zero object reference.
pub type ObjRef = u32;

/// Never a valid reference.
pub const NULL_REF: ObjRef = 0;

/// Total order over references, injected per index.
pub trait RefComparator {
    fn compare(&self, a: ObjRef, b: ObjRef) -> Ordering;
}

impl<F> RefComparator for F
where
    F: Fn(ObjRef, ObjRef) -> Ordering,
{
    #[inline]
    fn compare(&self, a: ObjRef, b: ObjRef) -> Ordering {
        self(a, b)
    }
}

/// Orders by the reference value itself.
#[derive(Clone, Copy, Debug, Default)]
pub struct NaturalOrder;

impl RefComparator for NaturalOrder {
    #[inline]
    fn compare(&self, a: ObjRef, b: ObjRef) -> Ordering {
        a.cmp(&b)
    }
}

/// Orders by a key derived from the reference; references with equal keys tie.
#[derive(Clone, Copy, Debug)]
pub struct ByKey<F>(pub F);

impl<F, K> RefComparator for ByKey<F>
where
    F: Fn(ObjRef) -> K,
    K: Ord,
{
    #[inline]
    fn compare(&self, a: ObjRef, b: ObjRef) -> Ordering {
        (self.0)(a).cmp(&(self.0)(b))
    }
}

/// The only thing an index needs from an object handle.
pub trait HasRef {
    fn obj_ref(&self) -> ObjRef;
}

impl HasRef for ObjRef {
    #[inline]
    fn obj_ref(&self) -> ObjRef {
        *self
    }
}
