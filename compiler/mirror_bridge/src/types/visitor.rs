//! Type visitor.

use mirror_host::PrimitiveKind;

use super::{ArrayType, BridgeType, DeclaredType, IntersectionType, TypeVariable};

/// Per-variant callbacks for [`BridgeType::accept`].
///
/// Every method defaults to [`visit_default`](TypeVisitor::visit_default),
/// so implementors only override the variants they care about.
pub trait TypeVisitor {
    type Output;

    /// Fallback for variants without an override.
    fn visit_default(&mut self, ty: &BridgeType) -> Self::Output;

    fn visit_primitive(&mut self, ty: &BridgeType, kind: PrimitiveKind) -> Self::Output {
        let _ = kind;
        self.visit_default(ty)
    }

    fn visit_void(&mut self, ty: &BridgeType) -> Self::Output {
        self.visit_default(ty)
    }

    /// Also receives the "no lower bound" sentinel.
    fn visit_null(&mut self, ty: &BridgeType) -> Self::Output {
        self.visit_default(ty)
    }

    fn visit_error(&mut self, ty: &BridgeType) -> Self::Output {
        self.visit_default(ty)
    }

    fn visit_declared(&mut self, ty: DeclaredType<'_>) -> Self::Output {
        self.visit_default(ty.ty())
    }

    fn visit_array(&mut self, ty: ArrayType<'_>) -> Self::Output {
        self.visit_default(ty.ty())
    }

    fn visit_intersection(&mut self, ty: IntersectionType<'_>) -> Self::Output {
        self.visit_default(ty.ty())
    }

    fn visit_type_variable(&mut self, ty: TypeVariable<'_>) -> Self::Output {
        self.visit_default(ty.ty())
    }
}
