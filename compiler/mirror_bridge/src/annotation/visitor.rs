//! Annotation value visitor.

use super::{AnnotationMirror, AnnotationValue};
use crate::{BridgeElement, BridgeType};

/// Per-kind callbacks for [`AnnotationValue::accept`].
///
/// Every callback also receives the value being visited and, unless
/// overridden, forwards to [`visit_default`](AnnotationValueVisitor::visit_default).
pub trait AnnotationValueVisitor {
    type Output;

    fn visit_default(&mut self, value: &AnnotationValue) -> Self::Output;

    fn visit_boolean(&mut self, b: bool, value: &AnnotationValue) -> Self::Output {
        let _ = b;
        self.visit_default(value)
    }

    fn visit_byte(&mut self, b: i8, value: &AnnotationValue) -> Self::Output {
        let _ = b;
        self.visit_default(value)
    }

    fn visit_char(&mut self, c: char, value: &AnnotationValue) -> Self::Output {
        let _ = c;
        self.visit_default(value)
    }

    fn visit_short(&mut self, s: i16, value: &AnnotationValue) -> Self::Output {
        let _ = s;
        self.visit_default(value)
    }

    fn visit_int(&mut self, i: i32, value: &AnnotationValue) -> Self::Output {
        let _ = i;
        self.visit_default(value)
    }

    fn visit_long(&mut self, l: i64, value: &AnnotationValue) -> Self::Output {
        let _ = l;
        self.visit_default(value)
    }

    fn visit_float(&mut self, f: f32, value: &AnnotationValue) -> Self::Output {
        let _ = f;
        self.visit_default(value)
    }

    fn visit_double(&mut self, d: f64, value: &AnnotationValue) -> Self::Output {
        let _ = d;
        self.visit_default(value)
    }

    /// String constants, and the source text of unresolved references.
    fn visit_string(&mut self, s: &str, value: &AnnotationValue) -> Self::Output {
        let _ = s;
        self.visit_default(value)
    }

    /// Class literals.
    fn visit_type(&mut self, ty: &BridgeType, value: &AnnotationValue) -> Self::Output {
        let _ = ty;
        self.visit_default(value)
    }

    fn visit_enum_constant(
        &mut self,
        constant: &BridgeElement,
        value: &AnnotationValue,
    ) -> Self::Output {
        let _ = constant;
        self.visit_default(value)
    }

    fn visit_annotation(
        &mut self,
        mirror: &AnnotationMirror,
        value: &AnnotationValue,
    ) -> Self::Output {
        let _ = mirror;
        self.visit_default(value)
    }

    /// Arrays and singleton arrays.
    fn visit_array(&mut self, values: &[AnnotationValue], value: &AnnotationValue) -> Self::Output {
        let _ = values;
        self.visit_default(value)
    }

    /// Constant expressions the host could not fold.
    fn visit_unknown(&mut self, value: &AnnotationValue) -> Self::Output {
        self.visit_default(value)
    }
}
