//! Native and user-defined functions.

use super::BlockRef;
use tide_ir::Name;

/// Index into the interpreter's native table.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct NativeId(pub u16);

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ParamKind {
    /// Evaluated argument.
    Normal,
    /// `'arg`: taken literally from the call site.
    Literal,
    /// `:arg`: a word's value is fetched without applying it.
    Get,
    /// `/arg`: an optional refinement, true when used at the call site.
    Refinement,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Param {
    pub name: Name,
    pub kind: ParamKind,
}

#[derive(Clone, Debug)]
pub enum FunctionBody {
    Native(NativeId),
    User(BlockRef),
}

/// How many values a CATCH or TRAP handler receives.
///
/// Classified once from the parameter list when the handler is received,
/// so dispatch is a match instead of repeated parameter inspection.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum HandlerShape {
    Nullary,
    /// The payload (or the raised error).
    Unary,
    /// Payload then name.
    Binary,
}

#[derive(Clone, Debug)]
pub struct Function {
    /// Parameters in declaration order; refinement arguments follow their
    /// refinement.
    pub params: Vec<Param>,
    pub body: FunctionBody,
    /// Operators take their first argument from the left.
    pub infix: bool,
}

impl Function {
    /// Number of declared parameters, refinements included.
    pub fn declared_arity(&self) -> usize {
        self.params.len()
    }

    pub fn is_refinement_param(&self, position: usize) -> bool {
        self.params
            .get(position)
            .is_some_and(|param| param.kind == ParamKind::Refinement)
    }

    /// Parameters gathered at every call, before the first refinement.
    pub fn fixed_arity(&self) -> usize {
        self.params
            .iter()
            .take_while(|param| param.kind != ParamKind::Refinement)
            .count()
    }

    /// Position of the refinement named `name`.
    pub fn refinement(&self, name: Name) -> Option<usize> {
        self.params
            .iter()
            .position(|param| param.kind == ParamKind::Refinement && param.name == name)
    }

    /// Dispatch shape for use as a CATCH or TRAP handler.
    ///
    /// No parameters, or a refinement first: nothing is passed. One
    /// parameter, or a refinement second: only the payload. Otherwise the
    /// payload and the name.
    pub fn handler_shape(&self) -> HandlerShape {
        if self.declared_arity() == 0 || self.is_refinement_param(0) {
            HandlerShape::Nullary
        } else if self.declared_arity() == 1 || self.is_refinement_param(1) {
            HandlerShape::Unary
        } else {
            HandlerShape::Binary
        }
    }
}
