//! Native functions.
//!
//! Each submodule exports a static table of [`NativeDef`]s. The builder
//! binds every entry in the root context as a function value whose
//! `NativeId` is its index in [`all`]. A native's parameter list is written
//! as a spec string (`"block /name names /quit /any /with handler"`) and
//! parsed once at build time; the native then reads its arguments by
//! position.

mod conditional;
mod control;
mod data;
mod eval;
mod loops;
mod ops;
mod protect;
mod series;
mod trap;

use smallvec::SmallVec;

use crate::Interpreter;
use tide_ir::StringInterner;
use tide_value::{expect_arg, BlockRef, EvalError, EvalResult, ObjectRef, Param, ParamKind, Value};

pub(crate) type NativeFn = fn(&mut Interpreter, Args) -> EvalResult;

pub(crate) struct NativeDef {
    pub(crate) name: &'static str,
    /// Parameter spec: `x` normal, `'x` literal, `:x` get, `/x` refinement.
    pub(crate) spec: &'static str,
    pub(crate) infix: bool,
    pub(crate) run: NativeFn,
}

impl NativeDef {
    pub(crate) const fn prefix(name: &'static str, spec: &'static str, run: NativeFn) -> Self {
        Self {
            name,
            spec,
            infix: false,
            run,
        }
    }

    pub(crate) const fn infix(name: &'static str, run: NativeFn) -> Self {
        Self {
            name,
            spec: "value1 value2",
            infix: true,
            run,
        }
    }

    pub(crate) fn params(&self, interner: &StringInterner) -> Vec<Param> {
        parse_spec(self.spec, interner)
    }
}

fn parse_spec(spec: &str, interner: &StringInterner) -> Vec<Param> {
    spec.split_whitespace()
        .map(|token| {
            let (kind, name) = if let Some(name) = token.strip_prefix('/') {
                (ParamKind::Refinement, name)
            } else if let Some(name) = token.strip_prefix('\'') {
                (ParamKind::Literal, name)
            } else if let Some(name) = token.strip_prefix(':') {
                (ParamKind::Get, name)
            } else {
                (ParamKind::Normal, token)
            };
            Param {
                name: interner.intern(name),
                kind,
            }
        })
        .collect()
}

/// Every native, in `NativeId` order.
pub(crate) fn all() -> impl Iterator<Item = &'static NativeDef> {
    control::NATIVES
        .iter()
        .chain(trap::NATIVES)
        .chain(protect::NATIVES)
        .chain(conditional::NATIVES)
        .chain(loops::NATIVES)
        .chain(eval::NATIVES)
        .chain(series::NATIVES)
        .chain(ops::NATIVES)
        .chain(data::NATIVES)
}

/// Arguments of one native call, indexed by parameter position.
///
/// A refinement's slot is `true` when it was used and `none` otherwise; the
/// slots of its arguments are `none` unless it was used.
pub(crate) struct Args {
    values: SmallVec<[Value; 8]>,
}

impl Args {
    pub(crate) fn new(values: SmallVec<[Value; 8]>) -> Self {
        Self { values }
    }

    pub(crate) fn value(&self, position: usize) -> Value {
        self.values.get(position).cloned().unwrap_or(Value::None)
    }

    pub(crate) fn refined(&self, position: usize) -> bool {
        matches!(self.values.get(position), Some(Value::Logic(true)))
    }

    /// The argument following refinement `position`, if it was used.
    pub(crate) fn refinement_arg(&self, position: usize) -> Option<Value> {
        self.refined(position).then(|| self.value(position + 1))
    }

    pub(crate) fn into_values(self) -> SmallVec<[Value; 8]> {
        self.values
    }
}

#[cold]
pub(crate) fn type_error(func: &str, arg: &str, value: &Value) -> EvalError {
    expect_arg(func, arg, value.kind().name())
}

pub(crate) fn block_arg(func: &str, arg: &str, value: Value) -> Result<BlockRef, EvalError> {
    match value {
        Value::Block(block) => Ok(block),
        other => Err(type_error(func, arg, &other)),
    }
}

pub(crate) fn integer_arg(func: &str, arg: &str, value: &Value) -> Result<i64, EvalError> {
    match value {
        Value::Integer(n) => Ok(*n),
        other => Err(type_error(func, arg, other)),
    }
}

pub(crate) fn object_arg(func: &str, arg: &str, value: Value) -> Result<ObjectRef, EvalError> {
    match value {
        Value::Object(frame) => Ok(frame),
        other => Err(type_error(func, arg, &other)),
    }
}

/// Evaluate a block branch unless `only`; any other value is the result.
pub(crate) fn branch(interp: &mut Interpreter, value: Value, only: bool) -> EvalResult {
    match value {
        Value::Block(block) if !only => interp.evaluate_all(&block),
        other => Ok(other.into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rustc_hash::FxHashSet;

    #[test]
    fn spec_strings_parse_param_kinds() {
        let interner = StringInterner::new();
        let params = parse_spec("block /name names 'lit :get", &interner);
        let kinds: Vec<_> = params.iter().map(|param| param.kind).collect();
        assert_eq!(
            kinds,
            vec![
                ParamKind::Normal,
                ParamKind::Refinement,
                ParamKind::Normal,
                ParamKind::Literal,
                ParamKind::Get,
            ]
        );
        assert_eq!(interner.lookup(params[1].name), "name");
        assert_eq!(interner.lookup(params[3].name), "lit");
    }

    #[test]
    fn native_names_are_unique() {
        let mut seen = FxHashSet::default();
        for def in all() {
            assert!(seen.insert(def.name), "duplicate native {}", def.name);
        }
    }

    #[test]
    fn refinement_args_only_when_refined() {
        let args = Args::new(SmallVec::from_vec(vec![
            Value::Integer(1),
            Value::None,
            Value::None,
            Value::Logic(true),
            Value::Integer(7),
        ]));
        assert!(args.refinement_arg(1).is_none());
        assert!(matches!(args.refinement_arg(3), Some(Value::Integer(7))));
        assert!(matches!(args.value(9), Value::None));
    }
}
