//! `InterpreterBuilder` for creating configured interpreters.

use std::rc::Rc;

use super::recovery::RecoveryStack;
use super::{Interpreter, LegacyOptions};
use crate::diagnostics::CallStack;
use crate::environment::Environment;
use crate::eval_mode::EvalMode;
use crate::natives::{self, NativeDef};
use crate::print_handler::{buffer_handler, stdout_handler, SharedPrintHandler};
use tide_ir::{sym, Name, SharedInterner};
use tide_value::{Frame, Function, FunctionBody, Kind, NativeId, Value};

/// Builder for [`Interpreter`].
///
/// The mode decides the defaults: `Interpret` prints to stdout and allows
/// deep recursion, `TestRun` captures output and keeps the call depth low.
#[derive(Default)]
pub struct InterpreterBuilder {
    interner: Option<SharedInterner>,
    mode: EvalMode,
    print_handler: Option<SharedPrintHandler>,
    legacy: LegacyOptions,
}

impl InterpreterBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Share an interner with the host, e.g. to render load errors.
    #[must_use]
    pub fn interner(mut self, interner: SharedInterner) -> Self {
        self.interner = Some(interner);
        self
    }

    #[must_use]
    pub fn mode(mut self, mode: EvalMode) -> Self {
        self.mode = mode;
        self
    }

    /// Override the mode's print destination.
    #[must_use]
    pub fn print_handler(mut self, handler: SharedPrintHandler) -> Self {
        self.print_handler = Some(handler);
        self
    }

    #[must_use]
    pub fn legacy(mut self, legacy: LegacyOptions) -> Self {
        self.legacy = legacy;
        self
    }

    /// Build the interpreter with the natives and constant words bound in
    /// its root context.
    pub fn build(self) -> Interpreter {
        let interner = self.interner.unwrap_or_default();
        let print_handler = self.print_handler.unwrap_or_else(|| {
            if self.mode.allows_io() {
                stdout_handler()
            } else {
                buffer_handler()
            }
        });
        let natives: Vec<&'static NativeDef> = natives::all().collect();
        let root = root_frame(&interner, &natives);
        tracing::debug!(natives = natives.len(), mode = ?self.mode, "interpreter built");

        Interpreter {
            env: Environment::new(root),
            call_stack: CallStack::new(self.mode.max_recursion_depth()),
            recovery: RecoveryStack::default(),
            natives,
            mode: self.mode,
            print_handler,
            legacy: self.legacy,
            interner,
        }
    }
}

fn root_frame(interner: &SharedInterner, natives: &[&'static NativeDef]) -> Frame {
    let constants: [(Name, Value); 7] = [
        (sym::NONE, Value::None),
        (sym::TRUE, Value::Logic(true)),
        (sym::FALSE, Value::Logic(false)),
        (sym::ON, Value::Logic(true)),
        (sym::OFF, Value::Logic(false)),
        (sym::YES, Value::Logic(true)),
        (sym::NO, Value::Logic(false)),
    ];
    let datatypes = Kind::ALL
        .into_iter()
        .map(|kind| (interner.intern(kind.name()), Value::Datatype(kind)));
    let functions = natives.iter().enumerate().map(|(index, def)| {
        let function = Function {
            params: def.params(interner),
            body: FunctionBody::Native(NativeId(u16::try_from(index).unwrap_or(u16::MAX))),
            infix: def.infix,
        };
        (interner.intern(def.name), Value::Function(Rc::new(function)))
    });
    Frame::with_fields(constants.into_iter().chain(datatypes).chain(functions))
}
