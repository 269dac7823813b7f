//! Infix operators and NOT.
//!
//! Direct enum dispatch: the operand kinds are a fixed set, so a match on
//! the pair is exhaustive and cheap.

use std::cmp::Ordering;

use super::{Args, NativeDef};
use crate::Interpreter;
use tide_value::{
    cannot_use, equal, overflow, strict_equal, zero_divide, EvalError, EvalResult, Value,
};

pub(super) static NATIVES: &[NativeDef] = &[
    NativeDef::infix("+", add),
    NativeDef::infix("-", subtract),
    NativeDef::infix("*", multiply),
    NativeDef::infix("/", divide),
    NativeDef::infix("=", equal_op),
    NativeDef::infix("==", strict_equal_op),
    NativeDef::infix("<>", not_equal),
    NativeDef::infix("<", less),
    NativeDef::infix(">", greater),
    NativeDef::infix("<=", less_equal),
    NativeDef::infix(">=", greater_equal),
    NativeDef::prefix("not", "value", not),
];

macro_rules! operators {
    ($($native:ident => $op:ident,)*) => {
        $(
            fn $native(_: &mut Interpreter, args: Args) -> EvalResult {
                binary(BinaryOp::$op, &args)
            }
        )*
    };
}

operators! {
    add => Add,
    subtract => Subtract,
    multiply => Multiply,
    divide => Divide,
    equal_op => Equal,
    strict_equal_op => StrictEqual,
    not_equal => NotEqual,
    less => Less,
    greater => Greater,
    less_equal => LessEqual,
    greater_equal => GreaterEqual,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum BinaryOp {
    Add,
    Subtract,
    Multiply,
    Divide,
    Equal,
    StrictEqual,
    NotEqual,
    Less,
    Greater,
    LessEqual,
    GreaterEqual,
}

impl BinaryOp {
    fn symbol(self) -> &'static str {
        match self {
            BinaryOp::Add => "+",
            BinaryOp::Subtract => "-",
            BinaryOp::Multiply => "*",
            BinaryOp::Divide => "/",
            BinaryOp::Equal => "=",
            BinaryOp::StrictEqual => "==",
            BinaryOp::NotEqual => "<>",
            BinaryOp::Less => "<",
            BinaryOp::Greater => ">",
            BinaryOp::LessEqual => "<=",
            BinaryOp::GreaterEqual => ">=",
        }
    }

    fn accepts(self, ordering: Ordering) -> bool {
        match self {
            BinaryOp::Less => ordering == Ordering::Less,
            BinaryOp::Greater => ordering == Ordering::Greater,
            BinaryOp::LessEqual => ordering != Ordering::Greater,
            BinaryOp::GreaterEqual => ordering != Ordering::Less,
            _ => false,
        }
    }
}

fn binary(op: BinaryOp, args: &Args) -> EvalResult {
    let (left, right) = (args.value(0), args.value(1));
    let result = match op {
        BinaryOp::Equal => Value::Logic(equal(&left, &right)),
        BinaryOp::StrictEqual => Value::Logic(strict_equal(&left, &right)),
        BinaryOp::NotEqual => Value::Logic(!equal(&left, &right)),
        BinaryOp::Less | BinaryOp::Greater | BinaryOp::LessEqual | BinaryOp::GreaterEqual => {
            Value::Logic(op.accepts(compare(op, &left, &right)?))
        }
        BinaryOp::Add | BinaryOp::Subtract | BinaryOp::Multiply | BinaryOp::Divide => {
            arithmetic(op, &left, &right)?
        }
    };
    Ok(result.into())
}

fn arithmetic(op: BinaryOp, left: &Value, right: &Value) -> Result<Value, EvalError> {
    match (left, right) {
        (Value::Integer(a), Value::Integer(b)) => int_arithmetic(op, *a, *b),
        (Value::Integer(a), Value::Decimal(b)) => decimal_arithmetic(op, int_to_f64(*a), *b),
        (Value::Decimal(a), Value::Integer(b)) => decimal_arithmetic(op, *a, int_to_f64(*b)),
        (Value::Decimal(a), Value::Decimal(b)) => decimal_arithmetic(op, *a, *b),
        (Value::Integer(_) | Value::Decimal(_), other) | (other, _) => {
            Err(cannot_use(op.symbol(), other.kind().name()))
        }
    }
}

/// Checked integer arithmetic. Division that does not divide evenly
/// produces a decimal.
fn int_arithmetic(op: BinaryOp, a: i64, b: i64) -> Result<Value, EvalError> {
    let result = match op {
        BinaryOp::Add => a.checked_add(b),
        BinaryOp::Subtract => a.checked_sub(b),
        BinaryOp::Multiply => a.checked_mul(b),
        BinaryOp::Divide => {
            if b == 0 {
                return Err(zero_divide());
            }
            match a.checked_rem(b) {
                Some(0) => a.checked_div(b),
                Some(_) => return Ok(Value::Decimal(int_to_f64(a) / int_to_f64(b))),
                None => None,
            }
        }
        _ => None,
    };
    result.map(Value::Integer).ok_or_else(overflow)
}

fn decimal_arithmetic(op: BinaryOp, a: f64, b: f64) -> Result<Value, EvalError> {
    let result = match op {
        BinaryOp::Add => a + b,
        BinaryOp::Subtract => a - b,
        BinaryOp::Multiply => a * b,
        BinaryOp::Divide => {
            if b == 0.0 {
                return Err(zero_divide());
            }
            a / b
        }
        _ => return Err(cannot_use(op.symbol(), "decimal!")),
    };
    if result.is_finite() {
        Ok(Value::Decimal(result))
    } else {
        Err(overflow())
    }
}

fn compare(op: BinaryOp, left: &Value, right: &Value) -> Result<Ordering, EvalError> {
    let ordering = match (left, right) {
        (Value::Integer(a), Value::Integer(b)) => Some(a.cmp(b)),
        (Value::Integer(a), Value::Decimal(b)) => int_to_f64(*a).partial_cmp(b),
        (Value::Decimal(a), Value::Integer(b)) => a.partial_cmp(&int_to_f64(*b)),
        (Value::Decimal(a), Value::Decimal(b)) => a.partial_cmp(b),
        (Value::String(a), Value::String(b)) => {
            Some(a.text().to_lowercase().cmp(&b.text().to_lowercase()))
        }
        _ => None,
    };
    ordering.ok_or_else(|| cannot_use(op.symbol(), right.kind().name()))
}

#[allow(
    clippy::cast_precision_loss,
    reason = "mixed integer/decimal arithmetic is decimal arithmetic"
)]
fn int_to_f64(n: i64) -> f64 {
    n as f64
}

fn not(_: &mut Interpreter, args: Args) -> EvalResult {
    Ok(Value::Logic(!args.value(0).is_truthy()).into())
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    reason = "tests use unwrap to panic on unexpected state"
)]
mod tests {
    use super::*;

    #[test]
    fn integer_division_stays_integer_when_exact() {
        assert!(matches!(
            int_arithmetic(BinaryOp::Divide, 6, 3),
            Ok(Value::Integer(2))
        ));
        assert!(matches!(
            int_arithmetic(BinaryOp::Divide, 7, 2),
            Ok(Value::Decimal(d)) if (d - 3.5).abs() < f64::EPSILON
        ));
    }

    #[test]
    fn overflow_and_zero_divide_raise() {
        assert_eq!(
            int_arithmetic(BinaryOp::Add, i64::MAX, 1).unwrap_err().id(),
            "overflow"
        );
        assert_eq!(
            int_arithmetic(BinaryOp::Divide, 1, 0).unwrap_err().id(),
            "zero-divide"
        );
        assert_eq!(
            int_arithmetic(BinaryOp::Divide, i64::MIN, -1).unwrap_err().id(),
            "overflow"
        );
    }

    #[test]
    fn comparison_orders_mixed_numbers() {
        assert_eq!(
            compare(BinaryOp::Less, &Value::Integer(1), &Value::Decimal(1.5)).unwrap(),
            Ordering::Less
        );
        assert!(compare(BinaryOp::Less, &Value::Integer(1), &Value::None).is_err());
    }
}
