//! A small arithmetic language whose programs are tuples tagged by their
//! first element, e.g. `["let", ["x", ["+", 100, 31]], ["/", "x", 15]]`.

use std::rc::{Rc};

use thiserror::{Error};

use super::model::{Name, Map, Key, Field, Tagged, Value};
use super::{Pattern, dispatch_on};

/// Variable bindings in scope.
pub type Env = Map<f64>;

/// Why an expression could not be evaluated.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EvalError {
    #[error("No such binding for {0}")]
    Unbound(Name),

    #[error("Unknown operator {0:?}")]
    UnknownOperator(Value),

    #[error("'{operator}' expects {expected}")]
    Arity { operator: &'static str, expected: &'static str },

    #[error("'let' expects a binding of the form [name, expression], not {0:?}")]
    BadBinding(Value),

    #[error("Cannot evaluate {0:?}")]
    NotAnExpression(Value),
}

type Result<T> = std::result::Result<T, EvalError>;

type Binary = fn(f64, f64) -> f64;

/// Operators that fold one or more operands from the left.
const FOLDS: [(&'static str, Binary); 2] = [
    ("+", |x, y| x + y),
    ("*", |x, y| x * y),
];

/// A form together with the bindings it is evaluated in.
struct Form {
    expr: Value,
    env: Rc<Env>,
}

impl Tagged for Form {
    fn tag(&self, field: &Field) -> Option<Key> { self.expr.tag(field) }
}

impl Form {
    /// The operands of `self`: everything after the operator.
    fn operands(&self) -> &[Value] {
        self.expr.as_slice().and_then(|s| s.get(1..)).unwrap_or(&[])
    }
}

/// Constructs the jump table for all forms.
fn compile_forms() -> Pattern<'static, Form, Result<f64>> {
    let pattern = Pattern::new()
        .case("-", subtract)
        .case("/", divide)
        .case("let", bind);
    FOLDS.iter().fold(pattern, |pattern, &(operator, op)| {
        pattern.case(operator, move |form: &Form| fold(operator, op, form.operands(), &form.env))
    })
}

thread_local! {
    static FORMS: Pattern<'static, Form, Result<f64>> = compile_forms();
}

/// Evaluate `operands` left to right, combining them with `op`.
fn fold(operator: &'static str, op: Binary, operands: &[Value], env: &Rc<Env>) -> Result<f64> {
    let Some((first, rest)) = operands.split_first() else {
        return Err(EvalError::Arity {operator, expected: "at least one operand"});
    };
    rest.iter().try_fold(eval(first, env)?, |acc, e| Ok(op(acc, eval(e, env)?)))
}

fn subtract(form: &Form) -> Result<f64> {
    match form.operands() {
        [] => Err(EvalError::Arity {operator: "-", expected: "at least one operand"}),
        [x] => Ok(-eval(x, &form.env)?),
        [x, rest @ ..] => Ok(eval(x, &form.env)? - fold("-", |x, y| x + y, rest, &form.env)?),
    }
}

fn divide(form: &Form) -> Result<f64> {
    let Some([_, x, y]) = form.expr.unpack::<3>() else {
        return Err(EvalError::Arity {operator: "/", expected: "two operands"});
    };
    Ok(eval(x, &form.env)? / eval(y, &form.env)?)
}

fn bind(form: &Form) -> Result<f64> {
    let Some([_, binding, body]) = form.expr.unpack::<3>() else {
        return Err(EvalError::Arity {operator: "let", expected: "a binding and a body"});
    };
    let Some((name, value)) = binding.unpack::<2>().and_then(|[name, value]| Some((name.as_str()?, value))) else {
        return Err(EvalError::BadBinding(binding.clone()));
    };
    let value = eval(value, &form.env)?;
    log::debug!("let {} = {}", name, value);
    let mut inner = (*form.env).clone();
    inner.insert(name.clone(), value);
    eval(body, &Rc::new(inner))
}

fn eval(expr: &Value, env: &Rc<Env>) -> Result<f64> {
    match expr {
        Value::Int(_) | Value::Float(_) => Ok(expr.as_f64().unwrap_or_default()),
        Value::Str(name) => env.get(name).copied().ok_or_else(|| EvalError::Unbound(name.clone())),
        Value::Slice(items) => {
            let form = Form {expr: expr.clone(), env: env.clone()};
            FORMS.with(|forms| dispatch_on(&form, forms, &Field::Index(0))).unwrap_or_else(|| {
                Err(EvalError::UnknownOperator(items.first().cloned().unwrap_or_default()))
            })
        },
        _ => Err(EvalError::NotAnExpression(expr.clone())),
    }
}

/// Evaluate `expr` in `env`.
///
/// Numbers evaluate to themselves and strings to the value they are bound to.
/// Tuples are forms, dispatched on their first element. Evaluation recurses
/// once per level of nesting; trees from [`read`] are at most [`MAX_DEPTH`]
/// deep.
pub fn evaluate(expr: &Value, env: &Env) -> Result<f64> {
    eval(expr, &Rc::new(env.clone()))
}

// ----------------------------------------------------------------------------

mod read;
pub use read::{read, ReadError, MAX_DEPTH};

// ----------------------------------------------------------------------------
