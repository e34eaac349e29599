use std::collections::{HashMap};
use std::{fmt};

use super::model::{Key, Field, Tagged};

/// A function that handles one variant of a tagged `T`.
pub type Handler<'a, T, R> = Box<dyn Fn(&T) -> R + 'a>;

/// A jump table from discriminant values to [`Handler`]s.
///
/// A `Pattern` need not cover every variant. A key can also be registered as
/// vacant, which behaves exactly like a key that is not registered.
/// Inputs with no discriminant at all go to the [`Self::untagged()`] case, if
/// there is one.
pub struct Pattern<'a, T: ?Sized, R> {
    cases: HashMap<Key, Option<Handler<'a, T, R>>>,
    untagged: Option<Handler<'a, T, R>>,
}

impl<'a, T: ?Sized, R> Pattern<'a, T, R> {
    pub fn new() -> Self { Self {cases: HashMap::new(), untagged: None} }

    /// Handle variant `key` with `handler`, replacing any previous case.
    pub fn case(mut self, key: impl Into<Key>, handler: impl Fn(&T) -> R + 'a) -> Self {
        self.insert(key, handler);
        self
    }

    /// Handle inputs that have no discriminant with `handler`.
    pub fn untagged(mut self, handler: impl Fn(&T) -> R + 'a) -> Self {
        self.untagged = Some(Box::new(handler));
        self
    }

    /// Register `key` without a handler.
    pub fn vacant(mut self, key: impl Into<Key>) -> Self {
        self.cases.insert(key.into(), None);
        self
    }

    /// Handle variant `key` with `handler`, returning `true` if it replaced
    /// an existing case.
    pub fn insert(&mut self, key: impl Into<Key>, handler: impl Fn(&T) -> R + 'a) -> bool {
        self.cases.insert(key.into(), Some(Box::new(handler))).is_some()
    }

    /// Forget variant `key`, returning `true` if it was registered.
    pub fn remove(&mut self, key: &Key) -> bool { self.cases.remove(key).is_some() }

    /// Returns the handler for `key`, if there is one.
    pub fn get(&self, key: &Key) -> Option<&(dyn Fn(&T) -> R + 'a)> {
        self.cases.get(key)?.as_deref()
    }

    /// Returns `true` if `key` has a handler.
    pub fn contains(&self, key: &Key) -> bool { self.get(key).is_some() }

    /// The registered keys, including vacant ones, in no particular order.
    pub fn keys(&self) -> impl Iterator<Item=&Key> { self.cases.keys() }

    pub fn len(&self) -> usize { self.cases.len() }

    pub fn is_empty(&self) -> bool { self.cases.is_empty() }
}

impl<'a, T: ?Sized, R> std::default::Default for Pattern<'a, T, R> {
    fn default() -> Self { Self::new() }
}

impl<'a, T: ?Sized, R> fmt::Debug for Pattern<'a, T, R> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let mut keys: Vec<&Key> = self.keys().collect();
        keys.sort();
        let mut f = f.debug_tuple("Pattern");
        f.field(&keys);
        if self.untagged.is_some() { f.field(&"untagged"); }
        f.finish()
    }
}

// ----------------------------------------------------------------------------

/// Pass `input` to the case of `pattern` that matches its `kind` field.
///
/// Equivalent to [`dispatch_on`] with [`Field::default()`].
pub fn dispatch<T, R>(input: &T, pattern: &Pattern<T, R>) -> Option<R>
where T: Tagged + ?Sized {
    dispatch_on(input, pattern, &Field::default())
}

/// Pass `input` to the case of `pattern` that matches its `discriminant`.
///
/// Returns `None` without calling anything if `pattern` has no handler for
/// the discriminant of `input`, or if `input` has no discriminant and
/// `pattern` has no untagged case. Otherwise returns whatever the handler
/// returns; a panicking handler unwinds through this function untouched.
pub fn dispatch_on<T, R>(input: &T, pattern: &Pattern<T, R>, discriminant: &Field) -> Option<R>
where T: Tagged + ?Sized {
    let Some(key) = input.tag(discriminant) else {
        log::trace!("No discriminant at {}", discriminant);
        return pattern.untagged.as_ref().map(|handler| handler(input));
    };
    let Some(handler) = pattern.get(&key) else {
        log::trace!("No case for {} in {:?}", key, pattern);
        return None;
    };
    Some(handler(input))
}

// ----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use std::cell::{Cell};
    use std::panic::{catch_unwind, AssertUnwindSafe};

    use proptest::prelude::*;

    use super::*;
    use crate::model::{Value};

    fn shape(kind: &str, size: i64) -> Value {
        Value::record([("kind", Value::from(kind)), ("size", Value::from(size))])
    }

    fn size(v: &Value) -> i64 {
        match v.as_map().and_then(|m| m.get("size")) {
            Some(Value::Int(i)) => *i,
            _ => 0,
        }
    }

    fn area() -> Pattern<'static, Value, i64> {
        Pattern::new()
            .case("square", |v: &Value| size(v) * size(v))
            .case("line", |_: &Value| 0)
    }

    #[test]
    fn calls_matching_case() {
        assert_eq!(dispatch(&shape("square", 3), &area()), Some(9));
        assert_eq!(dispatch(&shape("line", 3), &area()), Some(0));
    }

    #[test]
    fn missing_case_calls_nothing() {
        let calls = Cell::new(0);
        let pattern = Pattern::new()
            .case("square", |_: &Value| calls.set(calls.get() + 1));
        assert_eq!(dispatch(&shape("circle", 1), &pattern), None);
        assert_eq!(calls.get(), 0);
        assert_eq!(dispatch(&shape("square", 1), &pattern), Some(()));
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn missing_discriminant_is_a_miss() {
        let untagged = Value::record([("size", Value::from(2))]);
        assert_eq!(dispatch(&untagged, &area()), None);
        assert_eq!(dispatch(&Value::from(2), &area()), None);
    }

    #[test]
    fn untagged_case() {
        let pattern = area().untagged(|v: &Value| -size(v));
        let untagged = Value::record([("size", Value::from(2))]);
        assert_eq!(dispatch(&untagged, &pattern), Some(-2));
        assert_eq!(dispatch(&shape("square", 3), &pattern), Some(9));
        assert_eq!(dispatch(&shape("circle", 3), &pattern), None);
        assert_eq!(format!("{:?}", pattern), "Pattern([Str(\"line\"), Str(\"square\")], \"untagged\")");
    }

    #[test]
    fn fractional_discriminants() {
        let pattern = Pattern::new()
            .case(1.5, |_: &Value| "one and a half")
            .case(1, |_: &Value| "one");
        let record = |kind: f64| Value::record([("kind", Value::from(kind))]);
        assert_eq!(dispatch(&record(1.5), &pattern), Some("one and a half"));
        assert_eq!(dispatch(&record(1.0), &pattern), Some("one"));
        assert_eq!(dispatch(&record(1.25), &pattern), None);
    }

    #[test]
    fn vacant_case_is_a_miss() {
        let pattern = area().vacant("square");
        assert_eq!(pattern.len(), 2);
        assert!(!pattern.contains(&Key::from("square")));
        assert_eq!(dispatch(&shape("square", 3), &pattern), None);
    }

    #[test]
    fn custom_discriminant() {
        let pattern = Pattern::new()
            .case("a", |_: &Value| "a")
            .case("b", |_: &Value| "b");
        let mut v = Value::record([("type", Value::from("a")), ("kind", Value::from("b"))]);
        assert_eq!(dispatch_on(&v, &pattern, &Field::from("type")), Some("a"));
        assert_eq!(dispatch(&v, &pattern), Some("b"));
        v = Value::record([("type", Value::from("a")), ("kind", Value::from("zzz"))]);
        assert_eq!(dispatch_on(&v, &pattern, &Field::from("type")), Some("a"));
    }

    #[test]
    fn positional_and_numeric_discriminants() {
        let pattern = Pattern::new()
            .case(0, |v: &Value| v.as_slice().map_or(0, |s| s.len()))
            .case("0", |_: &Value| 100);
        let tuple = Value::from([Value::from(0), Value::from("x")]);
        assert_eq!(dispatch_on(&tuple, &pattern, &Field::Index(0)), Some(2));
        let tuple = Value::from([Value::from("0")]);
        assert_eq!(dispatch_on(&tuple, &pattern, &Field::Index(0)), Some(100));
    }

    #[test]
    fn errors_pass_through() {
        let pattern: Pattern<Value, Result<i64, String>> = Pattern::new()
            .case("bad", |_: &Value| Err("bad shape".to_string()));
        let outer = || -> Result<Option<i64>, String> {
            dispatch(&shape("bad", 0), &pattern).transpose()
        };
        assert_eq!(outer(), Err("bad shape".to_string()));
    }

    #[test]
    fn panics_pass_through() {
        let pattern = Pattern::new()
            .case("boom", |_: &Value| -> i64 { panic!("boom") });
        let result = catch_unwind(AssertUnwindSafe(|| dispatch(&shape("boom", 0), &pattern)));
        let payload = result.expect_err("should panic");
        assert_eq!(payload.downcast_ref::<&str>(), Some(&"boom"));
    }

    #[test]
    fn insert_and_remove() {
        let mut pattern = area();
        assert!(pattern.insert("square", |_: &Value| -1));
        assert!(!pattern.insert("circle", |_: &Value| 3));
        assert_eq!(dispatch(&shape("square", 5), &pattern), Some(-1));
        assert!(pattern.remove(&Key::from("circle")));
        assert!(!pattern.remove(&Key::from("circle")));
        assert_eq!(format!("{:?}", pattern), "Pattern([Str(\"line\"), Str(\"square\")])");
    }

    /// A statically typed variant set can dispatch too.
    enum Shape { Square(i64), Circle }

    impl Tagged for Shape {
        fn tag(&self, _: &Field) -> Option<Key> {
            Some(match self { Shape::Square(_) => "square", Shape::Circle => "circle" }.into())
        }
    }

    #[test]
    fn typed_variants() {
        let pattern = Pattern::new()
            .case("square", |s: &Shape| if let Shape::Square(n) = s { n * n } else { unreachable!() });
        assert_eq!(dispatch(&Shape::Square(4), &pattern), Some(16));
        assert_eq!(dispatch(&Shape::Circle, &pattern), None);
    }

    proptest! {
        #[test]
        fn dispatch_equals_direct_call(kind in "[a-c]", n in any::<i32>()) {
            let pattern: Pattern<Value, String> = ["a", "b", "c"].into_iter()
                .fold(Pattern::new(), |p, k| p.case(k, move |v: &Value| format!("{}:{}", k, size(v))));
            let v = shape(&kind, n.into());
            let direct = pattern.get(&Key::from(kind.as_str())).map(|h| h(&v));
            prop_assert_eq!(dispatch(&v, &pattern), direct);
        }

        #[test]
        fn unknown_kinds_miss(kind in "[x-z]{1,4}", n in any::<i32>()) {
            prop_assert_eq!(dispatch(&shape(&kind, n.into()), &area()), None);
        }
    }
}
