//! Evaluation context
//!
//! Holds the `@name` bindings collected so far and the loop variables currently in
//! scope. Loop variables are set for the dynamic extent of a `for` body and
//! restored (or removed) on every exit path, errors and unwinding included.

use std::collections::HashMap;

use log::trace;

use super::bindings::Bindings;
use super::options::EvaluateOptions;
use crate::slim::value::Value;

pub struct EvaluationContext<N> {
    options: EvaluateOptions,
    bindings: Bindings<N>,
    variables: HashMap<String, Value<N>>,
}

impl<N: Clone> EvaluationContext<N> {
    pub fn new(options: EvaluateOptions) -> Self {
        Self {
            options,
            bindings: Bindings::new(),
            variables: HashMap::new(),
        }
    }

    pub fn options(&self) -> &EvaluateOptions {
        &self.options
    }

    pub fn add_binding(&mut self, name: &str, node: N) {
        trace!("binding @{}", name);
        self.bindings.add(name, node);
    }

    /// Run `body` with `name` bound to `value`, then restore the previous binding
    pub fn let_variable_in<T>(
        &mut self,
        name: &str,
        value: Value<N>,
        body: impl FnOnce(&mut Self) -> T,
    ) -> T {
        let previous = self.variables.insert(name.to_string(), value);
        let mut scope = scopeguard::guard(self, |ctx| match previous {
            Some(value) => {
                ctx.variables.insert(name.to_string(), value);
            }
            None => {
                ctx.variables.remove(name);
            }
        });
        body(&mut **scope)
    }

    /// `@name` is the most recent node bound under `name`; anything else is a
    /// loop variable. Unknown names are [`Value::Absent`].
    pub fn get_variable(&self, name: &str) -> Value<N> {
        match name.strip_prefix('@') {
            Some(binding) => self
                .bindings
                .last(binding)
                .cloned()
                .map_or(Value::Absent, Value::Node),
            None => self.variables.get(name).cloned().unwrap_or(Value::Absent),
        }
    }

    /// Apply `Ref` projections until a plain value remains
    pub fn resolve(&self, value: &Value<N>) -> Value<N> {
        let mut current = value.clone();
        while let Value::Ref(reference) = current {
            let args: Vec<Value<N>> = reference
                .names()
                .iter()
                .map(|name| self.get_variable(name))
                .collect();
            current = reference.project(&args);
        }
        current
    }

    pub fn bindings(&self) -> &Bindings<N> {
        &self.bindings
    }

    pub fn into_bindings(self) -> Bindings<N> {
        self.bindings
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::slim::value::Ref;

    type Context = EvaluationContext<u32>;

    #[test]
    fn test_let_variable_in_restores_previous() {
        let mut ctx = Context::new(EvaluateOptions::default());
        ctx.let_variable_in("x", Value::from(1), |ctx| {
            assert_eq!(ctx.get_variable("x"), Value::from(1));
            ctx.let_variable_in("x", Value::from(2), |ctx| {
                assert_eq!(ctx.get_variable("x"), Value::from(2));
            });
            assert_eq!(ctx.get_variable("x"), Value::from(1));
        });
        assert_eq!(ctx.get_variable("x"), Value::Absent);
    }

    #[test]
    fn test_let_variable_in_restores_on_error() {
        let mut ctx = Context::new(EvaluateOptions::default());
        let result: Result<(), String> =
            ctx.let_variable_in("x", Value::from(1), |_| Err("boom".to_string()));
        assert!(result.is_err());
        assert_eq!(ctx.get_variable("x"), Value::Absent);
    }

    #[test]
    fn test_binding_lookup_uses_last_node() {
        let mut ctx = Context::new(EvaluateOptions::default());
        ctx.add_binding("item", 4);
        ctx.add_binding("item", 9);
        assert_eq!(ctx.get_variable("@item"), Value::Node(9));
        assert_eq!(ctx.get_variable("@other"), Value::Absent);
        assert_eq!(ctx.get_variable("item"), Value::Absent);
    }

    #[test]
    fn test_resolve_nested_refs() {
        let mut ctx = Context::new(EvaluateOptions::default());
        let inner = Ref::new(["v"], |args: &[Value<u32>]| match &args[0] {
            Value::Number(n) => Value::from(format!("_{}_", n)),
            _ => Value::Absent,
        });
        let outer = Ref::new(Vec::<String>::new(), move |_: &[Value<u32>]| {
            Value::Ref(inner.clone())
        });
        ctx.let_variable_in("v", Value::from(3), |ctx| {
            assert_eq!(ctx.resolve(&Value::Ref(outer.clone())), Value::from("_3_"));
        });
        assert_eq!(ctx.resolve(&Value::from("plain")), Value::from("plain"));
    }
}
