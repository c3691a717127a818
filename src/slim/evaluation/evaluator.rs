//! Evaluator
//!
//! Every AST node evaluates to a sequence of builder nodes. Slot values are
//! resolved (see [`EvaluationContext::resolve`]) and classified only at the
//! position where they are used.

use log::{debug, trace};

use super::context::EvaluationContext;
use super::error::EvaluationError;
use super::options::EvaluateOptions;
use super::result::Evaluation;
use crate::slim::ast::{Attribute, Document, Element, ElementBase, ForBlock, IfBlock, Node};
use crate::slim::builder::TreeBuilder;
use crate::slim::value::{format_number, Value};

type EvalResult<T> = Result<T, EvaluationError>;

impl<N: Clone> Document<N> {
    /// Evaluate the document against `builder` with a fresh context
    pub fn evaluate<B: TreeBuilder<Node = N>>(
        &self,
        builder: &mut B,
        options: &EvaluateOptions,
    ) -> EvalResult<Evaluation<N>> {
        let mut ctx = EvaluationContext::new(options.clone());
        let nodes = evaluate_all(&self.children, builder, &mut ctx)?;
        let bindings = ctx.into_bindings();
        debug!(
            "evaluated {} top-level nodes, {} bindings",
            nodes.len(),
            bindings.len()
        );
        Ok(Evaluation::new(nodes, bindings))
    }
}

trait Evaluate<N> {
    fn evaluate<B: TreeBuilder<Node = N>>(
        &self,
        builder: &mut B,
        ctx: &mut EvaluationContext<N>,
    ) -> EvalResult<Vec<N>>;
}

fn evaluate_all<N: Clone, B: TreeBuilder<Node = N>>(
    nodes: &[Node<N>],
    builder: &mut B,
    ctx: &mut EvaluationContext<N>,
) -> EvalResult<Vec<N>> {
    let mut output = Vec::new();
    for node in nodes {
        output.extend(node.evaluate(builder, ctx)?);
    }
    Ok(output)
}

impl<N: Clone> Evaluate<N> for Node<N> {
    fn evaluate<B: TreeBuilder<Node = N>>(
        &self,
        builder: &mut B,
        ctx: &mut EvaluationContext<N>,
    ) -> EvalResult<Vec<N>> {
        match self {
            Node::Element(element) => element.evaluate(builder, ctx),
            Node::Text(text) => Ok(vec![builder.create_text(text)]),
            Node::NewLine => Ok(vec![builder.create_text("\n")]),
            Node::InterpolatedText(value) => {
                let mut output = Vec::new();
                text_nodes(&ctx.resolve(value), builder, ctx, &mut output)?;
                Ok(output)
            }
            Node::If(block) => block.evaluate(builder, ctx),
            Node::For(block) => block.evaluate(builder, ctx),
        }
    }
}

/// Text position: strings and numbers become text, absent becomes empty text,
/// nodes pass through and lists are flattened.
fn text_nodes<N: Clone, B: TreeBuilder<Node = N>>(
    value: &Value<N>,
    builder: &mut B,
    ctx: &EvaluationContext<N>,
    output: &mut Vec<N>,
) -> EvalResult<()> {
    match value {
        Value::Str(text) => output.push(builder.create_text(text)),
        Value::Number(n) => output.push(builder.create_text(&format_number(*n))),
        Value::Absent => output.push(builder.create_text("")),
        Value::Node(node) => output.push(node.clone()),
        Value::List(items) => {
            for item in items {
                text_nodes(&ctx.resolve(item), builder, ctx, output)?;
            }
        }
        other => return Err(EvaluationError::InvalidTextValue(other.to_string())),
    }
    Ok(())
}

/// Element base position: strings are tag names, nodes pass through and lists
/// are flattened.
fn element_nodes<N: Clone, B: TreeBuilder<Node = N>>(
    value: &Value<N>,
    builder: &mut B,
    ctx: &EvaluationContext<N>,
    output: &mut Vec<N>,
) -> EvalResult<()> {
    match value {
        Value::Str(tag_name) => output.push(builder.create_element(tag_name)),
        Value::Node(node) => output.push(node.clone()),
        Value::List(items) => {
            for item in items {
                element_nodes(&ctx.resolve(item), builder, ctx, output)?;
            }
        }
        other => return Err(EvaluationError::InvalidElementBase(other.to_string())),
    }
    Ok(())
}

struct EventBinding<N> {
    event: String,
    callback: Value<N>,
    options: Option<Value<N>>,
}

/// Final attribute list of an element, in first-written order, and its events
struct AttributeSet<N> {
    attributes: Vec<(String, String)>,
    events: Vec<EventBinding<N>>,
}

impl<N: Clone> AttributeSet<N> {
    fn build(written: &[Attribute<N>], ctx: &EvaluationContext<N>) -> EvalResult<Self> {
        let mut set = Self {
            attributes: Vec::new(),
            events: Vec::new(),
        };
        for attribute in written {
            match attribute {
                Attribute::Pair { name, value } => {
                    set.add(ctx.resolve(name), ctx.resolve(value), ctx)?;
                }
                Attribute::Splat(value) => match ctx.resolve(value) {
                    Value::Map(entries) => {
                        for (name, value) in entries {
                            set.add(Value::Str(name), ctx.resolve(&value), ctx)?;
                        }
                    }
                    other => return Err(EvaluationError::InvalidSplat(other.to_string())),
                },
            }
        }
        Ok(set)
    }

    fn add(&mut self, name: Value<N>, value: Value<N>, ctx: &EvaluationContext<N>) -> EvalResult<()> {
        let name = match name {
            Value::Str(name) => name,
            other => return Err(EvaluationError::InvalidAttributeName(other.to_string())),
        };

        if let Some(event) = name.strip_prefix('!') {
            let (callback, options) = match value {
                Value::List(items) => {
                    let mut items = items.iter().map(|item| ctx.resolve(item));
                    (items.next().unwrap_or(Value::Absent), items.next())
                }
                other => (other, None),
            };
            self.events.push(EventBinding {
                event: event.to_string(),
                callback,
                options,
            });
            return Ok(());
        }

        let text = match value {
            Value::Bool(true) => String::new(),
            Value::Bool(false) | Value::Absent => return Ok(()),
            Value::Str(text) => text,
            Value::Number(n) => format_number(n),
            other => {
                return Err(EvaluationError::InvalidAttributeValue {
                    name,
                    value: other.to_string(),
                })
            }
        };

        match self.attributes.iter_mut().find(|(existing, _)| *existing == name) {
            Some((_, merged)) => {
                merged.push(' ');
                merged.push_str(&text);
            }
            None => self.attributes.push((name, text)),
        }
        Ok(())
    }
}

impl<N: Clone> Evaluate<N> for Element<N> {
    fn evaluate<B: TreeBuilder<Node = N>>(
        &self,
        builder: &mut B,
        ctx: &mut EvaluationContext<N>,
    ) -> EvalResult<Vec<N>> {
        let elements = match &self.base {
            ElementBase::Tag(tag_name) => vec![builder.create_element(tag_name)],
            ElementBase::Slot(value) => {
                let mut output = Vec::new();
                element_nodes(&ctx.resolve(value), builder, ctx, &mut output)?;
                output
            }
        };

        for element in &elements {
            let set = AttributeSet::build(&self.attributes, ctx)?;
            for (name, value) in &set.attributes {
                builder.set_attribute(element, name, value);
            }
            for binding in &set.events {
                builder.add_event_listener(
                    element,
                    &binding.event,
                    &binding.callback,
                    binding.options.as_ref(),
                );
            }

            if let Some(ref_name) = &self.ref_name {
                let name = match ctx.resolve(ref_name) {
                    Value::Str(name) => name,
                    other => return Err(EvaluationError::InvalidRefName(other.to_string())),
                };
                if let Some(attribute) = &ctx.options().attr_for_ref_name {
                    builder.set_attribute(element, attribute, &name);
                }
                ctx.add_binding(&name, element.clone());
            }

            if !self.children.is_empty() {
                builder.remove_all_children(element);
                for child in &self.children {
                    for node in child.evaluate(builder, ctx)? {
                        builder.append_child(element, &node);
                    }
                }
            }
        }

        Ok(elements)
    }
}

impl<N: Clone> Evaluate<N> for IfBlock<N> {
    fn evaluate<B: TreeBuilder<Node = N>>(
        &self,
        builder: &mut B,
        ctx: &mut EvaluationContext<N>,
    ) -> EvalResult<Vec<N>> {
        let branch = if ctx.resolve(&self.condition).is_truthy() {
            &self.then_branch
        } else {
            &self.else_branch
        };
        evaluate_all(branch, builder, ctx)
    }
}

impl<N: Clone> Evaluate<N> for ForBlock<N> {
    fn evaluate<B: TreeBuilder<Node = N>>(
        &self,
        builder: &mut B,
        ctx: &mut EvaluationContext<N>,
    ) -> EvalResult<Vec<N>> {
        let items = match ctx.resolve(&self.iterable) {
            Value::List(items) => items,
            Value::Str(text) => text.chars().map(|c| Value::Str(c.to_string())).collect(),
            other => return Err(EvaluationError::NotIterable(other.to_string())),
        };

        let mut output = Vec::new();
        for (index, item) in items.into_iter().enumerate() {
            trace!("for {} iteration {}", self.variable, index);
            let nodes = ctx.let_variable_in(&self.variable, item, |ctx| {
                evaluate_all(&self.children, builder, ctx)
            })?;
            output.extend(nodes);
        }
        Ok(output)
    }
}
