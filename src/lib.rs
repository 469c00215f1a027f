pub mod attributes;
pub mod compiler;
pub mod context;
pub mod engine;
pub mod errors;
pub mod expression;
pub mod filter;
mod comparison;
mod parser;

use tracing::{debug, error};

use attributes::{AttributeStore, OptionNameMap, OptionTable, ZoneChecker};
use context::Context;
use engine::{Engine, ResolutionState};
use errors::Result;
use expression::Node;

/// Builds a display label from a display option string.
///
/// Borrowing the three collaborators keeps one evaluator cheap to create per
/// update; each call to [`Evaluator::eval`] starts from a fresh
/// [`ResolutionState`].
pub struct Evaluator<'a> {
    ctx: Context,
    attributes: &'a dyn AttributeStore,
    zone: &'a dyn ZoneChecker,
    options: &'a dyn OptionNameMap,
}

impl<'a> Evaluator<'a> {
    pub fn new(
        attributes: &'a dyn AttributeStore,
        zone: &'a dyn ZoneChecker,
        options: &'a dyn OptionNameMap,
    ) -> Self {
        Self {
            ctx: Context::default(),
            attributes,
            zone,
            options,
        }
    }

    pub fn with_context(mut self, ctx: Context) -> Self {
        self.ctx = ctx;
        self
    }

    pub fn context(&self) -> &Context {
        &self.ctx
    }

    /// Parses without evaluating; structural problems come back as errors.
    pub fn parse(&self, expr: &str) -> Result<Node> {
        expression::parse_expr(expr, self.ctx.max_depth)
    }

    /// Resolves `expr` into its fragments without joining them.
    pub async fn resolve(&self, expr: &str) -> Result<ResolutionState> {
        let ast = self.parse(expr)?;
        let engine = Engine::new(self.attributes, self.zone, self.options);
        let mut state = ResolutionState::new();
        engine.evaluate(&ast, &mut state).await;
        debug!(fragments = ?state.fragments, "resolved display options");
        Ok(state)
    }

    /// Evaluates `expr`, returning an error instead of the empty label.
    pub async fn try_eval(&self, expr: &str) -> Result<String> {
        let state = self.resolve(expr).await?;
        Ok(compiler::compile(&state, self.ctx.street_spacing))
    }

    /// Evaluates `expr`; a malformed expression logs and yields `""`.
    pub async fn eval(&self, expr: &str) -> String {
        match self.try_eval(expr).await {
            Ok(label) => label,
            Err(e) => {
                error!(expression = expr, error = %e, "dropping display options");
                String::new()
            }
        }
    }
}

/// Convenience: evaluate with the built-in option table and default context.
pub async fn eval(expr: &str, attributes: &dyn AttributeStore, zone: &dyn ZoneChecker) -> String {
    let options = OptionTable::with_builtins();
    Evaluator::new(attributes, zone, &options).eval(expr).await
}

pub use attributes::{Attributes, FixedZone, TrackerZone};
pub use errors::EvalError;
