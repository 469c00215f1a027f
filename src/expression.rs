// src/expression.rs
use tracing::{debug, error, warn};

use crate::errors::{EvalError, Result};
use crate::filter::{parse_filter_body, FilterSpec};
use crate::parser::{check_balance, Parser};

/// Parse tree of a display option string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    /// A bare option token.
    Identifier(String),
    /// An option token whose own value must pass `filter`.
    Filter { option: String, filter: FilterSpec },
    /// `alternative` is evaluated only when `primary` resolves to nothing.
    Fallback {
        primary: Term,
        alternative: Box<Node>,
    },
    /// Comma separated segments, evaluated in order.
    Sequence(Vec<Node>),
}

/// The option a fallback group guards. An empty filter accepts every value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Term {
    pub option: String,
    pub filter: FilterSpec,
}

impl Node {
    pub fn is_empty(&self) -> bool {
        matches!(self, Node::Sequence(nodes) if nodes.is_empty())
    }

    fn term(option: &str, filter: Option<FilterSpec>) -> Node {
        match filter {
            Some(filter) if !filter.is_empty() => Node::Filter {
                option: option.to_string(),
                filter,
            },
            _ => Node::Identifier(option.to_string()),
        }
    }

    fn segment(option: &str, filter: Option<FilterSpec>, alternative: Option<Node>) -> Node {
        match alternative {
            Some(alternative) if !alternative.is_empty() => Node::Fallback {
                primary: Term {
                    option: option.to_string(),
                    filter: filter.unwrap_or_default(),
                },
                alternative: Box::new(alternative),
            },
            _ => Node::term(option, filter),
        }
    }
}

/// Parses a display option string. Fallback groups nested deeper than
/// `max_depth` are refused.
pub fn parse_expr(input: &str, max_depth: usize) -> Result<Node> {
    debug!(expression = input, "parsing display options");
    EParser { max_depth }.parse_expression(input, 0)
}

struct EParser {
    max_depth: usize,
}

impl EParser {
    fn parse_expression(&self, input: &str, depth: usize) -> Result<Node> {
        if depth > self.max_depth {
            return Err(EvalError::DepthExceeded {
                limit: self.max_depth,
            });
        }
        check_balance(input)?;
        let mut parser = Parser::new(input);
        let mut segments = Vec::new();
        loop {
            parser.skip_ws();
            if parser.eof() || !self.parse_segment(&mut parser, depth, &mut segments)? {
                break;
            }
        }
        Ok(Node::Sequence(segments))
    }

    /// Parses one segment into `out`. Returns whether a comma announced another one.
    fn parse_segment(
        &self,
        parser: &mut Parser<'_>,
        depth: usize,
        out: &mut Vec<Node>,
    ) -> Result<bool> {
        let (option, next) = parser.take_identifier();
        let option = option.trim();
        let first = match next {
            None => {
                push_identifier(out, option);
                return Ok(false);
            }
            Some(',') => {
                push_identifier(out, option);
                parser.consume_char(',');
                return Ok(true);
            }
            Some(c) => c,
        };

        let mut filter = None;
        let mut alternative = None;
        let mut complete = self.take_group(parser, first, depth, &mut filter, &mut alternative)?;
        if complete {
            parser.skip_ws();
            let second = if first == '[' { '(' } else { '[' };
            if parser.peek_char() == Some(second) {
                complete =
                    self.take_group(parser, second, depth, &mut filter, &mut alternative)?;
            }
        }
        out.push(Node::segment(option, filter, alternative));
        if !complete {
            return Ok(false);
        }

        parser.skip_ws();
        if parser.consume_char(',') {
            return Ok(true);
        }
        if !parser.eof() {
            warn!(trailing = parser.rest(), "ignoring text after segment");
            parser.skip_to_end();
        }
        Ok(false)
    }

    /// Consumes a `(...)` filter or `[...]` fallback group. Returns `false` when
    /// the group never closes.
    fn take_group(
        &self,
        parser: &mut Parser<'_>,
        open: char,
        depth: usize,
        filter: &mut Option<FilterSpec>,
        alternative: &mut Option<Node>,
    ) -> Result<bool> {
        let close = if open == '[' { ']' } else { ')' };
        let body = match parser.capture_group(open, close) {
            Ok(body) => body,
            Err(e) => {
                error!(rest = parser.rest(), error = %e, "group mismatch");
                parser.skip_to_end();
                return Ok(false);
            }
        };
        if open == '(' {
            *filter = Some(parse_filter_body(body));
            return Ok(true);
        }
        let body = body.trim();
        if body.is_empty() {
            return Ok(true);
        }
        *alternative = Some(match self.parse_expression(body, depth + 1) {
            Err(e @ EvalError::StructuralImbalance { .. }) => {
                error!(fallback = body, error = %e, "dropping fallback");
                Node::Sequence(Vec::new())
            }
            other => other?,
        });
        Ok(true)
    }
}

fn push_identifier(out: &mut Vec<Node>, option: &str) {
    if !option.is_empty() {
        out.push(Node::Identifier(option.to_string()));
    }
}
