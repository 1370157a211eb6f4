// Licensed under the Apache-2.0 license

//! Grammar for registration macro invocations in C sources.
//!
//! A line is classified in two steps. The call shape is
//!
//! ```text
//! call := ws* NAME "(" any+ ")" any*
//! ```
//!
//! and lines that do not have it are [`MacroCall::NotAMacroCall`]. The text
//! after the opening parenthesis is then handed to an argument grammar such
//! as [`bare_ident`] or [`register_components`]; if that fails the line is
//! [`MacroCall::MalformedArgs`].

use winnow::ascii::multispace0;
use winnow::combinator::terminated;
use winnow::prelude::*;
use winnow::token::{literal, take_while};
use winnow::ModalResult;

/// Outcome of matching one source line against a registration macro.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MacroCall<T> {
    /// The line invokes the macro and its arguments parsed.
    Matched(T),
    NotAMacroCall,
    /// The line invokes the macro but the arguments do not fit the grammar.
    MalformedArgs,
}

fn is_word(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

fn is_dotted(c: char) -> bool {
    is_word(c) || c == '.'
}

/// Returns the text following `NAME(` if `line` has the call shape.
fn call_open<'s>(line: &'s str, name: &str) -> Option<&'s str> {
    let mut input = line;
    let opened: ModalResult<()> = (multispace0, literal(name), '(')
        .void()
        .parse_next(&mut input);
    opened.ok()?;

    // At least one character, then a closing parenthesis somewhere after it.
    let mut tail = input.chars();
    tail.next()?;
    tail.as_str().contains(')').then_some(input)
}

/// Classify `line` as an invocation of macro `name` whose arguments are
/// parsed by `args`.
pub fn classify<T>(
    line: &str,
    name: &str,
    mut args: impl FnMut(&mut &str) -> ModalResult<T>,
) -> MacroCall<T> {
    let Some(mut input) = call_open(line, name) else {
        return MacroCall::NotAMacroCall;
    };
    match args(&mut input) {
        Ok(value) => MacroCall::Matched(value),
        Err(_) => MacroCall::MalformedArgs,
    }
}

/// A single identifier directly followed by the closing parenthesis:
/// `(name)`. Whitespace inside the parentheses is not accepted.
pub fn bare_ident(input: &mut &str) -> ModalResult<String> {
    terminated(take_while(1.., is_word), ')')
        .map(|ident: &str| ident.to_string())
        .parse_next(input)
}

/// The first two arguments of a register definition, concatenated:
/// `(hal.PWM_frequency,,` or `(pm.probe, _speed,`.
///
/// The first component must not be empty, the second may be.
pub fn register_components(input: &mut &str) -> ModalResult<String> {
    (
        take_while(1.., is_dotted),
        ',',
        multispace0,
        take_while(0.., is_dotted),
        ',',
    )
        .map(|(first, _, _, second, _): (&str, _, _, &str, _)| format!("{first}{second}"))
        .parse_next(input)
}
