//! The input-formatting rule engine.
//!
//! Rules run in ascending priority on the way into the cipher, peeling
//! passthrough characters, prefixes, and suffixes off the working string
//! and recording what each rule removed. The residue is the core that the
//! Feistel actually sees. After the cipher, the recorded steps replay in
//! reverse to splice the untouched material back around the core.

use ffx::alphabet::Alphabet;

use crate::dataset::Rule;
use crate::error::{Error, Result};

/// One position of a passthrough format template: either a character kept
/// verbatim or a slot to be filled from the core.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Slot {
    Keep(char),
    Fill,
}

/// What a rule removed on the way in, everything its reversal needs.
#[derive(Debug, Clone)]
enum Applied {
    Passthrough { template: Vec<Slot> },
    Prefix { buffer: Vec<char> },
    Suffix { buffer: Vec<char> },
}

/// The outcome of running all rules over one input string.
#[derive(Debug, Clone)]
pub(crate) struct ParsedInput {
    steps: Vec<Applied>,
    core: Vec<char>,
}

impl ParsedInput {
    pub(crate) fn core(&self) -> &[char] {
        &self.core
    }
}

/// Run the dataset's rules over `input`, in ascending priority.
///
/// When no passthrough rule is declared, the dataset's legacy
/// `passthrough` string acts as an implicit rule with priority 1. The
/// residual core is validated against `cipher_alphabet` (the input
/// alphabet on encrypt, the output alphabet on decrypt).
pub(crate) fn parse(
    input: &str,
    rules: &[Rule],
    default_passthrough: &str,
    cipher_alphabet: &Alphabet,
) -> Result<ParsedInput> {
    let mut active: Vec<Rule> = rules.to_vec();
    if !active.iter().any(|r| matches!(r, Rule::Passthrough { .. })) {
        active.insert(
            0,
            Rule::Passthrough {
                value: default_passthrough.to_string(),
                priority: 1,
            },
        );
    }
    active.sort_by_key(Rule::priority);

    let mut working: Vec<char> = input.chars().collect();
    let mut steps = Vec::with_capacity(active.len());

    for rule in &active {
        match rule {
            Rule::Passthrough { value, .. } => {
                let mut template = Vec::with_capacity(working.len());
                let mut rest = Vec::new();
                for c in working {
                    if value.contains(c) {
                        template.push(Slot::Keep(c));
                    } else {
                        template.push(Slot::Fill);
                        rest.push(c);
                    }
                }
                steps.push(Applied::Passthrough { template });
                working = rest;
            }
            Rule::Prefix { value, .. } => {
                let n = (*value).min(working.len());
                let rest = working.split_off(n);
                steps.push(Applied::Prefix { buffer: working });
                working = rest;
            }
            Rule::Suffix { value, .. } => {
                let n = (*value).min(working.len());
                let buffer = working.split_off(working.len() - n);
                steps.push(Applied::Suffix { buffer });
            }
        }
    }

    for &c in &working {
        if !cipher_alphabet.contains(c) {
            return Err(Error::InvalidCharacter(c));
        }
    }

    Ok(ParsedInput { steps, core: working })
}

/// Replay the recorded steps in reverse, splicing `core` back into the
/// non-cryptographic material. Fails with `FormatMismatch` when the core
/// has characters left over or runs short.
pub(crate) fn reassemble(
    parsed: &ParsedInput,
    core: Vec<char>,
) -> Result<String> {
    let mut s = core;

    for step in parsed.steps.iter().rev() {
        match step {
            Applied::Passthrough { template } => {
                let mut out = Vec::with_capacity(template.len());
                let mut fill = s.into_iter();
                for slot in template {
                    match slot {
                        Slot::Keep(c) => out.push(*c),
                        Slot::Fill => out.push(
                            fill.next().ok_or(Error::FormatMismatch)?,
                        ),
                    }
                }
                if fill.next().is_some() {
                    return Err(Error::FormatMismatch);
                }
                s = out;
            }
            Applied::Prefix { buffer } => {
                let mut out = buffer.clone();
                out.extend(s);
                s = out;
            }
            Applied::Suffix { buffer } => {
                s.extend(buffer.iter().copied());
            }
        }
    }

    Ok(s.into_iter().collect())
}
