//! Resolution of free-form command tokens into operations
//!
//! Tokens are matched case-insensitively against an ordered rule table and
//! the first matching rule wins. Exact-match rules (`on`, `off`, the
//! night-light family) sit ahead of the substring rules so that `on` never
//! falls through to a broader pattern.

use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

use crate::error::{ApiError, Result};
use crate::operation::{CommandRequest, Operation};

/// Commands listed in help output
pub const COMMAND_HELP: &str = "state, on, off, nl, nlon, nloff, signal, name, change=NAME";

/// One entry of the ordered resolution table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CommandRule {
    State,
    On,
    Off,
    NightLight,
    NightLightOn,
    NightLightOff,
    Signal,
    Name,
    Change,
}

impl CommandRule {
    /// Rules in evaluation order
    pub const ORDERED: [CommandRule; 9] = [
        CommandRule::State,
        CommandRule::On,
        CommandRule::Off,
        CommandRule::NightLight,
        CommandRule::NightLightOn,
        CommandRule::NightLightOff,
        CommandRule::Signal,
        CommandRule::Name,
        CommandRule::Change,
    ];

    fn pattern(self) -> &'static str {
        match self {
            CommandRule::State => r"(?i)state\z",
            CommandRule::On => r"(?i)\Aon\z",
            CommandRule::Off => r"(?i)\Aoff\z",
            CommandRule::NightLight => r"(?i)\An(?:ight)?l(?:ight)?\z",
            CommandRule::NightLightOn => r"(?i)\An(?:ight)?l(?:ight)?_?on\z",
            CommandRule::NightLightOff => r"(?i)\An(?:ight)?l(?:ight)?_?off\z",
            CommandRule::Signal => r"(?i)signal",
            CommandRule::Name => r"(?i)name",
            CommandRule::Change => r"(?i)change",
        }
    }

    /// Whether `token` satisfies this rule's predicate on its own
    pub fn matches(self, token: &str) -> bool {
        RULE_PATTERNS[self as usize].is_match(token)
    }

    fn build(self, token: &str) -> Result<Operation> {
        let operation = match self {
            CommandRule::State => Operation::QueryState,
            CommandRule::On => Operation::On,
            CommandRule::Off => Operation::Off,
            CommandRule::NightLight => Operation::QueryNightLight,
            CommandRule::NightLightOn => Operation::NightLightOn,
            CommandRule::NightLightOff => Operation::NightLightOff,
            CommandRule::Signal => Operation::QuerySignalStrength,
            CommandRule::Name => Operation::QueryFriendlyName,
            CommandRule::Change => Operation::ChangeFriendlyName {
                name: rename_argument(token)?,
            },
        };
        Ok(operation)
    }
}

// Indexed by `CommandRule as usize`; ORDERED matches declaration order.
static RULE_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    CommandRule::ORDERED
        .iter()
        .map(|rule| Regex::new(rule.pattern()).expect("command patterns are valid"))
        .collect()
});

static NAME_SEPARATOR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new("[:=]").expect("separator pattern is valid"));

/// Pull the new name out of `change=NAME` / `change:NAME`
fn rename_argument(token: &str) -> Result<String> {
    let parts: Vec<&str> = NAME_SEPARATOR.split(token).collect();
    match parts.as_slice() {
        [_, name] => Ok((*name).to_string()),
        _ => Err(ApiError::InvalidCommand(token.to_string())),
    }
}

/// The first rule in evaluation order that matches `token`
pub fn matching_rule(token: &str) -> Option<CommandRule> {
    CommandRule::ORDERED
        .into_iter()
        .find(|rule| rule.matches(token))
}

/// Resolve a single command token
pub fn resolve(token: &str) -> Result<CommandRequest> {
    let rule =
        matching_rule(token).ok_or_else(|| ApiError::UnrecognizedCommand(token.to_string()))?;
    let operation = rule.build(token)?;
    debug!(token, ?rule, %operation, "resolved command");
    Ok(CommandRequest::new(operation, token))
}

/// Resolve tokens in order, stopping at the first bad one
pub fn resolve_all<I, S>(tokens: I) -> Result<Vec<CommandRequest>>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    tokens
        .into_iter()
        .map(|token| resolve(token.as_ref()))
        .collect()
}
