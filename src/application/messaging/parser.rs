//! Command parser - Splits command-form text into keyword, input and args

use crate::domain::traits::Utilities;

/// A parsed command line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandLine {
    /// First token, lower-cased
    pub keyword: String,
    /// Text after the keyword, trimmed
    pub input: String,
    /// All tokens of the post-prefix text, keyword included
    pub args: Vec<String>,
}

pub struct CommandParser<'a> {
    utilities: &'a dyn Utilities,
}

impl<'a> CommandParser<'a> {
    pub fn new(utilities: &'a dyn Utilities) -> Self {
        Self { utilities }
    }

    /// `None` when the text is not in command form or has no keyword
    pub fn parse(&self, text: &str) -> Option<CommandLine> {
        if !self.utilities.is_command(text) {
            return None;
        }

        let body = self.utilities.strip_prefix(text);
        let args: Vec<String> = body.split_whitespace().map(str::to_string).collect();
        let first = args.first()?;

        let input = body.trim_start()[first.len()..].trim().to_string();

        Some(CommandLine {
            keyword: first.to_lowercase(),
            input,
            args,
        })
    }
}
