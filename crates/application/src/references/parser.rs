//! Reference parser for `#variable[:argument]` syntax
//!
//! Parses chat text to extract variable references with their positions.

use std::iter::Peekable;
use std::ops::Range;

use ctxvar_domain::VariableRef;

/// Represents a parsed variable reference in a string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariableReference {
    /// The variable name (without `#`).
    pub name: String,

    /// The argument following `:`, if any.
    pub arg: Option<String>,

    /// Byte range in the original string where this reference appears.
    pub span: Range<usize>,
}

impl VariableReference {
    /// Creates a new variable reference.
    #[must_use]
    pub fn new(name: impl Into<String>, arg: Option<String>, span: Range<usize>) -> Self {
        Self {
            name: name.into(),
            arg,
            span,
        }
    }

    /// Converts the reference into a registry lookup.
    #[must_use]
    pub fn to_variable_ref(&self) -> VariableRef {
        match &self.arg {
            Some(arg) => VariableRef::with_arg(&self.name, arg),
            None => VariableRef::Name(self.name.clone()),
        }
    }
}

fn is_name_start(ch: char) -> bool {
    ch.is_alphabetic() || ch == '_'
}

fn is_name_char(ch: char) -> bool {
    ch.is_alphanumeric() || ch == '_' || ch == '-'
}

/// Byte length of the name at the start of `text`. A name never ends in `-`.
fn name_len(text: &str) -> usize {
    let mut len = 0;
    for (i, ch) in text.char_indices() {
        let valid = if i == 0 {
            is_name_start(ch)
        } else {
            is_name_char(ch)
        };
        if !valid {
            break;
        }
        len = i + ch.len_utf8();
    }
    text[..len].trim_end_matches('-').len()
}

/// Strips sentence punctuation from the end of an argument.
///
/// A closing parenthesis is kept when it closes one opened in the argument.
fn trim_argument(raw: &str) -> &str {
    let mut arg = raw;
    loop {
        arg = arg.trim_end_matches(['.', ',', ';', '!', '?']);
        match arg.strip_suffix(')') {
            Some(rest) if arg.matches('(').count() < arg.matches(')').count() => arg = rest,
            _ => return arg,
        }
    }
}

/// Parses a string and extracts all variable references.
///
/// A reference starts with `#` at the beginning of the input or after
/// whitespace, followed by a name. An argument follows a `:` and runs to the
/// next whitespace. Trailing sentence punctuation is not part of the argument.
///
/// # Examples
///
/// ```
/// use ctxvar_application::references::parser::parse_references;
///
/// let refs = parse_references("see #file:/a/b.txt, and issue#12");
/// assert_eq!(refs.len(), 1);
/// assert_eq!(refs[0].arg.as_deref(), Some("/a/b.txt"));
/// ```
#[must_use]
pub fn parse_references(input: &str) -> Vec<VariableReference> {
    let mut references = Vec::new();
    let mut chars = input.char_indices().peekable();
    let mut previous: Option<char> = None;

    while let Some((start, ch)) = chars.next() {
        let at_boundary = previous.is_none_or(char::is_whitespace);
        previous = Some(ch);
        if ch != '#' || !at_boundary {
            continue;
        }

        // Name
        let name_start = start + 1;
        let mut end = name_start + name_len(&input[name_start..]);
        if end == name_start {
            continue;
        }
        let name = &input[name_start..end];
        skip_to(&mut chars, &mut previous, end);

        // Optional argument
        let mut arg = None;
        if let Some(&(colon, ':')) = chars.peek() {
            let arg_start = colon + 1;
            let arg_end = input[arg_start..]
                .find(char::is_whitespace)
                .map_or(input.len(), |offset| arg_start + offset);
            let raw = trim_argument(&input[arg_start..arg_end]);
            if !raw.is_empty() {
                end = arg_start + raw.len();
                skip_to(&mut chars, &mut previous, end);
                arg = Some(raw.to_string());
            }
        }

        references.push(VariableReference::new(name, arg, start..end));
    }

    references
}

/// Advances `chars` to byte offset `offset`, tracking the last char seen.
fn skip_to<I>(chars: &mut Peekable<I>, previous: &mut Option<char>, offset: usize)
where
    I: Iterator<Item = (usize, char)>,
{
    while let Some(&(i, c)) = chars.peek() {
        if i >= offset {
            break;
        }
        *previous = Some(c);
        chars.next();
    }
}

/// Returns true if the input string contains any variable references.
#[must_use]
pub fn has_references(input: &str) -> bool {
    !parse_references(input).is_empty()
}

/// Extracts just the variable names from the input without full parsing info.
#[must_use]
pub fn extract_variable_names(input: &str) -> Vec<String> {
    parse_references(input)
        .into_iter()
        .map(|r| r.name)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_simple_reference() {
        let refs = parse_references("#today");
        assert_eq!(refs.len(), 1);
        assert_eq!(refs[0].name, "today");
        assert_eq!(refs[0].arg, None);
        assert_eq!(refs[0].span, 0..6);
    }

    #[test]
    fn test_parse_reference_with_argument() {
        let refs = parse_references("#file:/a/b.txt");
        assert_eq!(refs.len(), 1);
        assert_eq!(refs[0].name, "file");
        assert_eq!(refs[0].arg.as_deref(), Some("/a/b.txt"));
        assert_eq!(refs[0].span, 0..14);
    }

    #[test]
    fn test_parse_multiple_references() {
        let input = "compare #file:a.rs with #file:b.rs as of #today";
        let refs = parse_references(input);
        assert_eq!(extract_variable_names(input), vec!["file", "file", "today"]);
        assert_eq!(refs[1].arg.as_deref(), Some("b.rs"));
    }

    #[test]
    fn test_argument_keeps_inner_colons() {
        let refs = parse_references("#file:C:/notes.txt");
        assert_eq!(refs[0].arg.as_deref(), Some("C:/notes.txt"));
    }

    #[test]
    fn test_trailing_punctuation_is_not_argument() {
        let input = "Look at #file:src/lib.rs.";
        let refs = parse_references(input);
        assert_eq!(refs[0].arg.as_deref(), Some("src/lib.rs"));
        assert_eq!(&input[refs[0].span.clone()], "#file:src/lib.rs");
    }

    #[test]
    fn test_name_does_not_end_with_hyphen() {
        let input = "check #today- then #multi-word-name-";
        let refs = parse_references(input);
        assert_eq!(extract_variable_names(input), vec!["today", "multi-word-name"]);
        assert_eq!(&input[refs[0].span.clone()], "#today");
    }

    #[test]
    fn test_balanced_parenthesis_stays_in_argument() {
        let refs = parse_references("#file:foo(1) and #file:bar(2)).");
        assert_eq!(refs[0].arg.as_deref(), Some("foo(1)"));
        assert_eq!(refs[1].arg.as_deref(), Some("bar(2)"));

        let input = "(see #file:a.rs)";
        let refs = parse_references(input);
        assert_eq!(refs[0].arg.as_deref(), Some("a.rs"));
        assert_eq!(&input[refs[0].span.clone()], "#file:a.rs");
    }

    #[test]
    fn test_hash_inside_word_is_ignored() {
        assert!(parse_references("issue#12 and C#").is_empty());
    }

    #[test]
    fn test_hash_without_name() {
        assert!(parse_references("# heading").is_empty());
        assert!(parse_references("#1").is_empty());
    }

    #[test]
    fn test_empty_argument_is_dropped() {
        let refs = parse_references("#file: rest");
        assert_eq!(refs[0].arg, None);
        assert_eq!(refs[0].span, 0..5);
    }

    #[test]
    fn test_has_references() {
        assert!(has_references("use #selection please"));
        assert!(!has_references("no variables here"));
    }

    #[test]
    fn test_to_variable_ref() {
        let refs = parse_references("#file:x.rs #today");
        assert_eq!(refs[0].to_variable_ref(), VariableRef::with_arg("file", "x.rs"));
        assert_eq!(refs[1].to_variable_ref(), VariableRef::Name("today".to_string()));
    }

    #[test]
    fn test_span_positions() {
        let input = "Hello #name, welcome!";
        let refs = parse_references(input);
        assert_eq!(refs.len(), 1);
        assert_eq!(&input[refs[0].span.clone()], "#name");
    }
}
