use std::borrow::Cow::{self, Borrowed, Owned};

use rustyline::completion::{Completer, FilenameCompleter, Pair};
use rustyline::highlight::Highlighter;
use rustyline::hint::HistoryHinter;
use rustyline::validate::{ValidationContext, ValidationResult, Validator};
use rustyline::{Context, Helper, Hinter};

const KEYWORDS: [&str; 17] = [
    "ADD", "INCOME", "EXPENSE", "ON", "CATEGORY", "NOTE", "BUDGET", "SUMMARY", "LIST", "MONTH", "ALL",
    "TYPE", "EXPORT", "TO", "BREAKDOWN", "CATEGORIES", "HELP",
];

fn is_keyword(word: &str) -> bool {
    KEYWORDS.iter().any(|k| k.eq_ignore_ascii_case(word))
}

/// Line editor helper: completes keywords, quoted categories and export file names
#[derive(Helper, Hinter)]
pub(crate) struct FintrackHelper {
    filename_completer: FilenameCompleter,
    categories: Vec<String>,
    #[rustyline(Hinter)]
    hinter: HistoryHinter,
    colored_prompt: String,
}

impl FintrackHelper {
    pub(crate) fn new(categories: &[String], prompt: &str) -> FintrackHelper {
        FintrackHelper {
            filename_completer: FilenameCompleter::new(),
            categories: categories.to_vec(),
            hinter: HistoryHinter {},
            colored_prompt: format!("\x1b[1;32m{prompt}\x1b[0m"),
        }
    }
}

impl Completer for FintrackHelper {
    type Candidate = Pair;

    fn complete(&self, line: &str, pos: usize, ctx: &Context<'_>) -> rustyline::Result<(usize, Vec<Pair>)> {
        let before = &line[..pos];
        let start = before.char_indices().rev()
            .find(|&(_, c)| c.is_whitespace() || is_quote(c))
            .map(|(i, c)| i + c.len_utf8())
            .unwrap_or(0);
        let word = &before[start..];

        let previous = before[..start].split_whitespace().last().unwrap_or("");
        if previous.eq_ignore_ascii_case("TO") {
            return self.filename_completer.complete(line, pos, ctx);
        }

        let quote = before[..start].chars().last().filter(|&c| is_quote(c));
        let candidates = if let Some(quote) = quote {
            self.categories.iter()
                .filter(|c| c.starts_with(word))
                .map(|c| Pair { display: c.clone(), replacement: format!("{c}{quote}") })
                .collect()
        } else {
            let upper = word.to_ascii_uppercase();
            KEYWORDS.iter()
                .filter(|k| k.starts_with(upper.as_str()))
                .map(|k| Pair { display: k.to_string(), replacement: k.to_string() })
                .collect()
        };

        Ok((start, candidates))
    }
}

impl Validator for FintrackHelper {
    fn validate(&self, ctx: &mut ValidationContext) -> rustyline::Result<ValidationResult> {
        if open_quote(ctx.input()).is_some() {
            Ok(ValidationResult::Invalid(Some(" - unclosed quote".to_string())))
        } else {
            Ok(ValidationResult::Valid(None))
        }
    }
}

impl Highlighter for FintrackHelper {
    fn highlight_prompt<'b, 's: 'b, 'p: 'b>(
        &'s self,
        prompt: &'p str,
        default: bool,
    ) -> Cow<'b, str> {
        if default {
            Borrowed(&self.colored_prompt)
        } else {
            Borrowed(prompt)
        }
    }

    fn highlight_hint<'h>(&self, hint: &'h str) -> Cow<'h, str> {
        Owned("\x1b[2m".to_owned() + hint + "\x1b[m")
    }

    /// Keywords outside quotes are shown in bold
    fn highlight<'l>(&self, line: &'l str, _pos: usize) -> Cow<'l, str> {
        let mut out = String::with_capacity(line.len() + 16);
        let mut word = String::new();
        let mut quote = None;
        let mut changed = false;

        for c in line.chars() {
            if quote.is_none() && c.is_ascii_alphabetic() {
                word.push(c);
                continue;
            }
            changed |= flush_word(&mut out, &mut word);
            quote = next_quote(quote, c);
            out.push(c);
        }
        changed |= flush_word(&mut out, &mut word);

        if changed { Owned(out) } else { Borrowed(line) }
    }

    fn highlight_char(&self, _line: &str, _pos: usize, _forced: bool) -> bool {
        true
    }
}

fn is_quote(c: char) -> bool {
    c == '\'' || c == '"'
}

/// Quote state after `c`. A quote only closes on the same character that opened it.
fn next_quote(quote: Option<char>, c: char) -> Option<char> {
    match quote {
        None if is_quote(c) => Some(c),
        Some(open) if open == c => None,
        _ => quote,
    }
}

/// Quote character left open at the end of `line`, if any
fn open_quote(line: &str) -> Option<char> {
    line.chars().fold(None, next_quote)
}

fn flush_word(out: &mut String, word: &mut String) -> bool {
    let keyword = is_keyword(word);
    if keyword {
        out.push_str("\x1b[1m");
        out.push_str(word);
        out.push_str("\x1b[m");
    } else {
        out.push_str(word);
    }
    word.clear();
    keyword
}
