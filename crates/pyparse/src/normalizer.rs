//! Heuristic repair of incomplete source fragments.
//!
//! The interactive query path hands us whatever the user has typed so
//! far, often ending mid-statement (`obj.`). The repairs below pad such a
//! fragment into something parseable: balance brackets, complete a
//! trailing attribute access with a synthetic `query_method` reference,
//! close open `try:` blocks, and give dangling suite openers a `pass`
//! body. When a candidate still fails, trailing lines are dropped one at
//! a time, since earlier lines are more likely complete. A fixed attempt
//! cap guards against pathological input.
//!
//! Best-effort by design: the only promise is "parseable text when
//! possible"; the output feeds [`crate::parse`] like any other source.

use regex::Regex;
use std::sync::OnceLock;

use crate::error::NormalizeError;
use crate::parse;

/// Upper bound on parse attempts across all candidates.
pub const MAX_ATTEMPTS: usize = 500;

/// Name appended to a trailing `.` so the fragment becomes a resolvable
/// attribute-access expression.
pub const QUERY_METHOD: &str = "query_method";

/// A suite opener with no body on the same line.
fn dangling_suite_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^(\s*)(if|elif|else|for|while|try|except|finally|with|def)\b[^:]*:\s*$")
            .expect("valid suite-opener pattern")
    })
}

/// Repairs `fragment` into text that parses cleanly.
pub fn normalize(fragment: &str) -> Result<String, NormalizeError> {
    let lines: Vec<&str> = fragment.lines().collect();
    let mut attempts = 0usize;
    let mut last_err = None;
    for cut in 0..=lines.len() {
        let kept = &lines[..lines.len() - cut];
        if kept.is_empty() && !lines.is_empty() {
            break;
        }
        let candidate = kept.join("\n");
        for repaired in repair_stages(&candidate) {
            attempts += 1;
            if attempts > MAX_ATTEMPTS {
                return Err(NormalizeError::Exhausted {
                    attempts: MAX_ATTEMPTS,
                });
            }
            match parse(&repaired) {
                Ok(_) => return Ok(repaired),
                Err(e) => last_err = Some(e),
            }
        }
    }
    match last_err {
        Some(e) => Err(NormalizeError::Parse(e)),
        None => Err(NormalizeError::Exhausted { attempts }),
    }
}

/// Cumulative repair stages for one candidate text, cheapest first. Each
/// stage is parsed before the next repair is stacked on top.
fn repair_stages(candidate: &str) -> Vec<String> {
    let mut stages = vec![candidate.to_string()];
    let mut current = candidate.to_string();

    let balanced = balance_brackets(&current);
    if balanced != current {
        current = balanced;
        stages.push(current.clone());
    }

    if current.trim_end().ends_with('.') {
        let trimmed_len = current.trim_end().len();
        current = format!("{}{QUERY_METHOD}", &current[..trimmed_len]);
        stages.push(current.clone());
    }

    let with_pass = pad_dangling_suite(&current);
    if with_pass != current {
        current = with_pass;
        stages.push(current.clone());
    }

    let with_handlers = close_open_trys(&current);
    if with_handlers != current {
        stages.push(with_handlers);
    }

    stages
}

/// Appends closers for brackets left open on the final physical line,
/// innermost first.
fn balance_brackets(text: &str) -> String {
    let Some(last) = text.lines().last() else {
        return text.to_string();
    };
    let mut open = Vec::new();
    let mut in_string: Option<char> = None;
    for ch in last.chars() {
        match in_string {
            Some(q) => {
                if ch == q {
                    in_string = None;
                }
            }
            None => match ch {
                '\'' | '"' => in_string = Some(ch),
                '(' | '[' | '{' => open.push(ch),
                ')' | ']' | '}' => {
                    open.pop();
                }
                _ => {}
            },
        }
    }
    if open.is_empty() {
        return text.to_string();
    }
    let mut out = text.to_string();
    for ch in open.into_iter().rev() {
        out.push(match ch {
            '(' => ')',
            '[' => ']',
            _ => '}',
        });
    }
    out
}

/// Gives a trailing suite opener (`if x:`, `for i in xs:`, ...) a `pass`
/// body one indent deeper.
fn pad_dangling_suite(text: &str) -> String {
    let Some(last) = text.lines().last() else {
        return text.to_string();
    };
    let Some(caps) = dangling_suite_re().captures(last) else {
        return text.to_string();
    };
    let indent = caps.get(1).map(|m| m.as_str()).unwrap_or("");
    format!("{text}\n{indent}    pass")
}

/// Closes every `try:` that never got a handler, innermost first. Open
/// blocks are tracked as a stack of indentation prefixes so nested
/// partial `try`s are each closed exactly once.
fn close_open_trys(text: &str) -> String {
    let mut open: Vec<String> = Vec::new();
    for line in text.lines() {
        let trimmed = line.trim_start();
        let indent = &line[..line.len() - trimmed.len()];
        let after_try = trimmed.strip_prefix("try").map(str::trim_start);
        if after_try.map(|rest| rest.starts_with(':')).unwrap_or(false) {
            open.push(indent.to_string());
        } else if trimmed.starts_with("except") || trimmed.starts_with("finally") {
            if let Some(pos) = open.iter().rposition(|i| i == indent) {
                open.remove(pos);
            }
        }
    }
    if open.is_empty() {
        return text.to_string();
    }
    let mut out = text.to_string();
    for indent in open.into_iter().rev() {
        out.push_str(&format!("\n{indent}except: pass"));
    }
    out
}
