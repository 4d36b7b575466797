//! Post-processing of the assembled output: line-comment stripping and
//! whitespace collapsing.
//!
//! Both passes track string literals (`"`, `'`, `` ` ``) so a `//` inside a
//! URL or a double space inside a company name is left intact. Text inside
//! `/* ... */` is not treated as a comment here; only `//` comments are
//! removed.

/// Scanner state shared by both passes.
#[derive(Clone, Copy)]
enum State {
    Normal,
    InString(char),
    InStringEscape(char),
    InLineComment,
}

/// Remove `//` comments up to (not including) the end of the line.
pub fn strip_line_comments(input: &str) -> String {
    let mut output = String::with_capacity(input.len());
    let mut state = State::Normal;
    let mut chars = input.chars().peekable();

    while let Some(ch) = chars.next() {
        state = match state {
            State::Normal => match ch {
                '"' | '\'' | '`' => {
                    output.push(ch);
                    State::InString(ch)
                }
                '/' if chars.peek() == Some(&'/') => {
                    chars.next();
                    State::InLineComment
                }
                _ => {
                    output.push(ch);
                    State::Normal
                }
            },
            State::InString(quote) => {
                output.push(ch);
                string_step(ch, quote)
            }
            State::InStringEscape(quote) => {
                output.push(ch);
                State::InString(quote)
            }
            State::InLineComment => {
                if ch == '\n' || ch == '\r' {
                    output.push(ch);
                    State::Normal
                } else {
                    State::InLineComment
                }
            }
        };
    }

    output
}

/// Replace every run of whitespace outside string literals with one space.
pub fn collapse_whitespace(input: &str) -> String {
    let mut output = String::with_capacity(input.len());
    let mut state = State::Normal;
    let mut pending_space = false;

    for ch in input.chars() {
        state = match state {
            State::Normal if ch.is_whitespace() => {
                pending_space = true;
                State::Normal
            }
            State::Normal => {
                if pending_space {
                    output.push(' ');
                    pending_space = false;
                }
                output.push(ch);
                match ch {
                    '"' | '\'' | '`' => State::InString(ch),
                    _ => State::Normal,
                }
            }
            State::InString(quote) => {
                output.push(ch);
                string_step(ch, quote)
            }
            State::InStringEscape(quote) => {
                output.push(ch);
                State::InString(quote)
            }
            State::InLineComment => State::InLineComment,
        };
    }

    if pending_space {
        output.push(' ');
    }
    output
}

/// Strip comments, collapse whitespace, and trim.
pub fn minify(input: &str) -> String {
    collapse_whitespace(&strip_line_comments(input)).trim().to_string()
}

fn string_step(ch: char, quote: char) -> State {
    match ch {
        '\\' => State::InStringEscape(quote),
        // An unterminated plain string ends at the line break.
        '\n' | '\r' if quote != '`' => State::Normal,
        c if c == quote => State::Normal,
        _ => State::InString(quote),
    }
}
