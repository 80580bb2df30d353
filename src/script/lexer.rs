#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Span {
    pub(crate) start: usize,
    pub(crate) end: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Token<'a> {
    pub(crate) kind: TokenKind,
    pub(crate) text: &'a str,
    // position in the token stream, for error messages
    pub(crate) index: usize,
    pub(crate) span: Span,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum TokenKind {
    Word,
    Eof,
}

/// Split an op-script into whitespace-separated words, followed by a single `Eof` token.
pub(crate) fn lex(input: &str) -> Vec<Token<'_>> {
    let mut out = Vec::new();
    let mut start: Option<usize> = None;

    for (i, c) in input.char_indices() {
        match (c.is_whitespace(), start) {
            (true, Some(s)) => {
                push_word(&mut out, input, s, i);
                start = None;
            }
            (false, None) => start = Some(i),
            _ => {}
        }
    }
    if let Some(s) = start {
        push_word(&mut out, input, s, input.len());
    }

    out.push(Token {
        kind: TokenKind::Eof,
        text: "",
        index: out.len(),
        span: Span {
            start: input.len(),
            end: input.len(),
        },
    });
    out
}

fn push_word<'a>(out: &mut Vec<Token<'a>>, input: &'a str, start: usize, end: usize) {
    out.push(Token {
        kind: TokenKind::Word,
        text: &input[start..end],
        index: out.len(),
        span: Span { start, end },
    });
}

#[cfg(test)]
#[path = "../../tests/unit/script/lexer.rs"]
mod tests;
