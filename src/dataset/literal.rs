use std::fmt;

use thiserror::Error;

/// A typed cell value. Produced by [`parse_literal`], never by evaluating
/// the cell as an expression.
#[derive(Debug, Clone, PartialEq)]
pub enum LiteralValue {
    Text(String),
    Integer(i64),
    /// Integer literal outside the `i64` range, kept as its decimal digits
    BigInteger(String),
    Float(f64),
    Bool(bool),
    None,
    List(Vec<LiteralValue>),
    Tuple(Vec<LiteralValue>),
    Set(Vec<LiteralValue>),
    Dict(Vec<(LiteralValue, LiteralValue)>),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LiteralError {
    #[error("cell is empty")]
    Empty,
    #[error("unterminated string literal")]
    UnterminatedString,
    #[error("invalid number literal `{0}`")]
    InvalidNumber(String),
    #[error("invalid structured literal: {0}")]
    InvalidStructured(String),
    #[error("`{0}` is not a literal value")]
    NotALiteral(String),
}

/// Parses a cell holding a literal: a quoted string, a number,
/// `True`/`False`/`None`, or a list, tuple, set or dict of literals.
///
/// Anything else, including operators, names and calls, is rejected.
pub fn parse_literal(raw: &str) -> Result<LiteralValue, LiteralError> {
    let text = raw.trim();
    if text.is_empty() {
        return Err(LiteralError::Empty);
    }
    let mut parser = Parser { text, pos: 0 };
    let value = parser.value()?;
    parser.skip_whitespace();
    if parser.pos != text.len() {
        return Err(LiteralError::NotALiteral(text.to_string()));
    }
    Ok(value)
}

struct Parser<'a> {
    text: &'a str,
    pos: usize,
}

impl<'a> Parser<'a> {
    fn rest(&self) -> &'a str {
        &self.text[self.pos..]
    }

    fn peek(&self) -> Option<char> {
        self.rest().chars().next()
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        Some(c)
    }

    fn skip_whitespace(&mut self) {
        let rest = self.rest();
        self.pos += rest.len() - rest.trim_start().len();
    }

    fn not_a_literal(&self) -> LiteralError {
        LiteralError::NotALiteral(self.text.to_string())
    }

    fn value(&mut self) -> Result<LiteralValue, LiteralError> {
        self.skip_whitespace();
        match self.peek() {
            None => Err(LiteralError::InvalidStructured(
                "expected a value".to_string(),
            )),
            Some(quote @ ('"' | '\'')) => self.quoted(quote).map(LiteralValue::Text),
            Some('[') => {
                self.bump();
                self.sequence(']').map(|(items, _)| LiteralValue::List(items))
            }
            Some('(') => {
                self.bump();
                let (mut items, trailing_comma) = self.sequence(')')?;
                if items.len() == 1 && !trailing_comma {
                    return Ok(items.remove(0));
                }
                Ok(LiteralValue::Tuple(items))
            }
            Some('{') => {
                self.bump();
                self.braced()
            }
            Some('0'..='9' | '-' | '+' | '.') => self.number(),
            Some(_) => self.word(),
        }
    }

    fn quoted(&mut self, quote: char) -> Result<String, LiteralError> {
        self.bump();
        let mut out = String::new();
        loop {
            match self.bump() {
                None => return Err(LiteralError::UnterminatedString),
                Some('\\') => match self.bump() {
                    None => return Err(LiteralError::UnterminatedString),
                    Some('n') => out.push('\n'),
                    Some('t') => out.push('\t'),
                    Some('r') => out.push('\r'),
                    Some(c @ ('\\' | '\'' | '"')) => out.push(c),
                    Some(other) => {
                        out.push('\\');
                        out.push(other);
                    }
                },
                Some(c) if c == quote => return Ok(out),
                Some(c) => out.push(c),
            }
        }
    }

    /// Comma separated values up to `close`. Also reports whether the
    /// last item was followed by a comma, which makes `(x,)` a tuple.
    fn sequence(&mut self, close: char) -> Result<(Vec<LiteralValue>, bool), LiteralError> {
        let mut items = Vec::new();
        let mut trailing_comma = false;
        loop {
            self.skip_whitespace();
            if self.peek() == Some(close) {
                self.bump();
                return Ok((items, trailing_comma));
            }
            items.push(self.value()?);
            trailing_comma = self.separator(close)?;
        }
    }

    /// `{}` and `{k: v, ...}` are dicts, `{a, b}` is a set.
    fn braced(&mut self) -> Result<LiteralValue, LiteralError> {
        self.skip_whitespace();
        if self.peek() == Some('}') {
            self.bump();
            return Ok(LiteralValue::Dict(Vec::new()));
        }
        let first = self.value()?;
        self.skip_whitespace();
        if self.peek() != Some(':') {
            self.separator('}')?;
            let (mut rest, _) = self.sequence('}')?;
            rest.insert(0, first);
            return Ok(LiteralValue::Set(rest));
        }

        let mut entries = Vec::new();
        let mut key = first;
        loop {
            self.skip_whitespace();
            if self.bump() != Some(':') {
                return Err(LiteralError::InvalidStructured(
                    "expected `:` after dict key".to_string(),
                ));
            }
            entries.push((key, self.value()?));
            self.separator('}')?;
            self.skip_whitespace();
            if self.peek() == Some('}') {
                self.bump();
                return Ok(LiteralValue::Dict(entries));
            }
            key = self.value()?;
        }
    }

    /// Consumes a `,` or leaves `close` in place. Returns true for a comma.
    fn separator(&mut self, close: char) -> Result<bool, LiteralError> {
        self.skip_whitespace();
        match self.peek() {
            Some(',') => {
                self.bump();
                Ok(true)
            }
            Some(c) if c == close => Ok(false),
            None => Err(LiteralError::InvalidStructured(format!(
                "missing closing `{close}`"
            ))),
            Some(c) => Err(LiteralError::InvalidStructured(format!(
                "unexpected `{c}`, expected `,` or `{close}`"
            ))),
        }
    }

    fn token(&mut self) -> &'a str {
        let text = self.text;
        let rest = self.rest();
        let len = rest
            .find(|c: char| c.is_whitespace() || matches!(c, ',' | ':' | ']' | ')' | '}'))
            .unwrap_or(rest.len());
        let start = self.pos;
        self.pos += len;
        &text[start..self.pos]
    }

    fn number(&mut self) -> Result<LiteralValue, LiteralError> {
        let token = self.token();
        parse_number(token)
    }

    fn word(&mut self) -> Result<LiteralValue, LiteralError> {
        match self.token() {
            "True" => Ok(LiteralValue::Bool(true)),
            "False" => Ok(LiteralValue::Bool(false)),
            "None" => Ok(LiteralValue::None),
            _ => Err(self.not_a_literal()),
        }
    }
}

fn parse_number(token: &str) -> Result<LiteralValue, LiteralError> {
    let invalid = || LiteralError::InvalidNumber(token.to_string());
    let digits = token.replace('_', "");
    let (negative, unsigned) = match digits.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, digits.strip_prefix('+').unwrap_or(&digits)),
    };

    for (prefix, radix) in [("0x", 16), ("0o", 8), ("0b", 2)] {
        if let Some(body) = unsigned
            .strip_prefix(prefix)
            .or_else(|| unsigned.strip_prefix(&prefix.to_uppercase()))
        {
            let value = i64::from_str_radix(body, radix).map_err(|_| invalid())?;
            return Ok(LiteralValue::Integer(if negative { -value } else { value }));
        }
    }

    if !unsigned.is_empty() && unsigned.chars().all(|c| c.is_ascii_digit()) {
        return Ok(match digits.parse::<i64>() {
            Ok(value) => LiteralValue::Integer(value),
            Err(_) => {
                let trimmed = unsigned.trim_start_matches('0');
                let sign = if negative { "-" } else { "" };
                LiteralValue::BigInteger(format!("{sign}{trimmed}"))
            }
        });
    }

    match digits.parse::<f64>() {
        Ok(value) if value.is_finite() && !unsigned.starts_with(char::is_alphabetic) => {
            Ok(LiteralValue::Float(value))
        }
        _ => Err(invalid()),
    }
}

impl LiteralValue {
    /// Form used inside containers: strings are quoted the way Python's
    /// `repr` quotes them.
    fn fmt_nested(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LiteralValue::Text(text) => write_repr(f, text),
            other => write!(f, "{other}"),
        }
    }
}

fn write_repr(f: &mut fmt::Formatter<'_>, text: &str) -> fmt::Result {
    let quote = if text.contains('\'') && !text.contains('"') {
        '"'
    } else {
        '\''
    };
    write!(f, "{quote}")?;
    for c in text.chars() {
        match c {
            '\\' => f.write_str("\\\\")?,
            '\n' => f.write_str("\\n")?,
            '\t' => f.write_str("\\t")?,
            '\r' => f.write_str("\\r")?,
            c if c == quote => write!(f, "\\{c}")?,
            c => write!(f, "{c}")?,
        }
    }
    write!(f, "{quote}")
}

fn write_items(
    f: &mut fmt::Formatter<'_>,
    open: &str,
    items: &[LiteralValue],
    close: &str,
) -> fmt::Result {
    f.write_str(open)?;
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        item.fmt_nested(f)?;
    }
    f.write_str(close)
}

impl fmt::Display for LiteralValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LiteralValue::Text(text) => f.write_str(text),
            LiteralValue::Integer(value) => write!(f, "{value}"),
            LiteralValue::BigInteger(digits) => f.write_str(digits),
            // Debug keeps the fractional part, so 1.0 stays `1.0`
            LiteralValue::Float(value) => write!(f, "{value:?}"),
            LiteralValue::Bool(true) => f.write_str("True"),
            LiteralValue::Bool(false) => f.write_str("False"),
            LiteralValue::None => f.write_str("None"),
            LiteralValue::List(items) => write_items(f, "[", items, "]"),
            LiteralValue::Tuple(items) if items.len() == 1 => write_items(f, "(", items, ",)"),
            LiteralValue::Tuple(items) => write_items(f, "(", items, ")"),
            LiteralValue::Set(items) => write_items(f, "{", items, "}"),
            LiteralValue::Dict(entries) => {
                f.write_str("{")?;
                for (i, (key, value)) in entries.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    key.fmt_nested(f)?;
                    f.write_str(": ")?;
                    value.fmt_nested(f)?;
                }
                f.write_str("}")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn text(s: &str) -> LiteralValue {
        LiteralValue::Text(s.to_string())
    }

    #[rstest]
    #[case("'안녕하세요'", text("안녕하세요"))]
    #[case(r#""say \"hi\"""#, text("say \"hi\""))]
    #[case(r"'line\nbreak'", text("line\nbreak"))]
    #[case("  42 ", LiteralValue::Integer(42))]
    #[case("-3.5", LiteralValue::Float(-3.5))]
    #[case("1_000", LiteralValue::Integer(1000))]
    #[case("0x1F", LiteralValue::Integer(31))]
    #[case("1e3", LiteralValue::Float(1000.0))]
    #[case("True", LiteralValue::Bool(true))]
    #[case("None", LiteralValue::None)]
    #[case("(3)", LiteralValue::Integer(3))]
    #[case(
        "99999999999999999999",
        LiteralValue::BigInteger("99999999999999999999".into())
    )]
    fn parses_scalars(#[case] raw: &str, #[case] expected: LiteralValue) {
        assert_eq!(parse_literal(raw).unwrap(), expected);
    }

    #[rstest]
    #[case("['a', 'b']", LiteralValue::List(vec![text("a"), text("b")]))]
    #[case(r#"["a", 1]"#, LiteralValue::List(vec![text("a"), LiteralValue::Integer(1)]))]
    #[case(
        "[True, None]",
        LiteralValue::List(vec![LiteralValue::Bool(true), LiteralValue::None])
    )]
    #[case("('a', 1)", LiteralValue::Tuple(vec![text("a"), LiteralValue::Integer(1)]))]
    #[case("('a',)", LiteralValue::Tuple(vec![text("a")]))]
    #[case("()", LiteralValue::Tuple(vec![]))]
    #[case("{'role': 'user'}", LiteralValue::Dict(vec![(text("role"), text("user"))]))]
    #[case("{}", LiteralValue::Dict(vec![]))]
    #[case(
        "{1, 2,}",
        LiteralValue::Set(vec![LiteralValue::Integer(1), LiteralValue::Integer(2)])
    )]
    #[case(
        "[{'q': (1, -2.5)}, []]",
        LiteralValue::List(vec![
            LiteralValue::Dict(vec![(
                text("q"),
                LiteralValue::Tuple(vec![LiteralValue::Integer(1), LiteralValue::Float(-2.5)]),
            )]),
            LiteralValue::List(vec![]),
        ])
    )]
    fn parses_containers(#[case] raw: &str, #[case] expected: LiteralValue) {
        assert_eq!(parse_literal(raw).unwrap(), expected);
    }

    #[rstest]
    #[case("", LiteralError::Empty)]
    #[case("'open", LiteralError::UnterminatedString)]
    #[case("__import__('os').system('ls')", LiteralError::NotALiteral("__import__('os').system('ls')".into()))]
    #[case("'a' + 'b'", LiteralError::NotALiteral("'a' + 'b'".into()))]
    #[case("1 + 1", LiteralError::NotALiteral("1 + 1".into()))]
    #[case("plain sentence", LiteralError::NotALiteral("plain sentence".into()))]
    #[case("[open('x')]", LiteralError::NotALiteral("[open('x')]".into()))]
    #[case("1.2.3", LiteralError::InvalidNumber("1.2.3".into()))]
    #[case("-inf", LiteralError::InvalidNumber("-inf".into()))]
    fn rejects_non_literals(#[case] raw: &str, #[case] expected: LiteralError) {
        assert_eq!(parse_literal(raw).unwrap_err(), expected);
    }

    #[rstest]
    #[case("[1, 2")]
    #[case("{'a' 1}")]
    #[case("{'a': 1, 'b'}")]
    #[case("(1 2)")]
    fn malformed_containers(#[case] raw: &str) {
        assert!(matches!(
            parse_literal(raw),
            Err(LiteralError::InvalidStructured(_))
        ));
    }

    #[rstest]
    #[case("'hi'", "hi")]
    #[case("False", "False")]
    #[case("1.0", "1.0")]
    #[case("2.50", "2.5")]
    #[case(r#"[ "a" ,  1 ]"#, "['a', 1]")]
    #[case("{\"role\":'user' }", "{'role': 'user'}")]
    #[case("('a',)", "('a',)")]
    #[case(r#"["it's"]"#, r#"["it's"]"#)]
    #[case("[1.0, None]", "[1.0, None]")]
    fn display_matches_python_str(#[case] raw: &str, #[case] shown: &str) {
        assert_eq!(parse_literal(raw).unwrap().to_string(), shown);
    }
}
