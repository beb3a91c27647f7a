// src/parser/lexer.rs

//! Splits a raw line into words and operators.
//!
//! Words are separated by whitespace; operators terminate a word even when
//! no space surrounds them (`echo hi>out` is three tokens plus the target).
//! There is no quoting or escaping.

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    Word(String),
    /// `|`
    Pipe,
    /// `||`
    Or,
    /// `&&`
    And,
    /// `;`
    Semi,
    /// `<`
    Less,
    /// `>`
    Great,
    /// `>>`
    DoubleGreat,
    /// A lone `&`.
    Amp,
}

impl Token {
    /// Source text of an operator token.
    pub fn as_str(&self) -> &str {
        match self {
            Token::Word(w) => w,
            Token::Pipe => "|",
            Token::Or => "||",
            Token::And => "&&",
            Token::Semi => ";",
            Token::Less => "<",
            Token::Great => ">",
            Token::DoubleGreat => ">>",
            Token::Amp => "&",
        }
    }
}

pub fn tokenize(line: &str) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut word = String::new();
    let mut chars = line.chars().peekable();

    while let Some(c) = chars.next() {
        let op = match c {
            c if c.is_whitespace() => {
                flush_word(&mut word, &mut tokens);
                continue;
            }
            '|' if chars.next_if_eq(&'|').is_some() => Token::Or,
            '|' => Token::Pipe,
            '&' if chars.next_if_eq(&'&').is_some() => Token::And,
            '&' => Token::Amp,
            ';' => Token::Semi,
            '<' => Token::Less,
            '>' if chars.next_if_eq(&'>').is_some() => Token::DoubleGreat,
            '>' => Token::Great,
            other => {
                word.push(other);
                continue;
            }
        };
        flush_word(&mut word, &mut tokens);
        tokens.push(op);
    }
    flush_word(&mut word, &mut tokens);

    tokens
}

fn flush_word(word: &mut String, tokens: &mut Vec<Token>) {
    if !word.is_empty() {
        tokens.push(Token::Word(std::mem::take(word)));
    }
}
