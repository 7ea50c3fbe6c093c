pub const END_MARKER: &str = "$";

fn is_operator(character: char) -> bool {
    match character {
        '+' | '-' | '*' | '/' | '=' => true,
        _ => false
    }
}

fn is_punctuation(character: char) -> bool {
    match character {
        '(' | ')' => true,
        _ => false
    }
}

/// True for tokens that can never be an operand: operators, parentheses and
/// the end marker.
pub fn is_symbolic(token: &str) -> bool {
    token == END_MARKER || token.chars().all(|c| is_operator(c) || is_punctuation(c))
}

pub fn is_identifier(token: &str) -> bool {
    let mut chars = token.chars();
    match chars.next() {
        Some(first) if first.is_alphabetic() || first == '_' =>
            chars.all(|c| c.is_alphanumeric() || c == '_'),
        _ => false,
    }
}

pub fn looks_numeric(token: &str) -> bool {
    token.starts_with(|c: char| c.is_ascii_digit() || c == '.')
}

/// Tokens of one input line plus the cursor shared by every parsing rule.
/// The last token is always an appended [`END_MARKER`] and the cursor never
/// passes it; a `$` typed by the user stays an ordinary token.
pub struct TokenStream {
    tokens: Vec<String>,
    index: usize,
}

impl TokenStream {
    pub fn new(mut tokens: Vec<String>) -> Self {
        tokens.push(END_MARKER.into());
        Self{tokens, index: 0}
    }

    pub fn current(&self) -> &str {
        &self.tokens[self.index]
    }

    pub fn lookahead(&self) -> &str {
        self.tokens.get(self.index + 1).map_or(END_MARKER, String::as_str)
    }

    pub fn advance(&mut self) {
        if !self.at_end() {
            self.index += 1;
        }
    }

    pub fn at_end(&self) -> bool {
        self.index + 1 == self.tokens.len()
    }

    pub fn position(&self) -> usize {
        self.index
    }

    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }

    pub fn read(&self) -> &[String] {
        &self.tokens[..self.index]
    }

    pub fn unread(&self) -> &[String] {
        &self.tokens[self.index..self.tokens.len() - 1]
    }
}

pub fn tokenize(line: &str) -> TokenStream {
    let mut spaced = String::with_capacity(line.len() * 2);
    for character in line.chars() {
        if is_operator(character) || is_punctuation(character) {
            spaced.push(' ');
            spaced.push(character);
            spaced.push(' ');
        } else {
            spaced.push(character);
        }
    }
    TokenStream::new(spaced.split_whitespace().map(String::from).collect())
}
