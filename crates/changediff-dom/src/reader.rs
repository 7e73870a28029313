//! Hand-written XML reader.
//!
//! Covers the subset of XML that changelog documents use: elements,
//! attributes (single or double quoted), character data, CDATA sections,
//! comments, processing instructions, and the five predefined entities plus
//! numeric character references. Comments and processing instructions are
//! discarded, a DOCTYPE declaration is skipped, whitespace-only text between
//! elements is dropped, and a leading byte order mark is ignored. Everything
//! else must be well formed.

use crate::error::ParseError;
use crate::node::{Attribute, Content, Element};

/// Reads one document from a string.
pub struct Reader<'a> {
    input: &'a str,
    pos: usize,
}

impl<'a> Reader<'a> {
    /// Creates a reader over the given input.
    #[must_use]
    pub fn new(input: &'a str) -> Self {
        Self { input, pos: 0 }
    }

    /// Reads the whole document and returns its root element. A leading byte
    /// order mark is skipped.
    ///
    /// # Errors
    ///
    /// Returns a [`ParseError`] when the input is not well formed, including
    /// mismatched tags, unterminated constructs, duplicate attributes, and
    /// content outside the root element.
    pub fn read_document(&mut self) -> Result<Element, ParseError> {
        self.eat("\u{feff}");
        self.skip_prolog()?;
        if self.rest().is_empty() {
            return Err(self.error("Expected a root element"));
        }
        let root = self.read_element()?;
        self.skip_misc()?;
        if !self.rest().is_empty() {
            return Err(self.error("Unexpected content after the root element"));
        }
        Ok(root)
    }

    fn read_element(&mut self) -> Result<Element, ParseError> {
        self.expect('<')?;
        let name = self.read_name("an element name")?;
        let mut element = Element::new(name);
        self.read_attributes(&mut element)?;
        if self.eat("/>") {
            return Ok(element);
        }
        self.expect('>')?;
        self.read_children(&mut element)?;
        let close_pos = self.pos;
        self.pos += 2; // consume "</"
        let close = self.read_name("a closing tag name")?;
        if close != element.name {
            self.pos = close_pos;
            return Err(self.error(format!(
                "Mismatched closing tag </{close}> for <{}>",
                element.name
            )));
        }
        self.skip_whitespace();
        self.expect('>')?;
        Ok(element)
    }

    fn read_attributes(&mut self, element: &mut Element) -> Result<(), ParseError> {
        loop {
            self.skip_whitespace();
            match self.peek() {
                Some('/' | '>') => return Ok(()),
                None => {
                    return Err(self.error(format!(
                        "Unexpected end of input in the <{}> tag",
                        element.name
                    )))
                }
                Some(_) => {}
            }
            let name_pos = self.pos;
            let name = self.read_name("an attribute name")?;
            if element.attribute(&name).is_some() {
                self.pos = name_pos;
                return Err(self.error(format!("Duplicate attribute '{name}'")));
            }
            self.skip_whitespace();
            self.expect('=')?;
            self.skip_whitespace();
            let value = self.read_quoted_value()?;
            element.attributes.push(Attribute { name, value });
        }
    }

    fn read_children(&mut self, element: &mut Element) -> Result<(), ParseError> {
        loop {
            if self.rest().starts_with("</") {
                return Ok(());
            }
            if self.rest().is_empty() {
                return Err(self.error(format!(
                    "Unexpected end of input inside <{}>",
                    element.name
                )));
            }
            if self.rest().starts_with("<!--") {
                self.skip_comment()?;
            } else if self.rest().starts_with("<![CDATA[") {
                let text = self.read_cdata()?;
                element.children.push(Content::Text(text));
            } else if self.rest().starts_with("<?") {
                self.skip_processing_instruction()?;
            } else if self.rest().starts_with('<') {
                let child = self.read_element()?;
                element.children.push(Content::Element(child));
            } else {
                let text = self.read_text()?;
                if !text.trim().is_empty() {
                    element.children.push(Content::Text(text));
                }
            }
        }
    }

    fn read_text(&mut self) -> Result<String, ParseError> {
        let mut text = String::new();
        loop {
            match self.peek() {
                None | Some('<') => return Ok(text),
                Some('&') => text.push(self.read_entity()?),
                Some(c) => {
                    text.push(c);
                    self.advance();
                }
            }
        }
    }

    fn read_quoted_value(&mut self) -> Result<String, ParseError> {
        let quote = match self.peek() {
            Some(c @ ('"' | '\'')) => c,
            _ => return Err(self.error("Expected a quoted attribute value")),
        };
        let open_pos = self.pos;
        self.advance();
        let mut value = String::new();
        loop {
            match self.peek() {
                None => {
                    self.pos = open_pos;
                    return Err(self.error("Unterminated attribute value"));
                }
                Some(c) if c == quote => {
                    self.advance();
                    return Ok(value);
                }
                Some('<') => return Err(self.error("'<' is not allowed in attribute values")),
                Some('&') => value.push(self.read_entity()?),
                Some(c) => {
                    value.push(c);
                    self.advance();
                }
            }
        }
    }

    fn read_name(&mut self, what: &str) -> Result<String, ParseError> {
        let start = self.pos;
        match self.peek() {
            Some(c) if is_name_start(c) => {
                self.advance();
            }
            _ => return Err(self.error(format!("Expected {what}"))),
        }
        while matches!(self.peek(), Some(c) if is_name_char(c)) {
            self.advance();
        }
        Ok(self.input[start..self.pos].to_string())
    }

    fn read_entity(&mut self) -> Result<char, ParseError> {
        let start = self.pos;
        self.advance(); // consume '&'
        let mut name = String::new();
        loop {
            match self.peek() {
                Some(';') => {
                    self.advance();
                    break;
                }
                Some(c) if c.is_ascii_alphanumeric() || c == '#' => {
                    name.push(c);
                    self.advance();
                }
                _ => {
                    self.pos = start;
                    return Err(self.error("Unterminated entity reference"));
                }
            }
        }
        let decoded = match name.as_str() {
            "amp" => Some('&'),
            "lt" => Some('<'),
            "gt" => Some('>'),
            "quot" => Some('"'),
            "apos" => Some('\''),
            _ => decode_char_reference(&name),
        };
        decoded.ok_or_else(|| {
            self.pos = start;
            self.error(format!("Unknown entity reference '&{name};'"))
        })
    }

    fn read_cdata(&mut self) -> Result<String, ParseError> {
        let start = self.pos;
        self.pos += "<![CDATA[".len();
        match self.rest().find("]]>") {
            Some(offset) => {
                let text = self.input[self.pos..self.pos + offset].to_string();
                self.pos += offset + "]]>".len();
                Ok(text)
            }
            None => {
                self.pos = start;
                Err(self.error("Unterminated CDATA section"))
            }
        }
    }

    fn skip_prolog(&mut self) -> Result<(), ParseError> {
        loop {
            self.skip_whitespace();
            if self.rest().starts_with("<?") {
                self.skip_processing_instruction()?;
            } else if self.rest().starts_with("<!--") {
                self.skip_comment()?;
            } else if self.rest().starts_with("<!DOCTYPE") {
                self.skip_doctype()?;
            } else {
                return Ok(());
            }
        }
    }

    fn skip_misc(&mut self) -> Result<(), ParseError> {
        loop {
            self.skip_whitespace();
            if self.rest().starts_with("<?") {
                self.skip_processing_instruction()?;
            } else if self.rest().starts_with("<!--") {
                self.skip_comment()?;
            } else {
                return Ok(());
            }
        }
    }

    fn skip_comment(&mut self) -> Result<(), ParseError> {
        let start = self.pos;
        self.pos += "<!--".len();
        match self.rest().find("-->") {
            Some(offset) => {
                self.pos += offset + "-->".len();
                Ok(())
            }
            None => {
                self.pos = start;
                Err(self.error("Unterminated comment"))
            }
        }
    }

    fn skip_processing_instruction(&mut self) -> Result<(), ParseError> {
        let start = self.pos;
        self.pos += "<?".len();
        match self.rest().find("?>") {
            Some(offset) => {
                self.pos += offset + "?>".len();
                Ok(())
            }
            None => {
                self.pos = start;
                Err(self.error("Unterminated processing instruction"))
            }
        }
    }

    fn skip_doctype(&mut self) -> Result<(), ParseError> {
        let start = self.pos;
        self.pos += "<!DOCTYPE".len();
        let mut depth = 0usize;
        while let Some(c) = self.advance() {
            match c {
                '[' => depth += 1,
                ']' => depth = depth.saturating_sub(1),
                '>' if depth == 0 => return Ok(()),
                _ => {}
            }
        }
        self.pos = start;
        Err(self.error("Unterminated DOCTYPE declaration"))
    }

    fn skip_whitespace(&mut self) {
        while matches!(self.peek(), Some(c) if c.is_whitespace()) {
            self.advance();
        }
    }

    fn rest(&self) -> &'a str {
        &self.input[self.pos..]
    }

    fn peek(&self) -> Option<char> {
        self.rest().chars().next()
    }

    fn advance(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        Some(c)
    }

    fn eat(&mut self, prefix: &str) -> bool {
        if self.rest().starts_with(prefix) {
            self.pos += prefix.len();
            true
        } else {
            false
        }
    }

    fn expect(&mut self, expected: char) -> Result<(), ParseError> {
        match self.peek() {
            Some(c) if c == expected => {
                self.advance();
                Ok(())
            }
            _ => Err(self.error(format!("Expected '{expected}'"))),
        }
    }

    fn error(&self, message: impl Into<String>) -> ParseError {
        let consumed = &self.input[..self.pos];
        let line = consumed.matches('\n').count() + 1;
        let line_start = consumed.rfind('\n').map_or(0, |index| index + 1);
        let column = consumed[line_start..].chars().count() + 1;
        ParseError::new(message, line, column)
    }
}

fn is_name_start(c: char) -> bool {
    c.is_alphabetic() || c == '_' || c == ':'
}

fn is_name_char(c: char) -> bool {
    is_name_start(c) || c.is_ascii_digit() || c == '-' || c == '.'
}

fn decode_char_reference(name: &str) -> Option<char> {
    let digits = name.strip_prefix('#')?;
    let value = match digits.strip_prefix(['x', 'X']) {
        Some(hex) => u32::from_str_radix(hex, 16).ok()?,
        None => digits.parse().ok()?,
    };
    char::from_u32(value)
}
