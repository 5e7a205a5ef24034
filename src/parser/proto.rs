//! `.proto` source reader.
//!
//! Two stages:
//!
//! 1. **Lex** — split the source into tokens, attaching the leading comment
//!    (comments directly above a token, no blank line in between) to the
//!    token that follows it.
//! 2. **Parse** — recursive descent over messages and enums. Only the parts
//!    needed for documentation are kept: names, leading comments, field
//!    types, enum values. Options, services and extensions are skipped.

use crate::error::SchemaError;

/// Scalar type keywords of the proto language.
const SCALARS: &[&str] = &[
    "double", "float", "int32", "int64", "uint32", "uint64", "sint32", "sint64", "fixed32",
    "fixed64", "sfixed32", "sfixed64", "bool", "string", "bytes",
];

/// A parsed `.proto` file.
#[derive(Debug, Default)]
pub struct ProtoFile {
    pub messages: Vec<MessageDef>,
    pub enums: Vec<EnumDef>,
}

#[derive(Debug, Default)]
pub struct MessageDef {
    pub name: String,
    pub fields: Vec<FieldDef>,
    pub messages: Vec<MessageDef>,
    pub enums: Vec<EnumDef>,
}

#[derive(Debug)]
pub struct FieldDef {
    pub name: String,
    /// Declared type as written, e.g. `string`, `Action`, `map<string, Value>`.
    pub type_name: String,
    pub comment: String,
}

impl FieldDef {
    /// Kind name of the field type: the scalar keyword, `enum` or `message`.
    ///
    /// `is_enum` resolves non-scalar type names declared elsewhere.
    pub fn kind_name(&self, is_enum: impl Fn(&str) -> bool) -> String {
        if SCALARS.contains(&self.type_name.as_str()) {
            return self.type_name.clone();
        }
        if self.type_name == "group" {
            return "group".to_string();
        }
        if !self.type_name.starts_with("map<") {
            let simple = self.type_name.rsplit('.').next().unwrap_or(&self.type_name);
            if is_enum(simple) {
                return "enum".to_string();
            }
        }
        "message".to_string()
    }
}

#[derive(Debug, Default)]
pub struct EnumDef {
    pub name: String,
    pub values: Vec<EnumValueDef>,
}

#[derive(Debug)]
pub struct EnumValueDef {
    pub name: String,
    pub comment: String,
}

impl ProtoFile {
    /// Find a message by dotted path, e.g. `Widget` or `Outer.Inner`.
    pub fn message(&self, path: &str) -> Option<&MessageDef> {
        let mut parts = path.split('.');
        let first = parts.next()?;
        let mut current = self.messages.iter().find(|m| m.name == first)?;
        for part in parts {
            current = current.messages.iter().find(|m| m.name == part)?;
        }
        Some(current)
    }

    /// Find an enum by dotted path, e.g. `Widget.Type` or a top-level `Kind`.
    pub fn enum_at(&self, path: &str) -> Option<&EnumDef> {
        match path.rsplit_once('.') {
            Some((parent, name)) => self.message(parent)?.enums.iter().find(|e| e.name == name),
            None => self.enums.iter().find(|e| e.name == path),
        }
    }

    /// Names of every enum declared in this file, at any nesting depth.
    pub fn enum_names(&self) -> Vec<&str> {
        fn walk<'a>(msg: &'a MessageDef, out: &mut Vec<&'a str>) {
            out.extend(msg.enums.iter().map(|e| e.name.as_str()));
            for nested in &msg.messages {
                walk(nested, out);
            }
        }
        let mut out: Vec<&str> = self.enums.iter().map(|e| e.name.as_str()).collect();
        for msg in &self.messages {
            walk(msg, &mut out);
        }
        out
    }
}

/// Parse `.proto` source text.
pub fn parse(input: &str) -> Result<ProtoFile, SchemaError> {
    let tokens = lex(input)?;
    let mut parser = Parser { tokens, pos: 0 };
    parser.file()
}

// -- Lexer --------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
enum Tok {
    Ident(String),
    Number,
    Str,
    Punct(char),
}

#[derive(Debug)]
struct Token {
    tok: Tok,
    line: usize,
    /// Leading comment text, markers stripped.
    comment: String,
}

fn lex(input: &str) -> Result<Vec<Token>, SchemaError> {
    let chars: Vec<char> = input.chars().collect();
    let mut tokens = Vec::new();
    let mut i = 0;
    let mut line = 1;

    // Comment lines collected since the last token
    let mut pending: Vec<String> = Vec::new();
    // Newlines seen since the last comment ended
    let mut newlines_after_comment = 0;

    while i < chars.len() {
        let c = chars[i];

        if c == '\n' {
            line += 1;
            newlines_after_comment += 1;
            // A blank line detaches the comments above it
            if newlines_after_comment >= 2 {
                pending.clear();
            }
            i += 1;
            continue;
        }
        if c.is_whitespace() {
            i += 1;
            continue;
        }

        // Line comment
        if c == '/' && chars.get(i + 1) == Some(&'/') {
            let start = i + 2;
            let mut end = start;
            while end < chars.len() && chars[end] != '\n' {
                end += 1;
            }
            // A comment after a token on the same line trails that token
            if !trails_last_token(&tokens, line) {
                pending.push(chars[start..end].iter().collect());
            }
            newlines_after_comment = 0;
            i = end;
            continue;
        }

        // Block comment
        if c == '/' && chars.get(i + 1) == Some(&'*') {
            let open_line = line;
            let start = i + 2;
            let mut end = start;
            while end + 1 < chars.len() && !(chars[end] == '*' && chars[end + 1] == '/') {
                if chars[end] == '\n' {
                    line += 1;
                }
                end += 1;
            }
            if end + 1 >= chars.len() {
                return Err(SchemaError::Syntax {
                    line: open_line,
                    message: "unterminated block comment".to_string(),
                });
            }
            if !trails_last_token(&tokens, open_line) {
                let body: String = chars[start..end].iter().collect();
                pending.extend(strip_block_gutter(&body));
            }
            newlines_after_comment = 0;
            i = end + 2;
            continue;
        }

        let tok_line = line;
        let tok = if c.is_ascii_alphabetic() || c == '_' || (c == '.' && next_is_ident(&chars, i)) {
            let start = i;
            while i < chars.len()
                && (chars[i].is_ascii_alphanumeric() || chars[i] == '_' || chars[i] == '.')
            {
                i += 1;
            }
            Tok::Ident(chars[start..i].iter().collect())
        } else if c.is_ascii_digit() {
            while i < chars.len()
                && (chars[i].is_ascii_alphanumeric() || chars[i] == '.' || chars[i] == '_')
            {
                i += 1;
            }
            Tok::Number
        } else if c == '"' || c == '\'' {
            i += 1;
            while i < chars.len() && chars[i] != c {
                if chars[i] == '\\' {
                    i += 1;
                }
                if i < chars.len() && chars[i] == '\n' {
                    return Err(SchemaError::Syntax {
                        line: tok_line,
                        message: "unterminated string literal".to_string(),
                    });
                }
                i += 1;
            }
            if i >= chars.len() {
                return Err(SchemaError::Syntax {
                    line: tok_line,
                    message: "unterminated string literal".to_string(),
                });
            }
            i += 1;
            Tok::Str
        } else {
            i += 1;
            Tok::Punct(c)
        };

        tokens.push(Token {
            tok,
            line: tok_line,
            comment: pending.join("\n"),
        });
        pending.clear();
        newlines_after_comment = 0;
    }

    Ok(tokens)
}

fn trails_last_token(tokens: &[Token], line: usize) -> bool {
    tokens.last().is_some_and(|t| t.line == line)
}

fn next_is_ident(chars: &[char], i: usize) -> bool {
    chars
        .get(i + 1)
        .is_some_and(|c| c.is_ascii_alphabetic() || *c == '_')
}

/// Strip the ` * ` gutter from the lines of a block comment body.
fn strip_block_gutter(body: &str) -> Vec<String> {
    body.lines()
        .map(|l| {
            let t = l.trim_start();
            match t.strip_prefix('*') {
                Some(rest) => rest.to_string(),
                None if t.is_empty() => String::new(),
                None => l.to_string(),
            }
        })
        .collect()
}

// -- Parser -------------------------------------------------------------------

struct Parser {
    tokens: Vec<Token>,
    pos: usize,
}

impl Parser {
    fn file(&mut self) -> Result<ProtoFile, SchemaError> {
        let mut file = ProtoFile::default();

        while let Some(token) = self.tokens.get(self.pos) {
            match &token.tok {
                Tok::Ident(kw) if kw == "message" => {
                    let message = self.message()?;
                    file.messages.push(message);
                }
                Tok::Ident(kw) if kw == "enum" => {
                    let e = self.enumeration()?;
                    file.enums.push(e);
                }
                Tok::Ident(kw) if kw == "service" || kw == "extend" => {
                    self.pos += 1;
                    self.skip_block()?;
                }
                Tok::Punct(';') => self.pos += 1,
                // syntax, edition, package, import, option
                _ => self.skip_statement()?,
            }
        }

        Ok(file)
    }

    /// `message Name { ... }`, positioned on the `message` keyword.
    fn message(&mut self) -> Result<MessageDef, SchemaError> {
        self.pos += 1;
        let name = self.ident()?;
        self.expect('{')?;

        let mut msg = MessageDef {
            name,
            ..Default::default()
        };

        loop {
            let token = self.peek()?;
            match &token.tok {
                Tok::Punct('}') => {
                    self.pos += 1;
                    return Ok(msg);
                }
                Tok::Punct(';') => self.pos += 1,
                Tok::Ident(kw) => match kw.as_str() {
                    "message" => {
                        let nested = self.message()?;
                        msg.messages.push(nested);
                    }
                    "enum" => {
                        let e = self.enumeration()?;
                        msg.enums.push(e);
                    }
                    "oneof" => {
                        self.pos += 1;
                        self.ident()?;
                        self.expect('{')?;
                        loop {
                            match &self.peek()?.tok {
                                Tok::Punct('}') => {
                                    self.pos += 1;
                                    break;
                                }
                                Tok::Punct(';') => self.pos += 1,
                                Tok::Ident(kw) if kw == "option" => self.skip_statement()?,
                                _ => {
                                    let field = self.field()?;
                                    msg.fields.push(field);
                                }
                            }
                        }
                    }
                    "option" | "reserved" | "extensions" => self.skip_statement()?,
                    "extend" => {
                        self.pos += 1;
                        self.skip_block()?;
                    }
                    _ => {
                        let field = self.field()?;
                        msg.fields.push(field);
                    }
                },
                _ => return Err(self.error("expected a field, message, enum or '}'")),
            }
        }
    }

    /// `[label] type name = number [options];`
    fn field(&mut self) -> Result<FieldDef, SchemaError> {
        let comment = self.take_comment();

        let mut type_name = self.ident()?;
        if matches!(type_name.as_str(), "optional" | "repeated" | "required") {
            type_name = self.ident()?;
        }

        if type_name == "map" {
            self.expect('<')?;
            let key = self.ident()?;
            self.expect(',')?;
            let value = self.ident()?;
            self.expect('>')?;
            type_name = format!("map<{}, {}>", key, value);
        }

        let name = self.ident()?;

        if type_name == "group" {
            // group Name = N { ... }
            self.skip_until_block()?;
            return Ok(FieldDef {
                name,
                type_name,
                comment,
            });
        }

        self.expect('=')?;
        self.skip_statement()?;

        Ok(FieldDef {
            name,
            type_name,
            comment,
        })
    }

    /// `enum Name { VALUE = 0; ... }`, positioned on the `enum` keyword.
    fn enumeration(&mut self) -> Result<EnumDef, SchemaError> {
        self.pos += 1;
        let name = self.ident()?;
        self.expect('{')?;

        let mut e = EnumDef {
            name,
            values: Vec::new(),
        };

        loop {
            let token = self.peek()?;
            match &token.tok {
                Tok::Punct('}') => {
                    self.pos += 1;
                    return Ok(e);
                }
                Tok::Punct(';') => self.pos += 1,
                Tok::Ident(kw) if kw == "option" || kw == "reserved" => self.skip_statement()?,
                Tok::Ident(_) => {
                    let comment = self.take_comment();
                    let name = self.ident()?;
                    self.expect('=')?;
                    self.skip_statement()?;
                    e.values.push(EnumValueDef { name, comment });
                }
                _ => return Err(self.error("expected an enum value or '}'")),
            }
        }
    }

    fn peek(&self) -> Result<&Token, SchemaError> {
        self.tokens.get(self.pos).ok_or_else(|| SchemaError::Syntax {
            line: self.tokens.last().map_or(1, |t| t.line),
            message: "unexpected end of file".to_string(),
        })
    }

    fn take_comment(&self) -> String {
        self.tokens
            .get(self.pos)
            .map(|t| t.comment.clone())
            .unwrap_or_default()
    }

    fn ident(&mut self) -> Result<String, SchemaError> {
        match &self.peek()?.tok {
            Tok::Ident(name) => {
                let name = name.clone();
                self.pos += 1;
                Ok(name)
            }
            _ => Err(self.error("expected an identifier")),
        }
    }

    fn expect(&mut self, c: char) -> Result<(), SchemaError> {
        if self.peek()?.tok == Tok::Punct(c) {
            self.pos += 1;
            Ok(())
        } else {
            Err(self.error(&format!("expected '{}'", c)))
        }
    }

    /// Skip to and past the next `;` at the current nesting level.
    /// A `{ ... }` body (e.g. an aggregate option value) is skipped whole.
    fn skip_statement(&mut self) -> Result<(), SchemaError> {
        loop {
            match &self.peek()?.tok {
                Tok::Punct(';') => {
                    self.pos += 1;
                    return Ok(());
                }
                Tok::Punct('{') => {
                    self.skip_block()?;
                }
                _ => self.pos += 1,
            }
        }
    }

    /// Advance to the next `{` and skip the block it opens.
    fn skip_until_block(&mut self) -> Result<(), SchemaError> {
        while self.peek()?.tok != Tok::Punct('{') {
            self.pos += 1;
        }
        self.skip_block()
    }

    /// Skip a balanced `{ ... }`. Any tokens before the `{` are skipped too.
    fn skip_block(&mut self) -> Result<(), SchemaError> {
        let mut depth = 0usize;
        loop {
            match &self.peek()?.tok {
                Tok::Punct('{') => depth += 1,
                Tok::Punct('}') => {
                    depth = depth.saturating_sub(1);
                    if depth == 0 {
                        self.pos += 1;
                        return Ok(());
                    }
                }
                _ => {}
            }
            self.pos += 1;
        }
    }

    fn error(&self, message: &str) -> SchemaError {
        SchemaError::Syntax {
            line: self.tokens.get(self.pos).map_or(1, |t| t.line),
            message: message.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const WIDGETS: &str = r#"
syntax = "proto3";

package widgets;

option go_package = "example.com/widgets";

message Widget {
  enum Type {
    // Never sent.
    option allow_alias = false;

    /*
     * @support: web
     * @design: https://d.example.com/unknown
     */
    UNKNOWN = 0;

    // @support: android(1-)
    // @design: https://d.example.com/row
    SELECTOR_ROW = 1 [deprecated = true];
  }

  Type type = 1;
}
"#;

    #[test]
    fn nested_enum_values_with_comments() {
        let file = parse(WIDGETS).unwrap();
        let e = file.enum_at("Widget.Type").unwrap();
        assert_eq!(e.values.len(), 2);
        assert_eq!(e.values[0].name, "UNKNOWN");
        assert_eq!(
            e.values[0].comment,
            "\n @support: web\n @design: https://d.example.com/unknown\n"
        );
        assert_eq!(e.values[1].name, "SELECTOR_ROW");
        assert_eq!(
            e.values[1].comment,
            " @support: android(1-)\n @design: https://d.example.com/row"
        );
    }

    #[test]
    fn trailing_comment_is_not_leading() {
        let input = "message A {\n  string x = 1; // about x\n  string y = 2;\n}\n";
        let file = parse(input).unwrap();
        assert_eq!(file.messages[0].fields[1].comment, "");
    }

    #[test]
    fn blank_line_detaches_comment() {
        let input = "message A {\n  // detached\n\n  string x = 1;\n  // attached\n  string y = 2;\n}\n";
        let file = parse(input).unwrap();
        assert_eq!(file.messages[0].fields[0].comment, "");
        assert_eq!(file.messages[0].fields[1].comment, " attached");
    }

    #[test]
    fn fields_labels_maps_and_oneofs() {
        let input = r#"
import "google/protobuf/timestamp.proto";

message SelectorRowData {
  // @support: web
  string title = 1;
  repeated Action actions = 2 [(custom) = { a: 1 }];
  map<string, int32> counts = 3;
  oneof value {
    // @support: ios(1-)
    int64 number = 4;
    google.protobuf.Timestamp at = 5;
  }
  reserved 6, 7;
  message Nested { string inner = 1; }
  enum Mode { MODE_UNSPECIFIED = 0; }
  Mode mode = 8;
}
"#;
        let file = parse(input).unwrap();
        let msg = file.message("SelectorRowData").unwrap();
        let names: Vec<&str> = msg.fields.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, ["title", "actions", "counts", "number", "at", "mode"]);
        assert_eq!(msg.fields[1].type_name, "Action");
        assert_eq!(msg.fields[2].type_name, "map<string, int32>");
        assert_eq!(msg.fields[3].comment, " @support: ios(1-)");
        assert_eq!(msg.fields[4].type_name, "google.protobuf.Timestamp");
        assert_eq!(msg.messages[0].name, "Nested");
        assert_eq!(file.enum_names(), ["Mode"]);
    }

    #[test]
    fn kind_names() {
        let field = |t: &str| FieldDef {
            name: "f".into(),
            type_name: t.into(),
            comment: String::new(),
        };
        let is_enum = |n: &str| n == "Color";
        assert_eq!(field("string").kind_name(is_enum), "string");
        assert_eq!(field("int32").kind_name(is_enum), "int32");
        assert_eq!(field("Color").kind_name(is_enum), "enum");
        assert_eq!(field("pkg.Color").kind_name(is_enum), "enum");
        assert_eq!(field("Action").kind_name(is_enum), "message");
        assert_eq!(field("map<string, Color>").kind_name(is_enum), "message");
    }

    #[test]
    fn service_blocks_are_skipped() {
        let input = "service S {\n  rpc Get(A) returns (B) { option idempotency_level = NO_SIDE_EFFECTS; }\n}\nmessage A {}\n";
        let file = parse(input).unwrap();
        assert_eq!(file.messages.len(), 1);
        assert_eq!(file.messages[0].name, "A");
    }

    #[test]
    fn top_level_enum_path() {
        let file = parse("enum Kind { A = 0; B = 1; }").unwrap();
        assert_eq!(file.enum_at("Kind").unwrap().values.len(), 2);
        assert!(file.enum_at("Widget.Type").is_none());
    }

    #[test]
    fn missing_brace_is_a_syntax_error() {
        let err = parse("message A {\n  string x = 1;\n").unwrap_err();
        assert!(matches!(err, SchemaError::Syntax { .. }));
    }

    #[test]
    fn unterminated_comment() {
        let err = parse("message A {}\n/* open").unwrap_err();
        assert_eq!(
            err,
            SchemaError::Syntax {
                line: 2,
                message: "unterminated block comment".into()
            }
        );
    }

    #[test]
    fn bad_field_reports_line() {
        let err = parse("message A {\n  string = 1;\n}").unwrap_err();
        assert_eq!(
            err,
            SchemaError::Syntax {
                line: 2,
                message: "expected an identifier".into()
            }
        );
    }
}
