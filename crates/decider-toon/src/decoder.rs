//! TOON Decoder — parses text back into a [`Value`] tree.
//!
//! Single pass over the UTF-8 bytes of the input. The grammar is LL(1): the
//! first non-whitespace byte decides what follows.
//!
//! - `{` → map of `key:value` pairs
//! - `[` → sequence of whitespace-separated values
//! - `"` → quoted string with JSON-style escapes
//! - anything else → atom, resolved as `null`/`true`/`false`, integer, float,
//!   or bare string, in that order
//!
//! Open containers live on an explicit stack rather than the call stack, so
//! nesting depth costs heap, not native stack.
//!
//! The decoder is more permissive than the encoder: it accepts any atom that
//! is not a literal or a number as a string, including words the encoder
//! would have quoted (`a.b`, `hello!`). Only text the encoder produces is
//! guaranteed to round-trip.

use crate::error::{Result, ToonError};
use crate::types::{Map, Value};

/// Deepest container nesting the codec accepts. The encoder refuses deeper
/// trees, so everything it emits decodes again.
pub const MAX_DEPTH: usize = 10_000;

/// Decode a TOON document containing exactly one value.
///
/// Whitespace may surround the value; anything else after it is an error.
///
/// # Example
/// ```
/// use decider_toon::{decode, Value};
/// let value = decode("{name:decider tags:[cli adr]}").unwrap();
/// assert_eq!(value.get("name"), Some(&Value::from("decider")));
/// ```
pub fn decode(text: &str) -> Result<Value> {
    let mut decoder = Decoder::new(text);
    let value = decoder.next_value()?.ok_or(ToonError::UnexpectedEof {
        offset: text.len(),
        context: "document",
    })?;
    decoder.skip_whitespace();
    if !decoder.at_end() {
        return Err(ToonError::TrailingCharacters {
            offset: decoder.pos,
        });
    }
    Ok(value)
}

/// Cursor over TOON text yielding consecutive top-level values.
///
/// ```
/// use decider_toon::{Decoder, Value};
/// let values: Vec<Value> = Decoder::new("1 two [3]")
///     .collect::<Result<_, _>>()
///     .unwrap();
/// assert_eq!(values.len(), 3);
/// ```
pub struct Decoder<'a> {
    input: &'a str,
    pos: usize,
}

/// A container whose closing bracket has not been seen yet.
struct Frame {
    /// Offset of the opening bracket.
    start: usize,
    container: Container,
}

enum Container {
    Sequence(Vec<Value>),
    /// `key` holds a decoded key still waiting for its value.
    Map { map: Map, key: Option<String> },
}

impl Frame {
    fn closing(&self) -> u8 {
        match self.container {
            Container::Sequence(_) => b']',
            Container::Map { .. } => b'}',
        }
    }

    fn context(&self) -> &'static str {
        match self.container {
            Container::Sequence(_) => "sequence",
            Container::Map { .. } => "map",
        }
    }

    fn into_value(self) -> Value {
        match self.container {
            Container::Sequence(items) => Value::Sequence(items),
            Container::Map { map, .. } => Value::Map(map),
        }
    }
}

/// What the decoding loop does next.
enum Step {
    /// Read a value (or open a container) at the cursor.
    Read,
    /// Inside a container: close it or read its next element.
    Next,
    /// Hand a finished value, which started at `offset`, to its parent.
    Attach { value: Value, offset: usize },
}

impl<'a> Decoder<'a> {
    pub fn new(input: &'a str) -> Self {
        Self { input, pos: 0 }
    }

    /// Byte offset of the cursor.
    pub fn offset(&self) -> usize {
        self.pos
    }

    /// Decode the next value, or `None` once only whitespace remains.
    pub fn next_value(&mut self) -> Result<Option<Value>> {
        self.skip_whitespace();
        if self.at_end() {
            return Ok(None);
        }
        self.decode_value().map(Some)
    }

    fn at_end(&self) -> bool {
        self.pos >= self.input.len()
    }

    fn peek(&self) -> Option<u8> {
        self.input.as_bytes().get(self.pos).copied()
    }

    fn skip_whitespace(&mut self) {
        while let Some(b) = self.peek() {
            if !is_whitespace(b) {
                break;
            }
            self.pos += 1;
        }
    }

    fn decode_value(&mut self) -> Result<Value> {
        let mut stack: Vec<Frame> = Vec::new();
        let mut step = Step::Read;
        loop {
            step = match step {
                Step::Read => self.read(&mut stack)?,
                Step::Next => self.next_slot(&mut stack)?,
                Step::Attach { value, offset } => match stack.last_mut() {
                    Some(frame) => self.attach(frame, value, offset)?,
                    None => return Ok(value),
                },
            };
        }
    }

    fn read(&mut self, stack: &mut Vec<Frame>) -> Result<Step> {
        self.skip_whitespace();
        let offset = self.pos;
        let value = match self.peek() {
            None => {
                return Err(ToonError::UnexpectedEof {
                    offset,
                    context: "value",
                })
            }
            Some(open @ (b'{' | b'[')) => {
                if stack.len() >= MAX_DEPTH {
                    return Err(ToonError::DepthLimitExceeded { offset });
                }
                self.pos += 1;
                let container = if open == b'{' {
                    Container::Map {
                        map: Map::new(),
                        key: None,
                    }
                } else {
                    Container::Sequence(Vec::new())
                };
                stack.push(Frame {
                    start: offset,
                    container,
                });
                return Ok(Step::Next);
            }
            Some(b'"') => Value::String(self.decode_quoted_string()?),
            Some(_) => self.decode_atom()?,
        };
        Ok(Step::Attach { value, offset })
    }

    fn next_slot(&mut self, stack: &mut Vec<Frame>) -> Result<Step> {
        self.skip_whitespace();
        let Some(frame) = stack.last() else {
            return Ok(Step::Read);
        };
        match self.peek() {
            None => Err(ToonError::UnexpectedEof {
                offset: self.pos,
                context: frame.context(),
            }),
            Some(b) if b == frame.closing() => {
                self.pos += 1;
                let offset = frame.start;
                let value = stack.pop().map_or(Value::Null, Frame::into_value);
                Ok(Step::Attach { value, offset })
            }
            Some(_) => Ok(Step::Read),
        }
    }

    fn attach(&mut self, frame: &mut Frame, value: Value, offset: usize) -> Result<Step> {
        match &mut frame.container {
            Container::Sequence(items) => {
                items.push(value);
                Ok(Step::Next)
            }
            Container::Map { map, key } => match key.take() {
                Some(k) => {
                    // Last occurrence of a duplicate key wins.
                    map.insert(k, value);
                    Ok(Step::Next)
                }
                None => {
                    let k = match value {
                        Value::String(s) => s,
                        other => {
                            return Err(ToonError::InvalidKeyType {
                                offset,
                                found: other.type_name(),
                            })
                        }
                    };
                    self.expect_colon()?;
                    *key = Some(k);
                    Ok(Step::Read)
                }
            },
        }
    }

    fn expect_colon(&mut self) -> Result<()> {
        self.skip_whitespace();
        match self.peek() {
            Some(b':') => {
                self.pos += 1;
                Ok(())
            }
            None => Err(ToonError::UnexpectedEof {
                offset: self.pos,
                context: "map",
            }),
            Some(_) => Err(ToonError::ExpectedColon { offset: self.pos }),
        }
    }

    fn decode_quoted_string(&mut self) -> Result<String> {
        let start = self.pos;
        let bytes = self.input.as_bytes();
        let mut i = start + 1;

        while i < bytes.len() {
            match bytes[i] {
                b'\\' => i += 2,
                b'"' => {
                    let raw = &self.input[start + 1..i];
                    self.pos = i + 1;
                    return Ok(unescape(raw));
                }
                _ => i += 1,
            }
        }
        Err(ToonError::UnterminatedString { offset: start })
    }

    fn decode_atom(&mut self) -> Result<Value> {
        let start = self.pos;
        while let Some(b) = self.peek() {
            if is_whitespace(b) || is_structural(b) {
                break;
            }
            self.pos += 1;
        }

        let atom = &self.input[start..self.pos];
        if atom.is_empty() {
            return Err(ToonError::EmptyAtom { offset: start });
        }
        Ok(parse_atom(atom))
    }
}

impl Iterator for Decoder<'_> {
    type Item = Result<Value>;

    fn next(&mut self) -> Option<Self::Item> {
        match self.next_value() {
            Ok(Some(value)) => Some(Ok(value)),
            Ok(None) => None,
            Err(err) => {
                // No recovery after an error: stop iterating.
                self.pos = self.input.len();
                Some(Err(err))
            }
        }
    }
}

fn is_whitespace(b: u8) -> bool {
    matches!(b, b' ' | b'\t' | b'\n' | b'\r')
}

fn is_structural(b: u8) -> bool {
    matches!(b, b'{' | b'}' | b'[' | b']' | b':')
}

/// Resolve an unquoted token.
///
/// Type inference order: literals → integer → float → bare string. Spellings
/// of non-finite floats (`inf`, `NaN`) stay strings.
fn parse_atom(atom: &str) -> Value {
    match atom {
        "null" => return Value::Null,
        "true" => return Value::Bool(true),
        "false" => return Value::Bool(false),
        _ => {}
    }

    if let Ok(i) = atom.parse::<i64>() {
        return Value::Int(i);
    }

    if let Ok(f) = atom.parse::<f64>() {
        if f.is_finite() {
            return Value::Float(f);
        }
    }

    Value::String(atom.to_string())
}

/// Unescape the body of a quoted string (`\" \\ \/ \n \r \t \b \f \uXXXX`).
/// Unknown or malformed escapes are kept verbatim.
fn unescape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut rest = raw;

    while let Some(idx) = rest.find('\\') {
        out.push_str(&rest[..idx]);
        let after = &rest[idx + 1..];
        let consumed = match after.chars().next() {
            Some('"') => {
                out.push('"');
                1
            }
            Some('\\') => {
                out.push('\\');
                1
            }
            Some('/') => {
                out.push('/');
                1
            }
            Some('n') => {
                out.push('\n');
                1
            }
            Some('r') => {
                out.push('\r');
                1
            }
            Some('t') => {
                out.push('\t');
                1
            }
            Some('b') => {
                out.push('\u{08}');
                1
            }
            Some('f') => {
                out.push('\u{0c}');
                1
            }
            Some('u') => match parse_unicode_escape(&after[1..]) {
                Some((ch, len)) => {
                    out.push(ch);
                    1 + len
                }
                None => {
                    out.push_str("\\u");
                    1
                }
            },
            Some(other) => {
                out.push('\\');
                out.push(other);
                other.len_utf8()
            }
            None => {
                out.push('\\');
                0
            }
        };
        rest = &after[consumed..];
    }

    out.push_str(rest);
    out
}

/// Parse the hex digits after `\u`, joining a surrogate pair when one follows.
/// Returns the character and the number of bytes consumed after the `u`.
fn parse_unicode_escape(s: &str) -> Option<(char, usize)> {
    let high = hex4(s)?;
    if (0xD800..0xDC00).contains(&high) {
        let low = s.get(4..)?.strip_prefix("\\u").and_then(hex4)?;
        if !(0xDC00..0xE000).contains(&low) {
            return None;
        }
        let code = 0x10000 + ((high - 0xD800) << 10) + (low - 0xDC00);
        return char::from_u32(code).map(|c| (c, 10));
    }
    char::from_u32(high).map(|c| (c, 4))
}

fn hex4(s: &str) -> Option<u32> {
    let digits = s.get(..4)?;
    if !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }
    u32::from_str_radix(digits, 16).ok()
}
