// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Kind descriptors: the text form of a [`Kind`].
//!
//! ```text
//! kind    := leaf | generic | array | tuple | record | enum
//! leaf    := bool | u8 | u16 | u32 | u64 | u128 | i8 | i16 | i32 | i64 | i128
//!          | Compact | Str | Bytes | ()
//! generic := Vec<kind> | Option<kind> | Result<kind, kind> | Map<kind, kind>
//! array   := [kind; N]
//! tuple   := (kind, ...)              trailing comma allowed
//! record  := {name: kind, ...}
//! enum    := Enum{tag: kind, ...}     tag in 0..=255
//! ```
//!
//! Whitespace is free between tokens. Columns in errors are 1-based.

use std::collections::btree_map::Entry;
use std::collections::{BTreeMap, HashSet};
use std::str::FromStr;

use super::kind::{configuration, Field, Kind};
use crate::error::KindError;

impl FromStr for Kind {
    type Err = KindError;

    fn from_str(descriptor: &str) -> Result<Self, Self::Err> {
        let mut parser = Parser {
            src: descriptor,
            pos: 0,
        };
        parser.descriptor().map_err(configuration)
    }
}

struct Parser<'a> {
    src: &'a str,
    pos: usize,
}

impl<'a> Parser<'a> {
    fn descriptor(&mut self) -> Result<Kind, KindError> {
        let kind = self.kind()?;
        self.skip_ws();
        if self.pos < self.src.len() {
            return Err(self.error("unexpected trailing input"));
        }
        Ok(kind)
    }

    fn error(&self, detail: impl Into<String>) -> KindError {
        KindError::Syntax {
            column: self.src[..self.pos].chars().count() + 1,
            detail: detail.into(),
        }
    }

    fn peek(&self) -> Option<char> {
        self.src[self.pos..].chars().next()
    }

    fn skip_ws(&mut self) {
        while let Some(c) = self.peek().filter(|c| c.is_whitespace()) {
            self.pos += c.len_utf8();
        }
    }

    /// Consume `expected` after optional whitespace.
    fn eat(&mut self, expected: char) -> bool {
        self.skip_ws();
        if self.peek() == Some(expected) {
            self.pos += expected.len_utf8();
            true
        } else {
            false
        }
    }

    fn expect(&mut self, expected: char) -> Result<(), KindError> {
        if self.eat(expected) {
            Ok(())
        } else {
            Err(self.error(format!("expected `{expected}`")))
        }
    }

    fn take_while(&mut self, pred: impl Fn(char) -> bool) -> &'a str {
        let src = self.src;
        let start = self.pos;
        while let Some(c) = self.peek().filter(|&c| pred(c)) {
            self.pos += c.len_utf8();
        }
        &src[start..self.pos]
    }

    fn ident(&mut self) -> &'a str {
        self.take_while(|c| c.is_ascii_alphanumeric() || c == '_')
    }

    fn number<T: FromStr>(&mut self, what: &str) -> Result<T, KindError> {
        self.skip_ws();
        let digits = self.take_while(|c| c.is_ascii_digit());
        if digits.is_empty() {
            return Err(self.error(format!("expected {what}")));
        }
        digits
            .parse()
            .map_err(|_| self.error(format!("{what} {digits} out of range")))
    }

    fn kind(&mut self) -> Result<Kind, KindError> {
        self.skip_ws();
        match self.peek() {
            Some('(') => self.tuple(),
            Some('[') => self.array(),
            Some('{') => self.record(),
            Some(c) if c.is_ascii_alphabetic() => self.named(),
            Some(c) => Err(self.error(format!("unexpected `{c}`"))),
            None => Err(self.error("unexpected end of descriptor")),
        }
    }

    fn named(&mut self) -> Result<Kind, KindError> {
        let name = self.ident();
        Ok(match name {
            "bool" => Kind::Bool,
            "u8" => Kind::U8,
            "u16" => Kind::U16,
            "u32" => Kind::U32,
            "u64" => Kind::U64,
            "u128" => Kind::U128,
            "i8" => Kind::I8,
            "i16" => Kind::I16,
            "i32" => Kind::I32,
            "i64" => Kind::I64,
            "i128" => Kind::I128,
            "Compact" => Kind::Compact,
            "Str" => Kind::Str,
            "Bytes" => Kind::Bytes,
            "Vec" => {
                let [element] = self.arguments::<1>()?;
                Kind::sequence(element)
            }
            "Option" => {
                let [inner] = self.arguments::<1>()?;
                Kind::option(inner)
            }
            "Result" => {
                let [ok, err] = self.arguments::<2>()?;
                Kind::result(ok, err)
            }
            "Map" => {
                let [key, value] = self.arguments::<2>()?;
                Kind::dictionary(key, value)
            }
            "Enum" => self.varying()?,
            other => return Err(KindError::UnknownKind(other.to_string())),
        })
    }

    /// `<kind, ...>` with exactly `N` arguments.
    fn arguments<const N: usize>(&mut self) -> Result<[Kind; N], KindError> {
        self.expect('<')?;
        let mut args = Vec::with_capacity(N);
        loop {
            args.push(self.kind()?);
            if !self.eat(',') {
                break;
            }
        }
        self.expect('>')?;
        let found = args.len();
        <[Kind; N]>::try_from(args)
            .map_err(|_| self.error(format!("expected {N} type arguments, found {found}")))
    }

    fn array(&mut self) -> Result<Kind, KindError> {
        self.expect('[')?;
        let element = self.kind()?;
        self.expect(';')?;
        let len = self.number("array length")?;
        self.expect(']')?;
        Ok(Kind::array(element, len))
    }

    fn tuple(&mut self) -> Result<Kind, KindError> {
        self.expect('(')?;
        let mut items = Vec::new();
        while !self.eat(')') {
            items.push(self.kind()?);
            if !self.eat(',') {
                self.expect(')')?;
                break;
            }
        }
        Ok(if items.is_empty() {
            Kind::Unit
        } else {
            Kind::tuple(items)
        })
    }

    fn record(&mut self) -> Result<Kind, KindError> {
        self.expect('{')?;
        let mut fields = Vec::new();
        let mut seen = HashSet::new();
        while !self.eat('}') {
            self.skip_ws();
            let name = self.ident();
            if name.is_empty() || name.starts_with(|c: char| c.is_ascii_digit()) {
                return Err(self.error("expected field name"));
            }
            if !seen.insert(name) {
                return Err(self.error(format!("duplicate field `{name}`")));
            }
            self.expect(':')?;
            fields.push(Field::named(name, self.kind()?));
            if !self.eat(',') {
                self.expect('}')?;
                break;
            }
        }
        Ok(Kind::Tuple(fields))
    }

    fn varying(&mut self) -> Result<Kind, KindError> {
        self.expect('{')?;
        let mut schema = BTreeMap::new();
        while !self.eat('}') {
            let tag: u8 = self.number("variant tag")?;
            self.expect(':')?;
            let kind = self.kind()?;
            match schema.entry(tag) {
                Entry::Occupied(_) => return Err(KindError::DuplicateVariant(tag)),
                Entry::Vacant(slot) => {
                    slot.insert(kind);
                }
            }
            if !self.eat(',') {
                self.expect('}')?;
                break;
            }
        }
        Ok(Kind::Varying(schema))
    }
}
