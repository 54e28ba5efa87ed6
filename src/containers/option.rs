// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! `Option<T>` and `Result<T, E>`: a one-byte flag, then the payload.
//!
//! The flag is read like a boolean, so under the default policy any nonzero
//! byte means "present" (or "ok").

use crate::codec::{Decode, Encode};
use crate::error::Result;
use crate::fixed::read_flag;
use crate::io::{Output, Reader};

const ABSENT: u8 = 0x00;
const PRESENT: u8 = 0x01;

impl<T: Encode> Encode for Option<T> {
    fn encode_to<O: Output + ?Sized>(&self, dest: &mut O) {
        match self {
            None => dest.push_byte(ABSENT),
            Some(value) => {
                dest.push_byte(PRESENT);
                value.encode_to(dest);
            }
        }
    }

    fn encoded_size(&self) -> usize {
        1 + self.as_ref().map_or(0, Encode::encoded_size)
    }
}

impl<T: Decode> Decode for Option<T> {
    fn decode(input: &mut Reader<'_>) -> Result<Self> {
        if read_flag(input)? {
            input.descend(T::decode).map(Some)
        } else {
            Ok(None)
        }
    }
}

impl<T: Encode, E: Encode> Encode for std::result::Result<T, E> {
    fn encode_to<O: Output + ?Sized>(&self, dest: &mut O) {
        match self {
            Ok(value) => {
                dest.push_byte(PRESENT);
                value.encode_to(dest);
            }
            Err(err) => {
                dest.push_byte(ABSENT);
                err.encode_to(dest);
            }
        }
    }

    fn encoded_size(&self) -> usize {
        1 + match self {
            Ok(value) => value.encoded_size(),
            Err(err) => err.encoded_size(),
        }
    }
}

impl<T: Decode, E: Decode> Decode for std::result::Result<T, E> {
    fn decode(input: &mut Reader<'_>) -> Result<Self> {
        if read_flag(input)? {
            input.descend(T::decode).map(Ok)
        } else {
            input.descend(E::decode).map(Err)
        }
    }
}
