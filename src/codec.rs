//! Conversions between a bound value and its query parameter text.
//!
//! `JsonCodec` is the default wire format. `PlainCodec` covers values that
//! read better unquoted in the address bar (`?tab=chat` instead of
//! `?tab=%22chat%22`).

#[cfg(test)]
#[path = "codec_test.rs"]
mod codec_test;

use std::fmt::Display;
use std::marker::PhantomData;
use std::str::FromStr;

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde::ser::{self, Impossible};

use crate::error::QueryStateError;

/// Encodes a value into query parameter text and decodes it back.
pub trait ParamCodec<T> {
    /// Text to store under `param`, or `None` to remove the parameter.
    ///
    /// # Errors
    ///
    /// Returns an error if the value cannot be represented.
    fn encode(&self, param: &str, value: &T) -> Result<Option<String>, QueryStateError>;

    /// Value for the text found under `param`.
    ///
    /// # Errors
    ///
    /// Returns an error if the text is not a valid encoding of `T`.
    fn decode(&self, param: &str, raw: &str) -> Result<T, QueryStateError>;
}

/// JSON wire format.
///
/// The parameter holds `serde_json::to_string(value)`. A value that is null
/// or the empty string removes the parameter; every other value is written,
/// including `0`, `false`, `[]`, `{}` and non-finite floats (as `null`).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct JsonCodec;

impl<T> ParamCodec<T> for JsonCodec
where
    T: Serialize + DeserializeOwned,
{
    fn encode(&self, param: &str, value: &T) -> Result<Option<String>, QueryStateError> {
        if is_empty_value(value) {
            return Ok(None);
        }
        serde_json::to_string(value)
            .map(Some)
            .map_err(|source| QueryStateError::Encode {
                param: param.to_owned(),
                source,
            })
    }

    fn decode(&self, param: &str, raw: &str) -> Result<T, QueryStateError> {
        serde_json::from_str(raw).map_err(|source| QueryStateError::Decode {
            param: param.to_owned(),
            source,
        })
    }
}

/// `null` and `""` only, judged on the value itself rather than its JSON
/// text: `None`, `()` and unit structs are null, while a non-finite float
/// (which JSON also writes as `null`) is kept.
fn is_empty_value<T: Serialize + ?Sized>(value: &T) -> bool {
    matches!(value.serialize(EmptyCheck), Ok(true))
}

/// Serializer that only answers "is this null or the empty string".
/// Compound values bail out with `NotEmpty` before visiting any element.
struct EmptyCheck;

#[derive(Debug)]
struct NotEmpty;

impl std::fmt::Display for NotEmpty {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("value is not empty")
    }
}

impl std::error::Error for NotEmpty {}

impl ser::Error for NotEmpty {
    fn custom<M: Display>(_msg: M) -> Self {
        Self
    }
}

impl ser::Serializer for EmptyCheck {
    type Ok = bool;
    type Error = NotEmpty;
    type SerializeSeq = Impossible<bool, NotEmpty>;
    type SerializeTuple = Impossible<bool, NotEmpty>;
    type SerializeTupleStruct = Impossible<bool, NotEmpty>;
    type SerializeTupleVariant = Impossible<bool, NotEmpty>;
    type SerializeMap = Impossible<bool, NotEmpty>;
    type SerializeStruct = Impossible<bool, NotEmpty>;
    type SerializeStructVariant = Impossible<bool, NotEmpty>;

    fn serialize_bool(self, _v: bool) -> Result<bool, NotEmpty> {
        Ok(false)
    }

    fn serialize_i8(self, _v: i8) -> Result<bool, NotEmpty> {
        Ok(false)
    }

    fn serialize_i16(self, _v: i16) -> Result<bool, NotEmpty> {
        Ok(false)
    }

    fn serialize_i32(self, _v: i32) -> Result<bool, NotEmpty> {
        Ok(false)
    }

    fn serialize_i64(self, _v: i64) -> Result<bool, NotEmpty> {
        Ok(false)
    }

    fn serialize_u8(self, _v: u8) -> Result<bool, NotEmpty> {
        Ok(false)
    }

    fn serialize_u16(self, _v: u16) -> Result<bool, NotEmpty> {
        Ok(false)
    }

    fn serialize_u32(self, _v: u32) -> Result<bool, NotEmpty> {
        Ok(false)
    }

    fn serialize_u64(self, _v: u64) -> Result<bool, NotEmpty> {
        Ok(false)
    }

    fn serialize_f32(self, _v: f32) -> Result<bool, NotEmpty> {
        Ok(false)
    }

    fn serialize_f64(self, _v: f64) -> Result<bool, NotEmpty> {
        Ok(false)
    }

    fn serialize_char(self, _v: char) -> Result<bool, NotEmpty> {
        Ok(false)
    }

    fn serialize_str(self, v: &str) -> Result<bool, NotEmpty> {
        Ok(v.is_empty())
    }

    fn serialize_bytes(self, _v: &[u8]) -> Result<bool, NotEmpty> {
        Ok(false)
    }

    fn serialize_none(self) -> Result<bool, NotEmpty> {
        Ok(true)
    }

    fn serialize_some<V: Serialize + ?Sized>(self, value: &V) -> Result<bool, NotEmpty> {
        value.serialize(self)
    }

    fn serialize_unit(self) -> Result<bool, NotEmpty> {
        Ok(true)
    }

    fn serialize_unit_struct(self, _name: &'static str) -> Result<bool, NotEmpty> {
        Ok(true)
    }

    fn serialize_unit_variant(
        self,
        _name: &'static str,
        _index: u32,
        variant: &'static str,
    ) -> Result<bool, NotEmpty> {
        Ok(variant.is_empty())
    }

    fn serialize_newtype_struct<V: Serialize + ?Sized>(
        self,
        _name: &'static str,
        value: &V,
    ) -> Result<bool, NotEmpty> {
        value.serialize(self)
    }

    fn serialize_newtype_variant<V: Serialize + ?Sized>(
        self,
        _name: &'static str,
        _index: u32,
        _variant: &'static str,
        _value: &V,
    ) -> Result<bool, NotEmpty> {
        Ok(false)
    }

    fn serialize_seq(self, _len: Option<usize>) -> Result<Self::SerializeSeq, NotEmpty> {
        Err(NotEmpty)
    }

    fn serialize_tuple(self, _len: usize) -> Result<Self::SerializeTuple, NotEmpty> {
        Err(NotEmpty)
    }

    fn serialize_tuple_struct(
        self,
        _name: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeTupleStruct, NotEmpty> {
        Err(NotEmpty)
    }

    fn serialize_tuple_variant(
        self,
        _name: &'static str,
        _index: u32,
        _variant: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeTupleVariant, NotEmpty> {
        Err(NotEmpty)
    }

    fn serialize_map(self, _len: Option<usize>) -> Result<Self::SerializeMap, NotEmpty> {
        Err(NotEmpty)
    }

    fn serialize_struct(
        self,
        _name: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeStruct, NotEmpty> {
        Err(NotEmpty)
    }

    fn serialize_struct_variant(
        self,
        _name: &'static str,
        _index: u32,
        _variant: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeStructVariant, NotEmpty> {
        Err(NotEmpty)
    }
}

/// Unquoted text format via `Display` / `FromStr`. An empty rendering
/// removes the parameter.
pub struct PlainCodec<T> {
    _marker: PhantomData<fn() -> T>,
}

impl<T> PlainCodec<T> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            _marker: PhantomData,
        }
    }
}

impl<T> Default for PlainCodec<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Clone for PlainCodec<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for PlainCodec<T> {}

impl<T> std::fmt::Debug for PlainCodec<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("PlainCodec")
    }
}

impl<T> ParamCodec<T> for PlainCodec<T>
where
    T: FromStr + Display,
    T::Err: Display,
{
    fn encode(&self, _param: &str, value: &T) -> Result<Option<String>, QueryStateError> {
        let text = value.to_string();
        Ok((!text.is_empty()).then_some(text))
    }

    fn decode(&self, param: &str, raw: &str) -> Result<T, QueryStateError> {
        raw.parse::<T>().map_err(|e| QueryStateError::Parse {
            param: param.to_owned(),
            value: raw.to_owned(),
            message: e.to_string(),
        })
    }
}
