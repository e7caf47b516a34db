//! Numbers that browser forms send as text.
//!
//! Form inputs hand over their value as a string, so `"quantity": "3"` arrives as often
//! as `"quantity": 3`. Fields marked `#[serde(deserialize_with = "number_or_text")]`
//! take either; text that does not parse is still an error.

use serde::de::{self, Deserializer};
use serde::Deserialize;
use std::fmt::Display;
use std::str::FromStr;

#[derive(Deserialize)]
#[serde(untagged)]
enum NumberOrText<T> {
    Number(T),
    Text(String),
}

pub fn number_or_text<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + FromStr,
    T::Err: Display,
{
    match NumberOrText::<T>::deserialize(deserializer)? {
        NumberOrText::Number(n) => Ok(n),
        NumberOrText::Text(text) => text
            .trim()
            .parse()
            .map_err(|e| de::Error::custom(format!("invalid number {text:?}: {e}"))),
    }
}
