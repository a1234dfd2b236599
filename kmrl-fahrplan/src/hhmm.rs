//! `serde(with)` support for `HH:MM` wall-clock times.

use chrono::NaiveTime;
use serde::{Serializer, Deserializer, Deserialize};
use serde::de::Error;

const FORMAT: &str = "%H:%M";

pub fn serialize<S: Serializer>(time: &NaiveTime, ser: S) -> Result<S::Ok, S::Error> {
    ser.serialize_str(&kmrl_util::time::format_hm(time))
}

pub fn deserialize<'de, D: Deserializer<'de>>(de: D) -> Result<NaiveTime, D::Error> {
    let s = String::deserialize(de)?;
    NaiveTime::parse_from_str(&s, FORMAT)
        .map_err(D::Error::custom)
}

pub mod option {
    use chrono::NaiveTime;
    use serde::{Serializer, Deserializer, Deserialize};
    use serde::de::Error;

    pub fn serialize<S: Serializer>(time: &Option<NaiveTime>, ser: S) -> Result<S::Ok, S::Error> {
        match *time {
            Some(ref t) => super::serialize(t, ser),
            None => ser.serialize_none()
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(de: D) -> Result<Option<NaiveTime>, D::Error> {
        let s: Option<String> = Option::deserialize(de)?;
        match s {
            Some(s) => NaiveTime::parse_from_str(&s, super::FORMAT)
                .map(Some)
                .map_err(D::Error::custom),
            None => Ok(None)
        }
    }
}
