//! Serde adapters for prost well-known types and proto3 enums.
//!
//! prost's generated types don't implement `Serialize`/`Deserialize`, so
//! message fields of these types opt in with `#[serde(with = "...")]`:
//!
//! - **Timestamp** as an RFC 3339 string (`"2026-03-01T09:30:00Z"`)
//! - **`FieldMask`** as comma-separated field names (`"title,blocks"`)
//!
//! Proto3 enum fields are `i32` in prost. [`proto_enum_serde`](crate::proto_enum_serde)
//! generates a `with` module that writes the enum's name and reads either the
//! name or the number.

/// `prost_types::Timestamp` as an RFC 3339 string.
///
/// ```
/// use serde::{Deserialize, Serialize};
/// use prost_types::Timestamp;
///
/// #[derive(Serialize, Deserialize)]
/// struct Invite {
///     #[serde(with = "noted_rest::serde::timestamp")]
///     valid_until: Timestamp,
/// }
///
/// let invite = Invite { valid_until: Timestamp { seconds: 1_772_357_400, nanos: 0 } };
/// let json = serde_json::to_string(&invite).unwrap();
/// assert_eq!(json, r#"{"valid_until":"2026-03-01T09:30:00+00:00"}"#);
/// ```
pub mod timestamp {
    use prost_types::Timestamp;
    use serde::{Deserialize, Deserializer, Serializer};

    /// # Errors
    ///
    /// Fails for negative nanos or a time chrono can't represent.
    pub fn serialize<S>(value: &Timestamp, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&to_rfc3339(value).map_err(serde::ser::Error::custom)?)
    }

    /// # Errors
    ///
    /// Fails when the input is not an RFC 3339 string.
    pub fn deserialize<'de, D>(deserializer: D) -> Result<Timestamp, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        from_rfc3339(&raw).map_err(serde::de::Error::custom)
    }

    pub(crate) fn to_rfc3339(value: &Timestamp) -> Result<String, &'static str> {
        let nanos = u32::try_from(value.nanos).map_err(|_| "negative nanos in timestamp")?;
        chrono::DateTime::from_timestamp(value.seconds, nanos)
            .map(|dt| dt.to_rfc3339())
            .ok_or("timestamp out of range")
    }

    pub(crate) fn from_rfc3339(raw: &str) -> Result<Timestamp, chrono::ParseError> {
        let dt = chrono::DateTime::parse_from_rfc3339(raw)?;
        // subsec nanos are < 1e9, always within i32
        #[allow(clippy::cast_possible_wrap)]
        Ok(Timestamp {
            seconds: dt.timestamp(),
            nanos: dt.timestamp_subsec_nanos() as i32,
        })
    }
}

/// `Option<prost_types::Timestamp>` as an RFC 3339 string or `null`.
pub mod opt_timestamp {
    use prost_types::Timestamp;
    use serde::{Deserialize, Deserializer, Serializer};

    /// # Errors
    ///
    /// Fails for negative nanos or a time chrono can't represent.
    pub fn serialize<S>(value: &Option<Timestamp>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match value {
            Some(ts) => super::timestamp::serialize(ts, serializer),
            None => serializer.serialize_none(),
        }
    }

    /// # Errors
    ///
    /// Fails when the input is neither `null` nor an RFC 3339 string.
    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<Timestamp>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Option::<String>::deserialize(deserializer)?
            .map(|raw| super::timestamp::from_rfc3339(&raw).map_err(serde::de::Error::custom))
            .transpose()
    }
}

/// `prost_types::FieldMask` as a comma-separated list of field names.
///
/// Names are kept exactly as the backend spells them (`snake_case`); blank
/// segments are dropped.
///
/// ```
/// use serde::{Deserialize, Serialize};
/// use prost_types::FieldMask;
///
/// #[derive(Serialize, Deserialize)]
/// struct UpdateNote {
///     #[serde(with = "noted_rest::serde::field_mask")]
///     update_mask: FieldMask,
/// }
///
/// let req: UpdateNote = serde_json::from_str(r#"{"update_mask":"title, blocks"}"#).unwrap();
/// assert_eq!(req.update_mask.paths, ["title", "blocks"]);
/// ```
pub mod field_mask {
    use prost_types::FieldMask;
    use serde::{Deserialize, Deserializer, Serializer};

    /// # Errors
    ///
    /// Only the serializer's own errors.
    pub fn serialize<S>(value: &FieldMask, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&value.paths.join(","))
    }

    /// # Errors
    ///
    /// Fails when the input is not a string.
    pub fn deserialize<'de, D>(deserializer: D) -> Result<FieldMask, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        Ok(parse(&raw))
    }

    pub(crate) fn parse(raw: &str) -> FieldMask {
        FieldMask {
            paths: raw
                .split(',')
                .map(str::trim)
                .filter(|path| !path.is_empty())
                .map(str::to_owned)
                .collect(),
        }
    }
}

/// `Option<prost_types::FieldMask>`; `null` and `""` both read as `None`.
pub mod opt_field_mask {
    use prost_types::FieldMask;
    use serde::{Deserialize, Deserializer, Serializer};

    /// # Errors
    ///
    /// Only the serializer's own errors.
    pub fn serialize<S>(value: &Option<FieldMask>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match value {
            Some(mask) => super::field_mask::serialize(mask, serializer),
            None => serializer.serialize_none(),
        }
    }

    /// # Errors
    ///
    /// Fails when the input is neither `null` nor a string.
    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<FieldMask>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(Option::<String>::deserialize(deserializer)?
            .filter(|raw| !raw.trim().is_empty())
            .map(|raw| super::field_mask::parse(&raw)))
    }
}

/// Generate a `#[serde(with)]` module for an `i32` field holding a proto enum.
///
/// The module writes the enum's proto name (`"MARKDOWN"`) and reads either a
/// name or a number. Unknown numbers are written as numbers so nothing the
/// backend sends is lost. The enum must provide `as_str_name`,
/// `from_str_name` and `TryFrom<i32>`, as prost-derived enums do.
///
/// ```ignore
/// noted_rest::proto_enum_serde!(block_type, crate::notes::block::Type);
///
/// #[serde(with = "block_type")]
/// pub r#type: i32,
/// ```
#[macro_export]
macro_rules! proto_enum_serde {
    ($module:ident, $enum_type:ty) => {
        #[allow(missing_docs, clippy::trivially_copy_pass_by_ref)]
        pub mod $module {
            use ::serde::{Deserialize, Deserializer, Serializer};

            #[derive(Deserialize)]
            #[serde(untagged)]
            enum Raw {
                Number(i32),
                Name(::std::string::String),
            }

            pub fn serialize<S>(value: &i32, serializer: S) -> Result<S::Ok, S::Error>
            where
                S: Serializer,
            {
                match <$enum_type>::try_from(*value) {
                    Ok(known) => serializer.serialize_str(known.as_str_name()),
                    Err(_) => serializer.serialize_i32(*value),
                }
            }

            pub fn deserialize<'de, D>(deserializer: D) -> Result<i32, D::Error>
            where
                D: Deserializer<'de>,
            {
                match Raw::deserialize(deserializer)? {
                    Raw::Number(number) => Ok(number),
                    Raw::Name(name) => <$enum_type>::from_str_name(&name)
                        .map(|known| known as i32)
                        .ok_or_else(|| {
                            ::serde::de::Error::custom(format!(
                                "unknown {} value '{}'",
                                stringify!($module),
                                name
                            ))
                        }),
                }
            }
        }
    };
}
