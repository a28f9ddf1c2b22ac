// Deserializers for pfSense JSON quirks.
//
// The appliance's config store is stringly typed, so numbers arrive as
// numbers or strings depending on how the value was last written, booleans
// are encoded by key presence, and lists come as comma-joined strings.

use std::fmt;

use serde::de::{Deserializer, IgnoredAny};
use serde::{Deserialize, Serialize, Serializer};

/// Integer field that may arrive as a JSON number, a numeric string, or an
/// empty string (meaning unset).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MaybeInt(pub Option<i64>);

impl MaybeInt {
    pub fn value(self) -> Option<i64> {
        self.0
    }
}

impl<'de> Deserialize<'de> for MaybeInt {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Number(i64),
            Text(String),
        }

        match Raw::deserialize(deserializer)? {
            Raw::Number(n) => Ok(Self(Some(n))),
            Raw::Text(s) if s.is_empty() => Ok(Self(None)),
            Raw::Text(s) => s
                .parse()
                .map(|n| Self(Some(n)))
                .map_err(serde::de::Error::custom),
        }
    }
}

/// Boolean encoded by key presence: pfSense marks a flag as set by
/// emitting the key with *any* value (usually `""`). Pair with
/// `#[serde(default)]` so an absent key reads as `false`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TrueIfPresent(pub bool);

impl TrueIfPresent {
    pub fn as_bool(self) -> bool {
        self.0
    }
}

impl From<TrueIfPresent> for bool {
    fn from(v: TrueIfPresent) -> Self {
        v.0
    }
}

impl<'de> Deserialize<'de> for TrueIfPresent {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        // Value is irrelevant; presence is the signal.
        IgnoredAny::deserialize(deserializer)?;
        Ok(Self(true))
    }
}

/// List serialized as a comma-joined string, e.g.
/// `"192.168.0.1,192.168.1.1"`. An empty string is an empty list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommaList(pub Vec<String>);

impl CommaList {
    pub fn as_slice(&self) -> &[String] {
        &self.0
    }
}

impl fmt::Display for CommaList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.join(","))
    }
}

impl<'de> Deserialize<'de> for CommaList {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        if raw.is_empty() {
            return Ok(Self(Vec::new()));
        }
        Ok(Self(raw.split(',').map(str::to_owned).collect()))
    }
}

/// Writes go back as a real JSON array; the comma-joined form is only
/// something the appliance emits.
impl Serialize for CommaList {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.0.serialize(serializer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Deserialize)]
    struct Probe {
        #[serde(default)]
        lease: MaybeInt,
        #[serde(default)]
        enable: TrueIfPresent,
        #[serde(default)]
        servers: CommaList,
    }

    fn parse(body: &str) -> Probe {
        serde_json::from_str(body).expect("probe should deserialize")
    }

    #[test]
    fn maybe_int_accepts_all_wire_shapes() {
        assert_eq!(parse(r#"{"lease": 7200}"#).lease.value(), Some(7200));
        assert_eq!(parse(r#"{"lease": "7200"}"#).lease.value(), Some(7200));
        assert_eq!(parse(r#"{"lease": ""}"#).lease.value(), None);
        assert_eq!(parse("{}").lease.value(), None);
    }

    #[test]
    fn maybe_int_rejects_garbage() {
        let result: Result<Probe, _> = serde_json::from_str(r#"{"lease": "soon"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn true_if_present_is_presence_keyed() {
        assert!(parse(r#"{"enable": ""}"#).enable.as_bool());
        assert!(parse(r#"{"enable": "yes"}"#).enable.as_bool());
        assert!(parse(r#"{"enable": 0}"#).enable.as_bool());
        assert!(!parse("{}").enable.as_bool());
    }

    #[test]
    fn comma_list_splits_and_handles_empty() {
        assert_eq!(
            parse(r#"{"servers": "10.0.0.1,10.0.0.2"}"#).servers.0,
            vec!["10.0.0.1", "10.0.0.2"]
        );
        assert_eq!(parse(r#"{"servers": "lone"}"#).servers.0, vec!["lone"]);
        assert!(parse(r#"{"servers": ""}"#).servers.0.is_empty());
    }
}
