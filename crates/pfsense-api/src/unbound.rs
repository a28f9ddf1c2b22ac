// Unbound (DNS resolver) endpoints: host overrides.
//
// Overrides are addressed by array position on the wire; the client
// resolves positions by listing and matching host+domain, which the
// resolver keeps unique.

use serde::{Deserialize, Deserializer, Serialize};
use tracing::debug;

use crate::client::Client;
use crate::error::Error;
use crate::json::CommaList;

const HOST_OVERRIDE_ENDPOINT: &str = "api/v1/services/unbound/host_override";

/// An additional name answering with the parent override's addresses.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct HostOverrideAlias {
    pub host: String,
    pub domain: String,
    pub description: String,
}

/// Alias collection on a host override. The appliance sends `""` instead
/// of an object when there are none.
#[derive(Debug, Clone, Default, Serialize)]
pub struct HostOverrideAliases {
    pub item: Vec<HostOverrideAlias>,
}

impl<'de> Deserialize<'de> for HostOverrideAliases {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Empty(String),
            Object {
                #[serde(default)]
                item: Vec<HostOverrideAlias>,
            },
        }

        match Raw::deserialize(deserializer)? {
            Raw::Empty(_) => Ok(Self::default()),
            Raw::Object { item } => Ok(Self { item }),
        }
    }
}

/// A DNS resolver host override. Used for both reads and writes.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct HostOverride {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub aliases: Option<HostOverrideAliases>,
    #[serde(rename = "descr")]
    pub description: String,
    pub domain: String,
    pub host: String,
    pub ip: CommaList,
}

#[derive(Serialize)]
struct HostOverrideCreateBody<'a> {
    #[serde(flatten)]
    override_: &'a HostOverride,
    apply: bool,
}

#[derive(Serialize)]
struct HostOverrideUpdateBody<'a> {
    #[serde(flatten)]
    override_: &'a HostOverride,
    apply: bool,
    id: String,
}

impl Client {
    /// List all host overrides.
    pub async fn list_unbound_host_overrides(&self) -> Result<Vec<HostOverride>, Error> {
        self.get(HOST_OVERRIDE_ENDPOINT, &[]).await
    }

    /// Create a new host override.
    pub async fn create_unbound_host_override(
        &self,
        override_: &HostOverride,
        apply: bool,
    ) -> Result<HostOverride, Error> {
        let body = HostOverrideCreateBody { override_, apply };
        self.post(HOST_OVERRIDE_ENDPOINT, &[], Some(&body)).await
    }

    /// Update the override matching the request's host and domain.
    pub async fn update_unbound_host_override(
        &self,
        override_: &HostOverride,
        apply: bool,
    ) -> Result<HostOverride, Error> {
        let id = self
            .unbound_host_override_index(&override_.host, &override_.domain)
            .await?;
        let body = HostOverrideUpdateBody {
            override_,
            apply,
            id: id.to_string(),
        };
        self.put(HOST_OVERRIDE_ENDPOINT, &[], Some(&body)).await
    }

    /// Delete the override for `host` in `domain`.
    pub async fn delete_unbound_host_override(
        &self,
        host: &str,
        domain: &str,
        apply: bool,
    ) -> Result<(), Error> {
        let id = self.unbound_host_override_index(host, domain).await?;
        self.delete_empty(
            HOST_OVERRIDE_ENDPOINT,
            &[("id", id.to_string()), ("apply", apply.to_string())],
        )
        .await
    }

    /// Resolve an override's array position by host+domain.
    async fn unbound_host_override_index(&self, host: &str, domain: &str) -> Result<usize, Error> {
        let overrides = self.list_unbound_host_overrides().await?;
        debug!(host, domain, count = overrides.len(), "resolving host override index");
        overrides
            .iter()
            .position(|o| o.host == host && o.domain == domain)
            .ok_or_else(|| Error::NoMatch {
                resource: "host override",
                detail: format!("no override for host {host}, domain {domain}"),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn aliases_accept_empty_string() {
        let parsed: HostOverride = serde_json::from_str(
            r#"{"host":"nas","domain":"lan","descr":"","ip":"10.0.0.5","aliases":""}"#,
        )
        .expect("override should deserialize");
        assert!(parsed.aliases.expect("aliases present").item.is_empty());
        assert_eq!(parsed.ip.as_slice(), ["10.0.0.5"]);
    }

    #[test]
    fn aliases_accept_item_list() {
        let parsed: HostOverride = serde_json::from_str(
            r#"{"host":"nas","domain":"lan","descr":"storage","ip":"10.0.0.5,10.0.0.6",
                "aliases":{"item":[{"host":"files","domain":"lan","description":"alias"}]}}"#,
        )
        .expect("override should deserialize");
        let aliases = parsed.aliases.expect("aliases present");
        assert_eq!(aliases.item.len(), 1);
        assert_eq!(aliases.item[0].host, "files");
        assert_eq!(parsed.ip.as_slice(), ["10.0.0.5", "10.0.0.6"]);
    }

    #[test]
    fn write_shape_uses_real_arrays() {
        let override_ = HostOverride {
            aliases: None,
            description: "printer".into(),
            domain: "lan".into(),
            host: "printer".into(),
            ip: CommaList(vec!["10.0.0.9".into()]),
        };
        let body = serde_json::to_value(&override_).expect("serializes");
        assert_eq!(body["ip"], serde_json::json!(["10.0.0.9"]));
        assert!(body.get("aliases").is_none());
    }
}
