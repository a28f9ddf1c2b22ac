// Firewall endpoints: aliases, alias entries, and filter rules.
//
// Write operations carry an `apply` flag; with it unset, changes land in
// the pending config and take effect on the next explicit apply.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::client::Client;
use crate::error::Error;

const ALIAS_ENDPOINT: &str = "api/v1/firewall/alias";
const ALIAS_ENTRY_ENDPOINT: &str = "api/v1/firewall/alias/entry";
const RULE_ENDPOINT: &str = "api/v1/firewall/rule";
const APPLY_ENDPOINT: &str = "api/v1/firewall/apply";

/// A firewall alias. `address` and `detail` are space-joined on the wire.
#[derive(Debug, Clone, Deserialize)]
pub struct FirewallAlias {
    pub name: String,
    #[serde(default, rename = "type")]
    pub alias_type: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub descr: String,
    #[serde(default)]
    pub detail: String,
}

/// Create-or-update request for an alias.
#[derive(Debug, Clone, Default, Serialize)]
pub struct FirewallAliasRequest {
    pub address: Vec<String>,
    pub descr: String,
    pub detail: Vec<String>,
    pub name: String,
    #[serde(rename = "type")]
    pub alias_type: String,
}

#[derive(Serialize)]
struct FirewallAliasCreateBody<'a> {
    #[serde(flatten)]
    request: &'a FirewallAliasRequest,
    apply: bool,
}

#[derive(Serialize)]
struct FirewallAliasUpdateBody<'a> {
    #[serde(flatten)]
    request: &'a FirewallAliasRequest,
    apply: bool,
    id: &'a str,
}

#[derive(Serialize)]
struct AliasEntryBody<'a> {
    address: Vec<&'a str>,
    apply: bool,
    detail: Vec<&'a str>,
    name: &'a str,
}

/// Who last touched a rule, and when.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RuleChangeStamp {
    #[serde(default)]
    pub time: String,
    #[serde(default)]
    pub username: String,
}

/// A firewall filter rule. Counters and limits come back stringly typed,
/// matching the config store.
#[derive(Debug, Clone, Deserialize)]
pub struct FirewallRule {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub tracker: String,
    #[serde(default, rename = "type")]
    pub rule_type: String,
    #[serde(default)]
    pub interface: String,
    #[serde(default)]
    pub ipprotocol: String,
    #[serde(default)]
    pub tag: String,
    #[serde(default)]
    pub tagged: String,
    #[serde(default)]
    pub max: String,
    #[serde(default, rename = "max-src-nodes")]
    pub max_src_nodes: String,
    #[serde(default, rename = "max-src-conn")]
    pub max_src_conn: String,
    #[serde(default, rename = "max-src-states")]
    pub max_src_states: String,
    #[serde(default)]
    pub statetimeout: String,
    #[serde(default)]
    pub statetype: String,
    #[serde(default)]
    pub os: String,
    #[serde(default)]
    pub source: HashMap<String, String>,
    #[serde(default)]
    pub destination: HashMap<String, String>,
    #[serde(default)]
    pub descr: String,
    #[serde(default)]
    pub updated: RuleChangeStamp,
    #[serde(default)]
    pub created: RuleChangeStamp,
}

/// Create-or-update request for a filter rule.
#[derive(Debug, Clone, Default, Serialize)]
pub struct FirewallRuleRequest {
    #[serde(rename = "ackqueue")]
    pub ack_queue: String,
    #[serde(rename = "defaultqueue")]
    pub default_queue: String,
    pub descr: String,
    pub direction: String,
    pub disabled: bool,
    pub dnpipe: String,
    pub dst: String,
    #[serde(rename = "dstport")]
    pub dst_port: String,
    pub floating: bool,
    pub gateway: String,
    #[serde(rename = "icmptype")]
    pub icmp_type: Vec<String>,
    pub interface: Vec<String>,
    pub ipprotocol: String,
    pub log: bool,
    pub pdnpipe: String,
    pub protocol: String,
    pub quick: bool,
    pub sched: String,
    pub src: String,
    #[serde(rename = "srcport")]
    pub src_port: String,
    #[serde(rename = "statetype")]
    pub state_type: String,
    pub tcpflags_any: bool,
    pub tcpflags1: Vec<String>,
    pub tcpflags2: Vec<String>,
    pub top: bool,
    #[serde(rename = "type")]
    pub rule_type: String,
}

#[derive(Serialize)]
struct FirewallRuleCreateBody<'a> {
    #[serde(flatten)]
    request: &'a FirewallRuleRequest,
    apply: bool,
}

#[derive(Serialize)]
struct FirewallRuleUpdateBody<'a> {
    #[serde(flatten)]
    request: &'a FirewallRuleRequest,
    apply: bool,
    tracker: i64,
}

impl Client {
    // ── Aliases ──────────────────────────────────────────────────────

    /// List all firewall aliases.
    pub async fn list_firewall_aliases(&self) -> Result<Vec<FirewallAlias>, Error> {
        self.get(ALIAS_ENDPOINT, &[]).await
    }

    /// Create a new alias.
    pub async fn create_firewall_alias(
        &self,
        request: &FirewallAliasRequest,
        apply: bool,
    ) -> Result<FirewallAlias, Error> {
        let body = FirewallAliasCreateBody { request, apply };
        self.post(ALIAS_ENDPOINT, &[], Some(&body)).await
    }

    /// Update the alias currently named `name`.
    pub async fn update_firewall_alias(
        &self,
        name: &str,
        request: &FirewallAliasRequest,
        apply: bool,
    ) -> Result<FirewallAlias, Error> {
        let body = FirewallAliasUpdateBody {
            request,
            apply,
            id: name,
        };
        self.put(ALIAS_ENDPOINT, &[], Some(&body)).await
    }

    /// Delete an alias by name.
    pub async fn delete_firewall_alias(&self, name: &str, apply: bool) -> Result<(), Error> {
        self.delete_empty(
            ALIAS_ENDPOINT,
            &[("id", name.to_owned()), ("apply", apply.to_string())],
        )
        .await
    }

    /// Add addresses to an existing alias. Entries are
    /// `(address, description)` pairs.
    pub async fn add_firewall_alias_entries(
        &self,
        name: &str,
        entries: &[(String, String)],
        apply: bool,
    ) -> Result<(), Error> {
        let body = AliasEntryBody {
            address: entries.iter().map(|(addr, _)| addr.as_str()).collect(),
            apply,
            detail: entries.iter().map(|(_, descr)| descr.as_str()).collect(),
            name,
        };
        self.post_empty(ALIAS_ENTRY_ENDPOINT, &[], Some(&body)).await
    }

    /// Remove one address from an alias.
    pub async fn delete_firewall_alias_entry(
        &self,
        name: &str,
        address: &str,
        apply: bool,
    ) -> Result<(), Error> {
        self.delete_empty(
            ALIAS_ENTRY_ENDPOINT,
            &[
                ("name", name.to_owned()),
                ("address", address.to_owned()),
                ("apply", apply.to_string()),
            ],
        )
        .await
    }

    /// Apply pending firewall changes.
    pub async fn apply_firewall_changes(&self) -> Result<(), Error> {
        self.post_empty(APPLY_ENDPOINT, &[], None::<&()>).await
    }

    // ── Rules ────────────────────────────────────────────────────────

    /// List all filter rules.
    pub async fn list_firewall_rules(&self) -> Result<Vec<FirewallRule>, Error> {
        self.get(RULE_ENDPOINT, &[]).await
    }

    /// Create a new filter rule.
    pub async fn create_firewall_rule(
        &self,
        request: &FirewallRuleRequest,
        apply: bool,
    ) -> Result<FirewallRule, Error> {
        let body = FirewallRuleCreateBody { request, apply };
        self.post(RULE_ENDPOINT, &[], Some(&body)).await
    }

    /// Update the rule with the given tracker ID.
    pub async fn update_firewall_rule(
        &self,
        tracker: i64,
        request: &FirewallRuleRequest,
        apply: bool,
    ) -> Result<FirewallRule, Error> {
        let body = FirewallRuleUpdateBody {
            request,
            apply,
            tracker,
        };
        self.put(RULE_ENDPOINT, &[], Some(&body)).await
    }

    /// Delete the rule with the given tracker ID.
    pub async fn delete_firewall_rule(&self, tracker: i64, apply: bool) -> Result<(), Error> {
        self.delete_empty(
            RULE_ENDPOINT,
            &[
                ("tracker", tracker.to_string()),
                ("apply", apply.to_string()),
            ],
        )
        .await
    }
}
