// DHCP endpoints: leases, static mappings, and per-interface server
// configuration.
//
// Static mappings are addressed by array position on the wire; the client
// resolves positions by listing and matching the MAC so callers can work
// with addresses instead of indices.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::client::Client;
use crate::error::Error;
use crate::json::{MaybeInt, TrueIfPresent};

const LEASES_ENDPOINT: &str = "api/v1/services/dhcpd/lease";
const STATIC_MAPPING_ENDPOINT: &str = "api/v1/services/dhcpd/static_mapping";
const SERVER_ENDPOINT: &str = "api/v1/services/dhcpd";

/// A single DHCP lease.
#[derive(Debug, Clone, Deserialize)]
pub struct DhcpLease {
    pub ip: String,
    #[serde(default, rename = "type")]
    pub lease_type: String,
    pub mac: String,
    #[serde(default, rename = "if")]
    pub interface: String,
    #[serde(default)]
    pub starts: String,
    #[serde(default)]
    pub ends: String,
    #[serde(default)]
    pub hostname: String,
    #[serde(default)]
    pub descr: String,
    #[serde(default)]
    pub online: bool,
    #[serde(default)]
    pub staticmap_array_index: i64,
    #[serde(default)]
    pub state: String,
}

/// A DHCP static reservation as returned by the appliance.
#[derive(Debug, Clone, Deserialize)]
pub struct DhcpStaticMapping {
    #[serde(default)]
    pub id: i64,
    pub mac: String,
    #[serde(default)]
    pub cid: String,
    pub ipaddr: String,
    #[serde(default)]
    pub hostname: String,
    #[serde(default)]
    pub descr: String,
    #[serde(default)]
    pub filename: String,
    #[serde(default)]
    pub rootpath: String,
    #[serde(default, rename = "defaultleasetime")]
    pub default_lease_time: String,
    #[serde(default, rename = "maxleasetime")]
    pub max_lease_time: String,
    #[serde(default)]
    pub gateway: String,
    #[serde(default)]
    pub domain: String,
    #[serde(default, rename = "domainsearchlist")]
    pub domain_search_list: String,
    #[serde(default, rename = "ddnsdomain")]
    pub ddns_domain: String,
    #[serde(default, rename = "ddnsdomainprimary")]
    pub ddns_domain_primary: String,
    #[serde(default, rename = "ddnsdomainsecondary")]
    pub ddns_domain_secondary: String,
    #[serde(default, rename = "ddnsdomainkeyname")]
    pub ddns_domain_key_name: String,
    #[serde(default, rename = "ddnsdomainkeyalgorithm")]
    pub ddns_domain_key_algorithm: String,
    #[serde(default, rename = "ddnsdomainkey")]
    pub ddns_domain_key: String,
    #[serde(default, rename = "dnsserver")]
    pub dns_servers: Vec<String>,
    #[serde(default)]
    pub tftp: String,
    #[serde(default)]
    pub ldap: String,
    #[serde(default, rename = "nextserver")]
    pub next_server: String,
    #[serde(default)]
    pub filename32: String,
    #[serde(default)]
    pub filename64: String,
    #[serde(default)]
    pub filename32arm: String,
    #[serde(default)]
    pub filename64arm: String,
    #[serde(default, rename = "numberoptions")]
    pub number_options: String,
    #[serde(default)]
    pub arp_table_static_entry: TrueIfPresent,
}

/// Create-or-update request for a DHCP static reservation.
#[derive(Debug, Clone, Default, Serialize)]
pub struct DhcpStaticMappingRequest {
    pub arp_table_static_entry: bool,
    pub cid: String,
    pub descr: String,
    pub dnsserver: Vec<String>,
    pub domain: String,
    pub domainsearchlist: Vec<String>,
    pub gateway: String,
    pub hostname: String,
    pub interface: String,
    pub ipaddr: String,
    pub mac: String,
}

#[derive(Serialize)]
struct DhcpStaticMappingUpdateBody<'a> {
    #[serde(flatten)]
    request: &'a DhcpStaticMappingRequest,
    id: usize,
}

/// Address range handed out by a DHCP server.
#[derive(Debug, Clone, Deserialize)]
pub struct DhcpRange {
    pub from: String,
    pub to: String,
}

/// Per-interface DHCP server (dhcpd) configuration as stored.
#[derive(Debug, Clone, Deserialize)]
pub struct DhcpServerConfiguration {
    #[serde(default, rename = "defaultleasetime")]
    pub default_lease_time: MaybeInt,
    #[serde(default, rename = "denyunknown")]
    pub deny_unknown: TrueIfPresent,
    #[serde(default, rename = "dnsserver")]
    pub dns_servers: Vec<String>,
    #[serde(default)]
    pub domain: String,
    #[serde(default, rename = "domainsearchlist")]
    pub domain_search_list: String,
    #[serde(default)]
    pub enable: TrueIfPresent,
    #[serde(default)]
    pub gateway: String,
    #[serde(default, rename = "ignorebootp")]
    pub ignore_bootp: bool,
    #[serde(default)]
    pub interface: String,
    #[serde(default)]
    pub mac_allow: String,
    #[serde(default)]
    pub mac_deny: String,
    #[serde(default, rename = "maxleasetime")]
    pub max_lease_time: MaybeInt,
    #[serde(default, rename = "numberoptions")]
    pub number_options: String,
    #[serde(default)]
    pub range: Option<DhcpRange>,
    #[serde(default, rename = "staticarp")]
    pub static_arp: TrueIfPresent,
}

/// Write shape for a DHCP server configuration.
#[derive(Debug, Clone, Default, Serialize)]
pub struct DhcpServerConfigurationRequest {
    #[serde(rename = "defaultleasetime")]
    pub default_lease_time: Option<i64>,
    #[serde(rename = "denyunknown")]
    pub deny_unknown: bool,
    #[serde(rename = "dnsserver", skip_serializing_if = "Vec::is_empty")]
    pub dns_servers: Vec<String>,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub domain: String,
    #[serde(rename = "domainsearchlist", skip_serializing_if = "Vec::is_empty")]
    pub domain_search_list: Vec<String>,
    pub enable: bool,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub gateway: String,
    #[serde(rename = "ignorebootp")]
    pub ignore_bootp: bool,
    pub interface: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub mac_allow: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub mac_deny: Vec<String>,
    #[serde(rename = "maxleasetime", skip_serializing_if = "Option::is_none")]
    pub max_lease_time: Option<i64>,
    #[serde(rename = "numberoptions", skip_serializing_if = "Vec::is_empty")]
    pub number_options: Vec<serde_json::Value>,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub range_from: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub range_to: String,
    #[serde(rename = "staticarp")]
    pub static_arp: bool,
}

impl Client {
    /// List all DHCP leases.
    pub async fn list_dhcp_leases(&self) -> Result<Vec<DhcpLease>, Error> {
        self.get(LEASES_ENDPOINT, &[]).await
    }

    /// List the static reservations on an interface. The interface can be
    /// given as its descriptive name, pfSense ID (`wan`, `lan`, `optx`), or
    /// real device name (`igb0`).
    pub async fn list_dhcp_static_mappings(
        &self,
        interface: &str,
    ) -> Result<Vec<DhcpStaticMapping>, Error> {
        self.get(
            STATIC_MAPPING_ENDPOINT,
            &[("interface", interface.to_owned())],
        )
        .await
    }

    /// Create a new DHCP static reservation.
    pub async fn create_dhcp_static_mapping(
        &self,
        request: &DhcpStaticMappingRequest,
    ) -> Result<DhcpStaticMapping, Error> {
        self.post(STATIC_MAPPING_ENDPOINT, &[], Some(request)).await
    }

    /// Update the static reservation for `mac` on the request's interface.
    ///
    /// The wire protocol addresses mappings by array position, so this
    /// lists the interface's mappings first to resolve the position.
    pub async fn update_dhcp_static_mapping(
        &self,
        mac: &str,
        request: &DhcpStaticMappingRequest,
    ) -> Result<DhcpStaticMapping, Error> {
        let id = self.dhcp_static_mapping_index(&request.interface, mac).await?;
        let body = DhcpStaticMappingUpdateBody { request, id };
        self.put(STATIC_MAPPING_ENDPOINT, &[], Some(&body)).await
    }

    /// Delete the static reservation for `mac` on `interface`.
    pub async fn delete_dhcp_static_mapping(
        &self,
        interface: &str,
        mac: &str,
    ) -> Result<(), Error> {
        let id = self.dhcp_static_mapping_index(interface, mac).await?;
        self.delete_empty(
            STATIC_MAPPING_ENDPOINT,
            &[("interface", interface.to_owned()), ("id", id.to_string())],
        )
        .await
    }

    /// Resolve a mapping's array position by MAC address.
    async fn dhcp_static_mapping_index(
        &self,
        interface: &str,
        mac: &str,
    ) -> Result<usize, Error> {
        let mappings = self.list_dhcp_static_mappings(interface).await?;
        debug!(
            interface,
            mac,
            count = mappings.len(),
            "resolving static mapping index"
        );
        mappings
            .iter()
            .position(|m| m.mac == mac)
            .ok_or_else(|| Error::NoMatch {
                resource: "static mapping",
                detail: format!("interface {interface} has no mapping for mac {mac}"),
            })
    }

    /// List the DHCP server configuration of every interface.
    pub async fn list_dhcp_server_configurations(
        &self,
    ) -> Result<Vec<DhcpServerConfiguration>, Error> {
        self.get(SERVER_ENDPOINT, &[]).await
    }

    /// Update the DHCP server configuration for the request's interface.
    ///
    /// The appliance omits `interface` from its response; it is backfilled
    /// from the request so the returned value is self-describing.
    pub async fn update_dhcp_server_configuration(
        &self,
        request: &DhcpServerConfigurationRequest,
    ) -> Result<DhcpServerConfiguration, Error> {
        let mut config: DhcpServerConfiguration =
            self.put(SERVER_ENDPOINT, &[], Some(request)).await?;
        config.interface.clone_from(&request.interface);
        Ok(config)
    }
}
