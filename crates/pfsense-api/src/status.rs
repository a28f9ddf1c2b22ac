// Status endpoints: system health, interface and gateway state, and the
// raw log tails.

use serde::Deserialize;

use crate::client::Client;
use crate::error::Error;

const SYSTEM_STATUS_ENDPOINT: &str = "api/v1/status/system";
const INTERFACE_STATUS_ENDPOINT: &str = "api/v1/status/interface";
const GATEWAY_STATUS_ENDPOINT: &str = "api/v1/status/gateway";
const FIREWALL_LOG_ENDPOINT: &str = "api/v1/status/log/firewall";
const SYSTEM_LOG_ENDPOINT: &str = "api/v1/status/log/system";
const DHCP_LOG_ENDPOINT: &str = "api/v1/status/log/dhcp";

/// Hardware and resource usage snapshot.
#[derive(Debug, Clone, Deserialize)]
pub struct SystemStatus {
    #[serde(default)]
    pub system_platform: String,
    #[serde(default)]
    pub system_serial: String,
    #[serde(default)]
    pub system_netgate_id: String,
    #[serde(default)]
    pub bios_vendor: String,
    #[serde(default)]
    pub bios_version: String,
    #[serde(default)]
    pub bios_date: String,
    #[serde(default)]
    pub cpu_model: String,
    #[serde(default)]
    pub kernel_pti: bool,
    #[serde(default)]
    pub mds_mitigation: String,
    #[serde(default)]
    pub temp_c: i64,
    #[serde(default)]
    pub temp_f: f64,
    #[serde(default)]
    pub load_avg: Vec<f64>,
    #[serde(default)]
    pub mbuf_usage: f64,
    #[serde(default)]
    pub mem_usage: f64,
    #[serde(default)]
    pub swap_usage: i64,
    #[serde(default)]
    pub disk_usage: f64,
}

/// Live state and traffic counters for one interface.
#[derive(Debug, Clone, Deserialize)]
pub struct InterfaceStatus {
    pub name: String,
    #[serde(default)]
    pub descr: String,
    #[serde(default)]
    pub hwif: String,
    #[serde(default)]
    pub enable: bool,
    #[serde(default, rename = "if")]
    pub interface: String,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub macaddr: String,
    #[serde(default)]
    pub mtu: i64,
    #[serde(default)]
    pub ipaddr: String,
    #[serde(default)]
    pub subnet: String,
    #[serde(default)]
    pub linklocal: String,
    #[serde(default)]
    pub ipaddrv6: String,
    #[serde(default)]
    pub subnetv6: i64,
    #[serde(default)]
    pub inerrs: i64,
    #[serde(default)]
    pub outerrs: i64,
    #[serde(default)]
    pub collisions: i64,
    #[serde(default)]
    pub inbytespass: i64,
    #[serde(default)]
    pub outbytespass: i64,
    #[serde(default)]
    pub inpktspass: i64,
    #[serde(default)]
    pub outpktspass: i64,
    #[serde(default)]
    pub inbytesblock: i64,
    #[serde(default)]
    pub outbytesblock: i64,
    #[serde(default)]
    pub inpktsblock: i64,
    #[serde(default)]
    pub outpktsblock: i64,
    #[serde(default)]
    pub inbytes: i64,
    #[serde(default)]
    pub outbytes: i64,
    #[serde(default)]
    pub inpkts: i64,
    #[serde(default)]
    pub outpkts: i64,
    #[serde(default)]
    pub dhcplink: String,
    #[serde(default)]
    pub media: String,
    #[serde(default)]
    pub gateway: String,
    #[serde(default)]
    pub gatewayv6: String,
}

/// dpinger measurements for one gateway.
#[derive(Debug, Clone, Deserialize)]
pub struct GatewayStatus {
    #[serde(default)]
    pub monitorip: String,
    #[serde(default)]
    pub srcip: String,
    pub name: String,
    #[serde(default)]
    pub delay: f64,
    #[serde(default)]
    pub stddev: f64,
    #[serde(default)]
    pub loss: i64,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub substatus: String,
}

impl Client {
    /// Fetch the system health snapshot.
    pub async fn get_system_status(&self) -> Result<SystemStatus, Error> {
        self.get(SYSTEM_STATUS_ENDPOINT, &[]).await
    }

    /// List live status for every interface.
    pub async fn list_interface_status(&self) -> Result<Vec<InterfaceStatus>, Error> {
        self.get(INTERFACE_STATUS_ENDPOINT, &[]).await
    }

    /// List live status for every gateway.
    pub async fn list_gateway_status(&self) -> Result<Vec<GatewayStatus>, Error> {
        self.get(GATEWAY_STATUS_ENDPOINT, &[]).await
    }

    /// Fetch the DHCP daemon log as raw lines.
    pub async fn dhcp_log(&self) -> Result<Vec<String>, Error> {
        self.get(DHCP_LOG_ENDPOINT, &[]).await
    }

    /// Fetch the firewall filter log as raw lines.
    pub async fn firewall_log(&self) -> Result<Vec<String>, Error> {
        self.get(FIREWALL_LOG_ENDPOINT, &[]).await
    }

    /// Fetch the system log as raw lines.
    pub async fn system_log(&self) -> Result<Vec<String>, Error> {
        self.get(SYSTEM_LOG_ENDPOINT, &[]).await
    }
}
