// Interface endpoints (v2): assignments, VLANs, groups, and bridges.
//
// v2 resources share one shape between reads and writes: the response is
// the request plus a server-assigned `id`, modeled here with `flatten`.
// Updates go through PATCH with the id embedded in the body; gets and
// deletes address the resource via query parameters.

use serde::{Deserialize, Serialize};

use crate::client::Client;
use crate::error::Error;

const INTERFACE_ENDPOINT: &str = "api/v2/interface";
const INTERFACES_ENDPOINT: &str = "api/v2/interfaces";
const VLAN_ENDPOINT: &str = "api/v2/interface/vlan";
const VLANS_ENDPOINT: &str = "api/v2/interface/vlans";
const GROUP_ENDPOINT: &str = "api/v2/interface/group";
const GROUPS_ENDPOINT: &str = "api/v2/interface/groups";
const BRIDGE_ENDPOINT: &str = "api/v2/interface/bridge";
const BRIDGES_ENDPOINT: &str = "api/v2/interface/bridges";
const APPLY_ENDPOINT: &str = "api/v2/interface/apply";

/// Configurable fields of an interface assignment.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct InterfaceRequest {
    /// Physical device the assignment binds to (e.g. `igb0`).
    #[serde(rename = "if")]
    pub interface: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enable: Option<bool>,
    pub descr: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub spoofmac: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mtu: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mss: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub media: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mediaopt: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub blockpriv: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub blockbogons: Option<bool>,
    pub typev4: String,
    pub ipaddr: String,
    pub subnet: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gateway: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alias_subnet: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub adv_dhcp_pt_timeout: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub adv_dhcp_pt_retry: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub adv_dhcp_pt_select_timeout: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub adv_dhcp_pt_reboot: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub adv_dhcp_pt_backoff_cutoff: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub adv_dhcp_pt_initial_interval: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub adv_dhcp_send_options: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub adv_dhcp_request_options: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub adv_dhcp_required_options: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub adv_dhcp_option_modifiers: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub adv_dhcp_config_file_override_path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub typev6: Option<String>,
    pub ipaddrv6: String,
    pub subnetv6: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gatewayv6: Option<String>,
    pub prefix_6rd: String,
    pub gateway_6rd: String,
    pub prefix_6rd_v4plen: i32,
    pub track6_interface: String,
}

/// An interface assignment with its pfSense ID (`wan`, `lan`, `optx`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Interface {
    #[serde(flatten)]
    pub config: InterfaceRequest,
    #[serde(default)]
    pub id: String,
}

/// Configurable fields of a VLAN.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct VlanRequest {
    /// Parent device (e.g. `igb1`).
    #[serde(rename = "if")]
    pub interface: String,
    pub tag: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vlanif: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pcp: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub descr: Option<String>,
}

/// A VLAN with its numeric ID.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Vlan {
    #[serde(flatten)]
    pub config: VlanRequest,
    #[serde(default)]
    pub id: i64,
}

/// Configurable fields of an interface group.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct InterfaceGroupRequest {
    pub ifname: String,
    pub members: Vec<String>,
    pub descr: String,
}

/// An interface group with its numeric ID.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InterfaceGroup {
    #[serde(flatten)]
    pub config: InterfaceGroupRequest,
    #[serde(default)]
    pub id: i64,
}

/// Configurable fields of a bridge.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct InterfaceBridgeRequest {
    pub members: Vec<String>,
    pub descr: String,
    pub bridgeif: String,
}

/// A bridge with its device ID (e.g. `bridge0`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InterfaceBridge {
    #[serde(flatten)]
    pub config: InterfaceBridgeRequest,
    #[serde(default)]
    pub id: String,
}

impl Client {
    // ── Interfaces ───────────────────────────────────────────────────

    /// Get one interface. Accepts the descriptive name, the pfSense ID
    /// (`wan`, `lan`, `optx`), or the physical device name (`igb0`).
    pub async fn get_interface(&self, interface_id: &str) -> Result<Interface, Error> {
        self.get(INTERFACE_ENDPOINT, &[("if", interface_id.to_owned())])
            .await
    }

    /// List all interface assignments.
    pub async fn list_interfaces(&self) -> Result<Vec<Interface>, Error> {
        self.get(INTERFACES_ENDPOINT, &[]).await
    }

    /// Create a new interface assignment.
    pub async fn create_interface(&self, request: &InterfaceRequest) -> Result<Interface, Error> {
        self.post(INTERFACE_ENDPOINT, &[], Some(request)).await
    }

    /// Update an existing interface assignment.
    pub async fn update_interface(
        &self,
        interface_id: &str,
        request: &InterfaceRequest,
    ) -> Result<Interface, Error> {
        let body = Interface {
            config: request.clone(),
            id: interface_id.to_owned(),
        };
        self.patch(INTERFACE_ENDPOINT, &[], Some(&body)).await
    }

    /// Delete an interface assignment. Accepts the same identifiers as
    /// [`Self::get_interface`].
    pub async fn delete_interface(&self, interface_id: &str) -> Result<(), Error> {
        self.delete_empty(INTERFACE_ENDPOINT, &[("if", interface_id.to_owned())])
            .await
    }

    /// Apply pending interface changes.
    pub async fn apply_interface_changes(&self) -> Result<(), Error> {
        self.post_empty(APPLY_ENDPOINT, &[], None::<&()>).await
    }

    // ── VLANs ────────────────────────────────────────────────────────

    /// List all VLANs.
    pub async fn list_vlans(&self) -> Result<Vec<Vlan>, Error> {
        self.get(VLANS_ENDPOINT, &[]).await
    }

    /// Get one VLAN by ID.
    pub async fn get_vlan(&self, id: i64) -> Result<Vlan, Error> {
        self.get(VLAN_ENDPOINT, &[("id", id.to_string())]).await
    }

    /// Create a new VLAN.
    pub async fn create_vlan(&self, request: &VlanRequest) -> Result<Vlan, Error> {
        self.post(VLAN_ENDPOINT, &[], Some(request)).await
    }

    /// Update an existing VLAN.
    pub async fn update_vlan(&self, id: i64, request: &VlanRequest) -> Result<Vlan, Error> {
        let body = Vlan {
            config: request.clone(),
            id,
        };
        self.patch(VLAN_ENDPOINT, &[], Some(&body)).await
    }

    /// Delete a VLAN by ID.
    pub async fn delete_vlan(&self, id: i64) -> Result<(), Error> {
        self.delete_empty(VLAN_ENDPOINT, &[("id", id.to_string())])
            .await
    }

    // ── Interface groups ─────────────────────────────────────────────

    /// List all interface groups.
    pub async fn list_interface_groups(&self) -> Result<Vec<InterfaceGroup>, Error> {
        self.get(GROUPS_ENDPOINT, &[]).await
    }

    /// Replace the whole set of interface groups.
    pub async fn put_interface_groups(
        &self,
        groups: &[InterfaceGroupRequest],
    ) -> Result<Vec<InterfaceGroup>, Error> {
        self.put(GROUPS_ENDPOINT, &[], Some(groups)).await
    }

    /// Get one interface group by ID.
    pub async fn get_interface_group(&self, id: i64) -> Result<InterfaceGroup, Error> {
        self.get(GROUP_ENDPOINT, &[("id", id.to_string())]).await
    }

    /// Create a new interface group.
    pub async fn create_interface_group(
        &self,
        request: &InterfaceGroupRequest,
    ) -> Result<InterfaceGroup, Error> {
        self.post(GROUP_ENDPOINT, &[], Some(request)).await
    }

    /// Update an existing interface group.
    pub async fn update_interface_group(
        &self,
        id: i64,
        request: &InterfaceGroupRequest,
    ) -> Result<InterfaceGroup, Error> {
        let body = InterfaceGroup {
            config: request.clone(),
            id,
        };
        self.patch(GROUP_ENDPOINT, &[], Some(&body)).await
    }

    /// Delete an interface group by ID.
    pub async fn delete_interface_group(&self, id: i64) -> Result<(), Error> {
        self.delete_empty(GROUP_ENDPOINT, &[("id", id.to_string())])
            .await
    }

    // ── Bridges ──────────────────────────────────────────────────────

    /// List all bridges.
    pub async fn list_interface_bridges(&self) -> Result<Vec<InterfaceBridge>, Error> {
        self.get(BRIDGES_ENDPOINT, &[]).await
    }

    /// Get one bridge by device ID.
    pub async fn get_interface_bridge(&self, id: &str) -> Result<InterfaceBridge, Error> {
        self.get(BRIDGE_ENDPOINT, &[("id", id.to_owned())]).await
    }

    /// Create a new bridge.
    pub async fn create_interface_bridge(
        &self,
        request: &InterfaceBridgeRequest,
    ) -> Result<InterfaceBridge, Error> {
        self.post(BRIDGE_ENDPOINT, &[], Some(request)).await
    }

    /// Update an existing bridge.
    pub async fn update_interface_bridge(
        &self,
        id: &str,
        request: &InterfaceBridgeRequest,
    ) -> Result<InterfaceBridge, Error> {
        let body = InterfaceBridge {
            config: request.clone(),
            id: id.to_owned(),
        };
        self.patch(BRIDGE_ENDPOINT, &[], Some(&body)).await
    }

    /// Delete a bridge by device ID.
    pub async fn delete_interface_bridge(&self, id: &str) -> Result<(), Error> {
        self.delete_empty(BRIDGE_ENDPOINT, &[("id", id.to_owned())])
            .await
    }
}
