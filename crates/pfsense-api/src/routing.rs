// Routing endpoints: gateways and the default-gateway selection.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::client::Client;
use crate::error::Error;

const GATEWAY_ENDPOINT: &str = "api/v1/routing/gateway";
const DEFAULT_GATEWAY_ENDPOINT: &str = "api/v1/routing/gateway/default";
const APPLY_ENDPOINT: &str = "api/v1/routing/apply";

/// A routing gateway.
#[derive(Debug, Clone, Deserialize)]
pub struct Gateway {
    #[serde(default)]
    pub dynamic: bool,
    #[serde(default)]
    pub ipprotocol: String,
    #[serde(default)]
    pub gateway: String,
    #[serde(default)]
    pub interface: String,
    #[serde(default)]
    pub friendlyiface: String,
    #[serde(default)]
    pub friendlyifdescr: String,
    pub name: String,
    /// Free-form; the appliance stores whatever the creating subsystem put
    /// here (an index, a flag, ...).
    #[serde(default)]
    pub attribute: serde_json::Value,
    #[serde(default)]
    pub isdefaultgw: bool,
    #[serde(default)]
    pub monitor: String,
    #[serde(default)]
    pub descr: String,
    #[serde(default)]
    pub tiername: String,
}

/// Create-or-update request for a gateway.
#[derive(Debug, Clone, Default, Serialize)]
pub struct GatewayRequest {
    pub action_disable: bool,
    pub alert_interval: i64,
    pub apply: bool,
    pub data_payload: i64,
    pub descr: String,
    pub disabled: bool,
    pub force_down: bool,
    pub gateway: String,
    pub interface: String,
    pub interval: i64,
    pub ipprotocol: String,
    #[serde(rename = "latencyhigh")]
    pub latency_high: i64,
    #[serde(rename = "latencylow")]
    pub latency_low: i64,
    pub loss_interval: i64,
    #[serde(rename = "losshigh")]
    pub loss_high: i64,
    #[serde(rename = "losslow")]
    pub loss_low: i64,
    pub monitor: String,
    pub monitor_disable: bool,
    pub name: String,
    pub time_period: i64,
    pub weight: i64,
}

/// Default gateway selection for IPv4 and IPv6. The special values `"-"`
/// (none) and `""` (automatic) are passed through verbatim.
#[derive(Debug, Clone, Default, Serialize)]
pub struct DefaultGatewayRequest {
    #[serde(rename = "defaultgw4")]
    pub default_gw4: String,
    #[serde(rename = "defaultgw6")]
    pub default_gw6: String,
    pub apply: bool,
}

impl Client {
    /// List all gateways.
    ///
    /// The appliance returns a name-keyed map; it is flattened into a
    /// `Vec` in name order.
    pub async fn list_gateways(&self) -> Result<Vec<Gateway>, Error> {
        let by_name: BTreeMap<String, Gateway> = self.get(GATEWAY_ENDPOINT, &[]).await?;
        Ok(by_name.into_values().collect())
    }

    /// Create a new gateway.
    pub async fn create_gateway(&self, request: &GatewayRequest) -> Result<Gateway, Error> {
        self.post(GATEWAY_ENDPOINT, &[], Some(request)).await
    }

    /// Update an existing gateway. The request's `name` identifies it.
    pub async fn update_gateway(&self, request: &GatewayRequest) -> Result<Gateway, Error> {
        self.put(GATEWAY_ENDPOINT, &[], Some(request)).await
    }

    /// Delete a gateway by numeric ID.
    pub async fn delete_gateway(&self, id: i64) -> Result<(), Error> {
        self.delete_empty(GATEWAY_ENDPOINT, &[("id", id.to_string())])
            .await
    }

    /// Set the default IPv4/IPv6 gateways.
    pub async fn set_default_gateway(&self, request: &DefaultGatewayRequest) -> Result<(), Error> {
        self.put_empty(DEFAULT_GATEWAY_ENDPOINT, &[], Some(request))
            .await
    }

    /// Apply pending routing changes.
    pub async fn apply_routing_changes(&self) -> Result<(), Error> {
        self.post_empty(APPLY_ENDPOINT, &[], None::<&()>).await
    }
}
