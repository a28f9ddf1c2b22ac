// System endpoints: API settings, ARP table, certificates, DNS, hostname,
// notifications, packages, tunables, version, and power control.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::client::Client;
use crate::error::Error;

const API_ENDPOINT: &str = "api/v1/system/api";
const API_VERSION_ENDPOINT: &str = "api/v1/system/api/version";
pub(crate) const ERROR_DEFINITIONS_ENDPOINT: &str = "api/v1/system/api/error";
const ARP_ENDPOINT: &str = "api/v1/system/arp";
const CA_CERTIFICATE_ENDPOINT: &str = "api/v1/system/ca";
const CERTIFICATE_ENDPOINT: &str = "api/v1/system/certificate";
const DNS_ENDPOINT: &str = "api/v1/system/dns";
const DNS_SERVER_ENDPOINT: &str = "api/v1/system/dns/server";
const HALT_ENDPOINT: &str = "api/v1/system/halt";
const HOSTNAME_ENDPOINT: &str = "api/v1/system/hostname";
const REBOOT_ENDPOINT: &str = "api/v1/system/reboot";
const EMAIL_NOTIFICATION_ENDPOINT: &str = "api/v1/system/notifications/email";
const PACKAGE_ENDPOINT: &str = "api/v1/system/package";
const TUNABLE_ENDPOINT: &str = "api/v1/system/tunable";
const VERSION_ENDPOINT: &str = "api/v1/system/version";
const VERSION_UPGRADE_ENDPOINT: &str = "api/v1/system/version/upgrade";

// ── API settings ─────────────────────────────────────────────────────

/// Current configuration of the API package itself. The config store keeps
/// everything stringly typed; see [`ApiConfigurationRequest`] for the
/// properly typed write shape.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfiguration {
    #[serde(default)]
    pub enable: String,
    #[serde(default)]
    pub persist: String,
    #[serde(default)]
    pub allowed_interfaces: String,
    #[serde(default, rename = "authmode")]
    pub auth_mode: String,
    #[serde(default)]
    pub content_type: String,
    #[serde(default)]
    pub jwt_exp: String,
    #[serde(default)]
    pub keyhash: String,
    #[serde(default)]
    pub keybytes: String,
    #[serde(default)]
    pub keys: String,
    #[serde(default)]
    pub access_list: String,
}

/// Write shape for the API package configuration.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ApiConfigurationRequest {
    pub access_list: Vec<String>,
    pub allow_options: bool,
    #[serde(rename = "authmode")]
    pub auth_mode: String,
    pub allowed_interfaces: Vec<String>,
    pub custom_headers: Vec<HashMap<String, String>>,
    pub enable: bool,
    pub enable_login_protection: bool,
    pub log_successful_auth: bool,
    pub hasync: bool,
    pub hasync_hosts: Vec<String>,
    pub hasync_password: String,
    pub hasync_username: String,
    pub jwt_exp: i64,
    pub keybytes: i64,
    pub keyhash: String,
    pub persist: bool,
    pub readonly: bool,
}

/// Installed and latest available versions of the API package.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiVersion {
    pub current_version: String,
    pub latest_version: String,
    pub update_available: bool,
}

/// One entry from the API's error-definition catalogue.
#[derive(Debug, Clone, Deserialize)]
pub struct ErrorDefinition {
    pub status: String,
    pub code: i32,
    #[serde(rename = "return")]
    pub return_code: i32,
    pub message: String,
}

// ── ARP ──────────────────────────────────────────────────────────────

/// A single ARP table entry.
#[derive(Debug, Clone, Deserialize)]
pub struct ArpEntry {
    pub ip: String,
    pub mac: String,
    pub interface: String,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub linktype: String,
}

// ── Certificates ─────────────────────────────────────────────────────

/// An installed certificate authority.
#[derive(Debug, Clone, Deserialize)]
pub struct CaCertificate {
    pub refid: String,
    #[serde(default)]
    pub descr: String,
    #[serde(default)]
    pub trust: String,
    #[serde(default)]
    pub randomserial: String,
    #[serde(default)]
    pub crt: String,
    #[serde(default)]
    pub prv: String,
    #[serde(default)]
    pub serial: String,
}

/// Generate-or-import request for a CA certificate.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CaCertificateRequest {
    pub caref: String,
    pub crt: String,
    pub descr: String,
    pub digest_alg: String,
    pub dn_city: String,
    pub dn_commonname: String,
    pub dn_country: String,
    pub dn_organization: String,
    pub dn_organizationalunit: String,
    pub dn_state: String,
    pub ecname: String,
    pub keylen: i64,
    pub keytype: String,
    pub lifetime: i64,
    pub method: String,
    pub prv: String,
    pub randomserial: bool,
    pub serial: i64,
    pub trust: bool,
}

/// An installed SSL/TLS certificate.
#[derive(Debug, Clone, Deserialize)]
pub struct Certificate {
    pub refid: String,
    #[serde(default)]
    pub descr: String,
    #[serde(default)]
    pub prv: String,
    #[serde(default)]
    pub crt: String,
    #[serde(default)]
    pub caref: String,
}

/// Subject alternative name on a certificate request. Exactly one of the
/// fields should be set per entry.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CertificateAltName {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dns: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ip: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uri: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

/// Generate-or-import request for a certificate.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CertificateCreateRequest {
    pub active: bool,
    pub altnames: Vec<CertificateAltName>,
    pub caref: String,
    pub crt: String,
    pub descr: String,
    pub digest_alg: String,
    pub dn_city: String,
    pub dn_commonname: String,
    pub dn_country: String,
    pub dn_organization: String,
    pub dn_organizationalunit: String,
    pub dn_state: String,
    pub ecname: String,
    pub keylen: i64,
    pub keytype: String,
    pub lifetime: i64,
    pub method: String,
    pub prv: String,
    #[serde(rename = "type")]
    pub cert_type: String,
}

/// Update request for an existing certificate.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CertificateUpdateRequest {
    pub descr: String,
    pub prv: String,
    pub crt: String,
    pub active: bool,
}

#[derive(Serialize)]
struct CertificateUpdateBody<'a> {
    #[serde(flatten)]
    request: &'a CertificateUpdateRequest,
    refid: &'a str,
}

#[derive(Deserialize)]
struct CaCertificateList {
    #[serde(default)]
    ca: Vec<CaCertificate>,
}

#[derive(Deserialize)]
struct CertificateList {
    #[serde(default)]
    cert: Vec<Certificate>,
}

// ── DNS / hostname ───────────────────────────────────────────────────

/// System DNS configuration. Used for both reads and writes.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DnsConfiguration {
    pub dnsserver: Vec<String>,
    pub dnsallowoverride: bool,
    pub dnslocalhost: bool,
}

#[derive(Serialize)]
struct DnsServersBody<'a> {
    dnsserver: &'a [String],
}

/// System hostname and domain. Used for both reads and writes.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SystemHostname {
    pub hostname: String,
    pub domain: String,
}

// ── Notifications ────────────────────────────────────────────────────

/// Email notification settings as stored (stringly typed).
#[derive(Debug, Clone, Deserialize)]
pub struct EmailNotification {
    #[serde(default)]
    pub ipaddress: String,
    #[serde(default)]
    pub port: String,
    #[serde(default)]
    pub sslvalidate: String,
    #[serde(default)]
    pub timeout: String,
    #[serde(default)]
    pub notifyemailaddress: String,
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub authentication_mechanism: String,
    #[serde(default)]
    pub fromaddress: String,
    #[serde(default)]
    pub disable: String,
}

/// Write shape for email notification settings.
#[derive(Debug, Clone, Default, Serialize)]
pub struct EmailNotificationRequest {
    pub authentication_mechanism: String,
    pub disabled: bool,
    pub fromaddress: String,
    pub ipaddress: String,
    pub notifyemailaddress: String,
    pub password: String,
    pub port: i64,
    pub ssl: bool,
    pub sslvalidate: bool,
    pub timeout: i64,
    pub username: String,
}

// ── Packages / tunables / version ────────────────────────────────────

/// An available or installed pfSense package.
#[derive(Debug, Clone, Deserialize)]
pub struct Package {
    pub name: String,
    #[serde(default)]
    pub version: String,
    #[serde(default)]
    pub installed_version: String,
    #[serde(default)]
    pub descr: String,
    #[serde(default)]
    pub installed: bool,
    #[serde(default)]
    pub update_available: bool,
}

#[derive(Serialize)]
struct PackageBody<'a> {
    name: &'a str,
}

/// A sysctl tunable.
#[derive(Debug, Clone, Deserialize)]
pub struct Tunable {
    pub tunable: String,
    #[serde(default)]
    pub value: String,
    #[serde(default)]
    pub descr: String,
    #[serde(default)]
    pub modified: bool,
}

/// Create-or-update request for a tunable.
#[derive(Debug, Clone, Default, Serialize)]
pub struct TunableRequest {
    pub descr: String,
    pub tunable: String,
    pub value: String,
}

#[derive(Serialize)]
struct TunableUpdateBody<'a> {
    #[serde(flatten)]
    request: &'a TunableRequest,
    id: &'a str,
}

/// pfSense system version information.
#[derive(Debug, Clone, Deserialize)]
pub struct Version {
    pub version: String,
    #[serde(default)]
    pub base: String,
    #[serde(default)]
    pub patch: String,
    #[serde(default)]
    pub buildtime: String,
    #[serde(default)]
    pub lastcommit: String,
    #[serde(default)]
    pub program: i64,
}

/// Result of an upgrade availability check.
#[derive(Debug, Clone, Deserialize)]
pub struct VersionUpgradeStatus {
    pub version: String,
    #[serde(default)]
    pub installed_version: String,
    #[serde(default)]
    pub pkg_version_compare: String,
}

impl Client {
    /// Fetch the API package configuration.
    pub async fn get_api_configuration(&self) -> Result<ApiConfiguration, Error> {
        self.get(API_ENDPOINT, &[]).await
    }

    /// Update the API package configuration.
    pub async fn update_api_configuration(
        &self,
        config: &ApiConfigurationRequest,
    ) -> Result<(), Error> {
        self.put_empty(API_ENDPOINT, &[], Some(config)).await
    }

    /// Fetch the installed and latest API package versions.
    pub async fn get_api_version(&self) -> Result<ApiVersion, Error> {
        self.get(API_VERSION_ENDPOINT, &[]).await
    }

    /// Fetch the API's error-definition catalogue, keyed by error code.
    ///
    /// This endpoint requires no authentication.
    pub async fn get_error_definitions(&self) -> Result<HashMap<String, ErrorDefinition>, Error> {
        self.get(ERROR_DEFINITIONS_ENDPOINT, &[]).await
    }

    /// List all entries in the ARP table.
    pub async fn list_arp_table(&self) -> Result<Vec<ArpEntry>, Error> {
        self.get(ARP_ENDPOINT, &[]).await
    }

    /// Delete the ARP entry for the given IP address.
    pub async fn delete_arp_entry(&self, ip: &str) -> Result<(), Error> {
        self.delete_empty(ARP_ENDPOINT, &[("ip", ip.to_owned())])
            .await
    }

    /// List the CA certificates installed on the system.
    pub async fn list_ca_certificates(&self) -> Result<Vec<CaCertificate>, Error> {
        let list: CaCertificateList = self.get(CA_CERTIFICATE_ENDPOINT, &[]).await?;
        Ok(list.ca)
    }

    /// Generate or import a new CA certificate.
    pub async fn create_ca_certificate(
        &self,
        request: &CaCertificateRequest,
    ) -> Result<CaCertificate, Error> {
        self.post(CA_CERTIFICATE_ENDPOINT, &[], Some(request)).await
    }

    /// Delete a CA certificate by its reference ID.
    pub async fn delete_ca_certificate(&self, refid: &str) -> Result<(), Error> {
        self.delete_empty(CA_CERTIFICATE_ENDPOINT, &[("refid", refid.to_owned())])
            .await
    }

    /// List the SSL/TLS certificates installed on the system.
    pub async fn list_certificates(&self) -> Result<Vec<Certificate>, Error> {
        let list: CertificateList = self.get(CERTIFICATE_ENDPOINT, &[]).await?;
        Ok(list.cert)
    }

    /// Generate or import a new certificate.
    pub async fn create_certificate(
        &self,
        request: &CertificateCreateRequest,
    ) -> Result<Certificate, Error> {
        self.post(CERTIFICATE_ENDPOINT, &[], Some(request)).await
    }

    /// Update an existing certificate by its reference ID.
    pub async fn update_certificate(
        &self,
        refid: &str,
        request: &CertificateUpdateRequest,
    ) -> Result<Certificate, Error> {
        let body = CertificateUpdateBody { request, refid };
        self.put(CERTIFICATE_ENDPOINT, &[], Some(&body)).await
    }

    /// Delete a certificate by its reference ID.
    pub async fn delete_certificate(&self, refid: &str) -> Result<(), Error> {
        self.delete_empty(CERTIFICATE_ENDPOINT, &[("refid", refid.to_owned())])
            .await
    }

    /// Fetch the system DNS configuration.
    pub async fn get_dns_configuration(&self) -> Result<DnsConfiguration, Error> {
        self.get(DNS_ENDPOINT, &[]).await
    }

    /// Replace the system DNS configuration.
    pub async fn update_dns_configuration(&self, config: &DnsConfiguration) -> Result<(), Error> {
        self.put_empty(DNS_ENDPOINT, &[], Some(config)).await
    }

    /// Remove a single DNS server from the system configuration.
    pub async fn delete_dns_server(&self, server: &str) -> Result<(), Error> {
        self.delete_empty(DNS_SERVER_ENDPOINT, &[("dnsserver", server.to_owned())])
            .await
    }

    /// Add DNS servers to the system configuration.
    pub async fn add_dns_servers(&self, servers: &[String]) -> Result<(), Error> {
        let body = DnsServersBody { dnsserver: servers };
        self.post_empty(DNS_SERVER_ENDPOINT, &[], Some(&body)).await
    }

    /// Shut the appliance down.
    pub async fn halt(&self) -> Result<(), Error> {
        self.post_empty(HALT_ENDPOINT, &[], None::<&()>).await
    }

    /// Reboot the appliance.
    pub async fn reboot(&self) -> Result<(), Error> {
        self.post_empty(REBOOT_ENDPOINT, &[], None::<&()>).await
    }

    /// Fetch the system hostname and domain.
    pub async fn get_hostname(&self) -> Result<SystemHostname, Error> {
        self.get(HOSTNAME_ENDPOINT, &[]).await
    }

    /// Update the system hostname and domain.
    pub async fn update_hostname(&self, hostname: &SystemHostname) -> Result<(), Error> {
        self.put_empty(HOSTNAME_ENDPOINT, &[], Some(hostname)).await
    }

    /// Fetch the email notification settings.
    pub async fn get_email_notification(&self) -> Result<EmailNotification, Error> {
        self.get(EMAIL_NOTIFICATION_ENDPOINT, &[]).await
    }

    /// Update the email notification settings.
    pub async fn update_email_notification(
        &self,
        config: &EmailNotificationRequest,
    ) -> Result<(), Error> {
        self.put_empty(EMAIL_NOTIFICATION_ENDPOINT, &[], Some(config))
            .await
    }

    /// List packages. With `all` set, includes every package available in
    /// the repository, not just installed ones.
    pub async fn list_packages(&self, all: bool) -> Result<Vec<Package>, Error> {
        self.get(PACKAGE_ENDPOINT, &[("all", all.to_string())])
            .await
    }

    /// Install a package by name.
    pub async fn install_package(&self, name: &str) -> Result<(), Error> {
        let body = PackageBody { name };
        self.post_empty(PACKAGE_ENDPOINT, &[], Some(&body)).await
    }

    /// Uninstall a package by name.
    pub async fn uninstall_package(&self, name: &str) -> Result<(), Error> {
        self.delete_empty(PACKAGE_ENDPOINT, &[("name", name.to_owned())])
            .await
    }

    /// List the configured sysctl tunables.
    pub async fn list_tunables(&self) -> Result<Vec<Tunable>, Error> {
        self.get(TUNABLE_ENDPOINT, &[]).await
    }

    /// Create a new tunable.
    pub async fn create_tunable(&self, request: &TunableRequest) -> Result<Tunable, Error> {
        self.post(TUNABLE_ENDPOINT, &[], Some(request)).await
    }

    /// Update an existing tunable.
    pub async fn update_tunable(
        &self,
        id: &str,
        request: &TunableRequest,
    ) -> Result<Tunable, Error> {
        let body = TunableUpdateBody { request, id };
        self.put(TUNABLE_ENDPOINT, &[], Some(&body)).await
    }

    /// Delete a tunable by ID.
    pub async fn delete_tunable(&self, id: i64) -> Result<(), Error> {
        self.delete_empty(TUNABLE_ENDPOINT, &[("id", id.to_string())])
            .await
    }

    /// Fetch the pfSense system version.
    pub async fn get_version(&self) -> Result<Version, Error> {
        self.get(VERSION_ENDPOINT, &[]).await
    }

    /// Check whether a system upgrade is available, without performing it.
    /// `use_cache` lets the appliance answer from its cached repo data.
    pub async fn get_version_upgrade_status(
        &self,
        use_cache: bool,
    ) -> Result<VersionUpgradeStatus, Error> {
        self.get(
            VERSION_UPGRADE_ENDPOINT,
            &[("use_cache", use_cache.to_string())],
        )
        .await
    }
}
