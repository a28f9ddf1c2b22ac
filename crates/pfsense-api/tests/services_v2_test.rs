#![allow(clippy::unwrap_used)]
// Round-trip tests for the v2 endpoint groups (interfaces, users).

use serde_json::json;
use wiremock::matchers::{body_partial_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use pfsense_api::interfaces::{InterfaceGroupRequest, InterfaceRequest, VlanRequest};
use pfsense_api::users::{UserGroupRequest, UserRequest};
use pfsense_api::Client;

fn envelope(data: serde_json::Value) -> serde_json::Value {
    json!({
        "status": "ok",
        "code": 200,
        "return": 0,
        "message": "Success",
        "data": data,
    })
}

async fn setup() -> (MockServer, Client) {
    let server = MockServer::start().await;
    let client = Client::with_no_auth(&server.uri()).unwrap();
    (server, client)
}

// ── Interfaces ──────────────────────────────────────────────────────

#[tokio::test]
async fn get_interface_by_query_param() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/v2/interface"))
        .and(query_param("if", "wan"))
        .respond_with(ResponseTemplate::new(200).set_body_json(envelope(json!({
            "id": "wan", "if": "em0", "descr": "WAN", "enable": true,
            "typev4": "dhcp", "ipaddr": "dhcp", "subnet": 0,
            "ipaddrv6": "", "subnetv6": 0, "prefix_6rd": "", "gateway_6rd": "",
            "prefix_6rd_v4plen": 0, "track6_interface": ""
        }))))
        .mount(&server)
        .await;

    let interface = client.get_interface("wan").await.unwrap();
    assert_eq!(interface.id, "wan");
    assert_eq!(interface.config.interface, "em0");
    assert_eq!(interface.config.enable, Some(true));
}

#[tokio::test]
async fn update_interface_patches_with_id_in_body() {
    let (server, client) = setup().await;

    Mock::given(method("PATCH"))
        .and(path("/api/v2/interface"))
        .and(body_partial_json(json!({
            "id": "opt1",
            "if": "em2",
            "descr": "DMZ",
            "typev4": "static",
            "ipaddr": "172.16.0.1",
            "subnet": 24,
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(envelope(json!({
            "id": "opt1", "if": "em2", "descr": "DMZ", "typev4": "static",
            "ipaddr": "172.16.0.1", "subnet": 24, "ipaddrv6": "", "subnetv6": 0,
            "prefix_6rd": "", "gateway_6rd": "", "prefix_6rd_v4plen": 0,
            "track6_interface": ""
        }))))
        .expect(1)
        .mount(&server)
        .await;

    let request = InterfaceRequest {
        interface: "em2".into(),
        descr: "DMZ".into(),
        typev4: "static".into(),
        ipaddr: "172.16.0.1".into(),
        subnet: 24,
        ..Default::default()
    };
    let updated = client.update_interface("opt1", &request).await.unwrap();
    assert_eq!(updated.config.ipaddr, "172.16.0.1");
}

#[tokio::test]
async fn vlan_create_and_delete() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/api/v2/interface/vlan"))
        .and(body_partial_json(json!({"if": "em1", "tag": 30})))
        .respond_with(ResponseTemplate::new(200).set_body_json(envelope(json!({
            "id": 0, "if": "em1", "tag": 30, "vlanif": "em1.30", "descr": "iot"
        }))))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("DELETE"))
        .and(path("/api/v2/interface/vlan"))
        .and(query_param("id", "0"))
        .respond_with(ResponseTemplate::new(200).set_body_json(envelope(json!([]))))
        .expect(1)
        .mount(&server)
        .await;

    let request = VlanRequest {
        interface: "em1".into(),
        tag: 30,
        descr: Some("iot".into()),
        ..Default::default()
    };
    let vlan = client.create_vlan(&request).await.unwrap();
    assert_eq!(vlan.config.vlanif.as_deref(), Some("em1.30"));

    client.delete_vlan(vlan.id).await.unwrap();
}

#[tokio::test]
async fn put_interface_groups_replaces_whole_set() {
    let (server, client) = setup().await;

    Mock::given(method("PUT"))
        .and(path("/api/v2/interface/groups"))
        .and(body_partial_json(json!([
            {"ifname": "internal", "members": ["lan", "opt1"], "descr": "inside"}
        ])))
        .respond_with(ResponseTemplate::new(200).set_body_json(envelope(json!([
            {"id": 0, "ifname": "internal", "members": ["lan", "opt1"], "descr": "inside"}
        ]))))
        .expect(1)
        .mount(&server)
        .await;

    let groups = client
        .put_interface_groups(&[InterfaceGroupRequest {
            ifname: "internal".into(),
            members: vec!["lan".into(), "opt1".into()],
            descr: "inside".into(),
        }])
        .await
        .unwrap();
    assert_eq!(groups.len(), 1);
    assert_eq!(groups[0].config.ifname, "internal");
}

#[tokio::test]
async fn apply_interface_changes_posts_to_apply() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/api/v2/interface/apply"))
        .respond_with(ResponseTemplate::new(200).set_body_json(envelope(json!({
            "applied": true
        }))))
        .expect(1)
        .mount(&server)
        .await;

    client.apply_interface_changes().await.unwrap();
}

// ── Users ───────────────────────────────────────────────────────────

#[tokio::test]
async fn list_users_flattens_config_and_ids() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/v2/users"))
        .respond_with(ResponseTemplate::new(200).set_body_json(envelope(json!([
            {"id": 0, "uid": 0, "name": "admin", "scope": "system",
             "priv": ["page-all"], "disabled": false, "descr": "System Administrator",
             "expires": null, "cert": [], "authorizedkeys": null, "ipsecpsk": null}
        ]))))
        .mount(&server)
        .await;

    let users = client.list_users().await.unwrap();
    assert_eq!(users.len(), 1);
    assert_eq!(users[0].config.name, "admin");
    assert_eq!(users[0].config.privileges, ["page-all"]);
    assert_eq!(users[0].uid, 0);
}

#[tokio::test]
async fn create_user_posts_config() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/api/v2/user"))
        .and(body_partial_json(json!({
            "name": "monitor",
            "scope": "user",
            "disabled": false,
            "priv": ["page-dashboard-all"],
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(envelope(json!({
            "id": 3, "uid": 2002, "name": "monitor", "scope": "user",
            "priv": ["page-dashboard-all"], "disabled": false, "descr": "",
            "expires": null, "cert": []
        }))))
        .expect(1)
        .mount(&server)
        .await;

    let request = UserRequest {
        name: "monitor".into(),
        password: "hunter2".into(),
        scope: "user".into(),
        privileges: vec!["page-dashboard-all".into()],
        ..Default::default()
    };
    let user = client.create_user(&request).await.unwrap();
    assert_eq!(user.id, 3);
    assert_eq!(user.uid, 2002);
}

#[tokio::test]
async fn update_user_patches_with_id() {
    let (server, client) = setup().await;

    Mock::given(method("PATCH"))
        .and(path("/api/v2/user"))
        .and(body_partial_json(json!({"id": 3, "name": "monitor", "disabled": true})))
        .respond_with(ResponseTemplate::new(200).set_body_json(envelope(json!({
            "id": 3, "uid": 2002, "name": "monitor", "scope": "user",
            "priv": [], "disabled": true, "descr": "", "expires": null, "cert": []
        }))))
        .expect(1)
        .mount(&server)
        .await;

    let request = UserRequest {
        name: "monitor".into(),
        disabled: true,
        ..Default::default()
    };
    let user = client.update_user(3, &request).await.unwrap();
    assert!(user.config.disabled);
}

#[tokio::test]
async fn delete_user_returns_the_deleted_user() {
    let (server, client) = setup().await;

    Mock::given(method("DELETE"))
        .and(path("/api/v2/user"))
        .and(query_param("id", "3"))
        .respond_with(ResponseTemplate::new(200).set_body_json(envelope(json!({
            "id": 3, "uid": 2002, "name": "monitor", "scope": "user",
            "priv": [], "disabled": true, "descr": "", "expires": null, "cert": []
        }))))
        .expect(1)
        .mount(&server)
        .await;

    let user = client.delete_user(3).await.unwrap();
    assert_eq!(user.config.name, "monitor");
}

#[tokio::test]
async fn user_group_crud() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/api/v2/user/group"))
        .and(body_partial_json(json!({
            "name": "auditors", "scope": "local", "member": ["monitor"]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(envelope(json!({
            "id": 1, "gid": 2000, "name": "auditors", "scope": "local",
            "description": "read-only", "member": ["monitor"], "priv": []
        }))))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/v2/user/group"))
        .and(query_param("id", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(envelope(json!({
            "id": 1, "gid": 2000, "name": "auditors", "scope": "local",
            "description": "read-only", "member": ["monitor"], "priv": []
        }))))
        .expect(1)
        .mount(&server)
        .await;

    let request = UserGroupRequest {
        name: "auditors".into(),
        scope: "local".into(),
        description: "read-only".into(),
        member: vec!["monitor".into()],
        privileges: vec![],
    };
    let group = client.create_user_group(&request).await.unwrap();
    assert_eq!(group.gid, 2000);

    let fetched = client.get_user_group(1).await.unwrap();
    assert_eq!(fetched.config.name, "auditors");
}
