// Integration tests for `BridgeClient` and the standalone calls using wiremock.

use serde_json::json;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use hue_lights_rs::{
    Alert, BridgeClient, BridgeInfo, Color, Error, LampState, Parameter, Transition,
    discover_bridges, register,
};

// ── Helpers ─────────────────────────────────────────────────────────

async fn setup() -> (MockServer, BridgeClient) {
    let server = MockServer::start().await;
    let mut bridge = BridgeInfo::new("001788fffe123456", &server.uri());
    bridge.username = "secret".into();
    let client = BridgeClient::new(reqwest::Client::new(), &bridge).unwrap();
    (server, client)
}

fn lamp_json(name: &str, on: bool) -> serde_json::Value {
    json!({
        "state": {
            "on": on, "bri": 144, "hue": 13088, "sat": 212,
            "alert": "none", "effect": "none", "colormode": "hs", "reachable": true
        },
        "type": "Extended color light",
        "name": name,
        "modelid": "LCT001",
        "swversion": "66009461"
    })
}

fn success(address: &str, value: serde_json::Value) -> serde_json::Value {
    json!({ "success": { address: value } })
}

// ── Discovery and registration ──────────────────────────────────────

#[tokio::test]
async fn test_discover_bridges() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "id": "001788fffe123456", "internalipaddress": "192.168.1.20" },
            { "id": "no-address" },
            { "id": "001788fffe654321", "internalipaddress": "192.168.1.21",
              "macaddress": "00:17:88:65:43:21" }
        ])))
        .mount(&server)
        .await;

    let url = format!("{}/", server.uri());
    let bridges = discover_bridges(&reqwest::Client::new(), &url).await.unwrap();

    assert_eq!(bridges.len(), 2);
    assert_eq!(bridges[0].id, "001788fffe123456");
    assert_eq!(bridges[0].ip_address, "192.168.1.20");
    assert!(!bridges[0].has_credential());
    assert_eq!(bridges[1].mac_address, "00:17:88:65:43:21");
}

#[tokio::test]
async fn test_discover_empty_directory() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;

    let bridges = discover_bridges(&reqwest::Client::new(), &server.uri())
        .await
        .unwrap();
    assert!(bridges.is_empty());
}

#[tokio::test]
async fn test_register_returns_username() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api"))
        .and(body_json(json!({ "devicetype": "my_app#kitchen" })))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!([{ "success": { "username": "83b7780291a6ceffbe0bd049104df" } }])),
        )
        .mount(&server)
        .await;

    let bridge = BridgeInfo::new("a", &server.uri());
    let username = register(&reqwest::Client::new(), &bridge.api_url(), "my_app", "kitchen")
        .await
        .unwrap();

    assert_eq!(username, "83b7780291a6ceffbe0bd049104df");
}

#[tokio::test]
async fn test_register_link_button_not_pressed() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{
            "error": { "type": 101, "address": "", "description": "link button not pressed" }
        }])))
        .mount(&server)
        .await;

    let bridge = BridgeInfo::new("a", &server.uri());
    let err = register(&reqwest::Client::new(), &bridge.api_url(), "my_app", "kitchen")
        .await
        .unwrap_err();

    assert!(err.is_api_error());
    assert!(err.is_link_button_not_pressed());
    assert_eq!(err.api_error_code(), Some(101));
}

// ── Lamps ───────────────────────────────────────────────────────────

#[tokio::test]
async fn test_list_lamps_skips_garbage() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/secret/lights"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "1": lamp_json("Hue Lamp 1", true),
            "2": "garbage",
            "3": lamp_json("Hue Lamp 3", false)
        })))
        .mount(&server)
        .await;

    let lamps = client.list_lamps().await.unwrap();

    assert_eq!(lamps.len(), 2);
    assert_eq!(lamps[0].id(), "1");
    assert_eq!(lamps[0].name, "Hue Lamp 1");
    assert_eq!(lamps[0].model_id, "LCT001");
    assert!(lamps[0].state.on);
    assert_eq!(lamps[0].state.brightness, 144);
    assert_eq!(lamps[1].id(), "3");
    assert!(!lamps[1].state.on);
}

#[tokio::test]
async fn test_get_lamp() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/secret/lights/7"))
        .respond_with(ResponseTemplate::new(200).set_body_json(lamp_json("Desk", true)))
        .mount(&server)
        .await;

    let lamp = client.get_lamp("7").await.unwrap();
    assert_eq!(lamp.id(), "7");
    assert_eq!(lamp.name, "Desk");
    assert_eq!(lamp.state.hue, 13088);
    assert_eq!(lamp.state.color_mode, "hs");
}

#[tokio::test]
async fn test_get_missing_lamp_is_api_error() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/secret/lights/9"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{
            "error": { "type": 3, "address": "/lights/9", "description": "resource, /lights/9, not available" }
        }])))
        .mount(&server)
        .await;

    let err = client.get_lamp("9").await.unwrap_err();
    assert_eq!(err.api_error_code(), Some(3));
    match err {
        Error::Api { address, .. } => assert_eq!(address, "/lights/9"),
        other => panic!("expected an API error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_set_lamp_state_sends_merged_parameters() {
    let (server, client) = setup().await;

    Mock::given(method("PUT"))
        .and(path("/api/secret/lights/1/state"))
        .and(body_json(json!({ "on": true, "alert": "select", "transitiontime": 10 })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            success("/lights/1/state/on", json!(true)),
            success("/lights/1/state/alert", json!("select")),
            success("/lights/1/state/transitiontime", json!(10))
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let ack = client
        .set_lamp_state(
            "1",
            [
                Parameter::on(false),
                Parameter::alert(Alert::Select),
                Parameter::transition(Transition::from_ticks(10)),
                Parameter::on(true),
            ],
        )
        .await
        .unwrap();

    assert_eq!(ack.len(), 3);
    assert_eq!(ack.get("/lights/1/state/on"), Some(&json!(true)));
}

#[tokio::test]
async fn test_set_lamp_state_without_parameters() {
    let (_server, client) = setup().await;
    let err = client.set_lamp_state("1", []).await.unwrap_err();
    assert!(matches!(err, Error::NoAttribute));
}

#[tokio::test]
async fn test_set_color_red() {
    let (server, client) = setup().await;

    Mock::given(method("PUT"))
        .and(path("/api/secret/lights/2/state"))
        .and(body_json(json!({ "on": true, "hue": 0, "sat": 254, "bri": 254 })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            success("/lights/2/state/hue", json!(0))
        ])))
        .expect(1)
        .mount(&server)
        .await;

    client
        .set_color("2", &Color::rgb(255, 0, 0), [Parameter::on(true)])
        .await
        .unwrap();
}

#[tokio::test]
async fn test_set_full_state() {
    let (server, client) = setup().await;

    Mock::given(method("PUT"))
        .and(path("/api/secret/lights/1/state"))
        .and(body_json(json!({
            "on": true, "bri": 144, "hue": 13088, "sat": 212,
            "alert": "none", "effect": "none", "transitiontime": 4
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&server)
        .await;

    let state = LampState::from_json(&lamp_json("x", true)["state"]).unwrap();
    let ack = client.set_lamp_full_state("1", &state).await.unwrap();
    assert!(ack.is_empty());
}

#[tokio::test]
async fn test_rename_and_delete_lamp() {
    let (server, client) = setup().await;

    Mock::given(method("PUT"))
        .and(path("/api/secret/lights/1"))
        .and(body_json(json!({ "name": "Reading" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            success("/lights/1/name", json!("Reading"))
        ])))
        .mount(&server)
        .await;

    Mock::given(method("DELETE"))
        .and(path("/api/secret/lights/1"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!([{ "success": "/lights/1 deleted" }])),
        )
        .mount(&server)
        .await;

    let ack = client.set_lamp_name("1", "Reading").await.unwrap();
    assert_eq!(ack.get("/lights/1/name"), Some(&json!("Reading")));

    let ack = client.delete_lamp("1").await.unwrap();
    assert_eq!(ack.get("/lights/1 deleted"), Some(&json!(true)));
}

// ── Groups ──────────────────────────────────────────────────────────

#[tokio::test]
async fn test_list_groups() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/secret/groups"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "1": { "name": "Kitchen", "lights": ["1", "2"] },
            "2": { "name": "Bedroom", "lights": ["3"] }
        })))
        .mount(&server)
        .await;

    let groups = client.list_groups().await.unwrap();
    let names: Vec<_> = groups.iter().map(|g| g.name()).collect();
    assert_eq!(names, vec!["Kitchen", "Bedroom"]);
    assert_eq!(groups[1].id(), "2");
}

#[tokio::test]
async fn test_group_operations() {
    let (server, client) = setup().await;

    Mock::given(method("PUT"))
        .and(path("/api/secret/groups/1/action"))
        .and(body_json(json!({ "on": false })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            success("/groups/1/action/on", json!(false))
        ])))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("PUT"))
        .and(path("/api/secret/groups/1"))
        .and(body_json(json!({ "name": "Living room", "lights": ["1", "4"] })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            success("/groups/1/name", json!("Living room")),
            success("/groups/1/lights", json!(["1", "4"]))
        ])))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/api/secret/groups"))
        .and(body_json(json!({ "name": "Hall", "lights": ["5"] })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{ "success": { "id": "3" } }])))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("DELETE"))
        .and(path("/api/secret/groups/3"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!([{ "success": "/groups/3 deleted" }])),
        )
        .expect(1)
        .mount(&server)
        .await;

    client
        .set_group_state("1", [Parameter::on(false)])
        .await
        .unwrap();
    let ack = client
        .modify_group("1", Some("Living room"), Some(&["1", "4"][..]))
        .await
        .unwrap();
    assert_eq!(ack.len(), 2);

    let id = client.create_group("Hall", &["5"]).await.unwrap();
    assert_eq!(id.as_deref(), Some("3"));

    client.delete_group("3").await.unwrap();
}

#[tokio::test]
async fn test_modify_group_with_nothing_to_change() {
    let (_server, client) = setup().await;
    let err = client
        .modify_group::<&str>("1", Some(""), Some(&[][..]))
        .await
        .unwrap_err();
    assert!(matches!(err, Error::NoAttribute));
}

// ── Failures ────────────────────────────────────────────────────────

#[tokio::test]
async fn test_unreachable_bridge_is_transport_error() {
    let server = MockServer::start().await;
    let uri = server.uri();
    drop(server);

    let mut bridge = BridgeInfo::new("a", &uri);
    bridge.username = "secret".into();
    let client = BridgeClient::new(reqwest::Client::new(), &bridge).unwrap();

    let err = client.list_lamps().await.unwrap_err();
    assert!(err.is_transport_error());

    let history = client.history().await;
    assert!(history.last_error().is_some());
}

#[tokio::test]
async fn test_transport_error_hides_username() {
    let mut bridge = BridgeInfo::new("a", "127.0.0.1:1");
    bridge.username = "83b7780291a6ceffbe0bd049104df".into();
    let client = BridgeClient::new(reqwest::Client::new(), &bridge).unwrap();

    let err = client.get_lamp("1").await.unwrap_err();
    assert!(err.is_transport_error());
    assert!(!err.to_string().contains("83b7780291a6ceffbe0bd049104df"));

    let history = client.history().await;
    let last_error = history.last_error().unwrap();
    assert!(last_error.starts_with("GET /lights/1"));
    assert!(!last_error.contains("83b7780291a6ceffbe0bd049104df"));
}

#[tokio::test]
async fn test_non_json_body_is_decode_error() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/secret/lights"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>maintenance</html>"))
        .mount(&server)
        .await;

    let err = client.list_lamps().await.unwrap_err();
    assert!(err.is_decode_error());
    assert!(err.to_string().contains("maintenance"));
}

#[tokio::test]
async fn test_server_failure_is_transport_error() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/secret/groups"))
        .respond_with(ResponseTemplate::new(503).set_body_string("busy"))
        .mount(&server)
        .await;

    let err = client.list_groups().await.unwrap_err();
    assert!(err.is_transport_error());
}

#[tokio::test]
async fn test_unauthorized_user() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/secret/lights"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{
            "error": { "type": 1, "address": "/", "description": "unauthorized user" }
        }])))
        .mount(&server)
        .await;

    let err = client.list_lamps().await.unwrap_err();
    assert_eq!(err.api_error_code(), Some(1));
    assert!(!err.is_link_button_not_pressed());
}

#[tokio::test]
async fn test_history_records_exchanges() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/secret/groups"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .mount(&server)
        .await;

    client.list_groups().await.unwrap();

    let summary = client.history().await.summary();
    assert_eq!(summary.send_count, 1);
    assert_eq!(summary.receive_count, 1);
    assert!(summary.last_error.is_none());

    client.clear_history().await;
    assert!(client.history().await.is_empty());
}
