//! Verify the request builders against JSON test vectors in `test-vectors/`.
//!
//! Each case gives raw connection settings and the exact requests the client
//! must produce for create, fetch and delete. Payloads are compared as parsed
//! JSON so field order does not matter.

use account_client::{Client, Config, HttpMethod, HttpRequest, Parameters};
use serde_json::Value;

/// Parse the method string from test vectors into `HttpMethod`.
fn parse_method(s: &str) -> HttpMethod {
    match s {
        "GET" => HttpMethod::Get,
        "POST" => HttpMethod::Post,
        "DELETE" => HttpMethod::Delete,
        other => panic!("unknown method: {other}"),
    }
}

fn field<'a>(config: &'a Value, key: &str) -> &'a str {
    config[key].as_str().unwrap()
}

fn client(config: &Value) -> Client {
    let params = Parameters::new(field(config, "base_path"), field(config, "resource"))
        .content_type(field(config, "content_type"));
    let config = Config::new(
        field(config, "host"),
        field(config, "port"),
        field(config, "protocol"),
        params,
    )
    .unwrap();
    Client::from_config(config)
}

fn check_request(name: &str, op: &str, req: &HttpRequest, expected: &Value) {
    assert_eq!(
        req.method,
        parse_method(expected["method"].as_str().unwrap()),
        "{name} {op}: method"
    );
    assert_eq!(req.uri, expected["uri"].as_str().unwrap(), "{name} {op}: uri");

    let expected_headers: Vec<(String, String)> = expected["headers"]
        .as_array()
        .unwrap()
        .iter()
        .map(|h| {
            let arr = h.as_array().unwrap();
            (arr[0].as_str().unwrap().to_string(), arr[1].as_str().unwrap().to_string())
        })
        .collect();
    assert_eq!(req.headers, expected_headers, "{name} {op}: headers");
}

#[test]
fn request_test_vectors() {
    let raw = include_str!("../../test-vectors/requests.json");
    let vectors: Value = serde_json::from_str(raw).unwrap();

    for case in vectors["cases"].as_array().unwrap() {
        let name = case["name"].as_str().unwrap();
        let c = client(&case["config"]);
        assert_eq!(c.target_uri(), case["expected_target"].as_str().unwrap(), "{name}: target");

        // Create
        let create = &case["create"];
        let payload = serde_json::to_vec(&create["payload"]).unwrap();
        let req = c.build_create(&payload);
        check_request(name, "create", &req, &create["expected_request"]);
        let sent: Value = serde_json::from_slice(req.body.as_deref().unwrap()).unwrap();
        assert_eq!(sent, create["payload"], "{name} create: body");

        // Fetch
        let fetch = &case["fetch"];
        let req = c.build_fetch(fetch["id"].as_str().unwrap());
        check_request(name, "fetch", &req, &fetch["expected_request"]);
        assert!(req.body.is_none(), "{name} fetch: body should be None");

        // Delete
        let delete = &case["delete"];
        let req = c.build_delete(
            delete["id"].as_str().unwrap(),
            delete["version"].as_i64().unwrap(),
        );
        check_request(name, "delete", &req, &delete["expected_request"]);
        assert!(req.body.is_none(), "{name} delete: body should be None");
    }
}
