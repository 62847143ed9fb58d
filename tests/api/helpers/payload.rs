use serde_json::{Value, json};

pub fn device_list() -> Value {
    json!({
        "status": "ok",
        "count": 2,
        "devices": [
            {"device_id": 1, "hostname": "server1", "os": "linux"},
            {"device_id": 2, "hostname": "switch1", "os": "ios"}
        ]
    })
}

pub fn device_added() -> Value {
    json!({
        "status": "ok",
        "message": "Device server1 (3) has been added successfully"
    })
}

pub fn device_exists() -> Value {
    json!({
        "status": "error",
        "message": "Device server1 already exists"
    })
}

pub fn device_removed() -> Value {
    json!({
        "status": "ok",
        "message": "Removed device server1\n"
    })
}

pub fn device_missing() -> Value {
    json!({
        "status": "error",
        "message": "Device server1 not found"
    })
}
