use pf_core::{PlayFabClient, PlayFabConfig};
use serde_json::json;
use url::Url;
use wiremock::MockServer;

pub fn client_for(server: &MockServer) -> PlayFabClient {
    let base = Url::parse(&server.uri()).unwrap();
    PlayFabClient::new(PlayFabConfig::with_base_url(base)).unwrap()
}

/// Envelope of a successful `/Client/LoginWith*` call
pub fn login_response() -> serde_json::Value {
    json!({
        "code": 200,
        "status": "OK",
        "data": {
            "SessionTicket": "ticket",
            "PlayFabId": "MPA1",
            "NewlyCreated": false,
            "LastLoginTime": "2024-05-01T12:00:00Z",
            "SettingsForUser": {
                "NeedsAttribution": false,
                "GatherDeviceInfo": true,
                "GatherFocusInfo": true
            },
            "EntityToken": {
                "EntityToken": "title-player-secret",
                "TokenExpiration": "2099-01-01T00:00:00Z",
                "Entity": { "Id": "TPA1", "Type": "title_player_account" }
            }
        }
    })
}
