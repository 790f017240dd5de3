use groupme_client::api::{Groups, Messages};
use groupme_client::{ApiClient, ClientConfig, Error, Recipient};
use httpmock::prelude::*;
use serde_json::{Value, json};

fn api(server: &MockServer) -> ApiClient {
    ApiClient::new(ClientConfig::new("secret").with_api_url(server.base_url())).unwrap()
}

fn group_json(id: &str, name: &str) -> Value {
    json!({
        "id": id,
        "name": name,
        "type": "private",
        "description": "weekend plans",
        "image_url": null,
        "creator_user_id": "u1",
        "created_at": 1_600_000_000,
        "updated_at": 1_700_000_000,
        "members": [
            { "id": "m1", "user_id": "u1", "nickname": "Ann", "muted": false, "image_url": null },
            { "id": "m2", "user_id": "u2", "nickname": "Bo", "muted": true }
        ],
        "share_url": null,
        "messages": { "count": 12, "last_message_id": "500", "last_message_created_at": 1_700_000_000 }
    })
}

#[test]
fn test_show_decodes_group_and_members() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(GET).path("/groups/7").query_param("token", "secret");
        then.status(200)
            .json_body(json!({ "response": group_json("7", "Hikers"), "meta": { "code": 200 } }));
    });

    let group = Groups::new(api(&server)).show("7").unwrap();
    mock.assert();
    assert_eq!(group.name, "Hikers");
    assert_eq!(group.description.as_deref(), Some("weekend plans"));
    assert_eq!(group.members.len(), 2);
    assert!(group.members[1].muted);
    assert_eq!(group.messages.count, 12);
    assert_eq!(group.messages.last_message_id.as_deref(), Some("500"));
    assert_eq!(group.created_at.timestamp(), 1_600_000_000);
}

#[test]
fn test_show_rejects_empty_id_without_request() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.path_contains("/groups");
        then.status(500);
    });
    let err = Groups::new(api(&server)).show("").unwrap_err();
    assert!(matches!(err, Error::EmptyIdentifier(_)));
    mock.assert_hits(0);
}

#[test]
fn test_index_sends_page_parameters() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(GET)
            .path("/groups")
            .query_param("page", "2")
            .query_param("per_page", "10");
        then.status(200).json_body(json!({
            "response": [group_json("1", "A"), group_json("2", "B")],
            "meta": { "code": 200 }
        }));
    });

    let groups = Groups::new(api(&server)).index(2, 10).unwrap();
    mock.assert();
    let names: Vec<&str> = groups.iter().map(|g| g.name.as_str()).collect();
    assert_eq!(names, vec!["A", "B"]);
}

#[test]
fn test_all_stops_on_short_page() {
    let server = MockServer::start();
    let page_one = server.mock(|when, then| {
        when.method(GET).path("/groups").query_param("page", "1");
        then.status(200).json_body(json!({
            "response": [group_json("1", "A"), group_json("2", "B")],
            "meta": { "code": 200 }
        }));
    });
    let page_two = server.mock(|when, then| {
        when.method(GET).path("/groups").query_param("page", "2");
        then.status(200).json_body(json!({
            "response": [group_json("3", "C")],
            "meta": { "code": 200 }
        }));
    });

    let groups = Groups::new(api(&server)).all(2).unwrap();
    page_one.assert();
    page_two.assert();
    assert_eq!(groups.len(), 3);
}

#[test]
fn test_recipients_from_group_and_member() {
    let server = MockServer::start();
    let client = api(&server);
    let group: groupme_client::models::Group =
        serde_json::from_value(group_json("7", "Hikers")).unwrap();

    let to_group = Recipient::for_group(&client, &group).unwrap();
    assert_eq!(to_group.id_key(), "7");
    assert_eq!(to_group.message_key(), Messages::MESSAGE_KEY);

    let to_member = Recipient::for_member(&client, &group.members[1]).unwrap();
    assert_eq!(to_member.id_key(), "u2");
    assert_eq!(to_member.message_key(), "direct_messages");
}
