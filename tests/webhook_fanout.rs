//! Exercises callback dedup (spec §8): three webhook URLs with one
//! duplicate deliver exactly two POSTs.

use knowledge_service::domain::ports::{WebhookClient, WebhookEvent};
use knowledge_service::infrastructure::webhook::{FanoutPolicy, ReqwestWebhookClient};
use uuid::Uuid;

#[tokio::test]
async fn duplicate_urls_are_delivered_to_exactly_once_each() {
    let mut server_a = mockito::Server::new_async().await;
    let mut server_b = mockito::Server::new_async().await;

    let mock_a = server_a
        .mock("POST", "/hook")
        .with_status(200)
        .expect(1)
        .create_async()
        .await;
    let mock_b = server_b
        .mock("POST", "/hook")
        .with_status(200)
        .expect(1)
        .create_async()
        .await;

    let url_a = format!("{}/hook", server_a.url());
    let url_b = format!("{}/hook", server_b.url());
    let urls = vec![url_a.clone(), url_b.clone(), url_a.clone()];

    let client = ReqwestWebhookClient::new(FanoutPolicy::default());
    let event = WebhookEvent::ResourceReady {
        resource_id: Uuid::new_v4(),
        status: "ready".to_string(),
        timestamp: chrono::Utc::now(),
        message: None,
    };
    client.notify(&urls, event).await;

    mock_a.assert_async().await;
    mock_b.assert_async().await;
}

#[tokio::test]
async fn empty_url_list_delivers_nothing() {
    let mut server = mockito::Server::new_async().await;
    let mock = server.mock("POST", "/hook").expect(0).create_async().await;

    let client = ReqwestWebhookClient::new(FanoutPolicy::default());
    let event = WebhookEvent::SearchReady {
        search_id: Uuid::new_v4(),
        status: "ready".to_string(),
        timestamp: chrono::Utc::now(),
        message: None,
    };
    client.notify(&[], event).await;

    mock.assert_async().await;
}
