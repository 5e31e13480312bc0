use rhc_core::ClientId;

use super::{Operation, ResourceStore};
use crate::dto::PublicEvent;
use crate::resource::Events;

impl ResourceStore<Events> {
    /// Result of the last [`ResourceStore::fetch_public`].
    pub fn public_events(&self) -> &[PublicEvent] {
        &self.extra
    }

    pub async fn fetch_public(&mut self, client_id: Option<ClientId>) -> bool {
        self.begin();
        let result = self.service().public_events(client_id).await;
        match self.settle(Operation::LoadPublic, result) {
            Some(events) => {
                self.extra = events;
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use serde_json::json;

    use rhc_core::EventId;

    use super::*;
    use crate::dto::{CreateEventRequest, EventFilter, EventType};
    use crate::services::ResourceService;
    use crate::testing::ScriptedTransport;
    use crate::transport::Method;

    fn event(id: i64) -> serde_json::Value {
        json!({
            "id": id, "title": "Review", "startDate": "2024-07-01T09:00:00Z", "endDate": "2024-07-01T10:00:00Z",
            "eventType": "MEETING", "isPrivate": true, "createdAt": "2024-06-01T00:00:00Z"
        })
    }

    #[tokio::test]
    async fn mutations_refetch_with_last_filter() {
        let transport = Arc::new(ScriptedTransport::new([
            Ok(json!([event(1)])),
            Ok(event(2)),
            Ok(json!([event(1), event(2)])),
            Ok(serde_json::Value::Null),
            Ok(json!([event(2)])),
        ]));
        let mut store = ResourceStore::<Events>::new(ResourceService::new(transport.clone()));
        let filter = EventFilter {
            client_id: Some(ClientId::new(4)),
            public: false,
        };

        store.fetch(filter).await;
        let start = "2024-07-01T09:00:00Z".parse().unwrap();
        store
            .create(&CreateEventRequest {
                title: "Review".to_string(),
                description: None,
                start_date: start,
                end_date: start,
                event_type: EventType::Meeting,
                is_private: Some(true),
                client_ids: None,
                employee_ids: None,
            })
            .await
            .unwrap();
        assert_eq!(store.items().len(), 2);

        assert!(store.delete(EventId::new(1)).await);
        assert_eq!(store.items().len(), 1);
        assert_eq!(store.items()[0].id, EventId::new(2));

        let sent = transport.requests();
        let lists: Vec<_> = sent.iter().filter(|r| r.method == Method::Get).collect();
        assert_eq!(lists.len(), 3);
        assert!(lists.iter().all(|r| r.query == vec![("clientId".to_string(), "4".to_string())]));
    }

    #[tokio::test]
    async fn invalid_event_never_reaches_backend() {
        let transport = Arc::new(ScriptedTransport::default());
        let mut store = ResourceStore::<Events>::new(ResourceService::new(transport.clone()));
        let start: chrono::DateTime<chrono::Utc> = "2024-07-01T10:00:00Z".parse().unwrap();

        let created = store
            .create(&CreateEventRequest {
                title: "Backwards".to_string(),
                description: None,
                start_date: start,
                end_date: start - chrono::Duration::hours(1),
                event_type: EventType::Reminder,
                is_private: None,
                client_ids: None,
                employee_ids: None,
            })
            .await;

        assert!(created.is_none());
        assert_eq!(
            store.error(),
            Some("failed to create event: validation failed: end date precedes start date")
        );
        assert!(transport.requests().is_empty());
    }

    #[tokio::test]
    async fn public_events_are_kept_apart() {
        let transport = Arc::new(ScriptedTransport::new([Ok(json!({"data": [{
            "id": 3, "title": "Open day", "startDate": "2024-07-01T09:00:00Z", "endDate": "2024-07-01T12:00:00Z",
            "eventType": "OTHER", "isPrivate": false, "createdAt": "2024-06-01T00:00:00Z"
        }]}))]));
        let mut store = ResourceStore::<Events>::new(ResourceService::new(transport));

        assert!(store.fetch_public(None).await);
        assert_eq!(store.public_events().len(), 1);
        assert!(store.items().is_empty());
    }
}
