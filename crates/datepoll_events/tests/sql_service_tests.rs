use datepoll_common::models::Availability;
use datepoll_db::{DbClient, RepositoryFactory, SqlEventStoreFactory};
use datepoll_events::assemble::fetch_event;
use datepoll_events::logic::tally_event;
use datepoll_events::service::{NewEvent, ResponseInput};
use datepoll_events::{EventCache, EventService, LastError};
use std::collections::BTreeMap;
use std::sync::Arc;

async fn sqlite_service() -> EventService {
    let path = std::env::temp_dir().join(format!("datepoll-service-{}.db", uuid::Uuid::new_v4()));
    let db_client = DbClient::from_url(&format!("sqlite://{}", path.display()))
        .await
        .expect("open sqlite file");
    let store = SqlEventStoreFactory::new().create_repository(db_client);
    store.init_schema().await.expect("create schema");
    EventService::new(
        Arc::new(store),
        Arc::new(EventCache::new()),
        Arc::new(LastError::new()),
        "https://poll.example/",
    )
}

fn answers(name: &str, values: &[(&str, Option<Availability>)]) -> ResponseInput {
    ResponseInput {
        name: name.to_string(),
        comment: String::new(),
        availability: values
            .iter()
            .map(|(id, value)| (id.to_string(), *value))
            .collect::<BTreeMap<_, _>>(),
    }
}

#[tokio::test]
async fn test_event_without_contact_survives_refresh() {
    let service = sqlite_service().await;
    let event = service
        .create_event(NewEvent {
            title: "Climbing".to_string(),
            memo: String::new(),
            contact: None,
            candidates: vec!["Sat".to_string(), "Sun".to_string()],
        })
        .await
        .unwrap();
    assert_eq!(event.contact, None);

    let refreshed = service.refresh(&event.id).await.unwrap().unwrap();
    assert_eq!(refreshed, event);
    assert_eq!(service.last_error(), None);
}

#[tokio::test]
async fn test_response_lifecycle_with_no_opinion_answer() {
    let service = sqlite_service().await;
    let event = service
        .create_event(NewEvent {
            title: "Climbing".to_string(),
            memo: "Bring shoes".to_string(),
            contact: None,
            candidates: vec!["Sat".to_string(), "Sun".to_string()],
        })
        .await
        .unwrap();
    let sat = event.candidates[0].id.clone();
    let sun = event.candidates[1].id.clone();

    let event = service
        .add_response(
            &event.id,
            answers("Ana", &[(sat.as_str(), Some(Availability::Available)), (sun.as_str(), None)]),
        )
        .await
        .unwrap()
        .unwrap();
    let ana = &event.participants[0];
    assert_eq!(ana.availability.get(&sat), Some(&Availability::Available));
    assert!(!ana.availability.contains_key(&sun));
    let response_id = ana.id.clone();

    let event = service
        .update_response(
            &event.id,
            &response_id,
            answers("Ana B.", &[(sat.as_str(), None), (sun.as_str(), Some(Availability::Maybe))]),
        )
        .await
        .unwrap()
        .unwrap();
    assert_eq!(event.participants[0].name, "Ana B.");
    assert!(!event.participants[0].availability.contains_key(&sat));
    let summary = tally_event(&event);
    assert_eq!(summary.slots[0].score, 0);
    assert_eq!(summary.slots[1].score, 1);

    let event = service
        .delete_response(&event.id, &response_id)
        .await
        .unwrap()
        .unwrap();
    assert!(event.participants.is_empty());
    assert_eq!(service.last_error(), None);
}

#[tokio::test]
async fn test_fetch_missing_event_from_sqlite_is_none() {
    let path = std::env::temp_dir().join(format!("datepoll-service-{}.db", uuid::Uuid::new_v4()));
    let db_client = DbClient::from_url(&format!("sqlite://{}", path.display()))
        .await
        .unwrap();
    let store = SqlEventStoreFactory::new().create_repository(db_client);
    store.init_schema().await.unwrap();

    assert_eq!(fetch_event(&store, "missing").await.unwrap(), None);
}
