//! Demo dataset for the mock path
//!
//! Mirrors the product's seeded conversations: a handful of French-language
//! company-registration threads owned by the demo user.

use chrono::{Duration, Utc};

use crate::domain::models::{
    ChatSession, CompanyNameSuggestion, Message, Reference, ReferenceType, SessionStatus,
    SuggestionStatus,
};

use super::EntityStore;

const DEMO_USER_ID: &str = "1";

fn demo_session(
    id: &str,
    title: &str,
    age: Duration,
    message_count: usize,
    active: bool,
    last_message: &str,
    status: SessionStatus,
) -> ChatSession {
    ChatSession {
        id: id.to_string(),
        title: title.to_string(),
        timestamp: Utc::now() - age,
        message_count,
        active,
        user_id: DEMO_USER_ID.to_string(),
        last_message: Some(last_message.to_string()),
        status,
    }
}

fn sarl_thread() -> Vec<Message> {
    let now = Utc::now();
    let mut question = Message::user("msg-1", "1", "Comment créer une SARL en Tunisie ?", DEMO_USER_ID);
    question.timestamp = now - Duration::hours(1);
    let mut answer = Message::bot(
        "msg-2",
        "1",
        "Pour créer une SARL en Tunisie, vous devez suivre plusieurs étapes importantes...",
    );
    answer.timestamp = now - Duration::minutes(58);
    answer.suggestions = Some(vec![
        CompanyNameSuggestion::new("1", "TunisTech Solutions", SuggestionStatus::Available),
        CompanyNameSuggestion::new("2", "Carthage Innovations", SuggestionStatus::Available),
        CompanyNameSuggestion::new("3", "Medina Digital", SuggestionStatus::Unavailable),
    ]);
    answer.references = Some(vec![Reference::new(
        "1",
        "Guide de création SARL 2024",
        "/placeholder.pdf",
        ReferenceType::Pdf,
    )]);
    vec![question, answer]
}

fn documents_thread() -> Vec<Message> {
    let now = Utc::now();
    let mut question = Message::user("msg-3", "2", "Quels sont les documents nécessaires ?", DEMO_USER_ID);
    question.timestamp = now - Duration::days(2);
    let mut answer = Message::bot(
        "msg-4",
        "2",
        "Les documents nécessaires pour créer une SARL incluent...",
    );
    answer.timestamp = now - Duration::days(2) + Duration::minutes(2);
    answer.references = Some(vec![Reference::new(
        "2",
        "Liste des documents requis",
        "/placeholder.pdf",
        ReferenceType::Pdf,
    )]);
    vec![question, answer]
}

/// A store pre-loaded with the demo conversations.
pub async fn demo_store() -> EntityStore {
    let store = EntityStore::new();

    store
        .put_session_with_messages(
            demo_session(
                "1",
                "Assistant juridique",
                Duration::days(1),
                2,
                true,
                "Pour créer une SARL en Tunisie, vous devez suivre plusieurs étapes importantes...",
                SessionStatus::Active,
            ),
            &sarl_thread(),
        )
        .await;

    store
        .put_session_with_messages(
            demo_session(
                "2",
                "Création SARL",
                Duration::days(2),
                2,
                false,
                "Les documents nécessaires pour créer une SARL incluent...",
                SessionStatus::Active,
            ),
            &documents_thread(),
        )
        .await;

    store
        .put_session_with_messages(
            demo_session(
                "3",
                "Modification capital",
                Duration::days(3),
                0,
                false,
                "Comment procéder à l'augmentation du capital social ?",
                SessionStatus::Active,
            ),
            &[],
        )
        .await;

    store
        .put_session_with_messages(
            demo_session(
                "4",
                "Obligations fiscales",
                Duration::days(4),
                0,
                false,
                "Quelles sont les déclarations fiscales obligatoires ?",
                SessionStatus::Archived,
            ),
            &[],
        )
        .await;

    store
        .put_session_with_messages(
            demo_session(
                "5",
                "Dissolution société",
                Duration::days(5),
                0,
                false,
                "Procédure de dissolution volontaire d'une SARL.",
                SessionStatus::Active,
            ),
            &[],
        )
        .await;

    store
}
