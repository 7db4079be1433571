//! `GET /entries?mood=<m>` for the companion app.
//!
//! Requires `Authorization: Bearer <token>` and a `Pin` header. Entries are
//! opened with the presented PIN and returned as plaintext JSON.

use mood_codec::{PinKey, hash_secret, open_entry};
use mood_core::entities::{Entry, ParticipantLookup};
use mood_store::JournalGateway;
use tracing::warn;

use super::{HttpReply, Inbound};

pub async fn handle<G: JournalGateway>(gateway: &G, inbound: &Inbound) -> HttpReply {
    let Some(token) = inbound
        .authorization
        .as_deref()
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|token| !token.is_empty())
    else {
        return HttpReply::error(401, "missing bearer token");
    };
    let Some(pin) = inbound.pin.as_deref().map(str::trim).filter(|p| !p.is_empty()) else {
        return HttpReply::error(401, "missing PIN");
    };

    match list_open(gateway, token, pin).await {
        Ok(Access::Granted(mut entries)) => {
            if let Some(mood) = query_param(&inbound.url, "mood") {
                entries.retain(|e| e.has_mood(&mood));
            }
            match serde_json::to_string(&entries) {
                Ok(body) => HttpReply::json(200, body),
                Err(error) => {
                    warn!(%error, "failed to encode entries");
                    HttpReply::error(500, "response encoding failed")
                }
            }
        }
        Ok(Access::UnknownParticipant) => HttpReply::error(401, "unknown participant"),
        Ok(Access::WrongPin) => HttpReply::error(403, "incorrect PIN"),
        Err(error) => {
            warn!(%error, "entries request failed");
            HttpReply::error(500, "entries unavailable")
        }
    }
}

enum Access {
    Granted(Vec<Entry>),
    UnknownParticipant,
    WrongPin,
}

async fn list_open<G: JournalGateway>(
    gateway: &G,
    token: &str,
    pin: &str,
) -> anyhow::Result<Access> {
    if let ParticipantLookup::NotFound = gateway.find_participant(token).await? {
        return Ok(Access::UnknownParticipant);
    }
    if !gateway.check_pin_hash(token, &hash_secret(pin)).await? {
        return Ok(Access::WrongPin);
    }

    // The PIN hash matched, so an entry that fails to open is a damaged row.
    let key = PinKey::derive(pin);
    let entries = gateway
        .list_entries(token)
        .await?
        .iter()
        .filter_map(|sealed| match open_entry(sealed, &key) {
            Ok(entry) => Some(entry),
            Err(error) => {
                warn!(entry_id = %sealed.id, %error, "skipping unreadable entry");
                None
            }
        })
        .collect();
    Ok(Access::Granted(entries))
}

/// First value of `key` in the query string, percent-decoded.
fn query_param(url: &str, key: &str) -> Option<String> {
    let (_, query) = url.split_once('?')?;
    query
        .split('&')
        .filter_map(|pair| pair.split_once('='))
        .find(|(k, _)| *k == key)
        .and_then(|(_, value)| {
            urlencoding::decode(&value.replace('+', " "))
                .ok()
                .map(std::borrow::Cow::into_owned)
        })
        .filter(|value| !value.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use mood_codec::seal_entry;
    use mood_store::MemoryGateway;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    async fn gateway() -> MemoryGateway {
        let gateway = MemoryGateway::new();
        gateway
            .register_participant("tok", &hash_secret("1234"))
            .await
            .unwrap();
        let key = PinKey::derive("1234");
        for (id, name, mood) in [("ent-1", "run", "Happy"), ("ent-2", "nap", "tired")] {
            let entry = Entry {
                id: id.into(),
                name: name.into(),
                mood: mood.into(),
                rating: "5".into(),
                activities: vec!["walking".into()],
            };
            gateway
                .append_entry("tok", &seal_entry(&entry, &key).unwrap())
                .await
                .unwrap();
        }
        gateway
    }

    fn get(url: &str, auth: Option<&str>, pin: Option<&str>) -> Inbound {
        Inbound {
            method: "GET".into(),
            url: url.into(),
            authorization: auth.map(String::from),
            pin: pin.map(String::from),
            body: String::new(),
        }
    }

    #[tokio::test]
    async fn returns_plaintext_entries_filtered_by_mood() {
        let gateway = gateway().await;
        let reply = handle(&gateway, &get("/entries?mood=happy", Some("Bearer tok"), Some("1234"))).await;
        assert_eq!(reply.status, 200);
        let entries: Vec<Entry> = serde_json::from_str(&reply.body).unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].name, "run");
        assert_eq!(entries[0].activities, vec!["walking".to_string()]);
    }

    #[tokio::test]
    async fn no_filter_returns_everything_in_order() {
        let gateway = gateway().await;
        let reply = handle(&gateway, &get("/entries", Some("Bearer tok"), Some("1234"))).await;
        let entries: Vec<Entry> = serde_json::from_str(&reply.body).unwrap();
        let names: Vec<&str> = entries.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["run", "nap"]);
    }

    #[tokio::test]
    async fn damaged_entry_is_left_out() {
        let gateway = gateway().await;
        let foreign = Entry {
            id: "ent-3".into(),
            name: "ghost".into(),
            mood: "happy".into(),
            rating: "1".into(),
            activities: vec![],
        };
        gateway
            .append_entry("tok", &seal_entry(&foreign, &PinKey::derive("9999")).unwrap())
            .await
            .unwrap();

        let reply = handle(&gateway, &get("/entries", Some("Bearer tok"), Some("1234"))).await;
        assert_eq!(reply.status, 200);
        let entries: Vec<Entry> = serde_json::from_str(&reply.body).unwrap();
        let names: Vec<&str> = entries.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["run", "nap"]);
    }

    #[rstest]
    #[case::wrong_pin(Some("Bearer tok"), Some("0000"), 403)]
    #[case::missing_pin(Some("Bearer tok"), None, 401)]
    #[case::unknown_token(Some("Bearer nope"), Some("1234"), 401)]
    #[case::not_bearer(Some("Basic tok"), Some("1234"), 401)]
    #[case::no_auth(None, Some("1234"), 401)]
    #[tokio::test]
    async fn rejects_bad_credentials(
        #[case] auth: Option<&str>,
        #[case] pin: Option<&str>,
        #[case] status: u16,
    ) {
        let gateway = gateway().await;
        let reply = handle(&gateway, &get("/entries", auth, pin)).await;
        assert_eq!(reply.status, status);
    }

    #[rstest]
    #[case("/entries?mood=happy", Some("happy"))]
    #[case("/entries?x=1&mood=very%20happy", Some("very happy"))]
    #[case("/entries?mood=very+happy", Some("very happy"))]
    #[case("/entries?mood=", None)]
    #[case("/entries", None)]
    fn reads_mood_query(#[case] url: &str, #[case] expected: Option<&str>) {
        assert_eq!(query_param(url, "mood").as_deref(), expected);
    }
}
