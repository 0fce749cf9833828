use crate::error::SessionError;
use wiz_store::SessionRecord;

/// Return shape of a session read: the namespaced key that was resolved and
/// the journey record found there (empty when absent).
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedSession {
    pub key: String,
    pub data: SessionRecord,
}

/// Journey record stored at `key`, or an empty record when absent. Journey
/// records are objects; anything else at the key reads as absent.
pub(crate) fn journey_record(record: &SessionRecord, key: &str) -> SessionRecord {
    record
        .get(key)
        .and_then(|value| value.as_object())
        .cloned()
        .unwrap_or_default()
}

/// Resolve an optional journey key against a fetched session record.
///
/// With a key, the namespaced key is `prefix + key`. Without one, the
/// record's keys are scanned for the prefix: exactly one match selects that
/// journey, no match falls back to the bare prefix with empty data, and two
/// or more matches fail so the caller is never second-guessed about which
/// journey was meant.
pub fn resolve(
    prefix: &str,
    record: &SessionRecord,
    journey_key: Option<&str>,
) -> Result<ResolvedSession, SessionError> {
    if let Some(journey_key) = journey_key {
        let key = format!("{prefix}{journey_key}");
        let data = journey_record(record, &key);
        return Ok(ResolvedSession { key, data });
    }

    let mut matches: Vec<&String> = record.keys().filter(|k| k.starts_with(prefix)).collect();
    match matches.len() {
        0 => Ok(ResolvedSession {
            key: prefix.to_string(),
            data: SessionRecord::new(),
        }),
        1 => {
            let key = matches.remove(0).clone();
            let data = journey_record(record, &key);
            Ok(ResolvedSession { key, data })
        }
        _ => {
            let mut keys: Vec<String> = matches.into_iter().cloned().collect();
            keys.sort();
            Err(SessionError::AmbiguousJourney { keys })
        }
    }
}
