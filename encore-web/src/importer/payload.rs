//! Catalog payload schema and candidate extraction
//!
//! The discovery API nests the interesting fields several levels deep and
//! omits keys freely, so every level is optional here. Extraction turns a
//! payload into flat candidates, skipping (and logging) records that are
//! missing a required key rather than failing the batch.

use chrono::{DateTime, Utc};
use serde::Deserialize;
use tracing::warn;

#[derive(Debug, Deserialize)]
pub struct EventsPayload {
    #[serde(rename = "_embedded")]
    pub embedded: Option<EventsEmbedded>,
}

#[derive(Debug, Deserialize)]
pub struct EventsEmbedded {
    #[serde(default)]
    pub events: Vec<EventRecord>,
}

#[derive(Debug, Deserialize)]
pub struct EventRecord {
    pub id: Option<String>,
    #[serde(rename = "_embedded")]
    pub embedded: Option<EventEmbedded>,
    pub dates: Option<DatesRecord>,
}

#[derive(Debug, Deserialize)]
pub struct EventEmbedded {
    pub attractions: Option<Vec<AttractionRecord>>,
    pub venues: Option<Vec<EventVenueRecord>>,
}

#[derive(Debug, Deserialize)]
pub struct AttractionRecord {
    pub name: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct EventVenueRecord {
    pub name: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct DatesRecord {
    pub start: Option<StartRecord>,
}

#[derive(Debug, Deserialize)]
pub struct StartRecord {
    #[serde(rename = "dateTime")]
    pub date_time: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct VenuesPayload {
    #[serde(rename = "_embedded")]
    pub embedded: Option<VenuesEmbedded>,
}

#[derive(Debug, Deserialize)]
pub struct VenuesEmbedded {
    #[serde(default)]
    pub venues: Vec<VenueRecord>,
}

#[derive(Debug, Deserialize)]
pub struct VenueRecord {
    pub name: Option<String>,
    pub city: Option<NamedField>,
    pub state: Option<NamedField>,
}

#[derive(Debug, Deserialize)]
pub struct NamedField {
    pub name: Option<String>,
}

/// A fully-resolved show candidate ready for reconciliation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShowCandidate {
    pub artist_name: String,
    pub venue_name: String,
    pub starts_at_raw: String,
}

/// A venue candidate; city/state fall back to empty when the catalog
/// omits them
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VenueCandidate {
    pub name: String,
    pub city: String,
    pub state: String,
}

impl EventRecord {
    fn event_id(&self) -> &str {
        self.id.as_deref().unwrap_or("<no id>")
    }

    fn first_attraction_name(&self) -> Option<&str> {
        self.embedded
            .as_ref()?
            .attractions
            .as_ref()?
            .first()?
            .name
            .as_deref()
    }

    fn first_venue_name(&self) -> Option<&str> {
        self.embedded
            .as_ref()?
            .venues
            .as_ref()?
            .first()?
            .name
            .as_deref()
    }

    fn start_date_time(&self) -> Option<&str> {
        self.dates.as_ref()?.start.as_ref()?.date_time.as_deref()
    }
}

impl EventsPayload {
    fn events(&self) -> &[EventRecord] {
        self.embedded
            .as_ref()
            .map(|e| e.events.as_slice())
            .unwrap_or(&[])
    }

    /// Distinct artist names, first attraction per event, order preserved
    pub fn artist_names(&self) -> Vec<String> {
        let mut names: Vec<String> = Vec::new();
        for event in self.events() {
            let Some(name) = event.first_attraction_name() else {
                warn!("Event {} has no attraction name, skipping", event.event_id());
                continue;
            };
            if !names.iter().any(|n| n == name) {
                names.push(name.to_string());
            }
        }
        names
    }

    /// Show candidates: events with an artist name, a venue name and a
    /// start dateTime. Anything else is skipped with a warning.
    pub fn show_candidates(&self) -> Vec<ShowCandidate> {
        let mut candidates = Vec::new();
        for event in self.events() {
            let Some(artist_name) = event.first_attraction_name() else {
                warn!("Event {} has no attraction name, skipping", event.event_id());
                continue;
            };
            let Some(venue_name) = event.first_venue_name() else {
                warn!("Event {} has no venue name, skipping", event.event_id());
                continue;
            };
            let Some(date_time) = event.start_date_time() else {
                warn!(
                    "No dateTime in the start dates for event {}, skipping",
                    event.event_id()
                );
                continue;
            };
            candidates.push(ShowCandidate {
                artist_name: artist_name.to_string(),
                venue_name: venue_name.to_string(),
                starts_at_raw: date_time.to_string(),
            });
        }
        candidates
    }
}

impl ShowCandidate {
    /// Parse the catalog's RFC 3339 start time
    pub fn starts_at(&self) -> Option<DateTime<Utc>> {
        DateTime::parse_from_rfc3339(&self.starts_at_raw)
            .ok()
            .map(|dt| dt.with_timezone(&Utc))
    }
}

impl VenuesPayload {
    /// Venue candidates; a record without a name is skipped
    pub fn venue_candidates(&self) -> Vec<VenueCandidate> {
        let venues = self
            .embedded
            .as_ref()
            .map(|e| e.venues.as_slice())
            .unwrap_or(&[]);

        let mut candidates = Vec::new();
        for record in venues {
            let Some(name) = record.name.as_deref() else {
                warn!("Venue record has no name, skipping");
                continue;
            };
            let city = record
                .city
                .as_ref()
                .and_then(|c| c.name.as_deref())
                .unwrap_or("");
            let state = record
                .state
                .as_ref()
                .and_then(|s| s.name.as_deref())
                .unwrap_or("");
            candidates.push(VenueCandidate {
                name: name.to_string(),
                city: city.to_string(),
                state: state.to_string(),
            });
        }
        candidates
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn events_payload(events: serde_json::Value) -> EventsPayload {
        serde_json::from_value(json!({ "_embedded": { "events": events } })).unwrap()
    }

    #[test]
    fn artist_names_deduplicate_within_batch() {
        let payload = events_payload(json!([
            { "id": "e1", "_embedded": { "attractions": [{ "name": "Low" }] } },
            { "id": "e2", "_embedded": { "attractions": [{ "name": "Low" }] } },
            { "id": "e3", "_embedded": { "attractions": [{ "name": "Beck" }] } },
        ]));
        assert_eq!(payload.artist_names(), vec!["Low", "Beck"]);
    }

    #[test]
    fn event_without_attractions_is_skipped_not_fatal() {
        let payload = events_payload(json!([
            { "id": "e1" },
            { "id": "e2", "_embedded": { "attractions": [{ "name": "Beck" }] } },
        ]));
        assert_eq!(payload.artist_names(), vec!["Beck"]);
    }

    #[test]
    fn show_candidate_requires_artist_venue_and_date_time() {
        let payload = events_payload(json!([
            {
                "id": "ok",
                "_embedded": {
                    "attractions": [{ "name": "Low" }],
                    "venues": [{ "name": "First Avenue" }]
                },
                "dates": { "start": { "dateTime": "2024-06-01T20:00:00Z" } }
            },
            {
                "id": "no-date",
                "_embedded": {
                    "attractions": [{ "name": "Beck" }],
                    "venues": [{ "name": "First Avenue" }]
                },
                "dates": { "start": { "localDate": "2024-06-01" } }
            },
            {
                "id": "no-venue",
                "_embedded": { "attractions": [{ "name": "Beck" }] },
                "dates": { "start": { "dateTime": "2024-06-01T20:00:00Z" } }
            }
        ]));

        let candidates = payload.show_candidates();
        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates[0].artist_name, "Low");
        assert_eq!(candidates[0].venue_name, "First Avenue");
        assert!(candidates[0].starts_at().is_some());
    }

    #[test]
    fn empty_payload_yields_no_candidates() {
        let payload: EventsPayload = serde_json::from_value(json!({})).unwrap();
        assert!(payload.artist_names().is_empty());
        assert!(payload.show_candidates().is_empty());
    }

    #[test]
    fn venue_candidates_fall_back_on_missing_city_and_state() {
        let payload: VenuesPayload = serde_json::from_value(json!({
            "_embedded": { "venues": [
                { "name": "First Avenue", "city": { "name": "Minneapolis" }, "state": { "name": "Minnesota" } },
                { "name": "The Armory" },
                { "city": { "name": "St Paul" } }
            ] }
        }))
        .unwrap();

        let candidates = payload.venue_candidates();
        assert_eq!(candidates.len(), 2);
        assert_eq!(candidates[0].city, "Minneapolis");
        assert_eq!(candidates[1].name, "The Armory");
        assert_eq!(candidates[1].city, "");
    }

    #[test]
    fn malformed_date_time_parses_to_none() {
        let candidate = ShowCandidate {
            artist_name: "Low".to_string(),
            venue_name: "First Avenue".to_string(),
            starts_at_raw: "next tuesday".to_string(),
        };
        assert!(candidate.starts_at().is_none());
    }
}
