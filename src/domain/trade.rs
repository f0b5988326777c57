//! Trade journal record types.
//!
//! A journal entry is an open JSON object: the store only understands a
//! handful of reserved keys (`id`, `createdAt`, `status`, `result`) and
//! carries every other caller field through untouched, in the order the
//! caller sent them. Imported entries that are not objects at all are
//! kept verbatim and simply have none of the reserved keys.

use std::sync::atomic::{AtomicU64, Ordering};

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

// ────────────────────────────────────────────
// Reserved field names
// ────────────────────────────────────────────

/// Store-assigned unique identifier.
pub const ID_FIELD: &str = "id";
/// Store-assigned creation timestamp (RFC 3339, millisecond precision).
pub const CREATED_AT_FIELD: &str = "createdAt";
/// Outcome classification, `"win"` or `"loss"`.
pub const STATUS_FIELD: &str = "status";
/// Realized profit/loss of the trade.
pub const RESULT_FIELD: &str = "result";

/// Identifier of a journal entry as stored in the `id` field.
pub type TradeId = String;

/// Outcome classification read from the `status` field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TradeStatus {
    Win,
    Loss,
    /// Missing, non-string, or any value other than `"win"`/`"loss"`.
    Other,
}

/// A single journal entry.
///
/// Serializes as the bare JSON value, so a stored document is simply an
/// array of whatever callers submitted plus the two assigned fields.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Trade {
    value: Value,
}

impl Trade {
    /// Wrap a field map.
    pub const fn from_fields(fields: Map<String, Value>) -> Self {
        Self {
            value: Value::Object(fields),
        }
    }

    /// Wrap an arbitrary JSON value as stored.
    pub const fn from_value(value: Value) -> Self {
        Self { value }
    }

    /// The store-assigned id, if present and a string.
    pub fn id(&self) -> Option<&str> {
        self.value.get(ID_FIELD).and_then(Value::as_str)
    }

    /// The creation timestamp, if present and a string.
    pub fn created_at(&self) -> Option<&str> {
        self.value.get(CREATED_AT_FIELD).and_then(Value::as_str)
    }

    pub fn status(&self) -> TradeStatus {
        match self.value.get(STATUS_FIELD).and_then(Value::as_str) {
            Some("win") => TradeStatus::Win,
            Some("loss") => TradeStatus::Loss,
            _ => TradeStatus::Other,
        }
    }

    /// Profit/loss for aggregation. Missing or non-numeric counts as zero.
    pub fn result(&self) -> f64 {
        self.value
            .get(RESULT_FIELD)
            .and_then(Value::as_f64)
            .unwrap_or(0.0)
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.value.get(key)
    }

    /// Field map, or `None` for a non-object entry.
    pub fn fields(&self) -> Option<&Map<String, Value>> {
        self.value.as_object()
    }

    /// Stamp the store-owned fields, replacing whatever the caller sent.
    ///
    /// No-op on a non-object entry.
    pub fn assign_identity(&mut self, id: TradeId, created_at: DateTime<Utc>) {
        let Value::Object(fields) = &mut self.value else {
            return;
        };
        fields.insert(ID_FIELD.to_string(), Value::String(id));
        fields.insert(
            CREATED_AT_FIELD.to_string(),
            Value::String(created_at.to_rfc3339_opts(SecondsFormat::Millis, true)),
        );
    }

    /// Shallow merge: every key in `patch` overwrites, every other key stays.
    ///
    /// Keys already present keep their position; new keys are appended.
    /// No-op on a non-object entry, which never matches an id anyway.
    pub fn merge(&mut self, patch: Map<String, Value>) {
        if let Value::Object(fields) = &mut self.value {
            fields.extend(patch);
        }
    }
}

impl From<Trade> for Value {
    fn from(trade: Trade) -> Self {
        trade.value
    }
}

/// Issues creation-ordered ids derived from the wall clock (Unix ms).
///
/// Two creates inside the same millisecond, or a clock that steps
/// backwards, still yield strictly increasing ids. Callers must hold the
/// store's write lock so the collision scan sees the latest collection.
#[derive(Debug, Default)]
pub struct TradeIdGenerator {
    last: AtomicU64,
}

impl TradeIdGenerator {
    pub const fn new() -> Self {
        Self {
            last: AtomicU64::new(0),
        }
    }

    /// Next id for a record created at `now`, unique within `existing`.
    pub fn next_id(&self, now: DateTime<Utc>, existing: &[Trade]) -> TradeId {
        let now_ms = u64::try_from(now.timestamp_millis()).unwrap_or(0);
        let mut candidate = now_ms.max(self.last.load(Ordering::Relaxed) + 1);

        loop {
            let id = candidate.to_string();
            if !existing.iter().any(|t| t.id() == Some(id.as_str())) {
                self.last.store(candidate, Ordering::Relaxed);
                return id;
            }
            candidate += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    fn trade(value: Value) -> Trade {
        Trade::from_value(value)
    }

    #[test]
    fn test_reserved_accessors() {
        let t = trade(json!({"id": "42", "status": "win", "result": 12.5}));
        assert_eq!(t.id(), Some("42"));
        assert_eq!(t.status(), TradeStatus::Win);
        assert_eq!(t.result(), 12.5);
        assert_eq!(t.created_at(), None);
    }

    #[test]
    fn test_missing_or_malformed_result_is_zero() {
        assert_eq!(trade(json!({})).result(), 0.0);
        assert_eq!(trade(json!({"result": "100"})).result(), 0.0);
        assert_eq!(trade(json!({"result": null})).result(), 0.0);
    }

    #[test]
    fn test_unknown_status_is_other() {
        assert_eq!(trade(json!({"status": "breakeven"})).status(), TradeStatus::Other);
        assert_eq!(trade(json!({"status": 1})).status(), TradeStatus::Other);
        assert_eq!(trade(json!({})).status(), TradeStatus::Other);
    }

    #[test]
    fn test_numeric_id_is_not_a_string_id() {
        assert_eq!(trade(json!({"id": 42})).id(), None);
    }

    #[test]
    fn test_non_object_entries_have_no_reserved_fields() {
        for value in [json!(1), json!("x"), json!(null), json!([{"id": "1"}])] {
            let t = trade(value.clone());
            assert_eq!(t.id(), None);
            assert_eq!(t.status(), TradeStatus::Other);
            assert_eq!(t.result(), 0.0);
            assert!(t.fields().is_none());
            assert_eq!(Value::from(t), value);
        }
    }

    #[test]
    fn test_merge_and_identity_leave_non_objects_alone() {
        let mut t = trade(json!(7));
        t.merge(json!({"a": 1}).as_object().cloned().unwrap());
        t.assign_identity("1".to_string(), Utc::now());
        assert_eq!(Value::from(t), json!(7));
    }

    #[test]
    fn test_merge_overwrites_named_fields_only() {
        let mut t = trade(json!({"a": 0, "b": 2}));
        let patch = json!({"a": 1}).as_object().cloned().unwrap();
        t.merge(patch);
        assert_eq!(Value::from(t), json!({"a": 1, "b": 2}));
    }

    #[test]
    fn test_merge_keeps_key_order() {
        let mut t = trade(json!({"pair": "BTC", "status": "loss", "notes": "x"}));
        let patch = json!({"status": "win", "extra": true}).as_object().cloned().unwrap();
        t.merge(patch);
        let keys: Vec<&str> = t.fields().unwrap().keys().map(String::as_str).collect();
        assert_eq!(keys, ["pair", "status", "notes", "extra"]);
    }

    #[test]
    fn test_assign_identity_overwrites_caller_values() {
        let mut t = trade(json!({"id": "mine", "createdAt": "yesterday", "pair": "ETH"}));
        let at = Utc.with_ymd_and_hms(2026, 1, 5, 14, 3, 11).unwrap();
        t.assign_identity("1767621791000".to_string(), at);
        assert_eq!(t.id(), Some("1767621791000"));
        assert_eq!(t.created_at(), Some("2026-01-05T14:03:11.000Z"));
        assert_eq!(t.get("pair"), Some(&json!("ETH")));
    }

    #[test]
    fn test_id_generator_is_monotonic_within_same_millisecond() {
        let ids = TradeIdGenerator::new();
        let now = Utc.timestamp_millis_opt(1_700_000_000_000).unwrap();
        let first = ids.next_id(now, &[]);
        let second = ids.next_id(now, &[]);
        assert_eq!(first, "1700000000000");
        assert_eq!(second, "1700000000001");
    }

    #[test]
    fn test_id_generator_skips_existing_ids() {
        let ids = TradeIdGenerator::new();
        let now = Utc.timestamp_millis_opt(1_700_000_000_000).unwrap();
        let existing = vec![
            trade(json!({"id": "1700000000000"})),
            trade(json!({"id": "1700000000001"})),
        ];
        assert_eq!(ids.next_id(now, &existing), "1700000000002");
    }

    #[test]
    fn test_id_generator_survives_clock_going_backwards() {
        let ids = TradeIdGenerator::new();
        let later = Utc.timestamp_millis_opt(1_700_000_000_500).unwrap();
        let earlier = Utc.timestamp_millis_opt(1_700_000_000_000).unwrap();
        let a = ids.next_id(later, &[]);
        let b = ids.next_id(earlier, &[]);
        assert!(b.parse::<u64>().unwrap() > a.parse::<u64>().unwrap());
    }
}
