/// A raw input record as submitted by a form or API payload.
///
/// Field values are arbitrary JSON; an absent key reads as `null`.
pub type Record = serde_json::Map<String, serde_json::Value>;
