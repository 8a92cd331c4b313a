//! Snapshot file codec
//!
//! The file is a pretty-printed JSON document holding two string maps:
//!
//! ```json
//! {
//!   "marriedPlayers": { "<uuid>": "<partner uuid>", ... },
//!   "coupleColors": { "<canonical uuid>": "gold", ... }
//! }
//! ```
//!
//! Every couple appears twice in `marriedPlayers`, once per direction.
//! Pending proposals and the color allocator position are never written, so
//! after a restart couples keep their colors but new couples are colored
//! starting again from the first palette color.

use crate::{PersistError, SnapshotSink};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use wedlock_domain::{ChatColor, Couple, PlayerId, Snapshot};

/// On-disk shape of the snapshot
#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SaveFile {
    #[serde(default)]
    married_players: Option<BTreeMap<String, String>>,

    #[serde(default)]
    couple_colors: Option<BTreeMap<String, String>>,
}

/// Result of decoding a snapshot document
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DecodeReport {
    /// Entries that decoded cleanly
    pub snapshot: Snapshot,

    /// One message per entry that was skipped
    pub skipped: Vec<String>,
}

/// Render a snapshot as the JSON document stored on disk
pub fn encode(snapshot: &Snapshot) -> Result<String, PersistError> {
    let file = SaveFile {
        married_players: Some(
            snapshot
                .marriages
                .iter()
                .map(|(player, partner)| (player.to_string(), partner.to_string()))
                .collect(),
        ),
        couple_colors: Some(
            snapshot
                .colors
                .iter()
                .map(|(couple, color)| (couple.to_string(), color.as_str().to_string()))
                .collect(),
        ),
    };
    Ok(serde_json::to_string_pretty(&file)?)
}

/// Decode a snapshot document, logging and skipping malformed entries
///
/// # Errors
///
/// [`PersistError::Json`] when the text is not a JSON object of the expected
/// shape. An empty document or a bare `null` decodes to an empty snapshot.
pub fn decode(contents: &str) -> Result<Snapshot, PersistError> {
    let report = decode_report(contents)?;
    for skipped in &report.skipped {
        tracing::warn!("Skipped marriage data entry: {}", skipped);
    }
    Ok(report.snapshot)
}

/// Decode a snapshot document, returning what was skipped instead of logging it
pub fn decode_report(contents: &str) -> Result<DecodeReport, PersistError> {
    if contents.trim().is_empty() {
        return Ok(DecodeReport::default());
    }

    let file: Option<SaveFile> = serde_json::from_str(contents)?;
    let file = file.unwrap_or_default();
    let mut report = DecodeReport::default();

    for (key, value) in file.married_players.unwrap_or_default() {
        match (PlayerId::from_string(&key), PlayerId::from_string(&value)) {
            (Ok(player), Ok(partner)) => {
                report.snapshot.marriages.insert(player, partner);
            }
            (Err(e), _) | (_, Err(e)) => {
                let entry = format!("marriedPlayers[{}]: {}", key, e);
                report.skipped.push(entry);
            }
        }
    }

    for (key, value) in file.couple_colors.unwrap_or_default() {
        let color = value
            .parse::<ChatColor>()
            .map_err(|e| format!("coupleColors[{}]: {}", key, e));
        let couple =
            PlayerId::from_string(&key).map_err(|e| format!("coupleColors[{}]: {}", key, e));
        match (couple, color) {
            (Ok(couple), Ok(color)) => {
                report.snapshot.colors.insert(couple, color);
            }
            (Err(e), _) | (_, Err(e)) => report.skipped.push(e),
        }
    }

    Ok(report)
}

/// Make a decoded snapshot internally consistent
///
/// - A marriage entry is kept only if its partner points back at it
/// - A color keyed by either member of a kept couple is re-keyed to the
///   couple's canonical id; the canonical key wins if both are present
/// - Any other color is dropped
///
/// Returns the repaired snapshot and one message per change.
pub fn sanitize(snapshot: Snapshot) -> (Snapshot, Vec<String>) {
    let mut repairs = Vec::new();
    let mut clean = Snapshot::new();

    for (player, partner) in &snapshot.marriages {
        if player != partner && snapshot.marriages.get(partner) == Some(player) {
            clean.marriages.insert(*player, *partner);
        } else {
            repairs.push(format!(
                "dropped one-sided marriage {} -> {}",
                player, partner
            ));
        }
    }

    let mut colors: Vec<(PlayerId, ChatColor)> = snapshot.colors.into_iter().collect();
    // Canonical keys first so they take precedence over re-keyed ones
    colors.sort_by_key(|(key, _)| {
        let canonical = clean
            .marriages
            .get(key)
            .and_then(|partner| Couple::new(*key, *partner))
            .map(|couple| couple.canonical_id() == *key)
            .unwrap_or(false);
        !canonical
    });

    for (key, color) in colors {
        let couple = clean
            .marriages
            .get(&key)
            .and_then(|partner| Couple::new(key, *partner));
        match couple {
            Some(couple) if clean.colors.contains_key(&couple.canonical_id()) => {
                if couple.canonical_id() != key {
                    repairs.push(format!("dropped duplicate color for {}", key));
                }
            }
            Some(couple) => {
                if couple.canonical_id() != key {
                    repairs.push(format!(
                        "moved color of {} to canonical id {}",
                        key,
                        couple.canonical_id()
                    ));
                }
                clean.colors.insert(couple.canonical_id(), color);
            }
            None => repairs.push(format!("dropped color of unmarried {}", key)),
        }
    }

    (clean, repairs)
}

/// The snapshot file of one world
///
/// # Examples
///
/// ```no_run
/// use wedlock_store::JsonSnapshotFile;
///
/// let file = JsonSnapshotFile::new("world/marriagemod.json");
/// let snapshot = file.load();
/// println!("{} married players", snapshot.marriages.len());
/// ```
#[derive(Debug, Clone)]
pub struct JsonSnapshotFile {
    path: PathBuf,
}

impl JsonSnapshotFile {
    /// Snapshot file at `path`; nothing is touched until `save` or `load`
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Location of the file
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self.path.clone().into_os_string();
        name.push(".tmp");
        PathBuf::from(name)
    }

    /// Overwrite the file with `snapshot`
    ///
    /// Writes a sibling temporary file and renames it into place, so readers
    /// never see a half-written document. The parent directory is created if
    /// missing.
    pub fn save(&self, snapshot: &Snapshot) -> Result<(), PersistError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let contents = encode(snapshot)?;
        let temp = self.temp_path();
        fs::write(&temp, contents)?;
        fs::rename(&temp, &self.path)?;
        Ok(())
    }

    /// Read the file strictly
    ///
    /// `Ok(None)` when the file does not exist.
    pub fn try_load(&self) -> Result<Option<Snapshot>, PersistError> {
        match fs::read_to_string(&self.path) {
            Ok(contents) => decode(&contents).map(Some),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Read the file, falling back to an empty snapshot
    ///
    /// A missing file is normal on first start. An unreadable or corrupt file
    /// is logged and treated as empty so the server keeps running.
    pub fn load(&self) -> Snapshot {
        match self.try_load() {
            Ok(Some(snapshot)) => snapshot,
            Ok(None) => {
                tracing::debug!("No marriage data at {}, starting fresh", self.path.display());
                Snapshot::new()
            }
            Err(e) => {
                tracing::error!(
                    "Could not load marriage data from {}: {}",
                    self.path.display(),
                    e
                );
                Snapshot::new()
            }
        }
    }
}

impl SnapshotSink for JsonSnapshotFile {
    fn flush(&self, snapshot: &Snapshot) -> Result<(), PersistError> {
        self.save(snapshot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(n: u128) -> PlayerId {
        PlayerId::from_value(n)
    }

    fn married(pairs: &[(u128, u128)]) -> Snapshot {
        let mut snapshot = Snapshot::new();
        for &(a, b) in pairs {
            snapshot.marriages.insert(id(a), id(b));
            snapshot.marriages.insert(id(b), id(a));
        }
        snapshot
    }

    #[test]
    fn test_encode_uses_camel_case_field_names() {
        let mut snapshot = married(&[(1, 2)]);
        snapshot.colors.insert(id(1), ChatColor::LightPurple);

        let json = encode(&snapshot).unwrap();
        assert!(json.contains("\"marriedPlayers\""));
        assert!(json.contains("\"coupleColors\""));
        assert!(json.contains("\"light_purple\""));
        assert!(json.contains(&id(2).to_string()));
    }

    #[test]
    fn test_decode_accepts_missing_and_null_sections() {
        assert!(decode("").unwrap().is_empty());
        assert!(decode("null").unwrap().is_empty());
        assert!(decode("{}").unwrap().is_empty());
        assert!(decode(r#"{"marriedPlayers": null, "coupleColors": null}"#)
            .unwrap()
            .is_empty());
    }

    #[test]
    fn test_decode_rejects_non_json() {
        assert!(matches!(decode("not json at all"), Err(PersistError::Json(_))));
        assert!(matches!(decode("[1, 2, 3]"), Err(PersistError::Json(_))));
    }

    #[test]
    fn test_decode_skips_bad_entries() {
        let a = id(1).to_string();
        let b = id(2).to_string();
        let json = format!(
            r#"{{
                "marriedPlayers": {{ "{a}": "{b}", "{b}": "{a}", "Steve": "{a}" }},
                "coupleColors": {{ "{a}": "GOLD", "{b}": "pink" }}
            }}"#
        );

        let report = decode_report(&json).unwrap();
        assert_eq!(report.snapshot.marriages.len(), 2);
        assert_eq!(report.snapshot.colors.get(&id(1)), Some(&ChatColor::Gold));
        assert_eq!(report.skipped.len(), 2);
    }

    #[test]
    fn test_sanitize_drops_one_sided_marriage() {
        let mut snapshot = married(&[(1, 2)]);
        snapshot.marriages.insert(id(3), id(1));

        let (clean, repairs) = sanitize(snapshot);
        assert_eq!(clean, married(&[(1, 2)]));
        assert_eq!(repairs.len(), 1);
    }

    #[test]
    fn test_sanitize_rekeys_color_to_canonical_id() {
        let mut snapshot = married(&[(1, 2)]);
        snapshot.colors.insert(id(2), ChatColor::Aqua);
        snapshot.colors.insert(id(9), ChatColor::Red);

        let (clean, repairs) = sanitize(snapshot);
        assert_eq!(clean.colors.len(), 1);
        assert_eq!(clean.colors.get(&id(1)), Some(&ChatColor::Aqua));
        assert_eq!(repairs.len(), 2);
    }

    #[test]
    fn test_sanitize_prefers_canonical_color() {
        let mut snapshot = married(&[(1, 2)]);
        snapshot.colors.insert(id(1), ChatColor::Gold);
        snapshot.colors.insert(id(2), ChatColor::Aqua);

        let (clean, _) = sanitize(snapshot);
        assert_eq!(clean.colors.get(&id(1)), Some(&ChatColor::Gold));
    }

    #[test]
    fn test_sanitize_leaves_clean_snapshot_alone() {
        let mut snapshot = married(&[(1, 2), (3, 4)]);
        snapshot.colors.insert(id(1), ChatColor::Gold);

        let (clean, repairs) = sanitize(snapshot.clone());
        assert_eq!(clean, snapshot);
        assert!(repairs.is_empty());
    }
}
