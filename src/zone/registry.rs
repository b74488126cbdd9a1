// This is a part of calclock.
// See README.md and LICENSE.txt for details.

//! The append-only registry of zone-rules providers.

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use parking_lot::RwLock;

use crate::error::{Error, ErrorKind};
use crate::zone::{TimeZone, ZoneRules};

/// A source of zone rules: one group (such as "TZDB") carrying one or more
/// versions of rules for a set of region identifiers.
pub trait ZoneRulesProvider: Send + Sync {
    /// The group identifier, matching `[A-Za-z0-9._-]+`.
    fn group_id(&self) -> &str;

    /// The version identifiers supplied by this provider, each matching
    /// `[A-Za-z0-9._-]+`.
    fn versions(&self) -> Vec<String>;

    /// The region identifiers available in a version.
    fn region_ids(&self, version: &str) -> Vec<String>;

    /// The rules for a region in a version, or `None` when unknown.
    fn rules(&self, region_id: &str, version: &str) -> Option<Arc<dyn ZoneRules>>;
}

/// A thread-safe, append-only registry of [`ZoneRulesProvider`]s.
///
/// The registry is created explicitly (typically once at startup) and passed
/// by reference to whatever needs zone lookups; it grows monotonically and
/// nothing is ever deregistered for the life of the process. Registration
/// and lookup may happen concurrently from any number of threads.
pub struct ZoneRulesRegistry {
    groups: RwLock<HashMap<String, GroupEntry>>,
}

#[derive(Default)]
struct GroupEntry {
    versions: BTreeMap<String, Arc<dyn ZoneRulesProvider>>,
}

impl ZoneRulesRegistry {
    /// Makes an empty registry.
    pub fn new() -> ZoneRulesRegistry {
        ZoneRulesRegistry { groups: RwLock::new(HashMap::new()) }
    }

    /// Registers a provider, adding every version it supplies to the
    /// provider's group.
    ///
    /// Fails when the group or a version identifier does not match
    /// `[A-Za-z0-9._-]+`, or when a version already exists in the group;
    /// in the failure case nothing is registered.
    pub fn register(&self, provider: Arc<dyn ZoneRulesProvider>) -> Result<(), Error> {
        let group_id = provider.group_id().to_owned();
        check_id(&group_id)?;
        let versions = provider.versions();
        for version in &versions {
            check_id(version)?;
        }

        let mut groups = self.groups.write();
        let entry = groups.entry(group_id.clone()).or_default();
        for version in &versions {
            if entry.versions.contains_key(version) {
                return Err(Error::new(ErrorKind::InvalidZoneId {
                    id: format!("{}:{}", group_id, version),
                    reason: "version already registered in this group",
                }));
            }
        }
        for version in versions {
            entry.versions.insert(version, Arc::clone(&provider));
        }
        Ok(())
    }

    /// The registered group identifiers.
    pub fn group_ids(&self) -> Vec<String> {
        let mut ids: Vec<String> = self.groups.read().keys().cloned().collect();
        ids.sort();
        ids
    }

    /// The version identifiers registered in a group, in ascending order.
    pub fn versions(&self, group_id: &str) -> Vec<String> {
        self.groups
            .read()
            .get(group_id)
            .map(|entry| entry.versions.keys().cloned().collect())
            .unwrap_or_default()
    }

    /// The lexically greatest version in a group, the convention for
    /// "latest" among TZDB-style version names.
    pub fn latest_version(&self, group_id: &str) -> Option<String> {
        self.groups
            .read()
            .get(group_id)
            .and_then(|entry| entry.versions.keys().next_back().cloned())
    }

    /// The rules for a region, from a specific version or from the latest
    /// version of the group when `version` is `None`.
    pub fn rules_for(
        &self,
        group_id: &str,
        region_id: &str,
        version: Option<&str>,
    ) -> Result<Arc<dyn ZoneRules>, Error> {
        let groups = self.groups.read();
        let entry = groups.get(group_id).ok_or_else(|| {
            Error::new(ErrorKind::UnknownZone { id: format!("{}:{}", group_id, region_id) })
        })?;
        let provider = match version {
            Some(version) => entry.versions.get(version),
            None => entry.versions.values().next_back(),
        }
        .ok_or_else(|| {
            Error::new(ErrorKind::UnknownZone {
                id: format!("{}:{}#{}", group_id, region_id, version.unwrap_or("<latest>")),
            })
        })?;
        let version = match version {
            Some(version) => version.to_owned(),
            None => entry.versions.keys().next_back().expect("non-empty versions").clone(),
        };
        provider.rules(region_id, &version).ok_or_else(|| {
            Error::new(ErrorKind::UnknownZone { id: format!("{}:{}#{}", group_id, region_id, version) })
        })
    }

    /// Looks up a region identifier across all groups (latest version each)
    /// and makes a `TimeZone` from the first group that knows it, searching
    /// groups in ascending identifier order.
    pub fn zone(&self, region_id: &str) -> Result<TimeZone, Error> {
        for group_id in self.group_ids() {
            if let Ok(rules) = self.rules_for(&group_id, region_id, None) {
                return TimeZone::of_rules(region_id, rules);
            }
        }
        Err(Error::new(ErrorKind::UnknownZone { id: region_id.to_owned() }))
    }
}

impl Default for ZoneRulesRegistry {
    fn default() -> ZoneRulesRegistry {
        ZoneRulesRegistry::new()
    }
}

/// Group and version identifiers match `[A-Za-z0-9._-]+`.
fn check_id(id: &str) -> Result<(), Error> {
    let valid = !id.is_empty()
        && id.bytes().all(|b| b.is_ascii_alphanumeric() || b == b'.' || b == b'_' || b == b'-');
    if !valid {
        return Err(Error::new(ErrorKind::InvalidZoneId {
            id: id.to_owned(),
            reason: "identifier must match [A-Za-z0-9._-]+",
        }));
    }
    Ok(())
}
