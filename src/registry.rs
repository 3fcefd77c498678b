//! Door registry: sensor id to display name and output line.
//!
//! Built once at startup from a fixed table and immutable afterwards.
//! Exactly one row is the fallback, matched whenever a report carries an
//! id that is missing, unparseable, or not in the table.

use core::fmt;

use crate::error::ConfigError;
use crate::pins::LineId;

/// Key of a registry row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityId {
    /// A sensor id as reported by rtl_433.
    Known(u64),
    /// Catch-all row for unrecognised sensors.
    Fallback,
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Known(id) => write!(f, "{id}"),
            Self::Fallback => write!(f, "fallback"),
        }
    }
}

/// One monitored door.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonitoredEntity {
    pub id: EntityId,
    pub display_name: &'static str,
    pub line: LineId,
}

impl MonitoredEntity {
    pub const fn new(id: EntityId, display_name: &'static str, line: LineId) -> Self {
        Self {
            id,
            display_name,
            line,
        }
    }

    pub fn is_fallback(&self) -> bool {
        self.id == EntityId::Fallback
    }
}

/// Validated door table.
#[derive(Debug, Clone)]
pub struct Registry {
    known: Vec<MonitoredEntity>,
    fallback: MonitoredEntity,
}

impl Registry {
    /// Validate `entries` and build the lookup table.
    ///
    /// Lines and known ids must be pairwise distinct and exactly one row
    /// must be the fallback.  Any violation is a configuration bug and the
    /// caller is expected to abort startup.
    pub fn new(entries: &[MonitoredEntity]) -> Result<Self, ConfigError> {
        let mut known: Vec<MonitoredEntity> = Vec::with_capacity(entries.len());
        let mut fallback = None;

        for (i, entry) in entries.iter().enumerate() {
            if entries[..i].iter().any(|e| e.line == entry.line) {
                return Err(ConfigError::DuplicateLine(entry.line));
            }
            match entry.id {
                EntityId::Fallback => {
                    if fallback.replace(*entry).is_some() {
                        return Err(ConfigError::MultipleFallbacks);
                    }
                }
                EntityId::Known(id) => {
                    if known.iter().any(|e| e.id == entry.id) {
                        return Err(ConfigError::DuplicateId(id));
                    }
                    known.push(*entry);
                }
            }
        }

        let fallback = fallback.ok_or(ConfigError::MissingFallback)?;
        Ok(Self { known, fallback })
    }

    /// Row for `id`, or the fallback row when `id` is absent or unknown.
    pub fn resolve(&self, id: Option<u64>) -> &MonitoredEntity {
        id.and_then(|id| self.known.iter().find(|e| e.id == EntityId::Known(id)))
            .unwrap_or(&self.fallback)
    }

    pub fn fallback(&self) -> &MonitoredEntity {
        &self.fallback
    }

    /// All rows, fallback last.
    pub fn entities(&self) -> impl Iterator<Item = &MonitoredEntity> {
        self.known.iter().chain(core::iter::once(&self.fallback))
    }

    /// Every registered output line.
    pub fn lines(&self) -> impl Iterator<Item = LineId> + '_ {
        self.entities().map(|e| e.line)
    }

    pub fn len(&self) -> usize {
        self.known.len() + 1
    }

    pub fn is_empty(&self) -> bool {
        false
    }
}
