/*!
 * Execution Timeline
 * Append-only tick-by-tick record of CPU occupancy
 */

use crate::core::types::{Pid, Tick};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// What occupied the CPU during one tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Occupant {
    Process(Pid),
    Idle,
}

impl Occupant {
    const IDLE: &'static str = "idle";

    #[inline(always)]
    pub const fn pid(&self) -> Option<Pid> {
        match self {
            Self::Process(pid) => Some(*pid),
            Self::Idle => None,
        }
    }

    #[inline(always)]
    pub const fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }
}

// Serialized as the bare pid, or the string "idle"
impl Serialize for Occupant {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Self::Process(pid) => serializer.serialize_u32(*pid),
            Self::Idle => serializer.serialize_str(Self::IDLE),
        }
    }
}

impl<'de> Deserialize<'de> for Occupant {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Pid(Pid),
            Marker(String),
        }

        match Raw::deserialize(deserializer)? {
            Raw::Pid(pid) => Ok(Self::Process(pid)),
            Raw::Marker(marker) if marker == Self::IDLE => Ok(Self::Idle),
            Raw::Marker(other) => Err(serde::de::Error::custom(format!(
                "expected a pid or \"idle\", got \"{}\"",
                other
            ))),
        }
    }
}

/// One timeline slot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimelineEntry {
    pub tick: Tick,
    #[serde(rename = "pid")]
    pub occupant: Occupant,
}

/// Tick-ordered record of a run; entry `i` always describes tick `i`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Timeline {
    entries: Vec<TimelineEntry>,
}

// Entry `i` must carry tick `i`
impl<'de> Deserialize<'de> for Timeline {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let entries = Vec::<TimelineEntry>::deserialize(deserializer)?;
        if let Some((index, entry)) = entries
            .iter()
            .enumerate()
            .find(|(index, entry)| entry.tick != *index as Tick)
        {
            return Err(serde::de::Error::custom(format!(
                "timeline entry {} has tick {}",
                index, entry.tick
            )));
        }
        Ok(Self { entries })
    }
}

impl Timeline {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Vec::with_capacity(capacity),
        }
    }

    /// Append the occupant of the next tick
    pub(crate) fn push(&mut self, tick: Tick, occupant: Occupant) {
        debug_assert_eq!(
            tick,
            self.entries.len() as Tick,
            "Timeline ticks must be contiguous"
        );
        self.entries.push(TimelineEntry { tick, occupant });
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[inline]
    #[must_use]
    pub fn entries(&self) -> &[TimelineEntry] {
        &self.entries
    }

    #[inline]
    pub fn iter(&self) -> std::slice::Iter<'_, TimelineEntry> {
        self.entries.iter()
    }

    /// Tick of the last entry
    #[inline]
    #[must_use]
    pub fn last_tick(&self) -> Option<Tick> {
        self.entries.last().map(|entry| entry.tick)
    }

    /// Ticks in which `pid` held the CPU
    #[must_use]
    pub fn occupancy(&self, pid: Pid) -> usize {
        self.entries
            .iter()
            .filter(|entry| entry.occupant == Occupant::Process(pid))
            .count()
    }

    /// Ticks in which the CPU was idle
    #[must_use]
    pub fn idle_ticks(&self) -> usize {
        self.entries
            .iter()
            .filter(|entry| entry.occupant.is_idle())
            .count()
    }

    /// Occupants in tick order
    pub fn occupants(&self) -> impl Iterator<Item = Occupant> + '_ {
        self.entries.iter().map(|entry| entry.occupant)
    }
}

impl<'a> IntoIterator for &'a Timeline {
    type Item = &'a TimelineEntry;
    type IntoIter = std::slice::Iter<'a, TimelineEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
