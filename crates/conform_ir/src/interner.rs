//! Sharded string interner for member and type names.
//!
//! Interning happens while types and contracts are declared; lookups happen
//! on every diagnostic and adapter slot name. Both sides take a per-shard
//! lock, so declarations on one thread do not stall matching on another.

use parking_lot::RwLock;
use rustc_hash::FxHashMap;
use std::fmt;
use std::sync::Arc;

const SHARD_BITS: u32 = 4;
const SLOT_BITS: u32 = u32::BITS - SHARD_BITS;
const SHARDS: usize = 1 << SHARD_BITS;
/// Largest slot index a shard can hand out.
const MAX_SLOT: u32 = (1 << SLOT_BITS) - 1;

/// Handle to an interned member or type name.
///
/// Only meaningful for the interner that produced it: the high bits select
/// a shard, the low bits a slot within that shard.
#[derive(Copy, Clone, Default, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct Name(u32);

impl Name {
    /// The empty string, slot 0 of shard 0 in every interner.
    pub const EMPTY: Name = Name(0);

    #[inline]
    fn pack(shard: usize, slot: u32) -> Self {
        debug_assert!(shard < SHARDS && slot <= MAX_SLOT);
        #[expect(
            clippy::cast_possible_truncation,
            reason = "shard is below SHARDS (16)"
        )]
        let shard = shard as u32;
        Name((shard << SLOT_BITS) | slot)
    }

    #[inline]
    fn shard(self) -> usize {
        (self.0 >> SLOT_BITS) as usize
    }

    #[inline]
    fn slot(self) -> usize {
        (self.0 & MAX_SLOT) as usize
    }

    #[inline]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl fmt::Debug for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Name({}:{})", self.shard(), self.slot())
    }
}

/// Strings owned by one shard. `slots[i]` is the text of slot `i`.
#[derive(Default)]
struct InternShard {
    slots_by_text: FxHashMap<&'static str, u32>,
    slots: Vec<&'static str>,
}

impl InternShard {
    fn holding_empty() -> Self {
        let mut shard = Self::default();
        shard.slots_by_text.insert("", 0);
        shard.slots.push("");
        shard
    }
}

/// Error when interning a string fails.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InternError {
    /// A shard ran out of slot indices.
    ShardOverflow { shard_idx: usize, count: usize },
}

impl fmt::Display for InternError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InternError::ShardOverflow { shard_idx, count } => write!(
                f,
                "interner shard {shard_idx} is full: {count} names, max is {MAX_SLOT}"
            ),
        }
    }
}

impl std::error::Error for InternError {}

/// Sharded string interner.
///
/// Strings are leaked on first interning and never freed; the set of names
/// in a process is bounded by the declared types and contracts.
pub struct StringInterner {
    shards: [RwLock<InternShard>; SHARDS],
}

impl StringInterner {
    /// Create a new interner with the prelude member names pre-interned.
    pub fn new() -> Self {
        let shards = std::array::from_fn(|i| {
            RwLock::new(if i == Name::EMPTY.shard() {
                InternShard::holding_empty()
            } else {
                InternShard::default()
            })
        });
        let interner = Self { shards };
        for name in ["to_string", "parse", "self", "value"] {
            interner.intern(name);
        }
        interner
    }

    /// Only the first eight bytes feed the shard choice.
    #[inline]
    fn shard_for(s: &str) -> usize {
        let hash = s
            .bytes()
            .take(8)
            .fold(0u32, |h, b| h.wrapping_mul(31).wrapping_add(u32::from(b)));
        hash as usize % SHARDS
    }

    /// Try to intern a string, returning its Name or an error when its
    /// shard is full.
    pub fn try_intern(&self, s: &str) -> Result<Name, InternError> {
        let shard_idx = Self::shard_for(s);
        let shard = &self.shards[shard_idx];

        {
            let guard = shard.read();
            if let Some(&slot) = guard.slots_by_text.get(s) {
                return Ok(Name::pack(shard_idx, slot));
            }
        }

        let mut guard = shard.write();
        // Another writer may have won the race for this string.
        if let Some(&slot) = guard.slots_by_text.get(s) {
            return Ok(Name::pack(shard_idx, slot));
        }

        let count = guard.slots.len();
        let slot = u32::try_from(count)
            .ok()
            .filter(|slot| *slot <= MAX_SLOT)
            .ok_or(InternError::ShardOverflow { shard_idx, count })?;

        let leaked: &'static str = Box::leak(s.to_owned().into_boxed_str());
        guard.slots.push(leaked);
        guard.slots_by_text.insert(leaked, slot);
        Ok(Name::pack(shard_idx, slot))
    }

    /// Intern a string, returning its Name.
    ///
    /// # Panics
    /// Panics if a shard is full. Use `try_intern` to handle it.
    #[inline]
    pub fn intern(&self, s: &str) -> Name {
        self.try_intern(s).unwrap_or_else(|e| panic!("{e}"))
    }

    /// Look up a name without interning it.
    pub fn get(&self, s: &str) -> Option<Name> {
        let shard_idx = Self::shard_for(s);
        let guard = self.shards[shard_idx].read();
        guard
            .slots_by_text
            .get(s)
            .map(|&slot| Name::pack(shard_idx, slot))
    }

    /// Look up the string for a Name.
    ///
    /// Names from a different interner resolve to `""` instead of panicking.
    pub fn lookup(&self, name: Name) -> &'static str {
        let guard = self.shards[name.shard()].read();
        guard.slots.get(name.slot()).copied().unwrap_or("")
    }

    /// Number of interned strings, the empty string included.
    pub fn len(&self) -> usize {
        self.shards.iter().map(|s| s.read().slots.len()).sum()
    }

    /// Always false: the empty string is pre-interned.
    pub fn is_empty(&self) -> bool {
        false
    }
}

impl Default for StringInterner {
    fn default() -> Self {
        Self::new()
    }
}

/// Thread-safe shared interner.
#[derive(Clone, Default)]
pub struct SharedInterner(Arc<StringInterner>);

impl SharedInterner {
    pub fn new() -> Self {
        Self::default()
    }
}

impl std::ops::Deref for SharedInterner {
    type Target = StringInterner;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl fmt::Debug for SharedInterner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SharedInterner({} names)", self.0.len())
    }
}

#[cfg(test)]
mod tests;
