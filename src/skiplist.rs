//! Skip list - an ordered associative container over sentinel-bounded rows.
//!
//! Values live in a stack of doubly-linked rows. Row 0 holds every entry in
//! ascending order; each row above holds a probabilistic sample of the row
//! below, so a search can skip long stretches of the base row. Expected
//! O(log n) search, insert, and delete, with no rebalancing.
//!
//! Every row is delimited by a negative-infinity head sentinel and a
//! positive-infinity tail sentinel. Head sentinels are vertically linked
//! into a tower; tail sentinels are row-local. A maintained tail pointer to
//! the row-0 maximum gives O(1) `max` and O(1) target identification for
//! `remove_max`, which together with O(1) `min`/`remove_min` lets the list
//! stand in for a min or max heap.
//!
//! ```text
//! row 2:  -inf ──────────────► 30 ─────────────► +inf
//!           │                   │
//! row 1:  -inf ──────► 20 ────► 30 ─────────────► +inf
//!           │           │       │
//! row 0:  -inf ─► 10 ─► 20 ───► 30 ─► 40 ─► 50 ─► +inf
//! ```
//!
//! # Design
//!
//! Nodes are held in an [`Arena`] and addressed by [`Link`] indices, never
//! by reference. The four link fields (`prev`/`next`/`above`/`below`) are
//! plain indices with a reserved sentinel for "none", so rewiring a row is
//! O(1) and the vertical tower needs no ownership gymnastics.
//!
//! Promotion randomness is injected as a [`RngCore`], so a seeded generator
//! makes the whole structure deterministic.
//!
//! # Example
//!
//! ```
//! use towerlist::SkipList;
//! use rand::SeedableRng;
//! use rand::rngs::SmallRng;
//!
//! let rng = SmallRng::seed_from_u64(12345);
//! let mut list: SkipList<i64, &str, SmallRng> = SkipList::new(rng);
//!
//! list.insert("a", 30);
//! list.insert("b", 10);
//! list.insert("c", 20);
//!
//! assert_eq!(list.len(), 3);
//! assert_eq!(list.min(), 10);
//! assert_eq!(list.max(), 30);
//!
//! let hit = list.find(20).unwrap();
//! assert_eq!(hit.id, "c");
//!
//! let values: Vec<i64> = list.iter().map(|r| r.value).collect();
//! assert_eq!(values, vec![10, 20, 30]);
//! ```

use rand_core::RngCore;

use crate::arena::Arena;
use crate::link::Link;
use crate::numeric::Numeric;

// ============================================================================
// Bound
// ============================================================================

/// Ordered value domain of a node.
///
/// Head sentinels sit below every finite value and tail sentinels above,
/// so the maximum representable finite value stays insertable.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
enum Bound<B> {
    NegInf,
    Finite(B),
    PosInf,
}

impl<B: Copy> Bound<B> {
    #[inline]
    fn finite(self) -> Option<B> {
        match self {
            Bound::Finite(v) => Some(v),
            _ => None,
        }
    }
}

// ============================================================================
// Node
// ============================================================================

/// One (identifier, value) pair materialized at one row of the tower.
///
/// Sentinels carry an empty id and no aux. `prev`/`next` stay within the
/// row; `above`/`below` connect correspondents across rows.
#[derive(Debug, Clone)]
struct Node<B, V, L: Link> {
    id: String,
    value: Bound<B>,
    aux: Option<V>,
    level: usize,
    prev: L,
    next: L,
    above: L,
    below: L,
}

impl<B, V, L: Link> Node<B, V, L> {
    fn sentinel(value: Bound<B>, level: usize) -> Self {
        Self {
            id: String::new(),
            value,
            aux: None,
            level,
            prev: L::NONE,
            next: L::NONE,
            above: L::NONE,
            below: L::NONE,
        }
    }
}

impl<B: Numeric, V: Clone, L: Link> Node<B, V, L> {
    fn record(&self) -> Record<B, V> {
        Record {
            id: self.id.clone(),
            value: self.value.finite().expect("sentinel has no record"),
            aux: self.aux.clone(),
        }
    }
}

// ============================================================================
// Record
// ============================================================================

/// Caller-facing snapshot of one stored entry.
///
/// Records are deep copies: mutating a returned record never affects the
/// list, and later list mutations never affect the record.
#[derive(Debug, Clone, PartialEq)]
pub struct Record<B, V> {
    /// Caller-supplied identifier.
    pub id: String,
    /// The stored numeric value.
    pub value: B,
    /// Auxiliary payload, deep-copied out of the list.
    pub aux: Option<V>,
}

// ============================================================================
// SkipList
// ============================================================================

/// An ordered associative skip list with O(1) min/max access.
///
/// Entries are unique by numeric value; the string identifier and optional
/// auxiliary payload ride along and are returned in [`Record`] snapshots.
///
/// # Type Parameters
///
/// - `B`: Stored value type, must implement [`Numeric`]
/// - `V`: Auxiliary payload type, must implement `Clone`
/// - `R`: Random number generator implementing [`RngCore`]
/// - `L`: Index type for arena links, defaults to `u32`
#[derive(Debug)]
pub struct SkipList<B, V, R, L = u32>
where
    B: Numeric,
    L: Link,
{
    arena: Arena<Node<B, V, L>, L>,
    /// Head sentinel of the highest existing row.
    top_head: L,
    /// Head sentinel of row 0; scan origin for bottom-row operations.
    base_head: L,
    /// Maximum-valued real node in row 0, `NONE` when empty.
    row_tail: L,
    /// Most recently found node; `NONE` when invalidated.
    cached: L,
    /// Number of real (non-sentinel) entries.
    len: usize,
    /// `level_ratio - 1`; one promotion flip succeeds when
    /// `rng.next_u32() & level_mask == 0`.
    level_mask: u32,
    rng: R,
}

impl<B, V, R, L> SkipList<B, V, R, L>
where
    B: Numeric,
    V: Clone,
    R: RngCore,
    L: Link,
{
    /// Creates a new empty skip list.
    ///
    /// Uses the default level ratio of 2 (p=0.5), meaning on average half
    /// of the entries in a row are promoted into the row above.
    pub fn new(rng: R) -> Self {
        Self::with_level_ratio(rng, 2)
    }

    /// Creates a new empty skip list with a custom level ratio.
    ///
    /// `level_ratio` controls memory vs search speed tradeoff:
    /// - Higher values = fewer rows = less memory, slower search
    /// - Lower values = more rows = more memory, faster search
    ///
    /// Common values:
    /// - 2: Standard (p=0.5)
    /// - 4: Redis-style (p=0.25), sparser tower
    ///
    /// Must be a power of 2 and >= 2. Invalid values are rounded to the
    /// nearest valid value.
    pub fn with_level_ratio(rng: R, level_ratio: u32) -> Self {
        let level_ratio = level_ratio.max(2).next_power_of_two();
        let mut list = Self {
            arena: Arena::new(),
            top_head: L::NONE,
            base_head: L::NONE,
            row_tail: L::NONE,
            cached: L::NONE,
            len: 0,
            level_mask: level_ratio - 1,
            rng,
        };
        list.reset_rows();
        list
    }

    /// Returns the number of entries in the list.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the list holds no entries.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the configured level ratio.
    #[inline]
    pub fn level_ratio(&self) -> u32 {
        self.level_mask + 1
    }

    /// Reconfigures the level ratio for future insertions.
    ///
    /// Rounded to a power of 2 and clamped to >= 2, like
    /// [`with_level_ratio`](Self::with_level_ratio). Existing towers keep
    /// their shape; [`clear`](Self::clear) preserves this setting.
    pub fn set_level_ratio(&mut self, level_ratio: u32) {
        self.level_mask = level_ratio.max(2).next_power_of_two() - 1;
    }

    /// Returns the minimum stored value in O(1).
    ///
    /// When the list is empty, returns [`Numeric::MIN_VALUE`]; callers
    /// distinguish that sentinel by also checking [`len`](Self::len).
    pub fn min(&self) -> B {
        if self.len == 0 {
            return B::MIN_VALUE;
        }
        let first = self.node(self.base_head).next;
        self.node(first).value.finite().expect("head successor is real")
    }

    /// Returns the maximum stored value in O(1).
    ///
    /// When the list is empty, returns [`Numeric::MAX_VALUE`]; callers
    /// distinguish that sentinel by also checking [`len`](Self::len).
    pub fn max(&self) -> B {
        if self.len == 0 {
            return B::MAX_VALUE;
        }
        self.node(self.row_tail).value.finite().expect("row tail is real")
    }

    /// Returns the number of rows in the tower.
    ///
    /// Counted by walking `above` links from the base head sentinel, so
    /// this reflects rows that deletions have emptied of real entries:
    /// rows never shrink, and `levels` is monotonically non-decreasing
    /// until [`clear`](Self::clear).
    pub fn levels(&self) -> usize {
        let mut levels = 1;
        let mut head = self.base_head;
        loop {
            let above = self.node(head).above;
            if above.is_none() {
                break;
            }
            levels += 1;
            head = above;
        }
        levels
    }

    // ========================================================================
    // Insert
    // ========================================================================

    /// Inserts a value with no auxiliary payload.
    ///
    /// Silent no-op when `id` is empty, `value` is not comparable to
    /// itself (float NaN), or the value is already present.
    #[inline]
    pub fn insert(&mut self, id: &str, value: B) {
        self.insert_entry(id, value, None);
    }

    /// Inserts a value with an auxiliary payload.
    ///
    /// The payload is copied into the list; every row the value is
    /// promoted into carries its own copy. Same no-op rules as
    /// [`insert`](Self::insert).
    #[inline]
    pub fn insert_with(&mut self, id: &str, value: B, aux: V) {
        self.insert_entry(id, value, Some(aux));
    }

    fn insert_entry(&mut self, id: &str, value: B, aux: Option<V>) {
        if id.is_empty() || !value.is_comparable() {
            return;
        }
        let target = Bound::Finite(value);

        // First node in row 0 with a greater value, or None on duplicate
        let Some(insert_at) = self.insertion_point(self.base_head, target) else {
            return;
        };
        let mut below = self.splice_before(insert_at, id, target, aux.clone(), 0);
        self.len += 1;

        // Promote while the coin keeps coming up. The len guard keeps the
        // first two insertions in row 0 alone.
        let mut row_head = self.base_head;
        while self.len > 2 && self.flip() {
            let above_head = self.node(row_head).above;
            let upper = if above_head.is_some() {
                let level = self.node(above_head).level;
                let at = self
                    .insertion_point(above_head, target)
                    .expect("duplicate above base row");
                row_head = above_head;
                self.splice_before(at, id, target, aux.clone(), level)
            } else {
                // No row up there yet: open one holding just this value
                let new_head = self.new_row(row_head);
                let tail = self.node(new_head).next;
                let level = self.node(new_head).level;
                row_head = new_head;
                self.splice_before(tail, id, target, aux.clone(), level)
            };

            self.node_mut(below).above = upper;
            self.node_mut(upper).below = below;
            below = upper;
        }
    }

    // ========================================================================
    // Remove
    // ========================================================================

    /// Removes the entry holding `value` and returns its snapshot, or
    /// `None` if no entry holds that value.
    ///
    /// Scans row 0 linearly on purpose: deletion stays off the cached
    /// search path, so it never perturbs cache state tuned for finds.
    pub fn delete(&mut self, value: B) -> Option<Record<B, V>> {
        let target = Bound::Finite(value);
        let mut idx = self.node(self.base_head).next;
        loop {
            let node = self.node(idx);
            if node.value == Bound::PosInf {
                return None;
            }
            if node.value == target {
                break;
            }
            idx = node.next;
        }
        Some(self.remove_entry(idx))
    }

    /// Removes and returns the minimum entry, or `None` when empty.
    ///
    /// The target is identified in O(1) (row-0 head successor).
    pub fn remove_min(&mut self) -> Option<Record<B, V>> {
        if self.len == 0 {
            return None;
        }
        let first = self.node(self.base_head).next;
        Some(self.remove_entry(first))
    }

    /// Removes and returns the maximum entry, or `None` when empty.
    ///
    /// The target is identified in O(1) (maintained row-0 tail pointer).
    pub fn remove_max(&mut self) -> Option<Record<B, V>> {
        if self.len == 0 {
            return None;
        }
        Some(self.remove_entry(self.row_tail))
    }

    /// Removes all entries and rows, resetting to a single empty row.
    ///
    /// The level ratio and the random generator are preserved.
    pub fn clear(&mut self) {
        self.reset_rows();
    }

    // ========================================================================
    // Find
    // ========================================================================

    /// Returns a snapshot of the entry holding `value`, or `None`.
    ///
    /// A repeated query for the cached value returns in O(1). A query
    /// greater than the cached value resumes the descent from the cached
    /// node instead of the top head; this never skips a match because row
    /// 0 holds every entry in sorted order.
    pub fn find(&mut self, value: B) -> Option<Record<B, V>> {
        if self.len == 0 {
            return None;
        }
        let target = Bound::Finite(value);

        let mut start = self.top_head;
        if self.cached.is_some() {
            let cached = self.node(self.cached);
            if cached.value == target {
                return Some(cached.record());
            }
            if target > cached.value {
                start = self.cached;
            }
        }

        if self.len == 1 {
            let only = self.node(self.base_head).next;
            if self.node(only).value != target {
                return None;
            }
            let record = self.node(only).record();
            self.cached = only;
            return Some(record);
        }

        let mut row = start;
        while row.is_some() {
            let mut idx = row;
            loop {
                let node = self.node(idx);
                if node.value == target {
                    let record = node.record();
                    self.cached = idx;
                    return Some(record);
                }
                if node.value > target {
                    // One past the target, step back before dropping down
                    idx = node.prev;
                    break;
                }
                idx = node.next;
            }
            row = self.node(idx).below;
        }
        None
    }

    // ========================================================================
    // Iteration & bulk
    // ========================================================================

    /// Returns a double-ended iterator over row 0, yielding [`Record`]
    /// snapshots in ascending value order.
    pub fn iter(&self) -> Iter<'_, B, V, L> {
        Iter {
            arena: &self.arena,
            front: self.node(self.base_head).next,
            back: self.row_tail,
            remaining: self.len,
        }
    }

    /// Collects every entry into a vector, ascending by value, or
    /// descending when `reverse` is set.
    pub fn to_vec(&self, reverse: bool) -> Vec<Record<B, V>> {
        if reverse {
            self.iter().rev().collect()
        } else {
            self.iter().collect()
        }
    }

    /// Bulk-inserts `values` with sequential stringified indices as
    /// identifiers.
    ///
    /// Final ordering is by value, independent of slice order. Duplicate
    /// values collapse to the first occurrence.
    pub fn from_values(&mut self, values: &[B]) {
        for (i, &value) in values.iter().enumerate() {
            self.insert(&i.to_string(), value);
        }
    }

    /// Dumps the full multi-row layout, top row first.
    ///
    /// Each inner vector holds the real entries of one row in ascending
    /// order; rows emptied by deletion appear as empty vectors. Intended
    /// for debugging and visualization.
    pub fn rows(&self) -> Vec<Vec<Record<B, V>>> {
        let mut rows = Vec::new();
        let mut head = self.top_head;
        loop {
            let mut row = Vec::new();
            let mut idx = self.node(head).next;
            loop {
                let node = self.node(idx);
                if node.value == Bound::PosInf {
                    break;
                }
                row.push(node.record());
                idx = node.next;
            }
            rows.push(row);
            let below = self.node(head).below;
            if below.is_none() {
                break;
            }
            head = below;
        }
        rows
    }

    // ========================================================================
    // Internal helpers
    // ========================================================================

    #[inline]
    fn node(&self, idx: L) -> &Node<B, V, L> {
        self.arena.get(idx).expect("invalid index")
    }

    #[inline]
    fn node_mut(&mut self, idx: L) -> &mut Node<B, V, L> {
        self.arena.get_mut(idx).expect("invalid index")
    }

    /// One promotion decision.
    #[inline]
    fn flip(&mut self) -> bool {
        self.rng.next_u32() & self.level_mask == 0
    }

    /// Rebuilds the single empty base row. Level ratio and RNG unchanged.
    fn reset_rows(&mut self) {
        self.arena.clear();
        let head = self.arena.insert(Node::sentinel(Bound::NegInf, 0));
        let tail = self.arena.insert(Node::sentinel(Bound::PosInf, 0));
        self.node_mut(head).next = tail;
        self.node_mut(tail).prev = head;
        self.base_head = head;
        self.top_head = head;
        self.row_tail = L::NONE;
        self.cached = L::NONE;
        self.len = 0;
    }

    /// Scans a row from its head sentinel for the first node with a value
    /// strictly greater than `target`. `None` signals a duplicate.
    ///
    /// The tail sentinel compares above every finite value, so a valid
    /// insertion point always exists.
    fn insertion_point(&self, head: L, target: Bound<B>) -> Option<L> {
        let mut idx = head;
        loop {
            let node = self.node(idx);
            if node.value == target {
                return None;
            }
            if node.value > target {
                return Some(idx);
            }
            idx = node.next;
        }
    }

    /// Splices a new real node immediately before `at` and returns it.
    fn splice_before(
        &mut self,
        at: L,
        id: &str,
        value: Bound<B>,
        aux: Option<V>,
        level: usize,
    ) -> L {
        let prev = self.node(at).prev;
        let node = self.arena.insert(Node {
            id: id.to_string(),
            value,
            aux,
            level,
            prev,
            next: at,
            above: L::NONE,
            below: L::NONE,
        });
        self.node_mut(prev).next = node;
        self.node_mut(at).prev = node;

        // In front of the row-0 tail sentinel means new maximum
        if level == 0 && self.node(at).value == Bound::PosInf {
            self.row_tail = node;
        }
        node
    }

    /// Opens a fresh row above `below_head`: new head/tail sentinel pair,
    /// head wired into the sentinel tower. Returns the new head.
    fn new_row(&mut self, below_head: L) -> L {
        let level = self.node(below_head).level + 1;
        let head = self.arena.insert(Node::sentinel(Bound::NegInf, level));
        let tail = self.arena.insert(Node::sentinel(Bound::PosInf, level));
        self.node_mut(head).next = tail;
        self.node_mut(tail).prev = head;
        self.node_mut(head).below = below_head;
        self.node_mut(below_head).above = head;
        self.top_head = head;
        head
    }

    /// Shared removal path for `delete`, `remove_min`, and `remove_max`:
    /// snapshots the entry, fixes the row tail and the cache, unlinks the
    /// whole tower, and adjusts `len`.
    fn remove_entry(&mut self, idx: L) -> Record<B, V> {
        let record = self.node(idx).record();

        if self.row_tail == idx {
            let prev = self.node(idx).prev;
            self.row_tail = if prev == self.base_head { L::NONE } else { prev };
        }
        // The cache may hold an upper-row correspondent, so compare by value
        if self.cached.is_some() && self.node(self.cached).value == self.node(idx).value {
            self.cached = L::NONE;
        }

        self.unlink_tower(idx);
        self.len -= 1;
        record
    }

    /// Unlinks a node from its row, then every correspondent above it.
    fn unlink_tower(&mut self, mut idx: L) {
        while idx.is_some() {
            let node = self.arena.remove(idx).expect("invalid index");
            self.node_mut(node.prev).next = node.next;
            self.node_mut(node.next).prev = node.prev;
            if node.above.is_some() {
                self.node_mut(node.above).below = L::NONE;
            }
            idx = node.above;
        }
    }
}

// ============================================================================
// Iterators
// ============================================================================

/// A double-ended iterator over row 0, yielding [`Record`] snapshots in
/// ascending value order.
pub struct Iter<'a, B, V, L = u32>
where
    B: Numeric,
    L: Link,
{
    arena: &'a Arena<Node<B, V, L>, L>,
    front: L,
    back: L,
    remaining: usize,
}

impl<B, V, L> Iterator for Iter<'_, B, V, L>
where
    B: Numeric,
    V: Clone,
    L: Link,
{
    type Item = Record<B, V>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let node = self.arena.get(self.front).expect("invalid index");
        self.front = node.next;
        self.remaining -= 1;
        Some(node.record())
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<B, V, L> DoubleEndedIterator for Iter<'_, B, V, L>
where
    B: Numeric,
    V: Clone,
    L: Link,
{
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let node = self.arena.get(self.back).expect("invalid index");
        self.back = node.prev;
        self.remaining -= 1;
        Some(node.record())
    }
}

impl<B, V, L> ExactSizeIterator for Iter<'_, B, V, L>
where
    B: Numeric,
    V: Clone,
    L: Link,
{
}
