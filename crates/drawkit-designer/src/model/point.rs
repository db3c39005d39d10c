//! Points owned by drawing items.

use smallvec::SmallVec;
use std::fmt;
use std::ops::BitOr;

use super::item::ItemId;
use crate::geometry::Point;

/// Identifier of a point, stable for the life of its item and kept on clone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PointId(pub u32);

impl fmt::Display for PointId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "P{}", self.0)
    }
}

/// Bit set over the roles a point plays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct PointFlags(u8);

impl PointFlags {
    pub const NONE: PointFlags = PointFlags(0);
    /// The user can drag the point to reshape the item.
    pub const CONTROL: PointFlags = PointFlags(1);
    /// The point can link to another item's connection point.
    pub const CONNECTION: PointFlags = PointFlags(2);
    /// The point can move without the rest of its item moving.
    pub const FREE: PointFlags = PointFlags(4);

    pub const fn union(self, other: PointFlags) -> PointFlags {
        PointFlags(self.0 | other.0)
    }

    pub const fn contains(self, other: PointFlags) -> bool {
        self.0 & other.0 == other.0
    }

    /// Control, connection and free: the usual line endpoint.
    pub const fn endpoint() -> PointFlags {
        PointFlags::CONTROL
            .union(PointFlags::CONNECTION)
            .union(PointFlags::FREE)
    }
}

impl BitOr for PointFlags {
    type Output = PointFlags;
    fn bitor(self, rhs: PointFlags) -> PointFlags {
        self.union(rhs)
    }
}

/// Non-owning handle to a point on some item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PointRef {
    pub item: ItemId,
    pub point: PointId,
}

impl PointRef {
    pub fn new(item: ItemId, point: PointId) -> Self {
        Self { item, point }
    }
}

impl fmt::Display for PointRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.item, self.point)
    }
}

/// A point owned by an item, positioned in the item's local frame.
#[derive(Debug, Clone, PartialEq)]
pub struct ItemPoint {
    id: PointId,
    position: Point,
    flags: PointFlags,
    connections: SmallVec<[PointRef; 2]>,
}

impl ItemPoint {
    pub fn new(id: PointId, position: Point, flags: PointFlags) -> Self {
        Self {
            id,
            position,
            flags,
            connections: SmallVec::new(),
        }
    }

    pub fn id(&self) -> PointId {
        self.id
    }

    /// Position in the owning item's local frame.
    pub fn position(&self) -> Point {
        self.position
    }

    pub(crate) fn set_position(&mut self, position: Point) {
        self.position = position;
    }

    pub fn flags(&self) -> PointFlags {
        self.flags
    }

    pub(crate) fn set_flags(&mut self, flags: PointFlags) {
        self.flags = flags;
    }

    pub fn is_control(&self) -> bool {
        self.flags.contains(PointFlags::CONTROL)
    }

    pub fn is_connection(&self) -> bool {
        self.flags.contains(PointFlags::CONNECTION)
    }

    pub fn is_free(&self) -> bool {
        self.flags.contains(PointFlags::FREE)
    }

    pub fn connections(&self) -> &[PointRef] {
        &self.connections
    }

    pub fn is_connected_to(&self, other: &PointRef) -> bool {
        self.connections.contains(other)
    }

    /// Record a link; no-op when already present.
    pub(crate) fn add_connection(&mut self, other: PointRef) {
        if !self.connections.contains(&other) {
            self.connections.push(other);
        }
    }

    pub(crate) fn remove_connection(&mut self, other: &PointRef) {
        self.connections.retain(|c| *c != *other);
    }

    pub(crate) fn retain_connections(&mut self, keep: impl FnMut(&mut PointRef) -> bool) {
        self.connections.retain(keep);
    }

    pub(crate) fn clear_connections(&mut self) {
        self.connections.clear();
    }
}
