//! Connection graph between item points.
//!
//! Connections are stored on both points of a pair and are always made or
//! broken on both sides together. The resolver runs when geometry settles
//! (load, paste, end of a drag), not on every mouse move.

use std::collections::{HashMap, HashSet};

use drawkit_core::constants::CONNECT_EPSILON;

use crate::geometry::Point;
use crate::model::{DrawingItem, ItemId, ItemPoint, PointRef};

fn find(items: &[DrawingItem], id: ItemId) -> Option<&DrawingItem> {
    items.iter().find(|item| item.id() == id)
}

fn find_mut(items: &mut [DrawingItem], id: ItemId) -> Option<&mut DrawingItem> {
    items.iter_mut().find(|item| item.id() == id)
}

/// The point behind `point_ref`, if its item is in `items`.
pub fn point<'a>(items: &'a [DrawingItem], point_ref: &PointRef) -> Option<&'a ItemPoint> {
    find(items, point_ref.item)?.point(point_ref.point)
}

/// Scene position of the point behind `point_ref`.
pub fn scene_position(items: &[DrawingItem], point_ref: &PointRef) -> Option<Point> {
    let item = find(items, point_ref.item)?;
    let point = item.point(point_ref.point)?;
    Some(item.map_to_scene(point.position()))
}

/// A point together with its reference and scene position.
#[derive(Clone, Copy)]
struct Located<'a> {
    at: PointRef,
    point: &'a ItemPoint,
    scene: Point,
}

fn locate<'a>(items: &'a [DrawingItem], point_ref: &PointRef) -> Option<Located<'a>> {
    let item = find(items, point_ref.item)?;
    let point = item.point(point_ref.point)?;
    Some(Located {
        at: *point_ref,
        point,
        scene: item.map_to_scene(point.position()),
    })
}

fn lookup<'s, 'a>(
    located: &'s [Vec<Located<'a>>],
    by_item: &HashMap<ItemId, usize>,
    point_ref: &PointRef,
) -> Option<&'s Located<'a>> {
    located
        .get(*by_item.get(&point_ref.item)?)?
        .iter()
        .find(|l| l.at.point == point_ref.point)
}

fn can_connect(a: &Located<'_>, b: &Located<'_>, epsilon: f64) -> bool {
    a.at.item != b.at.item
        && a.point.is_connection()
        && b.point.is_connection()
        && (a.point.is_free() || b.point.is_free())
        && !a.point.is_connected_to(&b.at)
        && !b.point.is_connected_to(&a.at)
        && a.scene.distance_to(&b.scene) <= epsilon
}

fn must_disconnect(moved: &Located<'_>, other: &Located<'_>) -> bool {
    moved.point.is_connected_to(&other.at)
        && moved.scene.distance_to(&other.scene) > CONNECT_EPSILON
        && !other.point.is_free()
}

/// Whether two points are eligible to connect: different items, both
/// connection points, at least one free, not yet connected and within
/// `epsilon` of each other in the scene.
pub fn should_connect(items: &[DrawingItem], a: &PointRef, b: &PointRef, epsilon: f64) -> bool {
    match (locate(items, a), locate(items, b)) {
        (Some(la), Some(lb)) => can_connect(&la, &lb, epsilon),
        _ => false,
    }
}

/// Whether the link from `moved` to `other` must be broken: the points are
/// connected, have drifted apart, and `other` is not free to follow.
pub fn should_disconnect(items: &[DrawingItem], moved: &PointRef, other: &PointRef) -> bool {
    match (locate(items, moved), locate(items, other)) {
        (Some(lm), Some(lo)) => must_disconnect(&lm, &lo),
        _ => false,
    }
}

/// Link two points on both sides.
pub fn connect(items: &mut [DrawingItem], a: PointRef, b: PointRef) {
    if let Some(p) = find_mut(items, a.item).and_then(|item| item.point_mut(a.point)) {
        p.add_connection(b);
    }
    if let Some(p) = find_mut(items, b.item).and_then(|item| item.point_mut(b.point)) {
        p.add_connection(a);
    }
    tracing::debug!("Connected {} and {}", a, b);
}

/// Unlink two points on both sides.
pub fn disconnect(items: &mut [DrawingItem], a: PointRef, b: PointRef) {
    if let Some(p) = find_mut(items, a.item).and_then(|item| item.point_mut(a.point)) {
        p.remove_connection(&b);
    }
    if let Some(p) = find_mut(items, b.item).and_then(|item| item.point_mut(b.point)) {
        p.remove_connection(&a);
    }
    tracing::debug!("Disconnected {} and {}", a, b);
}

/// Break every connection of every point on `item`.
pub fn disconnect_all(items: &mut [DrawingItem], item: ItemId) {
    let links: Vec<(PointRef, PointRef)> = match find(items, item) {
        Some(found) => found
            .points()
            .iter()
            .flat_map(|p| {
                let own = PointRef::new(item, p.id());
                p.connections().iter().map(move |other| (own, *other))
            })
            .collect(),
        None => return,
    };
    for (own, other) in links {
        disconnect(items, own, other);
    }
}

/// Break the connections of a point that has already been removed from
/// `item`.
pub fn release_point(items: &mut [DrawingItem], item: ItemId, removed: &ItemPoint) {
    let own = PointRef::new(item, removed.id());
    for other in removed.connections() {
        if let Some(p) = find_mut(items, other.item).and_then(|i| i.point_mut(other.point)) {
            p.remove_connection(&own);
        }
    }
}

/// Re-evaluate the connections of every point on the `subjects` against all
/// points of the other items: drifted links to points that cannot follow
/// are broken and coincident eligible pairs are linked. Returns the number
/// of new connections.
pub fn resolve(items: &mut [DrawingItem], subjects: &[ItemId], epsilon: f64) -> usize {
    let (to_disconnect, to_connect) = {
        // scene positions are computed once per settle, grouped by item
        let located: Vec<Vec<Located<'_>>> = items
            .iter()
            .map(|item| {
                item.points()
                    .iter()
                    .map(|p| Located {
                        at: PointRef::new(item.id(), p.id()),
                        point: p,
                        scene: item.map_to_scene(p.position()),
                    })
                    .collect()
            })
            .collect();
        let by_item: HashMap<ItemId, usize> = items
            .iter()
            .enumerate()
            .map(|(index, item)| (item.id(), index))
            .collect();

        let mut to_disconnect = Vec::new();
        let mut to_connect: Vec<(PointRef, PointRef)> = Vec::new();
        let mut pending: HashSet<(PointRef, PointRef)> = HashSet::new();

        for subject in subjects {
            let Some(&index) = by_item.get(subject) else {
                continue;
            };
            for own in &located[index] {
                for other in own.point.connections() {
                    if lookup(&located, &by_item, other).is_some_and(|o| must_disconnect(own, o)) {
                        to_disconnect.push((own.at, *other));
                    }
                }
                if !own.point.is_connection() {
                    continue;
                }
                for (candidate_index, candidates) in located.iter().enumerate() {
                    if candidate_index == index {
                        continue;
                    }
                    for candidate in candidates {
                        if can_connect(own, candidate, epsilon)
                            && !pending.contains(&(candidate.at, own.at))
                        {
                            pending.insert((own.at, candidate.at));
                            to_connect.push((own.at, candidate.at));
                        }
                    }
                }
            }
        }
        (to_disconnect, to_connect)
    };

    for (a, b) in to_disconnect {
        disconnect(items, a, b);
    }
    let count = to_connect.len();
    for (a, b) in to_connect {
        connect(items, a, b);
    }
    if count > 0 {
        tracing::debug!("Resolver made {} connection(s)", count);
    }
    count
}

/// Move free points on other items that are connected to points of the
/// `moved` items so they stay attached. Only one level is followed.
pub fn drag_connected_points(items: &mut [DrawingItem], moved: &[ItemId]) {
    let mut follows: Vec<(PointRef, Point)> = Vec::new();
    for id in moved {
        let Some(item) = find(items, *id) else {
            continue;
        };
        for p in item.points() {
            let target = item.map_to_scene(p.position());
            for other in p.connections() {
                if moved.contains(&other.item) {
                    continue;
                }
                if point(items, other).is_some_and(|q| q.is_free()) {
                    follows.push((*other, target));
                }
            }
        }
    }

    for (other, target) in follows {
        if let Some(item) = find_mut(items, other.item) {
            if let Some(index) = item.point_index(other.point) {
                item.resize(index, target, false);
            }
        }
    }
}

/// Every connection pair in `items`, each listed from both sides.
pub fn all_links(items: &[DrawingItem]) -> Vec<(PointRef, PointRef)> {
    items
        .iter()
        .flat_map(|item| {
            item.points().iter().flat_map(move |p| {
                let own = PointRef::new(item.id(), p.id());
                p.connections().iter().map(move |other| (own, *other))
            })
        })
        .collect()
}
