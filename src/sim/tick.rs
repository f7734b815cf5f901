//! Fixed-step simulation tick
//!
//! Advances every registered object by its velocity, tests every pair in
//! registry order, runs the response table and applies removals.

use std::rc::Rc;

use super::entity::{Collideable, Rect};
use super::response::{CollisionAction, ResponseTable};
use crate::store::{GameObjects, ObjectRef};

/// What happened during one tick
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TickReport {
    /// Colliding index pairs `(i, j)` with `i < j`, in evaluation order
    pub collisions: Vec<(usize, usize)>,
    /// Objects removed because a response asked for it
    pub destroyed: usize,
    /// Objects removed for leaving the arena
    pub escaped: usize,
}

/// Every colliding pair in the upper triangle, row by row.
///
/// A handle registered more than once only takes part through its first
/// index, so it is never paired with itself or tested twice.
pub fn collision_pairs(objects: &[ObjectRef]) -> Vec<(usize, usize)> {
    let first = first_occurrences(objects);
    let mut pairs = Vec::new();
    for (i, a) in objects.iter().enumerate().filter(|&(i, _)| first[i]) {
        for (j, b) in objects.iter().enumerate().skip(i + 1) {
            if !first[j] {
                continue;
            }
            if a.borrow().does_collide(&*b.borrow()) {
                pairs.push((i, j));
            }
        }
    }
    pairs
}

/// `true` at each index holding the first copy of its handle
fn first_occurrences(objects: &[ObjectRef]) -> Vec<bool> {
    objects
        .iter()
        .enumerate()
        .map(|(i, h)| !objects[..i].iter().any(|earlier| Rc::ptr_eq(earlier, h)))
        .collect()
}

/// Remove every copy of `handle`, one notification per copy.
/// Returns whether anything was removed.
fn remove_all(objects: &mut GameObjects, handle: &ObjectRef) -> bool {
    let copies = objects.items().iter().filter(|&h| Rc::ptr_eq(h, handle)).count();
    for _ in 0..copies {
        objects.remove(handle);
    }
    copies > 0
}

/// Advance the registry by one tick.
///
/// Responses see the other object as it was before any response ran this
/// tick. Objects flagged for removal still take part in the remaining pairs
/// of the tick; removals go through [`GameObjects::remove`] afterwards, so
/// observers get one notification per removed entry. A removed handle loses
/// every copy it had in the registry.
pub fn tick(
    objects: &mut GameObjects,
    responses: &ResponseTable,
    arena: Option<Rect>,
) -> TickReport {
    let handles: Vec<ObjectRef> = objects.items().to_vec();

    // A handle registered twice still moves once
    let first = first_occurrences(&handles);
    for (handle, _) in handles.iter().zip(&first).filter(|&(_, &is_first)| is_first) {
        handle.borrow_mut().advance();
    }

    let collisions = collision_pairs(&handles);
    let before: Vec<_> = handles.iter().map(|h| h.borrow().clone()).collect();

    let mut doomed: Vec<ObjectRef> = Vec::new();
    for &(i, j) in &collisions {
        for (this, other) in [(i, j), (j, i)] {
            let action = responses.respond(&mut handles[this].borrow_mut(), &before[other]);
            let listed = doomed.iter().any(|h| Rc::ptr_eq(h, &handles[this]));
            if action == CollisionAction::Remove && !listed {
                doomed.push(Rc::clone(&handles[this]));
            }
        }
    }

    let mut report = TickReport {
        collisions,
        ..Default::default()
    };

    for handle in doomed {
        if remove_all(objects, &handle) {
            report.destroyed += 1;
        }
    }

    if let Some(arena) = arena {
        let escaped: Vec<ObjectRef> = objects
            .items()
            .iter()
            .filter(|h| h.borrow().is_outside(arena))
            .cloned()
            .collect();
        for handle in escaped {
            if remove_all(objects, &handle) {
                report.escaped += 1;
            }
        }
    }

    if !report.collisions.is_empty() {
        log::debug!(
            "tick: {} collisions, {} destroyed, {} escaped",
            report.collisions.len(),
            report.destroyed,
            report.escaped
        );
    }

    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::Settings;
    use crate::sim::response::{corrupted_by_evil, remove_on_contact};
    use crate::sim::{EntityKind, GameObject, Spawner};
    use glam::Vec2;
    use std::cell::RefCell;

    fn object(x: f32, y: f32, size: f32, is_evil: bool) -> GameObject {
        GameObject::new(Vec2::new(x, y), Vec2::ZERO, size, "grey", true, is_evil)
    }

    #[test]
    fn test_tick_moves_then_detects() {
        let mut objects = GameObjects::new();
        let a = objects.spawn(object(0.0, 0.0, 5.0, false));
        let mut b = object(9.0, 0.0, 3.0, false);
        b.vel = Vec2::new(-1.0, 0.0);
        objects.spawn(b);

        let report = tick(&mut objects, &ResponseTable::inert(), None);
        // B moved to (8, 0): exactly touching
        assert_eq!(report.collisions, vec![(0, 1)]);
        assert_eq!(a.borrow().pos, Vec2::ZERO);
        assert_eq!(objects.len(), 2);
    }

    #[test]
    fn test_pair_order_is_upper_triangular() {
        let objects: Vec<ObjectRef> = (0..4)
            .map(|_| Rc::new(RefCell::new(object(0.0, 0.0, 1.0, false))))
            .collect();
        assert_eq!(
            collision_pairs(&objects),
            vec![(0, 1), (0, 2), (0, 3), (1, 2), (1, 3), (2, 3)]
        );
    }

    #[test]
    fn test_duplicate_handle_not_paired_or_moved_twice() {
        let mut objects = GameObjects::new();
        let mut moving = object(0.0, 0.0, 1.0, false);
        moving.vel = Vec2::new(1.0, 0.0);
        let a = objects.spawn(moving);
        objects.add(Rc::clone(&a));

        let report = tick(&mut objects, &ResponseTable::default(), None);
        assert!(report.collisions.is_empty());
        assert_eq!(a.borrow().pos, Vec2::new(1.0, 0.0));
    }

    #[test]
    fn test_removed_duplicate_handle_leaves_registry() {
        let mut objects = GameObjects::new();
        let a = objects.spawn(object(0.0, 0.0, 1.0, false));
        objects.add(Rc::clone(&a));
        objects.spawn(object(1.5, 0.0, 1.0, false));

        let table = ResponseTable::inert().with(EntityKind::Neutral, remove_on_contact);
        let report = tick(&mut objects, &table, None);

        assert_eq!(report.collisions, vec![(0, 2)]);
        assert_eq!(report.destroyed, 2);
        assert!(objects.is_empty());
        assert_eq!(Rc::strong_count(&a), 1);
    }

    #[test]
    fn test_escaped_duplicate_handle_counted_once() {
        let mut objects = GameObjects::new();
        let gone = objects.spawn(object(-10.0, 50.0, 1.0, false));
        objects.add(Rc::clone(&gone));

        let arena = Rect::from_size(100.0, 100.0);
        let report = tick(&mut objects, &ResponseTable::inert(), Some(arena));
        assert_eq!(report.escaped, 1);
        assert!(objects.is_empty());
    }

    #[test]
    fn test_evil_destroys_neutral() {
        let mut objects = GameObjects::new();
        let neutral = objects.spawn(object(0.0, 0.0, 2.0, false));
        let evil = objects.spawn(object(3.0, 0.0, 2.0, true));
        let bystander = objects.spawn(object(50.0, 0.0, 2.0, false));

        let report = tick(&mut objects, &ResponseTable::default(), None);
        assert_eq!(report.destroyed, 1);
        let remaining: Vec<_> = objects.items().iter().map(Rc::as_ptr).collect();
        assert_eq!(remaining, vec![Rc::as_ptr(&evil), Rc::as_ptr(&bystander)]);
        assert_eq!(Rc::strong_count(&neutral), 1);
    }

    #[test]
    fn test_responses_see_pre_tick_state() {
        let mut objects = GameObjects::new();
        objects.spawn(object(0.0, 0.0, 2.0, true));
        let middle = objects.spawn(object(3.0, 0.0, 2.0, false));
        let far = objects.spawn(object(6.5, 0.0, 2.0, false));

        let table = ResponseTable::inert().with(EntityKind::Neutral, corrupted_by_evil);
        let report = tick(&mut objects, &table, None);

        assert_eq!(report.collisions, vec![(0, 1), (1, 2)]);
        assert!(middle.borrow().is_evil);
        // Middle was still neutral when its pair with `far` was resolved
        assert!(!far.borrow().is_evil);
    }

    #[test]
    fn test_both_sides_removed() {
        let mut objects = GameObjects::new();
        objects.spawn(object(0.0, 0.0, 1.0, false));
        objects.spawn(object(1.0, 0.0, 1.0, false));
        objects.spawn(object(1.5, 0.0, 1.0, false));

        let table = ResponseTable::inert().with(EntityKind::Neutral, remove_on_contact);
        let report = tick(&mut objects, &table, None);
        assert_eq!(report.collisions.len(), 3);
        assert_eq!(report.destroyed, 3);
        assert!(objects.is_empty());
    }

    #[test]
    fn test_escaped_objects_removed_and_observed() {
        let mut objects = GameObjects::new();
        let mut leaving = object(99.0, 50.0, 1.0, false);
        leaving.vel = Vec2::new(5.0, 0.0);
        objects.spawn(leaving);
        let staying = objects.spawn(object(50.0, 50.0, 1.0, false));

        let lengths = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&lengths);
        let _sub = objects.subscribe(move |items: &[ObjectRef]| {
            sink.borrow_mut().push(items.len());
        });

        let arena = Rect::from_size(100.0, 100.0);
        let report = tick(&mut objects, &ResponseTable::inert(), Some(arena));
        assert_eq!(report.escaped, 1);
        assert!(Rc::ptr_eq(&objects.items()[0], &staying));
        assert_eq!(*lengths.borrow(), vec![2, 1]);
    }

    #[test]
    fn test_determinism() {
        let settings = Settings {
            spawn_count: 40,
            ..Default::default()
        };
        let run = || {
            let mut objects = GameObjects::new();
            for object in Spawner::new(777).spawn_batch(&settings) {
                objects.spawn(object);
            }
            let reports: Vec<TickReport> = (0..60)
                .map(|_| tick(&mut objects, &ResponseTable::default(), Some(settings.arena())))
                .collect();
            let positions: Vec<Vec2> = objects.items().iter().map(|o| o.borrow().pos).collect();
            (reports, positions)
        };
        assert_eq!(run(), run());
    }
}
