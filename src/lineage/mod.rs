//! Lineage (history) of topological entities across local edits.
//!
//! Every edit that consumes an entity records what became of it: modified
//! into zero or more successors, used to generate new entities, or deleted.
//! Other stages hold handles to entities that existed before an edit and use
//! the lineage to find their current images.

mod entity;
mod item;

pub use entity::{Entity, EntityKind, TopoEntity};
pub use item::{ItemId, LineageItem, OperationId};

use std::collections::{HashMap, HashSet};

use slotmap::SlotMap;

use crate::error::LineageError;

/// Which kind of evolution to follow when collecting leaves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Evolution {
    Modified,
    Generated,
}

/// Append-only DAG of entity evolution for one editing session.
///
/// Items are owned by the lineage and keyed by entity identity. Each entity
/// has at most one item.
#[derive(Debug, Default)]
pub struct ShapeLineage {
    items: SlotMap<ItemId, LineageItem>,
    index: HashMap<Entity, ItemId>,
}

impl ShapeLineage {
    /// Creates an empty lineage.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of items recorded so far.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns `true` if nothing has been recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Highest operation ID recorded so far, or 0 for an empty lineage.
    #[must_use]
    pub fn last_operation(&self) -> OperationId {
        self.items
            .values()
            .map(|item| item.operation)
            .max()
            .unwrap_or(0)
    }

    /// Returns the lineage item of an entity, if it was ever touched.
    #[must_use]
    pub fn item(&self, entity: impl Into<Entity>) -> Option<&LineageItem> {
        self.index.get(&entity.into()).map(|&id| &self.items[id])
    }

    // --- Recording ---

    /// Records that `before` was modified into `after`.
    ///
    /// `before` becomes inactive and `after` active. An entity may be
    /// modified several times to express a one-to-many split.
    ///
    /// # Errors
    ///
    /// Fails without recording anything if `before` has no item and
    /// `create_if_absent` is false, if either entity is already deleted, or
    /// if the new link would close a cycle.
    pub fn record_modification(
        &mut self,
        before: impl Into<Entity>,
        after: impl Into<Entity>,
        create_if_absent: bool,
        operation: OperationId,
    ) -> Result<(), LineageError> {
        let (before, after) = (before.into(), after.into());
        let existing = self.lookup(before, create_if_absent)?;
        if let Some(id) = existing {
            if self.items[id].is_deleted {
                return Err(LineageError::AlreadyDeleted(before));
            }
        }
        self.check_target(before, existing, after)?;

        let before_id = self.find_or_insert(before, operation);
        let after_id = self.find_or_insert(after, operation);
        let item = &mut self.items[before_id];
        if !item.modified_to.contains(&after_id) {
            item.modified_to.push(after_id);
        }
        item.is_active = false;
        self.items[after_id].is_active = true;
        Ok(())
    }

    /// Records that `created` was generated from `source`.
    ///
    /// The activity of `source` is left untouched; `created` is active. A
    /// deleted `source` may still generate.
    ///
    /// # Errors
    ///
    /// Fails if `source` has no item and `create_if_absent` is false. Unlike
    /// a bare lookup it also checks the target: it fails with
    /// [`LineageError::AlreadyDeleted`] if `created` is already deleted and
    /// with [`LineageError::Cycle`] if `created` is `source` or already
    /// reaches it. Nothing is recorded on failure.
    pub fn record_generation(
        &mut self,
        source: impl Into<Entity>,
        created: impl Into<Entity>,
        create_if_absent: bool,
        operation: OperationId,
    ) -> Result<(), LineageError> {
        let (source, created) = (source.into(), created.into());
        let existing = self.lookup(source, create_if_absent)?;
        self.check_target(source, existing, created)?;

        let source_id = self.find_or_insert(source, operation);
        let created_id = self.find_or_insert(created, operation);
        let item = &mut self.items[source_id];
        if !item.generated_to.contains(&created_id) {
            item.generated_to.push(created_id);
        }
        self.items[created_id].is_active = true;
        Ok(())
    }

    /// Records that `entity` was consumed with no surviving image.
    ///
    /// # Errors
    ///
    /// Fails if the entity has no item and `create_if_absent` is false, if it
    /// is already deleted, or if it was already modified into successors.
    pub fn record_deletion(
        &mut self,
        entity: impl Into<Entity>,
        create_if_absent: bool,
        operation: OperationId,
    ) -> Result<(), LineageError> {
        let entity = entity.into();
        if let Some(id) = self.lookup(entity, create_if_absent)? {
            let item = &self.items[id];
            if item.is_deleted {
                return Err(LineageError::AlreadyDeleted(entity));
            }
            if !item.modified_to.is_empty() {
                return Err(LineageError::Superseded(entity));
            }
        }

        let id = self.find_or_insert(entity, operation);
        let item = &mut self.items[id];
        item.is_deleted = true;
        item.is_active = false;
        Ok(())
    }

    // --- Resolution ---

    /// Returns the first successor of `entity`, if it was modified.
    #[must_use]
    pub fn direct_image(&self, entity: impl Into<Entity>) -> Option<Entity> {
        let item = self.item(entity)?;
        item.modified_to.first().map(|&id| self.items[id].entity)
    }

    /// Returns the first successor of `entity`, or `entity` itself.
    #[must_use]
    pub fn direct_image_or_self(&self, entity: impl Into<Entity>) -> Entity {
        let entity = entity.into();
        self.direct_image(entity).unwrap_or(entity)
    }

    /// Follows first successors until an entity resolves to itself.
    ///
    /// Deleted entities resolve to themselves; check [`Self::is_deleted`]
    /// on the result to tell a survivor from a dead end.
    #[must_use]
    pub fn final_image_or_self(&self, entity: impl Into<Entity>) -> Entity {
        let mut current = entity.into();
        // Acyclic, so the chain settles within `len` steps.
        for _ in 0..=self.items.len() {
            let next = self.direct_image_or_self(current);
            if next == current {
                break;
            }
            current = next;
        }
        current
    }

    /// Typed variant of [`Self::final_image_or_self`].
    ///
    /// Returns `id` unchanged if the chain ends in an entity of another kind.
    #[must_use]
    pub fn final_image<T: TopoEntity>(&self, id: T) -> T {
        T::from_entity(self.final_image_or_self(id.into_entity())).unwrap_or(id)
    }

    // --- Status ---

    /// Returns `true` if the entity was modified into at least one successor.
    #[must_use]
    pub fn is_modified(&self, entity: impl Into<Entity>) -> bool {
        self.item(entity)
            .is_some_and(|item| !item.modified_to.is_empty())
    }

    /// Returns `true` if the entity was recorded as deleted.
    #[must_use]
    pub fn is_deleted(&self, entity: impl Into<Entity>) -> bool {
        self.item(entity).is_some_and(|item| item.is_deleted)
    }

    /// Returns `true` if the entity's item is the current representative of
    /// its chain. Entities the lineage never saw are reported inactive.
    #[must_use]
    pub fn is_active(&self, entity: impl Into<Entity>) -> bool {
        self.item(entity).is_some_and(|item| item.is_active)
    }

    /// Returns `true` if the entity generated at least one new entity.
    #[must_use]
    pub fn has_generated(&self, entity: impl Into<Entity>) -> bool {
        self.item(entity)
            .is_some_and(|item| !item.generated_to.is_empty())
    }

    // --- Traversal ---

    /// Collects every dead end reachable from `seed` along one kind of
    /// evolution, in depth-first order without duplicates.
    ///
    /// An entity with no children of that kind is its own leaf. Deleted dead
    /// ends are not images and are left out.
    #[must_use]
    pub fn collect_leaves(&self, evolution: Evolution, seed: impl Into<Entity>) -> Vec<Entity> {
        let seed = seed.into();
        let Some(&root) = self.index.get(&seed) else {
            return vec![seed];
        };

        let mut leaves = Vec::new();
        let mut visited = HashSet::new();
        let mut stack = vec![root];
        while let Some(id) = stack.pop() {
            if !visited.insert(id) {
                continue;
            }
            let item = &self.items[id];
            let children = match evolution {
                Evolution::Modified => &item.modified_to,
                Evolution::Generated => &item.generated_to,
            };
            if children.is_empty() {
                if !item.is_deleted {
                    leaves.push(item.entity);
                }
            } else {
                stack.extend(children.iter().rev());
            }
        }
        leaves
    }

    /// Returns every entity that starts a chain, i.e. was never recorded as a
    /// successor or offspring, optionally restricted to one kind.
    #[must_use]
    pub fn collect_roots(&self, kind: Option<EntityKind>) -> Vec<Entity> {
        let children: HashSet<ItemId> = self
            .items
            .values()
            .flat_map(|item| item.modified_to.iter().chain(&item.generated_to))
            .copied()
            .collect();

        self.items
            .iter()
            .filter(|(id, _)| !children.contains(id))
            .map(|(_, item)| item.entity)
            .filter(|entity| kind.is_none_or(|k| entity.kind() == k))
            .collect()
    }

    // --- Internals ---

    /// Looks up an entity's item; a missing item is an error unless the
    /// caller allows creating it.
    fn lookup(&self, entity: Entity, create: bool) -> Result<Option<ItemId>, LineageError> {
        match self.index.get(&entity) {
            Some(&id) => Ok(Some(id)),
            None if create => Ok(None),
            None => Err(LineageError::Missing(entity)),
        }
    }

    /// Validates `to` as a new child of `from`.
    fn check_target(
        &self,
        from: Entity,
        from_id: Option<ItemId>,
        to: Entity,
    ) -> Result<(), LineageError> {
        if from == to {
            return Err(LineageError::Cycle { from, to });
        }
        let Some(&to_id) = self.index.get(&to) else {
            return Ok(());
        };
        if self.items[to_id].is_deleted {
            return Err(LineageError::AlreadyDeleted(to));
        }
        if from_id.is_some_and(|from_id| self.reaches(to_id, from_id)) {
            return Err(LineageError::Cycle { from, to });
        }
        Ok(())
    }

    /// Returns `true` if `target` is reachable from `start` along any edge.
    fn reaches(&self, start: ItemId, target: ItemId) -> bool {
        let mut visited = HashSet::new();
        let mut stack = vec![start];
        while let Some(id) = stack.pop() {
            if id == target {
                return true;
            }
            if visited.insert(id) {
                let item = &self.items[id];
                stack.extend(item.modified_to.iter().chain(&item.generated_to));
            }
        }
        false
    }

    fn find_or_insert(&mut self, entity: Entity, operation: OperationId) -> ItemId {
        if let Some(&id) = self.index.get(&entity) {
            return id;
        }
        let id = self.items.insert(LineageItem::new(entity, operation));
        self.index.insert(entity, id);
        id
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::topology::{EdgeId, FaceId, VertexId};

    fn edges(n: usize) -> Vec<EdgeId> {
        let mut keys = SlotMap::<EdgeId, ()>::with_key();
        (0..n).map(|_| keys.insert(())).collect()
    }

    fn e(id: EdgeId) -> Entity {
        Entity::Edge(id)
    }

    #[test]
    fn modification_chain_resolves_to_last_image() {
        let ids = edges(4);
        let mut lineage = ShapeLineage::new();
        lineage.record_modification(ids[0], ids[1], true, 1).unwrap();
        lineage.record_modification(ids[1], ids[2], false, 2).unwrap();
        lineage.record_modification(ids[2], ids[3], false, 3).unwrap();

        assert_eq!(lineage.direct_image(ids[0]), Some(e(ids[1])));
        assert_eq!(lineage.final_image_or_self(ids[0]), e(ids[3]));
        assert_eq!(lineage.final_image(ids[1]), ids[3]);
        assert!(lineage.is_modified(ids[0]));
        assert!(!lineage.is_active(ids[0]));
        assert!(lineage.is_active(ids[3]));
        assert_eq!(lineage.item(ids[3]).unwrap().operation, 3);
    }

    #[test]
    fn resolution_is_idempotent() {
        let ids = edges(5);
        let mut lineage = ShapeLineage::new();
        lineage.record_modification(ids[0], ids[1], true, 1).unwrap();
        lineage.record_modification(ids[1], ids[2], false, 2).unwrap();
        lineage.record_deletion(ids[3], true, 3).unwrap();

        for &id in &ids {
            let once = lineage.final_image_or_self(id);
            assert_eq!(lineage.final_image_or_self(once), once);
        }
        // Untouched entities resolve to themselves.
        assert_eq!(lineage.final_image_or_self(ids[4]), e(ids[4]));
    }

    #[test]
    fn direct_images_terminate_within_recorded_steps() {
        let ids = edges(6);
        let mut lineage = ShapeLineage::new();
        for pair in ids.windows(2) {
            lineage.record_modification(pair[0], pair[1], true, 0).unwrap();
        }

        let mut current = e(ids[0]);
        let mut steps = 0;
        while let Some(next) = lineage.direct_image(current) {
            current = next;
            steps += 1;
            assert!(steps <= ids.len() - 1);
        }
        assert_eq!(current, e(ids[5]));
    }

    #[test]
    fn deletion_is_terminal() {
        let ids = edges(2);
        let mut lineage = ShapeLineage::new();
        lineage.record_deletion(ids[0], true, 1).unwrap();

        assert!(lineage.is_deleted(ids[0]));
        assert!(!lineage.is_active(ids[0]));
        assert_eq!(
            lineage.record_modification(ids[0], ids[1], false, 2),
            Err(LineageError::AlreadyDeleted(e(ids[0])))
        );
        assert_eq!(
            lineage.record_deletion(ids[0], true, 3),
            Err(LineageError::AlreadyDeleted(e(ids[0])))
        );
        // The failed call left no trace of the target.
        assert!(lineage.item(ids[1]).is_none());
    }

    #[test]
    fn missing_item_without_creation_fails() {
        let ids = edges(2);
        let mut lineage = ShapeLineage::new();
        assert_eq!(
            lineage.record_modification(ids[0], ids[1], false, 0),
            Err(LineageError::Missing(e(ids[0])))
        );
        assert_eq!(
            lineage.record_generation(ids[0], ids[1], false, 0),
            Err(LineageError::Missing(e(ids[0])))
        );
        assert_eq!(
            lineage.record_deletion(ids[0], false, 0),
            Err(LineageError::Missing(e(ids[0])))
        );
        assert!(lineage.is_empty());
    }

    #[test]
    fn modified_entity_cannot_be_deleted() {
        let ids = edges(2);
        let mut lineage = ShapeLineage::new();
        lineage.record_modification(ids[0], ids[1], true, 0).unwrap();
        assert_eq!(
            lineage.record_deletion(ids[0], false, 1),
            Err(LineageError::Superseded(e(ids[0])))
        );
    }

    #[test]
    fn cycles_are_refused() {
        let ids = edges(3);
        let mut lineage = ShapeLineage::new();
        lineage.record_modification(ids[0], ids[1], true, 0).unwrap();
        lineage.record_modification(ids[1], ids[2], false, 1).unwrap();

        assert!(matches!(
            lineage.record_modification(ids[2], ids[0], false, 2),
            Err(LineageError::Cycle { .. })
        ));
        assert!(matches!(
            lineage.record_generation(ids[2], ids[2], false, 2),
            Err(LineageError::Cycle { .. })
        ));
        assert_eq!(lineage.final_image_or_self(ids[0]), e(ids[2]));
    }

    #[test]
    fn merge_into_existing_entity_reuses_its_item() {
        let mut vertices = SlotMap::<VertexId, ()>::with_key();
        let (kill_a, kill_b, keep) = (vertices.insert(()), vertices.insert(()), vertices.insert(()));
        let mut lineage = ShapeLineage::new();
        lineage.record_modification(kill_a, keep, true, 0).unwrap();
        lineage.record_modification(kill_b, keep, true, 1).unwrap();

        assert_eq!(lineage.len(), 3);
        assert_eq!(lineage.final_image(kill_a), keep);
        assert_eq!(lineage.final_image(kill_b), keep);
        assert!(!lineage.is_modified(keep));
    }

    #[test]
    fn split_collects_all_leaves() {
        let ids = edges(5);
        let mut lineage = ShapeLineage::new();
        lineage.record_modification(ids[0], ids[1], true, 0).unwrap();
        lineage.record_modification(ids[0], ids[2], true, 0).unwrap();
        lineage.record_modification(ids[2], ids[3], false, 1).unwrap();
        lineage.record_modification(ids[2], ids[4], false, 1).unwrap();
        lineage.record_deletion(ids[4], false, 2).unwrap();

        let leaves = lineage.collect_leaves(Evolution::Modified, ids[0]);
        assert_eq!(leaves, vec![e(ids[1]), e(ids[3])]);
        assert_eq!(lineage.final_image_or_self(ids[0]), e(ids[1]));
    }

    #[test]
    fn generation_keeps_source_alive() {
        let ids = edges(4);
        let mut lineage = ShapeLineage::new();
        lineage.record_generation(ids[0], ids[1], true, 0).unwrap();
        lineage.record_generation(ids[0], ids[2], false, 0).unwrap();

        assert!(lineage.has_generated(ids[0]));
        assert!(lineage.is_active(ids[0]));
        assert!(!lineage.is_modified(ids[0]));
        assert_eq!(lineage.final_image_or_self(ids[0]), e(ids[0]));
        assert_eq!(
            lineage.collect_leaves(Evolution::Generated, ids[0]),
            vec![e(ids[1]), e(ids[2])]
        );
        // Generated from a deleted source is still allowed.
        lineage.record_deletion(ids[0], false, 1).unwrap();
        assert!(lineage.record_generation(ids[0], ids[3], false, 2).is_ok());
    }

    #[test]
    fn roots_filter_by_kind() {
        let ids = edges(3);
        let mut faces = SlotMap::<FaceId, ()>::with_key();
        let (f0, f1) = (faces.insert(()), faces.insert(()));
        let mut lineage = ShapeLineage::new();
        lineage.record_modification(ids[0], ids[1], true, 0).unwrap();
        lineage.record_modification(f0, f1, true, 0).unwrap();

        assert_eq!(lineage.collect_roots(None), vec![e(ids[0]), Entity::Face(f0)]);
        assert_eq!(
            lineage.collect_roots(Some(EntityKind::Face)),
            vec![Entity::Face(f0)]
        );
        // Untouched seed is its own leaf.
        assert_eq!(
            lineage.collect_leaves(Evolution::Modified, ids[2]),
            vec![e(ids[2])]
        );
    }

    #[test]
    fn generation_checks_its_target() {
        let ids = edges(3);
        let mut lineage = ShapeLineage::new();
        lineage.record_deletion(ids[1], true, 0).unwrap();
        assert_eq!(
            lineage.record_generation(ids[0], ids[1], true, 1),
            Err(LineageError::AlreadyDeleted(e(ids[1])))
        );
        assert!(lineage.item(ids[0]).is_none());

        lineage.record_generation(ids[0], ids[2], true, 1).unwrap();
        assert!(matches!(
            lineage.record_generation(ids[2], ids[0], false, 2),
            Err(LineageError::Cycle { .. })
        ));
        assert!(!lineage.has_generated(ids[2]));
    }

    #[test]
    fn deleted_dead_ends_are_not_leaves() {
        let ids = edges(4);
        let mut lineage = ShapeLineage::new();
        lineage.record_modification(ids[0], ids[1], true, 0).unwrap();
        lineage.record_modification(ids[0], ids[2], true, 0).unwrap();
        lineage.record_deletion(ids[2], false, 1).unwrap();
        lineage.record_deletion(ids[3], true, 1).unwrap();

        assert_eq!(
            lineage.collect_leaves(Evolution::Modified, ids[0]),
            vec![e(ids[1])]
        );
        // A deleted seed has no image at all.
        assert!(lineage
            .collect_leaves(Evolution::Modified, ids[3])
            .is_empty());

        lineage.record_deletion(ids[1], false, 2).unwrap();
        assert!(lineage
            .collect_leaves(Evolution::Modified, ids[0])
            .is_empty());
    }
}
