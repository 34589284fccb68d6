use super::entity::Entity;

slotmap::new_key_type! {
    /// Unique identifier for a node of the lineage graph.
    pub struct ItemId;
}

/// Identifier of the edit operation that produced a lineage item.
pub type OperationId = usize;

/// One node of the lineage graph.
#[derive(Debug, Clone)]
pub struct LineageItem {
    /// The entity this item stands for.
    pub entity: Entity,
    /// Successors replacing the entity, in recording order.
    pub modified_to: Vec<ItemId>,
    /// Offspring created from the entity without replacing it.
    pub generated_to: Vec<ItemId>,
    /// The entity was consumed with no surviving image.
    pub is_deleted: bool,
    /// The item is the current surviving representative of its chain.
    pub is_active: bool,
    /// The edit that created this item.
    pub operation: OperationId,
}

impl LineageItem {
    pub(super) fn new(entity: Entity, operation: OperationId) -> Self {
        Self {
            entity,
            modified_to: Vec::new(),
            generated_to: Vec::new(),
            is_deleted: false,
            is_active: true,
            operation,
        }
    }
}
