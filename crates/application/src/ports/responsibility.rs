use rend_cache_domain::DescriptorId;

/// Hash-ring view of this node as a hidden service directory.
pub trait ResponsibilityOracle: Send + Sync {
    /// Whether `descriptor_id` falls in the interval this node stores.
    fn is_responsible(&self, descriptor_id: &DescriptorId) -> bool;

    /// Whether this node currently acts as a hidden service directory at all.
    fn acting_as_directory(&self) -> bool;
}
