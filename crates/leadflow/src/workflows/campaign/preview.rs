use rand::Rng;

use crate::workflows::leads::domain::{EmailType, Lead, PriorityTier};

/// Injected selection strategy so preview picks are reproducible under
/// test.
pub trait LeadPicker: Send + Sync {
    /// Pick an index in `0..len`. Only called with `len > 0`.
    fn pick(&self, len: usize) -> usize;
}

/// Uniform random picker used in production wiring.
#[derive(Debug, Clone, Copy, Default)]
pub struct UniformPicker;

impl LeadPicker for UniformPicker {
    fn pick(&self, len: usize) -> usize {
        rand::thread_rng().gen_range(0..len)
    }
}

/// A lead chosen to represent its tier in a preview.
#[derive(Debug, Clone, PartialEq)]
pub struct PreviewSelection {
    pub lead: Lead,
    pub email_type: EmailType,
}

/// Choose one representative lead from a tier's bucket.
///
/// An empty bucket yields `None`: "nothing to preview" is a normal
/// condition for the caller, not a fault.
pub fn select_preview<P>(bucket: &[Lead], tier: PriorityTier, picker: &P) -> Option<PreviewSelection>
where
    P: LeadPicker + ?Sized,
{
    if bucket.is_empty() {
        return None;
    }

    let index = picker.pick(bucket.len());
    Some(PreviewSelection {
        lead: bucket[index].clone(),
        email_type: tier.email_type(),
    })
}
