//! Per-sub-step dynamics: force accumulation and contact resolution

mod contact;
mod forces;
mod kinematics;

pub use contact::{
    resolve_body_contact, resolve_contacts, resolve_obstacle_contact, restitution_for_step,
};
pub use forces::{
    accumulate, apply_constraint_forces, apply_contact_reaction, apply_drag, apply_fields,
    apply_pairwise, clear_forces, contact_surface, ContactSurface,
};
pub use kinematics::{apply_constraint_kinematics, integrate};

/// Two distinct mutable elements, returned in argument order.
pub(crate) fn pair_mut<T>(items: &mut [T], i: usize, j: usize) -> (&mut T, &mut T) {
    debug_assert_ne!(i, j);
    if i < j {
        let (lo, hi) = items.split_at_mut(j);
        (&mut lo[i], &mut hi[0])
    } else {
        let (lo, hi) = items.split_at_mut(i);
        (&mut hi[0], &mut lo[j])
    }
}
