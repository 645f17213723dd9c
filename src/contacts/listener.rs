use crate::collision::Manifold;
use crate::contacts::Contact;

/// Receives contact lifecycle callbacks during the collide phase.
///
/// Callbacks run inside [`Contact::update`], so a listener must not try to
/// create or destroy contacts. Changes made to the contact (enabled state,
/// friction, restitution, tangent speed) are visible to the solver that runs
/// after the collide phase.
pub trait ContactListener {
    /// Called when two fixtures begin to touch
    fn begin_contact(&mut self, _contact: &mut Contact) {}

    /// Called when two fixtures cease to touch
    fn end_contact(&mut self, _contact: &mut Contact) {}

    /// Called after a touching solid contact is updated and before it reaches
    /// the solver. `old_manifold` is the manifold of the previous step.
    fn pre_solve(&mut self, _contact: &mut Contact, _old_manifold: &Manifold) {}
}
