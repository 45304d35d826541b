//! Abilities plugin - the shared permission store.

use bevy::prelude::*;

use super::store::*;

/// Abilities plugin - owns the [`PermissionStore`] for the session.
pub struct AbilitiesPlugin;

impl Plugin for AbilitiesPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<PermissionStore>()
            .add_event::<SetPermission>()
            .add_systems(PreUpdate, apply_permission_requests);
    }
}
