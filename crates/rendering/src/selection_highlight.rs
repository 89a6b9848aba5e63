//! Pick highlight: marks the most recently picked renderable by swapping its
//! material, restoring the previous one. Purely visual, no grid effect.

use bevy::prelude::*;
use bevy_egui::EguiContexts;

use crate::assets::TileAssets;
use crate::camera::LeftClickDrag;
use crate::egui_guard::egui_wants_pointer;
use crate::picking::CursorTile;
use crate::scene_sync::SceneCache;

#[derive(Resource, Default)]
pub struct HighlightState {
    /// Tile whose renderable currently carries the highlight material.
    current: Option<(usize, usize)>,
    /// The entity and original material to put back on the next transition.
    restore: Option<(Entity, Handle<StandardMaterial>)>,
}

impl HighlightState {
    pub fn current(&self) -> Option<(usize, usize)> {
        self.current
    }
}

/// The renderable a pick of tile `(x, y)` highlights: the building if the
/// tile has one, the terrain slab otherwise.
pub fn highlight_target(cache: &SceneCache, x: usize, y: usize) -> Option<Entity> {
    cache
        .building_at(x, y)
        .map(|slot| slot.entity)
        .or_else(|| cache.terrain_at(x, y))
}

/// On each pick, move the highlight to the hit renderable; picking the same
/// renderable again toggles it off. A miss changes nothing.
pub fn apply_pick_highlight(
    buttons: Res<ButtonInput<MouseButton>>,
    mut contexts: EguiContexts,
    left_drag: Res<LeftClickDrag>,
    cursor: Res<CursorTile>,
    cache: Res<SceneCache>,
    assets: Res<TileAssets>,
    mut state: ResMut<HighlightState>,
    mut material_q: Query<&mut MeshMaterial3d<StandardMaterial>>,
) {
    if egui_wants_pointer(&mut contexts) {
        return;
    }
    if left_drag.is_dragging || !buttons.just_pressed(MouseButton::Left) {
        return;
    }
    if !cursor.valid {
        return;
    }

    let picked = (cursor.x, cursor.y);
    if state.current == Some(picked) {
        // Second pick of the same renderable: toggle off.
        restore_previous(&mut state, &mut material_q);
        return;
    }

    restore_previous(&mut state, &mut material_q);
    let Some(entity) = highlight_target(&cache, picked.0, picked.1) else {
        return;
    };
    if let Ok(mut material) = material_q.get_mut(entity) {
        state.restore = Some((entity, material.0.clone()));
        material.0 = assets.highlight.clone();
        state.current = Some(picked);
    }
}

fn restore_previous(
    state: &mut HighlightState,
    material_q: &mut Query<&mut MeshMaterial3d<StandardMaterial>>,
) {
    state.current = None;
    if let Some((entity, original)) = state.restore.take() {
        // The entity may have been disposed by reconciliation since it was
        // highlighted; a vanished renderable needs no restore.
        if let Ok(mut material) = material_q.get_mut(entity) {
            material.0 = original;
        }
    }
}
