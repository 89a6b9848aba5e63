use bevy_egui::egui;

use simulation::buildings::BuildingKind;
use simulation::grid::BuildingCensus;

/// Renders a tool palette button. When `active` the label uses the accent
/// color over a tinted background; when inactive it is plain gray.
pub(crate) fn tool_button(ui: &mut egui::Ui, label: &str, active: bool) -> egui::Response {
    let accent = egui::Color32::from_rgb(120, 190, 255);
    let desired_size = egui::vec2(
        ui.spacing().interact_size.x + 14.0,
        ui.spacing().interact_size.y,
    );
    let (rect, response) = ui.allocate_exact_size(desired_size, egui::Sense::click());

    if ui.is_rect_visible(rect) {
        let painter = ui.painter();

        if active {
            let bg = egui::Color32::from_rgba_premultiplied(
                (accent.r() as f32 * 0.18) as u8,
                (accent.g() as f32 * 0.18) as u8,
                (accent.b() as f32 * 0.18) as u8,
                45,
            );
            painter.rect_filled(rect.shrink(1.0), 4.0, bg);
            painter.rect_stroke(
                rect.shrink(1.0),
                4.0,
                egui::Stroke::new(1.0, accent),
                egui::StrokeKind::Inside,
            );
        } else if response.hovered() {
            painter.rect_filled(rect.shrink(1.0), 4.0, egui::Color32::from_white_alpha(10));
        }

        let text_color = if active {
            accent
        } else {
            egui::Color32::from_gray(180)
        };
        painter.text(
            rect.center(),
            egui::Align2::CENTER_CENTER,
            label,
            egui::FontId::proportional(13.0),
            text_color,
        );
    }

    response
}

/// One-line census readout, non-zero kinds only: "R:3 C:1 Road:4".
pub(crate) fn census_summary(census: &BuildingCensus) -> String {
    let short = |kind: BuildingKind| match kind {
        BuildingKind::Residential => "R",
        BuildingKind::Commercial => "C",
        BuildingKind::Industrial => "I",
        BuildingKind::Road => "Road",
        BuildingKind::Tree => "Tree",
    };
    let parts: Vec<String> = BuildingKind::ALL
        .iter()
        .filter(|kind| census.count(**kind) > 0)
        .map(|kind| format!("{}:{}", short(*kind), census.count(*kind)))
        .collect();
    if parts.is_empty() {
        "no buildings".to_string()
    } else {
        parts.join("  ")
    }
}
