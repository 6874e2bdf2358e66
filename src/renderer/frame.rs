//! Frame composition: scene outline first, then the traced path

use super::commands::RenderTarget;
use crate::consts::GUIDE_DASH;
use crate::sim::{Color, Scene};

/// Draw a full frame of `scene` onto `target`
pub fn render_frame(scene: &Scene, target: &mut impl RenderTarget) {
    target.clear();

    let top = &scene.top_mirror;
    let bottom = &scene.bottom_mirror;
    target.stroke(top.start(), top.end(), &top.color, None);
    target.stroke(bottom.start(), bottom.end(), &bottom.color, None);

    // Source marker
    let source = &scene.ray_source;
    target.stroke(source.point, source.point, &source.color, None);

    // Dashed guides closing the cavity ends
    let guide = Color::guide();
    target.stroke(top.start(), bottom.start(), &guide, Some(GUIDE_DASH.as_slice()));
    target.stroke(top.end(), bottom.end(), &guide, Some(GUIDE_DASH.as_slice()));

    for segment in &scene.path {
        target.stroke(segment.p1, segment.p2, &scene.ray_color, None);
    }
}
