use super::{Camera, Frame, Rgba, Shape};
use glam::{Mat4, Vec2, Vec3};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width: width.max(1.0),
            height: height.max(1.0),
        }
    }

    pub fn aspect(&self) -> f32 {
        self.width / self.height
    }
}

/// Screen-space command, in pixels from the top-left corner.
#[derive(Clone, Debug, PartialEq)]
pub enum DrawCommand {
    Line {
        from: Vec2,
        to: Vec2,
        width: f32,
        color: Rgba,
    },
    Circle {
        center: Vec2,
        radius: f32,
        color: Rgba,
    },
    Text {
        at: Vec2,
        text: String,
        size: f32,
        color: Rgba,
    },
}

struct Projected {
    screen: Vec2,
    w: f32,
}

fn project_point(view_projection: &Mat4, point: Vec3, viewport: Viewport) -> Option<Projected> {
    let clip = *view_projection * point.extend(1.0);
    if clip.w <= 1e-4 {
        return None;
    }
    let ndc = clip.truncate() / clip.w;
    if !(0.0..=1.0).contains(&ndc.z) {
        return None;
    }
    Some(Projected {
        screen: Vec2::new(
            (ndc.x + 1.0) * 0.5 * viewport.width,
            (1.0 - ndc.y) * 0.5 * viewport.height,
        ),
        w: clip.w,
    })
}

/// Projects a frame through `camera`, culling anything behind the eye or
/// past the far plane, and orders the result back to front.
pub fn project(frame: &Frame, camera: &Camera, viewport: Viewport) -> Vec<DrawCommand> {
    let view_projection = camera.view_projection(viewport.aspect());
    let focal = viewport.height / 2.0 / (camera.fov_deg.to_radians() / 2.0).tan();

    let mut commands: Vec<(f32, DrawCommand)> = Vec::with_capacity(frame.len());
    for item in frame.items() {
        match &item.shape {
            Shape::Line { from, to, width } => {
                let (Some(a), Some(b)) = (
                    project_point(&view_projection, *from, viewport),
                    project_point(&view_projection, *to, viewport),
                ) else {
                    continue;
                };
                if a.screen.distance_squared(b.screen) < 1e-4 {
                    continue;
                }
                commands.push((
                    (a.w + b.w) / 2.0,
                    DrawCommand::Line {
                        from: a.screen,
                        to: b.screen,
                        width: *width,
                        color: item.color,
                    },
                ));
            }
            Shape::Point { at, radius } => {
                let Some(p) = project_point(&view_projection, *at, viewport) else {
                    continue;
                };
                commands.push((
                    p.w,
                    DrawCommand::Circle {
                        center: p.screen,
                        radius: (radius * focal / p.w).max(0.5),
                        color: item.color,
                    },
                ));
            }
            Shape::Text { at, text, size } => {
                let Some(p) = project_point(&view_projection, *at, viewport) else {
                    continue;
                };
                commands.push((
                    p.w,
                    DrawCommand::Text {
                        at: p.screen,
                        text: text.clone(),
                        size: size * focal / p.w,
                        color: item.color,
                    },
                ));
            }
        }
    }

    commands.sort_by(|a, b| b.0.total_cmp(&a.0));
    commands.into_iter().map(|(_, command)| command).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn camera() -> Camera {
        Camera::new(Vec3::new(0.0, 0.0, 5.0), 50.0)
    }

    #[test]
    fn target_lands_at_viewport_centre() {
        let mut frame = Frame::new();
        frame.point(Vec3::ZERO, 0.1, Rgba::WHITE);
        let commands = project(&frame, &camera(), Viewport::new(800.0, 600.0));

        match &commands[0] {
            DrawCommand::Circle { center, .. } => {
                assert!((center.x - 400.0).abs() < 1e-3);
                assert!((center.y - 300.0).abs() < 1e-3);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn up_is_up_on_screen() {
        let mut frame = Frame::new();
        frame.point(Vec3::new(0.0, 1.0, 0.0), 0.1, Rgba::WHITE);
        let commands = project(&frame, &camera(), Viewport::new(800.0, 600.0));
        match &commands[0] {
            DrawCommand::Circle { center, .. } => assert!(center.y < 300.0),
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn geometry_behind_camera_is_culled() {
        let mut frame = Frame::new();
        frame.point(Vec3::new(0.0, 0.0, 10.0), 0.1, Rgba::WHITE);
        frame.line(Vec3::ZERO, Vec3::new(0.0, 0.0, 10.0), Rgba::WHITE, 1.0);
        let commands = project(&frame, &camera(), Viewport::new(800.0, 600.0));
        assert!(commands.is_empty());
    }

    #[test]
    fn far_items_are_drawn_first_and_smaller() {
        let mut frame = Frame::new();
        frame.point(Vec3::new(0.0, 0.0, 2.0), 0.2, Rgba::WHITE);
        frame.point(Vec3::new(0.0, 0.0, -20.0), 0.2, Rgba::WHITE);
        let commands = project(&frame, &camera(), Viewport::new(800.0, 600.0));

        let radii: Vec<f32> = commands
            .iter()
            .map(|command| match command {
                DrawCommand::Circle { radius, .. } => *radius,
                other => panic!("unexpected command {other:?}"),
            })
            .collect();
        assert_eq!(radii.len(), 2);
        assert!(radii[0] < radii[1]);
    }
}
