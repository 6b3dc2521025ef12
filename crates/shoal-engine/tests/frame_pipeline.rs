use shoal_engine::canvas::DrawOp;
use shoal_engine::config::RenderConfig;
use shoal_engine::coords::{Rect, Transform, Vec2, WindowMetrics};
use shoal_engine::frame::{FrameScheduler, Visualization};
use shoal_engine::paint::Color;
use shoal_engine::shapes::FishStyle;
use shoal_engine::surface::{RecordingHost, RecordingSurface, Surface};
use shoal_engine::world::{Food, Organism, Simulation, WorldSnapshot};

struct Fixed(WorldSnapshot);

impl Simulation for Fixed {
    fn step(&mut self) {}

    fn world(&self) -> WorldSnapshot {
        self.0.clone()
    }
}

fn visualization(metrics: WindowMetrics, world: WorldSnapshot) -> Visualization<Fixed, RecordingSurface> {
    let mut host = RecordingHost::new(metrics);
    Visualization::attach(&mut host, Fixed(world), &RenderConfig::default()).unwrap()
}

fn close(a: Vec2, b: Vec2) -> bool {
    (a - b).length() < 1e-3
}

fn red() -> Color {
    Color::from_srgb_u8(255, 0, 0, 255)
}

#[test]
fn retina_food_lands_at_device_center() {
    let world = WorldSnapshot { foods: vec![Food::new(0.5, 0.5, "#ff0000")], animals: vec![] };
    let mut vis = visualization(WindowMetrics::new(800.0, 600.0, Some(2.0)), world);

    assert_eq!(vis.viewport().surface().backing_size(), (1600, 1200));
    assert_eq!(vis.viewport().surface().display_size(), (800.0, 600.0));

    let report = vis.tick();
    assert_eq!(report.foods_drawn, 1);
    assert_eq!(report.skipped, 0);

    let ops = vis.viewport().surface().canvas_ref().ops();

    let clear = ops.iter().find_map(|op| match op {
        DrawOp::ClearRect { rect, transform } => Some((*rect, *transform)),
        _ => None,
    });
    assert_eq!(clear, Some((Rect::new(0.0, 0.0, 800.0, 600.0), Transform::from_scale(2.0, 2.0))));

    let (center, radius, transform) = ops
        .iter()
        .find_map(|op| match op {
            DrawOp::Arc { center, radius, transform, .. } => Some((*center, *radius, *transform)),
            _ => None,
        })
        .unwrap();
    assert!(close(center, Vec2::new(400.0, 300.0)));
    assert!((radius - 4.0).abs() < 1e-4);
    assert!(close(transform.apply(center), Vec2::new(800.0, 600.0)));

    let paints: Vec<_> = vis.viewport().surface().canvas_ref().paint_ops().cloned().collect();
    assert_eq!(paints, vec![DrawOp::Fill { color: red() }]);
}

#[test]
fn organism_is_placed_and_scaled_from_viewport_width() {
    let world = WorldSnapshot { foods: vec![], animals: vec![Organism::new(0.25, 0.75, 0.0)] };
    let mut vis = visualization(WindowMetrics::new(800.0, 600.0, Some(1.0)), world);

    let report = vis.tick();
    assert_eq!(report.organisms_drawn, 1);

    let ops = vis.viewport().surface().canvas_ref().ops();
    let (center, rx, ry, transform) = ops
        .iter()
        .find_map(|op| match op {
            DrawOp::Ellipse { center, rx, ry, transform, .. } => Some((*center, *rx, *ry, *transform)),
            _ => None,
        })
        .unwrap();

    assert_eq!(center, Vec2::zero());
    assert!((rx - 8.0).abs() < 1e-4);
    assert!((ry - 4.8).abs() < 1e-4);
    assert!(close(transform.apply(Vec2::zero()), Vec2::new(200.0, 450.0)));
    // Rotation 0 faces +y: the nose (local +x) points down the screen.
    assert!(close(transform.apply(Vec2::new(8.0, 0.0)), Vec2::new(200.0, 458.0)));

    let style = FishStyle::default();
    let paints: Vec<_> = vis.viewport().surface().canvas_ref().paint_ops().cloned().collect();
    assert_eq!(
        paints,
        vec![
            DrawOp::Fill { color: style.body },
            DrawOp::Stroke { color: style.outline, width: style.line_width },
        ]
    );
}

#[test]
fn foods_are_painted_before_organisms() {
    let world = WorldSnapshot {
        foods: vec![Food::new(0.1, 0.1, "#ff0000"), Food::new(0.9, 0.9, "#ff0000")],
        animals: vec![Organism::new(0.5, 0.5, 1.0)],
    };
    let mut vis = visualization(WindowMetrics::new(640.0, 480.0, None), world);
    vis.tick();

    let fills: Vec<Color> = vis
        .viewport()
        .surface()
        .canvas_ref()
        .paint_ops()
        .filter_map(|op| match op {
            DrawOp::Fill { color } => Some(*color),
            _ => None,
        })
        .collect();
    assert_eq!(fills, vec![red(), red(), FishStyle::default().body]);
}

#[test]
fn invalid_entities_are_skipped_without_losing_the_frame() {
    let world = WorldSnapshot {
        foods: vec![Food::new(f32::NAN, 0.5, "#ff0000"), Food::new(0.5, 0.5, "not-a-color")],
        animals: vec![Organism::new(0.5, 0.5, 0.0)],
    };
    let mut vis = visualization(WindowMetrics::new(800.0, 600.0, Some(1.0)), world);
    let report = vis.tick();

    assert_eq!(report.foods_drawn, 0);
    assert_eq!(report.organisms_drawn, 1);
    assert_eq!(report.skipped, 2);
    assert_eq!(vis.viewport().surface().canvas_ref().save_depth(), 0);
}

#[test]
fn resize_rescales_following_frames() {
    let world = WorldSnapshot { foods: vec![Food::new(0.5, 0.5, "#ff0000")], animals: vec![] };
    let mut vis = visualization(WindowMetrics::new(800.0, 600.0, Some(2.0)), world);
    vis.tick();

    vis.resize(WindowMetrics::new(400.0, 300.0, Some(1.5))).unwrap();
    assert_eq!(vis.viewport().surface().backing_size(), (600, 450));

    vis.viewport_mut().surface_mut().canvas().clear_ops();
    vis.tick();

    let (center, radius, transform) = vis
        .viewport()
        .surface()
        .canvas_ref()
        .ops()
        .iter()
        .find_map(|op| match op {
            DrawOp::Arc { center, radius, transform, .. } => Some((*center, *radius, *transform)),
            _ => None,
        })
        .unwrap();
    assert!(close(center, Vec2::new(200.0, 150.0)));
    assert!((radius - 2.0).abs() < 1e-4);
    assert!(close(transform.apply(center), Vec2::new(300.0, 225.0)));
}

#[test]
fn scheduler_stops_the_pipeline() {
    let world = WorldSnapshot { foods: vec![Food::new(0.5, 0.5, "#ff0000")], animals: vec![] };
    let mut scheduler = FrameScheduler::new(visualization(WindowMetrics::new(100.0, 100.0, None), world));

    let token = scheduler.start();
    assert_eq!(scheduler.run_frames(3), 3);
    assert!(scheduler.stop(&token));
    assert!(!scheduler.fire());

    assert_eq!(scheduler.task().animation().ticks(), 3);
    assert_eq!(scheduler.task().last_report().foods_drawn, 1);
}
