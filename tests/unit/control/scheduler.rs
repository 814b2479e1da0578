use super::*;
use crate::assets::decode::{ImageSource, PreparedImage};
use crate::foundation::core::{Canvas, Point};
use crate::foundation::error::AquarelleError;
use crate::mask::contour::ContourSource;
use crate::mask::raster::MaskTexture;
use crate::render::compositor::{
    Compositor, CompositorFactory, NullCompositorFactory, Pass, TurbulenceUniforms,
};
use serde_json::json;
use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Arc;

fn opaque_image(width: u32, height: u32) -> PreparedImage {
    PreparedImage {
        width,
        height,
        rgba8_premul: Arc::new(vec![255; (width * height * 4) as usize]),
    }
}

struct RectContour;

impl ContourSource for RectContour {
    fn trace(&self, width: u32, height: u32, _alpha: &dyn Fn(u32, u32) -> bool) -> Vec<Point> {
        vec![
            Point::new(0.0, 0.0),
            Point::new((width - 1) as f64, 0.0),
            Point::new((width - 1) as f64, (height - 1) as f64),
            Point::new(0.0, (height - 1) as f64),
        ]
    }
}

/// Pushes its tag on every presented frame; optionally always fails.
struct TagCompositor {
    tag: &'static str,
    fail: bool,
    frames: Rc<RefCell<Vec<&'static str>>>,
}

impl Compositor for TagCompositor {
    fn canvas(&self) -> Canvas {
        Canvas {
            width: 8,
            height: 8,
        }
    }
    fn add_pass(&mut self, _pass: Pass) -> AquarelleResult<()> {
        Ok(())
    }
    fn set_uniforms(&mut self, _uniforms: TurbulenceUniforms) {}
    fn upload_mask(&mut self, _mask: &MaskTexture) -> AquarelleResult<()> {
        Ok(())
    }
    fn clear(&mut self) {}
    fn render(&mut self, _delta_seconds: f64) -> AquarelleResult<()> {
        if self.fail {
            return Err(AquarelleError::render("backend lost"));
        }
        self.frames.borrow_mut().push(self.tag);
        Ok(())
    }
}

struct TagFactory {
    tag: &'static str,
    fail: bool,
    frames: Rc<RefCell<Vec<&'static str>>>,
}

impl CompositorFactory for TagFactory {
    fn create(&mut self, _texture: &PreparedImage) -> AquarelleResult<Box<dyn Compositor>> {
        Ok(Box::new(TagCompositor {
            tag: self.tag,
            fail: self.fail,
            frames: self.frames.clone(),
        }))
    }
}

fn tagged_instance(
    tag: &'static str,
    fail: bool,
    frames: &Rc<RefCell<Vec<&'static str>>>,
    overrides: serde_json::Value,
) -> Aquarelle {
    Aquarelle::new(
        ImageSource::Loaded(opaque_image(8, 8)),
        ImageSource::Loaded(opaque_image(8, 8)),
        &overrides,
        Box::new(RectContour),
        Box::new(TagFactory {
            tag,
            fail,
            frames: frames.clone(),
        }),
    )
    .unwrap()
}

fn null_instance(overrides: serde_json::Value) -> Aquarelle {
    Aquarelle::new(
        ImageSource::Loaded(opaque_image(8, 8)),
        ImageSource::Loaded(opaque_image(8, 8)),
        &overrides,
        Box::new(RectContour),
        Box::new(NullCompositorFactory),
    )
    .unwrap()
}

#[test]
fn ticks_run_in_registration_order() {
    let frames = Rc::new(RefCell::new(Vec::new()));
    let mut sched = Scheduler::new();
    sched.register(tagged_instance("a", false, &frames, json!({})));
    sched.register(tagged_instance("b", false, &frames, json!({})));

    sched.tick_with_delta(0.016);
    sched.tick_with_delta(0.016);

    assert_eq!(*frames.borrow(), vec!["a", "b", "a", "b"]);
}

#[test]
fn one_failing_instance_does_not_stall_the_others() {
    let frames = Rc::new(RefCell::new(Vec::new()));
    let mut sched = Scheduler::new();
    let bad = sched.register(tagged_instance("bad", true, &frames, json!({})));
    sched.register(tagged_instance("ok", false, &frames, json!({})));

    assert!(sched.try_tick_with_delta(0.016).is_err());
    assert!(sched.get(bad).unwrap().has_failed());

    // The failed instance is inert from now on; the healthy one keeps going.
    sched.try_tick_with_delta(0.016).unwrap();
    assert_eq!(*frames.borrow(), vec!["ok", "ok"]);
}

#[test]
fn unregister_returns_ownership() {
    let mut sched = Scheduler::new();
    let a = sched.register(null_instance(json!({})));
    let b = sched.register(null_instance(json!({})));
    assert_eq!(sched.len(), 2);

    let taken = sched.unregister(a).unwrap();
    assert!(!taken.is_initialized());
    assert_eq!(sched.len(), 1);
    assert!(sched.get(a).is_none());
    assert!(sched.unregister(a).is_none());
    assert!(sched.get(b).is_some());
}

#[test]
fn get_mut_allows_control_between_ticks() {
    let mut sched = Scheduler::new();
    let id = sched.register(null_instance(json!({ "duration": 1000 })));

    sched.tick_with_delta(0.0);
    sched.get_mut(id).unwrap().start();
    sched.tick_with_delta(0.25);

    let inst = sched.get(id).unwrap();
    assert_eq!(inst.progress(), 0.25);
    assert!(!inst.is_paused());
}

#[test]
fn wall_clock_tick_measures_elapsed_time() {
    let mut sched = Scheduler::new();
    let id = sched.register(null_instance(json!({ "autoplay": true, "duration": 1 })));

    // First tick has no reference point and must observe a zero delta.
    sched.tick();
    assert_eq!(sched.get(id).unwrap().progress(), 0.0);

    std::thread::sleep(std::time::Duration::from_millis(2));
    sched.tick();
    // 2ms of wall clock against a 1ms duration clamps to completion.
    assert_eq!(sched.get(id).unwrap().progress(), 1.0);
}
