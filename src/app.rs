//! Application shell: owns a scene, its scheduler and the typed handlers
//! that user code registers for frames, picks and input.

use crate::config::SceneConfig;
use crate::error::{Result, SceneError};
use crate::gfx::{
    camera::OrbitController,
    picking::{ObjectPicker, PickHit},
    scene::SceneContext,
    RenderBackend,
};
use crate::input::{ButtonMask, InputEvent, KeyCode};
use crate::simulation::{FrameReport, FrameScheduler, FrameStats, Spawner};

/// Per-frame callback, receives the elapsed milliseconds
pub type UpdateCallback = Box<dyn FnMut(&mut SceneContext, f32)>;
/// Receives every hit under the cursor, nearest first (possibly none)
pub type PickingCallback = Box<dyn FnMut(&mut SceneContext, &[PickHit])>;
/// Receives canvas `x`, `y` and the held buttons
pub type MouseCallback = Box<dyn FnMut(&mut SceneContext, f32, f32, ButtonMask)>;
pub type ScrollCallback = Box<dyn FnMut(&mut SceneContext, f32)>;
pub type KeyCallback = Box<dyn FnMut(&mut SceneContext, KeyCode)>;

/// Registered handler slots
#[derive(Default)]
pub struct Handlers {
    update: Option<UpdateCallback>,
    picking: Option<PickingCallback>,
    mouse_down: Option<MouseCallback>,
    mouse_up: Option<MouseCallback>,
    mouse_move: Option<MouseCallback>,
    scroll: Option<ScrollCallback>,
    key_down: Option<KeyCallback>,
    key_up: Option<KeyCallback>,
}

pub struct SceneApp {
    config: SceneConfig,
    context: SceneContext,
    scheduler: FrameScheduler,
    handlers: Handlers,
    picker: ObjectPicker,
    orbit_controls: Option<OrbitController>,
    renderer: Option<Box<dyn RenderBackend>>,
    running: bool,
}

impl SceneApp {
    pub fn new(config: SceneConfig) -> Self {
        let context = SceneContext::new(&config);
        let scheduler = FrameScheduler::new(config.spawn);
        Self {
            config,
            context,
            scheduler,
            handlers: Handlers::default(),
            picker: ObjectPicker::new(),
            orbit_controls: None,
            renderer: None,
            running: false,
        }
    }

    pub fn config(&self) -> &SceneConfig {
        &self.config
    }

    pub fn context(&self) -> &SceneContext {
        &self.context
    }

    pub fn context_mut(&mut self) -> &mut SceneContext {
        &mut self.context
    }

    pub fn stats(&self) -> &FrameStats {
        self.scheduler.stats()
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn set_update_callback<F>(&mut self, callback: F)
    where
        F: FnMut(&mut SceneContext, f32) + 'static,
    {
        log::debug!("Update callback registered");
        self.handlers.update = Some(Box::new(callback));
    }

    /// Fails if the canvas has no area, since no click could be unprojected
    pub fn set_picking_callback<F>(&mut self, callback: F) -> Result<()>
    where
        F: FnMut(&mut SceneContext, &[PickHit]) + 'static,
    {
        let (width, height) = self.context.canvas_size();
        if width == 0 || height == 0 {
            return Err(SceneError::InvalidCanvas { width, height });
        }
        log::debug!("Picking callback registered");
        self.handlers.picking = Some(Box::new(callback));
        Ok(())
    }

    pub fn set_mouse_callbacks<D, U, M>(&mut self, down: D, up: U, moved: M)
    where
        D: FnMut(&mut SceneContext, f32, f32, ButtonMask) + 'static,
        U: FnMut(&mut SceneContext, f32, f32, ButtonMask) + 'static,
        M: FnMut(&mut SceneContext, f32, f32, ButtonMask) + 'static,
    {
        log::debug!("Mouse callbacks registered");
        self.handlers.mouse_down = Some(Box::new(down));
        self.handlers.mouse_up = Some(Box::new(up));
        self.handlers.mouse_move = Some(Box::new(moved));
    }

    pub fn set_scroll_callback<F>(&mut self, callback: F)
    where
        F: FnMut(&mut SceneContext, f32) + 'static,
    {
        log::debug!("Scroll callback registered");
        self.handlers.scroll = Some(Box::new(callback));
    }

    pub fn set_keyboard_callbacks<U, D>(&mut self, key_up: U, key_down: D)
    where
        U: FnMut(&mut SceneContext, KeyCode) + 'static,
        D: FnMut(&mut SceneContext, KeyCode) + 'static,
    {
        log::debug!("Keyboard callbacks registered");
        self.handlers.key_up = Some(Box::new(key_up));
        self.handlers.key_down = Some(Box::new(key_down));
    }

    pub fn set_renderer(&mut self, renderer: Box<dyn RenderBackend>) {
        log::debug!("Render backend attached");
        self.renderer = Some(renderer);
    }

    pub fn set_spawner(&mut self, spawner: Box<dyn Spawner>) {
        self.scheduler.set_spawner(spawner);
    }

    pub fn set_picker(&mut self, picker: ObjectPicker) {
        self.picker = picker;
    }

    /// Let pointer drags and scrolling steer the scene's orbit camera
    pub fn enable_orbit_controls(&mut self, controller: OrbitController) {
        self.orbit_controls = Some(controller);
    }

    /// Validate configuration and begin accepting ticks and input
    pub fn start(&mut self) -> Result<()> {
        self.config.validate()?;
        let (width, height) = self.context.canvas_size();
        if width == 0 || height == 0 {
            return Err(SceneError::InvalidCanvas { width, height });
        }
        self.context.refresh_camera_uniform();
        self.running = true;
        log::info!(
            "Scene started: {}x{} canvas, {} objects, {} lights",
            width,
            height,
            self.context.objects.size(),
            self.context.lights().len()
        );
        Ok(())
    }

    pub fn stop(&mut self) {
        self.running = false;
        log::info!("Scene stopped after {} frames", self.scheduler.stats().frame_count);
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        self.context.resize(width, height);
        if let Some(renderer) = self.renderer.as_mut() {
            renderer.resize(width, height);
        }
    }

    /// Advance one frame and render it. Does nothing before [`SceneApp::start`].
    pub fn tick(&mut self, delta_ms: f32) -> Option<FrameReport> {
        if !self.running {
            log::debug!("Ignoring tick before start");
            return None;
        }

        let update = &mut self.handlers.update;
        let report = self.scheduler.tick(&mut self.context, delta_ms, |context, delta| {
            if let Some(callback) = update.as_mut() {
                callback(context, delta);
            }
        });

        if let Some(renderer) = self.renderer.as_mut() {
            renderer.render(
                &self.context.objects,
                &self.context.camera,
                self.context.lights(),
                &self.context.camera_uniform,
            );
        }
        Some(report)
    }

    /// Deliver one input event. Mouse-down also resolves a pick when a
    /// picking callback is registered.
    pub fn handle_input(&mut self, event: InputEvent) {
        if !self.running {
            log::debug!("Ignoring {:?} before start", event);
            return;
        }

        let canvas = self.context.canvas_size();
        if let (Some(controller), Some(camera)) =
            (self.orbit_controls.as_mut(), self.context.camera.as_orbit_mut())
        {
            controller.process_event(&event, camera, canvas);
        }

        let context = &mut self.context;
        let handlers = &mut self.handlers;
        match event {
            InputEvent::MouseDown { x, y, buttons } => {
                if let Some(callback) = handlers.mouse_down.as_mut() {
                    callback(context, x, y, buttons);
                }
                if let Some(callback) = handlers.picking.as_mut() {
                    let hits = self.picker.pick(context, x, y);
                    callback(context, &hits);
                }
            }
            InputEvent::MouseUp { x, y, buttons } => {
                if let Some(callback) = handlers.mouse_up.as_mut() {
                    callback(context, x, y, buttons);
                }
            }
            InputEvent::MouseMove { x, y, buttons } => {
                if let Some(callback) = handlers.mouse_move.as_mut() {
                    callback(context, x, y, buttons);
                }
            }
            InputEvent::Scroll { delta } => {
                if let Some(callback) = handlers.scroll.as_mut() {
                    callback(context, delta);
                }
            }
            InputEvent::KeyDown(code) => {
                if let Some(callback) = handlers.key_down.as_mut() {
                    callback(context, code);
                }
            }
            InputEvent::KeyUp(code) => {
                if let Some(callback) = handlers.key_up.as_mut() {
                    callback(context, code);
                }
            }
        }
    }
}
