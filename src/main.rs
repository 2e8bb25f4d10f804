//! Clear Mind entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;

    use glam::Vec2;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, HtmlCanvasElement, HtmlElement, KeyboardEvent, PointerEvent, TouchEvent};

    use clear_mind::audio::AudioManager;
    use clear_mind::consts::*;
    use clear_mind::renderer::{AmbientLayer, Hud, RenderState, build_scene, shake_offset};
    use clear_mind::sim::{Ability, Direction, joystick_from_drag};
    use clear_mind::{Game, Settings};

    /// Browser-side session: the core game plus everything platform-bound
    struct App {
        game: Game,
        render_state: Option<RenderState>,
        audio: AudioManager,
        settings: Settings,
        ambient: AmbientLayer,
        /// Shake jitter only; never feeds the simulation
        fx_rng: Pcg32,
        last_time: f64,
        start_time: f64,
        joystick_origin: Option<Vec2>,
    }

    impl App {
        fn new(seed: u64, viewport: Vec2, settings: Settings) -> Self {
            Self {
                game: Game::new(seed, viewport),
                render_state: None,
                audio: AudioManager::new(&settings),
                ambient: AmbientLayer::canonical().with_quality(settings.quality),
                fx_rng: Pcg32::seed_from_u64(seed ^ 0x5a5a),
                settings,
                last_time: 0.0,
                start_time: 0.0,
                joystick_origin: None,
            }
        }

        /// Any key press or tap counts as the gesture that unlocks audio
        fn user_gesture(&mut self) {
            self.audio.start();
        }

        fn update(&mut self, dt: f32) {
            let events = self.game.update(dt);
            self.audio.handle(&events);
        }

        /// Render the current frame
        fn render(&mut self, time: f64) {
            let snap = self.game.snapshot();
            let shake = shake_offset(&mut self.fx_rng, snap.shake, &self.settings);
            let time_secs = ((time - self.start_time) / 1000.0) as f32;
            let vertices = build_scene(&snap, &self.ambient, &self.settings, time_secs, shake);

            if let Some(ref mut render_state) = self.render_state {
                match render_state.render(&vertices) {
                    Ok(_) => {}
                    Err(wgpu::SurfaceError::Lost) => {
                        let (w, h) = render_state.size;
                        let logical = render_state.logical_size;
                        render_state.resize(w, h, logical);
                    }
                    Err(wgpu::SurfaceError::OutOfMemory) => {
                        log::error!("Out of memory!");
                    }
                    Err(e) => log::warn!("Render error: {:?}", e),
                }
            }
        }

        /// Update HUD elements in DOM
        fn update_hud(&self, document: &Document) {
            let hud = Hud::from_snapshot(&self.game.snapshot());

            if let Some(el) = document.get_element_by_id("hud-time") {
                el.set_text_content(Some(&hud.time));
            }

            if let Some(el) = document.get_element_by_id("hud-banner") {
                match &hud.banner {
                    Some(text) => {
                        el.set_text_content(Some(text));
                        let _ = el.set_attribute("class", "");
                    }
                    None => {
                        let _ = el.set_attribute("class", "hidden");
                    }
                }
            }

            if let Some(el) = document.get_element_by_id("labels") {
                let html: String = hud
                    .labels
                    .iter()
                    .map(|label| {
                        format!(
                            "<div class=\"label\" style=\"left:{:.0}px;top:{:.0}px\">{}</div>",
                            label.pos.x, label.pos.y, label.text
                        )
                    })
                    .collect();
                el.set_inner_html(&html);
            }

            if let Some(el) = document.get_element_by_id("game-over") {
                match &hud.game_over {
                    Some(text) => {
                        let _ = el.set_attribute("class", "");
                        if let Some(t) = document.get_element_by_id("game-over-title") {
                            t.set_text_content(Some(&text.title));
                        }
                        if let Some(s) = document.get_element_by_id("game-over-summary") {
                            s.set_text_content(Some(&text.summary));
                        }
                        if let Some(h) = document.get_element_by_id("game-over-hint") {
                            h.set_text_content(Some(&text.hint));
                        }
                    }
                    None => {
                        let _ = el.set_attribute("class", "hidden");
                    }
                }
            }
        }
    }

    /// CSS-pixel and device-pixel size of the canvas
    fn canvas_sizes(window: &web_sys::Window, canvas: &HtmlCanvasElement) -> (Vec2, u32, u32) {
        let dpr = window.device_pixel_ratio();
        let client_w = canvas.client_width().max(1);
        let client_h = canvas.client_height().max(1);
        let width = (client_w as f64 * dpr) as u32;
        let height = (client_h as f64 * dpr) as u32;
        (Vec2::new(client_w as f32, client_h as f32), width, height)
    }

    pub async fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Clear Mind starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        // Hide loading indicator
        if let Some(loading) = document.get_element_by_id("loading") {
            let _ = loading.set_attribute("class", "hidden");
        }

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .expect("no canvas")
            .dyn_into()
            .expect("not a canvas");

        let (viewport, width, height) = canvas_sizes(&window, &canvas);
        canvas.set_width(width);
        canvas.set_height(height);

        let settings = Settings::load();
        let seed = settings.seed.unwrap_or_else(|| js_sys::Date::now() as u64);
        let app = Rc::new(RefCell::new(App::new(seed, viewport, settings)));

        // Initialize WebGPU (WebGL2 fallback)
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU | wgpu::Backends::GL,
            ..Default::default()
        });

        let surface = instance
            .create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))
            .expect("Failed to create surface");

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .expect("Failed to get adapter");

        log::info!("Using adapter: {:?}", adapter.get_info().name);

        let render_state =
            RenderState::new(surface, &adapter, width, height, (viewport.x, viewport.y)).await;
        {
            let mut a = app.borrow_mut();
            a.render_state = Some(render_state);
            a.start_time = js_sys::Date::now();
        }

        setup_keyboard(app.clone());
        setup_dpad(&document, app.clone());
        setup_joystick(&document, app.clone());
        setup_ability_buttons(&document, app.clone());
        setup_window_events(canvas, app.clone());

        // Start game loop
        request_animation_frame(app);

        log::info!("Clear Mind running!");
    }

    fn setup_keyboard(app: Rc<RefCell<App>>) {
        let window = web_sys::window().expect("no window");

        // Key down
        {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let mut a = app.borrow_mut();
                a.user_gesture();
                let key = event.key();

                if let Some(dir) = Direction::from_key(&key) {
                    event.prevent_default();
                    a.game.input.keys.set(dir, true);
                } else if let Some(ability) = Ability::from_key(&key) {
                    if !event.repeat() {
                        a.game.trigger(ability);
                    }
                } else if key == "F2" {
                    event.prevent_default();
                    match serde_json::to_string(&a.game.snapshot()) {
                        Ok(json) => log::info!("Snapshot: {}", json),
                        Err(e) => log::warn!("Snapshot failed: {}", e),
                    }
                }
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Key up
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                if let Some(dir) = Direction::from_key(&event.key()) {
                    app.borrow_mut().game.input.keys.set(dir, false);
                }
            });
            let _ = window
                .add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    /// On-screen D-pad: held while the pointer is down on a button
    fn setup_dpad(document: &Document, app: Rc<RefCell<App>>) {
        let buttons = [
            ("dpad-up", Direction::Up),
            ("dpad-down", Direction::Down),
            ("dpad-left", Direction::Left),
            ("dpad-right", Direction::Right),
        ];

        for (id, dir) in buttons {
            let Some(btn) = document.get_element_by_id(id) else {
                continue;
            };

            for (event_name, pressed) in [
                ("pointerdown", true),
                ("pointerup", false),
                ("pointerleave", false),
                ("pointercancel", false),
            ] {
                let app = app.clone();
                let closure = Closure::<dyn FnMut(_)>::new(move |event: PointerEvent| {
                    event.prevent_default();
                    let mut a = app.borrow_mut();
                    if pressed {
                        a.user_gesture();
                    }
                    a.game.input.dpad.set(dir, pressed);
                });
                let _ = btn
                    .add_event_listener_with_callback(event_name, closure.as_ref().unchecked_ref());
                closure.forget();
            }
        }
    }

    /// Touch joystick: the drag from the first touch point steers the player
    fn setup_joystick(document: &Document, app: Rc<RefCell<App>>) {
        let Some(zone) = document.get_element_by_id("joystick") else {
            return;
        };
        let knob: Option<HtmlElement> = document
            .get_element_by_id("joystick-knob")
            .and_then(|el| el.dyn_into().ok());

        let touch_pos = |event: &TouchEvent| {
            event
                .target_touches()
                .get(0)
                .map(|t| Vec2::new(t.client_x() as f32, t.client_y() as f32))
        };

        let move_knob = move |knob: &Option<HtmlElement>, v: Vec2| {
            if let Some(knob) = knob {
                let offset = v * clear_mind::sim::input::JOYSTICK_RADIUS;
                let _ = knob.style().set_property(
                    "transform",
                    &format!("translate({:.0}px, {:.0}px)", offset.x, offset.y),
                );
            }
        };

        // Touch start
        {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                let mut a = app.borrow_mut();
                a.user_gesture();
                a.joystick_origin = touch_pos(&event);
            });
            let _ = zone
                .add_event_listener_with_callback("touchstart", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Touch move
        {
            let app = app.clone();
            let knob = knob.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                let mut a = app.borrow_mut();
                if let (Some(origin), Some(pos)) = (a.joystick_origin, touch_pos(&event)) {
                    let v = joystick_from_drag(origin, pos);
                    a.game.input.set_joystick(v);
                    move_knob(&knob, v);
                }
            });
            let _ = zone
                .add_event_listener_with_callback("touchmove", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Touch end / cancel
        for event_name in ["touchend", "touchcancel"] {
            let app = app.clone();
            let knob = knob.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                let mut a = app.borrow_mut();
                a.joystick_origin = None;
                a.game.input.set_joystick(Vec2::ZERO);
                move_knob(&knob, Vec2::ZERO);
            });
            let _ = zone
                .add_event_listener_with_callback(event_name, closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_ability_buttons(document: &Document, app: Rc<RefCell<App>>) {
        let buttons = [
            ("btn-focus", Ability::Focus),
            ("btn-acceptance", Ability::Acceptance),
            ("btn-silence", Ability::Silence),
        ];

        for (id, ability) in buttons {
            if let Some(btn) = document.get_element_by_id(id) {
                let app = app.clone();
                let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                    let mut a = app.borrow_mut();
                    a.user_gesture();
                    a.game.trigger(ability);
                });
                let _ =
                    btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
                closure.forget();
            }
        }
    }

    fn setup_window_events(canvas: HtmlCanvasElement, app: Rc<RefCell<App>>) {
        let window = web_sys::window().expect("no window");

        // Window blur: key-up events will never arrive
        {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::FocusEvent| {
                let mut a = app.borrow_mut();
                a.game.input.release_all();
                a.joystick_origin = None;
                log::info!("Input released (window blur)");
            });
            let _ =
                window.add_event_listener_with_callback("blur", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Resize
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                let Some(window) = web_sys::window() else {
                    return;
                };
                let (viewport, width, height) = canvas_sizes(&window, &canvas);
                canvas.set_width(width);
                canvas.set_height(height);

                let mut a = app.borrow_mut();
                a.game.resize(viewport.x, viewport.y);
                if let Some(ref mut render_state) = a.render_state {
                    render_state.resize(width, height, (viewport.x, viewport.y));
                }
            });
            let _ =
                window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn request_animation_frame(app: Rc<RefCell<App>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::once(move |time: f64| {
            game_loop(app, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(app: Rc<RefCell<App>>, time: f64) {
        {
            let mut a = app.borrow_mut();

            // Calculate delta time
            let dt = if a.last_time > 0.0 {
                ((time - a.last_time) / 1000.0) as f32
            } else {
                SIM_DT
            };
            a.last_time = time;

            a.update(dt);
            a.render(time);
            if let Some(document) = web_sys::window().and_then(|w| w.document()) {
                a.update_hud(&document);
            }
        }

        request_animation_frame(app);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    wasm_game::run().await;
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Clear Mind (native) starting...");
    log::info!("Native mode is headless - run with `trunk serve` for the web version");

    let settings = clear_mind::Settings::load();
    let seed = settings.seed.unwrap_or(1);

    println!("\nRunning autopilot session (seed {seed})...");
    let survived = autopilot::run(seed, autopilot::TIME_CAP_SECS);
    println!("Autopilot stayed clear for {survived} seconds");
}

/// Headless bot: steers away from nearby thoughts and cycles abilities
#[cfg(not(target_arch = "wasm32"))]
mod autopilot {
    use clear_mind::Game;
    use clear_mind::consts::*;
    use clear_mind::sim::{Ability, GamePhase, Snapshot};
    use glam::Vec2;

    /// Give up after this much simulated time
    pub const TIME_CAP_SECS: u64 = 300;
    /// Thoughts farther than this are ignored
    const DANGER_RADIUS: f32 = 220.0;
    /// Seconds between ability uses
    const ABILITY_EVERY_SECS: u64 = 15;

    /// Steering intent for the current frame
    pub fn steer(snap: &Snapshot) -> Vec2 {
        let center = snap.player_pos + Vec2::splat(snap.player_size / 2.0);

        let flee: Vec2 = snap
            .thoughts
            .iter()
            .filter_map(|t| {
                let away = center - t.pos;
                let dist = away.length();
                (dist > 0.0 && dist < DANGER_RADIUS)
                    .then(|| away / dist * (1.0 - dist / DANGER_RADIUS))
            })
            .sum();

        // Drift back toward the middle so corners don't trap us
        let home = (snap.viewport / 2.0 - center) / snap.viewport.max_element() * 0.5;

        (flee + home).clamp_length_max(1.0)
    }

    /// Play until collapse or the time cap; returns seconds survived
    pub fn run(seed: u64, cap_secs: u64) -> u64 {
        let mut game = Game::new(seed, Vec2::new(800.0, 600.0));
        let mut next_ability = 0;

        while game.phase() == GamePhase::Active && game.state.survived_secs < cap_secs {
            let snap = game.snapshot();
            let v = steer(&snap);
            game.input.set_joystick(v);

            let slot = snap.survived_secs / ABILITY_EVERY_SECS;
            if slot > next_ability {
                next_ability = slot;
                let ability = Ability::ALL[(slot as usize) % Ability::ALL.len()];
                log::debug!("Autopilot uses {}", ability.label());
                game.trigger(ability);
            }

            game.update(SIM_DT);
        }

        let survived = game.state.survived_secs;
        log::info!(
            "Autopilot finished: {:?}, clarity {:.1}, survived {}s",
            game.phase(),
            game.state.clarity,
            survived
        );
        survived
    }

}
