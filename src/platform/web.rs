//! Browser host bindings
//!
//! The page owns `requestAnimationFrame`, input listeners and the overlay
//! DOM; it calls into [`WebGame`] once per frame and on every press.

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{CanvasPattern, CanvasRenderingContext2d, HtmlCanvasElement, HtmlImageElement};

use crate::renderer::{SheetId, SpriteDraw, SpriteSheet, SpriteSheets, SpriteSink, render};
use crate::sim::{GameEvent, GameSession, TickInput, Viewport, tick};
use crate::ui;

/// Shown until the cave texture has loaded
const BACKGROUND: &str = "#181c20";

#[wasm_bindgen(start)]
pub fn wasm_start() {
    console_error_panic_hook::set_once();
    if console_log::init_with_level(log::Level::Info).is_err() {
        web_sys::console::warn_1(&"logger already initialized".into());
    }
}

/// Draws sprite blits onto a 2D canvas context
struct CanvasSink {
    ctx: CanvasRenderingContext2d,
    bat: HtmlImageElement,
    spikes: HtmlImageElement,
    background: HtmlImageElement,
}

impl CanvasSink {
    fn sheet(image: &HtmlImageElement, frames: u32) -> Option<SpriteSheet> {
        let (w, h) = (image.natural_width(), image.natural_height());
        (image.complete() && w > 0 && h > 0).then(|| SpriteSheet::new(w as f64, h as f64, frames))
    }

    /// Sheet sizes once both images have loaded
    fn sheets(&self, bat_frames: u32, spike_frames: u32) -> Option<SpriteSheets> {
        Some(SpriteSheets {
            bat: Self::sheet(&self.bat, bat_frames)?,
            spikes: Self::sheet(&self.spikes, spike_frames)?,
        })
    }

    /// Repeating cave texture, once the image has loaded
    fn background_pattern(&self) -> Option<CanvasPattern> {
        if !self.background.complete() || self.background.natural_width() == 0 {
            return None;
        }
        match self
            .ctx
            .create_pattern_with_html_image_element(&self.background, "repeat")
        {
            Ok(pattern) => pattern,
            Err(e) => {
                log::warn!("background pattern failed: {:?}", e);
                None
            }
        }
    }
}

impl SpriteSink for CanvasSink {
    fn clear(&mut self, viewport: Viewport) {
        self.ctx.clear_rect(0.0, 0.0, viewport.width, viewport.height);
        match self.background_pattern() {
            Some(pattern) => self.ctx.set_fill_style_canvas_pattern(&pattern),
            None => self.ctx.set_fill_style_str(BACKGROUND),
        }
        self.ctx.fill_rect(0.0, 0.0, viewport.width, viewport.height);
    }

    fn draw_sprite(&mut self, draw: &SpriteDraw) {
        let image = match draw.sheet {
            SheetId::Bat => &self.bat,
            SheetId::Spikes => &self.spikes,
        };
        let center = draw.dst.min + draw.dst.size / 2.0;
        let sx = if draw.flip_x { -1.0 } else { 1.0 };
        let sy = if draw.flip_y { -1.0 } else { 1.0 };

        self.ctx.save();
        let placed = self
            .ctx
            .translate(center.x, center.y)
            .and_then(|_| self.ctx.scale(sx, sy))
            .and_then(|_| {
                self.ctx
                    .draw_image_with_html_image_element_and_sw_and_sh_and_dx_and_dy_and_dw_and_dh(
                        image,
                        draw.src.min.x,
                        draw.src.min.y,
                        draw.src.size.x,
                        draw.src.size.y,
                        -draw.dst.size.x / 2.0,
                        -draw.dst.size.y / 2.0,
                        draw.dst.size.x,
                        draw.dst.size.y,
                    )
            });
        if let Err(e) = placed {
            log::warn!("draw failed: {:?}", e);
        }
        self.ctx.restore();
    }
}

/// One game bound to a canvas
#[wasm_bindgen]
pub struct WebGame {
    session: GameSession,
    sink: CanvasSink,
    pending: TickInput,
}

#[wasm_bindgen]
impl WebGame {
    /// Attach to `<canvas id=canvas_id>` and start loading sprite sheets
    #[wasm_bindgen(constructor)]
    pub fn new(canvas_id: &str, seed: u32) -> Result<WebGame, JsValue> {
        let document = web_sys::window()
            .and_then(|w| w.document())
            .ok_or_else(|| JsValue::from_str("no document"))?;
        let canvas: HtmlCanvasElement = document
            .get_element_by_id(canvas_id)
            .ok_or_else(|| JsValue::from_str("canvas not found"))?
            .dyn_into()?;
        let ctx: CanvasRenderingContext2d = canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("2d context unavailable"))?
            .dyn_into()?;

        let bat = HtmlImageElement::new()?;
        bat.set_src("bat.gif");
        let spikes = HtmlImageElement::new()?;
        spikes.set_src("stalagmites.png");
        let background = HtmlImageElement::new()?;
        background.set_src("background-reference.png");

        let viewport = Viewport::new(canvas.width() as f64, canvas.height() as f64);
        log::info!("Gone Batty initialized with seed {}", seed);
        Ok(WebGame {
            session: GameSession::new(seed as u64, viewport),
            sink: CanvasSink {
                ctx,
                bat,
                spikes,
                background,
            },
            pending: TickInput::default(),
        })
    }

    /// Seeded from the page clock
    #[wasm_bindgen(js_name = withClockSeed)]
    pub fn with_clock_seed(canvas_id: &str) -> Result<WebGame, JsValue> {
        WebGame::new(canvas_id, js_sys::Date::now() as u64 as u32)
    }

    pub fn resize(&mut self, width: f64, height: f64) {
        self.session.resize(width, height);
    }

    /// Any press: flaps while playing, ignored on overlays
    pub fn press(&mut self) {
        if self.session.is_playing() {
            self.pending.flap = true;
        }
    }

    /// Overlay button: start or restart a round
    pub fn begin(&mut self) {
        if !self.session.is_playing() {
            self.pending.begin = true;
        }
    }

    /// Advance and draw one frame. Returns whether to request another.
    pub fn frame(&mut self, now_ms: f64) -> bool {
        let input = std::mem::take(&mut self.pending);
        let keep_going = tick(&mut self.session, &input, now_ms);

        for event in self.session.drain_events() {
            if let GameEvent::Crashed { collision, score } = event {
                log::info!("GAME OVER: {:?} after {} seconds", collision, score);
            }
        }

        let tuning = &self.session.tuning;
        if let Some(sheets) = self.sink.sheets(tuning.bat_frames, tuning.spike_sprites) {
            render(&self.session, &sheets, &mut self.sink);
        } else {
            self.sink.clear(self.session.viewport);
        }
        keep_going
    }

    pub fn phase(&self) -> String {
        self.session.phase.as_str().to_string()
    }

    pub fn score(&self) -> u32 {
        self.session.score
    }

    pub fn overlay_title(&self) -> Option<String> {
        ui::overlay_for(&self.session).map(|o| o.title)
    }

    pub fn overlay_body(&self) -> Option<String> {
        ui::overlay_for(&self.session).map(|o| o.body)
    }

    pub fn overlay_button(&self) -> Option<String> {
        ui::overlay_for(&self.session).map(|o| o.button)
    }
}
