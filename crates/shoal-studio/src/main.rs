mod demo;

use std::env;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result};
use winit::event::{ElementState, WindowEvent};
use winit::keyboard::{Key, NamedKey};

use shoal_engine::config::RenderConfig;
use shoal_engine::core::{App, AppControl, FrameCtx, WindowCtx};
use shoal_engine::device::GpuInit;
use shoal_engine::frame::{FrameScheduler, StopToken, Visualization};
use shoal_engine::logging::init_logging;
use shoal_engine::paint::Color;
use shoal_engine::render::PixmapBlitter;
use shoal_engine::surface::{RasterHost, RasterSurface, Surface};
use shoal_engine::window::{Runtime, RuntimeConfig};

use demo::DriftSimulation;

type Viewer = FrameScheduler<Visualization<DriftSimulation, RasterSurface>>;

const CONFIG_ENV: &str = "SHOAL_CONFIG";
const CONFIG_FILE: &str = "shoal.toml";

fn main() -> Result<()> {
    let (config, source) = load_config()?;
    init_logging(config.logging_config());
    match source {
        Some(path) => log::info!("render config loaded from {}", path.display()),
        None => log::info!("no render config found, using defaults"),
    }

    let app = StudioApp::new(config)?;
    Runtime::run(RuntimeConfig::default(), GpuInit::default(), app)
}

/// `$SHOAL_CONFIG`, else `./shoal.toml` when present, else defaults.
fn load_config() -> Result<(RenderConfig, Option<PathBuf>)> {
    if let Some(path) = env::var_os(CONFIG_ENV) {
        let path = PathBuf::from(path);
        let config = RenderConfig::load(&path).with_context(|| format!("{CONFIG_ENV} is set"))?;
        return Ok((config, Some(path)));
    }

    let local = Path::new(CONFIG_FILE);
    if local.is_file() {
        return Ok((RenderConfig::load(local)?, Some(local.to_path_buf())));
    }

    Ok((RenderConfig::default(), None))
}

struct StudioApp {
    config: RenderConfig,
    background: Color,
    viewer: Option<Viewer>,
    token: Option<StopToken>,
    blitter: PixmapBlitter,
}

impl StudioApp {
    fn new(config: RenderConfig) -> Result<Self> {
        let background = config.background_color().context("invalid `background`")?;
        Ok(Self {
            config,
            background,
            viewer: None,
            token: None,
            blitter: PixmapBlitter::new(),
        })
    }

    fn toggle_pause(&mut self) {
        let Some(viewer) = self.viewer.as_mut() else { return };
        match self.token.take() {
            Some(token) if viewer.is_armed() => {
                viewer.stop(&token);
                log::info!("paused");
            }
            _ => self.token = Some(viewer.start()),
        }
    }
}

impl App for StudioApp {
    fn on_window_created(&mut self, window: &WindowCtx<'_>) -> AppControl {
        let seed = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_or(0, |d| d.as_nanos() as u64);
        let mut host = RasterHost::new(window.metrics());

        match Visualization::attach(&mut host, DriftSimulation::new(seed), &self.config) {
            Ok(visualization) => {
                let mut viewer = FrameScheduler::new(visualization);
                self.token = Some(viewer.start());
                self.viewer = Some(viewer);
                AppControl::Continue
            }
            Err(err) => {
                log::error!("failed to attach viewport: {err:#}");
                AppControl::Exit
            }
        }
    }

    fn on_window_event(&mut self, window: &WindowCtx<'_>, event: &WindowEvent) -> AppControl {
        match event {
            WindowEvent::Resized(_) | WindowEvent::ScaleFactorChanged { .. } => {
                if let Some(viewer) = self.viewer.as_mut() {
                    if let Err(err) = viewer.task_mut().resize(window.metrics()) {
                        log::error!("viewport resize failed: {err}");
                    }
                }
            }
            WindowEvent::KeyboardInput { event, .. } if event.state == ElementState::Pressed => {
                match &event.logical_key {
                    Key::Named(NamedKey::Escape) => return AppControl::Exit,
                    Key::Named(NamedKey::Space) if !event.repeat => self.toggle_pause(),
                    _ => {}
                }
            }
            _ => {}
        }
        AppControl::Continue
    }

    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl {
        let Some(viewer) = self.viewer.as_mut() else {
            return AppControl::Continue;
        };

        viewer.fire();

        let surface = viewer.task().viewport().surface();
        let canvas = surface.canvas_ref();
        let size = surface.backing_size();
        let blitter = &mut self.blitter;

        ctx.render(self.background, |rctx, target| {
            blitter.render(rctx, target, canvas.data(), size);
        })
    }
}
