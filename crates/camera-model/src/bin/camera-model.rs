//! Command-line viewer: shows a scene file, or a small demo scene.

use std::path::PathBuf;
use std::process::ExitCode;

use camera_model::{Options, Result, SceneDescription, Viewer};

#[derive(Debug, Clone, clap::Parser)]
#[command(version, about = "Pinhole camera model viewer")]
struct Args {
    /// JSON scene file. Shows a demo scene if omitted.
    scene: Option<PathBuf>,

    /// JSON options file.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Canvas width in pixels.
    #[arg(long)]
    width: Option<u32>,

    /// Canvas height in pixels.
    #[arg(long)]
    height: Option<u32>,

    /// Target frame rate.
    #[arg(long)]
    fps: Option<u32>,

    /// Initial focal length in meters.
    #[arg(long)]
    focus: Option<f32>,

    /// Render one frame to this PNG/JPEG file and exit instead of opening a window.
    #[arg(long)]
    screenshot: Option<PathBuf>,

    /// Window title.
    #[arg(long, default_value = "Hello world!")]
    title: String,
}

impl Args {
    fn options(&self) -> Result<Options> {
        let mut options = match &self.config {
            Some(path) => Options::load(path)?,
            None => Options::default(),
        };
        if let Some(width) = self.width {
            options.width = width;
        }
        if let Some(height) = self.height {
            options.height = height;
        }
        if let Some(fps) = self.fps {
            options.fps = fps;
        }
        if let Some(focus) = self.focus {
            options.focus = focus;
        }
        Ok(options)
    }

    fn run(&self) -> Result<()> {
        let mut viewer = Viewer::new(self.title.clone(), self.options()?)?;
        match &self.scene {
            Some(path) => viewer.load_description(&SceneDescription::load(path)?)?,
            None => viewer.load_demo_scene(),
        }

        match &self.screenshot {
            Some(path) => viewer.render_to_file(path),
            None => viewer.show(),
        }
    }
}

fn main() -> ExitCode {
    env_logger::init();
    let args = <Args as clap::Parser>::parse();

    match args.run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            log::error!("{err}");
            eprintln!("camera-model: {err}");
            ExitCode::FAILURE
        }
    }
}
