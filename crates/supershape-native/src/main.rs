use clap::Parser;
use glam::DVec2;
use std::fmt::Write as _;
use std::path::PathBuf;
use std::time::Duration;
use supershape_core::{
    Engine, EngineConfig, FrameOutput, InputEvent, PhaseInit, ResetState, TuningPreset,
};

#[derive(Parser, Debug, Clone)]
#[command(
    name = "supershape-native",
    version,
    about = "Drive the supershape engine headlessly and export a frame as SVG"
)]
struct Args {
    /// Tuning preset: cinematic or arpeggio
    #[arg(long, default_value = "cinematic")]
    preset: String,

    /// Keys held at the start of the session, e.g. "qe"
    #[arg(long, default_value = "qw")]
    hold: String,

    /// Frames the keys stay held before release
    #[arg(long, default_value_t = 240)]
    hold_frames: u32,

    /// Total frames to run
    #[arg(long, default_value_t = 600)]
    frames: u32,

    /// Extra shapes added before the first frame
    #[arg(long, default_value_t = 2)]
    shapes: u32,

    /// Seed for initial phases; zero phases when omitted
    #[arg(long)]
    seed: Option<u64>,

    #[arg(long, default_value_t = 800.0)]
    width: f64,

    #[arg(long, default_value_t = 600.0)]
    height: f64,

    /// Write the last frame here as SVG
    #[arg(long)]
    svg: Option<PathBuf>,
}

const FRAME_DT: Duration = Duration::from_micros(16_667);

fn main() -> anyhow::Result<()> {
    env_logger::builder()
        .filter_level(log::LevelFilter::Info)
        .init();

    let args = Args::parse();
    let preset = TuningPreset::parse(&args.preset.to_ascii_lowercase())
        .ok_or_else(|| anyhow::anyhow!("unknown preset '{}'", args.preset))?;
    let phase_init = args.seed.map(PhaseInit::Seeded).unwrap_or(PhaseInit::Zero);
    let config = EngineConfig::from_preset(preset).with_phase_init(phase_init);
    let mut engine = Engine::new(config, args.width, args.height)?;

    for _ in 0..args.shapes {
        engine.push_event(InputEvent::AddShape);
    }
    let held: Vec<_> = args
        .hold
        .chars()
        .filter_map(|c| {
            let id = engine.control_for_key(c);
            if id.is_none() {
                log::warn!("[script] key '{}' is not bound in preset {}", c, preset.name());
            }
            id
        })
        .collect();
    for &id in &held {
        engine.push_event(InputEvent::Press(id));
    }

    let mut last: Option<FrameOutput> = None;
    let mut settled_at = None;
    for frame in 0..args.frames {
        if frame == args.hold_frames {
            for &id in &held {
                engine.push_event(InputEvent::Release(id));
            }
            log::info!("[script] frame {}: released {} keys", frame, held.len());
        }
        let out = engine.tick(FRAME_DT);
        if frame % 60 == 0 {
            log::info!(
                "[frame {:>4}] active={} strokes={} color={} reset={:?}",
                frame,
                out.active,
                out.strokes.len(),
                out.strokes.first().map(|s| s.color.to_hex()).unwrap_or_default(),
                engine.reset_state()
            );
        }
        if frame > args.hold_frames
            && settled_at.is_none()
            && engine.reset_state() == ResetState::Idle
            && engine.reset_controller().is_settled()
        {
            settled_at = Some(frame);
            log::info!("[script] frame {}: shapes back at baseline", frame);
        }
        last = Some(out);
    }

    if let (Some(path), Some(frame)) = (&args.svg, &last) {
        let svg = frame_to_svg(frame, args.width, args.height);
        std::fs::write(path, svg)?;
        log::info!("[svg] wrote {}", path.display());
    }
    Ok(())
}

fn frame_to_svg(frame: &FrameOutput, width: f64, height: f64) -> String {
    let m = frame.view.affine();
    let mut out = String::new();
    _ = writeln!(
        out,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#,
        w = width,
        h = height
    );
    _ = writeln!(out, r#"<rect width="100%" height="100%" fill="black"/>"#);
    for stroke in &frame.strokes {
        let points: Vec<String> = stroke
            .points
            .iter()
            .map(|&p| {
                let s: DVec2 = m.transform_point2(p);
                format!("{:.2},{:.2}", s.x, s.y)
            })
            .collect();
        _ = writeln!(
            out,
            r#"<polygon points="{}" fill="none" stroke="{}" stroke-width="{:.3}"/>"#,
            points.join(" "),
            stroke.color,
            stroke.stroke_width * frame.view.zoom
        );
    }
    out.push_str("</svg>\n");
    out
}
