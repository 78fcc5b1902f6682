//! demo - synthetic end-to-end run of the gesture tracking filter

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use image::{ImageBuffer, Rgb, RgbImage};
use imageproc::drawing::draw_filled_rect_mut;
use imageproc::rect::Rect;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::path::{Path, PathBuf};

use handtrack::{
    BoundingBox, ChannelSink, FilterConfig, GestureFilter, RegionOfInterest, ScriptedDetector,
    VideoFrame,
};

const BACKGROUND: Rgb<u8> = Rgb([24, 26, 30]);
const HAND_FILL: Rgb<u8> = Rgb([201, 168, 134]);
const DECOY_FILL: Rgb<u8> = Rgb([96, 120, 96]);

const HAND_SIZE: (u32, u32) = (28, 30);
const DECOY_SIZE: (u32, u32) = (22, 22);

#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// Number of synthetic frames to run.
    #[arg(long, default_value_t = 120)]
    frames: u32,
    /// Frame width in pixels.
    #[arg(long, default_value_t = 320)]
    width: u32,
    /// Frame height in pixels.
    #[arg(long, default_value_t = 240)]
    height: u32,
    /// Disable the overlay marker.
    #[arg(long)]
    no_display: bool,
    /// Region of interest as "x,y,width,height" (default unrestricted).
    #[arg(long)]
    roi: Option<String>,
    /// Load detectors from the configured cascade profiles instead of the
    /// scripted hand path (degrades unless built with detect-opencv).
    #[arg(long)]
    use_profiles: bool,
    /// Write the final processed frame to this PNG path.
    #[arg(long)]
    snapshot: Option<PathBuf>,
    /// Seed for decoy candidate jitter.
    #[arg(long, default_value_t = 7)]
    seed: u64,
}

/// One synthetic frame: the scripted hand, plus an occasional decoy false
/// positive the tracker should ignore.
#[derive(Clone)]
struct FramePlan {
    hand: Option<BoundingBox>,
    decoy: Option<BoundingBox>,
}

impl FramePlan {
    /// Candidate list as the detector would report it. The decoy is listed
    /// first on purpose: selection follows proximity, not list order.
    fn candidates(&self) -> Vec<BoundingBox> {
        let mut out = Vec::new();
        if let Some(decoy) = self.decoy {
            out.push(decoy);
        }
        if let Some(hand) = self.hand {
            out.push(hand);
        }
        out
    }

    fn is_dropout(&self) -> bool {
        self.hand.is_none() && self.decoy.is_none()
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();
    if args.frames == 0 {
        return Err(anyhow!("frames must be >= 1"));
    }
    if args.width == 0 || args.height == 0 {
        return Err(anyhow!("width and height must be >= 1"));
    }

    let roi = match args.roi.as_deref() {
        Some(text) => text.parse::<RegionOfInterest>()?,
        None => RegionOfInterest::UNRESTRICTED,
    };
    let config = FilterConfig {
        display: !args.no_display,
        roi,
        ..FilterConfig::default()
    };

    stage("build filter + scripted hand path");
    let mut rng = StdRng::seed_from_u64(args.seed);
    let plans = build_script(&args, &mut rng);
    let dropouts = plans.iter().filter(|plan| plan.is_dropout()).count();

    let (sink, rx) = ChannelSink::channel();
    let filter = if args.use_profiles {
        GestureFilter::from_config(config)
    } else {
        GestureFilter::new(config)
            .with_fist_detector(ScriptedDetector::new(plans.iter().map(FramePlan::candidates)))
    };
    let mut filter = filter.with_sink(sink);
    filter.setup(args.width, args.height)?;

    stage("process frames");
    let mut tracked = 0u32;
    let mut last_frame: Option<VideoFrame> = None;
    for plan in &plans {
        let mut frame = VideoFrame::new(args.width, args.height)?;
        paint_frame(&mut frame, plan)?;
        if filter.process_frame(&mut frame)?.is_some() {
            tracked += 1;
        }
        last_frame = Some(frame);
    }

    let events: Vec<_> = rx.try_iter().collect();

    if let Some(path) = &args.snapshot {
        let frame = last_frame.ok_or_else(|| anyhow!("no frames processed"))?;
        save_snapshot(frame, path)?;
        stage(&format!("snapshot written to {}", path.display()));
    }

    println!("demo summary:");
    println!("  frames processed: {}", plans.len());
    println!("  detector dropout frames: {}", dropouts);
    println!("  operational: {}", filter.is_operational());
    println!("  targets tracked: {}", tracked);
    println!("  events emitted: {}", events.len());
    if filter.config().roi.is_unrestricted() {
        println!("  roi: unrestricted");
    } else {
        let roi = filter.config().roi;
        println!("  roi: {},{},{},{}", roi.x, roi.y, roi.width, roi.height);
    }
    if let Some(event) = events.last() {
        println!(
            "  last event: {} at ({}, {}) size {}x{}",
            event.gesture.as_str(),
            event.x,
            event.y,
            event.width,
            event.height
        );
    }
    println!("next steps:");
    println!("  RUST_LOG=debug cargo run --bin demo -- --roi 50,50,100,100");
    println!("  cargo run --bin demo -- --snapshot demo.png");
    Ok(())
}

fn stage(msg: &str) {
    eprintln!("demo: {}", msg);
}

/// Hand sweeps the frame on a bounce path; a decoy pops up on every fifth
/// frame on the far side; periodic short dropouts simulate detector misses.
fn build_script(args: &Args, rng: &mut StdRng) -> Vec<FramePlan> {
    let (hand_w, hand_h) = HAND_SIZE;
    let (decoy_w, decoy_h) = DECOY_SIZE;
    let span_x = args.width.saturating_sub(hand_w);
    let span_y = args.height.saturating_sub(hand_h);
    let decoy_span_x = args.width.saturating_sub(decoy_w);
    let decoy_span_y = args.height.saturating_sub(decoy_h);

    let mut plans = Vec::with_capacity(args.frames as usize);
    for i in 0..args.frames {
        if i > 0 && i % 37 < 4 {
            plans.push(FramePlan {
                hand: None,
                decoy: None,
            });
            continue;
        }

        let x = bounce(span_x, 20 + 2 * u64::from(i));
        let y = bounce(span_y, 30 + u64::from(i));
        let hand = BoundingBox::new(x, y, hand_w, hand_h);

        let decoy = (i % 5 == 0).then(|| {
            let dx = (decoy_span_x - bounce(decoy_span_x, u64::from(x)))
                .saturating_add(rng.gen_range(0..8));
            let dy = (decoy_span_y - bounce(decoy_span_y, u64::from(y)))
                .saturating_add(rng.gen_range(0..8));
            BoundingBox::new(dx.min(decoy_span_x), dy.min(decoy_span_y), decoy_w, decoy_h)
        });

        plans.push(FramePlan {
            hand: Some(hand),
            decoy,
        });
    }
    plans
}

/// Triangle-wave position: sweeps 0..=span and back.
fn bounce(span: u32, pos: u64) -> u32 {
    if span == 0 {
        return 0;
    }
    let span = u64::from(span);
    let cycle = pos % (2 * span);
    let out = if cycle < span { cycle } else { 2 * span - cycle };
    out as u32
}

fn paint_frame(frame: &mut VideoFrame, plan: &FramePlan) -> Result<()> {
    let (width, height) = (frame.width, frame.height);
    let mut canvas = ImageBuffer::<Rgb<u8>, &mut [u8]>::from_raw(width, height, frame.as_rgb_mut())
        .ok_or_else(|| anyhow!("frame buffer length mismatch"))?;
    draw_filled_rect_mut(
        &mut canvas,
        Rect::at(0, 0).of_size(width, height),
        BACKGROUND,
    );
    if let Some(decoy) = &plan.decoy {
        fill_box(&mut canvas, decoy, DECOY_FILL);
    }
    if let Some(hand) = &plan.hand {
        fill_box(&mut canvas, hand, HAND_FILL);
    }
    Ok(())
}

fn fill_box(canvas: &mut ImageBuffer<Rgb<u8>, &mut [u8]>, rect: &BoundingBox, color: Rgb<u8>) {
    if rect.width == 0 || rect.height == 0 {
        return;
    }
    draw_filled_rect_mut(
        canvas,
        Rect::at(rect.x as i32, rect.y as i32).of_size(rect.width, rect.height),
        color,
    );
}

fn save_snapshot(frame: VideoFrame, path: &Path) -> Result<()> {
    let (width, height) = (frame.width, frame.height);
    let image: RgbImage = RgbImage::from_raw(width, height, frame.into_rgb())
        .ok_or_else(|| anyhow!("frame buffer length mismatch"))?;
    image
        .save(path)
        .with_context(|| format!("writing snapshot to {}", path.display()))?;
    Ok(())
}
