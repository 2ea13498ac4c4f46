use std::path::PathBuf;

use anyhow::{Context, Result};
use stylus_engine::{Bitmap, Canvas, Color, ImageInfo};

use crate::cases::{Case, DrawingType, Fixtures, Frame, CASES};
use crate::clock::{Stopwatch, Timing};
use crate::config::BenchConfig;
use crate::output;

#[derive(Debug)]
pub struct CaseReport {
    pub case: &'static str,
    pub drawing: DrawingType,
    pub timing: Timing,
    pub output: Option<PathBuf>,
}

/// Runs every selected case once per drawing type.
pub fn run_all(config: &BenchConfig, drawing: &[DrawingType]) -> Result<Vec<CaseReport>> {
    let fixtures = Fixtures::new().context("building fixtures")?;
    let selected: Vec<&Case> = CASES.iter().filter(|c| config.matches(c.name)).collect();
    if selected.is_empty() {
        log::warn!("no case matches filter {:?}", config.case_filter);
    }

    let mut reports = Vec::with_capacity(selected.len() * drawing.len());
    for case in selected {
        for &dt in drawing {
            reports.push(run_case(config, &fixtures, case, dt).with_context(|| format!("case {} [{dt}]", case.name))?);
        }
    }
    Ok(reports)
}

pub fn run_case(config: &BenchConfig, fixtures: &Fixtures, case: &Case, drawing: DrawingType) -> Result<CaseReport> {
    let bitmap = Bitmap::new(ImageInfo::rgba_premul(config.width, config.height))?;
    let mut canvas = Canvas::with_config(config.raster_config()?)?;
    canvas.bind(&bitmap);
    canvas.draw_color(Color::from_u32(config.background))?;

    if drawing.uses_pen() {
        canvas.attach_pen(&config.style.pen()?);
    }
    if drawing.uses_brush() {
        canvas.attach_brush(&config.style.brush()?);
    }

    log::debug!("{} [{drawing}] start, {} iterations", case.name, config.iterations);
    let mut sw = Stopwatch::start();
    for index in 0..config.iterations {
        let frame = Frame { index, width: config.width as f32, height: config.height as f32 };
        (case.run)(&mut canvas, fixtures, frame)?;
        sw.lap();
    }
    let timing = sw.finish();

    canvas.detach_pen();
    canvas.detach_brush();
    log::info!(
        "{} [{drawing}] {} calls in {:.3} ms ({:.3} us/call)",
        case.name,
        timing.laps,
        timing.total.as_secs_f64() * 1e3,
        timing.mean().as_secs_f64() * 1e6,
    );

    let output = match &config.output_dir {
        Some(dir) => {
            let stem = format!("{}_{drawing}", case.name);
            Some(output::save(&bitmap, dir, &stem, config.format, config.jpeg_quality)?)
        }
        None => None,
    };

    Ok(CaseReport { case: case.name, drawing, timing, output })
}
