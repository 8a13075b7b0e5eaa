use std::path::Path;

use chrono::NaiveDateTime;
use console::Style;
use tilelapse_core::deliver::DeliveryOutcome;
use tilelapse_core::pipeline::config::TilelapseConfig;
use tilelapse_core::pipeline::{CaptureReport, TimelapseReport};
use tilelapse_core::source::Snapshot;

struct Styles {
    title: Style,
    header: Style,
    label: Style,
    value: Style,
    good: Style,
    warn: Style,
    disabled: Style,
    path: Style,
}

impl Styles {
    fn new() -> Self {
        Self {
            title: Style::new().cyan().bold(),
            header: Style::new().cyan().bold(),
            label: Style::new().dim(),
            value: Style::new().bold().white(),
            good: Style::new().green(),
            warn: Style::new().yellow(),
            disabled: Style::new().dim().yellow(),
            path: Style::new().underlined(),
        }
    }
}

fn print_title(s: &Styles, title: &str) {
    println!();
    println!("  {}", s.title.apply_to(title));
    println!("  {}", s.title.apply_to("\u{2550}".repeat(title.chars().count())));
    println!();
}

pub fn print_capture_header(config: &TilelapseConfig, now: NaiveDateTime) {
    let s = Styles::new();
    let capture = &config.capture;
    print_title(&s, "Tilelapse Capture");

    println!(
        "  {:<14}{}",
        s.label.apply_to("Time"),
        s.value.apply_to(now.format("%Y-%m-%d %H:%M:%S"))
    );
    println!(
        "  {:<14}{}",
        s.label.apply_to("Origin"),
        s.value.apply_to(format!("{}/{}", capture.origin_x, capture.origin_y))
    );
    println!(
        "  {:<14}{}",
        s.label.apply_to("Grid"),
        s.value.apply_to(format!(
            "{}x{} tiles of {}x{}",
            capture.columns, capture.rows, capture.tile_width, capture.tile_height
        ))
    );
    println!(
        "  {:<14}{}",
        s.label.apply_to("Retries"),
        s.value.apply_to(capture.max_retries)
    );
    println!(
        "  {:<14}{}",
        s.label.apply_to("Output"),
        s.path.apply_to(capture.output_dir.display())
    );
    println!();
}

pub fn print_capture_report(report: &CaptureReport) {
    let s = Styles::new();

    println!("  {}", s.header.apply_to("Capture"));
    println!(
        "    {:<12}{}",
        s.label.apply_to("Tiles"),
        s.value.apply_to(&report.tiles)
    );
    for (coord, reason) in &report.decode_failures {
        println!(
            "    {:<12}{}",
            s.label.apply_to(coord),
            s.warn.apply_to(reason)
        );
    }
    println!(
        "    {:<12}{}",
        s.label.apply_to("Canvas"),
        s.value.apply_to(format!("{}x{}", report.canvas.0, report.canvas.1))
    );
    println!(
        "    {:<12}{}",
        s.label.apply_to("Snapshot"),
        s.path.apply_to(report.snapshot_path.display())
    );
    println!(
        "    {:<12}{}",
        s.label.apply_to("Latest"),
        s.path.apply_to(report.latest_path.display())
    );
    println!();
}

pub fn print_timelapse_header(config: &TilelapseConfig, date_key: &str) {
    let s = Styles::new();
    let timelapse = &config.timelapse;
    print_title(&s, "Tilelapse Timelapse");

    println!(
        "  {:<14}{}",
        s.label.apply_to("Day"),
        s.value.apply_to(date_key)
    );
    println!(
        "  {:<14}{}",
        s.label.apply_to("Frame rate"),
        s.value.apply_to(format!("{} fps", timelapse.fps))
    );
    println!(
        "  {:<14}{}",
        s.label.apply_to("Codec"),
        s.good.apply_to(&timelapse.codec)
    );
    match timelapse.sizing() {
        Ok(sizing) => println!(
            "  {:<14}{}",
            s.label.apply_to("Canvas"),
            s.value.apply_to(sizing)
        ),
        Err(e) => println!("  {:<14}{}", s.label.apply_to("Canvas"), s.warn.apply_to(e)),
    }
    if timelapse.border_thickness > 0 {
        println!(
            "  {:<14}{}",
            s.label.apply_to("Border"),
            s.value.apply_to(format!("{} px", timelapse.border_thickness))
        );
    }
    if !timelapse.overlay.enabled {
        println!(
            "  {:<14}{}",
            s.label.apply_to("Overlay"),
            s.disabled.apply_to("disabled")
        );
    }
    if !config.delivery.enabled {
        println!(
            "  {:<14}{}",
            s.label.apply_to("Delivery"),
            s.disabled.apply_to("disabled")
        );
    }
    println!();
}

pub fn print_timelapse_report(report: &TimelapseReport) {
    let s = Styles::new();

    println!("  {}", s.header.apply_to("Timelapse"));
    println!(
        "    {:<12}{}",
        s.label.apply_to("Snapshots"),
        s.value.apply_to(report.snapshots)
    );
    println!(
        "    {:<12}{}",
        s.label.apply_to("Frames"),
        s.value.apply_to(&report.encode.frames)
    );
    println!(
        "    {:<12}{}",
        s.label.apply_to("Canvas"),
        s.value.apply_to(format!("{}x{}", report.canvas.0, report.canvas.1))
    );
    println!(
        "    {:<12}{}",
        s.label.apply_to("Format"),
        s.value.apply_to(report.format)
    );
    println!(
        "    {:<12}{}",
        s.label.apply_to("Video"),
        s.path.apply_to(report.output_path.display())
    );
    println!(
        "    {:<12}{}",
        s.label.apply_to("Latest"),
        s.path.apply_to(report.latest_path.display())
    );
    let delivery = match &report.delivery {
        DeliveryOutcome::Delivered => s.good.apply_to(report.delivery.to_string()),
        DeliveryOutcome::Skipped(_) => s.disabled.apply_to(report.delivery.to_string()),
        DeliveryOutcome::Failed(_) => s.warn.apply_to(report.delivery.to_string()),
    };
    println!("    {:<12}{}", s.label.apply_to("Delivery"), delivery);
    println!();
}

pub fn print_snapshot_list(day_dir: &Path, snapshots: &[Snapshot]) {
    let s = Styles::new();
    print_title(&s, "Tilelapse Snapshots");

    println!(
        "  {:<14}{}",
        s.label.apply_to("Directory"),
        s.path.apply_to(day_dir.display())
    );
    println!(
        "  {:<14}{}",
        s.label.apply_to("Count"),
        s.value.apply_to(snapshots.len())
    );
    println!();

    for (i, snapshot) in snapshots.iter().enumerate() {
        let position = i + 1;
        let label = snapshot.label(position);
        let label = if snapshot.stamp.is_some() {
            s.value.apply_to(label)
        } else {
            s.warn.apply_to(label)
        };
        println!(
            "    {:>4}  {:<22}{}",
            s.label.apply_to(position),
            label,
            s.path.apply_to(&snapshot.file_name)
        );
    }
    if !snapshots.is_empty() {
        println!();
    }
}
