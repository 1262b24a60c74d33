//! File output for headless renders and point clouds.

use anyhow::{Context, Result};
use bulb_core::{PointCloud, RenderedImage};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

pub fn save_png(image: &RenderedImage, path: &Path) -> Result<()> {
    let img: image::RgbaImage =
        image::ImageBuffer::from_raw(image.width, image.height, image.pixels.clone())
            .context("Failed to create image buffer")?;
    img.save(path)
        .with_context(|| format!("Failed to save PNG to {}", path.display()))?;
    Ok(())
}

/// ASCII PLY with per-vertex colour and the extra `w` coordinate as a custom property.
pub fn write_ply<W: Write>(cloud: &PointCloud, out: &mut W) -> io::Result<()> {
    writeln!(out, "ply")?;
    writeln!(out, "format ascii 1.0")?;
    writeln!(out, "comment mandelbulb point cloud")?;
    writeln!(out, "element vertex {}", cloud.points.len())?;
    writeln!(out, "property float x")?;
    writeln!(out, "property float y")?;
    writeln!(out, "property float z")?;
    writeln!(out, "property float w")?;
    writeln!(out, "property uchar red")?;
    writeln!(out, "property uchar green")?;
    writeln!(out, "property uchar blue")?;
    writeln!(out, "end_header")?;
    for p in &cloud.points {
        let [r, g, b] = p.color;
        writeln!(
            out,
            "{} {} {} {} {} {} {}",
            p.position.x, p.position.y, p.position.z, p.w, r, g, b
        )?;
    }
    Ok(())
}

pub fn save_ply(cloud: &PointCloud, path: &Path) -> Result<()> {
    let file =
        File::create(path).with_context(|| format!("Failed to create {}", path.display()))?;
    let mut out = BufWriter::new(file);
    write_ply(cloud, &mut out).context("Failed to write PLY")?;
    out.flush().context("Failed to flush PLY")?;
    Ok(())
}
