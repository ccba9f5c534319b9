//! Binary PPM (`P6`) output.
//!
//! Every `i32` pixel contributes its first three bytes in memory order as
//! R, G and B. Rows are flipped vertically, so source row `height - 1`
//! becomes the first row of the file. A single `\n` follows the pixel data.

use std::{
    fs::File,
    io::{self, BufWriter, Write},
    path::Path,
};

pub fn header(width: usize, height: usize) -> String {
    format!("P6\n{width} {height}\n255\n")
}

/// Exact number of bytes [`write_ppm`] produces.
pub fn encoded_len(width: usize, height: usize) -> usize {
    header(width, height).len() + 3 * width * height + 1
}

pub fn write_ppm<W: Write>(out: &mut W, width: usize, height: usize, pixels: &[i32]) -> io::Result<()> {
    if pixels.len() != width * height {
        return Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("{} pixels for a {width}x{height} image", pixels.len()),
        ));
    }

    out.write_all(header(width, height).as_bytes())?;

    let mut row_out = vec![0_u8; 3 * width];
    if width > 0 {
        for row in pixels.chunks_exact(width).rev() {
            let bytes: &[u8] = bytemuck::cast_slice(row);
            for (dst, src) in row_out.chunks_exact_mut(3).zip(bytes.chunks_exact(4)) {
                dst.copy_from_slice(&src[..3]);
            }
            out.write_all(&row_out)?;
        }
    }

    out.write_all(b"\n")
}

pub fn save_ppm(path: impl AsRef<Path>, width: usize, height: usize, pixels: &[i32]) -> io::Result<()> {
    let path = path.as_ref();
    let mut file = BufWriter::new(File::create(path)?);
    write_ppm(&mut file, width, height, pixels)?;
    file.flush()?;
    log::debug!("wrote {}x{} image to {}", width, height, path.display());
    Ok(())
}
