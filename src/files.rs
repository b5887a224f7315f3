//! Everything that touches the filesystem: decoding and encoding images,
//! reading and writing coordinate maps, naming output files.

use std::{
    fs::File,
    io::{self, BufReader, BufWriter, Read, Write},
    path::{Path, PathBuf},
};

use image::{ImageFormat, RgbaImage};

use crate::{
    error::{Error, Result},
    mapper::CoordinateMap,
};

pub const MAP_EXTENSION: &str = "json";
pub const IMAGE_EXTENSION: &str = "png";

/// Longest magic number `image::guess_format` looks at
const SNIFF_LEN: u64 = 64;

fn sniff(path: &Path) -> io::Result<Option<ImageFormat>> {
    let mut header = Vec::with_capacity(SNIFF_LEN as usize);
    File::open(path)?.take(SNIFF_LEN).read_to_end(&mut header)?;
    return Ok(image::guess_format(&header).ok());
}

/// True if the file's contents (not its name) look like an image format we
/// can decode. Unreadable files count as not an image.
pub fn is_raster(path: &Path) -> bool {
    return matches!(sniff(path), Ok(Some(_)));
}

/// Decode by content, whatever the extension says
pub fn load_rgba(path: &Path) -> Result<RgbaImage> {
    let image = image::io::Reader::new(BufReader::new(File::open(path)?))
        .with_guessed_format()?
        .decode()?
        .to_rgba8();
    log::debug!("loaded {} ({}x{})", path.display(), image.width(), image.height());
    return Ok(image);
}

/// Save with the format implied by the path's extension
pub fn save_image(image: &RgbaImage, path: &Path) -> Result<()> {
    image.save(path)?;
    log::debug!("wrote {}", path.display());
    return Ok(());
}

pub fn read_map(path: &Path) -> Result<CoordinateMap> {
    let reader = BufReader::new(File::open(path)?);
    return Ok(serde_json::from_reader(reader)?);
}

/// Write `map` as compact JSON
pub fn write_map(map: &CoordinateMap, path: &Path) -> Result<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    serde_json::to_writer(&mut writer, map)?;
    writer.flush()?;
    log::debug!("wrote {}", path.display());
    return Ok(());
}

/// `<dir>/<stem of source>.<extension>`
pub fn output_path(source: &Path, dir: &Path, extension: &str) -> Result<PathBuf> {
    let mut name = source
        .file_stem()
        .ok_or_else(|| Error::MissingFileStem(source.to_path_buf()))?
        .to_os_string();
    name.push(".");
    name.push(extension);
    return Ok(dir.join(name));
}
