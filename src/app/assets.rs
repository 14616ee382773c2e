//! Texture loading
//!
//! Every image the game draws is decoded up front. A missing or broken file
//! is a startup error, there is no fallback art.

use std::path::{Path, PathBuf};

use enum_map::EnumMap;
use image::RgbaImage;
use thiserror::Error;
use tracing::{debug, info};

use super::config::AssetConfig;
use crate::sim::{SpriteMetrics, TextureKey};

#[derive(Debug, Error)]
pub enum AssetError {
    #[error("asset file not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("failed to decode {}: {source}", .path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("no image files configured for {0:?}")]
    MissingFrames(TextureKey),

    #[error("frame {index} of {key:?} is {actual:?}, expected {expected:?}")]
    FrameSizeMismatch {
        key: TextureKey,
        index: usize,
        expected: [u32; 2],
        actual: [u32; 2],
    },
}

/// Decoded RGBA images, keyed by texture
pub struct AssetStore {
    frames: EnumMap<TextureKey, Vec<RgbaImage>>,
}

impl AssetStore {
    /// Loads every texture named by `config`
    pub fn load(config: &AssetConfig) -> Result<Self, AssetError> {
        let dir = config.resolved_dir();
        info!(dir = %dir.display(), "Loading assets");

        let mut frames: EnumMap<TextureKey, Vec<RgbaImage>> = EnumMap::default();
        for (key, slot) in frames.iter_mut() {
            let files = config.files(key);
            if files.is_empty() {
                return Err(AssetError::MissingFrames(key));
            }

            for file in files {
                let image = load_image(&dir.join(file))?;
                debug!(?key, file, width = image.width(), height = image.height(), "Decoded texture");
                slot.push(image);
            }
            check_frame_sizes(key, slot)?;
        }

        Ok(Self { frames })
    }

    /// Builds a store from already decoded images
    pub fn from_frames(frames: EnumMap<TextureKey, Vec<RgbaImage>>) -> Result<Self, AssetError> {
        for (key, images) in frames.iter() {
            if images.is_empty() {
                return Err(AssetError::MissingFrames(key));
            }
            check_frame_sizes(key, images)?;
        }
        Ok(Self { frames })
    }

    /// Animation frames of `key`, never empty
    pub fn frames(&self, key: TextureKey) -> &[RgbaImage] {
        &self.frames[key]
    }

    /// Pixel size of `key`
    pub fn size(&self, key: TextureKey) -> [u32; 2] {
        self.frames[key]
            .first()
            .map(|image| [image.width(), image.height()])
            .unwrap_or([0, 0])
    }

    /// Texture sizes as the simulation sees them
    pub fn metrics(&self) -> SpriteMetrics {
        let sizes = EnumMap::from_fn(|key| {
            let [w, h] = self.size(key);
            [w as f32, h as f32]
        });
        SpriteMetrics::new(sizes, self.frames[TextureKey::Player].len())
    }

    pub fn texture_count(&self) -> usize {
        self.frames.values().map(Vec::len).sum()
    }
}

fn load_image(path: &Path) -> Result<RgbaImage, AssetError> {
    if !path.exists() {
        return Err(AssetError::NotFound(path.to_path_buf()));
    }
    let image = image::open(path).map_err(|source| AssetError::Decode {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(image.to_rgba8())
}

fn check_frame_sizes(key: TextureKey, images: &[RgbaImage]) -> Result<(), AssetError> {
    let Some(first) = images.first() else {
        return Err(AssetError::MissingFrames(key));
    };
    let expected = [first.width(), first.height()];
    for (index, image) in images.iter().enumerate().skip(1) {
        let actual = [image.width(), image.height()];
        if actual != expected {
            return Err(AssetError::FrameSizeMismatch {
                key,
                index,
                expected,
                actual,
            });
        }
    }
    Ok(())
}
