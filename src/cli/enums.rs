//! CLI enum types for platform, mode, niche, and aspect ratio options.

use clap::ValueEnum;

use crate::planner::{AspectRatio, Niche, Platform};

/// Target video platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum PlatformArg {
    #[default]
    Kling,
    Veo,
    Luma,
    Hailuo,
}

impl From<PlatformArg> for Platform {
    fn from(p: PlatformArg) -> Self {
        match p {
            PlatformArg::Kling => Platform::Kling,
            PlatformArg::Veo => Platform::Veo,
            PlatformArg::Luma => Platform::Luma,
            PlatformArg::Hailuo => Platform::Hailuo,
        }
    }
}

/// Generation mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum ModeArg {
    /// Vary camera movement per prompt.
    #[default]
    Creative,
    /// Repeat one marketing angle across the batch.
    Affiliate,
}

/// Content niche for creative mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum NicheArg {
    #[default]
    Cinematic,
    Vlog,
    Product,
}

impl From<NicheArg> for Niche {
    fn from(n: NicheArg) -> Self {
        match n {
            NicheArg::Cinematic => Niche::CinematicTravel,
            NicheArg::Vlog => Niche::VlogPovAction,
            NicheArg::Product => Niche::ProductFoodShowcase,
        }
    }
}

/// Aspect ratio for platforms that take it in the prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum RatioArg {
    #[default]
    Vertical,
    Landscape,
}

impl From<RatioArg> for AspectRatio {
    fn from(r: RatioArg) -> Self {
        match r {
            RatioArg::Vertical => AspectRatio::Vertical,
            RatioArg::Landscape => AspectRatio::Landscape,
        }
    }
}
