//! Batch planning: expands one operator request into per-prompt tasks.

use rand::seq::SliceRandom;
use rand::Rng;

/// Target video platform a prompt is written for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    Kling,
    Veo,
    Luma,
    Hailuo,
}

impl Platform {
    /// Human-readable platform name, used in headers and summaries.
    pub fn display_name(&self) -> &'static str {
        match self {
            Platform::Kling => "Kling AI",
            Platform::Veo => "Google Veo (VideoFX)",
            Platform::Luma => "Luma Dream Machine",
            Platform::Hailuo => "Hailuo / MiniMax",
        }
    }
}

/// Content niche selecting the camera-movement catalog in creative mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Niche {
    CinematicTravel,
    VlogPovAction,
    ProductFoodShowcase,
}

impl Niche {
    /// The fixed camera-movement catalog for this niche.
    pub fn movement_catalog(&self) -> &'static [&'static str] {
        match self {
            Niche::CinematicTravel => MOVES_CINEMATIC,
            Niche::VlogPovAction => MOVES_DYNAMIC,
            Niche::ProductFoodShowcase => MOVES_PRODUCT,
        }
    }
}

const MOVES_CINEMATIC: &[&str] = &[
    "Slow Dolly In",
    "Truck Left/Right",
    "Low Angle Tracking",
    "Orbit / Arc Shot",
    "Rack Focus",
    "Static Tripod",
];

const MOVES_DYNAMIC: &[&str] = &[
    "Handheld Shake (POV)",
    "Fast Zoom In",
    "Whip Pan",
    "Crash Zoom",
    "Drone FPV Fly-through",
    "GoPro Fish Eye",
];

const MOVES_PRODUCT: &[&str] = &[
    "360 Rotation",
    "Slow Pan Up (Reveal)",
    "Macro Focus Shift",
    "Top Down Slider",
    "Lighting Change",
];

/// Aspect ratio syntax for platforms that take it in the prompt (Kling).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AspectRatio {
    #[default]
    Vertical,
    Landscape,
}

impl AspectRatio {
    pub fn flag(&self) -> &'static str {
        match self {
            AspectRatio::Vertical => "--ar 9:16",
            AspectRatio::Landscape => "--ar 16:9",
        }
    }
}

/// Generation mode, fixing the variation axis for the batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mode {
    /// Vary camera movement, drawn from the niche's catalog.
    Creative { niche: Niche },
    /// One marketing angle repeated across the batch.
    Affiliate { angle: String },
}

/// One operator-submitted batch request. Quantity is bounded to [1, 10] by
/// the CLI layer before it reaches the planner.
#[derive(Debug, Clone)]
pub struct BatchRequest {
    pub mode: Mode,
    pub subject: String,
    pub platform: Platform,
    pub quantity: usize,
    pub aspect_ratio: AspectRatio,
    pub i2v: bool,
    pub use_negative: bool,
}

/// One planned unit of generation work. Immutable once planned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Task {
    pub index: usize,
    /// Variation label: a camera movement or a marketing angle.
    pub label: String,
    pub subject: String,
    pub platform: Platform,
    pub aspect_ratio: AspectRatio,
    pub i2v: bool,
    pub use_negative: bool,
}

/// Expand a batch request into exactly `quantity` tasks in index order.
pub fn plan(request: &BatchRequest) -> Vec<Task> {
    plan_with_rng(request, &mut rand::thread_rng())
}

/// Like `plan`, but with an explicit RNG for deterministic tests.
pub fn plan_with_rng<R: Rng + ?Sized>(request: &BatchRequest, rng: &mut R) -> Vec<Task> {
    let labels: Vec<String> = match &request.mode {
        Mode::Creative { niche } => {
            sample_labels(niche.movement_catalog(), request.quantity, rng)
        }
        Mode::Affiliate { angle } => vec![angle.clone(); request.quantity],
    };

    labels
        .into_iter()
        .enumerate()
        .map(|(index, label)| Task {
            index,
            label,
            subject: request.subject.clone(),
            platform: request.platform,
            aspect_ratio: request.aspect_ratio,
            i2v: request.i2v,
            use_negative: request.use_negative,
        })
        .collect()
}

/// Draw `quantity` movement labels from the catalog.
///
/// At or below catalog size: sample without replacement, all labels
/// distinct. Above catalog size: sample without replacement from the
/// catalog duplicated once, so no label appears more than twice. This is a
/// soft cap, not a uniqueness guarantee.
fn sample_labels<R: Rng + ?Sized>(
    catalog: &[&str],
    quantity: usize,
    rng: &mut R,
) -> Vec<String> {
    if quantity <= catalog.len() {
        catalog
            .choose_multiple(rng, quantity)
            .map(|s| s.to_string())
            .collect()
    } else {
        let doubled: Vec<&str> = catalog.iter().chain(catalog.iter()).copied().collect();
        let take = quantity.min(doubled.len());
        doubled
            .choose_multiple(rng, take)
            .map(|s| s.to_string())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::HashMap;

    fn creative_request(niche: Niche, quantity: usize) -> BatchRequest {
        BatchRequest {
            mode: Mode::Creative { niche },
            subject: "Samurai walking in neon rain".to_string(),
            platform: Platform::Kling,
            quantity,
            aspect_ratio: AspectRatio::Vertical,
            i2v: false,
            use_negative: true,
        }
    }

    #[test]
    fn test_creative_plan_produces_quantity_tasks_in_index_order() {
        let mut rng = StdRng::seed_from_u64(7);
        let tasks = plan_with_rng(&creative_request(Niche::CinematicTravel, 5), &mut rng);
        assert_eq!(tasks.len(), 5);
        for (i, task) in tasks.iter().enumerate() {
            assert_eq!(task.index, i);
            assert_eq!(task.subject, "Samurai walking in neon rain");
        }
    }

    #[test]
    fn test_creative_labels_distinct_when_quantity_fits_catalog() {
        // 6-label catalog, quantity 5: no repeats.
        for seed in 0..20 {
            let mut rng = StdRng::seed_from_u64(seed);
            let tasks = plan_with_rng(&creative_request(Niche::CinematicTravel, 5), &mut rng);
            let mut labels: Vec<&str> = tasks.iter().map(|t| t.label.as_str()).collect();
            labels.sort_unstable();
            labels.dedup();
            assert_eq!(labels.len(), 5, "seed {} produced a repeat", seed);
        }
    }

    #[test]
    fn test_creative_oversample_caps_labels_at_twice() {
        // 5-label catalog, quantity 10: every label appears, none more than twice.
        for seed in 0..20 {
            let mut rng = StdRng::seed_from_u64(seed);
            let tasks = plan_with_rng(&creative_request(Niche::ProductFoodShowcase, 10), &mut rng);
            assert_eq!(tasks.len(), 10);

            let mut counts: HashMap<&str, usize> = HashMap::new();
            for task in &tasks {
                *counts.entry(task.label.as_str()).or_default() += 1;
            }
            assert_eq!(counts.len(), 5, "seed {}: some label missing", seed);
            assert!(counts.values().all(|&n| n <= 2), "seed {}: label over cap", seed);
        }
    }

    #[test]
    fn test_creative_labels_come_from_the_niche_catalog() {
        let mut rng = StdRng::seed_from_u64(3);
        let tasks = plan_with_rng(&creative_request(Niche::VlogPovAction, 6), &mut rng);
        for task in &tasks {
            assert!(MOVES_DYNAMIC.contains(&task.label.as_str()));
        }
    }

    #[test]
    fn test_affiliate_plan_repeats_the_angle() {
        let request = BatchRequest {
            mode: Mode::Affiliate {
                angle: "ASMR Unboxing".to_string(),
            },
            subject: "Wireless earbuds".to_string(),
            platform: Platform::Veo,
            quantity: 4,
            aspect_ratio: AspectRatio::default(),
            i2v: true,
            use_negative: false,
        };
        let mut rng = StdRng::seed_from_u64(1);
        let tasks = plan_with_rng(&request, &mut rng);

        assert_eq!(tasks.len(), 4);
        for task in &tasks {
            assert_eq!(task.label, "ASMR Unboxing");
            assert!(task.i2v);
            assert!(!task.use_negative);
        }
    }

    #[test]
    fn test_flags_identical_across_batch() {
        let mut request = creative_request(Niche::CinematicTravel, 3);
        request.i2v = true;
        let mut rng = StdRng::seed_from_u64(9);
        let tasks = plan_with_rng(&request, &mut rng);
        assert!(tasks.iter().all(|t| t.i2v && t.use_negative));
    }

    #[test]
    fn test_catalog_sizes() {
        assert_eq!(Niche::CinematicTravel.movement_catalog().len(), 6);
        assert_eq!(Niche::VlogPovAction.movement_catalog().len(), 6);
        assert_eq!(Niche::ProductFoodShowcase.movement_catalog().len(), 5);
    }

    #[test]
    fn test_aspect_ratio_flags() {
        assert_eq!(AspectRatio::Vertical.flag(), "--ar 9:16");
        assert_eq!(AspectRatio::Landscape.flag(), "--ar 16:9");
    }
}
