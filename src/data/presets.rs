//! Demo Presets Module
//! Synthetic instrument-like curves for trying out the chart.
//!
//! Each generator has an argument-free form using the thread RNG and a
//! `*_with` form that takes any `Rng` (seedable in tests).

use super::dataset::Point;
use rand::Rng;

/// Generated demo data with its default labels.
#[derive(Debug, Clone, PartialEq)]
pub struct Preset {
    pub points: Vec<Point>,
    pub x_label: &'static str,
    pub y_label: &'static str,
    pub title: &'static str,
    /// Value written into the report's instrument field on load.
    pub instrument: &'static str,
}

/// The four built-in generators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PresetKind {
    Hplc,
    UvVis,
    Titration,
    Dissolution,
}

impl PresetKind {
    pub const ALL: [PresetKind; 4] = [
        PresetKind::Hplc,
        PresetKind::UvVis,
        PresetKind::Titration,
        PresetKind::Dissolution,
    ];

    /// Button label.
    pub fn label(&self) -> &'static str {
        match self {
            PresetKind::Hplc => "HPLC Chromatogram",
            PresetKind::UvVis => "UV–Vis Spectrum",
            PresetKind::Titration => "Titration Curve",
            PresetKind::Dissolution => "Dissolution Profile",
        }
    }

    /// Generate with the thread-local RNG.
    pub fn generate(&self) -> Preset {
        match self {
            PresetKind::Hplc => hplc_chromatogram(),
            PresetKind::UvVis => uv_vis_spectrum(),
            PresetKind::Titration => titration_curve(),
            PresetKind::Dissolution => dissolution_profile(),
        }
    }

    pub fn generate_with<R: Rng + ?Sized>(&self, rng: &mut R) -> Preset {
        match self {
            PresetKind::Hplc => hplc_chromatogram_with(rng),
            PresetKind::UvVis => uv_vis_spectrum_with(rng),
            PresetKind::Titration => titration_curve_with(rng),
            PresetKind::Dissolution => dissolution_profile_with(rng),
        }
    }
}

/// Gaussian peak of height `amp` centred on `mu`.
pub fn gauss(x: f64, mu: f64, sigma: f64, amp: f64) -> f64 {
    let exponent = -((x - mu).powi(2)) / (2.0 * sigma * sigma);
    amp * exponent.exp()
}

fn round_to(value: f64, digits: i32) -> f64 {
    let factor = 10f64.powi(digits);
    (value * factor).round() / factor
}

/// Sample positions `start, start + step, ..., end` computed by index.
fn sample_positions(start: f64, end: f64, step: f64) -> impl Iterator<Item = f64> {
    let count = ((end - start) / step + 1e-9).floor() as usize + 1;
    (0..count).map(move |i| start + i as f64 * step)
}

/// Centered noise in `[-amplitude / 2, amplitude / 2)`.
fn noise<R: Rng + ?Sized>(rng: &mut R, amplitude: f64) -> f64 {
    (rng.random::<f64>() - 0.5) * amplitude
}

pub fn hplc_chromatogram() -> Preset {
    hplc_chromatogram_with(&mut rand::rng())
}

pub fn hplc_chromatogram_with<R: Rng + ?Sized>(rng: &mut R) -> Preset {
    // (center, width, height)
    const PEAKS: [(f64, f64, f64); 3] = [(1.2, 0.05, 80.0), (2.8, 0.08, 120.0), (4.5, 0.09, 60.0)];

    let points = sample_positions(0.0, 6.0, 0.01)
        .map(|x| {
            let baseline = 2.0 + rng.random::<f64>();
            let y = PEAKS
                .iter()
                .fold(baseline, |sum, &(mu, sigma, amp)| sum + gauss(x, mu, sigma, amp));
            Point::new(round_to(x, 2), round_to(y, 2))
        })
        .collect();

    Preset {
        points,
        x_label: "Time (min)",
        y_label: "Signal (mAU)",
        title: "HPLC Chromatogram",
        instrument: "HPLC",
    }
}

pub fn uv_vis_spectrum() -> Preset {
    uv_vis_spectrum_with(&mut rand::rng())
}

pub fn uv_vis_spectrum_with<R: Rng + ?Sized>(rng: &mut R) -> Preset {
    let points = sample_positions(190.0, 800.0, 2.0)
        .map(|x| {
            let bands = gauss(x, 262.0, 18.0, 1.0) + gauss(x, 340.0, 25.0, 0.6);
            let y = (bands + noise(rng, 0.005)).max(0.0);
            Point::new(x, round_to(y, 3))
        })
        .collect();

    Preset {
        points,
        x_label: "Wavelength (nm)",
        y_label: "Absorbance (AU)",
        title: "UV–Vis Spectrum",
        instrument: "UV–Vis",
    }
}

pub fn titration_curve() -> Preset {
    titration_curve_with(&mut rand::rng())
}

pub fn titration_curve_with<R: Rng + ?Sized>(rng: &mut R) -> Preset {
    let logistic = |v: f64, mid: f64| 1.0 / (1.0 + (-(v - mid) / 1.5).exp());

    let points = sample_positions(0.0, 50.0, 0.5)
        .map(|v| {
            let ph = 3.0 + 4.0 * logistic(v, 20.0) + 5.0 * logistic(v, 30.0);
            Point::new(round_to(v, 2), round_to(ph + noise(rng, 0.05), 2))
        })
        .collect();

    Preset {
        points,
        x_label: "Volume base added (mL)",
        y_label: "pH",
        title: "Titration Curve",
        instrument: "Titration",
    }
}

pub fn dissolution_profile() -> Preset {
    dissolution_profile_with(&mut rand::rng())
}

pub fn dissolution_profile_with<R: Rng + ?Sized>(rng: &mut R) -> Preset {
    let points = sample_positions(0.0, 120.0, 5.0)
        .map(|t| {
            let released = 100.0 * (1.0 - (-t / 35.0).exp()) + noise(rng, 2.0);
            Point::new(t, round_to(released.clamp(0.0, 100.0), 1))
        })
        .collect();

    Preset {
        points,
        x_label: "Time (min)",
        y_label: "% Release",
        title: "Dissolution Profile",
        instrument: "Dissolution",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn unseeded_generate_matches_kind() {
        for kind in PresetKind::ALL {
            let preset = kind.generate();
            let seeded = kind.generate_with(&mut rng());
            assert_eq!(preset.title, seeded.title);
            assert_eq!(preset.instrument, seeded.instrument);
            assert_eq!(preset.points.len(), seeded.points.len());
        }
    }
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn rng() -> StdRng {
        StdRng::seed_from_u64(7)
    }

    #[test]
    fn gauss_peaks_at_center() {
        assert_relative_eq!(gauss(2.8, 2.8, 0.08, 120.0), 120.0);
        assert!(gauss(3.8, 2.8, 0.08, 120.0) < 1e-6);
    }

    #[test]
    fn sample_counts_match_ranges() {
        assert_eq!(hplc_chromatogram_with(&mut rng()).points.len(), 601);
        assert_eq!(uv_vis_spectrum_with(&mut rng()).points.len(), 306);
        assert_eq!(titration_curve_with(&mut rng()).points.len(), 101);
        assert_eq!(dissolution_profile_with(&mut rng()).points.len(), 25);
    }

    #[test]
    fn hplc_x_is_rounded_and_increasing() {
        let preset = hplc_chromatogram_with(&mut rng());
        assert_eq!(preset.points.last().map(|p| p.x), Some(6.0));
        assert!(preset.points.windows(2).all(|w| w[0].x < w[1].x));
        // Tallest peak sits near 2.8 min.
        let top = preset
            .points
            .iter()
            .max_by(|a, b| a.y.total_cmp(&b.y))
            .unwrap();
        assert_relative_eq!(top.x, 2.8, epsilon = 0.02);
    }

    #[test]
    fn spectrum_is_non_negative() {
        let preset = uv_vis_spectrum_with(&mut rng());
        assert!(preset.points.iter().all(|p| p.y >= 0.0));
        assert_eq!(preset.points[0].x, 190.0);
        assert_eq!(preset.points.last().unwrap().x, 800.0);
    }

    #[test]
    fn titration_spans_expected_ph() {
        let preset = titration_curve_with(&mut rng());
        assert_relative_eq!(preset.points[0].y, 3.0, epsilon = 0.1);
        assert_relative_eq!(preset.points.last().unwrap().y, 12.0, epsilon = 0.1);
    }

    #[test]
    fn dissolution_is_clamped_percent() {
        let preset = dissolution_profile_with(&mut rng());
        assert!(preset.points.iter().all(|p| (0.0..=100.0).contains(&p.y)));
        assert!(preset.points[0].y <= 1.0);
        assert!(preset.points.last().unwrap().y > 95.0);
    }

    #[test]
    fn kinds_carry_instrument_names() {
        let names: Vec<&str> = PresetKind::ALL
            .iter()
            .map(|k| k.generate_with(&mut rng()).instrument)
            .collect();
        assert_eq!(names, vec!["HPLC", "UV–Vis", "Titration", "Dissolution"]);
    }
}
