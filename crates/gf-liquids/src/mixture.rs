//! Flow-weighted liquid mixtures.

use crate::error::{LiquidError, LiquidResult};
use crate::liquid::Liquid;
use gf_core::numeric::{Tolerances, nearly_equal};

/// Weights below this fraction are dropped as negligible.
const NEGLIGIBLE_FRACTION: f64 = 1e-12;

/// A mixture of liquids defined by normalized volume fractions.
///
/// Fractions always sum to 1.0. Blending is the flow-weighted average of
/// constituent fractions; liquids are never destroyed, only diluted.
#[derive(Debug, Clone, PartialEq)]
pub struct Mixture {
    /// Liquids and their volume fractions, in first-seen order.
    items: Vec<(Liquid, f64)>,
}

impl Mixture {
    /// A single-liquid mixture.
    pub fn pure(liquid: Liquid) -> Self {
        Self {
            items: vec![(liquid, 1.0)],
        }
    }

    /// Create a mixture from raw volume weights.
    ///
    /// Validates that all weights are finite, non-negative, and have a
    /// positive sum, merges duplicate liquids, then normalizes to sum=1.
    pub fn from_weights(weights: Vec<(Liquid, f64)>) -> LiquidResult<Self> {
        if weights.is_empty() {
            return Err(LiquidError::InvalidArg {
                what: "empty mixture",
            });
        }

        let mut sum = 0.0;
        for (_, w) in &weights {
            if !w.is_finite() {
                return Err(LiquidError::NonPhysical {
                    what: "non-finite mixture weight",
                });
            }
            if *w < 0.0 {
                return Err(LiquidError::NonPhysical {
                    what: "negative mixture weight",
                });
            }
            sum += w;
        }

        if sum <= 0.0 || !sum.is_finite() {
            return Err(LiquidError::NonPhysical {
                what: "mixture weights sum to zero or non-finite",
            });
        }

        // Merge duplicates, keep first-seen order for determinism.
        let mut items: Vec<(Liquid, f64)> = Vec::new();
        for (liquid, w) in weights {
            let frac = w / sum;
            match items.iter_mut().find(|(l, _)| *l == liquid) {
                Some((_, existing)) => *existing += frac,
                None => items.push((liquid, frac)),
            }
        }
        items.retain(|(_, f)| *f > NEGLIGIBLE_FRACTION);

        if items.is_empty() {
            return Err(LiquidError::NonPhysical {
                what: "all mixture weights negligible",
            });
        }

        Ok(Self { items })
    }

    /// Flow-weighted blend of several mixtures.
    ///
    /// Returns `None` when the total weight is not positive: an edge with
    /// zero flow carries no liquid.
    pub fn blend<'a>(parts: impl IntoIterator<Item = (f64, &'a Mixture)>) -> Option<Mixture> {
        let mut weights: Vec<(Liquid, f64)> = Vec::new();
        for (flow, mixture) in parts {
            if !(flow > 0.0) || !flow.is_finite() {
                continue;
            }
            for (liquid, frac) in mixture.iter() {
                match weights.iter_mut().find(|(l, _)| *l == liquid) {
                    Some((_, w)) => *w += flow * frac,
                    None => weights.push((liquid, flow * frac)),
                }
            }
        }
        Mixture::from_weights(weights).ok()
    }

    /// Volume fraction of a liquid (0.0 if not present).
    pub fn fraction(&self, liquid: Liquid) -> f64 {
        self.items
            .iter()
            .find(|(l, _)| *l == liquid)
            .map(|(_, f)| *f)
            .unwrap_or(0.0)
    }

    /// `Some(liquid)` when exactly one liquid has fraction ≈1.0.
    pub fn as_pure(&self) -> Option<Liquid> {
        if self.items.len() == 1 {
            let (liquid, frac) = self.items[0];
            let tol = Tolerances {
                abs: 1e-10,
                rel: 1e-10,
            };
            if nearly_equal(frac, 1.0, tol) {
                return Some(liquid);
            }
        }
        None
    }

    /// Iterate over all liquids with non-negligible fractions.
    pub fn iter(&self) -> impl Iterator<Item = (Liquid, f64)> + '_ {
        self.items.iter().copied()
    }

    /// Fraction-wise approximate equality (used by iterative resolvers to
    /// detect a fixed point).
    pub fn nearly_same(&self, other: &Mixture, tol: Tolerances) -> bool {
        let all_liquids = self.items.iter().chain(&other.items).map(|(l, _)| *l);
        for liquid in all_liquids {
            if !nearly_equal(self.fraction(liquid), other.fraction(liquid), tol) {
                return false;
            }
        }
        true
    }

    /// Fraction-weighted average color for rendering the mixture.
    pub fn display_color(&self) -> Liquid {
        let mut acc = [0.0_f64; 3];
        for (liquid, frac) in self.iter() {
            let rgb = liquid.rgb();
            for (channel, value) in acc.iter_mut().zip(rgb) {
                *channel += frac * value as f64;
            }
        }
        Liquid::from_rgb(
            acc[0].round() as u8,
            acc[1].round() as u8,
            acc[2].round() as u8,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::liquid::{BEER, COLD_WATER, HOT_WATER, WORT};

    #[test]
    fn pure_mixture() {
        let mix = Mixture::pure(WORT);
        assert_eq!(mix.as_pure(), Some(WORT));
        assert_eq!(mix.fraction(WORT), 1.0);
        assert_eq!(mix.fraction(BEER), 0.0);
    }

    #[test]
    fn weights_normalize() {
        let mix =
            Mixture::from_weights(vec![(COLD_WATER, 2.0), (HOT_WATER, 8.0)]).unwrap();
        let tol = Tolerances::default();
        assert!(nearly_equal(mix.fraction(COLD_WATER), 0.2, tol));
        assert!(nearly_equal(mix.fraction(HOT_WATER), 0.8, tol));
        assert_eq!(mix.as_pure(), None);
    }

    #[test]
    fn duplicates_merge() {
        let mix = Mixture::from_weights(vec![
            (COLD_WATER, 1.0),
            (HOT_WATER, 1.0),
            (COLD_WATER, 2.0),
        ])
        .unwrap();
        let tol = Tolerances::default();
        assert!(nearly_equal(mix.fraction(COLD_WATER), 0.75, tol));
        assert_eq!(mix.iter().count(), 2);
    }

    #[test]
    fn blend_is_flow_weighted() {
        let a = Mixture::pure(COLD_WATER);
        let b = Mixture::pure(HOT_WATER);
        let mixed = Mixture::blend([(6.0, &a), (4.0, &b)]).unwrap();
        let tol = Tolerances::default();
        assert!(nearly_equal(mixed.fraction(COLD_WATER), 0.6, tol));
        assert!(nearly_equal(mixed.fraction(HOT_WATER), 0.4, tol));
    }

    #[test]
    fn blend_ignores_zero_flow() {
        let a = Mixture::pure(COLD_WATER);
        let b = Mixture::pure(HOT_WATER);
        let mixed = Mixture::blend([(5.0, &a), (0.0, &b)]).unwrap();
        assert_eq!(mixed.as_pure(), Some(COLD_WATER));
    }

    #[test]
    fn blend_of_nothing_is_none() {
        let a = Mixture::pure(COLD_WATER);
        assert!(Mixture::blend([(0.0, &a)]).is_none());
        assert!(Mixture::blend(std::iter::empty::<(f64, &Mixture)>()).is_none());
    }

    #[test]
    fn invalid_weights_rejected() {
        assert!(Mixture::from_weights(vec![]).is_err());
        assert!(Mixture::from_weights(vec![(BEER, -1.0)]).is_err());
        assert!(Mixture::from_weights(vec![(BEER, f64::NAN)]).is_err());
        assert!(Mixture::from_weights(vec![(BEER, 0.0)]).is_err());
    }

    #[test]
    fn display_color_averages_channels() {
        let black = Liquid::from_rgb(0, 0, 0);
        let white = Liquid::from_rgb(255, 255, 255);
        let mix = Mixture::from_weights(vec![(black, 1.0), (white, 1.0)]).unwrap();
        assert_eq!(mix.display_color(), Liquid::from_rgb(128, 128, 128));
    }
}
