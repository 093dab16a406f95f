//! # Config Codec
//!
//! Effect parameters travel as a compact ASCII string:
//!
//! ```text
//! dx=0.000,dy=0.000,dz=-1.000,size=4.80
//! ```
//!
//! Each effect kind owns a table of [`ParamSpec`] rows (key, default,
//! decimal precision). Encoding and decoding are both loops over that table,
//! so the sender and the receiver format every value identically.
//!
//! Decoding is a silent-fallback design: a missing, unparsable or
//! non-finite value yields the row's default. It never fails.

use std::fmt::Write as _;

use glam::Vec3;

/// A parameter key understood by the codec.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ParamKey {
    /// Direction, x component.
    Dx,
    /// Direction, y component.
    Dy,
    /// Direction, z component (vertical).
    Dz,
    /// Magnitude / particle size.
    Size,
}

impl ParamKey {
    /// The key as it appears in a config string.
    #[inline]
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Dx => "dx",
            Self::Dy => "dy",
            Self::Dz => "dz",
            Self::Size => "size",
        }
    }
}

/// One row of an effect's parameter table.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ParamSpec {
    /// Which parameter this row describes.
    pub key: ParamKey,
    /// Value used when the key is absent or garbage.
    pub default: f32,
    /// Number of decimal digits written by [`encode`].
    pub precision: usize,
}

impl ParamSpec {
    /// Creates a table row.
    #[must_use]
    pub const fn new(key: ParamKey, default: f32, precision: usize) -> Self {
        Self {
            key,
            default,
            precision,
        }
    }
}

/// Parameters consumed by an effect generator.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EffectParams {
    /// Direction of the effect. May be near-zero.
    pub direction: Vec3,
    /// Optional size; generators without a `size` row ignore it.
    pub size: Option<f32>,
}

impl EffectParams {
    /// Parameters with a direction and no explicit size.
    #[must_use]
    pub const fn new(direction: Vec3) -> Self {
        Self {
            direction,
            size: None,
        }
    }

    /// Sets the size.
    #[must_use]
    pub const fn with_size(mut self, size: f32) -> Self {
        self.size = Some(size);
        self
    }

    /// Returns the size, or `default` when none was given.
    #[inline]
    #[must_use]
    pub fn size_or(&self, default: f32) -> f32 {
        self.size.unwrap_or(default)
    }

    /// Decodes a full parameter set from `config` using `table`.
    ///
    /// Keys not in the table are ignored. A table without a `size` row
    /// yields `size: None`.
    #[must_use]
    pub fn decode(table: &[ParamSpec], config: &str) -> Self {
        let mut params = Self::new(Vec3::ZERO);
        for spec in table {
            let value = decode(config, spec.key.name(), spec.default);
            match spec.key {
                ParamKey::Dx => params.direction.x = value,
                ParamKey::Dy => params.direction.y = value,
                ParamKey::Dz => params.direction.z = value,
                ParamKey::Size => params.size = Some(value),
            }
        }
        params
    }

    fn value(&self, spec: &ParamSpec) -> f32 {
        match spec.key {
            ParamKey::Dx => self.direction.x,
            ParamKey::Dy => self.direction.y,
            ParamKey::Dz => self.direction.z,
            ParamKey::Size => self.size_or(spec.default),
        }
    }
}

/// Encodes `params` as `key=value` pairs in table order.
#[must_use]
pub fn encode(table: &[ParamSpec], params: &EffectParams) -> String {
    let mut out = String::with_capacity(table.len() * 12);
    for (i, spec) in table.iter().enumerate() {
        if i > 0 {
            out.push(',');
        }
        // Writing into a String cannot fail.
        let _ = write!(
            out,
            "{}={:.*}",
            spec.key.name(),
            spec.precision,
            params.value(spec)
        );
    }
    out
}

/// Looks up `key` in `config`, falling back to `default`.
///
/// The first occurrence of a key wins. Whitespace around keys and values is
/// tolerated.
#[must_use]
pub fn decode(config: &str, key: &str, default: f32) -> f32 {
    config
        .split(',')
        .filter_map(|pair| pair.split_once('='))
        .find(|(k, _)| k.trim() == key)
        .and_then(|(_, v)| v.trim().parse::<f32>().ok())
        .filter(|v| v.is_finite())
        .unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{Rng, SeedableRng};
    use rand_chacha::ChaCha8Rng;

    const TABLE: [ParamSpec; 4] = [
        ParamSpec::new(ParamKey::Dx, 0.0, 3),
        ParamSpec::new(ParamKey::Dy, 0.0, 3),
        ParamSpec::new(ParamKey::Dz, -1.0, 3),
        ParamSpec::new(ParamKey::Size, 4.8, 2),
    ];

    fn tolerance(value: f32, precision: usize) -> f32 {
        0.5 * 10f32.powi(-(precision as i32)) + value.abs() * f32::EPSILON * 4.0
    }

    #[test]
    fn test_encode_format() {
        let params = EffectParams::new(Vec3::new(1.0, -0.5, 0.25)).with_size(3.0);
        assert_eq!(encode(&TABLE, &params), "dx=1.000,dy=-0.500,dz=0.250,size=3.00");
    }

    #[test]
    fn test_encode_uses_default_size() {
        let params = EffectParams::new(Vec3::ZERO);
        assert_eq!(encode(&TABLE, &params), "dx=0.000,dy=0.000,dz=0.000,size=4.80");
    }

    #[test]
    fn test_decode_missing_key_falls_back() {
        assert_eq!(decode("dx=1.0,dy=2.0", "dz", -1.0), -1.0);
        assert_eq!(decode("", "size", 8.0), 8.0);
    }

    #[test]
    fn test_decode_garbage_falls_back() {
        assert_eq!(decode("dx=abc", "dx", 0.5), 0.5);
        assert_eq!(decode("dx", "dx", 0.5), 0.5);
        assert_eq!(decode("dx=NaN", "dx", 0.5), 0.5);
        assert_eq!(decode("dx=inf", "dx", 0.5), 0.5);
        assert_eq!(decode(",,,=,", "dx", 0.5), 0.5);
    }

    #[test]
    fn test_decode_tolerates_whitespace() {
        assert_eq!(decode(" dx = 1.5 , dy=2", "dx", 0.0), 1.5);
    }

    #[test]
    fn test_first_occurrence_wins() {
        assert_eq!(decode("dx=1,dx=2", "dx", 0.0), 1.0);
    }

    #[test]
    fn test_roundtrip_within_precision() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        for _ in 0..10_000 {
            let magnitude = 10f32.powi(rng.gen_range(-3..7));
            let v = rng.gen_range(-1.0f32..1.0) * magnitude;
            for spec in &TABLE {
                let mut params = EffectParams::new(Vec3::ZERO);
                match spec.key {
                    ParamKey::Dx => params.direction.x = v,
                    ParamKey::Dy => params.direction.y = v,
                    ParamKey::Dz => params.direction.z = v,
                    ParamKey::Size => params.size = Some(v),
                }
                let encoded = encode(&TABLE, &params);
                let decoded = decode(&encoded, spec.key.name(), f32::NAN);
                assert!(
                    (decoded - v).abs() <= tolerance(v, spec.precision),
                    "{v} -> {encoded} -> {decoded}"
                );
            }
        }
    }

    #[test]
    fn test_params_decode_whole_table() {
        let params = EffectParams::decode(&TABLE, "dz=0.500,size=2.00,bogus=9");
        assert_eq!(params.direction, Vec3::new(0.0, 0.0, 0.5));
        assert_eq!(params.size, Some(2.0));
    }

    #[test]
    fn test_params_decode_without_size_row() {
        let params = EffectParams::decode(&TABLE[..3], "size=2.00");
        assert_eq!(params.size, None);
        assert_eq!(params.direction, Vec3::new(0.0, 0.0, -1.0));
    }
}
