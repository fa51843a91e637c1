//! Parameter registry: the fixed set of viewable quantities.
//!
//! Each entry maps a selection key to the GFS variable(s) it reads and the
//! arithmetic that turns the stored quantity into a physical one.

use serde::Serialize;

/// Unit derivation applied to the raw field(s).
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Derivation {
    /// Multiply every value (e.g. kg/m²/s → mm/hour: × 3600).
    Scale(f32),
    /// Add to every value (e.g. K → °C: + -273.15).
    Offset(f32),
    /// Elementwise vector magnitude of two component fields.
    Magnitude,
}

impl Derivation {
    /// Number of source fields this derivation consumes.
    pub fn arity(&self) -> usize {
        match self {
            Derivation::Magnitude => 2,
            _ => 1,
        }
    }

    /// Apply to the source fields, producing the physical quantity.
    ///
    /// `fields` must contain exactly `arity()` slices of equal length;
    /// NaN inputs propagate to NaN outputs.
    pub fn apply(&self, fields: &[&[f32]]) -> Vec<f32> {
        debug_assert_eq!(fields.len(), self.arity());
        match self {
            Derivation::Scale(factor) => fields[0].iter().map(|v| v * factor).collect(),
            Derivation::Offset(offset) => fields[0].iter().map(|v| v + offset).collect(),
            Derivation::Magnitude => fields[0]
                .iter()
                .zip(fields[1].iter())
                .map(|(u, v)| (u * u + v * v).sqrt())
                .collect(),
        }
    }
}

/// Display color scheme identifier. The stop tables live in the renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Palette {
    Blues,
    CoolWarm,
    Plasma,
    YlGnBu,
}

/// A viewable quantity: selection key, source variables, derivation, unit.
#[derive(Debug, Clone, Copy)]
pub struct Parameter {
    /// Selection key used by the UI and the query string.
    pub key: &'static str,
    /// Human-readable label.
    pub label: &'static str,
    /// GFS variable name(s) this parameter reads.
    pub sources: &'static [&'static str],
    pub derivation: Derivation,
    /// Physical unit of the derived quantity.
    pub units: &'static str,
    pub palette: Palette,
}

impl Parameter {
    /// Plot/legend title, e.g. "2 m temperature (°C)".
    pub fn title(&self) -> String {
        format!("{} ({})", self.label, self.units)
    }
}

/// The four registered parameters. No others are recognized.
pub static PARAMETERS: &[Parameter] = &[
    Parameter {
        key: "prate",
        label: "Precipitation rate",
        sources: &["prate"],
        derivation: Derivation::Scale(3600.0),
        units: "mm/hour",
        palette: Palette::Blues,
    },
    Parameter {
        key: "tmp2m",
        label: "2 m temperature",
        sources: &["tmp2m"],
        derivation: Derivation::Offset(-273.15),
        units: "°C",
        palette: Palette::CoolWarm,
    },
    Parameter {
        key: "wind",
        label: "10 m wind speed",
        sources: &["ugrd10m", "vgrd10m"],
        derivation: Derivation::Magnitude,
        units: "m/s",
        palette: Palette::Plasma,
    },
    Parameter {
        key: "prmsl",
        label: "Mean sea-level pressure",
        sources: &["prmsl"],
        derivation: Derivation::Scale(0.01),
        units: "hPa",
        palette: Palette::YlGnBu,
    },
];

/// Look up a parameter by selection key.
pub fn lookup(key: &str) -> Option<&'static Parameter> {
    PARAMETERS.iter().find(|p| p.key == key)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn derived(key: &str, fields: &[&[f32]]) -> f32 {
        lookup(key).unwrap().derivation.apply(fields)[0]
    }

    #[test]
    fn test_prate_to_mm_per_hour() {
        // 0.001 kg/m²/s is 3.6 mm over an hour
        let v = derived("prate", &[&[0.001]]);
        assert!((v - 3.6).abs() < 1e-5, "got {}", v);
    }

    #[test]
    fn test_tmp2m_to_celsius() {
        let v = derived("tmp2m", &[&[300.15]]);
        assert!((v - 27.0).abs() < 1e-4, "got {}", v);
    }

    #[test]
    fn test_wind_magnitude() {
        let v = derived("wind", &[&[3.0], &[4.0]]);
        assert!((v - 5.0).abs() < 1e-6, "got {}", v);
    }

    #[test]
    fn test_prmsl_to_hpa() {
        let v = derived("prmsl", &[&[101_300.0]]);
        assert!((v - 1013.0).abs() < 1e-3, "got {}", v);
    }

    #[test]
    fn test_unknown_key() {
        assert!(lookup("rh2m").is_none());
        assert!(lookup("").is_none());
    }

    #[test]
    fn test_nan_propagates() {
        let out = Derivation::Scale(3600.0).apply(&[&[f32::NAN, 0.001]]);
        assert!(out[0].is_nan());
        assert!(out[1].is_finite());
    }

    #[test]
    fn test_titles() {
        assert_eq!(lookup("tmp2m").unwrap().title(), "2 m temperature (°C)");
        assert_eq!(
            lookup("prate").unwrap().title(),
            "Precipitation rate (mm/hour)"
        );
    }
}
