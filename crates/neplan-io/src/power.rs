//! Active power from NEPLAN's node power encodings.
//!
//! A load or generator row stores its power as an encoding code plus two
//! magnitudes. `PQ` and `PC` carry active power directly in the first
//! magnitude; `SC` carries apparent power and `cos phi`, whose product is the
//! active power. The role fixes sign and unit: loads are exported in the
//! target unit after a `1e-3` scale, generators keep their unit and flip sign
//! so that generation is positive.

use std::fmt;

use neplan_core::ConvertError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PowerRole {
    Load,
    Generator,
}

impl PowerRole {
    pub fn sign(self) -> f64 {
        match self {
            PowerRole::Load => 1.0,
            PowerRole::Generator => -1.0,
        }
    }

    pub fn scale(self) -> f64 {
        match self {
            PowerRole::Load => 1e-3,
            PowerRole::Generator => 1.0,
        }
    }
}

impl fmt::Display for PowerRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PowerRole::Load => write!(f, "load"),
            PowerRole::Generator => write!(f, "generator"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PowerEncoding {
    /// Active and reactive power
    Pq,
    /// Active power and `cos phi`
    Pc,
    /// Apparent power and `cos phi`
    Sc,
}

impl PowerEncoding {
    /// Parse the encoding column of `element`. Codes are case sensitive;
    /// null and unknown codes fail.
    pub fn parse(code: Option<&str>, element: &str) -> Result<Self, ConvertError> {
        match code {
            Some("PQ") => Ok(PowerEncoding::Pq),
            Some("PC") => Ok(PowerEncoding::Pc),
            Some("SC") => Ok(PowerEncoding::Sc),
            other => Err(ConvertError::UnknownPowerEncoding {
                code: other.unwrap_or_default().to_string(),
                element: element.to_string(),
            }),
        }
    }

    /// Signed, unit-scaled active power. Null when a magnitude it needs is null.
    pub fn active_power(
        self,
        role: PowerRole,
        magnitude1: Option<f64>,
        magnitude2: Option<f64>,
    ) -> Option<f64> {
        let factor = role.sign() * role.scale();
        match self {
            PowerEncoding::Pq | PowerEncoding::Pc => magnitude1.map(|m1| factor * m1),
            PowerEncoding::Sc => magnitude1.zip(magnitude2).map(|(s, cos_phi)| factor * s * cos_phi),
        }
    }
}

/// Convert one node row's power fields for `role`.
pub fn convert_power(
    role: PowerRole,
    encoding: Option<&str>,
    magnitude1: Option<f64>,
    magnitude2: Option<f64>,
    element: &str,
) -> Result<Option<f64>, ConvertError> {
    let encoding = PowerEncoding::parse(encoding, element)?;
    Ok(encoding.active_power(role, magnitude1, magnitude2))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: Option<f64>, b: f64) -> bool {
        a.map(|a| (a - b).abs() < 1e-9).unwrap_or(false)
    }

    #[test]
    fn load_pq_and_pc_scale_to_target_unit() {
        let pq = convert_power(PowerRole::Load, Some("PQ"), Some(50.0), Some(0.0), "load");
        assert!(approx(pq.unwrap(), 0.05));
        let pc = convert_power(PowerRole::Load, Some("PC"), Some(120.0), Some(0.95), "load");
        assert!(approx(pc.unwrap(), 0.12));
    }

    #[test]
    fn load_sc_multiplies_cos_phi() {
        let sc = convert_power(PowerRole::Load, Some("SC"), Some(100.0), Some(0.9), "load");
        assert!(approx(sc.unwrap(), 0.09));
    }

    #[test]
    fn generator_flips_sign_without_scaling() {
        let pq = convert_power(PowerRole::Generator, Some("PQ"), Some(-30.0), None, "gen");
        assert!(approx(pq.unwrap(), 30.0));
        let sc = convert_power(
            PowerRole::Generator,
            Some("SC"),
            Some(-200.0),
            Some(0.95),
            "gen",
        );
        assert!(approx(sc.unwrap(), 190.0));
    }

    #[test]
    fn null_magnitude_gives_null_power() {
        let sc = convert_power(PowerRole::Load, Some("SC"), Some(100.0), None, "load");
        assert_eq!(sc.unwrap(), None);
    }

    #[test]
    fn unknown_encoding_is_fatal() {
        let err = convert_power(PowerRole::Load, Some("XX"), Some(1.0), None, "load 'L1'")
            .unwrap_err();
        assert_eq!(
            err,
            ConvertError::UnknownPowerEncoding {
                code: "XX".to_string(),
                element: "load 'L1'".to_string(),
            }
        );
    }

    #[test]
    fn missing_encoding_is_fatal() {
        let err = convert_power(PowerRole::Generator, None, Some(-1.0), None, "gen").unwrap_err();
        assert!(matches!(err, ConvertError::UnknownPowerEncoding { code, .. } if code.is_empty()));
    }

    #[test]
    fn encoding_codes_are_case_sensitive() {
        assert!(PowerEncoding::parse(Some("pq"), "load").is_err());
        assert_eq!(
            PowerEncoding::parse(Some("SC"), "load"),
            Ok(PowerEncoding::Sc)
        );
    }
}
