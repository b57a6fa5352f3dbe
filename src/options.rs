//! Canonical query options and their translation to provider-native values.
//!
//! Callers express temperature on one provider-independent 0..100 scale and
//! may leave the token ceiling at 0 for "use the default". [`normalize`] is
//! the only place where bounds, clamping, rescaling, and the default ceiling
//! are applied, so every provider enforces the same policy.

use crate::constants::{MAX_TEMPERATURE, MAX_TOKENS_DEFAULT, MIN_TEMPERATURE};
use crate::error::QueryError;
use crate::provider::ProviderKind;

/// Tuning knobs accepted by every provider, on the canonical scale.
#[derive(Debug, Clone, Copy)]
pub struct QueryOptions {
    /// Sampling temperature on the canonical 0..100 scale.
    pub temperature: f32,
    /// Completion token ceiling; 0 means "substitute the default".
    pub max_tokens: u32,
}

impl QueryOptions {
    pub fn new(temperature: f32, max_tokens: u32) -> Self {
        Self {
            temperature,
            max_tokens,
        }
    }
}

/// Options after validation and rescaling for one specific provider.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NativeOptions {
    /// Temperature on the provider's native range.
    pub temperature: f32,
    /// Resolved completion token ceiling, never 0.
    pub max_tokens: u32,
}

/// Validates canonical options and rescales them for `provider`.
///
/// Temperatures below the canonical range clamp to its lower bound; anything
/// not strictly below [`MAX_TEMPERATURE`], NaN included, is rejected. The
/// rescale is linear (`native = canonical * scale / 100`), so 0 stays 0 and
/// ordering is preserved on every provider.
pub fn normalize(
    options: QueryOptions,
    provider: ProviderKind,
) -> Result<NativeOptions, QueryError> {
    let mut temperature = options.temperature;
    if temperature < MIN_TEMPERATURE {
        temperature = MIN_TEMPERATURE;
    }
    // Negated so NaN lands in the reject branch too.
    if !(temperature < MAX_TEMPERATURE) {
        return Err(QueryError::TemperatureOutOfRange(options.temperature));
    }

    let max_tokens = if options.max_tokens == 0 {
        MAX_TOKENS_DEFAULT
    } else {
        options.max_tokens
    };

    Ok(NativeOptions {
        temperature: temperature * provider.temperature_scale() / MAX_TEMPERATURE,
        max_tokens,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn native(temp: f32, provider: ProviderKind) -> NativeOptions {
        normalize(QueryOptions::new(temp, 1024), provider).unwrap()
    }

    #[test]
    fn midpoint_maps_onto_each_native_range() {
        assert_eq!(native(50.0, ProviderKind::Anthropic).temperature, 0.5);
        assert_eq!(native(50.0, ProviderKind::OpenAI).temperature, 1.0);
        assert_eq!(native(50.0, ProviderKind::Gemini).temperature, 1.0);
    }

    #[test]
    fn zero_is_preserved_on_every_scale() {
        for kind in crate::provider::ALL_PROVIDERS {
            assert_eq!(native(0.0, *kind).temperature, 0.0);
        }
    }

    #[test]
    fn rescale_is_monotonic() {
        for kind in crate::provider::ALL_PROVIDERS {
            let low = native(10.0, *kind).temperature;
            let high = native(90.0, *kind).temperature;
            assert!(low < high);
        }
    }

    #[test]
    fn below_range_clamps_to_zero() {
        assert_eq!(native(-25.0, ProviderKind::Anthropic).temperature, 0.0);
        assert_eq!(native(f32::NEG_INFINITY, ProviderKind::Anthropic).temperature, 0.0);
    }

    #[test]
    fn upper_bound_is_exclusive() {
        for bad in [100.0, 100.1, 5000.0, f32::INFINITY] {
            let err = normalize(QueryOptions::new(bad, 0), ProviderKind::OpenAI).unwrap_err();
            match err {
                QueryError::TemperatureOutOfRange(got) => assert_eq!(got, bad),
                other => panic!("expected TemperatureOutOfRange, got {other:?}"),
            }
        }
        // Just inside the bound still passes.
        assert!(normalize(QueryOptions::new(99.9, 0), ProviderKind::OpenAI).is_ok());
    }

    #[test]
    fn nan_temperature_is_rejected() {
        let err = normalize(QueryOptions::new(f32::NAN, 0), ProviderKind::OpenAI).unwrap_err();
        match err {
            QueryError::TemperatureOutOfRange(got) => assert!(got.is_nan()),
            other => panic!("expected TemperatureOutOfRange, got {other:?}"),
        }
    }

    #[test]
    fn zero_max_tokens_substitutes_the_default() {
        let opts = normalize(QueryOptions::new(50.0, 0), ProviderKind::Anthropic).unwrap();
        assert_eq!(opts.max_tokens, crate::constants::MAX_TOKENS_DEFAULT);

        let opts = normalize(QueryOptions::new(50.0, 32_000), ProviderKind::Anthropic).unwrap();
        assert_eq!(opts.max_tokens, 32_000);
    }
}
