//! The validation and conversion pipeline behind the exchange endpoint.
use crate::core::amount::{format_amount, parse_amount, round_to_cents};
use crate::core::currency::CurrencyRateProvider;
use std::sync::Arc;
use tracing::{debug, instrument};

/// Client input errors. Each variant's message is shown to the caller verbatim.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ConversionError {
    #[error("Missing query parameters")]
    MissingParameters,
    #[error("Invalid currency code")]
    InvalidCurrencyCode,
    #[error("Invalid amount format")]
    InvalidAmountFormat,
    #[error("Negative amount")]
    NegativeAmount,
}

/// Raw, unvalidated inputs of a single conversion.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConversionRequest {
    pub source: Option<String>,
    pub target: Option<String>,
    pub amount: Option<String>,
}

impl ConversionRequest {
    pub fn new(source: &str, target: &str, amount: &str) -> Self {
        ConversionRequest {
            source: Some(source.to_string()),
            target: Some(target.to_string()),
            amount: Some(amount.to_string()),
        }
    }

    /// Collects the request from decoded query pairs. The first occurrence of
    /// a repeated key wins; unknown keys are ignored.
    pub fn from_query_pairs<I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let mut request = ConversionRequest::default();
        for (key, value) in pairs {
            let slot = match key.as_str() {
                "source" => &mut request.source,
                "target" => &mut request.target,
                "amount" => &mut request.amount,
                _ => continue,
            };
            if slot.is_none() {
                *slot = Some(value);
            }
        }
        request
    }
}

/// A successful conversion: the amount rounded to cents and its display form.
#[derive(Debug, Clone, PartialEq)]
pub struct ConvertedAmount {
    pub value: f64,
    pub formatted: String,
}

/// Converts amounts using an injected rate provider.
#[derive(Clone)]
pub struct ConversionHandler {
    rates: Arc<dyn CurrencyRateProvider>,
}

impl ConversionHandler {
    pub fn new(rates: Arc<dyn CurrencyRateProvider>) -> Self {
        ConversionHandler { rates }
    }

    #[instrument(name = "Convert", level = "debug", skip(self))]
    pub fn handle(&self, request: &ConversionRequest) -> Result<ConvertedAmount, ConversionError> {
        let result = convert(
            request.source.as_deref(),
            request.target.as_deref(),
            request.amount.as_deref(),
            self.rates.as_ref(),
        );
        match &result {
            Ok(converted) => debug!(amount = %converted.formatted, "Conversion succeeded"),
            Err(e) => debug!(error = %e, "Conversion rejected"),
        }
        result
    }
}

/// Validates the raw inputs in a fixed order and converts the amount.
///
/// Checks short-circuit in this order: all three inputs present and non-empty,
/// the source/target pair listed, the amount parseable, the amount not
/// negative. Only then is the amount multiplied by the rate and formatted.
pub fn convert(
    source: Option<&str>,
    target: Option<&str>,
    amount_text: Option<&str>,
    rates: &dyn CurrencyRateProvider,
) -> Result<ConvertedAmount, ConversionError> {
    let (source, target, amount_text) = match (source, target, amount_text) {
        (Some(s), Some(t), Some(a)) if !s.is_empty() && !t.is_empty() && !a.is_empty() => {
            (s, t, a)
        }
        _ => return Err(ConversionError::MissingParameters),
    };

    let rate = rates
        .get_rate(source, target)
        .ok_or(ConversionError::InvalidCurrencyCode)?;

    let amount = parse_amount(amount_text)?;
    if amount < 0.0 {
        return Err(ConversionError::NegativeAmount);
    }

    let raw = amount * rate;
    // Only reachable when the product overflows f64
    if !raw.is_finite() {
        return Err(ConversionError::InvalidAmountFormat);
    }

    let value = round_to_cents(raw);
    Ok(ConvertedAmount {
        value,
        formatted: format_amount(value),
    })
}
