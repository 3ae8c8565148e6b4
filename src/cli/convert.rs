use super::ui;
use crate::core::{ConversionHandler, ConversionRequest, ConvertedAmount};
use anyhow::{Context, Result};

/// Converts a single amount and prints it, e.g. `100 USD = 3,044.4 TWD`.
pub fn run(handler: &ConversionHandler, request: &ConversionRequest) -> Result<()> {
    let converted = handler.handle(request).with_context(|| {
        format!(
            "Cannot convert {:?} from {:?} to {:?}",
            request.amount.as_deref().unwrap_or_default(),
            request.source.as_deref().unwrap_or_default(),
            request.target.as_deref().unwrap_or_default(),
        )
    })?;
    println!("{}", render(request, &converted));
    Ok(())
}

fn render(request: &ConversionRequest, converted: &ConvertedAmount) -> String {
    format!(
        "{} {} = {} {}",
        request.amount.as_deref().unwrap_or_default(),
        request.source.as_deref().unwrap_or_default(),
        ui::style_text(&converted.formatted, ui::StyleType::Value),
        request.target.as_deref().unwrap_or_default(),
    )
}
