//! Renders parsed messages for the `grib2-dump` binary.

use serde::Serialize;

use crate::config::{Config, OutputFormat};
use crate::error::Result;
use crate::grib::lookup::MessageLabels;
use crate::grib::{Grib, Message};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageReport<'a> {
    pub message: &'a Message,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub labels: Option<MessageLabels>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub values: Option<ValueSummary>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub decode_error: Option<String>,
}

/// Statistics over the decoded values. Missing points count toward `count` only.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValueSummary {
    pub count: usize,
    pub missing: usize,
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub mean: Option<f64>,
    /// Leading values, `None` where missing
    pub first: Vec<Option<f64>>,
}

impl ValueSummary {
    pub fn new(values: &[f64], max_values: usize) -> Self {
        let present = || values.iter().copied().filter(|v| !v.is_nan());
        let num_present = present().count();

        let (min, max, mean) = if num_present == 0 {
            (None, None, None)
        } else {
            (
                Some(present().fold(f64::INFINITY, f64::min)),
                Some(present().fold(f64::NEG_INFINITY, f64::max)),
                Some(present().sum::<f64>() / num_present as f64),
            )
        };

        Self {
            count: values.len(),
            missing: values.len() - num_present,
            min,
            max,
            mean,
            first: values
                .iter()
                .take(max_values)
                .map(|v| if v.is_nan() { None } else { Some(*v) })
                .collect(),
        }
    }
}

/// One report per message. A message whose values fail to decode still reports its sections.
pub fn build<'a>(grib: &'a Grib, config: &Config, raw: bool) -> Vec<MessageReport<'a>> {
    grib.messages
        .iter()
        .enumerate()
        .map(|(i, message)| {
            let labels = (config.lookup && !raw).then(|| message.lookup().labels);

            let (values, decode_error) = if config.decode_values {
                match message.decode() {
                    Ok(values) => (Some(ValueSummary::new(&values, config.max_values)), None),
                    Err(e) => {
                        warn!("Message {} : cannot decode values : {}", i, e);
                        (None, Some(e.to_string()))
                    }
                }
            } else {
                (None, None)
            };

            MessageReport { message, labels, values, decode_error }
        })
        .collect()
}

pub fn render(grib: &Grib, config: &Config, raw: bool) -> Result<String> {
    let reports = build(grib, config, raw);

    Ok(match config.format {
        OutputFormat::Json => serde_json::to_string_pretty(&reports)?,
        OutputFormat::Yaml => serde_yaml::to_string(&reports)?,
    })
}
