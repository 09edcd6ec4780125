use serde::Deserialize;

/// Mocadrop project document; only the field we read is modelled
#[derive(Debug, Clone, Deserialize)]
pub struct MocadropProject {
    #[serde(rename = "stakingPowerBurnt", default)]
    pub staking_power_burnt: Option<NumericValue>,
}

/// A number that the API may send either as a JSON number or as a string
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum NumericValue {
    Number(f64),
    Text(String),
}

impl NumericValue {
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            NumericValue::Number(value) => Some(*value),
            NumericValue::Text(text) => text.trim().parse::<f64>().ok(),
        }
    }
}
