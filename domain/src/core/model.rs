//! Model value object representing the upstream model selection

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Model requested from the hosted assistant (Value Object)
///
/// The endpoint accepts a free-form `model_name`; only the default model is
/// named here and anything else is carried through as [`Model::Custom`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum Model {
    /// Hunyuan, the endpoint's default large model
    #[default]
    Hunyuan,
    /// Any other model identifier accepted by the endpoint
    Custom(String),
}

impl Model {
    /// Get the string identifier for this model
    pub fn as_str(&self) -> &str {
        match self {
            Model::Hunyuan => "hunyuan",
            Model::Custom(s) => s,
        }
    }

    /// Check if this is a custom (non-default) model
    pub fn is_custom(&self) -> bool {
        matches!(self, Model::Custom(_))
    }
}

impl std::fmt::Display for Model {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Model {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Ok(match s.trim() {
            "hunyuan" => Model::Hunyuan,
            other => Model::Custom(other.to_string()),
        })
    }
}

impl Serialize for Model {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Model {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        let Ok(model) = s.parse::<Model>();
        Ok(model)
    }
}
