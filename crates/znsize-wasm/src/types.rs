//! JavaScript-facing option types.

use serde::{Deserialize, Serialize};
use wasm_bindgen::prelude::*;
use znsize_core::{DimensionOverrides, SizeError, SizeOptions};

/// Engine options from JavaScript: `{ height?: string, width?: string }`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SizeOptionsJs {
    /// Height strategy name.
    #[serde(default)]
    pub height: Option<String>,
    /// Width strategy name.
    #[serde(default)]
    pub width: Option<String>,
}

impl SizeOptionsJs {
    /// Read options from an optional JS argument.
    pub fn from_js(value: JsValue) -> Result<Self, JsError> {
        if value.is_undefined() || value.is_null() {
            return Ok(Self::default());
        }
        serde_wasm_bindgen::from_value(value)
            .map_err(|e| JsError::new(&format!("Invalid options: {}", e)))
    }

    /// Resolve the strategy names. Unknown names are an error.
    pub fn into_core(self) -> Result<SizeOptions, SizeError> {
        SizeOptions::from_names(self.height.as_deref(), self.width.as_deref())
    }
}

/// Forced-send overrides from JavaScript: `{ width?: string, height?: string }`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DimensionOverridesJs {
    #[serde(default)]
    pub width: Option<String>,
    #[serde(default)]
    pub height: Option<String>,
}

impl DimensionOverridesJs {
    pub fn from_js(value: JsValue) -> Result<Self, JsError> {
        if value.is_undefined() || value.is_null() {
            return Ok(Self::default());
        }
        serde_wasm_bindgen::from_value(value)
            .map_err(|e| JsError::new(&format!("Invalid dimensions: {}", e)))
    }

    pub fn into_core(self) -> DimensionOverrides {
        DimensionOverrides {
            width: self.width,
            height: self.height,
        }
    }
}
