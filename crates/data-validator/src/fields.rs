//! House input widget catalog

use serde::Serialize;

/// Kind of control used to collect a value, with its declared bounds
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Widget {
    /// Whole-number entry box
    Number { min: i64, max: i64, default: i64 },
    /// Whole-number slider
    Slider { min: i64, max: i64, default: i64 },
    /// Fixed set of choices; the first one is preselected
    Select { options: Vec<i64> },
}

impl Widget {
    /// Value the control shows before the user touches it
    pub fn default_value(&self) -> f64 {
        match self {
            Widget::Number { default, .. } | Widget::Slider { default, .. } => *default as f64,
            Widget::Select { options } => options.first().copied().unwrap_or(0) as f64,
        }
    }
}

/// One labelled input on the form
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InputField {
    /// Feature name the value is stored under
    pub name: &'static str,
    /// Human readable label
    pub label: &'static str,
    #[serde(flatten)]
    pub widget: Widget,
}

impl InputField {
    const fn number(
        name: &'static str,
        label: &'static str,
        min: i64,
        max: i64,
        default: i64,
    ) -> Self {
        Self {
            name,
            label,
            widget: Widget::Number { min, max, default },
        }
    }

    const fn slider(
        name: &'static str,
        label: &'static str,
        min: i64,
        max: i64,
        default: i64,
    ) -> Self {
        Self {
            name,
            label,
            widget: Widget::Slider { min, max, default },
        }
    }

    fn select(name: &'static str, label: &'static str, options: &[i64]) -> Self {
        Self {
            name,
            label,
            widget: Widget::Select {
                options: options.to_vec(),
            },
        }
    }
}

/// The curated house attributes offered to the user, in display order
pub fn house_fields() -> Vec<InputField> {
    vec![
        InputField::number("GrLivArea", "Above Ground Living Area (sqft)", 500, 5000, 1500),
        InputField::number("GarageArea", "Garage Area (sqft)", 0, 1500, 400),
        InputField::number("TotalBsmtSF", "Total Basement Area (sqft)", 0, 3000, 800),
        InputField::slider("YearBuilt", "Year Built", 1900, 2025, 2000),
        InputField::select("FullBath", "Full Bathrooms", &[0, 1, 2, 3]),
        InputField::select("Fireplaces", "Fireplaces", &[0, 1, 2, 3]),
        InputField::number("LotArea", "Lot Area (sqft)", 1000, 200_000, 10_000),
        InputField::slider("OverallQual", "Overall Quality (1-10)", 1, 10, 5),
        InputField::number("1stFlrSF", "1st Floor Area (sqft)", 300, 3000, 800),
        InputField::number("2ndFlrSF", "2nd Floor Area (sqft)", 0, 2000, 400),
        InputField::select("BedroomAbvGr", "Bedrooms Above Ground", &[0, 1, 2, 3, 4, 5]),
        InputField::select("KitchenAbvGr", "Kitchens Above Ground", &[0, 1, 2]),
        // One column of the one-hot encoded zoning category
        InputField::select("MSZoning_RL", "Zoning RL", &[0, 1]),
    ]
}
