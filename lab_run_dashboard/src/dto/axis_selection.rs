use crate::common::*;

use crate::errors::dashboard_error::*;

#[doc = r#"
    Parameters the user put on each axis of the experiment chart.

    # Fields
    * `x` - X axis parameter
    * `y` - Y axis parameter
    * `color` - color parameter, only used by the heatmap chart
"#]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters, new)]
#[getset(get = "pub")]
pub struct AxisSelection {
    pub x: String,
    pub y: String,
    pub color: Option<String>,
}

impl AxisSelection {
    #[doc = r#"
        Default picker positions: first parameter on X, second (or first) on Y,
        third (or first) as color.
    "#]
    pub fn default_for(parameters: &[String]) -> Result<Self, DashboardError> {
        let first: &String = parameters.first().ok_or_else(|| {
            DashboardError::InvalidSelection("no parameters to select from".to_string())
        })?;

        let y: &String = parameters.get(1).unwrap_or(first);
        let color: &String = parameters.get(2).unwrap_or(first);

        Ok(AxisSelection::new(
            first.clone(),
            y.clone(),
            Some(color.clone()),
        ))
    }

    #[doc = "Fills unset pickers from the defaults"]
    pub fn resolve(
        parameters: &[String],
        x: Option<&str>,
        y: Option<&str>,
        color: Option<&str>,
    ) -> Result<Self, DashboardError> {
        let defaults: AxisSelection = AxisSelection::default_for(parameters)?;

        Ok(AxisSelection::new(
            x.map(str::to_string).unwrap_or(defaults.x),
            y.map(str::to_string).unwrap_or(defaults.y),
            color.map(str::to_string).or(defaults.color),
        ))
    }

    #[doc = r#"
        Every chosen name must be one of the loaded parameters.
        `color` is only checked when the chart draws it (`with_color`).
    "#]
    pub fn validate(&self, parameters: &[String], with_color: bool) -> Result<(), DashboardError> {
        let color: Option<&String> = self.color.as_ref().filter(|_| with_color);
        let chosen = [Some(&self.x), Some(&self.y), color];

        for name in chosen.into_iter().flatten() {
            if !parameters.iter().any(|param| param == name) {
                return Err(DashboardError::InvalidSelection(format!(
                    "parameter '{}' is not one of {:?}",
                    name, parameters
                )));
            }
        }

        Ok(())
    }
}
