//! Named command parameters and the binder that prepares them for a driver.

use crate::types::RowValues;

/// Direction of a command parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ParamDirection {
    #[default]
    Input,
    InputOutput,
    Output,
    ReturnValue,
}

impl ParamDirection {
    /// Input and input-output parameters carry a value to the store.
    #[must_use]
    pub fn sends_value(self) -> bool {
        matches!(self, ParamDirection::Input | ParamDirection::InputOutput)
    }
}

/// A named parameter such as `@UserName`.
///
/// `value == None` is a language-level null; [`bind_params`] turns it into
/// [`RowValues::Null`] for the directions that send a value.
#[derive(Debug, Clone, PartialEq)]
pub struct Param {
    pub name: String,
    pub value: Option<RowValues>,
    pub direction: ParamDirection,
}

impl Param {
    /// Input parameter. `name` should include the `@` prefix.
    pub fn input(name: impl Into<String>, value: impl Into<Option<RowValues>>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            direction: ParamDirection::Input,
        }
    }

    /// Parameter with an explicit direction.
    pub fn with_direction(
        name: impl Into<String>,
        value: impl Into<Option<RowValues>>,
        direction: ParamDirection,
    ) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            direction,
        }
    }

    /// Placeholder name for a field: `@<field>`.
    #[must_use]
    pub fn placeholder(field: &str) -> String {
        format!("@{field}")
    }

    /// Name without the leading `@`.
    #[must_use]
    pub fn bare_name(&self) -> &str {
        self.name.strip_prefix('@').unwrap_or(&self.name)
    }

    /// Value that will be sent to the driver. Only meaningful after binding.
    #[must_use]
    pub fn bound_value(&self) -> &RowValues {
        self.value.as_ref().unwrap_or(&RowValues::Null)
    }
}

/// Prepare parameters for the driver.
///
/// Null inputs become the null marker for `Input` / `InputOutput`; `Output` and
/// `ReturnValue` parameters are passed through untouched.
#[must_use]
pub fn bind_params(params: &[Param]) -> Vec<Param> {
    params
        .iter()
        .map(|p| {
            let mut bound = p.clone();
            if bound.direction.sends_value() && bound.value.is_none() {
                bound.value = Some(RowValues::Null);
            }
            bound
        })
        .collect()
}
