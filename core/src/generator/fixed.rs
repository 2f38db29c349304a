use super::*;

/// Generation strategy that places hazards at a predetermined set of positions.
#[derive(Clone, Debug, PartialEq)]
pub struct FixedFieldGenerator {
    hazards: Vec<Position>,
}

impl FixedFieldGenerator {
    pub fn new(hazards: impl IntoIterator<Item = Position>) -> Self {
        Self {
            hazards: hazards.into_iter().collect(),
        }
    }
}

impl FieldGenerator for FixedFieldGenerator {
    fn generate(self, config: FieldConfig) -> Result<Field> {
        config.validate()?;
        let (height, width) = config.size();
        let field = Field::with_hazards(height, width, &self.hazards)?;

        if field.hazard_count() != config.hazards() {
            return Err(GameError::InvalidHazardLayout {
                expected: config.hazards(),
                actual: field.hazard_count(),
            });
        }

        log::debug!(
            "Built fixed {}x{} field with {} hazards",
            height,
            width,
            config.hazards()
        );
        Ok(field)
    }
}
