//! Контроллер руления по боковым просветам
//!
//! Два боковых дальномера дают просветы слева и справа; движок выводит
//! угол руления, уводящий ровер в сторону большего просвета.
//! Контроллер не хранит состояния: каждый вызов независим.

use crate::config::rover::{clearance, steering};
use crate::fuzzy::{
    Combinator, EngineBuilder, FuzzyError, FuzzyVariable, InferenceEngine,
    MembershipFunction, Rule,
};

/// Переменная бокового просвета
fn clearance_variable(name: &'static str) -> Result<FuzzyVariable, FuzzyError> {
    FuzzyVariable::new(
        name,
        clearance::UNIVERSE,
        &[
            MembershipFunction::trapezoidal("near", clearance::NEAR),
            MembershipFunction::triangular("medium", clearance::MEDIUM),
            MembershipFunction::trapezoidal("far", clearance::FAR),
        ],
    )
}

/// Сборка движка "просветы слева/справа -> угол руления"
pub fn steering_engine() -> Result<InferenceEngine, FuzzyError> {
    let mut builder = EngineBuilder::new()
        .input(clearance_variable("left")?)
        .input(clearance_variable("right")?)
        .output(FuzzyVariable::new(
            "angle",
            steering::UNIVERSE,
            &[
                MembershipFunction::trapezoidal("hard_left", steering::HARD_LEFT),
                MembershipFunction::triangular("left", steering::LEFT),
                MembershipFunction::triangular("straight", steering::STRAIGHT),
                MembershipFunction::triangular("right", steering::RIGHT),
                MembershipFunction::trapezoidal("hard_right", steering::HARD_RIGHT),
            ],
        )?);

    for (left_mf, right_mf, angle_mf) in steering::RULES {
        builder = builder.rule(Rule::new(
            &[(0, left_mf), (1, right_mf)],
            Combinator::And,
            angle_mf,
        )?);
    }

    builder.build()
}

/// Контроллер руления
pub struct SteeringController {
    engine: InferenceEngine,
}

impl SteeringController {
    pub fn new() -> Result<Self, FuzzyError> {
        Ok(Self {
            engine: steering_engine()?,
        })
    }

    /// Просветы слева и справа (см) -> угол руления (градусы),
    /// положительный угол — поворот вправо
    pub fn update(&self, left_cm: f32, right_cm: f32) -> Result<f32, FuzzyError> {
        let angle = self
            .engine
            .evaluate(&[left_cm as f64, right_cm as f64])?;

        #[cfg(feature = "defmt")]
        defmt::debug!(
            "Просветы L {} см, R {} см -> угол {} град",
            left_cm,
            right_cm,
            angle
        );

        Ok(angle as f32)
    }

    pub fn engine(&self) -> &InferenceEngine {
        &self.engine
    }
}

// Тесты для отладки на хосте
#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_blocked_left_steers_hard_right() {
        let engine = steering_engine().unwrap();
        let angle = engine.evaluate(&[10.0, 70.0]).unwrap();
        assert_relative_eq!(angle, 22.23776, epsilon = 1e-5);
    }

    #[test]
    fn test_mirrored_clearances_mirror_the_angle() {
        // Таблица и формы симметричны: зеркальные просветы дают
        // зеркальный угол
        let engine = steering_engine().unwrap();
        for (left, right) in [(10.0, 70.0), (25.0, 55.0), (5.0, 40.0)] {
            let a = engine.evaluate(&[left, right]).unwrap();
            let b = engine.evaluate(&[right, left]).unwrap();
            assert_relative_eq!(a, -b, epsilon = 1e-9);
        }
    }

    #[test]
    fn test_equal_clearances_go_straight() {
        let engine = steering_engine().unwrap();
        for clearance_cm in [10.0, 40.0, 60.0] {
            let angle = engine.evaluate(&[clearance_cm, clearance_cm]).unwrap();
            assert!(angle.abs() < 1e-9, "angle {} not straight", angle);
        }
    }

    #[test]
    fn test_controller_output_in_actuator_range() {
        let controller = SteeringController::new().unwrap();
        for left in [0.0_f32, 15.0, 30.0, 45.0, 60.0, 80.0] {
            for right in [0.0_f32, 15.0, 30.0, 45.0, 60.0, 80.0] {
                let angle = controller.update(left, right).unwrap();
                assert!((-30.0..=30.0).contains(&angle));
            }
        }
    }
}
