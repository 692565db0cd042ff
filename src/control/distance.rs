//! Контроллер удержания дистанции
//!
//! Связывает таблицы "дистанция -> скорость" с обобщенным движком
//! Мамдани. Контроллер хранит предыдущее измерение и сам выводит канал
//! изменения дистанции; сенсорный слой обязан лишь поставлять свежие
//! измерения с постоянным периодом.

use crate::config::rover::{approach, distance, speed, speed_single};
use crate::fuzzy::{
    Combinator, EngineBuilder, FuzzyError, FuzzyVariable, InferenceEngine,
    MembershipFunction, Rule,
};

/// Сборка двухвходового движка "дистанция + изменение -> скорость"
pub fn speed_engine() -> Result<InferenceEngine, FuzzyError> {
    let mut builder = EngineBuilder::new()
        .input(FuzzyVariable::new(
            "distance",
            distance::UNIVERSE,
            &[
                MembershipFunction::trapezoidal("near", distance::NEAR),
                MembershipFunction::triangular("medium", distance::MEDIUM),
                MembershipFunction::trapezoidal("far", distance::FAR),
            ],
        )?)
        .input(FuzzyVariable::new(
            "delta",
            approach::UNIVERSE,
            &[
                MembershipFunction::trapezoidal("too_close", approach::TOO_CLOSE),
                MembershipFunction::triangular("ideal", approach::IDEAL),
                MembershipFunction::trapezoidal("too_far", approach::TOO_FAR),
            ],
        )?)
        .output(FuzzyVariable::new(
            "speed",
            speed::UNIVERSE,
            &[
                MembershipFunction::trapezoidal("slow", speed::SLOW),
                MembershipFunction::triangular("maintain", speed::MAINTAIN),
                MembershipFunction::trapezoidal("fast", speed::FAST),
            ],
        )?);

    for (dist_mf, delta_mf, speed_mf) in speed::RULES {
        builder = builder.rule(Rule::new(
            &[(0, dist_mf), (1, delta_mf)],
            Combinator::And,
            speed_mf,
        )?);
    }

    builder.build()
}

/// Одновходовый вариант движка: только фронтальная дистанция
pub fn speed_engine_single() -> Result<InferenceEngine, FuzzyError> {
    let mut builder = EngineBuilder::new()
        .input(FuzzyVariable::new(
            "distance",
            distance::UNIVERSE,
            &[
                MembershipFunction::trapezoidal("near", distance::NEAR),
                MembershipFunction::triangular("medium", distance::MEDIUM),
                MembershipFunction::trapezoidal("far", distance::FAR),
            ],
        )?)
        .output(FuzzyVariable::new(
            "speed",
            speed_single::UNIVERSE,
            &[
                MembershipFunction::trapezoidal("slow", speed_single::SLOW),
                MembershipFunction::triangular("maintain", speed_single::MAINTAIN),
                MembershipFunction::trapezoidal("fast", speed_single::FAST),
            ],
        )?);

    for (dist_mf, speed_mf) in speed_single::RULES {
        builder = builder.rule(Rule::new(&[(0, dist_mf)], Combinator::And, speed_mf)?);
    }

    builder.build()
}

/// Контроллер дистанции
pub struct DistanceController {
    engine: InferenceEngine,
    /// Предыдущее измерение для расчета изменения дистанции (см)
    prev_distance: Option<f64>,
}

impl DistanceController {
    /// Создание контроллера с двухвходовой таблицей правил
    pub fn new() -> Result<Self, FuzzyError> {
        Ok(Self {
            engine: speed_engine()?,
            prev_distance: None,
        })
    }

    /// Очередное измерение дистанции -> команда скорости (м/с)
    ///
    /// Изменение дистанции выводится из предыдущего вызова; на первом
    /// вызове оно считается нулевым.
    pub fn update(&mut self, distance_cm: f32) -> Result<f32, FuzzyError> {
        let dist = distance_cm as f64;
        let delta = match self.prev_distance {
            Some(prev) => dist - prev,
            None => 0.0,
        };
        self.prev_distance = Some(dist);

        let speed = self.engine.evaluate(&[dist, delta])?;

        #[cfg(feature = "defmt")]
        defmt::debug!(
            "Дистанция {} см, изменение {} см -> скорость {} м/с",
            dist,
            delta,
            speed
        );

        Ok(speed as f32)
    }

    /// Вычисление без внутреннего состояния: дистанция и изменение заданы явно
    pub fn compute(&self, distance_cm: f32, delta_cm: f32) -> Result<f32, FuzzyError> {
        let speed = self
            .engine
            .evaluate(&[distance_cm as f64, delta_cm as f64])?;
        Ok(speed as f32)
    }

    /// Сброс накопленного измерения (например, после потери сенсора)
    pub fn reset(&mut self) {
        self.prev_distance = None;
    }

    pub fn engine(&self) -> &InferenceEngine {
        &self.engine
    }
}

// Тесты для отладки на хосте
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nine_rule_reference_point() {
        // Опорная точка: дистанция 25 см, сближение на 8 см за такт.
        // Значение зафиксировано на сетке 1001 и лежит в полосе "maintain".
        let engine = speed_engine().unwrap();
        let out = engine.evaluate(&[25.0, -8.0]).unwrap();
        assert!((out - 1.2121558957321266).abs() < 1e-6);
        assert!(out > speed::MAINTAIN[0] && out < speed::MAINTAIN[2]);
    }

    #[test]
    fn test_single_input_fires_only_near() {
        // Дистанция 5 см внутри плато "near" и вне остальных форм:
        // выход равен центроиду изолированной формы "fast"
        let engine = speed_engine_single().unwrap();
        let out = engine.evaluate(&[5.0]).unwrap();
        assert!((out - 1.118540776394621).abs() < 1e-6);

        // Тот же центроид через движок с единственным правилом
        let isolated = EngineBuilder::new()
            .input(
                FuzzyVariable::new(
                    "x",
                    (0.0, 100.0),
                    &[MembershipFunction::trapezoidal(
                        "any",
                        [0.0, 0.0, 100.0, 100.0],
                    )],
                )
                .unwrap(),
            )
            .output(
                FuzzyVariable::new(
                    "speed",
                    speed_single::UNIVERSE,
                    &[MembershipFunction::trapezoidal("fast", speed_single::FAST)],
                )
                .unwrap(),
            )
            .rule(Rule::new(&[(0, 0)], Combinator::And, 0).unwrap())
            .build()
            .unwrap();
        let fast_centroid = isolated.evaluate(&[5.0]).unwrap();
        assert_eq!(out.to_bits(), fast_centroid.to_bits());
    }

    #[test]
    fn test_zero_activation_fallback() {
        // Измерение вне носителей всех форм дистанции: правила молчат,
        // выход — середина универсума скорости
        let engine = speed_engine_single().unwrap();
        let out = engine.evaluate(&[200.0]).unwrap();
        assert_eq!(out, 0.7);
    }

    #[test]
    fn test_controller_update_derives_delta() {
        let mut controller = DistanceController::new().unwrap();
        // Первый вызов: изменение нулевое
        let first = controller.update(25.0).unwrap();
        let expected = controller.compute(25.0, 0.0).unwrap();
        assert_eq!(first.to_bits(), expected.to_bits());

        // Второй вызов: сближение на 8 см
        let second = controller.update(17.0).unwrap();
        let expected = controller.compute(17.0, -8.0).unwrap();
        assert_eq!(second.to_bits(), expected.to_bits());
    }

    #[test]
    fn test_controller_reset() {
        let mut controller = DistanceController::new().unwrap();
        controller.update(40.0).unwrap();
        controller.reset();
        let after_reset = controller.update(25.0).unwrap();
        let expected = controller.compute(25.0, 0.0).unwrap();
        assert_eq!(after_reset.to_bits(), expected.to_bits());
    }

    #[test]
    fn test_speed_stays_in_universe() {
        let controller = DistanceController::new().unwrap();
        for dist in [0.0_f32, 10.0, 25.0, 40.0, 55.0, 70.0, 80.0] {
            for delta in [-30.0_f32, -8.0, 0.0, 8.0, 30.0] {
                let speed = controller.compute(dist, delta).unwrap();
                assert!((0.0..=2.93).contains(&speed), "speed {} out of range", speed);
            }
        }
    }
}
