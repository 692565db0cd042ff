//! Параметрические функции принадлежности
//!
//! Поддерживаются треугольная и трапециевидная формы. Степень
//! принадлежности определена для любого вещественного x: ноль вне
//! носителя, единица на плато, линейная интерполяция на склонах.

use crate::fuzzy::FuzzyError;

/// Форма функции принадлежности
///
/// Параметры перечислены слева направо по оси x и обязаны быть
/// неубывающими. Склон нулевой ширины (например, a == b) считается
/// вертикальным и на своей границе дает единицу.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Shape {
    /// Треугольник: подъем a..b, пик в b, спад b..c
    Triangular { a: f64, b: f64, c: f64 },
    /// Трапеция: подъем a..b, плато b..c, спад c..d
    Trapezoidal { a: f64, b: f64, c: f64, d: f64 },
}

/// Именованная функция принадлежности
///
/// Неизменяема после создания; корректность параметров проверяется
/// при сборке движка.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MembershipFunction {
    name: &'static str,
    shape: Shape,
}

impl MembershipFunction {
    /// Треугольная функция с параметрами [a, b, c]
    pub fn triangular(name: &'static str, p: [f64; 3]) -> Self {
        Self {
            name,
            shape: Shape::Triangular {
                a: p[0],
                b: p[1],
                c: p[2],
            },
        }
    }

    /// Трапециевидная функция с параметрами [a, b, c, d]
    pub fn trapezoidal(name: &'static str, p: [f64; 4]) -> Self {
        Self {
            name,
            shape: Shape::Trapezoidal {
                a: p[0],
                b: p[1],
                c: p[2],
                d: p[3],
            },
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn shape(&self) -> Shape {
        self.shape
    }

    /// Степень принадлежности точки x, всегда в [0, 1]
    pub fn compute(&self, x: f64) -> f64 {
        match self.shape {
            Shape::Triangular { a, b, c } => {
                if x < a || x > c {
                    0.0
                } else if x < b {
                    // Восходящий склон
                    if b == a {
                        1.0
                    } else {
                        (x - a) / (b - a)
                    }
                } else if x == b {
                    1.0
                } else {
                    // Нисходящий склон
                    if c == b {
                        1.0
                    } else {
                        (c - x) / (c - b)
                    }
                }
            }
            Shape::Trapezoidal { a, b, c, d } => {
                if x < a || x > d {
                    0.0
                } else if x < b {
                    if b == a {
                        1.0
                    } else {
                        (x - a) / (b - a)
                    }
                } else if x <= c {
                    // Плато
                    1.0
                } else {
                    if d == c {
                        1.0
                    } else {
                        (d - x) / (d - c)
                    }
                }
            }
        }
    }

    /// Проверка неубывания параметров формы
    pub(crate) fn validate(&self) -> Result<(), FuzzyError> {
        let ok = match self.shape {
            Shape::Triangular { a, b, c } => a <= b && b <= c,
            Shape::Trapezoidal { a, b, c, d } => a <= b && b <= c && c <= d,
        };
        if ok {
            Ok(())
        } else {
            Err(FuzzyError::InvalidShape)
        }
    }

    /// Ширина самого узкого ненулевого склона, если такой есть
    ///
    /// Используется при выборе шага сетки дефаззификации: сетка не должна
    /// быть грубее самого крутого склона выходных форм.
    pub(crate) fn narrowest_ramp(&self) -> Option<f64> {
        let (rise, fall) = match self.shape {
            Shape::Triangular { a, b, c } => (b - a, c - b),
            Shape::Trapezoidal { a, b, c, d } => (b - a, d - c),
        };
        match (rise > 0.0, fall > 0.0) {
            (true, true) => Some(if rise < fall { rise } else { fall }),
            (true, false) => Some(rise),
            (false, true) => Some(fall),
            (false, false) => None,
        }
    }
}
