//! Конфигурация нечетких контроллеров ровера
//!
//! Статические таблицы переменных и правил: универсумы, параметры
//! функций принадлежности и таблицы правил для контроллеров
//! "дистанция -> скорость" и "просветы -> руление". Таблицы собираются
//! в движок один раз при старте и дальше только читаются.

/// Дистанция до препятствия/цели по фронтальному дальномеру (см)
pub mod distance {
    /// Универсум (см)
    pub const UNIVERSE: (f64, f64) = (0.0, 80.0);

    // Трапеции [a, b, c, d], треугольники [a, b, c]
    pub const NEAR: [f64; 4] = [0.0, 0.0, 15.0, 30.0];
    pub const MEDIUM: [f64; 3] = [20.0, 40.0, 60.0];
    pub const FAR: [f64; 4] = [50.0, 65.0, 80.0, 80.0];
}

/// Изменение дистанции между соседними измерениями (см)
pub mod approach {
    pub const UNIVERSE: (f64, f64) = (-40.0, 40.0);

    pub const TOO_CLOSE: [f64; 4] = [-40.0, -40.0, -20.0, -5.0];
    pub const IDEAL: [f64; 3] = [-10.0, 0.0, 10.0];
    pub const TOO_FAR: [f64; 4] = [5.0, 20.0, 40.0, 40.0];
}

/// Скорость движения (м/с), двухвходовая таблица
pub mod speed {
    pub const UNIVERSE: (f64, f64) = (0.0, 2.93);

    pub const SLOW: [f64; 4] = [0.0, 0.0, 1.0, 1.5];
    pub const MAINTAIN: [f64; 3] = [1.0, 1.75, 2.5];
    pub const FAST: [f64; 4] = [2.0, 2.5, 2.93, 2.93];

    /// Индексы выходных функций
    pub const IDX_SLOW: usize = 0;
    pub const IDX_MAINTAIN: usize = 1;
    pub const IDX_FAST: usize = 2;

    /// Таблица правил: (функция дистанции, функция изменения, функция скорости),
    /// конъюнкция, вес 1. Порядок функций: near/medium/far и
    /// too_close/ideal/too_far.
    pub const RULES: [(usize, usize, usize); 9] = [
        (0, 0, IDX_SLOW),
        (1, 0, IDX_SLOW),
        (2, 0, IDX_FAST),
        (0, 1, IDX_MAINTAIN),
        (1, 1, IDX_MAINTAIN),
        (2, 1, IDX_MAINTAIN),
        (0, 2, IDX_FAST),
        (1, 2, IDX_FAST),
        (2, 2, IDX_SLOW),
    ];
}

/// Скорость движения (м/с), одновходовый вариант таблицы
///
/// Упрощенная база: только фронтальная дистанция, без канала изменения.
/// Оба варианта — конфигурации одного движка, а не отдельные контроллеры.
pub mod speed_single {
    pub const UNIVERSE: (f64, f64) = (0.0, 1.4);

    pub const SLOW: [f64; 4] = [0.0, 0.0, 0.4, 0.7];
    pub const MAINTAIN: [f64; 3] = [0.4, 0.7, 1.0];
    pub const FAST: [f64; 4] = [0.7, 1.0, 1.4, 1.4];

    /// Правила: (функция дистанции, функция скорости)
    pub const RULES: [(usize, usize); 3] = [(0, 2), (1, 1), (2, 0)];
}

/// Боковой просвет до препятствия (см), левый и правый дальномеры
pub mod clearance {
    pub const UNIVERSE: (f64, f64) = (0.0, 80.0);

    pub const NEAR: [f64; 4] = [0.0, 0.0, 15.0, 30.0];
    pub const MEDIUM: [f64; 3] = [20.0, 40.0, 60.0];
    pub const FAR: [f64; 4] = [50.0, 65.0, 80.0, 80.0];
}

/// Угол руления (градусы), положительный угол — поворот вправо
pub mod steering {
    pub const UNIVERSE: (f64, f64) = (-30.0, 30.0);

    pub const HARD_LEFT: [f64; 4] = [-30.0, -30.0, -20.0, -10.0];
    pub const LEFT: [f64; 3] = [-20.0, -10.0, 0.0];
    pub const STRAIGHT: [f64; 3] = [-5.0, 0.0, 5.0];
    pub const RIGHT: [f64; 3] = [0.0, 10.0, 20.0];
    pub const HARD_RIGHT: [f64; 4] = [10.0, 20.0, 30.0, 30.0];

    pub const IDX_HARD_LEFT: usize = 0;
    pub const IDX_LEFT: usize = 1;
    pub const IDX_STRAIGHT: usize = 2;
    pub const IDX_RIGHT: usize = 3;
    pub const IDX_HARD_RIGHT: usize = 4;

    /// Таблица правил: (функция левого просвета, функция правого, функция угла).
    /// Руль уводит ровер в сторону большего просвета; при равных
    /// просветах едем прямо.
    pub const RULES: [(usize, usize, usize); 9] = [
        (0, 0, IDX_STRAIGHT),
        (0, 1, IDX_RIGHT),
        (0, 2, IDX_HARD_RIGHT),
        (1, 0, IDX_LEFT),
        (1, 1, IDX_STRAIGHT),
        (1, 2, IDX_RIGHT),
        (2, 0, IDX_HARD_LEFT),
        (2, 1, IDX_LEFT),
        (2, 2, IDX_STRAIGHT),
    ];
}
